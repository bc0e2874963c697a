use cavalier_contours::polyline::{BooleanOp, PlineSource, PlineSourceMut, Polyline};
use lm_core::{DbPoint, DbRect, Poly};
use tracing::warn;

/// Outward growth applied before mask subtraction, in database units.
/// Required for manufacturing spacing compliance; see [`compose`].
pub const CLEARANCE_GROWTH_DBU: f64 = 2.0;

/// Shifts the primitive union into canvas space.
pub fn translate_rects(rects: &[DbRect], dx: f64, dy: f64) -> Vec<DbRect> {
    rects.iter().map(|r| r.translated(dx, dy)).collect()
}

/// Grows every rectangle outward by `distance`.
///
/// Placed primitives are pairwise disjoint with at least one pixel of
/// gap, so growing the union equals growing each rectangle.
pub fn grow_rects(rects: &[DbRect], distance: f64) -> Vec<DbRect> {
    rects.iter().map(|r| r.inflated(distance)).collect()
}

/// Boolean-subtracts every mask polygon from every rectangle.
///
/// A subtraction that cuts a hole discards the piece entirely: keeping
/// only the outer ring would claim area inside the conductor mask.
pub fn subtract_mask(rects: &[DbRect], mask: &[Poly]) -> Vec<Poly> {
    let mask_plines: Vec<(Polyline<f64>, DbRect)> = mask
        .iter()
        .filter_map(|p| Some((poly_to_pline(p)?, p.bbox()?)))
        .collect();

    let mut out = Vec::new();
    for rect in rects {
        let mut pieces: Vec<Polyline<f64>> = vec![rect_to_pline(rect)];
        for (mask_pl, mask_bbox) in &mask_plines {
            if pieces.is_empty() {
                break;
            }
            let mut next = Vec::new();
            for piece in &pieces {
                if !pline_bbox(piece).intersects(mask_bbox) {
                    next.push(piece.clone());
                    continue;
                }
                let result = piece.boolean(mask_pl, BooleanOp::Not);
                if result.neg_plines.is_empty() {
                    next.extend(result.pos_plines.into_iter().map(|bp| bp.pline));
                } else {
                    warn!(
                        holes = result.neg_plines.len(),
                        "subtraction cut a hole; dropping piece to preserve clearance"
                    );
                }
            }
            pieces = next;
        }
        out.extend(pieces.iter().map(pline_to_poly));
    }
    out
}

/// Runs the three ordered composition stages: translate, grow, subtract.
///
/// Growing must precede subtraction; the reverse order lets geometry
/// closer than the clearance distance survive the mask.
pub fn compose(rects: &[DbRect], shift: (f64, f64), growth: f64, mask: &[Poly]) -> Vec<Poly> {
    let placed = translate_rects(rects, shift.0, shift.1);
    let grown = grow_rects(&placed, growth);
    subtract_mask(&grown, mask)
}

fn rect_to_pline(rect: &DbRect) -> Polyline<f64> {
    let mut pl = Polyline::new_closed();
    for c in rect.corners() {
        pl.add(c.x, c.y, 0.0);
    }
    pl
}

fn poly_to_pline(poly: &Poly) -> Option<Polyline<f64>> {
    if poly.points.len() < 3 {
        return None;
    }
    let mut pl = Polyline::new_closed();
    for p in &poly.points {
        pl.add(p.x, p.y, 0.0);
    }
    Some(pl)
}

fn pline_to_poly(pl: &Polyline<f64>) -> Poly {
    let points = (0..pl.vertex_count())
        .map(|i| {
            let v = pl.at(i);
            debug_assert!(v.bulge_is_zero(), "straight-edge input produced an arc");
            DbPoint { x: v.x, y: v.y }
        })
        .collect();
    Poly { points }
}

fn pline_bbox(pl: &Polyline<f64>) -> DbRect {
    let mut bbox = DbRect::new(f64::INFINITY, f64::INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY);
    for i in 0..pl.vertex_count() {
        let v = pl.at(i);
        bbox.min.x = bbox.min.x.min(v.x);
        bbox.min.y = bbox.min.y.min(v.y);
        bbox.max.x = bbox.max.x.max(v.x);
        bbox.max.y = bbox.max.y.max(v.y);
    }
    bbox
}

#[cfg(test)]
mod tests {
    use lm_core::{DbRect, Poly};

    use super::{CLEARANCE_GROWTH_DBU, compose, grow_rects, subtract_mask, translate_rects};
    use crate::clean::{CleanConfig, clean};

    #[test]
    fn disjoint_mask_leaves_rectangles_untouched() {
        let rects = [DbRect::new(0.0, 0.0, 2000.0, 2000.0)];
        let mask = [Poly::from_rect(&DbRect::new(10000.0, 0.0, 12000.0, 2000.0))];

        let out = subtract_mask(&rects, &mask);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].points.len(), 4);
        assert!((out[0].area() - 4e6).abs() < 1e-6);
        assert_eq!(out[0].bbox(), Some(rects[0]));
    }

    #[test]
    fn covered_rectangle_vanishes() {
        let rects = [DbRect::new(0.0, 0.0, 2000.0, 2000.0)];
        let mask = [Poly::from_rect(&DbRect::new(-100.0, -100.0, 2100.0, 2100.0))];
        assert!(subtract_mask(&rects, &mask).is_empty());
    }

    #[test]
    fn mask_island_inside_rectangle_drops_the_piece() {
        let rects = [DbRect::new(0.0, 0.0, 2000.0, 2000.0)];
        let mask = [Poly::from_rect(&DbRect::new(900.0, 900.0, 1100.0, 1100.0))];
        assert!(subtract_mask(&rects, &mask).is_empty());
    }

    #[test]
    fn overlapping_mask_clips_to_a_notched_polygon() {
        let rects = [DbRect::new(-2.0, -2.0, 2002.0, 2002.0)];
        let mask = [Poly::from_rect(&DbRect::new(2001.0, 0.0, 4000.0, 2000.0))];

        let out = subtract_mask(&rects, &mask);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].points.len(), 8, "notch adds four vertices");
        let expected_area = 2004.0 * 2004.0 - 1.0 * 2000.0;
        assert!((out[0].area() - expected_area).abs() < 1e-6);
    }

    #[test]
    fn grow_then_subtract_excludes_geometry_within_clearance() {
        // One pixel-sized rectangle one database unit away from the
        // mask: closer than the clearance growth.
        let rects = [DbRect::new(0.0, 0.0, 2000.0, 2000.0)];
        let mask = [Poly::from_rect(&DbRect::new(2001.0, 0.0, 4000.0, 2000.0))];
        let cfg = CleanConfig::default();

        // Correct order: grow, then subtract. The clipped result is no
        // longer a quadrilateral and the cleaner removes it.
        let composed = compose(&rects, (0.0, 0.0), CLEARANCE_GROWTH_DBU, &mask);
        assert!(clean(&composed, &cfg).is_empty());

        // Reversed order: subtraction sees no overlap and the grown
        // quadrilateral survives, violating the clearance.
        let subtracted = subtract_mask(&rects, &mask);
        let regrown: Vec<Poly> = subtracted
            .iter()
            .map(|p| {
                let bbox = p.bbox().expect("non-empty polygon");
                Poly::from_rect(&bbox.inflated(CLEARANCE_GROWTH_DBU))
            })
            .collect();
        assert_eq!(clean(&regrown, &cfg).len(), 1);
    }

    #[test]
    fn compose_translates_before_masking() {
        let rects = [DbRect::new(0.0, -2000.0, 2000.0, 0.0)];
        let mask: [Poly; 0] = [];
        let out = compose(&rects, (1000.0, 4000.0), 0.0, &mask);
        assert_eq!(out.len(), 1);
        assert_eq!(
            out[0].bbox(),
            Some(DbRect::new(1000.0, 2000.0, 3000.0, 4000.0))
        );
    }

    #[test]
    fn stage_helpers_are_pure() {
        let rects = [DbRect::new(0.0, 0.0, 10.0, 10.0)];
        assert_eq!(
            translate_rects(&rects, 5.0, -5.0),
            vec![DbRect::new(5.0, -5.0, 15.0, 5.0)]
        );
        assert_eq!(
            grow_rects(&rects, 2.0),
            vec![DbRect::new(-2.0, -2.0, 12.0, 12.0)]
        );
    }
}
