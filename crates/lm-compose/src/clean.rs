use lm_core::{PIXEL_PITCH_DBU, Poly};
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanConfig {
    /// Minimum axis-aligned extent a polygon must reach on both axes.
    pub min_extent_dbu: f64,
}

impl Default for CleanConfig {
    fn default() -> Self {
        Self {
            min_extent_dbu: PIXEL_PITCH_DBU,
        }
    }
}

/// Filters the composer's raw output down to well-formed quadrilaterals.
///
/// Rejections are logged and dropped; the pass is best-effort and makes
/// no design-rule guarantee beyond the minimum-extent heuristic.
/// Idempotent: cleaning a cleaned set changes nothing.
pub fn clean(polys: &[Poly], cfg: &CleanConfig) -> Vec<Poly> {
    polys
        .iter()
        .filter(|p| keep(p, cfg.min_extent_dbu))
        .cloned()
        .collect()
}

fn keep(poly: &Poly, min_extent: f64) -> bool {
    if poly.points.len() != 4 {
        warn!(
            vertices = poly.points.len(),
            "rejecting non-quadrilateral polygon"
        );
        return false;
    }

    let bbox = poly.bbox().expect("quadrilateral has a bounding box");
    if bbox.width() < min_extent || bbox.height() < min_extent {
        warn!(
            width = bbox.width(),
            height = bbox.height(),
            "rejecting undersized polygon"
        );
        return false;
    }
    true
}
