use lm_core::Poly;

/// Replication offsets in pixel-pitch multiples: identity plus one pitch
/// on each axis direction.
const MASK_OFFSETS: [(f64, f64); 5] = [(0.0, 0.0), (1.0, 0.0), (-1.0, 0.0), (0.0, 1.0), (0.0, -1.0)];

/// Replicates the conductor footprint at five translations so the
/// subtraction leaves at least one pixel pitch of clearance around the
/// original geometry.
pub fn replicate_mask(footprint: &[Poly], pitch: f64) -> Vec<Poly> {
    let mut mask = Vec::with_capacity(footprint.len() * MASK_OFFSETS.len());
    for (dx, dy) in MASK_OFFSETS {
        for poly in footprint {
            mask.push(poly.translated(dx * pitch, dy * pitch));
        }
    }
    mask
}
