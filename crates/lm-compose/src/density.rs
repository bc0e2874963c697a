use lm_core::Poly;

/// Covered area over canvas area, as a percentage.
///
/// Informational only; no threshold is enforced here.
pub fn density_percent(polys: &[Poly], canvas_area: f64) -> f64 {
    if canvas_area <= 0.0 {
        return 0.0;
    }
    let covered: f64 = polys.iter().map(Poly::area).sum();
    covered / canvas_area * 100.0
}
