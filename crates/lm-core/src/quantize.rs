use crate::{BitGrid, Error};

/// Binarizes an 8-bit luma raster into an ink grid.
///
/// Darker pixels become ink: a pixel is foreground iff
/// `255 - luma - contrast*255 > 0`, i.e. iff its normalized brightness is
/// below `1 - contrast`. `contrast` is expected in `[0, 1]`; at 0 only
/// pure white stays background, at 1 nothing is ink.
pub fn quantize_luma(
    width: usize,
    height: usize,
    luma: &[u8],
    contrast: f64,
) -> Result<BitGrid, Error> {
    let bias = contrast * 255.0;
    let bits = luma
        .iter()
        .map(|&v| 255.0 - f64::from(v) - bias > 0.0)
        .collect();
    BitGrid::from_vec(width, height, bits)
}

#[cfg(test)]
mod tests {
    use super::quantize_luma;

    #[test]
    fn mid_contrast_thresholds_at_half_brightness() {
        let grid = quantize_luma(4, 1, &[0, 100, 128, 255], 0.5).expect("valid buffer");
        assert_eq!(grid.data(), &[true, true, false, false]);
    }

    #[test]
    fn zero_contrast_keeps_only_pure_white_as_background() {
        let grid = quantize_luma(3, 1, &[0, 254, 255], 0.0).expect("valid buffer");
        assert_eq!(grid.data(), &[true, true, false]);
    }

    #[test]
    fn full_contrast_produces_no_ink() {
        let grid = quantize_luma(2, 2, &[0, 10, 200, 255], 1.0).expect("valid buffer");
        assert!(grid.data().iter().all(|&b| !b));
    }

    #[test]
    fn dimensions_must_match_buffer() {
        assert!(quantize_luma(3, 3, &[0u8; 8], 0.5).is_err());
    }
}
