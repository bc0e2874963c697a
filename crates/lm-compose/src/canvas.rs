use lm_core::{DbRect, Error};

/// Margin quadruple in pixel-pitch units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Margins {
    pub bottom: f64,
    pub left: f64,
    pub top: f64,
    pub right: f64,
}

/// Usable placement region derived from the conductor bounding box.
///
/// Left/right margins shrink the x extent, bottom/top margins the y
/// extent; the pixel size per axis is the floored extent over the pitch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasSpec {
    pub region: DbRect,
    pub width_px: usize,
    pub height_px: usize,
    pub pitch: f64,
    pub margins: Margins,
}

impl CanvasSpec {
    pub fn from_bbox(bbox: DbRect, margins: Margins, pitch: f64) -> Self {
        let region = DbRect::new(
            bbox.min.x + margins.left * pitch,
            bbox.min.y + margins.bottom * pitch,
            bbox.max.x - margins.right * pitch,
            bbox.max.y - margins.top * pitch,
        );
        Self {
            region,
            width_px: floor_px(region.width(), pitch),
            height_px: floor_px(region.height(), pitch),
            pitch,
            margins,
        }
    }

    /// Validates that the raster matches the canvas exactly.
    ///
    /// A mismatch on either axis fails with [`Error::SizeMismatch`]
    /// carrying the centered margin quadruple; nothing is corrected
    /// automatically.
    pub fn fit(&self, img_width: usize, img_height: usize) -> Result<(), Error> {
        if img_width == self.width_px && img_height == self.height_px {
            return Ok(());
        }
        Err(Error::SizeMismatch {
            image: (img_width, img_height),
            canvas: (self.width_px, self.height_px),
            suggested_margins: self.centered_margins(img_width, img_height),
        })
    }

    /// Margin quadruple (bottom, left, top, right) that would center the
    /// given raster on this canvas; bottom/left absorb an odd pixel of
    /// surplus.
    pub fn centered_margins(&self, img_width: usize, img_height: usize) -> [f64; 4] {
        let dw = self.width_px as f64 - img_width as f64;
        let dh = self.height_px as f64 - img_height as f64;
        [
            self.margins.bottom + (dh / 2.0).ceil(),
            self.margins.left + (dw / 2.0).ceil(),
            self.margins.top + (dh / 2.0).floor(),
            self.margins.right + (dw / 2.0).floor(),
        ]
    }

    /// Physical canvas area in squared database units.
    pub fn area(&self) -> f64 {
        self.region.area()
    }
}

fn floor_px(extent: f64, pitch: f64) -> usize {
    let px = (extent / pitch).floor();
    if px.is_finite() && px > 0.0 { px as usize } else { 0 }
}
