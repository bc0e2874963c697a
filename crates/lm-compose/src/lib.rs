//! Canvas sizing, clearance masking and boolean composition of logo
//! geometry.
//!
//! The composer stages are ordered and non-interleavable: translate into
//! canvas space, grow by the clearance distance, subtract the replicated
//! conductor mask. The cleaner then discards everything that is not a
//! well-sized quadrilateral.

mod canvas;
mod clean;
mod compose;
mod density;
mod mask;

pub use canvas::{CanvasSpec, Margins};
pub use clean::{CleanConfig, clean};
pub use compose::{
    CLEARANCE_GROWTH_DBU, compose, grow_rects, subtract_mask, translate_rects,
};
pub use density::density_percent;
pub use mask::replicate_mask;
