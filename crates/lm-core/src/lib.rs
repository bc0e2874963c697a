//! Foundational primitives for the lithomark logo pipeline.
//!
//! ## Coordinate Conventions
//! Layout geometry uses f64 coordinates in database units (1 DBU = 1 nm
//! at the default export precision). Layout y grows upward while raster
//! rows grow downward; the dither encoder performs the flip.
//!
//! ## Pixel Pitch
//! One logo pixel spans [`PIXEL_PITCH_DBU`] database units on each axis.
//! Canvas sizing, mask replication and primitive placement all share this
//! constant.

mod error;
mod geom;
mod grid;
mod quantize;

pub use error::Error;
pub use geom::{DbPoint, DbRect, Poly, bounding_box};
pub use grid::BitGrid;
pub use quantize::quantize_luma;

/// Database units covered by one logo pixel on each axis.
pub const PIXEL_PITCH_DBU: f64 = 2000.0;
