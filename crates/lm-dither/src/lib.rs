//! Block-local vector quantization of a bit grid into rectangle
//! primitives.
//!
//! A 4x4 window slides over the grid with a three-pixel stride and each
//! window is matched against ten fixed kernels; the winning kernel emits
//! at most one rectangle on a 2-pixel-pitch cell. Windows read the shared
//! immutable grid only, so cells are independent of one another.

mod encode;
mod kernels;

pub use encode::{DitherCell, classify_window, encode, placed_rects};
pub use kernels::{KERNEL_DIM, KERNEL_STRIDE, Kernel, PRIORITY, Primitive};
