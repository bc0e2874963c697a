//! Umbrella crate for the `lithomark` workspace.
//!
//! Re-exports the foundational crates and hosts the sequential pipeline
//! runner plus the SVG preview writer.

pub use lm_compose::*;
pub use lm_core::*;
pub use lm_dither::*;
pub use lm_gds::{
    ExportUnits, GdsPoly, Library, StructRef, Structure, decode_real8, encode_real8,
    library_bytes, write_library,
};

pub mod pipeline;
pub mod svg;
