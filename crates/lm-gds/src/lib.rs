//! Minimal GDSII stream support: boundary elements, translation-only
//! structure references, excess-64 reals.
//!
//! The reader converts coordinates to a caller-chosen database grid on
//! flattening ("convert on read"); unknown record types are skipped by
//! length. The writer emits boundary-only cells with zeroed timestamps so
//! equal inputs produce identical bytes.

use core::fmt;

mod read;
mod real8;
mod record;
mod write;

pub use read::{GdsPoly, Library, StructRef, Structure};
pub use real8::{decode_real8, encode_real8};
pub use write::{ExportUnits, library_bytes, write_library};

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Truncated { offset: usize },
    Malformed { offset: usize, what: &'static str },
    MissingUnits,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "stream i/o failed: {err}"),
            Self::Truncated { offset } => {
                write!(f, "stream truncated inside record at byte {offset}")
            }
            Self::Malformed { offset, what } => {
                write!(f, "malformed record at byte {offset}: {what}")
            }
            Self::MissingUnits => write!(f, "stream carries no UNITS record"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
