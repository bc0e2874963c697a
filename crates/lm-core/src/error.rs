use core::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    BufferLength {
        expected: usize,
        actual: usize,
    },
    SizeMismatch {
        image: (usize, usize),
        canvas: (usize, usize),
        /// Centered margin quadruple (bottom, left, top, right) in
        /// pixel-pitch units that would make the image fit.
        suggested_margins: [f64; 4],
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BufferLength { expected, actual } => {
                write!(f, "buffer length mismatch: expected {expected}, got {actual}")
            }
            Self::SizeMismatch {
                image,
                canvas,
                suggested_margins,
            } => {
                let [b, l, t, r] = suggested_margins;
                write!(
                    f,
                    "logo does not fit: {}x{} px in {}x{} px canvas; \
                     to center the logo use margins {b},{l},{t},{r}",
                    image.0, image.1, canvas.0, canvas.1
                )
            }
        }
    }
}

impl std::error::Error for Error {}
