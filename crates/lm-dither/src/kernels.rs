/// 4x4 dither kernels.
///
/// Conventions:
/// - `+1` cells expect ink, `-1` cells expect background.
/// - A window score is the elementwise product sum against the window's
///   `+1`/`-1` pixels, so a perfect match scores 16.
/// - [`PRIORITY`] fixes both the scoring order and the tie break: the
///   first kernel reaching the maximum score wins.
pub const KERNEL_DIM: usize = 4;

/// Window step; one row/column of overlap between neighboring windows.
pub const KERNEL_STRIDE: usize = KERNEL_DIM - 1;

pub type Kernel = [[i32; KERNEL_DIM]; KERNEL_DIM];

const FULL: Kernel = [
    [1, 1, 1, 1],
    [1, 1, 1, 1],
    [1, 1, 1, 1],
    [1, 1, 1, 1],
];

const EMPTY: Kernel = [
    [-1, -1, -1, -1],
    [-1, -1, -1, -1],
    [-1, -1, -1, -1],
    [-1, -1, -1, -1],
];

const UPPER_LEFT: Kernel = [
    [1, 1, -1, -1],
    [1, 1, -1, -1],
    [-1, -1, -1, -1],
    [-1, -1, -1, -1],
];

const UPPER_RIGHT: Kernel = [
    [-1, -1, 1, 1],
    [-1, -1, 1, 1],
    [-1, -1, -1, -1],
    [-1, -1, -1, -1],
];

const LOWER_LEFT: Kernel = [
    [-1, -1, -1, -1],
    [-1, -1, -1, -1],
    [1, 1, -1, -1],
    [1, 1, -1, -1],
];

const LOWER_RIGHT: Kernel = [
    [-1, -1, -1, -1],
    [-1, -1, -1, -1],
    [-1, -1, 1, 1],
    [-1, -1, 1, 1],
];

const VERTICAL_LEFT: Kernel = [
    [1, 1, -1, -1],
    [1, 1, -1, -1],
    [1, 1, -1, -1],
    [1, 1, -1, -1],
];

const VERTICAL_RIGHT: Kernel = [
    [-1, -1, 1, 1],
    [-1, -1, 1, 1],
    [-1, -1, 1, 1],
    [-1, -1, 1, 1],
];

const HORIZONTAL_UP: Kernel = [
    [1, 1, 1, 1],
    [1, 1, 1, 1],
    [-1, -1, -1, -1],
    [-1, -1, -1, -1],
];

const HORIZONTAL_DOWN: Kernel = [
    [-1, -1, -1, -1],
    [-1, -1, -1, -1],
    [1, 1, 1, 1],
    [1, 1, 1, 1],
];

/// Rectangle primitive selected for a dither cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    Full,
    Empty,
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
    VerticalLeft,
    VerticalRight,
    HorizontalUp,
    HorizontalDown,
}

/// Scoring and tie-break order.
pub const PRIORITY: [Primitive; 10] = [
    Primitive::Full,
    Primitive::Empty,
    Primitive::UpperLeft,
    Primitive::UpperRight,
    Primitive::LowerLeft,
    Primitive::LowerRight,
    Primitive::VerticalLeft,
    Primitive::VerticalRight,
    Primitive::HorizontalUp,
    Primitive::HorizontalDown,
];

impl Primitive {
    pub fn kernel(self) -> &'static Kernel {
        match self {
            Self::Full => &FULL,
            Self::Empty => &EMPTY,
            Self::UpperLeft => &UPPER_LEFT,
            Self::UpperRight => &UPPER_RIGHT,
            Self::LowerLeft => &LOWER_LEFT,
            Self::LowerRight => &LOWER_RIGHT,
            Self::VerticalLeft => &VERTICAL_LEFT,
            Self::VerticalRight => &VERTICAL_RIGHT,
            Self::HorizontalUp => &HORIZONTAL_UP,
            Self::HorizontalDown => &HORIZONTAL_DOWN,
        }
    }
}
