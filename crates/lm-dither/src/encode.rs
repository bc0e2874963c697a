use lm_core::{BitGrid, DbRect};

use crate::kernels::{KERNEL_DIM, KERNEL_STRIDE, PRIORITY, Primitive};

/// One classified window on the stride grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DitherCell {
    pub row: usize,
    pub col: usize,
    pub primitive: Primitive,
}

/// Scores the 4x4 window with its top-left pixel at `(col, row)` against
/// every kernel and returns the winner.
///
/// The window must lie fully inside the grid. Ink maps to `+1`,
/// background to `-1`; ties resolve to the first maximum in
/// [`PRIORITY`] order.
pub fn classify_window(grid: &BitGrid, row: usize, col: usize) -> Primitive {
    let mut window = [[0i32; KERNEL_DIM]; KERNEL_DIM];
    for (dy, wrow) in window.iter_mut().enumerate() {
        for (dx, w) in wrow.iter_mut().enumerate() {
            let ink = grid
                .get(col + dx, row + dy)
                .expect("window must lie inside the grid");
            *w = if ink { 1 } else { -1 };
        }
    }

    let mut best = PRIORITY[0];
    let mut best_score = i32::MIN;
    for prim in PRIORITY {
        let kernel = prim.kernel();
        let mut score = 0;
        for dy in 0..KERNEL_DIM {
            for dx in 0..KERNEL_DIM {
                score += window[dy][dx] * kernel[dy][dx];
            }
        }
        if score > best_score {
            best_score = score;
            best = prim;
        }
    }
    best
}

/// Slides the classification window over the grid and emits one cell per
/// stride position.
///
/// Window starts range over `0..dim - KERNEL_DIM` (exclusive) per axis
/// with step [`KERNEL_STRIDE`], so the window never crosses the grid
/// boundary and neighboring windows overlap by one pixel. Cells come out
/// in deterministic column-major order.
pub fn encode(grid: &BitGrid) -> Vec<DitherCell> {
    let mut cells = Vec::new();
    let col_end = grid.width().saturating_sub(KERNEL_DIM);
    let row_end = grid.height().saturating_sub(KERNEL_DIM);

    for col in (0..col_end).step_by(KERNEL_STRIDE) {
        for row in (0..row_end).step_by(KERNEL_STRIDE) {
            cells.push(DitherCell {
                row,
                col,
                primitive: classify_window(grid, row, col),
            });
        }
        let percent = (col as f64 / grid.width() as f64 * 10000.0).round() / 100.0;
        tracing::info!(percent, "dither scan progress");
    }
    cells
}

impl Primitive {
    /// Rectangle emitted for a cell at `(row, col)`, in database units.
    ///
    /// Cells sit on a 2-pixel-pitch layout cell: `x = col * pitch`,
    /// `y = -row * pitch` (raster rows grow downward, layout y upward).
    /// `Empty` emits nothing.
    pub fn placement(self, row: usize, col: usize, pitch: f64) -> Option<DbRect> {
        // (x offset, y offset, width, height) in pixel-pitch multiples,
        // relative to the cell anchor.
        let (ox, oy, w, h) = match self {
            Self::Full => (0.0, 0.0, 2.0, 2.0),
            Self::Empty => return None,
            Self::UpperLeft => (0.0, 1.0, 1.0, 1.0),
            Self::UpperRight => (1.0, 1.0, 1.0, 1.0),
            Self::LowerLeft => (0.0, 0.0, 1.0, 1.0),
            Self::LowerRight => (1.0, 0.0, 1.0, 1.0),
            Self::VerticalLeft => (0.0, 0.0, 1.0, 2.0),
            Self::VerticalRight => (1.0, 0.0, 1.0, 2.0),
            Self::HorizontalUp => (0.0, 1.0, 2.0, 1.0),
            Self::HorizontalDown => (0.0, 0.0, 2.0, 1.0),
        };

        let x0 = (col as f64 + ox) * pitch;
        let y0 = (-(row as f64) + oy) * pitch;
        Some(DbRect::new(x0, y0, x0 + w * pitch, y0 + h * pitch))
    }
}

/// Maps every cell to its rectangle; the returned list is the merged
/// union of all placed primitives.
pub fn placed_rects(cells: &[DitherCell], pitch: f64) -> Vec<DbRect> {
    cells
        .iter()
        .filter_map(|cell| cell.primitive.placement(cell.row, cell.col, pitch))
        .collect()
}

#[cfg(test)]
mod tests {
    use lm_core::{BitGrid, DbRect};

    use super::{DitherCell, classify_window, encode, placed_rects};
    use crate::kernels::Primitive;

    fn grid_from_rows(rows: &[&[u8]]) -> BitGrid {
        let height = rows.len();
        let width = rows[0].len();
        let data = rows
            .iter()
            .flat_map(|r| r.iter().map(|&v| v != 0))
            .collect();
        BitGrid::from_vec(width, height, data).expect("valid grid")
    }

    #[test]
    fn all_foreground_classifies_full_everywhere() {
        let grid = BitGrid::new_fill(10, 10, true);
        let cells = encode(&grid);
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|c| c.primitive == Primitive::Full));
    }

    #[test]
    fn all_background_classifies_empty_and_places_nothing() {
        let grid = BitGrid::new_fill(10, 10, false);
        let cells = encode(&grid);
        assert_eq!(cells.len(), 4);
        assert!(cells.iter().all(|c| c.primitive == Primitive::Empty));
        assert!(placed_rects(&cells, 2000.0).is_empty());
    }

    #[test]
    fn window_may_not_start_on_the_last_possible_position() {
        // Starts are exclusive of dim - 4: a 7x7 grid hosts only the
        // (0, 0) window even though (3, 3) would still fit.
        let grid = BitGrid::new_fill(7, 7, true);
        let cells = encode(&grid);
        assert_eq!(cells.len(), 1);
        assert_eq!((cells[0].row, cells[0].col), (0, 0));
    }

    #[test]
    fn quadrant_patterns_select_their_kernels() {
        let cases: [(&[&[u8]; 4], Primitive); 4] = [
            (
                &[
                    &[1, 1, 0, 0],
                    &[1, 1, 0, 0],
                    &[0, 0, 0, 0],
                    &[0, 0, 0, 0],
                ],
                Primitive::UpperLeft,
            ),
            (
                &[
                    &[0, 0, 1, 1],
                    &[0, 0, 1, 1],
                    &[0, 0, 0, 0],
                    &[0, 0, 0, 0],
                ],
                Primitive::UpperRight,
            ),
            (
                &[
                    &[0, 0, 0, 0],
                    &[0, 0, 0, 0],
                    &[1, 1, 0, 0],
                    &[1, 1, 0, 0],
                ],
                Primitive::LowerLeft,
            ),
            (
                &[
                    &[0, 0, 0, 0],
                    &[0, 0, 0, 0],
                    &[0, 0, 1, 1],
                    &[0, 0, 1, 1],
                ],
                Primitive::LowerRight,
            ),
        ];

        for (rows, expected) in cases {
            let mut padded: Vec<Vec<u8>> = rows.iter().map(|r| r.to_vec()).collect();
            // Pad to 5x5 so the (0, 0) window exists.
            for row in &mut padded {
                row.push(0);
            }
            padded.push(vec![0; 5]);
            let refs: Vec<&[u8]> = padded.iter().map(|r| r.as_slice()).collect();
            let grid = grid_from_rows(&refs);
            assert_eq!(classify_window(&grid, 0, 0), expected);
        }
    }

    #[test]
    fn left_half_window_selects_vertical_left() {
        let grid = grid_from_rows(&[
            &[1, 1, 0, 0, 0],
            &[1, 1, 0, 0, 0],
            &[1, 1, 0, 0, 0],
            &[1, 1, 0, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        assert_eq!(classify_window(&grid, 0, 0), Primitive::VerticalLeft);
    }

    #[test]
    fn score_ties_resolve_to_priority_order() {
        // Three ink columns score 8 for both Full and VerticalLeft;
        // Full is first in priority order.
        let grid = grid_from_rows(&[
            &[1, 1, 1, 0, 0],
            &[1, 1, 1, 0, 0],
            &[1, 1, 1, 0, 0],
            &[1, 1, 1, 0, 0],
            &[0, 0, 0, 0, 0],
        ]);
        assert_eq!(classify_window(&grid, 0, 0), Primitive::Full);

        // A one-pixel checkerboard scores 0 for every kernel.
        let mut data = Vec::with_capacity(25);
        for i in 0..25 {
            data.push((i % 5 + i / 5) % 2 == 0);
        }
        let checker = BitGrid::from_vec(5, 5, data).expect("valid grid");
        assert_eq!(classify_window(&checker, 0, 0), Primitive::Full);
    }

    #[test]
    fn placement_offsets_on_the_two_pixel_cell() {
        let p = 2000.0;
        let cases = [
            (Primitive::Full, Some(DbRect::new(0.0, -2000.0, 4000.0, 2000.0))),
            (Primitive::Empty, None),
            (Primitive::UpperLeft, Some(DbRect::new(0.0, 0.0, 2000.0, 2000.0))),
            (
                Primitive::UpperRight,
                Some(DbRect::new(2000.0, 0.0, 4000.0, 2000.0)),
            ),
            (
                Primitive::LowerLeft,
                Some(DbRect::new(0.0, -2000.0, 2000.0, 0.0)),
            ),
            (
                Primitive::LowerRight,
                Some(DbRect::new(2000.0, -2000.0, 4000.0, 0.0)),
            ),
            (
                Primitive::VerticalLeft,
                Some(DbRect::new(0.0, -2000.0, 2000.0, 2000.0)),
            ),
            (
                Primitive::VerticalRight,
                Some(DbRect::new(2000.0, -2000.0, 4000.0, 2000.0)),
            ),
            (
                Primitive::HorizontalUp,
                Some(DbRect::new(0.0, 0.0, 4000.0, 2000.0)),
            ),
            (
                Primitive::HorizontalDown,
                Some(DbRect::new(0.0, -2000.0, 4000.0, 0.0)),
            ),
        ];
        for (prim, expected) in cases {
            assert_eq!(prim.placement(1, 0, p), expected, "{prim:?}");
        }
    }

    #[test]
    fn checkerboard_regression_placements() {
        // 10x10 board of one-pixel checkers: every window ties at score 0
        // and falls back to Full, giving four full blocks on the stride
        // grid.
        let mut data = Vec::with_capacity(100);
        for i in 0..100 {
            data.push((i % 10 + i / 10) % 2 == 0);
        }
        let grid = BitGrid::from_vec(10, 10, data).expect("valid grid");

        let cells = encode(&grid);
        let expected = [
            DitherCell {
                row: 0,
                col: 0,
                primitive: Primitive::Full,
            },
            DitherCell {
                row: 3,
                col: 0,
                primitive: Primitive::Full,
            },
            DitherCell {
                row: 0,
                col: 3,
                primitive: Primitive::Full,
            },
            DitherCell {
                row: 3,
                col: 3,
                primitive: Primitive::Full,
            },
        ];
        assert_eq!(cells, expected);

        let rects = placed_rects(&cells, 2000.0);
        assert_eq!(rects.len(), 4);
        assert_eq!(rects[0], DbRect::new(0.0, 0.0, 4000.0, 4000.0));
        assert_eq!(rects[1], DbRect::new(0.0, -6000.0, 4000.0, -2000.0));
        assert_eq!(rects[2], DbRect::new(6000.0, 0.0, 10000.0, 4000.0));
        assert_eq!(rects[3], DbRect::new(6000.0, -6000.0, 10000.0, -2000.0));
    }
}
