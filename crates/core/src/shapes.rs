//! Shapes module - the immutable tetromino shape table
//!
//! Every kind starts from a square base layout (4x4 for I, 2x2 for O, 3x3 for
//! the rest). The other three rotation grids are derived from it once, at
//! compile time, by transposing and mirroring:
//!
//! - 90° clockwise: transpose, then reverse each row
//! - 180°: reverse the row order, then reverse each row
//! - 270° clockwise: transpose, then reverse the row order
//!
//! Lookups index the cached grids with `rotation mod 4`; nothing is rotated at
//! runtime and the table is never mutated.

use crate::types::{PieceKind, Rotation};

/// Offset of a single mino from the piece origin, as `(col, row)`
pub type MinoOffset = (i8, i8);

/// Shape of a piece - 4 mino offsets from the piece origin, row-major order
pub type PieceShape = [MinoOffset; 4];

/// Largest base layout side (the I piece)
const MAX_GRID: usize = 4;

/// Occupancy bitmap of one rotation state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid {
    size: u8,
    rows: [[bool; MAX_GRID]; MAX_GRID],
}

impl Grid {
    const fn from_layout(size: u8, layout: [[u8; MAX_GRID]; MAX_GRID]) -> Self {
        let mut rows = [[false; MAX_GRID]; MAX_GRID];
        let mut r = 0;
        while r < MAX_GRID {
            let mut c = 0;
            while c < MAX_GRID {
                rows[r][c] = layout[r][c] != 0;
                c += 1;
            }
            r += 1;
        }
        Self { size, rows }
    }

    /// Side length of the square layout
    pub const fn size(&self) -> u8 {
        self.size
    }

    /// Whether the cell at `(col, row)` is occupied; out-of-grid cells are empty
    pub const fn is_set(&self, col: usize, row: usize) -> bool {
        col < MAX_GRID && row < MAX_GRID && self.rows[row][col]
    }

    const fn transpose(self) -> Self {
        let n = self.size as usize;
        let mut rows = [[false; MAX_GRID]; MAX_GRID];
        let mut r = 0;
        while r < n {
            let mut c = 0;
            while c < n {
                rows[r][c] = self.rows[c][r];
                c += 1;
            }
            r += 1;
        }
        Self { size: self.size, rows }
    }

    const fn reverse_row_order(self) -> Self {
        let n = self.size as usize;
        let mut rows = [[false; MAX_GRID]; MAX_GRID];
        let mut r = 0;
        while r < n {
            rows[r] = self.rows[n - 1 - r];
            r += 1;
        }
        Self { size: self.size, rows }
    }

    const fn reverse_each_row(self) -> Self {
        let n = self.size as usize;
        let mut rows = [[false; MAX_GRID]; MAX_GRID];
        let mut r = 0;
        while r < n {
            let mut c = 0;
            while c < n {
                rows[r][c] = self.rows[r][n - 1 - c];
                c += 1;
            }
            r += 1;
        }
        Self { size: self.size, rows }
    }

    /// Grid turned 90° clockwise
    pub const fn rotated_cw(self) -> Self {
        self.transpose().reverse_each_row()
    }

    /// Grid turned 180°
    pub const fn rotated_half(self) -> Self {
        self.reverse_row_order().reverse_each_row()
    }

    /// Grid turned 270° clockwise (90° counter-clockwise)
    pub const fn rotated_ccw(self) -> Self {
        self.transpose().reverse_row_order()
    }

    /// Occupied cells in row-major order
    const fn minos(&self) -> PieceShape {
        let mut out = [(0i8, 0i8); 4];
        let mut n = 0;
        let mut r = 0;
        while r < MAX_GRID {
            let mut c = 0;
            while c < MAX_GRID {
                if self.rows[r][c] {
                    assert!(n < 4, "tetromino layouts have exactly four cells");
                    out[n] = (c as i8, r as i8);
                    n += 1;
                }
                c += 1;
            }
            r += 1;
        }
        assert!(n == 4, "tetromino layouts have exactly four cells");
        out
    }
}

/// Rotation grids and mino offsets for every kind
#[derive(Debug)]
pub struct ShapeTable {
    grids: [[Grid; 4]; 7],
    minos: [[PieceShape; 4]; 7],
}

impl ShapeTable {
    const fn build() -> Self {
        let bases = base_layouts();
        let mut grids = [[bases[0]; 4]; 7];
        let mut minos = [[[(0i8, 0i8); 4]; 4]; 7];
        let mut k = 0;
        while k < 7 {
            let base = bases[k];
            grids[k] = [
                base,
                base.rotated_cw(),
                base.rotated_half(),
                base.rotated_ccw(),
            ];
            let mut r = 0;
            while r < 4 {
                minos[k][r] = grids[k][r].minos();
                r += 1;
            }
            k += 1;
        }
        Self { grids, minos }
    }

    /// The four rotation grids of `kind`, indexed by rotation
    pub fn grids(&self, kind: PieceKind) -> &[Grid; 4] {
        &self.grids[kind.index()]
    }

    /// Mino offsets of `kind` in `rotation`
    pub fn shape(&self, kind: PieceKind, rotation: Rotation) -> PieceShape {
        self.minos[kind.index()][rotation.index()]
    }
}

/// Process-wide shape table, built at compile time
pub static SHAPES: ShapeTable = ShapeTable::build();

/// Get the shape (mino offsets) for a piece kind and rotation
pub fn get_shape(kind: PieceKind, rotation: Rotation) -> PieceShape {
    SHAPES.shape(kind, rotation)
}

/// Base layouts in [`PieceKind::ALL`] order
const fn base_layouts() -> [Grid; 7] {
    [
        // I
        Grid::from_layout(4, [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]]),
        // O
        Grid::from_layout(2, [[1, 1, 0, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        // S
        Grid::from_layout(3, [[0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        // Z
        Grid::from_layout(3, [[1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        // J
        Grid::from_layout(3, [[1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        // L
        Grid::from_layout(3, [[0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
        // T
        Grid::from_layout(3, [[0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0], [0, 0, 0, 0]]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_t_rotations_follow_transpose_rules() {
        assert_eq!(
            get_shape(PieceKind::T, Rotation::North),
            [(1, 0), (0, 1), (1, 1), (2, 1)]
        );
        assert_eq!(
            get_shape(PieceKind::T, Rotation::East),
            [(1, 0), (1, 1), (2, 1), (1, 2)]
        );
        assert_eq!(
            get_shape(PieceKind::T, Rotation::South),
            [(0, 1), (1, 1), (2, 1), (1, 2)]
        );
        assert_eq!(
            get_shape(PieceKind::T, Rotation::West),
            [(1, 0), (0, 1), (1, 1), (1, 2)]
        );
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        for kind in PieceKind::ALL {
            let base = SHAPES.grids(kind)[0];
            let turned = base.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(turned, base, "{:?}", kind);
        }
    }

    #[test]
    fn test_derived_grids_agree() {
        for kind in PieceKind::ALL {
            let [north, east, south, west] = *SHAPES.grids(kind);
            assert_eq!(north.rotated_cw(), east);
            assert_eq!(east.rotated_cw(), south);
            assert_eq!(south.rotated_cw(), west);
            assert_eq!(north.rotated_ccw(), west);
        }
    }

    #[test]
    fn test_o_piece_is_rotation_invariant() {
        let grids = SHAPES.grids(PieceKind::O);
        assert!(grids.iter().all(|g| *g == grids[0]));
        assert_eq!(grids[0].size(), 2);
    }
}
