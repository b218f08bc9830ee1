//! Board module - the settled grid and its row-clear protocol
//!
//! The board is a 10x20 grid where each cell can be empty or hold the kind of
//! the piece that was locked there. Uses a flat array for cache locality and
//! zero allocation. Coordinates are `(col, row)`, with row 0 at the top.
//!
//! Clearing is a two-phase commit: [`Board::begin_clear_check`] only marks the
//! board as flashing, and the rows disappear when [`Board::commit_clear`] runs
//! after the flash countdown.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{BoardState, Cell, FIELD_COL, FIELD_ROW, FLASH_BLINK_TICKS, FLASH_TICKS};

/// Total number of cells on the board
const BOARD_SIZE: usize = (FIELD_COL as usize) * (FIELD_ROW as usize);

/// Row indices, at most one per board row
pub type RowList = ArrayVec<u8, { FIELD_ROW as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (row * FIELD_COL + col)
    cells: [Cell; BOARD_SIZE],
    state: BoardState,
    /// Remaining flash ticks while `state == Flashing`
    flash_ticks: u32,
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
            state: BoardState::Live,
            flash_ticks: 0,
        }
    }

    #[inline(always)]
    fn index(col: i8, row: i8) -> Option<usize> {
        if col < 0 || col >= FIELD_COL as i8 || row < 0 || row >= FIELD_ROW as i8 {
            return None;
        }
        Some((row as usize) * (FIELD_COL as usize) + (col as usize))
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    /// Get cell at `(col, row)`; `None` if out of bounds
    pub fn get(&self, col: i8, row: i8) -> Option<Cell> {
        Self::index(col, row).map(|idx| self.cells[idx])
    }

    /// Set cell at `(col, row)`; returns false if out of bounds
    pub fn set(&mut self, col: i8, row: i8, cell: Cell) -> bool {
        match Self::index(col, row) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Whether a piece cell may sit at `(col, row)`.
    ///
    /// Columns must be on the board and rows above the floor. Rows above the
    /// top (negative) are open, so pieces can poke out while spawning.
    pub fn is_open(&self, col: i8, row: i8) -> bool {
        if col < 0 || col >= FIELD_COL as i8 || row >= FIELD_ROW as i8 {
            return false;
        }
        row < 0 || matches!(self.get(col, row), Some(None))
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, col: i8, row: i8) -> bool {
        matches!(self.get(col, row), Some(Some(_)))
    }

    /// Check if a row has no empty cell
    pub fn is_row_full(&self, row: usize) -> bool {
        if row >= FIELD_ROW as usize {
            return false;
        }
        let start = row * FIELD_COL as usize;
        let end = start + FIELD_COL as usize;
        self.cells[start..end].iter().all(|cell| cell.is_some())
    }

    /// Indices of all full rows, top to bottom
    pub fn full_rows(&self) -> RowList {
        (0..FIELD_ROW)
            .filter(|&row| self.is_row_full(row as usize))
            .collect()
    }

    /// Write the piece's cells into the grid, tagged with its kind.
    ///
    /// Runs the same placement check as live movement first and refuses
    /// (returning false, board untouched) if it fails or the board is frozen.
    /// Cells above row 0 have no grid slot and are skipped.
    pub fn merge(&mut self, piece: &Piece) -> bool {
        if self.state == BoardState::Frozen || !piece.can_place(self, 0, 0, 0) {
            return false;
        }
        let kind = piece.kind();
        for (col, row) in piece.cells() {
            if row >= 0 {
                self.set(col, row, Some(kind));
            }
        }
        true
    }

    /// Start the clear protocol; returns the number of full rows.
    ///
    /// With no full rows the board stays `Live`. Otherwise it enters
    /// `Flashing` for [`FLASH_TICKS`] ticks. A frozen board is left alone.
    pub fn begin_clear_check(&mut self) -> usize {
        if self.state == BoardState::Frozen {
            return 0;
        }
        let full = self.full_rows().len();
        if full == 0 {
            self.state = BoardState::Live;
            self.flash_ticks = 0;
        } else {
            self.state = BoardState::Flashing;
            self.flash_ticks = FLASH_TICKS;
        }
        full
    }

    /// Count the flash down by one tick; true once the rows are ready to commit
    pub fn advance_flash(&mut self) -> bool {
        match self.state {
            BoardState::Flashing => {
                self.flash_ticks = self.flash_ticks.saturating_sub(1);
                if self.flash_ticks == 0 {
                    self.state = BoardState::Clearing;
                    true
                } else {
                    false
                }
            }
            BoardState::Clearing => true,
            BoardState::Live | BoardState::Frozen => false,
        }
    }

    /// Whether flashing rows are drawn highlighted this tick (alternates)
    pub fn flash_highlight(&self) -> bool {
        match self.state {
            BoardState::Flashing => (self.flash_ticks / FLASH_BLINK_TICKS) % 2 == 0,
            BoardState::Clearing => true,
            BoardState::Live | BoardState::Frozen => false,
        }
    }

    /// Remove every full row and return how many were removed.
    ///
    /// Rows above shift down and the same number of empty rows appear at the
    /// top, so the board keeps exactly `FIELD_ROW` rows. Uses a two-pointer
    /// pass with zero allocation. Calling it without full rows is a no-op.
    pub fn commit_clear(&mut self) -> usize {
        if self.state == BoardState::Frozen {
            return 0;
        }

        let width = FIELD_COL as usize;
        let mut cleared = 0;
        let mut write_row = FIELD_ROW as usize;

        // Scan from bottom to top
        for read_row in (0..FIELD_ROW as usize).rev() {
            if self.is_row_full(read_row) {
                cleared += 1;
            } else {
                write_row -= 1;
                if write_row != read_row {
                    let src = read_row * width;
                    self.cells.copy_within(src..src + width, write_row * width);
                }
            }
        }

        // Empty the rows left over at the top
        for cell in &mut self.cells[..write_row * width] {
            *cell = None;
        }

        self.state = BoardState::Live;
        self.flash_ticks = 0;
        cleared
    }

    /// Mark the board as terminally frozen (game over)
    pub fn freeze(&mut self) {
        self.state = BoardState::Frozen;
        self.flash_ticks = 0;
    }

    pub fn is_frozen(&self) -> bool {
        self.state == BoardState::Frozen
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Copy the grid into a row-major 2D array (for snapshots)
    pub fn write_grid(&self, out: &mut [[Cell; FIELD_COL as usize]; FIELD_ROW as usize]) {
        for (row, chunk) in out.iter_mut().zip(self.cells.chunks_exact(FIELD_COL as usize)) {
            row.copy_from_slice(chunk);
        }
    }

    /// Fill a whole row with `cell` (scenario setup and tests)
    pub fn fill_row(&mut self, row: i8, cell: Cell) {
        for col in 0..FIELD_COL as i8 {
            self.set(col, row, cell);
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
