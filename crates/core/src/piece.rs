//! Piece module - the active falling tetromino
//!
//! The vertical position is an integer row plus a fixed-point sub-cell
//! accumulator, so gravity slower than one cell per tick never drifts. A piece
//! only moves down in whole cells, when the accumulator crosses a cell.
//!
//! Lock delay: when a fall is blocked the grounded timer counts down, and the
//! piece lands once it drops below zero. Any successful move or rotation while
//! grounded restores the full window, so repeated last-moment slides and spins
//! can stall a lock indefinitely.

use crate::board::Board;
use crate::shapes::{get_shape, PieceShape};
use crate::types::{PieceKind, Phase, Rotation, SPAWN_COL, SPAWN_ROW, SUBCELLS_PER_CELL};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    rotation: Rotation,
    col: i8,
    row: i8,
    /// Sub-cell progress below `row`, in `0..SUBCELLS_PER_CELL`
    sub_row: u16,
    grounded_ticks: i32,
    /// Value the grounded timer is reset to
    lock_delay: i32,
    grounded: bool,
    phase: Phase,
}

impl Piece {
    /// Create a new piece at the spawn position
    pub fn spawn(kind: PieceKind, lock_delay: i32) -> Self {
        Self::at(kind, Rotation::North, SPAWN_COL, SPAWN_ROW, lock_delay)
    }

    /// Create a piece at an explicit position
    pub fn at(kind: PieceKind, rotation: Rotation, col: i8, row: i8, lock_delay: i32) -> Self {
        Self {
            kind,
            rotation,
            col,
            row,
            sub_row: 0,
            grounded_ticks: lock_delay,
            lock_delay,
            grounded: false,
            phase: Phase::Falling,
        }
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn col(&self) -> i8 {
        self.col
    }

    pub fn row(&self) -> i8 {
        self.row
    }

    /// Fractional part of the vertical position, in sub-cells
    pub fn sub_row(&self) -> u16 {
        self.sub_row
    }

    pub fn grounded_ticks(&self) -> i32 {
        self.grounded_ticks
    }

    pub fn lock_delay(&self) -> i32 {
        self.lock_delay
    }

    /// Whether the last fall attempt was blocked
    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_landed(&self) -> bool {
        self.phase == Phase::Landed
    }

    /// Get the shape (mino offsets) for the current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute `(col, row)` of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> {
        let (col, row) = (self.col, self.row);
        self.shape()
            .into_iter()
            .map(move |(dc, dr)| (col + dc, row + dr))
    }

    /// Topmost occupied row
    pub fn top_row(&self) -> i8 {
        self.cells().map(|(_, row)| row).min().unwrap_or(self.row)
    }

    /// Check whether the piece fits after the given offsets.
    ///
    /// Fails if any cell of the candidate rotation lands outside the columns,
    /// on or below the floor, or on an occupied board cell. There is no check
    /// against the top of the board.
    pub fn can_place(&self, board: &Board, d_col: i8, d_row: i8, d_rotation: i8) -> bool {
        let rotation = self.rotation.turned(d_rotation);
        get_shape(self.kind, rotation)
            .iter()
            .all(|&(dc, dr)| board.is_open(self.col + dc + d_col, self.row + dr + d_row))
    }

    /// Try to rotate by `direction` quarter turns (no wall kicks).
    ///
    /// `0` is a no-op and never counts as an action.
    pub fn try_rotate(&mut self, direction: i8, board: &Board) -> bool {
        if direction == 0 || self.is_landed() {
            return false;
        }
        if !self.can_place(board, 0, 0, direction) {
            return false;
        }
        self.rotation = self.rotation.turned(direction);
        self.refresh_lock_delay();
        true
    }

    /// Try to shift horizontally by `dx` columns. `0` is a no-op.
    pub fn try_move(&mut self, dx: i8, board: &Board) -> bool {
        if dx == 0 || self.is_landed() {
            return false;
        }
        if !self.can_place(board, dx, 0, 0) {
            return false;
        }
        self.col += dx;
        self.refresh_lock_delay();
        true
    }

    /// Apply `dy` sub-cells of gravity.
    ///
    /// A full-cell drop floors the accumulator first. Returns true if the
    /// piece could fall (resetting the grounded timer); false if it is
    /// resting on the floor or the stack, in which case the timer counts down
    /// and the piece lands once it passes below zero.
    pub fn advance_fall(&mut self, dy: u16, board: &Board) -> bool {
        if self.is_landed() {
            return false;
        }
        if dy >= SUBCELLS_PER_CELL {
            self.sub_row = 0;
        }

        if !self.can_place(board, 0, 1, 0) {
            self.sub_row = 0;
            self.grounded = true;
            self.grounded_ticks -= 1;
            if self.grounded_ticks < 0 {
                self.phase = Phase::Landed;
            }
            return false;
        }

        let total = u32::from(self.sub_row) + u32::from(dy);
        let mut steps = total / u32::from(SUBCELLS_PER_CELL);
        self.sub_row = (total % u32::from(SUBCELLS_PER_CELL)) as u16;
        while steps > 0 && self.can_place(board, 0, 1, 0) {
            self.row += 1;
            steps -= 1;
        }
        if steps > 0 {
            // Hit the stack partway through a multi-cell drop.
            self.sub_row = 0;
        }

        self.grounded = false;
        self.grounded_ticks = self.lock_delay;
        true
    }

    fn refresh_lock_delay(&mut self) {
        if self.grounded {
            self.grounded_ticks = self.lock_delay;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FIELD_ROW, GRAVITY_PER_TICK};

    const DELAY: i32 = 15;

    /// Drop a piece straight to the floor of an empty board
    fn grounded(kind: PieceKind) -> (Piece, Board) {
        let board = Board::new();
        let mut piece = Piece::spawn(kind, DELAY);
        while piece.advance_fall(SUBCELLS_PER_CELL, &board) {}
        (piece, board)
    }

    #[test]
    fn test_spawn_position() {
        let piece = Piece::spawn(PieceKind::T, DELAY);
        assert_eq!(piece.col(), SPAWN_COL);
        assert_eq!(piece.row(), SPAWN_ROW);
        assert_eq!(piece.rotation(), Rotation::North);
        assert_eq!(piece.phase(), Phase::Falling);
        assert_eq!(piece.grounded_ticks(), DELAY);
    }

    #[test]
    fn test_gravity_accumulates_sub_cells() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::O, DELAY);

        // 1/8 cell per tick: seven ticks stay on row 0, the eighth crosses.
        for _ in 0..7 {
            assert!(piece.advance_fall(GRAVITY_PER_TICK, &board));
            assert_eq!(piece.row(), 0);
        }
        assert!(piece.advance_fall(GRAVITY_PER_TICK, &board));
        assert_eq!(piece.row(), 1);
        assert_eq!(piece.sub_row(), 0);
    }

    #[test]
    fn test_full_cell_drop_floors_fraction() {
        let board = Board::new();
        let mut piece = Piece::spawn(PieceKind::O, DELAY);
        piece.advance_fall(GRAVITY_PER_TICK * 3, &board);
        assert_eq!(piece.sub_row(), GRAVITY_PER_TICK * 3);

        piece.advance_fall(SUBCELLS_PER_CELL, &board);
        assert_eq!(piece.row(), 1);
        assert_eq!(piece.sub_row(), 0);
    }

    #[test]
    fn test_floor_counts_lock_delay_down() {
        let (mut piece, board) = grounded(PieceKind::O);
        // The failed fall that ended the loop already took one tick.
        assert_eq!(piece.grounded_ticks(), DELAY - 1);
        assert!(piece.is_grounded());
        assert_eq!(piece.top_row(), FIELD_ROW as i8 - 2);

        for _ in 0..DELAY - 1 {
            piece.advance_fall(GRAVITY_PER_TICK, &board);
            assert_eq!(piece.phase(), Phase::Falling);
        }
        assert_eq!(piece.grounded_ticks(), 0);
        piece.advance_fall(GRAVITY_PER_TICK, &board);
        assert_eq!(piece.phase(), Phase::Landed);
    }

    #[test]
    fn test_zero_direction_is_not_an_action() {
        let (mut piece, board) = grounded(PieceKind::T);
        let before = piece;
        assert!(!piece.try_rotate(0, &board));
        assert!(!piece.try_move(0, &board));
        assert_eq!(piece, before);
    }

    #[test]
    fn test_landed_piece_rejects_input() {
        let (mut piece, board) = grounded(PieceKind::T);
        while !piece.is_landed() {
            piece.advance_fall(GRAVITY_PER_TICK, &board);
        }
        assert!(!piece.try_move(1, &board));
        assert!(!piece.try_rotate(1, &board));
        assert!(!piece.advance_fall(SUBCELLS_PER_CELL, &board));
    }

    #[test]
    fn test_rotation_rejected_without_kicks() {
        let board = Board::new();
        // Vertical I hugging the left wall: turning back to horizontal needs
        // columns left of 0, and no kick search is attempted.
        let mut piece = Piece::at(PieceKind::I, Rotation::East, -2, 5, DELAY);
        assert!(piece.can_place(&board, 0, 0, 0));
        assert!(!piece.try_rotate(1, &board));
        assert_eq!(piece.rotation(), Rotation::East);
        assert_eq!(piece.col(), -2);
    }
}
