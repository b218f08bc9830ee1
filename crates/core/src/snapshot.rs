//! Render snapshot - the read-only view handed to front ends
//!
//! Holds everything a renderer needs and nothing it must not depend on: no
//! lock-delay or gravity counters, only what is visible.

use crate::piece::Piece;
use crate::types::{Cell, PieceKind, Rotation, SessionState, FIELD_COL, FIELD_ROW};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub col: i8,
    pub row: i8,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            rotation: value.rotation(),
            col: value.col(),
            row: value.row(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderSnapshot {
    pub board: [[Cell; FIELD_COL as usize]; FIELD_ROW as usize],
    /// Rows currently flashing before removal
    pub flashing_rows: [bool; FIELD_ROW as usize],
    /// Whether flashing rows are drawn highlighted this frame
    pub flash_highlight: bool,
    pub active: Option<ActiveSnapshot>,
    pub next: PieceKind,
    pub score: u32,
    pub lines: u32,
    pub tick_rate: u32,
    pub session: SessionState,
}

impl RenderSnapshot {
    pub fn paused(&self) -> bool {
        self.session == SessionState::Paused
    }

    pub fn game_over(&self) -> bool {
        self.session == SessionState::GameOver
    }

    pub fn is_flashing(&self) -> bool {
        self.flashing_rows.iter().any(|&f| f)
    }
}

impl Default for RenderSnapshot {
    fn default() -> Self {
        Self {
            board: [[None; FIELD_COL as usize]; FIELD_ROW as usize],
            flashing_rows: [false; FIELD_ROW as usize],
            flash_highlight: false,
            active: None,
            next: PieceKind::I,
            score: 0,
            lines: 0,
            tick_rate: 0,
            session: SessionState::Playing,
        }
    }
}
