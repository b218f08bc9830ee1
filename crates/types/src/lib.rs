//! Shared types module - constants, piece identities and the intent record
//!
//! Everything in here is plain data with no dependencies, so it can be used by
//! the core simulation, the terminal front end and tests alike.
//!
//! # Field Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Spawn position**: column 3, row 0
//!
//! # Timing
//!
//! The simulation is counted in ticks, never in wall time. The front end runs
//! `tick_rate` ticks per second; the rate grows with cleared lines.
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_TICK_RATE` | 30 | Ticks per second at 0 lines |
//! | `TICK_RATE_STEP` | 3 | Added per `LINES_PER_SPEEDUP` lines |
//! | `MAX_TICK_RATE` | 90 | Tick rate ceiling |
//! | `GRAVITY_PER_TICK` | 32 | Sub-cells fallen per tick (1/8 cell) |
//! | `FLASH_TICKS` | 15 | Ticks full rows flash before removal |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Intent, PieceKind, Rotation, FIELD_COL, FIELD_ROW};
//!
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_eq!(Rotation::North.turned(1), Rotation::East);
//! assert_eq!(Rotation::North.turned(-1), Rotation::West);
//!
//! // Out-of-range directions are treated as "no movement".
//! let intent = Intent { move_dir: 4, ..Intent::default() }.normalized();
//! assert_eq!(intent.move_dir, 0);
//!
//! assert_eq!(FIELD_COL, 10);
//! assert_eq!(FIELD_ROW, 20);
//! ```

/// Field width in cells (10 columns)
pub const FIELD_COL: u8 = 10;

/// Field height in cells (20 rows)
pub const FIELD_ROW: u8 = 20;

/// Column where new pieces enter the field
pub const SPAWN_COL: i8 = 3;

/// Topmost visible row; pieces enter here and locking at or above it ends the session
pub const SPAWN_ROW: i8 = 0;

/// Ticks per second with no lines cleared
pub const BASE_TICK_RATE: u32 = 30;

/// Tick rate increase per speed-up step
pub const TICK_RATE_STEP: u32 = 3;

/// Lines that must be cleared for each speed-up step
pub const LINES_PER_SPEEDUP: u32 = 10;

/// Tick rate ceiling
pub const MAX_TICK_RATE: u32 = 90;

/// Fixed-point resolution of the vertical position (sub-cells per cell)
pub const SUBCELLS_PER_CELL: u16 = 256;

/// Gravity per tick in sub-cells (1/8 cell)
pub const GRAVITY_PER_TICK: u16 = 32;

/// Duration of the line-clear flash in ticks
pub const FLASH_TICKS: u32 = 15;

/// Ticks between highlight toggles while rows flash
pub const FLASH_BLINK_TICKS: u32 = 3;

/// Base score for a clear; multiplied by the square of the cleared row count
pub const LINE_CLEAR_BASE_SCORE: u32 = 100;

/// DAS (Delayed Auto Shift) delay in milliseconds
pub const DEFAULT_DAS_MS: u32 = 150;

/// ARR (Auto Repeat Rate) in milliseconds
pub const DEFAULT_ARR_MS: u32 = 50;

/// Idle time after which a held key counts as released on terminals
/// that never report key releases
pub const KEY_RELEASE_TIMEOUT_MS: u32 = 150;


/// The seven tetromino piece kinds
///
/// The board stores the kind of every locked cell so the renderer can color
/// it; gameplay only cares whether a cell is occupied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    S,
    Z,
    J,
    L,
    T,
}

impl PieceKind {
    /// All kinds, in shape-table order
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Position of this kind in [`PieceKind::ALL`]
    pub const fn index(self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::S => 2,
            PieceKind::Z => 3,
            PieceKind::J => 4,
            PieceKind::L => 5,
            PieceKind::T => 6,
        }
    }

    /// Kind at `index` in [`PieceKind::ALL`], wrapping modulo 7
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 7]
    }

    /// Single uppercase letter for display and logs
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::T => "T",
        }
    }
}

/// Rotation state, numbered 0-3 clockwise from the spawn orientation
///
/// - **North** (0): spawn orientation
/// - **East** (1): 90° clockwise
/// - **South** (2): 180°
/// - **West** (3): 270° clockwise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    /// Rotation index in `0..4`
    pub const fn index(self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Rotation for `index mod 4`
    pub const fn from_index(index: usize) -> Self {
        match index % 4 {
            0 => Rotation::North,
            1 => Rotation::East,
            2 => Rotation::South,
            _ => Rotation::West,
        }
    }

    /// Rotation after turning by `direction` quarter turns (positive is clockwise)
    pub fn turned(self, direction: i8) -> Self {
        let steps = (direction as i32).rem_euclid(4) as usize;
        Self::from_index(self.index() + steps)
    }
}

/// A cell on the board
///
/// - `None`: empty
/// - `Some(PieceKind)`: occupied by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Life-cycle phase of the active piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Still under player control
    Falling,
    /// Lock delay expired; the controller will merge it this tick
    Landed,
}

/// Row-clear protocol state of the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BoardState {
    /// Normal play
    Live,
    /// Full rows are highlighted and counting down to removal
    Flashing,
    /// Flash expired; full rows are ready to be committed
    Clearing,
    /// Terminal: nothing may spawn or move any more
    Frozen,
}

/// Session life cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Playing,
    Paused,
    GameOver,
}

/// Per-tick player intent, already debounced and auto-repeated upstream
///
/// Direction fields use `-1`, `0` and `1`. For rotation, positive is clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Intent {
    pub move_dir: i8,
    pub rotate_dir: i8,
    pub soft_drop: bool,
    pub pause_toggle: bool,
}

impl Intent {
    /// Copy of this intent with out-of-range directions replaced by 0
    pub fn normalized(self) -> Self {
        Self {
            move_dir: clamp_dir(self.move_dir),
            rotate_dir: clamp_dir(self.rotate_dir),
            ..self
        }
    }

    /// True when the intent asks for nothing at all
    pub fn is_idle(&self) -> bool {
        *self == Self::default()
    }

    /// Horizontal direction for a pair of held keys; both held cancels out
    pub fn horizontal(left: bool, right: bool) -> i8 {
        match (left, right) {
            (true, false) => -1,
            (false, true) => 1,
            _ => 0,
        }
    }
}

fn clamp_dir(dir: i8) -> i8 {
    if (-1..=1).contains(&dir) {
        dir
    } else {
        0
    }
}
