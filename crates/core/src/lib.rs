//! Core game logic - pure, deterministic and testable
//!
//! Everything here is driven by discrete ticks and already-debounced
//! [`Intent`](types::Intent)s. No terminal, clock or I/O is touched; the only
//! outward effect is `tracing` events.
//!
//! # Module Structure
//!
//! - [`shapes`]: compile-time shape table, rotations derived by transpose and reverse
//! - [`board`]: 10x20 grid, placement checks and the flash/clear protocol
//! - [`piece`]: the falling piece with fixed-point gravity and lock delay
//! - [`next_queue`]: single-slot lookahead over a uniform random source
//! - [`scoring`]: quadratic line-clear score and the tick-rate curve
//! - [`controller`]: the session state machine tying it all together
//! - [`snapshot`]: read-only view for renderers
//!
//! # Rules in brief
//!
//! - No wall kicks, no hold, no hard drop, no ghost piece
//! - Clearing `n` rows at once scores `n² × 100`
//! - Full rows flash for a fixed number of ticks before they are removed
//! - Every 10 lines the tick rate rises by 3, up to a cap
//! - Locking a piece that reaches the spawn row ends the game
//!
//! # Example
//!
//! ```
//! use blockfall_core::GameController;
//! use blockfall_types::{Intent, SessionState};
//!
//! let mut game = GameController::new(12345);
//! let drop = Intent { soft_drop: true, ..Intent::default() };
//! for _ in 0..10 {
//!     game.tick(drop);
//! }
//! assert_eq!(game.session(), SessionState::Playing);
//! assert_eq!(game.score(), 0);
//! ```

pub mod board;
pub mod controller;
pub mod next_queue;
pub mod piece;
pub mod scoring;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

pub use board::{Board, RowList};
pub use controller::{GameController, TickOutcome};
pub use next_queue::NextQueue;
pub use piece::Piece;
pub use scoring::{line_clear_score, lock_delay_ticks, tick_interval_ms, tick_rate_for_lines};
pub use shapes::{get_shape, MinoOffset, PieceShape, SHAPES};
pub use snapshot::{ActiveSnapshot, RenderSnapshot};
