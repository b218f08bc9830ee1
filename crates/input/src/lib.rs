//! Terminal input (engine-facing).
//!
//! Maps `crossterm` key events into [`KeyCommand`]s and folds presses and
//! releases into exactly one [`Intent`](crate::types::Intent) per tick, with
//! DAS/ARR auto-repeat that also works in terminals without key-release events.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputHandler;
pub use map::{map_key, should_quit, KeyCommand};
