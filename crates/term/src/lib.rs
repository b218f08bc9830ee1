//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: a [`RenderSnapshot`](core::RenderSnapshot)
//! is drawn into a plain framebuffer of styled glyphs, which is then flushed
//! to the terminal with `crossterm`. No widget toolkit is involved, so the
//! board keeps an exact 2:1 aspect ratio per cell.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{CellStyle, FrameBuffer, Glyph, Rgb};
pub use game_view::{GameView, Viewport};
pub use renderer::{encode_changed_rows_into, encode_full_into, TerminalRenderer};
