//! Terminal game renderer.
//!
//! A small, game-oriented rendering layer: views draw into a plain
//! [`FrameBuffer`] that [`TerminalRenderer`] flushes to the terminal.
//!
//! - [`fb`]: styled character cells
//! - [`theme`]: dark and light palettes
//! - [`game_view`]: board, ghost, side panel, overlays, menu and touch bar
//! - [`renderer`]: full and diff encoding through crossterm

pub mod fb;
pub mod game_view;
pub mod renderer;
pub mod theme;

pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{
    clear_banner, format_elapsed, GameView, Layout, LeaderboardRow, MenuView, Viewport,
};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use theme::{Theme, ThemeKind};
