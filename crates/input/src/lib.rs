//! Terminal input mapping.
//!
//! Translates `crossterm` key and mouse events into [`crate::types::GameAction`]s
//! for play and [`MenuCommand`]s for the menu and game-over screens. Held keys
//! arrive as OS key repeats; there is no separate auto-repeat timer.

pub mod map;
pub mod touch;

pub use blockfall_types as types;

pub use map::{handle_key_event, handle_menu_key, is_press, should_quit, MenuCommand};
pub use touch::{handle_mouse_event, TouchButton, TouchControls};
