//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds every rule of the game and nothing else. It has no
//! dependency on terminals, audio devices or storage:
//!
//! - **Deterministic**: the same seed and inputs replay the same session
//! - **Testable**: each rule has unit tests next to it
//! - **Portable**: front-ends consume [`GameSnapshot`] and [`GameEvent`] only
//!
//! # Module Structure
//!
//! - [`board`]: 10x20 grid with row detection, compaction and merging
//! - [`pieces`]: immutable shape matrices, the 7-shape catalog, rotation
//! - [`piece`]: the falling piece with collision, moves, kicks and drops
//! - [`rng`]: seedable uniform piece generator
//! - [`scoring`]: line/drop points, combo cap, level and gravity formulas
//! - [`config`]: start level, mode and sound settings
//! - [`game_state`]: the session state machine
//! - [`events`] / [`snapshot`]: what collaborators observe
//!
//! # Game Rules
//!
//! - **Uniform randomizer**: every draw is independent; no 7-bag
//! - **Simple kicks**: blocked rotations try x offsets +1, -1, +2, -2, ...
//! - **Ghost piece**: shows where the current piece would land
//! - **Hold**: one stash per lock; the held piece keeps its rotation
//! - **Combo**: consecutive clearing locks multiply the award, capped at 10x
//! - **Modes**: marathon is won at 150 lines, sprint at 40, classic is endless
//!
//! # Example
//!
//! ```
//! use blockfall_core::{GameConfig, GameState, Phase};
//! use blockfall_types::{GameAction, GameMode};
//!
//! let config = GameConfig::default().with_mode(GameMode::Sprint);
//! let mut game = GameState::with_config(12345, config);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::Rotate);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert!(game.score() > 0); // Hard drop awards points
//! assert_eq!(game.phase(), Phase::Running);
//! ```
//!
//! # Timing
//!
//! Call [`GameState::tick`](game_state::GameState::tick) every frame with the
//! elapsed milliseconds. Gravity starts at 1000ms per row on level 1 and
//! speeds up by 80ms per level down to 100ms.

pub mod board;
pub mod config;
pub mod events;
pub mod game_state;
pub mod piece;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, ClearedRows};
pub use config::GameConfig;
pub use events::GameEvent;
pub use game_state::{GameState, Phase};
pub use piece::Piece;
pub use pieces::{catalog_shape, Shape};
pub use rng::{PieceGenerator, SimpleRng};
pub use scoring::{calculate_drop_score, calculate_line_score, ScoreResult};
pub use snapshot::{GameSnapshot, PieceSnapshot};
