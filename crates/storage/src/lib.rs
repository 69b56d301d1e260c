//! Score persistence.
//!
//! - [`store`]: the async [`KeyValueStore`] trait with in-memory and JSON-file
//!   implementations
//! - [`records`]: [`ScoreRecord`], keyed saves and the top-N leaderboard
//! - [`keeper`]: [`ScoreKeeper`], a fire-and-forget bridge for the sync game loop
//!
//! Records live under `score:{timestamp_ms}` keys as JSON objects
//! `{score, lines, level, mode, date}`.
//!
//! # Example
//!
//! ```
//! use blockfall_storage::{load_leaderboard, save_score, MemoryStore, ScoreRecord};
//! use blockfall_types::GameMode;
//!
//! let rt = tokio::runtime::Runtime::new().unwrap();
//! rt.block_on(async {
//!     let store = MemoryStore::new();
//!     save_score(&store, &ScoreRecord::new(1200, 4, 1, GameMode::Classic), 1).await.unwrap();
//!     save_score(&store, &ScoreRecord::new(40, 1, 1, GameMode::Sprint), 2).await.unwrap();
//!
//!     let board = load_leaderboard(&store, 5).await.unwrap();
//!     assert_eq!(board[0].score, 1200);
//! });
//! ```

pub mod keeper;
pub mod records;
pub mod store;

pub use blockfall_types as types;

pub use keeper::{ScoreKeeper, StorageConfig};
pub use records::{load_leaderboard, save_score, score_key, ScoreRecord, SCORE_KEY_PREFIX};
pub use store::{FileStore, KeyValueStore, MemoryStore};
