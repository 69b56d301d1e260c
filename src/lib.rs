//! Blockfall (workspace facade crate).
//!
//! Re-exports the workspace crates as `blockfall::{core, input, term, audio, storage, types}`
//! and holds the binary's command-line and logging setup.

pub mod cli;
pub mod logging;

pub use blockfall_audio as audio;
pub use blockfall_core as core;
pub use blockfall_input as input;
pub use blockfall_storage as storage;
pub use blockfall_term as term;
pub use blockfall_types as types;
