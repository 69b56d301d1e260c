//! Events recorded by [`GameState`](crate::GameState) for render, audio and
//! persistence collaborators.

use crate::board::ClearedRows;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    Started,
    Moved,
    Rotated,
    SoftDropped,
    HardDropped { distance: u32 },
    Held,
    Locked,
    LinesCleared {
        /// Original board rows that were removed, top to bottom.
        rows: ClearedRows,
        /// Combo counter after this clear.
        combo: u32,
        /// Points awarded for the clear.
        points: u32,
    },
    LevelChanged { level: u32 },
    Paused,
    Resumed,
    GameOver { won: bool },
    MenuOpened,
}

impl GameEvent {
    /// Number of rows for a `LinesCleared` event, zero otherwise.
    pub fn lines_cleared(&self) -> u32 {
        match self {
            GameEvent::LinesCleared { rows, .. } => rows.len() as u32,
            _ => 0,
        }
    }
}
