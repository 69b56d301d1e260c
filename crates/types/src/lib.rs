//! Shared types and constants for the falling-block game.
//!
//! Everything here is plain data with no dependencies, so the core engine, the
//! terminal front-end, audio and persistence can all agree on the same
//! vocabulary.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: horizontally centered for the shape width, row 0
//!
//! # Timing and Scoring Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Fixed timestep interval (~60 FPS) |
//! | `BASE_DROP_MS` | 1000 | Gravity at level 1 |
//! | `DROP_MS_PER_LEVEL` | 80 | Gravity speed-up per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Fastest gravity |
//! | `LINES_PER_LEVEL` | 10 | Lines needed per level step |
//! | `MAX_COMBO_MULTIPLIER` | 10 | Cap on the combo score multiplier |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{GameAction, GameMode, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.color_index(), 3);
//! assert_eq!(PieceKind::from_color_index(3), Some(PieceKind::T));
//!
//! assert_eq!(GameAction::ALL.len(), 7);
//! assert_eq!(GameMode::Sprint.target_lines(), Some(40));
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Gravity interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Gravity speed-up per level above 1.
pub const DROP_MS_PER_LEVEL: u32 = 80;

/// Absolute minimum drop interval (100ms)
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: u32 = 10;

/// The combo multiplier never exceeds this value.
pub const MAX_COMBO_MULTIPLIER: u32 = 10;

/// Points per row for a manual soft drop.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row travelled by a hard drop.
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// Number of records kept on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 5;

/// Line clear scoring table.
///
/// Base points for clearing N lines at level 1 with no combo:
/// - 1 line: 40 points
/// - 2 lines: 100 points
/// - 3 lines: 300 points
/// - 4 lines: 1200 points
///
/// Points are multiplied by the level and by the capped combo counter.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// The seven catalog piece kinds, in catalog order.
///
/// The catalog position fixes the color index written into the board:
/// I=1, O=2, T=3, L=4, J=5, S=6, Z=7.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::L,
        PieceKind::J,
        PieceKind::S,
        PieceKind::Z,
    ];

    /// Position in the catalog (0-based).
    pub fn catalog_index(&self) -> usize {
        *self as usize
    }

    /// Board color index (1..=7). Zero is reserved for an empty cell.
    pub fn color_index(&self) -> u8 {
        self.catalog_index() as u8 + 1
    }

    /// Inverse of [`PieceKind::color_index`].
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_color_index(1), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_color_index(7), Some(PieceKind::Z));
    /// assert_eq!(PieceKind::from_color_index(0), None);
    /// ```
    pub fn from_color_index(index: u8) -> Option<Self> {
        match index {
            1..=7 => Some(Self::ALL[(index - 1) as usize]),
            _ => None,
        }
    }

    /// Catalog color as `0xRRGGBB`.
    pub fn color_rgb(&self) -> u32 {
        match self {
            PieceKind::I => 0x00f0f0,
            PieceKind::O => 0xf0f000,
            PieceKind::T => 0xa000f0,
            PieceKind::L => 0xf0a000,
            PieceKind::J => 0x0000f0,
            PieceKind::S => 0x00f000,
            PieceKind::Z => 0xf00000,
        }
    }
}

/// Discrete player actions.
///
/// Keyboard keys and on-screen touch buttons both resolve to these, and the
/// game state machine handles each one identically regardless of source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Drop piece one cell down (1 point when it moves)
    SoftDrop,
    /// Rotate piece 90° clockwise, with a simple wall kick
    Rotate,
    /// Drop piece to its resting row (2 points per row)
    HardDrop,
    /// Hold current piece (once per lock)
    Hold,
    /// Toggle pause state
    Pause,
}

impl GameAction {
    pub const ALL: [GameAction; 7] = [
        GameAction::MoveLeft,
        GameAction::MoveRight,
        GameAction::SoftDrop,
        GameAction::Rotate,
        GameAction::HardDrop,
        GameAction::Hold,
        GameAction::Pause,
    ];
}

/// Game mode chosen before a session starts.
///
/// - **Classic**: endless, no line target
/// - **Marathon**: won at 150 cleared lines
/// - **Sprint**: won at 40 cleared lines, with an elapsed-time display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameMode {
    #[default]
    Classic,
    Marathon,
    Sprint,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::Marathon, GameMode::Sprint];

    /// Cleared lines that end the session with a win, if the mode has a target.
    pub fn target_lines(&self) -> Option<u32> {
        match self {
            GameMode::Classic => None,
            GameMode::Marathon => Some(150),
            GameMode::Sprint => Some(40),
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Some(GameMode::Classic),
            "marathon" => Some(GameMode::Marathon),
            "sprint" => Some(GameMode::Sprint),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Marathon => "marathon",
            GameMode::Sprint => "sprint",
        }
    }

    /// Next mode in menu order, wrapping around.
    pub fn cycle(&self) -> Self {
        match self {
            GameMode::Classic => GameMode::Marathon,
            GameMode::Marathon => GameMode::Sprint,
            GameMode::Sprint => GameMode::Classic,
        }
    }
}

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled with the specified piece kind
pub type Cell = Option<PieceKind>;
