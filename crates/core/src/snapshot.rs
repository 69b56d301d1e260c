use crate::game_state::Phase;
use crate::piece::Piece;
use crate::pieces::Shape;
use crate::types::{GameMode, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// A piece as seen by renderers: kind, current shape and origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PieceSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i8,
    pub y: i8,
}

impl PieceSnapshot {
    /// Board coordinates of the occupied cells with the origin row replaced by `y`.
    pub fn cells_at_row(&self, y: i8) -> impl Iterator<Item = (i8, i8)> + '_ {
        let x = self.x;
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (x + dx, y + dy))
    }

    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.cells_at_row(self.y)
    }
}

impl From<Piece> for PieceSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind(),
            shape: value.shape(),
            x: value.x(),
            y: value.y(),
        }
    }
}

/// Read-only view of a session, rebuilt every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Color indices (0 = empty).
    pub board: [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub active: Option<PieceSnapshot>,
    pub ghost_y: Option<i8>,
    pub next: Option<PieceSnapshot>,
    pub hold: Option<PieceSnapshot>,
    pub can_hold: bool,
    pub phase: Phase,
    pub mode: GameMode,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub combo: u32,
    /// Rows removed by the most recent clearing lock.
    pub last_clear: u32,
    /// Active (unpaused) play time.
    pub elapsed_ms: u64,
}

impl GameSnapshot {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn playable(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver { .. })
    }

    pub fn won(&self) -> bool {
        self.phase == Phase::GameOver { won: true }
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            board: [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            active: None,
            ghost_y: None,
            next: None,
            hold: None,
            can_hold: true,
            phase: Phase::Menu,
            mode: GameMode::Classic,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            last_clear: 0,
            elapsed_ms: 0,
        }
    }
}
