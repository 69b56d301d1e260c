//! The falling piece: shape, kind and board origin.

use crate::board::Board;
use crate::pieces::{catalog_shape, Shape};
use crate::types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// A tetromino instance.
///
/// `x`/`y` is the board position of the shape matrix's top-left corner. `y`
/// may be negative while a piece hangs above the field.
///
/// `Piece` is `Copy`: the hold slot and the active piece are always
/// independent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    shape: Shape,
    x: i8,
    y: i8,
}

impl Piece {
    /// A fresh catalog piece at its spawn position.
    pub fn new(kind: PieceKind) -> Self {
        Self::with_shape(kind, catalog_shape(kind))
    }

    /// A piece with an explicit (possibly rotated) shape at the spawn position
    /// for that shape's width.
    pub fn with_shape(kind: PieceKind, shape: Shape) -> Self {
        Self {
            kind,
            shape,
            x: spawn_x(shape.width()),
            y: 0,
        }
    }

    /// Same piece placed at (x, y).
    pub fn at(self, x: i8, y: i8) -> Self {
        Self { x, y, ..self }
    }

    /// An independent copy with the same shape and kind, origin reset to spawn.
    pub fn respawned(&self) -> Self {
        Self::with_shape(self.kind, self.shape)
    }

    pub fn kind(&self) -> PieceKind {
        self.kind
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn x(&self) -> i8 {
        self.x
    }

    pub fn y(&self) -> i8 {
        self.y
    }

    /// Board coordinates of the occupied cells.
    pub fn cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(dx, dy)| (self.x + dx, self.y + dy))
    }

    /// True iff any occupied cell is out of horizontal bounds, at or below the
    /// floor, or overlaps a filled board cell. Cells above row 0 never collide.
    pub fn collides(&self, board: &Board) -> bool {
        self.cells().any(|(x, y)| {
            x < 0
                || x >= BOARD_WIDTH as i8
                || y >= BOARD_HEIGHT as i8
                || (y >= 0 && board.is_occupied(x, y))
        })
    }

    /// Shift one column left (`-1`) or right (`+1`). Reverts when blocked.
    pub fn try_move(&mut self, dir: i8, board: &Board) -> bool {
        self.try_shift(dir, 0, board)
    }

    /// Move down one row. Returns false (and stays put) when the piece has landed.
    pub fn try_drop(&mut self, board: &Board) -> bool {
        self.try_shift(0, 1, board)
    }

    fn try_shift(&mut self, dx: i8, dy: i8, board: &Board) -> bool {
        let candidate = self.at(self.x + dx, self.y + dy);
        if candidate.collides(board) {
            return false;
        }
        *self = candidate;
        true
    }

    /// Rotate clockwise with a simple horizontal kick search.
    ///
    /// When the rotated shape collides in place, the steps +1, -2, +3, -4, ...
    /// are applied cumulatively to x (net offsets +1, -1, +2, -2, ...). A step
    /// is only taken while its magnitude does not exceed the rotated width.
    /// On failure the piece is left exactly as it was.
    pub fn try_rotate(&mut self, board: &Board) -> bool {
        let rotated = Self {
            shape: self.shape.rotated_cw(),
            ..*self
        };
        if !rotated.collides(board) {
            *self = rotated;
            return true;
        }

        let limit = rotated.shape.width() as i8;
        let mut step: i8 = 1;
        let mut x = rotated.x;
        while step.abs() <= limit {
            x += step;
            let kicked = rotated.at(x, rotated.y);
            if !kicked.collides(board) {
                *self = kicked;
                return true;
            }
            step = -(step + step.signum());
        }
        false
    }

    /// Drop until landed. Returns the number of rows travelled.
    pub fn hard_drop(&mut self, board: &Board) -> u32 {
        let mut distance = 0;
        while self.try_drop(board) {
            distance += 1;
        }
        distance
    }

    /// The row this piece would rest on after a hard drop.
    pub fn ghost_y(&self, board: &Board) -> i8 {
        let mut ghost = *self;
        ghost.hard_drop(board);
        ghost.y
    }
}

/// Spawn column: `floor(COLS / 2) - floor(width / 2)`.
pub fn spawn_x(width: u8) -> i8 {
    (BOARD_WIDTH / 2) as i8 - (width / 2) as i8
}
