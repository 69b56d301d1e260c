//! Board module - the grid of locked cells
//!
//! The board is a 10x20 grid where each cell is empty or holds the kind of the
//! piece that was merged there. Storage is a flat row-major array.
//! Coordinates: (x, y) where x ranges 0..9 (left to right), y ranges 0..19 (top to bottom).
//! Rows above the field (y < 0) are legal for a falling piece but never stored.

use arrayvec::ArrayVec;

use crate::piece::Piece;
use crate::types::{Cell, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const BOARD_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

/// Original indices of the rows removed by one [`Board::clear_full_rows`] call,
/// in ascending (top to bottom) order.
pub type ClearedRows = ArrayVec<usize, { BOARD_HEIGHT as usize }>;

/// The game board - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [None; BOARD_SIZE],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(x: i8, y: i8) -> Option<usize> {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return None;
        }
        Some((y as usize) * (BOARD_WIDTH as usize) + (x as usize))
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Self::index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) -> bool {
        match Self::index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Borrow one row, or `None` when `y` is outside the field.
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= BOARD_HEIGHT as usize {
            return None;
        }
        let start = y * BOARD_WIDTH as usize;
        Some(&self.cells[start..start + BOARD_WIDTH as usize])
    }

    /// Remove every full row and refill from the top with empty rows.
    ///
    /// The full-row set is computed before anything moves, so simultaneous
    /// clears never shift each other's indices. Surviving rows keep their
    /// relative order. Compaction is a bottom-up two-pointer pass with
    /// `copy_within` and no allocation.
    pub fn clear_full_rows(&mut self) -> ClearedRows {
        let mut cleared = ClearedRows::new();
        for y in 0..BOARD_HEIGHT as usize {
            if self.is_row_full(y) {
                cleared.push(y);
            }
        }
        if cleared.is_empty() {
            return cleared;
        }

        let width = BOARD_WIDTH as usize;
        let mut write_y = BOARD_HEIGHT as usize;
        for read_y in (0..BOARD_HEIGHT as usize).rev() {
            if cleared.contains(&read_y) {
                continue;
            }
            write_y -= 1;
            if write_y != read_y {
                let src = read_y * width;
                self.cells.copy_within(src..src + width, write_y * width);
            }
        }

        self.cells[..write_y * width].fill(None);
        cleared
    }

    /// Write a piece's occupied cells into the grid.
    ///
    /// Cells projected above row 0 are skipped; the piece may still be
    /// partially off the top when it locks.
    pub fn merge(&mut self, piece: &Piece) {
        for (x, y) in piece.cells() {
            if y >= 0 {
                self.set(x, y, Some(piece.kind()));
            }
        }
    }

    /// Export the grid as color indices (0 = empty, 1..=7 = catalog color).
    pub fn write_u8_grid(&self, out: &mut [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize]) {
        let width = BOARD_WIDTH as usize;
        for (y, row) in out.iter_mut().enumerate() {
            let start = y * width;
            for (x, v) in row.iter_mut().enumerate() {
                *v = self.cells[start + x].map_or(0, |kind| kind.color_index());
            }
        }
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Count of filled cells.
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Fill row `y` except for the listed columns.
    ///
    /// Handy for setting up scripted positions in tests and benches.
    pub fn fill_row_except(&mut self, y: i8, gaps: &[i8], cell: Cell) {
        for x in 0..BOARD_WIDTH as i8 {
            if !gaps.contains(&x) {
                self.set(x, y, cell);
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}
