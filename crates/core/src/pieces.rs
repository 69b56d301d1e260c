//! Shape catalog and matrix rotation.
//!
//! Shapes are small immutable boolean matrices (at most 4x4). Rotation never
//! mutates a shape in place; it returns a new one, so a rejected rotation has
//! nothing to undo.

use crate::types::PieceKind;

/// Largest width or height of any catalog shape.
pub const MAX_SHAPE_SIZE: usize = 4;

/// An immutable shape matrix.
///
/// Only the top-left `height` x `width` corner of `cells` is meaningful; the
/// rest is always `false`, so derived equality compares shapes exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    width: u8,
    height: u8,
    cells: [[bool; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from a 0/1 matrix (rows top to bottom).
    pub const fn from_rows<const W: usize, const H: usize>(rows: [[u8; W]; H]) -> Self {
        assert!(W <= MAX_SHAPE_SIZE && H <= MAX_SHAPE_SIZE);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        let mut y = 0;
        while y < H {
            let mut x = 0;
            while x < W {
                cells[y][x] = rows[y][x] != 0;
                x += 1;
            }
            y += 1;
        }
        Self {
            width: W as u8,
            height: H as u8,
            cells,
        }
    }

    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> u8 {
        self.height
    }

    /// Whether the matrix cell at (col, row) is filled.
    pub fn is_filled(&self, col: usize, row: usize) -> bool {
        col < self.width as usize && row < self.height as usize && self.cells[row][col]
    }

    /// Offsets (dx, dy) of the filled cells, row by row.
    pub fn filled_cells(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        let (w, h) = (self.width as usize, self.height as usize);
        (0..h).flat_map(move |row| {
            (0..w)
                .filter(move |&col| self.cells[row][col])
                .map(move |col| (col as i8, row as i8))
        })
    }

    /// Clockwise quarter turn: transpose, then reverse each row.
    ///
    /// ```
    /// use blockfall_core::pieces::Shape;
    ///
    /// let t = Shape::from_rows([[0, 1, 0], [1, 1, 1]]);
    /// assert_eq!(t.rotated_cw(), Shape::from_rows([[1, 0], [1, 1], [1, 0]]));
    /// ```
    pub fn rotated_cw(&self) -> Shape {
        let (w, h) = (self.width as usize, self.height as usize);
        let mut cells = [[false; MAX_SHAPE_SIZE]; MAX_SHAPE_SIZE];
        for (row, out_row) in cells.iter_mut().enumerate().take(w) {
            for (col, out) in out_row.iter_mut().enumerate().take(h) {
                *out = self.cells[h - 1 - col][row];
            }
        }
        Shape {
            width: self.height,
            height: self.width,
            cells,
        }
    }
}

const SHAPES: [Shape; 7] = [
    Shape::from_rows([[1, 1, 1, 1]]),
    Shape::from_rows([[1, 1], [1, 1]]),
    Shape::from_rows([[0, 1, 0], [1, 1, 1]]),
    Shape::from_rows([[1, 0, 0], [1, 1, 1]]),
    Shape::from_rows([[0, 0, 1], [1, 1, 1]]),
    Shape::from_rows([[0, 1, 1], [1, 1, 0]]),
    Shape::from_rows([[1, 1, 0], [0, 1, 1]]),
];

/// Catalog (spawn orientation) shape for a piece kind.
pub fn catalog_shape(kind: PieceKind) -> Shape {
    SHAPES[kind.catalog_index()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_has_four_cells() {
        for kind in PieceKind::ALL {
            assert_eq!(catalog_shape(kind).filled_cells().count(), 4, "{kind:?}");
        }
    }

    #[test]
    fn four_rotations_restore_every_shape() {
        for kind in PieceKind::ALL {
            let shape = catalog_shape(kind);
            let back = shape.rotated_cw().rotated_cw().rotated_cw().rotated_cw();
            assert_eq!(back, shape, "{kind:?}");
        }
    }

    #[test]
    fn rotation_swaps_dimensions() {
        let i = catalog_shape(PieceKind::I);
        let vertical = i.rotated_cw();
        assert_eq!((vertical.width(), vertical.height()), (1, 4));
        assert_eq!(vertical, Shape::from_rows([[1], [1], [1], [1]]));
    }

    #[test]
    fn l_rotates_clockwise() {
        let l = catalog_shape(PieceKind::L);
        assert_eq!(l.rotated_cw(), Shape::from_rows([[1, 1], [1, 0], [1, 0]]));
    }

    #[test]
    fn o_is_rotation_invariant() {
        let o = catalog_shape(PieceKind::O);
        assert_eq!(o.rotated_cw(), o);
    }

    #[test]
    fn is_filled_respects_bounds() {
        let s = catalog_shape(PieceKind::S);
        assert!(!s.is_filled(0, 0));
        assert!(s.is_filled(1, 0));
        assert!(!s.is_filled(3, 0));
        assert!(!s.is_filled(0, 2));
    }
}
