//! Grid module - the playfield and the placement validator
//!
//! The grid is a `width` x `height` matrix of [`Cell`]s stored as a flat,
//! row-major vector (`y * width + x`). Row 0 is the top row.
//! Every access is bounds-checked; out-of-bounds writes are refused.

use crate::error::ConfigError;
use crate::piece::Piece;
use crate::types::{Cell, Position, MAX_DIMENSION};

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Grid {
    /// Create an empty grid, failing on zero or oversized dimensions
    pub fn new(width: usize, height: usize) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroWidth);
        }
        if height == 0 {
            return Err(ConfigError::ZeroHeight);
        }
        if width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(ConfigError::TooLarge {
                value: width.max(height),
                max: MAX_DIMENSION,
            });
        }
        Ok(Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        })
    }

    /// Build a grid from rows of cells (top row first)
    ///
    /// Every row must have the same, non-zero length.
    pub fn from_rows(rows: Vec<Vec<Cell>>) -> Result<Self, ConfigError> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut grid = Self::new(width, height)?;
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(ConfigError::RaggedRow {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            let start = y * width;
            grid.cells[start..start + width].copy_from_slice(&row);
        }
        Ok(grid)
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y * self.width + x)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at (x, y), `None` when out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at (x, y). Returns false if out of bounds.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Within bounds and filled
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(Cell::Occupied(_)))
    }

    /// Whether a single block may sit at `pos`
    ///
    /// Columns must lie in `[0, width)` and rows below `height`. Rows above
    /// the top (`y < 0`) are tolerated so pieces can spawn partially hidden.
    pub fn accepts(&self, pos: Position) -> bool {
        if pos.x < 0 || pos.x as usize >= self.width {
            return false;
        }
        if pos.y < 0 {
            return true;
        }
        if pos.y as usize >= self.height {
            return false;
        }
        !self.is_occupied(pos.x, pos.y)
    }

    /// Whether every block of `piece` can occupy its absolute position
    ///
    /// This is the only legality check in the engine; every move, rotation
    /// and spawn goes through it before anything is committed.
    pub fn is_valid_placement(&self, piece: &Piece) -> bool {
        piece.cells().iter().all(|&pos| self.accepts(pos))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.cells[start..start + self.width]
            .iter()
            .all(Cell::is_occupied)
    }

    /// Remove every full row and compact the rest downwards
    ///
    /// Non-full rows keep their relative order and drop by the number of
    /// full rows found below them; vacated rows at the top become empty.
    /// Returns the removed row indices, bottom row first.
    pub fn clear_full_rows(&mut self) -> Vec<usize> {
        let mut cleared = Vec::new();
        let width = self.width;
        let mut write_y = self.height;

        for read_y in (0..self.height).rev() {
            if self.is_row_full(read_y) {
                cleared.push(read_y);
            } else {
                write_y -= 1;
                if write_y != read_y {
                    let src = read_y * width;
                    self.cells.copy_within(src..src + width, write_y * width);
                }
            }
        }

        self.cells[..write_y * width].fill(Cell::Empty);
        cleared
    }

    /// Row `y` as a slice, top row is 0
    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Iterate rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width)
    }

    /// Iterate occupied cells as `(position, tag)`
    pub fn occupied(&self) -> impl Iterator<Item = (Position, crate::types::Tag)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(idx, cell)| {
            cell.tag().map(|tag| {
                (
                    Position::new((idx % width) as i32, (idx / width) as i32),
                    tag,
                )
            })
        })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reset every cell to empty
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ShapeKind, Tag};

    const T: Cell = Cell::Occupied(Tag(5));

    #[test]
    fn test_index_calculation() {
        let grid = Grid::new(10, 20).unwrap();
        assert_eq!(grid.index(0, 0), Some(0));
        assert_eq!(grid.index(9, 0), Some(9));
        assert_eq!(grid.index(0, 1), Some(10));
        assert_eq!(grid.index(9, 19), Some(199));
        assert_eq!(grid.index(-1, 0), None);
        assert_eq!(grid.index(10, 0), None);
        assert_eq!(grid.index(0, 20), None);
    }

    #[test]
    fn test_zero_dimensions_fail() {
        assert_eq!(Grid::new(0, 20), Err(ConfigError::ZeroWidth));
        assert_eq!(Grid::new(10, 0), Err(ConfigError::ZeroHeight));
    }

    #[test]
    fn test_accepts_tolerates_rows_above_top() {
        let grid = Grid::new(10, 20).unwrap();
        assert!(grid.accepts(Position::new(0, -3)));
        assert!(!grid.accepts(Position::new(-1, -3)));
        assert!(!grid.accepts(Position::new(10, 0)));
        assert!(!grid.accepts(Position::new(0, 20)));
    }

    #[test]
    fn test_clear_full_rows_compacts() {
        let mut grid = Grid::new(3, 4).unwrap();
        // row 1 partial, rows 2 and 3 full
        grid.set(0, 1, T);
        for x in 0..3 {
            grid.set(x, 2, T);
            grid.set(x, 3, T);
        }

        let cleared = grid.clear_full_rows();
        assert_eq!(cleared, vec![3, 2]);
        assert_eq!(grid.get(0, 3), Some(T));
        assert_eq!(grid.get(1, 3), Some(Cell::Empty));
        assert!(grid.row(0).unwrap().iter().all(Cell::is_empty));
        assert!(grid.row(2).unwrap().iter().all(Cell::is_empty));
    }

    #[test]
    fn test_clear_non_adjacent_rows() {
        let mut grid = Grid::new(2, 5).unwrap();
        let a = Cell::Occupied(Tag::for_kind(ShapeKind::I));
        let b = Cell::Occupied(Tag::for_kind(ShapeKind::Z));
        grid.set(0, 0, a); // partial, top
        grid.set(0, 1, T);
        grid.set(1, 1, T); // full
        grid.set(1, 2, b); // partial
        grid.set(0, 3, T);
        grid.set(1, 3, T); // full
        grid.set(0, 4, b); // partial, bottom

        assert_eq!(grid.clear_full_rows(), vec![3, 1]);
        assert_eq!(grid.row(4).unwrap(), &[b, Cell::Empty]);
        assert_eq!(grid.row(3).unwrap(), &[Cell::Empty, b]);
        assert_eq!(grid.row(2).unwrap(), &[a, Cell::Empty]);
        assert!(grid.row(1).unwrap().iter().all(Cell::is_empty));
        assert!(grid.row(0).unwrap().iter().all(Cell::is_empty));
    }

    #[test]
    fn test_from_rows_roundtrip() {
        let mut rows = vec![vec![Cell::Empty; 4]; 3];
        rows[2][1] = T;
        let grid = Grid::from_rows(rows.clone()).unwrap();
        let back: Vec<Vec<Cell>> = grid.rows().map(<[Cell]>::to_vec).collect();
        assert_eq!(rows, back);
    }

    #[test]
    fn test_occupied_iterator() {
        let mut grid = Grid::new(4, 4).unwrap();
        grid.set(3, 2, T);
        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(occupied, vec![(Position::new(3, 2), Tag(5))]);
    }

    proptest::proptest! {
        #[test]
        fn clear_removes_exactly_the_full_rows(
            width in 1usize..8,
            rows in proptest::collection::vec(proptest::collection::vec(proptest::bool::ANY, 8), 1..12),
        ) {
            let rows: Vec<Vec<Cell>> = rows
                .into_iter()
                .map(|row| row[..width].iter().map(|&b| if b { T } else { Cell::Empty }).collect())
                .collect();
            let mut grid = Grid::from_rows(rows.clone()).unwrap();
            let full = (0..grid.height()).filter(|&y| grid.is_row_full(y)).count();
            let before = grid.occupied().count();

            let cleared = grid.clear_full_rows();

            proptest::prop_assert_eq!(cleared.len(), full);
            proptest::prop_assert_eq!(grid.occupied().count(), before - full * width);
            proptest::prop_assert!((0..grid.height()).all(|y| !grid.is_row_full(y)));
            // surviving rows keep their order at the bottom
            let kept: Vec<_> = rows.into_iter().filter(|r| !r.iter().all(Cell::is_occupied)).collect();
            let bottom: Vec<_> = grid.rows().skip(full).map(<[Cell]>::to_vec).collect();
            proptest::prop_assert_eq!(bottom, kept);
        }
    }
}
