//! Grid module - the playfield
//!
//! The grid is 10 columns by 20 rows where each cell is empty or holds the kind
//! of the piece locked there. Storage is a flat array for cache locality and
//! zero allocation.
//!
//! Coordinates: (x, y) where x ranges 0..9 (left to right) and y ranges 0..19
//! (**bottom to top**). Writes go through [`Pos`], which can only be built
//! for in-bounds coordinates, so a stray write cannot be expressed.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceKind, GRID_HEIGHT, GRID_WIDTH};

/// Number of columns as `usize`
pub const COLS: usize = GRID_WIDTH as usize;

/// Number of rows as `usize`
pub const ROWS: usize = GRID_HEIGHT as usize;

/// Total number of cells on the grid
const GRID_SIZE: usize = COLS * ROWS;

/// An in-bounds grid coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pos {
    x: u8,
    y: u8,
}

impl Pos {
    /// Returns `None` when `(x, y)` lies outside the grid
    pub fn new(x: i8, y: i8) -> Option<Self> {
        if x < 0 || x >= GRID_WIDTH as i8 || y < 0 || y >= GRID_HEIGHT as i8 {
            return None;
        }
        Some(Self {
            x: x as u8,
            y: y as u8,
        })
    }

    pub fn x(&self) -> u8 {
        self.x
    }

    pub fn y(&self) -> u8 {
        self.y
    }

    #[inline(always)]
    fn index(&self) -> usize {
        (self.y as usize) * COLS + (self.x as usize)
    }
}

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x), row 0 at the bottom
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new empty grid
    pub fn new() -> Self {
        Self {
            cells: [None; GRID_SIZE],
        }
    }

    pub fn width(&self) -> u8 {
        GRID_WIDTH
    }

    pub fn height(&self) -> u8 {
        GRID_HEIGHT
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Cell> {
        Pos::new(x, y).map(|pos| self.cells[pos.index()])
    }

    /// Cell at an in-bounds position
    pub fn cell(&self, pos: Pos) -> Cell {
        self.cells[pos.index()]
    }

    /// Write a cell
    pub fn set(&mut self, pos: Pos, cell: Cell) {
        self.cells[pos.index()] = cell;
    }

    /// In bounds and empty
    pub fn is_free(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(None))
    }

    /// In bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(Some(_)))
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= ROWS {
            return false;
        }
        let start = y * COLS;
        self.cells[start..start + COLS].iter().all(|cell| cell.is_some())
    }

    /// Indices of completely filled rows, ascending
    pub fn full_rows(&self) -> ArrayVec<usize, ROWS> {
        (0..ROWS).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove `rows` and compact the remaining rows downward.
    ///
    /// Which rows survive is decided against the grid as it was before the call,
    /// so the order of `rows` does not matter. Duplicates and out-of-range
    /// indices are ignored. Returns the number of rows removed.
    pub fn clear_rows(&mut self, rows: &[usize]) -> usize {
        let mut removed = [false; ROWS];
        for &y in rows {
            if y < ROWS {
                removed[y] = true;
            }
        }

        // Bottom-up two-pointer pass: `write_y <= read_y`, so every source row is
        // read before anything overwrites it.
        let mut write_y = 0;
        for read_y in 0..ROWS {
            if removed[read_y] {
                continue;
            }
            if write_y != read_y {
                self.cells
                    .copy_within(read_y * COLS..(read_y + 1) * COLS, write_y * COLS);
            }
            write_y += 1;
        }

        // Vacated rows at the top
        self.cells[write_y * COLS..].fill(None);

        ROWS - write_y
    }

    /// Write four cells with the kind tag
    pub fn lock_cells(&mut self, cells: &[Pos; 4], kind: PieceKind) {
        for &pos in cells {
            self.set(pos, Some(kind));
        }
    }

    /// Flat cell slice, row-major from the bottom row
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Iterate rows from bottom (y = 0) to top
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(COLS)
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    /// Empty every cell
    pub fn clear(&mut self) {
        self.cells.fill(None);
    }

    /// Build a grid from text rows, top row first.
    ///
    /// `.` is empty; a piece letter (`I`, `O`, `T`, `L`, `J`, `S`, `Z`) fills a
    /// cell with that kind. Missing rows are empty, extra rows and columns are
    /// ignored. Handy for setting up puzzles in tests.
    pub fn from_ascii(rows: &[&str]) -> Self {
        let mut grid = Self::new();
        let top = rows.len().min(ROWS);
        for (i, line) in rows.iter().take(top).enumerate() {
            let y = (top - 1 - i) as i8;
            for (x, ch) in line.chars().take(COLS).enumerate() {
                let cell = PieceKind::from_str(&ch.to_string());
                if let Some(pos) = Pos::new(x as i8, y) {
                    grid.set(pos, cell);
                }
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(grid: &mut Grid, y: i8, kind: PieceKind) {
        for x in 0..GRID_WIDTH as i8 {
            grid.set(Pos::new(x, y).unwrap(), Some(kind));
        }
    }

    #[test]
    fn test_pos_bounds() {
        assert!(Pos::new(0, 0).is_some());
        assert!(Pos::new(9, 19).is_some());
        assert!(Pos::new(-1, 0).is_none());
        assert!(Pos::new(10, 0).is_none());
        assert!(Pos::new(0, 20).is_none());
        assert!(Pos::new(0, -1).is_none());
    }

    #[test]
    fn test_pos_index_calculation() {
        assert_eq!(Pos::new(0, 0).unwrap().index(), 0);
        assert_eq!(Pos::new(9, 0).unwrap().index(), 9);
        assert_eq!(Pos::new(0, 1).unwrap().index(), 10);
        assert_eq!(Pos::new(9, 19).unwrap().index(), 199);
    }

    #[test]
    fn test_free_and_occupied() {
        let mut grid = Grid::new();
        assert!(grid.is_free(5, 10));
        assert!(!grid.is_occupied(5, 10));

        grid.set(Pos::new(5, 10).unwrap(), Some(PieceKind::T));
        assert!(!grid.is_free(5, 10));
        assert!(grid.is_occupied(5, 10));

        // Out of range is neither free nor occupied
        assert!(!grid.is_free(-1, 0));
        assert!(!grid.is_occupied(-1, 0));
    }

    #[test]
    fn test_full_rows_ascending() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 7, PieceKind::I);
        fill_row(&mut grid, 2, PieceKind::O);
        grid.set(Pos::new(0, 4).unwrap(), Some(PieceKind::Z));

        assert_eq!(grid.full_rows().as_slice(), &[2, 7]);
    }

    #[test]
    fn test_clear_rows_shifts_rows_above() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 0, PieceKind::I);
        grid.set(Pos::new(3, 1).unwrap(), Some(PieceKind::T));
        grid.set(Pos::new(4, 5).unwrap(), Some(PieceKind::L));

        assert_eq!(grid.clear_rows(&[0]), 1);

        assert_eq!(grid.get(3, 0), Some(Some(PieceKind::T)));
        assert_eq!(grid.get(4, 4), Some(Some(PieceKind::L)));
        assert_eq!(grid.get(4, 5), Some(None));
        assert_eq!(grid.filled_count(), 2);
    }

    #[test]
    fn test_clear_rows_is_order_independent() {
        let mut base = Grid::new();
        fill_row(&mut base, 3, PieceKind::I);
        fill_row(&mut base, 7, PieceKind::J);
        base.set(Pos::new(1, 5).unwrap(), Some(PieceKind::S));
        base.set(Pos::new(2, 9).unwrap(), Some(PieceKind::Z));

        let mut a = base.clone();
        let mut b = base.clone();
        a.clear_rows(&[3, 7]);
        b.clear_rows(&[7, 3]);
        assert_eq!(a, b);

        // Row 5 drops past one cleared row, row 9 past two.
        assert_eq!(a.get(1, 4), Some(Some(PieceKind::S)));
        assert_eq!(a.get(2, 7), Some(Some(PieceKind::Z)));
    }

    #[test]
    fn test_clear_rows_ignores_duplicates_and_out_of_range() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 0, PieceKind::I);
        assert_eq!(grid.clear_rows(&[0, 0, 99]), 1);
        assert_eq!(grid.filled_count(), 0);
    }

    #[test]
    fn test_clear_top_row() {
        let mut grid = Grid::new();
        fill_row(&mut grid, 19, PieceKind::O);
        grid.clear_rows(&[19]);
        assert_eq!(grid, Grid::new());
    }

    #[test]
    fn test_from_ascii_top_row_first() {
        let grid = Grid::from_ascii(&["T.........", "IIII......"]);
        assert_eq!(grid.get(0, 1), Some(Some(PieceKind::T)));
        assert_eq!(grid.get(3, 0), Some(Some(PieceKind::I)));
        assert_eq!(grid.get(4, 0), Some(None));
        assert_eq!(grid.filled_count(), 5);
    }

    #[test]
    fn test_rows_bottom_first() {
        let grid = Grid::from_ascii(&["O.........", ".........."]);
        let rows: Vec<&[Cell]> = grid.rows().collect();
        assert_eq!(rows.len(), ROWS);
        assert_eq!(rows[1][0], Some(PieceKind::O));
        assert_eq!(rows[0][0], None);
    }
}
