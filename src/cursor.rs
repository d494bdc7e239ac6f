use crate::error::Error;
use crate::grid::Grid;

/// Row-major cursor over the interior region, 1-based logical coordinates.
///
/// Starts at the first interior cell, advances one column at a time and
/// wraps to the next row. Recreated at the start of every step; it carries
/// no reference to the grid, so the engine can keep writing trailing rows
/// while the cursor walks ahead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor {
    row: usize,
    col: usize,
    width: usize,
    height: usize,
}

impl Cursor {
    /// A cursor at (1, 1) over a `width` x `height` interior.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            row: 1,
            col: 1,
            width,
            height,
        }
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.row
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.col
    }

    /// Moves one column right, wrapping to column 1 of the next row after
    /// the last interior column. Advancing wraps one single position past
    /// the last row; advancing again from there is the end-of-grid signal
    /// `ExhaustedBounds`.
    pub fn advance(&mut self) -> Result<(), Error> {
        if self.row > self.height {
            return Err(Error::ExhaustedBounds);
        }
        self.col += 1;
        if self.col > self.width {
            self.col = 1;
            self.row += 1;
        }
        Ok(())
    }

    /// Returns to the first interior cell.
    pub fn reset(&mut self) {
        self.row = 1;
        self.col = 1;
    }
}

/// Read-only 3x3 window handed to rule functions.
///
/// Bound to one interior position of one grid; rules see the center cell
/// and its 8 neighbors, nothing else.
pub struct Neighborhood<'g, C> {
    grid: &'g Grid<C>,
    row: usize,
    col: usize,
}

impl<'g, C: Copy + PartialEq> Neighborhood<'g, C> {
    pub(crate) fn new(grid: &'g Grid<C>, row: usize, col: usize) -> Self {
        Self { grid, row, col }
    }

    /// Reads the cell at center + (dr, dc). Offsets are limited to
    /// {-1, 0, 1} on both axes; anything further fails with `OutOfRange`.
    pub fn read(&self, dr: i32, dc: i32) -> Result<C, Error> {
        if dr.abs() > 1 || dc.abs() > 1 {
            return Err(Error::OutOfRange { dr, dc });
        }
        let row = (self.row as i64 + dr as i64) as usize;
        let col = (self.col as i64 + dc as i64) as usize;
        Ok(self.grid.at(row, col))
    }

    /// The center cell.
    #[inline]
    pub fn center(&self) -> C {
        self.grid.at(self.row, self.col)
    }

    /// The 8 surrounding cells, center excluded, in fixed order: top-left,
    /// top, top-right, left, right, bottom-left, bottom, bottom-right.
    /// Rules should only depend on position-independent aggregates of this
    /// array (a sum, a count), never on the ordering itself.
    pub fn neighbors(&self) -> [C; 8] {
        let (r, c) = (self.row, self.col);
        let g = self.grid;
        [
            g.at(r - 1, c - 1),
            g.at(r - 1, c),
            g.at(r - 1, c + 1),
            g.at(r, c - 1),
            g.at(r, c + 1),
            g.at(r + 1, c - 1),
            g.at(r + 1, c),
            g.at(r + 1, c + 1),
        ]
    }
}
