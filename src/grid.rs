use crate::cursor::Neighborhood;
use crate::error::Error;

/// Row-major flat grid of cell values with a one-cell sentinel border.
///
/// Callers address the interior with 1-based logical coordinates; the
/// physical buffer is two cells larger on each axis and keeps the border
/// filled with the empty value between steps. Because the border occupies
/// physical row/column 0, logical (row, col) and physical (row, col)
/// coincide for interior cells.
#[derive(Clone, Debug)]
pub struct Grid<C> {
    cells: Vec<C>,
    phys_w: usize,
    phys_h: usize,
    empty: C,
}

impl<C: Copy + PartialEq> Grid<C> {
    /// Builds a grid from a non-empty buffer of equal-length rows,
    /// surrounded by a one-cell border of `empty`.
    pub fn from_rows(rows: &[Vec<C>], empty: C) -> Result<Self, Error> {
        let height = rows.len();
        let width = rows.first().map(Vec::len).unwrap_or(0);
        if height == 0 || width == 0 || rows.iter().any(|r| r.len() != width) {
            return Err(Error::InvalidShape);
        }

        let phys_w = width + 2;
        let phys_h = height + 2;
        let mut cells = vec![empty; phys_w * phys_h];
        for (r, row) in rows.iter().enumerate() {
            let start = (r + 1) * phys_w + 1;
            cells[start..start + width].copy_from_slice(row);
        }
        Ok(Self {
            cells,
            phys_w,
            phys_h,
            empty,
        })
    }

    /// Interior width visible to callers.
    #[inline]
    pub fn width(&self) -> usize {
        self.phys_w - 2
    }

    /// Interior height visible to callers.
    #[inline]
    pub fn height(&self) -> usize {
        self.phys_h - 2
    }

    /// The designated vacant cell value.
    #[inline]
    pub fn empty(&self) -> C {
        self.empty
    }

    /// Physical read, border included. Interior cells sit at 1..=width.
    #[inline]
    pub(crate) fn at(&self, row: usize, col: usize) -> C {
        debug_assert!(row < self.phys_h && col < self.phys_w);
        self.cells[row * self.phys_w + col]
    }

    /// Interior write without bounds translation; used by the step engine
    /// when committing lag-buffer values at positions it already validated.
    #[inline]
    pub(crate) fn put(&mut self, row: usize, col: usize, value: C) {
        debug_assert!(1 <= row && row <= self.height() && 1 <= col && col <= self.width());
        let i = row * self.phys_w + col;
        self.cells[i] = value;
    }

    fn check(&self, row: usize, col: usize) -> Result<(), Error> {
        if row == 0 || col == 0 || row > self.height() || col > self.width() {
            return Err(Error::OutOfBounds {
                row,
                col,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(())
    }

    /// Reads an interior cell at 1-based logical coordinates.
    pub fn get(&self, row: usize, col: usize) -> Result<C, Error> {
        self.check(row, col)?;
        Ok(self.at(row, col))
    }

    /// Writes an interior cell at 1-based logical coordinates.
    pub fn set(&mut self, row: usize, col: usize, value: C) -> Result<(), Error> {
        self.check(row, col)?;
        self.put(row, col, value);
        Ok(())
    }

    /// Iterates over interior cells in row-major order, border excluded.
    /// The iterator is finite and can be restarted by calling again.
    pub fn iter(&self) -> impl Iterator<Item = C> + '_ {
        let width = self.width();
        self.cells
            .chunks_exact(self.phys_w)
            .skip(1)
            .take(self.height())
            .flat_map(move |row| row[1..=width].iter().copied())
    }

    /// Copies the interior back out as a buffer of rows.
    pub fn to_rows(&self) -> Vec<Vec<C>> {
        let width = self.width();
        self.cells
            .chunks_exact(self.phys_w)
            .skip(1)
            .take(self.height())
            .map(|row| row[1..=width].to_vec())
            .collect()
    }

    /// A read-only 3x3 view centered on an interior cell, for rule
    /// evaluation. The center must be interior; its neighbors may fall on
    /// the border, which always reads as empty between steps.
    pub fn neighborhood(&self, row: usize, col: usize) -> Result<Neighborhood<'_, C>, Error> {
        self.check(row, col)?;
        Ok(Neighborhood::new(self, row, col))
    }

    /// True iff live content reached the outermost interior ring. This is
    /// the signal the growth policy watches: anything on that ring could
    /// spill past the edge on the next generation.
    pub fn boundary_touched(&self) -> bool {
        let (width, height) = (self.width(), self.height());
        let empty = self.empty;
        (1..=width).any(|c| self.at(1, c) != empty || self.at(height, c) != empty)
            || (1..=height).any(|r| self.at(r, 1) != empty || self.at(r, width) != empty)
    }

    /// Logical dimensions after one growth event with the given target
    /// area multiplier: each axis scales by its square root, rounded down,
    /// and never below the current size.
    pub fn grown_dims(&self, area_factor: f64) -> (usize, usize) {
        let axis = area_factor.sqrt();
        let width = ((self.width() as f64 * axis) as usize).max(self.width());
        let height = ((self.height() as f64 * axis) as usize).max(self.height());
        (width, height)
    }

    /// Reallocates to the given logical dimensions, copying the current
    /// interior into the center of the new buffer. Never shrinks; new
    /// cells start empty.
    pub fn grow_to(&mut self, new_width: usize, new_height: usize) {
        let (old_w, old_h) = (self.width(), self.height());
        let new_width = new_width.max(old_w);
        let new_height = new_height.max(old_h);

        let phys_w = new_width + 2;
        let phys_h = new_height + 2;
        let mut cells = vec![self.empty; phys_w * phys_h];

        // Physical offset of the re-centered content, border row included.
        let off_r = (new_height - old_h) / 2 + 1;
        let off_c = (new_width - old_w) / 2 + 1;
        for r in 0..old_h {
            let src = (r + 1) * self.phys_w + 1;
            let dst = (off_r + r) * phys_w + off_c;
            cells[dst..dst + old_w].copy_from_slice(&self.cells[src..src + old_w]);
        }

        self.cells = cells;
        self.phys_w = phys_w;
        self.phys_h = phys_h;
    }

    /// One growth event: `grown_dims` followed by `grow_to`.
    pub fn grow(&mut self, area_factor: f64) {
        let (w, h) = self.grown_dims(area_factor);
        self.grow_to(w, h);
    }
}

/// Element-wise equality over the interior only. Physical capacity, the
/// empty value, and any growth history do not participate.
impl<C: Copy + PartialEq> PartialEq for Grid<C> {
    fn eq(&self, other: &Self) -> bool {
        self.width() == other.width()
            && self.height() == other.height()
            && self.iter().eq(other.iter())
    }
}
