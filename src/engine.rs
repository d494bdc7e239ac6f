use std::collections::VecDeque;
use std::fmt;
use std::time::Instant;

use log::{debug, trace};
use rayon::prelude::*;

use crate::config::{Growth, Settings};
use crate::cursor::{Cursor, Neighborhood};
use crate::error::Error;
use crate::grid::Grid;
use crate::snapshot::Snapshot;

/// A transition rule: reads a 3x3 neighborhood, returns the next value for
/// its center. Rules must be pure functions of the view -- the engine
/// evaluates cells against the old grid in an order of its own choosing,
/// and a rule that peeks at anything else breaks that contract.
pub trait Rule<C> {
    fn apply(&self, view: &Neighborhood<'_, C>) -> Result<C, Error>;
}

impl<C, F> Rule<C> for F
where
    F: Fn(&Neighborhood<'_, C>) -> Result<C, Error>,
{
    fn apply(&self, view: &Neighborhood<'_, C>) -> Result<C, Error> {
        self(view)
    }
}

/// Fixed-capacity FIFO of computed-but-uncommitted cell values.
///
/// Sized to two logical rows; the step engine never holds more in flight.
/// Push past capacity or pop when empty is a step-engine bug.
struct LagBuffer<C> {
    slots: Vec<C>,
    head: usize,
    len: usize,
}

impl<C: Copy> LagBuffer<C> {
    fn new(capacity: usize, fill: C) -> Self {
        Self {
            slots: vec![fill; capacity.max(1)],
            head: 0,
            len: 0,
        }
    }

    #[inline]
    fn push(&mut self, value: C) {
        debug_assert!(self.len < self.slots.len(), "lag buffer overfilled");
        let tail = (self.head + self.len) % self.slots.len();
        self.slots[tail] = value;
        self.len += 1;
    }

    #[inline]
    fn pop(&mut self) -> C {
        debug_assert!(self.len > 0, "lag buffer drained out of step order");
        let value = self.slots[self.head];
        self.head = (self.head + 1) % self.slots.len();
        self.len -= 1;
        value
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.len
    }

    #[cfg(test)]
    fn capacity(&self) -> usize {
        self.slots.len()
    }
}

/// A 2D cellular automaton: sentinel-bordered grid, a transition rule, and
/// the generational step machinery.
///
/// Each `step` recomputes every interior cell from its old 3x3
/// neighborhood, in place: new values trail the evaluation cursor by two
/// rows inside a bounded lag buffer, so the rows a rule still needs to read
/// are never overwritten early and no second full grid is allocated.
pub struct Automaton<C, R> {
    grid: Grid<C>,
    rule: R,
    settings: Settings,
    generation: u64,
    growth_veto: Option<Box<dyn Fn(usize, usize) -> bool>>,
}

impl<C, R> Automaton<C, R>
where
    C: Copy + PartialEq,
    R: Rule<C>,
{
    /// A bounded automaton: the grid keeps its size for its whole lifetime.
    pub fn new(rows: &[Vec<C>], empty: C, rule: R) -> Result<Self, Error> {
        Self::with_settings(rows, empty, rule, Settings::default())
    }

    /// An unbounded automaton: the grid grows whenever live content
    /// reaches its edge.
    pub fn unbounded(rows: &[Vec<C>], empty: C, rule: R) -> Result<Self, Error> {
        Self::with_settings(rows, empty, rule, Settings::unbounded())
    }

    pub fn with_settings(
        rows: &[Vec<C>],
        empty: C,
        rule: R,
        settings: Settings,
    ) -> Result<Self, Error> {
        Ok(Self {
            grid: Grid::from_rows(rows, empty)?,
            rule,
            settings,
            generation: 0,
            growth_veto: None,
        })
    }

    /// Restores an automaton from a serialized snapshot, generation
    /// counter included.
    pub fn from_snapshot(
        snapshot: &Snapshot<C>,
        empty: C,
        rule: R,
        settings: Settings,
    ) -> Result<Self, Error> {
        if snapshot.width == 0 || snapshot.cells.len() != snapshot.width * snapshot.height {
            return Err(Error::InvalidShape);
        }
        let rows: Vec<Vec<C>> = snapshot
            .cells
            .chunks_exact(snapshot.width)
            .map(|row| row.to_vec())
            .collect();
        let mut automaton = Self::with_settings(&rows, empty, rule, settings)?;
        automaton.generation = snapshot.generation;
        Ok(automaton)
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    /// Completed generations since construction.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn grid(&self) -> &Grid<C> {
        &self.grid
    }

    /// Reads a cell at 1-based logical coordinates.
    pub fn get(&self, row: usize, col: usize) -> Result<C, Error> {
        self.grid.get(row, col)
    }

    /// Writes a cell at 1-based logical coordinates, for interactive
    /// editing between steps. Does not touch the generation counter.
    pub fn set(&mut self, row: usize, col: usize, value: C) -> Result<(), Error> {
        self.grid.set(row, col, value)
    }

    /// Interior cells in row-major order, for painting or serialization by
    /// a collaborator.
    pub fn iter(&self) -> impl Iterator<Item = C> + '_ {
        self.grid.iter()
    }

    /// Dumps logical content plus the generation counter.
    pub fn snapshot(&self) -> Snapshot<C> {
        Snapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            generation: self.generation,
            cells: self.grid.iter().collect(),
        }
    }

    /// Installs a predicate consulted with the proposed new logical
    /// dimensions before any growth event. Returning false skips growth
    /// for that step only; the step itself always proceeds.
    pub fn set_growth_veto(&mut self, veto: impl Fn(usize, usize) -> bool + 'static) {
        self.growth_veto = Some(Box::new(veto));
    }

    fn maybe_grow(&mut self) {
        if self.settings.growth != Growth::Unbounded {
            return;
        }
        if !self.grid.boundary_touched() {
            return;
        }
        let (new_w, new_h) = self.grid.grown_dims(self.settings.growth_factor);
        if let Some(veto) = &self.growth_veto {
            if !veto(new_w, new_h) {
                debug!(
                    "growth to {}x{} vetoed at generation {}",
                    new_w, new_h, self.generation
                );
                return;
            }
        }
        self.grid.grow_to(new_w, new_h);
        debug!(
            "grid grown to {}x{} at generation {}",
            new_w, new_h, self.generation
        );
    }

    /// Advances one generation, mutating the grid in place.
    ///
    /// The first two interior rows are evaluated into the lag buffer
    /// before anything is committed; from the third row on, every
    /// evaluation commits the value two rows behind the cursor, whose old
    /// neighborhood can no longer be needed. The tail of the buffer is
    /// flushed once evaluation runs out of rows. Heights of 1 and 2
    /// degrade to a pure fill-then-flush.
    ///
    /// A rule failure aborts mid-step: the error surfaces verbatim, the
    /// grid stays partially updated and the generation counter does not
    /// move.
    pub fn step(&mut self) -> Result<(), Error> {
        let started = Instant::now();
        self.maybe_grow();

        let (width, height) = (self.grid.width(), self.grid.height());
        let mut lag = LagBuffer::new(2 * width, self.grid.empty());
        let mut cursor = Cursor::new(width, height);

        // Head start: fill the lag with the first rows, committing nothing.
        let warm_rows = height.min(2);
        for _ in 0..width * warm_rows {
            let view = self.grid.neighborhood(cursor.row(), cursor.col())?;
            lag.push(self.rule.apply(&view)?);
            cursor.advance()?;
        }

        // Commit at a two-row distance behind the read position.
        for row in 3..=height {
            for col in 1..=width {
                let committed = lag.pop();
                self.grid.put(row - 2, col, committed);
                let view = self.grid.neighborhood(cursor.row(), cursor.col())?;
                lag.push(self.rule.apply(&view)?);
                cursor.advance()?;
            }
        }

        // Flush what is left in the lag into the trailing rows.
        for row in (height - warm_rows + 1)..=height {
            for col in 1..=width {
                let committed = lag.pop();
                self.grid.put(row, col, committed);
            }
        }

        self.generation += 1;
        trace!(
            "generation {} stepped {}x{} in {:.1?}",
            self.generation,
            width,
            height,
            started.elapsed()
        );
        Ok(())
    }

    /// `step`, evaluating each row in parallel across columns.
    ///
    /// Same observable semantics as `step` (growth policy, generation
    /// counter, two-row commit lag -- held at row granularity here); only
    /// rule evaluation fans out.
    pub fn step_parallel(&mut self) -> Result<(), Error>
    where
        C: Send + Sync,
        R: Sync,
    {
        let started = Instant::now();
        self.maybe_grow();

        let (width, height) = (self.grid.width(), self.grid.height());
        let mut pending: VecDeque<Vec<C>> = VecDeque::with_capacity(3);

        for row in 1..=height {
            let grid = &self.grid;
            let rule = &self.rule;
            let values = (0..width)
                .into_par_iter()
                .map(|i| {
                    let view = grid.neighborhood(row, i + 1)?;
                    rule.apply(&view)
                })
                .collect::<Result<Vec<C>, Error>>()?;
            pending.push_back(values);

            if pending.len() > 2 {
                if let Some(values) = pending.pop_front() {
                    self.commit_row(row - 2, &values);
                }
            }
        }

        let mut row = height + 1 - pending.len();
        for values in pending {
            self.commit_row(row, &values);
            row += 1;
        }

        self.generation += 1;
        trace!(
            "generation {} stepped {}x{} in parallel in {:.1?}",
            self.generation,
            width,
            height,
            started.elapsed()
        );
        Ok(())
    }

    fn commit_row(&mut self, row: usize, values: &[C]) {
        for (i, value) in values.iter().enumerate() {
            self.grid.put(row, i + 1, *value);
        }
    }

    /// Runs `steps` generations back to back.
    pub fn run(&mut self, steps: u64) -> Result<(), Error> {
        for _ in 0..steps {
            self.step()?;
        }
        Ok(())
    }
}

/// Equality follows grid equality: logical dimensions and interior cells,
/// nothing else. Generation counters and rules do not participate.
impl<C: Copy + PartialEq, R> PartialEq for Automaton<C, R> {
    fn eq(&self, other: &Self) -> bool {
        self.grid == other.grid
    }
}

impl<C: Copy + PartialEq + fmt::Debug, R> fmt::Debug for Automaton<C, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Automaton")
            .field("grid", &self.grid)
            .field("generation", &self.generation)
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}
