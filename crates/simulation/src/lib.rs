//! Falling-sand cellular automaton engine.
//!
//! The engine advances a fixed-size pixel grid one tick per frame with
//! simultaneous-update semantics: a tick reads only the previous grid and
//! writes only a freshly allocated next grid, so no particle's movement
//! decision can see another particle's same-tick move. The rendering and
//! input harness lives entirely on the other side of [`Universe`].

pub mod api;
pub mod cell;
pub mod color;
pub mod elements;
pub mod universe;

use api::{TickApi, TieBreak};
use cell::Cell;
pub use universe::Universe;

/// 2D grid of cells. Out-of-bounds reads return `None`, writes are no-ops.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Grid {
    columns: i32,
    rows: i32,
    cells: Vec<Cell>,
}

impl Grid {
    /// New grid with every cell disabled.
    ///
    /// # Panics
    ///
    /// Panics if either extent is not positive.
    #[must_use]
    pub fn new(columns: i32, rows: i32) -> Self {
        assert!(columns > 0 && rows > 0, "grid extents must be positive");
        Self {
            columns,
            rows,
            cells: vec![Cell::default(); (columns * rows) as usize],
        }
    }

    #[must_use]
    pub const fn columns(&self) -> i32 {
        self.columns
    }

    #[must_use]
    pub const fn rows(&self) -> i32 {
        self.rows
    }

    #[must_use]
    pub const fn in_bounds(&self, col: i32, row: i32) -> bool {
        col >= 0 && col < self.columns && row >= 0 && row < self.rows
    }

    const fn index(&self, col: i32, row: i32) -> usize {
        (row * self.columns + col) as usize
    }

    /// Cell at `(col, row)`, or `None` off-grid.
    #[must_use]
    pub fn get(&self, col: i32, row: i32) -> Option<&Cell> {
        if self.in_bounds(col, row) {
            Some(&self.cells[self.index(col, row)])
        } else {
            None
        }
    }

    /// Mutable cell at `(col, row)`, or `None` off-grid.
    pub fn get_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if self.in_bounds(col, row) {
            let idx = self.index(col, row);
            Some(&mut self.cells[idx])
        } else {
            None
        }
    }

    /// Write `cell` at `(col, row)`. Off-grid writes are discarded.
    pub fn set(&mut self, col: i32, row: i32, cell: Cell) {
        if self.in_bounds(col, row) {
            let idx = self.index(col, row);
            self.cells[idx] = cell;
        }
    }

    /// Row-major iterator over every `(cell, col, row)` triple. Each call
    /// restarts from the first coordinate; every coordinate appears
    /// exactly once.
    pub fn cells(&self) -> impl Iterator<Item = (&Cell, i32, i32)> {
        let columns = self.columns;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            let i = i as i32;
            (cell, i % columns, i / columns)
        })
    }

    /// Mutable iterator over every cell, for bulk fill/clear operations.
    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    /// Number of enabled cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|cell| cell.enabled).count()
    }

    /// Advance one tick: read `self`, write and return the next grid.
    ///
    /// The caller replaces its current grid with the returned one and
    /// discards `self`. Coordinates no particle resolved to stay at their
    /// disabled default in the next grid.
    #[must_use]
    pub fn step<R: TieBreak + ?Sized>(&self, rng: &mut R) -> Self {
        let mut next = Self::new(self.columns, self.rows);
        for (cell, col, row) in self.cells() {
            if !cell.enabled {
                continue;
            }
            let mut api = TickApi::new(self, &mut next, col, row, &mut *rng);
            elements::update_cell(*cell, &mut api);
        }
        next
    }
}
