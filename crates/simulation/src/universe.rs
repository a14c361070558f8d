//! Harness-facing driver: owns the current grid, the hue palette, the
//! tie-break randomness, and the brush, and exposes the mutation, tick,
//! and render-query surface over wasm-bindgen.
//!
//! Harness mutations land strictly between ticks on the then-current
//! grid; `tick` retires that grid and installs the freshly written one.

use wasm_bindgen::prelude::*;

use crate::api::RandomTieBreak;
use crate::cell::PixelKind;
use crate::color::HuePalette;
use crate::Grid;

/// Packed color for coordinates with no particle — the harness clear
/// color (opaque black).
const BACKGROUND: u32 = 0xFF00_0000;

/// Tie-break seed for universes created without an explicit one.
const DEFAULT_SEED: u64 = 0x5EED_BA5E;

#[wasm_bindgen]
#[derive(Debug)]
pub struct Universe {
    grid: Grid,
    palette: HuePalette,
    rng: RandomTieBreak,
    brush: PixelKind,
}

#[wasm_bindgen]
impl Universe {
    /// New universe with every cell disabled and the brush on plain sand.
    ///
    /// # Panics
    ///
    /// Panics if either extent is zero.
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self::with_seed(columns, rows, DEFAULT_SEED)
    }

    /// Deterministic construction: the same seed replays the same lateral
    /// tie-break sequence.
    ///
    /// # Panics
    ///
    /// Panics if either extent is zero.
    #[must_use]
    pub fn with_seed(columns: u32, rows: u32, seed: u64) -> Self {
        Self {
            grid: Grid::new(columns as i32, rows as i32),
            palette: HuePalette::new(),
            rng: RandomTieBreak::new(seed),
            brush: PixelKind::Sand,
        }
    }

    #[must_use]
    pub fn columns(&self) -> u32 {
        self.grid.columns() as u32
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.grid.rows() as u32
    }

    /// Advance the simulation one tick.
    pub fn tick(&mut self) {
        self.grid = self.grid.step(&mut self.rng);
    }

    /// Activate the cell at `(col, row)` with the brush kind.
    ///
    /// No-op off-grid, and no-op on an already-enabled cell so a drag
    /// across existing particles never re-rolls their data.
    pub fn paint(&mut self, col: i32, row: i32) {
        self.paint_kind(col, row, self.brush);
    }

    /// Deactivate the cell at `(col, row)`. No-op off-grid.
    pub fn erase(&mut self, col: i32, row: i32) {
        if let Some(cell) = self.grid.get_mut(col, row) {
            cell.enabled = false;
        }
    }

    /// Enable every cell with the brush kind.
    pub fn fill(&mut self) {
        self.fill_kind(self.brush);
    }

    /// Disable every cell, leaving kind and data untouched.
    pub fn clear(&mut self) {
        for cell in self.grid.cells_mut() {
            cell.enabled = false;
        }
    }

    /// Cycle the brush to the next kind.
    pub fn cycle_brush(&mut self) {
        self.brush = self.brush.next();
    }

    /// Display name of the current brush kind, for the HUD.
    #[must_use]
    pub fn brush_name(&self) -> String {
        self.brush.name().to_owned()
    }

    /// Display color at `(col, row)` packed as little-endian RGBA for
    /// canvas `ImageData`. Disabled and off-grid coordinates render as
    /// the background.
    #[must_use]
    pub fn color_at(&self, col: i32, row: i32) -> u32 {
        match self.grid.get(col, row) {
            Some(cell) if cell.enabled => cell.display_color().pack(),
            _ => BACKGROUND,
        }
    }
}

impl Universe {
    /// Activate `(col, row)` with an explicit kind (native harnesses and
    /// tests; the wasm surface paints with the brush instead).
    pub fn paint_kind(&mut self, col: i32, row: i32, kind: PixelKind) {
        let Some(cell) = self.grid.get_mut(col, row) else {
            return;
        };
        if cell.enabled {
            return;
        }
        cell.kind = kind;
        cell.reset(&mut self.palette);
        cell.enabled = true;
    }

    /// Enable every cell with an explicit kind, resetting each one first.
    pub fn fill_kind(&mut self, kind: PixelKind) {
        for cell in self.grid.cells_mut() {
            cell.kind = kind;
            cell.reset(&mut self.palette);
            cell.enabled = true;
        }
    }

    /// Current brush kind.
    #[must_use]
    pub const fn brush(&self) -> PixelKind {
        self.brush
    }

    /// Read access to the current grid, for rendering and inspection.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }
}
