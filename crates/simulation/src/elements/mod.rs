//! Movement rules dispatched from the tick loop.

mod granular;

use crate::api::{TickApi, TieBreak};
use crate::cell::{Cell, PixelKind};

/// Decide where `cell` lands in the next grid.
///
/// Called once per enabled previous-grid cell; the tick loop skips
/// disabled cells before dispatch.
pub fn update_cell<R: TieBreak + ?Sized>(cell: Cell, api: &mut TickApi<'_, R>) {
    match cell.kind {
        PixelKind::Sand | PixelKind::ColoredSand => granular::update_accelerated(cell, api),
        PixelKind::Gravel => granular::update_plain(cell, api),
    }
}
