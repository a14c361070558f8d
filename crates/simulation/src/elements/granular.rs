//! Granular movement: gravity, diagonal spread, and accelerating
//! free-fall with blocker lookahead.

use crate::api::{TickApi, TieBreak};
use crate::cell::Cell;

/// Kinds without acceleration data fall exactly one row per tick.
pub fn update_plain<R: TieBreak + ?Sized>(cell: Cell, api: &mut TickApi<'_, R>) {
    match api.get(0, 1) {
        // Off-grid below: the particle rests on the boundary.
        None => api.emit(0, 0, cell),
        Some(below) if below.enabled => spread(cell, api),
        Some(_) => api.emit(0, 1, cell),
    }
}

/// Kinds with acceleration data scan ahead by their fall speed and stop
/// above the first blocker.
pub fn update_accelerated<R: TieBreak + ?Sized>(cell: Cell, api: &mut TickApi<'_, R>) {
    match api.get(0, 1) {
        None => api.emit(0, 0, cell),
        Some(below) if below.enabled => spread(cell, api),
        Some(_) => fall(cell, api),
    }
}

/// Straight down is occupied: slide into a free diagonal, staying put when
/// both are blocked. Off-grid diagonals count as blocked, and the coin is
/// only flipped when there is a genuine choice.
fn spread<R: TieBreak + ?Sized>(cell: Cell, api: &mut TickApi<'_, R>) {
    let left_free = !api.blocked(-1, 1);
    let right_free = !api.blocked(1, 1);

    match (left_free, right_free) {
        (true, true) => {
            let dcol = api.flip().delta();
            api.emit(dcol, 1, cell);
        }
        (true, false) => api.emit(-1, 1, cell),
        (false, true) => api.emit(1, 1, cell),
        (false, false) => api.emit(0, 0, cell),
    }
}

/// Accelerated free-fall. The candidate destination is `fall_speed` rows
/// down, clamped to the last row; the first occupied cell on the way stops
/// the particle immediately above it and resets the counter. Either way
/// the particle descends at least one row, and the counter grows by one
/// for the next tick.
fn fall<R: TieBreak + ?Sized>(mut cell: Cell, api: &mut TickApi<'_, R>) {
    let row = api.row();
    let mut speed = cell.acceleration().fall_speed;
    let mut dest = row + speed;

    if dest > api.last_row() {
        dest = api.last_row();
        speed = 0;
    }

    for step in 1..=(dest - row) {
        if api.get(0, step).is_some_and(|scanned| scanned.enabled) {
            dest = row + step - 1;
            speed = 0;
            break;
        }
    }

    dest = dest.max(row + 1);

    cell.acceleration_mut().fall_speed = speed + 1;
    api.emit(0, dest - row, cell);
}
