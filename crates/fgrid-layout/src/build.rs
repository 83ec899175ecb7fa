#![forbid(unsafe_code)]

//! Grid builder: flat item list to normalized rows.
//!
//! Items are grouped by their `layoutRow` hint. Explicit rows come first in
//! ascending order; auto-flowed items (row absent, zero or negative) follow
//! as a final group. Inside each group items keep their original order and
//! flow left to right across 12 columns, wrapping into a fresh row whenever
//! the next item would run past the last column or land on an occupied one.
//!
//! Malformed hints are clamped rather than rejected: spans into `1..=12`,
//! starts into `1..=12` (1-based).

use fgrid_core::{Cell, GRID_COLUMNS, LayoutItem};
use rustc_hash::FxHashMap;

use crate::grid::{Grid, Row};
use crate::logging::{layout_debug, layout_trace};

/// Build a normalized grid from caller items.
///
/// The output always satisfies the row invariants: overflow and collisions
/// start a new row, so no two cells in a row ever share a column.
#[must_use]
pub fn build<T: LayoutItem>(items: &[T]) -> Grid {
    let mut explicit: FxHashMap<u32, Vec<usize>> = FxHashMap::default();
    let mut auto_flow = Vec::new();

    for (index, item) in items.iter().enumerate() {
        let hints = item.layout();
        if hints.is_malformed() {
            layout_debug!(item = index, ?hints, "clamping malformed layout hints");
        }
        match hints.assigned_row() {
            Some(row) => explicit.entry(row).or_default().push(index),
            None => auto_flow.push(index),
        }
    }

    let mut keys: Vec<u32> = explicit.keys().copied().collect();
    keys.sort_unstable();

    let mut rows = Vec::with_capacity(keys.len() + 1);
    for key in keys {
        flow_group(items, &explicit[&key], true, &mut rows);
    }
    flow_group(items, &auto_flow, false, &mut rows);

    layout_trace!(items = items.len(), rows = rows.len(), "grid built");
    Grid::from_rows(rows)
}

/// Lay one row group out left to right, appending finished rows.
fn flow_group<T: LayoutItem>(
    items: &[T],
    indices: &[usize],
    honor_start: bool,
    rows: &mut Vec<Row>,
) {
    let mut current: Vec<Cell> = Vec::new();
    let mut next_col: u8 = 0;

    for &index in indices {
        let hints = items[index].layout();
        let span = hints.normalized_span();
        let start = if honor_start {
            hints.normalized_start().unwrap_or(next_col)
        } else {
            next_col
        };

        if u16::from(start) + u16::from(span) > u16::from(GRID_COLUMNS) {
            layout_debug!(item = index, start, span, "row overflow, wrapping");
            close_row(&mut current, rows);
            current.push(Cell::new(index, 0, span));
            next_col = span;
        } else if current.iter().any(|cell| cell.overlaps_range(start, span)) {
            layout_debug!(item = index, start, span, "column collision, wrapping");
            close_row(&mut current, rows);
            current.push(Cell::new(index, start, span));
            next_col = start + span;
        } else {
            current.push(Cell::new(index, start, span));
            next_col = start + span;
        }
    }

    close_row(&mut current, rows);
}

fn close_row(current: &mut Vec<Cell>, rows: &mut Vec<Row>) {
    if !current.is_empty() {
        rows.push(Row::new(current.drain(..)));
    }
}
