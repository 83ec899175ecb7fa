#![forbid(unsafe_code)]

//! Commit/projection: write a grid back into item hints.

use fgrid_core::{LayoutHints, LayoutItem};

use crate::build::build;
use crate::grid::Grid;

/// Copy of `items` with hints rewritten from `grid`.
///
/// Rows become 1-based `layoutRow`, starts become 1-based `layoutColStart`.
/// Items without a cell keep their current hints. The input is not touched.
#[must_use]
pub fn project<T: LayoutItem + Clone>(items: &[T], grid: &Grid) -> Vec<T> {
    let mut projected = items.to_vec();
    for (row, cell) in grid.cells() {
        if let Some(item) = projected.get_mut(cell.item) {
            item.set_layout(LayoutHints::from_cell(row, cell));
        }
    }
    projected
}

/// Remove `index` and rebuild.
///
/// The current layout is projected first so the remaining items keep their
/// placement. Returns `None` when `index` is out of range.
#[must_use]
pub fn remove_and_rebuild<T: LayoutItem + Clone>(
    items: &[T],
    grid: &Grid,
    index: usize,
) -> Option<(Vec<T>, Grid)> {
    if index >= items.len() {
        return None;
    }
    let mut remaining = project(items, grid);
    remaining.remove(index);
    let rebuilt = build(&remaining);
    let projected = project(&remaining, &rebuilt);
    Some((projected, rebuilt))
}
