#![forbid(unsafe_code)]

//! Constraint resolver: invariant-preserving grid mutations.
//!
//! Every operation takes the grid by `&mut` and either applies a complete,
//! consistent change or leaves the grid exactly as it was. Nothing here
//! panics or returns an error; a mutation that would break an invariant is
//! reported as [`Outcome::Rejected`] with a [`RejectReason`] and otherwise
//! ignored.
//!
//! # Resize and neighbor displacement
//!
//! Growing a cell into its immediate neighbor shrinks the neighbor from the
//! shared edge. The neighbor never drops below one column: when it would,
//! the initiating resize is clamped instead. Only the immediate neighbor
//! moves; its far edge stays fixed, so cells further along are untouched.

use fgrid_core::{Cell, Direction, DropTarget, GRID_COLUMNS, Gap, GridCommand, QuickSize};
use serde::{Deserialize, Serialize};

use crate::grid::{Grid, Row};
use crate::logging::layout_trace;

const COLUMNS: i32 = GRID_COLUMNS as i32;

/// Why a proposed mutation was ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The item has no cell in this grid.
    UnknownItem,
    /// The row index is past the end of the grid.
    UnknownRow,
    /// The destination would leave the 12-column bounds.
    OutOfBounds,
    /// The destination columns belong to another cell.
    Occupied,
    /// There is no neighbor in the requested direction.
    NoNeighbor,
    /// The row is already first or last.
    AtBoundary,
}

/// Result of one resolver operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "snake_case")]
pub enum Outcome {
    /// The grid changed.
    Applied,
    /// The operation was valid but produced the same layout.
    Unchanged,
    /// The operation was ignored; the grid is untouched.
    Rejected(RejectReason),
}

impl Outcome {
    #[inline]
    #[must_use]
    pub const fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    #[inline]
    #[must_use]
    pub const fn rejection(self) -> Option<RejectReason> {
        match self {
            Self::Rejected(reason) => Some(reason),
            Self::Applied | Self::Unchanged => None,
        }
    }
}

/// One resolver mutation, for replay and fuzzing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum GridOperation {
    ResizeRight { item: usize, delta: i32 },
    ResizeLeft { item: usize, delta: i32 },
    Nudge { item: usize, direction: Direction },
    Swap { item: usize, direction: Direction },
    MoveCell { item: usize, target: DropTarget },
    MoveRow { row: usize, direction: Direction },
    QuickSize { item: usize, size: QuickSize },
    MoveToNewRow { item: usize },
    Snap,
}

impl From<GridCommand> for GridOperation {
    fn from(command: GridCommand) -> Self {
        match command {
            GridCommand::Nudge { item, direction } => Self::Nudge { item, direction },
            GridCommand::Swap { item, direction } => Self::Swap { item, direction },
            GridCommand::MoveRow { row, direction } => Self::MoveRow { row, direction },
            GridCommand::QuickSize { item, size } => Self::QuickSize { item, size },
            GridCommand::MoveToNewRow { item } => Self::MoveToNewRow { item },
        }
    }
}

impl Grid {
    /// Apply one resolver operation.
    pub fn apply(&mut self, operation: &GridOperation) -> Outcome {
        let outcome = match *operation {
            GridOperation::ResizeRight { item, delta } => resize_right(self, item, delta),
            GridOperation::ResizeLeft { item, delta } => resize_left(self, item, delta),
            GridOperation::Nudge { item, direction } => nudge(self, item, direction),
            GridOperation::Swap { item, direction } => swap_in_row(self, item, direction),
            GridOperation::MoveCell { item, target } => move_cell_to_row(self, item, target),
            GridOperation::MoveRow { row, direction } => move_row(self, row, direction),
            GridOperation::QuickSize { item, size } => quick_size(self, item, size),
            GridOperation::MoveToNewRow { item } => move_to_new_row(self, item),
            GridOperation::Snap => snap(self),
        };
        layout_trace!(?operation, ?outcome, "grid operation");
        outcome
    }
}

/// Grow or shrink a cell from its right edge by `delta_cols` columns.
///
/// The new span is clamped to `[1, 12 - col_start]`. An overlapped right
/// neighbor is shrunk from its left edge, never below one column.
pub fn resize_right(grid: &mut Grid, item: usize, delta_cols: i32) -> Outcome {
    let Some(pos) = grid.locate(item) else {
        return Outcome::Rejected(RejectReason::UnknownItem);
    };
    let cells = grid.rows_mut()[pos.row].cells_mut();
    let cell = cells[pos.index];
    let start = i32::from(cell.col_start);

    let mut new_span = i32::from(cell.col_span)
        .saturating_add(delta_cols)
        .clamp(1, COLUMNS - start);

    let mut neighbor_update = None;
    if let Some(next) = cells.get(pos.index + 1) {
        let next_start = i32::from(next.col_start);
        let next_end = i32::from(next.col_end());
        if start + new_span > next_start {
            new_span = new_span.min(next_end - 1 - start);
            let moved_start = start + new_span;
            neighbor_update = Some((moved_start as u8, (next_end - moved_start) as u8));
        }
    }

    let new_span = new_span as u8;
    let neighbor_changed = neighbor_update.is_some_and(|(s, w)| {
        let next = cells[pos.index + 1];
        next.col_start != s || next.col_span != w
    });
    if new_span == cell.col_span && !neighbor_changed {
        return Outcome::Unchanged;
    }

    cells[pos.index].col_span = new_span;
    if let Some((moved_start, moved_span)) = neighbor_update {
        let next = &mut cells[pos.index + 1];
        next.col_start = moved_start;
        next.col_span = moved_span;
    }
    Outcome::Applied
}

/// Move a cell's left edge by `delta_cols` columns, keeping its right edge.
///
/// Positive deltas move the edge right (shrinking the cell). The new start is
/// clamped to `[0, end - 1]`. A left neighbor that shares the edge follows
/// it, growing or shrinking; a detached left neighbor is only shrunk when the
/// cell grows into it. The neighbor keeps at least one column.
pub fn resize_left(grid: &mut Grid, item: usize, delta_cols: i32) -> Outcome {
    let Some(pos) = grid.locate(item) else {
        return Outcome::Rejected(RejectReason::UnknownItem);
    };
    let cells = grid.rows_mut()[pos.row].cells_mut();
    let cell = cells[pos.index];
    let start = i32::from(cell.col_start);
    let end = i32::from(cell.col_end());

    let mut new_start = start.saturating_add(delta_cols).clamp(0, end - 1);

    let mut neighbor_span = None;
    if let Some(prev) = pos.index.checked_sub(1).map(|i| cells[i]) {
        let prev_start = i32::from(prev.col_start);
        let prev_end = i32::from(prev.col_end());
        let adjacent = prev_end == start;
        if adjacent || new_start < prev_end {
            new_start = new_start.max(prev_start + 1);
            neighbor_span = Some((new_start - prev_start) as u8);
        }
    }

    let new_start = new_start as u8;
    if i32::from(new_start) == start {
        return Outcome::Unchanged;
    }

    let current = &mut cells[pos.index];
    current.col_start = new_start;
    current.col_span = (end - i32::from(new_start)) as u8;
    if let Some(span) = neighbor_span {
        cells[pos.index - 1].col_span = span;
    }
    Outcome::Applied
}

/// Change a cell to one of the preset widths.
///
/// Goes through [`resize_right`], so neighbor displacement and clamping match
/// a drag to the same width.
pub fn quick_size(grid: &mut Grid, item: usize, size: QuickSize) -> Outcome {
    let Some(cell) = grid.cell(item) else {
        return Outcome::Rejected(RejectReason::UnknownItem);
    };
    let delta = i32::from(size.span()) - i32::from(cell.col_span);
    resize_right(grid, item, delta)
}

/// Normalize every cell into the grid bounds.
///
/// Spans are clamped to `[1, 12]`, starts to `[0, 12 - span]`, and each row is
/// re-sorted. A cell that still collides with an earlier one is moved to a
/// new row directly below, and rows left empty are dropped.
pub fn snap(grid: &mut Grid) -> Outcome {
    let before = grid.clone();
    let rows = grid.rows_mut();

    let mut row_index = 0;
    while row_index < rows.len() {
        let cells = rows[row_index].cells_mut();
        for cell in cells.iter_mut() {
            let span = cell.col_span.clamp(1, GRID_COLUMNS);
            cell.col_span = span;
            cell.col_start = cell.col_start.min(GRID_COLUMNS - span);
        }
        rows[row_index].sort();

        let mut kept: Vec<Cell> = Vec::with_capacity(rows[row_index].len());
        let mut spilled: Vec<Cell> = Vec::new();
        for cell in rows[row_index].cells().iter().copied() {
            if kept.iter().any(|other| other.overlaps(&cell)) {
                spilled.push(cell);
            } else {
                kept.push(cell);
            }
        }
        *rows[row_index].cells_mut() = kept;
        if !spilled.is_empty() {
            rows.insert(row_index + 1, Row::new(spilled));
        }
        row_index += 1;
    }
    grid.drop_empty_rows();

    if *grid == before {
        Outcome::Unchanged
    } else {
        Outcome::Applied
    }
}

/// Move a cell one column left or right.
///
/// Rejected when the destination leaves `[0, 12 - span]` or touches another
/// cell.
pub fn nudge(grid: &mut Grid, item: usize, direction: Direction) -> Outcome {
    let Some(pos) = grid.locate(item) else {
        return Outcome::Rejected(RejectReason::UnknownItem);
    };
    let row = &mut grid.rows_mut()[pos.row];
    let cell = row.cells()[pos.index];
    let new_start = i32::from(cell.col_start) + direction.step();
    if new_start < 0 || new_start + i32::from(cell.col_span) > COLUMNS {
        return Outcome::Rejected(RejectReason::OutOfBounds);
    }
    let new_start = new_start as u8;
    if row.is_occupied(new_start, cell.col_span, Some(pos.index)) {
        return Outcome::Rejected(RejectReason::Occupied);
    }
    row.cells_mut()[pos.index].col_start = new_start;
    Outcome::Applied
}

/// Exchange a cell with its neighbor in column order.
///
/// Both cells keep their spans and are packed contiguously from the left
/// cell's original start, in swapped order.
pub fn swap_in_row(grid: &mut Grid, item: usize, direction: Direction) -> Outcome {
    let Some(pos) = grid.locate(item) else {
        return Outcome::Rejected(RejectReason::UnknownItem);
    };
    let cells = grid.rows_mut()[pos.row].cells_mut();
    let Some(other) = direction.offset(pos.index, cells.len()) else {
        return Outcome::Rejected(RejectReason::NoNeighbor);
    };
    let (left_index, right_index) = (pos.index.min(other), pos.index.max(other));
    let left = cells[left_index];
    let right = cells[right_index];

    let base = u16::from(left.col_start);
    if base + u16::from(left.col_span) + u16::from(right.col_span) > u16::from(GRID_COLUMNS) {
        return Outcome::Rejected(RejectReason::OutOfBounds);
    }

    cells[left_index] = Cell::new(right.item, left.col_start, right.col_span);
    cells[right_index] = Cell::new(left.item, left.col_start + right.col_span, left.col_span);
    Outcome::Applied
}

/// Free column ranges in a row: before the first cell, between cells, and
/// after the last cell. An empty row is one gap spanning all 12 columns.
#[must_use]
pub fn compute_gaps(row: &Row) -> Vec<Gap> {
    let mut gaps = Vec::new();
    let mut cursor: u8 = 0;
    for cell in row.cells() {
        if cell.col_start > cursor {
            gaps.push(Gap::new(cursor, cell.col_start - cursor));
        }
        cursor = cursor.max(cell.col_end());
    }
    if cursor < GRID_COLUMNS {
        gaps.push(Gap::new(cursor, GRID_COLUMNS - cursor));
    }
    gaps
}

/// Move a cell to a drop target.
///
/// - [`DropTarget::Gap`]: placed at the gap start with its span clipped to
///   the gap (at least one column).
/// - [`DropTarget::NewRow`]: a fresh full-width row inserted at that index.
/// - [`DropTarget::Row`]: the first gap that holds the full span.
///
/// When the target row has no room (a stale gap, or a full row) the cell gets
/// its own row right after the target. The item is never dropped. Rows left
/// empty by the move are removed.
pub fn move_cell_to_row(grid: &mut Grid, item: usize, target: DropTarget) -> Outcome {
    let Some(pos) = grid.locate(item) else {
        return Outcome::Rejected(RejectReason::UnknownItem);
    };
    let row_count = grid.row_count();
    let in_range = match target {
        DropTarget::NewRow { row } => row <= row_count,
        DropTarget::Gap { row, .. } | DropTarget::Row { row } => row < row_count,
    };
    if !in_range {
        return Outcome::Rejected(RejectReason::UnknownRow);
    }

    let before = grid.clone();
    let rows = grid.rows_mut();
    // Source row stays in place (possibly empty) so target indices hold.
    let cell = rows[pos.row].cells_mut().remove(pos.index);

    match target {
        DropTarget::NewRow { row } => {
            rows.insert(row, Row::single(Cell::new(item, 0, GRID_COLUMNS)));
        }
        DropTarget::Gap { row, gap } => {
            let span = cell.col_span.min(gap.col_span).max(1);
            let fits = u16::from(gap.col_start) + u16::from(span) <= u16::from(GRID_COLUMNS)
                && !rows[row].is_occupied(gap.col_start, span, None);
            if fits {
                rows[row].insert_sorted(Cell::new(item, gap.col_start, span));
            } else {
                rows.insert(row + 1, Row::single(Cell::new(item, 0, cell.col_span)));
            }
        }
        DropTarget::Row { row } => {
            match compute_gaps(&rows[row])
                .into_iter()
                .find(|gap| gap.fits(cell.col_span))
            {
                Some(gap) => {
                    rows[row].insert_sorted(Cell::new(item, gap.col_start, cell.col_span));
                }
                None => {
                    rows.insert(row + 1, Row::single(Cell::new(item, 0, cell.col_span)));
                }
            }
        }
    }
    grid.drop_empty_rows();

    if *grid == before {
        Outcome::Unchanged
    } else {
        Outcome::Applied
    }
}

/// Put a cell on its own full-width row directly below its current row.
pub fn move_to_new_row(grid: &mut Grid, item: usize) -> Outcome {
    let Some(pos) = grid.locate(item) else {
        return Outcome::Rejected(RejectReason::UnknownItem);
    };
    move_cell_to_row(grid, item, DropTarget::NewRow { row: pos.row + 1 })
}

/// Exchange a row with its neighbor. No-op at the first/last row.
pub fn move_row(grid: &mut Grid, row: usize, direction: Direction) -> Outcome {
    let rows = grid.rows_mut();
    if row >= rows.len() {
        return Outcome::Rejected(RejectReason::UnknownRow);
    }
    let Some(other) = direction.offset(row, rows.len()) else {
        return Outcome::Rejected(RejectReason::AtBoundary);
    };
    rows.swap(row, other);
    Outcome::Applied
}
