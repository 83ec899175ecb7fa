#![forbid(unsafe_code)]

//! Interaction controller.
//!
//! [`GridEngine`] owns the caller's items, the committed [`Grid`], an optional
//! live preview grid and the [`InteractionState`]. Every public mutator takes
//! one host event and returns a [`GridTransition`]; committed layouts are
//! projected back into items and handed to the [`GridHost`].
//!
//! Resize previews are recomputed from the committed grid on every pointer
//! move, so rounding never accumulates over a long drag. Previews are visible
//! through [`GridEngine::grid`] but are only published on pointer-up.

use fgrid_core::{
    Cell, CellGeometry, Direction, DropTarget, GRID_COLUMNS, Gap, GridCommand, LayoutItem,
    QuickSize, snap_columns,
};
use fgrid_layout::{
    Grid, GridOperation, Outcome, RejectReason, build, project, remove_and_rebuild, resize_left,
    resize_right, snap,
};

use crate::config::{ConcurrentGesturePolicy, EngineConfig};
use crate::state::{
    CancelReason, CommitKind, GridEffect, GridTransition, InteractionState, NoopReason, ResizeEdge,
};

/// Receiver for committed layouts and selection changes.
pub trait GridHost<T> {
    /// A full replacement item list after a committed mutation.
    fn on_items_change(&mut self, items: Vec<T>);

    /// An item was selected.
    fn on_item_select(&mut self, _index: usize) {}
}

impl<T, H: GridHost<T> + ?Sized> GridHost<T> for &mut H {
    fn on_items_change(&mut self, items: Vec<T>) {
        (**self).on_items_change(items);
    }

    fn on_item_select(&mut self, index: usize) {
        (**self).on_item_select(index);
    }
}

/// [`GridHost`] built from closures.
///
/// ```
/// use fgrid_core::LayoutHints;
/// use fgrid_runtime::{FnHost, GridEngine};
///
/// let mut changes = 0;
/// let host = FnHost::new(|_items: Vec<LayoutHints>| changes += 1);
/// let mut engine = GridEngine::new(vec![LayoutHints::span(6); 2], host);
/// engine.quick_size(0, fgrid_core::QuickSize::Quarter);
/// drop(engine);
/// assert_eq!(changes, 1);
/// ```
pub struct FnHost<C, S = fn(usize)> {
    on_change: C,
    on_select: S,
}

impl<C> FnHost<C> {
    pub fn new(on_change: C) -> Self {
        fn ignore(_: usize) {}
        Self {
            on_change,
            on_select: ignore,
        }
    }
}

impl<C, S> FnHost<C, S> {
    /// Replace the selection callback.
    pub fn with_select<S2: FnMut(usize)>(self, on_select: S2) -> FnHost<C, S2> {
        FnHost {
            on_change: self.on_change,
            on_select,
        }
    }
}

impl<T, C, S> GridHost<T> for FnHost<C, S>
where
    C: FnMut(Vec<T>),
    S: FnMut(usize),
{
    fn on_items_change(&mut self, items: Vec<T>) {
        (self.on_change)(items);
    }

    fn on_item_select(&mut self, index: usize) {
        (self.on_select)(index);
    }
}

/// The layout engine for one item list.
#[derive(Debug)]
pub struct GridEngine<T, H> {
    items: Vec<T>,
    host: H,
    config: EngineConfig,
    committed: Grid,
    preview: Option<Grid>,
    state: InteractionState,
    selected: Option<usize>,
    pointer_x: f32,
    last_preview_x: f32,
    transition_counter: u64,
}

impl<T, H> GridEngine<T, H>
where
    T: LayoutItem + Clone,
    H: GridHost<T>,
{
    /// Engine with the default configuration.
    pub fn new(items: Vec<T>, host: H) -> Self {
        Self::with_config(items, host, EngineConfig::default())
    }

    pub fn with_config(items: Vec<T>, host: H, config: EngineConfig) -> Self {
        let committed = build(&items);
        tracing::debug!(
            target: "fgrid.engine",
            items = items.len(),
            rows = committed.row_count(),
            "grid engine created"
        );
        Self {
            items,
            host,
            config,
            committed,
            preview: None,
            state: InteractionState::Idle,
            selected: None,
            pointer_x: 0.0,
            last_preview_x: 0.0,
            transition_counter: 0,
        }
    }

    /// Start with `index` selected. Out-of-range indices are ignored.
    #[must_use]
    pub fn with_selected(mut self, index: Option<usize>) -> Self {
        self.selected = index.filter(|&i| i < self.items.len());
        self
    }

    // --- accessors ---

    #[inline]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// The grid to render: the live preview during a resize, else the
    /// committed grid.
    #[inline]
    pub fn grid(&self) -> &Grid {
        self.preview.as_ref().unwrap_or(&self.committed)
    }

    /// The last committed grid.
    #[inline]
    pub fn committed_grid(&self) -> &Grid {
        &self.committed
    }

    #[inline]
    pub fn state(&self) -> InteractionState {
        self.state
    }

    #[inline]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn host(&self) -> &H {
        &self.host
    }

    #[inline]
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Free column ranges of a row in the rendered grid.
    pub fn gaps(&self, row: usize) -> Vec<Gap> {
        self.grid().row(row).map(|r| r.gaps()).unwrap_or_default()
    }

    /// Index of the first item matching `predicate`.
    ///
    /// Items are identified by position. Hosts that key their records by
    /// something stable can map keys to indices with this before each
    /// gesture.
    pub fn index_of(&self, predicate: impl FnMut(&T) -> bool) -> Option<usize> {
        self.items.iter().position(predicate)
    }

    /// Fractional geometry of the cell under an active resize.
    ///
    /// Bounded the same way a release is: the cell stays inside the grid and
    /// leaves at least one column to the neighbor it pushes, so
    /// [`CellGeometry::snapped`] matches what `pointer_up` would commit.
    pub fn live_geometry(&self) -> Option<(usize, CellGeometry)> {
        let columns = f32::from(GRID_COLUMNS);
        match self.state {
            InteractionState::ResizingRight {
                item,
                start_pointer_x,
                start_span,
                column_width,
                ..
            } => {
                let (_, cell, next) = self.row_neighbors(item)?;
                let start = f32::from(cell.col_start);
                let max_span = next.map_or(columns - start, |next| {
                    f32::from(next.col_end()) - 1.0 - start
                });
                let travelled = (self.pointer_x - start_pointer_x) / column_width;
                let span = (f32::from(start_span) + travelled).clamp(1.0, max_span.max(1.0));
                Some((
                    item,
                    CellGeometry {
                        col_start: start,
                        col_span: span,
                    },
                ))
            }
            InteractionState::ResizingLeft {
                item,
                start_pointer_x,
                start_col_start,
                start_span,
                column_width,
                ..
            } => {
                let (prev, _, _) = self.row_neighbors(item)?;
                let min_start = prev.map_or(0.0, |prev| f32::from(prev.col_start) + 1.0);
                let end = f32::from(start_col_start) + f32::from(start_span);
                let travelled = (self.pointer_x - start_pointer_x) / column_width;
                let start = (f32::from(start_col_start) + travelled)
                    .clamp(min_start.min(end - 1.0), end - 1.0);
                Some((
                    item,
                    CellGeometry {
                        col_start: start,
                        col_span: end - start,
                    },
                ))
            }
            _ => None,
        }
    }

    /// The committed cell of `item` with its left and right row neighbors.
    fn row_neighbors(&self, item: usize) -> Option<(Option<Cell>, Cell, Option<Cell>)> {
        let pos = self.committed.locate(item)?;
        let cells = self.committed.row(pos.row)?.cells();
        let prev = pos.index.checked_sub(1).and_then(|i| cells.get(i)).copied();
        let next = cells.get(pos.index + 1).copied();
        Some((prev, *cells.get(pos.index)?, next))
    }

    // --- resize gestures ---

    /// Pointer pressed on the right edge of `item`.
    pub fn pointer_down_right_edge(
        &mut self,
        item: usize,
        pointer_x: f32,
        container_width: f32,
    ) -> GridTransition {
        self.begin_resize(item, ResizeEdge::Right, pointer_x, container_width)
    }

    /// Pointer pressed on the left edge of `item`.
    pub fn pointer_down_left_edge(
        &mut self,
        item: usize,
        pointer_x: f32,
        container_width: f32,
    ) -> GridTransition {
        self.begin_resize(item, ResizeEdge::Left, pointer_x, container_width)
    }

    /// Pointer moved. Recomputes the live preview while resizing.
    pub fn pointer_move(&mut self, pointer_x: f32) -> GridTransition {
        let from = self.state;
        if !from.is_resizing() {
            return self.noop(from, self.idle_or_wrong());
        }
        if (pointer_x - self.last_preview_x).abs() < self.config.update_hysteresis_px {
            self.pointer_x = pointer_x;
            return self.noop(from, NoopReason::BelowHysteresis);
        }
        let effect = self.preview_resize(pointer_x);
        self.transition(from, effect)
    }

    /// Pointer released. Applies the final position, snaps and commits.
    pub fn pointer_up(&mut self, pointer_x: f32) -> GridTransition {
        let from = self.state;
        if !from.is_resizing() {
            return self.noop(from, self.idle_or_wrong());
        }
        self.preview_resize(pointer_x);
        let effect = self.finish_resize();
        self.transition(from, effect)
    }

    /// Pointer capture lost. Drops the preview without committing.
    pub fn pointer_cancel(&mut self) -> GridTransition {
        let from = self.state;
        if !from.is_resizing() {
            return self.noop(from, self.idle_or_wrong());
        }
        self.preview = None;
        self.state = InteractionState::Idle;
        self.transition(
            from,
            GridEffect::Canceled {
                item: from.active_item(),
                reason: CancelReason::PointerCancel,
            },
        )
    }

    // --- drag and drop ---

    /// Drag started on `item`.
    pub fn drag_start(&mut self, item: usize) -> GridTransition {
        let from = self.state;
        if self.committed.locate(item).is_none() {
            return self.reject(from, RejectReason::UnknownItem);
        }
        if !from.is_idle() {
            match self.config.concurrent_gesture {
                ConcurrentGesturePolicy::Ignore => {
                    return self.noop(from, NoopReason::GestureInProgress);
                }
                ConcurrentGesturePolicy::Replace => self.settle_active_gesture(),
            }
        }
        self.state = InteractionState::DraggingItem { item };
        self.transition(from, GridEffect::DragStarted { item })
    }

    /// The dragged item hovers over `target`. Records it without mutating.
    pub fn drag_over(&mut self, target: DropTarget) -> GridTransition {
        let from = self.state;
        let item = match from {
            InteractionState::DraggingItem { item } | InteractionState::DropTarget { item, .. } => {
                item
            }
            _ => return self.noop(from, self.idle_or_wrong()),
        };
        if from == (InteractionState::DropTarget { item, target }) {
            return self.noop(from, NoopReason::LayoutUnchanged);
        }
        self.state = InteractionState::DropTarget { item, target };
        self.transition(from, GridEffect::TargetUpdated { item, target })
    }

    /// The dragged item left its drop target.
    pub fn drag_leave(&mut self) -> GridTransition {
        let from = self.state;
        match from {
            InteractionState::DropTarget { item, .. } => {
                self.state = InteractionState::DraggingItem { item };
                self.transition(from, GridEffect::TargetCleared { item })
            }
            InteractionState::DraggingItem { .. } => self.noop(from, NoopReason::NoDropTarget),
            _ => self.noop(from, self.idle_or_wrong()),
        }
    }

    /// Dropped on the last recorded target.
    ///
    /// Without a target this does nothing and the drag stays active until
    /// [`drag_end`](Self::drag_end).
    pub fn drop_item(&mut self) -> GridTransition {
        let from = self.state;
        match from {
            InteractionState::DropTarget { item, target } => {
                self.state = InteractionState::Idle;
                let effect = self.commit_operation(
                    GridOperation::MoveCell { item, target },
                    CommitKind::Drop,
                );
                self.transition(from, effect)
            }
            InteractionState::DraggingItem { .. } => self.noop(from, NoopReason::NoDropTarget),
            _ => self.noop(from, self.idle_or_wrong()),
        }
    }

    /// Drag finished, dropped or not. Always returns to idle.
    pub fn drag_end(&mut self) -> GridTransition {
        let from = self.state;
        if !from.is_dragging() {
            return self.noop(from, self.idle_or_wrong());
        }
        self.state = InteractionState::Idle;
        self.transition(
            from,
            GridEffect::Canceled {
                item: from.active_item(),
                reason: CancelReason::DragEnd,
            },
        )
    }

    // --- discrete commands ---

    /// Run a click-driven command and commit it immediately.
    pub fn apply(&mut self, command: GridCommand) -> GridTransition {
        let from = self.state;
        if !from.is_idle() {
            return self.noop(from, NoopReason::GestureInProgress);
        }
        let kind = match command {
            GridCommand::Nudge { .. } => CommitKind::Nudge,
            GridCommand::Swap { .. } => CommitKind::Swap,
            GridCommand::MoveRow { .. } => CommitKind::MoveRow,
            GridCommand::QuickSize { .. } => CommitKind::QuickSize,
            GridCommand::MoveToNewRow { .. } => CommitKind::MoveToNewRow,
        };
        tracing::debug!(target: "fgrid.engine", command = command.name(), "grid command");
        let effect = self.commit_operation(GridOperation::from(command), kind);
        self.transition(from, effect)
    }

    pub fn nudge(&mut self, item: usize, direction: Direction) -> GridTransition {
        self.apply(GridCommand::Nudge { item, direction })
    }

    pub fn swap(&mut self, item: usize, direction: Direction) -> GridTransition {
        self.apply(GridCommand::Swap { item, direction })
    }

    pub fn move_row(&mut self, row: usize, direction: Direction) -> GridTransition {
        self.apply(GridCommand::MoveRow { row, direction })
    }

    pub fn quick_size(&mut self, item: usize, size: QuickSize) -> GridTransition {
        self.apply(GridCommand::QuickSize { item, size })
    }

    pub fn move_to_new_row(&mut self, item: usize) -> GridTransition {
        self.apply(GridCommand::MoveToNewRow { item })
    }

    /// Delete an item, rebuild and commit.
    ///
    /// An active gesture is abandoned first since indices shift; it gets its
    /// own `Canceled { ItemRemoved }` transition ahead of the returned one.
    /// The selection keeps pointing at the same item, or clears if it was the
    /// one removed.
    pub fn remove(&mut self, index: usize) -> GridTransition {
        let from = self.state;
        let Some((items, grid)) = remove_and_rebuild(&self.items, &self.committed, index) else {
            return self.reject(from, RejectReason::UnknownItem);
        };
        self.cancel_with(CancelReason::ItemRemoved);
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        self.items = items;
        self.publish(grid, CommitKind::Remove);
        self.transition(from, GridEffect::Removed { item: index })
    }

    /// Select an item. No layout change.
    pub fn select(&mut self, index: usize) -> GridTransition {
        let from = self.state;
        if index >= self.items.len() {
            return self.reject(from, RejectReason::UnknownItem);
        }
        self.selected = Some(index);
        self.host.on_item_select(index);
        self.transition(from, GridEffect::Selected { item: index })
    }

    /// Replace the item list and rebuild.
    ///
    /// Returns the cancel transition when a gesture was in flight.
    pub fn set_items(&mut self, items: Vec<T>) -> Option<GridTransition> {
        let canceled = self.cancel_with(CancelReason::ItemsReplaced);
        self.committed = build(&items);
        self.items = items;
        self.selected = self.selected.filter(|&i| i < self.items.len());
        tracing::debug!(
            target: "fgrid.engine",
            items = self.items.len(),
            rows = self.committed.row_count(),
            "items replaced"
        );
        canceled
    }

    /// Reset to idle, discarding any preview. `None` when already idle.
    pub fn force_cancel(&mut self) -> Option<GridTransition> {
        self.cancel_with(CancelReason::Programmatic)
    }

    // --- internals ---

    fn begin_resize(
        &mut self,
        item: usize,
        edge: ResizeEdge,
        pointer_x: f32,
        container_width: f32,
    ) -> GridTransition {
        let from = self.state;
        if !container_width.is_finite() || container_width <= 0.0 || !pointer_x.is_finite() {
            return self.noop(from, NoopReason::InvalidContainerWidth);
        }
        if self.committed.locate(item).is_none() {
            return self.reject(from, RejectReason::UnknownItem);
        }
        if !from.is_idle() {
            match self.config.concurrent_gesture {
                ConcurrentGesturePolicy::Ignore => {
                    return self.noop(from, NoopReason::GestureInProgress);
                }
                ConcurrentGesturePolicy::Replace => self.settle_active_gesture(),
            }
        }
        // The settled gesture may have moved the cell.
        let Some(position) = self.committed.locate(item) else {
            return self.reject(from, RejectReason::UnknownItem);
        };
        let Some(cell) = self.committed.cell(item) else {
            return self.reject(from, RejectReason::UnknownItem);
        };

        let column_width = container_width / f32::from(GRID_COLUMNS);
        self.state = match edge {
            ResizeEdge::Right => InteractionState::ResizingRight {
                item,
                row: position.row,
                start_pointer_x: pointer_x,
                start_span: cell.col_span,
                column_width,
            },
            ResizeEdge::Left => InteractionState::ResizingLeft {
                item,
                row: position.row,
                start_pointer_x: pointer_x,
                start_col_start: cell.col_start,
                start_span: cell.col_span,
                column_width,
            },
        };
        self.pointer_x = pointer_x;
        self.last_preview_x = pointer_x;
        self.preview = Some(self.committed.clone());
        self.transition(from, GridEffect::ResizeStarted { item, edge })
    }

    /// Resize a fresh copy of the committed grid to the pointer position.
    fn preview_resize(&mut self, pointer_x: f32) -> GridEffect {
        let (item, start_pointer_x, column_width, edge) = match self.state {
            InteractionState::ResizingRight {
                item,
                start_pointer_x,
                column_width,
                ..
            } => (item, start_pointer_x, column_width, ResizeEdge::Right),
            InteractionState::ResizingLeft {
                item,
                start_pointer_x,
                column_width,
                ..
            } => (item, start_pointer_x, column_width, ResizeEdge::Left),
            _ => {
                return GridEffect::Noop {
                    reason: NoopReason::WrongGesture,
                };
            }
        };
        self.pointer_x = pointer_x;
        self.last_preview_x = pointer_x;

        // Snap the moving edge's position, not the travel, so halves land on
        // the same column `CellGeometry::snapped` shows.
        let edge_col = self.committed.cell(item).map_or(0, |cell| match edge {
            ResizeEdge::Right => cell.col_end(),
            ResizeEdge::Left => cell.col_start,
        });
        let travelled = (pointer_x - start_pointer_x) / column_width;
        let delta_cols = snap_columns(f32::from(edge_col) + travelled) - i32::from(edge_col);
        let mut preview = self.committed.clone();
        let outcome = match edge {
            ResizeEdge::Right => resize_right(&mut preview, item, delta_cols),
            ResizeEdge::Left => resize_left(&mut preview, item, delta_cols),
        };
        self.preview = Some(preview);
        tracing::trace!(
            target: "fgrid.engine",
            item,
            delta_cols,
            ?outcome,
            "resize preview"
        );
        GridEffect::ResizePreviewed {
            item,
            delta_cols,
            outcome,
        }
    }

    /// Snap the preview and publish it if it differs from the committed grid.
    fn finish_resize(&mut self) -> GridEffect {
        self.state = InteractionState::Idle;
        let Some(mut grid) = self.preview.take() else {
            return GridEffect::Noop {
                reason: NoopReason::LayoutUnchanged,
            };
        };
        snap(&mut grid);
        if grid == self.committed {
            return GridEffect::Noop {
                reason: NoopReason::LayoutUnchanged,
            };
        }
        let state_hash = self.publish(grid, CommitKind::Resize);
        GridEffect::Committed {
            kind: CommitKind::Resize,
            state_hash,
        }
    }

    fn commit_operation(&mut self, operation: GridOperation, kind: CommitKind) -> GridEffect {
        let mut grid = self.committed.clone();
        match grid.apply(&operation) {
            Outcome::Applied => {
                let state_hash = self.publish(grid, kind);
                GridEffect::Committed { kind, state_hash }
            }
            Outcome::Unchanged => GridEffect::Noop {
                reason: NoopReason::LayoutUnchanged,
            },
            Outcome::Rejected(reason) => GridEffect::Rejected { reason },
        }
    }

    /// Make `grid` the committed layout, project it and notify the host.
    fn publish(&mut self, grid: Grid, kind: CommitKind) -> u64 {
        let span = tracing::debug_span!(
            target: "fgrid.engine",
            "grid.commit",
            kind = kind.as_str(),
            items = self.items.len(),
            state_hash = tracing::field::Empty,
        );
        let _guard = span.enter();

        if self.config.check_invariants_on_commit {
            let report = grid.invariant_report(Some(self.items.len()));
            if let Some(first) = report.issues.first() {
                tracing::warn!(
                    target: "fgrid.engine",
                    issues = report.issues.len(),
                    first = %first.message,
                    "committed grid failed invariant check"
                );
            }
        }

        let state_hash = grid.state_hash();
        span.record("state_hash", state_hash);
        self.items = project(&self.items, &grid);
        self.committed = grid;
        self.preview = None;
        self.host.on_items_change(self.items.clone());
        tracing::debug!(
            target: "fgrid.engine",
            kind = kind.as_str(),
            rows = self.committed.row_count(),
            "layout committed"
        );
        state_hash
    }

    /// Finish the active gesture the way its natural end would.
    fn settle_active_gesture(&mut self) {
        match self.state {
            InteractionState::ResizingRight { .. } | InteractionState::ResizingLeft { .. } => {
                let effect = self.finish_resize();
                tracing::debug!(
                    target: "fgrid.engine",
                    effect = effect.name(),
                    "replaced resize gesture"
                );
            }
            InteractionState::DropTarget { item, target } => {
                self.state = InteractionState::Idle;
                let effect = self
                    .commit_operation(GridOperation::MoveCell { item, target }, CommitKind::Drop);
                tracing::debug!(
                    target: "fgrid.engine",
                    effect = effect.name(),
                    "replaced drag gesture"
                );
            }
            InteractionState::DraggingItem { .. } | InteractionState::Idle => {
                self.state = InteractionState::Idle;
            }
        }
    }

    fn cancel_with(&mut self, reason: CancelReason) -> Option<GridTransition> {
        let from = self.state;
        if from.is_idle() {
            return None;
        }
        self.state = InteractionState::Idle;
        self.preview = None;
        Some(self.transition(
            from,
            GridEffect::Canceled {
                item: from.active_item(),
                reason,
            },
        ))
    }

    fn idle_or_wrong(&self) -> NoopReason {
        if self.state.is_idle() {
            NoopReason::NoActiveGesture
        } else {
            NoopReason::WrongGesture
        }
    }

    fn noop(&mut self, from: InteractionState, reason: NoopReason) -> GridTransition {
        self.transition(from, GridEffect::Noop { reason })
    }

    fn reject(&mut self, from: InteractionState, reason: RejectReason) -> GridTransition {
        self.transition(from, GridEffect::Rejected { reason })
    }

    fn transition(&mut self, from: InteractionState, effect: GridEffect) -> GridTransition {
        self.transition_counter = self.transition_counter.saturating_add(1);
        let transition = GridTransition {
            transition_id: self.transition_counter,
            from,
            to: self.state,
            effect,
        };
        if effect.is_refusal() {
            tracing::warn!(
                target: "fgrid.engine",
                transition_id = transition.transition_id,
                from = from.name(),
                to = transition.to.name(),
                effect = ?effect,
                "grid input refused"
            );
        } else {
            tracing::debug!(
                target: "fgrid.engine",
                transition_id = transition.transition_id,
                from = from.name(),
                to = transition.to.name(),
                effect = effect.name(),
                "grid transition"
            );
        }
        transition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fgrid_core::LayoutHints;

    #[test]
    fn fn_host_forwards_selection() {
        let mut selected = Vec::new();
        let host = FnHost::new(|_: Vec<LayoutHints>| {}).with_select(|i| selected.push(i));
        let mut engine = GridEngine::new(vec![LayoutHints::AUTO; 3], host);
        engine.select(2);
        engine.select(0);
        drop(engine);
        assert_eq!(selected, vec![2, 0]);
    }

    #[test]
    fn left_live_geometry_keeps_right_edge() {
        let mut engine = GridEngine::new(
            vec![LayoutHints::placed(1, 5, 4)],
            FnHost::new(|_: Vec<LayoutHints>| {}),
        );
        engine.pointer_down_left_edge(0, 400.0, 1200.0);
        engine.pointer_move(250.0);
        let (_, geometry) = engine.live_geometry().unwrap();
        assert!((geometry.col_start - 2.5).abs() < 1e-4);
        assert!((geometry.col_span - 5.5).abs() < 1e-4);

        // a half column snaps the same way in the preview and the live geometry
        let preview = engine.grid().cell(0).unwrap();
        assert_eq!(geometry.snapped(), (3, 5));
        assert_eq!((preview.col_start, preview.col_span), geometry.snapped());

        // the whole cell cannot collapse past its last column
        engine.pointer_move(5000.0);
        let (_, geometry) = engine.live_geometry().unwrap();
        assert_eq!(geometry.col_start, 7.0);
        assert_eq!(geometry.col_span, 1.0);
    }

    #[test]
    fn host_by_reference() {
        struct Count(usize);
        impl GridHost<LayoutHints> for Count {
            fn on_items_change(&mut self, _items: Vec<LayoutHints>) {
                self.0 += 1;
            }
        }
        let mut count = Count(0);
        {
            let mut engine = GridEngine::new(vec![LayoutHints::span(6); 2], &mut count);
            engine.move_to_new_row(1);
        }
        assert_eq!(count.0, 1);
    }
}
