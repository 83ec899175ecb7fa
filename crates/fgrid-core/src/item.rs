#![forbid(unsafe_code)]

//! Layout hints carried by caller-owned items.
//!
//! The engine never looks inside an item beyond its [`LayoutHints`]. Callers
//! implement [`LayoutItem`] on their own record type and get back clones with
//! updated hints after every committed mutation.
//!
//! Hints are kept as raw signed integers so that malformed input (a span of 0,
//! a negative row, a start past column 12) survives deserialization and is
//! clamped by the grid builder instead of being rejected.

use serde::{Deserialize, Serialize};

use crate::geometry::{Cell, GRID_COLUMNS};

/// Optional row/column placement of one item.
///
/// Serialized in the host's camelCase shape:
///
/// ```json
/// {"layoutRow": 1, "layoutColStart": 1, "layoutColSpan": 6}
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutHints {
    /// 1-based row; `None`, zero or negative means auto-flow.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_row: Option<i32>,
    /// 1-based first column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_col_start: Option<i32>,
    /// Width in columns; defaults to the full row.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout_col_span: Option<i32>,
}

impl LayoutHints {
    /// Hints that leave the item fully auto-flowed.
    pub const AUTO: Self = Self {
        layout_row: None,
        layout_col_start: None,
        layout_col_span: None,
    };

    /// Explicit placement with 1-based row and start.
    #[must_use]
    pub const fn placed(row: i32, col_start: i32, col_span: i32) -> Self {
        Self {
            layout_row: Some(row),
            layout_col_start: Some(col_start),
            layout_col_span: Some(col_span),
        }
    }

    /// Auto-flowed item with only a span hint.
    #[must_use]
    pub const fn span(col_span: i32) -> Self {
        Self {
            layout_row: None,
            layout_col_start: None,
            layout_col_span: Some(col_span),
        }
    }

    /// Hints written back for a cell sitting in the 0-based `row`.
    #[must_use]
    pub fn from_cell(row: usize, cell: &Cell) -> Self {
        let row = i32::try_from(row.saturating_add(1)).unwrap_or(i32::MAX);
        Self::placed(
            row,
            i32::from(cell.col_start) + 1,
            i32::from(cell.col_span),
        )
    }

    /// Explicit row, or `None` when the item is auto-flowed.
    #[must_use]
    pub fn assigned_row(&self) -> Option<u32> {
        self.layout_row
            .filter(|row| *row > 0)
            .and_then(|row| u32::try_from(row).ok())
    }

    /// Span clamped into `1..=12`; absent means a full row.
    #[must_use]
    pub fn normalized_span(&self) -> u8 {
        match self.layout_col_span {
            None => GRID_COLUMNS,
            Some(span) => span.clamp(1, i32::from(GRID_COLUMNS)) as u8,
        }
    }

    /// 0-based start clamped into `0..=11`, if one was given.
    #[must_use]
    pub fn normalized_start(&self) -> Option<u8> {
        self.layout_col_start
            .map(|start| start.saturating_sub(1).clamp(0, i32::from(GRID_COLUMNS) - 1) as u8)
    }

    /// Whether the builder has to clamp any of these hints.
    #[must_use]
    pub fn is_malformed(&self) -> bool {
        let span_bad = self
            .layout_col_span
            .is_some_and(|span| !(1..=i32::from(GRID_COLUMNS)).contains(&span));
        let start_bad = self
            .layout_col_start
            .is_some_and(|start| !(1..=i32::from(GRID_COLUMNS)).contains(&start));
        let row_bad = self.layout_row.is_some_and(|row| row < 0);
        span_bad || start_bad || row_bad
    }
}

/// A caller-owned record that carries layout hints.
pub trait LayoutItem {
    /// Current hints.
    fn layout(&self) -> LayoutHints;

    /// Replace the hints.
    fn set_layout(&mut self, hints: LayoutHints);
}

impl LayoutItem for LayoutHints {
    fn layout(&self) -> LayoutHints {
        *self
    }

    fn set_layout(&mut self, hints: LayoutHints) {
        *self = hints;
    }
}

impl<T: LayoutItem + ?Sized> LayoutItem for Box<T> {
    fn layout(&self) -> LayoutHints {
        (**self).layout()
    }

    fn set_layout(&mut self, hints: LayoutHints) {
        (**self).set_layout(hints);
    }
}
