#![forbid(unsafe_code)]

//! Normalized row/column layout and its invariant checks.
//!
//! A [`Grid`] is an ordered list of [`Row`]s; each row holds cells sorted by
//! `col_start` that never share a column. The resolver keeps three
//! invariants after every operation:
//!
//! 1. Every cell satisfies `1 <= col_span <= 12` and `col_start + col_span <= 12`.
//! 2. Cells in one row are sorted by `col_start` and do not overlap.
//! 3. No row is empty and no item appears in more than one cell.
//!
//! [`Grid::invariant_report`] checks these (plus item coverage when the item
//! count is known) and returns deterministic, sorted findings.

use std::fmt;
use std::hash::{Hash, Hasher};

use fgrid_core::{Cell, GRID_COLUMNS, Gap};
use rustc_hash::{FxHashMap, FxHasher};
use serde::{Deserialize, Serialize};

/// Where a cell lives inside a grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    /// Row index (0-based).
    pub row: usize,
    /// Index of the cell inside the row's sorted cell list.
    pub index: usize,
}

/// One row of cells, sorted by `col_start`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    /// Build a row from cells in any order.
    #[must_use]
    pub fn new(cells: impl IntoIterator<Item = Cell>) -> Self {
        let mut row = Self {
            cells: cells.into_iter().collect(),
        };
        row.sort();
        row
    }

    /// A row holding exactly one cell.
    #[must_use]
    pub fn single(cell: Cell) -> Self {
        Self { cells: vec![cell] }
    }

    /// Cells in ascending `col_start` order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Total columns occupied by the row's cells.
    #[must_use]
    pub fn used_columns(&self) -> u16 {
        self.cells.iter().map(|cell| u16::from(cell.col_span)).sum()
    }

    /// Whether `[start, start + span)` collides with any cell except `skip`.
    #[must_use]
    pub fn is_occupied(&self, start: u8, span: u8, skip: Option<usize>) -> bool {
        self.cells
            .iter()
            .enumerate()
            .any(|(index, cell)| Some(index) != skip && cell.overlaps_range(start, span))
    }

    /// Free column ranges, left to right. See [`crate::compute_gaps`].
    #[must_use]
    pub fn gaps(&self) -> Vec<Gap> {
        crate::resolve::compute_gaps(self)
    }

    pub(crate) fn cells_mut(&mut self) -> &mut Vec<Cell> {
        &mut self.cells
    }

    pub(crate) fn insert_sorted(&mut self, cell: Cell) {
        let at = self
            .cells
            .partition_point(|existing| existing.col_start <= cell.col_start);
        self.cells.insert(at, cell);
    }

    pub(crate) fn sort(&mut self) {
        self.cells
            .sort_by_key(|cell| (cell.col_start, cell.col_span, cell.item));
    }
}

/// The full 12-column, multi-row layout for one set of items.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Grid {
    rows: Vec<Row>,
}

impl Grid {
    /// An empty grid.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a grid from rows as given. No invariant is checked here; call
    /// [`Grid::validate`] or [`crate::snap`] when the rows come from outside.
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = Row>) -> Self {
        Self {
            rows: rows.into_iter().collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    #[inline]
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    #[inline]
    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of cells across all rows.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Row::len).sum()
    }

    /// Iterate `(row_index, cell)` pairs in row order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, &Cell)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(row, r)| r.cells.iter().map(move |cell| (row, cell)))
    }

    /// Find the row and in-row index of `item`.
    #[must_use]
    pub fn locate(&self, item: usize) -> Option<CellPosition> {
        self.rows.iter().enumerate().find_map(|(row, r)| {
            r.cells
                .iter()
                .position(|cell| cell.item == item)
                .map(|index| CellPosition { row, index })
        })
    }

    /// The cell placing `item`, if any.
    #[must_use]
    pub fn cell(&self, item: usize) -> Option<Cell> {
        self.locate(item)
            .map(|pos| self.rows[pos.row].cells[pos.index])
    }

    /// Deterministic hash of the layout, for change detection and reports.
    #[must_use]
    pub fn state_hash(&self) -> u64 {
        let mut hasher = FxHasher::default();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Check the structural invariants.
    ///
    /// With `item_count` set, also reports cells pointing past the item list
    /// and items that have no cell.
    #[must_use]
    pub fn invariant_report(&self, item_count: Option<usize>) -> GridInvariantReport {
        let mut issues = Vec::new();
        let mut seen: FxHashMap<usize, usize> = FxHashMap::default();

        for (row_index, row) in self.rows.iter().enumerate() {
            if row.is_empty() {
                issues.push(GridInvariantIssue {
                    code: GridInvariantCode::EmptyRow,
                    row: Some(row_index),
                    item: None,
                    related_item: None,
                    message: format!("row {row_index} has no cells"),
                });
            }

            for (index, cell) in row.cells.iter().enumerate() {
                if cell.col_span == 0 || cell.col_span > GRID_COLUMNS {
                    issues.push(GridInvariantIssue {
                        code: GridInvariantCode::SpanOutOfRange,
                        row: Some(row_index),
                        item: Some(cell.item),
                        related_item: None,
                        message: format!(
                            "item {} has span {} outside 1..={GRID_COLUMNS}",
                            cell.item, cell.col_span
                        ),
                    });
                }
                if u16::from(cell.col_start) + u16::from(cell.col_span) > u16::from(GRID_COLUMNS)
                {
                    issues.push(GridInvariantIssue {
                        code: GridInvariantCode::ColumnOverflow,
                        row: Some(row_index),
                        item: Some(cell.item),
                        related_item: None,
                        message: format!(
                            "item {} ends at column {} past {GRID_COLUMNS}",
                            cell.item,
                            u16::from(cell.col_start) + u16::from(cell.col_span)
                        ),
                    });
                }
                if let Some(count) = item_count
                    && cell.item >= count
                {
                    issues.push(GridInvariantIssue {
                        code: GridInvariantCode::DanglingItem,
                        row: Some(row_index),
                        item: Some(cell.item),
                        related_item: None,
                        message: format!("item {} is past the {count} known items", cell.item),
                    });
                }
                if let Some(first_row) = seen.insert(cell.item, row_index) {
                    issues.push(GridInvariantIssue {
                        code: GridInvariantCode::DuplicateItem,
                        row: Some(row_index),
                        item: Some(cell.item),
                        related_item: None,
                        message: format!(
                            "item {} placed in row {first_row} and again in row {row_index}",
                            cell.item
                        ),
                    });
                }

                if let Some(prev) = index.checked_sub(1).map(|i| row.cells[i])
                    && prev.col_start > cell.col_start
                {
                    issues.push(GridInvariantIssue {
                        code: GridInvariantCode::UnsortedRow,
                        row: Some(row_index),
                        item: Some(cell.item),
                        related_item: Some(prev.item),
                        message: format!(
                            "item {} starts before preceding item {}",
                            cell.item, prev.item
                        ),
                    });
                }
                for other in &row.cells[index + 1..] {
                    if cell.overlaps(other) {
                        issues.push(GridInvariantIssue {
                            code: GridInvariantCode::CellOverlap,
                            row: Some(row_index),
                            item: Some(cell.item),
                            related_item: Some(other.item),
                            message: format!(
                                "items {} and {} share columns in row {row_index}",
                                cell.item, other.item
                            ),
                        });
                    }
                }
            }
        }

        if let Some(count) = item_count {
            for item in 0..count {
                if !seen.contains_key(&item) {
                    issues.push(GridInvariantIssue {
                        code: GridInvariantCode::MissingItem,
                        row: None,
                        item: Some(item),
                        related_item: None,
                        message: format!("item {item} has no cell"),
                    });
                }
            }
        }

        issues.sort_by(|left, right| {
            (left.code, left.row, left.item, left.related_item).cmp(&(
                right.code,
                right.row,
                right.item,
                right.related_item,
            ))
        });

        GridInvariantReport {
            state_hash: self.state_hash(),
            issues,
        }
    }

    /// [`Grid::invariant_report`] as a `Result`.
    pub fn validate(&self, item_count: Option<usize>) -> Result<(), GridInvariantError> {
        let report = self.invariant_report(item_count);
        if report.is_valid() {
            Ok(())
        } else {
            Err(GridInvariantError { report })
        }
    }

    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Row> {
        &mut self.rows
    }

    pub(crate) fn drop_empty_rows(&mut self) {
        self.rows.retain(|row| !row.is_empty());
    }
}

/// Stable code for invariant findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridInvariantCode {
    SpanOutOfRange,
    ColumnOverflow,
    CellOverlap,
    UnsortedRow,
    EmptyRow,
    DuplicateItem,
    DanglingItem,
    MissingItem,
}

/// One invariant finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridInvariantIssue {
    pub code: GridInvariantCode,
    pub row: Option<usize>,
    pub item: Option<usize>,
    pub related_item: Option<usize>,
    pub message: String,
}

/// Structured invariant report over one grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridInvariantReport {
    pub state_hash: u64,
    pub issues: Vec<GridInvariantIssue>,
}

impl GridInvariantReport {
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    #[must_use]
    pub fn has_code(&self, code: GridInvariantCode) -> bool {
        self.issues.iter().any(|issue| issue.code == code)
    }
}

/// A grid failed its invariant check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridInvariantError {
    pub report: GridInvariantReport,
}

impl fmt::Display for GridInvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "grid invariant violated ({} issue(s))",
            self.report.issues.len()
        )?;
        if let Some(first) = self.report.issues.first() {
            write!(f, ": {}", first.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for GridInvariantError {}
