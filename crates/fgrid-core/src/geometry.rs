#![forbid(unsafe_code)]

//! Column geometry: cells, gaps, and the rounding rule used by snap.

use serde::{Deserialize, Serialize};

/// Number of columns in every grid row.
pub const GRID_COLUMNS: u8 = 12;

/// One item's placement inside a row.
///
/// `col_start` is 0-based. A well-formed cell satisfies
/// `1 <= col_span <= 12` and `col_start + col_span <= 12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    /// Index of the item in the caller's list.
    pub item: usize,
    /// First occupied column (0-based).
    pub col_start: u8,
    /// Number of occupied columns.
    pub col_span: u8,
}

impl Cell {
    /// Create a new cell.
    #[inline]
    #[must_use]
    pub const fn new(item: usize, col_start: u8, col_span: u8) -> Self {
        Self {
            item,
            col_start,
            col_span,
        }
    }

    /// One past the last occupied column.
    #[inline]
    #[must_use]
    pub const fn col_end(&self) -> u8 {
        self.col_start.saturating_add(self.col_span)
    }

    /// Whether the cell respects the span and column bounds.
    #[inline]
    #[must_use]
    pub const fn is_in_bounds(&self) -> bool {
        self.col_span >= 1 && self.col_span <= GRID_COLUMNS && self.col_end() <= GRID_COLUMNS
    }

    /// Whether the half-open column range `[start, start + span)` intersects this cell.
    #[inline]
    #[must_use]
    pub const fn overlaps_range(&self, start: u8, span: u8) -> bool {
        let end = start.saturating_add(span);
        start < self.col_end() && self.col_start < end
    }

    /// Whether two cells share at least one column.
    #[inline]
    #[must_use]
    pub const fn overlaps(&self, other: &Cell) -> bool {
        self.overlaps_range(other.col_start, other.col_span)
    }
}

/// A maximal free column range inside a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Gap {
    pub col_start: u8,
    pub col_span: u8,
}

impl Gap {
    #[inline]
    #[must_use]
    pub const fn new(col_start: u8, col_span: u8) -> Self {
        Self {
            col_start,
            col_span,
        }
    }

    #[inline]
    #[must_use]
    pub const fn col_end(&self) -> u8 {
        self.col_start.saturating_add(self.col_span)
    }

    /// Whether the gap can hold `span` columns starting at its left edge.
    #[inline]
    #[must_use]
    pub const fn fits(&self, span: u8) -> bool {
        span <= self.col_span
    }
}

/// Fractional cell geometry shown while a resize is in flight.
///
/// Hosts use this for smooth visual feedback between pointer events. It is
/// never committed; [`CellGeometry::snapped`] gives the integer placement
/// that a release at this point would produce.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    pub col_start: f32,
    pub col_span: f32,
}

impl CellGeometry {
    #[must_use]
    pub fn from_cell(cell: &Cell) -> Self {
        Self {
            col_start: f32::from(cell.col_start),
            col_span: f32::from(cell.col_span),
        }
    }

    /// Round both edges to whole columns and clamp into the grid bounds.
    ///
    /// Edges snap independently, so a resize that keeps one edge fixed keeps
    /// it fixed here too.
    #[must_use]
    pub fn snapped(&self) -> (u8, u8) {
        let start = snap_columns(self.col_start);
        let end = snap_columns(self.col_start + self.col_span);
        let span = (end - start).clamp(1, i32::from(GRID_COLUMNS));
        let start = start.clamp(0, i32::from(GRID_COLUMNS) - span);
        (start as u8, span as u8)
    }
}

/// Round a fractional column count to the nearest whole column.
///
/// Halves round away from zero, so a pointer that has travelled exactly half
/// a column in either direction commits to the next column. Non-finite input
/// maps to zero.
#[inline]
#[must_use]
pub fn snap_columns(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    // `as` saturates at the i32 bounds.
    value.round() as i32
}

/// Step direction for nudge, swap and row moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// Towards column 0 / the first row.
    Backward,
    /// Towards column 12 / the last row.
    Forward,
}

impl Direction {
    /// Signed unit step (-1 or +1).
    #[inline]
    #[must_use]
    pub const fn step(self) -> i32 {
        match self {
            Self::Backward => -1,
            Self::Forward => 1,
        }
    }

    /// Apply the step to an index, returning `None` when it leaves `0..len`.
    #[must_use]
    pub fn offset(self, index: usize, len: usize) -> Option<usize> {
        let next = match self {
            Self::Backward => index.checked_sub(1)?,
            Self::Forward => index.checked_add(1)?,
        };
        (next < len).then_some(next)
    }
}

/// Quick-size presets offered next to each cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuickSize {
    /// 25% of the row.
    Quarter,
    /// 33% of the row.
    Third,
    /// 50% of the row.
    Half,
    /// Full row width.
    Full,
}

impl QuickSize {
    pub const ALL: [QuickSize; 4] = [Self::Quarter, Self::Third, Self::Half, Self::Full];

    /// Column span this preset asks for.
    #[must_use]
    pub const fn span(self) -> u8 {
        match self {
            Self::Quarter => 3,
            Self::Third => 4,
            Self::Half => 6,
            Self::Full => GRID_COLUMNS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_overlap_is_half_open() {
        let a = Cell::new(0, 0, 6);
        let b = Cell::new(1, 6, 6);
        assert!(!a.overlaps(&b));
        assert!(!b.overlaps(&a));
        assert!(a.overlaps(&Cell::new(2, 5, 2)));
        assert!(a.overlaps_range(0, 12));
    }

    #[test]
    fn cell_bounds() {
        assert!(Cell::new(0, 0, 12).is_in_bounds());
        assert!(Cell::new(0, 11, 1).is_in_bounds());
        assert!(!Cell::new(0, 1, 12).is_in_bounds());
        assert!(!Cell::new(0, 0, 0).is_in_bounds());
    }

    #[test]
    fn snap_rounds_half_away_from_zero() {
        assert_eq!(snap_columns(1.49), 1);
        assert_eq!(snap_columns(1.5), 2);
        assert_eq!(snap_columns(-1.5), -2);
        assert_eq!(snap_columns(-0.4), 0);
        assert_eq!(snap_columns(f32::NAN), 0);
        assert_eq!(snap_columns(f32::INFINITY), 0);
    }

    #[test]
    fn geometry_snaps_into_bounds() {
        let live = CellGeometry {
            col_start: 3.4,
            col_span: 9.7,
        };
        // span rounds to 10, start is pulled back so the cell ends at 12
        assert_eq!(live.snapped(), (2, 10));

        let tiny = CellGeometry {
            col_start: -2.0,
            col_span: 0.2,
        };
        assert_eq!(tiny.snapped(), (0, 1));

        // a left edge half way between columns moves, the right edge stays
        let left = CellGeometry {
            col_start: 3.5,
            col_span: 6.5,
        };
        assert_eq!(left.snapped(), (4, 6));
    }

    #[test]
    fn direction_offset_stays_in_range() {
        assert_eq!(Direction::Backward.offset(0, 3), None);
        assert_eq!(Direction::Backward.offset(2, 3), Some(1));
        assert_eq!(Direction::Forward.offset(2, 3), None);
        assert_eq!(Direction::Forward.offset(0, 3), Some(1));
    }

    #[test]
    fn quick_size_spans() {
        let spans: Vec<u8> = QuickSize::ALL.iter().map(|q| q.span()).collect();
        assert_eq!(spans, vec![3, 4, 6, 12]);
    }
}
