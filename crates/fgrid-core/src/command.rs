#![forbid(unsafe_code)]

//! Drop targets and discrete layout commands.

use serde::{Deserialize, Serialize};

use crate::geometry::{Direction, Gap, QuickSize};

/// Where a dragged item would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DropTarget {
    /// A free column range inside an existing row.
    Gap { row: usize, gap: Gap },
    /// A fresh full-width row inserted at `row` (`row == len` appends).
    NewRow { row: usize },
    /// Anywhere in an existing row; the first gap that fits the full span.
    Row { row: usize },
}

impl DropTarget {
    /// Row index the target refers to.
    #[must_use]
    pub const fn row(&self) -> usize {
        match self {
            Self::Gap { row, .. } | Self::NewRow { row } | Self::Row { row } => *row,
        }
    }

    /// Gap bounds, when the target is a gap.
    #[must_use]
    pub const fn gap(&self) -> Option<Gap> {
        match self {
            Self::Gap { gap, .. } => Some(*gap),
            Self::NewRow { .. } | Self::Row { .. } => None,
        }
    }
}

/// A discrete, click-driven layout mutation.
///
/// These bypass the gesture state machine and commit immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum GridCommand {
    /// Move a cell one column left or right.
    Nudge { item: usize, direction: Direction },
    /// Exchange a cell with its neighbor in the same row.
    Swap { item: usize, direction: Direction },
    /// Exchange a whole row with the adjacent row.
    MoveRow { row: usize, direction: Direction },
    /// Resize a cell to a preset width.
    QuickSize { item: usize, size: QuickSize },
    /// Put a cell on its own full-width row below its current row.
    MoveToNewRow { item: usize },
}

impl GridCommand {
    /// Stable label for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Nudge { .. } => "nudge",
            Self::Swap { .. } => "swap",
            Self::MoveRow { .. } => "move_row",
            Self::QuickSize { .. } => "quick_size",
            Self::MoveToNewRow { .. } => "move_to_new_row",
        }
    }
}
