#![forbid(unsafe_code)]

//! Interaction lifecycle states and transition records.
//!
//! ```text
//! Idle -> ResizingRight/ResizingLeft -> Idle   (pointer up / cancel)
//! Idle -> DraggingItem <-> DropTarget -> Idle  (drop / drag end)
//! ```

use fgrid_core::DropTarget;
use fgrid_layout::{Outcome, RejectReason};
use serde::{Deserialize, Serialize};

/// Which cell edge a resize gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeEdge {
    Left,
    Right,
}

/// Transient interaction state owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum InteractionState {
    Idle,
    ResizingRight {
        item: usize,
        row: usize,
        start_pointer_x: f32,
        start_span: u8,
        /// Container width / 12, measured at gesture start.
        column_width: f32,
    },
    ResizingLeft {
        item: usize,
        row: usize,
        start_pointer_x: f32,
        start_col_start: u8,
        start_span: u8,
        column_width: f32,
    },
    DraggingItem {
        item: usize,
    },
    DropTarget {
        item: usize,
        target: DropTarget,
    },
}

impl InteractionState {
    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    #[inline]
    #[must_use]
    pub const fn is_resizing(&self) -> bool {
        matches!(self, Self::ResizingRight { .. } | Self::ResizingLeft { .. })
    }

    #[inline]
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::DraggingItem { .. } | Self::DropTarget { .. })
    }

    /// Item the active gesture is operating on.
    #[must_use]
    pub const fn active_item(&self) -> Option<usize> {
        match self {
            Self::Idle => None,
            Self::ResizingRight { item, .. }
            | Self::ResizingLeft { item, .. }
            | Self::DraggingItem { item }
            | Self::DropTarget { item, .. } => Some(*item),
        }
    }

    /// Stable label for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::ResizingRight { .. } => "resizing_right",
            Self::ResizingLeft { .. } => "resizing_left",
            Self::DraggingItem { .. } => "dragging_item",
            Self::DropTarget { .. } => "drop_target",
        }
    }
}

/// Which mutation a commit published.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommitKind {
    Resize,
    Drop,
    Nudge,
    Swap,
    MoveRow,
    QuickSize,
    MoveToNewRow,
    Remove,
}

impl CommitKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Resize => "resize",
            Self::Drop => "drop",
            Self::Nudge => "nudge",
            Self::Swap => "swap",
            Self::MoveRow => "move_row",
            Self::QuickSize => "quick_size",
            Self::MoveToNewRow => "move_to_new_row",
            Self::Remove => "remove",
        }
    }
}

/// Why an active gesture ended without a commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CancelReason {
    PointerCancel,
    DragEnd,
    ItemsReplaced,
    ItemRemoved,
    Programmatic,
}

/// Explicit diagnostics for input that is safely ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    NoActiveGesture,
    GestureInProgress,
    WrongGesture,
    BelowHysteresis,
    NoDropTarget,
    LayoutUnchanged,
    InvalidContainerWidth,
}

/// Effect emitted by one engine call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum GridEffect {
    ResizeStarted {
        item: usize,
        edge: ResizeEdge,
    },
    ResizePreviewed {
        item: usize,
        delta_cols: i32,
        outcome: Outcome,
    },
    DragStarted {
        item: usize,
    },
    TargetUpdated {
        item: usize,
        target: DropTarget,
    },
    TargetCleared {
        item: usize,
    },
    Committed {
        kind: CommitKind,
        state_hash: u64,
    },
    Removed {
        item: usize,
    },
    Selected {
        item: usize,
    },
    Canceled {
        item: Option<usize>,
        reason: CancelReason,
    },
    Rejected {
        reason: RejectReason,
    },
    Noop {
        reason: NoopReason,
    },
}

impl GridEffect {
    /// Stable label for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ResizeStarted { .. } => "resize_started",
            Self::ResizePreviewed { .. } => "resize_previewed",
            Self::DragStarted { .. } => "drag_started",
            Self::TargetUpdated { .. } => "target_updated",
            Self::TargetCleared { .. } => "target_cleared",
            Self::Committed { .. } => "committed",
            Self::Removed { .. } => "removed",
            Self::Selected { .. } => "selected",
            Self::Canceled { .. } => "canceled",
            Self::Rejected { .. } => "rejected",
            Self::Noop { .. } => "noop",
        }
    }

    /// Whether the host was handed a new item list.
    #[must_use]
    pub const fn is_commit(&self) -> bool {
        matches!(self, Self::Committed { .. } | Self::Removed { .. })
    }

    /// Input the engine refused or ignored outright.
    pub(crate) const fn is_refusal(&self) -> bool {
        match self {
            Self::Rejected { .. } => true,
            Self::Noop { reason } => matches!(
                reason,
                NoopReason::GestureInProgress
                    | NoopReason::WrongGesture
                    | NoopReason::InvalidContainerWidth
            ),
            _ => false,
        }
    }
}

/// One engine step with deterministic telemetry fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridTransition {
    pub transition_id: u64,
    pub from: InteractionState,
    pub to: InteractionState,
    pub effect: GridEffect,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn active_item_follows_state() {
        assert_eq!(InteractionState::Idle.active_item(), None);
        let dragging = InteractionState::DraggingItem { item: 3 };
        assert_eq!(dragging.active_item(), Some(3));
        assert!(dragging.is_dragging());
        assert!(!dragging.is_resizing());
    }

    #[test]
    fn refusals_are_flagged() {
        assert!(
            GridEffect::Rejected {
                reason: RejectReason::Occupied
            }
            .is_refusal()
        );
        assert!(
            !GridEffect::Noop {
                reason: NoopReason::BelowHysteresis
            }
            .is_refusal()
        );
        assert!(!GridEffect::DragStarted { item: 0 }.is_refusal());
    }

    #[test]
    fn transition_serializes_with_tags() {
        let transition = GridTransition {
            transition_id: 7,
            from: InteractionState::DraggingItem { item: 1 },
            to: InteractionState::Idle,
            effect: GridEffect::Canceled {
                item: Some(1),
                reason: CancelReason::DragEnd,
            },
        };
        let json = serde_json::to_value(transition).unwrap();
        assert_eq!(json["from"]["state"], "dragging_item");
        assert_eq!(json["to"]["state"], "idle");
        assert_eq!(json["effect"]["effect"], "canceled");
        assert_eq!(json["effect"]["reason"], "drag_end");
    }
}
