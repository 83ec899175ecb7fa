#![forbid(unsafe_code)]

//! fieldgrid public facade.
//!
//! A 12-column grid layout engine for dashboards and form designers. Items
//! carry optional row and column hints; the engine builds a normalized
//! grid from them, mutates it through resize, drag/drop and click commands
//! without ever breaking the grid's invariants, and hands the host back a
//! full updated item list after every committed change.
//!
//! ```
//! use fgrid::prelude::*;
//!
//! let mut published = Vec::new();
//! let host = FnHost::new(|items: Vec<LayoutHints>| published.push(items));
//! let mut engine = GridEngine::new(vec![LayoutHints::span(6); 2], host);
//!
//! engine.pointer_down_right_edge(0, 600.0, 1200.0);
//! engine.pointer_move(800.0);
//! let up = engine.pointer_up(800.0);
//! assert!(up.effect.is_commit());
//! drop(engine);
//!
//! assert_eq!(
//!     published,
//!     vec![vec![LayoutHints::placed(1, 1, 8), LayoutHints::placed(1, 9, 4)]]
//! );
//! ```

pub mod error;

pub use error::{Error, Result};

// --- Core re-exports -------------------------------------------------------

pub use fgrid_core::{
    Cell, CellGeometry, Direction, DropTarget, GRID_COLUMNS, Gap, GridCommand, LayoutHints,
    LayoutItem, QuickSize, snap_columns,
};

// --- Layout re-exports -----------------------------------------------------

pub use fgrid_layout::{
    Grid, GridInvariantCode, GridInvariantError, GridInvariantReport, GridOperation, Outcome,
    RejectReason, Row, build, project, remove_and_rebuild,
};

// --- Runtime re-exports ----------------------------------------------------

pub use fgrid_runtime::{
    CancelReason, CommitKind, ConcurrentGesturePolicy, EngineConfig, EngineConfigError, FnHost,
    GridEffect, GridEngine, GridHost, GridTransition, InteractionState, NoopReason, ResizeEdge,
};

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Direction, DropTarget, EngineConfig, Error, FnHost, Gap, GridCommand, GridEffect,
        GridEngine, GridHost, InteractionState, LayoutHints, LayoutItem, QuickSize, Result,
    };

    pub use crate::{core, layout, runtime};
}

pub use fgrid_core as core;
pub use fgrid_layout as layout;
pub use fgrid_runtime as runtime;
