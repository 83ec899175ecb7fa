#![forbid(unsafe_code)]

//! Core data model for the fieldgrid layout engine.
//!
//! # Role in fieldgrid
//! `fgrid-core` holds the vocabulary every other crate speaks: the layout
//! hints carried by caller-owned items, the 12-column cell and gap geometry,
//! drop targets, and the discrete commands a host can issue.
//!
//! # How it fits in the system
//! `fgrid-layout` builds and resolves grids out of these types,
//! `fgrid-runtime` drives them from pointer and drag events, and the `fgrid`
//! facade re-exports the lot.

pub mod command;
pub mod geometry;
pub mod item;

pub use command::{DropTarget, GridCommand};
pub use geometry::{Cell, CellGeometry, Direction, GRID_COLUMNS, Gap, QuickSize, snap_columns};
pub use item::{LayoutHints, LayoutItem};
