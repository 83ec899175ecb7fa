#![forbid(unsafe_code)]

//! Grid builder, constraint resolver and projection.
//!
//! # Role in fieldgrid
//! `fgrid-layout` is the pure half of the engine. It turns a flat item list
//! into a normalized [`Grid`], applies invariant-preserving mutations to it,
//! and projects the result back into item hints. It holds no interaction
//! state and never calls out to a host.
//!
//! # How it fits in the system
//! `fgrid-runtime` owns a [`Grid`] per engine and drives the functions here
//! from pointer and drag events. Everything in this crate is synchronous and
//! allocation-light; operations that would break an invariant return
//! [`Outcome::Rejected`] and leave the grid as it was.
//!
//! # Example
//!
//! ```
//! use fgrid_core::LayoutHints;
//! use fgrid_layout::{Outcome, build, project, resize_right};
//!
//! let items = [LayoutHints::span(6), LayoutHints::span(6)];
//! let mut grid = build(&items);
//! assert_eq!(resize_right(&mut grid, 0, 2), Outcome::Applied);
//!
//! let updated = project(&items, &grid);
//! assert_eq!(updated[0], LayoutHints::placed(1, 1, 8));
//! assert_eq!(updated[1], LayoutHints::placed(1, 9, 4));
//! ```

mod logging;

pub mod build;
pub mod grid;
pub mod project;
pub mod resolve;

pub use build::build;
pub use grid::{
    CellPosition, Grid, GridInvariantCode, GridInvariantError, GridInvariantIssue,
    GridInvariantReport, Row,
};
pub use project::{project, remove_and_rebuild};
pub use resolve::{
    GridOperation, Outcome, RejectReason, compute_gaps, move_cell_to_row, move_row,
    move_to_new_row, nudge, quick_size, resize_left, resize_right, snap, swap_in_row,
};
