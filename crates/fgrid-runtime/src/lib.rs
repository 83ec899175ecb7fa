#![forbid(unsafe_code)]

//! Interaction controller for fieldgrid.
//!
//! # Role in fieldgrid
//! `fgrid-runtime` turns host events (pointer down/move/up on a cell edge,
//! drag start/over/drop, control clicks) into resolver calls on a
//! [`fgrid_layout::Grid`], and publishes committed layouts back to the host
//! as a fresh item list.
//!
//! # Lifecycle
//!
//! Every event returns a [`GridTransition`] recording the state before and
//! after and the effect. Events are processed strictly in call order; the
//! engine is driven through `&mut self` and shares nothing between
//! instances.
//!
//! # Logging
//! Transitions are logged through `tracing` under the `fgrid.engine` target.
//! Commits run inside a `grid.commit` span.

pub mod config;
pub mod engine;
pub mod state;

pub use config::{ConcurrentGesturePolicy, EngineConfig, EngineConfigError};
pub use engine::{FnHost, GridEngine, GridHost};
pub use state::{
    CancelReason, CommitKind, GridEffect, GridTransition, InteractionState, NoopReason, ResizeEdge,
};
