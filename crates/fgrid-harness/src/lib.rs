#![forbid(unsafe_code)]

//! Test harness for fieldgrid.
//!
//! - [`render`]: ASCII rendering of a [`fgrid_layout::Grid`]
//! - [`golden`]: BLAKE3 layout checksums, JSONL run logs, golden files
//! - [`scenario`]: scripted input replay against a real engine
//!
//! Golden tests replay a [`Scenario`], compare the final ASCII render, and
//! compare per-step checksums with `tests/golden/<name>.checksums` when that
//! file exists. Set `BLESS=1` to regenerate the files.

pub mod golden;
pub mod render;
pub mod scenario;

pub use golden::{
    GoldenLogger, GoldenOutcome, layout_checksum, render_checksum, text_checksum,
    verify_checksums,
};
pub use render::{render_grid, render_grid_numbered};
pub use scenario::{
    RecordingHost, Scenario, ScenarioEvent, ScenarioRun, ScenarioStep, dispatch, run_scenario,
};
