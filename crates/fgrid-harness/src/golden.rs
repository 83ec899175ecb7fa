#![forbid(unsafe_code)]

//! Golden layout harness: checksums, JSONL logs and golden files.
//!
//! # JSONL Schema
//!
//! Each scenario run emits one JSON object per line:
//!
//! ```json
//! {"event":"start","run_id":"...","case":"resize_grow","items":2,"seed":0}
//! {"event":"step","run_id":"...","step":0,"input":"pointer_down_right_edge","transition_id":1,"from":"idle","to":"resizing_right","effect":"resize_started","checksum":"blake3:..."}
//! {"event":"complete","run_id":"...","outcome":"pass","checksums":["blake3:..."],"total_ms":3}
//! ```
//!
//! # Blessing
//!
//! Set `BLESS=1` to rewrite golden checksum files from the current output.
//! Missing golden files pass unless `FGRID_GOLDEN_ENFORCE=1` or `CI=1`.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{Instant, SystemTime, UNIX_EPOCH};

use fgrid_layout::Grid;
use serde_json::{Value, json};

use crate::render::render_grid;

/// Checksum prefix for clarity in logs.
pub const CHECKSUM_PREFIX: &str = "blake3:";

// ============================================================================
// Checksum Computation
// ============================================================================

/// BLAKE3 checksum of a grid's rows and cells.
///
/// Hashes the row count, then for each row its cell count followed by
/// `(item, col_start, col_span)` per cell. Identical layouts hash equal
/// across runs and platforms.
#[must_use]
pub fn layout_checksum(grid: &Grid) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(&(grid.row_count() as u64).to_le_bytes());
    for row in grid.rows() {
        hasher.update(&(row.len() as u64).to_le_bytes());
        for cell in row.cells() {
            hasher.update(&(cell.item as u64).to_le_bytes());
            hasher.update(&[cell.col_start, cell.col_span]);
        }
    }
    format!("{CHECKSUM_PREFIX}{}", hasher.finalize().to_hex())
}

/// BLAKE3 checksum of arbitrary text, such as an ASCII render.
#[must_use]
pub fn text_checksum(text: &str) -> String {
    format!("{CHECKSUM_PREFIX}{}", blake3::hash(text.as_bytes()).to_hex())
}

/// Checksum of the ASCII render.
#[must_use]
pub fn render_checksum(grid: &Grid) -> String {
    text_checksum(&render_grid(grid))
}

// ============================================================================
// JSONL Logger
// ============================================================================

/// JSONL event logger for golden runs.
pub struct GoldenLogger {
    writer: Option<BufWriter<File>>,
    run_id: String,
    start_time: Instant,
    checksums: Vec<String>,
    lines: Vec<String>,
}

impl GoldenLogger {
    /// Logger appending to `path`, creating parent directories.
    pub fn new(path: &Path) -> std::io::Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Some(BufWriter::new(file)),
            ..Self::noop()
        })
    }

    /// Logger that only keeps lines in memory.
    pub fn noop() -> Self {
        Self {
            writer: None,
            run_id: generate_run_id(),
            start_time: Instant::now(),
            checksums: Vec::new(),
            lines: Vec::new(),
        }
    }

    /// Replace the generated run id, for byte-stable logs.
    #[must_use]
    pub fn with_run_id(mut self, run_id: impl Into<String>) -> Self {
        self.run_id = run_id.into();
        self
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    pub fn log_start(&mut self, case: &str, items: usize, seed: u64) {
        self.write_event(json!({
            "event": "start",
            "run_id": self.run_id,
            "case": case,
            "items": items,
            "seed": seed,
        }));
    }

    /// Log one replayed input and the layout checksum after it.
    pub fn log_step(&mut self, step: usize, input: &str, transition: Value, checksum: &str) {
        self.checksums.push(checksum.to_string());
        let mut line = json!({
            "event": "step",
            "run_id": self.run_id,
            "step": step,
            "input": input,
            "checksum": checksum,
        });
        if let (Some(line), Value::Object(fields)) = (line.as_object_mut(), transition) {
            line.extend(fields);
        }
        self.write_event(line);
    }

    pub fn log_complete(&mut self, outcome: GoldenOutcome) {
        let total_ms = self.start_time.elapsed().as_millis() as u64;
        self.write_event(json!({
            "event": "complete",
            "run_id": self.run_id,
            "outcome": outcome.as_str(),
            "checksums": self.checksums,
            "total_ms": total_ms,
        }));
    }

    pub fn log_error(&mut self, message: &str) {
        self.write_event(json!({
            "event": "error",
            "run_id": self.run_id,
            "message": message,
        }));
    }

    /// Checksums logged so far, one per step.
    pub fn checksums(&self) -> &[String] {
        &self.checksums
    }

    /// Every line emitted so far.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn write_event(&mut self, event: Value) {
        let line = event.to_string();
        if let Some(ref mut writer) = self.writer {
            let _ = writeln!(writer, "{line}");
            let _ = writer.flush();
        }
        self.lines.push(line);
    }
}

/// Golden run outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoldenOutcome {
    Pass,
    Fail,
    Skip,
}

impl GoldenOutcome {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skip => "skip",
        }
    }
}

fn generate_run_id() -> String {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    format!("{timestamp:x}")
}

// ============================================================================
// Golden File Management
// ============================================================================

/// Path to the golden checksum file for a scenario.
#[must_use]
pub fn golden_checksum_path(base_dir: &Path, scenario_name: &str) -> PathBuf {
    base_dir
        .join("tests")
        .join("golden")
        .join(format!("{scenario_name}.checksums"))
}

/// Load expected checksums. A missing file yields an empty list.
pub fn load_golden_checksums(path: &Path) -> std::io::Result<Vec<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(content
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty() && !l.starts_with('#'))
            .map(str::to_string)
            .collect()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
        Err(e) => Err(e),
    }
}

pub fn save_golden_checksums(path: &Path, checksums: &[String]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = format!(
        "# Golden layout checksums - regenerate with BLESS=1\n{}\n",
        checksums.join("\n")
    );
    fs::write(path, content)
}

/// Whether golden files should be rewritten.
#[must_use]
pub fn is_bless_mode() -> bool {
    env_flag("BLESS")
}

/// Whether a missing golden file is a failure.
#[must_use]
pub fn is_golden_enforced() -> bool {
    env_flag("FGRID_GOLDEN_ENFORCE") || env_flag("CI")
}

fn env_flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|v| v == "1" || v.eq_ignore_ascii_case("true"))
}

/// Compare checksums. Returns the outcome and the first mismatching index.
#[must_use]
pub fn verify_checksums(actual: &[String], expected: &[String]) -> (GoldenOutcome, Option<usize>) {
    if expected.is_empty() {
        if is_golden_enforced() {
            return (GoldenOutcome::Fail, None);
        }
        return (GoldenOutcome::Skip, None);
    }
    if let Some(index) = actual
        .iter()
        .zip(expected)
        .position(|(actual, expected)| actual != expected)
    {
        return (GoldenOutcome::Fail, Some(index));
    }
    if actual.len() != expected.len() {
        return (GoldenOutcome::Fail, Some(actual.len().min(expected.len())));
    }
    (GoldenOutcome::Pass, None)
}
