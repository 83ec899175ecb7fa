#![forbid(unsafe_code)]

//! Unified error type for fieldgrid.
//!
//! Each layer keeps its own typed error: the layout crate reports broken
//! grid invariants, the runtime reports configuration problems. This module
//! folds them into one [`Error`] so applications can use `?` across both.

use std::fmt;

use fgrid_layout::GridInvariantError;
use fgrid_runtime::EngineConfigError;

/// Top-level error type for fieldgrid callers.
#[derive(Debug)]
pub enum Error {
    /// A grid failed its structural invariant check.
    Invariant(GridInvariantError),
    /// Engine configuration could not be loaded or validated.
    Config(EngineConfigError),
    /// Raw I/O error (convenience variant for `?` on io::Result).
    Io(std::io::Error),
}

/// Standard result type for fieldgrid APIs.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Short label for logs and metric tags.
    #[must_use]
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::Invariant(_) => "invariant",
            Self::Config(_) => "config",
            Self::Io(_) => "io",
        }
    }

    /// Whether the engine state is still trustworthy after this error.
    ///
    /// A broken invariant means a layout is corrupt; configuration and I/O
    /// failures leave any running engine untouched.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Invariant(_))
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invariant(err) => write!(f, "{err}"),
            Self::Config(err) => write!(f, "config: {err}"),
            Self::Io(err) => write!(f, "I/O: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Invariant(err) => Some(err),
            Self::Config(err) => Some(err),
            Self::Io(err) => Some(err),
        }
    }
}

impl From<GridInvariantError> for Error {
    fn from(err: GridInvariantError) -> Self {
        Self::Invariant(err)
    }
}

impl From<EngineConfigError> for Error {
    fn from(err: EngineConfigError) -> Self {
        Self::Config(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
