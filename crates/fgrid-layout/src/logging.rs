#![forbid(unsafe_code)]

//! Diagnostics shim.
//!
//! With the `tracing` feature the macros forward to `tracing` under the
//! `fgrid.layout` target; without it they compile to nothing.

#[cfg(feature = "tracing")]
macro_rules! layout_debug {
    ($($arg:tt)*) => {
        tracing::debug!(target: "fgrid.layout", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! layout_debug {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! layout_trace {
    ($($arg:tt)*) => {
        tracing::trace!(target: "fgrid.layout", $($arg)*)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! layout_trace {
    ($($arg:tt)*) => {};
}

pub(crate) use layout_debug;
pub(crate) use layout_trace;
