#![forbid(unsafe_code)]

//! Logging shim for the render engine.
//!
//! With the `tracing` feature the usual `tracing` macros are re-exported here
//! (and at the crate root). Without it, same-named macros expand to nothing so
//! engine code can log unconditionally via `crate::info!` and friends.

#[cfg(feature = "tracing")]
pub use tracing::{debug, debug_span, info, trace};

#[cfg(not(feature = "tracing"))]
mod noop_macros {
    /// Expands to nothing; `tracing` is disabled.
    #[macro_export]
    macro_rules! debug {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing; `tracing` is disabled.
    #[macro_export]
    macro_rules! info {
        ($($arg:tt)*) => {};
    }

    /// Expands to nothing; `tracing` is disabled.
    #[macro_export]
    macro_rules! trace {
        ($($arg:tt)*) => {};
    }

    /// Yields a [`NoopSpan`](crate::logging::NoopSpan); `tracing` is disabled.
    #[macro_export]
    macro_rules! debug_span {
        ($($arg:tt)*) => {
            $crate::logging::NoopSpan
        };
    }
}

/// Stand-in for a `tracing::Span` when the feature is off.
#[cfg(not(feature = "tracing"))]
#[derive(Debug, Clone, Copy)]
pub struct NoopSpan;

#[cfg(not(feature = "tracing"))]
impl NoopSpan {
    /// Entering does nothing; the guard only exists to mirror `Span::enter`.
    pub fn enter(&self) -> NoopGuard {
        NoopGuard
    }
}

/// Guard returned by [`NoopSpan::enter`].
#[cfg(not(feature = "tracing"))]
#[derive(Debug)]
pub struct NoopGuard;
