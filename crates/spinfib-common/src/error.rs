//! Error types for spinfib.
//!
//! This module defines a hierarchy of error types using `thiserror`:
//! - [`DemoError`]: Top-level errors for a demo run
//! - [`FibonacciError`]: Errors from validating a Fibonacci index

use std::io;

use thiserror::Error;

/// Largest index whose Fibonacci number fits in a `u64`.
pub const MAX_FIBONACCI_INDEX: i64 = 93;

/// Top-level demo errors.
///
/// These errors represent failures that can occur while configuring and
/// running the spinner + Fibonacci demo.
#[derive(Error, Debug)]
pub enum DemoError {
    /// The Fibonacci index was rejected.
    #[error("Fibonacci error: {0}")]
    Fibonacci(#[from] FibonacciError),

    /// Invalid configuration was provided.
    #[error("Invalid configuration: {reason}")]
    InvalidConfig {
        /// Description of the configuration error.
        reason: String,
    },

    /// The spinner did not acknowledge the stop signal in time.
    #[error("Spinner did not stop within {duration_ms}ms")]
    SpinnerStopTimeout {
        /// The stop timeout in milliseconds.
        duration_ms: u64,
    },

    /// A background worker panicked or was cancelled unexpectedly.
    #[error("Worker panicked: {reason}")]
    WorkerPanicked {
        /// Description of the failure.
        reason: String,
    },

    /// The output writer is no longer accepting frames.
    #[error("Output writer closed")]
    OutputClosed,

    /// I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Errors from validating a Fibonacci index.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FibonacciError {
    /// The index was negative.
    #[error("Invalid argument: index must be non-negative, got {index}")]
    InvalidArgument {
        /// The rejected index.
        index: i64,
    },

    /// The result would not fit in a `u64`.
    #[error("Overflow: Fibonacci({index}) exceeds u64 (max index {max})")]
    Overflow {
        /// The rejected index.
        index: i64,
        /// The largest accepted index.
        max: i64,
    },
}

impl DemoError {
    /// Create a new `InvalidConfig` error.
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig {
            reason: reason.into(),
        }
    }

    /// Create a new `WorkerPanicked` error.
    pub fn worker_panicked(reason: impl Into<String>) -> Self {
        Self::WorkerPanicked {
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error was caused by user input
    /// (a bad index or bad configuration) rather than a runtime failure.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::Fibonacci(_) | Self::InvalidConfig { .. })
    }
}

impl FibonacciError {
    /// Validate `index`, returning it as a `u32` when it is in range.
    pub fn check(index: i64) -> Result<u32, Self> {
        if index < 0 {
            return Err(Self::InvalidArgument { index });
        }
        match u32::try_from(index) {
            Ok(n) if index <= MAX_FIBONACCI_INDEX => Ok(n),
            _ => Err(Self::Overflow {
                index,
                max: MAX_FIBONACCI_INDEX,
            }),
        }
    }

    /// Returns `true` if the index was negative.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
