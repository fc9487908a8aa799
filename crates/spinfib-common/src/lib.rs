//! Common types, errors, and configuration for spinfib.
//!
//! This crate provides shared functionality used across the spinfib workspace:
//! - Error types using `thiserror` for type-safe error handling
//! - Configuration structures for the demo, loadable from TOML

pub mod config;
pub mod config_file;
pub mod error;

pub use config::{
    DemoConfig, FibonacciConfig, ShutdownConfig, ShutdownMode, SpinnerConfig, Strategy,
};
pub use config_file::ConfigFileError;
pub use error::{DemoError, FibonacciError, MAX_FIBONACCI_INDEX};
