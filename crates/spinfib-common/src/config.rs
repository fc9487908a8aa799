//! Configuration structures for spinfib.
//!
//! This module defines configuration options for each part of a demo run:
//! - [`DemoConfig`]: Top-level configuration containing all settings
//! - [`FibonacciConfig`]: Index and computation strategy
//! - [`SpinnerConfig`]: Glyph cycle, frame delay, and stop timeout
//! - [`ShutdownConfig`]: What happens to the spinner once the result is ready

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, FibonacciError};

/// Top-level demo configuration.
///
/// It can be loaded from a TOML file (see [`crate::config_file`]) and then
/// overridden field by field from the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DemoConfig {
    /// Fibonacci computation settings.
    #[serde(default)]
    pub fibonacci: FibonacciConfig,

    /// Spinner animation settings.
    #[serde(default)]
    pub spinner: SpinnerConfig,

    /// Spinner shutdown settings.
    #[serde(default)]
    pub shutdown: ShutdownConfig,
}

impl DemoConfig {
    /// Check the configuration for values that cannot be run.
    pub fn validate(&self) -> Result<(), DemoError> {
        FibonacciError::check(self.fibonacci.index)?;

        if self.spinner.enabled {
            if self.spinner.glyphs.is_empty() {
                return Err(DemoError::invalid_config("spinner.glyphs must not be empty"));
            }
            if self.spinner.delay_ms == 0 {
                return Err(DemoError::invalid_config(
                    "spinner.delay_ms must be greater than zero",
                ));
            }
            if self.shutdown.mode == ShutdownMode::Stop && self.spinner.stop_timeout_ms == 0 {
                return Err(DemoError::invalid_config(
                    "spinner.stop_timeout_ms must be greater than zero",
                ));
            }
        }

        Ok(())
    }
}

/// Fibonacci computation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FibonacciConfig {
    /// Position in the sequence to compute.
    ///
    /// Signed so that negative input can be rejected with a descriptive
    /// error instead of failing to parse.
    #[serde(default = "defaults::index")]
    pub index: i64,

    /// Algorithm used for the computation.
    #[serde(default)]
    pub strategy: Strategy,
}

impl Default for FibonacciConfig {
    fn default() -> Self {
        Self {
            index: defaults::index(),
            strategy: Strategy::default(),
        }
    }
}

/// Fibonacci algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Plain double recursion, exponential in the index.
    #[default]
    Recursive,
    /// Single pass keeping the last two values.
    Iterative,
    /// Recursion with a table of already computed values.
    Memoized,
}

impl Strategy {
    /// All strategies, in declaration order.
    pub const ALL: [Strategy; 3] = [Self::Recursive, Self::Iterative, Self::Memoized];

    /// Lowercase name as used in config files and on the command line.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Recursive => "recursive",
            Self::Iterative => "iterative",
            Self::Memoized => "memoized",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|strategy| strategy.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                DemoError::invalid_config(format!(
                    "unknown strategy '{s}' (expected recursive, iterative or memoized)"
                ))
            })
    }
}

/// Spinner animation settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SpinnerConfig {
    /// Run the spinner at all.
    #[serde(default = "defaults::spinner_enabled")]
    pub enabled: bool,

    /// Delay between glyphs in milliseconds.
    #[serde(default = "defaults::delay_ms")]
    pub delay_ms: u64,

    /// Glyphs cycled by the spinner, one per character.
    #[serde(default = "defaults::glyphs")]
    pub glyphs: String,

    /// How long to wait for the spinner to acknowledge a stop signal.
    #[serde(default = "defaults::stop_timeout_ms")]
    pub stop_timeout_ms: u64,
}

impl Default for SpinnerConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::spinner_enabled(),
            delay_ms: defaults::delay_ms(),
            glyphs: defaults::glyphs(),
            stop_timeout_ms: defaults::stop_timeout_ms(),
        }
    }
}

impl SpinnerConfig {
    /// Get the frame delay as a `Duration`.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }

    /// Get the stop timeout as a `Duration`.
    pub fn stop_timeout(&self) -> Duration {
        Duration::from_millis(self.stop_timeout_ms)
    }

    /// The glyphs as individual characters.
    pub fn glyph_chars(&self) -> Vec<char> {
        self.glyphs.chars().collect()
    }
}

/// Spinner shutdown settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ShutdownConfig {
    /// What to do with the spinner when the result is ready.
    #[serde(default)]
    pub mode: ShutdownMode,
}

/// What happens to a running spinner once the computation finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShutdownMode {
    /// Signal the spinner and wait for it to finish.
    #[default]
    Stop,
    /// Leave the spinner running until the process exits.
    Abandon,
}

impl FromStr for ShutdownMode {
    type Err = DemoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stop" => Ok(Self::Stop),
            "abandon" => Ok(Self::Abandon),
            other => Err(DemoError::invalid_config(format!(
                "unknown shutdown mode '{other}' (expected stop or abandon)"
            ))),
        }
    }
}

/// Default value functions for serde.
mod defaults {
    pub const fn index() -> i64 {
        45
    }

    pub const fn spinner_enabled() -> bool {
        true
    }

    pub const fn delay_ms() -> u64 {
        100
    }

    pub fn glyphs() -> String {
        r"-\|/".to_string()
    }

    pub const fn stop_timeout_ms() -> u64 {
        250
    }
}
