//! Configuration file loading for spinfib.
//!
//! A configuration file is the TOML form of [`DemoConfig`]. Every section
//! and field is optional and falls back to its default.
//!
//! # Example
//!
//! ```toml
//! [fibonacci]
//! index = 45
//! strategy = "recursive"
//!
//! [spinner]
//! enabled = true
//! delay_ms = 100
//! glyphs = "-\\|/"
//! stop_timeout_ms = 250
//!
//! [shutdown]
//! mode = "stop"
//! ```

use std::path::Path;

use tracing::debug;

use crate::DemoConfig;

impl DemoConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigFileError> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading config file");

        let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Io {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string cannot be parsed as TOML.
    pub fn from_toml(content: &str) -> Result<Self, ConfigFileError> {
        toml::from_str(content).map_err(|e| ConfigFileError::Parse {
            message: e.to_string(),
        })
    }
}

/// Configuration file errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    /// Failed to read configuration file.
    #[error("Failed to read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("Failed to parse config file: {message}")]
    Parse { message: String },
}
