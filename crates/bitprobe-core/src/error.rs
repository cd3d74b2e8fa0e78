//! Error types for bitprobe.
//!
//! Inspection errors come in exactly two kinds so callers can match on them:
//! the file was not there, or anything else went wrong while reading it.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Top-level error type for bitprobe operations.
#[derive(Error, Debug)]
pub enum BitprobeError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Inspection errors, rendered without a prefix
    #[error(transparent)]
    Inspect(#[from] InspectError),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file from disk
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    /// Failed to parse TOML configuration
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Configuration values are invalid
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Errors raised while opening or querying an image.
#[derive(Error, Debug)]
pub enum InspectError {
    /// The path does not resolve to a file
    #[error("The file '{}' was not found.", .0.display())]
    NotFound(PathBuf),

    /// Any other failure: permissions, unknown container, corrupt header
    #[error("{message}")]
    Inspection { path: PathBuf, message: String },
}

impl InspectError {
    /// Build an `Inspection` error for `path`.
    pub fn inspection(path: &Path, message: impl Into<String>) -> Self {
        Self::Inspection {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    /// Classify an I/O error raised while touching `path`.
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound(path.to_path_buf()),
            _ => Self::inspection(path, err.to_string()),
        }
    }

    /// The path the failed inspection was pointed at.
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound(path) => path,
            Self::Inspection { path, .. } => path,
        }
    }
}

/// Convenience type alias for bitprobe results.
pub type Result<T> = std::result::Result<T, BitprobeError>;

/// Convenience type alias for inspection results.
pub type InspectResult<T> = std::result::Result<T, InspectError>;
