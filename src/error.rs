//! Error types shared by the analyzer, generators and capture store.
//!
//! Most failures in this crate are deliberately *not* errors: a missing route is
//! `Ok(None)`, a failing route inside a batch is logged and skipped, and a
//! misbehaving page driver is replaced by placeholder values. What remains here
//! are the failures a caller has to see: filesystem writes the crate owns,
//! template rendering, and configuration parsing.

use std::io;
use std::path::{Path, PathBuf};

/// Main error type for route_tester
#[derive(Debug, thiserror::Error)]
pub enum TesterError {
    /// Reading or writing a file or directory failed
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path being read or written
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },

    /// An askama file skeleton failed to render
    #[error("template rendering failed: {0}")]
    Render(#[from] askama::Error),

    /// A bucket section referenced an unknown variable or had bad syntax
    #[error("section interpolation failed: {0}")]
    Section(#[from] minijinja::Error),

    /// A route dump could not be parsed
    #[error("failed to load routes from {path}: {message}")]
    RouteSource {
        /// Route dump location
        path: PathBuf,
        /// Parser message
        message: String,
    },

    /// Configuration file or environment override is invalid
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Capture metadata could not be serialized
    #[error("metadata serialization failed: {0}")]
    Metadata(#[from] serde_json::Error),
}

impl TesterError {
    /// Attach the offending path to an I/O error
    pub fn io(path: impl AsRef<Path>, source: io::Error) -> Self {
        TesterError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = TesterError> = std::result::Result<T, E>;
