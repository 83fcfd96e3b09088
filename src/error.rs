//! Error taxonomy for ContextForge
//!
//! File-level problems never show up here: they are reported on the diagnostics
//! channel and only skip the affected file. These variants are either fatal for a
//! single root (`PathNotFound`, `Walk`, `IgnoreFile`, `CloneFailure`) or fatal for the whole
//! invocation before any traversal starts (`InvalidCriteria`, `Config`).

use std::path::PathBuf;
use thiserror::Error;

/// Exit status for a fully successful run
pub const EXIT_SUCCESS: i32 = 0;
/// Exit status when at least one root (or the output sink) failed
pub const EXIT_PARTIAL_FAILURE: i32 = 1;
/// Exit status for validation and configuration errors
pub const EXIT_CONFIG_ERROR: i32 = 2;

#[derive(Debug, Error)]
pub enum ForgeError {
    /// The root path does not exist
    #[error("Error processing {}: No such file or directory", .0.display())]
    PathNotFound(PathBuf),

    /// An I/O or permission error while walking a root
    #[error("Error processing {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The root's `.gitignore` exists but could not be read
    #[error("Error processing {}: {source}", path.display())]
    IgnoreFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed filter criteria (regex, glob, date) or conflicting options
    #[error("{0}")]
    InvalidCriteria(String),

    /// Configuration could not be loaded or extracted
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote repository acquisition failed
    #[error("Failed to clone repository '{url}': {reason}")]
    CloneFailure { url: String, reason: String },

    /// The output sink could not be written
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl ForgeError {
    /// Errors that are raised before any traversal begins
    pub fn is_config_error(&self) -> bool {
        matches!(self, ForgeError::InvalidCriteria(_) | ForgeError::Config(_))
    }

    pub fn exit_code(&self) -> i32 {
        if self.is_config_error() {
            EXIT_CONFIG_ERROR
        } else {
            EXIT_PARTIAL_FAILURE
        }
    }
}
