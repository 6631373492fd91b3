//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

use crate::imaging::ImagingError;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A boolean variable held something other than true/false/1/0/yes/no/on/off.
    #[error("invalid boolean for {name}: '{value}'")]
    InvalidBool { name: &'static str, value: String },

    /// Matting settings (the tolerance override) were rejected.
    #[error("invalid matting settings: {0}")]
    Matting(#[from] ImagingError),

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
