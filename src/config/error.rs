use std::path::PathBuf;
use thiserror::Error;

use crate::core::ParseError;

/// Errors that can occur while loading or writing layout files.
#[derive(Debug, Error)]
pub enum LayoutError {
    /// Layout file does not exist.
    #[error("Layout file not found: {0}")]
    NotFound(PathBuf),
    /// Path is not valid UTF-8 and cannot be tilde-expanded.
    #[error("Invalid path encoding: {0}")]
    InvalidPathEncoding(PathBuf),
    /// Layout text failed to parse.
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// The session has no file to reload from.
    #[error("Session was not loaded from a file")]
    NoSource,
    /// Atomic write operation failed.
    #[error("Atomic write failed: {0}")]
    WriteFailed(String),
    /// Generic I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
