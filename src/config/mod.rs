//! Layout file handling and the live layout session.
//!
//! This module is the boundary between the pure chord engine and the
//! filesystem. Key features:
//!
//! - **Loading**: UTF-8 layout files, optional byte-order mark stripped
//! - **Atomic swap**: `LayoutSession` replaces the whole `Config` at once
//! - **Atomic writes**: exports go through temp-file-then-rename
//!
//! # Example
//!
//! ```no_run
//! use chord_layout::config::LayoutSession;
//! use chord_layout::core::{resolve, KeyId};
//!
//! let session = LayoutSession::open("layout.cfg")?;
//!
//! // Readers take a snapshot; a later reload never changes it
//! let config = session.snapshot();
//! let preview = resolve(&config, ["LP".parse::<KeyId>()?])?;
//!
//! // Re-read the file after it changed on disk
//! session.reload_from_source()?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;

pub use error::LayoutError;

use atomic_write_file::AtomicWriteFile;
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use crate::core::{parse_config, Config, ParseError};

/// Byte-order mark some editors prepend to UTF-8 files.
const UTF8_BOM: char = '\u{feff}';

/// Expands a leading `~` in `path`.
pub fn expand_path(path: &Path) -> Result<PathBuf, LayoutError> {
    let raw = path
        .to_str()
        .ok_or_else(|| LayoutError::InvalidPathEncoding(path.to_path_buf()))?;
    Ok(PathBuf::from(shellexpand::tilde(raw).as_ref()))
}

/// Reads layout text from disk, stripping a UTF-8 byte-order mark.
pub fn read_layout(path: &Path) -> Result<String, LayoutError> {
    if !path.exists() {
        return Err(LayoutError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    Ok(match content.strip_prefix(UTF8_BOM) {
        Some(stripped) => stripped.to_string(),
        None => content,
    })
}

/// Reads and parses a layout file.
pub fn load_layout(path: &Path) -> Result<Config, LayoutError> {
    let content = read_layout(path)?;
    Ok(parse_config(&content)?)
}

/// Writes `contents` to `path` atomically.
///
/// Readers of `path` see either the old file or the complete new one.
pub fn write_atomic(path: &Path, contents: &str) -> Result<(), LayoutError> {
    let mut file = AtomicWriteFile::options()
        .open(path)
        .map_err(|e| LayoutError::WriteFailed(format!("Failed to open for atomic write: {}", e)))?;

    file.write_all(contents.as_bytes())
        .map_err(|e| LayoutError::WriteFailed(format!("Failed to write content: {}", e)))?;

    file.commit()
        .map_err(|e| LayoutError::WriteFailed(format!("Failed to commit atomic write: {}", e)))?;

    Ok(())
}

/// The active layout of an editing session
///
/// Holds the current `Config` behind an `Arc`. Reloading parses the new
/// text first and then swaps the `Arc` in one step, so a reader sees either
/// the old layout or the new one, never a mix. A failed reload keeps the
/// previous layout active.
#[derive(Debug)]
pub struct LayoutSession {
    active: RwLock<Arc<Config>>,
    source: Option<PathBuf>,
}

impl LayoutSession {
    /// Starts a session with an already parsed layout.
    pub fn new(config: Config) -> Self {
        Self {
            active: RwLock::new(Arc::new(config)),
            source: None,
        }
    }

    /// Starts a session from layout text.
    pub fn from_text(text: &str) -> Result<Self, ParseError> {
        Ok(Self::new(parse_config(text)?))
    }

    /// Starts a session from a layout file; `reload_from_source` re-reads it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let config = load_layout(path)?;

        tracing::info!(path = %path.display(), records = config.len(), "opened layout");

        Ok(Self {
            active: RwLock::new(Arc::new(config)),
            source: Some(path.to_path_buf()),
        })
    }

    /// The file this session was opened from, if any.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// The current layout.
    ///
    /// The returned `Arc` stays valid and unchanged across later reloads.
    pub fn snapshot(&self) -> Arc<Config> {
        // A poisoned lock still holds a complete Arc; swaps never leave it half-written
        let guard = self.active.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Parses `text` and, on success, makes it the active layout.
    pub fn reload(&self, text: &str) -> Result<Arc<Config>, ParseError> {
        let config = parse_config(text).inspect_err(|e| {
            tracing::warn!(line = e.line(), "layout reload failed; keeping previous layout");
        })?;
        Ok(self.swap(config))
    }

    /// Re-reads the source file and swaps it in on success.
    pub fn reload_from_source(&self) -> Result<Arc<Config>, LayoutError> {
        let path = self.source.as_deref().ok_or(LayoutError::NoSource)?;
        let text = read_layout(path)?;
        Ok(self.reload(&text)?)
    }

    fn swap(&self, config: Config) -> Arc<Config> {
        let config = Arc::new(config);
        let mut guard = self.active.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::clone(&config);

        tracing::info!(records = config.len(), "swapped active layout");
        config
    }
}

#[cfg(test)]
mod tests;
