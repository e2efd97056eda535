//! Export of chord layouts for downstream tooling
//!
//! Export is a projection, not a gate: every `Config` can be exported,
//! including one that fails validation. Run `core::validator::check`
//! first before trusting the output on a device.
//!
//! Formats:
//! - **json**: `InterchangeDocument`, the canonical interchange form
//! - **keychordz**: `Chord::new(...)` table for the keychordz firmware
//! - **keymap**: QMK `LAYOUT_keychordz(...)` base layer
//! - **combos**: QMK combo arrays for multi-key chords
//!
//! All renderings are deterministic: the same layout always produces
//! byte-identical output.

pub mod firmware;
pub mod interchange;

use thiserror::Error;

use crate::core::{Config, KeyId};

pub use firmware::{to_keychordz, to_keymap, to_qmk_combos};
pub use interchange::{export, ExportedChord, InterchangeDocument};

/// Errors raised while rendering or importing an export
#[derive(Debug, Error)]
pub enum ExportError {
    /// A physical key has no single-key chord to use as its base keycode
    #[error("Key {0} is not mapped by a single-key chord")]
    UnmappedKey(KeyId),

    /// A physical key has more than one single-key chord
    #[error("Key {key} is already mapped to '{first}' (also mapped to '{second}')")]
    DuplicateBase {
        key: KeyId,
        first: String,
        second: String,
    },

    /// An imported record is not a valid chord
    #[error("Invalid chord record #{index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    /// JSON (de)serialisation failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Output format selector
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum ExportFormat {
    /// Interchange document as pretty-printed JSON
    #[default]
    Json,
    /// keychordz firmware chord table
    Keychordz,
    /// QMK base-layer keymap
    Keymap,
    /// QMK combo definitions
    Combos,
}

impl ExportFormat {
    /// Renders `config` in this format.
    pub fn render(self, config: &Config) -> Result<String, ExportError> {
        match self {
            ExportFormat::Json => export(config).to_json(),
            ExportFormat::Keychordz => Ok(to_keychordz(config)),
            ExportFormat::Keymap => to_keymap(config),
            ExportFormat::Combos => to_qmk_combos(config),
        }
    }
}
