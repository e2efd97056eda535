//! Interchange document
//!
//! The semantic projection of a layout: one record per chord in authored
//! order, each carrying the hand, the member roles in canonical order, the
//! output and the firmware mask. Only `Vec`s are used, never maps, so the
//! serialised form is stable.

use serde::{Deserialize, Serialize};

use crate::{
    core::{ChordDefinition, ChordKeySet, Config, FingerRole, Hand},
    export::ExportError,
};

/// Format tag written into every document.
pub const FORMAT_NAME: &str = "keychordz";

/// Current document version.
pub const FORMAT_VERSION: u32 = 1;

/// Serialisable projection of a layout
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct InterchangeDocument {
    pub format: String,
    pub version: u32,
    pub chords: Vec<ExportedChord>,
}

/// One exported chord
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct ExportedChord {
    pub hand: Hand,
    /// Member roles, canonical order
    pub fingers: Vec<FingerRole>,
    pub output: String,
    /// 16-bit firmware chord word
    pub mask: u16,
}

impl From<&ChordDefinition> for ExportedChord {
    fn from(chord: &ChordDefinition) -> Self {
        Self {
            hand: chord.keys.hand(),
            fingers: chord.keys.roles().collect(),
            output: chord.output.clone(),
            mask: chord.keys.firmware_mask(),
        }
    }
}

/// Projects `config` into an interchange document.
pub fn export(config: &Config) -> InterchangeDocument {
    InterchangeDocument {
        format: FORMAT_NAME.to_string(),
        version: FORMAT_VERSION,
        chords: config.chords().iter().map(ExportedChord::from).collect(),
    }
}

impl InterchangeDocument {
    /// Pretty-printed JSON with a trailing newline.
    pub fn to_json(&self) -> Result<String, ExportError> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    pub fn from_json(json: &str) -> Result<Self, ExportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Rebuilds a layout from the document.
    ///
    /// Records keep their order; line numbers are the 1-based record
    /// positions. The `mask` field is informational and not consulted.
    pub fn into_config(self) -> Result<Config, ExportError> {
        let chords = self
            .chords
            .into_iter()
            .enumerate()
            .map(|(index, chord)| {
                if chord.output.is_empty() || chord.output.chars().any(char::is_whitespace) {
                    return Err(ExportError::InvalidRecord {
                        index,
                        reason: format!("output '{}' must be a single non-empty token", chord.output),
                    });
                }

                let keys = ChordKeySet::from_roles(chord.hand, chord.fingers).ok_or_else(|| {
                    ExportError::InvalidRecord {
                        index,
                        reason: "chord has no fingers".to_string(),
                    }
                })?;

                Ok(ChordDefinition {
                    keys,
                    output: chord.output,
                    line: index + 1,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Config::new(chords))
    }
}
