//! src/core/layout.rs
//!
//! The parsed layout: an ordered list of chord records plus a key-set
//! index over them. A `Config` is never edited in place; to change a
//! layout, re-parse its text and replace the whole value.

use std::{fmt, str::FromStr};

use crate::core::{
    conflict::ChordIndex,
    parser::{parse_config, ParseError},
    types::{ChordDefinition, ChordKeySet},
};

/// A complete chord layout in authored order
#[derive(Clone, Debug, Default)]
pub struct Config {
    chords: Vec<ChordDefinition>,
    index: ChordIndex,
}

impl Config {
    /// Builds a layout from records, indexing them by key set.
    pub fn new(chords: Vec<ChordDefinition>) -> Self {
        let mut index = ChordIndex::new();
        for (position, chord) in chords.iter().enumerate() {
            index.add(chord.keys, position);
        }
        Self { chords, index }
    }

    /// Records in authored order.
    pub fn chords(&self) -> &[ChordDefinition] {
        &self.chords
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Key-set index over the records.
    pub fn index(&self) -> &ChordIndex {
        &self.index
    }

    /// The earliest record whose key set equals `keys` exactly.
    pub fn lookup(&self, keys: &ChordKeySet) -> Option<&ChordDefinition> {
        self.index.first(keys).and_then(|position| self.chords.get(position))
    }
}

impl FromStr for Config {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_config(s)
    }
}

/// Renders the layout back to text, one chord per line with roles in
/// canonical order. No trailing newline after the last line.
impl fmt::Display for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chord) in self.chords.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", chord)?;
        }
        Ok(())
    }
}
