//! Chord collision detection
//!
//! This module indexes chord records by their key set. When multiple
//! records use the same set of keys (regardless of the letter order they
//! were written in), they are flagged as a collision.
//!
//! # Performance
//! - Add record: O(1) average case
//! - Look up a key set: O(1) average case
//! - List all collisions: O(n) where n = number of distinct key sets
//!
//! With at most 127 chords per hand the index never holds more than 254
//! distinct keys.

use std::collections::HashMap;

use crate::core::types::ChordKeySet;

/// Indexes chord records by key set using a HashMap.
///
/// Values are record positions in authored order. A collision exists when
/// any position list has length > 1; the first position is authoritative.
#[derive(Clone, Debug, Default)]
pub struct ChordIndex {
    records: HashMap<ChordKeySet, Vec<usize>>,
}

/// A key set claimed by more than one record.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChordCollision {
    /// The key set that collides
    pub keys: ChordKeySet,

    /// Record positions using this key set, ascending (always 2 or more)
    pub records: Vec<usize>,
}

impl ChordIndex {
    /// Creates a new empty index.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Registers record `position` under `keys`.
    ///
    /// Positions must be added in ascending order so the first entry stays
    /// the earliest-declared record.
    pub fn add(&mut self, keys: ChordKeySet, position: usize) {
        self.records.entry(keys).or_default().push(position);
    }

    /// Position of the earliest record using `keys`.
    pub fn first(&self, keys: &ChordKeySet) -> Option<usize> {
        self.records.get(keys).and_then(|positions| positions.first().copied())
    }

    /// All collisions, ordered by the position of their first record.
    pub fn find_collisions(&self) -> Vec<ChordCollision> {
        let mut collisions: Vec<ChordCollision> = self
            .records
            .iter()
            .filter(|(_, positions)| positions.len() > 1)
            .map(|(keys, positions)| ChordCollision {
                keys: *keys,
                records: positions.clone(),
            })
            .collect();

        collisions.sort_by_key(|c| c.records[0]);
        collisions
    }

    /// Returns true if `keys` is used by 2 or more records.
    pub fn has_collision(&self, keys: &ChordKeySet) -> bool {
        self.records
            .get(keys)
            .map(|positions| positions.len() > 1)
            .unwrap_or(false)
    }

    /// Number of distinct key sets.
    pub fn distinct_chords(&self) -> usize {
        self.records.len()
    }
}
