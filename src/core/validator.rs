// Copyright 2025 Eric Jingryd (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Layout validation
//!
//! Inspects a parsed `Config` and reports problems as data. Checks run in a
//! fixed order so the diagnostic list is reproducible:
//!
//! 1. **Duplicate chord** (Error): two records with the same key set
//! 2. **Duplicate output** (Warning): one output bound to distinct key sets
//! 3. **Unreachable key** (Warning): a key no chord on its hand uses
//! 4. **Hand balance** (Warning): one hand has chords, the other has none
//!
//! `check_strict` appends a fifth check required by the QMK keymap export:
//! every physical key needs exactly one single-key chord.
//!
//! The validator never mutates the layout. Only Error-level diagnostics
//! should block an export.
//!
//! # Example
//! ```
//! use chord_layout::core::{parser::parse_config, validator::check};
//!
//! let config = parse_config("LPR a\nLRP b\n")?;
//! let report = check(&config);
//!
//! assert!(report.has_errors());
//! # Ok::<(), chord_layout::core::parser::ParseError>(())
//! ```

use serde::Serialize;
use std::{collections::HashMap, fmt};

use crate::core::{
    layout::Config,
    types::{ChordKeySet, FingerRole, Hand, KeyId},
};

/// Diagnostic severity level
///
/// - **Error**: The layout is ambiguous; do not export it
/// - **Warning**: Advisory only
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Which check produced a diagnostic
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub enum DiagnosticKind {
    DuplicateChord,
    DuplicateOutput,
    UnreachableKey,
    HandImbalance,
    UnmappedKey,
}

/// A single problem found in a layout
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    /// Human-readable description
    pub message: String,
    /// 1-based source lines involved, ascending
    pub lines: Vec<usize>,
    /// The chord involved, if any
    #[serde(skip_serializing_if = "Option::is_none", serialize_with = "serialize_display")]
    pub chord: Option<ChordKeySet>,
    /// The physical key involved, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<KeyId>,
}

fn serialize_display<S>(chord: &Option<ChordKeySet>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    match chord {
        Some(chord) => serializer.collect_str(chord),
        None => serializer.serialize_none(),
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.severity, self.message)
    }
}

/// Ordered result of one validation run
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationReport {
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if nothing was reported.
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// True if any Error-level diagnostic is present.
    pub fn has_errors(&self) -> bool {
        self.errors().next().is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

impl IntoIterator for ValidationReport {
    type Item = Diagnostic;
    type IntoIter = std::vec::IntoIter<Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.into_iter()
    }
}

/// Runs all layout checks in order.
pub fn check(config: &Config) -> ValidationReport {
    let mut report = ValidationReport::new();

    check_duplicate_chords(config, &mut report);
    check_duplicate_outputs(config, &mut report);
    check_unreachable_keys(config, &mut report);
    check_hand_balance(config, &mut report);

    tracing::debug!(
        errors = report.errors().count(),
        warnings = report.warnings().count(),
        "checked chord layout"
    );

    report
}

/// Runs `check` plus the single-key coverage check needed by firmware export.
pub fn check_strict(config: &Config) -> ValidationReport {
    let mut report = check(config);
    check_unmapped_keys(config, &mut report);
    report
}

/// Error per pair of records sharing a key set.
///
/// Pairs are emitted in ascending `(earlier, later)` order; the message
/// always names the first record of the key set as the one that wins.
fn check_duplicate_chords(config: &Config, report: &mut ValidationReport) {
    let chords = config.chords();

    for collision in config.index().find_collisions() {
        let winner = chords[collision.records[0]].line;

        for (i, &earlier) in collision.records.iter().enumerate() {
            for &later in &collision.records[i + 1..] {
                let (a, b) = (&chords[earlier], &chords[later]);
                report.push(Diagnostic {
                    severity: Severity::Error,
                    kind: DiagnosticKind::DuplicateChord,
                    message: format!(
                        "Duplicate chord {}: line {} ({}) and line {} ({}); line {} wins",
                        collision.keys, a.line, a.output, b.line, b.output, winner,
                    ),
                    lines: vec![a.line, b.line],
                    chord: Some(collision.keys),
                    key: None,
                });
            }
        }
    }
}

/// Warning per output bound to two or more distinct key sets.
fn check_duplicate_outputs(config: &Config, report: &mut ValidationReport) {
    // output -> distinct key sets with the first line using each, in first-seen order
    let mut order: Vec<&str> = Vec::new();
    let mut by_output: HashMap<&str, Vec<(ChordKeySet, usize)>> = HashMap::new();

    for chord in config.chords() {
        let entry = by_output.entry(chord.output.as_str()).or_insert_with(|| {
            order.push(chord.output.as_str());
            Vec::new()
        });
        if !entry.iter().any(|(keys, _)| *keys == chord.keys) {
            entry.push((chord.keys, chord.line));
        }
    }

    for output in order {
        let Some(sets) = by_output.get(output) else {
            continue;
        };
        if sets.len() < 2 {
            continue;
        }

        let chords = sets
            .iter()
            .map(|(keys, line)| format!("{} (line {})", keys, line))
            .collect::<Vec<_>>()
            .join(", ");

        report.push(Diagnostic {
            severity: Severity::Warning,
            kind: DiagnosticKind::DuplicateOutput,
            message: format!("Output '{}' is produced by {} chords: {}", output, sets.len(), chords),
            lines: sets.iter().map(|(_, line)| *line).collect(),
            chord: None,
            key: None,
        });
    }
}

/// Warning per key never used by a chord on its hand.
fn check_unreachable_keys(config: &Config, report: &mut ValidationReport) {
    for hand in Hand::ALL {
        let mut used = [false; FingerRole::COUNT];

        for chord in config.chords().iter().filter(|c| c.keys.hand() == hand) {
            for role in chord.keys.roles() {
                used[role.index()] = true;
            }
        }

        for role in FingerRole::ALL {
            if used[role.index()] {
                continue;
            }
            let key = KeyId::new(hand, role);
            report.push(Diagnostic {
                severity: Severity::Warning,
                kind: DiagnosticKind::UnreachableKey,
                message: format!("Key {} is never used by any {} hand chord", key, hand),
                lines: Vec::new(),
                chord: None,
                key: Some(key),
            });
        }
    }
}

/// Warning when exactly one hand has no chords.
fn check_hand_balance(config: &Config, report: &mut ValidationReport) {
    let mut counts = [0usize; 2];
    for chord in config.chords() {
        counts[chord.keys.hand().index()] += 1;
    }

    for hand in Hand::ALL {
        let other = hand.opposite();
        if counts[hand.index()] == 0 && counts[other.index()] > 0 {
            report.push(Diagnostic {
                severity: Severity::Warning,
                kind: DiagnosticKind::HandImbalance,
                message: format!(
                    "The {} hand has no chords while the {} hand has {}; layout looks incomplete",
                    hand,
                    other,
                    counts[other.index()],
                ),
                lines: Vec::new(),
                chord: None,
                key: None,
            });
        }
    }
}

/// Error per physical key without a single-key chord.
fn check_unmapped_keys(config: &Config, report: &mut ValidationReport) {
    for key in KeyId::ALL {
        if config.lookup(&ChordKeySet::single(key)).is_none() {
            report.push(Diagnostic {
                severity: Severity::Error,
                kind: DiagnosticKind::UnmappedKey,
                message: format!("Key {} has no single-key chord (needed for the base keymap)", key),
                lines: Vec::new(),
                chord: Some(ChordKeySet::single(key)),
                key: Some(key),
            });
        }
    }
}
