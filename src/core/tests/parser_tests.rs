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

//! Parser module tests
//!
//! Tests for parsing chord layout text:
//! - Chord token parsing (hand marker + role letters)
//! - Single line parsing and every error variant
//! - Full layout parsing (comments, blank lines, authored order)
//! - Canonical re-rendering

use crate::core::{
    parser::*,
    types::{ChordKeySet, FingerRole, Hand, KeyId},
    Config,
};

#[test]
fn test_parse_chord_token() {
    let (rest, (hand, roles)) = parse_chord_token("LPR").unwrap();
    assert_eq!(rest, "");
    assert_eq!(hand, Hand::Left);
    assert_eq!(roles, vec![FingerRole::Pinkie, FingerRole::Ring]);

    // Stops at the first non-role letter
    let (rest, (_, roles)) = parse_chord_token("RIX").unwrap();
    assert_eq!(rest, "X");
    assert_eq!(roles, vec![FingerRole::Index]);

    assert!(parse_chord_token("XP").is_err());
}

#[test]
fn test_parse_thumb_roles() {
    // "LL" is the left thumb-left key, not two hand markers
    let (_, (hand, roles)) = parse_chord_token("LLUD").unwrap();
    assert_eq!(hand, Hand::Left);
    assert_eq!(
        roles,
        vec![FingerRole::ThumbLeft, FingerRole::ThumbUp, FingerRole::ThumbDown]
    );
}

#[test]
fn test_parse_chord_line() {
    let chord = parse_chord_line(3, "LPR e").unwrap();
    assert_eq!(chord.line, 3);
    assert_eq!(chord.output, "e");
    assert_eq!(
        chord.keys,
        ChordKeySet::from_roles(Hand::Left, [FingerRole::Pinkie, FingerRole::Ring]).unwrap()
    );
}

#[test]
fn test_spaced_and_compact_forms_agree() {
    let compact = parse_chord_line(1, "RMI x").unwrap();
    let spaced = parse_chord_line(1, "RM RI x").unwrap();
    assert_eq!(compact.keys, spaced.keys);
}

#[test]
fn test_output_is_verbatim() {
    let chord = parse_chord_line(1, "lp KC_ESC").unwrap();
    assert_eq!(chord.output, "KC_ESC");

    // The output token may itself look like a chord
    let chord = parse_chord_line(1, "RP LP").unwrap();
    assert_eq!(chord.output, "LP");
    assert_eq!(chord.keys.hand(), Hand::Right);
}

#[test]
fn test_duplicate_finger() {
    let err = parse_chord_line(2, "LPP a").unwrap_err();
    assert_eq!(
        err,
        ParseError::DuplicateFinger {
            line: 2,
            key: KeyId::new(Hand::Left, FingerRole::Pinkie),
            raw: "LPP a".to_string(),
        }
    );
    assert!(err.to_string().contains("duplicate finger in chord"));

    // Also across tokens
    assert!(matches!(
        parse_chord_line(1, "LP LRP a"),
        Err(ParseError::DuplicateFinger { .. })
    ));
}

#[test]
fn test_empty_chord() {
    let err = parse_chord_line(4, "L a").unwrap_err();
    assert!(matches!(err, ParseError::EmptyChord { line: 4, .. }));
    assert!(err.to_string().contains("empty chord"));
}

#[test]
fn test_mixed_hands_rejected() {
    let err = parse_chord_line(1, "LP RI a").unwrap_err();
    assert!(matches!(err, ParseError::MixedHands { line: 1, .. }));
}

#[test]
fn test_unrecognized_token() {
    let err = parse_chord_line(7, "LPX a").unwrap_err();
    assert_eq!(
        err,
        ParseError::UnrecognizedToken {
            line: 7,
            token: "LPX".to_string(),
            raw: "LPX a".to_string(),
        }
    );

    assert!(matches!(
        parse_chord_line(1, "hello world"),
        Err(ParseError::UnrecognizedToken { .. })
    ));
}

#[test]
fn test_missing_output() {
    let err = parse_chord_line(5, "LPR").unwrap_err();
    assert!(matches!(err, ParseError::MissingOutput { line: 5, .. }));
    assert_eq!(err.line(), 5);
}

#[test]
fn test_parse_config() {
    let content = r#"
# Left hand vowels
LP a
LPR e

  # indented comment
RI   t
"#;
    let config = parse_config(content).unwrap();
    assert_eq!(config.len(), 3);

    let outputs: Vec<&str> = config.chords().iter().map(|c| c.output.as_str()).collect();
    assert_eq!(outputs, vec!["a", "e", "t"]);

    let lines: Vec<usize> = config.chords().iter().map(|c| c.line).collect();
    assert_eq!(lines, vec![3, 4, 7]);
}

#[test]
fn test_parse_config_reports_line_number() {
    let err = parse_config("LP a\n\nLQ b\n").unwrap_err();
    assert_eq!(err.line(), 3);
}

#[test]
fn test_parse_keeps_duplicates_for_validator() {
    // Cross-line problems are not parse errors
    let config = parse_config("LPR a\nLRP b").unwrap();
    assert_eq!(config.len(), 2);
}

#[test]
fn test_empty_input() {
    let config = parse_config("\n# only comments\n").unwrap();
    assert!(config.is_empty());
}

#[test]
fn test_from_str_and_display() {
    let config: Config = "LRP a\nRDI  b\n".parse().unwrap();
    assert_eq!(format!("{}", config), "LPR a\nRID b");

    // Display output parses back to the same chords
    let again: Config = config.to_string().parse().unwrap();
    let pairs = |c: &Config| {
        c.chords()
            .iter()
            .map(|d| (d.keys, d.output.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(pairs(&config), pairs(&again));
}
