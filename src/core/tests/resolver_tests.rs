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

//! Resolver module tests
//!
//! Tests for next-key preview:
//! - Empty pressed set
//! - Extending a held chord
//! - Opposite-hand keys
//! - Mixed-hand input rejection
//! - Earliest record wins for duplicates

use crate::core::{
    parser::parse_config,
    resolver::{current_output, resolve, ResolverInputError},
    FingerRole, Hand, KeyId,
};

const NOTHING: [KeyId; 0] = [];

fn key(name: &str) -> KeyId {
    name.parse().unwrap()
}

#[test]
fn test_empty_pressed_set() {
    let config = parse_config("LP x").unwrap();
    let preview = resolve(&config, NOTHING).unwrap();

    for (slot, output) in preview.iter().enumerate() {
        if slot == key("LP").index() {
            assert_eq!(*output, Some("x"));
        } else {
            assert_eq!(*output, None, "slot {} should be empty", slot);
        }
    }
}

#[test]
fn test_extends_held_chord() {
    let config = parse_config("LPR y").unwrap();
    let preview = resolve(&config, [key("LP")]).unwrap();

    assert_eq!(preview[key("LR").index()], Some("y"));
    assert_eq!(preview[key("LP").index()], None, "already pressed");

    for right in KeyId::ALL.iter().filter(|k| k.hand == Hand::Right) {
        assert_eq!(preview[right.index()], None);
    }
}

#[test]
fn test_exact_match_only() {
    // LPRM needs two more keys from {LP}; nothing completes in one press
    let config = parse_config("LPRM z").unwrap();
    let preview = resolve(&config, [key("LP")]).unwrap();

    assert!(preview.iter().all(Option::is_none));
}

#[test]
fn test_opposite_hand_resolves_alone() {
    let config = parse_config("LPR y\nRI t\nRIM u\n").unwrap();
    let preview = resolve(&config, [key("LP")]).unwrap();

    // Right keys are tried as single-key chords, never joined with LP
    assert_eq!(preview[key("RI").index()], Some("t"));
    assert_eq!(preview[key("RM").index()], None);
}

#[test]
fn test_mixed_hands_is_error() {
    let config = parse_config("LP x").unwrap();
    let result = resolve(&config, [key("LP"), key("RI")]);

    assert_eq!(
        result,
        Err(ResolverInputError::MixedHands {
            left: key("LP"),
            right: key("RI"),
        })
    );
}

#[test]
fn test_earliest_record_wins() {
    let config = parse_config("RPR first\nRRP second\n").unwrap();
    let preview = resolve(&config, [key("RP")]).unwrap();

    assert_eq!(preview[key("RR").index()], Some("first"));
}

#[test]
fn test_repeated_pressed_keys_are_a_set() {
    let config = parse_config("LPR y").unwrap();
    let preview = resolve(&config, [key("LP"), key("LP")]).unwrap();

    assert_eq!(preview[key("LR").index()], Some("y"));
}

#[test]
fn test_thumb_and_finger_combine() {
    let config = parse_config("LIU space").unwrap();
    let preview = resolve(&config, [KeyId::new(Hand::Left, FingerRole::ThumbUp)]).unwrap();

    assert_eq!(preview[key("LI").index()], Some("space"));
}

#[test]
fn test_current_output() {
    let config = parse_config("LP x\nLPR y\n").unwrap();

    assert_eq!(current_output(&config, NOTHING).unwrap(), None);
    assert_eq!(current_output(&config, [key("LP")]).unwrap(), Some("x"));
    assert_eq!(current_output(&config, [key("LR"), key("LP")]).unwrap(), Some("y"));
    assert_eq!(current_output(&config, [key("LM")]).unwrap(), None);
    assert!(current_output(&config, [key("LM"), key("RM")]).is_err());
}
