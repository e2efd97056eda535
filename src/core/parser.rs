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

//! src/core/parser.rs
//!
//! Chord layout parser
//!
//! This module parses layout text into chord records. Each non-empty,
//! non-comment line has the form:
//!
//! ```text
//! <Hand><Role>+ [<Hand><Role>+ ...] <OutputKey>
//! ```
//!
//! - `Hand` is `L` or `R`
//! - `Role` is one of `P R M I L U D` (Pinkie, Ring, Middle, Index,
//!   ThumbLeft, ThumbUp, ThumbDown)
//! - The last whitespace-separated token is the output key, stored verbatim
//! - Lines starting with `#` are comments
//!
//! `LPR a` and `LP LR a` describe the same chord.
//!
//! # Architecture
//! Chord tokens are recognised with nom combinators. The parser only checks
//! each line on its own; cross-line problems such as duplicate chords are
//! reported by validator.rs after parsing.

use nom::{
    character::complete::anychar,
    combinator::map_opt,
    multi::many0,
    IResult, Parser,
};
use thiserror::Error;

use crate::core::{
    layout::Config,
    types::{ChordDefinition, ChordKeySet, FingerRole, Hand, KeyId},
};

/// Prefix marking a comment line.
pub const COMMENT_PREFIX: char = '#';

/// Parse errors with line number context
///
/// Every variant carries the 1-based line number and the raw line text.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ParseError {
    #[error("Parse error on line {line}: duplicate finger in chord ({key} appears twice): '{raw}'")]
    DuplicateFinger { line: usize, key: KeyId, raw: String },

    #[error("Parse error on line {line}: empty chord (hand marker without fingers): '{raw}'")]
    EmptyChord { line: usize, raw: String },

    #[error("Parse error on line {line}: mixed-hand chord (chords use one hand only): '{raw}'")]
    MixedHands { line: usize, raw: String },

    #[error("Parse error on line {line}: unrecognized token '{token}': '{raw}'")]
    UnrecognizedToken {
        line: usize,
        token: String,
        raw: String,
    },

    #[error("Parse error on line {line}: missing output key: '{raw}'")]
    MissingOutput { line: usize, raw: String },
}

impl ParseError {
    /// The 1-based line the error was found on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::DuplicateFinger { line, .. }
            | ParseError::EmptyChord { line, .. }
            | ParseError::MixedHands { line, .. }
            | ParseError::UnrecognizedToken { line, .. }
            | ParseError::MissingOutput { line, .. } => *line,
        }
    }
}

/// Parse a complete layout
///
/// # Arguments
/// * `content` - The full layout text
///
/// # Returns
/// A `Config` holding one record per chord line in authored order, or the
/// first `ParseError` encountered. No partial layout is returned.
///
/// # Example
/// ```
/// use chord_layout::core::parser::parse_config;
///
/// let config = parse_config("# vowels\nLP a\nLPR e\n")?;
/// assert_eq!(config.len(), 2);
/// # Ok::<(), chord_layout::core::parser::ParseError>(())
/// ```
pub fn parse_config(content: &str) -> Result<Config, ParseError> {
    let mut chords = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1; // Human-readable numbers start at 1

        // Skip empty lines and comments
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() || line_trimmed.starts_with(COMMENT_PREFIX) {
            continue;
        }

        chords.push(parse_chord_line(line_num, line_trimmed)?);
    }

    tracing::debug!(records = chords.len(), "parsed chord layout");

    Ok(Config::new(chords))
}

/// Parse a single chord line
///
/// Format: CHORD_TOKEN+ OUTPUT
/// Example: LPR e
pub fn parse_chord_line(line_num: usize, line: &str) -> Result<ChordDefinition, ParseError> {
    let raw = || line.to_string();

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let (output, chord_tokens) = match tokens.split_last() {
        Some((output, chord_tokens)) if !chord_tokens.is_empty() => (*output, chord_tokens),
        _ => {
            return Err(ParseError::MissingOutput {
                line: line_num,
                raw: raw(),
            })
        }
    };

    let mut hand: Option<Hand> = None;
    let mut roles: Vec<FingerRole> = Vec::new();

    for token in chord_tokens {
        let unrecognized = || ParseError::UnrecognizedToken {
            line: line_num,
            token: token.to_string(),
            raw: raw(),
        };

        let (rest, (token_hand, token_roles)) = parse_chord_token(token).map_err(|_| unrecognized())?;
        if !rest.is_empty() {
            return Err(unrecognized());
        }

        if token_roles.is_empty() {
            return Err(ParseError::EmptyChord {
                line: line_num,
                raw: raw(),
            });
        }

        match hand {
            Some(h) if h != token_hand => {
                return Err(ParseError::MixedHands {
                    line: line_num,
                    raw: raw(),
                })
            }
            _ => hand = Some(token_hand),
        }

        for role in token_roles {
            if roles.contains(&role) {
                return Err(ParseError::DuplicateFinger {
                    line: line_num,
                    key: KeyId::new(token_hand, role),
                    raw: raw(),
                });
            }
            roles.push(role);
        }
    }

    let keys = hand
        .and_then(|hand| ChordKeySet::from_roles(hand, roles))
        .ok_or_else(|| ParseError::EmptyChord {
            line: line_num,
            raw: raw(),
        })?;

    Ok(ChordDefinition {
        keys,
        output: output.to_string(),
        line: line_num,
    })
}

/// Parse one chord token: a hand marker followed by role letters
///
/// Stops at the first character that is not a role letter and returns it
/// as unconsumed input, so `LPX` yields `("X", (Left, [Pinkie]))`.
/// Repeated letters are returned as written; duplicate detection happens in
/// `parse_chord_line`.
pub fn parse_chord_token(input: &str) -> IResult<&str, (Hand, Vec<FingerRole>)> {
    (parse_hand, parse_roles).parse(input)
}

/// Parse a hand marker (L or R, case-insensitive)
pub fn parse_hand(input: &str) -> IResult<&str, Hand> {
    map_opt(anychar, Hand::from_marker).parse(input)
}

/// Parse zero or more role letters
pub fn parse_roles(input: &str) -> IResult<&str, Vec<FingerRole>> {
    many0(map_opt(anychar, FingerRole::from_letter)).parse(input)
}
