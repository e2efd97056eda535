//! src/core/types.rs
//!
//! Core type definitions for chord layouts
//!
//! This module defines the fixed key vocabulary of the device:
//! - `Hand`: Left or Right half of the keyboard
//! - `FingerRole`: The seven keys under one hand (four fingers, three thumb keys)
//! - `KeyId`: One of the 14 physical keys (hand + role)
//! - `ChordKeySet`: A non-empty, single-hand set of keys pressed together
//! - `ChordDefinition`: One authored chord → output mapping
//!
//! `ChordKeySet` is stored as a hand plus a 7-bit role mask, so two chords
//! written with different letter orders (`LPR` and `LRP`) are structurally
//! equal and hash identically.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// One half of the split keyboard
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum Hand {
    /// Left half (marker `L`)
    Left,
    /// Right half (marker `R`)
    Right,
}

impl Hand {
    /// Both hands in canonical order.
    pub const ALL: [Hand; 2] = [Hand::Left, Hand::Right];

    /// Marker character used in layout text.
    pub const fn marker(self) -> char {
        match self {
            Hand::Left => 'L',
            Hand::Right => 'R',
        }
    }

    /// Parses a hand marker (case-insensitive).
    pub fn from_marker(c: char) -> Option<Hand> {
        match c.to_ascii_uppercase() {
            'L' => Some(Hand::Left),
            'R' => Some(Hand::Right),
            _ => None,
        }
    }

    /// The other hand.
    pub const fn opposite(self) -> Hand {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }

    /// Position in canonical order (Left = 0, Right = 1).
    pub const fn index(self) -> usize {
        match self {
            Hand::Left => 0,
            Hand::Right => 1,
        }
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hand::Left => write!(f, "left"),
            Hand::Right => write!(f, "right"),
        }
    }
}

/// The role of a key under one hand
///
/// Declaration order is the canonical order used for export and for the
/// resolver's slot layout.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum FingerRole {
    /// Pinkie finger (`P`)
    Pinkie,
    /// Ring finger (`R`)
    Ring,
    /// Middle finger (`M`)
    Middle,
    /// Index finger (`I`)
    Index,
    /// Thumb key towards the palm (`L`)
    ThumbLeft,
    /// Upper thumb key (`U`)
    ThumbUp,
    /// Lower thumb key (`D`)
    ThumbDown,
}

impl FingerRole {
    /// All roles in canonical order.
    pub const ALL: [FingerRole; 7] = [
        FingerRole::Pinkie,
        FingerRole::Ring,
        FingerRole::Middle,
        FingerRole::Index,
        FingerRole::ThumbLeft,
        FingerRole::ThumbUp,
        FingerRole::ThumbDown,
    ];

    /// Number of roles per hand.
    pub const COUNT: usize = 7;

    /// Reserved letter used in layout text.
    pub const fn letter(self) -> char {
        match self {
            FingerRole::Pinkie => 'P',
            FingerRole::Ring => 'R',
            FingerRole::Middle => 'M',
            FingerRole::Index => 'I',
            FingerRole::ThumbLeft => 'L',
            FingerRole::ThumbUp => 'U',
            FingerRole::ThumbDown => 'D',
        }
    }

    /// Parses a role letter (case-insensitive).
    pub fn from_letter(c: char) -> Option<FingerRole> {
        match c.to_ascii_uppercase() {
            'P' => Some(FingerRole::Pinkie),
            'R' => Some(FingerRole::Ring),
            'M' => Some(FingerRole::Middle),
            'I' => Some(FingerRole::Index),
            'L' => Some(FingerRole::ThumbLeft),
            'U' => Some(FingerRole::ThumbUp),
            'D' => Some(FingerRole::ThumbDown),
            _ => None,
        }
    }

    /// Position in canonical order.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Bit of this role inside the 8-bit per-hand firmware word.
    ///
    /// The firmware numbers thumb keys Up, Down, Left from high to low,
    /// which differs from the canonical role order.
    pub const fn firmware_bit(self) -> u16 {
        match self {
            FingerRole::Pinkie => 1 << 6,
            FingerRole::Ring => 1 << 5,
            FingerRole::Middle => 1 << 4,
            FingerRole::Index => 1 << 3,
            FingerRole::ThumbUp => 1 << 2,
            FingerRole::ThumbDown => 1 << 1,
            FingerRole::ThumbLeft => 1,
        }
    }

    const fn mask_bit(self) -> u8 {
        1 << self.index()
    }
}

impl fmt::Display for FingerRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Identity of one physical key
///
/// The derived ordering (hand first, then role) is the canonical key order:
/// `LP LR LM LI LL LU LD RP RR RM RI RL RU RD`.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub struct KeyId {
    /// Which half of the keyboard
    pub hand: Hand,
    /// Which key under that hand
    pub role: FingerRole,
}

impl KeyId {
    /// Number of physical keys on the device.
    pub const COUNT: usize = 14;

    /// All keys in canonical order. `KeyId::ALL[k.index()] == k`.
    pub const ALL: [KeyId; KeyId::COUNT] = [
        KeyId::new(Hand::Left, FingerRole::Pinkie),
        KeyId::new(Hand::Left, FingerRole::Ring),
        KeyId::new(Hand::Left, FingerRole::Middle),
        KeyId::new(Hand::Left, FingerRole::Index),
        KeyId::new(Hand::Left, FingerRole::ThumbLeft),
        KeyId::new(Hand::Left, FingerRole::ThumbUp),
        KeyId::new(Hand::Left, FingerRole::ThumbDown),
        KeyId::new(Hand::Right, FingerRole::Pinkie),
        KeyId::new(Hand::Right, FingerRole::Ring),
        KeyId::new(Hand::Right, FingerRole::Middle),
        KeyId::new(Hand::Right, FingerRole::Index),
        KeyId::new(Hand::Right, FingerRole::ThumbLeft),
        KeyId::new(Hand::Right, FingerRole::ThumbUp),
        KeyId::new(Hand::Right, FingerRole::ThumbDown),
    ];

    pub const fn new(hand: Hand, role: FingerRole) -> Self {
        Self { hand, role }
    }

    /// Slot of this key in canonical order (0..14).
    pub const fn index(self) -> usize {
        self.hand.index() * FingerRole::COUNT + self.role.index()
    }

    /// Inverse of [`KeyId::index`].
    pub fn from_index(index: usize) -> Option<KeyId> {
        KeyId::ALL.get(index).copied()
    }

    /// 16-bit firmware mask: left hand in the high byte, right in the low byte.
    pub const fn firmware_mask(self) -> u16 {
        match self.hand {
            Hand::Left => self.role.firmware_bit() << 8,
            Hand::Right => self.role.firmware_bit(),
        }
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.hand.marker(), self.role.letter())
    }
}

/// Error returned when a key name such as `LP` cannot be parsed
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("Invalid key name '{0}': expected a hand marker (L/R) followed by one role letter (P, R, M, I, L, U, D)")]
pub struct ParseKeyIdError(pub String);

impl FromStr for KeyId {
    type Err = ParseKeyIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        let parsed = match (chars.next(), chars.next(), chars.next()) {
            (Some(h), Some(r), None) => Hand::from_marker(h)
                .zip(FingerRole::from_letter(r))
                .map(|(hand, role)| KeyId::new(hand, role)),
            _ => None,
        };
        parsed.ok_or_else(|| ParseKeyIdError(s.to_string()))
    }
}

/// A non-empty set of keys on one hand that are pressed together
///
/// Construction guarantees the single-hand and non-empty invariants, so
/// every value of this type is a well-formed chord.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ChordKeySet {
    hand: Hand,
    roles: u8,
}

impl ChordKeySet {
    /// A chord consisting of a single key.
    pub const fn single(key: KeyId) -> Self {
        Self {
            hand: key.hand,
            roles: key.role.mask_bit(),
        }
    }

    /// Builds a chord from roles on one hand.
    ///
    /// Repeated roles collapse into one. Returns `None` for an empty set.
    pub fn from_roles<I>(hand: Hand, roles: I) -> Option<Self>
    where
        I: IntoIterator<Item = FingerRole>,
    {
        let mask = roles.into_iter().fold(0u8, |acc, r| acc | r.mask_bit());
        (mask != 0).then_some(Self { hand, roles: mask })
    }

    /// Builds a chord from key identities.
    ///
    /// Returns `None` if the keys are empty or span both hands.
    pub fn from_keys<I>(keys: I) -> Option<Self>
    where
        I: IntoIterator<Item = KeyId>,
    {
        let mut keys = keys.into_iter();
        let first = keys.next()?;
        keys.try_fold(Self::single(first), |set, key| set.with(key))
    }

    /// Returns this chord extended by `key`, or `None` if `key` is on the other hand.
    pub fn with(self, key: KeyId) -> Option<Self> {
        (key.hand == self.hand).then_some(Self {
            hand: self.hand,
            roles: self.roles | key.role.mask_bit(),
        })
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    pub fn contains(&self, key: KeyId) -> bool {
        key.hand == self.hand && self.roles & key.role.mask_bit() != 0
    }

    /// Member roles in canonical order.
    pub fn roles(&self) -> impl Iterator<Item = FingerRole> + '_ {
        FingerRole::ALL
            .into_iter()
            .filter(move |r| self.roles & r.mask_bit() != 0)
    }

    /// Member keys in canonical order.
    pub fn keys(&self) -> impl Iterator<Item = KeyId> + '_ {
        self.roles().map(move |role| KeyId::new(self.hand, role))
    }

    /// Number of keys in the chord (1..=7).
    pub fn len(&self) -> usize {
        self.roles.count_ones() as usize
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.roles == 0
    }

    /// OR of the member keys' firmware masks.
    pub fn firmware_mask(&self) -> u16 {
        self.keys().fold(0, |acc, k| acc | k.firmware_mask())
    }
}

impl fmt::Display for ChordKeySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hand.marker())?;
        for role in self.roles() {
            write!(f, "{}", role.letter())?;
        }
        Ok(())
    }
}

/// One authored chord → output mapping
///
/// # Example
/// ```ignore
/// let chord = ChordDefinition {
///     keys: ChordKeySet::from_roles(Hand::Left, [FingerRole::Pinkie, FingerRole::Ring]).unwrap(),
///     output: "a".to_string(),
///     line: 3,
/// };
/// // Represents: LPR a
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ChordDefinition {
    /// Keys pressed together
    pub keys: ChordKeySet,

    /// Output symbol, stored verbatim as written
    pub output: String,

    /// 1-based source line (0 when the chord was not read from text)
    pub line: usize,
}

impl fmt::Display for ChordDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.keys, self.output)
    }
}
