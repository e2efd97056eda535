//! Chord preview resolution
//!
//! Given the keys currently held down, computes what pressing each other
//! key would complete to. This drives the layout-testing view: every key
//! cap shows the output it would produce next.
//!
//! Resolution is an exact-match lookup on the key-set index; there is no
//! prefix matching and no timing. Each hand resolves on its own, so keys
//! on the hand opposite to the pressed set are evaluated as single-key
//! chords.
//!
//! The pressed set is owned by the caller and passed in on every call.

use std::collections::BTreeSet;
use thiserror::Error;

use crate::core::{
    layout::Config,
    types::{ChordKeySet, Hand, KeyId},
};

/// Invalid pressed-key input
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum ResolverInputError {
    /// Pressed keys span both hands
    #[error("Pressed keys span both hands ({left} and {right}); chords use one hand only")]
    MixedHands { left: KeyId, right: KeyId },
}

/// One optional output per physical key, indexed by `KeyId::index()`.
pub type Preview<'a> = [Option<&'a str>; KeyId::COUNT];

/// Collapses the pressed keys into one chord, or `None` if nothing is pressed.
fn pressed_chord<I>(pressed: I) -> Result<Option<ChordKeySet>, ResolverInputError>
where
    I: IntoIterator<Item = KeyId>,
{
    let pressed: BTreeSet<KeyId> = pressed.into_iter().collect();

    let Some(&first) = pressed.first() else {
        return Ok(None);
    };
    let Some(&last) = pressed.last() else {
        return Ok(None);
    };

    // BTreeSet is sorted Left before Right, so a mixed set has a left key
    // first and a right key last
    if first.hand != last.hand {
        debug_assert_eq!(first.hand, Hand::Left);
        return Err(ResolverInputError::MixedHands {
            left: first,
            right: last,
        });
    }

    Ok(ChordKeySet::from_keys(pressed))
}

/// For every key not yet pressed, the output pressing it next would produce
///
/// # Arguments
/// * `config` - The layout to resolve against
/// * `pressed` - Keys currently held down (all on one hand, possibly none)
///
/// # Returns
/// 14 slots in canonical key order. A slot is `None` when the key is
/// already pressed or when no chord matches exactly.
///
/// # Example
/// ```
/// use chord_layout::core::{parser::parse_config, resolver::resolve, FingerRole, Hand, KeyId};
///
/// let config = parse_config("LPR y")?;
/// let pinkie = KeyId::new(Hand::Left, FingerRole::Pinkie);
/// let ring = KeyId::new(Hand::Left, FingerRole::Ring);
///
/// let preview = resolve(&config, [pinkie])?;
/// assert_eq!(preview[ring.index()], Some("y"));
/// assert_eq!(preview[pinkie.index()], None);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn resolve<I>(config: &Config, pressed: I) -> Result<Preview<'_>, ResolverInputError>
where
    I: IntoIterator<Item = KeyId>,
{
    let pressed = pressed_chord(pressed)?;

    Ok(std::array::from_fn(|slot| {
        let key = KeyId::ALL[slot];

        let candidate = match pressed {
            Some(chord) if chord.contains(key) => return None,
            // Same hand: extend the held chord
            Some(chord) if chord.hand() == key.hand => chord.with(key),
            // Nothing held on this key's hand: the key alone
            _ => Some(ChordKeySet::single(key)),
        };

        candidate
            .and_then(|keys| config.lookup(&keys))
            .map(|chord| chord.output.as_str())
    }))
}

/// The output the pressed keys produce on their own, if any
///
/// Returns `Ok(None)` for an empty pressed set.
pub fn current_output<I>(config: &Config, pressed: I) -> Result<Option<&str>, ResolverInputError>
where
    I: IntoIterator<Item = KeyId>,
{
    let pressed = pressed_chord(pressed)?;

    Ok(pressed
        .and_then(|keys| config.lookup(&keys))
        .map(|chord| chord.output.as_str()))
}
