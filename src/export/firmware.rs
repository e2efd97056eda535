//! Firmware source renderings
//!
//! Text outputs pasted into firmware sources:
//! - `to_keychordz`: one `Chord::new(...)` entry per chord
//! - `to_keymap`: the QMK base layer, one keycode per physical key
//! - `to_qmk_combos`: QMK combo arrays for every multi-key chord
//!
//! The QMK renderings need a base keycode for every key, taken from the
//! layout's single-key chords, and fail if a key has none or several.

use crate::{
    core::{Config, FingerRole, Hand, KeyId},
    export::ExportError,
};

const fn key(hand: Hand, role: FingerRole) -> KeyId {
    KeyId::new(hand, role)
}

/// Finger row in physical order, left to right across the board.
const FINGER_ROW: [KeyId; 8] = [
    key(Hand::Left, FingerRole::Pinkie),
    key(Hand::Left, FingerRole::Ring),
    key(Hand::Left, FingerRole::Middle),
    key(Hand::Left, FingerRole::Index),
    key(Hand::Right, FingerRole::Index),
    key(Hand::Right, FingerRole::Middle),
    key(Hand::Right, FingerRole::Ring),
    key(Hand::Right, FingerRole::Pinkie),
];

/// Thumb cluster in the order the keychordz matrix wires it.
const THUMB_ROW: [KeyId; 6] = [
    key(Hand::Left, FingerRole::ThumbUp),
    key(Hand::Left, FingerRole::ThumbDown),
    key(Hand::Left, FingerRole::ThumbLeft),
    key(Hand::Right, FingerRole::ThumbUp),
    key(Hand::Right, FingerRole::ThumbDown),
    key(Hand::Right, FingerRole::ThumbLeft),
];

/// True if `output` can follow `Key::` in firmware source.
fn is_key_ident(output: &str) -> bool {
    let mut chars = output.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Renders the keychordz firmware chord table
///
/// One line per record in authored order:
/// `Chord::new(Finger::LP as u16 | Finger::LR as u16, Key::e),`
///
/// Outputs that are not identifiers (such as `;`) are still written but
/// logged, since the firmware will not accept them as `Key::` variants.
pub fn to_keychordz(config: &Config) -> String {
    let mut out = String::new();

    for chord in config.chords() {
        if !is_key_ident(&chord.output) {
            tracing::warn!(
                line = chord.line,
                output = %chord.output,
                "output is not a valid firmware key name"
            );
        }
        let fingers = chord
            .keys
            .keys()
            .map(|k| format!("Finger::{} as u16", k))
            .collect::<Vec<_>>()
            .join(" | ");
        out += &format!("Chord::new({}, Key::{}),\n", fingers, chord.output);
    }

    out
}

/// Base keycode per physical key, indexed by `KeyId::index()`.
fn base_keycodes(config: &Config) -> Result<[&str; KeyId::COUNT], ExportError> {
    let mut base: [Option<&str>; KeyId::COUNT] = [None; KeyId::COUNT];

    for chord in config.chords().iter().filter(|c| c.keys.len() == 1) {
        for key in chord.keys.keys() {
            if let Some(first) = base[key.index()] {
                return Err(ExportError::DuplicateBase {
                    key,
                    first: first.to_string(),
                    second: chord.output.clone(),
                });
            }
            base[key.index()] = Some(chord.output.as_str());
        }
    }

    let mut keycodes = [""; KeyId::COUNT];
    for key in KeyId::ALL {
        keycodes[key.index()] = base[key.index()].ok_or(ExportError::UnmappedKey(key))?;
    }
    Ok(keycodes)
}

/// Renders the QMK base layer
///
/// ```text
/// [0] = LAYOUT_keychordz(
///     LP, LR, LM, LI,    RI, RM, RR, RP,
///     LU, LD, LL,    RU, RD, RL
/// )
/// ```
pub fn to_keymap(config: &Config) -> Result<String, ExportError> {
    let base = base_keycodes(config)?;
    let row = |keys: &[KeyId]| {
        keys.iter()
            .map(|k| base[k.index()])
            .collect::<Vec<_>>()
            .join(", ")
    };

    Ok(format!(
        "[0] = LAYOUT_keychordz(\n    {},    {},\n    {},    {}\n)\n",
        row(&FINGER_ROW[..4]),
        row(&FINGER_ROW[4..]),
        row(&THUMB_ROW[..3]),
        row(&THUMB_ROW[3..]),
    ))
}

/// Renders QMK combo definitions for every multi-key chord
///
/// ```text
/// const uint16_t PROGMEM combo_1[] = {KC_A, KC_S, COMBO_END};
///
/// combo_t key_combos[COMBO_COUNT] = {
///     COMBO(combo_1, KC_ESC),
/// };
///
/// ComboCount = 1
/// ```
///
/// Combo names use the record's position in the layout.
pub fn to_qmk_combos(config: &Config) -> Result<String, ExportError> {
    let base = base_keycodes(config)?;

    let combos: Vec<_> = config
        .chords()
        .iter()
        .enumerate()
        .filter(|(_, chord)| chord.keys.len() > 1)
        .collect();

    let mut progmem_out = String::new();
    for (i, chord) in &combos {
        let members = chord
            .keys
            .keys()
            .map(|k| base[k.index()])
            .collect::<Vec<_>>()
            .join(", ");
        progmem_out += &format!("const uint16_t PROGMEM combo_{}[] = {{{}, COMBO_END}};\n", i, members);
    }

    let mut key_combos_out = String::from("combo_t key_combos[COMBO_COUNT] = {\n");
    for (i, chord) in &combos {
        key_combos_out += &format!("    COMBO(combo_{}, {}),\n", i, chord.output);
    }
    key_combos_out += "};\n";

    Ok(format!(
        "{}\n{}\nComboCount = {}\n",
        progmem_out,
        key_combos_out,
        combos.len()
    ))
}
