//! # Key Signature
//!
//! The key a trainer is in, and the rules for spelling notes under it.
//!
//! ## Displayed Key vs Signature Key
//! A [`KeySignature`] tracks two keys that default to the same entry:
//! - the **displayed key**: the key the user picked, shown in the UI and used
//!   as the tonic for root highlighting
//! - the **signature key**: the key whose signature is drawn and whose
//!   spelling table drives every accidental
//!
//! The two can diverge (a piece in D minor written without a signature, for
//! example), so there are three mutators instead of one with a flag:
//! - [`KeySignature::set_displayed_key_only`]
//! - [`KeySignature::set_signature_key_only`]
//! - [`KeySignature::set_displayed_and_signature_key`]
//!
//! All of them resolve the new key before touching any state, so a failing
//! call leaves the signature exactly as it was.
//!
//! ## Spelling Rules
//! Within a key signature:
//! - pitches that belong to the signature are written with no glyph
//! - unaltered letters that appear in the signature need an explicit natural
//! - everything else keeps the inflection of its canonical spelling
//!
//! ## Example
//! ```rust
//! use harmony::{KeySignature, Modifier};
//!
//! let key = KeySignature::builtin("D major").unwrap();
//!
//! // F# is part of the signature: no glyph
//! let fs = key.spelling_of(6, 4);
//! assert_eq!(fs.key(), "F/4");
//! assert_eq!(fs.modifier, Modifier::None);
//!
//! // F natural contradicts the signature: explicit natural
//! let f = key.spelling_of(5, 4);
//! assert_eq!(f.modifier, Modifier::Natural);
//! ```

use serde::Serialize;
use std::fmt;

use crate::error::HarmonyError;
use crate::key_table::{KeyEntry, KeyTable};
use crate::pitch::{Accidental, Modifier, NoteLetter, SpelledPitch, Spelling};

/// Order in which sharps enter a key signature
pub const SHARP_ORDER: [NoteLetter; 7] = [
    NoteLetter::F,
    NoteLetter::C,
    NoteLetter::G,
    NoteLetter::D,
    NoteLetter::A,
    NoteLetter::E,
    NoteLetter::B,
];

/// Order in which flats enter a key signature (sharps reversed)
pub const FLAT_ORDER: [NoteLetter; 7] = [
    NoteLetter::B,
    NoteLetter::E,
    NoteLetter::A,
    NoteLetter::D,
    NoteLetter::G,
    NoteLetter::C,
    NoteLetter::F,
];

/// Concrete key signature: which letters are sharped or flatted
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    accidental: Accidental, // Natural when empty
    letters: Vec<NoteLetter>,
}

impl Signature {
    /// Expand a signature spec such as `"##"` or `"bbb"`
    ///
    /// # Example
    /// ```
    /// use harmony::Signature;
    ///
    /// let sig = Signature::from_spec("bbb").unwrap();
    /// let names: Vec<String> = sig.entries().iter().map(|e| e.to_string()).collect();
    /// assert_eq!(names, vec!["Bb", "Eb", "Ab"]);
    ///
    /// assert!(Signature::from_spec("#b").is_err());
    /// assert!(Signature::from_spec("########").is_err());
    /// ```
    pub fn from_spec(spec: &str) -> Result<Self, HarmonyError> {
        let count = spec.chars().count();
        if count > 7 {
            return Err(HarmonyError::InvalidSignature(spec.to_string()));
        }

        let (accidental, order) = if spec.is_empty() {
            return Ok(Self::default());
        } else if spec.chars().all(|c| c == '#') {
            (Accidental::Sharp, &SHARP_ORDER)
        } else if spec.chars().all(|c| c == 'b') {
            (Accidental::Flat, &FLAT_ORDER)
        } else {
            return Err(HarmonyError::InvalidSignature(spec.to_string()));
        };

        Ok(Self {
            accidental,
            letters: order[..count].to_vec(),
        })
    }

    /// Whether this exact letter + inflection is implied by the signature
    pub fn contains(&self, letter: NoteLetter, accidental: Accidental) -> bool {
        accidental != Accidental::Natural
            && accidental == self.accidental
            && self.letters.contains(&letter)
    }

    /// Whether the bare letter is altered by the signature, meaning an
    /// unaltered form of it needs an explicit natural
    pub fn needs_natural(&self, letter: NoteLetter) -> bool {
        self.letters.contains(&letter)
    }

    /// Entries in signature order (F#, C#, ... or Bb, Eb, ...)
    pub fn entries(&self) -> Vec<SpelledPitch> {
        self.letters
            .iter()
            .map(|&letter| SpelledPitch::new(letter, self.accidental))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Position on the circle of fifths: positive sharps, negative flats
    pub fn fifths(&self) -> i8 {
        let count = self.letters.len() as i8;
        match self.accidental {
            Accidental::Flat => -count,
            _ => count,
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in &self.letters {
            f.write_str(self.accidental.symbol())?;
        }
        Ok(())
    }
}

impl Serialize for Signature {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.entries())
    }
}

/// Displayed key, signature key and the expanded signature
#[derive(Debug, Clone)]
pub struct KeySignature<'t> {
    table: &'t KeyTable,
    key: &'t KeyEntry,
    signature_key: &'t KeyEntry,
    signature: Signature,
}

impl<'t> KeySignature<'t> {
    /// Create a key signature with displayed and signature key set to `key`
    pub fn new(table: &'t KeyTable, key: &str) -> Result<Self, HarmonyError> {
        let entry = table.get(key)?;
        let signature = Signature::from_spec(&entry.signature_spec)?;
        Ok(Self {
            table,
            key: entry,
            signature_key: entry,
            signature,
        })
    }

    /// The displayed key; also drives root highlighting
    pub fn key(&self) -> &'t KeyEntry {
        self.key
    }

    /// The key whose signature and spelling table are in force
    pub fn signature_key(&self) -> &'t KeyEntry {
        self.signature_key
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Pitch class of the displayed key's tonic, `None` for the key-less entry
    pub fn tonic_pitch_class(&self) -> Option<u8> {
        self.key.tonic_pitch_class()
    }

    /// Change the displayed key, keeping the signature.
    pub fn set_displayed_key_only(&mut self, key: &str) -> Result<(), HarmonyError> {
        let entry = self.table.get(key)?;
        log::debug!("displayed key {} -> {}", self.key.id, entry.id);
        self.key = entry;
        Ok(())
    }

    /// Change the signature key and recompute the signature, keeping the
    /// displayed key.
    pub fn set_signature_key_only(&mut self, key: &str) -> Result<(), HarmonyError> {
        let entry = self.table.get(key)?;
        let signature = Signature::from_spec(&entry.signature_spec)?;
        log::debug!(
            "signature key {} -> {} ({})",
            self.signature_key.id,
            entry.id,
            entry.signature_spec
        );
        self.signature_key = entry;
        self.signature = signature;
        Ok(())
    }

    /// Change both keys together.
    pub fn set_displayed_and_signature_key(&mut self, key: &str) -> Result<(), HarmonyError> {
        let entry = self.table.get(key)?;
        let signature = Signature::from_spec(&entry.signature_spec)?;
        log::debug!("key {} -> {} ({})", self.key.id, entry.id, entry.signature_spec);
        self.key = entry;
        self.signature_key = entry;
        self.signature = signature;
        Ok(())
    }

    pub fn signature_contains(&self, letter: NoteLetter, accidental: Accidental) -> bool {
        self.signature.contains(letter, accidental)
    }

    pub fn needs_natural(&self, letter: NoteLetter) -> bool {
        self.signature.needs_natural(letter)
    }

    /// Spell a pitch class in a MIDI octave under the signature key.
    ///
    /// The returned octave is the written one: pitch class 0 spelled B# moves
    /// down an octave, pitch class 11 spelled Cb moves up one. The shift
    /// saturates at the ends of `i8`.
    pub fn spelling_of(&self, pitch_class: u8, octave: i8) -> Spelling {
        let pitch = self.signature_key.spelling_for(pitch_class);

        let octave = match (pitch_class % 12, pitch.letter) {
            (0, NoteLetter::B) => octave.saturating_sub(1),
            (11, NoteLetter::C) => octave.saturating_add(1),
            _ => octave,
        };

        let modifier = if self.signature_contains(pitch.letter, pitch.accidental) {
            Modifier::None
        } else if pitch.accidental == Accidental::Natural && self.needs_natural(pitch.letter) {
            Modifier::Natural
        } else {
            pitch.accidental.as_modifier()
        };

        Spelling {
            pitch,
            octave,
            modifier,
        }
    }
}

impl KeySignature<'static> {
    /// Key signature over the builtin key table
    pub fn builtin(key: &str) -> Result<Self, HarmonyError> {
        KeySignature::new(KeyTable::builtin(), key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signature_orders() {
        let sharps = Signature::from_spec("#######").unwrap();
        let names: Vec<String> = sharps.entries().iter().map(|e| e.to_string()).collect();
        assert_eq!(names, vec!["F#", "C#", "G#", "D#", "A#", "E#", "B#"]);
        assert_eq!(sharps.fifths(), 7);

        let flats = Signature::from_spec("bb").unwrap();
        let names: Vec<String> = flats.entries().iter().map(|e| e.to_string()).collect();
        assert_eq!(names, vec!["Bb", "Eb"]);
        assert_eq!(flats.fifths(), -2);
        assert_eq!(flats.to_string(), "bb");

        let empty = Signature::from_spec("").unwrap();
        assert!(empty.is_empty());
        assert_eq!(empty.fifths(), 0);
    }

    #[test]
    fn test_invalid_signatures() {
        for spec in ["#b", "b#", "x", "########", "bbbbbbbb", " #", "n"] {
            assert_eq!(
                Signature::from_spec(spec),
                Err(HarmonyError::InvalidSignature(spec.to_string())),
                "spec {:?} should be rejected",
                spec
            );
        }
    }

    #[test]
    fn test_contains_and_needs_natural() {
        let sig = Signature::from_spec("##").unwrap();
        assert!(sig.contains(NoteLetter::F, Accidental::Sharp));
        assert!(sig.contains(NoteLetter::C, Accidental::Sharp));
        assert!(!sig.contains(NoteLetter::F, Accidental::Natural));
        assert!(!sig.contains(NoteLetter::F, Accidental::Flat));
        assert!(!sig.contains(NoteLetter::G, Accidental::Sharp));

        assert!(sig.needs_natural(NoteLetter::F));
        assert!(sig.needs_natural(NoteLetter::C));
        assert!(!sig.needs_natural(NoteLetter::G));
    }

    #[test]
    fn test_signature_member_has_no_glyph() {
        let key = KeySignature::builtin("G").unwrap();
        let fs = key.spelling_of(6, 4);
        assert_eq!(fs.letter(), NoteLetter::F);
        assert_eq!(fs.accidental(), Accidental::Sharp);
        assert_eq!(fs.modifier, Modifier::None);
        assert!(!fs.has_accidental());
    }

    #[test]
    fn test_natural_override() {
        let key = KeySignature::builtin("F").unwrap();
        let b = key.spelling_of(11, 4);
        assert_eq!(b.name(), "B/4");
        assert_eq!(b.modifier, Modifier::Natural);

        let bb = key.spelling_of(10, 4);
        assert_eq!(bb.name(), "Bb/4");
        assert_eq!(bb.modifier, Modifier::None);
    }

    #[test]
    fn test_plain_accidentals_in_c() {
        let key = KeySignature::builtin("C").unwrap();
        assert_eq!(key.spelling_of(1, 4).modifier, Modifier::Flat);
        assert_eq!(key.spelling_of(6, 4).modifier, Modifier::Sharp);
        assert_eq!(key.spelling_of(3, 4).modifier, Modifier::Flat);
        assert_eq!(key.spelling_of(0, 4).modifier, Modifier::None);
    }

    #[test]
    fn test_octave_boundaries() {
        // B# in C# major sounds as MIDI 60 but is written in octave 3
        let cs = KeySignature::builtin("C#").unwrap();
        let bs = cs.spelling_of(0, 4);
        assert_eq!(bs.name(), "B#/3");
        assert_eq!(bs.modifier, Modifier::None);

        // Cb in Gb major sounds as MIDI 71 but is written in octave 5
        let gb = KeySignature::builtin("Gb").unwrap();
        let cb = gb.spelling_of(11, 4);
        assert_eq!(cb.name(), "Cb/5");
        assert_eq!(cb.modifier, Modifier::None);

        // C natural in Gb major needs a natural sign
        assert_eq!(gb.spelling_of(0, 4).modifier, Modifier::Natural);
    }

    #[test]
    fn test_octave_shift_saturates() {
        let cs = KeySignature::builtin("C#").unwrap();
        assert_eq!(cs.spelling_of(0, i8::MIN).octave, i8::MIN);

        let gb = KeySignature::builtin("Gb").unwrap();
        assert_eq!(gb.spelling_of(11, i8::MAX).octave, i8::MAX);
    }

    #[test]
    fn test_spelling_totality() {
        for entry in KeyTable::builtin().entries() {
            let key = KeySignature::builtin(&entry.id).unwrap();
            for pitch_class in 0..12 {
                let spelling = key.spelling_of(pitch_class, 4);
                assert_eq!(spelling.pitch.pitch_class(), pitch_class, "key {}", entry.id);
                assert!(
                    matches!(spelling.modifier.as_str(), "" | "#" | "b" | "n"),
                    "key {} pitch class {}",
                    entry.id,
                    pitch_class
                );
                assert!((3..=5).contains(&spelling.octave));
            }
        }
    }

    #[test]
    fn test_displayed_key_only() {
        let mut key = KeySignature::builtin("D").unwrap();
        key.set_displayed_key_only("Bb").unwrap();
        assert_eq!(key.key().id, "Bb");
        assert_eq!(key.signature_key().id, "D");
        assert_eq!(key.signature().to_string(), "##");
        assert_eq!(key.tonic_pitch_class(), Some(10));
    }

    #[test]
    fn test_signature_key_only() {
        let mut key = KeySignature::builtin("D").unwrap();
        key.set_signature_key_only("Eb").unwrap();
        assert_eq!(key.key().id, "D");
        assert_eq!(key.signature_key().id, "Eb");
        assert_eq!(key.signature().to_string(), "bbb");
        // spelling follows the signature key
        assert_eq!(key.spelling_of(3, 4).name(), "Eb/4");
    }

    #[test]
    fn test_displayed_and_signature_key() {
        let mut key = KeySignature::builtin("C").unwrap();
        key.set_displayed_and_signature_key("A").unwrap();
        assert_eq!(key.key().id, "A");
        assert_eq!(key.signature_key().id, "A");
        assert_eq!(key.signature().len(), 3);
    }

    #[test]
    fn test_failed_change_leaves_state() {
        let mut key = KeySignature::builtin("E").unwrap();
        let before = (key.key().id.clone(), key.signature_key().id.clone(), key.signature().clone());

        assert!(matches!(key.set_displayed_key_only("X"), Err(HarmonyError::InvalidKey(_))));
        assert!(matches!(key.set_signature_key_only("X"), Err(HarmonyError::InvalidKey(_))));
        assert!(matches!(
            key.set_displayed_and_signature_key("X"),
            Err(HarmonyError::InvalidKey(_))
        ));

        let after = (key.key().id.clone(), key.signature_key().id.clone(), key.signature().clone());
        assert_eq!(before, after);
    }
}
