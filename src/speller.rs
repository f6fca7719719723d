//! # Note Speller
//!
//! Projects one clef of a [`PitchSet`] onto the staff: every active note of
//! the clef is spelled under the key signature, then same-letter doublings are
//! resolved.
//!
//! ## Pipeline
//! 1. [`spell_clef`] - active notes of the clef, ascending, each spelled with
//!    [`KeySignature::spelling_of`]
//! 2. [`resolve_doublings`] - force naturals where needed
//! 3. [`staff_notes`] - both steps, returned as renderer-ready key strings
//!
//! ## Example
//! ```rust
//! use harmony::{staff_notes, Clef, KeySignature, PitchSet};
//!
//! let key = KeySignature::builtin("D major").unwrap();
//! let notes: PitchSet = [66, 73].into_iter().collect(); // F#4, C#5
//!
//! let staff = staff_notes(&notes, Clef::Treble, &key);
//! assert_eq!(staff[0].key, "F/4");
//! assert_eq!(staff[1].key, "C/5");
//! assert!(staff.iter().all(|n| n.modifier.as_str().is_empty()));
//! ```

use serde::Serialize;

use crate::doubling::resolve_doublings;
use crate::key_signature::KeySignature;
use crate::pitch::{octave, pitch_class, Clef, MidiNumber, Modifier, SpelledPitch, Spelling};
use crate::pitch_set::PitchSet;

/// A MIDI note with its spelling under the key signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpelledNote {
    pub midi: MidiNumber,
    pub spelling: Spelling,
}

/// A note ready for the renderer
///
/// `key` is the letter/octave string the staff places the note head with,
/// `modifier` the accidental glyph drawn next to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffNote {
    pub midi: MidiNumber,
    pub key: String,
    pub pitch: SpelledPitch,
    pub octave: i8,
    pub modifier: Modifier,
}

impl StaffNote {
    pub fn has_accidental(&self) -> bool {
        !self.modifier.is_none()
    }
}

/// Spell a list of MIDI numbers, keeping their order
pub fn spell_notes(notes: &[MidiNumber], key: &KeySignature) -> Vec<SpelledNote> {
    notes
        .iter()
        .map(|&midi| SpelledNote {
            midi,
            spelling: key.spelling_of(pitch_class(midi), octave(midi)),
        })
        .collect()
}

/// Spell the active notes of one clef, ascending by MIDI number
pub fn spell_clef(set: &PitchSet, clef: Clef, key: &KeySignature) -> Vec<SpelledNote> {
    spell_notes(&set.notes_in(clef), key)
}

/// Spelled notes of one clef with doubling naturals applied
pub fn staff_notes(set: &PitchSet, clef: Clef, key: &KeySignature) -> Vec<StaffNote> {
    let spelled = spell_clef(set, clef, key);
    let spellings: Vec<Spelling> = spelled.iter().map(|n| n.spelling).collect();
    let modifiers = resolve_doublings(&spellings);

    log::trace!(
        "{} staff: {} notes in {}",
        clef,
        spelled.len(),
        key.signature_key().id
    );

    spelled
        .into_iter()
        .zip(modifiers)
        .map(|(note, modifier)| StaffNote {
            midi: note.midi,
            key: note.spelling.key(),
            pitch: note.spelling.pitch,
            octave: note.spelling.octave,
            modifier,
        })
        .collect()
}

/// `(key, modifier)` pairs of one clef, as consumed by a staff renderer
pub fn note_keys_and_modifiers(
    set: &PitchSet,
    clef: Clef,
    key: &KeySignature,
) -> Vec<(String, Modifier)> {
    staff_notes(set, clef, key)
        .into_iter()
        .map(|note| (note.key, note.modifier))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d_major_signature_notes() {
        let key = KeySignature::builtin("D").unwrap();
        let set: PitchSet = [66, 73].into_iter().collect();

        let pairs = note_keys_and_modifiers(&set, Clef::Treble, &key);
        assert_eq!(
            pairs,
            vec![
                ("F/4".to_string(), Modifier::None),
                ("C/5".to_string(), Modifier::None),
            ]
        );
        assert!(note_keys_and_modifiers(&set, Clef::Bass, &key).is_empty());
    }

    #[test]
    fn test_c_major_adjacent_notes() {
        let key = KeySignature::builtin("C").unwrap();
        let set: PitchSet = [60, 61].into_iter().collect();

        let staff = staff_notes(&set, Clef::Treble, &key);
        assert_eq!(staff.len(), 2);
        assert_eq!(staff[0].key, "C/4");
        assert_eq!(staff[0].modifier, Modifier::None);
        assert_eq!(staff[1].key, "D/4");
        assert_eq!(staff[1].modifier, Modifier::Flat);
        assert!(staff[1].has_accidental());
    }

    #[test]
    fn test_clefs_are_split() {
        let key = KeySignature::builtin("C").unwrap();
        let set: PitchSet = [48, 59, 60, 72].into_iter().collect();

        let bass: Vec<MidiNumber> = spell_clef(&set, Clef::Bass, &key).iter().map(|n| n.midi).collect();
        let treble: Vec<MidiNumber> =
            spell_clef(&set, Clef::Treble, &key).iter().map(|n| n.midi).collect();
        assert_eq!(bass, vec![48, 59]);
        assert_eq!(treble, vec![60, 72]);
    }

    #[test]
    fn test_doubling_applied_per_staff() {
        let key = KeySignature::builtin("C").unwrap();
        // F3 + F#3 in the bass, F#4 alone in the treble
        let set: PitchSet = [53, 54, 66].into_iter().collect();

        let bass = note_keys_and_modifiers(&set, Clef::Bass, &key);
        assert_eq!(
            bass,
            vec![
                ("F/3".to_string(), Modifier::Natural),
                ("F/3".to_string(), Modifier::Sharp),
            ]
        );

        let treble = note_keys_and_modifiers(&set, Clef::Treble, &key);
        assert_eq!(treble, vec![("F/4".to_string(), Modifier::Sharp)]);
    }

    #[test]
    fn test_b_sharp_stays_on_treble_index() {
        // MIDI 60 in C# major is written B#3 but still belongs to the treble clef
        let key = KeySignature::builtin("C#").unwrap();
        let set: PitchSet = [60].into_iter().collect();

        let staff = staff_notes(&set, Clef::Treble, &key);
        assert_eq!(staff[0].midi, 60);
        assert_eq!(staff[0].key, "B/3");
        assert_eq!(staff[0].pitch.to_string(), "B#");
        assert_eq!(staff[0].modifier, Modifier::None);
    }

    #[test]
    fn test_staff_note_json() {
        let key = KeySignature::builtin("C").unwrap();
        let set: PitchSet = [61].into_iter().collect();
        let json = serde_json::to_string(&staff_notes(&set, Clef::Treble, &key)).unwrap();
        assert_eq!(
            json,
            r#"[{"midi":61,"key":"D/4","pitch":"Db","octave":4,"modifier":"b"}]"#
        );
    }
}
