//! Per-note harmonic classification over the whole active set.

use std::collections::BTreeSet;

use super::types::{HighlightModes, ModeMatches, NoteHighlight};
use crate::key_signature::KeySignature;
use crate::pitch::{octave, pitch_class, MidiNumber, MAX_MIDI};

/// Classify every distinct note against the whole collection
///
/// `notes` may span both clefs and may repeat a MIDI number (the same key
/// reported by two sources); a repeat counts toward `doubles` but never toward
/// `octaves`. The result is ascending by MIDI number, one entry per distinct
/// note. Modes that are not enabled always report `false`.
///
/// Roots are measured against the tonic of the *displayed* key.
///
/// # Example
/// ```
/// use harmony::{classify, HighlightModes, KeySignature};
///
/// let key = KeySignature::builtin("C").unwrap();
/// let modes = HighlightModes { tritones: true, ..Default::default() };
///
/// let result = classify(&[60, 66], &key, modes);
/// assert!(result.iter().all(|h| h.matches.tritones));
/// ```
pub fn classify(notes: &[MidiNumber], key: &KeySignature, modes: HighlightModes) -> Vec<NoteHighlight> {
    let notes: Vec<MidiNumber> = notes
        .iter()
        .copied()
        .filter(|&n| {
            if n > MAX_MIDI {
                log::warn!("ignoring out-of-range MIDI number {} in classification", n);
            }
            n <= MAX_MIDI
        })
        .collect();
    let distinct: BTreeSet<MidiNumber> = notes.iter().copied().collect();
    let tonic = key.tonic_pitch_class();

    log::trace!("classifying {} notes with {:?}", distinct.len(), modes);

    distinct
        .into_iter()
        .map(|n| {
            let pc = pitch_class(n);
            let same_class = || notes.iter().filter(move |&&m| pitch_class(m) == pc);

            let matches = ModeMatches {
                roots: modes.roots && tonic == Some(pc),
                doubles: modes.doubles && same_class().count() >= 2,
                tritones: modes.tritones
                    && notes.iter().any(|&m| (pitch_class(m) + 12 - pc) % 12 == 6),
                octaves: modes.octaves && same_class().any(|&m| octave(m) != octave(n)),
            };

            NoteHighlight {
                midi: n,
                matches,
                color: None,
            }
        })
        .collect()
}
