//! Same-letter doubling on one staff.
//!
//! When an altered note and the unaltered note on the same letter and octave
//! sound together (F#4 with F4), the unaltered one must carry an explicit
//! natural, whatever the key signature says. Without it the reader would
//! carry the sharp across to the plain F.

use crate::pitch::{Accidental, Modifier, Spelling};

/// Modifiers for one staff after doubling resolution, index-aligned with
/// `spellings`.
///
/// Each unaltered note that shares letter and octave with an altered note of
/// the same staff gets [`Modifier::Natural`]; every other note keeps the
/// modifier computed by the key signature. An index forced by this rule is
/// never reconsidered.
///
/// # Example
/// ```
/// use harmony::{resolve_doublings, KeySignature, Modifier};
///
/// let key = KeySignature::builtin("C").unwrap();
/// let spellings = vec![key.spelling_of(6, 4), key.spelling_of(5, 4)]; // F#4, F4
///
/// let modifiers = resolve_doublings(&spellings);
/// assert_eq!(modifiers, vec![Modifier::Sharp, Modifier::Natural]);
/// ```
pub fn resolve_doublings(spellings: &[Spelling]) -> Vec<Modifier> {
    let mut modifiers: Vec<Modifier> = spellings.iter().map(|s| s.modifier).collect();
    let mut forced = vec![false; spellings.len()];

    for (i, note) in spellings.iter().enumerate() {
        if forced[i] {
            continue;
        }

        let partner = spellings.iter().enumerate().position(|(j, other)| {
            j != i
                && other.letter() == note.letter()
                && other.octave == note.octave
                && other.accidental() == Accidental::Natural
        });

        if let Some(j) = partner {
            modifiers[j] = Modifier::Natural;
            forced[j] = true;
        }
    }

    modifiers
}
