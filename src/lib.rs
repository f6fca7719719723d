pub mod config;
pub mod doubling;
pub mod error;
pub mod highlight;
pub mod key_signature;
pub mod key_table;
pub mod lilypond;
pub mod pitch;
pub mod pitch_set;
pub mod speller;
pub mod trainer;

pub use config::TrainerConfig;
pub use doubling::resolve_doublings;
pub use error::*;
pub use highlight::{classify, HighlightMode, HighlightModes, HighlightPalette, ModeMatches, NoteHighlight};
pub use key_signature::{KeySignature, Signature};
pub use key_table::{KeyEntry, KeyMode, KeyTable};
pub use pitch::*;
pub use pitch_set::PitchSet;
pub use speller::{note_keys_and_modifiers, spell_clef, spell_notes, staff_notes, SpelledNote, StaffNote};
pub use trainer::{Snapshot, Trainer};

/// Spell a set of MIDI numbers in `key` and return both staves.
/// This is the main entry point for one-shot callers.
pub fn spell(notes: &[MidiNumber], key: &str) -> Result<(Vec<StaffNote>, Vec<StaffNote>), HarmonyError> {
    let key = KeySignature::builtin(key)?;
    let set: PitchSet = notes.iter().copied().collect();
    Ok((
        staff_notes(&set, Clef::Treble, &key),
        staff_notes(&set, Clef::Bass, &key),
    ))
}
