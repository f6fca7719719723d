//! # Trainer
//!
//! The state a notation trainer keeps between events: the active notes and
//! the key signature. This is the surface the event layer (MIDI input, UI
//! widgets) talks to, and the renderer reads from.
//!
//! ## Event Operations
//! - [`Trainer::note_on`] / [`Trainer::note_off`] - return `false` when the
//!   event changed nothing, so callers can skip a redraw
//! - key mutators mirroring [`KeySignature`]
//!
//! ## Render Operations
//! - [`Trainer::staff`] - spelled notes of one clef
//! - [`Trainer::highlights`] - per-note mode matches across both clefs
//! - [`Trainer::snapshot`] - everything above in one serialisable value
//!
//! ## Example
//! ```rust
//! use harmony::{Clef, HighlightModes, Trainer};
//!
//! let mut trainer = Trainer::new("D major").unwrap();
//! assert!(trainer.note_on(66));
//! assert!(!trainer.note_on(66)); // already on
//! trainer.note_on(73);
//!
//! let keys: Vec<String> = trainer.staff(Clef::Treble).into_iter().map(|n| n.key).collect();
//! assert_eq!(keys, vec!["F/4", "C/5"]);
//!
//! let modes = HighlightModes { roots: true, ..Default::default() };
//! assert!(trainer.highlights(modes).iter().all(|h| !h.matches.roots));
//! ```

use serde::Serialize;

use crate::config::TrainerConfig;
use crate::error::HarmonyError;
use crate::highlight::{classify, HighlightModes, HighlightPalette, NoteHighlight};
use crate::key_signature::{KeySignature, Signature};
use crate::key_table::KeyTable;
use crate::pitch::{Clef, MidiNumber, Modifier};
use crate::pitch_set::PitchSet;
use crate::speller::{note_keys_and_modifiers, staff_notes, StaffNote};

/// Active notes plus key signature
#[derive(Debug, Clone)]
pub struct Trainer<'t> {
    notes: PitchSet,
    key: KeySignature<'t>,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub key: String,
    pub key_name: String,
    pub signature_key: String,
    pub signature: Signature,
    pub treble: Vec<StaffNote>,
    pub bass: Vec<StaffNote>,
    pub highlights: Vec<NoteHighlight>,
}

impl Trainer<'static> {
    /// Trainer over the builtin key table with no notes on
    pub fn new(key: &str) -> Result<Self, HarmonyError> {
        Trainer::with_table(KeyTable::builtin(), key)
    }

    /// Trainer over the builtin key table, keys taken from the config
    pub fn from_config(config: &TrainerConfig) -> Result<Self, HarmonyError> {
        Trainer::from_config_with_table(KeyTable::builtin(), config)
    }
}

impl<'t> Trainer<'t> {
    pub fn with_table(table: &'t KeyTable, key: &str) -> Result<Self, HarmonyError> {
        Ok(Self {
            notes: PitchSet::new(),
            key: KeySignature::new(table, key)?,
        })
    }

    pub fn from_config_with_table(
        table: &'t KeyTable,
        config: &TrainerConfig,
    ) -> Result<Self, HarmonyError> {
        let key = config
            .key
            .as_deref()
            .unwrap_or_else(|| table.default_entry().id.as_str());
        let mut trainer = Trainer::with_table(table, key)?;
        if let Some(signature_key) = &config.signature_key {
            trainer.key.set_signature_key_only(signature_key)?;
        }
        Ok(trainer)
    }

    pub fn note_on(&mut self, n: MidiNumber) -> bool {
        self.notes.note_on(n)
    }

    pub fn note_off(&mut self, n: MidiNumber) -> bool {
        self.notes.note_off(n)
    }

    /// Turn every note off
    pub fn clear(&mut self) -> bool {
        self.notes.clear()
    }

    pub fn notes(&self) -> &PitchSet {
        &self.notes
    }

    pub fn key_signature(&self) -> &KeySignature<'t> {
        &self.key
    }

    pub fn set_displayed_key_only(&mut self, key: &str) -> Result<(), HarmonyError> {
        self.key.set_displayed_key_only(key)
    }

    pub fn set_signature_key_only(&mut self, key: &str) -> Result<(), HarmonyError> {
        self.key.set_signature_key_only(key)
    }

    pub fn set_displayed_and_signature_key(&mut self, key: &str) -> Result<(), HarmonyError> {
        self.key.set_displayed_and_signature_key(key)
    }

    /// Spelled notes of one clef, doubling naturals applied
    pub fn staff(&self, clef: Clef) -> Vec<StaffNote> {
        staff_notes(&self.notes, clef, &self.key)
    }

    /// Spelled notes of a clef given by name (`"treble"`, `"bass"`)
    pub fn staff_by_name(&self, clef: &str) -> Result<Vec<StaffNote>, HarmonyError> {
        Ok(self.staff(clef.parse()?))
    }

    /// `(key, modifier)` pairs of one clef
    pub fn note_keys_and_modifiers(&self, clef: Clef) -> Vec<(String, Modifier)> {
        note_keys_and_modifiers(&self.notes, clef, &self.key)
    }

    /// Mode matches of every active note, across both clefs
    pub fn highlights(&self, modes: HighlightModes) -> Vec<NoteHighlight> {
        classify(&self.notes.to_vec(), &self.key, modes)
    }

    pub fn snapshot(&self, modes: HighlightModes, palette: &HighlightPalette) -> Snapshot {
        let mut highlights = self.highlights(modes);
        palette.apply(&mut highlights);

        Snapshot {
            key: self.key.key().id.clone(),
            key_name: self.key.key().name.clone(),
            signature_key: self.key.signature_key().id.clone(),
            signature: self.key.signature().clone(),
            treble: self.staff(Clef::Treble),
            bass: self.staff(Clef::Bass),
            highlights,
        }
    }
}
