//! # Key Table
//!
//! Static configuration mapping key identifiers to their signature, names and
//! 12-entry spelling table.
//!
//! The builtin table lives in `keys.yaml` next to this file and is parsed once
//! on first use. Custom tables can be loaded with [`KeyTable::from_yaml`];
//! both go through the same validation.
//!
//! ## Table Shape
//! Every entry must satisfy the preconditions the spelling algorithm relies on:
//! - exactly 12 spellings, spelling `i` sounds as pitch class `i`
//! - the signature is a valid spec (`^(#|b){0,7}$`)
//! - no spelling inflects a signature letter against the signature
//!   (a `Gb` in a key whose signature holds `G#`)
//!
//! ## Lookup
//! [`KeyTable::get`] accepts, in order of preference:
//! 1. the exact id (`"D"`, `"Dm"`) or short name (`"D"`, `"d"`)
//! 2. the id or display name, case-insensitive (`"dm"`, `"d minor"`)

use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::error::HarmonyError;
use crate::key_signature::Signature;
use crate::pitch::SpelledPitch;

const BUILTIN_KEYS: &str = include_str!("keys.yaml");

static BUILTIN: OnceLock<KeyTable> = OnceLock::new();

/// Mode of a key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyMode {
    Major,
    Minor,
}

/// Raw key entry for YAML deserialization
#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
struct RawKeyEntry {
    id: String,
    name: String,
    short_name: String,
    tonic: Option<String>,
    mode: Option<KeyMode>,
    #[serde(default)]
    signature: String,
    spelling: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct RawKeyTable {
    keys: Vec<RawKeyEntry>,
}

/// One resolved key of the table
#[derive(Debug, Clone, PartialEq)]
pub struct KeyEntry {
    pub id: String,
    pub name: String,
    pub short_name: String,
    pub tonic: Option<SpelledPitch>, // None for the key-less entry
    pub mode: Option<KeyMode>,
    pub signature_spec: String,
    pub spelling: [SpelledPitch; 12],
}

impl KeyEntry {
    /// Pitch class of the tonic, if the entry has one
    pub fn tonic_pitch_class(&self) -> Option<u8> {
        self.tonic.map(|t| t.pitch_class())
    }

    /// Canonical spelling of a pitch class under this key
    pub fn spelling_for(&self, pitch_class: u8) -> SpelledPitch {
        self.spelling[(pitch_class % 12) as usize]
    }

    fn from_raw(raw: RawKeyEntry) -> Result<Self, HarmonyError> {
        let bad = |message: String| HarmonyError::KeyTable(format!("key '{}': {}", raw.id, message));

        let signature = Signature::from_spec(&raw.signature).map_err(|e| bad(e.to_string()))?;

        if raw.spelling.len() != 12 {
            return Err(bad(format!("expected 12 spellings, found {}", raw.spelling.len())));
        }

        let mut spelling = [SpelledPitch::default(); 12];
        for (pitch_class, text) in raw.spelling.iter().enumerate() {
            let pitch = SpelledPitch::parse(text)
                .ok_or_else(|| bad(format!("unreadable spelling '{}'", text)))?;
            if pitch.pitch_class() as usize != pitch_class {
                return Err(bad(format!(
                    "spelling '{}' does not sound as pitch class {}",
                    text, pitch_class
                )));
            }
            if pitch.accidental != crate::pitch::Accidental::Natural
                && signature.needs_natural(pitch.letter)
                && !signature.contains(pitch.letter, pitch.accidental)
            {
                return Err(bad(format!(
                    "spelling '{}' contradicts signature '{}'",
                    text, raw.signature
                )));
            }
            spelling[pitch_class] = pitch;
        }

        let tonic = match &raw.tonic {
            Some(text) => Some(
                SpelledPitch::parse(text).ok_or_else(|| bad(format!("unreadable tonic '{}'", text)))?,
            ),
            None => None,
        };

        Ok(Self {
            id: raw.id,
            name: raw.name,
            short_name: raw.short_name,
            tonic,
            mode: raw.mode,
            signature_spec: raw.signature,
            spelling,
        })
    }
}

/// The full key table
#[derive(Debug, Clone, PartialEq)]
pub struct KeyTable {
    entries: Vec<KeyEntry>,
}

impl KeyTable {
    /// Parse and validate a key table document
    ///
    /// # Example
    /// ```
    /// use harmony::KeyTable;
    ///
    /// let table = KeyTable::from_yaml(r#"
    /// keys:
    ///   - id: C
    ///     name: C major
    ///     short-name: C
    ///     tonic: C
    ///     mode: major
    ///     signature: ""
    ///     spelling: [C, C#, D, Eb, E, F, F#, G, Ab, A, Bb, B]
    /// "#).unwrap();
    ///
    /// assert_eq!(table.get("c major").unwrap().id, "C");
    /// ```
    pub fn from_yaml(source: &str) -> Result<Self, HarmonyError> {
        let raw: RawKeyTable =
            serde_yaml::from_str(source).map_err(|e| HarmonyError::KeyTable(e.to_string()))?;

        let mut entries: Vec<KeyEntry> = Vec::with_capacity(raw.keys.len());
        for raw_entry in raw.keys {
            let entry = KeyEntry::from_raw(raw_entry)?;
            if entries.iter().any(|e| e.id.eq_ignore_ascii_case(&entry.id)) {
                return Err(HarmonyError::KeyTable(format!("duplicate key id '{}'", entry.id)));
            }
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(HarmonyError::KeyTable("table has no keys".to_string()));
        }

        log::debug!("loaded key table with {} keys", entries.len());
        Ok(Self { entries })
    }

    /// The table shipped with the crate
    pub fn builtin() -> &'static KeyTable {
        BUILTIN.get_or_init(|| {
            KeyTable::from_yaml(BUILTIN_KEYS).expect("builtin key table is valid")
        })
    }

    /// Resolve a key identifier
    pub fn get(&self, ident: &str) -> Result<&KeyEntry, HarmonyError> {
        let trimmed = ident.trim();

        self.entries
            .iter()
            .find(|e| e.id == trimmed)
            .or_else(|| self.entries.iter().find(|e| e.short_name == trimmed))
            .or_else(|| {
                self.entries.iter().find(|e| {
                    e.id.eq_ignore_ascii_case(trimmed) || e.name.eq_ignore_ascii_case(trimmed)
                })
            })
            .ok_or_else(|| HarmonyError::InvalidKey(ident.to_string()))
    }

    pub fn entries(&self) -> &[KeyEntry] {
        &self.entries
    }

    /// The first entry of the table, used when no key is configured
    pub fn default_entry(&self) -> &KeyEntry {
        &self.entries[0]
    }
}
