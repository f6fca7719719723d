//! # Pitch Types
//!
//! Basic pitch vocabulary shared by the key table, the speller and the
//! highlight classifier.
//!
//! ## MIDI Conventions
//! - MIDI numbers run 0-127, middle C is 60 (C4)
//! - Pitch class = `n % 12` (C = 0 ... B = 11)
//! - Octave = `n / 12 - 1`, so MIDI 0 is in octave -1
//!
//! ## Accidental vs Modifier
//! - [`Accidental`] is the inflection a note is *spelled* with (F# is F + sharp)
//! - [`Modifier`] is the glyph actually drawn next to the note head, which
//!   depends on the key signature: F# in D major is drawn with no glyph, F in
//!   D major is drawn with a natural sign

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HarmonyError;

/// A MIDI note number (0-127)
pub type MidiNumber = u8;

/// Highest legal MIDI note number
pub const MAX_MIDI: MidiNumber = 127;

/// First MIDI number drawn on the treble staff (middle C)
pub const TREBLE_THRESHOLD: MidiNumber = 60;

/// Pitch class of a MIDI number (C = 0 ... B = 11)
pub fn pitch_class(n: MidiNumber) -> u8 {
    n % 12
}

/// Octave of a MIDI number, 60 => 4
pub fn octave(n: MidiNumber) -> i8 {
    (n / 12) as i8 - 1
}

/// Note letters A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum NoteLetter {
    #[default]
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    /// Pitch class of the unaltered letter
    pub fn pitch_class(&self) -> u8 {
        match self {
            NoteLetter::C => 0,
            NoteLetter::D => 2,
            NoteLetter::E => 4,
            NoteLetter::F => 5,
            NoteLetter::G => 7,
            NoteLetter::A => 9,
            NoteLetter::B => 11,
        }
    }

    /// Parse an upper- or lower-case letter
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'C' => Some(NoteLetter::C),
            'D' => Some(NoteLetter::D),
            'E' => Some(NoteLetter::E),
            'F' => Some(NoteLetter::F),
            'G' => Some(NoteLetter::G),
            'A' => Some(NoteLetter::A),
            'B' => Some(NoteLetter::B),
            _ => None,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            NoteLetter::C => 'C',
            NoteLetter::D => 'D',
            NoteLetter::E => 'E',
            NoteLetter::F => 'F',
            NoteLetter::G => 'G',
            NoteLetter::A => 'A',
            NoteLetter::B => 'B',
        }
    }
}

impl fmt::Display for NoteLetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Inflection a note is spelled with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Accidental {
    #[default]
    Natural, // plain letter
    Sharp, // #
    Flat,  // b
}

impl Accidental {
    /// Semitone offset applied to the letter
    pub fn semitones(&self) -> i8 {
        match self {
            Accidental::Natural => 0,
            Accidental::Sharp => 1,
            Accidental::Flat => -1,
        }
    }

    /// Text used inside spelled names: "", "#" or "b"
    pub fn symbol(&self) -> &'static str {
        match self {
            Accidental::Natural => "",
            Accidental::Sharp => "#",
            Accidental::Flat => "b",
        }
    }

    /// The glyph this inflection is drawn with when nothing overrides it
    pub fn as_modifier(&self) -> Modifier {
        match self {
            Accidental::Natural => Modifier::None,
            Accidental::Sharp => Modifier::Sharp,
            Accidental::Flat => Modifier::Flat,
        }
    }
}

/// Accidental glyph drawn next to a note head
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Modifier {
    #[default]
    #[serde(rename = "")]
    None, // covered by the key signature, or a plain letter
    #[serde(rename = "#")]
    Sharp,
    #[serde(rename = "b")]
    Flat,
    #[serde(rename = "n")]
    Natural, // explicit natural sign
}

impl Modifier {
    /// "", "#", "b" or "n"
    pub fn as_str(&self) -> &'static str {
        match self {
            Modifier::None => "",
            Modifier::Sharp => "#",
            Modifier::Flat => "b",
            Modifier::Natural => "n",
        }
    }

    pub fn is_none(&self) -> bool {
        *self == Modifier::None
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Staff a note is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clef {
    Treble,
    Bass,
}

impl Clef {
    /// Clef a MIDI number belongs to: 60 and above is treble, the rest bass
    pub fn of(n: MidiNumber) -> Self {
        if n >= TREBLE_THRESHOLD {
            Clef::Treble
        } else {
            Clef::Bass
        }
    }

    pub fn contains(&self, n: MidiNumber) -> bool {
        Clef::of(n) == *self
    }

    pub fn name(&self) -> &'static str {
        match self {
            Clef::Treble => "treble",
            Clef::Bass => "bass",
        }
    }
}

impl FromStr for Clef {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "treble" => Ok(Clef::Treble),
            "bass" => Ok(Clef::Bass),
            _ => Err(HarmonyError::InvalidClef(s.to_string())),
        }
    }
}

impl fmt::Display for Clef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A letter with its spelled inflection, without octave (e.g. `F#`, `Bb`, `E`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpelledPitch {
    pub letter: NoteLetter,
    pub accidental: Accidental,
}

impl SpelledPitch {
    pub fn new(letter: NoteLetter, accidental: Accidental) -> Self {
        Self { letter, accidental }
    }

    /// Pitch class this spelling sounds as (B# => 0, Cb => 11)
    pub fn pitch_class(&self) -> u8 {
        (self.letter.pitch_class() as i8 + self.accidental.semitones()).rem_euclid(12) as u8
    }

    /// Parse a spelling like "C", "F#", "Bb"
    pub fn parse(s: &str) -> Option<Self> {
        let mut chars = s.trim().chars();
        let letter = NoteLetter::from_char(chars.next()?)?;
        let accidental = match chars.next() {
            None => Accidental::Natural,
            Some('#') => Accidental::Sharp,
            Some('b') => Accidental::Flat,
            Some(_) => return None,
        };
        if chars.next().is_some() {
            return None;
        }
        Some(Self { letter, accidental })
    }
}

impl fmt::Display for SpelledPitch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.letter, self.accidental.symbol())
    }
}

impl Serialize for SpelledPitch {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A note spelled for the staff: letter, inflection, octave and the glyph
/// to draw.
///
/// `octave` is the *written* octave, which differs from the MIDI octave at
/// the B/C seam: MIDI 60 spelled B# is written in octave 3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spelling {
    pub pitch: SpelledPitch,
    pub octave: i8,
    pub modifier: Modifier,
}

impl Spelling {
    pub fn letter(&self) -> NoteLetter {
        self.pitch.letter
    }

    pub fn accidental(&self) -> Accidental {
        self.pitch.accidental
    }

    /// Whether a glyph is drawn next to the note
    pub fn has_accidental(&self) -> bool {
        !self.modifier.is_none()
    }

    /// Staff key string without inflection, e.g. "F/4"
    pub fn key(&self) -> String {
        format!("{}/{}", self.pitch.letter, self.octave)
    }

    /// Spelled name including inflection, e.g. "F#/4"
    pub fn name(&self) -> String {
        format!("{}/{}", self.pitch, self.octave)
    }
}
