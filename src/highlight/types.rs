//! Highlight type definitions
//!
//! This module defines the analysis modes and the per-note results of the
//! highlight classifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::HarmonyError;
use crate::pitch::MidiNumber;

/// One harmonic analysis mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightMode {
    /// Note is the tonic of the displayed key
    Roots,
    /// Another note shares the pitch class
    Doubles,
    /// Another note is a tritone away
    Tritones,
    /// Another note has the same pitch class in a different octave
    Octaves,
}

impl HighlightMode {
    pub const ALL: [HighlightMode; 4] = [
        HighlightMode::Roots,
        HighlightMode::Doubles,
        HighlightMode::Tritones,
        HighlightMode::Octaves,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HighlightMode::Roots => "roots",
            HighlightMode::Doubles => "doubles",
            HighlightMode::Tritones => "tritones",
            HighlightMode::Octaves => "octaves",
        }
    }
}

impl FromStr for HighlightMode {
    type Err = HarmonyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "roots" | "root" => Ok(HighlightMode::Roots),
            "doubles" | "double" => Ok(HighlightMode::Doubles),
            "tritones" | "tritone" => Ok(HighlightMode::Tritones),
            "octaves" | "octave" => Ok(HighlightMode::Octaves),
            other => Err(HarmonyError::Config(format!("unknown highlight mode '{}'", other))),
        }
    }
}

impl fmt::Display for HighlightMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which analysis modes are enabled
///
/// Owned by the caller and passed into every classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightModes {
    pub roots: bool,
    pub doubles: bool,
    pub tritones: bool,
    pub octaves: bool,
}

impl HighlightModes {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn all() -> Self {
        Self {
            roots: true,
            doubles: true,
            tritones: true,
            octaves: true,
        }
    }

    /// Copy with one more mode enabled
    pub fn with(mut self, mode: HighlightMode) -> Self {
        self.set(mode, true);
        self
    }

    pub fn set(&mut self, mode: HighlightMode, enabled: bool) {
        match mode {
            HighlightMode::Roots => self.roots = enabled,
            HighlightMode::Doubles => self.doubles = enabled,
            HighlightMode::Tritones => self.tritones = enabled,
            HighlightMode::Octaves => self.octaves = enabled,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.roots || self.doubles || self.tritones || self.octaves)
    }
}

impl FromStr for HighlightModes {
    type Err = HarmonyError;

    /// Parse a comma-separated list such as `"roots,tritones"`; `"all"` and
    /// `"none"` are accepted as shorthands.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => return Ok(Self::all()),
            "" | "none" => return Ok(Self::none()),
            _ => {}
        }
        s.split(',')
            .map(str::parse::<HighlightMode>)
            .try_fold(Self::none(), |modes, mode| Ok(modes.with(mode?)))
    }
}

/// Modes a single note matched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ModeMatches {
    pub roots: bool,
    pub doubles: bool,
    pub tritones: bool,
    pub octaves: bool,
}

impl ModeMatches {
    pub fn matches(&self, mode: HighlightMode) -> bool {
        match mode {
            HighlightMode::Roots => self.roots,
            HighlightMode::Doubles => self.doubles,
            HighlightMode::Tritones => self.tritones,
            HighlightMode::Octaves => self.octaves,
        }
    }

    pub fn any(&self) -> bool {
        self.roots || self.doubles || self.tritones || self.octaves
    }

    /// Matched modes in declaration order
    pub fn modes(&self) -> Vec<HighlightMode> {
        HighlightMode::ALL
            .into_iter()
            .filter(|&mode| self.matches(mode))
            .collect()
    }
}

/// Classification of one active note
///
/// # Fields
/// - `midi`: the note
/// - `matches`: every enabled mode the note satisfies
/// - `color`: colour picked by a caller's palette, if one was applied
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteHighlight {
    pub midi: MidiNumber,
    pub matches: ModeMatches,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}
