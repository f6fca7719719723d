//! Caller-owned colour resolution.
//!
//! The classifier only reports which modes a note matched. Which single
//! colour to draw when several match is a styling decision, so it lives in a
//! palette the caller configures: an explicit priority list plus a colour per
//! mode. The crate ships no default priority.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::types::{HighlightMode, ModeMatches, NoteHighlight};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HighlightPalette {
    /// Modes in the order they win, highest first
    pub priority: Vec<HighlightMode>,
    pub colors: BTreeMap<HighlightMode, String>,
}

impl HighlightPalette {
    /// Colour of the highest-priority matched mode that has a colour
    pub fn resolve(&self, matches: &ModeMatches) -> Option<&str> {
        self.priority
            .iter()
            .filter(|&&mode| matches.matches(mode))
            .find_map(|mode| self.colors.get(mode))
            .map(String::as_str)
    }

    /// Fill in `color` on every highlight
    pub fn apply(&self, highlights: &mut [NoteHighlight]) {
        for highlight in highlights.iter_mut() {
            highlight.color = self.resolve(&highlight.matches).map(str::to_string);
        }
    }
}
