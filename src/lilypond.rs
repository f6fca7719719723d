//! # LilyPond Chord Input
//!
//! Converts chords written in LilyPond pitch notation into MIDI
//! numbers, so exercises can be authored as text instead of played in.
//!
//! ## Syntax
//! - Each chord is a `<...>` group; anything outside the brackets (durations,
//!   bar checks) is ignored: `<c e g>1 <f a c'>2`
//! - A pitch is a note name `a`-`g` followed by any of:
//!   - `'` one octave up, `,` one octave down
//!   - `s` sharp, `f` flat (English names: `fs`, `bf`)
//!   - a digit, which sets the octave outright
//! - `\xNote` before a pitch marks it hidden (sounded but not shown)
//! - Input is case-insensitive
//!
//! ## Octaves
//! Octaves follow `octave * 12 + pitch`, so in octave 4 `c` is MIDI 48 (C3)
//! and `c'` is MIDI 60 (middle C). Within a chord every pitch is placed
//! relative to the chord's starting octave:
//! - a pitch whose letter is more than a fifth from the previous pitch's
//!   letter moves one octave towards it (`<c b>` is C3 over B2)
//! - `'` and `,` then shift it from there
//!
//! The first chord starts in octave 4; each later chord starts in the octave
//! of the previous chord's first pitch.
//!
//! ## Example
//! ```rust
//! use harmony::lilypond::parse_chords;
//!
//! let chords = parse_chords("<c' e' g'>1 <f, \\xNote c f a>1").unwrap();
//! assert_eq!(chords[0].visible, vec![60, 64, 67]);
//! // starts in the octave of c'
//! assert_eq!(chords[1].visible, vec![53, 65, 69]);
//! assert_eq!(chords[1].hidden, vec![60]);
//! ```

use serde::Serialize;

use crate::error::HarmonyError;
use crate::pitch::{MidiNumber, MAX_MIDI};
use crate::pitch_set::PitchSet;

const START_OCTAVE: i32 = 4;
const HIDDEN_MARK: char = 'x';
const HIDDEN_COMMAND: &str = "\\xNote";

/// MIDI content of one `<...>` chord
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LilyPondChord {
    pub visible: Vec<MidiNumber>,
    pub hidden: Vec<MidiNumber>,
}

impl LilyPondChord {
    /// Visible notes as a pitch set
    pub fn pitch_set(&self) -> PitchSet {
        self.visible.iter().copied().collect()
    }

    /// Visible and hidden notes together
    pub fn all_notes(&self) -> PitchSet {
        self.visible.iter().chain(&self.hidden).copied().collect()
    }
}

/// Parse every `<...>` chord in `text`
///
/// Each chord starts in the octave of the previous chord's first pitch. The
/// first malformed pitch fails the whole parse.
pub fn parse_chords(text: &str) -> Result<Vec<LilyPondChord>, HarmonyError> {
    let mut octave = START_OCTAVE;
    let mut chords = Vec::new();

    for body in extract_chords(text) {
        let (chord, next_octave) = parse_chord_from(body, octave)?;
        chords.push(chord);
        octave = next_octave;
    }
    log::debug!("parsed {} LilyPond chords", chords.len());
    Ok(chords)
}

/// Contents of every `<...>` group, brackets stripped
fn extract_chords(text: &str) -> Vec<&str> {
    let mut chords = Vec::new();
    let mut rest = text.trim();

    while let Some(open) = rest.find('<') {
        let after = &rest[open + 1..];
        match after.find('>') {
            Some(close) => {
                if close > 0 {
                    chords.push(&after[..close]);
                }
                rest = &after[close + 1..];
            }
            None => break,
        }
    }

    chords
}

/// Replace `\xNote` and the whitespace after it with the hidden marker
fn mark_hidden(chord: &str) -> String {
    let mut out = String::with_capacity(chord.len());
    let mut rest = chord;

    while let Some(pos) = rest.find(HIDDEN_COMMAND) {
        out.push_str(&rest[..pos]);
        out.push(HIDDEN_MARK);
        rest = rest[pos + HIDDEN_COMMAND.len()..].trim_start();
    }
    out.push_str(rest);
    out
}

const LETTERS: [char; 7] = ['c', 'd', 'e', 'f', 'g', 'a', 'b'];
const LETTER_PITCHES: [i32; 7] = [0, 2, 4, 5, 7, 9, 11];

fn letter_index(c: char) -> Option<usize> {
    LETTERS.iter().position(|&l| l == c)
}

/// Octave shift that keeps `current` within a fifth of `previous`
fn fifth_rule(previous: usize, current: usize) -> i32 {
    let steps = previous as i32 - current as i32;
    // count both ends of the interval
    let distance = if steps < 0 { steps - 1 } else { steps + 1 };
    if distance.abs() > 5 {
        distance.signum()
    } else {
        0
    }
}

/// Parse the inside of one chord, starting pitches at `start_octave`
pub fn parse_chord(chord: &str, start_octave: i32) -> Result<LilyPondChord, HarmonyError> {
    parse_chord_from(chord, start_octave).map(|(chord, _)| chord)
}

/// Parse one chord; also returns the octave the next chord starts in
fn parse_chord_from(chord: &str, start_octave: i32) -> Result<(LilyPondChord, i32), HarmonyError> {
    let normalized = mark_hidden(chord).to_lowercase();
    let normalized = normalized.trim();
    let error = |message: String| HarmonyError::LilyPond {
        chord: normalized.to_string(),
        message,
    };

    let mut result = LilyPondChord::default();
    let mut previous: Option<usize> = None;
    let mut first_octave: Option<i32> = None;

    for entry in normalized.split_whitespace() {
        let mut chars = entry.chars().peekable();

        let hidden = chars.peek() == Some(&HIDDEN_MARK);
        if hidden {
            chars.next();
        }

        let letter = chars
            .next()
            .and_then(letter_index)
            .ok_or_else(|| error(format!("missing or invalid note name in [{}]", entry)))?;

        let mut octave_change = previous.map_or(0, |p| fifth_rule(p, letter));
        let mut absolute_octave: Option<i32> = None;
        let mut alteration = 0;
        let mut unrecognized = String::new();

        for c in chars {
            match c {
                '\'' | ',' | '0'..='9' if absolute_octave.is_some() => {}
                '\'' => octave_change += 1,
                ',' => octave_change -= 1,
                's' => alteration += 1,
                'f' => alteration -= 1,
                d if d.is_ascii_digit() => absolute_octave = Some(d as i32 - '0' as i32),
                other => unrecognized.push(other),
            }
        }

        if !unrecognized.is_empty() {
            return Err(error(format!(
                "pitch [{}] contains unrecognized symbols: {}",
                entry, unrecognized
            )));
        }

        let octave = absolute_octave.unwrap_or(start_octave + octave_change);
        let midi = octave * 12 + LETTER_PITCHES[letter] + alteration;
        if !(0..=MAX_MIDI as i32).contains(&midi) {
            return Err(error(format!("pitch [{}] is outside the MIDI range", entry)));
        }

        first_octave.get_or_insert(octave);
        previous = Some(letter);

        if hidden {
            result.hidden.push(midi as MidiNumber);
        } else {
            result.visible.push(midi as MidiNumber);
        }
    }

    Ok((result, first_octave.unwrap_or(start_octave)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_octave_marks() {
        let chord = parse_chord("c c' c'' c,", START_OCTAVE).unwrap();
        assert_eq!(chord.visible, vec![48, 60, 72, 36]);
        assert!(chord.hidden.is_empty());
    }

    #[test]
    fn test_accidentals() {
        let chord = parse_chord("cs' css' ef' eff'", START_OCTAVE).unwrap();
        assert_eq!(chord.visible, vec![61, 62, 63, 62]);
    }

    #[test]
    fn test_fifth_rule() {
        // b is a seventh above c, so it lands a second below
        assert_eq!(parse_chord("c b", START_OCTAVE).unwrap().visible, vec![48, 47]);
        assert_eq!(parse_chord("b c", START_OCTAVE).unwrap().visible, vec![59, 60]);
        // a fifth stays put
        assert_eq!(parse_chord("c g", START_OCTAVE).unwrap().visible, vec![48, 55]);
        assert_eq!(parse_chord("c a", START_OCTAVE).unwrap().visible, vec![48, 45]);
        // marks apply after the rule
        assert_eq!(parse_chord("c b'", START_OCTAVE).unwrap().visible, vec![48, 59]);
    }

    #[test]
    fn test_octave_carries_between_chords() {
        let chords = parse_chords("<c' e'> <c e> <g, b,> <c e>").unwrap();
        assert_eq!(chords[0].visible, vec![60, 64]);
        assert_eq!(chords[1].visible, vec![60, 64]);
        assert_eq!(chords[2].visible, vec![55, 59]);
        assert_eq!(chords[3].visible, vec![48, 52]);
    }

    #[test]
    fn test_hidden_first_note_sets_carry() {
        let chords = parse_chords("<\\xNote c'' e''> <c>").unwrap();
        assert_eq!(chords[0].hidden, vec![72]);
        assert_eq!(chords[1].visible, vec![72]);
    }

    #[test]
    fn test_digit_sets_octave() {
        let chord = parse_chord("c5 a3", START_OCTAVE).unwrap();
        assert_eq!(chord.visible, vec![60, 45]);
    }

    #[test]
    fn test_hidden_notes() {
        let chords = parse_chords("<e c' g' bf'>1\n<f \\xNote c' \\xNote f' a'>1").unwrap();
        assert_eq!(chords.len(), 2);
        assert_eq!(chords[0].visible, vec![52, 60, 67, 70]);
        assert_eq!(chords[1].visible, vec![53, 69]);
        assert_eq!(chords[1].hidden, vec![60, 65]);
        assert_eq!(chords[1].all_notes().to_vec(), vec![53, 60, 65, 69]);
    }

    #[test]
    fn test_case_insensitive() {
        let chord = parse_chord("C' FS'", START_OCTAVE).unwrap();
        assert_eq!(chord.visible, vec![60, 66]);
    }

    #[test]
    fn test_pitch_set() {
        let chords = parse_chords("<fs' cs''>").unwrap();
        assert_eq!(chords[0].pitch_set().to_vec(), vec![66, 73]);
    }

    #[test]
    fn test_invalid_note_name() {
        let err = parse_chords("<c h g>").unwrap_err();
        match err {
            HarmonyError::LilyPond { chord, message } => {
                assert_eq!(chord, "c h g");
                assert!(message.contains("[h]"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_unrecognized_symbols() {
        let err = parse_chords("<c e! g>").unwrap_err();
        assert!(err.to_string().contains("unrecognized symbols: !"));
    }

    #[test]
    fn test_out_of_range() {
        assert!(parse_chords("<c,,,,,>").is_err());
        assert!(parse_chords("<c'''''''>").is_err());
    }

    #[test]
    fn test_text_outside_chords_is_ignored() {
        let chords = parse_chords("\\relative { <c e g>4 r4 | <> <d f a>2 }").unwrap();
        assert_eq!(chords.len(), 2);
        assert_eq!(chords[1].visible, vec![50, 53, 57]);
    }

    #[test]
    fn test_no_chords() {
        assert!(parse_chords("").unwrap().is_empty());
        assert!(parse_chords("<c e g").unwrap().is_empty());
    }
}
