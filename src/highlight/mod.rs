//! # Highlight Module
//!
//! Harmonic classification of the active notes for pedagogical colouring.
//!
//! ## Purpose
//! Given every active note (both staves), the key signature and the set of
//! enabled analysis modes, report per note which modes it matches:
//! 1. **roots** - pitch class is the tonic of the displayed key
//! 2. **doubles** - at least two active notes share the pitch class
//! 3. **tritones** - another active note is six semitones away (mod 12)
//! 4. **octaves** - the same pitch class sounds in a different octave
//!
//! A note may match several modes at once. Turning those matches into a single
//! colour is the job of a caller-supplied [`HighlightPalette`].
//!
//! ## Sub-modules
//! - `types` - HighlightMode, HighlightModes, ModeMatches, NoteHighlight
//! - `classifier` - the classification pass
//! - `palette` - priority + colour resolution
//!
//! ## Example
//! ```rust
//! use harmony::highlight::{classify, HighlightModes};
//! use harmony::KeySignature;
//!
//! let key = KeySignature::builtin("C major").unwrap();
//! let modes = HighlightModes { roots: true, ..Default::default() };
//!
//! let result = classify(&[60, 64, 67], &key, modes);
//! assert!(result[0].matches.roots);   // C
//! assert!(!result[1].matches.roots);  // E
//! assert!(!result[2].matches.roots);  // G
//! ```
//!
//! ## Doubles vs Octaves
//! Over a [`crate::PitchSet`] every MIDI number appears once, so two notes
//! sharing a pitch class are always octave-displaced and the two modes agree.
//! They differ only when the input repeats a MIDI number: the repeat is a
//! double but not an octave.

mod classifier;
mod palette;
mod types;


pub use classifier::classify;
pub use palette::HighlightPalette;
pub use types::{HighlightMode, HighlightModes, ModeMatches, NoteHighlight};
