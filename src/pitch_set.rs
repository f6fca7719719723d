//! Set of currently sounding MIDI notes.
//!
//! Stored as a 128-bit mask, one bit per MIDI number. Iteration is always
//! ascending, which keeps clef projections and highlight output stable from
//! one pass to the next.

use crate::pitch::{Clef, MidiNumber, MAX_MIDI};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct PitchSet {
    mask: u128,
}

impl PitchSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Turn a note on. Returns `true` if the set changed.
    ///
    /// Numbers above 127 are ignored.
    pub fn note_on(&mut self, n: MidiNumber) -> bool {
        if n > MAX_MIDI {
            log::warn!("ignoring note on for out-of-range MIDI number {}", n);
            return false;
        }
        let before = self.mask;
        self.mask |= 1u128 << n;
        before != self.mask
    }

    /// Turn a note off. Returns `true` if the set changed.
    pub fn note_off(&mut self, n: MidiNumber) -> bool {
        if n > MAX_MIDI {
            log::warn!("ignoring note off for out-of-range MIDI number {}", n);
            return false;
        }
        let before = self.mask;
        self.mask &= !(1u128 << n);
        before != self.mask
    }

    pub fn contains(&self, n: MidiNumber) -> bool {
        n <= MAX_MIDI && self.mask & (1u128 << n) != 0
    }

    /// Turn every note off. Returns `true` if any note was on.
    pub fn clear(&mut self) -> bool {
        let changed = self.mask != 0;
        self.mask = 0;
        changed
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    pub fn len(&self) -> usize {
        self.mask.count_ones() as usize
    }

    /// Active notes in ascending order
    pub fn iter(&self) -> impl Iterator<Item = MidiNumber> + '_ {
        let mask = self.mask;
        (0..=MAX_MIDI).filter(move |&n| mask & (1u128 << n) != 0)
    }

    /// Active notes belonging to one clef, ascending
    pub fn notes_in(&self, clef: Clef) -> Vec<MidiNumber> {
        self.iter().filter(|&n| clef.contains(n)).collect()
    }

    pub fn to_vec(&self) -> Vec<MidiNumber> {
        self.iter().collect()
    }
}

impl FromIterator<MidiNumber> for PitchSet {
    fn from_iter<I: IntoIterator<Item = MidiNumber>>(iter: I) -> Self {
        let mut set = PitchSet::new();
        for n in iter {
            set.note_on(n);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_on_off_reports_change() {
        let mut set = PitchSet::new();
        assert!(set.note_on(60));
        assert!(!set.note_on(60), "second note on is a no-op");
        assert!(set.contains(60));
        assert_eq!(set.len(), 1);

        assert!(set.note_off(60));
        assert!(!set.note_off(60), "second note off is a no-op");
        assert!(set.is_empty());
    }

    #[test]
    fn test_out_of_range_is_ignored() {
        let mut set = PitchSet::new();
        assert!(!set.note_on(128));
        assert!(!set.note_off(200));
        assert!(!set.contains(128));
        assert!(set.is_empty());
    }

    #[test]
    fn test_extremes() {
        let set: PitchSet = [0, 127].into_iter().collect();
        assert_eq!(set.to_vec(), vec![0, 127]);
        assert_eq!(set.notes_in(Clef::Bass), vec![0]);
        assert_eq!(set.notes_in(Clef::Treble), vec![127]);
    }

    #[test]
    fn test_iteration_is_ascending() {
        let set: PitchSet = [72, 48, 60, 59].into_iter().collect();
        assert_eq!(set.to_vec(), vec![48, 59, 60, 72]);
        assert_eq!(set.notes_in(Clef::Treble), vec![60, 72]);
        assert_eq!(set.notes_in(Clef::Bass), vec![48, 59]);
    }

    #[test]
    fn test_clear() {
        let mut set: PitchSet = [60, 64, 67].into_iter().collect();
        assert!(set.clear());
        assert!(!set.clear());
        assert!(set.is_empty());
    }
}
