//! Shuffled playback sequence with a wrap-around cursor.

use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::Error;

/// Ordered list of image paths plus the index of the next entry to show.
///
/// The order is fixed once built; the only mutation is [`PlaybackSequence::remove`],
/// which keeps the relative order of the remaining entries.
#[derive(Debug, Clone)]
pub struct PlaybackSequence {
    items: Vec<PathBuf>,
    cursor: usize,
}

impl PlaybackSequence {
    /// Construct a sequence from paths in the given order.
    ///
    /// # Errors
    /// Returns [`Error::EmptyScan`] if `items` is empty.
    pub fn from_vec(items: Vec<PathBuf>) -> Result<Self, Error> {
        if items.is_empty() {
            return Err(Error::EmptyScan);
        }
        Ok(Self { items, cursor: 0 })
    }

    /// Shuffle `items` uniformly and build a sequence from the result.
    ///
    /// A `seed` makes the order reproducible.
    ///
    /// # Errors
    /// Returns [`Error::EmptyScan`] if `items` is empty.
    pub fn shuffled(mut items: Vec<PathBuf>, seed: Option<u64>) -> Result<Self, Error> {
        match seed {
            Some(seed) => items.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => items.shuffle(&mut rand::rng()),
        }
        Self::from_vec(items)
    }

    /// Number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether every entry has been removed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Index of the next entry to show.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Borrow the entry at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&PathBuf> {
        self.items.get(index)
    }

    /// Move the cursor forward by one, wrapping at the end.
    pub fn step_forward(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.cursor = (self.cursor + 1) % self.items.len();
    }

    /// Move the cursor back by `steps`, wrapping at the start.
    pub fn step_back(&mut self, steps: usize) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len();
        self.cursor = (self.cursor + len - steps % len) % len;
    }

    /// Remove the entry at `index`, keeping the cursor on the same logical
    /// next entry.
    pub fn remove(&mut self, index: usize) -> Option<PathBuf> {
        if index >= self.items.len() {
            return None;
        }
        let removed = self.items.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.items.is_empty() {
            self.cursor = 0;
        } else {
            self.cursor %= self.items.len();
        }
        Some(removed)
    }

    /// Borrow the internal list (read-only).
    #[must_use]
    pub fn as_slice(&self) -> &[PathBuf] {
        &self.items
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(names: &[&str]) -> PlaybackSequence {
        PlaybackSequence::from_vec(names.iter().map(PathBuf::from).collect()).unwrap()
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            PlaybackSequence::from_vec(Vec::new()),
            Err(Error::EmptyScan)
        ));
    }

    #[test]
    fn cursor_wraps_both_ways() {
        let mut s = seq(&["a", "b", "c"]);
        s.step_forward();
        s.step_forward();
        s.step_forward();
        assert_eq!(s.cursor(), 0);
        s.step_back(2);
        assert_eq!(s.cursor(), 1);
        s.step_back(2);
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn step_back_on_single_entry_stays_put() {
        let mut s = seq(&["only"]);
        s.step_back(2);
        assert_eq!(s.cursor(), 0);
    }

    #[test]
    fn remove_before_cursor_shifts_it() {
        let mut s = seq(&["a", "b", "c", "d"]);
        s.step_forward();
        s.step_forward();
        assert_eq!(s.get(s.cursor()), Some(&PathBuf::from("c")));
        s.remove(1);
        assert_eq!(s.cursor(), 1);
        assert_eq!(s.get(s.cursor()), Some(&PathBuf::from("c")));
    }

    #[test]
    fn remove_last_wraps_cursor() {
        let mut s = seq(&["a", "b", "c"]);
        s.step_back(1);
        assert_eq!(s.cursor(), 2);
        s.remove(2);
        assert_eq!(s.cursor(), 0);
        assert_eq!(s.as_slice(), &[PathBuf::from("a"), PathBuf::from("b")]);
    }

    #[test]
    fn seeded_shuffle_is_a_permutation() {
        let items: Vec<PathBuf> = (0..20).map(|i| PathBuf::from(format!("{i}.png"))).collect();
        let a = PlaybackSequence::shuffled(items.clone(), Some(1)).unwrap();
        let b = PlaybackSequence::shuffled(items.clone(), Some(1)).unwrap();
        let c = PlaybackSequence::shuffled(items.clone(), Some(2)).unwrap();
        assert_eq!(a.as_slice(), b.as_slice());
        assert_ne!(a.as_slice(), c.as_slice());

        let mut sorted = a.as_slice().to_vec();
        sorted.sort();
        let mut expected = items;
        expected.sort();
        assert_eq!(sorted, expected);
    }
}
