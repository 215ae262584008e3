//! Dictionary-based string compression.
//!
//! Hamster does not ship a fixed character encoding. Each document instead
//! carries its own dictionary: every distinct character occurring in any of
//! the document's strings gets a small positive code, and all strings pack
//! their code sequences through the base32 codec at one shared bit-width,
//! the minimum that fits the largest code. Code `0` is reserved for
//! "character not in the dictionary" and is never assigned.
//!
//! A dictionary is built once per top-level serialization call from the
//! complete string corpus of the value being encoded, and the character list
//! in assigned order travels in the document envelope so any reader can
//! reverse the mapping.
//!
//! ## Assignment Order
//!
//! The character-to-code assignment is configurable via [`DictionaryOrder`]:
//! discovery order (the default, reproducible), sorted, or shuffled with an
//! optional seed for reproducible obfuscation.
//!
//! ## Examples
//!
//! ```rust
//! use serde_hamster::Dictionary;
//!
//! let dict = Dictionary::new(["hi"]);
//! assert_eq!(dict.chars(), "hi");
//! assert_eq!(dict.width(), 2);
//! assert_eq!(dict.code('h'), Some(1));
//! assert_eq!(dict.encode("hi").unwrap(), "6");
//! ```

use indexmap::{IndexMap, IndexSet};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{thread_rng, SeedableRng};

use crate::base32;
use crate::error::{Error, Result};

/// How characters discovered in the corpus are ordered before codes are
/// assigned.
///
/// The order is visible on the wire (the envelope carries the characters in
/// assigned order), so it decides whether the same input always produces the
/// same document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DictionaryOrder {
    /// Corpus scan order. Deterministic, the default.
    #[default]
    FirstSeen,
    /// Characters sorted by code point. Deterministic and independent of
    /// where characters occur in the corpus.
    Sorted,
    /// Random permutation. With a seed the output is reproducible; without
    /// one, encoding the same value twice yields different documents.
    Shuffled { seed: Option<u64> },
}

/// A character-to-code bijection shared by every string in one document.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::{Dictionary, DictionaryOrder};
///
/// let dict = Dictionary::with_order(["ba"], DictionaryOrder::Sorted);
/// assert_eq!(dict.chars(), "ab");
/// assert_eq!(dict.encode("ba").unwrap(), "9");
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Dictionary {
    codes: IndexMap<char, u64>,
    width: u32,
}

impl Dictionary {
    /// Builds a dictionary over a corpus of strings in first-seen order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::Dictionary;
    ///
    /// let dict = Dictionary::new(["abc", "cba"]);
    /// assert_eq!(dict.chars(), "abc");
    /// assert_eq!(dict.len(), 3);
    /// ```
    pub fn new<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_order(corpus, DictionaryOrder::FirstSeen)
    }

    /// Builds a dictionary with an explicit assignment order.
    pub fn with_order<I, S>(corpus: I, order: DictionaryOrder) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen: IndexSet<char> = IndexSet::new();
        for s in corpus {
            for ch in s.as_ref().chars() {
                seen.insert(ch);
            }
        }

        let mut characters: Vec<char> = seen.into_iter().collect();
        match order {
            DictionaryOrder::FirstSeen => {}
            DictionaryOrder::Sorted => characters.sort_unstable(),
            DictionaryOrder::Shuffled { seed: Some(seed) } => {
                characters.shuffle(&mut StdRng::seed_from_u64(seed));
            }
            DictionaryOrder::Shuffled { seed: None } => {
                characters.shuffle(&mut thread_rng());
            }
        }

        let codes: IndexMap<char, u64> = characters
            .into_iter()
            .enumerate()
            .map(|(i, ch)| (ch, i as u64 + 1))
            .collect();
        let width = bits_for(codes.len());

        Dictionary { codes, width }
    }

    /// The dictionary's characters in assigned order, as emitted in the
    /// document envelope.
    #[must_use]
    pub fn chars(&self) -> String {
        self.codes.keys().collect()
    }

    /// The shared bit-width every string in the document packs at.
    ///
    /// Always at least 1, even for an empty dictionary, so the codec never
    /// sees a zero-width digit.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Number of distinct characters in the dictionary.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Returns `true` if the corpus contained no characters at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Looks up the code assigned to a character. Codes start at 1.
    #[inline]
    #[must_use]
    pub fn code(&self, ch: char) -> Option<u64> {
        self.codes.get(&ch).copied()
    }

    /// Packs a string as its code sequence at the dictionary's bit-width.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DictionaryMiss`] for any character that was not in
    /// the corpus this dictionary was built from. Earlier renditions of the
    /// format coded such characters as 0, corrupting the output; a miss here
    /// always means the caller packed a string it never declared.
    pub fn encode(&self, value: &str) -> Result<String> {
        let mut digits = Vec::with_capacity(value.len());
        for ch in value.chars() {
            match self.code(ch) {
                Some(code) => digits.push(code),
                None => return Err(Error::DictionaryMiss(ch)),
            }
        }
        base32::digits_to_base32(&digits, self.width)
    }
}

/// Minimum bit-width that fits `count` codes plus the reserved zero.
fn bits_for(count: usize) -> u32 {
    (usize::BITS - count.leading_zeros()).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let dict = Dictionary::new(["hi"]);
        assert_eq!(dict.chars(), "hi");
        assert_eq!(dict.code('h'), Some(1));
        assert_eq!(dict.code('i'), Some(2));
        assert_eq!(dict.code('x'), None);
    }

    #[test]
    fn test_duplicate_characters_coded_once() {
        let dict = Dictionary::new(["aabbaa", "ab"]);
        assert_eq!(dict.chars(), "ab");
        assert_eq!(dict.len(), 2);
    }

    #[test]
    fn test_sorted_order() {
        let dict = Dictionary::with_order(["ba"], DictionaryOrder::Sorted);
        assert_eq!(dict.chars(), "ab");
        assert_eq!(dict.encode("ba").unwrap(), "9");
    }

    #[test]
    fn test_first_seen_vs_sorted_wire_difference() {
        let first_seen = Dictionary::new(["ba"]);
        assert_eq!(first_seen.chars(), "ba");
        assert_eq!(first_seen.encode("ba").unwrap(), "6");
    }

    #[test]
    fn test_width_tracks_distinct_count() {
        assert_eq!(Dictionary::new(["a"]).width(), 1);
        assert_eq!(Dictionary::new(["ab"]).width(), 2);
        assert_eq!(Dictionary::new(["abc"]).width(), 2);
        assert_eq!(Dictionary::new(["abcd"]).width(), 3);
        assert_eq!(Dictionary::new(["abcdefg"]).width(), 3);
        assert_eq!(Dictionary::new(["abcdefgh"]).width(), 4);
    }

    #[test]
    fn test_empty_corpus() {
        let dict = Dictionary::new(Vec::<String>::new());
        assert!(dict.is_empty());
        assert_eq!(dict.chars(), "");
        assert_eq!(dict.width(), 1);
        assert_eq!(dict.encode("").unwrap(), "");
    }

    #[test]
    fn test_encode_simple() {
        let dict = Dictionary::new(["hi"]);
        assert_eq!(dict.width(), 2);
        assert_eq!(dict.encode("hi").unwrap(), "6");
        assert_eq!(dict.encode("abc").unwrap_err(), Error::DictionaryMiss('a'));
    }

    #[test]
    fn test_all_codes_positive_and_in_range() {
        let dict = Dictionary::new(["the quick brown fox"]);
        let max = 1u64 << dict.width();
        for ch in "the quick brown fox".chars() {
            let code = dict.code(ch).unwrap();
            assert!(code >= 1 && code < max, "code {} out of range", code);
        }
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let order = DictionaryOrder::Shuffled { seed: Some(42) };
        let a = Dictionary::with_order(["hello world"], order);
        let b = Dictionary::with_order(["hello world"], order);
        assert_eq!(a.chars(), b.chars());
        assert_eq!(a.encode("hello").unwrap(), b.encode("hello").unwrap());
    }

    #[test]
    fn test_shuffle_preserves_character_set() {
        let order = DictionaryOrder::Shuffled { seed: None };
        let dict = Dictionary::with_order(["hello"], order);
        assert_eq!(dict.len(), 4);
        let mut chars: Vec<char> = dict.chars().chars().collect();
        chars.sort_unstable();
        assert_eq!(chars, vec!['e', 'h', 'l', 'o']);
    }

    #[test]
    fn test_unicode_corpus() {
        let dict = Dictionary::new(["héllo ↑"]);
        assert_eq!(dict.len(), 6);
        assert!(dict.code('é').is_some());
        assert!(dict.code('↑').is_some());
        assert!(dict.encode("héllo ↑").is_ok());
    }
}
