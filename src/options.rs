//! Configuration options for hamster encoding.
//!
//! The wire format itself is fixed; the one encoding choice is how
//! dictionary codes are assigned to characters, controlled through
//! [`EncodeOptions`] and [`DictionaryOrder`](crate::DictionaryOrder).
//!
//! ## Examples
//!
//! ```rust
//! use serde_hamster::{encode_with_options, DictionaryOrder, EncodeOptions, Value};
//!
//! let value = Value::from("ba");
//!
//! // Default: codes follow first appearance in the value tree.
//! let doc = encode_with_options(&value, &EncodeOptions::new()).unwrap();
//! assert_eq!(doc, "hamster.::ba.::s1l6");
//!
//! // Sorted: codes follow character order, independent of the input.
//! let doc = encode_with_options(&value, &EncodeOptions::sorted()).unwrap();
//! assert_eq!(doc, "hamster.::ab.::s1l9");
//! ```

use crate::dict::DictionaryOrder;

/// Configuration options for hamster encoding.
///
/// Controls how the string dictionary assigns codes to characters. Two
/// documents for the same value are byte-identical whenever they were
/// produced with the same (deterministic) order.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::{DictionaryOrder, EncodeOptions};
///
/// // Default: first-seen assignment, fully deterministic.
/// let options = EncodeOptions::new();
///
/// // Character-order assignment.
/// let options = EncodeOptions::sorted();
///
/// // Reproducible permutation from a fixed seed.
/// let options = EncodeOptions::shuffled(7);
///
/// // Fresh entropy on every call.
/// let options =
///     EncodeOptions::new().with_dictionary_order(DictionaryOrder::Shuffled { seed: None });
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    pub dictionary_order: DictionaryOrder,
}

impl EncodeOptions {
    /// Creates default options (first-seen dictionary assignment).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::{DictionaryOrder, EncodeOptions};
    ///
    /// let options = EncodeOptions::new();
    /// assert_eq!(options.dictionary_order, DictionaryOrder::FirstSeen);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options that assign dictionary codes in character order.
    ///
    /// Sorted assignment makes the dictionary independent of where strings
    /// sit in the value tree, so reordering object entries does not change
    /// the dictionary segment.
    #[must_use]
    pub fn sorted() -> Self {
        EncodeOptions {
            dictionary_order: DictionaryOrder::Sorted,
        }
    }

    /// Creates options that shuffle dictionary codes with a fixed seed.
    ///
    /// The permutation is reproducible: the same corpus and seed always
    /// yield the same document.
    #[must_use]
    pub fn shuffled(seed: u64) -> Self {
        EncodeOptions {
            dictionary_order: DictionaryOrder::Shuffled { seed: Some(seed) },
        }
    }

    /// Sets the dictionary assignment order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::{DictionaryOrder, EncodeOptions};
    ///
    /// let options = EncodeOptions::new().with_dictionary_order(DictionaryOrder::Sorted);
    /// assert_eq!(options.dictionary_order, DictionaryOrder::Sorted);
    /// ```
    #[must_use]
    pub fn with_dictionary_order(mut self, order: DictionaryOrder) -> Self {
        self.dictionary_order = order;
        self
    }
}
