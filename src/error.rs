//! Error types for hamster encoding.
//!
//! This module provides typed error reporting for every failure mode of the
//! codec and the serde bridge. Earlier renditions of this format failed
//! silently: invalid hex characters vanished, characters missing from the
//! dictionary were coded as zero, and oversized integers lost precision
//! without notice. Here each of those conditions is a distinct error.
//!
//! ## Error Categories
//!
//! - **Malformed Input**: a character outside the expected alphabet (hex,
//!   decimal, base32, base64), reported with its position
//! - **Domain Violations**: negative or fractional numbers reaching the
//!   integer variants, digits too wide for their declared chunk width
//! - **Dictionary Misses**: a string character absent from the active
//!   dictionary
//! - **Precision Overflow**: decoded values exceeding `u64`
//!
//! ## Examples
//!
//! ```rust
//! use serde_hamster::base32;
//!
//! let err = base32::decimal_to_base32("12x4").unwrap_err();
//! assert!(err.to_string().contains("'x'"));
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during hamster encoding.
///
/// Encoding is a total function on valid input, so every variant signals a
/// problem with the value being packed rather than a transient condition.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// IO error during writing
    #[error("IO error: {0}")]
    Io(String),

    /// A character outside the expected alphabet for the named input kind
    #[error("malformed {kind} input: unexpected character {found:?} at position {pos}")]
    MalformedInput {
        kind: &'static str,
        found: char,
        pos: usize,
    },

    /// A negative number reached an integer variant
    #[error("integer values must be non-negative, got {0}")]
    NegativeValue(String),

    /// A fractional number reached an integer variant
    #[error("integer values must be whole numbers, got {0}")]
    NonIntegerValue(String),

    /// A character being packed is absent from the active dictionary
    #[error("character {0:?} is not present in the active dictionary")]
    DictionaryMiss(char),

    /// A decoded value does not fit in a `u64`
    #[error("decoded value exceeds 64-bit integer precision")]
    PrecisionOverflow,

    /// A chunk width outside the supported range
    #[error("chunk width must be between 1 and 64 bits, got {0}")]
    InvalidWidth(u32),

    /// A digit wider than its declared chunk width
    #[error("digit {digit} does not fit in {width} bits")]
    DigitOverflow { digit: u64, width: u32 },

    /// Unsupported type for serialization
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a malformed-input error for a single offending character.
    ///
    /// `kind` names the expected alphabet and `pos` is the byte offset of the
    /// character in the input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::Error;
    ///
    /// let err = Error::malformed("hex", 'g', 3);
    /// assert!(err.to_string().contains("position 3"));
    /// ```
    pub fn malformed(kind: &'static str, found: char, pos: usize) -> Self {
        Error::MalformedInput { kind, found, pos }
    }

    /// Creates an unsupported type error for types that cannot be encoded as hamster.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
