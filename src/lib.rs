//! # serde_hamster
//!
//! A Serde-compatible encoder for the hamster format: a compact,
//! self-describing text serialization built on base-32 bit packing.
//!
//! ## What is hamster?
//!
//! Hamster documents carry structured values (integers of any size, bit
//! arrays, strings, arrays, objects) as plain text over a 32-symbol
//! alphabet. Every block is tagged and length-prefixed, so a document
//! describes its own shape, and all strings in a document share one
//! character dictionary so repeated characters cost a few bits each.
//!
//! ## Key Features
//!
//! - **Self-describing**: every block starts with a type tag and a
//!   length header
//! - **Compact text**: payloads use the alphabet
//!   `0123456789abcdefghjkmnprstuvwxyz`, which omits `i`, `l`, `o`, and
//!   `q`, so the length separator `l` never collides with payload symbols
//! - **Dictionary-compressed strings**: characters are coded at the
//!   minimum bit-width the document's character set needs
//! - **Arbitrary precision**: integers beyond `u64` encode exactly via
//!   `num-bigint`
//! - **Serde compatible**: works with existing Rust types via
//!   `#[derive(Serialize)]`
//! - **Deterministic by default**: the same value always produces the
//!   same document
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! serde_hamster = "0.1"
//! serde = { version = "1.0", features = ["derive"] }
//! ```
//!
//! ### Basic Serialization
//!
//! ```rust
//! use serde::Serialize;
//! use serde_hamster::to_string;
//!
//! #[derive(Serialize)]
//! struct Point {
//!     x: u32,
//!     y: u32,
//! }
//!
//! let point = Point { x: 1, y: 2 };
//! let doc = to_string(&point).unwrap();
//! assert_eq!(doc, "hamster.::xy.::oel1l1i1l11l2i1l2");
//! ```
//!
//! ## Document Layout
//!
//! A document has three sections joined by `.::`:
//!
//! ```text
//! hamster.::a.::o7l1l1i1l5
//! \_____/   |   \_________/
//!  format   |    packed value: tag 'o', length header "7l",
//!  name     |    then one entry (key "a", value 5)
//!           |
//!           dictionary: character codes are positions here, plus one
//! ```
//!
//! Tags are `i` (integer), `b` (bit array), `s` (string), `a` (array),
//! `o` (object), and `0` (empty). There is no decoder for the composite
//! format; hamster is a write-side interchange format.
//!
//! ## Dynamic Values with the hamster! Macro
//!
//! ```rust
//! use serde_hamster::{hamster, Value};
//!
//! let data = hamster!({
//!     "name": "Alice",
//!     "age": 30,
//!     "tags": ["rust", "serde"]
//! });
//!
//! if let Value::Object(obj) = data {
//!     assert_eq!(obj.get("name").and_then(|v| v.as_str()), Some("Alice"));
//! }
//! ```
//!
//! ## Determinism
//!
//! Dictionary codes follow first appearance by default, so output is
//! reproducible. [`EncodeOptions`] switches to sorted assignment, or to a
//! seeded or entropy-driven shuffle when code assignment should not leak
//! corpus order.
//!
//! ## Examples
//!
//! See the `demos/` directory for runnable examples:
//!
//! - **`simple.rs`** - First hamster document from a derived struct
//! - **`dynamic_values.rs`** - Building values with the hamster! macro
//! - **`custom_options.rs`** - Dictionary ordering options
//!
//! Run any example with: `cargo run --example <name>`

pub mod base32;
pub mod bytes;
pub mod dict;
pub mod error;
pub mod macros;
pub mod map;
pub mod options;
pub mod ser;
pub mod value;

pub use dict::{Dictionary, DictionaryOrder};
pub use error::{Error, Result};
pub use map::ObjectMap;
pub use options::EncodeOptions;
pub use ser::ValueSerializer;
pub use value::Value;

use serde::Serialize;
use std::io;

/// Leading identifier of every hamster document.
pub const FORMAT_NAME: &str = "hamster";

/// Separator between the format name, dictionary, and payload sections.
///
/// None of its characters appear in the base32 alphabet.
pub const DELIMITER: &str = ".::";

/// Encodes a [`Value`] tree as a complete hamster document.
///
/// Collects every string reachable in the tree, builds the character
/// dictionary in first-seen order, packs the tree against it, and joins
/// the three document sections.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::{encode, Value};
///
/// let doc = encode(&Value::from("hi")).unwrap();
/// assert_eq!(doc, "hamster.::hi.::s1l6");
///
/// let doc = encode(&Value::Empty).unwrap();
/// assert_eq!(doc, "hamster.::.::0l");
/// ```
///
/// # Errors
///
/// Returns an error if the tree cannot be packed, for example a bit array
/// holding a digit wider than its declared width.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode(value: &Value) -> Result<String> {
    encode_with_options(value, &EncodeOptions::default())
}

/// Encodes a [`Value`] tree as a hamster document with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::{encode_with_options, hamster, EncodeOptions};
///
/// let value = hamster!({ "a": 5 });
/// let doc = encode_with_options(&value, &EncodeOptions::new()).unwrap();
/// assert_eq!(doc, "hamster.::a.::o7l1l1i1l5");
/// ```
///
/// # Errors
///
/// Returns an error if the tree cannot be packed.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn encode_with_options(value: &Value, options: &EncodeOptions) -> Result<String> {
    let dict = Dictionary::with_order(value.strings(), options.dictionary_order);
    let dictionary = dict.chars();
    let packed = value.pack(&dict)?;

    let mut document = String::with_capacity(
        FORMAT_NAME.len() + 2 * DELIMITER.len() + dictionary.len() + packed.len(),
    );
    document.push_str(FORMAT_NAME);
    document.push_str(DELIMITER);
    document.push_str(&dictionary);
    document.push_str(DELIMITER);
    document.push_str(&packed);
    Ok(document)
}

/// Serializes any `T: Serialize` to a hamster document.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_hamster::to_string;
///
/// #[derive(Serialize)]
/// struct Point {
///     x: u32,
///     y: u32,
/// }
///
/// let doc = to_string(&Point { x: 1, y: 2 }).unwrap();
/// assert_eq!(doc, "hamster.::xy.::oel1l1i1l11l2i1l2");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented (negative numbers,
/// fractional floats, data-carrying enum variants, non-string map keys).
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string<T>(value: &T) -> Result<String>
where
    T: ?Sized + Serialize,
{
    to_string_with_options(value, &EncodeOptions::default())
}

/// Serializes any `T: Serialize` to a hamster document with custom options.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::{to_string_with_options, EncodeOptions};
///
/// let doc = to_string_with_options(&"ba", &EncodeOptions::sorted()).unwrap();
/// assert_eq!(doc, "hamster.::ab.::s1l9");
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options<T>(value: &T, options: &EncodeOptions) -> Result<String>
where
    T: ?Sized + Serialize,
{
    let value = to_value(value)?;
    encode_with_options(&value, options)
}

/// Converts any `T: Serialize` to a [`Value`].
///
/// Useful for inspecting or rearranging data before encoding, and for
/// working with structures not known at compile time.
///
/// # Examples
///
/// ```rust
/// use serde::Serialize;
/// use serde_hamster::{to_value, Value};
///
/// #[derive(Serialize)]
/// struct Point {
///     x: u32,
///     y: u32,
/// }
///
/// let value: Value = to_value(&Point { x: 1, y: 2 }).unwrap();
/// assert!(value.is_object());
/// ```
///
/// # Errors
///
/// Returns an error if the value cannot be represented.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_value<T>(value: &T) -> Result<Value>
where
    T: ?Sized + Serialize,
{
    value.serialize(crate::ser::ValueSerializer)
}

/// Serializes any `T: Serialize` to a writer as a hamster document.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::to_writer;
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &5u32).unwrap();
/// assert_eq!(buffer, b"hamster.::.::i1l5");
/// ```
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W, T>(writer: W, value: &T) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    to_writer_with_options(writer, value, &EncodeOptions::default())
}

/// Serializes any `T: Serialize` to a writer with custom options.
///
/// # Errors
///
/// Returns an error if serialization fails or writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W, T>(mut writer: W, value: &T, options: &EncodeOptions) -> Result<()>
where
    W: io::Write,
    T: ?Sized + Serialize,
{
    let document = to_string_with_options(value, options)?;
    writer
        .write_all(document.as_bytes())
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(())
}
