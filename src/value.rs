//! Dynamic value representation for hamster data.
//!
//! This module provides the [`Value`] enum which represents anything the
//! hamster format can encode. It's useful for building documents when the
//! structure isn't known at compile time, and it is what the serde bridge
//! lowers every Rust type into before packing.
//!
//! ## Core Types
//!
//! - [`Value`]: an enum covering every wire variant (empty, integer, big
//!   integer, bit array, string, array, object)
//! - [`ObjectMap`]: the insertion-ordered map behind the object variant
//!
//! ## Usage Patterns
//!
//! ### Creating Values
//!
//! ```rust
//! use serde_hamster::Value;
//!
//! // From primitives
//! let empty = Value::Empty;
//! let number = Value::from(42u64);
//! let text = Value::from("hello");
//!
//! // Using the hamster! macro
//! use serde_hamster::hamster;
//! let obj = hamster!({
//!     "name": "Alice",
//!     "age": 30
//! });
//! ```
//!
//! ### Packing
//!
//! Every value packs to a tagged, self-delimiting block: one tag character,
//! a length header, the separator, then the payload. Strings need the
//! document's [`Dictionary`], which is threaded through explicitly.
//!
//! ```rust
//! use serde_hamster::{Dictionary, Value};
//!
//! let value = Value::from(5u64);
//! let dict = Dictionary::new(value.strings());
//! assert_eq!(value.pack(&dict).unwrap(), "i1l5");
//! ```
//!
//! ### Type Checking and Extraction
//!
//! ```rust
//! use serde_hamster::Value;
//!
//! let value = Value::from(42u64);
//! assert!(value.is_int());
//! assert_eq!(value.as_u64(), Some(42));
//! assert_eq!(value.as_str(), None);
//! ```

use crate::base32::{self, SEPARATOR};
use crate::dict::Dictionary;
use crate::error::{Error, Result};
use crate::ObjectMap;
use num_bigint::BigUint;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Marker name for round-tripping big integers through the serde data model.
///
/// Serde has no arbitrary-precision primitive, so [`Value::BigInt`]
/// serializes as a newtype struct with this name wrapping the decimal string.
/// The crate's own value serializer recognizes it and rebuilds the variant;
/// foreign serializers just see a plain string.
pub(crate) const BIGINT_TOKEN: &str = "$serde_hamster::private::BigInt";

/// Marker name for round-tripping bit arrays, wrapping `(width, digits)`.
pub(crate) const BITS_TOKEN: &str = "$serde_hamster::private::Bits";

/// A dynamically-typed representation of anything hamster can encode.
///
/// The variants mirror the wire format's tag alphabet exactly. Integers are
/// unsigned: the format has no sign bit, so negative numbers are rejected at
/// the conversion boundary rather than silently mangled.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::Value;
///
/// let empty = Value::Empty;
/// let num = Value::from(42u64);
/// let text = Value::from("hello");
///
/// assert!(empty.is_empty());
/// assert!(num.is_int());
/// assert!(text.is_string());
/// ```
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    /// Nothing; the encoding of `None` and `()`. Tag `0`.
    #[default]
    Empty,
    /// A non-negative machine integer, packed from its hex digits. Tag `i`.
    Int(u64),
    /// A non-negative integer of arbitrary size, packed by long division.
    /// Shares tag `i` with [`Value::Int`]; the two are indistinguishable on
    /// the wire.
    BigInt(BigUint),
    /// A sequence of digits at a declared bit-width. Tag `b`.
    Bits { width: u32, digits: Vec<u64> },
    /// Text, packed through the document dictionary. Tag `s`.
    String(String),
    /// An ordered sequence of values. Tag `a`.
    Array(Vec<Value>),
    /// String-keyed entries in insertion order. Tag `o`.
    Object(ObjectMap),
}

impl Value {
    /// The wire tag identifying this variant.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::Value;
    ///
    /// assert_eq!(Value::Empty.tag(), '0');
    /// assert_eq!(Value::from(7u64).tag(), 'i');
    /// assert_eq!(Value::from("x").tag(), 's');
    /// ```
    #[inline]
    #[must_use]
    pub const fn tag(&self) -> char {
        match self {
            Value::Empty => '0',
            Value::Int(_) | Value::BigInt(_) => 'i',
            Value::Bits { .. } => 'b',
            Value::String(_) => 's',
            Value::Array(_) => 'a',
            Value::Object(_) => 'o',
        }
    }

    /// Builds a bit array at an explicit chunk width.
    #[must_use]
    pub fn bits(width: u32, digits: Vec<u64>) -> Self {
        Value::Bits { width, digits }
    }

    /// Builds a bit array of whole bytes (8-bit chunks).
    #[must_use]
    pub fn bits_from_bytes(bytes: &[u8]) -> Self {
        Value::Bits {
            width: 8,
            digits: bytes.iter().map(|&b| u64::from(b)).collect(),
        }
    }

    /// Builds an 8-bit bit array from hexadecimal text.
    ///
    /// Odd-length input is padded with a leading zero nibble.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] for non-hex characters.
    pub fn bits_from_hex(hex: &str) -> Result<Self> {
        Ok(Self::bits_from_bytes(&crate::bytes::hex_to_bytes(hex)?))
    }

    /// Builds an 8-bit bit array from base64 text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] for invalid base64.
    pub fn bits_from_base64(base64: &str) -> Result<Self> {
        Ok(Self::bits_from_bytes(&crate::bytes::base64_to_bytes(
            base64,
        )?))
    }

    /// Builds a 1-bit-per-digit bit array from booleans.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::Value;
    ///
    /// let flags = Value::bits_from_bools(&[true, false, true]);
    /// assert_eq!(flags.as_bits(), Some((1, &[1u64, 0, 1][..])));
    /// ```
    #[must_use]
    pub fn bits_from_bools(bools: &[bool]) -> Self {
        Value::Bits {
            width: 1,
            digits: bools.iter().map(|&b| u64::from(b)).collect(),
        }
    }

    /// Builds a big integer from a decimal string of any length.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedInput`] for non-decimal characters and a
    /// custom error for empty input. Signs are not accepted; the format has
    /// no negative numbers.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::Value;
    ///
    /// let big = Value::big_int_from_decimal("340282366920938463463374607431768211456").unwrap();
    /// assert!(big.is_big_int());
    /// assert!(Value::big_int_from_decimal("-5").is_err());
    /// ```
    pub fn big_int_from_decimal(decimal: &str) -> Result<Self> {
        if decimal.is_empty() {
            return Err(Error::custom("empty decimal string"));
        }
        for (pos, ch) in decimal.char_indices() {
            if !ch.is_ascii_digit() {
                return Err(Error::malformed("decimal", ch, pos));
            }
        }
        let n = BigUint::parse_bytes(decimal.as_bytes(), 10)
            .ok_or_else(|| Error::custom("invalid decimal string"))?;
        Ok(Value::BigInt(n))
    }

    /// Returns `true` if the value is the empty variant.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Returns `true` if the value is a machine integer.
    #[inline]
    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self, Value::Int(_))
    }

    /// Returns `true` if the value is a big integer.
    #[inline]
    #[must_use]
    pub const fn is_big_int(&self) -> bool {
        matches!(self, Value::BigInt(_))
    }

    /// Returns `true` if the value is a bit array.
    #[inline]
    #[must_use]
    pub const fn is_bits(&self) -> bool {
        matches!(self, Value::Bits { .. })
    }

    /// Returns `true` if the value is a string.
    #[inline]
    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    /// Returns `true` if the value is an array.
    #[inline]
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    /// Returns `true` if the value is an object.
    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// If the value is a machine integer, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::Value;
    ///
    /// assert_eq!(Value::from(42u64).as_u64(), Some(42));
    /// assert_eq!(Value::from("42").as_u64(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// If the value is a big integer, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_big_int(&self) -> Option<&BigUint> {
        match self {
            Value::BigInt(n) => Some(n),
            _ => None,
        }
    }

    /// If the value is a bit array, returns its width and digits.
    #[inline]
    #[must_use]
    pub fn as_bits(&self) -> Option<(u32, &[u64])> {
        match self {
            Value::Bits { width, digits } => Some((*width, digits)),
            _ => None,
        }
    }

    /// If the value is a string, returns a reference to it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::Value;
    ///
    /// assert_eq!(Value::from("hello").as_str(), Some("hello"));
    /// assert_eq!(Value::from(42u64).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an array, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(arr) => Some(arr),
            _ => None,
        }
    }

    /// If the value is an object, returns a reference to it.
    #[inline]
    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectMap> {
        match self {
            Value::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Every string literal reachable from this value, in the order the
    /// dictionary discovers them.
    ///
    /// Objects contribute all of their keys first, then each child's strings
    /// in key order. This order is load-bearing: it decides first-seen code
    /// assignment, and therefore the exact characters on the wire.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::hamster;
    ///
    /// let value = hamster!({ "k": ["a", "b"] });
    /// assert_eq!(value.strings(), vec!["k", "a", "b"]);
    /// ```
    #[must_use]
    pub fn strings(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_strings(&mut out);
        out
    }

    fn collect_strings<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Value::String(s) => out.push(s),
            Value::Array(items) => {
                for item in items {
                    item.collect_strings(out);
                }
            }
            Value::Object(map) => {
                for key in map.keys() {
                    out.push(key);
                }
                for value in map.values() {
                    value.collect_strings(out);
                }
            }
            _ => {}
        }
    }

    /// Packs this value into its complete tagged block:
    /// `tag + length_header + 'l' + payload`.
    ///
    /// The dictionary must cover every string reachable from this value;
    /// build it from [`Value::strings`] of the same value (or a superset).
    /// Composite variants concatenate their children's full blocks into one
    /// payload and wrap it in one more header, which is what makes every
    /// block skippable without understanding its content.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DictionaryMiss`] for undeclared string characters and
    /// [`Error::DigitOverflow`]/[`Error::InvalidWidth`] for bit arrays whose
    /// digits don't fit their declared width.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use serde_hamster::{Dictionary, Value};
    ///
    /// let dict = Dictionary::new(Vec::<String>::new());
    /// assert_eq!(Value::Empty.pack(&dict).unwrap(), "0l");
    /// assert_eq!(Value::from(255u64).pack(&dict).unwrap(), "i2l7z");
    /// ```
    pub fn pack(&self, dict: &Dictionary) -> Result<String> {
        let payload = match self {
            Value::Empty => String::new(),
            Value::Int(n) => base32::from_hex(&format!("{:x}", n))?,
            Value::BigInt(n) => base32::decimal_to_base32(&n.to_string())?,
            Value::Bits { width, digits } => {
                let mut payload = base32::from_hex(&format!("{:x}", width))?;
                payload.push(SEPARATOR);
                payload.push_str(&base32::digits_to_base32(digits, *width)?);
                payload
            }
            Value::String(s) => dict.encode(s)?,
            Value::Array(items) => {
                let mut payload = String::new();
                for item in items {
                    payload.push_str(&item.pack(dict)?);
                }
                payload
            }
            Value::Object(map) => {
                let mut payload = String::new();
                for (key, value) in map {
                    payload.push_str(&base32::add_header(&dict.encode(key)?));
                    payload.push_str(&value.pack(dict)?);
                }
                payload
            }
        };

        let mut out = String::with_capacity(payload.len() + 4);
        out.push(self.tag());
        out.push_str(&base32::add_header(&payload));
        Ok(out)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => write!(f, "null"),
            Value::Int(n) => write!(f, "{}", n),
            Value::BigInt(n) => write!(f, "{}n", n),
            Value::Bits { width, digits } => {
                write!(
                    f,
                    "bits@{}[{}]",
                    width,
                    digits
                        .iter()
                        .map(|d| d.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
            Value::String(s) => write!(f, "{}", s),
            Value::Array(arr) => {
                write!(
                    f,
                    "[{}]",
                    arr.iter()
                        .map(|v| v.to_string())
                        .collect::<Vec<_>>()
                        .join(",")
                )
            }
            Value::Object(_) => write!(f, "{{object}}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Empty => serializer.serialize_unit(),
            Value::Int(n) => serializer.serialize_u64(*n),
            Value::BigInt(n) => serializer.serialize_newtype_struct(BIGINT_TOKEN, &n.to_string()),
            Value::Bits { width, digits } => {
                serializer.serialize_newtype_struct(BITS_TOKEN, &(*width, digits))
            }
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(arr) => {
                use serde::ser::SerializeSeq;
                let mut seq = serializer.serialize_seq(Some(arr.len()))?;
                for element in arr {
                    seq.serialize_element(element)?;
                }
                seq.end()
            }
            Value::Object(obj) => {
                use serde::ser::SerializeMap;
                let mut map = serializer.serialize_map(Some(obj.len()))?;
                for (k, v) in obj.iter() {
                    map.serialize_entry(k, v)?;
                }
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        use serde::de::{self, Visitor};

        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = Value;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("any value hamster can encode")
            }

            fn visit_bool<E>(self, value: bool) -> std::result::Result<Self::Value, E> {
                Ok(Value::Int(u64::from(value)))
            }

            fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                u64::try_from(value)
                    .map(Value::Int)
                    .map_err(|_| E::custom(format!("negative integer {} has no encoding", value)))
            }

            fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E> {
                Ok(Value::Int(value))
            }

            fn visit_i128<E>(self, value: i128) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                u128::try_from(value)
                    .map(|v| Value::BigInt(BigUint::from(v)))
                    .map_err(|_| E::custom(format!("negative integer {} has no encoding", value)))
            }

            fn visit_u128<E>(self, value: u128) -> std::result::Result<Self::Value, E> {
                Ok(Value::BigInt(BigUint::from(value)))
            }

            fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value < 0.0 {
                    Err(E::custom(format!(
                        "negative number {} has no encoding",
                        value
                    )))
                } else if value.fract() != 0.0 {
                    Err(E::custom(format!(
                        "non-integer number {} has no encoding",
                        value
                    )))
                } else if value >= u64::MAX as f64 {
                    // u64::MAX rounds up to 2^64 as a float, so >= catches
                    // every whole value that no longer fits
                    Err(E::custom(format!(
                        "number {} exceeds 64-bit integer precision",
                        value
                    )))
                } else {
                    Ok(Value::Int(value as u64))
                }
            }

            fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E> {
                Ok(Value::String(value.to_string()))
            }

            fn visit_string<E>(self, value: String) -> std::result::Result<Self::Value, E> {
                Ok(Value::String(value))
            }

            fn visit_bytes<E>(self, value: &[u8]) -> std::result::Result<Self::Value, E> {
                Ok(Value::bits_from_bytes(value))
            }

            fn visit_byte_buf<E>(self, value: Vec<u8>) -> std::result::Result<Self::Value, E> {
                Ok(Value::bits_from_bytes(&value))
            }

            fn visit_unit<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Value::Empty)
            }

            fn visit_none<E>(self) -> std::result::Result<Self::Value, E> {
                Ok(Value::Empty)
            }

            fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                Deserialize::deserialize(deserializer)
            }

            fn visit_seq<A>(self, mut seq: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::SeqAccess<'de>,
            {
                let mut vec = Vec::new();
                while let Some(elem) = seq.next_element()? {
                    vec.push(elem);
                }
                Ok(Value::Array(vec))
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: de::MapAccess<'de>,
            {
                let mut values = ObjectMap::new();
                while let Some((key, value)) = map.next_entry()? {
                    values.insert(key, value);
                }
                Ok(Value::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

impl TryFrom<i64> for Value {
    type Error = crate::Error;

    fn try_from(value: i64) -> crate::Result<Self> {
        u64::try_from(value)
            .map(Value::Int)
            .map_err(|_| Error::NegativeValue(value.to_string()))
    }
}

impl TryFrom<Value> for u64 {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::Int(n) => Ok(n),
            _ => Err(Error::custom(format!("expected integer, found {:?}", value))),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = crate::Error;

    fn try_from(value: Value) -> crate::Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            _ => Err(Error::custom(format!("expected string, found {:?}", value))),
        }
    }
}

// From implementations for creating Value from primitives
impl From<bool> for Value {
    /// Booleans encode as the integers 0 and 1; the format has no dedicated
    /// boolean variant.
    fn from(value: bool) -> Self {
        Value::Int(u64::from(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Int(u64::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Int(u64::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Int(u64::from(value))
    }
}

impl From<u64> for Value {
    fn from(value: u64) -> Self {
        Value::Int(value)
    }
}

impl From<u128> for Value {
    fn from(value: u128) -> Self {
        Value::BigInt(BigUint::from(value))
    }
}

impl From<BigUint> for Value {
    fn from(value: BigUint) -> Self {
        Value::BigInt(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<Vec<bool>> for Value {
    /// Booleans in bulk become a 1-bit-per-digit bit array, not an array of
    /// integers.
    fn from(value: Vec<bool>) -> Self {
        Value::bits_from_bools(&value)
    }
}

impl From<Vec<u8>> for Value {
    fn from(value: Vec<u8>) -> Self {
        Value::bits_from_bytes(&value)
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Value::bits_from_bytes(value)
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<ObjectMap> for Value {
    fn from(value: ObjectMap) -> Self {
        Value::Object(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict_for(value: &Value) -> Dictionary {
        Dictionary::new(value.strings())
    }

    #[test]
    fn test_tags() {
        assert_eq!(Value::Empty.tag(), '0');
        assert_eq!(Value::Int(1).tag(), 'i');
        assert_eq!(Value::BigInt(BigUint::from(1u8)).tag(), 'i');
        assert_eq!(Value::bits(8, vec![]).tag(), 'b');
        assert_eq!(Value::from("x").tag(), 's');
        assert_eq!(Value::Array(vec![]).tag(), 'a');
        assert_eq!(Value::Object(ObjectMap::new()).tag(), 'o');
    }

    #[test]
    fn test_pack_empty() {
        let value = Value::Empty;
        assert_eq!(value.pack(&dict_for(&value)).unwrap(), "0l");
    }

    #[test]
    fn test_pack_int() {
        let dict = Dictionary::new(Vec::<String>::new());
        assert_eq!(Value::Int(0).pack(&dict).unwrap(), "il");
        assert_eq!(Value::Int(5).pack(&dict).unwrap(), "i1l5");
        assert_eq!(Value::Int(255).pack(&dict).unwrap(), "i2l7z");
    }

    #[test]
    fn test_pack_big_int_matches_int_for_shared_range() {
        let dict = Dictionary::new(Vec::<String>::new());
        for n in [0u64, 5, 255, 1024, 1_234_567] {
            let int = Value::Int(n).pack(&dict).unwrap();
            let big = Value::BigInt(BigUint::from(n)).pack(&dict).unwrap();
            assert_eq!(int, big, "n = {}", n);
        }
    }

    #[test]
    fn test_pack_big_int_beyond_u64() {
        let dict = Dictionary::new(Vec::<String>::new());
        let value = Value::big_int_from_decimal("18446744073709551616").unwrap();
        // 2^64 = 16 * 32^12, thirteen payload symbols
        assert_eq!(value.pack(&dict).unwrap(), "idlg000000000000");
    }

    #[test]
    fn test_pack_bits() {
        let dict = Dictionary::new(Vec::<String>::new());
        let value = Value::bits_from_bytes(&[255]);
        assert_eq!(value.pack(&dict).unwrap(), "b4l8l7z");

        let flags = Value::bits_from_bools(&[true, false, true]);
        assert_eq!(flags.pack(&dict).unwrap(), "b3l1l5");
    }

    #[test]
    fn test_pack_bits_rejects_overflowing_digits() {
        let dict = Dictionary::new(Vec::<String>::new());
        let bad = Value::bits(4, vec![16]);
        assert_eq!(
            bad.pack(&dict).unwrap_err(),
            Error::DigitOverflow {
                digit: 16,
                width: 4
            }
        );
    }

    #[test]
    fn test_pack_string() {
        let value = Value::from("hi");
        let dict = dict_for(&value);
        assert_eq!(value.pack(&dict).unwrap(), "s1l6");
    }

    #[test]
    fn test_pack_string_dictionary_miss() {
        let value = Value::from("hi");
        let other = Dictionary::new(["xyz"]);
        assert_eq!(value.pack(&other).unwrap_err(), Error::DictionaryMiss('h'));
    }

    #[test]
    fn test_pack_array() {
        let dict = Dictionary::new(Vec::<String>::new());
        let value = Value::Array(vec![Value::Int(5), Value::Empty]);
        assert_eq!(value.pack(&dict).unwrap(), "a6li1l50l");
    }

    #[test]
    fn test_pack_object() {
        let mut map = ObjectMap::new();
        map.insert("a".to_string(), Value::Int(5));
        let value = Value::Object(map);
        let dict = dict_for(&value);
        assert_eq!(value.pack(&dict).unwrap(), "o7l1l1i1l5");
    }

    #[test]
    fn test_pack_nested_object() {
        let mut map = ObjectMap::new();
        map.insert("a".to_string(), Value::Array(vec![Value::Int(5)]));
        let value = Value::Object(map);
        let dict = dict_for(&value);
        assert_eq!(value.pack(&dict).unwrap(), "oal1l1a4li1l5");
    }

    #[test]
    fn test_block_is_self_delimiting() {
        let mut map = ObjectMap::new();
        map.insert("a".to_string(), Value::Int(5));
        map.insert("b".to_string(), Value::from("hi"));
        let value = Value::Object(map);
        let packed = value.pack(&dict_for(&value)).unwrap();

        let (declared, rest) = base32::read_header(&packed[1..]).unwrap();
        assert_eq!(declared as usize, rest.len());
    }

    #[test]
    fn test_strings_projection_order() {
        let mut inner = ObjectMap::new();
        inner.insert("k".to_string(), Value::from("v"));
        let mut map = ObjectMap::new();
        map.insert("a".to_string(), Value::from("x"));
        map.insert("b".to_string(), Value::Object(inner));
        let value = Value::Object(map);

        // keys of each object come before any of its children's strings
        assert_eq!(value.strings(), vec!["a", "b", "x", "k", "v"]);
    }

    #[test]
    fn test_strings_skips_non_string_variants() {
        let value = Value::Array(vec![
            Value::Int(1),
            Value::bits_from_bytes(b"zz"),
            Value::Empty,
        ]);
        assert!(value.strings().is_empty());
    }

    #[test]
    fn test_from_primitives() {
        assert_eq!(Value::from(true), Value::Int(1));
        assert_eq!(Value::from(false), Value::Int(0));
        assert_eq!(Value::from(42u8), Value::Int(42));
        assert_eq!(Value::from(42u64), Value::Int(42));
        assert_eq!(
            Value::from(1u128 << 100),
            Value::BigInt(BigUint::from(1u128 << 100))
        );
        assert_eq!(Value::from("hi"), Value::String("hi".to_string()));
        assert_eq!(
            Value::from(vec![true, false]),
            Value::bits(1, vec![1, 0])
        );
        assert_eq!(Value::from(vec![7u8]), Value::bits(8, vec![7]));
        assert_eq!(Value::from(&b"hi"[..]), Value::bits(8, vec![104, 105]));
    }

    #[test]
    fn test_tryfrom_i64() {
        assert_eq!(Value::try_from(42i64).unwrap(), Value::Int(42));
        assert_eq!(
            Value::try_from(-1i64).unwrap_err(),
            Error::NegativeValue("-1".to_string())
        );
    }

    #[test]
    fn test_tryfrom_value() {
        assert_eq!(u64::try_from(Value::Int(7)).unwrap(), 7);
        assert!(u64::try_from(Value::from("7")).is_err());
        assert_eq!(String::try_from(Value::from("hi")).unwrap(), "hi");
        assert!(String::try_from(Value::Int(7)).is_err());
    }

    #[test]
    fn test_big_int_from_decimal_rejects_garbage() {
        assert!(Value::big_int_from_decimal("").is_err());
        assert!(Value::big_int_from_decimal("12.5").is_err());
        assert!(Value::big_int_from_decimal("+7").is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Empty.to_string(), "null");
        assert_eq!(Value::Int(42).to_string(), "42");
        assert_eq!(Value::BigInt(BigUint::from(42u8)).to_string(), "42n");
        assert_eq!(
            Value::Array(vec![Value::Int(1), Value::from("x")]).to_string(),
            "[1,x]"
        );
        assert_eq!(Value::bits(8, vec![255, 0]).to_string(), "bits@8[255,0]");
    }

    #[test]
    fn test_default_is_empty() {
        assert_eq!(Value::default(), Value::Empty);
    }
}
