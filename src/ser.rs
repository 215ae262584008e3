//! Serde bridge into the hamster value model.
//!
//! [`ValueSerializer`] walks any `T: Serialize` and produces a [`Value`]
//! tree, which the crate-root functions then pack into a hamster document.
//! The wire format has no signed, fractional, or boolean payloads, so the
//! bridge maps Rust types onto the closed variant set:
//!
//! - Unsigned integers become [`Value::Int`]; `u128` past the `u64` range
//!   becomes [`Value::BigInt`].
//! - Signed integers must be non-negative ([`Error::NegativeValue`]
//!   otherwise); floats must be whole as well ([`Error::NonIntegerValue`]).
//! - Booleans ride as the integers `0` and `1`.
//! - `&[u8]` and other byte sources become an 8-bit [`Value::Bits`] array.
//! - `None`, `()`, and unit structs become [`Value::Empty`]; unit enum
//!   variants become their name as a string.
//! - Maps and structs become [`Value::Object`] entries in field order; map
//!   keys must be strings.
//!
//! Data-carrying enum variants have no hamster representation and are
//! rejected with [`Error::UnsupportedType`].
//!
//! ## Usage
//!
//! Most users should go through [`to_value`](crate::to_value) or
//! [`to_string`](crate::to_string) in the crate root:
//!
//! ```rust
//! use serde::Serialize;
//! use serde_hamster::to_value;
//!
//! #[derive(Serialize)]
//! struct Point {
//!     x: u32,
//!     y: u32,
//! }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert!(value.is_object());
//! ```

use crate::value::{BIGINT_TOKEN, BITS_TOKEN};
use crate::{Error, ObjectMap, Result, Value};
use num_bigint::BigUint;
use serde::{ser, Serialize};

/// Serializer that collects any `Serialize` input into a [`Value`] tree.
pub struct ValueSerializer;

pub struct SerializeVec {
    vec: Vec<Value>,
}

pub struct SerializeMap {
    map: ObjectMap,
    current_key: Option<String>,
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = SerializeVec;
    type SerializeTuple = SerializeVec;
    type SerializeTupleStruct = SerializeVec;
    type SerializeTupleVariant = SerializeVec;
    type SerializeMap = SerializeMap;
    type SerializeStruct = SerializeMap;
    type SerializeStructVariant = SerializeMap;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        // The wire has no boolean tag; true and false ride as integers.
        Ok(Value::Int(u64::from(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        u64::try_from(v)
            .map(Value::Int)
            .map_err(|_| Error::NegativeValue(v.to_string()))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        if v < 0 {
            return Err(Error::NegativeValue(v.to_string()));
        }
        self.serialize_u128(v as u128)
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::Int(u64::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::Int(u64::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::Int(u64::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::Int(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        match u64::try_from(v) {
            Ok(n) => Ok(Value::Int(n)),
            Err(_) => Ok(Value::BigInt(BigUint::from(v))),
        }
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        if v < 0.0 {
            return Err(Error::NegativeValue(v.to_string()));
        }
        if !v.is_finite() || v.fract() != 0.0 {
            return Err(Error::NonIntegerValue(v.to_string()));
        }
        // u64::MAX rounds up to 2^64 as a float, so >= catches every
        // whole value that no longer fits.
        if v >= u64::MAX as f64 {
            return Err(Error::PrecisionOverflow);
        }
        Ok(Value::Int(v as u64))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::bits_from_bytes(v))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Empty)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Empty)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Empty)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::String(variant.to_string()))
    }

    fn serialize_newtype_struct<T>(self, name: &'static str, value: &T) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        // `Value`'s own Serialize impl funnels BigInt and Bits through
        // private token names so they survive a pass through this
        // serializer without losing precision or width.
        match name {
            BIGINT_TOKEN => match value.serialize(ValueSerializer)? {
                Value::String(digits) => Value::big_int_from_decimal(&digits),
                _ => Err(Error::custom(
                    "big integer token payload must be a decimal string",
                )),
            },
            BITS_TOKEN => bits_from_token(value.serialize(ValueSerializer)?),
            _ => value.serialize(self),
        }
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<Value>
    where
        T: ?Sized + Serialize,
    {
        Err(Error::unsupported_type("newtype variants"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple(self, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple_struct(self, _name: &'static str, _len: usize) -> Result<SerializeVec> {
        Ok(SerializeVec::new())
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeVec> {
        Err(Error::unsupported_type("tuple variants"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<SerializeMap> {
        Ok(SerializeMap::new())
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<SerializeMap> {
        Err(Error::unsupported_type("struct variants"))
    }
}

impl SerializeVec {
    fn new() -> Self {
        SerializeVec { vec: Vec::new() }
    }
}

impl SerializeMap {
    fn new() -> Self {
        SerializeMap {
            map: ObjectMap::new(),
            current_key: None,
        }
    }
}

impl ser::SerializeSeq for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_hamster_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTuple for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_hamster_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleStruct for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_hamster_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeTupleVariant for SerializeVec {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.vec.push(to_hamster_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Array(self.vec))
    }
}

impl ser::SerializeMap for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        match to_hamster_value(key)? {
            Value::String(s) => {
                self.current_key = Some(s);
                Ok(())
            }
            _ => Err(Error::custom("Map keys must be strings")),
        }
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .current_key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called without serialize_key"))?;
        self.map.insert(key, to_hamster_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStruct for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_hamster_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

impl ser::SerializeStructVariant for SerializeMap {
    type Ok = Value;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.map.insert(key.to_string(), to_hamster_value(value)?);
        Ok(())
    }

    fn end(self) -> Result<Value> {
        Ok(Value::Object(self.map))
    }
}

fn to_hamster_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

/// Rebuilds a [`Value::Bits`] from the `(width, digits)` pair its Serialize
/// impl emitted under the private token name.
fn bits_from_token(payload: Value) -> Result<Value> {
    let malformed = || Error::custom("bit array token payload must be a width and a digit list");
    let parts = match payload {
        Value::Array(parts) => parts,
        _ => return Err(malformed()),
    };
    let mut parts = parts.into_iter();
    let width = match parts.next() {
        Some(Value::Int(w)) => u32::try_from(w).map_err(|_| malformed())?,
        _ => return Err(malformed()),
    };
    let digits = match parts.next() {
        Some(Value::Array(items)) => items
            .into_iter()
            .map(|item| match item {
                Value::Int(d) => Ok(d),
                _ => Err(malformed()),
            })
            .collect::<Result<Vec<u64>>>()?,
        _ => return Err(malformed()),
    };
    if parts.next().is_some() {
        return Err(malformed());
    }
    Ok(Value::bits(width, digits))
}
