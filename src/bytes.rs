//! Byte-sequence conversions feeding the codec's 8-bit digit mode.
//!
//! Hex and base64 text are the two ways raw binary enters a hamster document.
//! Both decoders here reject invalid input outright instead of skipping
//! unrecognized characters.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{Error, Result};

/// Decodes a hexadecimal string into bytes.
///
/// An odd-length input is padded with a leading zero nibble, so `"fff"`
/// decodes as `0x0fff`.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] for non-hex characters, with the
/// position reported in the unpadded input.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::bytes::hex_to_bytes;
///
/// assert_eq!(hex_to_bytes("ff").unwrap(), vec![0xff]);
/// assert_eq!(hex_to_bytes("fff").unwrap(), vec![0x0f, 0xff]);
/// ```
pub fn hex_to_bytes(hex: &str) -> Result<Vec<u8>> {
    let mut nibbles = Vec::with_capacity(hex.len() + 1);
    for (pos, ch) in hex.char_indices() {
        match ch.to_digit(16) {
            Some(d) => nibbles.push(d as u8),
            None => return Err(Error::malformed("hex", ch, pos)),
        }
    }
    if nibbles.len() % 2 != 0 {
        nibbles.insert(0, 0);
    }
    Ok(nibbles
        .chunks(2)
        .map(|pair| (pair[0] << 4) | pair[1])
        .collect())
}

/// Decodes a standard-alphabet base64 string into bytes.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] naming the first offending character,
/// or a custom error for structural problems such as bad padding.
pub fn base64_to_bytes(base64: &str) -> Result<Vec<u8>> {
    STANDARD.decode(base64).map_err(|e| match e {
        base64::DecodeError::InvalidByte(pos, byte) => {
            Error::malformed("base64", byte as char, pos)
        }
        other => Error::custom(format!("invalid base64: {}", other)),
    })
}
