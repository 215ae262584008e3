//! The base32 bit-packing codec at the core of the hamster format.
//!
//! Every hamster payload is a base32 string over a 32-symbol alphabet. The
//! codec does not map bytes to symbols directly; instead it treats its input
//! as a sequence of fixed-width digits (1 to 64 bits each), concatenates
//! their bits least-significant-digit-first, and re-buffers the combined bit
//! stream into 5-bit groups. Each group becomes one output symbol, emitted
//! most-significant-group-first. Completed groups are always emitted, zero
//! or not; only an all-zero leftover group is suppressed.
//!
//! ## Alphabet
//!
//! The 32 symbols are `0123456789abcdefghjkmnprstuvwxyz`. Four letters are
//! excluded: `i`, `l`, `o` and `q`. The separator character `l` is therefore
//! never a payload symbol, which is what makes length headers
//! self-delimiting.
//!
//! ## Headers
//!
//! A headered block is `length_header(n) + 'l' + payload` where `n` is the
//! payload's character count and the length itself is packed from its
//! hexadecimal digits at 4 bits per digit. A zero-length payload has an
//! empty length prefix, so the smallest possible block is just `"l"`.
//!
//! ## Examples
//!
//! ```rust
//! use serde_hamster::base32;
//!
//! // 0xff packs its two hex nibbles into 5-bit groups: 255 = 7 * 32 + 31
//! assert_eq!(base32::from_hex("ff").unwrap(), "7z");
//!
//! // arbitrary-precision decimal input goes through long division by 32
//! assert_eq!(base32::decimal_to_base32("1234567").unwrap(), "15nm7");
//!
//! // digit sequences round-trip at their declared width
//! let packed = base32::digits_to_base32(&[1, 0], 4).unwrap();
//! assert_eq!(packed, "g");
//! assert_eq!(base32::base32_to_digits(&packed, 4).unwrap(), vec![1, 0]);
//! ```

use crate::error::{Error, Result};

/// The 32-symbol output alphabet, indexed by symbol value.
///
/// Excludes `i`, `l`, `o` and `q`; in particular the header separator
/// [`SEPARATOR`] is not a member, so it can never occur inside a packed
/// payload.
pub const ALPHABET: [u8; 32] = *b"0123456789abcdefghjkmnprstuvwxyz";

/// The character terminating every length header.
pub const SEPARATOR: char = 'l';

/// Output symbols carry 5 bits each.
const SYMBOL_BITS: u32 = 5;

/// Mask pairs for splitting a `width`-bit digit at an arbitrary bit offset.
///
/// For each prefix length `m` in `0..=width` the table holds
/// `(low, high)` where `low` selects the low `m` bits of a digit and `high`
/// selects the remaining `width - m` bits. Splitting a digit across a 5-bit
/// group boundary is then two AND operations and a shift.
struct MaskTable {
    max: u64,
    pairs: Vec<(u64, u64)>,
}

impl MaskTable {
    /// Builds the table for a digit width. Callers validate `width` first;
    /// this only assumes `1 <= width <= 64`.
    fn new(width: u32) -> Self {
        let max = u64::MAX >> (64 - width);
        let pairs = (0..=width)
            .map(|m| {
                let low = if m == 0 { 0 } else { u64::MAX >> (64 - m) };
                (low, max ^ low)
            })
            .collect();
        MaskTable { max, pairs }
    }

    #[inline]
    fn low(&self, m: u32) -> u64 {
        self.pairs[m as usize].0
    }

    #[inline]
    fn high(&self, m: u32) -> u64 {
        self.pairs[m as usize].1
    }
}

fn validate_width(width: u32) -> Result<u32> {
    if width == 0 || width > 64 {
        return Err(Error::InvalidWidth(width));
    }
    Ok(width)
}

/// Maps one character to its symbol value, accepting ASCII uppercase.
fn symbol_value(ch: char) -> Option<u64> {
    let lower = ch.to_ascii_lowercase();
    ALPHABET
        .iter()
        .position(|&b| b as char == lower)
        .map(|i| i as u64)
}

/// Packs pre-validated digits at a pre-validated width. The workhorse behind
/// [`digits_to_base32`] and [`length_header`].
fn pack_digits(digits: &[u64], width: u32, masks: &MaskTable) -> String {
    // symbols are produced least-significant-first and reversed at the end
    let mut out: Vec<u8> = Vec::new();
    let mut acc: u64 = 0;
    let mut held: u32 = 0;

    for &digit in digits.iter().rev() {
        let mut d = digit;
        let mut remaining = width;

        while remaining > 0 {
            let take = (SYMBOL_BITS - held).min(remaining);

            let piece = d & masks.low(take);
            d = (d & masks.high(take)) >> take;
            remaining -= take;

            acc |= piece << held;
            held += take;

            if held == SYMBOL_BITS {
                out.push(ALPHABET[acc as usize]);
                acc = 0;
                held = 0;
            }
        }
    }

    // an all-zero leftover group is dropped; completed groups were
    // already emitted above, zero or not
    if acc > 0 {
        out.push(ALPHABET[acc as usize]);
    }

    out.iter().rev().map(|&b| b as char).collect()
}

/// Packs a sequence of `width`-bit digits into a base32 string.
///
/// Digits are given most-significant-first and consumed in reverse, so the
/// combined bit stream places the last digit in the lowest bits. Symbols come
/// out most-significant-first. Completed 5-bit groups are emitted even when
/// zero; only a final leftover group that is all zero is dropped, so an input
/// packs to the empty string exactly when its bits never fill one group.
///
/// # Errors
///
/// Returns [`Error::InvalidWidth`] unless `1 <= width <= 64`, and
/// [`Error::DigitOverflow`] if any digit needs more than `width` bits.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::base32::digits_to_base32;
///
/// assert_eq!(digits_to_base32(&[5], 4).unwrap(), "5");
/// assert_eq!(digits_to_base32(&[2047], 11).unwrap(), "1zz");
/// assert_eq!(digits_to_base32(&[0], 4).unwrap(), "");
/// assert_eq!(digits_to_base32(&[0, 0], 8).unwrap(), "000");
/// ```
pub fn digits_to_base32(digits: &[u64], width: u32) -> Result<String> {
    let width = validate_width(width)?;
    let masks = MaskTable::new(width);
    for &digit in digits {
        if digit > masks.max {
            return Err(Error::DigitOverflow { digit, width });
        }
    }
    Ok(pack_digits(digits, width, &masks))
}

/// Unpacks a base32 string back into `width`-bit digits, most significant
/// digit first.
///
/// Inverse of [`digits_to_base32`] up to leading zero digits, which do not
/// survive packing: the digits come back with no leading zero, so inputs that
/// started with one decode to their canonical shorter form.
///
/// # Errors
///
/// Returns [`Error::InvalidWidth`] for an unsupported width and
/// [`Error::MalformedInput`] for characters outside the base32 alphabet.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::base32::base32_to_digits;
///
/// assert_eq!(base32_to_digits("7z", 8).unwrap(), vec![255]);
/// assert_eq!(base32_to_digits("g", 4).unwrap(), vec![1, 0]);
/// assert_eq!(base32_to_digits("", 4).unwrap(), Vec::<u64>::new());
/// ```
pub fn base32_to_digits(s: &str, width: u32) -> Result<Vec<u64>> {
    let width = validate_width(width)?;
    let symbols = symbol_values(s)?;

    let mut digits: Vec<u64> = Vec::new();
    let mut acc: u64 = 0;
    let mut held: u32 = 0;

    for &symbol in symbols.iter().rev() {
        let mut five = symbol;
        let mut remaining = SYMBOL_BITS;

        while remaining > 0 {
            let take = (width - held).min(remaining);

            let piece = five & ((1 << take) - 1);
            // the remainder is the whole symbol shifted down, so no carry
            // bits are lost when width is smaller than a symbol
            five >>= take;
            remaining -= take;

            acc |= piece << held;
            held += take;

            if held == width {
                digits.push(acc);
                acc = 0;
                held = 0;
            }
        }
    }

    if acc > 0 {
        digits.push(acc);
    }

    // at widths below 5 the top symbol's pad bits complete whole zero
    // digits; strip them so the most significant digit is never zero
    while digits.last() == Some(&0) {
        digits.pop();
    }

    digits.reverse();
    Ok(digits)
}

/// Interprets a whole base32 string as one unsigned integer.
///
/// The empty string decodes to zero.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] for characters outside the alphabet and
/// [`Error::PrecisionOverflow`] when the value does not fit in a `u64`.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::base32::base32_to_u64;
///
/// assert_eq!(base32_to_u64("10").unwrap(), 32);
/// assert_eq!(base32_to_u64("7z").unwrap(), 255);
/// assert_eq!(base32_to_u64("").unwrap(), 0);
/// ```
pub fn base32_to_u64(s: &str) -> Result<u64> {
    let mut value: u64 = 0;
    for (pos, ch) in s.char_indices() {
        let symbol = symbol_value(ch).ok_or_else(|| Error::malformed("base32", ch, pos))?;
        value = value
            .checked_mul(32)
            .and_then(|v| v.checked_add(symbol))
            .ok_or(Error::PrecisionOverflow)?;
    }
    Ok(value)
}

/// Converts an arbitrary-precision decimal string to base32 by repeated long
/// division.
///
/// Each pass scans the decimal digits left to right, accumulating a remainder
/// (`remainder * 10 + digit`, at most 319, so every quotient digit stays in
/// decimal range) and building the next pass's dividend from the quotient
/// digits with leading zeros suppressed. The pass's final remainder is one
/// output symbol, collected most-significant-last. Leading zeros in the input
/// are ignored; zero itself converts to the empty string.
///
/// This is the only operation with no size bound on its numeric input.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] for non-decimal characters and a custom
/// error for empty input.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::base32::decimal_to_base32;
///
/// assert_eq!(decimal_to_base32("32").unwrap(), "10");
/// assert_eq!(decimal_to_base32("1234567").unwrap(), "15nm7");
/// assert_eq!(decimal_to_base32("0").unwrap(), "");
/// assert_eq!(decimal_to_base32("18446744073709551616").unwrap(), "g000000000000");
/// ```
pub fn decimal_to_base32(decimal: &str) -> Result<String> {
    if decimal.is_empty() {
        return Err(Error::custom("empty decimal string"));
    }

    let mut digits: Vec<u64> = Vec::with_capacity(decimal.len());
    for (pos, ch) in decimal.char_indices() {
        match ch.to_digit(10) {
            Some(d) => digits.push(u64::from(d)),
            None => return Err(Error::malformed("decimal", ch, pos)),
        }
    }

    let mut dividend = match digits.iter().position(|&d| d != 0) {
        Some(first) => digits.split_off(first),
        None => return Ok(String::new()),
    };

    let mut symbols: Vec<u8> = Vec::new();
    loop {
        let mut quotient: Vec<u64> = Vec::with_capacity(dividend.len());
        let mut remainder: u64 = 0;

        for &digit in &dividend {
            remainder = remainder * 10 + digit;
            let q = remainder / 32;
            if !quotient.is_empty() || q > 0 {
                quotient.push(q);
            }
            remainder %= 32;
        }

        symbols.push(ALPHABET[remainder as usize]);
        if quotient.is_empty() {
            break;
        }
        dividend = quotient;
    }

    symbols.reverse();
    Ok(symbols.iter().map(|&b| b as char).collect())
}

/// Packs a hexadecimal string at 4 bits per digit.
///
/// Both cases are accepted; non-hex characters are rejected rather than
/// skipped.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::base32::from_hex;
///
/// assert_eq!(from_hex("ff").unwrap(), "7z");
/// assert_eq!(from_hex("0").unwrap(), "");
/// assert!(from_hex("fg").is_err());
/// ```
pub fn from_hex(hex: &str) -> Result<String> {
    let mut digits = Vec::with_capacity(hex.len());
    for (pos, ch) in hex.char_indices() {
        match ch.to_digit(16) {
            Some(d) => digits.push(u64::from(d)),
            None => return Err(Error::malformed("hex", ch, pos)),
        }
    }
    Ok(pack_digits(&digits, 4, &MaskTable::new(4)))
}

/// Packs raw bytes at 8 bits per digit.
#[must_use]
pub fn from_bytes(bytes: &[u8]) -> String {
    let digits: Vec<u64> = bytes.iter().map(|&b| u64::from(b)).collect();
    pack_digits(&digits, 8, &MaskTable::new(8))
}

/// Packs a boolean sequence at 1 bit per digit.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::base32::from_bools;
///
/// assert_eq!(from_bools(&[true, false, true]), "5");
/// ```
#[must_use]
pub fn from_bools(bools: &[bool]) -> String {
    let digits: Vec<u64> = bools.iter().map(|&b| u64::from(b)).collect();
    pack_digits(&digits, 1, &MaskTable::new(1))
}

/// Decodes a base64 string and packs the resulting bytes at 8 bits per digit.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] when the input is not valid base64.
pub fn from_base64(base64: &str) -> Result<String> {
    Ok(from_bytes(&crate::bytes::base64_to_bytes(base64)?))
}

/// Packs a payload character count as a length header, without the trailing
/// separator.
///
/// The count's hexadecimal digits go through the codec at 4 bits per digit,
/// so a zero length has an empty header.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::base32::length_header;
///
/// assert_eq!(length_header(0), "");
/// assert_eq!(length_header(5), "5");
/// assert_eq!(length_header(255), "7z");
/// ```
#[must_use]
pub fn length_header(len: usize) -> String {
    let mut n = len as u64;
    let mut digits = vec![n & 0xf];
    n >>= 4;
    while n > 0 {
        digits.push(n & 0xf);
        n >>= 4;
    }
    digits.reverse();
    pack_digits(&digits, 4, &MaskTable::new(4))
}

/// Prefixes a payload with its length header and the separator.
///
/// Every block in a hamster document is delimited this way, which is what
/// lets a reader skip any block without understanding its content.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::base32::add_header;
///
/// assert_eq!(add_header("abc"), "3labc");
/// assert_eq!(add_header(""), "l");
/// ```
#[must_use]
pub fn add_header(payload: &str) -> String {
    let mut out = length_header(payload.chars().count());
    out.push(SEPARATOR);
    out.push_str(payload);
    out
}

/// Reads a length header off the front of `s`, returning the declared payload
/// length and the remainder after the separator.
///
/// The separator is not a base32 symbol, so the first `l` always terminates
/// the length prefix.
///
/// # Errors
///
/// Returns [`Error::MalformedInput`] for invalid length symbols, a custom
/// error if no separator is present, and [`Error::PrecisionOverflow`] for
/// absurd declared lengths.
///
/// # Examples
///
/// ```rust
/// use serde_hamster::base32::read_header;
///
/// assert_eq!(read_header("3labc").unwrap(), (3, "abc"));
/// assert_eq!(read_header("l").unwrap(), (0, ""));
/// ```
pub fn read_header(s: &str) -> Result<(u64, &str)> {
    match s.find(SEPARATOR) {
        Some(at) => Ok((base32_to_u64(&s[..at])?, &s[at + 1..])),
        None => Err(Error::custom("unterminated length header")),
    }
}

fn symbol_values(s: &str) -> Result<Vec<u64>> {
    s.char_indices()
        .map(|(pos, ch)| symbol_value(ch).ok_or_else(|| Error::malformed("base32", ch, pos)))
        .collect()
}
