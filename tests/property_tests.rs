//! Property-based tests covering the codec invariants across generated
//! inputs. These complement the exact vectors in the wire format tests.

use num_bigint::BigUint;
use proptest::prelude::*;
use serde_hamster::{base32, encode, to_string, Dictionary, Value, DELIMITER};

/// Digit sequences with a nonzero leading digit. Leading zeros carry no
/// value and do not survive a pack/unpack cycle, so they are excluded
/// from round-trip generation.
fn digit_sequences(width: u32) -> impl Strategy<Value = Vec<u64>> {
    let max = if width == 64 {
        u64::MAX
    } else {
        (1u64 << width) - 1
    };
    (1..=max, prop::collection::vec(0..=max, 0..12)).prop_map(|(first, rest)| {
        let mut digits = vec![first];
        digits.extend(rest);
        digits
    })
}

fn alphabet_strings() -> impl Strategy<Value = String> {
    prop::collection::vec(0usize..32, 0..40).prop_map(|indices| {
        indices
            .into_iter()
            .map(|i| base32::ALPHABET[i] as char)
            .collect()
    })
}

/// Reference conversion through BigUint arithmetic, independent of the
/// long-division path under test.
fn big_to_base32(n: &BigUint) -> String {
    let zero = BigUint::from(0u32);
    let thirty_two = BigUint::from(32u32);
    let mut n = n.clone();
    let mut symbols = Vec::new();
    while n > zero {
        let rem = &n % &thirty_two;
        let rem = rem.to_u64_digits().first().copied().unwrap_or(0);
        symbols.push(base32::ALPHABET[rem as usize] as char);
        n = &n / &thirty_two;
    }
    symbols.into_iter().rev().collect()
}

proptest! {
    #[test]
    fn prop_roundtrip_width_1(digits in digit_sequences(1)) {
        let packed = base32::digits_to_base32(&digits, 1).unwrap();
        prop_assert_eq!(base32::base32_to_digits(&packed, 1).unwrap(), digits);
    }

    #[test]
    fn prop_roundtrip_width_4(digits in digit_sequences(4)) {
        let packed = base32::digits_to_base32(&digits, 4).unwrap();
        prop_assert_eq!(base32::base32_to_digits(&packed, 4).unwrap(), digits);
    }

    #[test]
    fn prop_roundtrip_width_8(digits in digit_sequences(8)) {
        let packed = base32::digits_to_base32(&digits, 8).unwrap();
        prop_assert_eq!(base32::base32_to_digits(&packed, 8).unwrap(), digits);
    }

    #[test]
    fn prop_roundtrip_width_11(digits in digit_sequences(11)) {
        let packed = base32::digits_to_base32(&digits, 11).unwrap();
        prop_assert_eq!(base32::base32_to_digits(&packed, 11).unwrap(), digits);
    }

    #[test]
    fn prop_roundtrip_width_64(digits in digit_sequences(64)) {
        let packed = base32::digits_to_base32(&digits, 64).unwrap();
        prop_assert_eq!(base32::base32_to_digits(&packed, 64).unwrap(), digits);
    }

    #[test]
    fn prop_decimal_agrees_with_hex_path(n in any::<u64>()) {
        let via_decimal = base32::decimal_to_base32(&n.to_string()).unwrap();
        let via_hex = base32::from_hex(&format!("{:x}", n)).unwrap();
        prop_assert_eq!(&via_decimal, &via_hex);
        prop_assert_eq!(base32::base32_to_u64(&via_decimal).unwrap(), n);
    }

    #[test]
    fn prop_decimal_agrees_with_biguint_division(bytes in prop::collection::vec(any::<u8>(), 1..24)) {
        let n = BigUint::from_bytes_be(&bytes);
        let expected = big_to_base32(&n);
        prop_assert_eq!(base32::decimal_to_base32(&n.to_string()).unwrap(), expected);
    }

    #[test]
    fn prop_headers_self_delimit(payload in alphabet_strings(), suffix in alphabet_strings()) {
        let framed = format!("{}{}", base32::add_header(&payload), suffix);
        let (len, rest) = base32::read_header(&framed).unwrap();
        let len = usize::try_from(len).unwrap();
        prop_assert_eq!(&rest[..len], payload.as_str());
        prop_assert_eq!(&rest[len..], suffix.as_str());
    }

    #[test]
    fn prop_dictionary_covers_corpus(corpus in prop::collection::vec(any::<String>(), 0..6)) {
        let dict = Dictionary::new(&corpus);
        let n = dict.len() as u64;

        let mut codes: Vec<u64> = dict
            .chars()
            .chars()
            .map(|ch| dict.code(ch).expect("dictionary char must have a code"))
            .collect();
        codes.sort_unstable();
        prop_assert_eq!(codes, (1..=n).collect::<Vec<u64>>());

        let width = dict.width();
        prop_assert!(width >= 1);
        // Width is the smallest that fits every code.
        prop_assert!(u128::from(n) <= (1u128 << width) - 1);
        if width > 1 {
            prop_assert!(u128::from(n) > (1u128 << (width - 1)) - 1);
        }

        for s in &corpus {
            prop_assert!(dict.encode(s).is_ok());
        }
    }

    #[test]
    fn prop_string_packing_is_invertible(s in any::<String>()) {
        let dict = Dictionary::new([s.as_str()]);
        let packed = dict.encode(&s).unwrap();
        let decoded = base32::base32_to_digits(&packed, dict.width()).unwrap();
        let codes: Vec<u64> = s.chars().map(|ch| dict.code(ch).unwrap()).collect();
        prop_assert_eq!(decoded, codes);
    }

    #[test]
    fn prop_documents_have_three_sections(numbers in prop::collection::vec(any::<u64>(), 0..10)) {
        let doc = to_string(&numbers).unwrap();
        prop_assert!(doc.starts_with("hamster.::.::a"));
        prop_assert_eq!(doc.split(DELIMITER).count(), 3);

        // The root block's header spans the entire packed section.
        let packed = doc.split(DELIMITER).nth(2).unwrap();
        let (len, rest) = base32::read_header(&packed[1..]).unwrap();
        prop_assert_eq!(rest.len() as u64, len);
    }

    #[test]
    fn prop_int_and_big_int_share_the_wire(n in any::<u64>()) {
        prop_assert_eq!(
            encode(&Value::Int(n)).unwrap(),
            encode(&Value::BigInt(BigUint::from(n))).unwrap()
        );
    }
}
