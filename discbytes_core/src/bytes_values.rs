//! Stateless helpers over [`BytesView`]s.
//!
//! - zero handling: [`count_zeros`], [`count_leading_zeros`], [`trim_leading_zeros`]
//! - integer encodings: [`to_minimal_bytes`], [`of_unsigned_byte`], [`of_unsigned_short`], [`of_unsigned_int`]
//! - interpretation: [`as_unsigned_big_integer`], [`as_signed_big_integer`], [`as_string`]
//! - hex parsing: [`from_hex_string`], [`from_raw_hex_string`]
//! - [`concatenate`]
use crate::bytes_value::{BytesSlice, BytesValue, BytesView};
use crate::error::{CoreError, CoreErrorKind};
use log::trace;
use num_bigint::{BigInt, Sign};
use std::fmt::Display;

pub fn count_zeros(value: &(impl BytesView + ?Sized)) -> usize {
    value.as_slice().iter().filter(|byte| **byte == 0).count()
}

/// Number of zero bytes before the first non-zero one (the size for all-zero values).
pub fn count_leading_zeros(value: &(impl BytesView + ?Sized)) -> usize {
    let bytes = value.as_slice();
    bytes
        .iter()
        .position(|byte| *byte != 0)
        .unwrap_or(bytes.len())
}

/// The part of `value` starting at its first non-zero byte, without copying.
/// All-zero values trim to [`BytesSlice::EMPTY`].
pub fn trim_leading_zeros<V: BytesView + ?Sized>(value: &V) -> BytesSlice<'_> {
    let bytes = value.as_slice();
    match bytes.iter().position(|byte| *byte != 0) {
        Some(first) => BytesSlice::wrap(&bytes[first..]),
        None => BytesSlice::EMPTY,
    }
}

/// Big-endian bytes of `value` without leading zero bytes; zero encodes as
/// [`BytesValue::EMPTY`].
pub fn to_minimal_bytes(value: u64) -> BytesValue {
    if value == 0 {
        return BytesValue::EMPTY;
    }
    let skip = value.leading_zeros() as usize / 8;
    BytesValue::wrap(value.to_be_bytes()[skip..].to_vec())
}

fn out_of_range(value: impl Display, width: &str) -> CoreError {
    CoreError::new(
        CoreErrorKind::ValueOutOfRange,
        format!("Value {value} cannot be represented as an unsigned {width} (it is negative or too big)")
            .as_str(),
    )
}

pub fn of_unsigned_byte(value: i32) -> Result<BytesValue, CoreError> {
    let byte = u8::try_from(value).map_err(|_| out_of_range(value, "byte"))?;
    Ok(BytesValue::wrap(vec![byte]))
}

pub fn of_unsigned_short(value: i32) -> Result<BytesValue, CoreError> {
    let short = u16::try_from(value).map_err(|_| out_of_range(value, "short"))?;
    Ok(BytesValue::wrap(short.to_be_bytes().to_vec()))
}

pub fn of_unsigned_int(value: i64) -> Result<BytesValue, CoreError> {
    let int = u32::try_from(value).map_err(|_| out_of_range(value, "int"))?;
    Ok(BytesValue::wrap(int.to_be_bytes().to_vec()))
}

/// A newly allocated value holding `values` back to back.
pub fn concatenate(values: &[&dyn BytesView]) -> BytesValue {
    let size = values.iter().map(|value| value.size()).sum();
    let mut result = Vec::with_capacity(size);
    for value in values {
        result.extend_from_slice(value.as_slice());
    }
    BytesValue::wrap(result)
}

/// Reads the bytes as a non-negative big-endian magnitude.
pub fn as_unsigned_big_integer(value: &(impl BytesView + ?Sized)) -> BigInt {
    BigInt::from_bytes_be(Sign::Plus, value.as_slice())
}

/// Reads the bytes as a big-endian two's-complement integer. An empty value
/// reads as zero.
pub fn as_signed_big_integer(value: &(impl BytesView + ?Sized)) -> BigInt {
    if value.is_empty() {
        return BigInt::from(0u8);
    }
    BigInt::from_signed_bytes_be(value.as_slice())
}

/// Decodes the bytes as UTF-8. Each invalid sequence is replaced by U+FFFD.
pub fn as_string(value: &(impl BytesView + ?Sized)) -> String {
    String::from_utf8_lossy(value.as_slice()).into_owned()
}

pub fn from_hex_string(
    value: &str,
    dest_size: Option<usize>,
    lenient: bool,
) -> Result<BytesValue, CoreError> {
    Ok(BytesValue::wrap(from_raw_hex_string(value, dest_size, lenient)?))
}

/// Parses an optionally `0x`-prefixed hex string.
///
/// The parsed bytes are right-aligned in `dest_size` bytes (the natural size when
/// `None`). With `lenient`, an odd number of digits gets an implicit leading
/// `0`; otherwise it is rejected. Reported character indices count from the first
/// digit after the prefix, ignoring the implicit digit.
pub fn from_raw_hex_string(
    value: &str,
    dest_size: Option<usize>,
    lenient: bool,
) -> Result<Vec<u8>, CoreError> {
    let mut digits: Vec<char> = value.strip_prefix("0x").unwrap_or(value).chars().collect();

    let mut index_shift = 0;
    if digits.len() % 2 != 0 {
        if !lenient {
            return Err(CoreError::new(
                CoreErrorKind::MalformedHex,
                format!("Invalid odd-length hex binary representation {value}").as_str(),
            ));
        }
        trace!("Prepending a zero digit to odd-length hex {value}");
        digits.insert(0, '0');
        index_shift = 1;
    }

    let size = digits.len() / 2;
    let dest_size = match dest_size {
        None => size,
        Some(dest_size) if size <= dest_size => dest_size,
        Some(dest_size) => {
            return Err(CoreError::new(
                CoreErrorKind::ValueTooLarge,
                format!(
                    "Hex value {value} is too big: expected at most {dest_size} bytes but got {size}"
                )
                .as_str(),
            ));
        }
    };

    let mut out = vec![0; dest_size];
    let dest_offset = dest_size - size;
    for (pair, chunk) in digits.chunks_exact(2).enumerate() {
        let index = pair * 2;
        let high = hex_digit(chunk[0])
            .ok_or_else(|| illegal_character(value, chunk[0], index - index_shift))?;
        let low = hex_digit(chunk[1])
            .ok_or_else(|| illegal_character(value, chunk[1], index + 1 - index_shift))?;
        out[dest_offset + pair] = high << 4 | low;
    }
    Ok(out)
}

fn hex_digit(character: char) -> Option<u8> {
    character.to_digit(16).map(|digit| digit as u8)
}

fn illegal_character(value: &str, character: char, index: usize) -> CoreError {
    CoreError::new(
        CoreErrorKind::MalformedHex,
        format!(
            "Illegal character '{character}' found at index {index} in hex binary representation {value}"
        )
        .as_str(),
    )
}
