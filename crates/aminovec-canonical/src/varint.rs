//! Base-128 varints.
//!
//! Signed values use the zig-zag mapping (`0 -> 0`, `-1 -> 1`, `1 -> 2`, ...)
//! before the base-128 step, so small magnitudes of either sign stay short.
//! Unsigned varints are used for field keys, length prefixes and the default
//! `int64` field representation.

use thiserror::Error;

/// Longest possible encoding of a 64-bit value.
pub const MAX_VARINT_LEN: usize = 10;

/// Errors returned by the varint decoders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VarintError {
    /// The input ended while the continuation bit was still set.
    #[error("varint truncated after {read} bytes")]
    Truncated {
        /// Bytes consumed before the input ran out.
        read: usize,
    },
    /// The encoded value does not fit in 64 bits.
    #[error("varint overflows 64 bits")]
    Overflow,
}

/// Maps a signed value onto the unsigned space.
pub fn zigzag(value: i64) -> u64 {
    ((value << 1) ^ (value >> 63)) as u64
}

/// Inverse of [`zigzag`].
pub fn unzigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

/// Appends the unsigned varint encoding of `value`.
pub fn put_uvarint(out: &mut Vec<u8>, mut value: u64) {
    while value >= 0x80 {
        out.push((value as u8 & 0x7f) | 0x80);
        value >>= 7;
    }
    out.push(value as u8);
}

/// Appends the zig-zag varint encoding of `value`.
pub fn put_varint(out: &mut Vec<u8>, value: i64) {
    put_uvarint(out, zigzag(value));
}

/// Encodes `value` as an unsigned varint.
pub fn encode_uvarint(value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(uvarint_len(value));
    put_uvarint(&mut out, value);
    out
}

/// Encodes `value` as a zig-zag varint.
///
/// Zero encodes to the single byte `0x00`; `1` encodes to `0x02`.
pub fn encode_varint(value: i64) -> Vec<u8> {
    encode_uvarint(zigzag(value))
}

/// Number of bytes [`put_uvarint`] writes for `value`.
pub fn uvarint_len(value: u64) -> usize {
    let bits = 64 - (value | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Number of bytes [`put_varint`] writes for `value`.
pub fn varint_len(value: i64) -> usize {
    uvarint_len(zigzag(value))
}

/// Decodes an unsigned varint from the front of `input`.
///
/// Returns the value and the number of bytes consumed.
pub fn decode_uvarint(input: &[u8]) -> Result<(u64, usize), VarintError> {
    let mut value = 0u64;
    for (i, &byte) in input.iter().enumerate().take(MAX_VARINT_LEN) {
        if i == MAX_VARINT_LEN - 1 && byte > 1 {
            return Err(VarintError::Overflow);
        }
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte < 0x80 {
            return Ok((value, i + 1));
        }
    }
    if input.len() >= MAX_VARINT_LEN {
        return Err(VarintError::Overflow);
    }
    Err(VarintError::Truncated { read: input.len() })
}

/// Decodes a zig-zag varint from the front of `input`.
pub fn decode_varint(input: &[u8]) -> Result<(i64, usize), VarintError> {
    let (raw, read) = decode_uvarint(input)?;
    Ok((unzigzag(raw), read))
}
