//! UTF-8 codec primitives.
//!
//! `validate` walks a byte range defensively and is the only function here
//! that tolerates malformed input. Everything else assumes the buffer has
//! already passed validation (or came from `str`, which guarantees it) and
//! decodes without checks.
//!
//! Encoding layout:
//!
//! ```text
//! bytes  bits  lead      continuations
//!     1     7  0xxxxxxx
//!     2    11  110xxxxx  10xxxxxx
//!     3    16  1110xxxx  10xxxxxx 10xxxxxx
//!     4    21  11110xxx  10xxxxxx 10xxxxxx 10xxxxxx
//! ```

/// Check if a byte is a continuation byte (`10xxxxxx`)
#[inline]
pub(crate) fn is_continuation(b: u8) -> bool {
    b & 0xC0 == 0x80
}

/// Check if a byte starts a code point (ASCII or a lead byte).
/// The byte past the end of a sequence is also a boundary.
#[inline]
pub(crate) fn is_boundary(b: u8) -> bool {
    !is_continuation(b)
}

/// Length in bytes of the sequence starting with `lead`.
/// Assumes `lead` begins a validated sequence.
#[inline]
pub(crate) fn sequence_len(lead: u8) -> usize {
    match lead.leading_ones() {
        2 => 2,
        3 => 3,
        4 => 4,
        _ => 1,
    }
}

/// Decode one code point starting at `index`.
/// Returns the scalar and the index of the next code point.
///
/// Assumes `bytes` is validated UTF-8 and `index` is a boundary; never
/// call this on unvalidated input.
#[inline]
pub(crate) fn decode(bytes: &[u8], index: usize) -> (char, usize) {
    let lead = bytes[index];
    if lead < 0x80 {
        return (char::from(lead), index + 1);
    }

    let len = sequence_len(lead);
    let mut value = match len {
        2 => u32::from(lead & 0x1F),
        3 => u32::from(lead & 0x0F),
        _ => u32::from(lead & 0x07),
    };
    for i in 1..len {
        value = (value << 6) | u32::from(bytes[index + i] & 0x3F);
    }

    // Validation already rejected surrogates and values above U+10FFFF,
    // so `value` is a scalar value.
    let scalar = unsafe { char::from_u32_unchecked(value) };
    (scalar, index + len)
}

/// Move one code point backward from `index`, returning the index of the
/// previous code point's lead byte. Scans back at most 3 continuation
/// bytes. Assumes validated input and `index > 0`.
#[inline]
pub(crate) fn step_back(bytes: &[u8], index: usize) -> usize {
    let mut i = index - 1;
    while i > 0 && is_continuation(bytes[i]) {
        i -= 1;
    }
    i
}

/// Validate that `bytes` is well-formed UTF-8.
///
/// Single forward pass. Rejects bad lead bytes, missing or malformed
/// continuation bytes, overlong encodings, surrogates (U+D800..=U+DFFF)
/// and values above U+10FFFF.
pub(crate) fn validate(bytes: &[u8]) -> bool {
    let mut rest = bytes;
    while !rest.is_empty() {
        match check_one(rest) {
            Some(r) => rest = r,
            None => return false,
        }
    }
    true
}

/// Check one code point at the head of `b`, returning the remainder.
/// The second-byte ranges pin down overlong, surrogate and out-of-range
/// sequences; the remaining positions only need the `10xxxxxx` shape.
fn check_one(b: &[u8]) -> Option<&[u8]> {
    match b[0] {
        0x00..=0x7F => Some(&b[1..]),
        // Continuation byte in lead position, or overlong 2-byte (C0/C1)
        0x80..=0xC1 => None,
        0xC2..=0xDF => {
            if b.len() < 2 || !is_continuation(b[1]) {
                return None;
            }
            Some(&b[2..])
        }
        // E0 with b[1] < A0 would be an overlong 3-byte encoding
        0xE0 => check_three(b, 0xA0..=0xBF),
        0xE1..=0xEC => check_three(b, 0x80..=0xBF),
        // ED with b[1] >= A0 would be a surrogate
        0xED => check_three(b, 0x80..=0x9F),
        0xEE..=0xEF => check_three(b, 0x80..=0xBF),
        // F0 with b[1] < 90 would be an overlong 4-byte encoding
        0xF0 => check_four(b, 0x90..=0xBF),
        0xF1..=0xF3 => check_four(b, 0x80..=0xBF),
        // F4 with b[1] > 8F would exceed U+10FFFF
        0xF4 => check_four(b, 0x80..=0x8F),
        0xF5..=0xFF => None,
    }
}

fn check_three(b: &[u8], second: core::ops::RangeInclusive<u8>) -> Option<&[u8]> {
    if b.len() < 3 || !second.contains(&b[1]) || !is_continuation(b[2]) {
        return None;
    }
    Some(&b[3..])
}

fn check_four(b: &[u8], second: core::ops::RangeInclusive<u8>) -> Option<&[u8]> {
    if b.len() < 4 || !second.contains(&b[1]) || !is_continuation(b[2]) || !is_continuation(b[3]) {
        return None;
    }
    Some(&b[4..])
}
