// SPDX-License-Identifier: Apache-2.0

//! Pure helpers for JSON string escapes and UTF-16 surrogate handling.

/// Resolves the character after a backslash to its unescaped byte.
/// `\uXXXX` is handled separately by the string decoder.
pub(crate) fn unescape(escape: u8) -> Option<u8> {
    match escape {
        b'"' => Some(b'"'),
        b'\\' => Some(b'\\'),
        b'/' => Some(b'/'),
        b'b' => Some(0x08),
        b'f' => Some(0x0C),
        b'n' => Some(b'\n'),
        b'r' => Some(b'\r'),
        b't' => Some(b'\t'),
        _ => None,
    }
}

/// Numeric value of a hexadecimal digit.
pub(crate) fn hex_digit(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some((byte - b'0') as u32),
        b'a'..=b'f' => Some((byte - b'a' + 10) as u32),
        b'A'..=b'F' => Some((byte - b'A' + 10) as u32),
        _ => None,
    }
}

/// High surrogate range 0xD800-0xDBFF.
pub(crate) fn is_high_surrogate(codepoint: u32) -> bool {
    (0xD800..=0xDBFF).contains(&codepoint)
}

/// Low surrogate range 0xDC00-0xDFFF.
pub(crate) fn is_low_surrogate(codepoint: u32) -> bool {
    (0xDC00..=0xDFFF).contains(&codepoint)
}

/// Combines a high/low surrogate pair into one codepoint above the BMP.
pub(crate) fn combine_surrogates(high: u32, low: u32) -> u32 {
    0x10000 + (((high & 0x3FF) << 10) | (low & 0x3FF))
}

/// Length of the UTF-8 sequence introduced by `lead`. Bytes that are not
/// a valid lead pass through one at a time.
pub(crate) fn utf8_len(lead: u8) -> usize {
    match lead {
        0xC0..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF7 => 4,
        _ => 1,
    }
}

pub(crate) fn is_continuation(byte: u8) -> bool {
    byte & 0xC0 == 0x80
}
