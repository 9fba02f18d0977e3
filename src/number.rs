// SPDX-License-Identifier: Apache-2.0

//! Numeric literal scanning: a locale-independent floating-point grammar
//! with a strict trailing-delimiter requirement, so `1.0e+28a` is rejected
//! instead of being silently truncated to a numeric prefix.

use crate::decoder::Decoder;
use crate::source::Source;

/// Bytes that may legally follow a numeric literal (after whitespace).
fn is_delimiter(byte: u8) -> bool {
    matches!(byte, b',' | b']' | b'}')
}

fn bite<S: Source>(decoder: &mut Decoder<S>) {
    if let Some(byte) = decoder.peek() {
        decoder.scratch.push(byte);
        decoder.advance();
    }
}

/// Abandons a committed scan: restores the cursor where possible, latches
/// an error on forward-only backends.
fn fail<S: Source>(decoder: &mut Decoder<S>, consumed: usize, message: &'static str) -> Option<f64> {
    if !decoder.rewind(consumed) {
        decoder.set_error(message);
    }
    None
}

pub(crate) fn try_number<S: Source>(decoder: &mut Decoder<S>) -> Option<f64> {
    let first = decoder.peek()?;
    if !matches!(first, b'-' | b'+' | b'.' | b'0'..=b'9') {
        return None;
    }

    decoder.scratch.clear();
    if matches!(decoder.peek(), Some(b'-' | b'+')) {
        bite(decoder);
    }
    let mut digits = 0;
    while matches!(decoder.peek(), Some(b'0'..=b'9')) {
        bite(decoder);
        digits += 1;
    }
    if decoder.peek() == Some(b'.') {
        bite(decoder);
        while matches!(decoder.peek(), Some(b'0'..=b'9')) {
            bite(decoder);
            digits += 1;
        }
    }
    if digits == 0 {
        let consumed = decoder.scratch.len();
        return fail(decoder, consumed, "malformed number");
    }
    if matches!(decoder.peek(), Some(b'e' | b'E')) {
        bite(decoder);
        if matches!(decoder.peek(), Some(b'-' | b'+')) {
            bite(decoder);
        }
        let mut exp_digits = 0;
        while matches!(decoder.peek(), Some(b'0'..=b'9')) {
            bite(decoder);
            exp_digits += 1;
        }
        if exp_digits == 0 {
            let consumed = decoder.scratch.len();
            return fail(decoder, consumed, "malformed number");
        }
    }

    // The literal must stand alone: anything glued to it other than
    // whitespace or a structural delimiter makes the whole token garbage,
    // not a shorter number.
    let mut trailing_ws = 0;
    while matches!(decoder.peek(), Some(byte) if byte <= b' ') {
        decoder.advance();
        trailing_ws += 1;
    }
    match decoder.peek() {
        None => {}
        Some(byte) if is_delimiter(byte) => {}
        Some(_) => {
            let consumed = decoder.scratch.len() + trailing_ws;
            return fail(decoder, consumed, "unexpected character after number");
        }
    }

    let parsed = core::str::from_utf8(&decoder.scratch)
        .ok()
        .and_then(|text| text.parse::<f64>().ok());
    let value = match parsed {
        Some(value) => value,
        None => {
            decoder.set_error("malformed number");
            return None;
        }
    };
    if value.is_infinite() {
        decoder.set_error("numeric overflow");
        return None;
    }
    Some(value)
}
