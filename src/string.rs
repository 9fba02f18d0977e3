// SPDX-License-Identifier: Apache-2.0

//! String decoding: quote-delimited scanning, the backslash escape table,
//! `\uXXXX` expansion with UTF-16 surrogate-pair combination, and
//! size-capped extraction into caller-owned storage.
//!
//! The body is decoded in a single pass over the source into the decoder's
//! scratch buffer; the destination is only sized and filled once the exact
//! decoded length is known. This keeps the logic shared between the slice
//! backend (which could re-walk its span) and the stream backend (which
//! cannot).

use alloc::string::String;
use alloc::vec::Vec;

use crate::decoder::Decoder;
use crate::escape;
use crate::source::Source;

/// Destination for [`Decoder::read_string_to_buffer`].
///
/// `alloc` is called exactly once, with the exact decoded size in bytes;
/// it returns the writable destination, or `None` to skip the string
/// without extracting it. The unit type is a ready-made skip-only sink.
pub trait StringSink {
    fn alloc(&mut self, size: usize) -> Option<&mut [u8]>;
}

impl StringSink for Vec<u8> {
    fn alloc(&mut self, size: usize) -> Option<&mut [u8]> {
        self.resize(size, 0);
        Some(&mut self[..])
    }
}

/// Skip-only sink: the string is consumed and validated but not extracted.
impl StringSink for () {
    fn alloc(&mut self, _size: usize) -> Option<&mut [u8]> {
        None
    }
}

impl<S: Source> Decoder<S> {
    /// Attempts to extract a string from the current position.
    ///
    /// `\uXXXX` escapes are expanded to UTF-8, combining surrogate pairs.
    /// At most `max_size` decoded bytes are returned; the remainder of the
    /// source span is still consumed. Truncation only ever drops whole
    /// codepoints, so the result may undershoot the cap by up to 3 bytes
    /// but never ends mid-sequence. Lexical errors (unterminated string,
    /// bad escape, bad hex digits, unpaired surrogate) latch the error
    /// state and report `None`.
    pub fn try_string(&mut self, max_size: usize) -> Option<String> {
        if self.peek() != Some(b'"') {
            return None;
        }
        self.advance();
        self.decode_string_body(max_size);
        if self.error.is_some() {
            return None;
        }
        match core::str::from_utf8(&self.scratch) {
            Ok(text) => Some(String::from(text)),
            Err(_) => {
                self.set_error("invalid utf-8 in string");
                None
            }
        }
    }

    /// Extracts a string, substituting `default` on mismatch.
    /// Always advances past the current element.
    pub fn get_string(&mut self, default: &str, max_size: usize) -> String {
        match self.try_string(max_size) {
            Some(value) => value,
            None => {
                self.skip_value();
                String::from(default)
            }
        }
    }

    /// Extracts a string into caller-owned storage.
    ///
    /// When the current position holds a string, `sink` is asked for a
    /// destination of the exact decoded size (capped at `max_size`) and
    /// the call returns `true`; a sink that returns `None` requests
    /// skip-only. Returns `false` with the cursor untouched when there is
    /// no string here. Once the opening quote was seen the decoder is
    /// committed: a malformed string latches an error, the sink is not
    /// consulted, and the call still returns `true`.
    pub fn read_string_to_buffer<A>(&mut self, max_size: usize, sink: &mut A) -> bool
    where
        A: StringSink + ?Sized,
    {
        if self.peek() != Some(b'"') {
            return false;
        }
        self.advance();
        self.decode_string_body(max_size);
        if self.error.is_some() {
            return true;
        }
        if let Some(dst) = sink.alloc(self.scratch.len()) {
            let len = dst.len().min(self.scratch.len());
            dst[..len].copy_from_slice(&self.scratch[..len]);
        }
        true
    }

    /// Decodes a string body (cursor just past the opening quote) into the
    /// scratch buffer, consuming the source through the closing quote.
    /// Output is capped at `max_size` bytes, dropping only whole
    /// codepoints; once capped, the rest of the span is skipped.
    fn decode_string_body(&mut self, max_size: usize) {
        self.scratch.clear();
        loop {
            let byte = match self.peek() {
                Some(byte) => byte,
                None => {
                    self.set_error("incomplete string");
                    return;
                }
            };
            match byte {
                b'"' => {
                    self.advance();
                    self.skip_ws();
                    return;
                }
                b'\\' => {
                    self.advance();
                    if !self.decode_escape(max_size) {
                        return;
                    }
                }
                lead => {
                    if !self.copy_raw_codepoint(lead, max_size) {
                        return;
                    }
                }
            }
        }
    }

    /// Decodes one escape sequence (cursor just past the backslash).
    /// Returns `false` when the string is finished early: either an error
    /// latched, or the size cap was hit and the remainder skipped.
    fn decode_escape(&mut self, max_size: usize) -> bool {
        let escape = match self.peek() {
            Some(byte) => byte,
            None => {
                self.set_error("incomplete escape");
                return false;
            }
        };
        if escape == b'u' {
            self.advance();
            let codepoint = match self.read_codepoint() {
                Some(value) => value,
                None => return false,
            };
            let mut utf8 = [0u8; 4];
            let encoded = match char::from_u32(codepoint) {
                Some(ch) => ch.encode_utf8(&mut utf8).as_bytes(),
                None => {
                    self.set_error("invalid codepoint");
                    return false;
                }
            };
            if self.scratch.len() + encoded.len() > max_size {
                self.skip_string_tail();
                return false;
            }
            self.scratch.extend_from_slice(encoded);
        } else {
            let unescaped = match escape::unescape(escape) {
                Some(byte) => byte,
                None => {
                    self.set_error("invalid escape");
                    return false;
                }
            };
            self.advance();
            if self.scratch.len() >= max_size {
                self.skip_string_tail();
                return false;
            }
            self.scratch.push(unescaped);
        }
        true
    }

    /// Copies one raw (unescaped) codepoint into the scratch buffer, whole
    /// or not at all.
    fn copy_raw_codepoint(&mut self, lead: u8, max_size: usize) -> bool {
        let len = escape::utf8_len(lead);
        if self.scratch.len() + len > max_size {
            self.skip_string_tail();
            return false;
        }
        self.scratch.push(lead);
        self.advance();
        for _ in 1..len {
            match self.peek() {
                Some(byte) if escape::is_continuation(byte) => {
                    self.scratch.push(byte);
                    self.advance();
                }
                // Malformed sequence; surfaces later as invalid utf-8
                Some(_) => break,
                None => {
                    self.set_error("incomplete string");
                    return false;
                }
            }
        }
        true
    }

    /// Reads the `XXXX` of a `\uXXXX` escape (cursor just past the `u`),
    /// combining a UTF-16 surrogate pair into one codepoint when present.
    fn read_codepoint(&mut self) -> Option<u32> {
        let first = self.read_hex4()?;
        if escape::is_low_surrogate(first) {
            self.set_error("low surrogate without preceding high surrogate");
            return None;
        }
        if escape::is_high_surrogate(first) {
            if self.peek() != Some(b'\\') {
                self.set_error("high surrogate not followed by \\u escape");
                return None;
            }
            self.advance();
            if self.peek() != Some(b'u') {
                self.set_error("high surrogate not followed by \\u escape");
                return None;
            }
            self.advance();
            let second = self.read_hex4()?;
            if !escape::is_low_surrogate(second) {
                self.set_error("high surrogate without following low surrogate");
                return None;
            }
            return Some(escape::combine_surrogates(first, second));
        }
        Some(first)
    }

    fn read_hex4(&mut self) -> Option<u32> {
        let mut value = 0u32;
        for _ in 0..4 {
            let byte = match self.peek() {
                Some(byte) => byte,
                None => {
                    self.set_error("incomplete \\uXXXX sequence");
                    return None;
                }
            };
            let digit = match escape::hex_digit(byte) {
                Some(digit) => digit,
                None => {
                    self.set_error("not a hex digit");
                    return None;
                }
            };
            value = (value << 4) | digit;
            self.advance();
        }
        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SliceDecoder;
    use test_log::test;

    #[test]
    fn plain_and_escaped_content() {
        let mut decoder = SliceDecoder::new(br#""a\n\t\"b\\/c""#);
        assert_eq!(decoder.get_string("", usize::MAX), "a\n\t\"b\\/c");
        assert!(decoder.success());
    }

    #[test]
    fn unicode_escapes_expand_to_utf8() {
        let mut decoder = SliceDecoder::new(br#""\u0060\u012a\u12AB""#);
        assert_eq!(decoder.get_string("", usize::MAX), "\u{60}\u{12a}\u{12ab}");
        assert!(decoder.success());
    }

    #[test]
    fn mismatch_leaves_cursor_untouched() {
        let mut decoder = SliceDecoder::new(b"123");
        assert_eq!(decoder.try_string(usize::MAX), None);
        assert!(decoder.error().is_none());
        assert_eq!(decoder.try_number(), Some(123.0));
        assert!(decoder.success());
    }

    #[test]
    fn sink_receives_exact_size() {
        let mut decoder = SliceDecoder::new(br#""hello""#);
        let mut dst = Vec::new();
        assert!(decoder.read_string_to_buffer(usize::MAX, &mut dst));
        assert_eq!(dst, b"hello");
        assert!(decoder.success());
    }

    #[test]
    fn skip_only_sink_still_consumes_the_string() {
        let mut decoder = SliceDecoder::new(br#"["skipped", 2]"#);
        let mut second = 0.0;
        assert!(decoder.try_array(|d, index| {
            if index == 0 {
                assert!(d.read_string_to_buffer(usize::MAX, &mut ()));
            } else {
                second = d.get_number(0.0);
            }
        }));
        assert_eq!(second, 2.0);
        assert!(decoder.success());
    }

    #[test]
    fn malformed_utf8_is_rejected() {
        // 0xC3 announces a 2-byte sequence but 'x' is not a continuation
        let mut decoder = SliceDecoder::new(b"\"\xc3x\"");
        assert_eq!(decoder.try_string(usize::MAX), None);
        assert_eq!(decoder.error_message(), Some("invalid utf-8 in string"));
    }

    #[test]
    fn raw_utf8_passes_through() {
        let mut decoder = SliceDecoder::new("\"héllo 😀\"".as_bytes());
        assert_eq!(decoder.get_string("", usize::MAX), "héllo 😀");
        assert!(decoder.success());
    }
}
