// SPDX-License-Identifier: Apache-2.0

//! The skip engine: discards one unclaimed value of arbitrary shape in a
//! single linear pass, tracking nesting with an explicit stack of expected
//! closers instead of native recursion. Thousands of nested brackets cost
//! stack entries, not call frames.

use alloc::vec::Vec;

use crate::decoder::Decoder;
use crate::source::Source;

impl<S: Source> Decoder<S> {
    /// Skips one whole value (scalar, string, array or object) starting at
    /// the cursor. Native stack use is O(1) regardless of nesting depth.
    pub(crate) fn skip_value(&mut self) {
        match self.peek() {
            None => {}
            Some(b'"') => {
                self.advance();
                self.skip_string_tail();
            }
            Some(b'{') => self.skip_brackets(b'}'),
            Some(b'[') => self.skip_brackets(b']'),
            Some(_) => {
                // Bare scalar: numbers and keywords share one alphabet.
                // Anything outside it stays put for the caller to reject.
                while matches!(
                    self.peek(),
                    Some(b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'+' | b'-' | b'.')
                ) {
                    self.advance();
                }
                self.skip_ws();
            }
        }
    }

    /// Skips the remainder of a string (cursor past the opening quote),
    /// advancing over escapes without validating them.
    pub(crate) fn skip_string_tail(&mut self) {
        loop {
            match self.peek() {
                None => {
                    self.set_error("incomplete string while skipping");
                    return;
                }
                Some(b'\\') => {
                    self.advance();
                    if self.peek().is_none() {
                        self.set_error("incomplete string escape while skipping");
                        return;
                    }
                    self.advance();
                }
                Some(b'"') => {
                    self.advance();
                    self.skip_ws();
                    return;
                }
                Some(_) => self.advance(),
            }
        }
    }

    /// Bracket matching with an explicit stack of expected closers; the
    /// cursor starts on the opening bracket whose closer is `term`.
    fn skip_brackets(&mut self, term: u8) {
        self.advance(); // opening bracket
        let mut expects: Vec<u8> = alloc::vec![term];
        let mut max_depth = 1;
        loop {
            let byte = match self.peek() {
                Some(byte) => byte,
                None => {
                    self.set_error(if term == b'}' {
                        "incomplete object"
                    } else {
                        "incomplete array"
                    });
                    return;
                }
            };
            self.advance();
            match byte {
                b'"' => self.skip_string_tail(),
                b'[' => {
                    expects.push(b']');
                    max_depth = max_depth.max(expects.len());
                }
                b'{' => {
                    expects.push(b'}');
                    max_depth = max_depth.max(expects.len());
                }
                b']' | b'}' => {
                    if expects.last() != Some(&byte) {
                        self.set_error(if byte == b'}' {
                            "mismatched '}'"
                        } else {
                            "mismatched ']'"
                        });
                        return;
                    }
                    expects.pop();
                    if expects.is_empty() {
                        log::trace!("skipped unclaimed value, nesting depth {}", max_depth);
                        self.skip_ws();
                        return;
                    }
                }
                _ => {}
            }
        }
    }
}
