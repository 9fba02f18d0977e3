// SPDX-License-Identifier: Apache-2.0

//! The decoder core: the cursor choke point, lexical primitives, scalar
//! decoders, structural traversal, and the sticky error controller.

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;

use crate::error::DecodeError;
use crate::slice_source::SliceSource;
use crate::source::Source;
use crate::stream_source::{Reader, StreamSource};

/// Pull-style JSON decoder over any [`Source`] backend.
///
/// Each `try_*` / `get_*` call advances the cursor past exactly the value
/// it consumed, or leaves it untouched on a clean type mismatch. The
/// cursor always rests on the first significant byte of the next token
/// between public calls. A decoder instance represents exactly one
/// in-progress parse; it is not meant to be shared between traversals.
pub struct Decoder<S: Source> {
    pub(crate) source: S,
    pub(crate) error: Option<DecodeError>,
    pub(crate) scratch: Vec<u8>,
}

/// Decoder over an in-memory byte span.
pub type SliceDecoder<'a> = Decoder<SliceSource<'a>>;

/// Decoder over a sequential byte stream.
pub type StreamDecoder<R> = Decoder<StreamSource<R>>;

impl<'a> SliceDecoder<'a> {
    /// Creates a decoder over `data`, positioned at the first significant
    /// byte.
    pub fn new(data: &'a [u8]) -> Self {
        Decoder::from_source(SliceSource::new(data))
    }
}

impl<R: Reader> StreamDecoder<R> {
    /// Creates a decoder that pulls bytes from `reader`.
    pub fn from_reader(reader: R) -> Self {
        Decoder::from_source(StreamSource::new(reader))
    }
}

impl<S: Source> Decoder<S> {
    /// Creates a decoder over an already-constructed source.
    pub fn from_source(source: S) -> Self {
        let mut decoder = Self {
            source,
            error: None,
            scratch: Vec::new(),
        };
        decoder.skip_ws();
        decoder
    }

    /// Prepares the decoder for a new parsing session over `source`.
    pub fn reset(&mut self, source: S) {
        self.source = source;
        self.error = None;
        self.scratch.clear();
        self.skip_ws();
    }

    /// True when the whole input was consumed and no error was latched.
    pub fn success(&self) -> bool {
        self.error.is_none() && !self.source.failed() && self.source.peek().is_none()
    }

    /// Latches an error at the current position. The first error of a
    /// session wins; later calls are no-ops. Once latched, every read
    /// behaves as end of input, so in-flight traversals unwind to the
    /// top-level call site with no further callback invocations.
    ///
    /// Traversal callbacks may call this to abort early with a
    /// domain-specific message ("stop parsing, I found what I needed").
    pub fn set_error(&mut self, message: impl Into<Cow<'static, str>>) {
        if self.error.is_none() {
            let position = self.source.position();
            let message = message.into();
            log::debug!("error latched at offset {}: {}", position, message);
            self.error = Some(DecodeError { position, message });
        }
    }

    /// The latched error, if any.
    pub fn error(&self) -> Option<&DecodeError> {
        self.error.as_ref()
    }

    /// Position of the latched error, if any.
    pub fn error_position(&self) -> Option<usize> {
        self.error.as_ref().map(|e| e.position())
    }

    /// Message of the latched error, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message())
    }

    // ---- cursor choke point ----

    /// The single choke point: a latched error (or a stream read failure)
    /// reads as end of input everywhere above, which is what makes every
    /// loop in the decoder terminate after an error with no explicit
    /// checks threaded through.
    pub(crate) fn peek(&mut self) -> Option<u8> {
        if self.error.is_some() {
            return None;
        }
        match self.source.peek() {
            Some(byte) => Some(byte),
            None => {
                if self.source.failed() {
                    self.set_error("read failed");
                }
                None
            }
        }
    }

    pub(crate) fn advance(&mut self) {
        if self.error.is_none() {
            self.source.advance();
        }
    }

    pub(crate) fn position(&self) -> usize {
        self.source.position()
    }

    pub(crate) fn rewind(&mut self, n: usize) -> bool {
        if self.error.is_some() {
            return false;
        }
        self.source.rewind(n)
    }

    // ---- lexical primitives ----

    pub(crate) fn skip_ws(&mut self) {
        while matches!(self.peek(), Some(byte) if byte <= b' ') {
            self.advance();
        }
    }

    /// Matches a single delimiter byte; consumes it plus trailing
    /// whitespace on success, leaves the cursor untouched on mismatch.
    pub(crate) fn eat(&mut self, term: u8) -> bool {
        if self.peek() == Some(term) {
            self.advance();
            self.skip_ws();
            true
        } else {
            false
        }
    }

    /// Matches a keyword literal (`true`, `false`, `null`).
    ///
    /// A mismatch on the first byte is a clean failure with the cursor
    /// untouched. A mismatch after the first byte restores the cursor on
    /// backends that can rewind; on a forward-only stream the input is
    /// genuinely malformed at this point and an error latches.
    pub(crate) fn eat_keyword(&mut self, keyword: &'static str) -> bool {
        let bytes = keyword.as_bytes();
        if self.peek() != Some(bytes[0]) {
            return false;
        }
        self.advance();
        let mut consumed = 1;
        for &expected in &bytes[1..] {
            if self.peek() == Some(expected) {
                self.advance();
                consumed += 1;
            } else {
                if !self.rewind(consumed) {
                    self.set_error("malformed literal");
                }
                return false;
            }
        }
        self.skip_ws();
        true
    }

    // ---- scalar decoders ----

    /// Attempts to extract a number from the current position.
    ///
    /// On a clean type mismatch, reports `None` with the cursor untouched.
    /// Trailing garbage glued to a numeric prefix (`1.0e+28a`) is absence,
    /// not a shorter number; on the stream backend, which cannot restore
    /// the cursor, it latches an error instead. Numeric overflow latches
    /// an error and never yields a value.
    pub fn try_number(&mut self) -> Option<f64> {
        crate::number::try_number(self)
    }

    /// Extracts a number, substituting `default` on mismatch.
    /// Always advances past the current element.
    pub fn get_number(&mut self, default: f64) -> f64 {
        match self.try_number() {
            Some(value) => value,
            None => {
                self.skip_value();
                default
            }
        }
    }

    /// Attempts to extract `true` or `false` from the current position.
    pub fn try_bool(&mut self) -> Option<bool> {
        if self.eat_keyword("false") {
            Some(false)
        } else if self.eat_keyword("true") {
            Some(true)
        } else {
            None
        }
    }

    /// Extracts a boolean, substituting `default` on mismatch.
    /// Always advances past the current element.
    pub fn get_bool(&mut self, default: bool) -> bool {
        match self.try_bool() {
            Some(value) => value,
            None => {
                self.skip_value();
                default
            }
        }
    }

    /// Probes for `null`. Consumes it and returns `true` when present;
    /// otherwise leaves the position intact so the caller can `try_*` or
    /// `get_*` the real value.
    pub fn get_null(&mut self) -> bool {
        self.eat_keyword("null")
    }

    // ---- structural traversal ----

    /// Attempts to extract an array from the current position.
    ///
    /// Returns `false` with the cursor untouched when the opening bracket
    /// is absent. Otherwise invokes `on_item` with the decoder and the
    /// item index, once per element; an item the callback does not consume
    /// is skipped whole, whatever its shape. A malformed separator latches
    /// a descriptive error while the call still returns `true`, since a
    /// well-formed opener was seen; detect it via [`Decoder::success`].
    pub fn try_array<F>(&mut self, mut on_item: F) -> bool
    where
        F: FnMut(&mut Self, usize),
    {
        if !self.eat(b'[') {
            return false;
        }
        if self.eat(b']') {
            return true;
        }
        let mut index = 0;
        loop {
            let before = self.position();
            on_item(self, index);
            if self.position() == before {
                self.skip_value();
            }
            index += 1;
            if !self.eat(b',') {
                break;
            }
            if self.peek() == Some(b']') {
                self.set_error("expected value after ','");
                return true;
            }
        }
        if !self.eat(b']') {
            self.set_error("expected ',' or ']'");
        }
        true
    }

    /// Extracts an array, skipping whatever value is actually present when
    /// the current position does not hold one.
    pub fn get_array<F>(&mut self, on_item: F)
    where
        F: FnMut(&mut Self, usize),
    {
        if !self.try_array(on_item) {
            self.skip_value();
        }
    }

    /// Attempts to extract an object from the current position.
    ///
    /// Invokes `on_field` with the decoder and each field name in
    /// encounter order. A field the callback does not consume is skipped
    /// whole, which gives "unexpected field" and "asked for the wrong
    /// type" the same behavior: skip and move on.
    ///
    /// # Example
    /// ```
    /// use pulljson::SliceDecoder;
    ///
    /// let mut json = SliceDecoder::new(br#"{ "x": 1, "y": "hello" }"#);
    /// let mut x = 0.0;
    /// let mut y = String::new();
    /// let was_object = json.try_object(|json, name| match name {
    ///     "x" => x = json.get_number(0.0),
    ///     "y" => y = json.get_string("", usize::MAX),
    ///     _ => {}
    /// });
    /// assert!(was_object && json.success());
    /// assert_eq!((x, y.as_str()), (1.0, "hello"));
    /// ```
    pub fn try_object<F>(&mut self, mut on_field: F) -> bool
    where
        F: FnMut(&mut Self, &str),
    {
        if !self.eat(b'{') {
            return false;
        }
        if self.eat(b'}') {
            return true;
        }
        loop {
            let name = match self.read_field_name() {
                Some(name) => name,
                None => return true, // error latched
            };
            let before = self.position();
            on_field(self, &name);
            if self.position() == before {
                self.skip_value();
            }
            if self.eat(b',') {
                continue;
            }
            if !self.eat(b'}') {
                self.set_error("expected ',' or '}'");
            }
            return true;
        }
    }

    /// Extracts an object, skipping whatever value is actually present
    /// when the current position does not hold one.
    pub fn get_object<F>(&mut self, on_field: F)
    where
        F: FnMut(&mut Self, &str),
    {
        if !self.try_object(on_field) {
            self.skip_value();
        }
    }

    fn read_field_name(&mut self) -> Option<String> {
        let name = match self.try_string(usize::MAX) {
            Some(name) => name,
            None => {
                self.set_error("expected field name");
                return None;
            }
        };
        if !self.eat(b':') {
            self.set_error("expected ':'");
            return None;
        }
        Some(name)
    }
}
