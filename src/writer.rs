// SPDX-License-Identifier: Apache-2.0

//! A push-style JSON serializer mirroring the decoder's shape: values are
//! emitted in the order the caller supplies them, arrays and objects take
//! callbacks, and the first formatting failure latches so a whole document
//! can be written before checking the outcome once at [`Writer::finish`].

use core::fmt;

/// JSON serializer over any [`core::fmt::Write`] sink.
pub struct Writer<W: fmt::Write> {
    out: W,
    failed: bool,
}

impl<W: fmt::Write> Writer<W> {
    pub fn new(out: W) -> Self {
        Self { out, failed: false }
    }

    /// Emits a number. Non-finite values have no JSON form and are
    /// emitted as `null`.
    pub fn number(&mut self, value: f64) {
        if value.is_finite() {
            self.emit(format_args!("{}", value));
        } else {
            self.raw("null");
        }
    }

    pub fn boolean(&mut self, value: bool) {
        self.raw(if value { "true" } else { "false" });
    }

    pub fn null(&mut self) {
        self.raw("null");
    }

    /// Emits a quoted string, escaping quotes, backslashes and control
    /// characters.
    pub fn string(&mut self, value: &str) {
        self.raw_char('"');
        for ch in value.chars() {
            self.escaped_char(ch);
        }
        self.raw_char('"');
    }

    /// Emits an array of `len` items; `on_item` is invoked once per index
    /// and must emit exactly one value.
    pub fn write_array<F>(&mut self, len: usize, mut on_item: F)
    where
        F: FnMut(&mut Self, usize),
    {
        self.raw_char('[');
        for index in 0..len {
            if index > 0 {
                self.raw_char(',');
            }
            on_item(self, index);
        }
        self.raw_char(']');
    }

    /// Emits an object; `on_fields` names and emits each member through
    /// the [`Fields`] builder.
    pub fn write_object<F>(&mut self, on_fields: F)
    where
        F: FnOnce(&mut Fields<'_, W>),
    {
        self.raw_char('{');
        let mut fields = Fields {
            writer: self,
            first: true,
        };
        on_fields(&mut fields);
        self.raw_char('}');
    }

    /// Consumes the writer, returning the sink or the first formatting
    /// error encountered.
    pub fn finish(self) -> Result<W, fmt::Error> {
        if self.failed {
            Err(fmt::Error)
        } else {
            Ok(self.out)
        }
    }

    fn escaped_char(&mut self, ch: char) {
        match ch {
            '"' => self.raw("\\\""),
            '\\' => self.raw("\\\\"),
            '\r' => self.raw("\\r"),
            '\n' => self.raw("\\n"),
            '\t' => self.raw("\\t"),
            '\u{8}' => self.raw("\\b"),
            '\u{c}' => self.raw("\\f"),
            ch if ch < '\u{20}' => self.emit(format_args!("\\u{:04x}", ch as u32)),
            ch => self.raw_char(ch),
        }
    }

    fn emit(&mut self, args: fmt::Arguments<'_>) {
        if !self.failed && self.out.write_fmt(args).is_err() {
            self.failed = true;
        }
    }

    fn raw(&mut self, text: &str) {
        if !self.failed && self.out.write_str(text).is_err() {
            self.failed = true;
        }
    }

    fn raw_char(&mut self, ch: char) {
        if !self.failed && self.out.write_char(ch).is_err() {
            self.failed = true;
        }
    }
}

/// Member builder handed to [`Writer::write_object`] callbacks. Methods
/// chain; each emits one `"name": value` member with comma placement
/// handled here.
pub struct Fields<'w, W: fmt::Write> {
    writer: &'w mut Writer<W>,
    first: bool,
}

impl<'w, W: fmt::Write> Fields<'w, W> {
    pub fn number(&mut self, name: &str, value: f64) -> &mut Self {
        self.name(name);
        self.writer.number(value);
        self
    }

    /// Emits the member only when a value is present; `None` omits it
    /// entirely rather than writing `null`.
    pub fn number_opt(&mut self, name: &str, value: Option<f64>) -> &mut Self {
        if let Some(value) = value {
            self.number(name, value);
        }
        self
    }

    pub fn boolean(&mut self, name: &str, value: bool) -> &mut Self {
        self.name(name);
        self.writer.boolean(value);
        self
    }

    pub fn null(&mut self, name: &str) -> &mut Self {
        self.name(name);
        self.writer.null();
        self
    }

    pub fn string(&mut self, name: &str, value: &str) -> &mut Self {
        self.name(name);
        self.writer.string(value);
        self
    }

    /// Emits the member only when a value is present.
    pub fn string_opt(&mut self, name: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.string(name, value);
        }
        self
    }

    pub fn array<F>(&mut self, name: &str, len: usize, on_item: F) -> &mut Self
    where
        F: FnMut(&mut Writer<W>, usize),
    {
        self.name(name);
        self.writer.write_array(len, on_item);
        self
    }

    pub fn object<F>(&mut self, name: &str, on_fields: F) -> &mut Self
    where
        F: FnOnce(&mut Fields<'_, W>),
    {
        self.name(name);
        self.writer.write_object(on_fields);
        self
    }

    fn name(&mut self, name: &str) {
        if self.first {
            self.first = false;
        } else {
            self.writer.raw_char(',');
        }
        self.writer.string(name);
        self.writer.raw_char(':');
    }
}
