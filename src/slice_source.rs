// SPDX-License-Identifier: Apache-2.0

use crate::source::Source;

/// Buffer backend: a fixed in-memory byte span with random access.
///
/// The only backend that supports [`Source::rewind`], which is what gives
/// it clean no-partial-consumption probing for multi-byte literals and for
/// numbers followed by trailing garbage.
#[derive(Debug)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Creates a new SliceSource over the given data.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Source for SliceSource<'_> {
    fn peek(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    fn advance(&mut self) {
        if self.pos < self.data.len() {
            self.pos += 1;
        }
    }

    fn position(&self) -> usize {
        self.pos
    }

    fn rewind(&mut self, n: usize) -> bool {
        match self.pos.checked_sub(n) {
            Some(pos) => {
                self.pos = pos;
                true
            }
            None => false,
        }
    }
}
