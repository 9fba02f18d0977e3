// SPDX-License-Identifier: Apache-2.0

use alloc::borrow::Cow;

/// A latched decode error: the position it was raised at plus a message.
///
/// Only the first error of a parsing session is retained; see
/// [`crate::Decoder::set_error`]. Internal errors carry static messages,
/// application-raised ones may carry owned strings.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub(crate) position: usize,
    pub(crate) message: Cow<'static, str>,
}

impl DecodeError {
    /// Byte offset in the input where the error was raised.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Human-readable description of the error.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} at offset {}", self.message, self.position)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DecodeError {}
