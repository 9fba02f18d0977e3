// SPDX-License-Identifier: Apache-2.0

//! A pull-style JSON decoder.
//!
//! The consumer drives extraction: it asks for the values it expects
//! (`try_number`, `get_string`, `try_array`, ...) and the decoder either
//! supplies the value and advances, or reports absence and lets the caller
//! pick a default. Anything the consumer does not claim is skipped in one
//! bounded pass, regardless of nesting depth. The first error of a session
//! is latched and starves every subsequent read, so deeply nested
//! traversals unwind without explicit error plumbing; callers check
//! [`Decoder::success`] at the end.
//!
//! Two interchangeable input backends share the decoding logic: an
//! in-memory byte span ([`SliceDecoder`]) and a sequential byte stream
//! with single-byte lookahead ([`StreamDecoder`]).

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod decoder;
mod error;
mod escape;
mod number;
mod skip;
mod slice_source;
mod source;
mod stream_source;
mod string;
mod writer;

pub use decoder::{Decoder, SliceDecoder, StreamDecoder};
pub use error::DecodeError;
pub use slice_source::SliceSource;
pub use source::Source;
#[cfg(feature = "std")]
pub use stream_source::IoReader;
pub use stream_source::{ChunkReader, Reader, StreamSource};
pub use string::StringSink;
pub use writer::{Fields, Writer};
