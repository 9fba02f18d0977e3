// SPDX-License-Identifier: Apache-2.0

use crate::source::Source;

/// Trait for input sources that can feed the stream backend.
pub trait Reader {
    /// The error type returned by read operations
    type Error;

    /// Read data into the provided buffer.
    /// Returns the number of bytes read, or an error.
    ///
    /// # Contract
    /// - A return value of 0 **MUST** indicate true end of stream
    /// - Implementations **MUST NOT** return 0 unless no more data will ever be available
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}

/// Stream backend: sequential input with a single byte of lookahead.
///
/// The lookahead byte is filled eagerly on construction and after every
/// `advance`, so `peek` never touches the reader. There is no backward
/// seeking; probes that would need to restore the cursor latch an error
/// instead (see [`Source::rewind`]). A read error parks the source in a
/// failed state that the decoder converts into a latched error.
pub struct StreamSource<R: Reader> {
    reader: R,
    cur: Option<u8>,
    read_count: usize,
    failed: bool,
}

impl<R: Reader> StreamSource<R> {
    /// Creates a new StreamSource, pulling the first lookahead byte.
    pub fn new(reader: R) -> Self {
        let mut source = Self {
            reader,
            cur: None,
            read_count: 0,
            failed: false,
        };
        source.fill();
        source
    }

    fn fill(&mut self) {
        let mut byte = [0u8; 1];
        self.cur = match self.reader.read(&mut byte) {
            Ok(0) => None,
            Ok(_) => {
                self.read_count += 1;
                Some(byte[0])
            }
            Err(_) => {
                self.failed = true;
                None
            }
        };
    }
}

impl<R: Reader> Source for StreamSource<R> {
    fn peek(&self) -> Option<u8> {
        self.cur
    }

    fn advance(&mut self) {
        if self.cur.is_some() {
            self.fill();
        }
    }

    fn position(&self) -> usize {
        self.read_count - usize::from(self.cur.is_some())
    }

    fn failed(&self) -> bool {
        self.failed
    }
}

/// A [`Reader`] over an in-memory slice that yields at most `chunk_size`
/// bytes per call. Useful in tests and demos to exercise the stream
/// backend's lookahead behavior with arbitrarily stingy reads.
pub struct ChunkReader<'a> {
    data: &'a [u8],
    pos: usize,
    chunk_size: usize,
}

impl<'a> ChunkReader<'a> {
    pub fn new(data: &'a [u8], chunk_size: usize) -> Self {
        Self {
            data,
            pos: 0,
            chunk_size: chunk_size.max(1),
        }
    }
}

impl Reader for ChunkReader<'_> {
    type Error = core::convert::Infallible;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let remaining = &self.data[self.pos..];
        let len = remaining.len().min(buf.len()).min(self.chunk_size);
        buf[..len].copy_from_slice(&remaining[..len]);
        self.pos += len;
        Ok(len)
    }
}

/// Adapter that lets any `std::io::Read` feed a [`StreamSource`].
#[cfg(feature = "std")]
pub struct IoReader<R>(pub R);

#[cfg(feature = "std")]
impl<R: std::io::Read> Reader for IoReader<R> {
    type Error = std::io::Error;

    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        loop {
            match self.0.read(buf) {
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookahead_and_position() {
        let mut source = StreamSource::new(ChunkReader::new(b"ab", 1));

        assert_eq!(source.position(), 0);
        assert_eq!(source.peek(), Some(b'a'));
        // peek is stable until advance
        assert_eq!(source.peek(), Some(b'a'));

        source.advance();
        assert_eq!(source.position(), 1);
        assert_eq!(source.peek(), Some(b'b'));

        source.advance();
        assert_eq!(source.peek(), None);
        assert_eq!(source.position(), 2);
        source.advance();
        assert_eq!(source.peek(), None);
    }

    #[test]
    fn rewind_unsupported() {
        let mut source = StreamSource::new(ChunkReader::new(b"abc", 1));
        source.advance();
        assert!(!source.rewind(1));
    }

    #[test]
    fn read_error_sets_failed() {
        struct Broken;
        impl Reader for Broken {
            type Error = &'static str;
            fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
                Err("boom")
            }
        }

        let source = StreamSource::new(Broken);
        assert_eq!(source.peek(), None);
        assert!(source.failed());
    }

    #[test]
    fn chunk_reader_respects_chunk_size() {
        let mut reader = ChunkReader::new(b"abcdef", 4);
        let mut buf = [0u8; 16];
        assert_eq!(reader.read(&mut buf), Ok(4));
        assert_eq!(&buf[..4], b"abcd");
        assert_eq!(reader.read(&mut buf), Ok(2));
        assert_eq!(&buf[..2], b"ef");
        assert_eq!(reader.read(&mut buf), Ok(0));
    }
}
