// SPDX-License-Identifier: Apache-2.0

/// Positional cursor over a byte input.
///
/// Both backends expose the same minimal surface: single-byte lookahead,
/// forward movement, and an absolute offset for diagnostics. End of input
/// is `peek() == None`; the decoder layers its error latch on top of this
/// trait so that a latched error is indistinguishable from exhausted input
/// everywhere above the choke point.
pub trait Source {
    /// The byte at the cursor, or `None` at end of input.
    fn peek(&self) -> Option<u8>;

    /// Moves the cursor one byte forward. No-op at end of input.
    fn advance(&mut self);

    /// Absolute byte offset of the cursor, for error reporting.
    fn position(&self) -> usize;

    /// Moves the cursor `n` bytes back. Returns `false` if this backend
    /// cannot seek backwards; the caller must then latch an error instead
    /// of restoring the cursor.
    fn rewind(&mut self, n: usize) -> bool {
        let _ = n;
        false
    }

    /// Whether the backend failed to produce input (stream read error).
    /// Distinct from a clean end of input.
    fn failed(&self) -> bool {
        false
    }
}
