//! Byte cursor over an in-memory module image.
//!
//! The walker consumes the image one byte at a time through this cursor
//! instead of repeatedly re-slicing the buffer, which keeps the
//! "remaining bytes" diagnostic an O(1) computation.

/// Forward-only read position over an immutable byte buffer.
///
/// The position never decreases. Once it reaches the end of the buffer,
/// every further [`Cursor::next`] returns `None`; exhaustion is the
/// normal terminal state of a walk, not an error.
#[derive(Debug)]
pub struct Cursor<'a> {
    bytes: &'a [u8],
    position: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, position: 0 }
    }

    /// Returns the byte at the current position and advances by one.
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Option<u8> {
        let byte = *self.bytes.get(self.position)?;
        self.position += 1;
        Some(byte)
    }

    /// Bytes consumed so far.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Bytes left to consume.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.position
    }

    /// The unconsumed tail of the buffer.
    pub fn rest(&self) -> &'a [u8] {
        &self.bytes[self.position..]
    }
}
