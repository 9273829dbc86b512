//! Output window and back-reference copy engine.
//!
//! Matches copy forward from `pos - offset`. When `offset < length` the
//! source overlaps the bytes being written, which turns a short history into
//! a repeating run.

use super::{DecodeError, Result};

/// How match bytes are moved inside the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyStrategy {
    /// Move whole non-overlapping chunks with `copy_within`.
    #[default]
    Chunked,
    /// One byte at a time in increasing address order.
    Bytewise,
}

/// Copy `length` bytes from `pos - offset` to `pos`, one byte at a time.
///
/// Caller guarantees `1 <= offset <= pos` and `pos + length <= buf.len()`.
#[inline]
pub fn copy_bytewise(buf: &mut [u8], pos: usize, offset: usize, length: usize) {
    let src = pos - offset;
    for i in 0..length {
        buf[pos + i] = buf[src + i];
    }
}

/// Same result as [`copy_bytewise`], moved in chunks.
///
/// Each chunk is at most `offset` bytes long, so its source was fully
/// written before the chunk starts. Chunks double in size once the pattern
/// has been laid down.
#[inline]
pub fn copy_chunked(buf: &mut [u8], pos: usize, offset: usize, length: usize) {
    let src = pos - offset;
    if offset >= length {
        buf.copy_within(src..src + length, pos);
        return;
    }

    let mut copied = 0;
    let mut period = offset;
    while copied < length {
        let chunk = period.min(length - copied);
        buf.copy_within(src..src + chunk, pos + copied);
        copied += chunk;
        // The run from src is now periodic for (offset + copied) bytes.
        period = offset + copied;
    }
}

/// Caller-supplied destination with a write cursor.
pub struct OutputWindow<'a> {
    buf: &'a mut [u8],
    pos: usize,
    strategy: CopyStrategy,
}

impl<'a> OutputWindow<'a> {
    /// Wrap `buf`, writing from its start.
    pub fn new(buf: &'a mut [u8], strategy: CopyStrategy) -> Self {
        Self {
            buf,
            pos: 0,
            strategy,
        }
    }

    /// Bytes written so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Total capacity of the destination.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// The written prefix of the destination.
    pub fn written(&self) -> &[u8] {
        &self.buf[..self.pos]
    }

    /// Append a literal byte.
    #[inline]
    pub fn write_literal(&mut self, byte: u8) -> Result<()> {
        let capacity = self.buf.len();
        let slot = self
            .buf
            .get_mut(self.pos)
            .ok_or(DecodeError::OutputOverflow {
                needed: self.pos + 1,
                capacity,
            })?;
        *slot = byte;
        self.pos += 1;
        Ok(())
    }

    /// Append `length` bytes copied from `offset` bytes back.
    #[inline]
    pub fn copy_match(&mut self, offset: usize, length: usize) -> Result<()> {
        if offset == 0 || offset > self.pos {
            return Err(DecodeError::InvalidOffset {
                offset,
                position: self.pos,
            });
        }
        let end = self.pos + length;
        if end > self.buf.len() {
            return Err(DecodeError::OutputOverflow {
                needed: end,
                capacity: self.buf.len(),
            });
        }

        match self.strategy {
            CopyStrategy::Chunked => copy_chunked(self.buf, self.pos, offset, length),
            CopyStrategy::Bytewise => copy_bytewise(self.buf, self.pos, offset, length),
        }
        self.pos = end;
        Ok(())
    }
}
