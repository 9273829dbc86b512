//! Destinations for decoded symbols.
//!
//! The control loop only knows about [`Sink`]. Writing into a caller buffer,
//! growing a vector, building a heatmap and dry-running for the in-place
//! margin are all sinks.

use super::window::{copy_bytewise, copy_chunked, CopyStrategy, OutputWindow};
use super::{DecodeError, Result};

/// Receiver of literals and matches produced by the decoder.
///
/// Offsets passed to [`Sink::copy_match`] have already been checked against
/// [`Sink::position`].
pub trait Sink {
    /// Whether the decoder should measure the bit cost of each symbol.
    const TRACKS_COST: bool = false;

    /// Number of output bytes produced so far.
    fn position(&self) -> usize;

    /// Append one literal byte.
    fn push_literal(&mut self, byte: u8, cost: f32) -> Result<()>;

    /// Append `length` bytes copied from `offset` bytes back.
    fn copy_match(&mut self, offset: usize, length: usize, cost: f32) -> Result<()>;
}

impl Sink for OutputWindow<'_> {
    fn position(&self) -> usize {
        OutputWindow::position(self)
    }

    #[inline]
    fn push_literal(&mut self, byte: u8, _cost: f32) -> Result<()> {
        self.write_literal(byte)
    }

    #[inline]
    fn copy_match(&mut self, offset: usize, length: usize, _cost: f32) -> Result<()> {
        OutputWindow::copy_match(self, offset, length)
    }
}

/// Growable output with an upper size limit.
pub struct VecSink {
    data: Vec<u8>,
    limit: usize,
    strategy: CopyStrategy,
}

impl VecSink {
    /// Create an empty sink that refuses to grow past `limit` bytes.
    pub fn new(limit: usize, strategy: CopyStrategy) -> Self {
        Self {
            data: Vec::new(),
            limit,
            strategy,
        }
    }

    /// The decoded bytes.
    pub fn into_inner(self) -> Vec<u8> {
        self.data
    }

    fn reserve_to(&mut self, needed: usize) -> Result<()> {
        if needed > self.limit {
            return Err(DecodeError::OutputOverflow {
                needed,
                capacity: self.limit,
            });
        }
        Ok(())
    }
}

impl Sink for VecSink {
    fn position(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn push_literal(&mut self, byte: u8, _cost: f32) -> Result<()> {
        self.reserve_to(self.data.len() + 1)?;
        self.data.push(byte);
        Ok(())
    }

    #[inline]
    fn copy_match(&mut self, offset: usize, length: usize, _cost: f32) -> Result<()> {
        let pos = self.data.len();
        self.reserve_to(pos + length)?;
        self.data.resize(pos + length, 0);
        match self.strategy {
            CopyStrategy::Chunked => copy_chunked(&mut self.data, pos, offset, length),
            CopyStrategy::Bytewise => copy_bytewise(&mut self.data, pos, offset, length),
        }
        Ok(())
    }
}

/// Counts output bytes without storing them.
#[derive(Default)]
pub struct NullSink {
    pos: usize,
}

impl Sink for NullSink {
    fn position(&self) -> usize {
        self.pos
    }

    fn push_literal(&mut self, _byte: u8, _cost: f32) -> Result<()> {
        self.pos += 1;
        Ok(())
    }

    fn copy_match(&mut self, _offset: usize, length: usize, _cost: f32) -> Result<()> {
        self.pos += length;
        Ok(())
    }
}
