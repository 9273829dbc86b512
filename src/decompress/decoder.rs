//! Symbol grammar and control loop.
//!
//! ```text
//! loop:
//!     if bit(IS_MATCH):
//!         if prev_was_match || bit(NEW_OFFSET):
//!             offset = uint(OFFSET_BASE) - 1
//!             if offset == 0: end of stream
//!         length = uint(LENGTH_BASE)
//!         copy(offset, length)
//!     else:
//!         push(literal)
//! ```
//!
//! A repeat-offset match directly after a match cannot be expressed: the
//! new/repeat bit is simply not read, so the grammar itself rules it out.
//!
//! [`Config`] variants flip the polarity of the selector bits, drop the
//! new/repeat selector altogether, or move the end marker into the length
//! (`length == 1` ends the stream and offsets are stored without the `- 1`).

use super::config::Config;
use super::sink::Sink;
use super::symbols::DecoderState;
use super::{DecodeError, Result};

/// One decode pass over a compressed buffer.
pub struct UkprDecoder<'a> {
    state: DecoderState<'a>,
    config: Config,
    /// Distance of the most recent new-offset match; 0 until one is seen.
    offset: usize,
    prev_was_match: bool,
    /// Largest lead of output position over consumed input.
    margin: isize,
    finished: bool,
}

impl<'a> UkprDecoder<'a> {
    /// Start decoding `input`, priming the code register.
    pub fn new(input: &'a [u8]) -> Result<Self> {
        Self::with_config(input, &Config::default())
    }

    /// Start decoding `input` packed with the variant `config`.
    pub fn with_config(input: &'a [u8], config: &Config) -> Result<Self> {
        Ok(Self {
            state: DecoderState::with_config(input, config)?,
            config: config.clone(),
            offset: 0,
            prev_was_match: false,
            margin: 0,
            finished: false,
        })
    }

    /// Decode every symbol up to the end-of-stream marker into `sink`.
    ///
    /// Calling this again after it returned `Ok` is a no-op.
    pub fn decode_into<S: Sink>(&mut self, sink: &mut S) -> Result<()> {
        while !self.finished {
            self.step(sink)?;
        }
        Ok(())
    }

    /// Decode a single literal or match. Returns `false` on end of stream.
    pub fn step<S: Sink>(&mut self, sink: &mut S) -> Result<bool> {
        if self.finished {
            return Ok(false);
        }

        let position = sink.position();
        self.margin = self
            .margin
            .max(position as isize - self.state.rans.position() as isize);
        let before = S::TRACKS_COST.then(|| self.state.rans.clone());

        let base = self.state.model.literal_base(position);
        if self.state.decode_bit(base)? != self.config.is_match_bit {
            let byte = self.state.decode_literal(base)?;
            let cost = before.map_or(0.0, |b| self.state.rans.cost_since(&b));
            sink.push_literal(byte, cost)?;
            self.prev_was_match = false;
            return Ok(true);
        }

        let selector = self.state.model.new_offset();
        let new_offset = self.config.no_repeated_offsets
            || self.prev_was_match
            || self.state.decode_bit(selector)? == self.config.new_offset_bit;
        if new_offset {
            let offset_base = self.state.model.offset_base();
            let value = self.state.decode_uint(offset_base)?;
            if self.config.eof_in_length {
                self.offset = value;
            } else if value == 1 {
                self.finished = true;
                return Ok(false);
            } else {
                self.offset = value - 1;
            }
        }

        let length_base = self.state.model.length_base();
        let length = self.state.decode_uint(length_base)?;
        if self.config.eof_in_length && length == 1 {
            self.finished = true;
            return Ok(false);
        }
        if self.offset == 0 || self.offset > position {
            return Err(DecodeError::InvalidOffset {
                offset: self.offset,
                position,
            });
        }

        tracing::trace!(offset = self.offset, length, position, "match");
        let cost = before.map_or(0.0, |b| self.state.rans.cost_since(&b));
        sink.copy_match(self.offset, length, cost)?;
        self.prev_was_match = true;
        Ok(true)
    }

    /// Whether the end-of-stream marker has been decoded.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Input bytes consumed so far.
    pub fn consumed(&self) -> usize {
        self.state.rans.position()
    }

    /// Minimum gap between the end of compressed data and the end of the
    /// output for decoding in place, given `produced` output bytes.
    pub fn margin(&self, produced: usize) -> isize {
        self.margin + self.consumed() as isize - produced as isize
    }

    /// Probability currently stored at `context`.
    pub fn prob(&self, context: usize) -> u8 {
        self.state.model.prob(context)
    }
}
