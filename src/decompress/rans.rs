//! Carryless binary rANS decoder.
//!
//! The code register is refilled a whole byte at a time and kept at or above
//! [`RANS_LOW`] before every decision. Probabilities are 8-bit thresholds
//! against the register's low byte.
//!
//! The bitstream variant refills one bit at a time and keeps the register at
//! or above [`RANS_LOW_BITSTREAM`] instead, so it never needs more than 16
//! bits.

use super::config::Config;
use super::{DecodeError, Result};

/// Lower bound of the normalized register.
pub const RANS_LOW: u32 = 1 << 12;

/// Lower bound of the normalized register in bitstream mode.
pub const RANS_LOW_BITSTREAM: u32 = 1 << 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Refill {
    Bytes,
    LsbFirst,
    MsbFirst,
}

/// Register state over a borrowed input slice.
#[derive(Clone)]
pub struct RansDecoder<'a> {
    data: &'a [u8],
    pos: usize,
    state: u32,
    refill: Refill,
    /// Unread bits of the current byte (bitstream mode).
    byte: u8,
    bits_left: u32,
    invert: bool,
    simplified: bool,
}

impl<'a> RansDecoder<'a> {
    /// Create a decoder and prime the register from the start of `data`.
    pub fn new(data: &'a [u8]) -> Result<Self> {
        Self::with_config(data, &Config::default())
    }

    /// Create a decoder for the variant described by `config`.
    pub fn with_config(data: &'a [u8], config: &Config) -> Result<Self> {
        let refill = match (config.use_bitstream, config.bitstream_is_big_endian) {
            (false, _) => Refill::Bytes,
            (true, false) => Refill::LsbFirst,
            (true, true) => Refill::MsbFirst,
        };
        let mut decoder = Self {
            data,
            pos: 0,
            state: 0,
            refill,
            byte: 0,
            bits_left: 0,
            invert: config.invert_bit_encoding,
            simplified: config.simplified_prob_update,
        };
        decoder.normalize()?;
        Ok(decoder)
    }

    fn next_byte(&mut self) -> Result<u8> {
        let byte = *self
            .data
            .get(self.pos)
            .ok_or(DecodeError::TruncatedInput { position: self.pos })?;
        self.pos += 1;
        Ok(byte)
    }

    /// Shift input into the register until it is normalized.
    #[inline]
    fn normalize(&mut self) -> Result<()> {
        if self.refill == Refill::Bytes {
            while self.state < RANS_LOW {
                self.state = (self.state << 8) | u32::from(self.next_byte()?);
            }
            return Ok(());
        }

        while self.state < RANS_LOW_BITSTREAM {
            if self.bits_left == 0 {
                self.byte = self.next_byte()?;
                self.bits_left = 8;
            }
            let bit = if self.refill == Refill::MsbFirst {
                let bit = self.byte >> 7;
                self.byte <<= 1;
                bit
            } else {
                let bit = self.byte & 1;
                self.byte >>= 1;
                bit
            };
            self.state = (self.state << 1) | u32::from(bit);
            self.bits_left -= 1;
        }
        Ok(())
    }

    /// Decode one bit against `prob` and adapt it in place.
    ///
    /// `prob` is the chance, in 256ths, that the register's low byte falls
    /// below it. That outcome decodes as a 1 unless the encoding is
    /// inverted. `prob` moves 1/16th of the way toward 256 after a hit and
    /// toward 0 after a miss, and never leaves `1..=255`.
    #[inline]
    pub fn decode_bit(&mut self, prob: &mut u8) -> Result<bool> {
        self.normalize()?;

        let p = u32::from(*prob);
        let high = self.state >> 8;
        let low = self.state & 0xFF;
        let hit = low < p;

        if hit {
            self.state = low + high * p;
        } else {
            self.state -= p * (high + 1);
        }
        *prob = adapt(p, hit, self.simplified);
        Ok(hit != self.invert)
    }

    /// Number of input bytes consumed so far.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Current register value.
    pub fn state(&self) -> u32 {
        self.state
    }

    /// Information consumed so far, in bits.
    ///
    /// Bits read minus what is still buffered in the register.
    pub fn bits_consumed(&self) -> f64 {
        let read = self.pos as f64 * 8.0 - f64::from(self.bits_left);
        read - f64::from(self.state).log2()
    }

    /// Bits spent since `earlier`, a snapshot of this decoder.
    pub fn cost_since(&self, earlier: &RansDecoder<'_>) -> f32 {
        (self.bits_consumed() - earlier.bits_consumed()) as f32
    }
}

/// Next probability after a decision. The rounded form settles in
/// `7..=249`, the simplified form in `15..=241`.
#[inline]
fn adapt(p: u32, hit: bool, simplified: bool) -> u8 {
    let next = match (hit, simplified) {
        (true, false) => p + ((264 - p) >> 4),
        (false, false) => p - ((p + 8) >> 4),
        (true, true) => p + ((256 - p) >> 4),
        (false, true) => p - (p >> 4),
    };
    next as u8
}
