//! Symbol decoders built on the bit predictor.

use super::config::Config;
use super::model::{ProbabilityModel, LITERAL_ROOT};
use super::rans::RansDecoder;
use super::{DecodeError, Result};

/// Largest number of extra value bits an integer may carry.
const MAX_VALUE_BITS: u32 = 32;

/// Register plus probability table for one decode call.
#[derive(Clone)]
pub struct DecoderState<'a> {
    pub rans: RansDecoder<'a>,
    pub model: ProbabilityModel,
    /// Integer bit value that means another value bit follows.
    continue_bit: bool,
}

impl<'a> DecoderState<'a> {
    /// Prime the register from `input` and reset every probability.
    pub fn new(input: &'a [u8]) -> Result<Self> {
        Self::with_config(input, &Config::default())
    }

    /// [`DecoderState::new`] for the variant described by `config`.
    pub fn with_config(input: &'a [u8], config: &Config) -> Result<Self> {
        Ok(Self {
            rans: RansDecoder::with_config(input, config)?,
            model: ProbabilityModel::with_parity(config.parity()),
            continue_bit: config.continue_value_bit,
        })
    }

    #[inline]
    pub fn decode_bit(&mut self, context: usize) -> Result<bool> {
        self.model.decode_bit(&mut self.rans, context)
    }

    /// Decode an interlaced Elias-gamma integer starting at `base`.
    ///
    /// Each bit position owns a (continue, value) context pair. Value bits
    /// arrive least significant first and the implicit top bit is placed
    /// above them, so the result is always at least 1.
    #[inline]
    pub fn decode_uint(&mut self, base: usize) -> Result<usize> {
        let mut context = base;
        let mut value = 0usize;
        let mut bit_pos = 0u32;

        while self.decode_bit(context)? == self.continue_bit {
            if bit_pos + 1 >= MAX_VALUE_BITS {
                return Err(DecodeError::ValueOverflow);
            }
            value |= usize::from(self.decode_bit(context + 1)?) << bit_pos;
            bit_pos += 1;
            context += 2;
        }

        Ok(value | (1 << bit_pos))
    }

    /// Decode one byte by walking the literal tree rooted just after `base`.
    ///
    /// The node index is the bits decoded so far behind a leading 1, which
    /// falls off the top after the eighth decision.
    #[inline]
    pub fn decode_literal(&mut self, base: usize) -> Result<u8> {
        let mut node = LITERAL_ROOT;
        while node < 256 {
            let bit = self.decode_bit(base + node)?;
            node = (node << 1) | usize::from(bit);
        }
        Ok(node as u8)
    }
}
