//! Adaptive probability table.
//!
//! The table is statically partitioned by role:
//!
//! | Index | Role |
//! |-------|------|
//! | 0 | literal/match selector |
//! | 1-255 | literal tree nodes |
//! | 256 | new/repeat offset selector |
//! | 257-320 | offset integer (continue, value) pairs |
//! | 321-384 | length integer (continue, value) pairs |
//!
//! This is the layout of the reference unpackers, so streams from existing
//! encoders decode bit-exactly. With `n` parity context sets the first block
//! of 256 (selector plus literal tree) is repeated `n` times and everything
//! after it shifts up by `256 * (n - 1)`.

use super::rans::RansDecoder;
use super::Result;

/// Context of the literal/match selector bit.
pub const IS_MATCH: usize = 0;
/// Root of the 255-node literal tree.
pub const LITERAL_ROOT: usize = 1;
/// Context of the new/repeat offset selector bit.
pub const NEW_OFFSET: usize = 256;
/// First context of the offset integer.
pub const OFFSET_BASE: usize = 257;
/// First context of the length integer.
pub const LENGTH_BASE: usize = OFFSET_BASE + INTEGER_CONTEXTS;
/// Slots reserved per integer: one (continue, value) pair per bit position.
pub const INTEGER_CONTEXTS: usize = 64;
/// Total number of contexts.
pub const NUM_CONTEXTS: usize = 1 + 255 + 1 + 2 * INTEGER_CONTEXTS;

/// Starting probability of every context (even odds).
pub const INITIAL_PROB: u8 = 128;

/// Per-call table of adaptive bit probabilities.
#[derive(Clone)]
pub struct ProbabilityModel {
    probs: Vec<u8>,
    parity: usize,
}

impl ProbabilityModel {
    /// Create a model with every context at even odds.
    pub fn new() -> Self {
        Self::with_parity(1)
    }

    /// Create a model with `parity` literal context sets (at least one).
    pub fn with_parity(parity: usize) -> Self {
        let parity = parity.max(1);
        Self {
            probs: vec![INITIAL_PROB; NUM_CONTEXTS + 256 * (parity - 1)],
            parity,
        }
    }

    /// Selector context for output `position`; the literal tree follows it.
    pub fn literal_base(&self, position: usize) -> usize {
        position % self.parity * 256
    }

    /// Context of the new/repeat offset selector.
    pub fn new_offset(&self) -> usize {
        NEW_OFFSET + 256 * (self.parity - 1)
    }

    /// First context of the offset integer.
    pub fn offset_base(&self) -> usize {
        self.new_offset() + 1
    }

    /// First context of the length integer.
    pub fn length_base(&self) -> usize {
        self.offset_base() + INTEGER_CONTEXTS
    }

    /// Number of contexts in the table.
    pub fn len(&self) -> usize {
        self.probs.len()
    }

    /// Always false; every layout has contexts.
    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    /// Decode one bit at `context` and adapt that context.
    #[inline]
    pub fn decode_bit(&mut self, rans: &mut RansDecoder<'_>, context: usize) -> Result<bool> {
        rans.decode_bit(&mut self.probs[context])
    }

    /// Current probability stored at `context`.
    pub fn prob(&self, context: usize) -> u8 {
        self.probs[context]
    }
}

impl Default for ProbabilityModel {
    fn default() -> Self {
        Self::new()
    }
}
