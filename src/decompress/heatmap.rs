//! Per-byte cost map of a compressed stream.
//!
//! For every output byte the heatmap records whether it came from a literal
//! or a match, and how many (fractional) bits the encoding spent on it. A
//! match's cost is split evenly over its bytes. In [`Heatmap::cost`] the cost
//! of a literal is further shared with every later byte copied from it;
//! [`Heatmap::raw_cost`] keeps the unshared value.

use super::sink::Sink;
use super::{DecodeError, Result};

/// Literal/match origin and bit cost of each decoded byte.
#[derive(Debug, Clone, Default)]
pub struct Heatmap {
    data: Vec<u8>,
    cost: Vec<f32>,
    raw_cost: Vec<f32>,
    /// Position of the literal each byte was ultimately copied from.
    origin: Vec<usize>,
    limit: usize,
}

impl Heatmap {
    pub(crate) fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    fn check_limit(&self, needed: usize) -> Result<()> {
        if needed > self.limit {
            return Err(DecodeError::OutputOverflow {
                needed,
                capacity: self.limit,
            });
        }
        Ok(())
    }

    /// Spread literal costs over the bytes that reference them.
    pub(crate) fn finish(&mut self) {
        self.raw_cost = self.cost.clone();

        let mut refs = vec![0usize; self.origin.len()];
        for &o in &self.origin {
            refs[o] += 1;
        }

        let mut shift = vec![0f32; self.cost.len()];
        for (i, &o) in self.origin.iter().enumerate() {
            if o != i {
                let delta = (self.raw_cost[o] - self.raw_cost[i]) / refs[o] as f32;
                shift[i] += delta;
                shift[o] -= delta;
            }
        }

        for (cost, delta) in self.cost.iter_mut().zip(shift) {
            *cost += delta;
        }
    }

    /// Reverse the heatmap in place.
    ///
    /// For data that an unpacker writes back to front: index 0 becomes the
    /// last byte, and literal origins are remapped to match.
    pub fn reverse(&mut self) {
        let last = self.data.len().saturating_sub(1);
        self.data.reverse();
        self.cost.reverse();
        self.raw_cost.reverse();
        self.origin.reverse();
        for origin in &mut self.origin {
            *origin = last - *origin;
        }
    }

    /// Number of decoded bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the stream decoded to nothing.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether the byte at `index` was encoded as a literal.
    pub fn is_literal(&self, index: usize) -> bool {
        self.origin[index] == index
    }

    /// Bits spent on the byte at `index`, with literal costs shared.
    pub fn cost(&self, index: usize) -> f32 {
        self.cost[index]
    }

    /// Bits spent on the byte at `index` as encoded.
    pub fn raw_cost(&self, index: usize) -> f32 {
        self.raw_cost[index]
    }

    /// The decoded byte at `index`.
    pub fn byte(&self, index: usize) -> u8 {
        self.data[index]
    }

    /// All decoded bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    /// Sum of raw costs, in bits.
    pub fn total_cost(&self) -> f64 {
        self.raw_cost.iter().map(|&c| f64::from(c)).sum()
    }
}

impl Sink for Heatmap {
    const TRACKS_COST: bool = true;

    fn position(&self) -> usize {
        self.data.len()
    }

    fn push_literal(&mut self, byte: u8, cost: f32) -> Result<()> {
        self.check_limit(self.data.len() + 1)?;
        self.origin.push(self.data.len());
        self.data.push(byte);
        self.cost.push(cost);
        Ok(())
    }

    fn copy_match(&mut self, offset: usize, length: usize, cost: f32) -> Result<()> {
        self.check_limit(self.data.len() + length)?;
        let per_byte = cost / length as f32;
        for _ in 0..length {
            let src = self.data.len() - offset;
            self.data.push(self.data[src]);
            self.origin.push(self.origin[src]);
            self.cost.push(per_byte);
        }
        Ok(())
    }
}
