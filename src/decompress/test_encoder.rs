//! Reference ukpr encoder for building test vectors.
//!
//! Shared by the unit tests, the integration tests and the benchmarks. The
//! encoder mirrors the decoder's probability model exactly: it records every
//! (outcome, probability) decision in stream order and then writes them
//! through a rANS coder in reverse.
//!
//! The including module must have `Config` in scope.

#![allow(dead_code)]

use super::Config;

pub const IS_MATCH: usize = 0;
pub const NEW_OFFSET: usize = 256;
pub const OFFSET_BASE: usize = 257;
pub const LENGTH_BASE: usize = 321;
pub const NUM_CONTEXTS: usize = 385;

const RANS_LOW: u32 = 1 << 12;
const RANS_LOW_BITSTREAM: u32 = 1 << 15;

/// A symbol of the ukpr grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Literal(u8),
    Match { offset: usize, length: usize },
}

/// Bit-level ukpr encoder.
pub struct Encoder {
    config: Config,
    probs: Vec<u8>,
    /// (low byte fell below the threshold, threshold) per decision.
    steps: Vec<(bool, u8)>,
    prev_was_match: bool,
    last_offset: usize,
    pos: usize,
}

impl Encoder {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        let contexts = NUM_CONTEXTS + 256 * (config.parity() - 1);
        Self {
            config,
            probs: vec![128; contexts],
            steps: Vec::new(),
            prev_was_match: false,
            last_offset: 0,
            pos: 0,
        }
    }

    fn literal_base(&self) -> usize {
        self.pos % self.config.parity() * 256
    }

    pub fn new_offset_context(&self) -> usize {
        NEW_OFFSET + 256 * (self.config.parity() - 1)
    }

    pub fn offset_base(&self) -> usize {
        self.new_offset_context() + 1
    }

    pub fn length_base(&self) -> usize {
        self.offset_base() + 64
    }

    /// Encode a raw decision at `context`.
    pub fn bit(&mut self, context: usize, bit: bool) {
        let hit = bit != self.config.invert_bit_encoding;
        let prob = &mut self.probs[context];
        self.steps.push((hit, *prob));
        let p = u32::from(*prob);
        let next = match (hit, self.config.simplified_prob_update) {
            (true, false) => p + ((264 - p) >> 4),
            (false, false) => p - ((p + 8) >> 4),
            (true, true) => p + ((256 - p) >> 4),
            (false, true) => p - (p >> 4),
        };
        *prob = next as u8;
    }

    /// Encode `value >= 1` as an interlaced Elias-gamma integer.
    pub fn uint(&mut self, base: usize, value: usize) {
        assert!(value >= 1);
        let more = self.config.continue_value_bit;
        let mut context = base;
        let mut value = value;
        while value >= 2 {
            self.bit(context, more);
            self.bit(context + 1, value & 1 != 0);
            context += 2;
            value >>= 1;
        }
        self.bit(context, !more);
    }

    pub fn literal(&mut self, byte: u8) {
        let base = self.literal_base();
        self.bit(base, !self.config.is_match_bit);
        let mut node = 1;
        for i in (0..8).rev() {
            let bit = (byte >> i) & 1 != 0;
            self.bit(base + node, bit);
            node = (node << 1) | usize::from(bit);
        }
        self.prev_was_match = false;
        self.pos += 1;
    }

    /// Encode a match, reusing the last offset when the grammar allows it.
    pub fn copy(&mut self, offset: usize, length: usize) {
        assert!(offset >= 1 && length >= self.config.min_match_length());
        let base = self.literal_base();
        self.bit(base, self.config.is_match_bit);
        let mut new_offset = true;
        if !self.prev_was_match && !self.config.no_repeated_offsets {
            new_offset = offset != self.last_offset;
            let selector = self.new_offset_context();
            self.bit(selector, new_offset == self.config.new_offset_bit);
        }
        if new_offset {
            let value = if self.config.eof_in_length {
                offset
            } else {
                offset + 1
            };
            let offset_base = self.offset_base();
            self.uint(offset_base, value);
            self.last_offset = offset;
        }
        let length_base = self.length_base();
        self.uint(length_base, length);
        self.prev_was_match = true;
        self.pos += length;
    }

    pub fn op(&mut self, op: Op) {
        match op {
            Op::Literal(byte) => self.literal(byte),
            Op::Match { offset, length } => self.copy(offset, length),
        }
    }

    /// Encode the end-of-stream marker.
    pub fn end(&mut self) {
        let eof_in_length = self.config.eof_in_length;
        let base = self.literal_base();
        self.bit(base, self.config.is_match_bit);
        let reads_selector = !self.prev_was_match && !self.config.no_repeated_offsets;
        if reads_selector {
            // With the marker in the length, take the repeat branch
            let selector = self.new_offset_context();
            self.bit(selector, self.config.new_offset_bit != eof_in_length);
        }
        if !eof_in_length || !reads_selector {
            let offset_base = self.offset_base();
            self.uint(offset_base, 1);
        }
        if eof_in_length {
            let length_base = self.length_base();
            self.uint(length_base, 1);
        }
    }

    pub fn prob(&self, context: usize) -> u8 {
        self.probs[context]
    }

    pub fn prev_was_match(&self) -> bool {
        self.prev_was_match
    }

    /// Write all recorded decisions as a rANS stream.
    pub fn finish(self) -> Vec<u8> {
        if self.config.use_bitstream {
            return finish_bits(&self.steps, self.config.bitstream_is_big_endian);
        }

        let mut out = Vec::new();
        let mut state = RANS_LOW;

        for &(hit, prob) in self.steps.iter().rev() {
            let (start, size) = interval(hit, prob);
            let max_state = RANS_LOW * size;
            while state >= max_state {
                out.push(state as u8);
                state >>= 8;
            }
            state = ((state / size) << 8) + state % size + start;
        }

        while state > 0 {
            out.push(state as u8);
            state >>= 8;
        }

        out.reverse();
        out
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new()
    }
}

fn interval(hit: bool, prob: u8) -> (u32, u32) {
    let prob = u32::from(prob);
    if hit {
        (0, prob)
    } else {
        (prob, 256 - prob)
    }
}

/// Bitstream variant: one bit is flushed at a time and the register stays
/// below 2^16.
fn finish_bits(steps: &[(bool, u8)], big_endian: bool) -> Vec<u8> {
    let mut bits = Vec::new();
    let mut state = RANS_LOW_BITSTREAM;

    for &(hit, prob) in steps.iter().rev() {
        let (start, size) = interval(hit, prob);
        let max_state = (RANS_LOW_BITSTREAM >> 7) * size;
        while state >= max_state {
            bits.push(state & 1 != 0);
            state >>= 1;
        }
        state = ((state / size) << 8) + state % size + start;
    }

    while state > 0 {
        bits.push(state & 1 != 0);
        state >>= 1;
    }

    // Reading order is the reverse of flushing order
    bits.reverse();
    bits.chunks(8)
        .map(|chunk| {
            chunk.iter().enumerate().fold(0u8, |byte, (i, &bit)| {
                let shift = if big_endian { 7 - i } else { i };
                byte | (u8::from(bit) << shift)
            })
        })
        .collect()
}

/// Encode `ops` followed by the end-of-stream marker.
pub fn encode_ops(ops: &[Op]) -> Vec<u8> {
    encode_ops_with(ops, &Config::default())
}

/// [`encode_ops`] for the variant `config`.
pub fn encode_ops_with(ops: &[Op], config: &Config) -> Vec<u8> {
    let mut encoder = Encoder::with_config(config.clone());
    for &op in ops {
        encoder.op(op);
    }
    encoder.end();
    encoder.finish()
}

/// Expand `ops` the slow, obvious way.
pub fn expand_ops(ops: &[Op]) -> Vec<u8> {
    let mut out = Vec::new();
    for &op in ops {
        match op {
            Op::Literal(byte) => out.push(byte),
            Op::Match { offset, length } => {
                for _ in 0..length {
                    out.push(out[out.len() - offset]);
                }
            }
        }
    }
    out
}

fn match_len(data: &[u8], pos: usize, offset: usize, max: usize) -> usize {
    let mut len = 0;
    while len < max && pos + len < data.len() && data[pos + len] == data[pos + len - offset] {
        len += 1;
    }
    len
}

/// Greedy LZ parse of `data`. Matches are at least 2 bytes long.
pub fn greedy_ops(data: &[u8]) -> Vec<Op> {
    const WINDOW: usize = 1024;
    const MAX_LEN: usize = 1 << 16;

    let mut ops = Vec::new();
    let mut pos = 0;
    let mut last_offset = 0;
    let mut prev_was_match = false;

    while pos < data.len() {
        let mut best = (0, 0);
        if !prev_was_match && last_offset > 0 && last_offset <= pos {
            best = (match_len(data, pos, last_offset, MAX_LEN), last_offset);
        }
        for offset in 1..=pos.min(WINDOW) {
            let len = match_len(data, pos, offset, MAX_LEN);
            // A fresh offset costs more than a repeated one
            if len > best.0 + 1 {
                best = (len, offset);
            }
        }

        if best.0 >= 2 {
            ops.push(Op::Match {
                offset: best.1,
                length: best.0,
            });
            pos += best.0;
            last_offset = best.1;
            prev_was_match = true;
        } else {
            ops.push(Op::Literal(data[pos]));
            pos += 1;
            prev_was_match = false;
        }
    }
    ops
}

/// Compress `data` with a greedy parse.
pub fn pack(data: &[u8]) -> Vec<u8> {
    encode_ops(&greedy_ops(data))
}

/// [`pack`] for the variant `config`.
pub fn pack_with(data: &[u8], config: &Config) -> Vec<u8> {
    encode_ops_with(&greedy_ops(data), config)
}

/// Every combination of the variant switches, with 1, 2 and 4 parity sets.
pub fn all_configs() -> Vec<Config> {
    let mut configs = Vec::new();
    for flags in 0u32..1 << 10 {
        let on = |bit: u32| flags & (1 << bit) != 0;
        // Byte order only matters for the bitstream
        if on(1) && !on(0) {
            continue;
        }
        for parity_contexts in [1, 2, 4] {
            configs.push(Config {
                use_bitstream: on(0),
                bitstream_is_big_endian: on(1),
                parity_contexts,
                invert_bit_encoding: on(2),
                simplified_prob_update: on(3),
                is_match_bit: on(4),
                new_offset_bit: on(5),
                continue_value_bit: on(6),
                no_repeated_offsets: on(7),
                eof_in_length: on(8),
            });
        }
    }
    configs
}

/// Deterministic text-like sample data.
pub fn sample_text(len: usize) -> Vec<u8> {
    const WORDS: &[&str] = &[
        "lorem", "ipsum", "dolor", "sit", "amet", "consectetur", "adipiscing", "elit", "sed",
        "do", "eiusmod", "tempor", "incididunt", "ut", "labore", "et", "dolore", "magna",
    ];
    let mut out = Vec::with_capacity(len);
    let mut x: u32 = 0x1234_5678;
    while out.len() < len {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        out.extend_from_slice(WORDS[x as usize % WORDS.len()].as_bytes());
        out.push(if x % 11 == 0 { b'\n' } else { b' ' });
    }
    out.truncate(len);
    out
}
