//! Format variants.
//!
//! Every field defaults to the standard ukpr format. The variants let
//! hand-written unpackers on particular targets shave off a few instructions
//! or registers; a stream only decodes with the exact variant it was packed
//! with.
//!
//! | Field | Affects |
//! |-------|---------|
//! | `use_bitstream`, `bitstream_is_big_endian` | register refill |
//! | `invert_bit_encoding`, `simplified_prob_update` | bit decision and adaptation |
//! | `parity_contexts` | probability table layout |
//! | `is_match_bit`, `new_offset_bit`, `continue_value_bit` | bit polarities |
//! | `no_repeated_offsets`, `eof_in_length` | symbol grammar |

/// Bit-level variant of the ukpr format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Shift single bits into the register instead of whole bytes, which
    /// keeps the register within 16 bits.
    pub use_bitstream: bool,
    /// In bitstream mode, take bits from each byte most significant first.
    pub bitstream_is_big_endian: bool,
    /// Number of literal context sets, chosen by output position modulo
    /// this value. Helps data made of fixed-size records such as 32-bit
    /// instructions. 0 is treated as 1.
    pub parity_contexts: usize,
    /// Decode a 1 when the register's low byte is at or above the
    /// probability, rather than below it.
    pub invert_bit_encoding: bool,
    /// Adapt probabilities without rounding, as the z80 unpacker does.
    pub simplified_prob_update: bool,
    /// Selector value that announces a match.
    pub is_match_bit: bool,
    /// Selector value that announces a new offset.
    pub new_offset_bit: bool,
    /// Integer bit that announces another value bit.
    pub continue_value_bit: bool,
    /// Never read the new/repeat selector; every match carries an offset.
    pub no_repeated_offsets: bool,
    /// Mark the end of the stream with a match length of 1 instead of an
    /// offset value of 1. Matches are then at least 2 bytes long.
    pub eof_in_length: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            use_bitstream: false,
            bitstream_is_big_endian: false,
            parity_contexts: 1,
            invert_bit_encoding: false,
            simplified_prob_update: false,
            is_match_bit: true,
            new_offset_bit: true,
            continue_value_bit: true,
            no_repeated_offsets: false,
            eof_in_length: false,
        }
    }
}

impl Config {
    /// Effective number of literal context sets.
    pub fn parity(&self) -> usize {
        self.parity_contexts.max(1)
    }

    /// Shortest match length the variant can express.
    pub fn min_match_length(&self) -> usize {
        if self.eof_in_length {
            2
        } else {
            1
        }
    }
}
