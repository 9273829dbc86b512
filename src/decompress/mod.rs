//! ukpr decompression.
//!
//! A ukpr stream is a binary rANS bitstream. Every decision (literal or
//! match, new or repeated offset, each bit of a literal, offset or length)
//! is decoded against its own adaptive 8-bit probability, and the decoded
//! symbols drive an LZ77 back-reference copy engine.
//!
//! ## Entry points
//!
//! | Function | Output | Notes |
//! |----------|--------|-------|
//! | [`decode`] | caller slice | returns bytes written |
//! | [`unpack`] | `Vec<u8>` | fails once `max_size` would be exceeded |
//! | [`create_heatmap`] | [`Heatmap`] | per-byte bit cost |
//! | [`calculate_margin`] | `isize` | safety gap for in-place decoding |
//! | [`compressed_size`] | `f32` | fractional compressed size in bytes |
//!
//! Streams packed with a non-standard format variant need the matching
//! [`Config`], passed through [`DecodeOptions::config`] or the `_with_config`
//! analysis functions.
//!
//! ## Example
//!
//! ```rust
//! # let packed: Vec<u8> = Vec::new();
//! // `packed` holds a ukpr stream read from elsewhere
//! let mut out = [0u8; 64];
//! match ukpr::decode(&packed, &mut out) {
//!     Ok(n) => println!("{:?}", &out[..n]),
//!     Err(e) => eprintln!("corrupt stream: {}", e),
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Compressed Data
//!       ↓
//! ┌──────────────────┐
//! │ RansDecoder      │ ← 32-bit register, byte or bit refill
//! └──────────────────┘
//!       ↓
//! ┌──────────────────┐
//! │ ProbabilityModel │ ← 385 adaptive contexts (+256 per parity set)
//! └──────────────────┘
//!       ↓
//! ┌──────────────────┐
//! │ UkprDecoder      │ ← literal / match grammar, offsets, lengths
//! └──────────────────┘
//!       ↓
//! ┌──────────────────┐
//! │ Sink             │ ← output window, Vec, heatmap or dry run
//! └──────────────────┘
//!       ↓
//! Decompressed Data
//! ```
//!
//! All state is created per call, so independent buffers can be decoded
//! concurrently without coordination.

mod analysis;
mod config;
mod decoder;
mod heatmap;
pub mod model;
#[cfg(feature = "parallel")]
mod parallel;
mod rans;
mod sink;
mod symbols;
mod window;

#[cfg(test)]
pub(crate) mod test_encoder;

pub use analysis::{
    calculate_margin, calculate_margin_with_config, compressed_size, create_heatmap,
    create_heatmap_with_config,
};
pub use config::Config;
pub use decoder::UkprDecoder;
pub use heatmap::Heatmap;
pub use model::ProbabilityModel;
#[cfg(feature = "parallel")]
pub use parallel::unpack_many;
pub use rans::{RansDecoder, RANS_LOW, RANS_LOW_BITSTREAM};
pub use sink::{NullSink, Sink, VecSink};
pub use window::{copy_bytewise, copy_chunked, CopyStrategy, OutputWindow};

pub use crate::error::{DecodeError, Result};

/// Default output limit for growable outputs (64 MiB).
///
/// A handful of compressed bytes can describe a multi-gigabyte match, so
/// growable outputs always carry a limit.
pub const DEFAULT_MAX_OUTPUT: usize = 64 << 20;

/// Options for a decode call.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// How match bytes are moved.
    pub copy_strategy: CopyStrategy,
    /// Largest output [`unpack_with_options`] will produce. Raise it
    /// explicitly for larger trusted data.
    pub max_output: usize,
    /// Format variant the stream was packed with.
    pub config: Config,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            copy_strategy: CopyStrategy::default(),
            max_output: DEFAULT_MAX_OUTPUT,
            config: Config::default(),
        }
    }
}

/// Decode `input` into `output`, returning the number of bytes written.
///
/// `output` must be large enough for the whole decompressed result; bytes
/// after the end-of-stream marker in `input` are ignored.
pub fn decode(input: &[u8], output: &mut [u8]) -> Result<usize> {
    decode_with_options(input, output, &DecodeOptions::default())
}

/// [`decode`] with explicit options. `max_output` is ignored here; the
/// length of `output` is the limit.
pub fn decode_with_options(
    input: &[u8],
    output: &mut [u8],
    options: &DecodeOptions,
) -> Result<usize> {
    tracing::debug!(
        input_len = input.len(),
        capacity = output.len(),
        "decoding ukpr stream"
    );
    let mut window = OutputWindow::new(output, options.copy_strategy);
    let consumed = run(input, &options.config, &mut window)?;
    tracing::debug!(consumed, written = window.position(), "decode finished");
    Ok(window.position())
}

/// Decode `input` into a new vector of at most `max_size` bytes.
pub fn unpack(input: &[u8], max_size: usize) -> Result<Vec<u8>> {
    unpack_with_options(
        input,
        &DecodeOptions {
            max_output: max_size,
            ..DecodeOptions::default()
        },
    )
}

/// Decode `input` into a new vector, honoring `options.max_output`.
pub fn unpack_with_options(input: &[u8], options: &DecodeOptions) -> Result<Vec<u8>> {
    tracing::debug!(input_len = input.len(), limit = options.max_output, "unpacking ukpr stream");
    let mut sink = VecSink::new(options.max_output, options.copy_strategy);
    let consumed = run(input, &options.config, &mut sink)?;
    let data = sink.into_inner();
    tracing::debug!(consumed, written = data.len(), "unpack finished");
    Ok(data)
}

/// Drive a fresh decoder into `sink`, returning input bytes consumed.
fn run<S: Sink>(input: &[u8], config: &Config, sink: &mut S) -> Result<usize> {
    let result = UkprDecoder::with_config(input, config).and_then(|mut decoder| {
        decoder.decode_into(sink)?;
        Ok(decoder.consumed())
    });
    if let Err(e) = &result {
        tracing::warn!(error = %e, produced = sink.position(), "ukpr decode failed");
    }
    result
}
