//! Decompressor for the ukpr format.
//!
//! ukpr is a tiny compression format for size-constrained targets: an
//! adaptive binary rANS coder feeding an LZ77 back-reference engine, simple
//! enough that hand-written unpackers fit in a couple of hundred bytes of
//! machine code. This crate is a memory-safe decoder for it.
//!
//! ## Features
//! - Core library depends only on `thiserror` and `tracing`
//! - `async` - Async file reading and off-thread decoding with tokio
//! - `parallel` - Decode many independent streams with rayon
//!
//! Format variants (bitstream refill, parity contexts, flipped bit
//! polarities and so on) are selected with [`Config`].
//!
//! ## Example
//!
//! ```rust
//! use ukpr::{unpack, DecodeError};
//!
//! // A stream must at least prime the 32-bit code register.
//! assert!(matches!(unpack(&[0x01], 1024), Err(DecodeError::TruncatedInput { .. })));
//! ```

pub mod decompress;
pub mod error;

#[cfg(feature = "async")]
mod file_unpack;

pub use error::{DecodeError, Result};

pub use decompress::{
    calculate_margin, calculate_margin_with_config, compressed_size, create_heatmap,
    create_heatmap_with_config, decode, decode_with_options, unpack, unpack_with_options, Config,
    CopyStrategy, DecodeOptions, Heatmap, UkprDecoder, DEFAULT_MAX_OUTPUT,
};

#[cfg(feature = "parallel")]
pub use decompress::unpack_many;

#[cfg(feature = "async")]
pub use file_unpack::{unpack_async, unpack_file};
