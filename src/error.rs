//! Error types for ukpr decompression.
//!
//! This module provides the [`DecodeError`] type which covers every way a
//! decode call can fail. All errors are terminal for the call that produced
//! them: the adaptive model is discarded and any partial output is
//! meaningless.
//!
//! ## Error Categories
//!
//! | Category | Errors | Description |
//! |----------|--------|-------------|
//! | Input | [`TruncatedInput`], [`ValueOverflow`] | Compressed stream is cut short or corrupt |
//! | Output | [`OutputOverflow`] | Destination buffer or size limit is too small |
//! | Back-reference | [`InvalidOffset`] | Match points before the start of the output |
//! | I/O | [`Io`] | File reading in the async front end |
//!
//! ## Example
//!
//! ```rust
//! use ukpr::{decode, DecodeError};
//!
//! let mut out = [0u8; 16];
//! match decode(&[], &mut out) {
//!     Ok(n) => println!("decoded {} bytes", n),
//!     Err(DecodeError::TruncatedInput { position }) => {
//!         eprintln!("input ended at byte {}", position)
//!     }
//!     Err(e) => eprintln!("error: {}", e),
//! }
//! ```
//!
//! [`TruncatedInput`]: DecodeError::TruncatedInput
//! [`ValueOverflow`]: DecodeError::ValueOverflow
//! [`OutputOverflow`]: DecodeError::OutputOverflow
//! [`InvalidOffset`]: DecodeError::InvalidOffset
//! [`Io`]: DecodeError::Io

use std::io;
use thiserror::Error;

/// Error type for ukpr decoding.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The code register needed another byte but the input was exhausted.
    ///
    /// The format itself carries no length field, so a stream that is cut
    /// short is only noticed when the decoder tries to read past its end.
    #[error("Unexpected end of input at byte {position}")]
    TruncatedInput {
        /// Number of input bytes consumed when the refill failed.
        position: usize,
    },

    /// A literal or match would write past the end of the destination.
    #[error("Output overflow: need {needed} bytes, capacity is {capacity}")]
    OutputOverflow {
        /// Output size the failing symbol would have produced.
        needed: usize,
        /// Capacity of the destination buffer or the configured size limit.
        capacity: usize,
    },

    /// A match references data before the start of the output.
    ///
    /// An `offset` of 0 means a repeat-offset match appeared before any
    /// offset had been decoded.
    #[error("Invalid back reference: offset {offset} exceeds output position {position}")]
    InvalidOffset {
        /// The match distance.
        offset: usize,
        /// Number of bytes produced so far.
        position: usize,
    },

    /// An offset or length integer carried more than 32 bits.
    #[error("Overflow while reading offset or length value")]
    ValueOverflow,

    /// An I/O error occurred while reading compressed data.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DecodeError>;
