//! Async front end (requires the `async` feature).
//!
//! Decoding has no suspension points, so it runs on tokio's blocking pool
//! while the caller's task awaits the result.

use std::io;
use std::path::Path;

use crate::decompress::{unpack_with_options, DecodeOptions};
use crate::error::Result;

/// Decode `input` on the blocking thread pool.
pub async fn unpack_async(input: Vec<u8>, options: DecodeOptions) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || unpack_with_options(&input, &options))
        .await
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?
}

/// Read a compressed file and decode it.
pub async fn unpack_file(path: impl AsRef<Path>, options: &DecodeOptions) -> Result<Vec<u8>> {
    let path = path.as_ref();
    let input = tokio::fs::read(path).await?;
    tracing::debug!(path = %path.display(), len = input.len(), "read compressed file");
    unpack_async(input, options.clone()).await
}
