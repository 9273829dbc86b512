//! Decoding many independent streams on the rayon pool.

use rayon::prelude::*;

use super::{unpack_with_options, DecodeOptions, Result};

/// Unpack each buffer in `inputs` on the rayon thread pool.
///
/// Every stream gets its own decoder state; results come back in input order.
pub fn unpack_many<T>(inputs: &[T], options: &DecodeOptions) -> Vec<Result<Vec<u8>>>
where
    T: AsRef<[u8]> + Sync,
{
    tracing::debug!(streams = inputs.len(), "unpacking streams in parallel");
    inputs
        .par_iter()
        .map(|input| unpack_with_options(input.as_ref(), options))
        .collect()
}
