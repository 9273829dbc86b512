//! Stream analysis without producing output.

use super::config::Config;
use super::decoder::UkprDecoder;
use super::heatmap::Heatmap;
use super::rans::RansDecoder;
use super::sink::{NullSink, Sink};
use super::Result;

/// Minimum margin needed when decompressing in place.
///
/// If the compressed data sits at the end of the destination buffer and is
/// decoded toward the front, the end of the compressed data must lie at least
/// this many bytes past the end of the decompressed data, or the writer
/// would overrun input not yet read.
pub fn calculate_margin(input: &[u8]) -> Result<isize> {
    calculate_margin_with_config(input, &Config::default())
}

/// [`calculate_margin`] for a stream packed with the variant `config`.
pub fn calculate_margin_with_config(input: &[u8], config: &Config) -> Result<isize> {
    let mut sink = NullSink::default();
    let mut decoder = UkprDecoder::with_config(input, config)?;
    decoder.decode_into(&mut sink)?;
    let margin = decoder.margin(sink.position());
    tracing::debug!(margin, produced = sink.position(), "calculated in-place margin");
    Ok(margin)
}

/// Decode `input` into a [`Heatmap`] of at most `max_size` bytes.
pub fn create_heatmap(input: &[u8], max_size: usize) -> Result<Heatmap> {
    create_heatmap_with_config(input, &Config::default(), max_size)
}

/// [`create_heatmap`] for a stream packed with the variant `config`.
pub fn create_heatmap_with_config(
    input: &[u8],
    config: &Config,
    max_size: usize,
) -> Result<Heatmap> {
    let mut heatmap = Heatmap::with_limit(max_size);
    let mut decoder = UkprDecoder::with_config(input, config)?;
    decoder.decode_into(&mut heatmap)?;
    heatmap.finish();
    Ok(heatmap)
}

/// Fractional size of the compressed data in bytes.
///
/// The first bytes prime the code register; only the information they
/// actually carry is counted. Only meaningful for byte-refill streams; the
/// bitstream variant has no fractional-byte estimate.
pub fn compressed_size(input: &[u8]) -> Result<f32> {
    let rans = RansDecoder::new(input)?;
    let rest = input.len() - rans.position();
    Ok(rest as f32 + f64::from(rans.state()).log2() as f32 / 8.0)
}
