//! Self-describing LZ4 frames, as produced by the `lz4` command line tool.

use std::io::{Read as _, Write as _};

use lz4_flex::frame::{FrameDecoder, FrameEncoder};

use crate::{CompressionError, CompressionLevel};

/// Compresses `data` into an LZ4 frame.
///
/// Empty input produces empty output.
///
/// # Errors
///
/// Returns [`CompressionError::UnsupportedLevel`] for [`CompressionLevel::NoCompression`],
/// [`CompressionError::Frame`] if the encoder fails.
pub fn compress_frame(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>, CompressionError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let frame_info = level.frame_info()?;

    let mut encoder = FrameEncoder::with_frame_info(frame_info, Vec::new());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;
    tracing::debug!(
        uncompressed = data.len(),
        compressed = compressed.len(),
        ?level,
        "Compressed LZ4 frame"
    );
    Ok(compressed)
}

/// Decompresses an LZ4 frame.
///
/// Empty input produces empty output.
///
/// # Errors
///
/// Returns [`CompressionError::Io`] if the frame is corrupt or truncated.
pub fn decompress_frame(data: &[u8]) -> Result<Vec<u8>, CompressionError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let mut decoder = FrameDecoder::new(data);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(decompressed)
}
