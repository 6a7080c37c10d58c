//! Raw LZ4 blocks. A block does not record its uncompressed size,
//! so the caller has to keep track of it.

use crate::{CompressionError, CompressionLevel};

/// Compresses `data` into a single LZ4 block.
///
/// Empty input produces empty output. Every supported level produces the same block;
/// the level only matters for [`compress_frame`](crate::compress_frame).
///
/// # Errors
///
/// Returns [`CompressionError::UnsupportedLevel`] for [`CompressionLevel::NoCompression`],
/// [`CompressionError::BlockCompress`] if the encoder fails.
pub fn compress_block(data: &[u8], level: CompressionLevel) -> Result<Vec<u8>, CompressionError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    level.check_supported()?;

    let mut compressed = vec![0; lz4_flex::block::get_maximum_output_size(data.len())];
    let len = lz4_flex::block::compress_into(data, &mut compressed)?;
    if len == 0 {
        return Err(CompressionError::EmptyOutput);
    }
    compressed.truncate(len);
    tracing::debug!(
        uncompressed = data.len(),
        compressed = len,
        "Compressed LZ4 block"
    );
    Ok(compressed)
}

/// Decompresses an LZ4 block into `dest` and returns the number of bytes written.
///
/// `dest` must be at least as large as the uncompressed data.
///
/// # Errors
///
/// Returns [`CompressionError::BlockDecompress`] if the block is corrupt or does not fit into `dest`,
/// [`CompressionError::EmptyOutput`] if nothing was decoded.
pub fn decompress_block(src: &[u8], dest: &mut [u8]) -> Result<usize, CompressionError> {
    let len = lz4_flex::block::decompress_into(src, dest)?;
    if len == 0 {
        return Err(CompressionError::EmptyOutput);
    }
    Ok(len)
}
