#![doc = include_str!("../../../readme.md")]

mod block;
mod frame;
mod level;

use thiserror::Error;

pub use block::{compress_block, decompress_block};
pub use frame::{compress_frame, decompress_frame};
pub use level::CompressionLevel;

/// Errors that can occur when compressing or decompressing LZ4 data.
#[derive(Error, Debug)]
pub enum CompressionError {
    /// The requested level cannot be expressed with LZ4.
    #[error("Compression level {level:?} is not supported for LZ4")]
    UnsupportedLevel {
        /// The requested level
        level: CompressionLevel,
    },
    /// Decoding produced no data.
    #[error("LZ4 decode produced no output")]
    EmptyOutput,
    /// The block encoder failed.
    #[error("LZ4 block encode failed: {0}")]
    BlockCompress(#[from] lz4_flex::block::CompressError),
    /// The block decoder failed, e.g. because the input is corrupt or `dest` is too small.
    #[error("LZ4 block decode failed: {0}")]
    BlockDecompress(#[from] lz4_flex::block::DecompressError),
    /// Encoding or decoding an LZ4 frame failed.
    #[error("LZ4 frame error: {0}")]
    Frame(#[from] lz4_flex::frame::Error),
    /// Reading or writing the frame stream failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
