use lz4_flex::frame::{BlockMode, BlockSize, FrameInfo};

use crate::CompressionError;

/// How much effort to spend on compression.
///
/// `lz4_flex` has a single encoder and no high-compression mode, so the level only changes
/// the frame layout: larger, linked blocks let matches reach further back at the cost of memory.
/// Raw blocks ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum CompressionLevel {
    /// Store the data uncompressed. Not supported for LZ4.
    NoCompression,
    /// 64 KiB independent blocks.
    #[default]
    Fastest,
    /// 256 KiB linked blocks.
    Optimal,
    /// 4 MiB linked blocks.
    SmallestSize,
}

impl CompressionLevel {
    pub(crate) fn check_supported(self) -> Result<(), CompressionError> {
        match self {
            Self::NoCompression => Err(CompressionError::UnsupportedLevel { level: self }),
            Self::Fastest | Self::Optimal | Self::SmallestSize => Ok(()),
        }
    }

    pub(crate) fn frame_info(self) -> Result<FrameInfo, CompressionError> {
        let (block_size, block_mode) = match self {
            Self::NoCompression => {
                return Err(CompressionError::UnsupportedLevel { level: self });
            }
            Self::Fastest => (BlockSize::Max64KB, BlockMode::Independent),
            Self::Optimal => (BlockSize::Max256KB, BlockMode::Linked),
            Self::SmallestSize => (BlockSize::Max4MB, BlockMode::Linked),
        };
        let mut frame_info = FrameInfo::new();
        frame_info.block_size = block_size;
        frame_info.block_mode = block_mode;
        Ok(frame_info)
    }
}
