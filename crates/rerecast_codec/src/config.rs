#[cfg(feature = "bevy_reflect")]
use bevy_reflect::prelude::*;

/// Specifies how a [`CompactHeightfieldCodec`](crate::CompactHeightfieldCodec) treats the
/// snapshots it reads.
///
/// The defaults accept up to 16 Mi columns and 64 Mi spans, e.g. a 4096x4096 heightfield
/// with four spans per column on average. Encoding is not limited, so raise the limits to read
/// back larger heightfields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[cfg_attr(
    all(feature = "serialize", feature = "bevy_reflect"),
    reflect(Serialize, Deserialize)
)]
pub struct CodecConfig {
    /// What to do when the last area run is longer than the spans left to fill.
    pub area_overrun: AreaOverrun,

    /// The largest `width * height` a snapshot may declare. `[Units: columns]`
    ///
    /// Storage for the columns is allocated before they are read,
    /// so this bounds the memory a corrupted header can request.
    pub max_column_count: usize,

    /// The largest span count a snapshot may declare. `[Units: spans]`
    ///
    /// Same as [`CodecConfig::max_column_count`], but for spans and areas.
    pub max_span_count: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            area_overrun: AreaOverrun::default(),
            max_column_count: 1 << 24,
            max_span_count: 1 << 26,
        }
    }
}

impl CodecConfig {
    /// A configuration that refuses any snapshot whose area runs do not add up exactly.
    pub fn strict() -> Self {
        Self {
            area_overrun: AreaOverrun::Reject,
            ..Self::default()
        }
    }
}

/// Handling of area runs that reach past the last span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
pub enum AreaOverrun {
    /// Discard the excess repetitions and log a warning.
    #[default]
    Truncate,
    /// Fail with [`MalformedStreamError::AreaRunOverrun`](crate::MalformedStreamError::AreaRunOverrun).
    Reject,
}
