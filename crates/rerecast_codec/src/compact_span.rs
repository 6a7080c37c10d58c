#[cfg(feature = "bevy_reflect")]
use bevy_reflect::prelude::*;

use crate::region::RegionId;

/// A span in a [`CompactHeightfield`](crate::CompactHeightfield).
/// Packed for memory efficiency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
pub struct CompactSpan {
    /// The lower extent of the span. (Measured from the heightfield's base.)
    pub y: u16,
    /// The id of the region the span belongs to. (Or [`RegionId::NONE`] if not in a region.)
    pub region: RegionId,
    /// 24 bits: packed neighbor connection data
    /// 8 bits: the height of the span
    data: u32,
}

impl CompactSpan {
    pub(crate) const NOT_CONNECTED: u8 = 0x3f;
    /// Mask of the connection bits inside the packed word.
    pub const CONNECTION_MASK: u32 = 0x00FF_FFFF;
    const HEIGHT_SHIFT: u32 = 24;

    /// Creates a span from its logical fields.
    /// `connections` is truncated to its low 24 bits.
    #[inline]
    pub fn new(y: u16, region: impl Into<RegionId>, connections: u32, height: u8) -> Self {
        Self {
            y,
            region: region.into(),
            data: Self::pack_word(connections, height),
        }
    }

    /// Packs a connection field and a height into one word:
    /// bits 0-23 hold the connections, bits 24-31 the height.
    #[inline]
    pub const fn pack_word(connections: u32, height: u8) -> u32 {
        (connections & Self::CONNECTION_MASK) | ((height as u32) << Self::HEIGHT_SHIFT)
    }

    /// Splits a packed word into its connection field and height.
    #[inline]
    pub const fn unpack_word(word: u32) -> (u32, u8) {
        (
            word & Self::CONNECTION_MASK,
            ((word >> Self::HEIGHT_SHIFT) & 0xFF) as u8,
        )
    }

    /// Creates a span from a packed connection/height word.
    #[inline]
    pub fn from_packed(y: u16, region: impl Into<RegionId>, word: u32) -> Self {
        Self {
            y,
            region: region.into(),
            data: word,
        }
    }

    /// The packed connection/height word, as laid out by [`CompactSpan::pack_word`].
    #[inline]
    pub fn packed(&self) -> u32 {
        self.data
    }

    /// Returns the 24-bit neighbor connection field.
    #[inline]
    pub fn connections(&self) -> u32 {
        self.data & Self::CONNECTION_MASK
    }

    /// Overwrites the whole 24-bit neighbor connection field. Higher bits are discarded.
    #[inline]
    pub fn set_connections(&mut self, connections: u32) {
        self.data = (self.data & !Self::CONNECTION_MASK) | (connections & Self::CONNECTION_MASK);
    }

    /// Sets the neighbor connection data for the given direction.
    /// `None` if the neighbor is not connected.
    pub fn set_con(&mut self, direction: u8, neighbor: impl Into<Option<u8>>) {
        let shift = (direction as u32) * 6;
        let con = self.data;
        let value =
            neighbor.into().unwrap_or(Self::NOT_CONNECTED) as u32 & Self::NOT_CONNECTED as u32;
        self.data = (con & !(0x3f << shift)) | (value << shift);
    }

    /// Returns the neighbor connection data for the given direction.
    /// `None` if the neighbor is not connected.
    pub fn con(&self, direction: u8) -> Option<u8> {
        let shift = (direction as u32) * 6;
        let value = ((self.data >> shift) & Self::NOT_CONNECTED as u32) as u8;
        if value == Self::NOT_CONNECTED {
            None
        } else {
            Some(value)
        }
    }

    /// Returns the height of the span.
    #[inline]
    pub fn height(&self) -> u8 {
        (self.data >> Self::HEIGHT_SHIFT) as u8
    }

    /// Sets the height of the span.
    #[inline]
    pub fn set_height(&mut self, height: u8) {
        self.data = (self.data & Self::CONNECTION_MASK) | ((height as u32) << Self::HEIGHT_SHIFT);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compact_span() {
        let mut span = CompactSpan::default();
        span.set_height(10);
        assert_eq!(span.height(), 10);
        assert_eq!(span.connections(), 0);
    }

    #[test]
    fn test_compact_span_con() {
        let mut span = CompactSpan::default();
        span.set_con(0, Some(1));
        assert_eq!(span.con(0), Some(1));

        span.set_con(1, Some(3));
        assert_eq!(span.con(1), Some(3));

        span.set_con(2, Some(5));
        assert_eq!(span.con(2), Some(5));

        span.set_con(0, Some(2));
        assert_eq!(span.con(0), Some(2));

        span.set_con(1, None);
        assert_eq!(span.con(1), None);

        span.set_con(2, None);
        assert_eq!(span.con(2), None);
    }

    #[test]
    fn connections_do_not_touch_height() {
        let mut span = CompactSpan::new(4, 2, 0, 200);
        span.set_connections(0xFFFF_FFFF);
        assert_eq!(span.connections(), 0x00FF_FFFF);
        assert_eq!(span.height(), 200);

        span.set_con(3, Some(7));
        assert_eq!(span.height(), 200);
        assert_eq!(span.con(3), Some(7));

        span.set_height(0);
        assert_eq!(span.connections() >> 18, 7);
    }

    #[test]
    fn pack_and_unpack_edge_values() {
        for connections in [0, 1, 0x00AB_CDEF, 0x00FF_FFFE, 0x00FF_FFFF] {
            for height in [0, 1, 0x7F, 0x80, 0xFE, 0xFF] {
                let word = CompactSpan::pack_word(connections, height);
                assert_eq!(
                    CompactSpan::unpack_word(word),
                    (connections, height),
                    "connections {connections:#x}, height {height:#x}"
                );
            }
        }
    }

    #[test]
    fn height_occupies_the_top_byte() {
        assert_eq!(CompactSpan::pack_word(0, 0xFF), 0xFF00_0000);
        assert_eq!(CompactSpan::pack_word(0x0100_0001, 0), 0x0000_0001);
        assert_eq!(CompactSpan::unpack_word(0x8000_0000), (0, 0x80));
    }

    #[test]
    fn packed_word_matches_accessors() {
        let span = CompactSpan::from_packed(9, 3, 0x1234_5678);
        assert_eq!(span.packed(), 0x1234_5678);
        assert_eq!(span.connections(), 0x0034_5678);
        assert_eq!(span.height(), 0x12);
        assert_eq!(span, CompactSpan::new(9, 3, 0x0034_5678, 0x12));
    }
}
