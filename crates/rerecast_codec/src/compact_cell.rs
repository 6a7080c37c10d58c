#[cfg(feature = "bevy_reflect")]
use bevy_reflect::prelude::*;

/// Provides information on the content of a cell column in a [`CompactHeightfield`](crate::CompactHeightfield).
///
/// Only the count is stored in a snapshot. The index is the running sum of the counts of all
/// previous columns and is recomputed on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
pub struct CompactCell {
    /// Index to the first span in the column.
    index: u32,
    /// Number of spans in the column.
    count: u32,
}

impl CompactCell {
    /// Creates a cell whose spans start at `index`.
    #[inline]
    pub fn new(index: u32, count: u32) -> Self {
        Self { index, count }
    }

    /// Index of the first span of this column in [`CompactHeightfield::spans`](crate::CompactHeightfield::spans).
    #[inline]
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Number of spans stacked in this column.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Sets the index of the first span of this column.
    #[inline]
    pub fn set_index(&mut self, index: u32) {
        self.index = index;
    }

    /// Sets the number of spans stacked in this column.
    #[inline]
    pub fn set_count(&mut self, count: u32) {
        self.count = count;
    }

    /// The range of span indices covered by this column.
    #[inline]
    pub fn span_range(&self) -> std::ops::Range<usize> {
        let start = self.index as usize;
        start..start + self.count as usize
    }
}
