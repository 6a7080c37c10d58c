//! Sources of [`CompactHeightfield`] instances for decoding.

use crate::compact_heightfield::{CompactHeightfield, CompactHeightfieldHeader};

/// Hands out a heightfield sized for a header.
///
/// The returned instance must have all header fields set, `width * height` cells and
/// `span_count` spans and areas. Its contents are overwritten by the decoder.
pub trait HeightfieldProvider {
    /// Returns a heightfield sized for `header`.
    fn provide(&mut self, header: &CompactHeightfieldHeader) -> CompactHeightfield;
}

impl<F> HeightfieldProvider for F
where
    F: FnMut(&CompactHeightfieldHeader) -> CompactHeightfield,
{
    fn provide(&mut self, header: &CompactHeightfieldHeader) -> CompactHeightfield {
        self(header)
    }
}

/// Allocates a fresh heightfield for every request.
#[derive(Debug, Clone, Copy, Default)]
pub struct Allocate;

impl HeightfieldProvider for Allocate {
    fn provide(&mut self, header: &CompactHeightfieldHeader) -> CompactHeightfield {
        CompactHeightfield::new(header)
    }
}

/// Keeps released heightfields around so their storage can back the next decode.
#[derive(Debug, Default)]
pub struct HeightfieldPool {
    free: Vec<CompactHeightfield>,
    max_pooled: Option<usize>,
}

impl HeightfieldPool {
    /// Creates an empty pool without a size limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty pool that holds on to at most `max_pooled` released heightfields.
    pub fn with_max_pooled(max_pooled: usize) -> Self {
        Self {
            free: Vec::new(),
            max_pooled: Some(max_pooled),
        }
    }

    /// Takes a pooled heightfield, or allocates one if the pool is empty,
    /// and reinitializes it for `header`.
    pub fn acquire(&mut self, header: &CompactHeightfieldHeader) -> CompactHeightfield {
        match self.free.pop() {
            Some(mut compact_heightfield) => {
                compact_heightfield.init(header);
                compact_heightfield
            }
            None => CompactHeightfield::new(header),
        }
    }

    /// Returns a heightfield to the pool. Dropped if the pool is full.
    pub fn release(&mut self, compact_heightfield: CompactHeightfield) {
        if self
            .max_pooled
            .is_some_and(|max_pooled| self.free.len() >= max_pooled)
        {
            return;
        }
        self.free.push(compact_heightfield);
    }

    /// The number of heightfields waiting to be reused.
    #[inline]
    pub fn len(&self) -> usize {
        self.free.len()
    }

    /// Returns `true` if no heightfield is waiting to be reused.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.free.is_empty()
    }
}

impl HeightfieldProvider for HeightfieldPool {
    fn provide(&mut self, header: &CompactHeightfieldHeader) -> CompactHeightfield {
        self.acquire(header)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Aabb3d, AreaType};

    use super::*;

    fn header(span_count: u32) -> CompactHeightfieldHeader {
        CompactHeightfieldHeader {
            width: 4,
            height: 4,
            span_count,
            walkable_height: 3,
            walkable_climb: 1,
            aabb: Aabb3d::new([0.0, 0.0, 0.0], [4.0, 2.0, 4.0]),
            cell_size: 1.0,
            cell_height: 0.25,
        }
    }

    #[test]
    fn pool_reuses_released_storage() {
        let mut pool = HeightfieldPool::new();
        let mut compact_heightfield = pool.acquire(&header(64));
        compact_heightfield.areas.fill(AreaType::WALKABLE);
        let capacity = compact_heightfield.areas.capacity();
        pool.release(compact_heightfield);
        assert_eq!(pool.len(), 1);

        let compact_heightfield = pool.provide(&header(8));
        assert!(pool.is_empty());
        assert_eq!(compact_heightfield.areas.capacity(), capacity);
        assert_eq!(compact_heightfield.areas, vec![AreaType::NOT_WALKABLE; 8]);
        assert_eq!(compact_heightfield.header(), header(8));
    }

    #[test]
    fn pool_respects_max_pooled() {
        let mut pool = HeightfieldPool::with_max_pooled(1);
        pool.release(CompactHeightfield::new(&header(1)));
        pool.release(CompactHeightfield::new(&header(2)));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn closures_are_providers() {
        let mut calls = 0;
        let mut provider = |header: &CompactHeightfieldHeader| {
            calls += 1;
            CompactHeightfield::new(header)
        };
        let compact_heightfield = provider.provide(&header(2));
        assert_eq!(compact_heightfield.spans.len(), 2);
        assert_eq!(calls, 1);
    }
}
