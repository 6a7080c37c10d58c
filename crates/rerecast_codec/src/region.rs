use std::ops::{Deref, DerefMut};

#[cfg(feature = "bevy_reflect")]
use bevy_reflect::prelude::*;

/// The id of a region in a [`CompactHeightfield`](crate::CompactHeightfield).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[repr(transparent)]
pub struct RegionId(pub u16);

impl Deref for RegionId {
    type Target = u16;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for RegionId {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Default for RegionId {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<u16> for RegionId {
    fn from(value: u16) -> Self {
        RegionId(value)
    }
}

impl From<RegionId> for u16 {
    fn from(value: RegionId) -> Self {
        value.0
    }
}

impl RegionId {
    /// Spans that are not assigned to any region.
    pub const NONE: Self = Self(0);
}
