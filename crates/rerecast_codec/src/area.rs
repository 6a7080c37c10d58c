use std::ops::{Deref, DerefMut};

#[cfg(feature = "bevy_reflect")]
use bevy_reflect::prelude::*;

/// The classification of a span, e.g. the kind of walkable surface it belongs to.
///
/// Any `i32` is a valid area type. Only [`AreaType::NOT_WALKABLE`] has a fixed meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
#[repr(transparent)]
pub struct AreaType(pub i32);

impl Deref for AreaType {
    type Target = i32;
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for AreaType {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl Default for AreaType {
    fn default() -> Self {
        Self::NOT_WALKABLE
    }
}

impl From<i32> for AreaType {
    fn from(value: i32) -> Self {
        AreaType(value)
    }
}

impl From<AreaType> for i32 {
    fn from(value: AreaType) -> Self {
        value.0
    }
}

impl AreaType {
    /// The area type 0. Spans with this area type are not walkable.
    pub const NOT_WALKABLE: Self = Self(0);
    /// Default area type for walkable spans.
    pub const WALKABLE: Self = Self(255);

    /// Returns `true` if the area type is not [`AreaType::NOT_WALKABLE`].
    #[inline]
    pub fn is_walkable(&self) -> bool {
        *self != Self::NOT_WALKABLE
    }
}
