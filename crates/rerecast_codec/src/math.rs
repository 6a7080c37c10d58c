use glam::Vec3;
#[cfg(feature = "bevy_reflect")]
use bevy_reflect::prelude::*;

/// An axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
pub struct Aabb3d {
    /// The minimum corner of the box
    pub min: Vec3,
    /// The maximum corner of the box
    pub max: Vec3,
}

impl Aabb3d {
    /// Creates a new AABB from its two corners.
    #[inline]
    pub fn new(min: impl Into<Vec3>, max: impl Into<Vec3>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Returns the extents of the box along each axis.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}
