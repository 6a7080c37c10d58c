#![doc = include_str!("../../../readme.md")]

mod area;
mod codec;
mod compact_cell;
mod compact_heightfield;
mod compact_span;
mod config;
mod math;
mod provider;
mod region;
pub mod run_length;
mod wire;

pub use area::AreaType;
pub use codec::{CodecError, CompactHeightfieldCodec, MalformedStreamError};
pub use compact_cell::CompactCell;
pub use compact_heightfield::{CompactHeightfield, CompactHeightfieldHeader, LayoutError};
pub use compact_span::CompactSpan;
pub use config::{AreaOverrun, CodecConfig};
pub use math::Aabb3d;
pub use provider::{Allocate, HeightfieldPool, HeightfieldProvider};
pub use region::RegionId;
