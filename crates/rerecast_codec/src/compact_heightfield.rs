//! The [`CompactHeightfield`] and the scalars describing its layout.

#[cfg(feature = "bevy_reflect")]
use bevy_reflect::prelude::*;
use thiserror::Error;

use crate::{Aabb3d, area::AreaType, compact_cell::CompactCell, compact_span::CompactSpan};

/// The scalars stored in front of a compact heightfield snapshot.
/// Everything needed to size a [`CompactHeightfield`] before its contents are known.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
pub struct CompactHeightfieldHeader {
    /// The width of the heightfield along the x-axis in cell units
    pub width: u32,
    /// The height of the heightfield along the z-axis in cell units
    pub height: u32,
    /// The number of spans across all columns
    pub span_count: u32,
    /// The walkable height used during the build of the field
    pub walkable_height: i32,
    /// The walkable climb used during the build of the field.
    pub walkable_climb: i32,
    /// The AABB of the heightfield
    pub aabb: Aabb3d,
    /// The size of each cell on the xz-plane
    pub cell_size: f32,
    /// The size of each cell along the y-axis
    pub cell_height: f32,
}

impl CompactHeightfieldHeader {
    /// The number of columns, i.e. `width * height`.
    #[inline]
    pub fn column_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

/// A packed representation of a heightfield: a grid of columns, each holding a contiguous
/// run of walkable spans.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "bevy_reflect", derive(Reflect))]
pub struct CompactHeightfield {
    /// The width of the heightfield along the x-axis in cell units
    pub width: u32,
    /// The height of the heightfield along the z-axis in cell units
    pub height: u32,
    /// The walkable height used during the build of the field
    pub walkable_height: i32,
    /// The walkable climb used during the build of the field.
    pub walkable_climb: i32,
    /// The AABB of the heightfield
    pub aabb: Aabb3d,
    /// The size of each cell on the xz-plane
    pub cell_size: f32,
    /// The size of each cell along the y-axis
    pub cell_height: f32,
    /// The cells in the heightfield [Size: `width * height`]
    pub cells: Vec<CompactCell>,
    /// All walkable spans in the heightfield, grouped by column
    pub spans: Vec<CompactSpan>,
    /// Vector containing area type data. [Size: `spans.len()`]
    pub areas: Vec<AreaType>,
}

impl CompactHeightfield {
    /// Allocates a heightfield sized for `header`.
    /// All cells are empty and all spans and areas are zeroed.
    pub fn new(header: &CompactHeightfieldHeader) -> Self {
        let mut compact_heightfield = Self::default();
        compact_heightfield.init(header);
        compact_heightfield
    }

    /// Reinitializes the heightfield for `header`, keeping the already allocated storage.
    pub fn init(&mut self, header: &CompactHeightfieldHeader) {
        self.width = header.width;
        self.height = header.height;
        self.walkable_height = header.walkable_height;
        self.walkable_climb = header.walkable_climb;
        self.aabb = header.aabb;
        self.cell_size = header.cell_size;
        self.cell_height = header.cell_height;

        let span_count = header.span_count as usize;
        self.cells.clear();
        self.cells.resize(header.column_count(), CompactCell::default());
        self.spans.clear();
        self.spans.resize(span_count, CompactSpan::default());
        self.areas.clear();
        self.areas.resize(span_count, AreaType::NOT_WALKABLE);
    }

    /// Returns the scalars describing this heightfield.
    ///
    /// The span count saturates at `u32::MAX`. [`CompactHeightfield::validate`] rejects
    /// heightfields that large anyway.
    pub fn header(&self) -> CompactHeightfieldHeader {
        CompactHeightfieldHeader {
            width: self.width,
            height: self.height,
            span_count: u32::try_from(self.spans.len()).unwrap_or(u32::MAX),
            walkable_height: self.walkable_height,
            walkable_climb: self.walkable_climb,
            aabb: self.aabb,
            cell_size: self.cell_size,
            cell_height: self.cell_height,
        }
    }

    /// The number of spans across all columns.
    #[inline]
    pub fn span_count(&self) -> usize {
        self.spans.len()
    }

    #[inline]
    pub(crate) fn column_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns the index into [`CompactHeightfield::cells`] of the column at the given coordinates.
    #[inline]
    pub fn column_index(&self, x: u32, z: u32) -> usize {
        x as usize + z as usize * self.width as usize
    }

    /// Returns the cell at the given coordinates. Returns `None` if the coordinates are invalid.
    #[inline]
    pub fn get_cell_at(&self, x: u32, z: u32) -> Option<&CompactCell> {
        if x >= self.width || z >= self.height {
            return None;
        }
        self.cells.get(self.column_index(x, z))
    }

    /// Returns the cell at the given coordinates. Panics if the coordinates are invalid.
    #[inline]
    pub fn cell_at(&self, x: u32, z: u32) -> &CompactCell {
        &self.cells[self.column_index(x, z)]
    }

    /// Returns the cell mutably at the given coordinates. Returns `None` if the coordinates are invalid.
    #[inline]
    pub fn get_cell_at_mut(&mut self, x: u32, z: u32) -> Option<&mut CompactCell> {
        if x >= self.width || z >= self.height {
            return None;
        }
        let index = self.column_index(x, z);
        self.cells.get_mut(index)
    }

    /// Returns the cell mutably at the given coordinates. Panics if the coordinates are invalid.
    #[inline]
    pub fn cell_at_mut(&mut self, x: u32, z: u32) -> &mut CompactCell {
        let index = self.column_index(x, z);
        &mut self.cells[index]
    }

    /// Returns the spans of a column, lowest first.
    /// Panics if the cell points outside of [`CompactHeightfield::spans`].
    #[inline]
    pub fn column_spans(&self, cell: &CompactCell) -> &[CompactSpan] {
        &self.spans[cell.span_range()]
    }

    /// Returns the area types of a column's spans, index-aligned with [`CompactHeightfield::column_spans`].
    /// Panics if the cell points outside of [`CompactHeightfield::areas`].
    #[inline]
    pub fn column_areas(&self, cell: &CompactCell) -> &[AreaType] {
        &self.areas[cell.span_range()]
    }

    /// Recomputes the index of every cell as the running sum of the counts before it.
    ///
    /// Indices saturate at `u32::MAX`. [`CompactHeightfield::validate`] reports such layouts.
    pub fn rebuild_cell_indices(&mut self) {
        let mut offset = 0_u32;
        for cell in &mut self.cells {
            cell.set_index(offset);
            offset = offset.saturating_add(cell.count());
        }
    }

    /// Checks that cells, spans and areas describe one consistent layout.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.spans.len() > i32::MAX as usize {
            return Err(LayoutError::SpanCountTooLarge {
                span_count: self.spans.len(),
            });
        }
        if self.width > i32::MAX as u32 || self.height > i32::MAX as u32 {
            return Err(LayoutError::DimensionsTooLarge {
                width: self.width,
                height: self.height,
            });
        }
        let expected = self.column_count();
        if self.cells.len() != expected {
            return Err(LayoutError::CellCountMismatch {
                width: self.width,
                height: self.height,
                cell_count: self.cells.len(),
            });
        }
        if self.areas.len() != self.spans.len() {
            return Err(LayoutError::AreaCountMismatch {
                span_count: self.spans.len(),
                area_count: self.areas.len(),
            });
        }
        let mut offset = 0_usize;
        for (column, cell) in self.cells.iter().enumerate() {
            if cell.index() as usize != offset {
                return Err(LayoutError::CellIndexMismatch {
                    column,
                    index: cell.index(),
                    expected: offset,
                });
            }
            offset += cell.count() as usize;
        }
        if offset != self.spans.len() {
            return Err(LayoutError::SpanCountMismatch {
                counted: offset,
                span_count: self.spans.len(),
            });
        }
        Ok(())
    }
}

/// Inconsistencies between the cells, spans and areas of a [`CompactHeightfield`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// There are more spans than a snapshot can describe.
    #[error("Got {span_count} spans, but at most {max} are supported", max = i32::MAX)]
    SpanCountTooLarge {
        /// The number of spans
        span_count: usize,
    },
    /// The width or height cannot be stored in a snapshot.
    #[error("Dimensions {width}*{height} exceed the limit of {max} per axis", max = i32::MAX)]
    DimensionsTooLarge {
        /// The width of the heightfield
        width: u32,
        /// The height of the heightfield
        height: u32,
    },
    /// The number of cells is not `width * height`.
    #[error("Expected {width}*{height} cells, but got {cell_count}")]
    CellCountMismatch {
        /// The width of the heightfield
        width: u32,
        /// The height of the heightfield
        height: u32,
        /// The actual number of cells
        cell_count: usize,
    },
    /// The number of areas differs from the number of spans.
    #[error("Got {span_count} spans but {area_count} areas")]
    AreaCountMismatch {
        /// The number of spans
        span_count: usize,
        /// The number of areas
        area_count: usize,
    },
    /// A cell's index is not the sum of the counts of all previous cells.
    #[error("Cell {column} starts at span {index}, but the previous cells end at span {expected}")]
    CellIndexMismatch {
        /// The row-major index of the offending cell
        column: usize,
        /// The index stored in the cell
        index: u32,
        /// The sum of the counts of all previous cells
        expected: usize,
    },
    /// The cell counts do not add up to the number of spans.
    #[error("Cells hold {counted} spans in total, but there are {span_count} spans")]
    SpanCountMismatch {
        /// The sum of all cell counts
        counted: usize,
        /// The number of spans
        span_count: usize,
    },
}
