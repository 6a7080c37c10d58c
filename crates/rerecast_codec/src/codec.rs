//! Reading and writing [`CompactHeightfield`] snapshots.
//!
//! The layout, all scalars little-endian:
//!
//! | field | type |
//! |---|---|
//! | width, height, span count, walkable height, walkable climb | `i32` each |
//! | AABB min, AABB max | 3 x `f32` each |
//! | cell size, cell height | `f32` each |
//! | span count of every column, row-major | `i32` each |
//! | every span, grouped by column: y, region, connections + height | `u16`, `u16`, `u32` |
//! | area runs until every span has an area: length, area | `i32`, `i32` |
//!
//! Column indices are not stored. They are the running sum of the column counts.

use std::io::{self, Read, Write};

use thiserror::Error;

use crate::{
    Aabb3d,
    area::AreaType,
    compact_cell::CompactCell,
    compact_heightfield::{CompactHeightfield, CompactHeightfieldHeader, LayoutError},
    compact_span::CompactSpan,
    config::{AreaOverrun, CodecConfig},
    provider::{Allocate, HeightfieldProvider},
    region::RegionId,
    run_length::{AreaRun, RunLengthFill, area_runs},
    wire::{WireRead as _, WireWrite as _},
};

/// Encodes and decodes [`CompactHeightfield`]s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CompactHeightfieldCodec {
    /// The limits and policies applied while decoding
    pub config: CodecConfig,
}

impl CompactHeightfieldCodec {
    /// The size of the scalars in front of every snapshot. `[Units: bytes]`
    pub const HEADER_SIZE: usize = 5 * 4 + 2 * 3 * 4 + 2 * 4;

    /// Creates a codec with the given configuration.
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    /// Reads a snapshot into a newly allocated heightfield.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TruncatedInput`] if the reader ends early,
    /// [`CodecError::MalformedStream`] if the snapshot cannot describe a valid heightfield.
    pub fn decode<R: Read + ?Sized>(&self, reader: &mut R) -> Result<CompactHeightfield, CodecError> {
        self.decode_with(reader, &mut Allocate)
    }

    /// Reads a snapshot into a heightfield obtained from `provider`.
    ///
    /// The provider is only asked for an instance after the header has been read and checked.
    ///
    /// # Errors
    ///
    /// Same as [`CompactHeightfieldCodec::decode`].
    pub fn decode_with<R, P>(
        &self,
        reader: &mut R,
        provider: &mut P,
    ) -> Result<CompactHeightfield, CodecError>
    where
        R: Read + ?Sized,
        P: HeightfieldProvider + ?Sized,
    {
        let header = self.read_header(reader)?;
        let mut compact_heightfield = provider.provide(&header);
        if !is_sized_for(&compact_heightfield, &header) {
            compact_heightfield.init(&header);
        }
        self.read_body(reader, &mut compact_heightfield)?;
        Ok(compact_heightfield)
    }

    /// Reads a snapshot into an existing heightfield, reusing its storage.
    ///
    /// On error, the contents of `destination` are unspecified.
    ///
    /// # Errors
    ///
    /// Same as [`CompactHeightfieldCodec::decode`].
    pub fn decode_into<R: Read + ?Sized>(
        &self,
        reader: &mut R,
        destination: &mut CompactHeightfield,
    ) -> Result<(), CodecError> {
        let header = self.read_header(reader)?;
        destination.init(&header);
        self.read_body(reader, destination)
    }

    /// Decodes a snapshot that must span the whole slice.
    ///
    /// # Errors
    ///
    /// Same as [`CompactHeightfieldCodec::decode`], plus
    /// [`MalformedStreamError::TrailingBytes`] if bytes are left over.
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<CompactHeightfield, CodecError> {
        let mut reader = bytes;
        let compact_heightfield = self.decode(&mut reader)?;
        if !reader.is_empty() {
            return Err(MalformedStreamError::TrailingBytes {
                remaining: reader.len(),
            }
            .into());
        }
        Ok(compact_heightfield)
    }

    /// Reads and checks the header scalars.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::TruncatedInput`] if fewer than [`Self::HEADER_SIZE`] bytes are available,
    /// [`CodecError::MalformedStream`] if a scalar is out of range or a count exceeds the configured limits.
    pub fn read_header<R: Read + ?Sized>(
        &self,
        reader: &mut R,
    ) -> Result<CompactHeightfieldHeader, CodecError> {
        let width = reader.read_wire_i32("width")?;
        let height = reader.read_wire_i32("height")?;
        let span_count = reader.read_wire_i32("span count")?;
        let walkable_height = reader.read_wire_i32("walkable height")?;
        let walkable_climb = reader.read_wire_i32("walkable climb")?;
        let min = reader.read_wire_vec3("AABB min")?;
        let max = reader.read_wire_vec3("AABB max")?;
        let cell_size = reader.read_wire_f32("cell size")?;
        let cell_height = reader.read_wire_f32("cell height")?;

        let header = CompactHeightfieldHeader {
            width: to_u32("width", width)?,
            height: to_u32("height", height)?,
            span_count: to_u32("span count", span_count)?,
            walkable_height,
            walkable_climb,
            aabb: Aabb3d { min, max },
            cell_size,
            cell_height,
        };

        let column_count = u64::from(header.width) * u64::from(header.height);
        if column_count > self.config.max_column_count as u64 {
            return Err(MalformedStreamError::TooManyColumns {
                width: header.width,
                height: header.height,
                max: self.config.max_column_count,
            }
            .into());
        }
        if header.span_count as usize > self.config.max_span_count {
            return Err(MalformedStreamError::TooManySpans {
                span_count: header.span_count,
                max: self.config.max_span_count,
            }
            .into());
        }
        Ok(header)
    }

    fn read_body<R: Read + ?Sized>(
        &self,
        reader: &mut R,
        compact_heightfield: &mut CompactHeightfield,
    ) -> Result<(), CodecError> {
        let span_count = compact_heightfield.span_count();
        read_cells(reader, &mut compact_heightfield.cells, span_count)?;
        read_spans(
            reader,
            &mut compact_heightfield.spans,
            &compact_heightfield.cells,
        )?;
        read_areas(reader, &mut compact_heightfield.areas, self.config.area_overrun)?;

        tracing::debug!(
            width = compact_heightfield.width,
            height = compact_heightfield.height,
            span_count,
            "Decoded compact heightfield"
        );
        Ok(())
    }

    /// Writes a snapshot of `compact_heightfield`.
    ///
    /// Nothing is written if the heightfield is inconsistent.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidHeightfield`] if [`CompactHeightfield::validate`] fails,
    /// [`CodecError::Io`] if the writer fails.
    pub fn encode<W: Write + ?Sized>(
        &self,
        compact_heightfield: &CompactHeightfield,
        writer: &mut W,
    ) -> Result<(), CodecError> {
        compact_heightfield.validate()?;

        // All fit, `validate` caps dimensions and the span count at `i32::MAX`
        writer.write_wire_i32(compact_heightfield.width as i32)?;
        writer.write_wire_i32(compact_heightfield.height as i32)?;
        writer.write_wire_i32(compact_heightfield.span_count() as i32)?;
        writer.write_wire_i32(compact_heightfield.walkable_height)?;
        writer.write_wire_i32(compact_heightfield.walkable_climb)?;
        writer.write_wire_vec3(compact_heightfield.aabb.min)?;
        writer.write_wire_vec3(compact_heightfield.aabb.max)?;
        writer.write_wire_f32(compact_heightfield.cell_size)?;
        writer.write_wire_f32(compact_heightfield.cell_height)?;

        write_cells(writer, &compact_heightfield.cells)?;
        write_spans(writer, &compact_heightfield.spans, &compact_heightfield.cells)?;
        let run_count = write_areas(writer, &compact_heightfield.areas)?;

        tracing::debug!(
            width = compact_heightfield.width,
            height = compact_heightfield.height,
            span_count = compact_heightfield.span_count(),
            run_count,
            "Encoded compact heightfield"
        );
        Ok(())
    }

    /// Encodes `compact_heightfield` into a new buffer.
    ///
    /// # Errors
    ///
    /// Returns [`CodecError::InvalidHeightfield`] if [`CompactHeightfield::validate`] fails.
    pub fn to_bytes(&self, compact_heightfield: &CompactHeightfield) -> Result<Vec<u8>, CodecError> {
        let mut bytes = Vec::with_capacity(Self::encoded_len(compact_heightfield));
        self.encode(compact_heightfield, &mut bytes)?;
        Ok(bytes)
    }

    /// The number of bytes [`CompactHeightfieldCodec::encode`] writes for `compact_heightfield`.
    pub fn encoded_len(compact_heightfield: &CompactHeightfield) -> usize {
        let run_count = area_runs(&compact_heightfield.areas).count();
        Self::HEADER_SIZE
            + compact_heightfield.cells.len() * 4
            + compact_heightfield.spans.len() * 8
            + run_count * 8
    }
}

fn is_sized_for(compact_heightfield: &CompactHeightfield, header: &CompactHeightfieldHeader) -> bool {
    compact_heightfield.header() == *header
        && compact_heightfield.cells.len() == header.column_count()
        && compact_heightfield.areas.len() == header.span_count as usize
}

fn read_cells<R: Read + ?Sized>(
    reader: &mut R,
    cells: &mut [CompactCell],
    span_count: usize,
) -> Result<(), CodecError> {
    let mut offset = 0_usize;
    for (column, cell) in cells.iter_mut().enumerate() {
        let count = reader.read_wire_i32("column span count")?;
        let count = to_u32("column span count", count)?;
        let end = offset + count as usize;
        if end > span_count {
            return Err(MalformedStreamError::ColumnSpansExceedSpanCount {
                column,
                end,
                span_count,
            }
            .into());
        }
        // `offset <= span_count`, which came from an i32
        cell.set_index(offset as u32);
        cell.set_count(count);
        offset = end;
    }
    if offset != span_count {
        return Err(MalformedStreamError::ColumnSpansBelowSpanCount {
            counted: offset,
            span_count,
        }
        .into());
    }
    Ok(())
}

fn write_cells<W: Write + ?Sized>(writer: &mut W, cells: &[CompactCell]) -> io::Result<()> {
    for cell in cells {
        // No count exceeds the validated span count
        writer.write_wire_i32(cell.count() as i32)?;
    }
    Ok(())
}

fn read_spans<R: Read + ?Sized>(
    reader: &mut R,
    spans: &mut [CompactSpan],
    cells: &[CompactCell],
) -> Result<(), CodecError> {
    for cell in cells {
        for span in &mut spans[cell.span_range()] {
            let y = reader.read_wire_u16("span y")?;
            let region = reader.read_wire_u16("span region")?;
            let packed = reader.read_wire_u32("span connections and height")?;
            let (connections, height) = CompactSpan::unpack_word(packed);
            *span = CompactSpan::new(y, RegionId(region), connections, height);
        }
    }
    Ok(())
}

fn write_spans<W: Write + ?Sized>(
    writer: &mut W,
    spans: &[CompactSpan],
    cells: &[CompactCell],
) -> io::Result<()> {
    for cell in cells {
        for span in &spans[cell.span_range()] {
            writer.write_wire_u16(span.y)?;
            writer.write_wire_u16(*span.region)?;
            writer.write_wire_u32(CompactSpan::pack_word(span.connections(), span.height()))?;
        }
    }
    Ok(())
}

fn read_areas<R: Read + ?Sized>(
    reader: &mut R,
    areas: &mut [AreaType],
    overrun: AreaOverrun,
) -> Result<(), CodecError> {
    let span_count = areas.len();
    let mut fill = RunLengthFill::new(areas);
    while !fill.is_complete() {
        let length = reader.read_wire_i32("area run length")?;
        let area = reader.read_wire_i32("area")?;
        if length <= 0 {
            return Err(MalformedStreamError::NonPositiveRunLength {
                length,
                filled: fill.filled(),
            }
            .into());
        }
        let excess = fill.push(AreaRun {
            length: length as usize,
            area: AreaType(area),
        });
        if excess == 0 {
            continue;
        }
        match overrun {
            AreaOverrun::Truncate => {
                tracing::warn!(
                    excess,
                    span_count,
                    "Last area run reaches past the final span, dropping the excess"
                );
            }
            AreaOverrun::Reject => {
                return Err(MalformedStreamError::AreaRunOverrun { excess, span_count }.into());
            }
        }
    }
    Ok(())
}

/// Returns the number of runs written.
fn write_areas<W: Write + ?Sized>(writer: &mut W, areas: &[AreaType]) -> io::Result<usize> {
    let mut run_count = 0;
    for run in area_runs(areas) {
        // A run is never longer than the span count, which fits an i32
        writer.write_wire_i32(run.length as i32)?;
        writer.write_wire_i32(*run.area)?;
        run_count += 1;
    }
    Ok(run_count)
}

fn to_u32(field: &'static str, value: i32) -> Result<u32, MalformedStreamError> {
    u32::try_from(value).map_err(|_| MalformedStreamError::NegativeValue { field, value })
}

/// Errors that can occur when encoding or decoding a [`CompactHeightfield`].
#[derive(Error, Debug)]
pub enum CodecError {
    /// The input ended before the snapshot was complete.
    #[error("Input ended early while reading the {field}")]
    TruncatedInput {
        /// The field that could not be read
        field: &'static str,
    },
    /// The snapshot contains values no valid heightfield can have.
    #[error("Malformed compact heightfield snapshot: {0}")]
    MalformedStream(#[from] MalformedStreamError),
    /// The heightfield to encode is inconsistent.
    #[error("Cannot encode compact heightfield: {0}")]
    InvalidHeightfield(#[from] LayoutError),
    /// The underlying reader or writer failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CodecError {
    pub(crate) fn from_read(err: io::Error, field: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            Self::TruncatedInput { field }
        } else {
            Self::Io(err)
        }
    }
}

/// The ways a snapshot can be structurally impossible.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedStreamError {
    /// A count or size is negative.
    #[error("The {field} must not be negative, but got {value}")]
    NegativeValue {
        /// The offending field
        field: &'static str,
        /// The value read
        value: i32,
    },
    /// The header declares more columns than configured.
    #[error("Column count {width}*{height} exceeds the limit of {max}")]
    TooManyColumns {
        /// The declared width
        width: u32,
        /// The declared height
        height: u32,
        /// [`CodecConfig::max_column_count`]
        max: usize,
    },
    /// The header declares more spans than configured.
    #[error("Span count {span_count} exceeds the limit of {max}")]
    TooManySpans {
        /// The declared span count
        span_count: u32,
        /// [`CodecConfig::max_span_count`]
        max: usize,
    },
    /// The column counts add up to more than the span count.
    #[error("Column {column} ends at span {end}, but there are only {span_count} spans")]
    ColumnSpansExceedSpanCount {
        /// The row-major index of the offending column
        column: usize,
        /// The running sum of counts including that column
        end: usize,
        /// The declared span count
        span_count: usize,
    },
    /// The column counts add up to less than the span count.
    #[error("Columns hold {counted} spans in total, but the header declares {span_count}")]
    ColumnSpansBelowSpanCount {
        /// The sum of all column counts
        counted: usize,
        /// The declared span count
        span_count: usize,
    },
    /// An area run has a length of zero or less.
    #[error("Area run after {filled} areas has non-positive length {length}")]
    NonPositiveRunLength {
        /// The length read
        length: i32,
        /// The number of areas decoded before the run
        filled: usize,
    },
    /// The area runs cover more spans than there are.
    #[error("Area runs cover {excess} more areas than the {span_count} spans")]
    AreaRunOverrun {
        /// The repetitions past the last span
        excess: usize,
        /// The declared span count
        span_count: usize,
    },
    /// Bytes follow the end of the snapshot.
    #[error("{remaining} bytes follow the end of the snapshot")]
    TrailingBytes {
        /// The number of unread bytes
        remaining: usize,
    },
}

impl CompactHeightfield {
    /// Reads a snapshot with the default [`CodecConfig`].
    ///
    /// # Errors
    ///
    /// See [`CompactHeightfieldCodec::decode`].
    pub fn read_from<R: Read + ?Sized>(reader: &mut R) -> Result<Self, CodecError> {
        CompactHeightfieldCodec::default().decode(reader)
    }

    /// Writes a snapshot of the heightfield.
    ///
    /// # Errors
    ///
    /// See [`CompactHeightfieldCodec::encode`].
    pub fn write_to<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), CodecError> {
        CompactHeightfieldCodec::default().encode(self, writer)
    }

    /// Encodes the heightfield into a new buffer.
    ///
    /// # Errors
    ///
    /// See [`CompactHeightfieldCodec::to_bytes`].
    pub fn to_bytes(&self) -> Result<Vec<u8>, CodecError> {
        CompactHeightfieldCodec::default().to_bytes(self)
    }

    /// Decodes a snapshot that must span the whole slice, with the default [`CodecConfig`].
    ///
    /// # Errors
    ///
    /// See [`CompactHeightfieldCodec::from_bytes`].
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CodecError> {
        CompactHeightfieldCodec::default().from_bytes(bytes)
    }
}
