//! Compress a compact heightfield snapshot and restore it.

use rerecast_codec::{
    Aabb3d, AreaType, CompactHeightfield, CompactHeightfieldHeader, CompactSpan, RegionId,
};
use rerecast_compression::{
    CompressionLevel, compress_block, compress_frame, decompress_block, decompress_frame,
};

/// A flat 32x32 floor with one span per column and a ledge in every other row.
fn floor() -> CompactHeightfield {
    let width = 32_u32;
    let height = 32_u32;
    let mut compact_heightfield = CompactHeightfield::new(&CompactHeightfieldHeader {
        width,
        height,
        span_count: width * height + width * (height / 2),
        walkable_height: 10,
        walkable_climb: 4,
        aabb: Aabb3d::new([0.0, 0.0, 0.0], [9.6, 3.0, 9.6]),
        cell_size: 0.3,
        cell_height: 0.2,
    });
    for z in 0..height {
        for x in 0..width {
            let count = if z % 2 == 0 { 2 } else { 1 };
            compact_heightfield.cell_at_mut(x, z).set_count(count);
        }
    }
    compact_heightfield.rebuild_cell_indices();

    for (i, span) in compact_heightfield.spans.iter_mut().enumerate() {
        *span = CompactSpan::new(4 + (i % 2) as u16 * 8, RegionId(1), 0, 6);
    }
    compact_heightfield.areas.fill(AreaType::WALKABLE);
    compact_heightfield
}

#[test]
fn frame_compressed_snapshot_round_trips() {
    let compact_heightfield = floor();
    let bytes = compact_heightfield.to_bytes().unwrap();

    let compressed = compress_frame(&bytes, CompressionLevel::Optimal).unwrap();
    assert!(
        compressed.len() < bytes.len(),
        "{} compressed bytes for {} snapshot bytes",
        compressed.len(),
        bytes.len()
    );

    let restored = CompactHeightfield::from_bytes(&decompress_frame(&compressed).unwrap()).unwrap();
    assert_eq!(restored, compact_heightfield);
}

#[test]
fn block_compressed_snapshot_round_trips() {
    let compact_heightfield = floor();
    let bytes = compact_heightfield.to_bytes().unwrap();

    let compressed = compress_block(&bytes, CompressionLevel::Fastest).unwrap();
    let mut decompressed = vec![0; bytes.len()];
    let len = decompress_block(&compressed, &mut decompressed).unwrap();
    assert_eq!(len, bytes.len());

    let restored = CompactHeightfield::from_bytes(&decompressed).unwrap();
    assert_eq!(restored, compact_heightfield);
}

#[test]
fn uniform_areas_collapse_to_one_run() {
    let compact_heightfield = floor();
    let bytes = compact_heightfield.to_bytes().unwrap();
    let cells = compact_heightfield.cells.len();
    let spans = compact_heightfield.span_count();
    assert_eq!(bytes.len(), 52 + cells * 4 + spans * 8 + 8);
}
