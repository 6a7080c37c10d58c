//! Property tests: decoding an encoded heightfield reproduces it exactly.

use proptest::{collection::vec, prelude::*};
use rerecast_codec::{
    Aabb3d, AreaType, CompactCell, CompactHeightfield, CompactHeightfieldCodec, CompactSpan,
    RegionId,
    run_length::{RunLengthFill, area_runs},
};

/// Mostly a handful of distinct values, so that runs actually form, plus arbitrary ids.
fn area() -> impl Strategy<Value = i32> {
    prop_oneof![4 => -1_i32..3, 1 => any::<i32>()]
}

/// Mostly short columns, sometimes one taller than a `u8` can count.
fn column_count() -> impl Strategy<Value = u32> {
    prop_oneof![19 => 0_u32..4, 1 => 250_u32..300]
}

fn compact_heightfield() -> impl Strategy<Value = CompactHeightfield> {
    (0_u32..7, 0_u32..7)
        .prop_flat_map(|(width, height)| {
            let columns = width as usize * height as usize;
            (Just(width), Just(height), vec(column_count(), columns))
        })
        .prop_flat_map(|(width, height, counts)| {
            let span_count = counts.iter().map(|&count| count as usize).sum::<usize>();
            (
                Just(width),
                Just(height),
                Just(counts),
                vec(
                    (
                        any::<u16>(),
                        any::<u16>(),
                        0_u32..=CompactSpan::CONNECTION_MASK,
                        any::<u8>(),
                    ),
                    span_count,
                ),
                vec(area(), span_count),
                (any::<i32>(), any::<i32>()),
                prop::array::uniform3(-1000.0_f32..1000.0),
                prop::array::uniform3(-1000.0_f32..1000.0),
                (0.01_f32..10.0, 0.01_f32..10.0),
            )
        })
        .prop_map(
            |(width, height, counts, spans, areas, walkable, min, max, cell)| {
                let mut compact_heightfield = CompactHeightfield {
                    width,
                    height,
                    walkable_height: walkable.0,
                    walkable_climb: walkable.1,
                    aabb: Aabb3d::new(min, max),
                    cell_size: cell.0,
                    cell_height: cell.1,
                    cells: Vec::new(),
                    spans: spans
                        .into_iter()
                        .map(|(y, region, connections, height)| {
                            CompactSpan::new(y, RegionId(region), connections, height)
                        })
                        .collect(),
                    areas: areas.into_iter().map(AreaType).collect(),
                };
                compact_heightfield.cells = counts
                    .into_iter()
                    .map(|count| CompactCell::new(0, count))
                    .collect();
                compact_heightfield.rebuild_cell_indices();
                compact_heightfield
            },
        )
}

proptest! {
    #[test]
    fn decode_inverts_encode(compact_heightfield in compact_heightfield()) {
        let bytes = compact_heightfield.to_bytes().unwrap();
        prop_assert_eq!(
            bytes.len(),
            CompactHeightfieldCodec::encoded_len(&compact_heightfield)
        );

        let decoded = CompactHeightfield::from_bytes(&bytes).unwrap();
        let mut offset = 0;
        for cell in &decoded.cells {
            prop_assert_eq!(cell.index(), offset);
            offset += cell.count();
        }
        prop_assert_eq!(decoded, compact_heightfield);
    }

    #[test]
    fn area_runs_refill_the_same_areas(values in vec(area(), 0..200)) {
        let areas: Vec<AreaType> = values.into_iter().map(AreaType).collect();
        let mut refilled = vec![AreaType::NOT_WALKABLE; areas.len()];
        let mut fill = RunLengthFill::new(&mut refilled);
        for run in area_runs(&areas) {
            prop_assert!(run.length > 0);
            prop_assert_eq!(fill.push(run), 0);
        }
        prop_assert!(fill.is_complete());
        prop_assert_eq!(refilled, areas);
    }

    #[test]
    fn packed_words_round_trip(connections in 0_u32..=CompactSpan::CONNECTION_MASK, height in any::<u8>()) {
        let word = CompactSpan::pack_word(connections, height);
        prop_assert_eq!(CompactSpan::unpack_word(word), (connections, height));
    }
}
