use skygeom::{Angle, Chunker, Circle, LonLat, LonLatBox, Region, SubChunks, UnitVector3d};

#[test]
fn reference_partitioning() {
    let chunker = Chunker::new(85, 12).expect("chunker");
    let bbox = Region::Box(LonLatBox::from_degrees(
        273.6,
        30.7,
        273.7180105379097,
        30.722546655347717,
    ));

    assert_eq!(chunker.get_chunks_intersecting(&bbox), [9630, 9631, 9797]);
    assert_eq!(
        chunker.get_sub_chunks_intersecting(&bbox),
        [
            SubChunks {
                chunk_id: 9630,
                sub_chunk_ids: vec![770],
            },
            SubChunks {
                chunk_id: 9631,
                sub_chunk_ids: vec![759],
            },
            SubChunks {
                chunk_id: 9797,
                sub_chunk_ids: vec![11],
            },
        ]
    );
}

#[test]
fn circle_queries_cover_their_points() {
    let chunker = Chunker::new(85, 12).expect("chunker");
    let center = LonLat::from_degrees(273.65, 30.71).expect("center");
    let region = Region::Circle(Circle::from_angle(
        UnitVector3d::from(&center),
        Angle::from_degrees(0.5),
    ));
    let chunks = chunker.get_chunks_intersecting(&region);
    assert!(!chunks.is_empty());

    // The chunk holding the circle center is always reported.
    let containing: Vec<i32> = chunks
        .iter()
        .copied()
        .filter(|&id| {
            let stripe = chunker.get_stripe(id);
            let chunk = chunker.get_chunk(id, stripe);
            chunker
                .get_chunk_bounding_box(stripe, chunk)
                .contains(&center)
        })
        .collect();
    assert!(!containing.is_empty());
}

#[test]
fn full_sky_query_returns_everything() {
    let chunker = Chunker::new(18, 4).expect("chunker");
    let everything = Region::Box(LonLatBox::full());
    assert_eq!(
        chunker.get_chunks_intersecting(&everything),
        chunker.get_all_chunks()
    );
}
