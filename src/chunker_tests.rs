use super::*;
use float_eq::assert_float_eq;

#[test]
fn construction() {
    let chunker = Chunker::new(85, 12).expect("chunker");
    assert_eq!(chunker.num_stripes(), 85);
    assert_eq!(chunker.num_sub_stripes_per_stripe(), 12);

    assert!(Chunker::new(0, 12).is_err());
    assert!(Chunker::new(85, 0).is_err());
    assert!(Chunker::new(-1, 12).is_err());
}

#[test]
fn comparison() {
    let c = Chunker::new(85, 12).expect("chunker");
    assert_eq!(c, Chunker::new(85, 12).expect("chunker"));
    assert_ne!(c, Chunker::new(85, 10).expect("chunker"));
}

#[test]
fn intersecting() {
    let b = Region::Box(LonLatBox::from_degrees(
        273.6,
        30.7,
        273.7180105379097,
        30.722546655347717,
    ));
    let c = Chunker::new(85, 12).expect("chunker");

    assert_eq!(c.get_chunks_intersecting(&b), vec![9630, 9631, 9797]);
    assert_eq!(
        c.get_sub_chunks_intersecting(&b),
        vec![
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
fn chunk_ids_round_trip() {
    let c = Chunker::new(200, 5).expect("chunker");
    let chunk_id = 3645;
    let stripe = c.get_stripe(chunk_id);
    let chunk = c.get_chunk(chunk_id, stripe);

    assert_eq!(stripe, 9);
    assert_eq!(chunk, 45);
}

#[test]
fn chunk_bounding_boxes() {
    let c = Chunker::new(200, 5).expect("chunker");
    let bbox = c.get_chunk_bounding_box(9, 45);
    let expected = LonLatBox::from_radians(
        5.048988193233824,
        -1.4294246573883558,
        5.1611879309330035,
        -1.413716694110407,
    );
    assert_box_eq(&bbox, &expected);

    let sbbox = c.get_sub_chunk_bounding_box(0, 0);
    let expected = LonLatBox::from_radians(
        0.0,
        -1.5707963267948966,
        TWO_PI,
        -1.5676547341363067,
    );
    assert_box_eq(&sbbox, &expected);
}

fn assert_box_eq(a: &LonLatBox, b: &LonLatBox) {
    assert_eq!(a.get_lon().is_full(), b.get_lon().is_full());
    if !a.get_lon().is_full() {
        assert_float_eq!(
            a.get_lon().get_a().as_radians(),
            b.get_lon().get_a().as_radians(),
            abs <= 1e-12
        );
        assert_float_eq!(
            a.get_lon().get_b().as_radians(),
            b.get_lon().get_b().as_radians(),
            abs <= 1e-12
        );
    }
    assert_float_eq!(
        a.get_lat().get_a().as_radians(),
        b.get_lat().get_a().as_radians(),
        abs <= 1e-12
    );
    assert_float_eq!(
        a.get_lat().get_b().as_radians(),
        b.get_lat().get_b().as_radians(),
        abs <= 1e-12
    );
}

#[test]
fn all_chunks_cover_their_boxes() {
    let c = Chunker::new(10, 3).expect("chunker");
    let all = c.get_all_chunks();

    // Chunk ids grow with the stripe and stay in range.
    for w in all.windows(2) {
        assert!(w[0] < w[1], "ascending ids");
    }
    for &chunk_id in &all {
        let stripe = c.get_stripe(chunk_id);
        let chunk = c.get_chunk(chunk_id, stripe);
        assert!((0..10).contains(&stripe));
        let bbox = c.get_chunk_bounding_box(stripe, chunk);
        let found = c.get_chunks_intersecting(&Region::Box(bbox));
        assert!(found.contains(&chunk_id), "chunk {chunk_id} finds itself");
    }
}

#[test]
fn sub_chunks_cover_their_chunk() {
    let c = Chunker::new(10, 3).expect("chunker");
    // Whole-chunk queries return every sub-chunk of the chunk.
    let stripe = 4;
    let chunk = 2;
    let chunk_id = stripe * 2 * 10 + chunk;
    let bbox = c.get_chunk_bounding_box(stripe, chunk);
    let sub = c.get_sub_chunks_intersecting(&Region::Box(bbox));
    let own: Vec<_> = sub
        .iter()
        .filter(|s| s.chunk_id == chunk_id)
        .collect();
    assert_eq!(own.len(), 1);
    assert_eq!(own[0].sub_chunk_ids, c.get_all_sub_chunk_ids(chunk_id));
}

#[test]
fn polar_stripes_have_one_chunk() {
    let c = Chunker::new(10, 3).expect("chunker");
    let bbox = c.get_chunk_bounding_box(0, 0);
    assert!(bbox.get_lon().is_full(), "polar chunk spans all longitudes");
    let bbox = c.get_chunk_bounding_box(9, 0);
    assert!(bbox.get_lon().is_full());
}

#[test]
fn display() {
    let chunker = Chunker::new(85, 12).expect("chunker");
    assert_eq!(chunker.to_string(), "Chunker(85, 12)");
}
