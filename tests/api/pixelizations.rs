use rand::{rngs::StdRng, Rng, SeedableRng};
use skygeom::{
    Angle, Circle, HealpixPixelization, HtmPixelization, LonLat,
    Mq3cPixelization, Pixelization, Q3cPixelization, Region, Relationship,
    UnitVector3d,
};

fn random_points(seed: u64, count: usize) -> Vec<UnitVector3d> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let lon = rng.gen_range(0.0..360.0);
            let lat = rng.gen_range(-89.9..89.9);
            UnitVector3d::from(
                &LonLat::from_degrees(lon, lat).expect("lonlat"),
            )
        })
        .collect()
}

fn check_pixel_round_trip(pixelization: &dyn Pixelization, seed: u64) {
    for (i, v) in random_points(seed, 64).iter().enumerate() {
        let index = pixelization.index(v);
        assert!(pixelization.universe().contains(index), "point {i}");
        let pixel = pixelization.pixel(index).expect("pixel");
        assert!(pixel.contains(v), "pixel contains its point ({i})");
    }
}

#[test]
fn pixels_contain_their_points() {
    check_pixel_round_trip(&HtmPixelization::new(8).expect("htm"), 1);
    check_pixel_round_trip(&Q3cPixelization::new(8).expect("q3c"), 2);
    check_pixel_round_trip(&Mq3cPixelization::new(8).expect("mq3c"), 3);
}

#[test]
fn healpix_pixels_round_trip_through_their_centers() {
    // HEALPix cell edges are not great circles, so the polygon returned
    // by pixel() only approximates the cell; its centroid is safely
    // interior, which makes the index round trip exact.
    let h = HealpixPixelization::new(8).expect("healpix");
    for (i, v) in random_points(4, 64).iter().enumerate() {
        let index = h.index(v);
        assert!(h.universe().contains(index), "point {i}");
        let pixel = h.pixel(index).expect("pixel");
        let skygeom::Region::Polygon(p) = &pixel else {
            panic!("HEALPix pixels are polygons");
        };
        assert_eq!(h.index(p.centroid()), index, "centroid round trip {i}");
        assert!(pixel.contains(p.centroid()));
    }
}

fn check_envelope_interior(pixelization: &dyn Pixelization) {
    let region = Region::Circle(Circle::from_angle(
        UnitVector3d::from(
            &LonLat::from_degrees(123.4, -42.0).expect("lonlat"),
        ),
        Angle::from_degrees(8.),
    ));
    let envelope = pixelization.envelope(&region, 0).expect("envelope");
    let interior = pixelization.interior(&region, 0).expect("interior");

    assert!(interior.is_within(&envelope), "interior ⊆ envelope");
    assert!(envelope.is_within(&pixelization.universe()));

    // Every pixel of the interior is inside the region, every pixel
    // intersecting the region is in the envelope.
    for (begin, end) in interior.iter() {
        for index in begin..end {
            let pixel = pixelization.pixel(index).expect("pixel");
            assert!(
                region.relate(&pixel).contains(Relationship::CONTAINS),
                "interior pixel {index} is inside the region"
            );
        }
    }
    for v in random_points(987, 256) {
        if region.contains(&v) {
            let index = pixelization.index(&v);
            assert!(
                envelope.contains(index),
                "envelope misses pixel {index} of a region point"
            );
        }
    }
}

#[test]
fn envelope_and_interior_bracket_the_region() {
    check_envelope_interior(&HtmPixelization::new(5).expect("htm"));
    check_envelope_interior(&Q3cPixelization::new(5).expect("q3c"));
    check_envelope_interior(&Mq3cPixelization::new(5).expect("mq3c"));
    check_envelope_interior(&HealpixPixelization::new(5).expect("healpix"));
}

#[test]
fn envelope_honors_max_ranges() {
    let h = HtmPixelization::new(6).expect("htm");
    let region = Region::Circle(Circle::from_angle(
        UnitVector3d::from(&LonLat::from_degrees(0., 0.).expect("lonlat")),
        Angle::from_degrees(20.),
    ));
    let unbounded = h.envelope(&region, 0).expect("envelope");
    let bounded = h.envelope(&region, 3).expect("envelope");
    assert!(bounded.num_ranges() <= 3);
    assert!(unbounded.is_within(&bounded), "simplification only grows");
}

#[test]
fn healpix_refuses_bounded_queries() {
    let h = HealpixPixelization::new(5).expect("healpix");
    let region = Region::Circle(Circle::from_angle(
        UnitVector3d::X,
        Angle::from_degrees(1.),
    ));
    assert!(h.envelope(&region, 1).is_err());
    assert!(h.interior(&region, 1).is_err());
    assert!(h.envelope(&region, 0).is_ok());
}

#[test]
fn healpix_labels_are_decimal() {
    let h = HealpixPixelization::new(2).expect("healpix");
    assert_eq!(h.label(11).expect("label"), "11");
    assert!(h.label(12 * 16).is_err(), "out of range");
    assert_eq!(h.universe().cardinality(), 12 * 16);
}

#[test]
fn level_validation() {
    assert!(HtmPixelization::new(25).is_err());
    assert!(Q3cPixelization::new(31).is_err());
    assert!(Mq3cPixelization::new(31).is_err());
    assert!(HealpixPixelization::new(18).is_err());
}

#[test]
fn distinct_schemes_disagree_on_labels() {
    // Same vector, three different index spaces.
    let v = UnitVector3d::new(0.5, -0.5, 1.0).expect("v");
    let htm = HtmPixelization::new(1).expect("htm");
    let q3c = Q3cPixelization::new(1).expect("q3c");
    let mq3c = Mq3cPixelization::new(1).expect("mq3c");

    assert_eq!(q3c.index(&v), 0);
    assert_eq!(mq3c.index(&v), 53);
    let h = htm.index(&v);
    assert!(htm.label(h).expect("label").starts_with('N'));
    assert_eq!(mq3c.label(53).expect("label"), "+Z1");
}
