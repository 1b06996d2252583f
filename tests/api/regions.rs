use rand::{rngs::StdRng, Rng, SeedableRng};
use skygeom::{
    Angle, Circle, ConvexPolygon, Ellipse, LonLat, LonLatBox, Region,
    Relationship, UnionRegion, UnitVector3d,
};

fn point(lon: f64, lat: f64) -> UnitVector3d {
    UnitVector3d::from(&LonLat::from_degrees(lon, lat).expect("lonlat"))
}

#[test]
fn contains_matches_relate_for_points() {
    // A point region is a tiny circle; containment of its center must
    // agree with the CONTAINS bit of relate.
    let regions = [
        Region::Circle(Circle::from_angle(
            point(44., 45.),
            Angle::from_degrees(3.),
        )),
        Region::Box(LonLatBox::from_degrees(40., 40., 50., 50.)),
        Region::Polygon(
            ConvexPolygon::convex_hull(&[
                point(40., 40.),
                point(50., 40.),
                point(45., 50.),
            ])
            .expect("polygon"),
        ),
        Region::Ellipse(Ellipse::from_axes(
            point(45., 45.),
            Angle::from_degrees(6.),
            Angle::from_degrees(3.),
            Angle::new(0.),
        )),
    ];
    let mut rng = StdRng::seed_from_u64(20240801);
    for region in &regions {
        for _ in 0..200 {
            let lon = rng.gen_range(0.0..360.0);
            let lat = rng.gen_range(-90.0..90.0);
            let v = point(lon, lat);
            let probe = Region::Circle(Circle::from_point(v));
            let contains = region.contains(&v);
            let relation = region.relate(&probe);
            assert_eq!(
                contains,
                relation.contains(Relationship::CONTAINS),
                "contains vs relate at ({lon}, {lat})"
            );
            if !contains {
                assert!(
                    relation.contains(Relationship::DISJOINT),
                    "a point is either contained or disjoint"
                );
            }
        }
    }
}

#[test]
fn vectorized_contains_matches_scalar() {
    let mut rng = StdRng::seed_from_u64(7);
    let region = Region::Polygon(
        ConvexPolygon::convex_hull(&[
            point(10., 10.),
            point(40., 15.),
            point(30., 40.),
        ])
        .expect("polygon"),
    );
    let ellipse = Region::Ellipse(Ellipse::from_axes(
        point(20., 20.),
        Angle::from_degrees(10.),
        Angle::from_degrees(4.),
        Angle::from_degrees(30.),
    ));
    for region in [&region, &ellipse] {
        let xs: Vec<f64> = (0..64).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let ys: Vec<f64> = (0..64).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let zs: Vec<f64> = (0..64).map(|_| rng.gen_range(-1.0..1.0)).collect();
        let flags = region.contains_coords(&xs, &ys, &zs);
        let lons: Vec<f64> =
            xs.iter().zip(&ys).map(|(x, y)| y.atan2(*x)).collect();
        let lats: Vec<f64> = xs
            .iter()
            .zip(&ys)
            .zip(&zs)
            .map(|((x, y), z)| z.atan2(x.hypot(*y)))
            .collect();
        let lonlat_flags = region.contains_lonlats(&lons, &lats);
        for i in 0..64 {
            let v = UnitVector3d::new(xs[i], ys[i], zs[i]).expect("v");
            assert_eq!(flags[i], region.contains(&v), "xyz slice {i}");
            assert_eq!(lonlat_flags[i], region.contains(&v), "lonlat slice {i}");
        }
    }
}

#[test]
fn containment_implies_relate_bits() {
    let big = Region::Circle(Circle::from_angle(
        point(45., 45.),
        Angle::from_degrees(30.),
    ));
    let small = Region::Box(LonLatBox::from_degrees(40., 40., 50., 50.));

    let r = big.relate(&small);
    assert!(r.contains(Relationship::CONTAINS));
    assert!(!r.contains(Relationship::DISJOINT));
    assert_eq!(small.relate(&big), r.invert());
    assert_eq!(big.overlaps(&small), Some(true));
}

#[test]
fn encode_decode_is_identity() {
    let regions = [
        Region::Circle(Circle::from_angle(
            point(200., -50.),
            Angle::from_degrees(2.),
        )),
        Region::Box(LonLatBox::from_degrees(350., -10., 10., 10.)),
        Region::Polygon(
            ConvexPolygon::convex_hull(&[
                point(40., 40.),
                point(50., 40.),
                point(45., 50.),
            ])
            .expect("polygon"),
        ),
        Region::Ellipse(Ellipse::new(
            point(10., 10.),
            point(12., 10.),
            Angle::from_degrees(3.),
        )),
        Region::Union(UnionRegion::new(vec![
            Region::Circle(Circle::from_angle(
                point(0., 0.),
                Angle::from_degrees(1.),
            )),
            Region::Box(LonLatBox::from_degrees(10., 10., 20., 20.)),
        ])),
    ];
    for region in regions {
        assert_eq!(
            Region::decode(&region.encode()).expect("decode"),
            region
        );
    }
}

#[test]
fn bounds_nest() {
    // region ⊆ bounding circle and region ⊆ bounding box, checked via
    // relate.
    let regions = [
        Region::Circle(Circle::from_angle(
            point(75., 30.),
            Angle::from_degrees(10.),
        )),
        Region::Polygon(
            ConvexPolygon::convex_hull(&[
                point(100., -20.),
                point(140., -25.),
                point(120., 10.),
            ])
            .expect("polygon"),
        ),
        Region::Box(LonLatBox::from_degrees(300., 60., 60., 80.)),
    ];
    for region in &regions {
        let circle = Region::Circle(region.bounding_circle());
        assert!(
            circle.relate(region).contains(Relationship::CONTAINS),
            "bounding circle contains its region"
        );
        let bbox = Region::Box(region.bounding_box());
        assert!(
            !bbox.relate(region).contains(Relationship::DISJOINT),
            "bounding box is not disjoint from its region"
        );
    }
}

#[test]
fn ivoa_round_trip() {
    let region = Region::from_ivoa_pos("CIRCLE 12 34 5").expect("parse");
    assert!(region.contains(&point(13., 33.)));
    assert!(!region.contains(&point(12., 40.)));
    let pos = region.to_ivoa_pos().expect("format");
    let again = Region::from_ivoa_pos(&pos).expect("reparse");
    assert!(again.contains(&point(13., 33.)));
    assert!(!again.contains(&point(12., 40.)));
}

#[test]
fn hull_contains_inputs() {
    let mut rng = StdRng::seed_from_u64(99);
    for round in 0..20 {
        let lon0: f64 = rng.gen_range(0.0..360.0);
        let lat0: f64 = rng.gen_range(-60.0..60.0);
        let points: Vec<UnitVector3d> = (0..8)
            .map(|_| {
                point(
                    lon0 + rng.gen_range(-20.0..20.0),
                    (lat0 + rng.gen_range(-15.0..15.0)).clamp(-89.0, 89.0),
                )
            })
            .collect();
        let Ok(hull) = ConvexPolygon::convex_hull(&points) else {
            // Degenerate draws are legal; nothing to check.
            continue;
        };
        for (i, p) in points.iter().enumerate() {
            assert!(hull.contains(p), "round {round}, point {i}");
        }
    }
}
