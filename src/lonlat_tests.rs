use super::*;
use crate::UnitVector3d;
use float_eq::assert_float_eq;

#[test]
fn construction() {
    let p = LonLat::from_degrees(45., 45.).expect("lonlat");

    assert_eq!(
        p,
        LonLat::new(
            NormalizedAngle::from_degrees(45.),
            Angle::from_degrees(45.)
        )
    );

    assert!(LonLat::from_degrees(f64::NAN, 0.).is_err());
    assert!(LonLat::from_degrees(0., f64::INFINITY).is_err());
}

#[test]
fn latitude_clamping() {
    let p = LonLat::new(NormalizedAngle::default(), Angle::from_degrees(91.));

    assert_float_eq!(p.lat().as_degrees(), 90.0, abs <= 1e-13);
}

#[test]
fn vector_round_trip() {
    let p = LonLat::from_degrees(45., 45.).expect("lonlat");
    let u = UnitVector3d::from(&p);
    let q = LonLat::from(&u);

    assert_float_eq!(
        p.lon().as_radians(),
        q.lon().as_radians(),
        abs <= 1e-13
    );
    assert_float_eq!(
        p.lat().as_radians(),
        q.lat().as_radians(),
        abs <= 1e-13
    );
    assert_float_eq!(
        p.lon().as_radians(),
        LonLat::longitude_of(u.as_vector3d()).as_radians(),
        abs <= 1e-13
    );
    assert_float_eq!(
        p.lat().as_radians(),
        LonLat::latitude_of(u.as_vector3d()).as_radians(),
        abs <= 1e-13
    );
}

#[test]
fn poles_have_zero_longitude() {
    let north = LonLat::from(&UnitVector3d::Z);
    let south = LonLat::from(&-UnitVector3d::Z);

    assert_eq!(north.lon(), NormalizedAngle::default());
    assert_eq!(south.lon(), NormalizedAngle::default());
    assert_float_eq!(north.lat().as_degrees(), 90.0, abs <= 1e-13);
    assert_float_eq!(south.lat().as_degrees(), -90.0, abs <= 1e-13);
}

#[test]
fn comparison() {
    assert_eq!(
        LonLat::from_degrees(45., 45.).expect("lonlat"),
        LonLat::from_degrees(45., 45.).expect("lonlat")
    );
    assert_ne!(
        LonLat::from_degrees(0., 0.).expect("lonlat"),
        LonLat::from_degrees(45., 45.).expect("lonlat")
    );
}
