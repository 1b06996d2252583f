use super::*;
use float_eq::assert_float_eq;

#[test]
fn vector_construction() {
    let v = Vector3d::new(1., 2., 3.);

    assert_eq!(v.x, 1.);
    assert_eq!(v.y, 2.);
    assert_eq!(v.z, 3.);
    assert_eq!(v, Vector3d::new(1., 2., 3.));
    assert_ne!(v, Vector3d::new(1., 2., 4.));
}

#[test]
fn vector_is_zero() {
    assert!(Vector3d::new(0., 0., 0.).is_zero());
    assert!(!Vector3d::new(0., 0., 1.).is_zero());
}

#[test]
fn vector_norms() {
    let mut v = Vector3d::new(0., 2., 0.);

    assert_eq!(v.squared_norm(), 4.);
    assert_eq!(v.norm(), 2.);
    assert_eq!(v.normalize(), 2.);
    assert!(v.is_normalized());
    assert_eq!(v, Vector3d::new(0., 1., 0.));
}

#[test]
fn vector_products() {
    let x = Vector3d::new(1., 0., 0.);
    let y = Vector3d::new(0., 1., 0.);

    assert_eq!(x.dot(&y), 0.);
    assert_eq!(x.cross(&y), Vector3d::new(0., 0., 1.));
    assert_eq!(
        Vector3d::new(1., 1., 1.).cwise_product(&Vector3d::new(2., 3., 4.)),
        Vector3d::new(2., 3., 4.)
    );
}

#[test]
fn vector_arithmetic() {
    let ones = Vector3d::new(1., 1., 1.);

    assert_eq!(-ones, Vector3d::new(-1., -1., -1.));
    assert_eq!(ones * 2., Vector3d::new(2., 2., 2.));
    assert_eq!(Vector3d::new(2., 2., 2.) / 2., ones);
    assert_eq!(ones + ones, Vector3d::new(2., 2., 2.));
    assert_eq!(ones - ones, Vector3d::default());

    let mut v = ones;
    v += Vector3d::new(3., 3., 3.);
    v -= Vector3d::new(2., 2., 2.);
    v *= 2.0;
    v /= 4.0;
    assert_eq!(v, ones);
}

#[test]
fn vector_rotation() {
    let v = Vector3d::new(0., 1., 0.)
        .rotated_around(&UnitVector3d::X, Angle::new(std::f64::consts::FRAC_PI_2));

    assert_float_eq!(v.x, 0.0, abs <= 1e-15);
    assert_float_eq!(v.y, 0.0, abs <= 1e-15);
    assert_float_eq!(v.z, 1.0, abs <= 1e-15);
}

#[test]
fn unit_construction() {
    let u = UnitVector3d::new(1., 1., 1.).expect("unit vector");
    let expected = 3.0_f64.sqrt() / 3.0;

    assert_float_eq!(u.x(), expected, abs <= 1e-15);
    assert_float_eq!(u.y(), expected, abs <= 1e-15);
    assert_float_eq!(u.z(), expected, abs <= 1e-15);
    assert_eq!(
        u,
        UnitVector3d::from_vector3d(&Vector3d::new(1., 1., 1.))
            .expect("unit vector")
    );

    assert!(UnitVector3d::new(0., 0., 0.).is_err(), "zero norm");
    assert!(UnitVector3d::new(f64::NAN, 0., 0.).is_err(), "NaN component");
}

#[test]
fn unit_from_lon_lat() {
    let u = UnitVector3d::from_lon_lat(
        Angle::from_degrees(45.),
        Angle::from_degrees(45.),
    );

    assert_float_eq!(u.x(), 0.5, abs <= 1e-15);
    assert_float_eq!(u.y(), 0.5, abs <= 1e-15);
    assert_float_eq!(u.z(), 0.5 * 2.0_f64.sqrt(), abs <= 1e-15);
}

#[test]
fn unit_orthogonal_to() {
    let v = Vector3d::new(1., 1., 1.);
    let u = UnitVector3d::orthogonal_to(&v).expect("orthogonal");

    assert_float_eq!(u.as_vector3d().dot(&v), 0.0, abs <= 1e-15);
    assert!(UnitVector3d::orthogonal_to(&Vector3d::default()).is_err());
}

#[test]
fn unit_north_from() {
    let u = UnitVector3d::from_lon_lat(
        Angle::from_degrees(45.),
        Angle::from_degrees(45.),
    );
    let n = UnitVector3d::north_from(u.as_vector3d());
    let expected = UnitVector3d::from_lon_lat(
        Angle::from_degrees(225.),
        Angle::from_degrees(45.),
    );

    assert_float_eq!(n.x(), expected.x(), abs <= 1e-15);
    assert_float_eq!(n.y(), expected.y(), abs <= 1e-15);
    assert_float_eq!(n.z(), expected.z(), abs <= 1e-15);

    // Poles fall back to a deterministic direction.
    assert_eq!(
        UnitVector3d::north_from(UnitVector3d::Z.as_vector3d()),
        -UnitVector3d::X
    );
    assert_eq!(
        UnitVector3d::north_from((-UnitVector3d::Z).as_vector3d()),
        UnitVector3d::X
    );
}

#[test]
fn unit_products() {
    assert_eq!(UnitVector3d::X.dot(&UnitVector3d::Z), 0.);
    assert_eq!(
        UnitVector3d::X.cross(&UnitVector3d::Y),
        Vector3d::new(0., 0., 1.)
    );
    assert_eq!(
        UnitVector3d::X.robust_cross(&UnitVector3d::Y),
        Vector3d::new(0., 0., 2.)
    );
}

#[test]
fn unit_arithmetic() {
    assert_eq!(
        -UnitVector3d::X,
        UnitVector3d::new(-1., 0., 0.).expect("unit vector")
    );
    assert_eq!(UnitVector3d::X - UnitVector3d::X, Vector3d::default());
    assert_eq!(
        UnitVector3d::X + UnitVector3d::new(1., 0., 0.).expect("unit vector"),
        UnitVector3d::X * 2.
    );
    assert_eq!(
        UnitVector3d::Y - Vector3d::new(0., 0.5, 0.),
        UnitVector3d::Y / 2.
    );
    assert_eq!(
        UnitVector3d::Z.cwise_product(&Vector3d::new(2., 3., 4.)),
        Vector3d::new(0., 0., 4.)
    );
}

#[test]
fn unit_rotation() {
    let v = UnitVector3d::Y.rotated_around(
        &UnitVector3d::X,
        Angle::new(0.5 * std::f64::consts::PI),
    );

    assert_float_eq!(v.x(), 0.0, abs <= 1e-15);
    assert_float_eq!(v.y(), 0.0, abs <= 1e-15);
    assert_float_eq!(v.z(), 1.0, abs <= 1e-15);
}
