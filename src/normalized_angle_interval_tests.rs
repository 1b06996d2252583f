use super::*;
use float_eq::assert_float_eq;

#[test]
fn construction() {
    let i = NormalizedAngleInterval::point(NormalizedAngle::from_radians(1.));
    assert_eq!(i.get_a(), i.get_b());
    assert_eq!(i.get_a().as_radians(), 1.);

    assert_eq!(
        NormalizedAngleInterval::new(
            NormalizedAngle::from_radians(1.),
            NormalizedAngle::from_radians(2.)
        ),
        NormalizedAngleInterval::from_radians(1., 2.)
    );
    assert!(NormalizedAngleInterval::empty().is_empty());
    assert!(NormalizedAngleInterval::full().is_full());
    assert!(
        NormalizedAngleInterval::from_radians(0., TWO_PI).is_full(),
        "full turn saturates"
    );
}

#[test]
fn center_and_size() {
    let i = NormalizedAngleInterval::from_radians(1., 2.);
    assert_eq!(i.get_size(), Angle::new(1.));
    assert_eq!(i.get_center().as_radians(), 1.5);

    let wrapped = NormalizedAngleInterval::from_radians(TWO_PI - 1., 1.);
    assert_float_eq!(wrapped.get_size().as_radians(), 2.0, abs <= 1e-15);
    assert_float_eq!(
        NormalizedAngle::between(
            wrapped.get_center(),
            NormalizedAngle::default()
        )
        .as_radians(),
        0.0,
        abs <= 1e-14,
        "center sits on the wrap point"
    );

    assert_eq!(
        NormalizedAngleInterval::full().get_size().as_radians(),
        TWO_PI
    );
}

#[test]
fn wrap_membership() {
    let i = NormalizedAngleInterval::from_radians(TWO_PI - 1., 1.);

    assert!(i.wraps());
    assert!(i.contains_angle(NormalizedAngle::from_radians(0.)));
    assert!(i.contains_angle(NormalizedAngle::from_radians(0.5)));
    assert!(i.contains_angle(NormalizedAngle::from_radians(TWO_PI - 0.5)));
    assert!(!i.contains_angle(NormalizedAngle::from_radians(3.)));

    // Membership is invariant modulo 2π.
    for k in [-2.0_f64, -1.0, 1.0, 2.0] {
        let x = NormalizedAngle::from_radians(k.mul_add(TWO_PI, 0.5));
        assert!(i.contains_angle(x), "wrap invariance for k = {k}");
    }
}

#[test]
fn relationships() {
    let a02 = NormalizedAngleInterval::from_radians(0., 2.);
    let a13 = NormalizedAngleInterval::from_radians(1., 3.);
    let a46 = NormalizedAngleInterval::from_radians(4., 6.);
    let a06 = NormalizedAngleInterval::from_radians(0., 6.);

    assert!(a02.contains(NormalizedAngle::from_radians(1.)));
    assert!(a02.contains(NormalizedAngleInterval::from_radians(0.5, 1.5)));
    assert!(a02.is_disjoint_from(NormalizedAngle::from_radians(3.)));
    assert!(a02.is_disjoint_from(a46));
    assert!(a02.intersects(NormalizedAngle::from_radians(1.)));
    assert!(a02.intersects(a13));
    assert!(NormalizedAngleInterval::from_radians(1., 1.).is_within(a02));
    assert!(a02.is_within(a06));
    assert_eq!(
        a02.relate(NormalizedAngle::from_radians(1.)),
        Relationship::CONTAINS
    );
    assert_eq!(a46.relate(a02), Relationship::DISJOINT);
}

#[test]
fn wrap_relationships() {
    let wrapped = NormalizedAngleInterval::from_radians(6., 1.);
    let low = NormalizedAngleInterval::from_radians(0., 0.5);
    let high = NormalizedAngleInterval::from_radians(6.1, 6.2);
    let outside = NormalizedAngleInterval::from_radians(2., 3.);

    assert!(wrapped.contains(low));
    assert!(wrapped.contains(high));
    assert!(low.is_within(wrapped));
    assert!(wrapped.is_disjoint_from(outside));
    assert!(wrapped.intersects(NormalizedAngleInterval::from_radians(0.5, 2.)));
    assert!(
        NormalizedAngleInterval::full().contains(wrapped),
        "full contains wrapping intervals"
    );
    assert!(wrapped.is_within(NormalizedAngleInterval::full()));
}

#[test]
fn expansion() {
    let a = NormalizedAngleInterval::from_radians(1., 2.);

    // Overlapping: the union.
    assert_eq!(
        a.expanded_to(NormalizedAngleInterval::from_radians(1.5, 3.)),
        NormalizedAngleInterval::from_radians(1., 3.)
    );
    // Disjoint: the smaller gap closes.
    assert_eq!(
        a.expanded_to(NormalizedAngleInterval::from_radians(2.5, 3.)),
        NormalizedAngleInterval::from_radians(1., 3.)
    );
    assert_eq!(
        a.expanded_to(NormalizedAngleInterval::from_radians(5.5, 6.)),
        NormalizedAngleInterval::from_radians(5.5, 2.)
    );
    // Mutual overshoot on both sides covers the whole circle.
    let b = NormalizedAngleInterval::from_radians(0., 4.);
    let c = NormalizedAngleInterval::from_radians(3., 1.);
    assert!(b.expanded_to(c).is_full());
}

#[test]
fn clipping() {
    let a = NormalizedAngleInterval::from_radians(1., 3.);

    assert_eq!(
        a.clipped_to(NormalizedAngleInterval::from_radians(2., 4.)),
        NormalizedAngleInterval::from_radians(2., 3.)
    );
    assert!(a
        .clipped_to(NormalizedAngleInterval::from_radians(4., 5.))
        .is_empty());
    assert_eq!(
        a.clipped_to(NormalizedAngleInterval::full()),
        a,
        "clip to full is a no-op"
    );
}

#[test]
fn dilation_and_erosion() {
    let a = NormalizedAngleInterval::from_radians(1., 3.);
    let b = a.dilated_by(Angle::new(1.)).eroded_by(Angle::new(2.));

    let mut c = a;
    c.dilate_by(Angle::new(1.)).erode_by(Angle::new(2.));
    assert_eq!(c, b);
    assert_eq!(
        c,
        NormalizedAngleInterval::point(NormalizedAngle::from_radians(2.))
    );

    assert!(
        a.dilated_by(Angle::new(3.)).is_full(),
        "dilation saturates at the full circle"
    );
    assert!(
        a.eroded_by(Angle::new(1.5)).is_empty(),
        "over-erosion empties"
    );

    // Dilation across zero wraps.
    let d = NormalizedAngleInterval::from_radians(0.5, 1.).dilated_by(Angle::new(1.));
    assert!(d.wraps());
    assert_float_eq!(d.get_a().as_radians(), TWO_PI - 0.5, abs <= 1e-15);
    assert_float_eq!(d.get_b().as_radians(), 2.0, abs <= 1e-15);
}
