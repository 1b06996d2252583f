use super::*;

#[test]
fn construction() {
    let i = Interval1d::point(1.);
    assert_eq!(i.get_a(), i.get_b());
    assert_eq!(i.get_a(), 1.);

    assert_eq!(Interval1d::new(1., 2.), Interval1d::new(1., 2.));
    assert!(Interval1d::empty().is_empty());
    assert!(Interval1d::new(2., 1.).is_empty(), "inverted bounds");
    assert!(Interval1d::new(f64::NAN, 1.).is_empty(), "NaN bound");
    assert!(Interval1d::full().is_full());
}

#[test]
fn comparison() {
    assert_eq!(Interval1d::point(1.), Interval1d::new(1., 1.));
    assert_eq!(Interval1d::point(1.), 1.0.into());
    assert_ne!(Interval1d::new(1., 1.), Interval1d::new(2., 2.));
    assert_eq!(Interval1d::empty(), Interval1d::new(3., 2.));
}

#[test]
fn center_and_size() {
    let i = Interval1d::new(1., 2.);
    assert_eq!(i.get_size(), 1.);
    assert_eq!(i.get_center(), 1.5);
}

#[test]
fn relationships() {
    let i02 = Interval1d::new(0., 2.);
    let i13 = Interval1d::new(1., 3.);
    let i46 = Interval1d::new(4., 6.);
    let i06 = Interval1d::new(0., 6.);

    assert!(i02.contains(1.));
    assert!(i02.contains(Interval1d::new(0.5, 1.5)));
    assert!(i02.is_disjoint_from(3.));
    assert!(i02.is_disjoint_from(i46));
    assert!(i02.intersects(1.));
    assert!(i02.intersects(i13));
    assert!(Interval1d::new(1., 1.).is_within(i02));
    assert!(i02.is_within(i06));
    assert_eq!(i02.relate(1.), Relationship::CONTAINS);
    assert_eq!(i46.relate(i02), Relationship::DISJOINT);
    assert_eq!(i02.relate(i13), Relationship::INTERSECTS);
    assert_eq!(
        i02.relate(i02),
        Relationship::CONTAINS | Relationship::WITHIN
    );
}

#[test]
fn empty_relationships() {
    let empty = Interval1d::empty();
    let i02 = Interval1d::new(0., 2.);

    assert_eq!(
        empty.relate(empty),
        Relationship::CONTAINS | Relationship::DISJOINT | Relationship::WITHIN
    );
    assert_eq!(
        empty.relate(i02),
        Relationship::DISJOINT | Relationship::WITHIN
    );
    assert_eq!(
        i02.relate(empty),
        Relationship::CONTAINS | Relationship::DISJOINT
    );
}

#[test]
fn expanding_and_clipping() {
    let a = Interval1d::new(1., 2.);
    let b = a
        .expanded_to(3.)
        .expanded_to(Interval1d::new(2., 4.))
        .clipped_to(Interval1d::new(0., 2.))
        .clipped_to(1.);

    let mut c = a;
    c.expand_to(3.).expand_to(Interval1d::new(2., 4.));
    c.clip_to(Interval1d::new(0., 2.)).clip_to(1.);

    assert_eq!(c, b);
    assert_eq!(c, 1.0.into());
}

#[test]
fn dilation_and_erosion() {
    let a = Interval1d::new(1., 3.);
    let b = a.dilated_by(1.).eroded_by(2.);

    let mut c = a;
    c.dilate_by(1.).erode_by(2.);

    assert_eq!(c, b);
    assert_eq!(c, 2.0.into());
    assert!(a.eroded_by(2.).is_empty(), "over-erosion empties");
}

#[test]
fn angle_interval() {
    let a02 = AngleInterval::from_radians(0., 2.);
    let a13 = AngleInterval::from_radians(1., 3.);
    let a46 = AngleInterval::from_radians(4., 6.);

    assert_eq!(
        AngleInterval::point(Angle::new(1.)),
        AngleInterval::from_radians(1., 1.)
    );
    assert!(AngleInterval::empty().is_empty());
    assert_eq!(a02.get_size(), Angle::new(2.));
    assert_eq!(a02.get_center(), Angle::new(1.));

    assert!(a02.contains(Angle::new(1.)));
    assert!(a02.is_disjoint_from(a46));
    assert!(a02.intersects(a13));
    assert!(AngleInterval::from_radians(1., 1.).is_within(a02));
    assert_eq!(a02.relate(Angle::new(1.)), Relationship::CONTAINS);
    assert_eq!(a46.relate(a02), Relationship::DISJOINT);

    let mut a = AngleInterval::from_radians(1., 2.);
    let b = a
        .expanded_to(Angle::new(3.))
        .expanded_to(AngleInterval::from_radians(2., 4.))
        .clipped_to(AngleInterval::from_radians(0., 2.))
        .clipped_to(Angle::new(1.));
    a.expand_to(Angle::new(3.))
        .expand_to(AngleInterval::from_radians(2., 4.));
    a.clip_to(AngleInterval::from_radians(0., 2.))
        .clip_to(Angle::new(1.));
    assert_eq!(a, b);

    let mut c = AngleInterval::from_radians(1., 3.);
    let d = c.dilated_by(Angle::new(1.)).eroded_by(Angle::new(2.));
    c.dilate_by(Angle::new(1.)).erode_by(Angle::new(2.));
    assert_eq!(c, d);
    assert_eq!(c, AngleInterval::point(Angle::new(2.)));
}
