use super::*;

#[test]
fn construction() {
    let a = Box3d::from_corners(&Vector3d::new(1., 2., 3.), &Vector3d::new(3., 4., 5.));
    let b = Box3d::new(
        Interval1d::new(1., 3.),
        Interval1d::new(2., 4.),
        Interval1d::new(3., 5.),
    );
    let c = Box3d::from_center(&Vector3d::new(2., 3., 4.), 1., 1., 1.);

    assert_eq!(a, b);
    assert_eq!(b, c);
    assert!(Box3d::empty().is_empty());
    assert!(Box3d::full().is_full());
    assert!(
        Box3d::new(
            Interval1d::empty(),
            Interval1d::new(0., 1.),
            Interval1d::new(0., 1.)
        )
        .is_empty(),
        "one empty component empties the box"
    );
}

#[test]
fn comparison() {
    assert_eq!(
        Box3d::from_point(&Vector3d::new(1., 1., 1.)),
        Vector3d::new(1., 1., 1.).into()
    );
    assert_eq!(
        Box3d::from_center(&Vector3d::default(), 1., 1., 1.),
        Box3d::from_corners(
            &Vector3d::new(-1., -1., -1.),
            &Vector3d::new(1., 1., 1.)
        )
    );
    assert_ne!(
        Box3d::from_center(&Vector3d::default(), 1., 1., 1.),
        Box3d::from_corners(
            &Vector3d::new(-1., -1., -1.),
            &Vector3d::new(1., 1., 2.)
        )
    );
}

#[test]
fn center_and_dimensions() {
    let b = Box3d::from_center(&Vector3d::new(1.5, 1.5, 1.5), 0.5, 1.0, 1.5);

    assert_eq!(b.x(), Interval1d::new(1., 2.));
    assert_eq!(b.y(), Interval1d::new(0.5, 2.5));
    assert_eq!(b.z(), Interval1d::new(0., 3.));
    assert_eq!(b.get_center(), Vector3d::new(1.5, 1.5, 1.5));
    assert_eq!(b.get_width(), 1.);
    assert_eq!(b.get_height(), 2.);
    assert_eq!(b.get_depth(), 3.);
    assert!(!b.is_empty());
    assert!(!b.is_full());
}

#[test]
fn relationships() {
    let b02 = Box3d::from_corners(&Vector3d::default(), &Vector3d::new(2., 2., 2.));
    let b13 = Box3d::from_corners(&Vector3d::new(1., 1., 1.), &Vector3d::new(3., 3., 3.));
    let b46 = Box3d::from_corners(&Vector3d::new(4., 4., 4.), &Vector3d::new(6., 6., 6.));
    let b06 = Box3d::from_corners(&Vector3d::default(), &Vector3d::new(6., 6., 6.));

    assert!(b02.contains(Vector3d::new(1., 1., 1.)));
    assert!(b02.contains(Box3d::from_center(&Vector3d::new(1., 1., 1.), 0.5, 0.5, 0.5)));
    assert!(b02.is_disjoint_from(Vector3d::new(3., 3., 3.)));
    assert!(b02.is_disjoint_from(b46));
    assert!(b02.intersects(Vector3d::new(1., 1., 1.)));
    assert!(b02.intersects(b13));
    assert!(Box3d::from_point(&Vector3d::new(1., 1., 1.)).is_within(b02));
    assert!(b02.is_within(b06));
    assert_eq!(b02.relate(Vector3d::new(1., 1., 1.)), Relationship::CONTAINS);
    assert_eq!(b46.relate(b02), Relationship::DISJOINT);
    assert_eq!(b02.relate(b13), Relationship::INTERSECTS);
}

#[test]
fn expanding_and_clipping() {
    let a = Box3d::from_corners(&Vector3d::new(1., 1., 1.), &Vector3d::new(2., 2., 2.));
    let b = a
        .expanded_to(Vector3d::new(3., 3., 3.))
        .expanded_to(Box3d::from_center(&Vector3d::new(3., 3., 3.), 1., 1., 1.))
        .clipped_to(Box3d::from_center(&Vector3d::new(1., 1., 1.), 1., 1., 1.))
        .clipped_to(Vector3d::new(1., 1., 1.));

    let mut c = a;
    c.expand_to(Vector3d::new(3., 3., 3.));
    c.expand_to(Box3d::from_center(&Vector3d::new(3., 3., 3.), 1., 1., 1.));
    c.clip_to(Box3d::from_center(&Vector3d::new(1., 1., 1.), 1., 1., 1.));
    c.clip_to(Vector3d::new(1., 1., 1.));

    assert_eq!(c, b);
    assert_eq!(c, Vector3d::new(1., 1., 1.).into());
    c.clip_to(Vector3d::default());
    assert!(c.is_empty());
}

#[test]
fn dilation_and_erosion() {
    let a = Box3d::from_center(&Vector3d::default(), 1., 1., 1.);
    let b = a.dilated_by(1.).eroded_by(2.);

    let mut c = a;
    c.dilate_by(1.).erode_by(2.);

    assert_eq!(c, b);
    assert_eq!(c, Vector3d::default().into());
}
