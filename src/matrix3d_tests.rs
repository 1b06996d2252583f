use super::*;

#[test]
fn construction() {
    assert_eq!(Matrix3d::default().squared_norm(), 0.);
    assert_eq!(
        Matrix3d::new(1., 0., 0., 0., 1., 0., 0., 0., 1.),
        Matrix3d::identity()
    );
    assert_eq!(
        Matrix3d::diagonal(&Vector3d::new(2., 2., 2.)),
        Matrix3d::scaling(2.)
    );
}

#[test]
fn access() {
    let m = Matrix3d::new(1., 2., 3., 4., 5., 6., 7., 8., 9.);

    assert_eq!(m.row(0), Vector3d::new(1., 2., 3.));
    assert_eq!(m.row(1), Vector3d::new(4., 5., 6.));
    assert_eq!(m.row(2), Vector3d::new(7., 8., 9.));

    let n = m.transpose();
    assert_eq!(m.column(0), n.row(0));
    assert_eq!(m.column(1), n.row(1));
    assert_eq!(m.column(2), n.row(2));

    for r in 0..3 {
        for c in 0..3 {
            assert_eq!(m.component(r, c), (r * 3 + c + 1) as f64);
        }
    }
}

#[test]
fn inner_product() {
    let m = Matrix3d::new(1., 2., 3., 4., 5., 6., 7., 8., 9.);
    let i = Matrix3d::identity();

    assert_eq!(m.inner(&i), i.inner(&m));
    assert_eq!(m.inner(&i), 15.0);
}

#[test]
fn norm() {
    let m = Matrix3d::new(1., 2., 3., 4., 5., 6., 7., 0., 2.);

    assert_eq!(m.squared_norm(), 144.0);
    assert_eq!(m.norm(), 12.0);
}

#[test]
fn arithmetic() {
    let v = Vector3d::new(1., 2., 3.);
    let m = Matrix3d::new(1., -1., 0., 1., 1., 0., 0., 0., 1.);
    let n = Matrix3d::new(1., 1., 0., -1., 1., 0., 0., 0., 1.);

    assert_eq!(n * (m * v), Vector3d::new(2., 4., 3.));
    assert_eq!(m + m, m * Matrix3d::scaling(2.));
    assert_eq!(m, m * Matrix3d::scaling(2.) - m);
}

#[test]
fn cwise_product() {
    let m = Matrix3d::new(1., 2., 3., 4., 1., 6., 7., 8., 1.);

    assert_eq!(m.cwise_product(&Matrix3d::scaling(2.)), Matrix3d::scaling(2.));
}

#[test]
fn transpose() {
    let m = Matrix3d::new(1., 2., 3., 4., 5., 6., 7., 8., 9.);
    let n = Matrix3d::new(1., 4., 7., 2., 5., 8., 3., 6., 9.);

    assert_eq!(m.transpose(), n);
    assert_eq!(m.transpose().transpose(), m);
}

#[test]
fn inverse() {
    let m = Matrix3d::new(4., 4., 4., -1., 1., 0., 1., -1., -1.);
    let n = Matrix3d::new(0.125, 0., 0.5, 0.125, 1., 0.5, 0., -1., -1.);
    let i = m.inverse();

    assert_eq!(i, n);
    assert_eq!(i.inverse(), m);
    assert_eq!(i * m, Matrix3d::identity());
    assert_eq!(m * i, Matrix3d::identity());
}
