//! Shared spherical-geometry helpers backing the region relations.
//!
//! Distances are unsigned angular separations in radians. All boundary
//! searches enumerate a complete candidate set (endpoints plus interior
//! extrema of the relevant trigonometric form), so the minima and maxima
//! computed here are exact up to rounding.

use crate::{
    AngleInterval, LonLat, NormalizedAngle, NormalizedAngleInterval,
    UnitVector3d, Vector3d, ANGLE_EPSILON,
};
use std::f64::consts::{FRAC_PI_2, PI};

/// The sign of the determinant `|a b c|`.
///
/// Positive when `c` lies to the left of the oriented great circle through
/// `a` and `b` (seen from outside the sphere).
pub(crate) fn orientation(
    a: &UnitVector3d,
    b: &UnitVector3d,
    c: &UnitVector3d,
) -> f64 {
    a.as_vector3d().dot(&b.cross(c))
}

/// The angular separation between two unit vectors, in radians.
pub(crate) fn separation(a: &UnitVector3d, b: &UnitVector3d) -> f64 {
    NormalizedAngle::from_unit_vectors(a, b).as_radians()
}

/// Returns true if `q`, assumed to lie on the great circle through `v0` and
/// `v1`, lies on the shorter arc from `v0` to `v1`.
pub(crate) fn within_arc(
    q: &UnitVector3d,
    v0: &UnitVector3d,
    v1: &UnitVector3d,
) -> bool {
    let n = v0.cross(v1);
    v0.cross(q).dot(&n) >= 0.0 && q.cross(v1).dot(&n) >= 0.0
}

/// The minimum angular separation between `p` and the arc from `v0` to `v1`.
pub(crate) fn min_separation_to_arc(
    p: &UnitVector3d,
    v0: &UnitVector3d,
    v1: &UnitVector3d,
) -> f64 {
    let mut d = separation(p, v0).min(separation(p, v1));
    // The closest point on the full great circle is the projection of `p`
    // onto the plane of the circle.
    let n = v0.cross(v1);
    let nn = n.squared_norm();
    if nn > 0.0 {
        let foot = *p.as_vector3d() - n * (p.as_vector3d().dot(&n) / nn);
        if !foot.is_zero() {
            let foot = UnitVector3d::normalized(&foot);
            if within_arc(&foot, v0, v1) {
                d = d.min(separation(p, &foot));
            }
        }
    }
    d
}

/// The maximum angular separation between `p` and the arc from `v0` to `v1`.
pub(crate) fn max_separation_to_arc(
    p: &UnitVector3d,
    v0: &UnitVector3d,
    v1: &UnitVector3d,
) -> f64 {
    let mut d = separation(p, v0).max(separation(p, v1));
    let n = v0.cross(v1);
    let nn = n.squared_norm();
    if nn > 0.0 {
        let foot = *p.as_vector3d() - n * (p.as_vector3d().dot(&n) / nn);
        if !foot.is_zero() {
            let far = UnitVector3d::normalized(&-foot);
            if within_arc(&far, v0, v1) {
                d = d.max(separation(p, &far));
            }
        }
    }
    d
}

/// Returns true if the arcs `a0→a1` and `b0→b1` share a point.
///
/// Both arcs must be shorter arcs (less than π), which holds for convex
/// polygon edges and box meridians.
pub(crate) fn arcs_intersect(
    a0: &UnitVector3d,
    a1: &UnitVector3d,
    b0: &UnitVector3d,
    b1: &UnitVector3d,
) -> bool {
    let na = a0.cross(a1);
    let nb = b0.cross(b1);
    let sb0 = na.dot(b0.as_vector3d());
    let sb1 = na.dot(b1.as_vector3d());
    let sa0 = nb.dot(a0.as_vector3d());
    let sa1 = nb.dot(a1.as_vector3d());
    if (sb0 > 0.0 && sb1 > 0.0) || (sb0 < 0.0 && sb1 < 0.0) {
        return false;
    }
    if (sa0 > 0.0 && sa1 > 0.0) || (sa0 < 0.0 && sa1 < 0.0) {
        return false;
    }
    let candidate = na.cross(&nb);
    if candidate.is_zero() {
        // Coplanar arcs: they intersect iff an endpoint of one lies on the
        // other arc.
        return within_arc(b0, a0, a1)
            || within_arc(b1, a0, a1)
            || within_arc(a0, b0, b1)
            || within_arc(a1, b0, b1);
    }
    let candidate = UnitVector3d::normalized(&candidate);
    let antipode = -candidate;
    (within_arc(&candidate, a0, a1) && within_arc(&candidate, b0, b1))
        || (within_arc(&antipode, a0, a1) && within_arc(&antipode, b0, b1))
}

/// The tight longitude/latitude hull of the arc from `v0` to `v1`.
///
/// Arcs whose latitude hull reaches a pole get the full longitude circle
/// (a hull around a pole cannot be narrower).
pub(crate) fn arc_lon_lat_hull(
    v0: &UnitVector3d,
    v1: &UnitVector3d,
) -> (NormalizedAngleInterval, AngleInterval) {
    let p0 = LonLat::from(v0);
    let p1 = LonLat::from(v1);
    let mut lat_lo = p0.lat().as_radians().min(p1.lat().as_radians());
    let mut lat_hi = p0.lat().as_radians().max(p1.lat().as_radians());

    // The latitude extrema of the great circle lie at the projections of
    // ±Z onto its plane.
    let n = v0.cross(v1);
    let nn = n.squared_norm();
    if nn > 0.0 {
        let top = Vector3d::new(0.0, 0.0, 1.0) - n * (n.z / nn);
        if !top.is_zero() {
            let top = UnitVector3d::normalized(&top);
            if within_arc(&top, v0, v1) {
                lat_hi = lat_hi.max(top.z().clamp(-1.0, 1.0).asin());
            }
            let bottom = -top;
            if within_arc(&bottom, v0, v1) {
                lat_lo = lat_lo.min(bottom.z().clamp(-1.0, 1.0).asin());
            }
        } else {
            // Equatorial arc: the latitude stays 0 throughout.
        }
    }

    let lat = AngleInterval::from_radians(
        (lat_lo - ANGLE_EPSILON).max(-FRAC_PI_2),
        (lat_hi + ANGLE_EPSILON).min(FRAC_PI_2),
    );

    if lat_hi >= FRAC_PI_2 - ANGLE_EPSILON || lat_lo <= -FRAC_PI_2 + ANGLE_EPSILON
    {
        return (NormalizedAngleInterval::full(), lat);
    }

    // Away from the poles the longitude along a great arc is monotonic;
    // its direction is given by the z component of the edge plane normal.
    let lon = if n.z > 0.0 {
        NormalizedAngleInterval::new(p0.lon(), p1.lon())
    } else if n.z < 0.0 {
        NormalizedAngleInterval::new(p1.lon(), p0.lon())
    } else {
        // Polar plane, but the arc avoids the poles: both endpoints share
        // one meridian.
        NormalizedAngleInterval::point(p0.lon()).expanded_to(p1.lon())
    };
    (lon.dilated_by(crate::Angle::new(ANGLE_EPSILON)), lat)
}

/// The minimum of `A·cos λ + B·sin λ + C` over a circular interval of
/// longitudes.
///
/// The candidates are the interval endpoints plus the interior crest and
/// trough of the sinusoid, whichever fall inside the interval.
pub(crate) fn min_sinusoid_over(
    a: f64,
    b: f64,
    c: f64,
    lon: &NormalizedAngleInterval,
) -> f64 {
    debug_assert!(!lon.is_empty(), "empty longitude interval");
    let eval = |lam: f64| a.mul_add(lam.cos(), b.mul_add(lam.sin(), c));
    let crest = b.atan2(a);
    let mut candidates =
        vec![lon.get_a().as_radians(), lon.get_b().as_radians()];
    for interior in [crest, crest + PI] {
        let angle = NormalizedAngle::from_radians(interior);
        if lon.contains_angle(angle) {
            candidates.push(angle.as_radians());
        }
    }
    candidates.into_iter().map(eval).fold(f64::INFINITY, f64::min)
}

/// The longitudes where `A·cos λ + B·sin λ + C = 0`, i.e. where the circle
/// of constant latitude crosses the plane with those coefficients.
pub(crate) fn sinusoid_roots(a: f64, b: f64, c: f64) -> Vec<NormalizedAngle> {
    let r = a.hypot(b);
    if r == 0.0 || c.abs() > r {
        return Vec::new();
    }
    let base = b.atan2(a);
    let offset = (-c / r).clamp(-1.0, 1.0).acos();
    vec![
        NormalizedAngle::from_radians(base + offset),
        NormalizedAngle::from_radians(base - offset),
    ]
}

/// The minimum angular separation between the point `p` and the boundary of
/// the lon/lat rectangle `lon × lat`.
///
/// The rectangle must be neither empty nor the full sphere.
pub(crate) fn min_separation_to_box_boundary(
    p: &LonLat,
    lon: &NormalizedAngleInterval,
    lat: &AngleInterval,
) -> f64 {
    boundary_candidates(p, lon, lat, false)
        .into_iter()
        .map(|q| NormalizedAngle::from_lonlats(p, &q).as_radians())
        .fold(f64::INFINITY, f64::min)
}

/// The maximum angular separation between the point `p` and the boundary of
/// the lon/lat rectangle `lon × lat`.
pub(crate) fn max_separation_to_box_boundary(
    p: &LonLat,
    lon: &NormalizedAngleInterval,
    lat: &AngleInterval,
) -> f64 {
    boundary_candidates(p, lon, lat, true)
        .into_iter()
        .map(|q| NormalizedAngle::from_lonlats(p, &q).as_radians())
        .fold(0.0, f64::max)
}

/// Candidate boundary points of a lon/lat rectangle extremizing the
/// distance to `p`.
fn boundary_candidates(
    p: &LonLat,
    lon: &NormalizedAngleInterval,
    lat: &AngleInterval,
    maximize: bool,
) -> Vec<LonLat> {
    let lat_a = lat.get_a().as_radians();
    let lat_b = lat.get_b().as_radians();
    let lon_full = lon.is_full();
    let mut candidates = Vec::with_capacity(12);

    let push = |candidates: &mut Vec<LonLat>, lam: f64, phi: f64| {
        candidates.push(LonLat::new(
            NormalizedAngle::from_radians(lam),
            crate::Angle::new(phi),
        ));
    };

    // Corners.
    if !lon_full {
        for lam in [lon.get_a().as_radians(), lon.get_b().as_radians()] {
            push(&mut candidates, lam, lat_a);
            push(&mut candidates, lam, lat_b);
        }
    }

    // Constant-latitude edges: the nearest longitude is the point's own,
    // the farthest its antipode (when the edge reaches them).
    let lam_near = p.lon();
    let lam_far =
        NormalizedAngle::from_radians(p.lon().as_radians() + PI);
    let target = if maximize { lam_far } else { lam_near };
    if lon_full || lon.contains_angle(target) {
        push(&mut candidates, target.as_radians(), lat_a);
        push(&mut candidates, target.as_radians(), lat_b);
    }

    // Meridian edges: the latitude extremizing the separation solves a
    // single-crest trigonometric form; candidates are that latitude (when
    // it lies in range) plus the corners already gathered.
    if !lon_full {
        let phi_p = p.lat().as_radians();
        for lam in [lon.get_a().as_radians(), lon.get_b().as_radians()] {
            let k = phi_p.cos() * (lam - p.lon().as_radians()).cos();
            let phi_star = if maximize {
                (-phi_p.sin()).atan2(-k)
            } else {
                phi_p.sin().atan2(k)
            };
            if phi_star.abs() <= FRAC_PI_2 && phi_star >= lat_a && phi_star <= lat_b {
                push(&mut candidates, lam, phi_star);
            }
        }
    }

    candidates
}

#[cfg(test)]
#[path = "./algo_tests.rs"]
mod tests;
