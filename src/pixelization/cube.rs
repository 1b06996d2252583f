//! Shared cube-face machinery for the Q3C and MQ3C pixelizations.
//!
//! Each cube face carries a right-handed gnomonic frame (`u_axis × v_axis`
//! equals the outward face normal); a point projects to face coordinates
//! `(u, v) ∈ [-1, 1]²` which quantize to a z-order (Morton) index with the
//! `u` bit in the low position.

use crate::{ConvexPolygon, UnitVector3d, Vector3d};

/// The gnomonic frame of a cube face.
pub(crate) struct Frame {
    pub normal: Vector3d,
    pub u_axis: Vector3d,
    pub v_axis: Vector3d,
}

const X: Vector3d = Vector3d::new(1.0, 0.0, 0.0);
const Y: Vector3d = Vector3d::new(0.0, 1.0, 0.0);
const Z: Vector3d = Vector3d::new(0.0, 0.0, 1.0);

const NEG_X: Vector3d = Vector3d::new(-1.0, 0.0, 0.0);
const NEG_Y: Vector3d = Vector3d::new(0.0, -1.0, 0.0);
const NEG_Z: Vector3d = Vector3d::new(0.0, 0.0, -1.0);

/// Q3C face frames: 0 = +Z, 1 = +X, 2 = +Y, 3 = -X, 4 = -Y, 5 = -Z, with
/// the polar frames matching the q3c convention.
pub(crate) const Q3C_FRAMES: [Frame; 6] = [
    Frame { normal: Z, u_axis: Y, v_axis: NEG_X },
    Frame { normal: X, u_axis: Y, v_axis: Z },
    Frame { normal: Y, u_axis: NEG_X, v_axis: Z },
    Frame { normal: NEG_X, u_axis: NEG_Y, v_axis: Z },
    Frame { normal: NEG_Y, u_axis: X, v_axis: Z },
    Frame { normal: NEG_Z, u_axis: Y, v_axis: X },
];

/// MQ3C face frames: 0 = -Z, 1 = +X, 2 = +Y, 3 = +Z, 4 = -X, 5 = -Y
/// (opposite faces differ by 3 modulo 6).
pub(crate) const MQ3C_FRAMES: [Frame; 6] = [
    Frame { normal: NEG_Z, u_axis: Y, v_axis: X },
    Frame { normal: X, u_axis: Y, v_axis: Z },
    Frame { normal: Y, u_axis: Z, v_axis: X },
    Frame { normal: Z, u_axis: X, v_axis: Y },
    Frame { normal: NEG_X, u_axis: Z, v_axis: Y },
    Frame { normal: NEG_Y, u_axis: X, v_axis: Z },
];

/// The labels of the Q3C faces, by face number.
pub(crate) const Q3C_FACE_NAMES: [&str; 6] =
    ["+Z", "+X", "+Y", "-X", "-Y", "-Z"];

/// The labels of the MQ3C faces, by face number.
pub(crate) const MQ3C_FACE_NAMES: [&str; 6] =
    ["-Z", "+X", "+Y", "+Z", "-X", "-Y"];

/// The dominant axis of `v`: 0 for ±X, 1 for ±Y, 2 for ±Z, plus the sign.
///
/// Ties prefer z over x over y, deterministically.
fn dominant_axis(v: &UnitVector3d) -> (usize, bool) {
    let (ax, ay, az) = (v.x().abs(), v.y().abs(), v.z().abs());
    if az >= ax && az >= ay {
        (2, v.z() >= 0.0)
    } else if ax >= ay {
        (0, v.x() >= 0.0)
    } else {
        (1, v.y() >= 0.0)
    }
}

/// The Q3C face number of the face containing `v`.
pub(crate) fn q3c_face(v: &UnitVector3d) -> u64 {
    match dominant_axis(v) {
        (2, true) => 0,
        (0, true) => 1,
        (1, true) => 2,
        (0, false) => 3,
        (1, false) => 4,
        _ => 5,
    }
}

/// The MQ3C face number of the face containing `v`.
pub(crate) fn mq3c_face(v: &UnitVector3d) -> u64 {
    match dominant_axis(v) {
        (2, false) => 0,
        (0, true) => 1,
        (1, true) => 2,
        (2, true) => 3,
        (0, false) => 4,
        _ => 5,
    }
}

/// The z-order index of `v` within the face described by `frame`.
pub(crate) fn face_curve(frame: &Frame, v: &UnitVector3d, level: u8) -> u64 {
    let w = v.as_vector3d().dot(&frame.normal);
    debug_assert!(w > 0.0, "vector not on this face");
    let gu = quantize(v.as_vector3d().dot(&frame.u_axis) / w, level);
    let gv = quantize(v.as_vector3d().dot(&frame.v_axis) / w, level);
    interleave(gu, gv, level)
}

/// The spherical quad of the face cell with the given z-order index.
pub(crate) fn face_cell(frame: &Frame, curve: u64, level: u8) -> ConvexPolygon {
    let (gu, gv) = deinterleave(curve, level);
    let scale = f64::from(1_u32 << level);
    let u0 = 2.0 * (gu as f64) / scale - 1.0;
    let u1 = 2.0 * ((gu + 1) as f64) / scale - 1.0;
    let v0 = 2.0 * (gv as f64) / scale - 1.0;
    let v1 = 2.0 * ((gv + 1) as f64) / scale - 1.0;
    let corner = |u: f64, v: f64| {
        let p = frame.normal + frame.u_axis * u + frame.v_axis * v;
        UnitVector3d::normalized(&p)
    };
    // Counter-clockwise seen from outside, since u × v is the outward
    // normal.
    ConvexPolygon::new(vec![
        corner(u0, v0),
        corner(u1, v0),
        corner(u1, v1),
        corner(u0, v1),
    ])
    .unwrap_or_else(|_| unreachable!("degenerate face cell"))
}

/// Quantizes a gnomonic coordinate in `[-1, 1]` onto the level grid.
fn quantize(coord: f64, level: u8) -> u64 {
    let cells = u64::from(1_u32 << level);
    let scaled = (0.5 * (coord + 1.0) * cells as f64).floor();
    if scaled < 0.0 {
        0
    } else if scaled >= cells as f64 {
        cells - 1
    } else {
        scaled as u64
    }
}

/// Interleaves two level-bit coordinates, `u` in the even (low) bits.
fn interleave(gu: u64, gv: u64, level: u8) -> u64 {
    let mut out = 0;
    for bit in 0..u32::from(level) {
        out |= ((gu >> bit) & 1) << (2 * bit);
        out |= ((gv >> bit) & 1) << (2 * bit + 1);
    }
    out
}

/// The inverse of [`interleave`].
fn deinterleave(curve: u64, level: u8) -> (u64, u64) {
    let mut gu = 0;
    let mut gv = 0;
    for bit in 0..u32::from(level) {
        gu |= ((curve >> (2 * bit)) & 1) << bit;
        gv |= ((curve >> (2 * bit + 1)) & 1) << bit;
    }
    (gu, gv)
}
