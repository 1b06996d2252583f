//! The `skygeom` library implements exact spherical-geometry primitives and
//! hierarchical pixelizations of the unit sphere.
//!
//! It provides the region algebra (boxes, caps, ellipses and convex polygons
//! on the sphere, plus unions and intersections of those), a set algebra over
//! 64-bit pixel index spaces ([`RangeSet`]), hierarchical pixelizations (HTM,
//! Q3C, MQ3C and an external HEALPix), and the rectangular sky chunker used
//! for coarse database partitioning.

// Lints {{{

#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility,
    future_incompatible,
    rustdoc::all,
    rustdoc::missing_crate_level_docs,
    missing_docs,
    unsafe_code,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]
#![allow(
    // Usually yes, but not really applicable for most literals in this crate.
    clippy::unreadable_literal,
)]

// }}}

mod angle;
mod box3d;
mod chunker;
pub mod error;
mod interval;
mod lonlat;
mod matrix3d;
mod normalized_angle_interval;
mod pixelization;
mod rangeset;
mod region;
mod relationship;
mod vector3d;

pub use angle::{Angle, NormalizedAngle};
pub use box3d::Box3d;
pub use chunker::{Chunker, SubChunks};
pub use interval::{AngleInterval, Interval1d};
pub use lonlat::LonLat;
pub use matrix3d::Matrix3d;
pub use normalized_angle_interval::NormalizedAngleInterval;
pub use pixelization::{
    HealpixPixelization, HtmPixelization, Mq3cPixelization, Pixelization,
    Q3cPixelization,
};
pub use rangeset::RangeSet;
pub use region::{
    Circle, ConvexPolygon, Ellipse, IntersectionRegion, LonLatBox, Region,
    UnionRegion,
};
pub use relationship::Relationship;
pub use vector3d::{UnitVector3d, Vector3d};

// -----------------------------------------------------------------------------

// 2π
const TWO_PI: f64 = 2. * std::f64::consts::PI;

/// Dilation applied to computed bounding volumes, in radians.
///
/// Bounds are widened by this amount so that points on a region boundary
/// never escape the bounds through rounding.
const ANGLE_EPSILON: f64 = 4.0 * f64::EPSILON;

/// Relative dilation applied to squared chord lengths of bounding circles.
const CHORD_EPSILON: f64 = 4.0 * f64::EPSILON;
