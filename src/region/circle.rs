use crate::{
    Angle, AngleInterval, Box3d, Interval1d, LonLat, LonLatBox,
    NormalizedAngleInterval, Relationship, UnitVector3d, CHORD_EPSILON,
};
use std::{
    f64::consts::{FRAC_PI_2, PI},
    fmt,
};

/// A spherical cap: all points within a fixed opening angle of a center
/// direction.
///
/// The extent is stored both as the squared length of the chord between
/// the center and the boundary, `s² = 2·(1 − cos α) ∈ [0, 4]`, and as the
/// opening angle α itself; the chord form drives the containment tests
/// while the angle form keeps dilation and erosion exactly invertible.
/// Negative sentinels (canonically −1 for both) mark the empty circle and
/// `s² = 4` (α = π) the full sphere.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    center: UnitVector3d,
    squared_chord_length: f64,
    opening_angle: Angle,
}

impl Circle {
    /// The circle containing only `center`.
    #[must_use]
    pub const fn from_point(center: UnitVector3d) -> Self {
        Self {
            center,
            squared_chord_length: 0.0,
            opening_angle: Angle::new(0.0),
        }
    }

    /// Initializes a new circle from a center and a squared chord length.
    ///
    /// The squared chord length is clamped to `[0, 4]`; negative input
    /// yields the empty circle.
    #[must_use]
    pub fn new(center: UnitVector3d, squared_chord_length: f64) -> Self {
        if squared_chord_length < 0.0 || squared_chord_length.is_nan() {
            return Self::empty_at(center);
        }
        let squared_chord_length = squared_chord_length.min(4.0);
        Self {
            center,
            squared_chord_length,
            opening_angle: opening_angle_for(squared_chord_length),
        }
    }

    /// Initializes a new circle from a center and an opening angle.
    ///
    /// Negative opening angles yield the empty circle, angles of π or more
    /// the full sphere.
    #[must_use]
    pub fn from_angle(center: UnitVector3d, opening_angle: Angle) -> Self {
        if opening_angle.as_radians() < 0.0 || opening_angle.is_nan() {
            return Self::empty_at(center);
        }
        let opening_angle = Angle::new(opening_angle.as_radians().min(PI));
        Self {
            center,
            squared_chord_length: squared_chord_length_for(opening_angle),
            opening_angle,
        }
    }

    /// The empty circle.
    #[must_use]
    pub const fn empty() -> Self {
        Self::empty_at(UnitVector3d::X)
    }

    /// The full sphere.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            center: UnitVector3d::X,
            squared_chord_length: 4.0,
            opening_angle: Angle::new(PI),
        }
    }

    const fn empty_at(center: UnitVector3d) -> Self {
        Self {
            center,
            squared_chord_length: -1.0,
            opening_angle: Angle::new(-1.0),
        }
    }

    /// The squared chord length for the given opening angle.
    #[must_use]
    pub fn squared_chord_length_for(angle: Angle) -> f64 {
        squared_chord_length_for(angle)
    }

    /// The opening angle for the given squared chord length.
    #[must_use]
    pub fn opening_angle_for(squared_chord_length: f64) -> Angle {
        opening_angle_for(squared_chord_length)
    }

    /// The center of this circle.
    #[must_use]
    pub const fn center(&self) -> &UnitVector3d {
        &self.center
    }

    /// The squared chord length between the center and the boundary.
    #[must_use]
    pub const fn squared_chord_length(&self) -> f64 {
        self.squared_chord_length
    }

    /// The opening angle of this circle (negative when empty).
    #[must_use]
    pub const fn opening_angle(&self) -> Angle {
        self.opening_angle
    }

    /// The area of this circle, in steradians.
    #[must_use]
    pub fn area(&self) -> f64 {
        PI * self.squared_chord_length.clamp(0.0, 4.0)
    }

    /// Returns true if this circle contains no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.squared_chord_length < 0.0
    }

    /// Returns true if this circle covers the whole sphere.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.squared_chord_length >= 4.0
    }

    /// Returns true if this circle contains the direction `v`.
    #[must_use]
    pub fn contains(&self, v: &UnitVector3d) -> bool {
        self.center.squared_chord_distance(v) <= self.squared_chord_length
    }

    /// Flips this circle into its closed complement.
    pub fn complement(&mut self) -> &mut Self {
        let center = -self.center;
        *self = if self.is_empty() {
            Self {
                center,
                squared_chord_length: 4.0,
                opening_angle: Angle::new(PI),
            }
        } else if self.is_full() {
            Self::empty_at(center)
        } else {
            Self {
                center,
                squared_chord_length: 4.0 - self.squared_chord_length,
                opening_angle: Angle::new(PI - self.opening_angle.as_radians()),
            }
        };
        self
    }

    /// The closed complement of this circle.
    #[must_use]
    pub fn complemented(&self) -> Self {
        let mut c = *self;
        c.complement();
        c
    }

    /// The smallest circle containing this circle and the direction `v`.
    #[must_use]
    pub fn expanded_to_point(&self, v: &UnitVector3d) -> Self {
        if self.is_empty() {
            return Self::from_point(*v);
        }
        if self.contains(v) {
            return *self;
        }
        // Grow along the arc from `v` through the center to the far rim.
        let alpha = self.opening_angle().as_radians();
        let d = super::algo::separation(&self.center, v);
        let radius = 0.5 * (d + alpha);
        if radius >= PI {
            return Self::full();
        }
        let center =
            self.center.rotated_towards(v, Angle::new(radius - alpha));
        Self::from_angle(center, Angle::new(radius))
    }

    /// The smallest circle containing this circle and `other`.
    #[must_use]
    pub fn expanded_to(&self, other: &Self) -> Self {
        if other.is_empty() {
            return *self;
        }
        if self.is_empty() {
            return *other;
        }
        if self.is_full() || other.is_full() {
            return Self::full();
        }
        let a1 = self.opening_angle().as_radians();
        let a2 = other.opening_angle().as_radians();
        let d = super::algo::separation(&self.center, &other.center);
        if d + a2 <= a1 {
            return *self;
        }
        if d + a1 <= a2 {
            return *other;
        }
        let radius = 0.5 * (d + a1 + a2);
        if radius >= PI {
            return Self::full();
        }
        let center = self
            .center
            .rotated_towards(&other.center, Angle::new(radius - a1));
        Self::from_angle(center, Angle::new(radius))
    }

    /// A circle covering the intersection of this circle and the direction
    /// `v` (the point itself when contained, empty otherwise).
    #[must_use]
    pub fn clipped_to_point(&self, v: &UnitVector3d) -> Self {
        if self.contains(v) {
            Self::from_point(*v)
        } else {
            Self::empty()
        }
    }

    /// The smallest circle found to contain the intersection of this circle
    /// and `other`.
    #[must_use]
    pub fn clipped_to(&self, other: &Self) -> Self {
        if self.is_empty() || other.is_empty() {
            return Self::empty();
        }
        if other.is_full() {
            return *self;
        }
        if self.is_full() {
            return *other;
        }
        let a1 = self.opening_angle().as_radians();
        let a2 = other.opening_angle().as_radians();
        let d = super::algo::separation(&self.center, &other.center);
        if d + a2 <= a1 {
            return *other;
        }
        if d + a1 <= a2 {
            return *self;
        }
        if d > a1 + a2 {
            return Self::empty();
        }
        // Partial overlap: cover the lens with a circle spanning its
        // extent along the line of centers.
        let near = (d - a2).max(-a1);
        let far = a1.min(d + a2);
        let radius = 0.5 * (far - near);
        let center = self
            .center
            .rotated_towards(&other.center, Angle::new(0.5 * (near + far)));
        let mut result = Self::from_angle(center, Angle::new(radius));
        // The lens corners (where the two boundaries meet) can stick out a
        // little; widen the cover to include them.
        if let Some(corner) = lens_corner(self, other) {
            let s = result.center.squared_chord_distance(&corner);
            if s > result.squared_chord_length {
                result = Self::new(result.center, s);
            }
        }
        result
    }

    /// This circle with its opening angle grown by `angle` (shrunk for
    /// negative `angle`; empty and full circles are unaffected).
    #[must_use]
    pub fn dilated_by(&self, angle: Angle) -> Self {
        if self.is_empty() || self.is_full() || angle.is_nan() {
            return *self;
        }
        let alpha = self.opening_angle() + angle;
        Self::from_angle(self.center, alpha)
    }

    /// This circle with its opening angle shrunk by `angle`.
    #[must_use]
    pub fn eroded_by(&self, angle: Angle) -> Self {
        self.dilated_by(-angle)
    }

    /// In-place [`expanded_to`](Self::expanded_to).
    pub fn expand_to(&mut self, other: &Self) -> &mut Self {
        *self = self.expanded_to(other);
        self
    }

    /// In-place [`expanded_to_point`](Self::expanded_to_point).
    pub fn expand_to_point(&mut self, v: &UnitVector3d) -> &mut Self {
        *self = self.expanded_to_point(v);
        self
    }

    /// In-place [`clipped_to`](Self::clipped_to).
    pub fn clip_to(&mut self, other: &Self) -> &mut Self {
        *self = self.clipped_to(other);
        self
    }

    /// In-place [`clipped_to_point`](Self::clipped_to_point).
    pub fn clip_to_point(&mut self, v: &UnitVector3d) -> &mut Self {
        *self = self.clipped_to_point(v);
        self
    }

    /// In-place [`dilated_by`](Self::dilated_by).
    pub fn dilate_by(&mut self, angle: Angle) -> &mut Self {
        *self = self.dilated_by(angle);
        self
    }

    /// In-place [`eroded_by`](Self::eroded_by).
    pub fn erode_by(&mut self, angle: Angle) -> &mut Self {
        *self = self.eroded_by(angle);
        self
    }

    /// The bitmask of relations holding between this circle and `other`.
    #[must_use]
    pub fn relate_circle(&self, other: &Self) -> Relationship {
        if self.is_empty() {
            if other.is_empty() {
                return Relationship::CONTAINS
                    | Relationship::DISJOINT
                    | Relationship::WITHIN;
            }
            return Relationship::DISJOINT | Relationship::WITHIN;
        }
        if other.is_empty() {
            return Relationship::CONTAINS | Relationship::DISJOINT;
        }
        let a1 = self.opening_angle().as_radians();
        let a2 = other.opening_angle().as_radians();
        let d = super::algo::separation(&self.center, &other.center);
        let mut r = Relationship::empty();
        if d + a2 <= a1 || self.is_full() {
            r |= Relationship::CONTAINS;
        }
        if d + a1 <= a2 || other.is_full() {
            r |= Relationship::WITHIN;
        }
        if d > a1 + a2 {
            r |= Relationship::DISJOINT;
        }
        if r.is_empty() {
            r = Relationship::INTERSECTS;
        }
        r
    }

    /// The tightest longitude/latitude box containing this circle.
    #[must_use]
    pub fn bounding_box(&self) -> LonLatBox {
        if self.is_empty() {
            return LonLatBox::empty();
        }
        if self.is_full() {
            return LonLatBox::full();
        }
        let center = LonLat::from(&self.center);
        let alpha = self.opening_angle().as_radians() + crate::ANGLE_EPSILON;
        let lat_lo = center.lat().as_radians() - alpha;
        let lat_hi = center.lat().as_radians() + alpha;
        let lat = AngleInterval::from_radians(
            lat_lo.max(-FRAC_PI_2),
            lat_hi.min(FRAC_PI_2),
        );
        if lat_hi >= FRAC_PI_2 || lat_lo <= -FRAC_PI_2 {
            // The circle reaches a pole: every longitude occurs.
            return LonLatBox::new(NormalizedAngleInterval::full(), lat);
        }
        // sin δ = sin α / cos φ gives the half-width in longitude.
        let sin_delta = alpha.sin() / center.lat().cos();
        let delta = sin_delta.clamp(-1.0, 1.0).asin() + crate::ANGLE_EPSILON;
        let lon = NormalizedAngleInterval::from_radians(
            center.lon().as_radians() - delta,
            center.lon().as_radians() + delta,
        );
        LonLatBox::new(lon, lat)
    }

    /// A 3D box containing this circle.
    #[must_use]
    pub fn bounding_box3d(&self) -> Box3d {
        if self.is_empty() {
            return Box3d::empty();
        }
        let alpha = self.opening_angle().as_radians();
        let axes = [UnitVector3d::X, UnitVector3d::Y, UnitVector3d::Z];
        let mut intervals = [Interval1d::empty(); 3];
        for (interval, axis) in intervals.iter_mut().zip(axes) {
            let theta = super::algo::separation(&self.center, &axis);
            let lo = if theta + alpha >= PI {
                -1.0
            } else {
                (theta + alpha).cos()
            };
            let hi = if theta <= alpha { 1.0 } else { (theta - alpha).cos() };
            *interval = Interval1d::new(
                (lo - crate::ANGLE_EPSILON).max(-1.0),
                (hi + crate::ANGLE_EPSILON).min(1.0),
            );
        }
        Box3d::new(intervals[0], intervals[1], intervals[2])
    }

    /// The bounding circle of this circle: itself.
    #[must_use]
    pub const fn bounding_circle(&self) -> Self {
        *self
    }

    /// This circle with its squared chord length nudged up by a relative
    /// epsilon, for use as a safe cover.
    pub(crate) fn dilated_for_bounds(&self) -> Self {
        if self.is_empty() || self.is_full() {
            return *self;
        }
        Self::new(
            self.center,
            self.squared_chord_length
                .mul_add(1.0 + CHORD_EPSILON, CHORD_EPSILON),
        )
    }
}

/// `s² = 2·(1 − cos α)`, clamped to `[0, 4]`.
fn squared_chord_length_for(angle: Angle) -> f64 {
    if angle.as_radians() < 0.0 {
        return -1.0;
    }
    if angle.as_radians() >= PI {
        return 4.0;
    }
    let s = (0.5 * angle.as_radians()).sin();
    (4.0 * s * s).clamp(0.0, 4.0)
}

/// `α = 2·asin(√s² / 2)`.
fn opening_angle_for(squared_chord_length: f64) -> Angle {
    if squared_chord_length < 0.0 {
        return Angle::new(-1.0);
    }
    if squared_chord_length >= 4.0 {
        return Angle::new(PI);
    }
    Angle::new(2.0 * (0.5 * squared_chord_length.sqrt()).asin())
}

/// A point where the boundaries of two partially overlapping circles meet.
fn lens_corner(c1: &Circle, c2: &Circle) -> Option<UnitVector3d> {
    let u1 = c1.center.as_vector3d();
    let u2 = c2.center.as_vector3d();
    let d1 = 1.0 - 0.5 * c1.squared_chord_length;
    let d2 = 1.0 - 0.5 * c2.squared_chord_length;
    let g = u1.dot(u2);
    let det = 1.0 - g * g;
    if det <= 0.0 {
        return None;
    }
    // Solve p·u1 = cos α1, p·u2 = cos α2 for p = x·u1 + y·u2 + z·(u1×u2).
    let x = (d1 - g * d2) / det;
    let y = (d2 - g * d1) / det;
    let base = *u1 * x + *u2 * y;
    let h2 = 1.0 - base.squared_norm();
    if h2 < 0.0 {
        return None;
    }
    let n = u1.cross(u2);
    let nn = n.norm();
    if nn == 0.0 {
        return None;
    }
    let p = base + n * (h2.sqrt() / nn);
    if p.is_zero() {
        return None;
    }
    Some(UnitVector3d::normalized(&p))
}

impl PartialEq for Circle {
    /// Empty circles are all equal, as are full circles; other circles
    /// compare by center and squared chord length.
    fn eq(&self, other: &Self) -> bool {
        (self.is_empty() && other.is_empty())
            || (self.is_full() && other.is_full())
            || (self.center == other.center
                && self.squared_chord_length == other.squared_chord_length)
    }
}

impl fmt::Display for Circle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Circle({}, {})", self.center, self.squared_chord_length)
    }
}

#[cfg(test)]
#[path = "./circle_tests.rs"]
mod tests;
