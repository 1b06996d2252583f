use crate::{interval::Interval1d, Angle, NormalizedAngle, Relationship, TWO_PI};
use std::fmt;

/// A closed interval of angles on the unit circle.
///
/// Bounds lie in `[0, 2π)`; an interval with `a > b` wraps across zero and
/// denotes `[a, 2π) ∪ [0, b]`. The empty interval and the full circle are
/// distinguished values.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedAngleInterval {
    a: f64,
    b: f64,
}

impl NormalizedAngleInterval {
    /// Initializes a new interval from `a` to `b` (counter-clockwise).
    #[must_use]
    pub fn new(a: NormalizedAngle, b: NormalizedAngle) -> Self {
        if a.is_nan() || b.is_nan() {
            return Self::empty();
        }
        Self {
            a: a.as_radians(),
            b: b.as_radians(),
        }
    }

    /// Initializes a new interval from bounds in radians.
    ///
    /// The bounds are wrapped to `[0, 2π)`; a raw span of 2π or more yields
    /// the full circle.
    #[must_use]
    pub fn from_radians(a: f64, b: f64) -> Self {
        if b - a >= TWO_PI {
            return Self::full();
        }
        Self::new(
            NormalizedAngle::from_radians(a),
            NormalizedAngle::from_radians(b),
        )
    }

    /// Initializes a new interval from bounds in degrees.
    #[must_use]
    pub fn from_degrees(a: f64, b: f64) -> Self {
        Self::from_radians(a.to_radians(), b.to_radians())
    }

    /// The interval containing only `x`.
    #[must_use]
    pub fn point(x: NormalizedAngle) -> Self {
        Self::new(x, x)
    }

    /// The empty interval.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            a: f64::NAN,
            b: f64::NAN,
        }
    }

    /// The full circle.
    #[must_use]
    pub const fn full() -> Self {
        Self { a: 0.0, b: TWO_PI }
    }

    /// The lower bound.
    #[must_use]
    pub fn get_a(&self) -> NormalizedAngle {
        NormalizedAngle::from_radians(self.a)
    }

    /// The upper bound.
    #[must_use]
    pub fn get_b(&self) -> NormalizedAngle {
        NormalizedAngle::from_radians(self.b)
    }

    /// Returns true if this interval is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.a.is_nan()
    }

    /// Returns true if this interval is the full circle.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.a == 0.0 && self.b == TWO_PI
    }

    /// Returns true if this interval wraps across zero.
    #[must_use]
    pub fn wraps(&self) -> bool {
        self.a > self.b
    }

    /// The arc length of this interval (NaN when empty, 2π when full).
    #[must_use]
    pub fn get_size(&self) -> Angle {
        if self.is_full() {
            return Angle::new(TWO_PI);
        }
        if self.wraps() {
            Angle::new(TWO_PI - (self.a - self.b))
        } else {
            Angle::new(self.b - self.a)
        }
    }

    /// The center of this interval (NaN when empty).
    #[must_use]
    pub fn get_center(&self) -> NormalizedAngle {
        if self.is_empty() {
            return NormalizedAngle::from_radians(f64::NAN);
        }
        NormalizedAngle::from_radians(
            0.5f64.mul_add(self.get_size().as_radians(), self.a),
        )
    }

    /// This interval as one or two non-wrapping arcs within `[0, 2π]`.
    fn arcs(&self) -> (Interval1d, Option<Interval1d>) {
        if self.is_empty() {
            return (Interval1d::empty(), None);
        }
        if self.wraps() {
            (
                Interval1d::new(self.a, TWO_PI),
                Some(Interval1d::new(0.0, self.b)),
            )
        } else {
            (Interval1d::new(self.a, self.b), None)
        }
    }

    /// Returns true if this interval contains the angle `x`.
    #[must_use]
    pub fn contains_angle(&self, x: NormalizedAngle) -> bool {
        if self.is_empty() {
            return false;
        }
        if self.is_full() {
            return true;
        }
        let x = x.as_radians();
        if self.wraps() {
            x >= self.a || x <= self.b
        } else {
            x >= self.a && x <= self.b
        }
    }

    /// Returns true if this interval contains `other`.
    #[must_use]
    pub fn contains(&self, other: impl Into<Self>) -> bool {
        let o = other.into();
        if o.is_empty() || self.is_full() {
            return true;
        }
        if self.is_empty() || o.is_full() {
            return false;
        }
        let (sa, sb) = self.arcs();
        let each_covered = |arc: Interval1d| {
            arc.is_within(sa) || sb.is_some_and(|s| arc.is_within(s))
        };
        let (oa, ob) = o.arcs();
        each_covered(oa) && ob.map_or(true, each_covered)
    }

    /// Returns true if this interval is a subset of `other`.
    #[must_use]
    pub fn is_within(&self, other: impl Into<Self>) -> bool {
        other.into().contains(*self)
    }

    /// Returns true if this interval and `other` have a point in common.
    #[must_use]
    pub fn intersects(&self, other: impl Into<Self>) -> bool {
        let o = other.into();
        if self.is_empty() || o.is_empty() {
            return false;
        }
        if self.is_full() || o.is_full() {
            return true;
        }
        let (sa, sb) = self.arcs();
        let (oa, ob) = o.arcs();
        let hits = |arc: Interval1d| {
            arc.intersects(sa) || sb.is_some_and(|s| arc.intersects(s))
        };
        hits(oa) || ob.is_some_and(hits)
    }

    /// Returns true if this interval and `other` have no point in common.
    #[must_use]
    pub fn is_disjoint_from(&self, other: impl Into<Self>) -> bool {
        !self.intersects(other)
    }

    /// The bitmask of relations holding between this interval and `other`.
    #[must_use]
    pub fn relate(&self, other: impl Into<Self>) -> Relationship {
        let o = other.into();
        if self.is_empty() {
            if o.is_empty() {
                return Relationship::CONTAINS
                    | Relationship::DISJOINT
                    | Relationship::WITHIN;
            }
            return Relationship::DISJOINT | Relationship::WITHIN;
        }
        if o.is_empty() {
            return Relationship::CONTAINS | Relationship::DISJOINT;
        }
        let mut r = Relationship::empty();
        if self.contains(o) {
            r |= Relationship::CONTAINS;
        }
        if o.contains(*self) {
            r |= Relationship::WITHIN;
        }
        if self.is_disjoint_from(o) {
            r |= Relationship::DISJOINT;
        }
        if r.is_empty() {
            r = Relationship::INTERSECTS;
        }
        r
    }

    /// The smallest interval containing this interval and `other`.
    ///
    /// When the two intervals are disjoint, the gap-minimizing direction is
    /// chosen; ties keep the lower bound of this interval fixed.
    #[must_use]
    pub fn expanded_to(&self, other: impl Into<Self>) -> Self {
        let o = other.into();
        if self.is_empty() {
            return o;
        }
        if o.is_empty() {
            return *self;
        }
        if self.is_full() || o.is_full() {
            return Self::full();
        }
        if self.contains(o) {
            return *self;
        }
        if o.contains(*self) {
            return o;
        }
        let contains_a = self.contains_angle(o.get_a());
        let contains_b = self.contains_angle(o.get_b());
        if contains_a && contains_b {
            // Each interval sticks out of the other on both sides.
            return Self::full();
        }
        if contains_a {
            return Self {
                a: self.a,
                b: o.b,
            };
        }
        if contains_b {
            return Self {
                a: o.a,
                b: self.b,
            };
        }
        // Disjoint: close the smaller of the two gaps.
        let gap_after = self.get_b().get_angle_to(o.get_a());
        let gap_before = o.get_b().get_angle_to(self.get_a());
        if gap_after < gap_before {
            Self {
                a: self.a,
                b: o.b,
            }
        } else {
            Self {
                a: o.a,
                b: self.b,
            }
        }
    }

    /// The smallest interval containing the intersection of this interval
    /// and `other`.
    ///
    /// The intersection of two circular intervals can consist of two
    /// disjoint arcs; in that case the returned interval covers both.
    #[must_use]
    pub fn clipped_to(&self, other: impl Into<Self>) -> Self {
        let o = other.into();
        if self.is_empty() || o.is_empty() {
            return Self::empty();
        }
        if o.is_full() {
            return *self;
        }
        if self.is_full() {
            return o;
        }
        if o.contains(*self) {
            return *self;
        }
        if self.contains(o) {
            return o;
        }
        let (sa, sb) = self.arcs();
        let (oa, ob) = o.arcs();
        let mut pieces = Vec::with_capacity(4);
        for s in [Some(sa), sb].into_iter().flatten() {
            for oo in [Some(oa), ob].into_iter().flatten() {
                let clip = s.clipped_to(oo);
                if !clip.is_empty() {
                    pieces.push(clip);
                }
            }
        }
        let mut result = Self::empty();
        for piece in pieces {
            let arc = Self::from_radians(piece.get_a(), piece.get_b());
            result = result.expanded_to(arc);
        }
        result
    }

    /// This interval with both bounds moved outwards by `x` (inwards for
    /// negative `x`).
    ///
    /// Dilation that reaches a full turn saturates at the full circle;
    /// erosion past a zero size empties the interval.
    #[must_use]
    pub fn dilated_by(&self, x: Angle) -> Self {
        if self.is_empty() || self.is_full() || x.is_nan() {
            return *self;
        }
        let x = x.as_radians();
        let size = self.get_size().as_radians();
        if 2.0f64.mul_add(x, size) >= TWO_PI {
            return Self::full();
        }
        if 2.0f64.mul_add(x, size) < 0.0 {
            return Self::empty();
        }
        Self::new(
            NormalizedAngle::from_radians(self.a - x),
            NormalizedAngle::from_radians(self.b + x),
        )
    }

    /// This interval with both bounds moved inwards by `x`.
    #[must_use]
    pub fn eroded_by(&self, x: Angle) -> Self {
        self.dilated_by(-x)
    }

    /// In-place [`expanded_to`](Self::expanded_to).
    pub fn expand_to(&mut self, other: impl Into<Self>) -> &mut Self {
        *self = self.expanded_to(other);
        self
    }

    /// In-place [`clipped_to`](Self::clipped_to).
    pub fn clip_to(&mut self, other: impl Into<Self>) -> &mut Self {
        *self = self.clipped_to(other);
        self
    }

    /// In-place [`dilated_by`](Self::dilated_by).
    pub fn dilate_by(&mut self, x: Angle) -> &mut Self {
        *self = self.dilated_by(x);
        self
    }

    /// In-place [`eroded_by`](Self::eroded_by).
    pub fn erode_by(&mut self, x: Angle) -> &mut Self {
        *self = self.eroded_by(x);
        self
    }
}

impl PartialEq for NormalizedAngleInterval {
    fn eq(&self, other: &Self) -> bool {
        (self.is_empty() && other.is_empty())
            || (self.a == other.a && self.b == other.b)
    }
}

impl From<NormalizedAngle> for NormalizedAngleInterval {
    fn from(value: NormalizedAngle) -> Self {
        Self::point(value)
    }
}

impl fmt::Display for NormalizedAngleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.a, self.b)
    }
}

#[cfg(test)]
#[path = "./normalized_angle_interval_tests.rs"]
mod tests;
