use crate::{Angle, Relationship};
use std::fmt;

/// A closed interval `[a, b]` over the extended reals.
///
/// The canonical empty interval is NaN-bounded; constructing an interval
/// with `a > b` (or a NaN endpoint) collapses to it. Every predicate treats
/// the empty interval as contained by and disjoint from everything.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interval1d {
    a: f64,
    b: f64,
}

impl Interval1d {
    /// Initializes a new interval with the given endpoints.
    ///
    /// Inverted or NaN bounds produce the empty interval.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self::empty()
        }
    }

    /// The interval containing only `x`.
    #[must_use]
    pub fn point(x: f64) -> Self {
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

    /// The interval containing every real number.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            a: f64::NEG_INFINITY,
            b: f64::INFINITY,
        }
    }

    /// The lower bound (NaN for the empty interval).
    #[must_use]
    pub const fn get_a(&self) -> f64 {
        self.a
    }

    /// The upper bound (NaN for the empty interval).
    #[must_use]
    pub const fn get_b(&self) -> f64 {
        self.b
    }

    /// The center of this interval (NaN when empty).
    #[must_use]
    pub fn get_center(&self) -> f64 {
        0.5 * (self.a + self.b)
    }

    /// The size of this interval (NaN when empty).
    #[must_use]
    pub fn get_size(&self) -> f64 {
        self.b - self.a
    }

    /// Returns true if this interval is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        // NaN bounds make this false for the canonical empty value.
        !(self.a <= self.b)
    }

    /// Returns true if this interval contains every real number.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.a == f64::NEG_INFINITY && self.b == f64::INFINITY
    }

    /// Returns true if this interval contains `other`.
    #[must_use]
    pub fn contains(&self, other: impl Into<Self>) -> bool {
        let o = other.into();
        if o.is_empty() {
            return true;
        }
        self.a <= o.a && o.b <= self.b
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
        self.a <= o.b && o.a <= self.b
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
    #[must_use]
    pub fn expanded_to(&self, other: impl Into<Self>) -> Self {
        let o = other.into();
        if self.is_empty() {
            return o;
        }
        if o.is_empty() {
            return *self;
        }
        Self {
            a: self.a.min(o.a),
            b: self.b.max(o.b),
        }
    }

    /// The intersection of this interval and `other`.
    #[must_use]
    pub fn clipped_to(&self, other: impl Into<Self>) -> Self {
        let o = other.into();
        if self.is_empty() || o.is_empty() {
            return Self::empty();
        }
        Self::new(self.a.max(o.a), self.b.min(o.b))
    }

    /// This interval with both endpoints moved outwards by `x` (inwards for
    /// negative `x`; over-erosion empties the interval).
    #[must_use]
    pub fn dilated_by(&self, x: f64) -> Self {
        if self.is_empty() || x.is_nan() {
            return *self;
        }
        Self::new(self.a - x, self.b + x)
    }

    /// This interval with both endpoints moved inwards by `x`.
    #[must_use]
    pub fn eroded_by(&self, x: f64) -> Self {
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
    pub fn dilate_by(&mut self, x: f64) -> &mut Self {
        *self = self.dilated_by(x);
        self
    }

    /// In-place [`eroded_by`](Self::eroded_by).
    pub fn erode_by(&mut self, x: f64) -> &mut Self {
        *self = self.eroded_by(x);
        self
    }
}

impl PartialEq for Interval1d {
    fn eq(&self, other: &Self) -> bool {
        (self.is_empty() && other.is_empty())
            || (self.a == other.a && self.b == other.b)
    }
}

impl From<f64> for Interval1d {
    fn from(value: f64) -> Self {
        Self::point(value)
    }
}

impl fmt::Display for Interval1d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.a, self.b)
    }
}

// -----------------------------------------------------------------------------

/// A closed interval of angles (without wrap-around; see
/// [`NormalizedAngleInterval`](crate::NormalizedAngleInterval) for the
/// circular variant).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngleInterval(Interval1d);

impl AngleInterval {
    /// Initializes a new interval with the given endpoints.
    #[must_use]
    pub fn new(a: Angle, b: Angle) -> Self {
        Self(Interval1d::new(a.as_radians(), b.as_radians()))
    }

    /// Initializes a new interval from endpoints in radians.
    #[must_use]
    pub fn from_radians(a: f64, b: f64) -> Self {
        Self(Interval1d::new(a, b))
    }

    /// Initializes a new interval from endpoints in degrees.
    #[must_use]
    pub fn from_degrees(a: f64, b: f64) -> Self {
        Self(Interval1d::new(a.to_radians(), b.to_radians()))
    }

    /// The interval containing only `x`.
    #[must_use]
    pub fn point(x: Angle) -> Self {
        Self(Interval1d::point(x.as_radians()))
    }

    /// The empty interval.
    #[must_use]
    pub const fn empty() -> Self {
        Self(Interval1d::empty())
    }

    /// The lower bound.
    #[must_use]
    pub const fn get_a(&self) -> Angle {
        Angle::new(self.0.get_a())
    }

    /// The upper bound.
    #[must_use]
    pub const fn get_b(&self) -> Angle {
        Angle::new(self.0.get_b())
    }

    /// The center of this interval.
    #[must_use]
    pub fn get_center(&self) -> Angle {
        Angle::new(self.0.get_center())
    }

    /// The size of this interval.
    #[must_use]
    pub fn get_size(&self) -> Angle {
        Angle::new(self.0.get_size())
    }

    /// Returns true if this interval is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns true if this interval contains `other`.
    #[must_use]
    pub fn contains(&self, other: impl Into<Self>) -> bool {
        self.0.contains(other.into().0)
    }

    /// Returns true if this interval is a subset of `other`.
    #[must_use]
    pub fn is_within(&self, other: impl Into<Self>) -> bool {
        self.0.is_within(other.into().0)
    }

    /// Returns true if this interval and `other` have a point in common.
    #[must_use]
    pub fn intersects(&self, other: impl Into<Self>) -> bool {
        self.0.intersects(other.into().0)
    }

    /// Returns true if this interval and `other` have no point in common.
    #[must_use]
    pub fn is_disjoint_from(&self, other: impl Into<Self>) -> bool {
        self.0.is_disjoint_from(other.into().0)
    }

    /// The bitmask of relations holding between this interval and `other`.
    #[must_use]
    pub fn relate(&self, other: impl Into<Self>) -> Relationship {
        self.0.relate(other.into().0)
    }

    /// The smallest interval containing this interval and `other`.
    #[must_use]
    pub fn expanded_to(&self, other: impl Into<Self>) -> Self {
        Self(self.0.expanded_to(other.into().0))
    }

    /// The intersection of this interval and `other`.
    #[must_use]
    pub fn clipped_to(&self, other: impl Into<Self>) -> Self {
        Self(self.0.clipped_to(other.into().0))
    }

    /// This interval with both endpoints moved outwards by `x`.
    #[must_use]
    pub fn dilated_by(&self, x: Angle) -> Self {
        Self(self.0.dilated_by(x.as_radians()))
    }

    /// This interval with both endpoints moved inwards by `x`.
    #[must_use]
    pub fn eroded_by(&self, x: Angle) -> Self {
        Self(self.0.eroded_by(x.as_radians()))
    }

    /// In-place [`expanded_to`](Self::expanded_to).
    pub fn expand_to(&mut self, other: impl Into<Self>) -> &mut Self {
        self.0.expand_to(other.into().0);
        self
    }

    /// In-place [`clipped_to`](Self::clipped_to).
    pub fn clip_to(&mut self, other: impl Into<Self>) -> &mut Self {
        self.0.clip_to(other.into().0);
        self
    }

    /// In-place [`dilated_by`](Self::dilated_by).
    pub fn dilate_by(&mut self, x: Angle) -> &mut Self {
        self.0.dilate_by(x.as_radians());
        self
    }

    /// In-place [`eroded_by`](Self::eroded_by).
    pub fn erode_by(&mut self, x: Angle) -> &mut Self {
        self.0.erode_by(x.as_radians());
        self
    }
}

impl From<Angle> for AngleInterval {
    fn from(value: Angle) -> Self {
        Self::point(value)
    }
}

impl fmt::Display for AngleInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "./interval_tests.rs"]
mod tests;
