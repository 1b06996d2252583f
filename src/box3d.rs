use crate::{Interval1d, Relationship, Vector3d};
use std::fmt;

/// An axis-aligned box in ℝ³, the product of three closed intervals.
///
/// Used as a conservative 3D bound for spherical regions; empty iff any of
/// its components is empty (canonicalized so that all three are).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Box3d {
    x: Interval1d,
    y: Interval1d,
    z: Interval1d,
}

impl Box3d {
    /// Initializes a new box as a product of intervals.
    #[must_use]
    pub fn new(x: Interval1d, y: Interval1d, z: Interval1d) -> Self {
        if x.is_empty() || y.is_empty() || z.is_empty() {
            return Self::empty();
        }
        Self { x, y, z }
    }

    /// The box containing only `v`.
    #[must_use]
    pub fn from_point(v: &Vector3d) -> Self {
        Self {
            x: Interval1d::point(v.x),
            y: Interval1d::point(v.y),
            z: Interval1d::point(v.z),
        }
    }

    /// The box spanned by two corner points.
    #[must_use]
    pub fn from_corners(lo: &Vector3d, hi: &Vector3d) -> Self {
        Self::new(
            Interval1d::new(lo.x, hi.x),
            Interval1d::new(lo.y, hi.y),
            Interval1d::new(lo.z, hi.z),
        )
    }

    /// The box centered at `center` with the given half-widths.
    #[must_use]
    pub fn from_center(center: &Vector3d, hw: f64, hh: f64, hd: f64) -> Self {
        Self::new(
            Interval1d::new(center.x - hw, center.x + hw),
            Interval1d::new(center.y - hh, center.y + hh),
            Interval1d::new(center.z - hd, center.z + hd),
        )
    }

    /// The empty box.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            x: Interval1d::empty(),
            y: Interval1d::empty(),
            z: Interval1d::empty(),
        }
    }

    /// The box containing all of ℝ³.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            x: Interval1d::full(),
            y: Interval1d::full(),
            z: Interval1d::full(),
        }
    }

    /// The box `[-1, 1]³`, a bound for the whole unit sphere.
    #[must_use]
    pub fn around_unit_sphere() -> Self {
        Self {
            x: Interval1d::new(-1.0, 1.0),
            y: Interval1d::new(-1.0, 1.0),
            z: Interval1d::new(-1.0, 1.0),
        }
    }

    /// The extent of this box along the x axis.
    #[must_use]
    pub const fn x(&self) -> Interval1d {
        self.x
    }

    /// The extent of this box along the y axis.
    #[must_use]
    pub const fn y(&self) -> Interval1d {
        self.y
    }

    /// The extent of this box along the z axis.
    #[must_use]
    pub const fn z(&self) -> Interval1d {
        self.z
    }

    /// The center of this box.
    #[must_use]
    pub fn get_center(&self) -> Vector3d {
        Vector3d::new(
            self.x.get_center(),
            self.y.get_center(),
            self.z.get_center(),
        )
    }

    /// The x extent of this box.
    #[must_use]
    pub fn get_width(&self) -> f64 {
        self.x.get_size()
    }

    /// The y extent of this box.
    #[must_use]
    pub fn get_height(&self) -> f64 {
        self.y.get_size()
    }

    /// The z extent of this box.
    #[must_use]
    pub fn get_depth(&self) -> f64 {
        self.z.get_size()
    }

    /// Returns true if this box is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Returns true if this box contains all of ℝ³.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.x.is_full() && self.y.is_full() && self.z.is_full()
    }

    /// Returns true if this box contains `other`.
    #[must_use]
    pub fn contains(&self, other: impl Into<Self>) -> bool {
        let o = other.into();
        self.x.contains(o.x) && self.y.contains(o.y) && self.z.contains(o.z)
    }

    /// Returns true if this box is a subset of `other`.
    #[must_use]
    pub fn is_within(&self, other: impl Into<Self>) -> bool {
        other.into().contains(*self)
    }

    /// Returns true if this box and `other` have a point in common.
    #[must_use]
    pub fn intersects(&self, other: impl Into<Self>) -> bool {
        let o = other.into();
        self.x.intersects(o.x)
            && self.y.intersects(o.y)
            && self.z.intersects(o.z)
    }

    /// Returns true if this box and `other` have no point in common.
    #[must_use]
    pub fn is_disjoint_from(&self, other: impl Into<Self>) -> bool {
        !self.intersects(other)
    }

    /// The bitmask of relations holding between this box and `other`.
    #[must_use]
    pub fn relate(&self, other: impl Into<Self>) -> Relationship {
        let o = other.into();
        let rx = self.x.relate(o.x);
        let ry = self.y.relate(o.y);
        let rz = self.z.relate(o.z);
        let mut r = rx
            & ry
            & rz
            & (Relationship::CONTAINS | Relationship::WITHIN);
        r |= (rx | ry | rz) & Relationship::DISJOINT;
        if r.is_empty() {
            r = Relationship::INTERSECTS;
        }
        r
    }

    /// The smallest box containing this box and `other`.
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
            x: self.x.expanded_to(o.x),
            y: self.y.expanded_to(o.y),
            z: self.z.expanded_to(o.z),
        }
    }

    /// The intersection of this box and `other`.
    #[must_use]
    pub fn clipped_to(&self, other: impl Into<Self>) -> Self {
        let o = other.into();
        Self::new(
            self.x.clipped_to(o.x),
            self.y.clipped_to(o.y),
            self.z.clipped_to(o.z),
        )
    }

    /// This box with every face moved outwards by `r` (inwards for negative
    /// `r`).
    #[must_use]
    pub fn dilated_by(&self, r: f64) -> Self {
        self.dilated_by_widths(r, r, r)
    }

    /// This box dilated by a per-axis amount.
    #[must_use]
    pub fn dilated_by_widths(&self, w: f64, h: f64, d: f64) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self::new(
            self.x.dilated_by(w),
            self.y.dilated_by(h),
            self.z.dilated_by(d),
        )
    }

    /// This box with every face moved inwards by `r`.
    #[must_use]
    pub fn eroded_by(&self, r: f64) -> Self {
        self.dilated_by(-r)
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
    pub fn dilate_by(&mut self, r: f64) -> &mut Self {
        *self = self.dilated_by(r);
        self
    }

    /// In-place [`eroded_by`](Self::eroded_by).
    pub fn erode_by(&mut self, r: f64) -> &mut Self {
        *self = self.eroded_by(r);
        self
    }
}

impl From<Vector3d> for Box3d {
    fn from(value: Vector3d) -> Self {
        Self::from_point(&value)
    }
}

impl fmt::Display for Box3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},\n {},\n {}]", self.x, self.y, self.z)
    }
}

#[cfg(test)]
#[path = "./box3d_tests.rs"]
mod tests;
