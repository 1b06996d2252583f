use crate::{
    Angle, Box3d, Circle, LonLatBox, NormalizedAngle, Relationship,
    UnitVector3d, ANGLE_EPSILON,
};
use std::{
    f64::consts::{FRAC_PI_2, PI},
    fmt,
};

/// A spherical ellipse: the points whose angular distances to two foci sum
/// to at most `2α`.
///
/// Coincident foci degenerate to a circle of opening angle α. The empty
/// ellipse carries the sentinel `α = -1`; an ellipse is full when
/// `α ≥ π − γ` (γ being half the focal separation).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ellipse {
    f1: UnitVector3d,
    f2: UnitVector3d,
    alpha: Angle,
}

impl Ellipse {
    /// Initializes a new ellipse from its foci and semi-sum angle.
    ///
    /// A NaN or negative α yields the empty ellipse.
    #[must_use]
    pub fn new(f1: UnitVector3d, f2: UnitVector3d, alpha: Angle) -> Self {
        if alpha.is_nan() || alpha.as_radians() < 0.0 {
            return Self::empty();
        }
        Self {
            f1,
            f2,
            alpha: Angle::new(alpha.as_radians().min(PI)),
        }
    }

    /// The circle-degenerate ellipse centered at `center`.
    #[must_use]
    pub fn from_center(center: UnitVector3d, alpha: Angle) -> Self {
        Self::new(center, center, alpha)
    }

    /// The ellipse equivalent to `circle`.
    #[must_use]
    pub fn from_circle(circle: &Circle) -> Self {
        if circle.is_empty() {
            return Self::empty();
        }
        Self::from_center(*circle.center(), circle.opening_angle())
    }

    /// The ellipse centered at `center` with semi-major axis `alpha`,
    /// semi-minor axis `beta`, and the major axis at position angle
    /// `orientation` (east of north).
    ///
    /// Axes given in the wrong order are swapped (with the orientation
    /// rotated a quarter turn).
    #[must_use]
    pub fn from_axes(
        center: UnitVector3d,
        alpha: Angle,
        beta: Angle,
        orientation: Angle,
    ) -> Self {
        if alpha.is_nan() || beta.is_nan() || alpha.as_radians() < 0.0 {
            return Self::empty();
        }
        let (a, b, orientation) = if alpha.as_radians() >= beta.as_radians() {
            (alpha, beta, orientation)
        } else {
            (beta, alpha, orientation + Angle::new(FRAC_PI_2))
        };
        if a == b {
            return Self::from_center(center, a);
        }
        // cos α = cos γ · cos β fixes the focal half-separation.
        let cos_gamma = (a.cos() / b.cos()).clamp(-1.0, 1.0);
        let gamma = cos_gamma.acos();
        let north = UnitVector3d::north_from(center.as_vector3d());
        let east = UnitVector3d::normalized(&north.cross(&center));
        let tangent = *north.as_vector3d() * orientation.cos()
            + *east.as_vector3d() * orientation.sin();
        let f1 = *center.as_vector3d() * gamma.cos() + tangent * gamma.sin();
        let f2 = *center.as_vector3d() * gamma.cos() - tangent * gamma.sin();
        Self::new(
            UnitVector3d::normalized(&f1),
            UnitVector3d::normalized(&f2),
            a,
        )
    }

    /// The empty ellipse.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            f1: UnitVector3d::X,
            f2: UnitVector3d::X,
            alpha: Angle::new(-1.0),
        }
    }

    /// The full sphere.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            f1: UnitVector3d::X,
            f2: UnitVector3d::X,
            alpha: Angle::new(PI),
        }
    }

    /// The first focus.
    #[must_use]
    pub const fn get_f1(&self) -> &UnitVector3d {
        &self.f1
    }

    /// The second focus.
    #[must_use]
    pub const fn get_f2(&self) -> &UnitVector3d {
        &self.f2
    }

    /// The center of this ellipse (the midpoint of its foci).
    #[must_use]
    pub fn get_center(&self) -> UnitVector3d {
        let sum = self.f1 + self.f2;
        if sum.is_zero() {
            // Antipodal foci: every direction is equidistant, pick one.
            return self.f1;
        }
        UnitVector3d::normalized(&sum)
    }

    /// The semi-sum angle α (negative when empty).
    #[must_use]
    pub const fn get_alpha(&self) -> Angle {
        self.alpha
    }

    /// Half the angular separation of the foci.
    #[must_use]
    pub fn get_gamma(&self) -> Angle {
        Angle::new(0.5 * super::algo::separation(&self.f1, &self.f2))
    }

    /// The semi-minor axis β, from `cos α = cos γ · cos β`.
    #[must_use]
    pub fn get_beta(&self) -> Angle {
        if self.is_empty() {
            return Angle::new(-1.0);
        }
        let cos_gamma = self.get_gamma().cos();
        if cos_gamma == 0.0 {
            return self.alpha;
        }
        Angle::new((self.alpha.cos() / cos_gamma).clamp(-1.0, 1.0).acos())
    }

    /// Returns true if this ellipse contains no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alpha.as_radians() < self.get_gamma().as_radians()
    }

    /// Returns true if this ellipse covers the whole sphere.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.alpha.as_radians() >= PI - self.get_gamma().as_radians()
    }

    /// Returns true if the foci coincide.
    #[must_use]
    pub fn is_circle(&self) -> bool {
        self.f1 == self.f2
    }

    /// Returns true if the boundary of this ellipse is a great circle.
    #[must_use]
    pub fn is_great_circle(&self) -> bool {
        self.alpha.as_radians() == FRAC_PI_2
    }

    /// Returns true if this ellipse contains the direction `v`.
    #[must_use]
    pub fn contains(&self, v: &UnitVector3d) -> bool {
        if self.is_empty() {
            return false;
        }
        let d1 = NormalizedAngle::from_unit_vectors(v, &self.f1).as_radians();
        let d2 = NormalizedAngle::from_unit_vectors(v, &self.f2).as_radians();
        d1 + d2 <= 2.0 * self.alpha.as_radians()
    }

    /// Flips this ellipse into its closed complement.
    pub fn complement(&mut self) -> &mut Self {
        let alpha = self.alpha.as_radians();
        self.f1 = -self.f1;
        self.f2 = -self.f2;
        self.alpha = Angle::new(PI - alpha.clamp(0.0, PI));
        self
    }

    /// The closed complement of this ellipse.
    #[must_use]
    pub fn complemented(&self) -> Self {
        let mut e = *self;
        e.complement();
        e
    }

    /// The bounding circle of this ellipse: centered at its center with
    /// the semi-major axis as radius.
    #[must_use]
    pub fn bounding_circle(&self) -> Circle {
        if self.is_empty() {
            return Circle::empty();
        }
        if self.is_full() {
            return Circle::full();
        }
        Circle::from_angle(
            self.get_center(),
            self.alpha + Angle::new(ANGLE_EPSILON),
        )
        .dilated_for_bounds()
    }

    /// A circle entirely inside this ellipse (its inscribed circle,
    /// fractionally shrunk), for sound containment refinements.
    pub(crate) fn inscribed_circle(&self) -> Circle {
        if self.is_empty() {
            return Circle::empty();
        }
        if self.is_full() {
            return Circle::full();
        }
        let beta = self.get_beta().as_radians() - ANGLE_EPSILON;
        Circle::from_angle(self.get_center(), Angle::new(beta.max(0.0)))
    }

    /// The tightest longitude/latitude box found for this ellipse (via its
    /// bounding circle).
    #[must_use]
    pub fn bounding_box(&self) -> LonLatBox {
        self.bounding_circle().bounding_box()
    }

    /// A 3D box containing this ellipse (via its bounding circle).
    #[must_use]
    pub fn bounding_box3d(&self) -> Box3d {
        self.bounding_circle().bounding_box3d()
    }

    /// Returns true if this ellipse is convex (contained in a hemisphere
    /// and closed under geodesics between its points).
    fn is_convex(&self) -> bool {
        self.alpha.as_radians() <= FRAC_PI_2
    }

    /// The bitmask of relations holding between this ellipse and `circle`.
    ///
    /// Relations go through the bounding circle (DISJOINT and WITHIN stay
    /// sound under that over-approximation) and the inscribed circle (for
    /// CONTAINS); unresolved cases report INTERSECTS.
    #[must_use]
    pub fn relate_circle(&self, circle: &Circle) -> Relationship {
        if self.is_empty() {
            if circle.is_empty() {
                return Relationship::CONTAINS
                    | Relationship::DISJOINT
                    | Relationship::WITHIN;
            }
            return Relationship::DISJOINT | Relationship::WITHIN;
        }
        if circle.is_empty() {
            return Relationship::CONTAINS | Relationship::DISJOINT;
        }
        if circle.squared_chord_length() == 0.0 {
            // Point probes get the exact focal-sum answer.
            return if self.contains(circle.center()) {
                Relationship::CONTAINS
            } else {
                Relationship::DISJOINT
            };
        }
        let mut r = self.bounding_circle().relate_circle(circle)
            & (Relationship::DISJOINT | Relationship::WITHIN);
        if self
            .inscribed_circle()
            .relate_circle(circle)
            .contains(Relationship::CONTAINS)
        {
            r |= Relationship::CONTAINS;
        }
        if r.is_empty() {
            r = Relationship::INTERSECTS;
        }
        r
    }

    /// The bitmask of relations holding between this ellipse and `other`.
    #[must_use]
    pub fn relate_ellipse(&self, other: &Self) -> Relationship {
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
        let mut r = Relationship::empty();
        if self
            .bounding_circle()
            .relate_circle(&other.bounding_circle())
            .contains(Relationship::DISJOINT)
        {
            r |= Relationship::DISJOINT;
        }
        if self
            .bounding_circle()
            .relate_circle(&other.inscribed_circle())
            .contains(Relationship::WITHIN)
        {
            r |= Relationship::WITHIN;
        }
        if self
            .inscribed_circle()
            .relate_circle(&other.bounding_circle())
            .contains(Relationship::CONTAINS)
        {
            r |= Relationship::CONTAINS;
        }
        if r.is_empty() {
            r = Relationship::INTERSECTS;
        }
        r
    }

    /// The bitmask of relations holding between this ellipse and `box`.
    #[must_use]
    pub fn relate_box(&self, other: &LonLatBox) -> Relationship {
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
        let mut r = other.relate_circle(&self.bounding_circle()).invert()
            & (Relationship::DISJOINT | Relationship::WITHIN);
        if other
            .relate_circle(&self.inscribed_circle())
            .contains(Relationship::WITHIN)
        {
            r |= Relationship::CONTAINS;
        }
        if r.is_empty() {
            r = Relationship::INTERSECTS;
        }
        r
    }

    /// The bitmask of relations holding between this ellipse and
    /// `polygon`.
    #[must_use]
    pub fn relate_polygon(
        &self,
        polygon: &super::ConvexPolygon,
    ) -> Relationship {
        if self.is_empty() {
            return Relationship::DISJOINT | Relationship::WITHIN;
        }
        let mut r = polygon.relate_circle(&self.bounding_circle()).invert()
            & (Relationship::DISJOINT | Relationship::WITHIN);
        // A convex ellipse containing every vertex contains the polygon.
        if self.is_convex()
            && polygon.vertices().iter().all(|v| self.contains(v))
        {
            r |= Relationship::CONTAINS;
        }
        if polygon
            .relate_circle(&self.inscribed_circle())
            .contains(Relationship::WITHIN)
        {
            r |= Relationship::CONTAINS;
        }
        if r.is_empty() {
            r = Relationship::INTERSECTS;
        }
        r
    }
}

impl fmt::Display for Ellipse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ellipse({}, {}, {})", self.f1, self.f2, self.alpha)
    }
}

#[cfg(test)]
#[path = "./ellipse_tests.rs"]
mod tests;
