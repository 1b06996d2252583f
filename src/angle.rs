use crate::{LonLat, UnitVector3d, TWO_PI};
use std::{cmp::Ordering, fmt, ops};

/// An angle, stored internally in radians.
///
/// Angles are plain finite-or-not `f64` wrappers with the full arithmetic
/// operator set; they carry no range restriction (see [`NormalizedAngle`]
/// for angles wrapped to `[0, 2π)`).
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Angle(f64);

impl Angle {
    /// Initializes a new angle from a value in radians.
    #[must_use]
    pub const fn new(radians: f64) -> Self {
        Self(radians)
    }

    /// Initializes a new angle from a value in radians.
    #[must_use]
    pub const fn from_radians(radians: f64) -> Self {
        Self(radians)
    }

    /// Initializes a new angle from a value in degrees.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    /// The angle value, in radians.
    #[must_use]
    pub const fn as_radians(self) -> f64 {
        self.0
    }

    /// The angle value, in degrees.
    #[must_use]
    pub fn as_degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// The absolute value of this angle.
    #[must_use]
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Returns true if this angle is NaN.
    #[must_use]
    pub fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    /// Returns true if this angle is neither infinite nor NaN.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.0.is_finite()
    }

    /// The sine of this angle.
    #[must_use]
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    /// The cosine of this angle.
    #[must_use]
    pub fn cos(self) -> f64 {
        self.0.cos()
    }
}

impl ops::Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl ops::Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl ops::Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl ops::Mul<f64> for Angle {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}

impl ops::Mul<Angle> for f64 {
    type Output = Angle;

    fn mul(self, rhs: Angle) -> Angle {
        Angle(self * rhs.0)
    }
}

impl ops::Div<f64> for Angle {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self(self.0 / rhs)
    }
}

impl ops::Div for Angle {
    type Output = f64;

    fn div(self, rhs: Self) -> f64 {
        self.0 / rhs.0
    }
}

impl ops::AddAssign for Angle {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl ops::SubAssign for Angle {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<NormalizedAngle> for Angle {
    fn from(value: NormalizedAngle) -> Self {
        value.0
    }
}

// -----------------------------------------------------------------------------

/// An angle normalized to `[0, 2π)`.
///
/// Construction wraps the input modulo 2π; the two-point constructors return
/// the unsigned angular separation between their arguments, which lands in
/// `[0, π]`.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NormalizedAngle(Angle);

impl NormalizedAngle {
    /// Initializes a new normalized angle, wrapping the input to `[0, 2π)`.
    ///
    /// NaN angles remain NaN.
    #[must_use]
    pub fn new(angle: Angle) -> Self {
        Self(Angle(wrap(angle.0)))
    }

    /// Initializes a new normalized angle from a value in radians.
    #[must_use]
    pub fn from_radians(radians: f64) -> Self {
        Self::new(Angle(radians))
    }

    /// Initializes a new normalized angle from a value in degrees.
    #[must_use]
    pub fn from_degrees(degrees: f64) -> Self {
        Self::new(Angle::from_degrees(degrees))
    }

    /// The angular separation between two points on the sphere.
    ///
    /// Uses the haversine formula, which is numerically stable for very
    /// small separations as well as separations close to π.
    #[must_use]
    pub fn from_lonlats(p1: &LonLat, p2: &LonLat) -> Self {
        let sdl = ((p1.lon().as_radians() - p2.lon().as_radians()) * 0.5).sin();
        let sdp = ((p1.lat().as_radians() - p2.lat().as_radians()) * 0.5).sin();
        let w = p1.lat().cos() * p2.lat().cos();
        let s = sdp.mul_add(sdp, w * (sdl * sdl)).sqrt();
        Self(Angle(2.0 * s.min(1.0).asin()))
    }

    /// The angular separation between two unit vectors.
    ///
    /// Computed from the chord length, which is stable near 0 and π.
    #[must_use]
    pub fn from_unit_vectors(v1: &UnitVector3d, v2: &UnitVector3d) -> Self {
        let dx = v1.x() - v2.x();
        let dy = v1.y() - v2.y();
        let dz = v1.z() - v2.z();
        let chord = dx.mul_add(dx, dy.mul_add(dy, dz * dz)).sqrt();
        Self(Angle(2.0 * (0.5 * chord).min(1.0).asin()))
    }

    /// The size of the shorter arc between `a` and `b`, in `[0, π]`.
    #[must_use]
    pub fn between(a: Self, b: Self) -> Self {
        let d = (a.as_radians() - b.as_radians()).abs();
        Self(Angle(d.min(TWO_PI - d)))
    }

    /// The center of the counter-clockwise arc from `a` to `b`.
    #[must_use]
    pub fn center(a: Self, b: Self) -> Self {
        Self::from_radians(
            a.as_radians() + 0.5 * a.get_angle_to(b).as_radians(),
        )
    }

    /// The counter-clockwise arc length from this angle to `other`, in
    /// `[0, 2π)`.
    #[must_use]
    pub fn get_angle_to(self, other: Self) -> Self {
        Self(Angle(wrap(other.as_radians() - self.as_radians())))
    }

    /// The angle value, in radians (in `[0, 2π)`).
    #[must_use]
    pub const fn as_radians(self) -> f64 {
        self.0.as_radians()
    }

    /// The angle value, in degrees (in `[0, 360)`).
    #[must_use]
    pub fn as_degrees(self) -> f64 {
        self.0.as_degrees()
    }

    /// Returns true if this angle is NaN.
    #[must_use]
    pub fn is_nan(self) -> bool {
        self.0.is_nan()
    }

    /// The sine of this angle.
    #[must_use]
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    /// The cosine of this angle.
    #[must_use]
    pub fn cos(self) -> f64 {
        self.0.cos()
    }
}

/// Wraps `radians` into `[0, 2π)`, mapping NaN to NaN.
fn wrap(radians: f64) -> f64 {
    let mut value = radians % TWO_PI;
    if value < 0.0 {
        value += TWO_PI;
        // A tiny negative input can round back up to exactly 2π.
        if value >= TWO_PI {
            value = 0.0;
        }
    }
    value
}

impl ops::Neg for NormalizedAngle {
    type Output = Angle;

    fn neg(self) -> Angle {
        -self.0
    }
}

impl ops::Add for NormalizedAngle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Angle {
        self.0 + rhs.0
    }
}

impl ops::Add<Angle> for NormalizedAngle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        self.0 + rhs
    }
}

impl ops::Sub for NormalizedAngle {
    type Output = Angle;

    fn sub(self, rhs: Self) -> Angle {
        self.0 - rhs.0
    }
}

impl ops::Sub<Angle> for NormalizedAngle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        self.0 - rhs
    }
}

impl ops::Mul<f64> for NormalizedAngle {
    type Output = Angle;

    fn mul(self, rhs: f64) -> Angle {
        self.0 * rhs
    }
}

impl ops::Div<f64> for NormalizedAngle {
    type Output = Angle;

    fn div(self, rhs: f64) -> Angle {
        self.0 / rhs
    }
}

impl PartialEq<Angle> for NormalizedAngle {
    fn eq(&self, other: &Angle) -> bool {
        self.0 == *other
    }
}

impl PartialOrd<Angle> for NormalizedAngle {
    fn partial_cmp(&self, other: &Angle) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl From<Angle> for NormalizedAngle {
    fn from(value: Angle) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for NormalizedAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "./angle_tests.rs"]
mod tests;
