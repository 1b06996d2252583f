use crate::{error::InvalidUnitVector, Angle, LonLat, NormalizedAngle};
use std::{fmt, ops};

/// A vector in ℝ³ with components stored as double precision floats.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector3d {
    /// `x` component.
    pub x: f64,
    /// `y` component.
    pub y: f64,
    /// `z` component.
    pub z: f64,
}

impl Vector3d {
    /// Initializes a new 3D vector with the specified component values.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Returns true if all components are zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// The inner product of this vector and `other`.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.x
            .mul_add(other.x, self.y.mul_add(other.y, self.z * other.z))
    }

    /// The cross product of this vector and `other`.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Self {
        Self {
            x: self.y.mul_add(other.z, -(self.z * other.y)),
            y: self.z.mul_add(other.x, -(self.x * other.z)),
            z: self.x.mul_add(other.y, -(self.y * other.x)),
        }
    }

    /// The squared L2 norm of this vector.
    #[must_use]
    pub fn squared_norm(&self) -> f64 {
        self.dot(self)
    }

    /// The L2 norm of this vector.
    #[must_use]
    pub fn norm(&self) -> f64 {
        self.squared_norm().sqrt()
    }

    /// Scales this vector to unit norm and returns its original norm.
    ///
    /// The zero vector is left untouched and reported as having norm 0.
    pub fn normalize(&mut self) -> f64 {
        let n = self.norm();
        if n > 0.0 {
            self.x /= n;
            self.y /= n;
            self.z /= n;
        }
        n
    }

    /// Returns true if this vector has unit norm (within 1e-14).
    #[must_use]
    pub fn is_normalized(&self) -> bool {
        (self.squared_norm() - 1.0).abs() <= 1e-14
    }

    /// The component-wise product of this vector and `other`.
    #[must_use]
    pub fn cwise_product(&self, other: &Self) -> Self {
        Self::new(self.x * other.x, self.y * other.y, self.z * other.z)
    }

    /// This vector, rotated around `axis` by `angle` (Rodrigues' formula).
    #[must_use]
    pub fn rotated_around(&self, axis: &UnitVector3d, angle: Angle) -> Self {
        let k = axis.as_vector3d();
        let s = angle.sin();
        let c = angle.cos();
        let kxv = k.cross(self);
        let kdv = k.dot(self);
        Self::new(
            self.x * c + kxv.x * s + k.x * kdv * (1.0 - c),
            self.y * c + kxv.y * s + k.y * kdv * (1.0 - c),
            self.z * c + kxv.z * s + k.z * kdv * (1.0 - c),
        )
    }
}

impl ops::Neg for Vector3d {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl ops::Add for Vector3d {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl ops::Sub for Vector3d {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl ops::Mul<f64> for Vector3d {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl ops::Div<f64> for Vector3d {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

impl ops::AddAssign for Vector3d {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl ops::SubAssign for Vector3d {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl ops::MulAssign<f64> for Vector3d {
    fn mul_assign(&mut self, rhs: f64) {
        *self = *self * rhs;
    }
}

impl ops::DivAssign<f64> for Vector3d {
    fn div_assign(&mut self, rhs: f64) {
        *self = *self / rhs;
    }
}

impl fmt::Display for Vector3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

// -----------------------------------------------------------------------------

/// A direction in ℝ³, i.e. a vector with unit L2 norm.
///
/// The invariant `‖v‖ = 1` holds to within 1e-14 for every value produced by
/// this type; construction from raw components normalizes its input.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitVector3d(Vector3d);

impl UnitVector3d {
    /// The direction of the x axis.
    pub const X: Self = Self(Vector3d::new(1.0, 0.0, 0.0));
    /// The direction of the y axis.
    pub const Y: Self = Self(Vector3d::new(0.0, 1.0, 0.0));
    /// The direction of the z axis.
    pub const Z: Self = Self(Vector3d::new(0.0, 0.0, 1.0));

    /// Initializes a new unit vector pointing in the direction `(x, y, z)`.
    ///
    /// # Errors
    ///
    /// [`InvalidUnitVector`] when the input has zero or non-finite norm.
    pub fn new(x: f64, y: f64, z: f64) -> Result<Self, InvalidUnitVector> {
        Self::from_vector3d(&Vector3d::new(x, y, z))
    }

    /// Initializes a new unit vector pointing in the direction of `v`.
    ///
    /// # Errors
    ///
    /// [`InvalidUnitVector`] when `v` has zero or non-finite norm.
    pub fn from_vector3d(v: &Vector3d) -> Result<Self, InvalidUnitVector> {
        let n = v.norm();
        if !(n.is_finite() && n > 0.0) {
            return Err(InvalidUnitVector::new(
                [v.x, v.y, v.z],
                "vector with zero or non-finite norm",
            ));
        }
        Ok(Self(*v / n))
    }

    /// The unit vector for the given spherical coordinates.
    #[must_use]
    pub fn from_lon_lat(lon: Angle, lat: Angle) -> Self {
        let (sin_lon, cos_lon) = (lon.sin(), lon.cos());
        let (sin_lat, cos_lat) = (lat.sin(), lat.cos());
        Self(Vector3d::new(cos_lon * cos_lat, sin_lon * cos_lat, sin_lat))
    }

    /// A unit vector orthogonal to `v`.
    ///
    /// The choice among the orthogonal directions is deterministic.
    ///
    /// # Errors
    ///
    /// [`InvalidUnitVector`] when `v` has zero or non-finite norm.
    pub fn orthogonal_to(v: &Vector3d) -> Result<Self, InvalidUnitVector> {
        // Zero out the component of largest magnitude and swap the other
        // two; the result is exactly orthogonal and never degenerate.
        let candidate = if v.x.abs() >= v.y.abs() && v.x.abs() >= v.z.abs() {
            Vector3d::new(-v.z, 0.0, v.x)
        } else {
            Vector3d::new(0.0, v.z, -v.y)
        };
        Self::from_vector3d(&candidate).map_err(|_| {
            InvalidUnitVector::new(
                [v.x, v.y, v.z],
                "vector with zero or non-finite norm",
            )
        })
    }

    /// The unit vector pointing north (towards +Z along the meridian) from
    /// the direction of `v`.
    ///
    /// At the poles, where every direction points north or south, the
    /// result is `-X` (north pole) or `X` (south pole).
    #[must_use]
    pub fn north_from(v: &Vector3d) -> Self {
        let n = Vector3d::new(
            -v.x * v.z,
            -v.y * v.z,
            v.x.mul_add(v.x, v.y * v.y),
        );
        Self::from_vector3d(&n).unwrap_or(if v.z > 0.0 { -Self::X } else { Self::X })
    }

    /// Normalizes a vector known to have a nonzero finite norm.
    pub(crate) fn normalized(v: &Vector3d) -> Self {
        debug_assert!(!v.is_zero(), "vector is zero");
        Self(*v / v.norm())
    }

    /// The `x` component.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.0.x
    }

    /// The `y` component.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.0.y
    }

    /// The `z` component.
    #[must_use]
    pub const fn z(&self) -> f64 {
        self.0.z
    }

    /// This direction as a plain vector.
    #[must_use]
    pub const fn as_vector3d(&self) -> &Vector3d {
        &self.0
    }

    /// The inner product of this unit vector and `other`.
    #[must_use]
    pub fn dot(&self, other: &Self) -> f64 {
        self.0.dot(&other.0)
    }

    /// The cross product of this unit vector and `other`.
    #[must_use]
    pub fn cross(&self, other: &Self) -> Vector3d {
        self.0.cross(&other.0)
    }

    /// Twice the cross product of this unit vector and `other`, computed as
    /// `(self + other) × (other − self)`.
    ///
    /// Unlike the plain cross product, the result is accurate for nearly
    /// identical and nearly antipodal inputs.
    #[must_use]
    pub fn robust_cross(&self, other: &Self) -> Vector3d {
        (self.0 + other.0).cross(&(other.0 - self.0))
    }

    /// The component-wise product of this unit vector and `v`.
    #[must_use]
    pub fn cwise_product(&self, v: &Vector3d) -> Vector3d {
        self.0.cwise_product(v)
    }

    /// The squared length of the chord between this direction and `other`
    /// on the unit sphere, in `[0, 4]`.
    #[must_use]
    pub fn squared_chord_distance(&self, other: &Self) -> f64 {
        (self.0 - other.0).squared_norm()
    }

    /// The angular separation between this direction and `other`.
    #[must_use]
    pub fn angle_to(&self, other: &Self) -> NormalizedAngle {
        NormalizedAngle::from_unit_vectors(self, other)
    }

    /// This direction, rotated around `axis` by `angle`.
    #[must_use]
    pub fn rotated_around(&self, axis: &Self, angle: Angle) -> Self {
        Self::normalized(&self.0.rotated_around(axis, angle))
    }

    /// This direction, moved by `angle` along the great circle towards
    /// `other`.
    ///
    /// When the two directions are identical or antipodal the great circle
    /// is ambiguous and a deterministic one is chosen.
    #[must_use]
    pub fn rotated_towards(&self, other: &Self, angle: Angle) -> Self {
        let axis = self.cross(other);
        let axis = if axis.is_zero() {
            Self::orthogonal_to(self.as_vector3d()).unwrap_or(Self::Z)
        } else {
            Self::normalized(&axis)
        };
        self.rotated_around(&axis, angle)
    }
}

impl ops::Neg for UnitVector3d {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl ops::Add for UnitVector3d {
    type Output = Vector3d;

    fn add(self, rhs: Self) -> Vector3d {
        self.0 + rhs.0
    }
}

impl ops::Sub for UnitVector3d {
    type Output = Vector3d;

    fn sub(self, rhs: Self) -> Vector3d {
        self.0 - rhs.0
    }
}

impl ops::Sub<Vector3d> for UnitVector3d {
    type Output = Vector3d;

    fn sub(self, rhs: Vector3d) -> Vector3d {
        self.0 - rhs
    }
}

impl ops::Mul<f64> for UnitVector3d {
    type Output = Vector3d;

    fn mul(self, rhs: f64) -> Vector3d {
        self.0 * rhs
    }
}

impl ops::Div<f64> for UnitVector3d {
    type Output = Vector3d;

    fn div(self, rhs: f64) -> Vector3d {
        self.0 / rhs
    }
}

impl From<&LonLat> for UnitVector3d {
    fn from(value: &LonLat) -> Self {
        Self::from_lon_lat(Angle::from(value.lon()), value.lat())
    }
}

impl From<UnitVector3d> for Vector3d {
    fn from(value: UnitVector3d) -> Self {
        value.0
    }
}

impl fmt::Display for UnitVector3d {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
#[path = "./vector3d_tests.rs"]
mod tests;
