use crate::{error::InvalidLonLat, Angle, NormalizedAngle, Vector3d};
use std::{f64::consts::FRAC_PI_2, fmt};

/// A point on the unit sphere as a longitude/latitude pair.
///
/// The longitude is normalized to `[0, 2π)` and the latitude is clamped to
/// `[-π/2, π/2]`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LonLat {
    lon: NormalizedAngle,
    lat: Angle,
}

impl LonLat {
    /// Initializes a new point from a longitude and a latitude.
    ///
    /// The latitude is clamped to `[-π/2, π/2]`.
    #[must_use]
    pub fn new(lon: NormalizedAngle, lat: Angle) -> Self {
        Self {
            lon,
            lat: Angle::new(lat.as_radians().clamp(-FRAC_PI_2, FRAC_PI_2)),
        }
    }

    /// Initializes a new point from coordinates in radians.
    ///
    /// # Errors
    ///
    /// [`InvalidLonLat`] when one (or both) coordinates is not a finite
    /// number.
    pub fn from_radians(lon: f64, lat: f64) -> Result<Self, InvalidLonLat> {
        if !lon.is_finite() {
            return Err(InvalidLonLat::new(lon, "non-finite longitude"));
        }
        if !lat.is_finite() {
            return Err(InvalidLonLat::new(lat, "non-finite latitude"));
        }
        Ok(Self::new(NormalizedAngle::from_radians(lon), Angle::new(lat)))
    }

    /// Initializes a new point from coordinates in degrees.
    ///
    /// # Errors
    ///
    /// [`InvalidLonLat`] when one (or both) coordinates is not a finite
    /// number.
    pub fn from_degrees(lon: f64, lat: f64) -> Result<Self, InvalidLonLat> {
        Self::from_radians(lon.to_radians(), lat.to_radians())
    }

    /// The longitude of the direction `v`.
    ///
    /// The longitude of a vector on the ±Z axis is 0.
    #[must_use]
    pub fn longitude_of(v: &Vector3d) -> NormalizedAngle {
        if v.x == 0.0 && v.y == 0.0 {
            return NormalizedAngle::default();
        }
        NormalizedAngle::from_radians(v.y.atan2(v.x))
    }

    /// The latitude of the direction `v`.
    #[must_use]
    pub fn latitude_of(v: &Vector3d) -> Angle {
        Angle::new(v.z.atan2(v.x.hypot(v.y)))
    }

    /// The longitude, in `[0, 2π)`.
    #[must_use]
    pub const fn lon(&self) -> NormalizedAngle {
        self.lon
    }

    /// The latitude, in `[-π/2, π/2]`.
    #[must_use]
    pub const fn lat(&self) -> Angle {
        self.lat
    }
}

impl From<&Vector3d> for LonLat {
    fn from(value: &Vector3d) -> Self {
        Self::new(Self::longitude_of(value), Self::latitude_of(value))
    }
}

impl From<&crate::UnitVector3d> for LonLat {
    fn from(value: &crate::UnitVector3d) -> Self {
        Self::from(value.as_vector3d())
    }
}

impl fmt::Display for LonLat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.lon, self.lat)
    }
}

#[cfg(test)]
#[path = "./lonlat_tests.rs"]
mod tests;
