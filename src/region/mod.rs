//! Spherical regions and their relations.

pub(crate) mod algo;
mod circle;
mod codec;
mod compound;
mod ellipse;
mod ivoa;
mod lonlat_box;
mod polygon;

pub use circle::Circle;
pub use compound::{IntersectionRegion, UnionRegion};
pub use ellipse::Ellipse;
pub use lonlat_box::LonLatBox;
pub use polygon::ConvexPolygon;

use crate::{
    error::{DecodeError, NotImplemented, PosParseError},
    Box3d, LonLat, Relationship, UnitVector3d, Vector3d,
};
use std::fmt;

/// A region on the unit sphere.
///
/// The concrete kinds are the longitude/latitude box, the spherical cap,
/// the spherical ellipse and the convex polygon, plus n-ary unions and
/// intersections of those.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Region {
    /// A longitude/latitude box.
    Box(LonLatBox),
    /// A spherical cap.
    Circle(Circle),
    /// A spherical ellipse.
    Ellipse(Ellipse),
    /// A convex spherical polygon.
    Polygon(ConvexPolygon),
    /// A union of regions.
    Union(UnionRegion),
    /// An intersection of regions.
    Intersection(IntersectionRegion),
}

impl Region {
    /// Returns true if this region contains the direction `v`.
    #[must_use]
    pub fn contains(&self, v: &UnitVector3d) -> bool {
        match self {
            Self::Box(b) => b.contains_vector(v),
            Self::Circle(c) => c.contains(v),
            Self::Ellipse(e) => e.contains(v),
            Self::Polygon(p) => p.contains(v),
            Self::Union(u) => u.contains(v),
            Self::Intersection(i) => i.contains(v),
        }
    }

    /// Returns true if this region contains the point `p`.
    #[must_use]
    pub fn contains_lonlat(&self, p: &LonLat) -> bool {
        match self {
            // The box test is exact in lon/lat space.
            Self::Box(b) => b.contains(p),
            _ => self.contains(&UnitVector3d::from(p)),
        }
    }

    /// Vectorized containment over parallel coordinate slices.
    ///
    /// The inputs need not be normalized; each `(x, y, z)` triple is
    /// interpreted as a direction. The slices must have equal lengths.
    #[must_use]
    pub fn contains_coords(
        &self,
        x: &[f64],
        y: &[f64],
        z: &[f64],
    ) -> Vec<bool> {
        debug_assert!(
            x.len() == y.len() && y.len() == z.len(),
            "mismatched slice lengths"
        );
        x.iter()
            .zip(y.iter())
            .zip(z.iter())
            .map(|((&x, &y), &z)| {
                match UnitVector3d::from_vector3d(&Vector3d::new(x, y, z)) {
                    Ok(v) => self.contains(&v),
                    Err(_) => false,
                }
            })
            .collect()
    }

    /// Vectorized containment over parallel longitude/latitude slices (in
    /// radians).
    #[must_use]
    pub fn contains_lonlats(&self, lon: &[f64], lat: &[f64]) -> Vec<bool> {
        debug_assert!(lon.len() == lat.len(), "mismatched slice lengths");
        lon.iter()
            .zip(lat.iter())
            .map(|(&lon, &lat)| {
                LonLat::from_radians(lon, lat)
                    .map(|p| self.contains_lonlat(&p))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// The bitmask of relations holding between this region and `other`.
    ///
    /// The CONTAINS, DISJOINT and WITHIN bits are set only when the
    /// relation provably holds; INTERSECTS reports that no stronger
    /// relation was established.
    #[must_use]
    pub fn relate(&self, other: &Self) -> Relationship {
        match (self, other) {
            (Self::Union(u), _) => u.relate(other),
            (Self::Intersection(i), _) => i.relate(other),
            (_, Self::Union(u)) => u.relate(self).invert(),
            (_, Self::Intersection(i)) => i.relate(self).invert(),
            (Self::Box(a), Self::Box(b)) => a.relate_box(b),
            (Self::Box(a), Self::Circle(b)) => a.relate_circle(b),
            (Self::Box(a), Self::Ellipse(b)) => b.relate_box(a).invert(),
            (Self::Box(a), Self::Polygon(b)) => a.relate_polygon(b),
            (Self::Circle(a), Self::Box(b)) => b.relate_circle(a).invert(),
            (Self::Circle(a), Self::Circle(b)) => a.relate_circle(b),
            (Self::Circle(a), Self::Ellipse(b)) => b.relate_circle(a).invert(),
            (Self::Circle(a), Self::Polygon(b)) => b.relate_circle(a).invert(),
            (Self::Ellipse(a), Self::Box(b)) => a.relate_box(b),
            (Self::Ellipse(a), Self::Circle(b)) => a.relate_circle(b),
            (Self::Ellipse(a), Self::Ellipse(b)) => a.relate_ellipse(b),
            (Self::Ellipse(a), Self::Polygon(b)) => a.relate_polygon(b),
            (Self::Polygon(a), Self::Box(b)) => a.relate_box(b),
            (Self::Polygon(a), Self::Circle(b)) => a.relate_circle(b),
            (Self::Polygon(a), Self::Ellipse(b)) => {
                b.relate_polygon(a).invert()
            }
            (Self::Polygon(a), Self::Polygon(b)) => a.relate_polygon(b),
        }
    }

    /// Returns true if this region provably contains `other`.
    #[must_use]
    pub fn contains_region(&self, other: &Self) -> bool {
        self.relate(other).contains(Relationship::CONTAINS)
    }

    /// Returns true if this region is provably a subset of `other`.
    #[must_use]
    pub fn is_within(&self, other: &Self) -> bool {
        self.relate(other).contains(Relationship::WITHIN)
    }

    /// Returns true if this region and `other` were not proven disjoint.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        !self.is_disjoint_from(other)
    }

    /// Returns true if this region and `other` provably share no point.
    #[must_use]
    pub fn is_disjoint_from(&self, other: &Self) -> bool {
        self.relate(other).contains(Relationship::DISJOINT)
    }

    /// Whether this region and `other` share at least one point.
    ///
    /// `None` is returned when the implementation cannot decide, which
    /// only happens when a compound region is involved.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> Option<bool> {
        let r = self.relate(other);
        if r.contains(Relationship::DISJOINT) {
            return Some(false);
        }
        if r.contains(Relationship::CONTAINS) {
            // self ⊇ other: they overlap iff other is nonempty.
            if other.known_nonempty() == Some(true) {
                return Some(true);
            }
            return None;
        }
        if r.contains(Relationship::WITHIN) {
            if self.known_nonempty() == Some(true) {
                return Some(true);
            }
            return None;
        }
        // Plain INTERSECTS: exact for concrete pairs, unproven when a
        // compound region is involved.
        if matches!(self, Self::Union(_) | Self::Intersection(_))
            || matches!(other, Self::Union(_) | Self::Intersection(_))
        {
            return None;
        }
        Some(true)
    }

    /// Whether this region is provably nonempty (or provably empty).
    fn known_nonempty(&self) -> Option<bool> {
        match self {
            Self::Box(b) => Some(!b.is_empty()),
            Self::Circle(c) => Some(!c.is_empty()),
            Self::Ellipse(e) => Some(!e.is_empty()),
            Self::Polygon(_) => Some(true),
            Self::Union(u) => {
                let states: Vec<_> =
                    u.operands().iter().map(Self::known_nonempty).collect();
                if states.iter().any(|s| *s == Some(true)) {
                    Some(true)
                } else if states.iter().all(|s| *s == Some(false)) {
                    Some(false)
                } else {
                    None
                }
            }
            Self::Intersection(i) => {
                if i.operands().is_empty() {
                    // The empty intersection is the full sphere.
                    Some(true)
                } else if i
                    .operands()
                    .iter()
                    .any(|o| o.known_nonempty() == Some(false))
                {
                    Some(false)
                } else {
                    None
                }
            }
        }
    }

    /// The tightest longitude/latitude box found for this region.
    #[must_use]
    pub fn bounding_box(&self) -> LonLatBox {
        match self {
            Self::Box(b) => b.bounding_box(),
            Self::Circle(c) => c.bounding_box(),
            Self::Ellipse(e) => e.bounding_box(),
            Self::Polygon(p) => p.bounding_box(),
            Self::Union(u) => u.bounding_box(),
            Self::Intersection(i) => i.bounding_box(),
        }
    }

    /// A 3D box containing this region.
    #[must_use]
    pub fn bounding_box3d(&self) -> Box3d {
        match self {
            Self::Box(b) => b.bounding_box3d(),
            Self::Circle(c) => c.bounding_box3d(),
            Self::Ellipse(e) => e.bounding_box3d(),
            Self::Polygon(p) => p.bounding_box3d(),
            Self::Union(u) => u.bounding_box3d(),
            Self::Intersection(i) => i.bounding_box3d(),
        }
    }

    /// A small circle containing this region.
    #[must_use]
    pub fn bounding_circle(&self) -> Circle {
        match self {
            Self::Box(b) => b.bounding_circle(),
            Self::Circle(c) => c.bounding_circle(),
            Self::Ellipse(e) => e.bounding_circle(),
            Self::Polygon(p) => p.bounding_circle(),
            Self::Union(u) => u.bounding_circle(),
            Self::Intersection(i) => i.bounding_circle(),
        }
    }

    /// The atomic view of `region`: the flattened operand list of a
    /// compound region, or the region itself.
    #[must_use]
    pub fn get_regions(region: &Self) -> Vec<&Self> {
        match region {
            Self::Union(u) => u.operands().iter().collect(),
            Self::Intersection(i) => i.operands().iter().collect(),
            _ => vec![region],
        }
    }

    /// Encodes this region into the tagged binary format.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        codec::encode(self)
    }

    /// Decodes a region from the tagged binary format.
    ///
    /// # Errors
    ///
    /// [`DecodeError`] on unknown tags, truncated or oversized buffers,
    /// and payloads violating structural invariants.
    pub fn decode(bytes: &[u8]) -> Result<Self, DecodeError> {
        codec::decode(bytes)
    }

    /// Decodes a region from a base64 string, or a union of regions from
    /// a `:`-separated list of base64 strings (the empty string decodes
    /// to an empty union).
    ///
    /// # Errors
    ///
    /// [`DecodeError`] when any component fails to decode.
    pub fn decode_base64(s: &str) -> Result<Self, DecodeError> {
        codec::decode_base64(s)
    }

    /// Evaluates a `|`-joined disjunction of `A&B` overlap terms over
    /// base64-encoded region pairs.
    ///
    /// Returns `Some(false)` for the empty expression, and `None` when an
    /// undecided term dominates.
    ///
    /// # Errors
    ///
    /// [`DecodeError`] when the expression or any of its regions is
    /// malformed.
    pub fn decode_overlaps_base64(
        s: &str,
    ) -> Result<Option<bool>, DecodeError> {
        codec::decode_overlaps_base64(s)
    }

    /// Parses an IVOA POS string (`CIRCLE`, `RANGE` or `POLYGON`).
    ///
    /// # Errors
    ///
    /// [`PosParseError`] on grammar violations.
    pub fn from_ivoa_pos(pos: &str) -> Result<Self, PosParseError> {
        ivoa::from_pos(pos)
    }

    /// Formats this region as an IVOA POS string.
    ///
    /// # Errors
    ///
    /// [`NotImplemented`] for regions that POS cannot express (ellipses
    /// and compounds).
    pub fn to_ivoa_pos(&self) -> Result<String, NotImplemented> {
        ivoa::to_pos(self)
    }
}

impl From<LonLatBox> for Region {
    fn from(value: LonLatBox) -> Self {
        Self::Box(value)
    }
}

impl From<Circle> for Region {
    fn from(value: Circle) -> Self {
        Self::Circle(value)
    }
}

impl From<Ellipse> for Region {
    fn from(value: Ellipse) -> Self {
        Self::Ellipse(value)
    }
}

impl From<ConvexPolygon> for Region {
    fn from(value: ConvexPolygon) -> Self {
        Self::Polygon(value)
    }
}

impl From<UnionRegion> for Region {
    fn from(value: UnionRegion) -> Self {
        Self::Union(value)
    }
}

impl From<IntersectionRegion> for Region {
    fn from(value: IntersectionRegion) -> Self {
        Self::Intersection(value)
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box(b) => write!(f, "{b}"),
            Self::Circle(c) => write!(f, "{c}"),
            Self::Ellipse(e) => write!(f, "{e}"),
            Self::Polygon(p) => write!(f, "{p}"),
            Self::Union(u) => write!(f, "{u}"),
            Self::Intersection(i) => write!(f, "{i}"),
        }
    }
}
