use super::algo;
use crate::{
    error::InvalidPolygon, Angle, Box3d, Circle, Interval1d, LonLatBox,
    Relationship, UnitVector3d, Vector3d, ANGLE_EPSILON,
};
use std::{f64::consts::PI, fmt};

/// A convex polygon on the unit sphere.
///
/// Vertices are stored counter-clockwise (seen from outside the sphere),
/// every consecutive triple is strictly positively oriented, and all
/// vertices lie in the closed hemisphere around their centroid. The edge
/// great-circle normals point into the polygon, so a direction is inside
/// iff its inner product with every normal is non-negative.
#[derive(Clone, Debug)]
pub struct ConvexPolygon {
    vertices: Vec<UnitVector3d>,
    edge_normals: Vec<Vector3d>,
    centroid: UnitVector3d,
}

// Serialization carries the vertices only; deserialization revalidates so
// that the cached normals and centroid stay consistent.
#[cfg(feature = "serde")]
impl serde::Serialize for ConvexPolygon {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        self.vertices.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for ConvexPolygon {
    fn deserialize<D: serde::Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Self, D::Error> {
        let vertices = Vec::<UnitVector3d>::deserialize(deserializer)?;
        Self::new(vertices).map_err(serde::de::Error::custom)
    }
}

impl ConvexPolygon {
    /// Initializes a new polygon from its vertices.
    ///
    /// # Errors
    ///
    /// [`InvalidPolygon`] when fewer than 3 vertices are given, when the
    /// vertex list is not strictly convex and counter-clockwise, or when
    /// the vertices do not fit in the hemisphere around their centroid.
    pub fn new(vertices: Vec<UnitVector3d>) -> Result<Self, InvalidPolygon> {
        if vertices.len() < 3 {
            return Err(InvalidPolygon::new(
                "a convex polygon requires at least 3 vertices",
            ));
        }
        let n = vertices.len();
        for i in 0..n {
            let o = algo::orientation(
                &vertices[i],
                &vertices[(i + 1) % n],
                &vertices[(i + 2) % n],
            );
            if o <= 0.0 {
                return Err(InvalidPolygon::new(
                    "vertices are not strictly convex and counter-clockwise",
                ));
            }
        }
        let mut sum = Vector3d::default();
        for v in &vertices {
            sum += *v.as_vector3d();
        }
        if sum.is_zero() {
            return Err(InvalidPolygon::new("degenerate vertex set"));
        }
        let centroid = UnitVector3d::normalized(&sum);
        if vertices
            .iter()
            .any(|v| v.dot(&centroid) < 0.0)
        {
            return Err(InvalidPolygon::new(
                "vertices do not fit in the hemisphere around their centroid",
            ));
        }
        let edge_normals = (0..n)
            .map(|i| {
                let cross = vertices[i].cross(&vertices[(i + 1) % n]);
                cross / cross.norm()
            })
            .collect();
        Ok(Self {
            vertices,
            edge_normals,
            centroid,
        })
    }

    /// The convex hull of `points`.
    ///
    /// Gift-wraps on the sphere starting from the lowest vertex; collinear
    /// points end up inside the hull, never on its vertex list.
    ///
    /// # Errors
    ///
    /// [`InvalidPolygon`] when fewer than 3 distinct points are given or
    /// when the point set is degenerate (all on one great circle, or not
    /// contained in a hemisphere).
    pub fn convex_hull(
        points: &[UnitVector3d],
    ) -> Result<Self, InvalidPolygon> {
        let mut distinct: Vec<UnitVector3d> = Vec::with_capacity(points.len());
        for p in points {
            if !distinct.contains(p) {
                distinct.push(*p);
            }
        }
        if distinct.len() < 3 {
            return Err(InvalidPolygon::new(
                "hull of fewer than 3 distinct points",
            ));
        }
        let start = *distinct
            .iter()
            .min_by(|a, b| {
                (a.z(), a.x(), a.y())
                    .partial_cmp(&(b.z(), b.x(), b.y()))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .unwrap_or(&distinct[0]);
        let mut hull = vec![start];
        loop {
            let current = hull[hull.len() - 1];
            let mut next = None;
            for candidate in &distinct {
                if *candidate == current {
                    continue;
                }
                let Some(best) = next else {
                    next = Some(*candidate);
                    continue;
                };
                let o = algo::orientation(&current, &best, candidate);
                if o < 0.0
                    || (o == 0.0
                        && algo::separation(&current, candidate)
                            > algo::separation(&current, &best))
                {
                    next = Some(*candidate);
                }
            }
            let Some(next) = next else {
                return Err(InvalidPolygon::new("degenerate point set"));
            };
            if next == start {
                break;
            }
            hull.push(next);
            if hull.len() > distinct.len() {
                return Err(InvalidPolygon::new(
                    "point set has no convex hull on a hemisphere",
                ));
            }
        }
        Self::new(hull)
    }

    /// The vertices of this polygon, in counter-clockwise order.
    #[must_use]
    pub fn vertices(&self) -> &[UnitVector3d] {
        &self.vertices
    }

    /// The inward unit normals of the edge great circles.
    pub(crate) fn edge_normals(&self) -> &[Vector3d] {
        &self.edge_normals
    }

    /// The normalized sum of the vertices.
    #[must_use]
    pub const fn centroid(&self) -> &UnitVector3d {
        &self.centroid
    }

    /// Returns true if this polygon contains the direction `v`.
    #[must_use]
    pub fn contains(&self, v: &UnitVector3d) -> bool {
        self.edge_normals
            .iter()
            .all(|n| n.dot(v.as_vector3d()) >= 0.0)
    }

    /// The minimum angular separation between `p` and the polygon boundary.
    fn min_boundary_separation(&self, p: &UnitVector3d) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                algo::min_separation_to_arc(
                    p,
                    &self.vertices[i],
                    &self.vertices[(i + 1) % n],
                )
            })
            .fold(f64::INFINITY, f64::min)
    }

    /// The maximum angular separation between `p` and the polygon boundary.
    fn max_boundary_separation(&self, p: &UnitVector3d) -> f64 {
        let n = self.vertices.len();
        (0..n)
            .map(|i| {
                algo::max_separation_to_arc(
                    p,
                    &self.vertices[i],
                    &self.vertices[(i + 1) % n],
                )
            })
            .fold(0.0, f64::max)
    }

    /// The bitmask of relations holding between this polygon and `other`.
    ///
    /// Spherical convex polygons are geodesically convex, so mutual vertex
    /// containment decides the containment relations exactly; disjointness
    /// reduces to the absence of contained vertices and edge crossings.
    #[must_use]
    pub fn relate_polygon(&self, other: &Self) -> Relationship {
        let other_in_self: Vec<bool> =
            other.vertices.iter().map(|v| self.contains(v)).collect();
        let self_in_other: Vec<bool> =
            self.vertices.iter().map(|v| other.contains(v)).collect();
        let mut r = Relationship::empty();
        if other_in_self.iter().all(|&b| b) {
            r |= Relationship::CONTAINS;
        }
        if self_in_other.iter().all(|&b| b) {
            r |= Relationship::WITHIN;
        }
        if !r.is_empty() {
            return r;
        }
        if other_in_self.iter().any(|&b| b) || self_in_other.iter().any(|&b| b)
        {
            return Relationship::INTERSECTS;
        }
        let n = self.vertices.len();
        let m = other.vertices.len();
        for i in 0..n {
            for j in 0..m {
                if algo::arcs_intersect(
                    &self.vertices[i],
                    &self.vertices[(i + 1) % n],
                    &other.vertices[j],
                    &other.vertices[(j + 1) % m],
                ) {
                    return Relationship::INTERSECTS;
                }
            }
        }
        Relationship::DISJOINT
    }

    /// The bitmask of relations holding between this polygon and `circle`.
    #[must_use]
    pub fn relate_circle(&self, circle: &Circle) -> Relationship {
        if circle.is_empty() {
            return Relationship::CONTAINS | Relationship::DISJOINT;
        }
        if circle.is_full() {
            return Relationship::WITHIN;
        }
        let center = circle.center();
        let alpha = circle.opening_angle().as_radians();
        let center_inside = self.contains(center);
        let boundary_min = self.min_boundary_separation(center);
        let mut r = Relationship::empty();
        if center_inside && boundary_min >= alpha {
            r |= Relationship::CONTAINS;
        }
        if !center_inside && boundary_min > alpha {
            r |= Relationship::DISJOINT;
        }
        if !self.contains(&-*center)
            && self.max_boundary_separation(center) <= alpha
        {
            r |= Relationship::WITHIN;
        }
        if r.is_empty() {
            r = Relationship::INTERSECTS;
        }
        r
    }

    /// The bitmask of relations holding between this polygon and `other`.
    #[must_use]
    pub fn relate_box(&self, other: &LonLatBox) -> Relationship {
        other.relate_polygon(self).invert()
    }

    /// The tight longitude/latitude hull of this polygon.
    #[must_use]
    pub fn bounding_box(&self) -> LonLatBox {
        let n = self.vertices.len();
        let mut bbox = LonLatBox::empty();
        for i in 0..n {
            let (lon, lat) = algo::arc_lon_lat_hull(
                &self.vertices[i],
                &self.vertices[(i + 1) % n],
            );
            bbox = bbox.expanded_to(&LonLatBox::new(lon, lat));
        }
        bbox
    }

    /// The bounding circle of this polygon, centered at its centroid.
    #[must_use]
    pub fn bounding_circle(&self) -> Circle {
        let radius = self.max_boundary_separation(&self.centroid);
        Circle::from_angle(
            self.centroid,
            Angle::new((radius + ANGLE_EPSILON).min(PI)),
        )
        .dilated_for_bounds()
    }

    /// A 3D box containing this polygon.
    #[must_use]
    pub fn bounding_box3d(&self) -> Box3d {
        let axes = [UnitVector3d::X, UnitVector3d::Y, UnitVector3d::Z];
        let mut intervals = [Interval1d::empty(); 3];
        let n = self.vertices.len();
        for (interval, axis) in intervals.iter_mut().zip(axes) {
            // cos of the angular separation to the axis is the coordinate
            // along it, so the boundary extrema double as the extent.
            let mut lo = f64::INFINITY;
            let mut hi = f64::NEG_INFINITY;
            for i in 0..n {
                let min = algo::min_separation_to_arc(
                    &axis,
                    &self.vertices[i],
                    &self.vertices[(i + 1) % n],
                );
                let max = algo::max_separation_to_arc(
                    &axis,
                    &self.vertices[i],
                    &self.vertices[(i + 1) % n],
                );
                hi = hi.max(min.cos());
                lo = lo.min(max.cos());
            }
            // A polygon containing the axis (or its antipode) extends all
            // the way to the corresponding coordinate extreme.
            if self.contains(&axis) {
                hi = 1.0;
            }
            if self.contains(&-axis) {
                lo = -1.0;
            }
            *interval = Interval1d::new(
                (lo - ANGLE_EPSILON).max(-1.0),
                (hi + ANGLE_EPSILON).min(1.0),
            );
        }
        Box3d::new(intervals[0], intervals[1], intervals[2])
    }
}

impl PartialEq for ConvexPolygon {
    /// Cyclic equality: two polygons are equal iff their vertex cycles
    /// match, regardless of the starting vertex.
    fn eq(&self, other: &Self) -> bool {
        let n = self.vertices.len();
        if n != other.vertices.len() {
            return false;
        }
        (0..n).any(|offset| {
            (0..n).all(|i| self.vertices[(offset + i) % n] == other.vertices[i])
        })
    }
}

impl fmt::Display for ConvexPolygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ConvexPolygon([")?;
        for (i, v) in self.vertices.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{v}")?;
        }
        write!(f, "])")
    }
}

#[cfg(test)]
#[path = "./polygon_tests.rs"]
mod tests;
