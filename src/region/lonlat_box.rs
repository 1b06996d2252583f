use super::{algo, ConvexPolygon};
use crate::{
    Angle, AngleInterval, Box3d, Circle, Interval1d, LonLat, NormalizedAngle,
    NormalizedAngleInterval, Relationship, UnitVector3d, ANGLE_EPSILON,
};
use std::{
    f64::consts::{FRAC_PI_2, PI},
    fmt,
};

/// An axis-aligned longitude/latitude box on the unit sphere.
///
/// The longitude interval may wrap around 0; the latitude interval is
/// clamped to `[-π/2, π/2]`. A box is empty iff either component is empty
/// (canonicalized so that both are).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LonLatBox {
    lon: NormalizedAngleInterval,
    lat: AngleInterval,
}

impl LonLatBox {
    /// Initializes a new box as a product of intervals.
    #[must_use]
    pub fn new(lon: NormalizedAngleInterval, lat: AngleInterval) -> Self {
        let lat = lat.clipped_to(Self::all_latitudes());
        if lon.is_empty() || lat.is_empty() {
            return Self::empty();
        }
        Self { lon, lat }
    }

    /// The box containing only `point`.
    #[must_use]
    pub fn from_point(point: &LonLat) -> Self {
        Self::new(
            NormalizedAngleInterval::point(point.lon()),
            AngleInterval::point(point.lat()),
        )
    }

    /// The box spanned by two points: longitudes from `p1` to `p2`
    /// (counter-clockwise), latitudes between the two.
    #[must_use]
    pub fn from_two_points(p1: &LonLat, p2: &LonLat) -> Self {
        Self::new(
            NormalizedAngleInterval::new(p1.lon(), p2.lon()),
            AngleInterval::new(p1.lat(), p2.lat())
                .expanded_to(AngleInterval::new(p2.lat(), p1.lat())),
        )
    }

    /// The box centered at `center` with the given half-width (longitude)
    /// and half-height (latitude).
    #[must_use]
    pub fn from_center(center: &LonLat, half_width: Angle, half_height: Angle) -> Self {
        if half_width.as_radians() < 0.0 || half_height.as_radians() < 0.0 {
            return Self::empty();
        }
        Self::from_point(center).dilated_by(half_width, half_height)
    }

    /// Initializes a new box from bounds in radians
    /// (`lon1, lat1, lon2, lat2`).
    ///
    /// A longitude span of 2π or more becomes the full circle; latitudes
    /// are clamped to `[-π/2, π/2]`.
    #[must_use]
    pub fn from_radians(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> Self {
        Self::new(
            NormalizedAngleInterval::from_radians(lon1, lon2),
            AngleInterval::from_radians(lat1, lat2),
        )
    }

    /// Initializes a new box from bounds in degrees.
    #[must_use]
    pub fn from_degrees(lon1: f64, lat1: f64, lon2: f64, lat2: f64) -> Self {
        Self::from_radians(
            lon1.to_radians(),
            lat1.to_radians(),
            lon2.to_radians(),
            lat2.to_radians(),
        )
    }

    /// The empty box.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            lon: NormalizedAngleInterval::empty(),
            lat: AngleInterval::empty(),
        }
    }

    /// The box covering the whole sphere.
    #[must_use]
    pub fn full() -> Self {
        Self {
            lon: NormalizedAngleInterval::full(),
            lat: Self::all_latitudes(),
        }
    }

    /// The full longitude circle.
    #[must_use]
    pub fn all_longitudes() -> NormalizedAngleInterval {
        NormalizedAngleInterval::full()
    }

    /// The full latitude range `[-π/2, π/2]`.
    #[must_use]
    pub fn all_latitudes() -> AngleInterval {
        AngleInterval::from_radians(-FRAC_PI_2, FRAC_PI_2)
    }

    /// The longitude extent of this box.
    #[must_use]
    pub const fn get_lon(&self) -> NormalizedAngleInterval {
        self.lon
    }

    /// The latitude extent of this box.
    #[must_use]
    pub const fn get_lat(&self) -> AngleInterval {
        self.lat
    }

    /// The center of this box.
    #[must_use]
    pub fn get_center(&self) -> LonLat {
        LonLat::new(self.lon.get_center(), self.lat.get_center())
    }

    /// The longitude extent of this box as an angle.
    #[must_use]
    pub fn get_width(&self) -> Angle {
        self.lon.get_size()
    }

    /// The latitude extent of this box as an angle.
    #[must_use]
    pub fn get_height(&self) -> Angle {
        self.lat.get_size()
    }

    /// Returns true if this box contains no point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lon.is_empty()
    }

    /// Returns true if this box covers the whole sphere.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.lon.is_full() && self.lat.contains(Self::all_latitudes())
    }

    /// Returns true if this box contains `point`.
    #[must_use]
    pub fn contains(&self, point: &LonLat) -> bool {
        self.lon.contains_angle(point.lon()) && self.lat.contains(point.lat())
    }

    /// Returns true if this box contains the direction `v`.
    #[must_use]
    pub fn contains_vector(&self, v: &UnitVector3d) -> bool {
        self.contains(&LonLat::from(v))
    }

    /// The smallest box containing this box and `point`.
    #[must_use]
    pub fn expanded_to_point(&self, point: &LonLat) -> Self {
        self.expanded_to(&Self::from_point(point))
    }

    /// The smallest box containing this box and `other`.
    #[must_use]
    pub fn expanded_to(&self, other: &Self) -> Self {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        Self {
            lon: self.lon.expanded_to(other.lon),
            lat: self.lat.expanded_to(other.lat),
        }
    }

    /// A box covering the intersection of this box and `point`.
    #[must_use]
    pub fn clipped_to_point(&self, point: &LonLat) -> Self {
        self.clipped_to(&Self::from_point(point))
    }

    /// A box covering the intersection of this box and `other`.
    #[must_use]
    pub fn clipped_to(&self, other: &Self) -> Self {
        Self::new(
            self.lon.clipped_to(other.lon),
            self.lat.clipped_to(other.lat),
        )
    }

    /// This box dilated by `w` in longitude and `h` in latitude (negative
    /// amounts erode).
    ///
    /// The longitude interval saturates at the full circle; the latitude
    /// interval clamps at the poles.
    #[must_use]
    pub fn dilated_by(&self, w: Angle, h: Angle) -> Self {
        if self.is_empty() {
            return *self;
        }
        Self::new(self.lon.dilated_by(w), self.lat.dilated_by(h))
    }

    /// This box eroded by `w` in longitude and `h` in latitude.
    #[must_use]
    pub fn eroded_by(&self, w: Angle, h: Angle) -> Self {
        self.dilated_by(-w, -h)
    }

    /// In-place [`expanded_to_point`](Self::expanded_to_point).
    pub fn expand_to_point(&mut self, point: &LonLat) -> &mut Self {
        *self = self.expanded_to_point(point);
        self
    }

    /// In-place [`expanded_to`](Self::expanded_to).
    pub fn expand_to(&mut self, other: &Self) -> &mut Self {
        *self = self.expanded_to(other);
        self
    }

    /// In-place [`clipped_to_point`](Self::clipped_to_point).
    pub fn clip_to_point(&mut self, point: &LonLat) -> &mut Self {
        *self = self.clipped_to_point(point);
        self
    }

    /// In-place [`clipped_to`](Self::clipped_to).
    pub fn clip_to(&mut self, other: &Self) -> &mut Self {
        *self = self.clipped_to(other);
        self
    }

    /// In-place [`dilated_by`](Self::dilated_by).
    pub fn dilate_by(&mut self, w: Angle, h: Angle) -> &mut Self {
        *self = self.dilated_by(w, h);
        self
    }

    /// In-place [`eroded_by`](Self::eroded_by).
    pub fn erode_by(&mut self, w: Angle, h: Angle) -> &mut Self {
        *self = self.eroded_by(w, h);
        self
    }

    /// The bitmask of relations holding between this box and `other`.
    #[must_use]
    pub fn relate_box(&self, other: &Self) -> Relationship {
        let r_lon = self.lon.relate(other.lon);
        let r_lat = self.lat.relate(other.lat);
        let mut r = r_lon
            & r_lat
            & (Relationship::CONTAINS | Relationship::WITHIN);
        r |= (r_lon | r_lat) & Relationship::DISJOINT;
        if r.is_empty() {
            r = Relationship::INTERSECTS;
        }
        r
    }

    /// The bitmask of relations holding between this box and `circle`.
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
        if self.is_full() {
            if circle.is_full() {
                return Relationship::CONTAINS | Relationship::WITHIN;
            }
            return Relationship::CONTAINS;
        }
        if circle.is_full() {
            return Relationship::WITHIN;
        }
        let center = LonLat::from(circle.center());
        let alpha = circle.opening_angle().as_radians();
        let center_inside = self.contains(&center);
        let boundary_min = algo::min_separation_to_box_boundary(
            &center, &self.lon, &self.lat,
        );
        let mut r = Relationship::empty();
        if center_inside && boundary_min >= alpha {
            r |= Relationship::CONTAINS;
        }
        if !center_inside && boundary_min > alpha {
            r |= Relationship::DISJOINT;
        }
        let within = if self.contains_antipode_of(&center) {
            // The farthest point of the box from the center is its
            // antipode, at distance π; only the full circle covers that.
            false
        } else {
            algo::max_separation_to_box_boundary(&center, &self.lon, &self.lat)
                <= alpha
        };
        if within {
            r |= Relationship::WITHIN;
        }
        if r.is_empty() {
            r = Relationship::INTERSECTS;
        }
        r
    }

    /// The bitmask of relations holding between this box and `polygon`.
    #[must_use]
    pub fn relate_polygon(&self, polygon: &ConvexPolygon) -> Relationship {
        if self.is_empty() {
            return Relationship::DISJOINT | Relationship::WITHIN;
        }
        if self.is_full() {
            return Relationship::CONTAINS;
        }
        let mut r = Relationship::empty();
        // A box is a product set, so it contains the polygon iff it
        // contains the polygon's tight lon/lat hull.
        let hull = polygon.bounding_box();
        if self.lon.contains(hull.lon) && self.lat.contains(hull.lat) {
            r |= Relationship::CONTAINS;
        }
        if self.is_within_polygon(polygon) {
            r |= Relationship::WITHIN;
        }
        if !r.is_empty() {
            return r;
        }
        if self.intersects_polygon(polygon) {
            return Relationship::INTERSECTS;
        }
        Relationship::DISJOINT
    }

    /// Returns true if every point of this box lies inside `polygon`.
    ///
    /// The box boundary consists of two constant-latitude arcs joined by
    /// meridian arcs; meridians are geodesics, so checking the parallel
    /// arcs against every polygon edge plane (plus the corners, which lie
    /// on them) covers the whole boundary, and a convex region containing
    /// the boundary of a box contains the box.
    fn is_within_polygon(&self, polygon: &ConvexPolygon) -> bool {
        for phi in [self.lat.get_a().as_radians(), self.lat.get_b().as_radians()]
        {
            let (sin_phi, cos_phi) = (phi.sin(), phi.cos());
            for normal in polygon.edge_normals() {
                let min = algo::min_sinusoid_over(
                    cos_phi * normal.x,
                    cos_phi * normal.y,
                    sin_phi * normal.z,
                    &self.lon,
                );
                if min < 0.0 {
                    return false;
                }
            }
        }
        true
    }

    /// Returns true if this box and `polygon` share at least one point.
    fn intersects_polygon(&self, polygon: &ConvexPolygon) -> bool {
        // Vertex of the polygon inside the box?
        if polygon
            .vertices()
            .iter()
            .any(|v| self.contains_vector(v))
        {
            return true;
        }
        // Corner of the box inside the polygon?
        if let Some(corners) = self.corners() {
            if corners
                .iter()
                .any(|c| polygon.contains(&UnitVector3d::from(c)))
            {
                return true;
            }
        }
        // Pole inside both?
        let north = LonLat::from(&UnitVector3d::Z);
        let south = LonLat::from(&-UnitVector3d::Z);
        if (self.contains(&north) && polygon.contains(&UnitVector3d::Z))
            || (self.contains(&south) && polygon.contains(&-UnitVector3d::Z))
        {
            return true;
        }
        let vertices = polygon.vertices();
        let n = vertices.len();
        // Meridian edges crossing a polygon edge?
        if !self.lon.is_full() {
            for lam in [self.lon.get_a(), self.lon.get_b()] {
                let lo = UnitVector3d::from_lon_lat(
                    Angle::from(lam),
                    self.lat.get_a(),
                );
                let hi = UnitVector3d::from_lon_lat(
                    Angle::from(lam),
                    self.lat.get_b(),
                );
                for i in 0..n {
                    let j = (i + 1) % n;
                    if algo::arcs_intersect(&lo, &hi, &vertices[i], &vertices[j])
                    {
                        return true;
                    }
                }
            }
        }
        // Parallel edges crossing a polygon edge?
        for phi in [self.lat.get_a(), self.lat.get_b()] {
            let (sin_phi, cos_phi) = (phi.sin(), phi.cos());
            for i in 0..n {
                let j = (i + 1) % n;
                let normal = vertices[i].cross(&vertices[j]);
                let roots = algo::sinusoid_roots(
                    cos_phi * normal.x,
                    cos_phi * normal.y,
                    sin_phi * normal.z,
                );
                for lam in roots {
                    if !self.lon.contains_angle(lam) {
                        continue;
                    }
                    let p = UnitVector3d::from_lon_lat(Angle::from(lam), phi);
                    if algo::within_arc(&p, &vertices[i], &vertices[j]) {
                        return true;
                    }
                }
            }
        }
        false
    }

    /// The corners of this box, unless the longitude interval is full.
    fn corners(&self) -> Option<[LonLat; 4]> {
        if self.is_empty() || self.lon.is_full() {
            return None;
        }
        let (la, lb) = (self.lon.get_a(), self.lon.get_b());
        let (pa, pb) = (self.lat.get_a(), self.lat.get_b());
        Some([
            LonLat::new(la, pa),
            LonLat::new(lb, pa),
            LonLat::new(lb, pb),
            LonLat::new(la, pb),
        ])
    }

    /// Returns true if this box contains the antipode of `point`.
    fn contains_antipode_of(&self, point: &LonLat) -> bool {
        let antipode = LonLat::new(
            NormalizedAngle::from_radians(point.lon().as_radians() + PI),
            -point.lat(),
        );
        self.contains(&antipode)
    }

    /// The tightest longitude/latitude box containing this box: itself.
    #[must_use]
    pub const fn bounding_box(&self) -> Self {
        *self
    }

    /// The bounding small circle of this box, centered at the box center.
    #[must_use]
    pub fn bounding_circle(&self) -> Circle {
        if self.is_empty() {
            return Circle::empty();
        }
        if self.is_full() {
            return Circle::full();
        }
        let center = self.get_center();
        if self.contains_antipode_of(&center) {
            return Circle::full();
        }
        let radius = algo::max_separation_to_box_boundary(
            &center, &self.lon, &self.lat,
        );
        Circle::from_angle(
            UnitVector3d::from(&center),
            Angle::new(radius + ANGLE_EPSILON),
        )
        .dilated_for_bounds()
    }

    /// A 3D box containing this box.
    #[must_use]
    pub fn bounding_box3d(&self) -> Box3d {
        if self.is_empty() {
            return Box3d::empty();
        }
        let lat_a = self.lat.get_a().as_radians();
        let lat_b = self.lat.get_b().as_radians();
        // z = sin φ is monotonic in latitude.
        let z = Interval1d::new(
            (lat_a.sin() - ANGLE_EPSILON).max(-1.0),
            (lat_b.sin() + ANGLE_EPSILON).min(1.0),
        );
        // cos φ ≥ 0 everywhere; it peaks at the equator when the box
        // straddles it.
        let cos_lo = lat_a.cos().min(lat_b.cos());
        let cos_hi = if lat_a <= 0.0 && lat_b >= 0.0 {
            1.0
        } else {
            lat_a.cos().max(lat_b.cos())
        };
        let x = scaled_extent(cos_lo, cos_hi, |lam| lam.cos(), &self.lon);
        let y = scaled_extent(cos_lo, cos_hi, |lam| lam.sin(), &self.lon);
        Box3d::new(x, y, z)
    }
}

/// The extent of `cos φ · f(λ)` over a box, given the range of `cos φ` and
/// the trigonometric factor `f` (cos for x, sin for y).
fn scaled_extent(
    cos_lo: f64,
    cos_hi: f64,
    f: impl Fn(f64) -> f64,
    lon: &NormalizedAngleInterval,
) -> Interval1d {
    let mut t_lo = f64::INFINITY;
    let mut t_hi = f64::NEG_INFINITY;
    let mut consider = |lam: f64| {
        let value = f(lam);
        t_lo = t_lo.min(value);
        t_hi = t_hi.max(value);
    };
    consider(lon.get_a().as_radians());
    consider(lon.get_b().as_radians());
    for critical in [0.0, FRAC_PI_2, PI, 1.5 * PI] {
        if lon.is_full()
            || lon.contains_angle(NormalizedAngle::from_radians(critical))
        {
            consider(critical);
        }
    }
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for c in [cos_lo, cos_hi] {
        for t in [t_lo, t_hi] {
            lo = lo.min(c * t);
            hi = hi.max(c * t);
        }
    }
    Interval1d::new((lo - ANGLE_EPSILON).max(-1.0), (hi + ANGLE_EPSILON).min(1.0))
}

impl fmt::Display for LonLatBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Box({}, {})", self.lon, self.lat)
    }
}

#[cfg(test)]
#[path = "./lonlat_box_tests.rs"]
mod tests;
