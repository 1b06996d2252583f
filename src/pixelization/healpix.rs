use super::Pixelization;
use crate::{
    error::{InvalidLevel, InvalidPixelIndex, NotImplemented},
    ConvexPolygon, LonLat, RangeSet, Region, UnitVector3d,
};
use std::fmt;

/// Number of extra subdivision levels used to refine envelope queries.
const REFINEMENT_LEVELS: u8 = 4;

/// Bit shift between the refined and the target resolution.
const REFINEMENT_SHIFT: u32 = 2 * REFINEMENT_LEVELS as u32;

/// The HEALPix pixelization (nested scheme), backed by the external
/// `cdshealpix` implementation.
///
/// A level-L sphere has `12·4^L` pixels. Region queries reduce the region
/// to a cone or polygon coverage; the envelope runs the coverage a few
/// levels deeper, dilates it by one ring of neighbors and shifts back, and
/// the interior keeps only the pixels whose four corners pass the
/// vectorized containment test.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HealpixPixelization {
    level: u8,
}

impl HealpixPixelization {
    /// The deepest supported subdivision level.
    pub const MAX_LEVEL: u8 = 17;

    /// Initializes a new HEALPix pixelization at the given subdivision
    /// level.
    ///
    /// # Errors
    ///
    /// [`InvalidLevel`] when `level` exceeds [`MAX_LEVEL`](Self::MAX_LEVEL).
    pub fn new(level: u8) -> Result<Self, InvalidLevel> {
        if level > Self::MAX_LEVEL {
            return Err(InvalidLevel::new(level, "out of range"));
        }
        Ok(Self { level })
    }

    /// The subdivision level of this pixelization.
    #[must_use]
    pub const fn level(&self) -> u8 {
        self.level
    }

    /// The number of pixels per sphere at this level.
    #[must_use]
    pub const fn num_pixels(&self) -> u64 {
        12 << (2 * self.level as u32)
    }

    /// All pixels overlapping `region` at the given depth, via the
    /// appropriate cdshealpix coverage query.
    fn coverage(region: &Region, depth: u8) -> RangeSet {
        let circle = match region {
            Region::Polygon(p) => {
                let vertices: Vec<(f64, f64)> = p
                    .vertices()
                    .iter()
                    .map(|v| {
                        let p = LonLat::from(v);
                        (p.lon().as_radians(), p.lat().as_radians())
                    })
                    .collect();
                let bmoc =
                    cdshealpix::nested::polygon_coverage(depth, &vertices, true);
                return collect_sorted(bmoc.flat_iter().collect());
            }
            Region::Circle(c) => *c,
            // Boxes, ellipses and compounds go through their bounding
            // circle (a superset, which coverage queries tolerate).
            other => other.bounding_circle(),
        };
        if circle.is_empty() {
            return RangeSet::new();
        }
        if circle.is_full() {
            return RangeSet::of_range(0, 12 << (2 * u32::from(depth)));
        }
        let center = LonLat::from(circle.center());
        let bmoc = cdshealpix::nested::cone_coverage_approx(
            depth,
            center.lon().as_radians(),
            center.lat().as_radians(),
            circle.opening_angle().as_radians(),
        );
        collect_sorted(bmoc.flat_iter().collect())
    }

    /// The four corners of a pixel as parallel lon/lat slices, in radians.
    fn corners(depth: u8, hash: u64) -> (Vec<f64>, Vec<f64>) {
        let vertices = cdshealpix::nested::vertices(depth, hash);
        let lon = vertices.iter().map(|&(lon, _)| lon).collect();
        let lat = vertices.iter().map(|&(_, lat)| lat).collect();
        (lon, lat)
    }
}

impl Pixelization for HealpixPixelization {
    fn universe(&self) -> RangeSet {
        RangeSet::of_range(0, self.num_pixels())
    }

    fn pixel(&self, index: u64) -> Result<Region, InvalidPixelIndex> {
        if index >= self.num_pixels() {
            return Err(InvalidPixelIndex::new(index, "out of range"));
        }
        let vertices: Vec<UnitVector3d> =
            cdshealpix::nested::vertices(self.level, index)
                .iter()
                .map(|&(lon, lat)| {
                    UnitVector3d::from_lon_lat(
                        crate::Angle::new(lon),
                        crate::Angle::new(lat),
                    )
                })
                .collect();
        ConvexPolygon::convex_hull(&vertices)
            .map(Region::Polygon)
            .map_err(|_| InvalidPixelIndex::new(index, "degenerate pixel"))
    }

    fn index(&self, v: &UnitVector3d) -> u64 {
        let p = LonLat::from(v);
        cdshealpix::nested::hash(
            self.level,
            p.lon().as_radians(),
            p.lat().as_radians(),
        )
    }

    fn label(&self, index: u64) -> Result<String, InvalidPixelIndex> {
        if index >= self.num_pixels() {
            return Err(InvalidPixelIndex::new(index, "out of range"));
        }
        Ok(index.to_string())
    }

    fn envelope(
        &self,
        region: &Region,
        max_ranges: usize,
    ) -> Result<RangeSet, NotImplemented> {
        if max_ranges > 0 {
            return Err(NotImplemented::new(
                "bounded-size envelopes are not supported for HEALPix",
            ));
        }
        let depth = self.level + REFINEMENT_LEVELS;
        let refined = Self::coverage(region, depth);
        let mut pixels = Vec::new();
        for (begin, end) in refined.iter() {
            for hash in begin..end {
                pixels.push(hash >> REFINEMENT_SHIFT);
                // One ring of neighbors guarantees that the shifted-down
                // coverage stays a superset of the region.
                for neighbor in cdshealpix::nested::neighbours(
                    depth, hash, false,
                )
                .values_vec()
                {
                    pixels.push(neighbor >> REFINEMENT_SHIFT);
                }
            }
        }
        Ok(collect_sorted(pixels))
    }

    fn interior(
        &self,
        region: &Region,
        max_ranges: usize,
    ) -> Result<RangeSet, NotImplemented> {
        if max_ranges > 0 {
            return Err(NotImplemented::new(
                "bounded-size interiors are not supported for HEALPix",
            ));
        }
        let candidates = Self::coverage(region, self.level);
        let mut pixels = Vec::new();
        for (begin, end) in candidates.iter() {
            for hash in begin..end {
                let (lon, lat) = Self::corners(self.level, hash);
                if region.contains_lonlats(&lon, &lat).iter().all(|&b| b) {
                    pixels.push(hash);
                }
            }
        }
        Ok(collect_sorted(pixels))
    }
}

/// Builds a range set from an arbitrarily ordered pixel list.
fn collect_sorted(mut pixels: Vec<u64>) -> RangeSet {
    pixels.sort_unstable();
    pixels.dedup();
    let mut pairs: Vec<(u128, u128)> = Vec::new();
    for pixel in pixels {
        let value = u128::from(pixel);
        match pairs.last_mut() {
            Some(last) if last.1 == value => last.1 = value + 1,
            _ => pairs.push((value, value + 1)),
        }
    }
    RangeSet::from_normalized_pairs(pairs)
}

impl fmt::Display for HealpixPixelization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HealpixPixelization({})", self.level)
    }
}
