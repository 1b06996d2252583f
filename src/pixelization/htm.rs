use super::{walk_quadtree, Pixelization};
use crate::{
    error::{InvalidLevel, InvalidPixelIndex, NotImplemented},
    region::algo,
    ConvexPolygon, RangeSet, Region, UnitVector3d, Vector3d,
};
use std::fmt;

/// The hierarchical triangular mesh pixelization.
///
/// The sphere is split into 8 root spherical triangles (S0–S3 south of the
/// equator, N0–N3 north of it) which subdivide 4-ways by connecting edge
/// midpoints. A level-L pixel index occupies `4 + 2L` bits, with the top
/// four bits holding the root number (8–15).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HtmPixelization {
    level: u8,
}

impl HtmPixelization {
    /// The deepest supported subdivision level.
    pub const MAX_LEVEL: u8 = 24;

    /// Initializes a new HTM pixelization at the given subdivision level.
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

    /// The subdivision level of an HTM index, or `None` if the index is
    /// invalid.
    #[allow(clippy::cast_possible_truncation)]
    #[must_use]
    pub fn level_of(index: u64) -> Option<u8> {
        let bits = 64 - index.leading_zeros();
        if bits < 4 || (bits - 4) % 2 != 0 {
            return None;
        }
        let level = (bits - 4) / 2;
        if level > u32::from(Self::MAX_LEVEL) {
            return None;
        }
        Some(level as u8)
    }

    /// The vertices of the root triangle `root` (in 8..16).
    fn root_triangle(root: u64) -> [UnitVector3d; 3] {
        let x = UnitVector3d::X;
        let y = UnitVector3d::Y;
        let z = UnitVector3d::Z;
        match root {
            8 => [x, -z, y],
            9 => [y, -z, -x],
            10 => [-x, -z, -y],
            11 => [-y, -z, x],
            12 => [x, z, -y],
            13 => [-y, z, -x],
            14 => [-x, z, y],
            15 => [y, z, x],
            _ => unreachable!("root out of range"),
        }
    }

    /// The vertices of the triangle with the given index and level.
    fn triangle(index: u64, level: u8) -> [UnitVector3d; 3] {
        let root = index >> (2 * u32::from(level));
        let [mut v0, mut v1, mut v2] = Self::root_triangle(root);
        for depth in (0..level).rev() {
            let child = (index >> (2 * u32::from(depth))) & 3;
            let m01 = midpoint(&v0, &v1);
            let m12 = midpoint(&v1, &v2);
            let m20 = midpoint(&v2, &v0);
            (v0, v1, v2) = match child {
                0 => (v0, m01, m20),
                1 => (v1, m12, m01),
                2 => (v2, m20, m12),
                _ => (m12, m20, m01),
            };
        }
        [v0, v1, v2]
    }

    /// The triangle of a node as a convex polygon.
    fn pixel_polygon(index: u64, level: u8) -> ConvexPolygon {
        let [v0, v1, v2] = Self::triangle(index, level);
        ConvexPolygon::new(vec![v0, v1, v2])
            .unwrap_or_else(|_| unreachable!("degenerate mesh triangle"))
    }
}

impl Pixelization for HtmPixelization {
    fn universe(&self) -> RangeSet {
        let shift = 2 * u32::from(self.level);
        RangeSet::of_range(8 << shift, 16 << shift)
    }

    fn pixel(&self, index: u64) -> Result<Region, InvalidPixelIndex> {
        let level = Self::level_of(index)
            .ok_or_else(|| InvalidPixelIndex::new(index, "not an HTM index"))?;
        Ok(Region::Polygon(Self::pixel_polygon(index, level)))
    }

    fn index(&self, v: &UnitVector3d) -> u64 {
        // Pick the root from the z sign and the longitude quadrant.
        let quadrant = if v.x() > 0.0 && v.y() >= 0.0 {
            0
        } else if v.x() <= 0.0 && v.y() > 0.0 {
            1
        } else if v.x() < 0.0 && v.y() <= 0.0 {
            2
        } else if v.x() >= 0.0 && v.y() < 0.0 {
            3
        } else {
            // On the z axis itself; quadrant 0 by convention.
            0
        };
        let mut index = if v.z() < 0.0 {
            8 + quadrant
        } else {
            15 - quadrant
        };
        let [mut v0, mut v1, mut v2] = Self::root_triangle(index);
        for _ in 0..self.level {
            let m01 = midpoint(&v0, &v1);
            let m12 = midpoint(&v1, &v2);
            let m20 = midpoint(&v2, &v0);
            index <<= 2;
            // Strict tests: points on an internal boundary fall through to
            // the central child.
            if algo::orientation(v, &m01, &m20) > 0.0 {
                (v1, v2) = (m01, m20);
            } else if algo::orientation(v, &m12, &m01) > 0.0 {
                (v0, v1, v2) = (v1, m12, m01);
                index |= 1;
            } else if algo::orientation(v, &m20, &m12) > 0.0 {
                (v0, v1, v2) = (v2, m20, m12);
                index |= 2;
            } else {
                (v0, v1, v2) = (m12, m20, m01);
                index |= 3;
            }
        }
        index
    }

    fn label(&self, index: u64) -> Result<String, InvalidPixelIndex> {
        let level = Self::level_of(index)
            .ok_or_else(|| InvalidPixelIndex::new(index, "not an HTM index"))?;
        let root = index >> (2 * u32::from(level));
        let mut label = String::with_capacity(2 + usize::from(level));
        label.push(if root < 12 { 'S' } else { 'N' });
        label.push(char::from(b'0' + ((root as u8) & 3)));
        for depth in (0..level).rev() {
            let child = (index >> (2 * u32::from(depth))) & 3;
            label.push(char::from(b'0' + child as u8));
        }
        Ok(label)
    }

    fn envelope(
        &self,
        region: &Region,
        max_ranges: usize,
    ) -> Result<RangeSet, NotImplemented> {
        let mut set = walk_quadtree(
            region,
            8..16,
            self.level,
            &Self::pixel_polygon,
            false,
        );
        set.simplify(max_ranges);
        Ok(set)
    }

    fn interior(
        &self,
        region: &Region,
        max_ranges: usize,
    ) -> Result<RangeSet, NotImplemented> {
        let mut set = walk_quadtree(
            region,
            8..16,
            self.level,
            &Self::pixel_polygon,
            true,
        );
        set.simplify(max_ranges);
        Ok(set)
    }
}

/// The normalized midpoint of two unit vectors.
fn midpoint(a: &UnitVector3d, b: &UnitVector3d) -> UnitVector3d {
    let sum: Vector3d = *a + *b;
    UnitVector3d::normalized(&sum)
}

impl fmt::Display for HtmPixelization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HtmPixelization({})", self.level)
    }
}

#[cfg(test)]
#[path = "./htm_tests.rs"]
mod tests;
