//! Hierarchical pixelizations of the unit sphere.

mod cube;
mod healpix;
mod htm;
mod q3c;

pub use healpix::HealpixPixelization;
pub use htm::HtmPixelization;
pub use q3c::{Mq3cPixelization, Q3cPixelization};

use crate::{
    error::{InvalidPixelIndex, NotImplemented},
    ConvexPolygon, RangeSet, Region, Relationship, UnitVector3d,
};

/// A mapping between points on the unit sphere and a hierarchical set of
/// pixel indices.
pub trait Pixelization {
    /// The set of all valid pixel indices.
    fn universe(&self) -> RangeSet;

    /// The spherical region of the pixel with the given index.
    ///
    /// # Errors
    ///
    /// [`InvalidPixelIndex`] when `index` is not a valid pixel index.
    fn pixel(&self, index: u64) -> Result<Region, InvalidPixelIndex>;

    /// The index of the pixel containing `v`.
    ///
    /// Boundary points map to one of their incident pixels; the choice is
    /// deterministic and stable across platforms.
    fn index(&self, v: &UnitVector3d) -> u64;

    /// A human readable label for the pixel with the given index.
    ///
    /// # Errors
    ///
    /// [`InvalidPixelIndex`] when `index` is not a valid pixel index.
    fn label(&self, index: u64) -> Result<String, InvalidPixelIndex>;

    /// A superset of the indices of the pixels intersecting `region`.
    ///
    /// With `max_ranges > 0` the result is simplified until it consists of
    /// at most that many ranges (growing the superset).
    ///
    /// # Errors
    ///
    /// [`NotImplemented`] when the pixelization cannot honor `max_ranges`.
    fn envelope(
        &self,
        region: &Region,
        max_ranges: usize,
    ) -> Result<RangeSet, NotImplemented>;

    /// A subset of the indices of the pixels entirely inside `region`.
    ///
    /// With `max_ranges > 0` the result is simplified until it consists of
    /// at most that many ranges, which may add boundary pixels.
    ///
    /// # Errors
    ///
    /// [`NotImplemented`] when the pixelization cannot honor `max_ranges`.
    fn interior(
        &self,
        region: &Region,
        max_ranges: usize,
    ) -> Result<RangeSet, NotImplemented>;
}

/// Walks a 4-way subdivision hierarchy, collecting the pixels at `level`
/// that intersect (envelope) or lie inside (interior) `region`.
///
/// Nodes disjoint from the region are pruned; nodes contained in the
/// region contribute their whole index range. Visits happen in ascending
/// index order, so output ranges assemble sorted and coalesced.
pub(crate) fn walk_quadtree(
    region: &Region,
    roots: std::ops::Range<u64>,
    level: u8,
    pixel_at: &impl Fn(u64, u8) -> ConvexPolygon,
    interior: bool,
) -> RangeSet {
    let mut out: Vec<(u128, u128)> = Vec::new();
    for root in roots {
        visit(region, root, 0, level, pixel_at, interior, &mut out);
    }
    RangeSet::from_normalized_pairs(out)
}

#[allow(clippy::too_many_arguments)]
fn visit(
    region: &Region,
    index: u64,
    node_level: u8,
    target_level: u8,
    pixel_at: &impl Fn(u64, u8) -> ConvexPolygon,
    interior: bool,
    out: &mut Vec<(u128, u128)>,
) {
    let pixel = Region::Polygon(pixel_at(index, node_level));
    let relation = region.relate(&pixel);
    if relation.contains(Relationship::DISJOINT) {
        return;
    }
    if relation.contains(Relationship::CONTAINS) {
        // The node is entirely inside the region: take its whole subtree.
        let shift = 2 * u32::from(target_level - node_level);
        let begin = u128::from(index) << shift;
        emit(out, begin, begin + (1 << shift));
        return;
    }
    if node_level == target_level {
        if !interior {
            emit(out, u128::from(index), u128::from(index) + 1);
        }
        return;
    }
    for child in 0..4 {
        visit(
            region,
            index * 4 + child,
            node_level + 1,
            target_level,
            pixel_at,
            interior,
            out,
        );
    }
}

fn emit(out: &mut Vec<(u128, u128)>, begin: u128, end: u128) {
    match out.last_mut() {
        Some(last) if last.1 == begin => last.1 = end,
        _ => out.push((begin, end)),
    }
}
