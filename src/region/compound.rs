use super::Region;
use crate::{Box3d, Circle, LonLatBox, Relationship, UnitVector3d};
use std::fmt;

/// The union of an ordered list of regions.
///
/// Construction flattens operands that are themselves unions, so `relate`
/// stays linear in the number of atomic operands. A union of no operands
/// is the empty region.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnionRegion {
    operands: Vec<Region>,
}

impl UnionRegion {
    /// Initializes a new union, flattening nested unions in order.
    #[must_use]
    pub fn new(operands: Vec<Region>) -> Self {
        let mut flat = Vec::with_capacity(operands.len());
        for operand in operands {
            match operand {
                Region::Union(u) => flat.extend(u.operands),
                other => flat.push(other),
            }
        }
        Self { operands: flat }
    }

    /// The operands of this union.
    #[must_use]
    pub fn operands(&self) -> &[Region] {
        &self.operands
    }

    /// Returns true if any operand contains the direction `v`.
    #[must_use]
    pub fn contains(&self, v: &UnitVector3d) -> bool {
        self.operands.iter().any(|r| r.contains(v))
    }

    /// The bitmask of relations holding between this union and `other`.
    ///
    /// The union contains `other` when any operand does, lies within it
    /// when all (of at least one) do, and is disjoint from it when all
    /// operands are.
    #[must_use]
    pub fn relate(&self, other: &Region) -> Relationship {
        let relations: Vec<Relationship> =
            self.operands.iter().map(|r| r.relate(other)).collect();
        let mut result = Relationship::empty();
        if relations
            .iter()
            .any(|r| r.contains(Relationship::CONTAINS))
        {
            result |= Relationship::CONTAINS;
        }
        if !relations.is_empty()
            && relations.iter().all(|r| r.contains(Relationship::WITHIN))
        {
            result |= Relationship::WITHIN;
        }
        if relations
            .iter()
            .all(|r| r.contains(Relationship::DISJOINT))
        {
            result |= Relationship::DISJOINT;
        }
        if result.is_empty() {
            result = Relationship::INTERSECTS;
        }
        result
    }

    /// The smallest box containing every operand's bounding box.
    #[must_use]
    pub fn bounding_box(&self) -> LonLatBox {
        let mut bbox = LonLatBox::empty();
        for operand in &self.operands {
            bbox = bbox.expanded_to(&operand.bounding_box());
        }
        bbox
    }

    /// The smallest 3D box containing every operand's bound.
    #[must_use]
    pub fn bounding_box3d(&self) -> Box3d {
        let mut bbox = Box3d::empty();
        for operand in &self.operands {
            bbox = bbox.expanded_to(operand.bounding_box3d());
        }
        bbox
    }

    /// A circle containing every operand's bounding circle.
    #[must_use]
    pub fn bounding_circle(&self) -> Circle {
        let mut circle = Circle::empty();
        for operand in &self.operands {
            circle = circle.expanded_to(&operand.bounding_circle());
        }
        circle
    }
}

impl fmt::Display for UnionRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UnionRegion(")?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{operand}")?;
        }
        write!(f, ")")
    }
}

// -----------------------------------------------------------------------------

/// The intersection of an ordered list of regions.
///
/// Construction flattens operands that are themselves intersections. An
/// intersection of no operands is the full sphere.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IntersectionRegion {
    operands: Vec<Region>,
}

impl IntersectionRegion {
    /// Initializes a new intersection, flattening nested intersections in
    /// order.
    #[must_use]
    pub fn new(operands: Vec<Region>) -> Self {
        let mut flat = Vec::with_capacity(operands.len());
        for operand in operands {
            match operand {
                Region::Intersection(i) => flat.extend(i.operands),
                other => flat.push(other),
            }
        }
        Self { operands: flat }
    }

    /// The operands of this intersection.
    #[must_use]
    pub fn operands(&self) -> &[Region] {
        &self.operands
    }

    /// Returns true if every operand contains the direction `v`.
    #[must_use]
    pub fn contains(&self, v: &UnitVector3d) -> bool {
        self.operands.iter().all(|r| r.contains(v))
    }

    /// The bitmask of relations holding between this intersection and
    /// `other`.
    ///
    /// The intersection contains `other` when all operands do (vacuously
    /// for no operands), lies within it when any operand does, and is
    /// disjoint from it when any operand is.
    #[must_use]
    pub fn relate(&self, other: &Region) -> Relationship {
        let relations: Vec<Relationship> =
            self.operands.iter().map(|r| r.relate(other)).collect();
        let mut result = Relationship::empty();
        if relations
            .iter()
            .all(|r| r.contains(Relationship::CONTAINS))
        {
            result |= Relationship::CONTAINS;
        }
        if relations.iter().any(|r| r.contains(Relationship::WITHIN)) {
            result |= Relationship::WITHIN;
        }
        if relations
            .iter()
            .any(|r| r.contains(Relationship::DISJOINT))
        {
            result |= Relationship::DISJOINT;
        }
        if result.is_empty() {
            result = Relationship::INTERSECTS;
        }
        result
    }

    /// The intersection of the operands' bounding boxes (full for no
    /// operands).
    #[must_use]
    pub fn bounding_box(&self) -> LonLatBox {
        let mut bbox = LonLatBox::full();
        for operand in &self.operands {
            bbox = bbox.clipped_to(&operand.bounding_box());
        }
        bbox
    }

    /// The intersection of the operands' 3D bounds.
    #[must_use]
    pub fn bounding_box3d(&self) -> Box3d {
        let mut bbox = Box3d::around_unit_sphere();
        for operand in &self.operands {
            bbox = bbox.clipped_to(operand.bounding_box3d());
        }
        bbox
    }

    /// A circle containing the intersection of the operands' bounding
    /// circles.
    #[must_use]
    pub fn bounding_circle(&self) -> Circle {
        let mut circle = Circle::full();
        for operand in &self.operands {
            circle = circle.clipped_to(&operand.bounding_circle());
        }
        circle
    }
}

impl fmt::Display for IntersectionRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IntersectionRegion(")?;
        for (i, operand) in self.operands.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{operand}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
#[path = "./compound_tests.rs"]
mod tests;
