use std::{fmt, ops};

/// One past the largest valid pixel index.
const LIMIT: u128 = 1 << 64;

/// A sorted, disjoint set of half-open ranges of 64-bit unsigned integers.
///
/// The set is stored as a flat vector of boundaries of even length: the
/// value at index `2k` is the inclusive start of the k-th range and the
/// value at `2k + 1` its exclusive end, with an end of `0` in the final
/// position denoting 2⁶⁴. After every operation the ranges are sorted,
/// disjoint and non-adjacent.
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeSet {
    ranges: Vec<u64>,
}

impl RangeSet {
    /// Initializes a new, empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self { ranges: Vec::new() }
    }

    /// The set containing every 64-bit integer.
    #[must_use]
    pub fn full() -> Self {
        Self {
            ranges: vec![0, 0],
        }
    }

    /// The set containing the single integer `value`.
    #[must_use]
    pub fn of(value: u64) -> Self {
        Self::from_pairs(vec![(u128::from(value), u128::from(value) + 1)])
    }

    /// The set containing `[begin, end)`.
    ///
    /// A pair with `end <= begin` wraps: it denotes
    /// `[begin, 2⁶⁴) ∪ [0, end)`.
    #[must_use]
    pub fn of_range(begin: u64, end: u64) -> Self {
        let mut set = Self::new();
        set.insert_range(begin, end);
        set
    }

    /// The set containing every value of `values`.
    #[must_use]
    pub fn from_values<I: IntoIterator<Item = u64>>(values: I) -> Self {
        let mut set = Self::new();
        for value in values {
            set.insert(value);
        }
        set
    }

    /// Returns true if this set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    /// Returns true if this set contains all of `[0, 2⁶⁴)`.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.ranges == [0, 0]
    }

    /// The number of ranges in this set.
    #[must_use]
    pub fn num_ranges(&self) -> usize {
        self.ranges.len() / 2
    }

    /// The number of integers in this set.
    #[must_use]
    pub fn cardinality(&self) -> u128 {
        self.pairs().map(|(a, b)| b - a).sum()
    }

    /// The boundary vector of this set (see the type-level encoding notes).
    #[must_use]
    pub fn boundaries(&self) -> &[u64] {
        &self.ranges
    }

    /// Iterates over the `(begin, end)` range pairs of this set.
    ///
    /// An `end` of 0 in the final pair denotes 2⁶⁴.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.ranges.chunks_exact(2).map(|c| (c[0], c[1]))
    }

    /// The `(begin, end)` range pairs of this set.
    #[must_use]
    pub fn ranges(&self) -> Vec<(u64, u64)> {
        self.iter().collect()
    }

    /// Inserts the single integer `value` into this set.
    pub fn insert(&mut self, value: u64) {
        let pair = vec![(u128::from(value), u128::from(value) + 1)];
        *self = Self::from_pairs(combine(&self.to_pairs(), &pair, |a, b| a | b));
    }

    /// Inserts `[begin, end)` into this set (wrapping pairs allowed).
    pub fn insert_range(&mut self, begin: u64, end: u64) {
        let pairs = unwrap_range(begin, end);
        *self =
            Self::from_pairs(combine(&self.to_pairs(), &pairs, |a, b| a | b));
    }

    /// Removes the single integer `value` from this set.
    pub fn erase(&mut self, value: u64) {
        let pair = vec![(u128::from(value), u128::from(value) + 1)];
        *self = Self::from_pairs(combine(&self.to_pairs(), &pair, |a, b| a & !b));
    }

    /// Removes `[begin, end)` from this set (wrapping pairs allowed).
    pub fn erase_range(&mut self, begin: u64, end: u64) {
        let pairs = unwrap_range(begin, end);
        *self =
            Self::from_pairs(combine(&self.to_pairs(), &pairs, |a, b| a & !b));
    }

    /// Replaces this set by its complement in `[0, 2⁶⁴)`.
    pub fn complement(&mut self) {
        *self = self.complemented();
    }

    /// The complement of this set in `[0, 2⁶⁴)`.
    #[must_use]
    pub fn complemented(&self) -> Self {
        Self::from_pairs(combine(&self.to_pairs(), &[], |a, _| !a))
    }

    /// The union of this set and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::from_pairs(combine(&self.to_pairs(), &other.to_pairs(), |a, b| {
            a | b
        }))
    }

    /// The intersection of this set and `other`.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        Self::from_pairs(combine(&self.to_pairs(), &other.to_pairs(), |a, b| {
            a & b
        }))
    }

    /// The difference of this set and `other`.
    #[must_use]
    pub fn difference(&self, other: &Self) -> Self {
        Self::from_pairs(combine(&self.to_pairs(), &other.to_pairs(), |a, b| {
            a & !b
        }))
    }

    /// The symmetric difference of this set and `other`.
    #[must_use]
    pub fn symmetric_difference(&self, other: &Self) -> Self {
        Self::from_pairs(combine(&self.to_pairs(), &other.to_pairs(), |a, b| {
            a ^ b
        }))
    }

    /// Returns true if this set contains the integer `value`.
    #[must_use]
    pub fn contains(&self, value: u64) -> bool {
        self.contains_pair(u128::from(value), u128::from(value) + 1)
    }

    /// Returns true if this set contains all of `[begin, end)`.
    #[must_use]
    pub fn contains_range(&self, begin: u64, end: u64) -> bool {
        unwrap_range(begin, end)
            .iter()
            .all(|&(a, b)| self.contains_pair(a, b))
    }

    /// Returns true if this set contains every element of `other`.
    #[must_use]
    pub fn contains_set(&self, other: &Self) -> bool {
        other.pairs().all(|(a, b)| self.contains_pair(a, b))
    }

    /// Returns true if every element of this set is in `other`.
    #[must_use]
    pub fn is_within(&self, other: &Self) -> bool {
        other.contains_set(self)
    }

    /// Returns true if every element of this set is in `[begin, end)`.
    #[must_use]
    pub fn is_within_range(&self, begin: u64, end: u64) -> bool {
        self.is_within(&Self::of_range(begin, end))
    }

    /// Returns true if this set and `other` share an element.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        let a: Vec<_> = self.pairs().collect();
        let b: Vec<_> = other.pairs().collect();
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            if a[i].1 <= b[j].0 {
                i += 1;
            } else if b[j].1 <= a[i].0 {
                j += 1;
            } else {
                return true;
            }
        }
        false
    }

    /// Returns true if this set and `[begin, end)` share an element.
    #[must_use]
    pub fn intersects_range(&self, begin: u64, end: u64) -> bool {
        self.intersects(&Self::of_range(begin, end))
    }

    /// Returns true if this set and `other` share no element.
    #[must_use]
    pub fn is_disjoint_from(&self, other: &Self) -> bool {
        !self.intersects(other)
    }

    /// Returns true if this set and `[begin, end)` share no element.
    #[must_use]
    pub fn is_disjoint_from_range(&self, begin: u64, end: u64) -> bool {
        !self.intersects_range(begin, end)
    }

    /// Merges ranges until at most `max_ranges` remain.
    ///
    /// The pair of adjacent ranges with the smallest gap merges first, ties
    /// breaking towards the lower index; the result is a superset of the
    /// original. `max_ranges == 0` is a no-op.
    pub fn simplify(&mut self, max_ranges: usize) {
        if max_ranges == 0 {
            return;
        }
        let mut pairs: Vec<(u128, u128)> = self.pairs().collect();
        while pairs.len() > max_ranges {
            let mut best = 0;
            let mut best_gap = u128::MAX;
            for i in 0..pairs.len() - 1 {
                let gap = pairs[i + 1].0 - pairs[i].1;
                if gap < best_gap {
                    best_gap = gap;
                    best = i;
                }
            }
            pairs[best].1 = pairs[best + 1].1;
            pairs.remove(best + 1);
        }
        *self = Self::from_pairs(pairs);
    }

    /// The simplified copy of this set (see [`simplify`](Self::simplify)).
    #[must_use]
    pub fn simplified(&self, max_ranges: usize) -> Self {
        let mut set = self.clone();
        set.simplify(max_ranges);
        set
    }

    /// Returns true if this set contains all of `[begin, end)` in decoded
    /// bounds.
    fn contains_pair(&self, begin: u128, end: u128) -> bool {
        self.pairs().any(|(a, b)| a <= begin && end <= b)
    }

    /// Iterates over the ranges of this set in decoded (`u128`) bounds.
    fn pairs(&self) -> impl Iterator<Item = (u128, u128)> + '_ {
        self.ranges.chunks_exact(2).map(|c| {
            let begin = u128::from(c[0]);
            let end = if c[1] == 0 { LIMIT } else { u128::from(c[1]) };
            (begin, end)
        })
    }

    /// The ranges of this set in decoded (`u128`) bounds.
    fn to_pairs(&self) -> Vec<(u128, u128)> {
        self.pairs().collect()
    }

    /// Builds a set from decoded ranges that are already sorted, disjoint
    /// and non-adjacent (as produced by the pixelization walkers).
    pub(crate) fn from_normalized_pairs(pairs: Vec<(u128, u128)>) -> Self {
        debug_assert!(
            pairs.windows(2).all(|w| w[0].1 < w[1].0),
            "ranges not normalized"
        );
        Self::from_pairs(pairs)
    }

    /// Rebuilds a set from sorted, disjoint decoded ranges.
    fn from_pairs(pairs: Vec<(u128, u128)>) -> Self {
        let mut ranges = Vec::with_capacity(pairs.len() * 2);
        for (begin, end) in pairs {
            debug_assert!(begin < end && end <= LIMIT, "malformed range");
            #[allow(clippy::cast_possible_truncation)]
            {
                ranges.push(begin as u64);
                ranges.push(if end == LIMIT { 0 } else { end as u64 });
            }
        }
        Self { ranges }
    }
}

/// Decodes a possibly wrapping `[begin, end)` into plain sorted ranges.
///
/// A pair with `end <= begin` wraps around the top of the index space;
/// `begin == end` covers everything.
fn unwrap_range(begin: u64, end: u64) -> Vec<(u128, u128)> {
    let begin = u128::from(begin);
    let end = u128::from(end);
    if begin < end {
        return vec![(begin, end)];
    }
    if begin == end {
        return vec![(0, LIMIT)];
    }
    let mut pairs = Vec::with_capacity(2);
    if end > 0 {
        pairs.push((0, end));
    }
    pairs.push((begin, LIMIT));
    pairs
}

/// Combines two sorted disjoint range lists with a boolean operation.
///
/// The operation receives the membership of a point in each input and
/// decides its membership in the output; adjacent output ranges merge.
fn combine(
    a: &[(u128, u128)],
    b: &[(u128, u128)],
    op: impl Fn(bool, bool) -> bool,
) -> Vec<(u128, u128)> {
    let mut bounds = Vec::with_capacity(a.len() * 2 + b.len() * 2 + 2);
    bounds.push(0);
    bounds.push(LIMIT);
    for &(begin, end) in a.iter().chain(b) {
        bounds.push(begin);
        bounds.push(end);
    }
    bounds.sort_unstable();
    bounds.dedup();

    let member = |ranges: &[(u128, u128)], x: u128| {
        ranges
            .binary_search_by(|&(begin, end)| {
                if x < begin {
                    std::cmp::Ordering::Greater
                } else if x >= end {
                    std::cmp::Ordering::Less
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    };

    let mut out: Vec<(u128, u128)> = Vec::new();
    for w in bounds.windows(2) {
        let (lo, hi) = (w[0], w[1]);
        if op(member(a, lo), member(b, lo)) {
            match out.last_mut() {
                Some(last) if last.1 == lo => last.1 = hi,
                _ => out.push((lo, hi)),
            }
        }
    }
    out
}

impl ops::BitOr for &RangeSet {
    type Output = RangeSet;

    fn bitor(self, rhs: Self) -> RangeSet {
        self.union(rhs)
    }
}

impl ops::BitAnd for &RangeSet {
    type Output = RangeSet;

    fn bitand(self, rhs: Self) -> RangeSet {
        self.intersection(rhs)
    }
}

impl ops::Sub for &RangeSet {
    type Output = RangeSet;

    fn sub(self, rhs: Self) -> RangeSet {
        self.difference(rhs)
    }
}

impl ops::BitXor for &RangeSet {
    type Output = RangeSet;

    fn bitxor(self, rhs: Self) -> RangeSet {
        self.symmetric_difference(rhs)
    }
}

impl ops::Not for &RangeSet {
    type Output = RangeSet;

    fn not(self) -> RangeSet {
        self.complemented()
    }
}

impl ops::BitOrAssign<&Self> for RangeSet {
    fn bitor_assign(&mut self, rhs: &Self) {
        *self = self.union(rhs);
    }
}

impl ops::BitAndAssign<&Self> for RangeSet {
    fn bitand_assign(&mut self, rhs: &Self) {
        *self = self.intersection(rhs);
    }
}

impl ops::SubAssign<&Self> for RangeSet {
    fn sub_assign(&mut self, rhs: &Self) {
        *self = self.difference(rhs);
    }
}

impl ops::BitXorAssign<&Self> for RangeSet {
    fn bitxor_assign(&mut self, rhs: &Self) {
        *self = self.symmetric_difference(rhs);
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, (begin, end)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "({begin}, {end})")?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
#[path = "./rangeset_tests.rs"]
mod tests;
