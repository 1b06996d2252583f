use skygeom::RangeSet;

#[test]
fn primes_and_complement() {
    let s = RangeSet::from_values([2_u64, 3, 5, 7, 11, 13, 17, 19]);
    let round_trip =
        RangeSet::from_values(s.iter().flat_map(|(a, b)| a..b));
    assert_eq!(s, round_trip, "iteration reproduces the set");

    let c = s.complemented();
    assert!(c.contains(4));
    assert!(!c.contains(17));
    assert!(s.union(&c).is_full());
    assert!(s.intersection(&c).is_empty());
}

#[test]
fn boundary_vector_encoding() {
    // The boundary vector is the public serialization; a final end of 0
    // denotes 2⁶⁴.
    let s = RangeSet::of_range(4, 2);
    assert_eq!(s.boundaries(), &[0, 2, 4, 0]);

    let top = RangeSet::of(u64::MAX);
    assert_eq!(top.boundaries(), &[u64::MAX, 0]);
    assert!(top.contains(u64::MAX));
}

#[test]
fn algebra_identities() {
    let a = RangeSet::from_values([1_u64, 5, 6, 7, 100]);
    let b = RangeSet::of_range(6, 50);

    assert_eq!(a.symmetric_difference(&a), RangeSet::new());
    assert_eq!(
        a.union(&b).difference(&b),
        a.difference(&b),
        "(a ∪ b) − b = a − b"
    );
    assert_eq!(
        a.intersection(&b).union(&a.difference(&b)),
        a,
        "partition by b"
    );
    assert!(a.intersection(&b).is_within(&a));
    assert!(a.is_within(&a.union(&b)));
}

#[test]
fn simplify_bounds_range_count() {
    let mut s = RangeSet::new();
    for i in 0..20_u64 {
        s.insert(i * 10);
    }
    assert_eq!(s.num_ranges(), 20);
    let simplified = s.simplified(4);
    assert!(simplified.num_ranges() <= 4);
    assert!(s.is_within(&simplified), "simplification only grows the set");
    s.simplify(0);
    assert_eq!(s.num_ranges(), 20, "zero bound is a no-op");
}
