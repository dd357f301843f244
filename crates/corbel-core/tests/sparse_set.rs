//! Handle stability of the arena backing the component tree.

use corbel_core::alloc::sparse_set::{IndexSlot, SparseSet};
use corbel_core::geometry::BBox;

#[test]
fn test_stale_handle_survives_heavy_reuse() {
    let mut set = SparseSet::new();
    let first = set.push(BBox::new(0, 0, 1, 1));

    let mut current = first;
    for i in 0..100 {
        set.try_remove(current);
        current = set.push(BBox::new(0, 0, i, i));
        assert_eq!(current.index(), first.index());
    }

    assert_eq!(set.len(), 1);
    assert_eq!(current.generation(), 100);
    assert!(set.try_get(first).is_none());
    assert_eq!(set.try_get(current), Some(&BBox::new(0, 0, 99, 99)));
}

#[test]
fn test_removal_leaves_other_handles_alone() {
    let mut set = SparseSet::new();
    let a = set.push('a');
    let b = set.push('b');
    let c = set.push('c');

    assert_eq!(set.try_remove(b), Some('b'));
    if let Some(v) = set.try_get_mut(c) {
        *v = 'C';
    }

    let live: Vec<_> = set.iter().collect();
    assert_eq!(live, vec![(a, &'a'), (c, &'C')]);
}

#[test]
fn test_out_of_range_handle_is_absent() {
    let set = SparseSet::<BBox>::new();
    let missing = IndexSlot::new(0, 999);
    assert!(set.try_get(missing).is_none());
    assert!(!set.contains(missing));
    assert!(set.is_empty());
}
