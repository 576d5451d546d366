#![cfg(feature = "collections")]
//! Property-based tests for OrderedSet laws.
//!
//! These tests verify that OrderedSet behaves as a duplicate-free sorted
//! collection and that its set algebra agrees with `BTreeSet`.

use proptest::prelude::*;
use spamsieve::collections::{OrderedCollection, OrderedSet, SetAlgebra, SetError};
use std::collections::BTreeSet;

fn model(elements: &[i32]) -> BTreeSet<i32> {
    elements.iter().copied().collect()
}

fn contents(set: &OrderedSet<i32>) -> Vec<i32> {
    set.iter().copied().collect()
}

// =============================================================================
// Uniqueness Law
// Description: The length equals the number of distinct elements added
// =============================================================================

proptest! {
    #[test]
    fn prop_uniqueness_law(elements in prop::collection::vec(-20i32..20, 0..80)) {
        let set: OrderedSet<i32> = elements.iter().copied().collect();

        prop_assert_eq!(set.len(), model(&elements).len());
    }
}

// =============================================================================
// Ordering Law
// Description: Iteration yields strictly ascending elements
// =============================================================================

proptest! {
    #[test]
    fn prop_ordering_law(elements in prop::collection::vec(any::<i32>(), 0..80)) {
        let set: OrderedSet<i32> = elements.into_iter().collect();
        let ascending = contents(&set);

        prop_assert!(ascending.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(set.first(), ascending.first());
        prop_assert_eq!(set.last(), ascending.last());
    }
}

// =============================================================================
// Membership Law
// Description: contains is true exactly for the elements that were added
// =============================================================================

proptest! {
    #[test]
    fn prop_membership_law(
        elements in prop::collection::vec(-50i32..50, 0..50),
        probe in -60i32..60
    ) {
        let set: OrderedSet<i32> = elements.iter().copied().collect();

        prop_assert_eq!(set.contains(&probe), elements.contains(&probe));
    }
}

// =============================================================================
// Add Result Law
// Description: add returns true exactly when the element was absent
// =============================================================================

proptest! {
    #[test]
    fn prop_add_result_law(
        elements in prop::collection::vec(-20i32..20, 0..40),
        element in -20i32..20
    ) {
        let mut set: OrderedSet<i32> = elements.iter().copied().collect();
        let was_present = set.contains(&element);
        let length_before = set.len();

        prop_assert_eq!(set.add(element), !was_present);
        prop_assert_eq!(set.len(), length_before + usize::from(!was_present));
        prop_assert!(set.contains(&element));
    }
}

// =============================================================================
// Union Law
// Description: x ∈ A ∪ B iff x ∈ A or x ∈ B
// =============================================================================

proptest! {
    #[test]
    fn prop_union_law(
        left in prop::collection::vec(-30i32..30, 0..40),
        right in prop::collection::vec(-30i32..30, 0..40)
    ) {
        let left_set: OrderedSet<i32> = left.iter().copied().collect();
        let right_set: OrderedSet<i32> = right.iter().copied().collect();
        let expected: Vec<i32> = model(&left).union(&model(&right)).copied().collect();

        prop_assert_eq!(contents(&left_set.union(&right_set)), expected);
    }
}

// =============================================================================
// Union Commutativity Law
// Description: A ∪ B = B ∪ A
// =============================================================================

proptest! {
    #[test]
    fn prop_union_commutativity_law(
        left in prop::collection::vec(any::<i32>(), 0..40),
        right in prop::collection::vec(any::<i32>(), 0..40)
    ) {
        let left_set: OrderedSet<i32> = left.into_iter().collect();
        let right_set: OrderedSet<i32> = right.into_iter().collect();

        prop_assert_eq!(left_set.union(&right_set), right_set.union(&left_set));
    }
}

// =============================================================================
// Intersection Law
// Description: x ∈ A ∩ B iff x ∈ A and x ∈ B
// =============================================================================

proptest! {
    #[test]
    fn prop_intersection_law(
        left in prop::collection::vec(-30i32..30, 0..40),
        right in prop::collection::vec(-30i32..30, 0..40)
    ) {
        let left_set: OrderedSet<i32> = left.iter().copied().collect();
        let right_set: OrderedSet<i32> = right.iter().copied().collect();
        let expected: Vec<i32> = model(&left).intersection(&model(&right)).copied().collect();

        prop_assert_eq!(contents(&left_set.intersection(&right_set)), expected);
    }
}

// =============================================================================
// Difference Law
// Description: x ∈ A \ B iff x ∈ A and x ∉ B
// =============================================================================

proptest! {
    #[test]
    fn prop_difference_law(
        left in prop::collection::vec(-30i32..30, 0..40),
        right in prop::collection::vec(-30i32..30, 0..40)
    ) {
        let left_set: OrderedSet<i32> = left.iter().copied().collect();
        let right_set: OrderedSet<i32> = right.iter().copied().collect();
        let expected: Vec<i32> = model(&left).difference(&model(&right)).copied().collect();

        prop_assert_eq!(contents(&left_set.difference(&right_set)), expected);
    }
}

// =============================================================================
// Difference Disjointness Law
// Description: (A \ B) ∩ B = ∅ and (A \ B) ∪ (A ∩ B) = A
// =============================================================================

proptest! {
    #[test]
    fn prop_difference_disjointness_law(
        left in prop::collection::vec(-30i32..30, 0..40),
        right in prop::collection::vec(-30i32..30, 0..40)
    ) {
        let left_set: OrderedSet<i32> = left.into_iter().collect();
        let right_set: OrderedSet<i32> = right.into_iter().collect();
        let difference = left_set.difference(&right_set);

        prop_assert!(difference.is_disjoint(&right_set));
        prop_assert_eq!(difference.union(&left_set.intersection(&right_set)), left_set);
    }
}

// =============================================================================
// Algebra Shape Law
// Description: Derived sets are never taller than the operand they rebuild
// =============================================================================

proptest! {
    #[test]
    fn prop_algebra_shape_law(
        left in prop::collection::vec(any::<i32>(), 0..60),
        right in prop::collection::vec(any::<i32>(), 0..60)
    ) {
        let left_set: OrderedSet<i32> = left.into_iter().collect();
        let right_set: OrderedSet<i32> = right.into_iter().collect();

        prop_assert!(left_set.intersection(&right_set).height() <= left_set.height());
        prop_assert!(left_set.difference(&right_set).height() <= left_set.height());
        prop_assert_eq!(left_set.copy().height(), left_set.height());
    }
}

// =============================================================================
// Copy Law
// Description: A copy is equal to its source and evolves independently
// =============================================================================

proptest! {
    #[test]
    fn prop_copy_law(
        elements in prop::collection::vec(-30i32..30, 0..40),
        extra in 100i32..200
    ) {
        let original: OrderedSet<i32> = elements.into_iter().collect();
        let mut copy = original.copy();
        prop_assert_eq!(&copy, &original);

        copy.add(extra);
        prop_assert!(!original.contains(&extra));
        prop_assert_eq!(copy.len(), original.len() + 1);
    }
}

// =============================================================================
// Iterator Exhaustion Law
// Description: An iterator yields exactly len elements, then reports exhaustion
// until restarted
// =============================================================================

proptest! {
    #[test]
    fn prop_iterator_exhaustion_law(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let set: OrderedSet<i32> = elements.into_iter().collect();
        let mut iterator = set.iter();

        let mut yielded = 0;
        while iterator.has_next() {
            prop_assert!(iterator.try_next().is_ok());
            yielded += 1;
        }
        prop_assert_eq!(yielded, set.len());
        prop_assert_eq!(iterator.try_next(), Err(SetError::ExhaustedIterator));

        iterator.restart();
        prop_assert_eq!(iterator.len(), set.len());
        prop_assert_eq!(iterator.next(), set.first());
    }
}
