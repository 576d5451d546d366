//! Set algebra over any ordered, duplicate-free collection.
//!
//! [`OrderedCollection`] is the small set of primitives a backing structure
//! has to provide; [`SetAlgebra`] builds union, intersection, difference and
//! friends on top of them, once, for every backing.
//!
//! Every operation returns a new set carrying the comparator of the
//! receiver and leaves both operands untouched. Elements are cloned into the
//! result; for shared handles such as `Rc<str>` that is a reference count
//! bump, so the payload itself is never copied.
//!
//! # Examples
//!
//! ```rust
//! use spamsieve::collections::{OrderedSet, SetAlgebra};
//!
//! let a: OrderedSet<&str> = ["x", "y", "z"].into_iter().collect();
//! let b: OrderedSet<&str> = ["y", "z", "w"].into_iter().collect();
//!
//! assert_eq!(a.union(&b).iter().copied().collect::<Vec<_>>(), vec!["w", "x", "y", "z"]);
//! assert_eq!(a.intersection(&b).iter().copied().collect::<Vec<_>>(), vec!["y", "z"]);
//! assert_eq!(a.difference(&b).iter().copied().collect::<Vec<_>>(), vec!["x"]);
//! ```

/// Primitives shared by the set backings.
pub trait OrderedCollection: Sized {
    /// The element type.
    type Element: Clone;

    /// Returns an empty collection using the same comparator as `self`.
    #[must_use]
    fn empty_like(&self) -> Self;

    /// Inserts `element` unless an equal one is present; returns `true` if
    /// it was inserted.
    fn add(&mut self, element: Self::Element) -> bool;

    /// Returns `true` if an element equal to `element` is present.
    fn contains(&self, element: &Self::Element) -> bool;

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if there are no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates the elements in ascending order.
    fn ascending(&self) -> impl Iterator<Item = &Self::Element>;

    /// Iterates the elements in the order that rebuilds this collection most
    /// cheaply through [`add`](Self::add).
    fn rebuild_order(&self) -> impl Iterator<Item = &Self::Element> {
        self.ascending()
    }

    /// Returns an independent collection with the same elements and
    /// comparator.
    #[must_use]
    fn copy(&self) -> Self {
        let mut copy = self.empty_like();
        for element in self.rebuild_order() {
            copy.add(element.clone());
        }
        copy
    }
}

/// Set algebra derived from [`OrderedCollection`].
pub trait SetAlgebra: OrderedCollection {
    /// Returns every element of `self` and of `other`.
    ///
    /// When both sides hold equal elements, the one from `self` is kept.
    ///
    /// # Complexity
    ///
    /// O(m * h) on top of copying `self`, where m = `other.len()` and h is
    /// the height of the result.
    #[must_use]
    fn union(&self, other: &Self) -> Self {
        let mut result = self.copy();
        result.union_in_place(other);
        result
    }

    /// Adds every element of `other` to `self`.
    ///
    /// Equivalent to `*self = self.union(other)` without copying `self`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spamsieve::collections::{OrderedSet, SetAlgebra};
    ///
    /// let mut seen: OrderedSet<i32> = OrderedSet::new();
    /// for batch in [[1, 2], [2, 3]] {
    ///     seen.union_in_place(&batch.into_iter().collect());
    /// }
    /// assert_eq!(seen.len(), 3);
    /// ```
    fn union_in_place(&mut self, other: &Self) {
        for element in other.rebuild_order() {
            self.add(element.clone());
        }
    }

    /// Returns the elements of `self` that are also in `other`.
    #[must_use]
    fn intersection(&self, other: &Self) -> Self {
        retain_into(self, |element| other.contains(element))
    }

    /// Returns the elements of `self` that are not in `other`.
    #[must_use]
    fn difference(&self, other: &Self) -> Self {
        retain_into(self, |element| !other.contains(element))
    }

    /// Returns the elements that are in exactly one of `self` and `other`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spamsieve::collections::{OrderedSet, SetAlgebra};
    ///
    /// let a: OrderedSet<i32> = [1, 2, 3].into_iter().collect();
    /// let b: OrderedSet<i32> = [2, 3, 4].into_iter().collect();
    /// assert_eq!(a.symmetric_difference(&b).iter().copied().collect::<Vec<_>>(), vec![1, 4]);
    /// ```
    #[must_use]
    fn symmetric_difference(&self, other: &Self) -> Self {
        let mut result = self.difference(other);
        for element in other.rebuild_order() {
            if !self.contains(element) {
                result.add(element.clone());
            }
        }
        result
    }

    /// Returns `true` if every element of `self` is in `other`.
    fn is_subset(&self, other: &Self) -> bool {
        self.len() <= other.len() && self.ascending().all(|element| other.contains(element))
    }

    /// Returns `true` if `self` and `other` have no element in common.
    fn is_disjoint(&self, other: &Self) -> bool {
        let (smaller, larger) = if self.len() <= other.len() {
            (self, other)
        } else {
            (other, self)
        };
        !smaller.ascending().any(|element| larger.contains(element))
    }
}

impl<S: OrderedCollection> SetAlgebra for S {}

/// Collects the elements of `set` accepted by `keep` into a new set.
fn retain_into<S, F>(set: &S, mut keep: F) -> S
where
    S: OrderedCollection,
    F: FnMut(&S::Element) -> bool,
{
    let mut result = set.empty_like();
    for element in set.rebuild_order() {
        if keep(element) {
            result.add(element.clone());
        }
    }
    result
}
