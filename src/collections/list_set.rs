//! Ordered set backed by a sorted doubly linked list.
//!
//! [`SortedListSet`] is the simple alternative to
//! [`OrderedSet`](super::OrderedSet): the same contract, a different cost
//! profile.
//!
//! | Operation        | `SortedListSet`          | `OrderedSet`         |
//! |------------------|--------------------------|----------------------|
//! | `add`            | O(N), O(1) at the tail   | O(log N) average     |
//! | `contains`       | O(N), O(1) at the tail   | O(log N) average     |
//! | iterator step    | O(1)                     | O(1) amortized       |
//! | `first`/`last`   | O(1)                     | O(height)            |
//!
//! Appending in ascending order only ever touches the tail, so rebuilding a
//! list from another sorted sequence is linear.
//!
//! # Examples
//!
//! ```rust
//! use spamsieve::collections::{CaseInsensitive, SortedListSet};
//!
//! let mut set = SortedListSet::with_comparator(CaseInsensitive);
//! for word in ["b", "a", "b", "c", "d", "c"] {
//!     set.add(word);
//! }
//!
//! assert_eq!(set.len(), 4);
//! assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
//! ```

use super::algebra::OrderedCollection;
use super::comparator::{Comparator, NaturalOrder};
use super::error::SetError;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

#[derive(Clone, Debug)]
struct ListNode<T> {
    element: T,
    previous: Option<usize>,
    next: Option<usize>,
}

/// Where a probe sits relative to the list.
enum Position {
    Found(usize),
    /// Insert before this node; `None` appends after the tail.
    Before(Option<usize>),
}

/// A duplicate-free set kept as a sorted doubly linked list.
///
/// Nodes live in a `Vec` arena and are linked by index in both directions.
/// Equal elements follow the same rule as [`OrderedSet`](super::OrderedSet):
/// the first one inserted is kept.
///
/// # Examples
///
/// ```rust
/// use spamsieve::collections::SortedListSet;
///
/// let set: SortedListSet<i32> = [3, 1, 2, 3].into_iter().collect();
/// assert_eq!(set.len(), 3);
/// assert_eq!(set.first(), Some(&1));
/// assert_eq!(set.last(), Some(&3));
/// ```
#[derive(Clone)]
pub struct SortedListSet<T, C = NaturalOrder> {
    nodes: Vec<ListNode<T>>,
    head: Option<usize>,
    tail: Option<usize>,
    comparator: C,
}

impl<T: Ord> SortedListSet<T> {
    /// Creates an empty set ordered by [`Ord`].
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> SortedListSet<T, C> {
    /// Creates an empty set bound to `comparator`.
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: Vec::new(),
            head: None,
            tail: None,
            comparator,
        }
    }

    /// Creates an empty set with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if the storage cannot be
    /// allocated.
    pub fn try_with_capacity(comparator: C, capacity: usize) -> Result<Self, SetError> {
        let mut set = Self::with_comparator(comparator);
        set.nodes.try_reserve_exact(capacity)?;
        Ok(set)
    }

    /// Returns the number of elements in the set.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the set contains no elements.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Returns the comparator the set was created with.
    #[inline]
    #[must_use]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// Returns the smallest element.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.head.map(|index| &self.nodes[index].element)
    }

    /// Returns the largest element.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.tail.map(|index| &self.nodes[index].element)
    }

    /// Returns an iterator over the elements in ascending order.
    #[must_use]
    pub fn iter(&self) -> SortedListIterator<'_, T, C> {
        SortedListIterator::new(self)
    }

    /// Removes every element, keeping the comparator.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = None;
        self.tail = None;
    }

    fn locate<Q>(&self, probe: &Q) -> Position
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let Some(tail) = self.tail else {
            return Position::Before(None);
        };
        match self.comparator.compare(probe, self.nodes[tail].element.borrow()) {
            Ordering::Greater => return Position::Before(None),
            Ordering::Equal => return Position::Found(tail),
            Ordering::Less => {}
        }

        let mut cursor = self.head;
        while let Some(index) = cursor {
            let node = &self.nodes[index];
            match self.comparator.compare(probe, node.element.borrow()) {
                Ordering::Less => return Position::Before(Some(index)),
                Ordering::Equal => return Position::Found(index),
                Ordering::Greater => cursor = node.next,
            }
        }
        Position::Before(None)
    }

    fn insert_before(&mut self, element: T, successor: Option<usize>) {
        let index = self.nodes.len();
        let previous = successor.map_or(self.tail, |next| self.nodes[next].previous);
        self.nodes.push(ListNode {
            element,
            previous,
            next: successor,
        });

        match previous {
            Some(previous) => self.nodes[previous].next = Some(index),
            None => self.head = Some(index),
        }
        match successor {
            Some(next) => self.nodes[next].previous = Some(index),
            None => self.tail = Some(index),
        }
    }
}

impl<T, C: Comparator<T>> SortedListSet<T, C> {
    /// Inserts `element` unless an equal element is already present.
    ///
    /// Returns `true` if the element was inserted.
    pub fn add(&mut self, element: T) -> bool {
        match self.locate(&element) {
            Position::Found(_) => false,
            Position::Before(successor) => {
                self.insert_before(element, successor);
                true
            }
        }
    }

    /// Inserts `element`, reporting allocation failure instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if the arena cannot grow.
    pub fn try_add(&mut self, element: T) -> Result<bool, SetError> {
        self.nodes.try_reserve(1)?;
        Ok(self.add(element))
    }

    /// Returns `true` if an element equal to `element` is in the set.
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        matches!(self.locate(element), Position::Found(_))
    }

    /// Returns the stored element equal to `element`, if any.
    #[must_use]
    pub fn get<Q>(&self, element: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        match self.locate(element) {
            Position::Found(index) => Some(&self.nodes[index].element),
            Position::Before(_) => None,
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

/// A restartable cursor over a [`SortedListSet`] in ascending order.
pub struct SortedListIterator<'a, T, C = NaturalOrder> {
    set: &'a SortedListSet<T, C>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, T, C> SortedListIterator<'a, T, C> {
    const fn new(set: &'a SortedListSet<T, C>) -> Self {
        Self {
            set,
            cursor: set.head,
            remaining: set.len(),
        }
    }

    /// Returns `true` while there are elements left to visit.
    #[inline]
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.cursor.is_some()
    }

    /// Returns the next element without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<&'a T> {
        let set = self.set;
        self.cursor.map(|index| &set.nodes[index].element)
    }

    /// Returns the next element, or [`SetError::ExhaustedIterator`] once
    /// every element has been produced.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::ExhaustedIterator`] when called after the last
    /// element.
    pub fn try_next(&mut self) -> Result<&'a T, SetError> {
        self.next().ok_or(SetError::ExhaustedIterator)
    }

    /// Moves the cursor back to the smallest element.
    pub fn restart(&mut self) {
        *self = Self::new(self.set);
    }
}

impl<'a, T, C> Iterator for SortedListIterator<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let set = self.set;
        let node = &set.nodes[self.cursor?];
        self.cursor = node.next;
        self.remaining -= 1;
        Some(&node.element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C> ExactSizeIterator for SortedListIterator<'_, T, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T, C> FusedIterator for SortedListIterator<'_, T, C> {}

impl<T, C> Clone for SortedListIterator<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            set: self.set,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

/// An owning iterator over the elements of a [`SortedListSet`] in ascending
/// order.
pub struct SortedListIntoIterator<T> {
    slots: Vec<Option<T>>,
    links: Vec<Option<usize>>,
    cursor: Option<usize>,
    remaining: usize,
}

impl<T> Iterator for SortedListIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.cursor?;
        self.cursor = self.links[index];
        self.remaining -= 1;
        self.slots[index].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for SortedListIntoIterator<T> {}

impl<T> FusedIterator for SortedListIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C: Default> Default for SortedListSet<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for SortedListSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, C: Comparator<T>> Extend<T> for SortedListSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T, C> IntoIterator for SortedListSet<T, C> {
    type Item = T;
    type IntoIter = SortedListIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        let remaining = self.nodes.len();
        let (slots, links) = self
            .nodes
            .into_iter()
            .map(|node| (Some(node.element), node.next))
            .unzip();
        SortedListIntoIterator {
            slots,
            links,
            cursor: self.head,
            remaining,
        }
    }
}

impl<'a, T, C> IntoIterator for &'a SortedListSet<T, C> {
    type Item = &'a T;
    type IntoIter = SortedListIterator<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C: Comparator<T>> PartialEq for SortedListSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(left, right)| self.comparator.compare(left, right) == Ordering::Equal)
    }
}

impl<T, C: Comparator<T>> Eq for SortedListSet<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for SortedListSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Clone, C: Comparator<T> + Clone> OrderedCollection for SortedListSet<T, C> {
    type Element = T;

    fn empty_like(&self) -> Self {
        Self::with_comparator(self.comparator.clone())
    }

    fn add(&mut self, element: T) -> bool {
        Self::add(self, element)
    }

    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn ascending(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }

    fn copy(&self) -> Self {
        self.clone()
    }
}

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for SortedListSet<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for SortedListSet<T, C>
where
    T: serde::Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let elements = Vec::<T>::deserialize(deserializer)?;
        Ok(elements.into_iter().collect())
    }
}
