//! Ordered set backed by an unbalanced binary search tree.
//!
//! This module provides [`OrderedSet`], a duplicate-free collection whose
//! elements are arranged by a caller supplied [`Comparator`], and
//! [`SetIterator`], a restartable cursor that walks the set in ascending
//! order.
//!
//! # Overview
//!
//! - O(log N) average `add` and `contains`, O(N) worst case
//! - O(1) `len` and `is_empty`
//! - O(1) amortized iterator step, O(N) for a full traversal
//! - O(N) time and O(N) scratch space for [`OrderedSet::height`], a
//!   diagnostic; nothing else allocates beyond the node arena
//! - No removal
//!
//! # Internal Structure
//!
//! Nodes live in a `Vec` arena and refer to each other by index. Every node
//! keeps the index of its parent next to its two children, which lets the
//! iterator find the in-order successor by climbing the tree instead of
//! keeping a stack of pending ancestors. Parent links are plain indices, so
//! they never own anything and there is no reference cycle to break.
//!
//! Since nothing is ever removed, every slot of the arena is a live node,
//! the root is always slot `0`, and a parent always sits at a lower index
//! than its children. Dropping the set drops the arena as one flat
//! allocation, without recursing down the tree.
//!
//! The tree is never rebalanced. Inserting elements in ascending (or
//! descending) order builds a chain whose height equals its size; see
//! [`OrderedSet::height`].
//!
//! # Examples
//!
//! ```rust
//! use spamsieve::collections::{CaseInsensitive, OrderedSet};
//!
//! let mut set = OrderedSet::with_comparator(CaseInsensitive);
//! for word in ["b", "a", "b", "c", "d", "c"] {
//!     set.add(word);
//! }
//!
//! assert_eq!(set.len(), 4);
//! let words: Vec<&str> = set.iter().copied().collect();
//! assert_eq!(words, vec!["a", "b", "c", "d"]);
//! ```

use super::algebra::OrderedCollection;
use super::comparator::{Comparator, NaturalOrder};
use super::error::SetError;
use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::iter::{FromIterator, FusedIterator};

// =============================================================================
// Node Definition
// =============================================================================

/// Position of a node inside the arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct NodeIndex(usize);

/// Which child slot of a parent a new node is attached to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Side {
    Left,
    Right,
}

#[derive(Clone, Debug)]
struct Node<T> {
    element: T,
    parent: Option<NodeIndex>,
    left: Option<NodeIndex>,
    right: Option<NodeIndex>,
}

/// Outcome of walking down the tree looking for a probe.
enum Descent {
    /// A node comparing equal to the probe.
    Found(NodeIndex),
    /// The empty child slot where the probe belongs, or `None` for an empty
    /// tree.
    Vacant(Option<(NodeIndex, Side)>),
}

// =============================================================================
// OrderedSet Definition
// =============================================================================

/// A duplicate-free set whose elements are kept in comparator order.
///
/// The comparator is chosen when the set is created and never changes. Two
/// elements that compare equal are the same element: the first one inserted
/// is kept and later ones are dropped.
///
/// The set holds its elements by value. Whether that value owns its payload
/// is up to the element type: a set of `String` owns its words, a set of
/// `Rc<str>` shares them with the caller and with every set derived from it.
///
/// # Time Complexity
///
/// | Operation  | Average   | Worst (sorted input) |
/// |------------|-----------|----------------------|
/// | `add`      | O(log N)  | O(N)                 |
/// | `contains` | O(log N)  | O(N)                 |
/// | `len`      | O(1)      | O(1)                 |
/// | `iter`     | O(log N)  | O(N)                 |
/// | `clone`    | O(N)      | O(N)                 |
///
/// # Examples
///
/// ```rust
/// use spamsieve::collections::OrderedSet;
///
/// let mut set = OrderedSet::new();
/// assert!(set.add(3));
/// assert!(set.add(1));
/// assert!(!set.add(3));
///
/// assert!(set.contains(&1));
/// assert!(!set.contains(&2));
/// assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 3]);
/// ```
#[derive(Clone)]
pub struct OrderedSet<T, C = NaturalOrder> {
    nodes: Vec<Node<T>>,
    comparator: C,
}

impl<T: Ord> OrderedSet<T> {
    /// Creates an empty set ordered by the element type's [`Ord`]
    /// implementation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spamsieve::collections::OrderedSet;
    ///
    /// let set: OrderedSet<i32> = OrderedSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<T, C> OrderedSet<T, C> {
    /// Creates an empty set bound to `comparator` for its whole lifetime.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spamsieve::collections::OrderedSet;
    ///
    /// let mut descending = OrderedSet::with_comparator(|left: &i32, right: &i32| right.cmp(left));
    /// descending.extend([1, 3, 2]);
    /// assert_eq!(descending.iter().copied().collect::<Vec<_>>(), vec![3, 2, 1]);
    /// ```
    #[inline]
    #[must_use]
    pub const fn with_comparator(comparator: C) -> Self {
        Self {
            nodes: Vec::new(),
            comparator,
        }
    }

    /// Creates an empty set with room for `capacity` elements.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if the storage cannot be
    /// allocated.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spamsieve::collections::{NaturalOrder, OrderedSet, SetError};
    ///
    /// let set = OrderedSet::<u64, _>::try_with_capacity(NaturalOrder, 128)?;
    /// assert!(set.is_empty());
    ///
    /// let too_big = OrderedSet::<u64, _>::try_with_capacity(NaturalOrder, usize::MAX);
    /// assert!(matches!(too_big, Err(SetError::AllocationFailure(_))));
    /// # Ok::<(), SetError>(())
    /// ```
    pub fn try_with_capacity(comparator: C, capacity: usize) -> Result<Self, SetError> {
        let mut nodes = Vec::new();
        nodes.try_reserve_exact(capacity)?;
        Ok(Self { nodes, comparator })
    }

    /// Returns the number of elements in the set.
    ///
    /// # Complexity
    ///
    /// O(1)
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

    /// Returns an iterator over the elements in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spamsieve::collections::OrderedSet;
    ///
    /// let set: OrderedSet<i32> = [5, 1, 4, 2, 3].into_iter().collect();
    ///
    /// let mut iterator = set.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.len(), 4);
    /// ```
    #[must_use]
    pub fn iter(&self) -> SetIterator<'_, T, C> {
        SetIterator::new(self)
    }

    /// Returns the smallest element, or `None` if the set is empty.
    #[must_use]
    pub fn first(&self) -> Option<&T> {
        self.first_index().map(|index| &self.node(index).element)
    }

    /// Returns the largest element, or `None` if the set is empty.
    #[must_use]
    pub fn last(&self) -> Option<&T> {
        self.root()
            .map(|root| &self.node(self.rightmost(root)).element)
    }

    /// Returns the number of nodes on the longest path from the root to a
    /// leaf; `0` for an empty set.
    ///
    /// The tree is not balanced, so the height depends on insertion order:
    /// sorted input produces a height equal to [`len`](Self::len).
    ///
    /// # Complexity
    ///
    /// O(N) time and O(N) auxiliary space: one pass over the arena recording
    /// the depth of every node. Meant for diagnostics and tests, not for hot
    /// paths.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spamsieve::collections::OrderedSet;
    ///
    /// let chain: OrderedSet<i32> = (0..10).collect();
    /// assert_eq!(chain.height(), 10);
    ///
    /// let bushy: OrderedSet<i32> = [4, 2, 6, 1, 3, 5, 7].into_iter().collect();
    /// assert_eq!(bushy.height(), 3);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        // Parents always precede their children in the arena.
        let mut depths: Vec<usize> = Vec::with_capacity(self.nodes.len());
        for node in &self.nodes {
            let depth = node.parent.map_or(1, |parent| depths[parent.0] + 1);
            depths.push(depth);
        }
        depths.into_iter().max().unwrap_or(0)
    }

    /// Removes every element, keeping the comparator.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    #[inline]
    const fn root(&self) -> Option<NodeIndex> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeIndex(0))
        }
    }

    #[inline]
    fn node(&self, index: NodeIndex) -> &Node<T> {
        &self.nodes[index.0]
    }

    fn first_index(&self) -> Option<NodeIndex> {
        self.root().map(|root| self.leftmost(root))
    }

    fn leftmost(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(left) = self.node(index).left {
            index = left;
        }
        index
    }

    fn rightmost(&self, mut index: NodeIndex) -> NodeIndex {
        while let Some(right) = self.node(index).right {
            index = right;
        }
        index
    }

    /// Finds the in-order successor of `index` using only child and parent
    /// links.
    fn successor(&self, index: NodeIndex) -> Option<NodeIndex> {
        let node = self.node(index);
        if let Some(right) = node.right {
            return Some(self.leftmost(right));
        }

        // Climb until we arrive at an ancestor from its left subtree.
        let mut child = index;
        let mut parent = node.parent;
        while let Some(ancestor) = parent {
            let ancestor_node = self.node(ancestor);
            if ancestor_node.left == Some(child) {
                return Some(ancestor);
            }
            child = ancestor;
            parent = ancestor_node.parent;
        }
        None
    }

    /// Node indices in ascending element order.
    fn ascending_indices(&self) -> Vec<NodeIndex> {
        let mut indices = Vec::with_capacity(self.nodes.len());
        let mut cursor = self.first_index();
        while let Some(index) = cursor {
            indices.push(index);
            cursor = self.successor(index);
        }
        indices
    }

    /// Walks down from the root towards `probe`.
    ///
    /// This is the only place where the sign of a comparison is turned into
    /// a direction: less goes left, greater goes right.
    fn descend<Q>(&self, probe: &Q) -> Descent
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        let Some(mut current) = self.root() else {
            return Descent::Vacant(None);
        };

        loop {
            let node = self.node(current);
            let (side, child) = match self.comparator.compare(probe, node.element.borrow()) {
                Ordering::Equal => return Descent::Found(current),
                Ordering::Less => (Side::Left, node.left),
                Ordering::Greater => (Side::Right, node.right),
            };
            match child {
                Some(next) => current = next,
                None => return Descent::Vacant(Some((current, side))),
            }
        }
    }

    fn attach(&mut self, element: T, slot: Option<(NodeIndex, Side)>) {
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(Node {
            element,
            parent: slot.map(|(parent, _)| parent),
            left: None,
            right: None,
        });

        if let Some((parent, side)) = slot {
            let parent_node = &mut self.nodes[parent.0];
            match side {
                Side::Left => parent_node.left = Some(index),
                Side::Right => parent_node.right = Some(index),
            }
        }
    }
}

impl<T, C: Comparator<T>> OrderedSet<T, C> {
    /// Inserts `element` unless an equal element is already present.
    ///
    /// Returns `true` if the element was inserted. When an equal element
    /// exists the set keeps the one it already has and `element` is dropped.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spamsieve::collections::{CaseInsensitive, OrderedSet};
    ///
    /// let mut set = OrderedSet::with_comparator(CaseInsensitive);
    /// assert!(set.add("Spam"));
    /// assert!(!set.add("SPAM"));
    ///
    /// // The first spelling wins
    /// assert_eq!(set.get("spam"), Some(&"Spam"));
    /// ```
    pub fn add(&mut self, element: T) -> bool {
        match self.descend(&element) {
            Descent::Found(_) => false,
            Descent::Vacant(slot) => {
                self.attach(element, slot);
                true
            }
        }
    }

    /// Inserts the element built by `make` from `probe`, unless an element
    /// equal to `probe` is already present.
    ///
    /// The tree is searched once, and `make` runs only when `probe` is
    /// missing, so a repeated probe never builds an element. The built
    /// element must compare equal to `probe`.
    ///
    /// Returns `true` if an element was inserted.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spamsieve::collections::{CaseInsensitive, OrderedSet};
    /// use std::rc::Rc;
    ///
    /// let mut set: OrderedSet<Rc<str>, _> = OrderedSet::with_comparator(CaseInsensitive);
    /// assert!(set.add_with("Now", |word| Rc::from(word)));
    /// assert!(!set.add_with("NOW", |_| unreachable!("already present")));
    /// assert_eq!(set.get("now").map(|word| &**word), Some("Now"));
    /// ```
    pub fn add_with<Q, F>(&mut self, probe: &Q, make: F) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
        F: FnOnce(&Q) -> T,
    {
        match self.descend(probe) {
            Descent::Found(_) => false,
            Descent::Vacant(slot) => {
                self.attach(make(probe), slot);
                true
            }
        }
    }

    /// Inserts `element` like [`add`](Self::add), reporting allocation
    /// failure instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`SetError::AllocationFailure`] if the arena cannot grow; the
    /// set is left unchanged.
    pub fn try_add(&mut self, element: T) -> Result<bool, SetError> {
        self.nodes.try_reserve(1)?;
        Ok(self.add(element))
    }

    /// Returns `true` if an element equal to `element` is in the set.
    ///
    /// The probe may be any borrowed form of the element type, as long as
    /// the comparator orders it the same way.
    ///
    /// # Complexity
    ///
    /// O(height)
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spamsieve::collections::{CaseInsensitive, OrderedSet};
    /// use std::rc::Rc;
    ///
    /// let mut set: OrderedSet<Rc<str>, _> = OrderedSet::with_comparator(CaseInsensitive);
    /// set.add("Meeting".into());
    ///
    /// assert!(set.contains("meeting"));
    /// assert!(!set.contains("spam"));
    /// ```
    #[must_use]
    pub fn contains<Q>(&self, element: &Q) -> bool
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        matches!(self.descend(element), Descent::Found(_))
    }

    /// Returns the stored element equal to `element`, if any.
    #[must_use]
    pub fn get<Q>(&self, element: &Q) -> Option<&T>
    where
        T: Borrow<Q>,
        C: Comparator<Q>,
        Q: ?Sized,
    {
        match self.descend(element) {
            Descent::Found(index) => Some(&self.node(index).element),
            Descent::Vacant(_) => None,
        }
    }
}

// =============================================================================
// Iterator Implementation
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Cursor {
    Active(NodeIndex),
    Exhausted,
}

/// A restartable cursor over an [`OrderedSet`] in ascending order.
///
/// The cursor holds the next node to visit and nothing else; each step moves
/// to the in-order successor through child and parent links. The set is
/// borrowed for as long as the iterator lives, so it cannot change under it.
///
/// # Examples
///
/// ```rust
/// use spamsieve::collections::{OrderedSet, SetError};
///
/// let set: OrderedSet<char> = "cab".chars().collect();
/// let mut iterator = set.iter();
///
/// while iterator.has_next() {
///     iterator.try_next()?;
/// }
/// assert_eq!(iterator.try_next(), Err(SetError::ExhaustedIterator));
///
/// iterator.restart();
/// assert_eq!(iterator.collect::<String>(), "abc");
/// # Ok::<(), SetError>(())
/// ```
pub struct SetIterator<'a, T, C = NaturalOrder> {
    set: &'a OrderedSet<T, C>,
    cursor: Cursor,
    remaining: usize,
}

impl<'a, T, C> SetIterator<'a, T, C> {
    fn new(set: &'a OrderedSet<T, C>) -> Self {
        Self {
            set,
            cursor: set.first_index().map_or(Cursor::Exhausted, Cursor::Active),
            remaining: set.len(),
        }
    }

    /// Returns `true` while there are elements left to visit.
    #[inline]
    #[must_use]
    pub const fn has_next(&self) -> bool {
        matches!(self.cursor, Cursor::Active(_))
    }

    /// Returns the next element without advancing.
    #[must_use]
    pub fn peek(&self) -> Option<&'a T> {
        let set = self.set;
        match self.cursor {
            Cursor::Active(index) => Some(&set.node(index).element),
            Cursor::Exhausted => None,
        }
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

impl<'a, T, C> Iterator for SetIterator<'a, T, C> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        let Cursor::Active(index) = self.cursor else {
            return None;
        };
        let set = self.set;
        self.cursor = set
            .successor(index)
            .map_or(Cursor::Exhausted, Cursor::Active);
        self.remaining -= 1;
        Some(&set.node(index).element)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, C> ExactSizeIterator for SetIterator<'_, T, C> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<T, C> FusedIterator for SetIterator<'_, T, C> {}

impl<T, C> Clone for SetIterator<'_, T, C> {
    fn clone(&self) -> Self {
        Self {
            set: self.set,
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl<T, C> fmt::Debug for SetIterator<'_, T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SetIterator")
            .field("cursor", &self.cursor)
            .field("remaining", &self.remaining)
            .finish()
    }
}

/// An owning iterator over the elements of an [`OrderedSet`] in ascending
/// order.
pub struct OrderedSetIntoIterator<T> {
    slots: Vec<Option<T>>,
    order: std::vec::IntoIter<NodeIndex>,
}

impl<T> Iterator for OrderedSetIntoIterator<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.order
            .next()
            .and_then(|index| self.slots[index.0].take())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.order.size_hint()
    }
}

impl<T> ExactSizeIterator for OrderedSetIntoIterator<T> {}

impl<T> FusedIterator for OrderedSetIntoIterator<T> {}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T, C: Default> Default for OrderedSet<T, C> {
    #[inline]
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T> + Default> FromIterator<T> for OrderedSet<T, C> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::default();
        set.extend(iter);
        set
    }
}

impl<T, C: Comparator<T>> Extend<T> for OrderedSet<T, C> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T, C> IntoIterator for OrderedSet<T, C> {
    type Item = T;
    type IntoIter = OrderedSetIntoIterator<T>;

    fn into_iter(self) -> Self::IntoIter {
        let order = self.ascending_indices();
        let slots = self
            .nodes
            .into_iter()
            .map(|node| Some(node.element))
            .collect();
        OrderedSetIntoIterator {
            slots,
            order: order.into_iter(),
        }
    }
}

impl<'a, T, C> IntoIterator for &'a OrderedSet<T, C> {
    type Item = &'a T;
    type IntoIter = SetIterator<'a, T, C>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two sets are equal when they hold the same number of elements and their
/// ascending sequences match pairwise under the left-hand comparator.
impl<T, C: Comparator<T>> PartialEq for OrderedSet<T, C> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .zip(other.iter())
                .all(|(left, right)| self.comparator.compare(left, right) == Ordering::Equal)
    }
}

impl<T, C: Comparator<T>> Eq for OrderedSet<T, C> {}

impl<T: fmt::Debug, C> fmt::Debug for OrderedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

impl<T: fmt::Display, C> fmt::Display for OrderedSet<T, C> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{{")?;
        let mut first = true;
        for element in self {
            if first {
                first = false;
            } else {
                write!(formatter, ", ")?;
            }
            write!(formatter, "{element}")?;
        }
        write!(formatter, "}}")
    }
}

impl<T: Clone, C: Comparator<T> + Clone> OrderedCollection for OrderedSet<T, C> {
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

    /// Arena order is insertion order, which rebuilds the same tree shape.
    fn rebuild_order(&self) -> impl Iterator<Item = &T> {
        self.nodes.iter().map(|node| &node.element)
    }

    fn copy(&self) -> Self {
        self.clone()
    }
}

static_assertions::assert_impl_all!(OrderedSet<String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(SetIterator<'static, String>: Send, Sync, Clone);

// =============================================================================
// Serde Support
// =============================================================================

#[cfg(feature = "serde")]
impl<T: serde::Serialize, C> serde::Serialize for OrderedSet<T, C> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

#[cfg(feature = "serde")]
struct OrderedSetVisitor<T, C> {
    marker: std::marker::PhantomData<fn() -> OrderedSet<T, C>>,
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::de::Visitor<'de> for OrderedSetVisitor<T, C>
where
    T: serde::Deserialize<'de>,
    C: Comparator<T> + Default,
{
    type Value = OrderedSet<T, C>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a sequence of set elements")
    }

    fn visit_seq<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: serde::de::SeqAccess<'de>,
    {
        let mut set = OrderedSet::default();
        while let Some(element) = access.next_element()? {
            set.add(element);
        }
        Ok(set)
    }
}

#[cfg(feature = "serde")]
impl<'de, T, C> serde::Deserialize<'de> for OrderedSet<T, C>
where
    T: serde::Deserialize<'de>,
    C: Comparator<T> + Default,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        deserializer.deserialize_seq(OrderedSetVisitor {
            marker: std::marker::PhantomData,
        })
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::CaseInsensitive;
    use rstest::rstest;

    /// Checks parent/child agreement and the search-tree ordering for every
    /// node.
    fn assert_tree_invariants<T, C: Comparator<T>>(set: &OrderedSet<T, C>) {
        for (position, node) in set.nodes.iter().enumerate() {
            let index = NodeIndex(position);
            match node.parent {
                None => assert_eq!(position, 0, "only the root has no parent"),
                Some(parent) => {
                    assert!(parent.0 < position, "parents precede children");
                    let parent_node = set.node(parent);
                    assert!(
                        parent_node.left == Some(index) || parent_node.right == Some(index),
                        "parent must link back to child"
                    );
                }
            }
            if let Some(left) = node.left {
                assert_eq!(set.node(left).parent, Some(index));
                assert_eq!(
                    set.comparator.compare(&set.node(left).element, &node.element),
                    Ordering::Less
                );
            }
            if let Some(right) = node.right {
                assert_eq!(set.node(right).parent, Some(index));
                assert_eq!(
                    set.comparator.compare(&set.node(right).element, &node.element),
                    Ordering::Greater
                );
            }
        }
    }

    // =========================================================================
    // Display Tests
    // =========================================================================

    #[rstest]
    fn test_display_empty_set() {
        let set: OrderedSet<i32> = OrderedSet::new();
        assert_eq!(format!("{set}"), "{}");
    }

    #[rstest]
    fn test_display_sorted() {
        let set: OrderedSet<i32> = [3, 1, 2].into_iter().collect();
        assert_eq!(format!("{set}"), "{1, 2, 3}");
        assert_eq!(format!("{set:?}"), "{1, 2, 3}");
    }

    // =========================================================================
    // Insertion Tests
    // =========================================================================

    #[rstest]
    fn test_new_creates_empty() {
        let set: OrderedSet<i32> = OrderedSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert_eq!(set.height(), 0);
        assert_eq!(set.first(), None);
        assert_eq!(set.last(), None);
    }

    #[rstest]
    fn test_add_reports_whether_inserted() {
        let mut set = OrderedSet::new();
        assert!(set.add(2));
        assert!(set.add(1));
        assert!(!set.add(2));
        assert_eq!(set.len(), 2);
    }

    #[rstest]
    fn test_add_with_builds_only_missing_elements() {
        let mut set: OrderedSet<String, _> = OrderedSet::with_comparator(CaseInsensitive);
        let mut built = 0;
        for word in ["now", "spam", "NOW", "Spam", "buy"] {
            set.add_with(word, |word| {
                built += 1;
                word.to_string()
            });
        }

        assert_eq!(built, 3);
        assert_eq!(set.len(), 3);
        assert_eq!(set.get("NOW").map(String::as_str), Some("now"));
        assert_tree_invariants(&set);
    }

    #[rstest]
    fn test_add_with_matches_add_shape() {
        let elements = [50, 30, 70, 20, 40, 60, 80, 35];
        let mut with_add = OrderedSet::new();
        let mut with_builder: OrderedSet<i32> = OrderedSet::new();
        for element in elements {
            assert_eq!(
                with_add.add(element),
                with_builder.add_with(&element, |element| *element)
            );
        }

        assert_eq!(with_builder, with_add);
        assert_eq!(with_builder.height(), with_add.height());
        assert_tree_invariants(&with_builder);
    }

    #[rstest]
    fn test_height_does_not_touch_the_set() {
        let set: OrderedSet<i32> = [2, 1, 3].into_iter().collect();
        assert_eq!(set.height(), 2);
        assert_eq!(set.height(), 2);
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_add_links_parents() {
        let set: OrderedSet<i32> = [50, 30, 70, 20, 40, 60, 80, 35, 45, 65].into_iter().collect();
        assert_tree_invariants(&set);
        assert_eq!(set.height(), 4);
    }

    #[rstest]
    fn test_duplicate_keeps_first_inserted() {
        let mut set = OrderedSet::with_comparator(CaseInsensitive);
        set.add("Buy".to_string());
        set.add("BUY".to_string());
        set.add("buy".to_string());

        assert_eq!(set.len(), 1);
        assert_eq!(set.get("buy").map(String::as_str), Some("Buy"));
    }

    #[rstest]
    fn test_case_insensitive_scenario() {
        let mut set = OrderedSet::with_comparator(CaseInsensitive);
        for word in ["b", "a", "b", "c", "d", "c"] {
            set.add(word);
        }
        assert_eq!(set.len(), 4);
        assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec!["a", "b", "c", "d"]);
        assert_tree_invariants(&set);
    }

    #[rstest]
    fn test_contains_follows_add_direction() {
        let set: OrderedSet<i32> = [8, 4, 12, 2, 6, 10, 14].into_iter().collect();
        for present in [2, 4, 6, 8, 10, 12, 14] {
            assert!(set.contains(&present), "{present} should be present");
        }
        for absent in [1, 3, 5, 7, 9, 11, 13, 15] {
            assert!(!set.contains(&absent), "{absent} should be absent");
        }
    }

    #[rstest]
    fn test_contains_with_borrowed_probe() {
        let set: OrderedSet<String> = ["alpha", "beta"].iter().map(|s| s.to_string()).collect();
        assert!(set.contains("alpha"));
        assert!(!set.contains("gamma"));
    }

    #[rstest]
    fn test_try_add_inserts() {
        let mut set = OrderedSet::new();
        assert_eq!(set.try_add(1), Ok(true));
        assert_eq!(set.try_add(1), Ok(false));
        assert_eq!(set.len(), 1);
    }

    #[rstest]
    fn test_clear_keeps_comparator() {
        let mut set = OrderedSet::with_comparator(CaseInsensitive);
        set.add("x");
        set.clear();
        assert!(set.is_empty());
        set.add("Y");
        assert!(set.contains("y"));
    }

    // =========================================================================
    // Shape Tests
    // =========================================================================

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(64)]
    fn test_sorted_insertion_degenerates_to_chain(#[case] size: i32) {
        let ascending: OrderedSet<i32> = (0..size).collect();
        let descending: OrderedSet<i32> = (0..size).rev().collect();
        assert_eq!(ascending.height(), ascending.len());
        assert_eq!(descending.height(), descending.len());
    }

    #[rstest]
    fn test_deep_chain_drops_without_recursion() {
        let chain: OrderedSet<u32> = (0..10_000).collect();
        assert_eq!(chain.height(), 10_000);
        assert_eq!(chain.iter().count(), 10_000);
        drop(chain);
    }

    #[rstest]
    fn test_first_and_last() {
        let set: OrderedSet<i32> = [5, 9, 1, 7].into_iter().collect();
        assert_eq!(set.first(), Some(&1));
        assert_eq!(set.last(), Some(&9));
    }

    // =========================================================================
    // Iterator Tests
    // =========================================================================

    #[rstest]
    fn test_iterator_on_empty_set_is_exhausted() {
        let set: OrderedSet<i32> = OrderedSet::new();
        let mut iterator = set.iter();
        assert!(!iterator.has_next());
        assert_eq!(iterator.next(), None);
        assert_eq!(iterator.try_next(), Err(SetError::ExhaustedIterator));
    }

    #[rstest]
    fn test_iterator_visits_all_shapes_in_order() {
        // Right-leaning, left-leaning and zig-zag shapes.
        for elements in [
            vec![1, 2, 3, 4, 5],
            vec![5, 4, 3, 2, 1],
            vec![1, 5, 2, 4, 3],
            vec![3, 1, 5, 2, 4],
        ] {
            let set: OrderedSet<i32> = elements.into_iter().collect();
            assert_eq!(set.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5]);
        }
    }

    #[rstest]
    fn test_iterator_exhausts_after_len_steps() {
        let set: OrderedSet<i32> = [4, 2, 6, 1, 3].into_iter().collect();
        let mut iterator = set.iter();
        for remaining in (0..set.len()).rev() {
            assert!(iterator.has_next());
            assert!(iterator.next().is_some());
            assert_eq!(iterator.len(), remaining);
        }
        assert!(!iterator.has_next());
        assert_eq!(iterator.next(), None);
        assert_eq!(iterator.next(), None);
    }

    #[rstest]
    fn test_iterator_peek_does_not_advance() {
        let set: OrderedSet<i32> = [2, 1].into_iter().collect();
        let mut iterator = set.iter();
        assert_eq!(iterator.peek(), Some(&1));
        assert_eq!(iterator.peek(), Some(&1));
        assert_eq!(iterator.next(), Some(&1));
        assert_eq!(iterator.peek(), Some(&2));
    }

    #[rstest]
    fn test_iterator_restart() {
        let set: OrderedSet<i32> = [3, 1, 2].into_iter().collect();
        let mut iterator = set.iter();
        assert_eq!(iterator.by_ref().count(), 3);
        iterator.restart();
        assert!(iterator.has_next());
        assert_eq!(iterator.copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[rstest]
    fn test_into_iter_owned_ascending() {
        let set: OrderedSet<String> = ["pear", "apple", "fig"].iter().map(|s| s.to_string()).collect();
        let owned: Vec<String> = set.into_iter().collect();
        assert_eq!(owned, vec!["apple", "fig", "pear"]);
    }

    // =========================================================================
    // Equality Tests
    // =========================================================================

    #[rstest]
    fn test_eq_ignores_insertion_order() {
        let left: OrderedSet<i32> = [1, 2, 3].into_iter().collect();
        let right: OrderedSet<i32> = [3, 2, 1].into_iter().collect();
        let shorter: OrderedSet<i32> = [1, 2].into_iter().collect();
        assert_eq!(left, right);
        assert_ne!(left, shorter);
    }

    #[rstest]
    fn test_clone_is_independent() {
        let original: OrderedSet<i32> = [1, 2].into_iter().collect();
        let mut copy = original.clone();
        copy.add(3);
        assert_eq!(original.len(), 2);
        assert!(!original.contains(&3));
        assert_tree_invariants(&copy);
    }

    #[cfg(feature = "serde")]
    #[rstest]
    fn test_serde_round_trip_keeps_order() {
        let set: OrderedSet<i32> = [3, 1, 2].into_iter().collect();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, "[1,2,3]");

        let restored: OrderedSet<i32> = serde_json::from_str("[2,2,3,1]").unwrap();
        assert_eq!(restored, set);
    }
}
