//! Comparator-ordered, duplicate-free sets.
//!
//! This module provides two interchangeable set backings:
//!
//! - [`OrderedSet`]: unbalanced binary search tree with parent links
//! - [`SortedListSet`]: sorted doubly linked list
//!
//! Both are ordered by a [`Comparator`] fixed at creation, both keep the
//! first of several equal elements, and both get union, intersection,
//! difference and copy from [`SetAlgebra`].
//!
//! # Examples
//!
//! ## `OrderedSet`
//!
//! ```rust
//! use spamsieve::collections::{OrderedSet, SetAlgebra};
//!
//! let a: OrderedSet<&str> = ["x", "y", "z"].into_iter().collect();
//! let b: OrderedSet<&str> = ["y", "z", "w"].into_iter().collect();
//!
//! let union = a.union(&b);
//! assert_eq!(union.len(), 4);
//! assert_eq!(a.intersection(&b).len(), 2);
//! assert_eq!(a.difference(&b).len(), 1);
//!
//! // Inputs are untouched
//! assert_eq!(a.len(), 3);
//! assert_eq!(b.len(), 3);
//! ```
//!
//! ## `SortedListSet`
//!
//! ```rust
//! use spamsieve::collections::{OrderedCollection, SortedListSet};
//!
//! let set: SortedListSet<i32> = [3, 1, 2].into_iter().collect();
//! let mut copy = set.copy();
//! copy.add(4);
//!
//! assert_eq!(set.len(), 3);
//! assert_eq!(copy.len(), 4);
//! ```

mod algebra;
mod comparator;
mod error;
mod list_set;
mod tree_set;

pub use algebra::OrderedCollection;
pub use algebra::SetAlgebra;
pub use comparator::CaseInsensitive;
pub use comparator::Comparator;
pub use comparator::NaturalOrder;
pub use error::SetError;
pub use list_set::SortedListIntoIterator;
pub use list_set::SortedListIterator;
pub use list_set::SortedListSet;
pub use tree_set::OrderedSet;
pub use tree_set::OrderedSetIntoIterator;
pub use tree_set::SetIterator;

pub(crate) use comparator::compare_ignoring_ascii_case;
