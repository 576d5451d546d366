//! Total orders used to arrange the elements of a set.
//!
//! A set never looks inside its elements. Everything it knows about them
//! comes from the [`Comparator`] it was created with, which is fixed for the
//! lifetime of the set.
//!
//! # Examples
//!
//! ```rust
//! use spamsieve::collections::{CaseInsensitive, Comparator, NaturalOrder};
//! use std::cmp::Ordering;
//!
//! assert_eq!(NaturalOrder.compare(&1, &2), Ordering::Less);
//! assert_eq!(CaseInsensitive.compare("Spam", "spam"), Ordering::Equal);
//!
//! // Any closure over two references is a comparator as well.
//! let by_length = |left: &&str, right: &&str| left.len().cmp(&right.len());
//! assert_eq!(by_length.compare(&"abc", &"de"), Ordering::Greater);
//! ```

use std::cmp::Ordering;

/// A total order over elements of type `T`.
///
/// Implementations must be consistent: `compare(a, b)` is the reverse of
/// `compare(b, a)`, and equality is transitive. A set built with an
/// inconsistent comparator keeps its memory safe but may report wrong
/// membership.
pub trait Comparator<T: ?Sized> {
    /// Compares `left` against `right`.
    fn compare(&self, left: &T, right: &T) -> Ordering;
}

impl<T: ?Sized, F> Comparator<T> for F
where
    F: Fn(&T, &T) -> Ordering,
{
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        self(left, right)
    }
}

/// A zero-sized comparator that delegates to the [`Ord`] implementation of
/// the element type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    #[inline]
    fn compare(&self, left: &T, right: &T) -> Ordering {
        left.cmp(right)
    }
}

/// ASCII case-insensitive ordering of anything that can be viewed as a `str`.
///
/// Bytes are folded to lowercase one at a time, so `"Now"`, `"NOW"` and
/// `"now"` are the same element. Non-ASCII characters compare by their UTF-8
/// bytes unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct CaseInsensitive;

impl<T: AsRef<str> + ?Sized> Comparator<T> for CaseInsensitive {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        compare_ignoring_ascii_case(left.as_ref(), right.as_ref())
    }
}

/// Byte-wise comparison with ASCII letters folded to lowercase.
pub(crate) fn compare_ignoring_ascii_case(left: &str, right: &str) -> Ordering {
    left.bytes()
        .map(|byte| byte.to_ascii_lowercase())
        .cmp(right.bytes().map(|byte| byte.to_ascii_lowercase()))
}
