//! # spamsieve
//!
//! Comparator-ordered sets with set algebra, and the bag-of-words spam
//! filter built on top of them.
//!
//! ## Overview
//!
//! - **Collections**: [`OrderedSet`](collections::OrderedSet), an unbalanced
//!   binary search tree whose iterator walks parent links instead of keeping
//!   a stack, and [`SortedListSet`](collections::SortedListSet), the sorted
//!   doubly linked list alternative. Both are ordered by a caller supplied
//!   [`Comparator`](collections::Comparator) and share the
//!   [`SetAlgebra`](collections::SetAlgebra) operations.
//! - **Classifier**: tokenizes mail files into word sets, intersects all spam
//!   mails, subtracts every non-spam word, and flags mail that contains any of
//!   the remaining words.
//!
//! ## Feature Flags
//!
//! - `collections`: ordered sets, iterators and set algebra
//! - `classifier`: tokenizer, file discovery and the spam filter
//! - `cli`: the `spamsieve` command-line binary
//! - `serde`: serialization support for sets and classification reports
//! - `arc`: share words through `Arc<str>` instead of `Rc<str>`
//! - `full`: Enable all features
//!
//! ## Example
//!
//! ```rust
//! use spamsieve::prelude::*;
//!
//! let mut words = OrderedSet::with_comparator(CaseInsensitive);
//! for word in ["b", "a", "B", "c", "d", "C"] {
//!     words.add(word);
//! }
//!
//! assert_eq!(words.len(), 4);
//! let ascending: Vec<&str> = words.iter().copied().collect();
//! assert_eq!(ascending, vec!["a", "b", "c", "d"]);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the set types, comparators and the set algebra traits.
///
/// # Usage
///
/// ```rust
/// use spamsieve::prelude::*;
/// ```
pub mod prelude {
    #[cfg(feature = "collections")]
    pub use crate::collections::*;

    #[cfg(feature = "classifier")]
    pub use crate::classifier::{SpamFilter, Verdict, Word, WordOrder, WordSet};
}

#[cfg(feature = "collections")]
pub mod collections;

#[cfg(feature = "classifier")]
pub mod classifier;
