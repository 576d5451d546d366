//! Bag-of-words spam filter built on [`OrderedSet`].
//!
//! Every mail becomes the set of words it contains. The filter then
//!
//! 1. intersects the word sets of all spam mails,
//! 2. unites the word sets of all non-spam mails,
//! 3. keeps the spam words that never occur in non-spam mail,
//!
//! and flags a new mail as spam when it shares at least one word with that
//! refined set.
//!
//! # Examples
//!
//! ```rust
//! use spamsieve::classifier::{SpamFilter, WordOrder, tokenizer};
//!
//! let spam = tokenizer::tokenize_text("spam, buy now", WordOrder::CaseInsensitive);
//! let ham = tokenizer::tokenize_text("buy the meeting", WordOrder::CaseInsensitive);
//! let filter = SpamFilter::train(WordOrder::CaseInsensitive, [spam], [ham]);
//!
//! let mail = tokenizer::tokenize_text("act NOW", WordOrder::CaseInsensitive);
//! let verdict = filter.classify(&mail);
//! assert!(verdict.is_spam());
//! assert_eq!(verdict.spam_word_count(), 1);
//! ```

use crate::collections::{Comparator, OrderedSet, compare_ignoring_ascii_case};
use std::cmp::Ordering;

mod error;
pub mod files;
mod filter;
mod pipeline;
pub mod tokenizer;

pub use error::ClassifierError;
pub use filter::SpamFilter;
pub use filter::Verdict;
pub use pipeline::ClassificationReport;
pub use pipeline::ClassifierConfig;
pub use pipeline::MailVerdict;
pub use pipeline::run;

// =============================================================================
// Reference Counter Type Alias
// =============================================================================

/// Reference-counted smart pointer type.
///
/// When the `arc` feature is enabled, this is `std::sync::Arc`,
/// which is thread-safe but has slightly higher overhead.
///
/// When the `arc` feature is disabled (default), this is `std::rc::Rc`,
/// which is faster but not thread-safe.
#[cfg(feature = "arc")]
pub(crate) type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
pub(crate) type ReferenceCounter<T> = std::rc::Rc<T>;

/// A word shared between every set that contains it.
///
/// Deriving a set through union or intersection clones the handle, never
/// the text.
pub type Word = ReferenceCounter<str>;

/// The set of distinct words of a mail, or an aggregate of several mails.
pub type WordSet = OrderedSet<Word, WordOrder>;

/// How words are compared.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WordOrder {
    /// ASCII case is ignored: `Now` and `now` are the same word.
    #[default]
    CaseInsensitive,
    /// Words are compared byte for byte.
    CaseSensitive,
}

impl<T: AsRef<str> + ?Sized> Comparator<T> for WordOrder {
    fn compare(&self, left: &T, right: &T) -> Ordering {
        match self {
            Self::CaseInsensitive => compare_ignoring_ascii_case(left.as_ref(), right.as_ref()),
            Self::CaseSensitive => left.as_ref().cmp(right.as_ref()),
        }
    }
}

#[cfg(not(feature = "arc"))]
static_assertions::assert_not_impl_any!(WordSet: Send, Sync);

#[cfg(feature = "arc")]
static_assertions::assert_impl_all!(WordSet: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(WordOrder::CaseInsensitive, "Buy", "buy", Ordering::Equal)]
    #[case(WordOrder::CaseSensitive, "Buy", "buy", Ordering::Less)]
    #[case(WordOrder::CaseInsensitive, "meeting", "Now", Ordering::Less)]
    #[case(WordOrder::CaseSensitive, "meeting", "Now", Ordering::Greater)]
    fn test_word_order_compare(
        #[case] order: WordOrder,
        #[case] left: &str,
        #[case] right: &str,
        #[case] expected: Ordering,
    ) {
        assert_eq!(order.compare(left, right), expected);
    }

    #[rstest]
    fn test_word_order_default_ignores_case() {
        assert_eq!(WordOrder::default(), WordOrder::CaseInsensitive);
    }

    #[rstest]
    fn test_word_set_shares_handles_across_copies() {
        let word: Word = "spam".into();
        let mut set = WordSet::with_comparator(WordOrder::CaseInsensitive);
        set.add(word.clone());
        let copy = set.clone();

        assert!(copy.contains("SPAM"));
        assert_eq!(ReferenceCounter::strong_count(&word), 3);
    }
}
