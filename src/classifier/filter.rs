//! Training the filter and judging mail.

use super::{WordOrder, WordSet};
use crate::collections::SetAlgebra;

/// Word sets learned from labelled mail.
///
/// All word sets passed in are expected to use the same [`WordOrder`] as the
/// filter.
#[derive(Clone, Debug)]
pub struct SpamFilter {
    spam_words: WordSet,
    non_spam_words: WordSet,
    refined_words: WordSet,
}

impl SpamFilter {
    /// Learns from the word sets of spam and non-spam mails.
    ///
    /// - spam words: words present in *every* spam mail (empty when there is
    ///   no spam mail)
    /// - non-spam words: words present in *any* non-spam mail
    /// - refined words: spam words that are not non-spam words
    ///
    /// # Examples
    ///
    /// ```rust
    /// use spamsieve::classifier::{SpamFilter, WordOrder, tokenizer::tokenize_text};
    ///
    /// let order = WordOrder::CaseInsensitive;
    /// let filter = SpamFilter::train(
    ///     order,
    ///     [tokenize_text("spam buy now", order)],
    ///     [tokenize_text("buy meeting", order)],
    /// );
    ///
    /// let refined: Vec<&str> = filter.refined_words().iter().map(|word| &**word).collect();
    /// assert_eq!(refined, vec!["now", "spam"]);
    /// ```
    pub fn train<S, N>(order: WordOrder, spam: S, non_spam: N) -> Self
    where
        S: IntoIterator<Item = WordSet>,
        N: IntoIterator<Item = WordSet>,
    {
        let spam_words = spam
            .into_iter()
            .reduce(|common, mail| common.intersection(&mail))
            .unwrap_or_else(|| WordSet::with_comparator(order));
        tracing::info!(words = spam_words.len(), "words contained in all spam mails");

        let mut non_spam_words = WordSet::with_comparator(order);
        for mail in non_spam {
            non_spam_words.union_in_place(&mail);
        }
        tracing::info!(words = non_spam_words.len(), "unique words in non-spam mails");

        let refined_words = spam_words.difference(&non_spam_words);
        tracing::info!(words = refined_words.len(), "refined spam words");

        Self {
            spam_words,
            non_spam_words,
            refined_words,
        }
    }

    /// Words contained in every spam mail.
    #[must_use]
    pub const fn spam_words(&self) -> &WordSet {
        &self.spam_words
    }

    /// Words contained in at least one non-spam mail.
    #[must_use]
    pub const fn non_spam_words(&self) -> &WordSet {
        &self.non_spam_words
    }

    /// Words contained in every spam mail and in no non-spam mail.
    #[must_use]
    pub const fn refined_words(&self) -> &WordSet {
        &self.refined_words
    }

    /// Judges a mail by the refined spam words it contains.
    #[must_use]
    pub fn classify(&self, mail: &WordSet) -> Verdict {
        Verdict {
            matching_words: self.refined_words.intersection(mail),
        }
    }
}

/// The outcome of classifying one mail.
#[derive(Clone, Debug)]
pub struct Verdict {
    matching_words: WordSet,
}

impl Verdict {
    /// A mail is spam when it contains at least one refined spam word.
    #[must_use]
    pub const fn is_spam(&self) -> bool {
        !self.matching_words.is_empty()
    }

    /// Number of refined spam words found in the mail.
    #[must_use]
    pub const fn spam_word_count(&self) -> usize {
        self.matching_words.len()
    }

    /// The refined spam words found in the mail, in ascending order.
    #[must_use]
    pub const fn matching_words(&self) -> &WordSet {
        &self.matching_words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::tokenizer::tokenize_text;
    use rstest::{fixture, rstest};

    const ORDER: WordOrder = WordOrder::CaseInsensitive;

    fn spellings(set: &WordSet) -> Vec<&str> {
        set.iter().map(|word| &**word).collect()
    }

    #[fixture]
    fn filter() -> SpamFilter {
        SpamFilter::train(
            ORDER,
            [tokenize_text("spam buy now", ORDER)],
            [tokenize_text("buy meeting", ORDER)],
        )
    }

    #[rstest]
    fn test_refined_words_scenario(filter: SpamFilter) {
        assert_eq!(spellings(filter.spam_words()), vec!["buy", "now", "spam"]);
        assert_eq!(spellings(filter.non_spam_words()), vec!["buy", "meeting"]);
        assert_eq!(spellings(filter.refined_words()), vec!["now", "spam"]);
    }

    #[rstest]
    fn test_mail_with_refined_word_is_spam(filter: SpamFilter) {
        let verdict = filter.classify(&tokenize_text("please reply NOW", ORDER));
        assert!(verdict.is_spam());
        assert_eq!(verdict.spam_word_count(), 1);
        assert_eq!(spellings(verdict.matching_words()), vec!["now"]);
    }

    #[rstest]
    fn test_mail_with_only_shared_words_is_not_spam(filter: SpamFilter) {
        let verdict = filter.classify(&tokenize_text("buy a meeting room", ORDER));
        assert!(!verdict.is_spam());
        assert_eq!(verdict.spam_word_count(), 0);
    }

    #[rstest]
    fn test_spam_words_intersect_every_spam_mail() {
        let filter = SpamFilter::train(
            ORDER,
            [
                tokenize_text("cheap pills now", ORDER),
                tokenize_text("cheap watches now", ORDER),
                tokenize_text("NOW cheap loans", ORDER),
            ],
            Vec::<WordSet>::new(),
        );
        assert_eq!(spellings(filter.spam_words()), vec!["cheap", "now"]);
        assert_eq!(spellings(filter.refined_words()), vec!["cheap", "now"]);
    }

    #[rstest]
    fn test_empty_intersection_stays_empty() {
        let filter = SpamFilter::train(
            ORDER,
            [
                tokenize_text("alpha", ORDER),
                tokenize_text("beta", ORDER),
                tokenize_text("alpha beta", ORDER),
            ],
            Vec::<WordSet>::new(),
        );
        assert!(filter.spam_words().is_empty());
    }

    #[rstest]
    fn test_no_spam_mail_flags_nothing() {
        let filter = SpamFilter::train(
            ORDER,
            Vec::<WordSet>::new(),
            [tokenize_text("hello", ORDER)],
        );
        assert!(filter.refined_words().is_empty());
        assert!(!filter.classify(&tokenize_text("hello spam", ORDER)).is_spam());
    }
}
