//! Splitting mail text into word sets.
//!
//! A word is a maximal run of alphanumeric characters; everything else
//! separates words. The stored spelling is the first one seen in the text.

use super::{ClassifierError, Word, WordOrder, WordSet};
use std::fs;
use std::path::Path;

/// Iterates the words of `text` in the order they appear, repeats included.
///
/// # Examples
///
/// ```rust
/// use spamsieve::classifier::tokenizer::words;
///
/// let found: Vec<&str> = words("Buy now!! 50% off -- buy NOW").collect();
/// assert_eq!(found, vec!["Buy", "now", "50", "off", "buy", "NOW"]);
/// ```
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|character: char| !character.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

/// Returns the set of distinct words in `text`.
///
/// # Examples
///
/// ```rust
/// use spamsieve::classifier::{WordOrder, tokenizer::tokenize_text};
///
/// let set = tokenize_text("b a B c d C", WordOrder::CaseInsensitive);
/// assert_eq!(set.len(), 4);
/// ```
#[must_use]
pub fn tokenize_text(text: &str, order: WordOrder) -> WordSet {
    let mut set = WordSet::with_comparator(order);
    for word in words(text) {
        // Repeats are found by the borrowed word and never allocate.
        set.add_with(word, |word| Word::from(word));
    }
    set
}

/// Reads the file at `path` and returns the set of distinct words in it.
///
/// Bytes that are not valid UTF-8 are replaced before splitting.
///
/// # Errors
///
/// Returns [`ClassifierError::Io`] if the file cannot be opened or read.
pub fn tokenize_file(path: &Path, order: WordOrder) -> Result<WordSet, ClassifierError> {
    let bytes = fs::read(path).map_err(|source| ClassifierError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let set = tokenize_text(&String::from_utf8_lossy(&bytes), order);
    tracing::debug!(path = %path.display(), words = set.len(), "tokenized file");
    Ok(set)
}
