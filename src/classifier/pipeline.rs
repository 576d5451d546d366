//! End-to-end classification of three mail directories.

use super::files::find_files;
use super::tokenizer::tokenize_file;
use super::{ClassifierError, SpamFilter, WordOrder, WordSet};
use std::path::{Path, PathBuf};

/// Inputs of a classification run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassifierConfig {
    /// Directory of known spam mail.
    pub spam_directory: PathBuf,
    /// Directory of known non-spam mail.
    pub non_spam_directory: PathBuf,
    /// Directory of mail to classify.
    pub mail_directory: PathBuf,
    /// How words are compared.
    pub word_order: WordOrder,
}

impl ClassifierConfig {
    /// Creates a configuration with the default [`WordOrder`].
    pub fn new(
        spam_directory: impl Into<PathBuf>,
        non_spam_directory: impl Into<PathBuf>,
        mail_directory: impl Into<PathBuf>,
    ) -> Self {
        Self {
            spam_directory: spam_directory.into(),
            non_spam_directory: non_spam_directory.into(),
            mail_directory: mail_directory.into(),
            word_order: WordOrder::default(),
        }
    }

    /// Replaces the word comparison.
    #[must_use]
    pub const fn with_word_order(mut self, word_order: WordOrder) -> Self {
        self.word_order = word_order;
        self
    }
}

/// The verdict for one file of the mail directory.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MailVerdict {
    /// The classified file.
    pub path: PathBuf,
    /// Whether the mail contains any refined spam word.
    pub is_spam: bool,
    /// The refined spam words found in it, in ascending order.
    pub matching_words: Vec<String>,
}

impl MailVerdict {
    /// Number of refined spam words the mail contains.
    #[must_use]
    pub const fn spam_word_count(&self) -> usize {
        self.matching_words.len()
    }
}

/// Summary of a classification run.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ClassificationReport {
    /// Number of words contained in every spam mail.
    pub spam_word_count: usize,
    /// Number of distinct words across all non-spam mail.
    pub non_spam_word_count: usize,
    /// Number of words in every spam mail and in no non-spam mail.
    pub refined_word_count: usize,
    /// Those words, in ascending order.
    pub refined_words: Vec<String>,
    /// One verdict per mail file, sorted by path.
    pub mails: Vec<MailVerdict>,
}

impl ClassificationReport {
    /// Iterates the verdicts of mails judged to be spam.
    pub fn spam_mails(&self) -> impl Iterator<Item = &MailVerdict> {
        self.mails.iter().filter(|mail| mail.is_spam)
    }
}

/// Trains on the spam and non-spam directories of `config` and classifies
/// every file of its mail directory.
///
/// # Errors
///
/// Returns [`ClassifierError::FileSystem`] if a directory cannot be listed
/// and [`ClassifierError::Io`] if a mail file cannot be read. The first
/// failure ends the run.
pub fn run(config: &ClassifierConfig) -> Result<ClassificationReport, ClassifierError> {
    let order = config.word_order;

    let spam = tokenize_directory(&config.spam_directory, order)?;
    let non_spam = tokenize_directory(&config.non_spam_directory, order)?;
    let filter = SpamFilter::train(order, spam, non_spam);

    let mut mails = Vec::new();
    for path in find_files(&config.mail_directory)? {
        let verdict = filter.classify(&tokenize_file(&path, order)?);
        if verdict.is_spam() {
            tracing::info!(
                path = %path.display(),
                spam_words = verdict.spam_word_count(),
                "mail is spam"
            );
        }
        mails.push(MailVerdict {
            is_spam: verdict.is_spam(),
            matching_words: spellings(verdict.matching_words()),
            path,
        });
    }

    Ok(ClassificationReport {
        spam_word_count: filter.spam_words().len(),
        non_spam_word_count: filter.non_spam_words().len(),
        refined_word_count: filter.refined_words().len(),
        refined_words: spellings(filter.refined_words()),
        mails,
    })
}

fn tokenize_directory(
    directory: &Path,
    order: WordOrder,
) -> Result<Vec<WordSet>, ClassifierError> {
    find_files(directory)?
        .iter()
        .map(|path| tokenize_file(path, order))
        .collect()
}

fn spellings(words: &WordSet) -> Vec<String> {
    words.iter().map(|word| word.to_string()).collect()
}
