use std::collections::HashSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// Case-sensitive set of tokens excluded from counting
/// Membership is tested against the analyzer's output as-is, so stop words
/// must already be in the form the analyzer produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopWords {
    words: HashSet<Box<str>>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    #[inline]
    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(word.into())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Remove whitespace-delimited words of `text` found in the set
    /// Remaining words are joined with a single space.
    pub fn filter_text(&self, text: &str) -> String {
        text.split_whitespace()
            .filter(|word| !self.contains(word))
            .collect::<Vec<&str>>()
            .join(" ")
    }
}

impl<T> FromIterator<T> for StopWords
where
    T: AsRef<str>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            words: iter.into_iter().map(|word| word.as_ref().into()).collect(),
        }
    }
}

/// Drop stop words from a text at the word level
///
/// # Examples
/// ```
/// use sparse_vectorizer::{filter_stop_words, StopWords};
/// let stop_words: StopWords = ["are", "you"].into_iter().collect();
/// assert_eq!(filter_stop_words("how are you", &stop_words), "how");
/// ```
pub fn filter_stop_words(text: &str, stop_words: &StopWords) -> String {
    stop_words.filter_text(text)
}

/// Batch form of [`filter_stop_words`]
pub fn filter_stop_words_many<T>(texts: &[T], stop_words: &StopWords) -> Vec<String>
where
    T: AsRef<str> + Sync,
{
    texts
        .par_iter()
        .map(|text| stop_words.filter_text(text.as_ref()))
        .collect()
}
