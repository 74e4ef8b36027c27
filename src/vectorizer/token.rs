use std::collections::HashMap;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::vectorizer::config::VectorizerConfig;
use crate::vectorizer::stop_words::StopWords;

/// TokenFrequency struct
/// Manages how often each token occurs in one document.
/// Iteration follows first-occurrence order until [`TokenFrequency::sort_by_token`]
/// is called.
///
/// # Examples
/// ```
/// use sparse_vectorizer::TokenFrequency;
/// let mut token_freq = TokenFrequency::new();
/// token_freq.add_token("token1");
/// token_freq.add_token("token2");
/// token_freq.add_token("token1");
///
/// assert_eq!(token_freq.token_count("token1"), 2);
/// assert_eq!(token_freq.token_sum(), 3);
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenFrequency {
    #[serde(with = "indexmap::map::serde_seq")]
    token_count: IndexMap<String, u64>,
    total_token_count: u64,
}

/// Implementation for adding and removing tokens
impl TokenFrequency {
    /// Create a new TokenFrequency
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a token
    ///
    /// # Arguments
    /// * `token` - token to add
    #[inline]
    pub fn add_token(&mut self, token: &str) -> &mut Self {
        if let Some(count) = self.token_count.get_mut(token) {
            *count += 1;
        } else {
            self.token_count.insert(token.to_string(), 1);
        }
        self.total_token_count += 1;
        self
    }

    /// Add multiple tokens
    ///
    /// # Arguments
    /// * `tokens` - slice of tokens to add
    #[inline]
    pub fn add_tokens<T>(&mut self, tokens: &[T]) -> &mut Self
    where
        T: AsRef<str>,
    {
        for token in tokens {
            self.add_token(token.as_ref());
        }
        self
    }

    /// Remove a token entirely, returning its count
    #[inline]
    pub fn remove_token(&mut self, token: &str) -> Option<u64> {
        let removed = self.token_count.shift_remove(token);
        if let Some(count) = removed {
            self.total_token_count -= count;
        }
        removed
    }

    /// Drop every token found in `stop_words`
    /// Relative order of the remaining tokens is kept.
    pub fn remove_stop_words(&mut self, stop_words: &StopWords) -> &mut Self {
        let mut removed = 0;
        self.token_count.retain(|token, count| {
            if stop_words.contains(token) {
                removed += *count;
                false
            } else {
                true
            }
        });
        self.total_token_count -= removed;
        self
    }

    /// Reorder by ascending token string
    /// Counts are unchanged.
    pub fn sort_by_token(&mut self) -> &mut Self {
        self.token_count.sort_keys();
        self
    }

    /// Reset all counts
    #[inline]
    pub fn clear(&mut self) {
        self.token_count.clear();
        self.total_token_count = 0;
    }
}

/// Implementation for retrieving information
impl TokenFrequency {
    /// Count of a token, 0 if absent
    #[inline]
    pub fn token_count(&self, token: &str) -> u64 {
        self.token_count.get(token).copied().unwrap_or(0)
    }

    /// Total number of tokens counted
    #[inline]
    pub fn token_sum(&self) -> u64 {
        self.total_token_count
    }

    /// Number of distinct tokens
    #[inline]
    pub fn len(&self) -> usize {
        self.token_count.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.token_count.is_empty()
    }

    #[inline]
    pub fn contains_token(&self, token: &str) -> bool {
        self.token_count.contains_key(token)
    }

    /// Iterate `(token, count)` in the current order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.token_count
            .iter()
            .map(|(token, &count)| (token.as_str(), count))
    }

    /// Get a vector of tokens sorted by dictionary order (ascending)
    ///
    /// # Returns
    /// * `Vec<(String, u64)>` - tokens and counts sorted by token
    pub fn sorted_dict_order_vector(&self) -> Vec<(String, u64)> {
        let mut token_list: Vec<(String, u64)> = self
            .token_count
            .iter()
            .map(|(token, &count)| (token.clone(), count))
            .collect();
        token_list.sort_by(|a, b| a.0.cmp(&b.0));
        token_list
    }

    /// Copy into an unordered map
    pub fn to_hashmap(&self) -> HashMap<String, u64> {
        self.token_count
            .iter()
            .map(|(token, &count)| (token.clone(), count))
            .collect()
    }
}

impl<'a> IntoIterator for &'a TokenFrequency {
    type Item = (&'a String, &'a u64);
    type IntoIter = indexmap::map::Iter<'a, String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.token_count.iter()
    }
}

/// Count the tokens of a text
/// Runs normalize (if configured), analyze, fold and stop-word removal.
///
/// # Examples
/// ```
/// use sparse_vectorizer::{count, VectorizerConfig};
/// let mut freq = count("Hello, world!", &VectorizerConfig::default());
/// freq.sort_by_token();
/// assert_eq!(freq.sorted_dict_order_vector(), vec![("hello".to_string(), 1), ("world".to_string(), 1)]);
/// ```
pub fn count(text: &str, config: &VectorizerConfig) -> TokenFrequency {
    config.token_frequency(text)
}

/// Batch form of [`count`], one frequency map per text
pub fn count_many<T>(texts: &[T], config: &VectorizerConfig) -> Vec<TokenFrequency>
where
    T: AsRef<str> + Sync,
{
    texts
        .par_iter()
        .map(|text| config.token_frequency(text.as_ref()))
        .collect()
}
