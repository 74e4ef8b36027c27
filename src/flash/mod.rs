//! Multi-keyword extraction over a token trie.

pub mod trie;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::utils::normalizer::normalize_char;
use trie::TokenTrie;

/// One keyword occurrence
/// `start` and `end` are character offsets into the scanned text, `end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct KeywordMatch {
    pub keyword: String,
    pub start: usize,
    pub end: usize,
}

impl KeywordMatch {
    pub fn new(keyword: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            keyword: keyword.into(),
            start,
            end,
        }
    }
}

impl From<KeywordMatch> for (String, usize, usize) {
    fn from(m: KeywordMatch) -> Self {
        (m.keyword, m.start, m.end)
    }
}

/// A token of the scanned text and the character span it came from
#[derive(Debug)]
struct SpanToken {
    text: String,
    start: usize,
    end: usize,
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Accumulates word characters into tokens
#[derive(Default)]
struct TokenSink {
    tokens: Vec<SpanToken>,
    current: String,
    start: usize,
    end: usize,
}

impl TokenSink {
    /// Feed one prepared character that came from source position `pos`
    fn feed(&mut self, c: char, pos: usize) {
        if is_word_char(c) {
            if self.current.is_empty() {
                self.start = pos;
            }
            self.current.push(c);
            self.end = pos + 1;
        } else {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if !self.current.is_empty() {
            self.tokens.push(SpanToken {
                text: std::mem::take(&mut self.current),
                start: self.start,
                end: self.end,
            });
        }
    }

    fn finish(mut self) -> Vec<SpanToken> {
        self.flush();
        self.tokens
    }
}

/// Keyword processor
/// Finds every non-overlapping occurrence of a set of (possibly multi-word)
/// keywords in a single left-to-right scan, preferring the longest keyword at
/// each position.
///
/// With `normalize`, keywords and texts are transliterated to ASCII,
/// lowercased and stripped of punctuation before matching. With only
/// `lowercase`, they are lowercased. Offsets always point into the text as
/// given by the caller.
///
/// # Examples
/// ```
/// use sparse_vectorizer::{KeywordMatch, KeywordProcessor};
/// let mut processor = KeywordProcessor::default();
/// processor.add_keywords(["hello", "world"]);
/// assert_eq!(
///     processor.extract("Hello, world!"),
///     vec![KeywordMatch::new("hello", 0, 5), KeywordMatch::new("world", 7, 12)]
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeywordProcessor {
    lowercase: bool,
    normalize: bool,
    trie: TokenTrie,
}

impl Default for KeywordProcessor {
    fn default() -> Self {
        Self::new(true, true)
    }
}

impl KeywordProcessor {
    pub fn new(lowercase: bool, normalize: bool) -> Self {
        Self {
            lowercase,
            normalize,
            trie: TokenTrie::new(),
        }
    }

    /// Prepare and split a text, keeping each token's source span
    fn span_tokens(&self, text: &str) -> Vec<SpanToken> {
        let mut sink = TokenSink::default();
        for (pos, c) in text.chars().enumerate() {
            if self.normalize {
                for nc in normalize_char(c) {
                    sink.feed(nc, pos);
                }
            } else if self.lowercase {
                for lc in c.to_lowercase() {
                    sink.feed(lc, pos);
                }
            } else {
                sink.feed(c, pos);
            }
        }
        sink.finish()
    }

    fn keyword_tokens(&self, keyword: &str) -> Vec<String> {
        self.span_tokens(keyword)
            .into_iter()
            .map(|token| token.text)
            .collect()
    }

    /// Add a keyword, reported as written
    ///
    /// # Returns
    /// * `bool` - true if the keyword was new, false if it was already present
    ///   or has no tokens after preparation
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        self.add_keyword_with_name(keyword, keyword)
    }

    /// Add a keyword that is reported as `clean_name` when matched
    pub fn add_keyword_with_name(&mut self, keyword: &str, clean_name: &str) -> bool {
        let tokens = self.keyword_tokens(keyword);
        let inserted = self.trie.insert(&tokens, clean_name);
        trace!(keyword, tokens = tokens.len(), inserted, "add keyword");
        inserted
    }

    /// Add many keywords, one result per keyword
    pub fn add_keywords<I, T>(&mut self, keywords: I) -> Vec<bool>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        keywords
            .into_iter()
            .map(|keyword| self.add_keyword(keyword.as_ref()))
            .collect()
    }

    /// Whether `keyword` (after preparation) is a known keyword
    pub fn contains(&self, keyword: &str) -> bool {
        self.trie.contains(&self.keyword_tokens(keyword))
    }

    /// Number of distinct keywords
    pub fn len(&self) -> usize {
        self.trie.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trie.is_empty()
    }

    /// All keyword occurrences in `text`, ordered by start offset
    pub fn extract(&self, text: &str) -> Vec<KeywordMatch> {
        let tokens = self.span_tokens(text);
        let mut matches = Vec::new();
        let mut idx = 0;
        while idx < tokens.len() {
            let rest = tokens[idx..].iter().map(|token| token.text.as_str());
            match self.trie.longest_match(rest) {
                Some((consumed, keyword)) => {
                    let last = &tokens[idx + consumed - 1];
                    matches.push(KeywordMatch::new(keyword, tokens[idx].start, last.end));
                    idx += consumed;
                }
                None => idx += 1,
            }
        }
        matches
    }

    /// Batch form of [`KeywordProcessor::extract`], one list per text
    pub fn extract_many<T>(&self, texts: &[T]) -> Vec<Vec<KeywordMatch>>
    where
        T: AsRef<str> + Sync,
    {
        texts.par_iter().map(|text| self.extract(text.as_ref())).collect()
    }
}
