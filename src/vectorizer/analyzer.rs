use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Largest n-gram size an analyzer accepts
pub const MAX_NGRAM_SIZE: usize = 1024;

/// Sizes of the n-grams an analyzer emits
/// Always non-empty, strictly positive, ascending and without duplicates.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct NgramRange {
    sizes: Vec<usize>,
}

impl NgramRange {
    /// Inclusive range `min..=max`
    ///
    /// # Arguments
    /// * `min` - smallest n, at least 1
    /// * `max` - largest n, at least `min` and at most [`MAX_NGRAM_SIZE`]
    pub fn new(min: usize, max: usize) -> Result<Self> {
        if min > max {
            return Err(Error::Configuration(format!(
                "n-gram range ({min}, {max}) has min greater than max"
            )));
        }
        if max > MAX_NGRAM_SIZE {
            return Err(Error::Configuration(format!(
                "n-gram size {max} exceeds the limit of {MAX_NGRAM_SIZE}"
            )));
        }
        Self::from_sizes(min..=max)
    }

    /// Arbitrary set of sizes
    pub fn from_sizes<I>(sizes: I) -> Result<Self>
    where
        I: IntoIterator<Item = usize>,
    {
        let mut checked = Vec::new();
        // checked while collecting so a huge range fails before it is materialized
        for size in sizes {
            if size == 0 {
                return Err(Error::Configuration("n-gram size must be positive".to_string()));
            }
            if size > MAX_NGRAM_SIZE {
                return Err(Error::Configuration(format!(
                    "n-gram size {size} exceeds the limit of {MAX_NGRAM_SIZE}"
                )));
            }
            checked.push(size);
        }
        if checked.is_empty() {
            return Err(Error::Configuration("n-gram range is empty".to_string()));
        }
        let mut sizes = checked;
        sizes.sort_unstable();
        sizes.dedup();
        Ok(Self { sizes })
    }

    #[inline]
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }
}

impl Default for NgramRange {
    fn default() -> Self {
        Self { sizes: vec![1] }
    }
}

impl TryFrom<Vec<usize>> for NgramRange {
    type Error = Error;

    fn try_from(sizes: Vec<usize>) -> Result<Self> {
        Self::from_sizes(sizes)
    }
}

impl From<NgramRange> for Vec<usize> {
    fn from(range: NgramRange) -> Self {
        range.sizes
    }
}

/// How a text is cut into tokens
/// Selected once at configuration time, the payload holds the n-gram sizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "ngram_range", rename_all = "snake_case")]
pub enum Analyzer {
    /// whitespace-delimited words, n words joined by one space
    Word(NgramRange),
    /// character windows over the whole text, spaces included
    Char(NgramRange),
    /// character windows over the text padded with one space on each side,
    /// keeping only windows that do not overlap the padding
    CharWb(NgramRange),
}

impl Default for Analyzer {
    fn default() -> Self {
        Analyzer::Word(NgramRange::default())
    }
}

impl fmt::Display for Analyzer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Analyzer {
    /// Build an analyzer from its host-side name
    ///
    /// # Arguments
    /// * `name` - one of `word`, `char`, `char_wb`
    /// * `ngram_range` - n-gram sizes
    pub fn from_name(name: &str, ngram_range: NgramRange) -> Result<Self> {
        match name {
            "word" => Ok(Analyzer::Word(ngram_range)),
            "char" => Ok(Analyzer::Char(ngram_range)),
            "char_wb" => Ok(Analyzer::CharWb(ngram_range)),
            "" => Err(Error::Configuration("analyzer name is empty".to_string())),
            other => Err(Error::Configuration(format!("unsupported analyzer: {other}"))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Analyzer::Word(_) => "word",
            Analyzer::Char(_) => "char",
            Analyzer::CharWb(_) => "char_wb",
        }
    }

    pub fn ngram_range(&self) -> &NgramRange {
        match self {
            Analyzer::Word(range) | Analyzer::Char(range) | Analyzer::CharWb(range) => range,
        }
    }

    /// Cut a text into tokens
    /// n-grams of every size are concatenated in ascending n, each size in
    /// left-to-right order.
    pub fn analyze(&self, text: &str) -> Vec<String> {
        match self {
            Analyzer::Word(range) => word_ngrams(text, range.sizes()),
            Analyzer::Char(range) => char_ngrams(text, range.sizes()),
            Analyzer::CharWb(range) => char_wb_ngrams(text, range.sizes()),
        }
    }

    /// Cut many texts into tokens in parallel, one token list per text
    pub fn analyze_many<T>(&self, texts: &[T]) -> Vec<Vec<String>>
    where
        T: AsRef<str> + Sync,
    {
        texts.par_iter().map(|text| self.analyze(text.as_ref())).collect()
    }
}

fn word_ngrams(text: &str, sizes: &[usize]) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    let mut ngrams = Vec::new();
    for &n in sizes {
        for window in words.windows(n) {
            ngrams.push(window.join(" "));
        }
    }
    ngrams
}

fn char_ngrams(text: &str, sizes: &[usize]) -> Vec<String> {
    let chars: Vec<char> = text.chars().collect();
    let mut ngrams = Vec::new();
    for &n in sizes {
        for window in chars.windows(n) {
            ngrams.push(window.iter().collect());
        }
    }
    ngrams
}

fn char_wb_ngrams(text: &str, sizes: &[usize]) -> Vec<String> {
    let mut padded: Vec<char> = Vec::with_capacity(text.len() + 2);
    padded.push(' ');
    padded.extend(text.chars());
    padded.push(' ');
    let interior_end = padded.len() - 1;

    let mut ngrams = Vec::new();
    for &n in sizes {
        if n > padded.len() {
            continue;
        }
        for start in 0..=padded.len() - n {
            // windows touching the padding are boundary windows
            if start == 0 || start + n > interior_end {
                continue;
            }
            ngrams.push(padded[start..start + n].iter().collect());
        }
    }
    ngrams
}

/// Cut a text into tokens with the given analyzer
///
/// # Examples
/// ```
/// use sparse_vectorizer::{analyze, Analyzer, NgramRange};
/// let analyzer = Analyzer::Char(NgramRange::new(2, 3).unwrap());
/// assert_eq!(analyze("good", &analyzer), vec!["go", "oo", "od", "goo", "ood"]);
/// ```
pub fn analyze(text: &str, analyzer: &Analyzer) -> Vec<String> {
    analyzer.analyze(text)
}

/// Batch form of [`analyze`]
pub fn analyze_many<T>(texts: &[T], analyzer: &Analyzer) -> Vec<Vec<String>>
where
    T: AsRef<str> + Sync,
{
    analyzer.analyze_many(texts)
}
