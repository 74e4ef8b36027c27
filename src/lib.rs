/// This crate turns raw text into sparse document-term matrices and extracts keywords.
pub mod error;
pub mod flash;
pub mod utils;
pub mod vectorizer;

/// Error and Result types
/// Every fallible operation in this crate returns [`Result`].
pub use error::{Error, Result};

/// Text normalization
/// Transliterates to ASCII, lowercases, deletes punctuation and collapses whitespace.
/// `normalize_many` processes a batch in parallel and keeps input order.
pub use utils::normalizer::{normalize, normalize_many};

/// N-gram analysis
/// Splits a (normalized) text into word n-grams, character n-grams, or
/// character n-grams that never cross a word boundary.
///
/// # Examples
/// ```
/// use sparse_vectorizer::{analyze, Analyzer, NgramRange};
/// let analyzer = Analyzer::Word(NgramRange::new(1, 2).unwrap());
/// assert_eq!(
///     analyze("hello world", &analyzer),
///     vec!["hello", "world", "hello world"]
/// );
/// ```
pub use vectorizer::analyzer::{analyze, analyze_many, Analyzer, NgramRange};

/// Token Frequency structure
/// Occurrence counts of each token within one document, in first-seen order,
/// plus the total number of tokens counted.
/// `count` and `count_many` run the whole pipeline (normalize, analyze, count).
pub use vectorizer::token::{count, count_many, TokenFrequency};

/// Stop words
/// A set of tokens dropped from token frequencies, plus text-level helpers
/// that remove stop words from whitespace-separated text.
pub use vectorizer::stop_words::{filter_stop_words, filter_stop_words_many, StopWords};

/// Pipeline configuration
/// Analyzer, normalization switch and stop words shared by every vectorizer.
pub use vectorizer::config::VectorizerConfig;

/// Vocabulary
/// Token to column mapping. Columns are assigned in first-seen order and never reused.
pub use vectorizer::corpus::Vocabulary;

/// Sparse matrices
/// `SparseTriplet` is the coordinate (COO) form every vectorizer produces.
/// `CsrMatrix` is the compressed row form for consumers that need row slices.
pub use vectorizer::sparse::{CsrMatrix, SparseTriplet};

/// Sparse Matrix Builder
/// Learns a vocabulary from documents and turns documents into count matrices.
///
/// # Examples
/// ```
/// use sparse_vectorizer::{SparseMatrixBuilder, VectorizerConfig};
/// let mut builder = SparseMatrixBuilder::new(VectorizerConfig::default());
/// let counts = builder.fit_transform(&["Hello, world!", "How are you?"]);
/// assert_eq!(counts.shape, (2, 5));
/// assert_eq!(builder.vocabulary().get("world"), Some(1));
/// ```
pub use vectorizer::builder::SparseMatrixBuilder;

/// Vectorizers
/// - `CountVectorizer`: raw counts
/// - `TfIdfVectorizer`: smoothed TF-IDF, L2 row-normalized
/// - `Bm25Vectorizer`: BM25 term weights, L2 row-normalized
///
/// `WeightedVectorizer<E>` takes any [`WeightingEngine`] as `E`.
pub use vectorizer::{Bm25Vectorizer, CountVectorizer, TfIdfVectorizer, WeightedVectorizer};

/// Weighting Engine Trait
/// A trait that defines how document statistics are collected from a count
/// matrix and how counts are turned into weights.
///
/// Two engines are provided:
/// - `TfIdfEngine`: idf = ln((N + 1) / (df + 1)) + 1
/// - `Bm25Engine`: Okapi BM25 with `Bm25Params { k1, b, epsilon }`
pub use vectorizer::tfidf::{Bm25Engine, Bm25Params, IDFVector, TfIdfEngine, WeightingEngine};

/// Binary persistence
/// CBOR encoding of fitted builders, vectorizers and keyword processors.
pub use vectorizer::serde::CborPersist;

/// Keyword extraction
/// `KeywordProcessor` finds every non-overlapping occurrence of a keyword set
/// in one pass, preferring the longest keyword, and reports character offsets
/// into the original text.
pub use flash::{KeywordMatch, KeywordProcessor};
