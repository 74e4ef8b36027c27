pub mod analyzer;
pub mod builder;
pub mod config;
pub mod corpus;
pub mod serde;
pub mod sparse;
pub mod stop_words;
pub mod tfidf;
pub mod token;

use ::serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::vectorizer::{
    builder::SparseMatrixBuilder,
    config::VectorizerConfig,
    corpus::Vocabulary,
    sparse::SparseTriplet,
    tfidf::{Bm25Engine, Bm25Params, TfIdfEngine, WeightingEngine},
};

/// Raw count vectorizer
/// Thin wrapper over [`SparseMatrixBuilder`] that yields `u64` count matrices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CountVectorizer {
    builder: SparseMatrixBuilder,
}

impl CountVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            builder: SparseMatrixBuilder::new(config),
        }
    }

    /// Learn the vocabulary
    pub fn fit<T>(&mut self, documents: &[T]) -> &mut Self
    where
        T: AsRef<str> + Sync,
    {
        self.builder.fit(documents);
        self
    }

    /// Document-term count matrix of `documents`
    pub fn transform<T>(&self, documents: &[T]) -> Result<SparseTriplet<u64>>
    where
        T: AsRef<str> + Sync,
    {
        self.builder.transform(documents)
    }

    pub fn fit_transform<T>(&mut self, documents: &[T]) -> SparseTriplet<u64>
    where
        T: AsRef<str> + Sync,
    {
        self.builder.fit_transform(documents)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.builder.vocabulary()
    }

    pub fn num_cols(&self) -> usize {
        self.builder.get_num_cols()
    }

    pub fn builder(&self) -> &SparseMatrixBuilder {
        &self.builder
    }
}

/// Count vectorizer followed by a weighting engine
///
/// `WeightedVectorizer<E>` has the following generic parameter:
/// - `E`: weighting engine (e.g., [`TfIdfEngine`], [`Bm25Engine`])
///
/// After `fit(docs)`, `transform(docs)` returns exactly what
/// `fit_transform(docs)` would have.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightedVectorizer<E> {
    builder: SparseMatrixBuilder,
    engine: E,
}

/// TF-IDF weighted vectorizer
pub type TfIdfVectorizer = WeightedVectorizer<TfIdfEngine>;
/// BM25 weighted vectorizer
pub type Bm25Vectorizer = WeightedVectorizer<Bm25Engine>;

impl<E> WeightedVectorizer<E>
where
    E: WeightingEngine,
{
    /// Create a new vectorizer from a pipeline config and an unfitted engine
    pub fn with_engine(config: VectorizerConfig, engine: E) -> Self {
        Self {
            builder: SparseMatrixBuilder::new(config),
            engine,
        }
    }

    /// Learn the vocabulary and the weighting statistics
    pub fn fit<T>(&mut self, documents: &[T]) -> &mut Self
    where
        T: AsRef<str> + Sync,
    {
        let counts = self.builder.fit_transform(documents);
        self.engine.update(&counts);
        self
    }

    /// Weighted, row-normalized matrix of `documents`
    ///
    /// # Errors
    /// [`Error::NotFitted`] before `fit`.
    pub fn transform<T>(&self, documents: &[T]) -> Result<SparseTriplet<f64>>
    where
        T: AsRef<str> + Sync,
    {
        if !self.engine.is_fitted() {
            return Err(Error::NotFitted("WeightedVectorizer"));
        }
        let counts = self.builder.transform(documents)?;
        self.engine.apply(&counts)
    }

    /// Fit on `documents` and weight that same count matrix
    pub fn fit_transform<T>(&mut self, documents: &[T]) -> Result<SparseTriplet<f64>>
    where
        T: AsRef<str> + Sync,
    {
        let counts = self.builder.fit_transform(documents);
        self.engine.update(&counts);
        self.engine.apply(&counts)
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        self.builder.vocabulary()
    }

    pub fn num_cols(&self) -> usize {
        self.builder.get_num_cols()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl TfIdfVectorizer {
    pub fn new(config: VectorizerConfig) -> Self {
        Self::with_engine(config, TfIdfEngine::new())
    }
}

impl Bm25Vectorizer {
    pub fn new(config: VectorizerConfig, params: Bm25Params) -> Self {
        Self::with_engine(config, Bm25Engine::new(params))
    }
}
