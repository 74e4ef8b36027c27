use std::collections::HashMap;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::vectorizer::config::VectorizerConfig;
use crate::vectorizer::corpus::Vocabulary;
use crate::vectorizer::sparse::SparseTriplet;
use crate::vectorizer::token::TokenFrequency;

/// Learns a corpus vocabulary and emits document-term count matrices
///
/// Fitting is cumulative: calling `fit` again extends the vocabulary and never
/// renumbers existing columns. Use [`SparseMatrixBuilder::clear`] to start over.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SparseMatrixBuilder {
    config: VectorizerConfig,
    vocab: Vocabulary,
}

impl SparseMatrixBuilder {
    /// Create a new builder with an empty vocabulary
    pub fn new(config: VectorizerConfig) -> Self {
        Self {
            config,
            vocab: Vocabulary::new(),
        }
    }

    pub fn config(&self) -> &VectorizerConfig {
        &self.config
    }

    /// Per-document counts, computed in parallel, in input order
    fn frequencies<T>(&self, documents: &[T]) -> Vec<TokenFrequency>
    where
        T: AsRef<str> + Sync,
    {
        documents
            .par_iter()
            .map(|doc| self.config.token_frequency(doc.as_ref()))
            .collect()
    }

    /// Learn the vocabulary of `documents`
    /// Unseen tokens get the next column in document order, then token order.
    pub fn fit<T>(&mut self, documents: &[T]) -> &mut Self
    where
        T: AsRef<str> + Sync,
    {
        let freqs = self.frequencies(documents);
        let before = self.vocab.len();
        for freq in &freqs {
            for (token, _) in freq.iter() {
                self.vocab.get_or_insert(token);
            }
        }
        debug!(
            documents = documents.len(),
            new_tokens = self.vocab.len() - before,
            num_cols = self.vocab.len(),
            "fitted vocabulary"
        );
        self
    }

    /// Count matrix of `documents` against the fitted vocabulary
    /// Tokens outside the vocabulary are dropped.
    ///
    /// # Errors
    /// [`Error::NotFitted`] when the vocabulary is empty.
    pub fn transform<T>(&self, documents: &[T]) -> Result<SparseTriplet<u64>>
    where
        T: AsRef<str> + Sync,
    {
        if self.vocab.is_empty() {
            return Err(Error::NotFitted("SparseMatrixBuilder"));
        }
        let rows: Vec<Vec<(usize, u64)>> = documents
            .par_iter()
            .map(|doc| {
                self.config
                    .token_frequency(doc.as_ref())
                    .iter()
                    .filter_map(|(token, count)| self.vocab.get(token).map(|col| (col, count)))
                    .collect()
            })
            .collect();

        let mut matrix = SparseTriplet::new((documents.len(), self.vocab.len()));
        for (row, entries) in rows.into_iter().enumerate() {
            for (col, count) in entries {
                matrix.push(row, col, count);
            }
        }
        debug!(
            documents = documents.len(),
            nnz = matrix.nnz(),
            "transformed documents"
        );
        Ok(matrix)
    }

    /// Learn the vocabulary and emit the count matrix in one tokenization pass
    /// Gives the same matrix as `fit` followed by `transform`.
    pub fn fit_transform<T>(&mut self, documents: &[T]) -> SparseTriplet<u64>
    where
        T: AsRef<str> + Sync,
    {
        let freqs = self.frequencies(documents);
        let mut values = Vec::new();
        let mut row_indices = Vec::new();
        let mut column_indices = Vec::new();
        for (row, freq) in freqs.iter().enumerate() {
            for (token, count) in freq.iter() {
                values.push(count);
                row_indices.push(row);
                column_indices.push(self.vocab.get_or_insert(token));
            }
        }
        let matrix = SparseTriplet {
            values,
            row_indices,
            column_indices,
            shape: (documents.len(), self.vocab.len()),
        };
        debug!(
            documents = documents.len(),
            num_cols = self.vocab.len(),
            nnz = matrix.nnz(),
            "fitted and transformed documents"
        );
        matrix
    }

    /// Read-only view of the vocabulary
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocab
    }

    /// Snapshot of the token to column mapping
    pub fn get_vocab(&self) -> HashMap<String, usize> {
        self.vocab.to_hashmap()
    }

    /// Current vocabulary size
    pub fn get_num_cols(&self) -> usize {
        self.vocab.len()
    }

    /// Forget the learned vocabulary
    pub fn clear(&mut self) {
        self.vocab.clear();
    }
}
