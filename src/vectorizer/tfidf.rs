use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};
use crate::utils::math::l2_normalize_rows;
use crate::vectorizer::sparse::SparseTriplet;

/// Weighting engine trait
/// Turns a raw count matrix into a weighted, L2 row-normalized matrix.
///
/// `update` learns the corpus statistics once from a fitted count matrix,
/// `apply` reuses them for any number of later matrices.
pub trait WeightingEngine {
    /// Learn corpus statistics from a count matrix
    ///
    /// # Arguments
    /// * `counts` - document-term count matrix of the fitted corpus
    fn update(&mut self, counts: &SparseTriplet<u64>);

    /// Weight and row-normalize a count matrix
    ///
    /// # Errors
    /// * [`Error::NotFitted`] - `update` was never called
    /// * [`Error::ShapeMismatch`] - column count differs from the fitted state, or
    ///   an entry lies outside the matrix shape
    fn apply(&self, counts: &SparseTriplet<u64>) -> Result<SparseTriplet<f64>>;

    /// Whether `update` has run
    fn is_fitted(&self) -> bool;
}

/// Per-column inverse document frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IDFVector {
    /// IDF Vector it is not sparse because it is mostly filled
    pub idf_vec: Vec<f64>,
    /// document count at fit time
    pub doc_num: u64,
}

impl IDFVector {
    fn check_counts(&self, counts: &SparseTriplet<u64>) -> Result<()> {
        if counts.num_cols() != self.idf_vec.len() {
            return Err(Error::ShapeMismatch {
                expected: self.idf_vec.len(),
                found: counts.num_cols(),
            });
        }
        counts.check_bounds()
    }
}

/// Smoothed TF-IDF
/// `idf = ln((N + 1) / (df + 1)) + 1`, entry = `count * idf`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TfIdfEngine {
    idf: Option<IDFVector>,
}

impl TfIdfEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// IDF value of a single column
    ///
    /// # Arguments
    /// * `doc_num` - number of documents
    /// * `doc_freq` - documents containing the token
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        ((doc_num as f64 + 1.0) / (doc_freq as f64 + 1.0)).ln() + 1.0
    }

    pub fn idf(&self) -> Option<&IDFVector> {
        self.idf.as_ref()
    }
}

impl WeightingEngine for TfIdfEngine {
    fn update(&mut self, counts: &SparseTriplet<u64>) {
        let doc_num = counts.num_rows() as u64;
        let idf_vec = counts
            .column_nonzero_counts()
            .into_iter()
            .map(|df| Self::idf_calc(doc_num, df))
            .collect();
        self.idf = Some(IDFVector { idf_vec, doc_num });
        debug!(doc_num, num_cols = counts.num_cols(), "updated tf-idf weights");
    }

    fn apply(&self, counts: &SparseTriplet<u64>) -> Result<SparseTriplet<f64>> {
        let idf = self.idf.as_ref().ok_or(Error::NotFitted("TfIdfEngine"))?;
        idf.check_counts(counts)?;
        let mut weighted = counts.map_values(|_, col, count| count as f64 * idf.idf_vec[col]);
        l2_normalize_rows(&mut weighted.values, &weighted.row_indices, weighted.shape.0);
        Ok(weighted)
    }

    fn is_fitted(&self) -> bool {
        self.idf.is_some()
    }
}

/// BM25 tuning parameters
/// Only constructible through [`Bm25Params::new`] (or `Default`), decoding
/// runs the same validation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBm25Params")]
pub struct Bm25Params {
    /// term frequency saturation, higher lets frequent terms weigh more
    k1: f64,
    /// document length normalization strength in `[0, 1]`
    b: f64,
    /// added to every saturated term score
    epsilon: f64,
}

#[derive(Deserialize)]
struct RawBm25Params {
    k1: f64,
    b: f64,
    epsilon: f64,
}

impl TryFrom<RawBm25Params> for Bm25Params {
    type Error = Error;

    fn try_from(raw: RawBm25Params) -> Result<Self> {
        Self::new(raw.k1, raw.b, raw.epsilon)
    }
}

impl Default for Bm25Params {
    fn default() -> Self {
        Self {
            k1: 1.5,
            b: 0.75,
            epsilon: 0.0,
        }
    }
}

impl Bm25Params {
    pub fn new(k1: f64, b: f64, epsilon: f64) -> Result<Self> {
        if !k1.is_finite() || k1 < 0.0 {
            return Err(Error::Configuration(format!("k1 must be finite and non-negative, got {k1}")));
        }
        if !(0.0..=1.0).contains(&b) {
            return Err(Error::Configuration(format!("b must be within [0, 1], got {b}")));
        }
        if !epsilon.is_finite() || epsilon < 0.0 {
            return Err(Error::Configuration(format!(
                "epsilon must be finite and non-negative, got {epsilon}"
            )));
        }
        Ok(Self { k1, b, epsilon })
    }

    #[inline]
    pub fn k1(&self) -> f64 {
        self.k1
    }

    #[inline]
    pub fn b(&self) -> f64 {
        self.b
    }

    #[inline]
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Bm25State {
    idf: IDFVector,
    avg_len: f64,
}

/// Okapi BM25
/// The average document length is frozen at fit time so scores of later
/// transforms stay comparable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bm25Engine {
    params: Bm25Params,
    state: Option<Bm25State>,
}

impl Bm25Engine {
    pub fn new(params: Bm25Params) -> Self {
        Self { params, state: None }
    }

    pub fn params(&self) -> &Bm25Params {
        &self.params
    }

    /// `ln((N - df + 0.5) / (df + 0.5) + 1)`
    #[inline]
    pub fn idf_calc(doc_num: u64, doc_freq: u64) -> f64 {
        let (n, df) = (doc_num as f64, doc_freq as f64);
        ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
    }

    pub fn idf(&self) -> Option<&IDFVector> {
        self.state.as_ref().map(|state| &state.idf)
    }

    /// Mean token count per document at fit time
    pub fn average_len(&self) -> Option<f64> {
        self.state.as_ref().map(|state| state.avg_len)
    }

    /// Saturated term score before idf
    #[inline]
    fn term_score(&self, count: f64, doc_len: f64, avg_len: f64) -> f64 {
        let Bm25Params { k1, b, epsilon } = self.params;
        let ratio = if avg_len > 0.0 { doc_len / avg_len } else { 1.0 };
        let regularization = k1 * (1.0 - b + b * ratio);
        count * (k1 + 1.0) / (count + regularization) + epsilon
    }
}

impl WeightingEngine for Bm25Engine {
    fn update(&mut self, counts: &SparseTriplet<u64>) {
        let doc_num = counts.num_rows() as u64;
        let idf_vec = counts
            .column_nonzero_counts()
            .into_iter()
            .map(|df| Self::idf_calc(doc_num, df))
            .collect();
        let total: u64 = counts.values.iter().sum();
        let avg_len = if doc_num == 0 {
            0.0
        } else {
            total as f64 / doc_num as f64
        };
        self.state = Some(Bm25State {
            idf: IDFVector { idf_vec, doc_num },
            avg_len,
        });
        debug!(doc_num, avg_len, num_cols = counts.num_cols(), "updated bm25 weights");
    }

    fn apply(&self, counts: &SparseTriplet<u64>) -> Result<SparseTriplet<f64>> {
        let state = self.state.as_ref().ok_or(Error::NotFitted("Bm25Engine"))?;
        state.idf.check_counts(counts)?;
        let doc_lens = counts.row_sums();
        let mut weighted = counts.map_values(|row, col, count| {
            self.term_score(count as f64, doc_lens[row] as f64, state.avg_len)
                * state.idf.idf_vec[col]
        });
        l2_normalize_rows(&mut weighted.values, &weighted.row_indices, weighted.shape.0);
        Ok(weighted)
    }

    fn is_fitted(&self) -> bool {
        self.state.is_some()
    }
}
