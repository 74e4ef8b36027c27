use num::Num;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Coordinate-format sparse matrix
/// `values`, `row_indices` and `column_indices` have equal length and hold at
/// most one entry per `(row, column)` pair, so no summation of duplicates is
/// ever needed when converting to a compressed layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseTriplet<N> {
    pub values: Vec<N>,
    pub row_indices: Vec<usize>,
    pub column_indices: Vec<usize>,
    /// `(num_rows, num_cols)`
    pub shape: (usize, usize),
}

impl<N> SparseTriplet<N>
where
    N: Num + Copy,
{
    /// Create an empty matrix of the given shape
    pub fn new(shape: (usize, usize)) -> Self {
        Self {
            values: Vec::new(),
            row_indices: Vec::new(),
            column_indices: Vec::new(),
            shape,
        }
    }

    /// Append one entry
    #[inline]
    pub fn push(&mut self, row: usize, col: usize, value: N) {
        self.values.push(value);
        self.row_indices.push(row);
        self.column_indices.push(col);
    }

    #[inline]
    pub fn num_rows(&self) -> usize {
        self.shape.0
    }

    #[inline]
    pub fn num_cols(&self) -> usize {
        self.shape.1
    }

    /// Number of stored entries
    #[inline]
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Check that the three arrays line up and every entry lies inside `shape`
    ///
    /// # Errors
    /// [`Error::ShapeMismatch`] with the offending length or the smallest
    /// dimension that would hold the entry.
    pub fn check_bounds(&self) -> Result<()> {
        let len = self.values.len();
        for other in [self.row_indices.len(), self.column_indices.len()] {
            if other != len {
                return Err(Error::ShapeMismatch {
                    expected: len,
                    found: other,
                });
            }
        }
        let (num_rows, num_cols) = self.shape;
        for (row, col, _) in self.iter() {
            if row >= num_rows {
                return Err(Error::ShapeMismatch {
                    expected: num_rows,
                    found: row + 1,
                });
            }
            if col >= num_cols {
                return Err(Error::ShapeMismatch {
                    expected: num_cols,
                    found: col + 1,
                });
            }
        }
        Ok(())
    }

    /// Iterate `(row, column, value)`
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, N)> + '_ {
        self.row_indices
            .iter()
            .zip(&self.column_indices)
            .zip(&self.values)
            .map(|((&row, &col), &value)| (row, col, value))
    }

    /// Sum of each row
    pub fn row_sums(&self) -> Vec<N> {
        let mut sums = vec![N::zero(); self.shape.0];
        for (row, _, value) in self.iter() {
            sums[row] = sums[row] + value;
        }
        sums
    }

    /// Number of rows with a nonzero entry in each column
    pub fn column_nonzero_counts(&self) -> Vec<u64> {
        let mut counts = vec![0u64; self.shape.1];
        for (_, col, value) in self.iter() {
            if !value.is_zero() {
                counts[col] += 1;
            }
        }
        counts
    }

    /// Map every value, keeping the sparsity pattern
    pub fn map_values<M, F>(&self, mut f: F) -> SparseTriplet<M>
    where
        F: FnMut(usize, usize, N) -> M,
    {
        SparseTriplet {
            values: self.iter().map(|(row, col, value)| f(row, col, value)).collect(),
            row_indices: self.row_indices.clone(),
            column_indices: self.column_indices.clone(),
            shape: self.shape,
        }
    }

    /// Dense row-major copy, mainly for inspection and tests
    pub fn to_dense(&self) -> Vec<Vec<N>> {
        let mut dense = vec![vec![N::zero(); self.shape.1]; self.shape.0];
        for (row, col, value) in self.iter() {
            dense[row][col] = value;
        }
        dense
    }

    /// Compressed sparse row copy with column indices sorted within each row
    pub fn to_csr(&self) -> CsrMatrix<N> {
        let (num_rows, _) = self.shape;
        let mut indptr = vec![0usize; num_rows + 1];
        for &row in &self.row_indices {
            indptr[row + 1] += 1;
        }
        for i in 0..num_rows {
            indptr[i + 1] += indptr[i];
        }

        let mut next = indptr.clone();
        let mut indices = vec![0usize; self.nnz()];
        let mut data = vec![N::zero(); self.nnz()];
        for (row, col, value) in self.iter() {
            let pos = next[row];
            indices[pos] = col;
            data[pos] = value;
            next[row] += 1;
        }

        for row in 0..num_rows {
            let (start, end) = (indptr[row], indptr[row + 1]);
            let mut entries: Vec<(usize, N)> = indices[start..end]
                .iter()
                .copied()
                .zip(data[start..end].iter().copied())
                .collect();
            entries.sort_unstable_by_key(|&(col, _)| col);
            for (offset, (col, value)) in entries.into_iter().enumerate() {
                indices[start + offset] = col;
                data[start + offset] = value;
            }
        }

        CsrMatrix {
            indptr,
            indices,
            data,
            shape: self.shape,
        }
    }
}

/// Compressed sparse row matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsrMatrix<N> {
    /// row `i` occupies `indptr[i]..indptr[i + 1]`
    pub indptr: Vec<usize>,
    pub indices: Vec<usize>,
    pub data: Vec<N>,
    pub shape: (usize, usize),
}

impl<N> CsrMatrix<N>
where
    N: Num + Copy,
{
    /// Iterate `(column, value)` of one row
    pub fn row(&self, row: usize) -> impl Iterator<Item = (usize, N)> + '_ {
        let (start, end) = (self.indptr[row], self.indptr[row + 1]);
        self.indices[start..end]
            .iter()
            .copied()
            .zip(self.data[start..end].iter().copied())
    }

    /// Value at `(row, col)`, zero if not stored
    pub fn get(&self, row: usize, col: usize) -> N {
        self.row(row)
            .find(|&(c, _)| c == col)
            .map_or(N::zero(), |(_, value)| value)
    }

    #[inline]
    pub fn nnz(&self) -> usize {
        self.data.len()
    }
}
