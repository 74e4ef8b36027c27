use num::Float;

/// L2-normalize every row of a coordinate-format matrix in place
/// Rows whose norm is zero are left untouched.
///
/// # Arguments
/// * `values` - nonzero values
/// * `row_indices` - row of each value, same length as `values`
/// * `num_rows` - number of rows in the matrix
pub fn l2_normalize_rows<F>(values: &mut [F], row_indices: &[usize], num_rows: usize)
where
    F: Float,
{
    debug_assert_eq!(values.len(), row_indices.len());
    let norms = row_norms(values, row_indices, num_rows);
    for (value, &row) in values.iter_mut().zip(row_indices) {
        let norm = norms[row];
        if norm > F::zero() {
            *value = *value / norm;
        }
    }
}

/// Euclidean norm of each row
pub fn row_norms<F>(values: &[F], row_indices: &[usize], num_rows: usize) -> Vec<F>
where
    F: Float,
{
    let mut norms = vec![F::zero(); num_rows];
    for (&value, &row) in values.iter().zip(row_indices) {
        norms[row] = norms[row] + value * value;
    }
    norms.into_iter().map(|n| n.sqrt()).collect()
}
