//! Compressed sparse row matrix for TF-IDF features.

use serde::{Deserialize, Serialize};

/// A borrowed view of one matrix row: parallel column indices and values.
#[derive(Debug, Clone, Copy)]
pub struct SparseRow<'a> {
    pub indices: &'a [usize],
    pub values: &'a [f64],
}

impl SparseRow<'_> {
    /// Dot product with a dense vector.
    pub fn dot(&self, dense: &[f64]) -> f64 {
        self.indices
            .iter()
            .zip(self.values)
            .map(|(&col, &value)| dense[col] * value)
            .sum()
    }

    pub fn nnz(&self) -> usize {
        self.indices.len()
    }

    /// Dense copy of the row.
    pub fn to_dense(&self, n_cols: usize) -> Vec<f64> {
        let mut dense = vec![0.0; n_cols];
        for (&col, &value) in self.indices.iter().zip(self.values) {
            dense[col] = value;
        }
        dense
    }
}

/// Row-major sparse matrix in CSR layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SparseMatrix {
    n_cols: usize,
    indptr: Vec<usize>,
    indices: Vec<usize>,
    data: Vec<f64>,
}

impl SparseMatrix {
    /// Empty matrix with a fixed column count.
    pub fn new(n_cols: usize) -> Self {
        Self {
            n_cols,
            indptr: vec![0],
            indices: Vec::new(),
            data: Vec::new(),
        }
    }

    /// Append a row given as `(column, value)` pairs sorted by column.
    ///
    /// Zero values are skipped. Panics if a column is out of range.
    pub fn push_row<I>(&mut self, entries: I)
    where
        I: IntoIterator<Item = (usize, f64)>,
    {
        for (col, value) in entries {
            assert!(col < self.n_cols, "column {col} out of range {}", self.n_cols);
            if value != 0.0 {
                self.indices.push(col);
                self.data.push(value);
            }
        }
        self.indptr.push(self.indices.len());
    }

    pub fn n_rows(&self) -> usize {
        self.indptr.len() - 1
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    /// `(rows, cols)`.
    pub fn shape(&self) -> (usize, usize) {
        (self.n_rows(), self.n_cols)
    }

    /// Number of stored entries.
    pub fn nnz(&self) -> usize {
        self.data.len()
    }

    pub fn row(&self, index: usize) -> SparseRow<'_> {
        let start = self.indptr[index];
        let end = self.indptr[index + 1];
        SparseRow {
            indices: &self.indices[start..end],
            values: &self.data[start..end],
        }
    }

    pub fn rows(&self) -> impl Iterator<Item = SparseRow<'_>> {
        (0..self.n_rows()).map(|i| self.row(i))
    }

    /// New matrix holding the given rows in the given order.
    pub fn select_rows(&self, rows: &[usize]) -> SparseMatrix {
        let mut selected = SparseMatrix::new(self.n_cols);
        for &index in rows {
            let row = self.row(index);
            selected.push_row(row.indices.iter().copied().zip(row.values.iter().copied()));
        }
        selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SparseMatrix {
        let mut matrix = SparseMatrix::new(4);
        matrix.push_row(vec![(0, 1.0), (2, 2.0)]);
        matrix.push_row(vec![]);
        matrix.push_row(vec![(1, 0.0), (3, 5.0)]);
        matrix
    }

    #[test]
    fn test_shape_and_rows() {
        let matrix = sample();
        assert_eq!(matrix.shape(), (3, 4));
        assert_eq!(matrix.nnz(), 3);
        assert_eq!(matrix.row(0).indices, &[0, 2]);
        assert_eq!(matrix.row(1).nnz(), 0);
        // explicit zeros are not stored
        assert_eq!(matrix.row(2).indices, &[3]);
    }

    #[test]
    fn test_dot_and_dense() {
        let matrix = sample();
        let weights = [1.0, 10.0, 100.0, 1000.0];
        assert_eq!(matrix.row(0).dot(&weights), 201.0);
        assert_eq!(matrix.row(1).dot(&weights), 0.0);
        assert_eq!(matrix.row(2).to_dense(4), vec![0.0, 0.0, 0.0, 5.0]);
    }

    #[test]
    fn test_select_rows() {
        let matrix = sample();
        let selected = matrix.select_rows(&[2, 0]);
        assert_eq!(selected.shape(), (2, 4));
        assert_eq!(selected.row(0).indices, &[3]);
        assert_eq!(selected.row(1).values, &[1.0, 2.0]);
    }
}
