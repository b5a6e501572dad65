use crate::error::{Result, TensorError};
use crate::fixed::Q8_8;

/// A dense row-major matrix of Q8.8 values.
///
/// Holds `rows * cols` contiguous words. Inputs handed to the convolution
/// engine are only ever read through shared references; the engine's output
/// is the one matrix that gets written in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    data: Vec<Q8_8>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Create a matrix from row-major data.
    ///
    /// # Errors
    /// Returns an error if `data.len() != rows * cols`.
    pub fn new(data: Vec<Q8_8>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(TensorError::LengthMismatch {
                len: data.len(),
                rows,
                cols,
            });
        }
        Ok(Matrix { data, rows, cols })
    }

    /// Create a zero-filled matrix.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Matrix {
            data: vec![Q8_8::ZERO; rows * cols],
            rows,
            cols,
        }
    }

    /// Build a matrix by calling `f(row, col)` for each element in row-major
    /// order.
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> Q8_8) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Matrix { data, rows, cols }
    }

    /// Build a matrix by encoding real values (row-major).
    pub fn from_f32(values: &[f32], rows: usize, cols: usize) -> Result<Self> {
        Self::new(values.iter().map(|&v| Q8_8::from_f32(v)).collect(), rows, cols)
    }

    /// Build a matrix from nested rows. All rows must have the same length.
    pub fn from_rows(rows: &[Vec<Q8_8>]) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(TensorError::ShapeMismatch {
                    expected: vec![n_rows, n_cols],
                    got: vec![n_rows, row.len()],
                });
            }
            data.extend_from_slice(row);
        }
        Ok(Matrix {
            data,
            rows: n_rows,
            cols: n_cols,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Element at `(row, col)`.
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn at(&self, row: usize, col: usize) -> Q8_8 {
        assert!(
            row < self.rows && col < self.cols,
            "index ({}, {}) out of bounds for {}x{}",
            row,
            col,
            self.rows,
            self.cols
        );
        self.data[row * self.cols + col]
    }

    /// Checked element access.
    pub fn get(&self, row: usize, col: usize) -> Result<Q8_8> {
        if row >= self.rows || col >= self.cols {
            return Err(TensorError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.data[row * self.cols + col])
    }

    /// One row as a slice.
    pub fn row(&self, row: usize) -> &[Q8_8] {
        let start = row * self.cols;
        &self.data[start..start + self.cols]
    }

    /// Mutable access to one row.
    pub fn row_mut(&mut self, row: usize) -> &mut [Q8_8] {
        let start = row * self.cols;
        &mut self.data[start..start + self.cols]
    }

    /// The underlying row-major data.
    pub fn as_slice(&self) -> &[Q8_8] {
        &self.data
    }

    /// Iterator over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Q8_8]> {
        // chunks_exact(0) panics, and a zero-column matrix has no data anyway.
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    /// Decode every element to `f32` (row-major).
    pub fn to_f32_vec(&self) -> Vec<f32> {
        self.data.iter().map(|q| q.to_f32()).collect()
    }
}
