//! Dense matrix type used for the global stiffness system.

use serde::{Deserialize, Serialize};

use super::Vector;
use crate::geom::{close_enough, TOLERANCE};

/// A dense `rows x cols` matrix of `f64` values, zero-initialized.
///
/// Index bounds and product dimensions are preconditions: violating them
/// panics instead of returning a recoverable error. Only the solvers map
/// size problems to [`TrussError`](crate::error::TrussError) values, at
/// their entry points.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Create a `rows x cols` matrix filled with zeroes.
    #[must_use]
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Create a matrix from a row-major slice of values.
    ///
    /// The slice length must be exactly `rows * cols`.
    #[must_use]
    pub fn from_row_slice(rows: usize, cols: usize, values: &[f64]) -> Self {
        assert_eq!(
            values.len(),
            rows * cols,
            "cannot set data: expected {} values, got {}",
            rows * cols,
            values.len()
        );
        Self {
            rows,
            cols,
            data: values.to_vec(),
        }
    }

    /// Number of rows in the matrix.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns in the matrix.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// A matrix is square if it has the same number of rows and columns.
    #[must_use]
    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.rows && col < self.cols,
            "index ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows,
            self.cols
        );
        row * self.cols + col
    }

    /// Value at position (`row`, `col`).
    #[must_use]
    pub fn value_at(&self, row: usize, col: usize) -> f64 {
        self.data[self.index(row, col)]
    }

    /// Value at position (`row`, `col`) as if this matrix was transposed.
    ///
    /// Used by the Cholesky back-substitution to read the lower factor as
    /// an upper triangular matrix without materializing the transpose.
    #[must_use]
    pub fn value_transposed_at(&self, row: usize, col: usize) -> f64 {
        self.data[self.index(col, row)]
    }

    /// Set `value` at position (`row`, `col`), overwriting any previous value.
    pub fn set_value(&mut self, row: usize, col: usize, value: f64) {
        let index = self.index(row, col);
        self.data[index] = value;
    }

    /// Add `amount` to the existing value at position (`row`, `col`).
    pub fn add_to_value(&mut self, row: usize, col: usize, amount: f64) {
        let index = self.index(row, col);
        self.data[index] += amount;
    }

    /// Set the row at `row` to the canonical basis vector: all zeroes except
    /// for a one in the main diagonal position.
    pub fn set_identity_row(&mut self, row: usize) {
        for col in 0..self.cols {
            self.set_value(row, col, if row == col { 1.0 } else { 0.0 });
        }
    }

    /// Set the column at `col` to the canonical basis vector: all zeroes
    /// except for a one in the main diagonal position.
    pub fn set_identity_col(&mut self, col: usize) {
        for row in 0..self.rows {
            self.set_value(row, col, if row == col { 1.0 } else { 0.0 });
        }
    }

    /// Multiply every value in the matrix by `factor`, in place.
    pub fn scale(&mut self, factor: f64) {
        for value in &mut self.data {
            *value *= factor;
        }
    }

    /// A new matrix, result of transposing this one.
    #[must_use]
    pub fn transposed(&self) -> Matrix {
        let mut result = Matrix::new(self.cols, self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                result.set_value(col, row, self.value_at(row, col));
            }
        }
        result
    }

    /// Product of this matrix times the vector `v`.
    ///
    /// The matrix column count must equal the vector length.
    #[must_use]
    pub fn times_vector(&self, v: &Vector) -> Vector {
        assert_eq!(
            self.cols,
            v.length(),
            "product size mismatch: {}x{} matrix times vector of length {}",
            self.rows,
            self.cols,
            v.length()
        );

        let mut result = Vector::new(self.rows);
        for row in 0..self.rows {
            let mut product_sum = 0.0;
            for col in 0..self.cols {
                product_sum += self.value_at(row, col) * v.value_at(col);
            }
            result.set_value(row, product_sum);
        }
        result
    }

    /// Product of this matrix times `other`.
    ///
    /// This matrix' column count must equal `other`'s row count.
    #[must_use]
    pub fn times_matrix(&self, other: &Matrix) -> Matrix {
        assert_eq!(
            self.cols, other.rows,
            "product size mismatch: {}x{} matrix times {}x{} matrix",
            self.rows, self.cols, other.rows, other.cols
        );

        let mut result = Matrix::new(self.rows, other.cols);
        for row in 0..self.rows {
            for col in 0..other.cols {
                let mut product_sum = 0.0;
                for k in 0..self.cols {
                    product_sum += self.value_at(row, k) * other.value_at(k, col);
                }
                result.set_value(row, col, product_sum);
            }
        }
        result
    }
}

impl std::ops::Add for &Matrix {
    type Output = Matrix;

    fn add(self, other: &Matrix) -> Matrix {
        assert_eq!(self.rows, other.rows, "row count mismatch");
        assert_eq!(self.cols, other.cols, "column count mismatch");

        let mut result = self.clone();
        for (value, other_value) in result.data.iter_mut().zip(&other.data) {
            *value += other_value;
        }
        result
    }
}

impl std::ops::Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, other: &Matrix) -> Matrix {
        assert_eq!(self.rows, other.rows, "row count mismatch");
        assert_eq!(self.cols, other.cols, "column count mismatch");

        let mut result = self.clone();
        for (value, other_value) in result.data.iter_mut().zip(&other.data) {
            *value -= other_value;
        }
        result
    }
}

/// Two matrices are equal if they have the same size and every pair of
/// values is within [`TOLERANCE`] of each other.
impl PartialEq for Matrix {
    fn eq(&self, other: &Self) -> bool {
        self.rows == other.rows
            && self.cols == other.cols
            && self
                .data
                .iter()
                .zip(&other.data)
                .all(|(a, b)| close_enough(*a, *b, TOLERANCE))
    }
}
