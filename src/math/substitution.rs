//! Forward and backward substitution over triangular systems.

use super::{Matrix, Vector};

/// Given a lower triangular matrix `[L]` and a vector `[b]`, computes the
/// solution `[x]` of `[L][x] = [b]` by forward substitution.
#[must_use]
pub fn solve_lower_system(low_mat: &Matrix, vector: &Vector) -> Vector {
    let size = vector.length();
    let mut solution = Vector::new(size);

    for i in 0..size {
        let mut sum = 0.0;
        for j in 0..i {
            sum += low_mat.value_at(i, j) * solution.value_at(j);
        }

        let value = (vector.value_at(i) - sum) / low_mat.value_at(i, i);
        solution.set_value(i, value);
    }

    solution
}

/// Given an upper triangular matrix `[U]` and a vector `[b]`, computes the
/// solution `[x]` of `[U][x] = [b]` by backward substitution.
#[must_use]
pub fn solve_upper_system(up_mat: &Matrix, vector: &Vector) -> Vector {
    let size = vector.length();
    let mut solution = Vector::new(size);

    for i in (0..size).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..size {
            sum += up_mat.value_at(i, j) * solution.value_at(j);
        }

        let value = (vector.value_at(i) - sum) / up_mat.value_at(i, i);
        solution.set_value(i, value);
    }

    solution
}

/// Backward substitution reading `low_mat` as if it was transposed.
///
/// Solves `[L]'[x] = [b]` directly from the lower factor, so Cholesky never
/// materializes the upper triangular transpose.
#[must_use]
pub fn solve_upper_system_transposed(low_mat: &Matrix, vector: &Vector) -> Vector {
    let size = vector.length();
    let mut solution = Vector::new(size);

    for i in (0..size).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..size {
            sum += low_mat.value_transposed_at(i, j) * solution.value_at(j);
        }

        let value = (vector.value_at(i) - sum) / low_mat.value_transposed_at(i, i);
        solution.set_value(i, value);
    }

    solution
}
