//! Cholesky factorization for symmetric positive-definite systems.
//!
//! This is the solver the structural core uses: the constrained global
//! stiffness matrix of a well-supported truss is guaranteed SPD.

use super::substitution::{solve_lower_system, solve_upper_system_transposed};
use super::{validate_system, Matrix, Vector};
use crate::error::{TrussError, TrussResult};

/// Solves `[A][x] = [b]` where `[A]` is symmetric positive-definite.
///
/// Decomposes `[A] = [L][L]'`, then forward-substitutes `[L][y] = [b]` and
/// back-substitutes `[L]'[x] = [y]`. The backward pass reads `[L]` through
/// its transposed-read accessor, so the upper factor is never materialized.
pub fn cholesky_solve(sys_mat: &Matrix, sys_vec: &Vector) -> TrussResult<Vector> {
    validate_system(sys_mat, sys_vec)?;

    let low_mat = lower_decomposition(sys_mat)?;
    let low_solution = solve_lower_system(&low_mat, sys_vec);
    Ok(solve_upper_system_transposed(&low_mat, &low_solution))
}

/// Decomposes `sys_mat` into the product of a lower triangular matrix and
/// its transpose: `[A] = [L][L]'`. Only `[L]` is returned.
///
/// A non-positive radicand on the diagonal means the matrix is not
/// positive-definite and aborts the factorization; it is never allowed to
/// propagate as NaN.
pub fn lower_decomposition(sys_mat: &Matrix) -> TrussResult<Matrix> {
    let size = sys_mat.rows();
    let mut low_mat = Matrix::new(size, size);

    for i in 0..size {
        let mut sq_sum = 0.0;

        for j in 0..=i {
            let m_ij = sys_mat.value_at(i, j);

            if i == j {
                // main diagonal value
                let radicand = m_ij - sq_sum;
                if radicand <= 0.0 {
                    return Err(TrussError::NonPositiveDefinite { row: i });
                }
                low_mat.set_value(i, j, radicand.sqrt());
            } else {
                // value under the main diagonal
                let mut non_diag_sum = 0.0;
                for k in 0..j {
                    non_diag_sum += low_mat.value_at(i, k) * low_mat.value_at(j, k);
                }

                let l_jj = low_mat.value_at(j, j);
                let value = (m_ij - non_diag_sum) / l_jj;
                sq_sum += value * value;

                low_mat.set_value(i, j, value);
            }
        }
    }

    Ok(low_mat)
}
