//! Dense linear algebra backing the structural solver
//!
//! The global stiffness system of a truss is small and dense once the
//! constrained degrees of freedom are eliminated, so the matrices here use
//! plain row-major storage. Three solvers are provided: Cholesky (the one
//! the structural core uses), Doolittle LU and conjugate gradient.

pub mod cholesky;
pub mod conjugate_gradient;
pub mod doolittle;
pub mod matrix;
pub mod substitution;
pub mod vector;

pub use cholesky::{cholesky_solve, lower_decomposition};
pub use conjugate_gradient::{
    conjugate_gradient_solve, conjugate_gradient_solve_with, DEFAULT_MAX_ERROR,
    DEFAULT_MAX_ITERATIONS,
};
pub use doolittle::{doolittle_decomposition, doolittle_solve};
pub use matrix::Matrix;
pub use substitution::{solve_lower_system, solve_upper_system, solve_upper_system_transposed};
pub use vector::Vector;

use crate::error::{TrussError, TrussResult};

/// Ensures the system matrix and vector sizes match and the matrix is square.
///
/// Every solver calls this before doing any numeric work.
pub(crate) fn validate_system(sys_mat: &Matrix, sys_vec: &Vector) -> TrussResult<()> {
    if sys_mat.cols() != sys_vec.length() {
        return Err(TrussError::SizeMismatch {
            cols: sys_mat.cols(),
            len: sys_vec.length(),
        });
    }

    if !sys_mat.is_square() {
        return Err(TrussError::NonSquareMatrix {
            rows: sys_mat.rows(),
            cols: sys_mat.cols(),
        });
    }

    Ok(())
}
