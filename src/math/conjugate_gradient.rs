//! Iterative conjugate-gradient solver.

use super::{validate_system, Matrix, Vector};
use crate::error::{TrussError, TrussResult};

/// Default cap on the number of iterations.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Default per-component residual bound accepted as convergence.
pub const DEFAULT_MAX_ERROR: f64 = 1e-8;

/// Solves `[A][x] = [b]` iteratively with the default iteration cap and
/// residual bound.
pub fn conjugate_gradient_solve(sys_mat: &Matrix, sys_vec: &Vector) -> TrussResult<Vector> {
    conjugate_gradient_solve_with(sys_mat, sys_vec, DEFAULT_MAX_ITERATIONS, DEFAULT_MAX_ERROR)
}

/// Solves `[A][x] = [b]` iteratively, starting from the zero vector.
///
/// The solution is accepted once every residual component's absolute value
/// is within `max_error`. Exhausting `max_iterations` without converging is
/// an error carrying the iteration cap.
pub fn conjugate_gradient_solve_with(
    sys_mat: &Matrix,
    sys_vec: &Vector,
    max_iterations: usize,
    max_error: f64,
) -> TrussResult<Vector> {
    validate_system(sys_mat, sys_vec)?;

    let mut solution = Vector::new(sys_vec.length());
    let mut residual = sys_vec - &sys_mat.times_vector(&solution);
    let mut direction = residual.clone();

    for _ in 0..max_iterations {
        if converged(&residual, max_error) {
            return Ok(solution);
        }

        let mat_times_dir = sys_mat.times_vector(&direction);
        let alpha = (&residual * &residual).sum() / (&direction * &mat_times_dir).sum();

        solution = &solution + &direction.scaled(alpha);

        let old_residual = residual.clone();
        residual = &residual - &mat_times_dir.scaled(alpha);

        let beta = (&residual * &residual).sum() / (&old_residual * &old_residual).sum();
        direction = &residual + &direction.scaled(beta);
    }

    Err(TrussError::ConvergenceFailure(max_iterations))
}

fn converged(residual: &Vector, max_error: f64) -> bool {
    (0..residual.length()).all(|i| residual.value_at(i).abs() <= max_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::cholesky_solve;
    use approx::assert_relative_eq;

    fn sys_matrix() -> Matrix {
        #[rustfmt::skip]
        let data = [
             4.0, -2.0,  4.0,  2.0,
            -2.0, 10.0, -2.0, -7.0,
             4.0, -2.0,  8.0,  4.0,
             2.0, -7.0,  4.0,  7.0,
        ];
        Matrix::from_row_slice(4, 4, &data)
    }

    fn sys_vector() -> Vector {
        Vector::from_slice(&[20.0, -16.0, 40.0, 28.0])
    }

    #[test]
    fn solve_system() {
        let solution = conjugate_gradient_solve(&sys_matrix(), &sys_vector()).unwrap();
        assert_eq!(solution, Vector::from_slice(&[1.0, 2.0, 3.0, 4.0]));
    }

    #[test]
    fn agrees_with_cholesky() {
        let direct = cholesky_solve(&sys_matrix(), &sys_vector()).unwrap();
        let iterative = conjugate_gradient_solve(&sys_matrix(), &sys_vector()).unwrap();

        for i in 0..direct.length() {
            assert_relative_eq!(
                direct.value_at(i),
                iterative.value_at(i),
                epsilon = 1e-6
            );
        }
    }

    #[test]
    fn exhausting_iterations_fails() {
        let result = conjugate_gradient_solve_with(&sys_matrix(), &sys_vector(), 1, 1e-8);
        assert!(matches!(result, Err(TrussError::ConvergenceFailure(1))));
    }

    #[test]
    fn zero_vector_converges_immediately() {
        let solution =
            conjugate_gradient_solve_with(&sys_matrix(), &Vector::new(4), 1, 1e-8).unwrap();
        assert_eq!(solution, Vector::new(4));
    }

    #[test]
    fn size_mismatch_is_rejected_before_iterating() {
        let result = conjugate_gradient_solve(&sys_matrix(), &Vector::new(3));
        assert!(matches!(result, Err(TrussError::SizeMismatch { .. })));
    }
}
