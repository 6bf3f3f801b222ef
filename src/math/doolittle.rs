//! Doolittle LU factorization for general square systems.

use super::substitution::{solve_lower_system, solve_upper_system};
use super::{validate_system, Matrix, Vector};
use crate::error::{TrussError, TrussResult};

/// Solves `[A][x] = [b]` by decomposing `[A] = [L][U]` and then running a
/// forward substitution against `[L]` followed by a backward substitution
/// against `[U]`.
pub fn doolittle_solve(sys_mat: &Matrix, sys_vec: &Vector) -> TrussResult<Vector> {
    validate_system(sys_mat, sys_vec)?;

    let (lower, upper) = doolittle_decomposition(sys_mat)?;
    let low_solution = solve_lower_system(&lower, sys_vec);
    Ok(solve_upper_system(&upper, &low_solution))
}

/// Decomposes `matrix` into the product of a lower triangular matrix with
/// unit diagonal and an upper triangular matrix: `[A] = [L][U]`.
///
/// Returns the pair `([L], [U])`. A zero pivot in `[U]` means the matrix is
/// singular and aborts the factorization.
pub fn doolittle_decomposition(matrix: &Matrix) -> TrussResult<(Matrix, Matrix)> {
    if !matrix.is_square() {
        return Err(TrussError::NonSquareMatrix {
            rows: matrix.rows(),
            cols: matrix.cols(),
        });
    }

    let size = matrix.rows();
    let mut lower = Matrix::new(size, size);
    let mut upper = Matrix::new(size, size);

    for i in 0..size {
        for j in 0..size {
            let value = matrix.value_at(i, j);

            if i <= j {
                let mut sum = 0.0;
                for k in 0..i {
                    sum += lower.value_at(i, k) * upper.value_at(k, j);
                }
                upper.set_value(i, j, value - sum);
            }

            if j <= i {
                let mut sum = 0.0;
                for k in 0..j {
                    sum += lower.value_at(i, k) * upper.value_at(k, j);
                }

                let u_jj = upper.value_at(j, j);
                if u_jj == 0.0 {
                    return Err(TrussError::SingularMatrix);
                }
                lower.set_value(i, j, (value - sum) / u_jj);
            }
        }
    }

    Ok((lower, upper))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sys_matrix() -> Matrix {
        #[rustfmt::skip]
        let data = [
             2.0, -1.0, -2.0,
            -4.0,  6.0,  3.0,
            -4.0, -2.0,  8.0,
        ];
        Matrix::from_row_slice(3, 3, &data)
    }

    #[test]
    fn lower_decomposition() {
        let (lower, _) = doolittle_decomposition(&sys_matrix()).unwrap();
        #[rustfmt::skip]
        let expected = Matrix::from_row_slice(3, 3, &[
             1.0,  0.0, 0.0,
            -2.0,  1.0, 0.0,
            -2.0, -1.0, 1.0,
        ]);
        assert_eq!(expected, lower);
    }

    #[test]
    fn upper_decomposition() {
        let (_, upper) = doolittle_decomposition(&sys_matrix()).unwrap();
        #[rustfmt::skip]
        let expected = Matrix::from_row_slice(3, 3, &[
            2.0, -1.0, -2.0,
            0.0,  4.0, -1.0,
            0.0,  0.0,  3.0,
        ]);
        assert_eq!(expected, upper);
    }

    #[test]
    fn lower_factor_has_unit_diagonal() {
        let (lower, _) = doolittle_decomposition(&sys_matrix()).unwrap();
        for i in 0..3 {
            assert_eq!(lower.value_at(i, i), 1.0);
        }
    }

    #[test]
    fn solve_system() {
        let vector = Vector::from_slice(&[-6.0, 17.0, 16.0]);
        let solution = doolittle_solve(&sys_matrix(), &vector).unwrap();
        assert_eq!(solution, Vector::from_slice(&[1.0, 2.0, 3.0]));
    }

    #[test]
    fn non_square_matrix_is_rejected() {
        let result = doolittle_decomposition(&Matrix::new(2, 3));
        assert!(matches!(result, Err(TrussError::NonSquareMatrix { .. })));
    }

    #[test]
    fn zero_pivot_is_rejected() {
        #[rustfmt::skip]
        let matrix = Matrix::from_row_slice(2, 2, &[
            0.0, 1.0,
            1.0, 0.0,
        ]);
        let result = doolittle_decomposition(&matrix);
        assert!(matches!(result, Err(TrussError::SingularMatrix)));
    }
}
