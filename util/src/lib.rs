//! Test helpers shared by the `hexres` test suites.
use nalgebra::{DMatrix, RealField, SMatrix};

/// Poor man's approx assertion for matrices
#[macro_export]
macro_rules! assert_approx_matrix_eq {
    ($x:expr, $y:expr, abstol = $tol:expr) => {{
        let diff = $x - $y;

        let max_absdiff = diff.abs().max();
        let approx_eq = max_absdiff <= $tol;

        if !approx_eq {
            println!("abstol: {:e}", $tol);
            println!("left: {}", $x);
            println!("right: {}", $y);
            println!("diff: {:e}", diff);
        }
        assert!(approx_eq);
    }};
}

#[macro_export]
macro_rules! assert_panics {
    ($e:expr) => {{
        use std::panic::catch_unwind;
        use std::stringify;
        let expr_string = stringify!($e);
        let result = catch_unwind(|| $e);
        if result.is_ok() {
            panic!("assert_panics!({}) failed.", expr_string);
        }
    }};
}

/// Largest absolute entry of `A - A^T`.
pub fn asymmetry<T: RealField + Copy, const N: usize>(matrix: &SMatrix<T, N, N>) -> T {
    (matrix - matrix.transpose()).abs().max()
}

/// Numerical rank of a symmetric matrix, counting eigenvalues above `rel_tol * max |eigenvalue|`.
pub fn symmetric_rank<const N: usize>(matrix: &SMatrix<f64, N, N>, rel_tol: f64) -> usize {
    let dynamic = DMatrix::from_column_slice(N, N, matrix.as_slice());
    let eigenvalues = dynamic.symmetric_eigenvalues();
    let largest = eigenvalues.amax();
    eigenvalues
        .iter()
        .filter(|lambda| lambda.abs() > rel_tol * largest)
        .count()
}

/// Smallest eigenvalue of a symmetric matrix.
pub fn min_symmetric_eigenvalue<const N: usize>(matrix: &SMatrix<f64, N, N>) -> f64 {
    let dynamic = DMatrix::from_column_slice(N, N, matrix.as_slice());
    dynamic.symmetric_eigenvalues().min()
}
