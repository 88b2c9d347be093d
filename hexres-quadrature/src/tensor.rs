//! Tensor-product rules for the reference hexahedron.

use crate::univariate::try_gauss;
use crate::{Error, Rule};

/// A Gauss rule for the reference hexahedron `[-1, 1]^3`.
///
/// The rule has `n^3` points, with the x coordinate varying slowest.
pub fn try_hexahedron_gauss(num_points_per_dim: usize) -> Result<Rule<3>, Error> {
    let (w1d, x1d) = try_gauss(num_points_per_dim)?;
    let n = w1d.len();
    let mut weights = Vec::with_capacity(n * n * n);
    let mut points = Vec::with_capacity(n * n * n);

    for i in 0..n {
        for j in 0..n {
            for k in 0..n {
                weights.push(w1d[i] * w1d[j] * w1d[k]);
                points.push([x1d[i][0], x1d[j][0], x1d[k][0]]);
            }
        }
    }

    Ok((weights, points))
}

/// A Gauss rule for the reference hexahedron `[-1, 1]^3`.
///
/// # Panics
///
/// Panics if zero points per dimension are requested.
pub fn hexahedron_gauss(num_points_per_dim: usize) -> Rule<3> {
    try_hexahedron_gauss(num_points_per_dim).expect("number of points must be positive")
}
