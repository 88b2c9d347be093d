//! Gauss-Legendre rules for the interval `[-1, 1]`.

use crate::{Error, Rule};
use std::f64::consts::PI;

const MAX_NEWTON_ITERATIONS: usize = 100;

/// Evaluates the Legendre polynomial `P_n` and its derivative at `x`.
///
/// The derivative formula is singular at `|x| == 1`, so only the open interval is supported.
fn legendre(n: usize, x: f64) -> (f64, f64) {
    // Bonnet's recursion: k P_k = (2k - 1) x P_{k-1} - (k - 1) P_{k-2}
    let (mut p_k, mut p_km1) = (1.0, 0.0);
    for k in 1..=n {
        let k = k as f64;
        let p_next = ((2.0 * k - 1.0) * x * p_k - (k - 1.0) * p_km1) / k;
        p_km1 = p_k;
        p_k = p_next;
    }
    let dp = n as f64 * (x * p_k - p_km1) / (x * x - 1.0);
    (p_k, dp)
}

/// Gauss quadrature with `num_points` points on `[-1, 1]`.
///
/// The rule integrates polynomials of degree up to `2 n - 1` exactly. Points are returned in
/// ascending order.
pub fn try_gauss(num_points: usize) -> Result<Rule<1>, Error> {
    let n = num_points;
    if n == 0 {
        return Err(Error::EmptyRule);
    }

    let mut nodes = vec![0.0; n];
    let mut weights = vec![0.0; n];

    // Roots are symmetric about the origin, so only the upper half is computed
    for i in 0..(n + 1) / 2 {
        let mut x = (PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();
        let mut converged = false;
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let (p, dp) = legendre(n, x);
            let dx = p / dp;
            x -= dx;
            if dx.abs() <= 1e-14 {
                converged = true;
                break;
            }
        }
        if !converged {
            return Err(Error::NoConvergence { num_points: n });
        }

        let (_, dp) = legendre(n, x);
        let w = 2.0 / ((1.0 - x * x) * dp * dp);
        nodes[n - 1 - i] = x;
        weights[n - 1 - i] = w;
        nodes[i] = -x;
        weights[i] = w;
    }

    Ok((weights, nodes.into_iter().map(|x| [x]).collect()))
}

/// Gauss quadrature with `num_points` points on `[-1, 1]`.
///
/// # Panics
///
/// Panics if zero points are requested.
pub fn gauss(num_points: usize) -> Rule<1> {
    try_gauss(num_points).expect("number of points must be positive")
}
