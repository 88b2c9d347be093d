//! Quadrature rules for the reference interval `[-1, 1]` and the reference hexahedron `[-1, 1]^3`.
//!
//! Rules are returned as plain `f64` weights and points so that they can be converted into
//! whatever scalar type the caller works with.

use std::fmt;
use std::fmt::{Display, Formatter};

pub mod tensor;
pub mod univariate;

/// Library-wide error type.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// A rule with zero points was requested.
    EmptyRule,
    /// The root finder for the requested rule did not converge.
    NoConvergence { num_points: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyRule => write!(f, "a quadrature rule needs at least one point"),
            Self::NoConvergence { num_points } => {
                write!(f, "Gauss root finding did not converge for {num_points} points")
            }
        }
    }
}

impl std::error::Error for Error {}

/// A D-dimensional point.
pub type Point<const D: usize> = [f64; D];

/// A D-dimensional rule given as `(weights, points)`.
pub type Rule<const D: usize> = (Vec<f64>, Vec<Point<D>>);

/// A one-dimensional rule.
pub type Rule1d = Rule<1>;

/// A three-dimensional rule.
pub type Rule3d = Rule<3>;

/// Approximate the integral of `f` with the given rule.
pub fn integrate<const D: usize>(rule: &Rule<D>, f: impl Fn(&Point<D>) -> f64) -> f64 {
    let (weights, points) = rule;
    weights
        .iter()
        .zip(points)
        .map(|(w, x)| w * f(x))
        .sum()
}
