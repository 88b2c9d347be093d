//! The trilinear hexahedron and its reference-domain conventions.
use crate::Real;
use numeric_literals::replace_float_literals;

mod hexahedron;

pub use hexahedron::*;

/// Corners of the reference hexahedron $[-1, 1]^3$ in the canonical node order.
///
/// ```text
///        7-------6
///       /|      /|
///      / |     / |
///     4-------5  |
///     |  3----|--2
///     | /     | /
///     |/      |/
///     0-------1
/// ```
///
/// The same order is used for the children of a subdivided element: child `c` is the octant of
/// the reference cube that contains corner `c`.
pub const HEX8_REFERENCE_CORNERS: [[i8; 3]; 8] = [
    [-1, -1, -1],
    [1, -1, -1],
    [1, 1, -1],
    [-1, 1, -1],
    [-1, -1, 1],
    [1, -1, 1],
    [1, 1, 1],
    [-1, 1, 1],
];

/// Linear basis function on the interval [-1, 1].
///
/// `alpha` is the coordinate of the node the function is associated with.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
#[inline(always)]
pub(crate) fn phi_linear_1d<T: Real>(alpha: T, xi: T) -> T {
    (1.0 + alpha * xi) / 2.0
}

/// Derivative of [`phi_linear_1d`] with respect to `xi`.
#[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
#[inline(always)]
pub(crate) fn phi_linear_1d_grad<T: Real>(alpha: T) -> T {
    alpha / 2.0
}

pub(crate) fn corner_coords<T: Real>(corner: usize) -> [T; 3] {
    HEX8_REFERENCE_CORNERS[corner].map(|s| T::from_i8(s).expect("Corner sign must fit in T"))
}
