//! Quadrature rules for the reference hexahedron, converted to the scalar type in use.
use crate::nalgebra::{convert, Point3};
use crate::Real;

pub use hexres_quadrature::Error as QuadratureError;

pub type QuadraturePair3d<T> = (Vec<T>, Vec<Point3<T>>);

fn convert_quadrature_rule_from_3d_f64<T: Real>(rule: hexres_quadrature::Rule3d) -> QuadraturePair3d<T> {
    let (weights, points) = rule;
    let weights = weights.into_iter().map(convert).collect();
    let points = points
        .into_iter()
        .map(|[x, y, z]| Point3::new(convert(x), convert(y), convert(z)))
        .collect();
    (weights, points)
}

/// Tensor-product Gauss rule with `num_points_per_dim` points per axis.
///
/// With two points per axis, element matrices of trilinear hexahedra with parallelepiped
/// geometry are integrated exactly.
pub fn try_hexahedron_gauss<T: Real>(num_points_per_dim: usize) -> Result<QuadraturePair3d<T>, QuadratureError> {
    hexres_quadrature::tensor::try_hexahedron_gauss(num_points_per_dim).map(convert_quadrature_rule_from_3d_f64)
}

/// Tensor-product Gauss rule with `num_points_per_dim` points per axis.
///
/// # Panics
///
/// Panics if `num_points_per_dim` is zero.
pub fn hexahedron_gauss<T: Real>(num_points_per_dim: usize) -> QuadraturePair3d<T> {
    convert_quadrature_rule_from_3d_f64(hexres_quadrature::tensor::hexahedron_gauss(num_points_per_dim))
}
