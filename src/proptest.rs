//! Strategies for property-based testing with `proptest`.
use crate::element::Hex8Element;
use crate::material::ElementMaterial;
use ::proptest::prelude::*;
use nalgebra::{Point3, UnitQuaternion, Vector3};

pub fn point3() -> impl Strategy<Value = Point3<f64>> {
    // Pick a reasonably small range to pick coordinates from,
    // otherwise we can easily get floating point numbers that are
    // so ridiculously large as to break anything we might want to do with them
    let range = -10.0..10.0;
    [range.clone(), range.clone(), range.clone()].prop_map(|[x, y, z]| Point3::new(x, y, z))
}

fn vector3(range: std::ops::Range<f64>) -> impl Strategy<Value = Vector3<f64>> {
    [range.clone(), range.clone(), range].prop_map(Vector3::from)
}

/// Axis-aligned boxes with extents in `[0.1, 5]`, translated anywhere in `[-10, 10]^3`.
pub fn axis_aligned_hex8() -> impl Strategy<Value = Hex8Element<f64>> {
    (point3(), vector3(0.1..5.0)).prop_map(|(min, extents)| Hex8Element::axis_aligned_box(min, extents))
}

/// Rotated boxes whose vertices are perturbed by at most a tenth of the smallest extent.
///
/// The perturbation is small enough that the Jacobian stays diagonally dominant in the box frame,
/// so every generated element has a positive Jacobian determinant everywhere.
pub fn distorted_hex8() -> impl Strategy<Value = Hex8Element<f64>> {
    let perturbations = proptest::collection::vec(vector3(-1.0..1.0), 8);
    (axis_aligned_hex8(), vector3(-3.0..3.0), perturbations).prop_map(|(hex, rotation, perturbations)| {
        let rotation = UnitQuaternion::from_scaled_axis(rotation);
        let extents = hex.vertices()[6] - hex.vertices()[0];
        let radius = 0.1 * extents.min() / 3.0_f64.sqrt();
        let centroid = hex.centroid();
        let mut vertices = *hex.vertices();
        for (v, p) in vertices.iter_mut().zip(&perturbations) {
            *v = centroid + rotation * (*v - centroid + p * radius);
        }
        Hex8Element::from_vertices(vertices)
    })
}

impl Arbitrary for Hex8Element<f64> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        distorted_hex8().boxed()
    }
}

impl Arbitrary for ElementMaterial<f64> {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (1.0..1e6, -0.9..0.49, 0.0..1e4)
            .prop_map(|(young, poisson, density)| ElementMaterial::new(young, poisson, density))
            .boxed()
    }
}
