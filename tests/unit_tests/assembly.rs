use hexres::assembly::ElementMatrixBuilder;
use hexres::error::HierarchyError;
use hexres::quadrature::QuadratureError;
use matrixcompare::assert_matrix_eq;

use crate::unit_tests::{test_material, unit_cube};


#[test]
fn builder_uses_two_point_gauss_by_default() {
    let builder = ElementMatrixBuilder::<f64>::new();
    assert_eq!(builder.quadrature_weights().len(), 8);
    assert_eq!(builder.quadrature_points().len(), 8);
    let weight_sum: f64 = builder.quadrature_weights().iter().sum();
    assert!((weight_sum - 8.0).abs() <= 1e-12);
}

#[test]
fn builder_rejects_empty_quadrature() {
    assert_eq!(
        ElementMatrixBuilder::<f64>::with_points_per_dim(0).unwrap_err(),
        HierarchyError::Quadrature(QuadratureError::EmptyRule)
    );
}

#[test]
fn combined_matrices_match_separate_computation() {
    let builder = ElementMatrixBuilder::new();
    let element = unit_cube();
    let material = test_material();

    let (stiffness, mass) = builder
        .compute_element_matrices(&element, &material, 0)
        .unwrap();
    let expected_stiffness = builder
        .compute_element_stiffness(&element, &material.stiffness(), 0)
        .unwrap();
    let expected_mass = builder
        .compute_element_mass(&element, material.density, 0)
        .unwrap();
    assert_eq!(stiffness, expected_stiffness);
    assert_eq!(mass, expected_mass);
}

#[test]
fn higher_order_quadrature_agrees_on_boxes() {
    // Two points per axis are already exact for boxes
    let element = unit_cube();
    let material = test_material();
    let (k2, m2) = ElementMatrixBuilder::new()
        .compute_element_matrices(&element, &material, 0)
        .unwrap();
    let (k3, m3) = ElementMatrixBuilder::with_points_per_dim(3)
        .unwrap()
        .compute_element_matrices(&element, &material, 0)
        .unwrap();
    assert_matrix_eq!(k3, k2, comp = abs, tol = 1e-9 * k2.amax());
    assert_matrix_eq!(m3, m2, comp = abs, tol = 1e-12 * m2.amax());
}
