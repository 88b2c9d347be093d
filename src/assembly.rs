//! Direct computation of element stiffness and mass matrices for a single hexahedron.
//!
//! This is the leaf case of the hierarchical assembly: the element is treated as filled with a
//! homogeneous material and its matrices follow from geometry and material alone.
use crate::element::Hex8Element;
use crate::error::HierarchyError;
use crate::material::{ElementMaterial, MaterialStiffness};
use crate::nalgebra::{Matrix3, Point3, Scalar};
use crate::quadrature::{hexahedron_gauss, try_hexahedron_gauss, QuadraturePair3d};
use crate::{ElementMass, ElementStiffness, Real};
use log::warn;

mod mass;
mod stiffness;

pub use mass::lumped_mass;

/// Elements whose smallest Jacobian determinant is below this fraction of the largest one are
/// reported as ill-conditioned.
pub const ILL_CONDITIONED_DETERMINANT_RATIO: f64 = 1e-3;

/// Computes leaf element matrices with a fixed quadrature rule.
///
/// The builder holds no state besides the quadrature rule, so the same inputs always produce the
/// same matrices and a single builder can be shared between threads.
#[derive(Debug, Clone)]
pub struct ElementMatrixBuilder<T: Scalar> {
    weights: Vec<T>,
    points: Vec<Point3<T>>,
}

impl<T: Real> Default for ElementMatrixBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Jacobian data at a single quadrature point.
pub(crate) struct QuadraturePointGeometry<T: Scalar> {
    pub weight: T,
    pub point: Point3<T>,
    /// $|J|$ at the point.
    pub determinant: T,
    /// $J^{-T}$, mapping reference gradients to physical gradients.
    pub inverse_transpose: Matrix3<T>,
}

impl<T: Real> ElementMatrixBuilder<T> {
    /// A builder using 2x2x2 Gauss quadrature.
    pub fn new() -> Self {
        Self::with_quadrature(hexahedron_gauss(2))
    }

    /// A builder using a tensor Gauss rule with `num_points_per_dim` points per axis.
    pub fn with_points_per_dim(num_points_per_dim: usize) -> Result<Self, HierarchyError> {
        Ok(Self::with_quadrature(try_hexahedron_gauss(num_points_per_dim)?))
    }

    /// A builder using an arbitrary quadrature rule on the reference hexahedron.
    ///
    /// # Panics
    ///
    /// Panics if weights and points have different lengths.
    pub fn with_quadrature(quadrature: QuadraturePair3d<T>) -> Self {
        let (weights, points) = quadrature;
        assert_eq!(weights.len(), points.len(), "quadrature weights and points must have the same length");
        Self { weights, points }
    }

    pub fn quadrature_weights(&self) -> &[T] {
        &self.weights
    }

    pub fn quadrature_points(&self) -> &[Point3<T>] {
        &self.points
    }

    /// Evaluates and validates the Jacobian at every quadrature point.
    ///
    /// A non-positive or non-finite determinant is an error. A valid but strongly varying
    /// determinant is logged as a warning.
    pub(crate) fn quadrature_geometry(
        &self,
        element: &Hex8Element<T>,
        element_index: usize,
    ) -> Result<Vec<QuadraturePointGeometry<T>>, HierarchyError> {
        let degenerate = |quadrature_point: usize, det: T| HierarchyError::DegenerateElement {
            element_index,
            location: None,
            quadrature_point,
            jacobian_determinant: det.to_subset().unwrap_or(f64::NAN),
        };

        let mut geometry = Vec::with_capacity(self.points.len());
        for (q, (&weight, xi)) in self.weights.iter().zip(&self.points).enumerate() {
            let j = element.reference_jacobian(xi);
            let determinant = j.determinant();
            if !determinant.is_finite() || determinant <= T::zero() {
                return Err(degenerate(q, determinant));
            }
            let inverse_transpose = j
                .try_inverse()
                .ok_or_else(|| degenerate(q, determinant))?
                .transpose();
            geometry.push(QuadraturePointGeometry {
                weight,
                point: *xi,
                determinant,
                inverse_transpose,
            });
        }

        let (min_det, max_det) = geometry
            .iter()
            .fold((T::max_value().unwrap_or_else(T::one), T::zero()), |(lo, hi), g| {
                (lo.min(g.determinant), hi.max(g.determinant))
            });
        let ratio_threshold: T = crate::nalgebra::convert(ILL_CONDITIONED_DETERMINANT_RATIO);
        if !geometry.is_empty() && min_det < ratio_threshold * max_det {
            warn!(
                "Element {element_index} is ill-conditioned: Jacobian determinant varies from {min_det} to {max_det}"
            );
        }

        Ok(geometry)
    }

    /// Computes the stiffness matrix $K = \int_K B^T D B \\, \mathrm{d}V$ of a single element.
    ///
    /// `element_index` only identifies the element in errors and diagnostics.
    pub fn compute_element_stiffness(
        &self,
        element: &Hex8Element<T>,
        material: &MaterialStiffness<T>,
        element_index: usize,
    ) -> Result<ElementStiffness<T>, HierarchyError> {
        let geometry = self.quadrature_geometry(element, element_index)?;
        Ok(stiffness::integrate_stiffness(element, material, &geometry))
    }

    /// Computes the consistent mass matrix of a single element with uniform `density`.
    pub fn compute_element_mass(
        &self,
        element: &Hex8Element<T>,
        density: T,
        element_index: usize,
    ) -> Result<ElementMass<T>, HierarchyError> {
        let geometry = self.quadrature_geometry(element, element_index)?;
        Ok(mass::integrate_mass(element, density, &geometry))
    }

    /// Computes stiffness and mass of a single element, evaluating the geometry once.
    pub fn compute_element_matrices(
        &self,
        element: &Hex8Element<T>,
        material: &ElementMaterial<T>,
        element_index: usize,
    ) -> Result<(ElementStiffness<T>, ElementMass<T>), HierarchyError> {
        let geometry = self.quadrature_geometry(element, element_index)?;
        let stiffness = stiffness::integrate_stiffness(element, &material.stiffness(), &geometry);
        let mass = mass::integrate_mass(element, material.density, &geometry);
        Ok((stiffness, mass))
    }

    /// Computes the volume of the element with this builder's quadrature.
    pub fn compute_volume(&self, element: &Hex8Element<T>, element_index: usize) -> Result<T, HierarchyError> {
        let geometry = self.quadrature_geometry(element, element_index)?;
        Ok(geometry
            .iter()
            .fold(T::zero(), |v, g| v + g.weight * g.determinant))
    }
}
