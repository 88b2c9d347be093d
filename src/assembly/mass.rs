use crate::assembly::QuadraturePointGeometry;
use crate::element::Hex8Element;
use crate::nalgebra::SMatrix;
use crate::util::clone_upper_to_lower;
use crate::{ElementMass, ElementVector, Real};

/// Consistent mass matrix $M_{IJ} = I_3 \int_K \rho \\, \phi_I \phi_J \\, \mathrm{d}V$.
pub(super) fn integrate_mass<T: Real>(
    element: &Hex8Element<T>,
    density: T,
    geometry: &[QuadraturePointGeometry<T>],
) -> ElementMass<T> {
    let mut scalar_mass = SMatrix::<T, 8, 8>::zeros();
    for g in geometry {
        let phi = element.evaluate_basis(&g.point);
        scalar_mass.ger(density * g.weight * g.determinant, &phi, &phi, T::one());
    }
    clone_upper_to_lower(&mut scalar_mass);
    ElementMass::from_fn(|i, j| {
        if i % 3 == j % 3 {
            scalar_mass[(i / 3, j / 3)]
        } else {
            T::zero()
        }
    })
}

/// Row-sum lumping of a mass matrix.
///
/// The result holds the diagonal of the lumped matrix, one entry per degree of freedom. The total
/// mass of each displacement component is preserved.
pub fn lumped_mass<T: Real>(mass: &ElementMass<T>) -> ElementVector<T> {
    ElementVector::from_fn(|i, _| mass.row(i).sum())
}
