use crate::assembly::QuadraturePointGeometry;
use crate::element::Hex8Element;
use crate::material::MaterialStiffness;
use crate::nalgebra::{SMatrix, Vector3};
use crate::util::clone_upper_to_lower;
use crate::{ElementStiffness, Real};

/// Strain-displacement matrix mapping the 24 nodal displacements to Voigt strains.
#[allow(non_snake_case)]
pub(crate) fn strain_displacement_matrix<T: Real>(physical_gradients: &SMatrix<T, 3, 8>) -> SMatrix<T, 6, 24> {
    let mut B = SMatrix::<T, 6, 24>::zeros();
    for (i, g) in physical_gradients.column_iter().enumerate() {
        let g: Vector3<T> = g.clone_owned();
        let c = 3 * i;
        B[(0, c)] = g.x;
        B[(1, c + 1)] = g.y;
        B[(2, c + 2)] = g.z;
        // Engineering shear strains
        B[(3, c)] = g.y;
        B[(3, c + 1)] = g.x;
        B[(4, c + 1)] = g.z;
        B[(4, c + 2)] = g.y;
        B[(5, c)] = g.z;
        B[(5, c + 2)] = g.x;
    }
    B
}

#[allow(non_snake_case)]
pub(super) fn integrate_stiffness<T: Real>(
    element: &Hex8Element<T>,
    material: &MaterialStiffness<T>,
    geometry: &[QuadraturePointGeometry<T>],
) -> ElementStiffness<T> {
    let D = material.tensor();
    let mut K = ElementStiffness::zeros();
    for g in geometry {
        let G = g.inverse_transpose * element.gradients(&g.point);
        let B = strain_displacement_matrix(&G);
        let DB = D * &B;
        K.gemm_tr(g.weight * g.determinant, &B, &DB, T::one());
    }
    // Exact symmetry regardless of round-off in the products above
    clone_upper_to_lower(&mut K);
    K
}
