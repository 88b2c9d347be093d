use crate::nalgebra::storage::StorageMut;
use crate::nalgebra::{Dim, Matrix, Scalar, Vector3};
use crate::{ElementVector, Real};

/// Clones the upper triangle entries into the lower triangle entries.
///
/// The primary use case for this is to construct a full symmetric matrix from a symmetric
/// matrix represented only by its upper triangular entries.
pub(crate) fn clone_upper_to_lower<T, R, C, S>(matrix: &mut Matrix<T, R, C, S>)
where
    T: Scalar,
    R: Dim,
    C: Dim,
    S: StorageMut<T, R, C>,
{
    for j in 0..matrix.ncols() {
        for i in (j + 1)..matrix.nrows() {
            matrix[(i, j)] = matrix[(j, i)].clone();
        }
    }
}

/// Collects the per-node vectors of one element into a single element vector.
pub(crate) fn gather_element_vector<T: Real>(global: &[Vector3<T>], nodes: &[usize; 8]) -> ElementVector<T> {
    let mut local = ElementVector::zeros();
    for (i_local, &i_global) in nodes.iter().enumerate() {
        local
            .fixed_rows_mut::<3>(3 * i_local)
            .copy_from(&global[i_global]);
    }
    local
}

/// Adds `scale * local` to the per-node vectors referenced by `nodes`.
pub(crate) fn scatter_add_element_vector<T: Real>(
    global: &mut [Vector3<T>],
    nodes: &[usize; 8],
    local: &ElementVector<T>,
    scale: T,
) {
    for (i_local, &i_global) in nodes.iter().enumerate() {
        global[i_global] += local.fixed_rows::<3>(3 * i_local) * scale;
    }
}
