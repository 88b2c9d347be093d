use crate::element::HEX8_REFERENCE_CORNERS;
use crate::nalgebra::convert;
use crate::{ElementMatrix, ElementVector, Real};

const fn compute_fine_to_coarse() -> [[[u8; 8]; 8]; 8] {
    let mut table = [[[0u8; 8]; 8]; 8];
    let mut child = 0;
    while child < 8 {
        let mut fine = 0;
        while fine < 8 {
            let mut coarse = 0;
            while coarse < 8 {
                let mut weight = 1u8;
                let mut d = 0;
                while d < 3 {
                    // Twice the reference coordinate of the fine corner, one of -2, 0, 2
                    let x = HEX8_REFERENCE_CORNERS[child][d] + HEX8_REFERENCE_CORNERS[fine][d];
                    // Twice the 1D linear basis function of the coarse corner, one of 0, 1, 2
                    let factor = 1 + HEX8_REFERENCE_CORNERS[coarse][d] * x / 2;
                    weight *= factor as u8;
                    d += 1;
                }
                table[child][fine][coarse] = weight;
                coarse += 1;
            }
            fine += 1;
        }
        child += 1;
    }
    table
}

/// Trilinear interpolation weights from coarse corners to the corners of each child, in eighths.
///
/// `FINE_TO_COARSE[c][f][k] / 8` is the value of the basis function of coarse corner `k`
/// at corner `f` of child `c`, where child `c` is the octant of the coarse reference cube that
/// contains coarse corner `c`. All indices follow
/// [`HEX8_REFERENCE_CORNERS`](crate::element::HEX8_REFERENCE_CORNERS).
///
/// Each entry is one of 0, 1, 2, 4 or 8 and every row `FINE_TO_COARSE[c][f]` sums to 8.
pub static FINE_TO_COARSE: [[[u8; 8]; 8]; 8] = compute_fine_to_coarse();

/// The weight of coarse corner `coarse` at corner `fine` of child `child`.
#[inline]
pub fn fine_to_coarse_weight<T: Real>(child: usize, fine: usize, coarse: usize) -> T {
    convert(f64::from(FINE_TO_COARSE[child][fine][coarse]) / 8.0)
}

/// The prolongation matrix $P_c$ mapping the 24 coarse degrees of freedom to the 24 degrees of
/// freedom of child `child`.
///
/// # Panics
///
/// Panics if `child >= 8`.
pub fn prolongation_matrix<T: Real>(child: usize) -> ElementMatrix<T> {
    assert!(child < 8, "child slot must be in 0..8");
    ElementMatrix::from_fn(|i, j| {
        if i % 3 == j % 3 {
            fine_to_coarse_weight(child, i / 3, j / 3)
        } else {
            T::zero()
        }
    })
}

/// Interpolates a coarse displacement onto the corners of child `child`.
pub fn interpolate_coarse_to_fine<T: Real>(coarse: &ElementVector<T>, child: usize) -> ElementVector<T> {
    prolongation_matrix(child) * coarse
}

/// Accumulates $P_c^T F P_c$ into `coarse`, where $F$ is the matrix `fine` of child `child`.
///
/// This is a congruence transform, so the accumulated matrix stays symmetric (and positive
/// semi-definite) whenever `fine` is.
///
/// # Panics
///
/// Panics if `child >= 8`.
pub fn add_fine_to_coarse<T: Real>(coarse: &mut ElementMatrix<T>, fine: &ElementMatrix<T>, child: usize) {
    let p = prolongation_matrix::<T>(child);
    let fine_p = fine * &p;
    coarse.gemm_tr(T::one(), &p, &fine_p, T::one());
}
