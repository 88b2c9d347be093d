use itertools::Itertools;
use numeric_literals::replace_float_literals;

use crate::element::{corner_coords, phi_linear_1d, phi_linear_1d_grad};
use crate::nalgebra::{distance, Matrix3, Point3, SMatrix, SVector, Scalar, Vector3};
use crate::Real;

/// Trilinear 8-node hexahedron.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Hex8Element<T: Scalar> {
    vertices: [Point3<T>; 8],
}

impl<T> Hex8Element<T>
where
    T: Scalar,
{
    pub fn from_vertices(vertices: [Point3<T>; 8]) -> Self {
        Self { vertices }
    }

    pub fn vertices(&self) -> &[Point3<T>; 8] {
        &self.vertices
    }
}

impl<T> Hex8Element<T>
where
    T: Real,
{
    /// The reference element $[-1, 1]^3$.
    pub fn reference() -> Self {
        Self::from_vertices(std::array::from_fn(|i| Point3::from(corner_coords::<T>(i))))
    }

    /// The axis-aligned box `[min, min + extents]`.
    pub fn axis_aligned_box(min: Point3<T>, extents: Vector3<T>) -> Self {
        Self::from_vertices(std::array::from_fn(|i| {
            let [a, b, c] = corner_coords::<T>(i);
            let t = |s: T| (T::one() + s) / (T::one() + T::one());
            min + Vector3::new(t(a) * extents.x, t(b) * extents.y, t(c) * extents.z)
        }))
    }

    /// Evaluates the 8 basis functions at the reference coordinates `xi`.
    pub fn evaluate_basis(&self, xi: &Point3<T>) -> SVector<T, 8> {
        SVector::from_fn(|i, _| {
            let [a, b, c] = corner_coords::<T>(i);
            phi_linear_1d(a, xi[0]) * phi_linear_1d(b, xi[1]) * phi_linear_1d(c, xi[2])
        })
    }

    /// Gradients of the basis functions with respect to reference coordinates, one per column.
    pub fn gradients(&self, xi: &Point3<T>) -> SMatrix<T, 3, 8> {
        let columns: [Vector3<T>; 8] = std::array::from_fn(|i| {
            let [a, b, c] = corner_coords::<T>(i);
            let (pa, pb, pc) = (phi_linear_1d(a, xi[0]), phi_linear_1d(b, xi[1]), phi_linear_1d(c, xi[2]));
            Vector3::new(
                phi_linear_1d_grad(a) * pb * pc,
                pa * phi_linear_1d_grad(b) * pc,
                pa * pb * phi_linear_1d_grad(c),
            )
        });
        SMatrix::from_columns(&columns)
    }

    fn coordinate_matrix(&self) -> SMatrix<T, 3, 8> {
        SMatrix::from_fn(|i, j| self.vertices[j][i])
    }

    /// Maps reference coordinates to physical coordinates.
    #[allow(non_snake_case)]
    pub fn map_reference_coords(&self, xi: &Point3<T>) -> Point3<T> {
        let X = self.coordinate_matrix();
        Point3::from(X * self.evaluate_basis(xi))
    }

    /// The Jacobian $J = \partial x / \partial \xi$ of the reference map.
    #[allow(non_snake_case)]
    pub fn reference_jacobian(&self, xi: &Point3<T>) -> Matrix3<T> {
        let X = self.coordinate_matrix();
        X * self.gradients(xi).transpose()
    }

    /// The physical location of the reference center.
    pub fn centroid(&self) -> Point3<T> {
        self.map_reference_coords(&Point3::origin())
    }

    pub fn diameter(&self) -> T {
        self.vertices
            .iter()
            .tuple_combinations()
            .map(|(x, y)| distance(x, y))
            .fold(T::zero(), |a, b| a.max(b))
    }

    /// Returns `true` if every vertex coordinate is finite.
    pub fn is_finite(&self) -> bool {
        self.vertices
            .iter()
            .all(|v| v.iter().all(|x| x.is_finite()))
    }

    /// The child element occupying the octant of the reference cube that contains corner `child`.
    ///
    /// Corners of the child are the images of the points $(\xi_c + \xi_j) / 2$ under the trilinear
    /// map of `self`, so the eight children tile the element exactly.
    ///
    /// # Panics
    ///
    /// Panics if `child >= 8`.
    #[replace_float_literals(T::from_f64(literal).expect("Literal must fit in T"))]
    pub fn octant(&self, child: usize) -> Self {
        assert!(child < 8, "a hexahedron has exactly 8 octants");
        let c = Vector3::from(corner_coords::<T>(child));
        Self::from_vertices(std::array::from_fn(|j| {
            let xi = (c + Vector3::from(corner_coords::<T>(j))) * 0.5;
            self.map_reference_coords(&Point3::from(xi))
        }))
    }

    /// Largest distance between the vertices of `self` and of `other`, matched by node index.
    pub fn max_vertex_deviation(&self, other: &Self) -> T {
        self.vertices
            .iter()
            .zip(other.vertices())
            .map(|(a, b)| distance(a, b))
            .fold(T::zero(), |a, b| a.max(b))
    }
}
