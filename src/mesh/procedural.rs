//! Procedural box meshes.
use crate::connectivity::Hex8Connectivity;
use crate::element::HEX8_REFERENCE_CORNERS;
use crate::mesh::HexMesh;
use crate::nalgebra::{convert, Point3};
use crate::Real;
use itertools::iproduct;

/// The unit cube `[0, 1]^3` split into `cells_per_dim^3` cubes.
pub fn create_unit_box_uniform_hex_mesh<T: Real>(cells_per_dim: usize) -> HexMesh<T> {
    let cell_size = T::one() / convert(cells_per_dim.max(1) as f64);
    create_uniform_box_hex_mesh(cell_size, [cells_per_dim; 3])
}

/// The box `[0, h nx] x [0, h ny] x [0, h nz]` made of `nx ny nz` cubes with edge length `h`.
///
/// Vertices are numbered with `x` running fastest. The mesh is empty if any cell count is zero.
pub fn create_uniform_box_hex_mesh<T: Real>(cell_size: T, cells: [usize; 3]) -> HexMesh<T> {
    if cells.contains(&0) {
        return HexMesh::from_vertices_and_connectivity(Vec::new(), Vec::new());
    }

    let [nx, ny, nz] = cells.map(|n| n + 1);
    let coord = |i: usize| convert::<f64, T>(i as f64) * cell_size;
    let vertices = iproduct!(0..nz, 0..ny, 0..nx)
        .map(|(k, j, i)| Point3::new(coord(i), coord(j), coord(k)))
        .collect();

    let vertex = |[i, j, k]: [usize; 3]| (k * ny + j) * nx + i;
    let connectivity = iproduct!(0..cells[2], 0..cells[1], 0..cells[0])
        .map(|(k, j, i)| {
            Hex8Connectivity(HEX8_REFERENCE_CORNERS.map(|corner| {
                let [di, dj, dk] = corner.map(|s| usize::from(s > 0));
                vertex([i + di, j + dj, k + dk])
            }))
        })
        .collect();

    HexMesh::from_vertices_and_connectivity(vertices, connectivity)
}
