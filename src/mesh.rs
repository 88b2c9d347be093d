//! Index-based hexahedral meshes.
use crate::connectivity::Hex8Connectivity;
use crate::element::Hex8Element;
use crate::nalgebra::{Point3, Scalar};
use crate::Real;
use serde::{Deserialize, Serialize};

pub mod procedural;

/// Conforming mesh of trilinear hexahedra.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(serialize = "T: Serialize", deserialize = "T: Deserialize<'de>"))]
pub struct HexMesh<T: Scalar> {
    vertices: Vec<Point3<T>>,
    connectivity: Vec<Hex8Connectivity>,
}

impl<T: Scalar> HexMesh<T> {
    /// Construct a mesh from vertices and connectivity.
    ///
    /// The connectivity is not checked here. Queries that need vertex data, such as
    /// [`HexMesh::element`], return `None` for out-of-bounds indices.
    pub fn from_vertices_and_connectivity(vertices: Vec<Point3<T>>, connectivity: Vec<Hex8Connectivity>) -> Self {
        Self { vertices, connectivity }
    }

    pub fn vertices(&self) -> &[Point3<T>] {
        &self.vertices
    }

    pub fn connectivity(&self) -> &[Hex8Connectivity] {
        &self.connectivity
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_elements(&self) -> usize {
        self.connectivity.len()
    }

    /// The geometry of element `index`.
    ///
    /// Returns `None` if the element does not exist or references a vertex out of bounds.
    pub fn element(&self, index: usize) -> Option<Hex8Element<T>> {
        let nodes = self.connectivity.get(index)?;
        let mut vertices = Vec::with_capacity(8);
        for &v in nodes.iter() {
            vertices.push(self.vertices.get(v)?.clone());
        }
        let vertices: [Point3<T>; 8] = vertices.try_into().ok()?;
        Some(Hex8Element::from_vertices(vertices))
    }
}

impl<T: Real> HexMesh<T> {
    /// Transform all vertices of the mesh by the given transformation function.
    pub fn transform_vertices<F>(&mut self, mut transformation: F)
    where
        F: FnMut(&mut Point3<T>),
    {
        for p in &mut self.vertices {
            transformation(p);
        }
    }
}
