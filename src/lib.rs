//! Multiresolution stiffness and mass matrices for hexahedral finite elements.
//!
//! A coarse simulation element may stand for a region whose material is sampled at a much finer
//! resolution. `hexres` recursively subdivides such an element into *virtual finer levels*,
//! computes the element matrices of the finest virtual elements directly and homogenizes them
//! upward with a Galerkin projection $K_{\text{coarse}} = \sum_c P_c^T K_c P_c$, where $P_c$ is the
//! trilinear interpolation from the coarse corners onto the corners of child $c$.
//!
//! The main entry points are
//!
//! - [`assembly::ElementMatrixBuilder`] for the stiffness and mass of a single element,
//! - [`hierarchy::RefinementTree`] and [`hierarchy::HierarchicalRefiner`] for the recursive
//!   homogenization,
//! - [`forcefield::NonUniformHexForceField`], which caches the effective matrices of a whole
//!   coarse mesh and answers the per-step force, derivative, energy and mass queries of a host
//!   simulation.
use nalgebra::RealField;

pub mod assembly;
pub mod config;
pub mod connectivity;
pub mod element;
pub mod error;
pub mod forcefield;
pub mod hierarchy;
pub mod material;
pub mod mesh;
pub mod quadrature;

mod util;

#[cfg(feature = "proptest")]
pub mod proptest;

pub extern crate nalgebra;

/// Scalar types supported by `hexres`.
pub trait Real: RealField + Copy {}

impl<T: RealField + Copy> Real for T {}

/// Number of nodes of a trilinear hexahedron.
pub const HEX8_NODES: usize = 8;

/// Number of degrees of freedom of a trilinear hexahedron with a displacement field.
pub const HEX8_DOFS: usize = 3 * HEX8_NODES;

/// Dense matrix acting on the 24 degrees of freedom of a single hexahedron.
///
/// Degrees of freedom are ordered node by node, i.e. entry `3 * i + d` corresponds to component
/// `d` of node `i`.
pub type ElementMatrix<T> = nalgebra::SMatrix<T, HEX8_DOFS, HEX8_DOFS>;

/// Linear response of a hexahedron to nodal displacements.
pub type ElementStiffness<T> = ElementMatrix<T>;

/// Inertial distribution of a hexahedron.
pub type ElementMass<T> = ElementMatrix<T>;

/// Vector of the 24 degrees of freedom of a single hexahedron.
pub type ElementVector<T> = nalgebra::SVector<T, HEX8_DOFS>;
