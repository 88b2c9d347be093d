//! Virtual finer levels and the homogenization of their element matrices.
//!
//! A coarse element with $N$ virtual finer levels is the root of a tree of depth $N$ in which
//! every non-leaf record has exactly 8 children, one per octant of its reference cube. Leaf
//! matrices are computed directly by [`ElementMatrixBuilder`](crate::assembly::ElementMatrixBuilder);
//! every other matrix is the Galerkin projection of its children's matrices,
//! $$
//! K = \sum_{c=0}^{7} P_c^T K_c P_c,
//! $$
//! where $P_c$ interpolates the coarse corner displacements trilinearly onto the corners of child
//! $c$ (see [`FINE_TO_COARSE`]).
//!
//! Trees are stored as arenas ([`RefinementTree`]) and built once from a
//! [`FinerLevelProvider`]; the recursive assembly lives in [`HierarchicalRefiner`].

mod interpolation;
mod provider;
mod refiner;
mod tree;

pub use interpolation::*;
pub use provider::*;
pub use refiner::*;
pub use tree::*;

/// Largest supported number of virtual finer levels.
///
/// Each level multiplies the number of leaf elements by 8, so a single coarse element with this
/// many levels already has 262144 leaves.
pub const MAX_VIRTUAL_FINER_LEVELS: usize = 6;
