//! Element connectivity of hexahedral meshes.
use serde::{Deserialize, Serialize};
use std::ops::Deref;

/// Global vertex indices of a trilinear hexahedron, ordered like
/// [`HEX8_REFERENCE_CORNERS`](crate::element::HEX8_REFERENCE_CORNERS).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hex8Connectivity(pub [usize; 8]);

impl Deref for Hex8Connectivity {
    type Target = [usize; 8];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
