//! Errors reported while setting up the hierarchical element matrices.
use crate::material::MaterialError;
use std::fmt;
use std::fmt::{Display, Formatter};

/// Location of an element in the virtual hierarchy.
///
/// `level` 0 is the simulated (coarse) mesh, `level + 1` is one virtual subdivision finer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementLocation {
    pub level: usize,
    pub element: usize,
}

impl Display for ElementLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "element {} on level {}", self.element, self.level)
    }
}

/// Library-wide error type.
///
/// Every variant is fatal to initialization: effective matrices are never produced from a
/// hierarchy that failed to validate.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum HierarchyError {
    /// More virtual finer levels were requested than supported.
    TooManyVirtualLevels { requested: usize, max: usize },
    /// A finer level is required but the topology provides none.
    MissingFinerLevel { location: ElementLocation },
    /// A refined element does not have exactly 8 children.
    WrongChildCount { location: ElementLocation, count: usize },
    /// Some siblings are refined further while others are not.
    InconsistentDepth { location: ElementLocation },
    /// Node data is missing, out of range or not finite.
    InvalidNodeData { location: ElementLocation },
    /// Material parameters are rejected.
    InvalidMaterial {
        location: ElementLocation,
        reason: MaterialError,
    },
    /// An element whose Jacobian determinant is zero, negative or not finite at a quadrature
    /// point.
    ///
    /// Inside a refinement tree, `element_index` is the index of the tree record and `location`
    /// is the level and index reported by the provider.
    DegenerateElement {
        element_index: usize,
        location: Option<ElementLocation>,
        quadrature_point: usize,
        jacobian_determinant: f64,
    },
    /// Invalid quadrature configuration.
    Quadrature(hexres_quadrature::Error),
}

impl Display for HierarchyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyVirtualLevels { requested, max } => {
                write!(f, "{requested} virtual finer levels requested, at most {max} are supported")
            }
            Self::MissingFinerLevel { location } => {
                write!(f, "no finer level available for {location}")
            }
            Self::WrongChildCount { location, count } => {
                write!(f, "{location} has {count} finer children, expected 8")
            }
            Self::InconsistentDepth { location } => {
                write!(f, "{location} lacks a finer level that its siblings have")
            }
            Self::InvalidNodeData { location } => {
                write!(f, "invalid node data for {location}")
            }
            Self::InvalidMaterial { location, reason } => {
                write!(f, "invalid material for {location}: {reason}")
            }
            Self::DegenerateElement {
                element_index,
                location,
                quadrature_point,
                jacobian_determinant,
            } => {
                match location {
                    Some(location) => write!(f, "{location} (record {element_index})")?,
                    None => write!(f, "element {element_index}")?,
                }
                write!(
                    f,
                    " is degenerate: Jacobian determinant {jacobian_determinant:e} \
                     at quadrature point {quadrature_point}"
                )
            }
            Self::Quadrature(err) => write!(f, "quadrature: {err}"),
        }
    }
}

impl std::error::Error for HierarchyError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidMaterial { reason, .. } => Some(reason),
            Self::Quadrature(err) => Some(err),
            _ => None,
        }
    }
}

impl From<hexres_quadrature::Error> for HierarchyError {
    fn from(err: hexres_quadrature::Error) -> Self {
        Self::Quadrature(err)
    }
}

impl HierarchyError {
    /// Returns `true` for errors caused by geometry rather than configuration.
    pub fn is_geometric(&self) -> bool {
        matches!(self, Self::DegenerateElement { .. })
    }

    /// Attaches the hierarchy location to a degenerate element error. Other errors are returned
    /// as they are.
    pub fn at_location(self, at: ElementLocation) -> Self {
        match self {
            Self::DegenerateElement {
                element_index,
                quadrature_point,
                jacobian_determinant,
                ..
            } => Self::DegenerateElement {
                element_index,
                location: Some(at),
                quadrature_point,
                jacobian_determinant,
            },
            other => other,
        }
    }
}
