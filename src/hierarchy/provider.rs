use crate::element::Hex8Element;
use crate::error::{ElementLocation, HierarchyError};
use crate::material::ElementMaterial;
use crate::mesh::HexMesh;
use crate::nalgebra::{Point3, Scalar};
use crate::Real;

/// Geometry and material of one element at some level of the hierarchy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ElementDescriptor<T: Scalar> {
    pub element: Hex8Element<T>,
    pub material: ElementMaterial<T>,
}

/// A finer-level element together with its index in the finer level.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FinerElement<T: Scalar> {
    pub index: usize,
    pub descriptor: ElementDescriptor<T>,
}

/// Source of virtual finer levels, e.g. a sparse voxel grid with several resolutions.
///
/// Level 0 is the simulated mesh. For an element at `level`, the provider returns the elements
/// of `level + 1` that subdivide it, ordered by octant (see
/// [`HEX8_REFERENCE_CORNERS`](crate::element::HEX8_REFERENCE_CORNERS)), or `None` if the element
/// has no finer level.
pub trait FinerLevelProvider<T: Scalar> {
    fn finer_level(&self, level: usize, element_index: usize) -> Result<Option<Vec<FinerElement<T>>>, HierarchyError>;

    /// Material of a coarse (level 0) element, if the provider knows it.
    fn coarse_material(&self, element_index: usize, element: &Hex8Element<T>) -> Option<ElementMaterial<T>> {
        let _ = (element_index, element);
        None
    }
}

/// A provider without any finer levels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NoFinerLevels;

impl<T: Scalar> FinerLevelProvider<T> for NoFinerLevels {
    fn finer_level(&self, _level: usize, _element_index: usize) -> Result<Option<Vec<FinerElement<T>>>, HierarchyError> {
        Ok(None)
    }
}

/// A spatially varying material.
///
/// Implemented by closures `Fn(&Point3<T>) -> ElementMaterial<T>` and by [`ElementMaterial`]
/// itself, which is a constant field.
pub trait MaterialField<T: Scalar> {
    fn sample(&self, point: &Point3<T>) -> ElementMaterial<T>;
}

impl<T, F> MaterialField<T> for F
where
    T: Scalar,
    F: Fn(&Point3<T>) -> ElementMaterial<T>,
{
    fn sample(&self, point: &Point3<T>) -> ElementMaterial<T> {
        self(point)
    }
}

impl<T: Real> MaterialField<T> for ElementMaterial<T> {
    fn sample(&self, _point: &Point3<T>) -> ElementMaterial<T> {
        *self
    }
}

/// Uniform octree subdivision of a coarse mesh with materials sampled from a field.
///
/// Every element is subdivided geometrically into its 8 octants, to any depth. The material of
/// each element is the field evaluated at the element centroid, so the field is effectively
/// sampled at the resolution of the finest virtual level. Elements of level `l + 1` are numbered
/// `8 * parent + child`.
#[derive(Clone, Debug)]
pub struct OctreeSubdivision<T: Scalar, F> {
    coarse: Vec<Hex8Element<T>>,
    material_field: F,
}

impl<T, F> OctreeSubdivision<T, F>
where
    T: Real,
    F: MaterialField<T>,
{
    pub fn new(coarse: Vec<Hex8Element<T>>, material_field: F) -> Self {
        Self { coarse, material_field }
    }

    /// Subdivides the elements of `mesh`.
    ///
    /// Returns `None` if the mesh connectivity references vertices out of bounds.
    pub fn from_mesh(mesh: &HexMesh<T>, material_field: F) -> Option<Self> {
        let coarse = (0..mesh.num_elements())
            .map(|i| mesh.element(i))
            .collect::<Option<Vec<_>>>()?;
        Some(Self::new(coarse, material_field))
    }

    pub fn coarse_elements(&self) -> &[Hex8Element<T>] {
        &self.coarse
    }

    /// The geometry of element `index` on `level`.
    pub fn element_at(&self, level: usize, index: usize) -> Option<Hex8Element<T>> {
        let per_coarse = 8usize.checked_pow(u32::try_from(level).ok()?)?;
        let mut element = *self.coarse.get(index / per_coarse)?;
        let mut path = index % per_coarse;
        let mut stride = per_coarse;
        while stride > 1 {
            stride /= 8;
            element = element.octant(path / stride);
            path %= stride;
        }
        Some(element)
    }

    fn describe(&self, element: Hex8Element<T>) -> ElementDescriptor<T> {
        let material = self.material_field.sample(&element.centroid());
        ElementDescriptor { element, material }
    }
}

impl<T, F> FinerLevelProvider<T> for OctreeSubdivision<T, F>
where
    T: Real,
    F: MaterialField<T>,
{
    fn finer_level(&self, level: usize, element_index: usize) -> Result<Option<Vec<FinerElement<T>>>, HierarchyError> {
        let parent = self
            .element_at(level, element_index)
            .ok_or(HierarchyError::InvalidNodeData {
                location: ElementLocation {
                    level,
                    element: element_index,
                },
            })?;
        let children = (0..8)
            .map(|child| FinerElement {
                index: 8 * element_index + child,
                descriptor: self.describe(parent.octant(child)),
            })
            .collect();
        Ok(Some(children))
    }

    fn coarse_material(&self, element_index: usize, _element: &Hex8Element<T>) -> Option<ElementMaterial<T>> {
        self.coarse
            .get(element_index)
            .map(|element| self.describe(*element).material)
    }
}

/// Explicitly stored levels, e.g. produced by an external voxelization.
///
/// Level 0 holds the coarse descriptors. Each further level holds its element descriptors and,
/// for every element of the previous level, the indices of its children (or `None`).
#[derive(Clone, Debug, PartialEq)]
pub struct ExplicitLevels<T: Scalar> {
    levels: Vec<Vec<ElementDescriptor<T>>>,
    children: Vec<Vec<Option<Vec<usize>>>>,
}

impl<T: Scalar> ExplicitLevels<T> {
    pub fn new(coarse: Vec<ElementDescriptor<T>>) -> Self {
        Self {
            levels: vec![coarse],
            children: Vec::new(),
        }
    }

    /// Appends a finer level.
    ///
    /// `children[i]` lists the indices into `elements` of the children of element `i` of the
    /// currently finest level.
    ///
    /// # Panics
    ///
    /// Panics if `children` does not have one entry per element of the currently finest level.
    pub fn with_finer_level(mut self, elements: Vec<ElementDescriptor<T>>, children: Vec<Option<Vec<usize>>>) -> Self {
        let finest = self.levels.last().map(Vec::len).unwrap_or(0);
        assert_eq!(
            children.len(),
            finest,
            "children must have one entry per element of the previous level"
        );
        self.levels.push(elements);
        self.children.push(children);
        self
    }

    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    pub fn level(&self, level: usize) -> Option<&[ElementDescriptor<T>]> {
        self.levels.get(level).map(Vec::as_slice)
    }
}

impl<T: Real> FinerLevelProvider<T> for ExplicitLevels<T> {
    fn finer_level(&self, level: usize, element_index: usize) -> Result<Option<Vec<FinerElement<T>>>, HierarchyError> {
        let Some(level_children) = self.children.get(level) else {
            return Ok(None);
        };
        let invalid = |level, element| HierarchyError::InvalidNodeData {
            location: ElementLocation { level, element },
        };
        let child_indices = level_children
            .get(element_index)
            .ok_or_else(|| invalid(level, element_index))?;
        let Some(child_indices) = child_indices else {
            return Ok(None);
        };

        let finer = &self.levels[level + 1];
        child_indices
            .iter()
            .map(|&index| {
                finer
                    .get(index)
                    .map(|descriptor| FinerElement {
                        index,
                        descriptor: *descriptor,
                    })
                    .ok_or_else(|| invalid(level + 1, index))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Some)
    }

    fn coarse_material(&self, element_index: usize, _element: &Hex8Element<T>) -> Option<ElementMaterial<T>> {
        self.levels[0]
            .get(element_index)
            .map(|descriptor| descriptor.material)
    }
}
