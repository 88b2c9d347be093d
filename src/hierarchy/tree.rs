use crate::element::Hex8Element;
use crate::error::{ElementLocation, HierarchyError};
use crate::hierarchy::{ElementDescriptor, FinerElement, FinerLevelProvider, MAX_VIRTUAL_FINER_LEVELS};
use crate::material::ElementMaterial;
use crate::nalgebra::{convert, Scalar};
use crate::Real;
use log::{debug, warn};

/// Relative tolerance for the deviation of a child from the octant of its parent.
const OCTANT_DEVIATION_TOLERANCE: f64 = 1e-6;

/// Index of a record in a [`RefinementTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(usize);

impl ElementId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A single (real or virtual) element of the hierarchy.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementRecord<T: Scalar> {
    element: Hex8Element<T>,
    material: ElementMaterial<T>,
    location: ElementLocation,
    depth: usize,
    children: Option<[ElementId; 8]>,
}

impl<T: Scalar> ElementRecord<T> {
    pub fn element(&self) -> &Hex8Element<T> {
        &self.element
    }

    pub fn material(&self) -> &ElementMaterial<T> {
        &self.material
    }

    /// Level and index of the element as reported by the provider.
    pub fn location(&self) -> ElementLocation {
        self.location
    }

    /// Number of finer levels below this record.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Children ordered by octant, or `None` for a leaf.
    pub fn children(&self) -> Option<&[ElementId; 8]> {
        self.children.as_ref()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }
}

/// Arena of refinement records, one tree per coarse element.
///
/// Trees are built once and never modified; all records of a tree have children exactly when
/// their depth is positive.
#[derive(Debug, Clone, PartialEq)]
pub struct RefinementTree<T: Scalar> {
    records: Vec<ElementRecord<T>>,
    roots: Vec<ElementId>,
    virtual_finer_levels: usize,
}

impl<T: Real> RefinementTree<T> {
    /// Builds the refinement trees of the given coarse elements.
    ///
    /// Every coarse element is refined `virtual_finer_levels` times with data from `provider`.
    /// All configuration problems (missing finer levels, wrong child counts, inconsistent depth
    /// among siblings, invalid node data or materials) are reported here, so that a tree that was
    /// built successfully always yields well-defined matrices.
    pub fn build<P>(
        coarse: &[ElementDescriptor<T>],
        provider: &P,
        virtual_finer_levels: usize,
    ) -> Result<Self, HierarchyError>
    where
        P: FinerLevelProvider<T> + ?Sized,
    {
        if virtual_finer_levels > MAX_VIRTUAL_FINER_LEVELS {
            return Err(HierarchyError::TooManyVirtualLevels {
                requested: virtual_finer_levels,
                max: MAX_VIRTUAL_FINER_LEVELS,
            });
        }

        let mut tree = Self {
            records: Vec::new(),
            roots: Vec::with_capacity(coarse.len()),
            virtual_finer_levels,
        };

        for (index, descriptor) in coarse.iter().enumerate() {
            let location = ElementLocation { level: 0, element: index };
            validate_descriptor(descriptor, location)?;
            let finer = if virtual_finer_levels > 0 {
                let finer = provider.finer_level(0, index)?;
                Some(finer.ok_or(HierarchyError::MissingFinerLevel { location })?)
            } else {
                None
            };
            let root = tree.insert(provider, descriptor, location, virtual_finer_levels, finer)?;
            tree.roots.push(root);
        }

        debug!(
            "Built refinement trees for {} coarse elements: {} records, {} leaves, {} virtual finer levels",
            tree.roots.len(),
            tree.records.len(),
            tree.num_leaves(),
            virtual_finer_levels
        );
        Ok(tree)
    }

    fn insert<P>(
        &mut self,
        provider: &P,
        descriptor: &ElementDescriptor<T>,
        location: ElementLocation,
        depth: usize,
        finer: Option<Vec<FinerElement<T>>>,
    ) -> Result<ElementId, HierarchyError>
    where
        P: FinerLevelProvider<T> + ?Sized,
    {
        let id = ElementId(self.records.len());
        self.records.push(ElementRecord {
            element: descriptor.element,
            material: descriptor.material,
            location,
            depth,
            children: None,
        });

        let Some(finer) = finer else {
            return Ok(id);
        };
        if finer.len() != 8 {
            return Err(HierarchyError::WrongChildCount {
                location,
                count: finer.len(),
            });
        }

        let child_level = location.level + 1;
        let child_location = |child: &FinerElement<T>| ElementLocation {
            level: child_level,
            element: child.index,
        };
        for (octant, child) in finer.iter().enumerate() {
            validate_descriptor(&child.descriptor, child_location(child))?;
            check_octant_geometry(&descriptor.element, octant, &child.descriptor.element, child_location(child));
        }

        let grandchildren = if depth > 1 {
            fetch_sibling_levels(provider, &finer, child_level)?
        } else {
            vec![None; 8]
        };

        let mut children = [id; 8];
        for ((slot, child), finer) in children.iter_mut().zip(&finer).zip(grandchildren) {
            *slot = self.insert(provider, &child.descriptor, child_location(child), depth - 1, finer)?;
        }
        self.records[id.0].children = Some(children);
        Ok(id)
    }
}

impl<T: Scalar> RefinementTree<T> {
    pub fn records(&self) -> &[ElementRecord<T>] {
        &self.records
    }

    /// # Panics
    ///
    /// Panics if `id` does not belong to this tree.
    pub fn record(&self, id: ElementId) -> &ElementRecord<T> {
        &self.records[id.0]
    }

    /// Root records, one per coarse element in input order.
    pub fn roots(&self) -> &[ElementId] {
        &self.roots
    }

    pub fn num_records(&self) -> usize {
        self.records.len()
    }

    pub fn num_leaves(&self) -> usize {
        self.records.iter().filter(|r| r.is_leaf()).count()
    }

    pub fn virtual_finer_levels(&self) -> usize {
        self.virtual_finer_levels
    }
}

/// Queries the finer levels of all siblings, which must either all exist or all be absent.
fn fetch_sibling_levels<T, P>(
    provider: &P,
    siblings: &[FinerElement<T>],
    level: usize,
) -> Result<Vec<Option<Vec<FinerElement<T>>>>, HierarchyError>
where
    T: Scalar,
    P: FinerLevelProvider<T> + ?Sized,
{
    let levels = siblings
        .iter()
        .map(|sibling| provider.finer_level(level, sibling.index))
        .collect::<Result<Vec<_>, _>>()?;

    let location = |sibling: &FinerElement<T>| ElementLocation {
        level,
        element: sibling.index,
    };
    let any_refined = levels.iter().any(Option::is_some);
    if let Some(missing) = siblings
        .iter()
        .zip(&levels)
        .find_map(|(sibling, finer)| finer.is_none().then_some(sibling))
    {
        return Err(if any_refined {
            HierarchyError::InconsistentDepth {
                location: location(missing),
            }
        } else {
            HierarchyError::MissingFinerLevel {
                location: location(missing),
            }
        });
    }
    Ok(levels)
}

fn validate_descriptor<T: Real>(descriptor: &ElementDescriptor<T>, location: ElementLocation) -> Result<(), HierarchyError> {
    if !descriptor.element.is_finite() {
        return Err(HierarchyError::InvalidNodeData { location });
    }
    descriptor
        .material
        .validate()
        .map_err(|reason| HierarchyError::InvalidMaterial { location, reason })
}

/// Warns if a child does not coincide with the octant of its parent that the interpolation
/// weights assume.
fn check_octant_geometry<T: Real>(
    parent: &Hex8Element<T>,
    octant: usize,
    child: &Hex8Element<T>,
    location: ElementLocation,
) {
    let expected = parent.octant(octant);
    let deviation = expected.max_vertex_deviation(child);
    let tolerance = convert::<_, T>(OCTANT_DEVIATION_TOLERANCE) * parent.diameter();
    if deviation > tolerance {
        warn!(
            "Finer {location} deviates by {deviation} from octant {octant} of its parent; \
             homogenized matrices assume octree subdivision"
        );
    }
}
