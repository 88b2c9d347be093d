use crate::assembly::ElementMatrixBuilder;
use crate::error::HierarchyError;
use crate::hierarchy::{add_fine_to_coarse, ElementId, ElementRecord, RefinementTree};
use crate::nalgebra::Scalar;
use crate::{ElementMass, ElementMatrix, ElementStiffness, Real};
use log::debug;
use rayon::prelude::*;

/// Effective matrices of one coarse element.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectiveMatrices<T: Scalar> {
    pub stiffness: ElementStiffness<T>,
    /// Only present if mass matrices were requested.
    pub mass: Option<ElementMass<T>>,
}

/// Quantities that are homogenized with the fine-to-coarse interpolation.
trait Homogenized<T> {
    fn zeros() -> Self;
    fn add_fine(&mut self, fine: &Self, child: usize);
}

impl<T: Real> Homogenized<T> for ElementMatrix<T> {
    fn zeros() -> Self {
        ElementMatrix::zeros()
    }

    fn add_fine(&mut self, fine: &Self, child: usize) {
        add_fine_to_coarse(self, fine, child);
    }
}

impl<T: Real> Homogenized<T> for (ElementStiffness<T>, ElementMass<T>) {
    fn zeros() -> Self {
        (ElementMatrix::zeros(), ElementMatrix::zeros())
    }

    fn add_fine(&mut self, fine: &Self, child: usize) {
        add_fine_to_coarse(&mut self.0, &fine.0, child);
        add_fine_to_coarse(&mut self.1, &fine.1, child);
    }
}

/// Computes effective element matrices of refinement trees.
///
/// Leaves are delegated to the [`ElementMatrixBuilder`]; any other record accumulates
/// $P_c^T M_c P_c$ over its 8 children. Errors of any leaf invalidate the whole tree they belong
/// to. They are returned as the builder reports them, tagged with the location of the leaf.
#[derive(Debug, Clone)]
pub struct HierarchicalRefiner<T: Scalar> {
    builder: ElementMatrixBuilder<T>,
}

impl<T: Real> Default for HierarchicalRefiner<T> {
    fn default() -> Self {
        Self::new(ElementMatrixBuilder::new())
    }
}

impl<T: Real> HierarchicalRefiner<T> {
    pub fn new(builder: ElementMatrixBuilder<T>) -> Self {
        Self { builder }
    }

    pub fn builder(&self) -> &ElementMatrixBuilder<T> {
        &self.builder
    }

    fn assemble<M, Leaf>(&self, tree: &RefinementTree<T>, id: ElementId, leaf: &Leaf) -> Result<M, HierarchyError>
    where
        M: Homogenized<T>,
        Leaf: Fn(&ElementRecord<T>, ElementId) -> Result<M, HierarchyError>,
    {
        let record = tree.record(id);
        match record.children() {
            None => leaf(record, id).map_err(|err| err.at_location(record.location())),
            Some(children) => {
                let mut coarse = M::zeros();
                for (child, &child_id) in children.iter().enumerate() {
                    let fine = self.assemble(tree, child_id, leaf)?;
                    coarse.add_fine(&fine, child);
                }
                Ok(coarse)
            }
        }
    }

    /// Effective stiffness matrix of the record `id`.
    pub fn effective_stiffness(
        &self,
        tree: &RefinementTree<T>,
        id: ElementId,
    ) -> Result<ElementStiffness<T>, HierarchyError> {
        self.assemble(tree, id, &|record, id| {
            self.builder
                .compute_element_stiffness(record.element(), &record.material().stiffness(), id.index())
        })
    }

    /// Effective mass matrix of the record `id`.
    pub fn effective_mass(&self, tree: &RefinementTree<T>, id: ElementId) -> Result<ElementMass<T>, HierarchyError> {
        self.assemble(tree, id, &|record, id| {
            self.builder
                .compute_element_mass(record.element(), record.material().density, id.index())
        })
    }

    /// Effective stiffness and mass matrices of the record `id`, traversing the tree once.
    pub fn effective_matrices(
        &self,
        tree: &RefinementTree<T>,
        id: ElementId,
    ) -> Result<(ElementStiffness<T>, ElementMass<T>), HierarchyError> {
        self.assemble(tree, id, &|record, id| {
            self.builder
                .compute_element_matrices(record.element(), record.material(), id.index())
        })
    }

    /// Effective matrices of every root of `tree`, in root order.
    ///
    /// Roots are independent and processed in parallel; each tree is traversed sequentially, so
    /// the result does not depend on scheduling.
    pub fn compute_roots(
        &self,
        tree: &RefinementTree<T>,
        with_mass: bool,
    ) -> Result<Vec<EffectiveMatrices<T>>, HierarchyError> {
        let matrices = tree
            .roots()
            .par_iter()
            .map(|&root| -> Result<EffectiveMatrices<T>, HierarchyError> {
                if with_mass {
                    let (stiffness, mass) = self.effective_matrices(tree, root)?;
                    Ok(EffectiveMatrices {
                        stiffness,
                        mass: Some(mass),
                    })
                } else {
                    Ok(EffectiveMatrices {
                        stiffness: self.effective_stiffness(tree, root)?,
                        mass: None,
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Computed effective matrices for {} coarse elements from {} leaves",
            matrices.len(),
            tree.num_leaves()
        );
        Ok(matrices)
    }
}
