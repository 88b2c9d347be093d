//! Force field and mass of a coarse hexahedral mesh with precomputed effective matrices.
//!
//! [`NonUniformHexForceField`] performs all expensive work at construction: it builds the
//! refinement trees of the mesh, homogenizes the matrices of the virtual finer levels and caches
//! one effective stiffness (and optionally mass) matrix per coarse element. The per-step queries
//! of [`ForceField`] and [`Mass`] only read these caches.
//!
//! All per-node quantities are passed as slices with one entry per mesh vertex.
use crate::assembly::lumped_mass;
use crate::config::ForceFieldConfig;
use crate::connectivity::Hex8Connectivity;
use crate::error::{ElementLocation, HierarchyError};
use crate::hierarchy::{
    EffectiveMatrices, ElementDescriptor, FinerLevelProvider, HierarchicalRefiner, RefinementTree,
};
use crate::mesh::HexMesh;
use crate::nalgebra::{Point3, Scalar, Vector3};
use crate::util::{gather_element_vector, scatter_add_element_vector};
use crate::{ElementMass, ElementMatrix, ElementStiffness, ElementVector, Real};
use eyre::WrapErr;
use log::info;
use numeric_literals::replace_float_literals;
use rayon::prelude::*;

/// Internal forces of a deformable object.
pub trait ForceField<T: Scalar> {
    /// Adds the internal force at positions `x` and velocities `v` to `f`.
    fn add_force(&self, f: &mut [Vector3<T>], x: &[Point3<T>], v: &[Vector3<T>]);

    /// Adds `-k_factor * K dx` to `df`, where `K` is the stiffness matrix.
    fn add_force_differential(&self, df: &mut [Vector3<T>], dx: &[Vector3<T>], k_factor: T);

    fn potential_energy(&self, x: &[Point3<T>]) -> T;
}

/// Inertia of a deformable object.
pub trait Mass<T: Scalar> {
    /// Adds `factor * M dx` to `f`.
    fn add_mass_dx(&self, f: &mut [Vector3<T>], dx: &[Vector3<T>], factor: T);

    fn kinetic_energy(&self, v: &[Vector3<T>]) -> T;

    /// Adds the weight `M g` of the object in the uniform gravity field `gravity` to `f`.
    fn add_gravity_force(&self, f: &mut [Vector3<T>], gravity: &Vector3<T>);

    fn total_mass(&self) -> T;
}

/// Computes `scale * A_e u_e` for every element and adds the results to `output`.
fn add_element_products<T: Real>(
    output: &mut [Vector3<T>],
    connectivity: &[Hex8Connectivity],
    matrices: &[ElementMatrix<T>],
    input: &[Vector3<T>],
    scale: T,
) {
    let products: Vec<ElementVector<T>> = connectivity
        .par_iter()
        .zip(matrices)
        .map(|(nodes, matrix)| matrix * gather_element_vector(input, nodes))
        .collect();
    for (nodes, product) in connectivity.iter().zip(&products) {
        scatter_add_element_vector(output, nodes, product, scale);
    }
}

/// Computes $\frac{1}{2} \sum_e u_e^T A_e u_e$.
#[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
fn quadratic_form<T: Real>(connectivity: &[Hex8Connectivity], matrices: &[ElementMatrix<T>], input: &[Vector3<T>]) -> T {
    let sum = connectivity
        .par_iter()
        .zip(matrices)
        .map(|(nodes, matrix)| {
            let u = gather_element_vector(input, nodes);
            u.dot(&(matrix * &u))
        })
        .reduce(T::zero, |a, b| a + b);
    0.5 * sum
}

fn assert_node_count<T>(values: &[T], num_vertices: usize, name: &str) {
    assert_eq!(
        values.len(),
        num_vertices,
        "{name} must have one entry per mesh vertex"
    );
}

/// Effective mass matrices of a coarse mesh.
#[derive(Debug, Clone)]
pub struct HexMass<T: Scalar> {
    connectivity: Vec<Hex8Connectivity>,
    num_vertices: usize,
    consistent: Vec<ElementMass<T>>,
    lumped: Vec<ElementVector<T>>,
    use_lumped: bool,
}

impl<T: Real> HexMass<T> {
    fn new(connectivity: Vec<Hex8Connectivity>, num_vertices: usize, consistent: Vec<ElementMass<T>>, use_lumped: bool) -> Self {
        let lumped = consistent.iter().map(lumped_mass).collect();
        Self {
            connectivity,
            num_vertices,
            consistent,
            lumped,
            use_lumped,
        }
    }

    /// Consistent effective mass matrices, one per coarse element.
    pub fn element_masses(&self) -> &[ElementMass<T>] {
        &self.consistent
    }

    /// Row-sum lumped masses, one per coarse element.
    pub fn lumped_element_masses(&self) -> &[ElementVector<T>] {
        &self.lumped
    }

    pub fn is_lumped(&self) -> bool {
        self.use_lumped
    }

    /// Mass associated with every mesh vertex, obtained by lumping.
    pub fn vertex_masses(&self) -> Vec<T> {
        let mut masses = vec![T::zero(); self.num_vertices];
        for (nodes, lumped) in self.connectivity.iter().zip(&self.lumped) {
            for (i_local, &i_global) in nodes.iter().enumerate() {
                masses[i_global] += lumped[3 * i_local];
            }
        }
        masses
    }
}

impl<T: Real> Mass<T> for HexMass<T> {
    fn add_mass_dx(&self, f: &mut [Vector3<T>], dx: &[Vector3<T>], factor: T) {
        assert_node_count(f, self.num_vertices, "f");
        assert_node_count(dx, self.num_vertices, "dx");
        if self.use_lumped {
            for (nodes, lumped) in self.connectivity.iter().zip(&self.lumped) {
                let local = lumped.component_mul(&gather_element_vector(dx, nodes));
                scatter_add_element_vector(f, nodes, &local, factor);
            }
        } else {
            add_element_products(f, &self.connectivity, &self.consistent, dx, factor);
        }
    }

    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn kinetic_energy(&self, v: &[Vector3<T>]) -> T {
        assert_node_count(v, self.num_vertices, "v");
        if self.use_lumped {
            let sum = self
                .connectivity
                .iter()
                .zip(&self.lumped)
                .map(|(nodes, lumped)| {
                    let local = gather_element_vector(v, nodes);
                    lumped.dot(&local.component_mul(&local))
                })
                .fold(T::zero(), |a, b| a + b);
            0.5 * sum
        } else {
            quadratic_form(&self.connectivity, &self.consistent, v)
        }
    }

    fn add_gravity_force(&self, f: &mut [Vector3<T>], gravity: &Vector3<T>) {
        assert_node_count(f, self.num_vertices, "f");
        // Consistent and lumped mass have the same row sums, so both give the same weight
        for (nodes, lumped) in self.connectivity.iter().zip(&self.lumped) {
            let g = ElementVector::from_fn(|i, _| gravity[i % 3]);
            scatter_add_element_vector(f, nodes, &lumped.component_mul(&g), T::one());
        }
    }

    fn total_mass(&self) -> T {
        self.vertex_masses()
            .into_iter()
            .fold(T::zero(), |a, b| a + b)
    }
}

/// Linear elastic force field on a coarse hexahedral mesh whose element matrices are homogenized
/// from virtual finer levels.
///
/// Forces follow the small-displacement model $f = -K (x - x_0)$ about the rest positions
/// $x_0$ of the mesh.
#[derive(Debug, Clone)]
pub struct NonUniformHexForceField<T: Scalar> {
    rest_positions: Vec<Point3<T>>,
    connectivity: Vec<Hex8Connectivity>,
    tree: RefinementTree<T>,
    stiffness: Vec<ElementStiffness<T>>,
    mass: Option<HexMass<T>>,
}

impl<T: Real> NonUniformHexForceField<T> {
    /// Builds the refinement trees of `mesh` and caches the effective element matrices.
    ///
    /// The material of each coarse element is taken from `provider` if it knows one, and from
    /// [`ForceFieldConfig::default_material`] otherwise. Any error in the configuration, the
    /// hierarchy or the geometry aborts setup.
    pub fn new<P>(mesh: &HexMesh<T>, provider: &P, config: &ForceFieldConfig<T>) -> eyre::Result<Self>
    where
        P: FinerLevelProvider<T> + ?Sized,
    {
        config
            .validate()
            .wrap_err("invalid force field configuration")?;

        let default_material = config.default_material();
        let coarse = (0..mesh.num_elements())
            .map(|index| {
                let element = mesh
                    .element(index)
                    .ok_or(HierarchyError::InvalidNodeData {
                        location: ElementLocation { level: 0, element: index },
                    })?;
                let material = provider
                    .coarse_material(index, &element)
                    .unwrap_or(default_material);
                Ok(ElementDescriptor { element, material })
            })
            .collect::<Result<Vec<_>, HierarchyError>>()
            .wrap_err("invalid mesh")?;

        let tree = RefinementTree::build(&coarse, provider, config.virtual_finer_levels)
            .wrap_err("failed to build virtual finer levels")?;
        let refiner = HierarchicalRefiner::new(config.builder()?);
        let matrices = refiner
            .compute_roots(&tree, config.use_mass)
            .wrap_err("failed to compute effective element matrices")?;

        let (stiffness, masses): (Vec<_>, Vec<_>) = matrices
            .into_iter()
            .map(|EffectiveMatrices { stiffness, mass }| (stiffness, mass))
            .unzip();
        let mass = if config.use_mass {
            let consistent = masses.into_iter().flatten().collect();
            Some(HexMass::new(
                mesh.connectivity().to_vec(),
                mesh.num_vertices(),
                consistent,
                config.lumped_mass,
            ))
        } else {
            None
        };

        let force_field = Self {
            rest_positions: mesh.vertices().to_vec(),
            connectivity: mesh.connectivity().to_vec(),
            tree,
            stiffness,
            mass,
        };
        info!(
            "Initialized non-uniform hexahedral force field: {} elements, {} virtual finer levels, {} leaf elements, mass: {}",
            force_field.num_elements(),
            config.virtual_finer_levels,
            force_field.tree.num_leaves(),
            match (&force_field.mass, config.lumped_mass) {
                (None, _) => "none",
                (Some(_), false) => "consistent",
                (Some(_), true) => "lumped",
            }
        );
        Ok(force_field)
    }
}

impl<T: Scalar> NonUniformHexForceField<T> {
    pub fn num_elements(&self) -> usize {
        self.connectivity.len()
    }

    pub fn rest_positions(&self) -> &[Point3<T>] {
        &self.rest_positions
    }

    pub fn connectivity(&self) -> &[Hex8Connectivity] {
        &self.connectivity
    }

    pub fn tree(&self) -> &RefinementTree<T> {
        &self.tree
    }

    pub fn element_stiffness(&self, index: usize) -> Option<&ElementStiffness<T>> {
        self.stiffness.get(index)
    }

    /// The consistent effective mass of element `index`, if the force field acts as a mass.
    pub fn element_mass(&self, index: usize) -> Option<&ElementMass<T>> {
        self.mass.as_ref()?.consistent.get(index)
    }

    pub fn mass(&self) -> Option<&HexMass<T>> {
        self.mass.as_ref()
    }
}

impl<T: Real> NonUniformHexForceField<T> {
    /// The mass view of this force field, present only if it was configured to act as a mass.
    pub fn as_mass(&self) -> Option<&dyn Mass<T>> {
        self.mass.as_ref().map(|mass| mass as &dyn Mass<T>)
    }

    fn displacements(&self, x: &[Point3<T>]) -> Vec<Vector3<T>> {
        assert_node_count(x, self.rest_positions.len(), "x");
        x.iter()
            .zip(&self.rest_positions)
            .map(|(x, x0)| x - x0)
            .collect()
    }
}

impl<T: Real> ForceField<T> for NonUniformHexForceField<T> {
    fn add_force(&self, f: &mut [Vector3<T>], x: &[Point3<T>], _v: &[Vector3<T>]) {
        assert_node_count(f, self.rest_positions.len(), "f");
        let u = self.displacements(x);
        add_element_products(f, &self.connectivity, &self.stiffness, &u, -T::one());
    }

    fn add_force_differential(&self, df: &mut [Vector3<T>], dx: &[Vector3<T>], k_factor: T) {
        assert_node_count(df, self.rest_positions.len(), "df");
        assert_node_count(dx, self.rest_positions.len(), "dx");
        add_element_products(df, &self.connectivity, &self.stiffness, dx, -k_factor);
    }

    fn potential_energy(&self, x: &[Point3<T>]) -> T {
        let u = self.displacements(x);
        quadratic_form(&self.connectivity, &self.stiffness, &u)
    }
}
