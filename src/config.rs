//! Setup parameters of [`NonUniformHexForceField`](crate::forcefield::NonUniformHexForceField).
use crate::assembly::ElementMatrixBuilder;
use crate::error::HierarchyError;
use crate::hierarchy::MAX_VIRTUAL_FINER_LEVELS;
use crate::material::ElementMaterial;
use crate::Real;
use eyre::WrapErr;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};

/// Configuration of a non-uniform hexahedral force field.
///
/// Missing fields take their default values when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Real + Deserialize<'de>"))]
pub struct ForceFieldConfig<T> {
    /// Number of virtual finer levels below every coarse element.
    pub virtual_finer_levels: usize,
    /// Whether the force field also acts as the mass of the simulated object.
    pub use_mass: bool,
    /// Use the row-sum lumped mass instead of the consistent mass in mass queries.
    pub lumped_mass: bool,
    /// Young's modulus (Pa) of coarse elements whose material is not known to the provider.
    pub young_modulus: T,
    /// Poisson's ratio of coarse elements whose material is not known to the provider.
    pub poisson_ratio: T,
    /// Density (kg/m³) of coarse elements whose material is not known to the provider.
    pub density: T,
    /// Number of Gauss points per axis used for leaf elements.
    pub quadrature_points_per_dim: usize,
}

impl<T: Real> Default for ForceFieldConfig<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn default() -> Self {
        Self {
            virtual_finer_levels: 0,
            use_mass: true,
            lumped_mass: false,
            young_modulus: 5000.0,
            poisson_ratio: 0.45,
            density: 1.0,
            quadrature_points_per_dim: 2,
        }
    }
}

impl<T: Real> ForceFieldConfig<T> {
    pub fn default_material(&self) -> ElementMaterial<T> {
        ElementMaterial::new(self.young_modulus, self.poisson_ratio, self.density)
    }

    /// Checks the parameters that do not depend on the mesh.
    pub fn validate(&self) -> eyre::Result<()> {
        if self.virtual_finer_levels > MAX_VIRTUAL_FINER_LEVELS {
            return Err(HierarchyError::TooManyVirtualLevels {
                requested: self.virtual_finer_levels,
                max: MAX_VIRTUAL_FINER_LEVELS,
            }
            .into());
        }
        self.default_material()
            .validate()
            .wrap_err("invalid default material")?;
        self.builder()
            .wrap_err("invalid leaf quadrature")?;
        Ok(())
    }

    /// The leaf matrix builder described by this configuration.
    pub fn builder(&self) -> Result<ElementMatrixBuilder<T>, HierarchyError> {
        ElementMatrixBuilder::with_points_per_dim(self.quadrature_points_per_dim)
    }
}
