//! Linear elastic material parameters.
use crate::nalgebra::{Matrix6, Scalar};
use crate::Real;
use numeric_literals::replace_float_literals;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::{Display, Formatter};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LameParameters<T> {
    pub mu: T,
    pub lambda: T,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct YoungPoisson<T> {
    pub young: T,
    pub poisson: T,
}

impl<T> From<YoungPoisson<T>> for LameParameters<T>
where
    T: Real,
{
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    fn from(params: YoungPoisson<T>) -> Self {
        let YoungPoisson { young, poisson } = params;
        let mu = 0.5 * young / (1.0 + poisson);
        let lambda = 2.0 * mu * poisson / (1.0 - 2.0 * poisson);
        Self { mu, lambda }
    }
}

/// Reasons a material is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum MaterialError {
    NonFinite,
    NegativeYoungModulus,
    PoissonRatioOutOfRange,
    NegativeDensity,
    AsymmetricStiffness,
}

impl Display for MaterialError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let reason = match self {
            Self::NonFinite => "material parameters must be finite",
            Self::NegativeYoungModulus => "Young's modulus must be non-negative",
            Self::PoissonRatioOutOfRange => "Poisson's ratio must lie in (-1, 0.5)",
            Self::NegativeDensity => "density must be non-negative",
            Self::AsymmetricStiffness => "material stiffness tensor must be symmetric",
        };
        write!(f, "{reason}")
    }
}

impl std::error::Error for MaterialError {}

/// Isotropic material of a single element.
///
/// A material with zero Young's modulus and zero density ([`ElementMaterial::void`]) describes
/// empty space, e.g. the part of a coarse element's bounding box that lies outside the object.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ElementMaterial<T> {
    /// Young's modulus (Pa).
    pub young: T,
    /// Poisson's ratio (dimensionless).
    pub poisson: T,
    /// Mass density (kg/m³).
    pub density: T,
}

impl<T: Real> ElementMaterial<T> {
    pub fn new(young: T, poisson: T, density: T) -> Self {
        Self {
            young,
            poisson,
            density,
        }
    }

    pub fn void() -> Self {
        Self::new(T::zero(), T::zero(), T::zero())
    }

    pub fn is_void(&self) -> bool {
        self.young == T::zero() && self.density == T::zero()
    }

    /// Scales stiffness and density by `fraction`, the part of the element filled with material.
    pub fn scaled(&self, fraction: T) -> Self {
        Self::new(self.young * fraction, self.poisson, self.density * fraction)
    }

    pub fn young_poisson(&self) -> YoungPoisson<T> {
        YoungPoisson {
            young: self.young,
            poisson: self.poisson,
        }
    }

    pub fn lame_parameters(&self) -> LameParameters<T> {
        self.young_poisson().into()
    }

    /// The isotropic Hooke tensor of this material.
    pub fn stiffness(&self) -> MaterialStiffness<T> {
        MaterialStiffness::isotropic(self.lame_parameters())
    }

    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn validate(&self) -> Result<(), MaterialError> {
        let Self {
            young,
            poisson,
            density,
        } = *self;
        if !(young.is_finite() && poisson.is_finite() && density.is_finite()) {
            Err(MaterialError::NonFinite)
        } else if young < 0.0 {
            Err(MaterialError::NegativeYoungModulus)
        } else if poisson <= -1.0 || poisson >= 0.5 {
            Err(MaterialError::PoissonRatioOutOfRange)
        } else if density < 0.0 {
            Err(MaterialError::NegativeDensity)
        } else {
            Ok(())
        }
    }
}

/// Symmetric $6 \times 6$ constitutive tensor in Voigt notation.
///
/// Strains are ordered as $(\epsilon_{xx}, \epsilon_{yy}, \epsilon_{zz}, \gamma_{xy}, \gamma_{yz},
/// \gamma_{zx})$ with engineering shear strains $\gamma = 2 \epsilon$, so that the strain energy
/// density is $\frac{1}{2} \epsilon^T D \epsilon$.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MaterialStiffness<T: Scalar> {
    tensor: Matrix6<T>,
}

impl<T: Real> MaterialStiffness<T> {
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn isotropic(lame: LameParameters<T>) -> Self {
        let LameParameters { mu, lambda } = lame;
        let mut tensor = Matrix6::zeros();
        for i in 0..3 {
            for j in 0..3 {
                tensor[(i, j)] = lambda;
            }
            tensor[(i, i)] += 2.0 * mu;
            tensor[(i + 3, i + 3)] = mu;
        }
        Self { tensor }
    }

    /// Wraps a general (e.g. anisotropic) Voigt tensor.
    ///
    /// The tensor must be symmetric up to a relative tolerance of `1e-12`.
    #[replace_float_literals(T::from_f64(literal).expect("literal must fit in T"))]
    pub fn from_voigt(tensor: Matrix6<T>) -> Result<Self, MaterialError> {
        if !tensor.iter().all(|x| x.is_finite()) {
            return Err(MaterialError::NonFinite);
        }
        let asymmetry = (tensor - tensor.transpose()).abs().max();
        if asymmetry > 1e-12 * tensor.abs().max() {
            return Err(MaterialError::AsymmetricStiffness);
        }
        Ok(Self { tensor })
    }

    pub fn tensor(&self) -> &Matrix6<T> {
        &self.tensor
    }
}
