use hexres::material::{ElementMaterial, LameParameters, MaterialError, MaterialStiffness, YoungPoisson};
use matrixcompare::{assert_matrix_eq, assert_scalar_eq};
use nalgebra::Matrix6;

#[test]
fn young_poisson_to_lame() {
    let lame: LameParameters<f64> = YoungPoisson {
        young: 1000.0,
        poisson: 0.25,
    }
    .into();
    assert_scalar_eq!(lame.mu, 400.0, comp = abs, tol = 1e-12);
    assert_scalar_eq!(lame.lambda, 400.0, comp = abs, tol = 1e-12);
}

#[test]
fn isotropic_stiffness_tensor() {
    let lame = LameParameters { mu: 2.0, lambda: 3.0 };
    let d = MaterialStiffness::isotropic(lame);

    #[rustfmt::skip]
    let expected = Matrix6::new(
        7.0, 3.0, 3.0, 0.0, 0.0, 0.0,
        3.0, 7.0, 3.0, 0.0, 0.0, 0.0,
        3.0, 3.0, 7.0, 0.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 2.0, 0.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 2.0, 0.0,
        0.0, 0.0, 0.0, 0.0, 0.0, 2.0,
    );
    assert_matrix_eq!(*d.tensor(), expected, comp = abs, tol = 1e-14);
}

#[test]
fn stiffness_scales_linearly_with_young_modulus() {
    let material = ElementMaterial::new(1000.0, 0.3, 1.0);
    let scaled = ElementMaterial::new(4000.0, 0.3, 1.0);
    assert_matrix_eq!(
        *scaled.stiffness().tensor(),
        material.stiffness().tensor() * 4.0,
        comp = abs,
        tol = 1e-9
    );
}

#[test]
fn material_validation() {
    assert_eq!(ElementMaterial::new(1000.0, 0.3, 1.0).validate(), Ok(()));
    assert_eq!(ElementMaterial::<f64>::void().validate(), Ok(()));
    assert_eq!(
        ElementMaterial::new(-1.0, 0.3, 1.0).validate(),
        Err(MaterialError::NegativeYoungModulus)
    );
    assert_eq!(
        ElementMaterial::new(1.0, 0.5, 1.0).validate(),
        Err(MaterialError::PoissonRatioOutOfRange)
    );
    assert_eq!(
        ElementMaterial::new(1.0, -1.0, 1.0).validate(),
        Err(MaterialError::PoissonRatioOutOfRange)
    );
    assert_eq!(
        ElementMaterial::new(1.0, 0.3, -1e-3).validate(),
        Err(MaterialError::NegativeDensity)
    );
    assert_eq!(
        ElementMaterial::new(f64::NAN, 0.3, 1.0).validate(),
        Err(MaterialError::NonFinite)
    );
    assert_eq!(
        ElementMaterial::new(1.0, 0.3, f64::INFINITY).validate(),
        Err(MaterialError::NonFinite)
    );
}

#[test]
fn void_material_has_zero_stiffness() {
    let void = ElementMaterial::<f64>::void();
    assert!(void.is_void());
    assert_eq!(*void.stiffness().tensor(), Matrix6::zeros());
}

#[test]
fn scaled_material_keeps_poisson_ratio() {
    let scaled = ElementMaterial::new(1000.0, 0.3, 2.0).scaled(0.25);
    assert_eq!(scaled, ElementMaterial::new(250.0, 0.3, 0.5));
    assert!(ElementMaterial::new(1000.0, 0.3, 2.0).scaled(0.0).is_void());
}

#[test]
fn anisotropic_tensor_must_be_symmetric() {
    let mut tensor = Matrix6::<f64>::identity() * 10.0;
    tensor[(0, 1)] = 1.0;
    tensor[(1, 0)] = 1.0;
    assert!(MaterialStiffness::from_voigt(tensor).is_ok());

    tensor[(0, 4)] = 0.5;
    assert_eq!(
        MaterialStiffness::from_voigt(tensor),
        Err(MaterialError::AsymmetricStiffness)
    );

    tensor[(0, 4)] = f64::NAN;
    assert_eq!(MaterialStiffness::from_voigt(tensor), Err(MaterialError::NonFinite));
}
