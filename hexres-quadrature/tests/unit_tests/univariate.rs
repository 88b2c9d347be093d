use hexres_quadrature::univariate::{gauss, try_gauss};
use hexres_quadrature::{integrate, Error};

use matrixcompare::assert_scalar_eq;

#[test]
fn gauss_rules_integrate_monomials_exactly() {
    for n in 1..=40 {
        let rule = gauss(n);
        assert_eq!(rule.0.len(), n);
        assert!(rule.0.iter().all(|&w| w > 0.0));

        for alpha in 0..=(2 * n - 1) as i32 {
            let exact = (1.0 - (-1.0f64).powi(alpha + 1)) / (alpha as f64 + 1.0);
            let estimated = integrate(&rule, |x| x[0].powi(alpha));
            assert_scalar_eq!(estimated, exact, comp = abs, tol = 1e-13);
        }
    }
}

#[test]
fn gauss_points_are_sorted_and_symmetric() {
    let (_, points) = gauss(7);
    for pair in points.windows(2) {
        assert!(pair[0][0] < pair[1][0]);
    }
    for i in 0..points.len() {
        assert_scalar_eq!(points[i][0], -points[points.len() - 1 - i][0], comp = abs, tol = 1e-15);
    }
}

#[test]
fn two_point_rule_has_known_points() {
    let (weights, points) = gauss(2);
    let x = 1.0 / 3.0f64.sqrt();
    assert_scalar_eq!(points[0][0], -x, comp = abs, tol = 1e-15);
    assert_scalar_eq!(points[1][0], x, comp = abs, tol = 1e-15);
    assert_scalar_eq!(weights[0], 1.0, comp = abs, tol = 1e-15);
    assert_scalar_eq!(weights[1], 1.0, comp = abs, tol = 1e-15);
}

#[test]
fn empty_rule_is_an_error() {
    assert_eq!(try_gauss(0), Err(Error::EmptyRule));
}
