//! Dynamic stiffness/damping extraction on the example bearing.

use tb_bearing::BearingConfig;
use tb_solver::{Bearing, CoefficientMethod};

#[test]
fn lund_coefficients_trigger_equilibrium_and_are_physical() {
    let mut bearing = Bearing::new(BearingConfig::example()).unwrap();
    assert!(bearing.equilibrium().is_none());

    let coefs = bearing.coefficients(CoefficientMethod::Lund).unwrap();

    // coefficients() must have run the equilibrium search itself.
    let eq = bearing.equilibrium().expect("equilibrium stored");
    assert!(eq.converged);

    assert!(coefs.is_finite());
    // A statically loaded bearing restores both directions.
    assert!(coefs.stiffness[(0, 0)] > 0.0, "kxx = {}", coefs.stiffness[(0, 0)]);
    assert!(coefs.stiffness[(1, 1)] > 0.0, "kyy = {}", coefs.stiffness[(1, 1)]);
}

#[test]
fn perturbation_coefficients_are_finite() {
    let mut bearing = Bearing::new(BearingConfig::example()).unwrap();
    let coefs = bearing.coefficients(CoefficientMethod::Perturbation).unwrap();
    assert!(coefs.is_finite());
    assert!(coefs.stiffness[(0, 0)] > 0.0);
    assert!(coefs.stiffness[(1, 1)] > 0.0);
}

#[test]
fn both_methods_linearize_the_same_film() {
    let mut bearing = Bearing::new(BearingConfig::example()).unwrap();
    bearing.find_equilibrium([0.1, -0.1]).unwrap();

    let lund = bearing.coefficients(CoefficientMethod::Lund).unwrap();
    let pert = bearing.coefficients(CoefficientMethod::Perturbation).unwrap();

    // Direct stiffness terms approximate the same physical derivative by
    // different numerical routes; off-diagonals can pass near zero, so only
    // the diagonals are compared in relative terms.
    for idx in [(0, 0), (1, 1)] {
        let a = lund.stiffness[idx];
        let b = pert.stiffness[idx];
        let rel = (a - b).abs() / a.abs().max(b.abs());
        assert!(rel < 0.30, "stiffness {idx:?} disagrees: {a} vs {b}");
    }

    // Damping diagonals must at least agree on the sign of the response.
    for idx in [(0, 0), (1, 1)] {
        assert_eq!(
            lund.damping[idx].signum(),
            pert.damping[idx].signum(),
            "damping {idx:?} signs differ"
        );
    }
}
