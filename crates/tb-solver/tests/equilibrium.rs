//! End-to-end equilibrium solution of the documented example bearing.
//!
//! Case: L = 0.263144 m, R = 0.2 m, c_r = 1.95e-4 m, 11x3 mesh per pad,
//! pad arc 176 deg, mu_ref = 0.02 Pa.s, 900 rpm, W = (0, -112814.91) N,
//! calibration 50 degC -> 0.02 Pa.s / 80 degC -> 0.01 Pa.s, mixing
//! fractions (0.52, 0.48). Starting from (0.1, -0.1) the journal settles
//! near eccentricity 0.57 at attitude -0.70 rad.

use tb_bearing::{BearingConfig, RotorState};
use tb_solver::Bearing;

#[test]
fn example_bearing_reaches_documented_equilibrium() {
    let mut bearing = Bearing::new(BearingConfig::example()).unwrap();
    let eq = bearing.find_equilibrium([0.1, -0.1]).unwrap();

    assert!(eq.converged, "search should meet tolerance: {eq:?}");
    assert!(
        (eq.eccentricity - 0.57).abs() < 0.06,
        "eccentricity {} too far from 0.57",
        eq.eccentricity
    );
    assert!(
        (eq.attitude + 0.70).abs() < 0.10,
        "attitude {} too far from -0.70",
        eq.attitude
    );

    // Force balance at the returned position.
    let cfg = bearing.config().clone();
    let rotor = RotorState::at_position(eq.eccentricity, eq.attitude);
    let (fx, fy) = bearing.forces(&rotor).unwrap();
    let residual = (cfg.load_x + fx).hypot(cfg.load_y + fy);
    assert!(residual < 10.0, "unbalanced force {residual} N");
}

#[test]
fn force_evaluation_is_deterministic() {
    let bearing = Bearing::new(BearingConfig::example()).unwrap();
    let rotor = RotorState::at_position(0.4, -0.6);
    let first = bearing.forces(&rotor).unwrap();
    let second = bearing.forces(&rotor).unwrap();
    assert_eq!(first, second);
}

#[test]
fn centered_rotor_carries_no_load() {
    // Zero eccentricity leaves no wedge, so the mirrored pads build no
    // pressure and the film force vanishes.
    let bearing = Bearing::new(BearingConfig::example()).unwrap();
    let rotor = RotorState::at_position(0.0, 0.0);
    let solution = bearing.film_solution(&rotor).unwrap();
    assert!(solution.force_x.abs() < 1e-6);
    assert!(solution.force_y.abs() < 1e-6);
    for pad in 0..2 {
        assert!(solution.fields.pressure[pad].iter().all(|&p| p.abs() < 1e-12));
    }
}

#[test]
fn pressure_field_is_non_negative_everywhere() {
    let bearing = Bearing::new(BearingConfig::example()).unwrap();
    for &(ecc, att) in &[(0.2, -0.3), (0.5, -0.7), (0.8, 0.4)] {
        let rotor = RotorState::at_position(ecc, att);
        let solution = bearing.film_solution(&rotor).unwrap();
        assert!(solution.fields.min_pressure() >= 0.0);
    }
}

#[test]
fn finer_mesh_stays_near_the_coarse_equilibrium() {
    let mut coarse = Bearing::new(BearingConfig::example()).unwrap();
    let eq_coarse = coarse.find_equilibrium([0.1, -0.1]).unwrap();

    let mut cfg = BearingConfig::example();
    cfg.n_z *= 2;
    cfg.n_theta *= 2;
    let mut fine = Bearing::new(cfg).unwrap();
    let eq_fine = fine.find_equilibrium(eq_coarse.position()).unwrap();

    assert!(
        (eq_fine.eccentricity - eq_coarse.eccentricity).abs() < 0.08,
        "refinement moved eccentricity from {} to {}",
        eq_coarse.eccentricity,
        eq_fine.eccentricity
    );
    assert!(
        (eq_fine.attitude - eq_coarse.attitude).abs() < 0.12,
        "refinement moved attitude from {} to {}",
        eq_coarse.attitude,
        eq_fine.attitude
    );
}
