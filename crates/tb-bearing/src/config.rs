//! Validated bearing description.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};

/// Number of pads forming the bearing bore. The discretization, the inter-pad
/// mixing chain and the force resolution are written for exactly two pads.
pub const N_PADS: usize = 2;

/// Two-point calibration for the viscosity-temperature power law.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ViscosityCalibration {
    /// Lower calibration temperature [degC]
    pub t_low: f64,
    /// Upper calibration temperature [degC]
    pub t_high: f64,
    /// Viscosity at `t_low` [Pa.s]
    pub mu_low: f64,
    /// Viscosity at `t_high` [Pa.s]
    pub mu_high: f64,
}

/// Sommerfeld-number formula used to weight the perturbation coefficients.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SommerfeldKind {
    /// Classic definition from speed, geometry and the applied load.
    AppliedLoad,
    /// Evaluated from the film force at the perturbed point.
    #[default]
    FilmForce,
}

/// Tolerances and iteration budgets for the nested solvers.
///
/// The field/mixing tolerances close the two thermal convergence loops; the
/// iteration caps turn a stalled loop into a reported divergence instead of a
/// hang.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SolverSettings {
    /// Relative temperature-field change closing the per-pad inner loop
    pub field_tol: f64,
    /// Mixed-temperature change [degC] closing the outer loop
    pub mixing_tol: f64,
    /// Inner (pressure/temperature/viscosity) iteration cap per pad
    pub max_field_iters: usize,
    /// Outer (inter-pad mixing) iteration cap
    pub max_mixing_iters: usize,
    /// Simplex termination tolerance on position and objective
    pub equilibrium_tol: f64,
    /// Simplex iteration cap for the equilibrium search
    pub max_equilibrium_iters: usize,
    /// Whirl frequency ratio gamma for the linearized coefficient solve
    pub whirl_ratio: f64,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            field_tol: 1e-3,
            mixing_tol: 1e-2,
            max_field_iters: 200,
            max_mixing_iters: 100,
            equilibrium_tol: 1e-2,
            max_equilibrium_iters: 1000,
            whirl_ratio: 1e-3,
        }
    }
}

/// Complete description of a two-pad cylindrical journal bearing.
///
/// All scalars are SI (meters, Pa.s, rad/s, newtons) except temperatures,
/// which are degC to match the lubricant data sheets the calibration comes
/// from. Immutable after validation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BearingConfig {
    /// Bearing axial length [m]
    pub length: f64,
    /// Journal radius [m]
    pub radius: f64,
    /// Radial clearance [m]
    pub clearance: f64,
    /// Arc length of each pad [deg]
    pub pad_arc_deg: f64,
    /// Axial cell count
    pub n_z: usize,
    /// Circumferential cell count per pad
    pub n_theta: usize,
    /// Reference viscosity [Pa.s]
    pub mu_ref: f64,
    /// Rotor speed [rad/s]
    pub speed: f64,
    /// External load, X component [N]
    pub load_x: f64,
    /// External load, Y component [N]
    pub load_y: f64,
    /// Lubricant thermal conductivity [W/(m.K)]
    pub conductivity: f64,
    /// Lubricant specific heat [J/(kg.K)]
    pub specific_heat: f64,
    /// Lubricant density [kg/m^3]
    pub density: f64,
    /// Oil reservoir temperature [degC]
    pub reservoir_temperature: f64,
    /// Fraction of reservoir oil blended into each pad's inlet, one per pad
    pub mixing_ratio: Vec<f64>,
    /// Viscosity-temperature calibration points
    pub calibration: ViscosityCalibration,
    /// Sommerfeld formula for the perturbation coefficients
    #[serde(default)]
    pub sommerfeld: SommerfeldKind,
    /// Solver tolerances and iteration budgets
    #[serde(default)]
    pub settings: SolverSettings,
}

impl BearingConfig {
    /// Check every construction invariant; called by `Bearing::new` before
    /// any solving begins.
    pub fn validate(&self) -> ConfigResult<()> {
        for (what, value) in [
            ("length", self.length),
            ("radius", self.radius),
            ("clearance", self.clearance),
            ("pad arc", self.pad_arc_deg),
            ("reference viscosity", self.mu_ref),
            ("speed", self.speed),
            ("thermal conductivity", self.conductivity),
            ("specific heat", self.specific_heat),
            ("density", self.density),
            ("reservoir temperature", self.reservoir_temperature),
            ("calibration temperature", self.calibration.t_low),
            ("calibration temperature", self.calibration.t_high),
            ("calibration viscosity", self.calibration.mu_low),
            ("calibration viscosity", self.calibration.mu_high),
        ] {
            if !(value > 0.0) {
                return Err(ConfigError::NonPositive { what, value });
            }
        }

        if self.n_z < 1 || self.n_theta < 1 {
            return Err(ConfigError::EmptyMesh {
                n_z: self.n_z,
                n_theta: self.n_theta,
            });
        }

        let max_deg = 360.0 / N_PADS as f64;
        if self.pad_arc_deg > max_deg {
            return Err(ConfigError::PadArcTooWide {
                arc_deg: self.pad_arc_deg,
                max_deg,
            });
        }

        if self.mixing_ratio.len() != N_PADS {
            return Err(ConfigError::MixingRatioCount {
                expected: N_PADS,
                found: self.mixing_ratio.len(),
            });
        }
        for &f in &self.mixing_ratio {
            if !(0.0..=1.0).contains(&f) {
                return Err(ConfigError::MixingRatioRange { value: f });
            }
        }

        if self.calibration.t_low == self.calibration.t_high {
            return Err(ConfigError::DegenerateCalibration {
                t: self.calibration.t_low,
            });
        }

        Ok(())
    }

    /// Magnitude of the applied load [N].
    pub fn load_magnitude(&self) -> f64 {
        self.load_x.hypot(self.load_y)
    }

    /// Example case used across the tests and the CLI demo: a 400 mm bore
    /// two-pad bearing running at 900 rpm under a 112.8 kN vertical load.
    pub fn example() -> Self {
        Self {
            length: 0.263144,
            radius: 0.2,
            clearance: 1.95e-4,
            pad_arc_deg: 176.0,
            n_z: 3,
            n_theta: 11,
            mu_ref: 0.02,
            speed: tb_core::units::rpm_to_rad_s(900.0),
            load_x: 0.0,
            load_y: -112_814.91,
            conductivity: 0.15327,
            specific_heat: 1915.24,
            density: 854.952,
            reservoir_temperature: 50.0,
            mixing_ratio: vec![0.52, 0.48],
            calibration: ViscosityCalibration {
                t_low: 50.0,
                t_high: 80.0,
                mu_low: 0.02,
                mu_high: 0.01,
            },
            sommerfeld: SommerfeldKind::FilmForce,
            settings: SolverSettings::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn example_case_is_valid() {
        BearingConfig::example().validate().unwrap();
    }

    #[test]
    fn rejects_coinciding_calibration_temperatures() {
        let mut cfg = BearingConfig::example();
        cfg.calibration.t_high = cfg.calibration.t_low;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::DegenerateCalibration { .. }));
    }

    #[test]
    fn rejects_wrong_mixing_ratio_count() {
        let mut cfg = BearingConfig::example();
        cfg.mixing_ratio = vec![0.5];
        let err = cfg.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MixingRatioCount {
                expected: 2,
                found: 1
            }
        ));
    }

    #[test]
    fn rejects_empty_mesh() {
        let mut cfg = BearingConfig::example();
        cfg.n_theta = 0;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::EmptyMesh { .. }));
    }

    #[test]
    fn rejects_non_positive_scalars() {
        let mut cfg = BearingConfig::example();
        cfg.clearance = 0.0;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::NonPositive {
                what: "clearance",
                ..
            }
        ));
    }

    #[test]
    fn rejects_overlapping_pads() {
        let mut cfg = BearingConfig::example();
        cfg.pad_arc_deg = 181.0;
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::PadArcTooWide { .. }));
    }

    #[test]
    fn settings_defaults_are_bounded() {
        let s = SolverSettings::default();
        assert!(s.max_field_iters > 0);
        assert!(s.max_mixing_iters > 0);
        assert!(s.max_equilibrium_iters > 0);
    }
}
