//! Stiffness and damping matrices by finite-difference perturbation.
//!
//! Eight full coupled solves around the equilibrium point: displacement
//! perturbations along X and Y for the stiffness terms, velocity
//! perturbations for the damping terms. Each difference quotient is weighted
//! by a Sommerfeld number evaluated from the pair of rollout points. The
//! trials are independent, so they run on the rayon pool.

use nalgebra::Matrix2;
use rayon::prelude::*;

use tb_bearing::{BearingConfig, RotorState, SommerfeldKind};

use crate::bearing::Bearing;
use crate::equilibrium::Equilibrium;
use crate::error::{SolverError, SolverResult};

/// Which linearization produces the coefficient matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoefficientMethod {
    /// One extra complex linear solve on the converged equilibrium field.
    #[default]
    Lund,
    /// Eight perturbed re-runs of the nonlinear solve.
    Perturbation,
}

/// Dimensional 2x2 stiffness [N/m] and damping [N.s/m] matrices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DynamicCoefficients {
    pub stiffness: Matrix2<f64>,
    pub damping: Matrix2<f64>,
}

impl DynamicCoefficients {
    pub fn is_finite(&self) -> bool {
        self.stiffness.iter().chain(self.damping.iter()).all(|v| v.is_finite())
    }
}

/// Sommerfeld number weighting a difference quotient.
pub(crate) fn sommerfeld(cfg: &BearingConfig, force_x: f64, force_y: f64) -> f64 {
    let aspect = (cfg.length / (2.0 * cfg.radius)).powi(2);
    let s = match cfg.sommerfeld {
        SommerfeldKind::AppliedLoad => {
            (cfg.mu_ref * cfg.radius.powi(3) * cfg.length * cfg.speed)
                / (std::f64::consts::PI * cfg.clearance.powi(2) * cfg.load_magnitude())
        }
        SommerfeldKind::FilmForce => 1.0 / (2.0 * aspect * force_x.hypot(force_y)),
    };
    s * aspect
}

/// Finite-difference coefficients around the given equilibrium.
pub(crate) fn perturbation(
    bearing: &Bearing,
    equilibrium: &Equilibrium,
) -> SolverResult<DynamicCoefficients> {
    let cfg = bearing.config();
    let (ecc, att) = (equilibrium.eccentricity, equilibrium.attitude);

    let x_eq = ecc * cfg.clearance * att.cos();
    let y_eq = ecc * cfg.clearance * att.sin();

    // Displacement step: a fixed fraction of the clearance resolved along
    // the attitude direction. Velocity step: a small fraction of the surface
    // speed resolved the same way.
    const D_ECC: f64 = 0.001;
    const D_VEL: f64 = 1.0e-6;
    let eps_x = (D_ECC * cfg.clearance * att.cos()).abs();
    let eps_y = (D_ECC * cfg.clearance * att.sin()).abs();
    let surface = cfg.speed * cfg.radius;
    let eps_vx = D_VEL * (surface * att.sin()).abs();
    let eps_vy = D_VEL * (surface * att.cos()).abs();

    for (what, eps) in [
        ("x displacement", eps_x),
        ("y displacement", eps_y),
        ("x velocity", eps_vx),
        ("y velocity", eps_vy),
    ] {
        if eps <= 0.0 {
            return Err(SolverError::Numeric {
                what: format!("degenerate {what} perturbation at attitude {att}"),
            });
        }
    }

    let trials: [(f64, f64, f64, f64); 8] = [
        (x_eq + eps_x, y_eq, 0.0, 0.0),
        (x_eq - eps_x, y_eq, 0.0, 0.0),
        (x_eq, y_eq + eps_y, 0.0, 0.0),
        (x_eq, y_eq - eps_y, 0.0, 0.0),
        (x_eq, y_eq, eps_vx, 0.0),
        (x_eq, y_eq, -eps_vx, 0.0),
        (x_eq, y_eq, 0.0, eps_vy),
        (x_eq, y_eq, 0.0, -eps_vy),
    ];

    let f: Vec<(f64, f64)> = trials
        .par_iter()
        .map(|&(x, y, vx, vy)| {
            let rotor = RotorState::from_dimensional(cfg, x, y, vx, vy);
            bearing.forces(&rotor)
        })
        .collect::<SolverResult<Vec<_>>>()?;

    let dx = eps_x / cfg.clearance;
    let dy = eps_y / cfg.clearance;
    let dvx = eps_vx / cfg.clearance / cfg.speed;
    let dvy = eps_vy / cfg.clearance / cfg.speed;

    let kxx = -sommerfeld(cfg, f[0].0, f[1].1) * ((f[0].0 - f[1].0) / dx);
    let kxy = -sommerfeld(cfg, f[2].0, f[3].1) * ((f[2].0 - f[3].0) / dy);
    let kyx = -sommerfeld(cfg, f[0].1, f[1].1) * ((f[0].1 - f[1].1) / dx);
    let kyy = -sommerfeld(cfg, f[2].1, f[3].1) * ((f[2].1 - f[3].1) / dy);

    let cxx = -sommerfeld(cfg, f[4].0, f[5].0) * ((f[5].0 - f[4].0) / dvx);
    let cxy = -sommerfeld(cfg, f[6].0, f[7].0) * ((f[7].0 - f[6].0) / dvy);
    let cyx = -sommerfeld(cfg, f[4].1, f[5].1) * ((f[5].1 - f[4].1) / dvx);
    let cyy = -sommerfeld(cfg, f[6].1, f[7].1) * ((f[7].1 - f[6].1) / dvy);

    let w = cfg.load_magnitude();
    let k_scale = w / cfg.clearance;
    let c_scale = w / (cfg.clearance * cfg.speed);

    Ok(DynamicCoefficients {
        stiffness: Matrix2::new(kxx, kxy, kyx, kyy) * k_scale,
        damping: Matrix2::new(cxx, cxy, cyx, cyy) * c_scale,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sommerfeld_kinds_differ() {
        let cfg = BearingConfig::example();
        let s_force = sommerfeld(&cfg, 0.0, -1.0e5);
        let mut cfg2 = cfg.clone();
        cfg2.sommerfeld = SommerfeldKind::AppliedLoad;
        let s_load = sommerfeld(&cfg2, 0.0, -1.0e5);
        assert!(s_force > 0.0);
        assert!(s_load > 0.0);
        assert!((s_force - s_load).abs() > 1e-12);
    }
}
