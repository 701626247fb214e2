//! Discretized energy equation, one pad at a time.
//!
//! Convection follows the wedge flow in theta and the pressure-driven flow
//! in Z; conduction acts on both axes. Viscous heating and pressure work
//! enter the right-hand side from the frozen pressure field of the current
//! outer pass. The pad's leading edge carries the mixed inlet temperature of
//! the upstream pad, injected Robin-style through the west coefficient.

use nalgebra::{DMatrix, DVector};
use tb_bearing::{film, BearingConfig, Grid, RotorState};

use crate::error::{SolverError, SolverResult};

/// Solve the pad's dimensionless temperature field (T over reservoir T).
///
/// `turb_viscosity` is relaxed in place cell by cell: each call refines the
/// eddy-viscosity estimate from the current shear field before using it in
/// the assembly, so repeated inner iterations converge the correction
/// together with the temperature.
#[allow(clippy::too_many_arguments)]
pub fn solve_pad(
    cfg: &BearingConfig,
    grid: &Grid,
    rotor: &RotorState,
    inlet_temperature: f64,
    pressure: &DMatrix<f64>,
    dp_dy: &DMatrix<f64>,
    dp_dz: &DMatrix<f64>,
    viscosity: &DMatrix<f64>,
    turb_viscosity: &mut DMatrix<f64>,
    pad: usize,
) -> SolverResult<DMatrix<f64>> {
    let (nz, nt) = (grid.n_z, grid.n_theta);
    let nk = nz * nt;
    let mut a = DMatrix::zeros(nk, nk);
    let mut b = DVector::zeros(nk);

    let beta = grid.pad_arc;
    let beta2 = beta * beta;
    let r2 = cfg.radius * cfg.radius;
    let l2 = cfg.length * cfg.length;
    let rho_cp = cfg.density * cfg.specific_heat;
    let t_in_ratio = inlet_temperature / cfg.reservoir_temperature;

    for i in 0..nz {
        for j in 0..nt {
            let k = i * nt + j;
            let theta = grid.theta(pad, j);
            let h = film::film_thickness(rotor, theta);
            let h_rate = film::film_rate(rotor, theta);

            // Refine the eddy viscosity at this cell from the current shear.
            let re = film::local_reynolds(cfg, h);
            let delta = film::turbulence_factor(re);
            let mu_t = film::eddy_viscosity(
                cfg,
                h,
                viscosity[(i, j)],
                turb_viscosity[(i, j)],
                dp_dy[(i, j)],
                dp_dz[(i, j)],
                delta,
            );
            turb_viscosity[(i, j)] = mu_t;

            let conduction_y =
                (cfg.conductivity * h * grid.d_z) / (rho_cp * cfg.speed * beta2 * r2 * grid.d_y);
            let conduction_z =
                (cfg.conductivity * h * grid.d_y) / (rho_cp * cfg.speed * l2 * grid.d_z);

            let ae = -conduction_y;
            let aw = (h.powi(3) * dp_dy[(i, j)] * grid.d_z) / (12.0 * mu_t * beta2)
                - h * grid.d_z / (2.0 * beta)
                - conduction_y;
            let an = -conduction_z;
            let a_s = (r2 * h.powi(3) * dp_dz[(i, j)] * grid.d_y) / (12.0 * l2 * mu_t)
                - conduction_z;
            let ap = -(ae + aw + an + a_s);

            // Pressure work + shear heating sources.
            let aux = (cfg.speed * cfg.mu_ref) / (rho_cp * cfg.reservoir_temperature * cfg.clearance);
            let area = grid.d_y * grid.d_z;
            let src_work = (cfg.mu_ref * cfg.speed * r2 * area * pressure[(i, j)] * h_rate)
                / (rho_cp * cfg.reservoir_temperature * cfg.clearance * cfg.clearance);
            let src_squeeze = (cfg.speed * cfg.mu_ref * h_rate * h_rate * 4.0 * mu_t * area)
                / (rho_cp * cfg.reservoir_temperature * 3.0 * h);
            let src_couette = aux * (mu_t * r2 * area) / (h * cfg.clearance);
            let src_poiseuille_y = aux
                * (r2 * h.powi(3) * dp_dy[(i, j)].powi(2) * area)
                / (12.0 * cfg.clearance * beta2 * mu_t);
            let src_poiseuille_z = aux
                * (r2 * r2 * h.powi(3) * dp_dz[(i, j)].powi(2) * area)
                / (12.0 * cfg.clearance * l2 * mu_t);
            let mut rhs = src_work + src_squeeze + src_couette + src_poiseuille_y + src_poiseuille_z;

            let mut diag = ap;
            if j + 1 < nt {
                a[(k, k + 1)] = ae;
            } else {
                // trailing edge: outflow, fold with positive sign
                diag += ae;
            }
            if j > 0 {
                a[(k, k - 1)] = aw;
            } else {
                // leading edge: upstream pad's mixed temperature enters here
                diag -= aw;
                rhs -= 2.0 * aw * t_in_ratio;
            }
            if i + 1 < nz {
                a[(k, k + nt)] = an;
            } else {
                diag += an;
            }
            if i > 0 {
                a[(k, k - nt)] = a_s;
            } else {
                diag += a_s;
            }
            a[(k, k)] = diag;
            b[k] = rhs;
        }
    }

    let t = a.lu().solve(&b).ok_or_else(|| SolverError::Singular {
        what: format!("energy system on pad {pad}"),
    })?;

    let mut field = DMatrix::zeros(nz, nt);
    for i in 0..nz {
        for j in 0..nt {
            field[(i, j)] = t[i * nt + j];
        }
    }
    Ok(field)
}
