//! The fixed-point loop coupling viscosity, pressure and temperature.
//!
//! Outer loop: inter-pad mixing. Each pass sweeps both pads; a pad's exit
//! temperature blends with reservoir oil to form the next pad's inlet. The
//! pass repeats until the first pad's mixed temperature stops moving.
//!
//! Inner loop, per pad: pressure solve -> temperature solve -> viscosity
//! update from the fitted power law, until the temperature field's relative
//! change drops below tolerance.
//!
//! Both loops carry iteration caps; exhausting one is a reported divergence,
//! not a hang.

use nalgebra::DMatrix;
use tracing::debug;

use tb_bearing::{BearingConfig, Grid, N_PADS, RotorState, ViscosityFit};

use crate::error::{SolverError, SolverResult};
use crate::fields::FieldState;
use crate::{energy, pressure};

/// Run the coupled solve for one rotor position.
///
/// Stateless with respect to the bearing: the converged `FieldState` is the
/// only output, so concurrent evaluations at different positions are safe.
pub fn converge_fields(
    cfg: &BearingConfig,
    grid: &Grid,
    fit: &ViscosityFit,
    rotor: &RotorState,
) -> SolverResult<FieldState> {
    let settings = &cfg.settings;
    let t_reserv = cfg.reservoir_temperature;
    let mut t_mist = [t_reserv; N_PADS];

    let mut state = FieldState::fresh(grid, t_mist);
    let mut mixed_converged = false;

    for pass in 0..settings.max_mixing_iters {
        let t_first_prev = t_mist[0];
        state = FieldState::fresh(grid, t_mist);

        for pad in 0..N_PADS {
            let t_in = t_mist[(pad + N_PADS - 1) % N_PADS];
            run_pad(cfg, grid, fit, rotor, t_in, &mut state, &mut t_mist, pad)?;
        }

        state.inlet_temperature = t_mist;
        let shift = (t_mist[0] - t_first_prev).abs();
        debug!(pass, t_mist_first = t_mist[0], shift, "mixing pass");
        if shift < settings.mixing_tol {
            mixed_converged = true;
            break;
        }
    }

    if !mixed_converged {
        return Err(SolverError::Divergence {
            what: format!(
                "mixed inlet temperature still moving after {} passes",
                settings.max_mixing_iters
            ),
        });
    }

    let scale = pressure::pressure_scale(cfg);
    for pad in 0..N_PADS {
        state.pressure_dim[pad] = &state.pressure[pad] * scale;
    }
    Ok(state)
}

/// Inner loop for one pad within one mixing pass.
#[allow(clippy::too_many_arguments)]
fn run_pad(
    cfg: &BearingConfig,
    grid: &Grid,
    fit: &ViscosityFit,
    rotor: &RotorState,
    inlet_temperature: f64,
    state: &mut FieldState,
    t_mist: &mut [f64; N_PADS],
    pad: usize,
) -> SolverResult<()> {
    let settings = &cfg.settings;
    let t_reserv = cfg.reservoir_temperature;

    let mut t_old = DMatrix::from_element(grid.n_z, grid.n_theta, 1.0);
    let mut t_new = DMatrix::from_element(grid.n_z, grid.n_theta, 1.2);
    let mut field_converged = false;

    for iter in 0..settings.max_field_iters {
        let change = (&t_new - &t_old).norm() / t_old.norm();
        if change < settings.field_tol {
            field_converged = true;
            debug!(pad, iter, "temperature field converged");
            break;
        }
        t_old = t_new.clone();

        let p = pressure::solve_pad(cfg, grid, rotor, &state.viscosity[pad], pad)?;
        let (dp_dy, dp_dz) = pressure::gradients(&p, grid);

        t_new = energy::solve_pad(
            cfg,
            grid,
            rotor,
            inlet_temperature,
            &p,
            &dp_dy,
            &dp_dz,
            &state.viscosity[pad],
            &mut state.turb_viscosity[pad],
            pad,
        )?;

        state.pressure[pad] = p;
        state.dp_dy[pad] = dp_dy;
        state.dp_dz[pad] = dp_dz;
        state.temperature[pad] = t_new.clone();

        // Exit-row mean blends with reservoir oil into the next pad's inlet.
        let t_dim = state.temperature_dim(t_reserv, pad);
        let t_end = t_dim.column(grid.n_theta - 1).sum() / grid.n_z as f64;
        let fat = cfg.mixing_ratio[pad];
        t_mist[pad] = fat * t_reserv + (1.0 - fat) * t_end;

        // Viscosity follows the fresh temperatures.
        for i in 0..grid.n_z {
            for j in 0..grid.n_theta {
                state.viscosity[pad][(i, j)] = fit.eval(t_dim[(i, j)]) / cfg.mu_ref;
            }
        }
    }

    if !field_converged {
        return Err(SolverError::Divergence {
            what: format!(
                "temperature field on pad {pad} not converged after {} iterations",
                settings.max_field_iters
            ),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_rotor_converges_to_reservoir_mixing() {
        let cfg = BearingConfig::example();
        let grid = Grid::new(&cfg);
        let fit = ViscosityFit::from_calibration(&cfg.calibration).unwrap();
        let rotor = RotorState::at_position(0.0, 0.0);

        let state = converge_fields(&cfg, &grid, &fit, &rotor).unwrap();
        // No wedge: the pressure field vanishes but shear still heats the film.
        assert!(state.min_pressure() >= 0.0);
        for pad in 0..N_PADS {
            assert!(state.inlet_temperature[pad] >= cfg.reservoir_temperature);
        }
    }

    #[test]
    fn tiny_iteration_budget_is_reported_as_divergence() {
        let mut cfg = BearingConfig::example();
        cfg.settings.max_mixing_iters = 1;
        cfg.settings.mixing_tol = 1e-12;
        let grid = Grid::new(&cfg);
        let fit = ViscosityFit::from_calibration(&cfg.calibration).unwrap();
        let rotor = RotorState::at_position(0.3, -0.5);

        let err = converge_fields(&cfg, &grid, &fit, &rotor).unwrap_err();
        assert!(matches!(err, SolverError::Divergence { .. }));
    }
}
