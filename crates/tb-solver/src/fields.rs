//! Per-evaluation field storage.
//!
//! A `FieldState` belongs to one coupling-loop evaluation: it is created
//! fresh for each outer thermal pass and handed back to the caller once
//! converged. The bearing itself never stores one, so concurrent
//! evaluations at different rotor positions cannot alias.

use nalgebra::DMatrix;
use tb_bearing::{Grid, N_PADS};

/// Pressure, temperature and viscosity fields for both pads.
///
/// Every matrix is `n_z x n_theta` (axial rows, circumferential columns).
/// Pressure and temperature are dimensionless; `pressure_dim` is in Pa.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub pressure: [DMatrix<f64>; N_PADS],
    pub pressure_dim: [DMatrix<f64>; N_PADS],
    pub temperature: [DMatrix<f64>; N_PADS],
    /// Fitted film viscosity over the reference viscosity
    pub viscosity: [DMatrix<f64>; N_PADS],
    /// Turbulence-corrected viscosity ratio consumed by the energy equation
    pub turb_viscosity: [DMatrix<f64>; N_PADS],
    pub dp_dy: [DMatrix<f64>; N_PADS],
    pub dp_dz: [DMatrix<f64>; N_PADS],
    /// Mixed inlet temperature per pad [degC]
    pub inlet_temperature: [f64; N_PADS],
}

impl FieldState {
    /// Starting state for one outer thermal pass.
    ///
    /// The seed values keep the first inner iteration well defined: unit
    /// dimensionless temperature, slightly-off viscosity ratios so the first
    /// relative-change test cannot divide by zero.
    pub fn fresh(grid: &Grid, inlet_temperature: [f64; N_PADS]) -> Self {
        let filled = |v: f64| -> [DMatrix<f64>; N_PADS] {
            std::array::from_fn(|_| DMatrix::from_element(grid.n_z, grid.n_theta, v))
        };
        Self {
            pressure: filled(0.0),
            pressure_dim: filled(0.0),
            temperature: filled(1.0),
            viscosity: filled(1.1),
            turb_viscosity: filled(1.3),
            dp_dy: filled(0.0),
            dp_dz: filled(0.0),
            inlet_temperature,
        }
    }

    /// Dimensional temperature field [degC] of one pad.
    pub fn temperature_dim(&self, reservoir: f64, pad: usize) -> DMatrix<f64> {
        &self.temperature[pad] * reservoir
    }

    /// Smallest pressure over both pads (after clamping this is >= 0).
    pub fn min_pressure(&self) -> f64 {
        self.pressure
            .iter()
            .flat_map(|p| p.iter().copied())
            .fold(f64::INFINITY, f64::min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tb_bearing::BearingConfig;

    #[test]
    fn fresh_state_shapes_match_grid() {
        let cfg = BearingConfig::example();
        let grid = Grid::new(&cfg);
        let state = FieldState::fresh(&grid, [50.0; N_PADS]);
        for pad in 0..N_PADS {
            assert_eq!(state.pressure[pad].nrows(), grid.n_z);
            assert_eq!(state.pressure[pad].ncols(), grid.n_theta);
            assert!(state.temperature[pad].iter().all(|&t| t == 1.0));
        }
        assert_eq!(state.min_pressure(), 0.0);
    }
}
