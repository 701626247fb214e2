//! Film reaction force from the converged pressure field.

use tb_bearing::{Grid, N_PADS};
use tb_core::ensure_finite;

use crate::error::SolverResult;
use crate::fields::FieldState;

/// Integrate dimensional pressure over both pads, resolved into bearing-frame
/// X/Y components. The sign flips because the film pushes back on the shaft.
pub fn film_forces(grid: &Grid, state: &FieldState) -> SolverResult<(f64, f64)> {
    let area = grid.dy_dim * grid.dz_dim;
    let mut fx = 0.0;
    let mut fy = 0.0;

    for pad in 0..N_PADS {
        let p = &state.pressure_dim[pad];
        for i in 0..grid.n_z {
            for j in 0..grid.n_theta {
                let theta = grid.theta(pad, j);
                fx += p[(i, j)] * area * theta.cos();
                fy += p[(i, j)] * area * theta.sin();
            }
        }
    }

    Ok((
        ensure_finite(-fx, "film force x")?,
        ensure_finite(-fy, "film force y")?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::DMatrix;
    use tb_bearing::BearingConfig;

    #[test]
    fn uniform_pressure_on_opposed_pads_cancels() {
        let cfg = BearingConfig::example();
        let grid = Grid::new(&cfg);
        let mut state = FieldState::fresh(&grid, [cfg.reservoir_temperature; N_PADS]);
        for pad in 0..N_PADS {
            state.pressure_dim[pad] = DMatrix::from_element(grid.n_z, grid.n_theta, 1.0e5);
        }
        // Pad 1 mirrors pad 0 across the bore center, so equal fields cancel.
        let (fx, fy) = film_forces(&grid, &state).unwrap();
        assert!(fx.abs() < 1.0);
        assert!(fy.abs() < 1.0);
    }
}
