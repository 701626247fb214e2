//! Equilibrium position of the journal center.

use nalgebra::DVector;
use tracing::debug;

use tb_bearing::RotorState;

use crate::bearing::Bearing;
use crate::error::SolverResult;
use crate::simplex::{SimplexConfig, simplex_minimize};

/// Rotor-center offset balancing the film force against the external load.
///
/// `converged` reports whether the simplex met its tolerances within the
/// iteration budget; when it did not, the best point found is still
/// returned so callers can judge the residual themselves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Equilibrium {
    /// Eccentricity ratio (offset over clearance)
    pub eccentricity: f64,
    /// Attitude angle [rad]
    pub attitude: f64,
    /// Remaining force-balance residual [N]
    pub residual: f64,
    /// Simplex iterations spent
    pub iterations: usize,
    /// Whether the search met its tolerances
    pub converged: bool,
}

impl Equilibrium {
    pub fn position(&self) -> [f64; 2] {
        [self.eccentricity, self.attitude]
    }
}

/// Minimize the force-balance residual over (eccentricity, attitude).
pub(crate) fn search(bearing: &Bearing, guess: [f64; 2]) -> SolverResult<Equilibrium> {
    let cfg = bearing.config();
    let config = SimplexConfig {
        max_iterations: cfg.settings.max_equilibrium_iters,
        x_tol: cfg.settings.equilibrium_tol,
        f_tol: cfg.settings.equilibrium_tol,
    };

    let objective = |x: &DVector<f64>| {
        let rotor = RotorState::at_position(x[0], x[1]);
        let (fx, fy) = bearing.forces(&rotor)?;
        let score = (cfg.load_x + fx).hypot(cfg.load_y + fy);
        debug!(
            eccentricity = x[0],
            attitude = x[1],
            score,
            "equilibrium trial"
        );
        Ok(score)
    };

    let result = simplex_minimize(DVector::from_column_slice(&guess), objective, &config)?;
    Ok(Equilibrium {
        eccentricity: result.x[0],
        attitude: result.x[1],
        residual: result.value,
        iterations: result.iterations,
        converged: result.converged,
    })
}
