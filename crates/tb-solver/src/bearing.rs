//! The bearing facade tying the pieces together.

use tracing::{info, warn};

use tb_bearing::{BearingConfig, ConfigError, Grid, RotorState, ViscosityFit};

use crate::coupling;
use crate::dynamics::{self, CoefficientMethod, DynamicCoefficients};
use crate::equilibrium::{self, Equilibrium};
use crate::error::SolverResult;
use crate::fields::FieldState;
use crate::forces;
use crate::lund;

/// Starting point for the equilibrium search when none is given.
pub const DEFAULT_GUESS: [f64; 2] = [0.1, -0.1];

/// A validated bearing plus its last-found equilibrium.
///
/// Holds only configuration-derived constants; every field evaluation
/// allocates its own `FieldState`, so `&Bearing` evaluations can run
/// concurrently (the perturbation trials do).
#[derive(Debug, Clone)]
pub struct Bearing {
    config: BearingConfig,
    grid: Grid,
    fit: ViscosityFit,
    equilibrium: Option<Equilibrium>,
}

/// Converged fields and the film force at one rotor position.
#[derive(Debug, Clone)]
pub struct FilmSolution {
    pub fields: FieldState,
    pub force_x: f64,
    pub force_y: f64,
}

impl Bearing {
    /// Validate the configuration and derive the grid and viscosity fit.
    pub fn new(config: BearingConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let fit = ViscosityFit::from_calibration(&config.calibration)?;
        let grid = Grid::new(&config);
        Ok(Self {
            config,
            grid,
            fit,
            equilibrium: None,
        })
    }

    pub fn config(&self) -> &BearingConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn viscosity_fit(&self) -> &ViscosityFit {
        &self.fit
    }

    /// Last equilibrium found by `find_equilibrium`, if any.
    pub fn equilibrium(&self) -> Option<Equilibrium> {
        self.equilibrium
    }

    /// Run the coupled solve at one rotor position and integrate the force.
    pub fn film_solution(&self, rotor: &RotorState) -> SolverResult<FilmSolution> {
        let fields = coupling::converge_fields(&self.config, &self.grid, &self.fit, rotor)?;
        let (force_x, force_y) = forces::film_forces(&self.grid, &fields)?;
        Ok(FilmSolution {
            fields,
            force_x,
            force_y,
        })
    }

    /// Film reaction force at one rotor position.
    pub fn forces(&self, rotor: &RotorState) -> SolverResult<(f64, f64)> {
        let solution = self.film_solution(rotor)?;
        Ok((solution.force_x, solution.force_y))
    }

    /// Search for the equilibrium position from `guess` and store it.
    pub fn find_equilibrium(&mut self, guess: [f64; 2]) -> SolverResult<Equilibrium> {
        let eq = equilibrium::search(self, guess)?;
        if eq.converged {
            info!(
                eccentricity = eq.eccentricity,
                attitude = eq.attitude,
                residual = eq.residual,
                iterations = eq.iterations,
                "equilibrium found"
            );
        } else {
            warn!(
                residual = eq.residual,
                iterations = eq.iterations,
                "equilibrium search exhausted its budget; keeping best point"
            );
        }
        self.equilibrium = Some(eq);
        Ok(eq)
    }

    /// Stiffness and damping matrices about the equilibrium position.
    ///
    /// Runs the equilibrium search from the default guess first if none has
    /// been computed yet.
    pub fn coefficients(&mut self, method: CoefficientMethod) -> SolverResult<DynamicCoefficients> {
        let eq = match self.equilibrium {
            Some(eq) => eq,
            None => self.find_equilibrium(DEFAULT_GUESS)?,
        };

        match method {
            CoefficientMethod::Lund => {
                let rotor = RotorState::at_position(eq.eccentricity, eq.attitude);
                let solution = self.film_solution(&rotor)?;
                lund::coefficients(&self.config, &self.grid, &rotor, &solution.fields)
            }
            CoefficientMethod::Perturbation => dynamics::perturbation(self, &eq),
        }
    }
}
