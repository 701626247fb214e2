//! Coupled thermo-hydrodynamic solver for two-pad journal bearings.
//!
//! The unknowns are the film pressure and temperature over each pad,
//! closed by a temperature-dependent viscosity. `coupling` drives the
//! fixed-point iteration, `bearing` exposes the user-facing facade:
//! equilibrium search plus the two dynamic-coefficient linearizations.

pub mod bearing;
pub mod coupling;
pub mod dynamics;
pub mod energy;
pub mod equilibrium;
pub mod error;
pub mod fields;
pub mod forces;
pub mod lund;
pub mod pressure;
pub mod simplex;

pub use bearing::{Bearing, DEFAULT_GUESS, FilmSolution};
pub use dynamics::{CoefficientMethod, DynamicCoefficients};
pub use equilibrium::Equilibrium;
pub use error::{SolverError, SolverResult};
pub use fields::FieldState;
pub use simplex::{SimplexConfig, SimplexResult, simplex_minimize};
