//! tb-bearing: description of a two-pad cylindrical journal bearing.
//!
//! Contains:
//! - config (validated bearing description + solver settings)
//! - grid (axial/circumferential finite-volume discretization)
//! - viscosity (power-law viscosity-temperature fit)
//! - film (film thickness, local Reynolds number, eddy-viscosity model)
//!
//! Everything here is deterministic given a `BearingConfig`; the coupled
//! field solvers live in `tb-solver`.

pub mod config;
pub mod error;
pub mod film;
pub mod grid;
pub mod viscosity;

pub use config::{BearingConfig, N_PADS, SolverSettings, SommerfeldKind, ViscosityCalibration};
pub use error::{ConfigError, ConfigResult};
pub use film::{FaceThickness, RotorState};
pub use grid::Grid;
pub use viscosity::ViscosityFit;
