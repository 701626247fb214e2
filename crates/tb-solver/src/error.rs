//! Error types for the coupled film solver.

use tb_bearing::ConfigError;
use tb_core::TbError;
use thiserror::Error;

/// Errors that can occur while solving the film equations.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Divergence: {what}")]
    Divergence { what: String },

    #[error("Singular system: {what}")]
    Singular { what: String },

    #[error("Numeric error: {what}")]
    Numeric { what: String },

    #[error("Core error: {0}")]
    Core(#[from] TbError),
}

pub type SolverResult<T> = Result<T, SolverError>;
