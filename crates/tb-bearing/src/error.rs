//! Error types for bearing configuration.

use thiserror::Error;

/// Errors raised while validating a bearing description.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("viscosity calibration temperatures coincide ({t} degC)")]
    DegenerateCalibration { t: f64 },

    #[error("expected {expected} mixing ratios (one per pad), found {found}")]
    MixingRatioCount { expected: usize, found: usize },

    #[error("mixing ratio outside [0, 1]: {value}")]
    MixingRatioRange { value: f64 },

    #[error("mesh needs at least one cell per direction (n_z={n_z}, n_theta={n_theta})")]
    EmptyMesh { n_z: usize, n_theta: usize },

    #[error("pad arc {arc_deg} deg exceeds the {max_deg} deg available per pad")]
    PadArcTooWide { arc_deg: f64, max_deg: f64 },

    #[error("non-positive {what}: {value}")]
    NonPositive { what: &'static str, value: f64 },
}

pub type ConfigResult<T> = Result<T, ConfigError>;
