//! Power-law viscosity-temperature model.

use crate::config::ViscosityCalibration;
use crate::error::{ConfigError, ConfigResult};

/// Fitted coefficients of `mu(T) = a * T^b` with T in degC and mu in Pa.s.
///
/// Two calibration points determine both parameters exactly, so the
/// least-squares fit reduces to the log-log interpolation through them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViscosityFit {
    a: f64,
    b: f64,
}

impl ViscosityFit {
    pub fn from_calibration(cal: &ViscosityCalibration) -> ConfigResult<Self> {
        if cal.t_low == cal.t_high {
            return Err(ConfigError::DegenerateCalibration { t: cal.t_low });
        }

        let b = (cal.mu_low / cal.mu_high).ln() / (cal.t_low / cal.t_high).ln();
        let a = cal.mu_low / cal.t_low.powf(b);
        Ok(Self { a, b })
    }

    /// Viscosity [Pa.s] at temperature `t` [degC].
    #[inline]
    pub fn eval(&self, t: f64) -> f64 {
        self.a * t.powf(self.b)
    }

    pub fn coefficients(&self) -> (f64, f64) {
        (self.a, self.b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAL: ViscosityCalibration = ViscosityCalibration {
        t_low: 50.0,
        t_high: 80.0,
        mu_low: 0.02,
        mu_high: 0.01,
    };

    #[test]
    fn reproduces_calibration_points() {
        let fit = ViscosityFit::from_calibration(&CAL).unwrap();
        assert!((fit.eval(CAL.t_low) - CAL.mu_low).abs() < 1e-12);
        assert!((fit.eval(CAL.t_high) - CAL.mu_high).abs() < 1e-12);
    }

    #[test]
    fn viscosity_decreases_with_temperature() {
        let fit = ViscosityFit::from_calibration(&CAL).unwrap();
        let (_, b) = fit.coefficients();
        assert!(b < 0.0);
        assert!(fit.eval(65.0) < CAL.mu_low);
        assert!(fit.eval(65.0) > CAL.mu_high);
    }

    #[test]
    fn coinciding_temperatures_are_rejected() {
        let cal = ViscosityCalibration {
            t_high: CAL.t_low,
            ..CAL
        };
        let err = ViscosityFit::from_calibration(&cal).unwrap_err();
        assert!(matches!(err, ConfigError::DegenerateCalibration { .. }));
    }
}
