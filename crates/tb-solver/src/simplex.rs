//! Derivative-free Nelder-Mead simplex minimizer.
//!
//! Small, self-contained implementation for low-dimensional objectives whose
//! gradients are unavailable (each evaluation here is a full coupled film
//! solve). Objectives are fallible: an `Err` from the objective aborts the
//! search immediately instead of masquerading as a bad trial point.

use nalgebra::DVector;

use crate::error::SolverResult;

/// Simplex search configuration.
#[derive(Debug, Clone, Copy)]
pub struct SimplexConfig {
    /// Maximum iterations
    pub max_iterations: usize,
    /// Termination tolerance on the simplex spread in x
    pub x_tol: f64,
    /// Termination tolerance on the objective spread
    pub f_tol: f64,
}

impl Default for SimplexConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            x_tol: 1e-2,
            f_tol: 1e-2,
        }
    }
}

/// Simplex search result.
#[derive(Debug, Clone)]
pub struct SimplexResult {
    /// Best point found
    pub x: DVector<f64>,
    /// Objective value at `x`
    pub value: f64,
    /// Number of iterations
    pub iterations: usize,
    /// Whether both spread tolerances were met within the budget
    pub converged: bool,
}

// Standard coefficients: reflection, expansion, contraction, shrink.
const ALPHA: f64 = 1.0;
const GAMMA: f64 = 2.0;
const RHO: f64 = 0.5;
const SIGMA: f64 = 0.5;

// Initial simplex displacement per coordinate.
const NONZERO_STEP: f64 = 0.05;
const ZERO_STEP: f64 = 0.00025;

/// Minimize `objective` starting from `x0`.
///
/// Returns the best vertex with a `converged` flag; budget exhaustion is not
/// an error, but objective failures propagate.
pub fn simplex_minimize<F>(
    x0: DVector<f64>,
    mut objective: F,
    config: &SimplexConfig,
) -> SolverResult<SimplexResult>
where
    F: FnMut(&DVector<f64>) -> SolverResult<f64>,
{
    let n = x0.len();

    let mut points = Vec::with_capacity(n + 1);
    points.push(x0.clone());
    for d in 0..n {
        let mut x = x0.clone();
        if x[d] != 0.0 {
            x[d] *= 1.0 + NONZERO_STEP;
        } else {
            x[d] = ZERO_STEP;
        }
        points.push(x);
    }

    let mut values = Vec::with_capacity(n + 1);
    for p in &points {
        values.push(objective(p)?);
    }

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;

        // Order best -> worst.
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
        points = order.iter().map(|&i| points[i].clone()).collect();
        values = order.iter().map(|&i| values[i]).collect();

        let x_spread = points[1..]
            .iter()
            .map(|p| (p - &points[0]).amax())
            .fold(0.0, f64::max);
        let f_spread = values[1..]
            .iter()
            .map(|v| (v - values[0]).abs())
            .fold(0.0, f64::max);
        if x_spread <= config.x_tol && f_spread <= config.f_tol {
            converged = true;
            break;
        }

        // Centroid of all but the worst vertex.
        let mut centroid = DVector::zeros(n);
        for p in &points[..n] {
            centroid += p;
        }
        centroid /= n as f64;

        let reflected = &centroid + (&centroid - &points[n]) * ALPHA;
        let f_reflected = objective(&reflected)?;

        if f_reflected < values[0] {
            let expanded = &centroid + (&reflected - &centroid) * GAMMA;
            let f_expanded = objective(&expanded)?;
            if f_expanded < f_reflected {
                points[n] = expanded;
                values[n] = f_expanded;
            } else {
                points[n] = reflected;
                values[n] = f_reflected;
            }
        } else if f_reflected < values[n - 1] {
            points[n] = reflected;
            values[n] = f_reflected;
        } else {
            // Contract toward the better of worst/reflected.
            let (toward, f_toward) = if f_reflected < values[n] {
                (reflected, f_reflected)
            } else {
                (points[n].clone(), values[n])
            };
            let contracted = &centroid + (&toward - &centroid) * RHO;
            let f_contracted = objective(&contracted)?;
            if f_contracted < f_toward {
                points[n] = contracted;
                values[n] = f_contracted;
            } else {
                // Shrink toward the best vertex.
                for idx in 1..=n {
                    points[idx] = &points[0] + (&points[idx] - &points[0]) * SIGMA;
                    values[idx] = objective(&points[idx])?;
                }
            }
        }
    }

    let best = values
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);

    Ok(SimplexResult {
        x: points[best].clone(),
        value: values[best],
        iterations,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SolverError;

    #[test]
    fn quadratic_bowl() {
        let objective = |x: &DVector<f64>| -> SolverResult<f64> {
            Ok((x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2))
        };
        let config = SimplexConfig {
            x_tol: 1e-6,
            f_tol: 1e-12,
            ..Default::default()
        };
        let result = simplex_minimize(DVector::from_vec(vec![0.0, 0.0]), objective, &config).unwrap();
        assert!(result.converged);
        assert!((result.x[0] - 1.0).abs() < 1e-4);
        assert!((result.x[1] + 2.0).abs() < 1e-4);
    }

    #[test]
    fn banana_valley_improves() {
        let objective = |x: &DVector<f64>| -> SolverResult<f64> {
            Ok(100.0 * (x[1] - x[0] * x[0]).powi(2) + (1.0 - x[0]).powi(2))
        };
        let config = SimplexConfig::default();
        let result =
            simplex_minimize(DVector::from_vec(vec![-1.2, 1.0]), objective, &config).unwrap();
        assert!(result.value < 1.0);
    }

    #[test]
    fn exhausted_budget_is_flagged_not_erred() {
        let objective = |x: &DVector<f64>| -> SolverResult<f64> { Ok(x[0] * x[0] + x[1] * x[1]) };
        let config = SimplexConfig {
            max_iterations: 2,
            x_tol: 1e-12,
            f_tol: 1e-12,
            ..Default::default()
        };
        let result =
            simplex_minimize(DVector::from_vec(vec![5.0, 5.0]), objective, &config).unwrap();
        assert!(!result.converged);
        assert_eq!(result.iterations, 2);
    }

    #[test]
    fn objective_failure_propagates() {
        let objective = |_: &DVector<f64>| -> SolverResult<f64> {
            Err(SolverError::Numeric {
                what: "boom".into(),
            })
        };
        let err =
            simplex_minimize(DVector::from_vec(vec![0.0, 0.0]), objective, &SimplexConfig::default())
                .unwrap_err();
        assert!(matches!(err, SolverError::Numeric { .. }));
    }
}
