//! Discretized Reynolds equation, one pad at a time.
//!
//! Five-point finite-volume stencil over the pad's `n_z x n_theta` grid.
//! Cells are numbered row-major along theta; the same assembly also backs
//! the linearized whirl solve in `lund`, which reuses the coefficient
//! matrix with a different right-hand side.

use nalgebra::{DMatrix, DVector};
use tb_bearing::{BearingConfig, FaceThickness, Grid, RotorState};

use crate::error::{SolverError, SolverResult};

/// Face viscosities [east, west, north, south] by averaging with the
/// neighbor cell; domain edges fall back to the cell value.
pub(crate) fn face_viscosity(mu: &DMatrix<f64>, i: usize, j: usize) -> [f64; 4] {
    let c = mu[(i, j)];
    let e = if j + 1 < mu.ncols() { 0.5 * (c + mu[(i, j + 1)]) } else { c };
    let w = if j > 0 { 0.5 * (c + mu[(i, j - 1)]) } else { c };
    let n = if i + 1 < mu.nrows() { 0.5 * (c + mu[(i + 1, j)]) } else { c };
    let s = if i > 0 { 0.5 * (c + mu[(i - 1, j)]) } else { c };
    [e, w, n, s]
}

/// Face conductances [east, west, north, south] of the Reynolds stencil:
/// `(width * h_face^3) / (12 * mu_face * cross_width * geometry)`.
pub(crate) fn face_conductances(
    cfg: &BearingConfig,
    grid: &Grid,
    faces: &FaceThickness,
    mu_faces: [f64; 4],
) -> [f64; 4] {
    let [mu_e, mu_w, mu_n, mu_s] = mu_faces;
    let beta2 = grid.pad_arc * grid.pad_arc;
    let axial = cfg.radius * cfg.radius / (cfg.length * cfg.length);

    let ce = (grid.d_z * faces.east.powi(3)) / (12.0 * mu_e * grid.d_y * beta2);
    let cw = (grid.d_z * faces.west.powi(3)) / (12.0 * mu_w * grid.d_y * beta2);
    let cn = (grid.d_y * axial * faces.north.powi(3)) / (12.0 * mu_n * grid.d_z);
    let cs = (grid.d_y * axial * faces.south.powi(3)) / (12.0 * mu_s * grid.d_z);
    [ce, cw, cn, cs]
}

/// Assemble the Reynolds coefficient matrix for one pad.
///
/// Interior cells couple to all four neighbors; at a domain face the missing
/// neighbor's conductance folds into the diagonal, which pins the pressure
/// to zero at both axial ends and both circumferential pad edges.
pub(crate) fn assemble_reynolds(
    cfg: &BearingConfig,
    grid: &Grid,
    rotor: &RotorState,
    mu: &DMatrix<f64>,
    pad: usize,
) -> DMatrix<f64> {
    let (nz, nt) = (grid.n_z, grid.n_theta);
    let nk = nz * nt;
    let mut a = DMatrix::zeros(nk, nk);

    for i in 0..nz {
        for j in 0..nt {
            let k = i * nt + j;
            let faces = FaceThickness::at(rotor, grid.theta(pad, j), grid.d_theta);
            let [ce, cw, cn, cs] = face_conductances(cfg, grid, &faces, face_viscosity(mu, i, j));

            let mut diag = -(ce + cw + cn + cs);
            if j + 1 < nt {
                a[(k, k + 1)] = ce;
            } else {
                diag -= ce;
            }
            if j > 0 {
                a[(k, k - 1)] = cw;
            } else {
                diag -= cw;
            }
            if i + 1 < nz {
                a[(k, k + nt)] = cn;
            } else {
                diag -= cn;
            }
            if i > 0 {
                a[(k, k - nt)] = cs;
            } else {
                diag -= cs;
            }
            a[(k, k)] = diag;
        }
    }
    a
}

/// Solve the pad's pressure field for the current viscosity iterate.
///
/// The source combines the wedge term from the face-thickness difference
/// with the squeeze term from the rotor-center velocity. Negative entries of
/// the solution are clamped to zero.
pub fn solve_pad(
    cfg: &BearingConfig,
    grid: &Grid,
    rotor: &RotorState,
    mu: &DMatrix<f64>,
    pad: usize,
) -> SolverResult<DMatrix<f64>> {
    let (nz, nt) = (grid.n_z, grid.n_theta);
    let a = assemble_reynolds(cfg, grid, rotor, mu, pad);

    let mut b = DVector::zeros(nz * nt);
    for i in 0..nz {
        for j in 0..nt {
            let theta = grid.theta(pad, j);
            let faces = FaceThickness::at(rotor, theta, grid.d_theta);
            let wedge = (grid.d_z / (2.0 * grid.pad_arc)) * (faces.east - faces.west);
            let squeeze =
                (rotor.y_vel * theta.cos() + rotor.x_vel * theta.sin()) * grid.dy_dim * grid.d_z;
            b[i * nt + j] = wedge - squeeze;
        }
    }

    let p = a.lu().solve(&b).ok_or_else(|| SolverError::Singular {
        what: format!("Reynolds system on pad {pad}"),
    })?;

    let mut field = DMatrix::zeros(nz, nt);
    for i in 0..nz {
        for j in 0..nt {
            field[(i, j)] = p[i * nt + j].max(0.0);
        }
    }
    Ok(field)
}

/// Central-difference pressure gradients with zero values just outside the
/// domain on all four sides.
pub fn gradients(p: &DMatrix<f64>, grid: &Grid) -> (DMatrix<f64>, DMatrix<f64>) {
    let (nz, nt) = (p.nrows(), p.ncols());
    let mut dp_dy = DMatrix::zeros(nz, nt);
    let mut dp_dz = DMatrix::zeros(nz, nt);

    for i in 0..nz {
        for j in 0..nt {
            let east = if j + 1 < nt { p[(i, j + 1)] } else { 0.0 };
            let west = if j > 0 { p[(i, j - 1)] } else { 0.0 };
            dp_dy[(i, j)] = (east - west) / (2.0 * grid.d_y);

            let north = if i + 1 < nz { p[(i + 1, j)] } else { 0.0 };
            let south = if i > 0 { p[(i - 1, j)] } else { 0.0 };
            dp_dz[(i, j)] = (north - south) / (2.0 * grid.d_z);
        }
    }
    (dp_dy, dp_dz)
}

/// Factor turning dimensionless pressure into Pa.
#[inline]
pub fn pressure_scale(cfg: &BearingConfig) -> f64 {
    cfg.mu_ref * cfg.speed * cfg.radius * cfg.radius / (cfg.clearance * cfg.clearance)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (BearingConfig, Grid) {
        let cfg = BearingConfig::example();
        let grid = Grid::new(&cfg);
        (cfg, grid)
    }

    #[test]
    fn centered_rotor_builds_no_pressure() {
        let (cfg, grid) = setup();
        let rotor = RotorState::at_position(0.0, 0.0);
        let mu = DMatrix::from_element(grid.n_z, grid.n_theta, 1.0);
        for pad in 0..2 {
            let p = solve_pad(&cfg, &grid, &rotor, &mu, pad).unwrap();
            assert!(p.iter().all(|&v| v.abs() < 1e-12));
        }
    }

    #[test]
    fn eccentric_rotor_builds_positive_pressure() {
        let (cfg, grid) = setup();
        let rotor = RotorState::at_position(0.5, -0.7);
        let mu = DMatrix::from_element(grid.n_z, grid.n_theta, 1.0);
        let p0 = solve_pad(&cfg, &grid, &rotor, &mu, 0).unwrap();
        let p1 = solve_pad(&cfg, &grid, &rotor, &mu, 1).unwrap();
        assert!(p0.iter().chain(p1.iter()).all(|&v| v >= 0.0));
        assert!(p0.max() > 0.0 || p1.max() > 0.0);
    }

    #[test]
    fn interior_gradients_are_central_differences() {
        let (_, grid) = setup();
        let (nz, nt) = (grid.n_z, grid.n_theta);
        let p = DMatrix::from_fn(nz, nt, |i, j| (i as f64) + 10.0 * (j as f64));
        let (dp_dy, dp_dz) = gradients(&p, &grid);
        for i in 1..nz - 1 {
            for j in 1..nt - 1 {
                assert!((dp_dy[(i, j)] - 10.0 / grid.d_y).abs() < 1e-9);
                assert!((dp_dz[(i, j)] - 1.0 / grid.d_z).abs() < 1e-9);
            }
        }
    }
}
