//! Linearized whirl perturbation on the equilibrium field.
//!
//! A first-order perturbation of the Reynolds equation at whirl frequency
//! `gamma * speed` yields one complex linear system per pad sharing the
//! equilibrium coefficient matrix. Its solutions are the pressure
//! sensitivities to a unit X and Y motion of the journal center; integrating
//! them over the film gives the complex transfer matrix H, whose real part
//! is the stiffness and whose imaginary part over the whirl frequency is the
//! damping.

use nalgebra::{Complex, DMatrix, DVector, Matrix2};

use tb_bearing::{BearingConfig, FaceThickness, Grid, N_PADS, RotorState};

use crate::dynamics::DynamicCoefficients;
use crate::error::{SolverError, SolverResult};
use crate::fields::FieldState;
use crate::pressure;

/// Trapezoidal quadrature of complex samples `y` on nodes `x`.
fn trapezoid(x: &[f64], y: &[Complex<f64>]) -> Complex<f64> {
    let mut acc = Complex::new(0.0, 0.0);
    for w in 1..x.len() {
        acc += (y[w] + y[w - 1]) * Complex::new(0.5 * (x[w] - x[w - 1]), 0.0);
    }
    acc
}

/// Coefficients from the converged equilibrium solution.
pub(crate) fn coefficients(
    cfg: &BearingConfig,
    grid: &Grid,
    rotor: &RotorState,
    state: &FieldState,
) -> SolverResult<DynamicCoefficients> {
    let gamma = cfg.settings.whirl_ratio;
    let whirl = gamma * cfg.speed;
    let (nz, nt) = (grid.n_z, grid.n_theta);
    let nk = nz * nt;

    let r2 = cfg.radius * cfg.radius;
    let l2 = cfg.length * cfg.length;
    // Dimensional scale of the sensitivity fields: pressure per clearance.
    let scale = cfg.mu_ref * cfg.speed * r2 / cfg.clearance.powi(3);

    let z_dim: Vec<f64> = (0..nz).map(|i| grid.z_center(i) * cfg.length).collect();

    let mut h = Matrix2::from_element(Complex::new(0.0, 0.0));

    for pad in 0..N_PADS {
        let mu = &state.viscosity[pad];
        let p = &state.pressure[pad];

        let a_real = pressure::assemble_reynolds(cfg, grid, rotor, mu, pad);
        let a = DMatrix::from_fn(nk, nk, |r, c| Complex::new(a_real[(r, c)], 0.0));

        let mut bx = DVector::from_element(nk, Complex::new(0.0, 0.0));
        let mut by = DVector::from_element(nk, Complex::new(0.0, 0.0));

        for i in 0..nz {
            for j in 0..nt {
                let k = i * nt + j;
                let theta = grid.theta(pad, j);
                let faces = FaceThickness::at(rotor, theta, grid.d_theta);
                let [mu_e, mu_w, mu_n, mu_s] = pressure::face_viscosity(mu, i, j);

                // Thickness sensitivities to a unit X / Y journal motion.
                let hx_c = -theta.cos();
                let hx_e = -(theta + 0.5 * grid.d_theta).cos();
                let hx_w = -(theta - 0.5 * grid.d_theta).cos();
                let hy_c = -theta.sin();
                let hy_e = -(theta + 0.5 * grid.d_theta).sin();
                let hy_w = -(theta - 0.5 * grid.d_theta).sin();

                // Equilibrium pressures at the faces; a missing neighbor
                // mirrors the center so the face value is zero.
                let p_c = p[(i, j)];
                let p_e = if j + 1 < nt { p[(i, j + 1)] } else { -p_c };
                let p_w = if j > 0 { p[(i, j - 1)] } else { -p_c };
                let p_n = if i + 1 < nz { p[(i + 1, j)] } else { -p_c };
                let p_s = if i > 0 { p[(i - 1, j)] } else { -p_c };

                let circ = grid.d_z / (grid.d_y * grid.pad_arc * grid.pad_arc);
                let axial = r2 * grid.d_y / (grid.d_z * l2);

                let bxe = -circ * (3.0 * faces.east.powi(2) * hx_e) / (12.0 * mu_e);
                let bxw = -circ * (3.0 * faces.west.powi(2) * hx_w) / (12.0 * mu_w);
                let bxn = -axial * (3.0 * faces.north.powi(2) * hx_c) / (12.0 * mu_n);
                let bxs = -axial * (3.0 * faces.south.powi(2) * hx_c) / (12.0 * mu_s);
                let bxp = -(bxe + bxw + bxn + bxs);

                let bye = -circ * (3.0 * faces.east.powi(2) * hy_e) / (12.0 * mu_e);
                let byw = -circ * (3.0 * faces.west.powi(2) * hy_w) / (12.0 * mu_w);
                let byn = -axial * (3.0 * faces.north.powi(2) * hy_c) / (12.0 * mu_n);
                let bys = -axial * (3.0 * faces.south.powi(2) * hy_c) / (12.0 * mu_s);
                let byp = -(bye + byw + byn + bys);

                let wedge_x = (grid.d_z / (2.0 * grid.pad_arc)) * (hx_e - hx_w);
                let wedge_y = (grid.d_z / (2.0 * grid.pad_arc)) * (hy_e - hy_w);

                bx[k] = Complex::new(
                    wedge_x + bxe * p_e + bxw * p_w + bxn * p_n + bxs * p_s + bxp * p_c,
                    grid.d_y * grid.d_z * gamma * hx_c,
                );
                by[k] = Complex::new(
                    wedge_y + bye * p_e + byw * p_w + byn * p_n + bys * p_s + byp * p_c,
                    grid.d_y * grid.d_z * gamma * hy_c,
                );
            }
        }

        let lu = a.lu();
        let px = lu.solve(&bx).ok_or_else(|| SolverError::Singular {
            what: format!("whirl system (X) on pad {pad}"),
        })?;
        let py = lu.solve(&by).ok_or_else(|| SolverError::Singular {
            what: format!("whirl system (Y) on pad {pad}"),
        })?;

        // Quadrature: theta along each axial row, then along the axis.
        let arc: Vec<f64> = (0..nt).map(|j| grid.theta(pad, j) * cfg.radius).collect();
        let weight_x: Vec<f64> = (0..nt).map(|j| -grid.theta(pad, j).cos()).collect();
        let weight_y: Vec<f64> = (0..nt).map(|j| -grid.theta(pad, j).sin()).collect();

        let mut col_xx = Vec::with_capacity(nz);
        let mut col_xy = Vec::with_capacity(nz);
        let mut col_yx = Vec::with_capacity(nz);
        let mut col_yy = Vec::with_capacity(nz);
        for i in 0..nz {
            let mut line_xx = Vec::with_capacity(nt);
            let mut line_xy = Vec::with_capacity(nt);
            let mut line_yx = Vec::with_capacity(nt);
            let mut line_yy = Vec::with_capacity(nt);
            for j in 0..nt {
                let sx = px[i * nt + j] * Complex::new(scale, 0.0);
                let sy = py[i * nt + j] * Complex::new(scale, 0.0);
                line_xx.push(sx * Complex::new(weight_x[j], 0.0));
                line_xy.push(sx * Complex::new(weight_y[j], 0.0));
                line_yx.push(sy * Complex::new(weight_x[j], 0.0));
                line_yy.push(sy * Complex::new(weight_y[j], 0.0));
            }
            col_xx.push(trapezoid(&arc, &line_xx));
            col_xy.push(trapezoid(&arc, &line_xy));
            col_yx.push(trapezoid(&arc, &line_yx));
            col_yy.push(trapezoid(&arc, &line_yy));
        }

        h[(0, 0)] -= trapezoid(&z_dim, &col_xx);
        h[(0, 1)] -= trapezoid(&z_dim, &col_xy);
        h[(1, 0)] -= trapezoid(&z_dim, &col_yx);
        h[(1, 1)] -= trapezoid(&z_dim, &col_yy);
    }

    Ok(DynamicCoefficients {
        stiffness: h.map(|c| c.re),
        damping: h.map(|c| c.im / whirl),
    })
}
