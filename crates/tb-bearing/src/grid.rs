//! Finite-volume discretization of the bearing surface.
//!
//! The axial coordinate Z runs dimensionless from 0 to 1 over the bearing
//! length; the circumferential coordinate theta is split into one uniform
//! block of cells per pad. Construction is a pure function of the config.

use crate::config::{BearingConfig, N_PADS};

/// Structured theta-Z grid plus the per-pad angular placement.
#[derive(Debug, Clone)]
pub struct Grid {
    /// Axial cell count
    pub n_z: usize,
    /// Circumferential cell count per pad
    pub n_theta: usize,
    /// Dimensionless axial coordinates: boundary nodes at 0 and 1 plus the
    /// interior cell centers (length `n_z + 2`)
    pub z: Vec<f64>,
    /// Dimensionless axial cell width
    pub d_z: f64,
    /// Dimensionless circumferential cell width
    pub d_y: f64,
    /// Circumferential cell width [rad]
    pub d_theta: f64,
    /// Pad arc length [rad]
    pub pad_arc: f64,
    /// Leading edge of each pad [rad]
    pub theta_start: [f64; N_PADS],
    /// Trailing edge of each pad [rad]
    pub theta_end: [f64; N_PADS],
    /// Axial cell size [m]
    pub dz_dim: f64,
    /// Circumferential cell size [m]
    pub dy_dim: f64,
}

impl Grid {
    pub fn new(cfg: &BearingConfig) -> Self {
        let n_z = cfg.n_z;
        let n_theta = cfg.n_theta;

        let pad_arc = cfg.pad_arc_deg.to_radians();
        let d_z = 1.0 / n_z as f64;
        let d_y = 1.0 / n_theta as f64;
        let d_theta = pad_arc / n_theta as f64;

        let mut z = Vec::with_capacity(n_z + 2);
        z.push(0.0);
        for i in 0..n_z {
            z.push((i as f64 + 0.5) * d_z);
        }
        z.push(1.0);

        // Pads sit evenly around the bore, each centered on its pad axis
        // with half-arc margins on both sides.
        let mut theta_start = [0.0; N_PADS];
        let mut theta_end = [0.0; N_PADS];
        let spacing = 360.0 / N_PADS as f64;
        for pad in 0..N_PADS {
            let axis = pad as f64 * spacing + spacing / 2.0;
            theta_start[pad] = (axis - cfg.pad_arc_deg / 2.0).to_radians();
            theta_end[pad] = (axis + cfg.pad_arc_deg / 2.0).to_radians();
        }

        Self {
            n_z,
            n_theta,
            z,
            d_z,
            d_y,
            d_theta,
            pad_arc,
            theta_start,
            theta_end,
            dz_dim: d_z * cfg.length,
            dy_dim: d_y * pad_arc * cfg.radius,
        }
    }

    /// Angular position of cell center `j` on `pad` [rad].
    #[inline]
    pub fn theta(&self, pad: usize, j: usize) -> f64 {
        self.theta_start[pad] + (j as f64 + 0.5) * self.d_theta
    }

    /// Dimensionless axial position of interior cell center `i`.
    #[inline]
    pub fn z_center(&self, i: usize) -> f64 {
        self.z[i + 1]
    }

    /// Cells per pad.
    #[inline]
    pub fn cells(&self) -> usize {
        self.n_z * self.n_theta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(&BearingConfig::example())
    }

    #[test]
    fn axial_nodes_bracket_interior_centers() {
        let g = grid();
        assert_eq!(g.z.len(), g.n_z + 2);
        assert_eq!(g.z[0], 0.0);
        assert_eq!(g.z[g.n_z + 1], 1.0);
        for i in 0..g.n_z {
            let zc = g.z_center(i);
            assert!(zc > 0.0 && zc < 1.0);
            assert!((zc - (i as f64 + 0.5) * g.d_z).abs() < 1e-14);
        }
    }

    #[test]
    fn pad_spans_equal_configured_arc() {
        let g = grid();
        for pad in 0..N_PADS {
            let span = g.theta_end[pad] - g.theta_start[pad];
            assert!((span - g.pad_arc).abs() < 1e-12);
        }
    }

    #[test]
    fn pads_are_evenly_placed() {
        let g = grid();
        let gap0 = g.theta_start[1] - g.theta_end[0];
        let gap1 = g.theta_start[0] + std::f64::consts::TAU - g.theta_end[1];
        assert!((gap0 - gap1).abs() < 1e-12);
    }

    #[test]
    fn cell_centers_stay_inside_the_pad() {
        let g = grid();
        for pad in 0..N_PADS {
            for j in 0..g.n_theta {
                let t = g.theta(pad, j);
                assert!(t > g.theta_start[pad] && t < g.theta_end[pad]);
            }
        }
    }
}
