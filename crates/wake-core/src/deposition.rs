// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Deposition
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Particle-to-grid deposition on guard-padded (ξ, r) grids.
//!
//! Grids have shape `(n_xi + 4, n_r + 4)`: two guard nodes on each side of
//! both axes. Interior node `(j, k)` sits at
//! `(xi_min + j dxi, r_min + k dr)` and is stored at `[j + 2, k + 2]`.
//! Nodes of a particle stencil falling outside the padded grid are dropped.

use ndarray::{Array1, Array2};
use wake_types::config::ParticleShape;
use wake_types::error::{WakeError, WakeResult};
use wake_types::state::SimulationGrid;

/// Guard nodes on each side of each axis.
pub const GUARD_CELLS: usize = 2;

/// Node geometry of a guard-padded deposition grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DepositionGeometry {
    pub n_xi: usize,
    pub n_r: usize,
    pub xi_min: f64,
    pub r_min: f64,
    pub dxi: f64,
    pub dr: f64,
}

impl DepositionGeometry {
    /// Geometry matching the field mesh: nodes at `xi_arr` × `r_arr`.
    pub fn from_grid(grid: &SimulationGrid) -> Self {
        DepositionGeometry {
            n_xi: grid.n_xi,
            n_r: grid.n_r,
            xi_min: grid.xi_arr[0],
            r_min: grid.r_arr[0],
            dxi: grid.dxi,
            dr: grid.dr,
        }
    }

    pub fn padded_dim(&self) -> (usize, usize) {
        (self.n_xi + 2 * GUARD_CELLS, self.n_r + 2 * GUARD_CELLS)
    }

    pub fn zeros(&self) -> Array2<f64> {
        Array2::zeros(self.padded_dim())
    }

    /// Radial node coordinates including guard nodes.
    pub fn r_nodes(&self) -> Array1<f64> {
        let (_, n) = self.padded_dim();
        Array1::from_shape_fn(n, |k| self.r_min + (k as f64 - GUARD_CELLS as f64) * self.dr)
    }

    /// Longitudinal node coordinates including guard nodes.
    pub fn xi_nodes(&self) -> Array1<f64> {
        let (n, _) = self.padded_dim();
        Array1::from_shape_fn(n, |j| self.xi_min + (j as f64 - GUARD_CELLS as f64) * self.dxi)
    }

    fn validate(&self, grid: &Array2<f64>) -> WakeResult<()> {
        if grid.dim() != self.padded_dim() {
            return Err(WakeError::InvalidGrid(format!(
                "deposition grid shape {:?} does not match expected {:?}",
                grid.dim(),
                self.padded_dim()
            )));
        }
        if !self.dxi.is_finite() || !self.dr.is_finite() || self.dxi <= 0.0 || self.dr <= 0.0 {
            return Err(WakeError::InvalidGrid(format!(
                "deposition spacing must be finite and > 0, got dxi={}, dr={}",
                self.dxi, self.dr
            )));
        }
        Ok(())
    }
}

/// Shape-function stencil along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Stencil {
    first: isize,
    weights: [f64; 4],
    len: usize,
}

impl Stencil {
    /// `u` is the particle position in node units relative to node 0.
    fn new(u: f64, shape: ParticleShape) -> Self {
        let base = u.floor();
        let f = u - base;
        let i = base as isize;
        match shape {
            ParticleShape::Linear => Stencil {
                first: i,
                weights: [1.0 - f, f, 0.0, 0.0],
                len: 2,
            },
            ParticleShape::Cubic => {
                let g = 1.0 - f;
                let f2 = f * f;
                let f3 = f2 * f;
                Stencil {
                    first: i - 1,
                    weights: [
                        g * g * g / 6.0,
                        (4.0 - 6.0 * f2 + 3.0 * f3) / 6.0,
                        (1.0 + 3.0 * f + 3.0 * f2 - 3.0 * f3) / 6.0,
                        f3 / 6.0,
                    ],
                    len: 4,
                }
            }
        }
    }

    /// (padded index, weight) pairs that land inside `0..n_padded`.
    fn nodes(self, n_padded: usize) -> impl Iterator<Item = (usize, f64)> {
        (0..self.len).filter_map(move |m| {
            let idx = self.first + m as isize + GUARD_CELLS as isize;
            if idx >= 0 && (idx as usize) < n_padded {
                Some((idx as usize, self.weights[m]))
            } else {
                None
            }
        })
    }
}

fn deposit_particle(
    grid: &mut Array2<f64>,
    geometry: &DepositionGeometry,
    shape: ParticleShape,
    xi: f64,
    r: f64,
    w: f64,
) {
    if !xi.is_finite() || !r.is_finite() || !w.is_finite() {
        return;
    }
    let (n_xi_p, n_r_p) = geometry.padded_dim();
    let u_xi = (xi - geometry.xi_min) / geometry.dxi;
    let u_r = (r - geometry.r_min) / geometry.dr;
    // Far outside the padded grid: nothing to deposit.
    if u_xi < -(GUARD_CELLS as f64) - 2.0
        || u_r < -(GUARD_CELLS as f64) - 2.0
        || u_xi > (n_xi_p + 2) as f64
        || u_r > (n_r_p + 2) as f64
    {
        return;
    }
    let s_xi = Stencil::new(u_xi, shape);
    let s_r = Stencil::new(u_r, shape);
    for (j, w_xi) in s_xi.nodes(n_xi_p) {
        for (k, w_r) in s_r.nodes(n_r_p) {
            grid[[j, k]] += w * w_xi * w_r;
        }
    }
}

/// Accumulate weights `w` of particles at `(xi[i], r[i])` into `grid`.
pub fn deposit(
    xi: &[f64],
    r: &[f64],
    w: &[f64],
    geometry: &DepositionGeometry,
    shape: ParticleShape,
    grid: &mut Array2<f64>,
) -> WakeResult<()> {
    geometry.validate(grid)?;
    if xi.len() != r.len() || r.len() != w.len() {
        return Err(WakeError::PhysicsViolation(format!(
            "deposition arrays must have equal length, got xi={}, r={}, w={}",
            xi.len(),
            r.len(),
            w.len()
        )));
    }
    for ((&xi_i, &r_i), &w_i) in xi.iter().zip(r).zip(w) {
        deposit_particle(grid, geometry, shape, xi_i, r_i, w_i);
    }
    Ok(())
}

/// Accumulate a plasma column sitting at a single ξ position.
pub fn deposit_at_xi(
    xi: f64,
    r: &[f64],
    w: &[f64],
    geometry: &DepositionGeometry,
    shape: ParticleShape,
    grid: &mut Array2<f64>,
) -> WakeResult<()> {
    geometry.validate(grid)?;
    if r.len() != w.len() {
        return Err(WakeError::PhysicsViolation(format!(
            "deposition arrays must have equal length, got r={}, w={}",
            r.len(),
            w.len()
        )));
    }
    for (&r_i, &w_i) in r.iter().zip(w) {
        deposit_particle(grid, geometry, shape, xi, r_i, w_i);
    }
    Ok(())
}
