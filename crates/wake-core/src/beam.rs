// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Beam Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Azimuthal magnetic field of a rigid driver beam.
//!
//! The beam is deposited once onto the guard-padded (ξ, r) grid and
//! integrated radially, `B_θ,0(r) = -(1/r) ∫ n_b r' dr'`. The resulting
//! surface is sampled by bilinear interpolation for the rest of the run.

use crate::deposition::{deposit, DepositionGeometry, GUARD_CELLS};
use ndarray::{Array2, Axis};
use std::f64::consts::PI;
use wake_math::interp::{interp2d, UniformAxis};
use wake_types::config::ParticleShape;
use wake_types::constants::{plasma_skin_depth, ELEMENTARY_CHARGE};
use wake_types::error::{WakeError, WakeResult};
use wake_types::state::SimulationGrid;

/// Macro-particles of the driver beam, SI units ([m], [C]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeamParticles {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub xi: Vec<f64>,
    pub q: Vec<f64>,
}

impl BeamParticles {
    pub fn len(&self) -> usize {
        self.q.len()
    }

    pub fn is_empty(&self) -> bool {
        self.q.is_empty()
    }

    pub fn total_charge(&self) -> f64 {
        self.q.iter().sum()
    }

    fn validate(&self) -> WakeResult<()> {
        let n = self.q.len();
        if self.x.len() != n || self.y.len() != n || self.xi.len() != n {
            return Err(WakeError::PhysicsViolation(format!(
                "beam arrays must have equal length, got x={}, y={}, xi={}, q={}",
                self.x.len(),
                self.y.len(),
                self.xi.len(),
                n
            )));
        }
        Ok(())
    }
}

/// Immutable B_θ,0 surface in normalized units.
#[derive(Debug, Clone)]
pub struct BeamSource {
    surface: Array2<f64>,
    xi_axis: UniformAxis,
    r_axis: UniformAxis,
}

impl BeamSource {
    /// Deposit `beam` onto `grid` (normalized) for plasma density `n_p` [m⁻³].
    pub fn new(
        beam: &BeamParticles,
        grid: &SimulationGrid,
        n_p: f64,
        shape: ParticleShape,
    ) -> WakeResult<Self> {
        beam.validate()?;
        if !n_p.is_finite() || n_p <= 0.0 {
            return Err(WakeError::PhysicsViolation(format!(
                "plasma density must be finite and > 0, got {n_p}"
            )));
        }
        let s_d = plasma_skin_depth(n_p);
        let geometry = DepositionGeometry::from_grid(grid);

        let xi_n: Vec<f64> = beam.xi.iter().map(|&xi| xi / s_d).collect();
        let r_n: Vec<f64> = beam
            .x
            .iter()
            .zip(&beam.y)
            .map(|(&x, &y)| x.hypot(y) / s_d)
            .collect();
        let cell_volume = 2.0 * PI * geometry.dr * geometry.dxi * s_d.powi(3) * n_p;
        let w: Vec<f64> = beam
            .q
            .iter()
            .map(|&q| q / ELEMENTARY_CHARGE / cell_volume)
            .collect();

        let mut surface = geometry.zeros();
        deposit(&xi_n, &r_n, &w, &geometry, shape, &mut surface)?;

        // Running radial integral of the deposited density.
        let r_nodes = geometry.r_nodes();
        for mut row in surface.axis_iter_mut(Axis(0)) {
            let mut acc = 0.0;
            for (value, &r_k) in row.iter_mut().zip(r_nodes.iter()) {
                acc += *value;
                *value = -acc / r_k.abs() * geometry.dr;
            }
        }

        let (n_xi_p, n_r_p) = geometry.padded_dim();
        let guard = GUARD_CELLS as f64;
        Ok(BeamSource {
            surface,
            xi_axis: UniformAxis::new(geometry.xi_min - guard * geometry.dxi, geometry.dxi, n_xi_p),
            r_axis: UniformAxis::new(geometry.r_min - guard * geometry.dr, geometry.dr, n_r_p),
        })
    }

    /// B_θ,0 at normalized `(r, xi)`; clamped to the grid edges outside it.
    pub fn probe(&self, r: f64, xi: f64) -> f64 {
        interp2d(&self.surface, &self.xi_axis, &self.r_axis, xi, r)
    }

    /// Padded `(n_xi + 4, n_r + 4)` surface.
    pub fn surface(&self) -> &Array2<f64> {
        &self.surface
    }
}
