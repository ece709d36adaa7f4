// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{WakeError, WakeResult};
use ndarray::{s, Array1, Array2};

/// Normalized (skin-depth units) r-ξ grid.
#[derive(Debug, Clone)]
pub struct SimulationGrid {
    pub n_r: usize,
    pub n_xi: usize,
    pub ppc: usize,
    pub r_max: f64,
    pub xi_min: f64,
    pub xi_max: f64,
    pub dr: f64,            // radial cell size
    pub dxi: f64,           // ξ step, (xi_max - xi_min) / n_xi
    pub r_arr: Array1<f64>, // cell centres [n_r], (k + 1/2) dr
    pub xi_arr: Array1<f64>, // slice positions [n_xi], xi_min + j dxi
}

impl SimulationGrid {
    pub fn new(
        n_r: usize,
        n_xi: usize,
        ppc: usize,
        r_max: f64,
        xi_min: f64,
        xi_max: f64,
    ) -> WakeResult<Self> {
        if n_r == 0 || n_xi == 0 || ppc == 0 {
            return Err(WakeError::InvalidGrid(format!(
                "grid dimensions must be >= 1, got n_r={n_r}, n_xi={n_xi}, ppc={ppc}"
            )));
        }
        if !r_max.is_finite() || r_max <= 0.0 {
            return Err(WakeError::InvalidGrid(format!(
                "r_max must be finite and > 0, got {r_max}"
            )));
        }
        if !xi_min.is_finite() || !xi_max.is_finite() || xi_max <= xi_min {
            return Err(WakeError::InvalidGrid(format!(
                "xi window must satisfy xi_min < xi_max, got [{xi_min}, {xi_max}]"
            )));
        }
        let dr = r_max / n_r as f64;
        let dxi = (xi_max - xi_min) / n_xi as f64;
        let r_arr = Array1::from_shape_fn(n_r, |k| (k as f64 + 0.5) * dr);
        let xi_arr = Array1::from_shape_fn(n_xi, |j| xi_min + j as f64 * dxi);
        Ok(SimulationGrid {
            n_r,
            n_xi,
            ppc,
            r_max,
            xi_min,
            xi_max,
            dr,
            dxi,
            r_arr,
            xi_arr,
        })
    }

    /// Radial spacing of the initial plasma lattice.
    pub fn dr_particle(&self) -> f64 {
        self.dr / self.ppc as f64
    }

    /// Mesh slice written by ξ-step `step` (filled from the ξ_max end).
    pub fn slice_for_step(&self, step: usize) -> usize {
        self.n_xi - 1 - step
    }
}

/// One plasma macro-particle (radial shell of the sheath).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlasmaParticle {
    pub r: f64,
    pub pr: f64,
    pub q: f64,
}

/// Plasma column stored as parallel arrays in creation order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlasmaColumn {
    pub r: Vec<f64>,
    pub pr: Vec<f64>,
    pub q: Vec<f64>,
}

/// Borrowed view of a column (possibly an intermediate RK stage).
#[derive(Debug, Clone, Copy)]
pub struct ColumnView<'a> {
    pub r: &'a [f64],
    pub pr: &'a [f64],
    pub q: &'a [f64],
}

impl<'a> ColumnView<'a> {
    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }
}

impl PlasmaColumn {
    /// Uniform cold column: `n_r * ppc` shells at `(k + 1/2) dr_p`, each
    /// with charge `dr_p * r_k` and zero momentum.
    pub fn uniform(n_r: usize, ppc: usize, r_max: f64) -> WakeResult<Self> {
        if n_r == 0 || ppc == 0 {
            return Err(WakeError::InvalidGrid(format!(
                "plasma lattice needs n_r >= 1 and ppc >= 1, got n_r={n_r}, ppc={ppc}"
            )));
        }
        if !r_max.is_finite() || r_max <= 0.0 {
            return Err(WakeError::InvalidGrid(format!(
                "r_max must be finite and > 0, got {r_max}"
            )));
        }
        let n_part = n_r * ppc;
        let dr_p = r_max / n_part as f64;
        let r: Vec<f64> = (0..n_part).map(|k| (k as f64 + 0.5) * dr_p).collect();
        let q = r.iter().map(|&r_k| dr_p * r_k).collect();
        Ok(PlasmaColumn {
            pr: vec![0.0; n_part],
            r,
            q,
        })
    }

    pub fn from_particles(particles: &[PlasmaParticle]) -> Self {
        PlasmaColumn {
            r: particles.iter().map(|p| p.r).collect(),
            pr: particles.iter().map(|p| p.pr).collect(),
            q: particles.iter().map(|p| p.q).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.r.len()
    }

    pub fn is_empty(&self) -> bool {
        self.r.is_empty()
    }

    pub fn particle(&self, i: usize) -> PlasmaParticle {
        PlasmaParticle {
            r: self.r[i],
            pr: self.pr[i],
            q: self.q[i],
        }
    }

    pub fn view(&self) -> ColumnView<'_> {
        ColumnView {
            r: &self.r,
            pr: &self.pr,
            q: &self.q,
        }
    }

    pub fn total_charge(&self) -> f64 {
        self.q.iter().sum()
    }

    /// Drop every particle with `r > r_limit`, compacting all three arrays
    /// while preserving creation order. Returns the number removed.
    ///
    /// A NaN radius is not `> r_limit`, so such particles stay in the column
    /// and their values reach the fields.
    pub fn retain_within(&mut self, r_limit: f64) -> usize {
        let before = self.r.len();
        let mut kept = 0;
        for i in 0..before {
            let outside = self.r[i] > r_limit;
            if !outside {
                self.r[kept] = self.r[i];
                self.pr[kept] = self.pr[i];
                self.q[kept] = self.q[i];
                kept += 1;
            }
        }
        self.r.truncate(kept);
        self.pr.truncate(kept);
        self.q.truncate(kept);
        before - kept
    }
}

/// Field values at a single radius.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FieldSample {
    pub psi: f64,
    pub dr_psi: f64,
    pub dxi_psi: f64,
    pub b_theta: f64,
}

/// Probe-mode output for one ξ-slice, one entry per probe radius.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldProfile {
    pub psi: Vec<f64>,
    pub dr_psi: Vec<f64>,
    pub dxi_psi: Vec<f64>,
    pub b_theta_bar: Vec<f64>,
    pub b_theta_0: Vec<f64>,
}

impl FieldProfile {
    pub fn new(n: usize) -> Self {
        let mut profile = FieldProfile::default();
        profile.resize(n);
        profile
    }

    pub fn len(&self) -> usize {
        self.psi.len()
    }

    pub fn is_empty(&self) -> bool {
        self.psi.is_empty()
    }

    pub fn resize(&mut self, n: usize) {
        self.psi.resize(n, 0.0);
        self.dr_psi.resize(n, 0.0);
        self.dxi_psi.resize(n, 0.0);
        self.b_theta_bar.resize(n, 0.0);
        self.b_theta_0.resize(n, 0.0);
    }

    pub fn set(&mut self, j: usize, sample: FieldSample) {
        self.psi[j] = sample.psi;
        self.dr_psi[j] = sample.dr_psi;
        self.dxi_psi[j] = sample.dxi_psi;
        self.b_theta_bar[j] = sample.b_theta;
    }

    pub fn is_finite(&self) -> bool {
        [
            &self.psi,
            &self.dr_psi,
            &self.dxi_psi,
            &self.b_theta_bar,
            &self.b_theta_0,
        ]
        .iter()
        .all(|v| v.iter().all(|x| x.is_finite()))
    }
}

/// Wakefield mesh, arrays indexed `[radial cell, ξ-slice]`.
///
/// Created zero-filled; slices are written once each, from the ξ_max end.
#[derive(Debug, Clone)]
pub struct WakefieldMesh {
    pub psi: Array2<f64>,
    pub dr_psi: Array2<f64>,
    pub dxi_psi: Array2<f64>,
    pub b_theta_bar: Array2<f64>,
    pub b_theta_0: Array2<f64>,
}

impl WakefieldMesh {
    pub fn new(n_r: usize, n_xi: usize) -> Self {
        WakefieldMesh {
            psi: Array2::zeros((n_r, n_xi)),
            dr_psi: Array2::zeros((n_r, n_xi)),
            dxi_psi: Array2::zeros((n_r, n_xi)),
            b_theta_bar: Array2::zeros((n_r, n_xi)),
            b_theta_0: Array2::zeros((n_r, n_xi)),
        }
    }

    pub fn dim(&self) -> (usize, usize) {
        self.psi.dim()
    }

    pub fn store_slice(&mut self, slice: usize, profile: &FieldProfile) -> WakeResult<()> {
        let (n_r, n_xi) = self.dim();
        if slice >= n_xi {
            return Err(WakeError::InvalidGrid(format!(
                "slice index {slice} out of range for n_xi={n_xi}"
            )));
        }
        if profile.len() != n_r {
            return Err(WakeError::InvalidGrid(format!(
                "profile length {} does not match n_r={n_r}",
                profile.len()
            )));
        }
        let pairs = [
            (&mut self.psi, &profile.psi),
            (&mut self.dr_psi, &profile.dr_psi),
            (&mut self.dxi_psi, &profile.dxi_psi),
            (&mut self.b_theta_bar, &profile.b_theta_bar),
            (&mut self.b_theta_0, &profile.b_theta_0),
        ];
        for (mesh, values) in pairs {
            mesh.slice_mut(s![.., slice])
                .iter_mut()
                .zip(values.iter())
                .for_each(|(dst, &v)| *dst = v);
        }
        Ok(())
    }
}
