// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Integrator
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Classical RK4 in ξ for the plasma column's (r, p_r) phase space.
//!
//! The column moves toward decreasing ξ: a step starting at ξ evaluates
//! the derivatives at ξ, ξ − dξ/2 (twice) and ξ − dξ.

use wake_types::state::{ColumnView, PlasmaColumn};

/// Source of per-particle increments `(Δr, Δp_r) = dξ · f(ξ, r, p_r)`.
pub trait MotionDerivatives {
    /// Write the increments for `column` at `xi` into `dr` and `dpr`.
    fn increments(&mut self, xi: f64, dxi: f64, column: ColumnView<'_>, dr: &mut [f64], dpr: &mut [f64]);
}

/// Mirror particles that crossed the axis: `(r, p_r) → (−r, −p_r)` for
/// `r < 0`. Returns how many were reflected.
pub fn reflect_about_axis(r: &mut [f64], pr: &mut [f64]) -> usize {
    let mut reflected = 0;
    for (r_i, pr_i) in r.iter_mut().zip(pr.iter_mut()) {
        if *r_i < 0.0 {
            *r_i = -*r_i;
            *pr_i = -*pr_i;
            reflected += 1;
        }
    }
    reflected
}

/// RK4 stepper with stage buffers reused across steps.
#[derive(Debug, Default, Clone)]
pub struct Rk4Stepper {
    k_r: [Vec<f64>; 4],
    k_pr: [Vec<f64>; 4],
    stage_r: Vec<f64>,
    stage_pr: Vec<f64>,
}

impl Rk4Stepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance `column` from `xi` to `xi - dxi` in place.
    pub fn step<M: MotionDerivatives + ?Sized>(
        &mut self,
        model: &mut M,
        xi: f64,
        dxi: f64,
        column: &mut PlasmaColumn,
    ) {
        let n = column.len();
        for buf in self.k_r.iter_mut().chain(self.k_pr.iter_mut()) {
            buf.resize(n, 0.0);
        }
        self.stage_r.resize(n, 0.0);
        self.stage_pr.resize(n, 0.0);

        // (stage ξ, fraction of the previous increment added to y)
        let stages = [(xi, 0.0), (xi - 0.5 * dxi, 0.5), (xi - 0.5 * dxi, 0.5), (xi - dxi, 1.0)];
        for (stage, &(xi_stage, weight)) in stages.iter().enumerate() {
            if stage == 0 {
                self.stage_r.copy_from_slice(&column.r);
                self.stage_pr.copy_from_slice(&column.pr);
            } else {
                let (prev_r, prev_pr) = (&self.k_r[stage - 1], &self.k_pr[stage - 1]);
                for i in 0..n {
                    self.stage_r[i] = column.r[i] + weight * prev_r[i];
                    self.stage_pr[i] = column.pr[i] + weight * prev_pr[i];
                }
            }
            let view = ColumnView {
                r: &self.stage_r,
                pr: &self.stage_pr,
                q: &column.q,
            };
            let (k_r, k_pr) = (&mut self.k_r[stage], &mut self.k_pr[stage]);
            model.increments(xi_stage, dxi, view, k_r, k_pr);
        }

        let inv_6 = 1.0 / 6.0;
        let [k1_r, k2_r, k3_r, k4_r] = &self.k_r;
        let [k1_pr, k2_pr, k3_pr, k4_pr] = &self.k_pr;
        for i in 0..n {
            column.r[i] += (k1_r[i] + 2.0 * (k2_r[i] + k3_r[i]) + k4_r[i]) * inv_6;
            column.pr[i] += (k1_pr[i] + 2.0 * (k2_pr[i] + k3_pr[i]) + k4_pr[i]) * inv_6;
        }
        reflect_about_axis(&mut column.r, &mut column.pr);
    }
}
