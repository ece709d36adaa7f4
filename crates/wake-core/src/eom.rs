// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Equations of Motion
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Plasma-particle equations of motion in the quasi-static frame.
//!
//! ```text
//! dr/dξ   = p_r / (1 + ψ)
//! dp_r/dξ = γ ∂_r ψ / (1 + ψ) − B̄_θ − B_θ,0 − ∇|a|² / (2 (1 + ψ))
//! ```
//!
//! [`PlasmaResponse`] couples the field solver with the driver sources and
//! is the derivative model handed to the RK4 stepper.

use crate::field_solver::FieldSolver;
use crate::integrator::{reflect_about_axis, MotionDerivatives};
use crate::sources::{DriverSources, SourceBuffers};
use wake_types::state::{ColumnView, FieldProfile};

/// Field solver plus drivers, with private copies of the particle state.
#[derive(Debug)]
pub struct PlasmaResponse<'s> {
    sources: &'s DriverSources,
    solver: FieldSolver,
    buffers: SourceBuffers,
    r: Vec<f64>,
    pr: Vec<f64>,
    gamma: Vec<f64>,
}

impl<'s> PlasmaResponse<'s> {
    pub fn new(sources: &'s DriverSources) -> Self {
        PlasmaResponse {
            sources,
            solver: FieldSolver::new(),
            buffers: SourceBuffers::default(),
            r: Vec::new(),
            pr: Vec::new(),
            gamma: Vec::new(),
        }
    }

    /// Copy `column` and reflect shells with `r < 0` back across the axis.
    /// The caller's column is left untouched.
    fn load(&mut self, xi: f64, column: ColumnView<'_>) {
        self.r.clear();
        self.r.extend_from_slice(column.r);
        self.pr.clear();
        self.pr.extend_from_slice(column.pr);
        reflect_about_axis(&mut self.r, &mut self.pr);
        self.sources.fill(xi, &self.r, &mut self.buffers);
    }

    /// Fields of `column` at ascending `radii`, including the beam term.
    ///
    /// Also records each particle's Lorentz factor, see
    /// [`particle_gamma`](Self::particle_gamma).
    pub fn sample_profile(
        &mut self,
        xi: f64,
        column: ColumnView<'_>,
        radii: &[f64],
        out: &mut FieldProfile,
        parallel: bool,
    ) {
        self.load(xi, column);
        let view = ColumnView {
            r: &self.r,
            pr: &self.pr,
            q: column.q,
        };
        let solved = self.solver.solve(view, self.buffers.terms());
        if parallel {
            solved.probe_parallel(radii, out);
        } else {
            solved.probe(radii, out);
        }
        self.gamma.clear();
        self.gamma.extend_from_slice(solved.gamma());

        for (b0, &r) in out.b_theta_0.iter_mut().zip(radii) {
            *b0 = self.sources.beam_field(r, xi);
        }
    }

    /// Lorentz factors from the last [`sample_profile`](Self::sample_profile).
    pub fn particle_gamma(&self) -> &[f64] {
        &self.gamma
    }
}

impl MotionDerivatives for PlasmaResponse<'_> {
    fn increments(&mut self, xi: f64, dxi: f64, column: ColumnView<'_>, dr: &mut [f64], dpr: &mut [f64]) {
        self.load(xi, column);
        let view = ColumnView {
            r: &self.r,
            pr: &self.pr,
            q: column.q,
        };
        let sources = self.buffers.terms();
        let solved = self.solver.solve(view, sources);
        let psi = solved.psi();
        let dr_psi = solved.dr_psi();
        let gamma = solved.gamma();
        let b_theta_bar = solved.b_theta_bar();

        for i in 0..view.len() {
            let a = 1.0 + psi[i];
            dpr[i] = dxi
                * (gamma[i] * dr_psi[i] / a
                    - b_theta_bar[i]
                    - sources.b_theta_0[i]
                    - sources.nabla_a[i] / (2.0 * a));
            dr[i] = dxi * view.pr[i] / a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wake_types::state::PlasmaColumn;

    #[test]
    fn test_reflection_leaves_caller_column_untouched() {
        let sources = DriverSources::none(1e-5);
        let mut response = PlasmaResponse::new(&sources);
        let column = PlasmaColumn {
            r: vec![-0.5, 1.5],
            pr: vec![0.2, 0.0],
            q: vec![0.5, 1.5],
        };
        let mirrored = PlasmaColumn {
            r: vec![0.5, 1.5],
            pr: vec![-0.2, 0.0],
            q: vec![0.5, 1.5],
        };
        let (mut dr_a, mut dpr_a) = (vec![0.0; 2], vec![0.0; 2]);
        let (mut dr_b, mut dpr_b) = (vec![0.0; 2], vec![0.0; 2]);
        response.increments(0.0, 0.1, column.view(), &mut dr_a, &mut dpr_a);
        response.increments(0.0, 0.1, mirrored.view(), &mut dr_b, &mut dpr_b);
        assert_eq!(column.r[0], -0.5);
        assert_eq!(dr_a, dr_b);
        assert_eq!(dpr_a, dpr_b);
    }

    #[test]
    fn test_cold_column_has_no_radial_velocity() {
        let sources = DriverSources::none(1e-5);
        let mut response = PlasmaResponse::new(&sources);
        let column = PlasmaColumn::uniform(4, 1, 4.0).unwrap();
        let (mut dr, mut dpr) = (vec![1.0; 4], vec![0.0; 4]);
        response.increments(0.0, 0.1, column.view(), &mut dr, &mut dpr);
        assert!(dr.iter().all(|&d| d == 0.0));
        // Outermost shell: ψ = 0, γ = 1, so Δp_r = dξ (∂_r ψ − B̄_θ).
        let expected = 0.1 * (0.035_714_285_714 - 0.024_820_720_100);
        assert!((dpr[3] - expected).abs() < 1e-10, "dpr[3] = {}", dpr[3]);
    }

    #[test]
    fn test_sample_profile_records_gamma_and_beam_term() {
        let sources = DriverSources::none(1e-5);
        let mut response = PlasmaResponse::new(&sources);
        let column = PlasmaColumn::uniform(4, 1, 4.0).unwrap();
        let radii = [0.5, 1.5, 2.5, 3.5];
        let mut profile = FieldProfile::new(4);
        profile.b_theta_0.fill(9.0);
        response.sample_profile(0.0, column.view(), &radii, &mut profile, false);
        assert_eq!(response.particle_gamma().len(), 4);
        assert!((response.particle_gamma()[3] - 1.0).abs() < 1e-14);
        assert!(profile.b_theta_0.iter().all(|&b| b == 0.0));

        let mut parallel = FieldProfile::new(4);
        response.sample_profile(0.0, column.view(), &radii, &mut parallel, true);
        assert_eq!(profile, parallel);
    }
}
