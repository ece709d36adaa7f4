// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Field Solver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Quasi-static field solver for a single ξ-slice of the plasma column.
//!
//! The column is a 1D set of charged shells. Sorting the shells by radius
//! turns Gauss's law for ψ and the Ampère-type equation for B̄_θ into
//! running sums over enclosed charge plus a two-term linear recursion
//! `B̄_θ(r) = a_i r + b_i / r` between consecutive shells.
//!
//! All work buffers live in [`FieldSolver`] and are overwritten on every
//! [`FieldSolver::solve`] call, so one instance can be reused across RK4
//! stages and ξ-steps without reallocating.
//!
//! Values at the particles are midpoint averages across the
//! discontinuity each shell introduces. Values at probe radii use the
//! one-sided (enclosed-only) form, which is continuous between shells.

use rayon::prelude::*;
use wake_math::ordering::argsort_into;
use wake_types::state::{ColumnView, FieldProfile, FieldSample};

/// Per-particle source terms, in creation order.
#[derive(Debug, Clone, Copy)]
pub struct SourceTerms<'a> {
    /// Azimuthal magnetic field of the driver beam.
    pub b_theta_0: &'a [f64],
    /// Radial gradient of the laser envelope |a|².
    pub nabla_a: &'a [f64],
    /// Laser envelope |a|².
    pub a2: &'a [f64],
}

/// `a_i = K_i a_0 + T_i`, `b_i = U_i a_0 + P_i`, indexed by sorted shell.
#[derive(Debug, Clone, Default)]
struct RecursionCoefficients {
    k: Vec<f64>,
    u: Vec<f64>,
    t: Vec<f64>,
    p: Vec<f64>,
}

impl RecursionCoefficients {
    fn resize(&mut self, n: usize) {
        self.k.resize(n, 0.0);
        self.u.resize(n, 0.0);
        self.t.resize(n, 0.0);
        self.p.resize(n, 0.0);
    }
}

/// Reusable field-solver workspace.
#[derive(Debug, Clone, Default)]
pub struct FieldSolver {
    order: Vec<usize>,

    // Indexed by sorted position.
    sorted_r: Vec<f64>,
    sum_q: Vec<f64>,
    sum_q_ln_r: Vec<f64>,
    sum_flux: Vec<f64>,
    shell_a: Vec<f64>,
    shell_b: Vec<f64>,
    coeffs: RecursionCoefficients,

    // Indexed by particle (creation order).
    psi: Vec<f64>,
    dr_psi: Vec<f64>,
    dxi_psi: Vec<f64>,
    gamma: Vec<f64>,
    b_theta_bar: Vec<f64>,

    calibration: f64,
    flux_total: f64,
    a_0: f64,
}

impl FieldSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Solve the fields of `column` under `sources`.
    ///
    /// Radii must be strictly positive; `r = 0` and non-finite inputs are
    /// not guarded and propagate into the result.
    ///
    /// # Panics
    /// If any per-particle slice length differs from `column.len()`.
    pub fn solve(&mut self, column: ColumnView<'_>, sources: SourceTerms<'_>) -> SolvedColumn<'_> {
        let n = column.len();
        assert_eq!(column.pr.len(), n, "pr length must match r");
        assert_eq!(column.q.len(), n, "q length must match r");
        assert_eq!(sources.b_theta_0.len(), n, "b_theta_0 length must match r");
        assert_eq!(sources.nabla_a.len(), n, "nabla_a length must match r");
        assert_eq!(sources.a2.len(), n, "a2 length must match r");

        self.prepare(n);
        argsort_into(column.r, &mut self.order);
        self.accumulate_potential(column);
        self.accumulate_flux(column);
        self.compute_gamma(column, sources.a2);
        self.recurse(column, sources);
        self.average_b_theta(column);

        SolvedColumn { solver: self }
    }

    fn prepare(&mut self, n: usize) {
        for buf in [
            &mut self.sorted_r,
            &mut self.sum_q,
            &mut self.sum_q_ln_r,
            &mut self.sum_flux,
            &mut self.shell_a,
            &mut self.shell_b,
            &mut self.psi,
            &mut self.dr_psi,
            &mut self.dxi_psi,
            &mut self.gamma,
            &mut self.b_theta_bar,
        ] {
            buf.resize(n, 0.0);
        }
        self.coeffs.resize(n);
    }

    /// Enclosed-charge sums, ψ and ∂_r ψ at the particles, calibration.
    fn accumulate_potential(&mut self, column: ColumnView<'_>) {
        let mut sum_q = 0.0;
        let mut sum_q_ln_r = 0.0;
        for (s, &i) in self.order.iter().enumerate() {
            let r_i = column.r[i];
            let q_i = column.q[i];
            let ln_r = r_i.ln();

            let prev_q = sum_q;
            let prev_q_ln_r = sum_q_ln_r;
            sum_q += q_i;
            sum_q_ln_r += q_i * ln_r;

            self.sorted_r[s] = r_i;
            self.sum_q[s] = sum_q;
            self.sum_q_ln_r[s] = sum_q_ln_r;

            let avg_q = 0.5 * (prev_q + sum_q);
            let avg_q_ln_r = 0.5 * (prev_q_ln_r + sum_q_ln_r);
            self.psi[i] = avg_q * ln_r - avg_q_ln_r - 0.25 * r_i * r_i;
            self.dr_psi[i] = avg_q / r_i - 0.5 * r_i;
        }

        // ψ vanishes at the outermost shell.
        self.calibration = match self.sorted_r.last() {
            Some(&r_n) => sum_q * r_n.ln() - sum_q_ln_r - 0.25 * r_n * r_n,
            None => 0.0,
        };
        let calibration = self.calibration;
        self.psi.iter_mut().for_each(|psi| *psi -= calibration);
    }

    /// Σ q p_r / (r (1+ψ)) for ∂_ξ ψ, midpoint form at the particles and
    /// one-sided form for probes.
    fn accumulate_flux(&mut self, column: ColumnView<'_>) {
        let mut flux_mid = 0.0;
        let mut flux_outer = 0.0;
        for (s, &i) in self.order.iter().enumerate() {
            let r_i = column.r[i];
            let qp = column.q[i] * column.pr[i];

            let prev = flux_mid;
            flux_mid += qp / (r_i * (1.0 + self.psi[i]));
            self.dxi_psi[i] = -0.5 * (prev + flux_mid);

            let psi_outer = self.enclosed_psi(s, r_i);
            flux_outer += qp / (r_i * (1.0 + psi_outer));
            self.sum_flux[s] = flux_outer;
        }
        self.dxi_psi.iter_mut().for_each(|d| *d += flux_mid);
        self.flux_total = flux_outer;
    }

    fn compute_gamma(&mut self, column: ColumnView<'_>, a2: &[f64]) {
        for (i, gamma) in self.gamma.iter_mut().enumerate() {
            let a = 1.0 + self.psi[i];
            let pr = column.pr[i];
            *gamma = (1.0 + pr * pr + a2[i] + a * a) / (2.0 * a);
        }
    }

    /// Shell-to-shell recursion, closed by requiring `a_N = 0`.
    fn recurse(&mut self, column: ColumnView<'_>, sources: SourceTerms<'_>) {
        let (mut k_prev, mut u_prev, mut t_prev, mut p_prev) = (1.0, 0.0, 0.0, 0.0);
        for (s, &i) in self.order.iter().enumerate() {
            let r = column.r[i];
            let pr = column.pr[i];
            let q = column.q[i];
            let gamma = self.gamma[i];
            let dr_psi = self.dr_psi[i];
            let dxi_psi = self.dxi_psi[i];

            let a = 1.0 + self.psi[i];
            let a2 = a * a;
            let b = 1.0 / (r * a);
            let c = 1.0 / (r * a2);
            let pr2 = pr * pr;

            let coef_a = q * b;
            let coef_b = q
                * (-gamma * dr_psi * c
                    + pr2 * dr_psi / (r * a2 * a)
                    + pr * dxi_psi * c
                    + pr2 / (r * r * a2)
                    + sources.b_theta_0[i] * b
                    + 0.5 * sources.nabla_a[i] * c);
            let coef_c = q * (pr2 * c - (gamma / a - 1.0) / r);

            let l = 1.0 + 0.5 * coef_a * r;
            let m = 0.5 * coef_a / r;
            let n = -0.5 * coef_a * r * r * r;
            let o = 1.0 - 0.5 * coef_a * r;

            let k_i = l * k_prev + m * u_prev;
            let u_i = n * k_prev + o * u_prev;
            let t_i = l * t_prev + m * p_prev + 0.5 * coef_b + 0.25 * coef_a * coef_c;
            let p_i = n * t_prev
                + o * p_prev
                + r * (coef_c - 0.5 * coef_b * r - 0.25 * coef_a * coef_c * r);

            self.coeffs.k[s] = k_i;
            self.coeffs.u[s] = u_i;
            self.coeffs.t[s] = t_i;
            self.coeffs.p[s] = p_i;
            (k_prev, u_prev, t_prev, p_prev) = (k_i, u_i, t_i, p_i);
        }

        self.a_0 = if self.order.is_empty() { 0.0 } else { -t_prev / k_prev };
        let a_0 = self.a_0;
        for s in 0..self.order.len() {
            self.shell_a[s] = self.coeffs.k[s] * a_0 + self.coeffs.t[s];
            self.shell_b[s] = self.coeffs.u[s] * a_0 + self.coeffs.p[s];
        }
    }

    fn average_b_theta(&mut self, column: ColumnView<'_>) {
        let mut a_prev = self.a_0;
        let mut b_prev = 0.0;
        for (s, &i) in self.order.iter().enumerate() {
            let r = column.r[i];
            let a_i = self.shell_a[s];
            let b_i = self.shell_b[s];
            self.b_theta_bar[i] = 0.5 * (a_i + a_prev) * r + 0.5 * (b_i + b_prev) / r;
            a_prev = a_i;
            b_prev = b_i;
        }
    }

    /// One-sided ψ at radius `r` with shells `0..=s` enclosed.
    fn enclosed_psi(&self, s: usize, r: f64) -> f64 {
        self.sum_q[s] * r.ln() - self.sum_q_ln_r[s] - 0.25 * r * r - self.calibration
    }

    /// Fields at `r` given the last enclosed shell (`None` inside the
    /// innermost shell).
    fn probe_point(&self, shell: Option<usize>, r: f64) -> FieldSample {
        match shell {
            None => FieldSample {
                psi: -0.25 * r * r - self.calibration,
                dr_psi: -0.5 * r,
                dxi_psi: self.flux_total,
                b_theta: self.a_0 * r,
            },
            Some(s) => FieldSample {
                psi: self.enclosed_psi(s, r),
                dr_psi: self.sum_q[s] / r - 0.5 * r,
                dxi_psi: self.flux_total - self.sum_flux[s],
                b_theta: self.shell_a[s] * r + self.shell_b[s] / r,
            },
        }
    }
}

/// Read-only view of a solved column, valid until the next `solve`.
#[derive(Debug, Clone, Copy)]
pub struct SolvedColumn<'s> {
    solver: &'s FieldSolver,
}

impl<'s> SolvedColumn<'s> {
    pub fn len(&self) -> usize {
        self.solver.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solver.order.is_empty()
    }

    /// ψ at each particle (creation order).
    pub fn psi(&self) -> &'s [f64] {
        &self.solver.psi
    }

    pub fn dr_psi(&self) -> &'s [f64] {
        &self.solver.dr_psi
    }

    pub fn dxi_psi(&self) -> &'s [f64] {
        &self.solver.dxi_psi
    }

    /// Lorentz factor of each particle.
    pub fn gamma(&self) -> &'s [f64] {
        &self.solver.gamma
    }

    /// Plasma B̄_θ at each particle, averaged across its shell.
    pub fn b_theta_bar(&self) -> &'s [f64] {
        &self.solver.b_theta_bar
    }

    /// Sort permutation: `order()[s]` is the particle at sorted position `s`.
    pub fn order(&self) -> &'s [usize] {
        &self.solver.order
    }

    pub fn sorted_radii(&self) -> &'s [f64] {
        &self.solver.sorted_r
    }

    /// `(a_i, b_i)` for each shell in sorted order.
    pub fn shell_coefficients(&self) -> (&'s [f64], &'s [f64]) {
        (&self.solver.shell_a, &self.solver.shell_b)
    }

    /// Inner-region coefficient: `B̄_θ = a_0 r` inside the innermost shell.
    pub fn a_0(&self) -> f64 {
        self.solver.a_0
    }

    /// Constant subtracted from ψ so that it vanishes at the outermost shell.
    pub fn calibration(&self) -> f64 {
        self.solver.calibration
    }

    /// Fields at a single radius (binary search over the shells).
    pub fn sample(&self, r: f64) -> FieldSample {
        let enclosed = self.solver.sorted_r.partition_point(|&x| x < r);
        self.solver.probe_point(enclosed.checked_sub(1), r)
    }

    /// Fields at ascending `radii`, written into `out` (`b_theta_0` is left
    /// untouched). One merged pass over shells and probes.
    pub fn probe(&self, radii: &[f64], out: &mut FieldProfile) {
        debug_assert!(radii.windows(2).all(|w| w[0] <= w[1]), "probe radii must be sorted");
        out.resize(radii.len());
        let sorted_r = &self.solver.sorted_r;
        let mut enclosed = 0;
        for (j, &r) in radii.iter().enumerate() {
            while enclosed < sorted_r.len() && sorted_r[enclosed] < r {
                enclosed += 1;
            }
            out.set(j, self.solver.probe_point(enclosed.checked_sub(1), r));
        }
    }

    /// Same values as [`probe`](Self::probe), evaluated in parallel with one
    /// binary search per probe radius.
    pub fn probe_parallel(&self, radii: &[f64], out: &mut FieldProfile) {
        out.resize(radii.len());
        radii
            .par_iter()
            .zip(out.psi.par_iter_mut())
            .zip(out.dr_psi.par_iter_mut())
            .zip(out.dxi_psi.par_iter_mut())
            .zip(out.b_theta_bar.par_iter_mut())
            .for_each(|((((&r, psi), dr_psi), dxi_psi), b_theta)| {
                let sample = self.sample(r);
                *psi = sample.psi;
                *dr_psi = sample.dr_psi;
                *dxi_psi = sample.dxi_psi;
                *b_theta = sample.b_theta;
            });
    }
}
