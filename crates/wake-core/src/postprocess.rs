// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Derived Fields
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Fields derived from the wakefield mesh by finite differences.
//!
//! ```text
//! E_r  = B̄_θ + B_θ,0 − ∂_r ψ
//! n    = (1/r) ∂_r (r E_r) − ∂_ξ (∂_ξ ψ) − 1
//! K_r  = ∂_r (∂_r ψ)
//! E_z' = ∂_ξ (∂_ξ ψ)
//! ```

use ndarray::{Array2, Axis};
use wake_math::finite_diff::gradient;
use wake_types::state::{SimulationGrid, WakefieldMesh};

/// `[n_r, n_xi]` derived fields.
#[derive(Debug, Clone)]
pub struct DerivedFields {
    pub e_r: Array2<f64>,
    /// Electron density in units of n_p, offset by the ion background.
    pub plasma_density: Array2<f64>,
    pub k_r: Array2<f64>,
    pub e_z_p: Array2<f64>,
}

impl DerivedFields {
    /// Density relative to the unperturbed plasma (0 for a quiescent column).
    pub fn density_perturbation(&self) -> Array2<f64> {
        &self.plasma_density + 1.0
    }
}

pub fn derive_fields(mesh: &WakefieldMesh, grid: &SimulationGrid) -> DerivedFields {
    let radial = Axis(0);
    let longitudinal = Axis(1);
    let r_col = grid.r_arr.view().insert_axis(Axis(1));

    let e_r = &mesh.b_theta_bar + &mesh.b_theta_0 - gradient(&mesh.psi, radial, grid.dr);
    let r_e_r = &e_r * &r_col;
    let e_z_p = gradient(&mesh.dxi_psi, longitudinal, grid.dxi);
    let plasma_density = gradient(&r_e_r, radial, grid.dr) / &r_col - &e_z_p - 1.0;
    let k_r = gradient(&mesh.dr_psi, radial, grid.dr);

    DerivedFields {
        e_r,
        plasma_density,
        k_r,
        e_z_p,
    }
}
