// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Property-Based Tests (proptest) for wake-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for wake-types using proptest.
//!
//! Covers: SimulationGrid construction invariants, uniform column lattice,
//! particle removal, mesh shapes.

use proptest::prelude::*;
use wake_types::state::{PlasmaColumn, SimulationGrid, WakefieldMesh};

// ── SimulationGrid Invariants ────────────────────────────────────────

proptest! {
    /// Axis lengths match the constructor arguments.
    #[test]
    fn grid_dimensions_match(
        n_r in 1usize..128,
        n_xi in 1usize..256,
        ppc in 1usize..8,
    ) {
        let grid = SimulationGrid::new(n_r, n_xi, ppc, 6.0, -10.0, 2.0).unwrap();
        prop_assert_eq!(grid.r_arr.len(), n_r);
        prop_assert_eq!(grid.xi_arr.len(), n_xi);
        prop_assert!((grid.dr * n_r as f64 - 6.0).abs() < 1e-12);
        prop_assert!((grid.dxi * n_xi as f64 - 12.0).abs() < 1e-12);
    }

    /// Radial cell centres are uniformly spaced and stay inside (0, r_max).
    #[test]
    fn grid_r_centres_inside(n_r in 2usize..128, r_max in 0.5f64..20.0) {
        let grid = SimulationGrid::new(n_r, 4, 1, r_max, -1.0, 0.0).unwrap();
        for k in 0..n_r {
            prop_assert!(grid.r_arr[k] > 0.0 && grid.r_arr[k] < r_max);
            if k > 0 {
                let delta = grid.r_arr[k] - grid.r_arr[k - 1];
                prop_assert!((delta - grid.dr).abs() < 1e-12);
            }
        }
    }

    /// Every ξ-step maps to a distinct slice, step 0 to the last one.
    #[test]
    fn grid_step_to_slice_is_bijective(n_xi in 1usize..200) {
        let grid = SimulationGrid::new(4, n_xi, 1, 1.0, -1.0, 0.0).unwrap();
        let mut seen = vec![false; n_xi];
        for step in 0..n_xi {
            let j = grid.slice_for_step(step);
            prop_assert!(!seen[j]);
            seen[j] = true;
        }
        prop_assert_eq!(grid.slice_for_step(0), n_xi - 1);
    }
}

// ── PlasmaColumn Invariants ──────────────────────────────────────────

proptest! {
    /// The uniform lattice neutralizes the unit ion background:
    /// Σq = r_max² / 2.
    #[test]
    fn uniform_column_total_charge(
        n_r in 1usize..64,
        ppc in 1usize..6,
        r_max in 0.5f64..10.0,
    ) {
        let column = PlasmaColumn::uniform(n_r, ppc, r_max).unwrap();
        prop_assert_eq!(column.len(), n_r * ppc);
        let expected = 0.5 * r_max * r_max;
        prop_assert!((column.total_charge() - expected).abs() < 1e-10 * expected.max(1.0));
        for w in column.r.windows(2) {
            prop_assert!(w[1] > w[0]);
        }
    }

    /// After removal no particle lies beyond the limit and the three arrays
    /// stay aligned.
    #[test]
    fn retain_within_respects_limit(
        radii in proptest::collection::vec(0.01f64..5.0, 1..64),
        limit in 0.5f64..4.5,
    ) {
        let n = radii.len();
        let mut column = PlasmaColumn {
            q: radii.iter().map(|r| 2.0 * r).collect(),
            pr: (0..n).map(|i| i as f64).collect(),
            r: radii.clone(),
        };
        let expected_kept = radii.iter().filter(|&&r| r <= limit).count();
        let removed = column.retain_within(limit);
        prop_assert_eq!(removed, n - expected_kept);
        prop_assert_eq!(column.r.len(), expected_kept);
        prop_assert_eq!(column.pr.len(), expected_kept);
        prop_assert_eq!(column.q.len(), expected_kept);
        for i in 0..column.len() {
            prop_assert!(column.r[i] <= limit);
            prop_assert!((column.q[i] - 2.0 * column.r[i]).abs() < 1e-15);
        }
        // creation order survives compaction
        for w in column.pr.windows(2) {
            prop_assert!(w[1] > w[0]);
        }
    }
}

// ── WakefieldMesh Invariants ─────────────────────────────────────────

proptest! {
    #[test]
    fn mesh_zero_initialized(n_r in 1usize..64, n_xi in 1usize..64) {
        let mesh = WakefieldMesh::new(n_r, n_xi);
        prop_assert_eq!(mesh.dim(), (n_r, n_xi));
        for arr in [&mesh.psi, &mesh.dr_psi, &mesh.dxi_psi, &mesh.b_theta_bar, &mesh.b_theta_0] {
            prop_assert_eq!(arr.shape(), &[n_r, n_xi]);
            prop_assert!(arr.iter().all(|&v| v == 0.0));
        }
    }
}
