// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Xi-Stepping Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! ξ-stepping driver: evolves the plasma column from ξ_max to ξ_min and
//! assembles the wakefield mesh.
//!
//! Step `s` starts at `ξ_s = ξ_max − s dξ`, advances the column to
//! `ξ_s − dξ`, samples the fields there and stores them in slice
//! `n_xi − 1 − s`, whose coordinate is exactly `ξ_s − dξ`.

use crate::beam::{BeamParticles, BeamSource};
use crate::deposition::{deposit_at_xi, DepositionGeometry};
use crate::eom::PlasmaResponse;
use crate::integrator::Rk4Stepper;
use crate::laser::LaserPulse;
use crate::postprocess::{derive_fields, DerivedFields};
use crate::sources::DriverSources;
use ndarray::{Array1, Array2};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};
use wake_types::config::WakefieldConfig;
use wake_types::constants::BOUNDARY_MARGIN;
use wake_types::error::WakeResult;
use wake_types::state::{FieldProfile, PlasmaColumn, SimulationGrid, WakefieldMesh};

/// Why the ξ loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// All `n_xi` slices were computed.
    Completed,
    /// Every particle left the domain during `step`; that slice and the
    /// ones after it are zero.
    ColumnEmptied { step: usize },
    /// The cancellation flag was set before `step` started.
    Cancelled { step: usize },
}

/// Output of a wakefield run. Meshes are `[n_r, n_xi]` in normalized units;
/// deposition grids are guard-padded `(n_xi + 4, n_r + 4)`.
#[derive(Debug, Clone)]
pub struct WakefieldResult {
    pub grid: SimulationGrid,
    pub mesh: WakefieldMesh,
    pub derived: DerivedFields,
    /// Plasma charge deposited at ξ_max and after every step.
    pub charge: Array2<f64>,
    /// Plasma susceptibility (q/γ) deposited alongside `charge`.
    pub susceptibility: Array2<f64>,
    /// Mesh slices holding computed values; the rest stay zero.
    pub valid_slices: Range<usize>,
    /// Plasma particles dropped at the radial boundary during the run.
    pub removed_particles: usize,
    pub termination: Termination,
    /// Plasma skin depth [m].
    pub skin_depth: f64,
}

impl WakefieldResult {
    pub fn plasma_density(&self) -> &Array2<f64> {
        &self.derived.plasma_density
    }

    pub fn psi(&self) -> &Array2<f64> {
        &self.mesh.psi
    }

    pub fn dr_psi(&self) -> &Array2<f64> {
        &self.mesh.dr_psi
    }

    pub fn dxi_psi(&self) -> &Array2<f64> {
        &self.mesh.dxi_psi
    }

    pub fn e_z_p(&self) -> &Array2<f64> {
        &self.derived.e_z_p
    }

    pub fn k_r(&self) -> &Array2<f64> {
        &self.derived.k_r
    }

    pub fn e_r(&self) -> &Array2<f64> {
        &self.derived.e_r
    }

    pub fn r_arr(&self) -> &Array1<f64> {
        &self.grid.r_arr
    }

    pub fn xi_arr(&self) -> &Array1<f64> {
        &self.grid.xi_arr
    }

    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Completed
    }
}

/// Configured wakefield run with its drivers built.
#[derive(Debug, Clone)]
pub struct WakefieldSolver {
    config: WakefieldConfig,
    grid: SimulationGrid,
    sources: DriverSources,
}

impl WakefieldSolver {
    /// Validate `config`, build the normalized grid and the drivers.
    /// `beam` is in SI units.
    pub fn new(config: WakefieldConfig, beam: Option<&BeamParticles>) -> WakeResult<Self> {
        let grid = config.create_grid()?;
        let skin_depth = config.skin_depth();
        let laser = config
            .laser
            .as_ref()
            .map(|laser| LaserPulse::new(laser, config.laser_z_foc))
            .transpose()?;
        let beam = beam
            .map(|beam| BeamSource::new(beam, &grid, config.n_p, config.p_shape))
            .transpose()?;
        Ok(WakefieldSolver {
            sources: DriverSources {
                laser,
                beam,
                skin_depth,
            },
            config,
            grid,
        })
    }

    pub fn grid(&self) -> &SimulationGrid {
        &self.grid
    }

    pub fn config(&self) -> &WakefieldConfig {
        &self.config
    }

    pub fn sources(&self) -> &DriverSources {
        &self.sources
    }

    pub fn run(&self) -> WakeResult<WakefieldResult> {
        self.run_with_cancel(&AtomicBool::new(false))
    }

    /// Run, checking `cancel` before every ξ-step.
    pub fn run_with_cancel(&self, cancel: &AtomicBool) -> WakeResult<WakefieldResult> {
        let column = PlasmaColumn::uniform(self.grid.n_r, self.grid.ppc, self.grid.r_max)?;
        self.run_column(column, cancel)
    }

    fn run_column(&self, mut column: PlasmaColumn, cancel: &AtomicBool) -> WakeResult<WakefieldResult> {
        let grid = &self.grid;
        let shape = self.config.p_shape;
        let r_limit = grid.r_max + BOUNDARY_MARGIN;
        let radii = grid.r_arr.to_vec();

        info!(
            n_r = grid.n_r,
            n_xi = grid.n_xi,
            particles = column.len(),
            laser = self.sources.laser.is_some(),
            beam = self.sources.beam.is_some(),
            parallel_probes = self.config.parallel_probes,
            "starting wakefield run"
        );

        let geometry = DepositionGeometry::from_grid(grid);
        let mut charge = geometry.zeros();
        let mut susceptibility = geometry.zeros();
        // Cold column at ξ_max: γ = 1.
        deposit_at_xi(grid.xi_max, &column.r, &column.q, &geometry, shape, &mut charge)?;
        deposit_at_xi(grid.xi_max, &column.r, &column.q, &geometry, shape, &mut susceptibility)?;

        let mut mesh = WakefieldMesh::new(grid.n_r, grid.n_xi);
        let mut response = PlasmaResponse::new(&self.sources);
        let mut stepper = Rk4Stepper::new();
        let mut profile = FieldProfile::new(grid.n_r);
        let mut chi_weights = Vec::with_capacity(column.len());
        let mut termination = Termination::Completed;
        let mut filled = 0;
        let mut removed_particles = 0;
        let mut warned_non_finite = false;

        for step in 0..grid.n_xi {
            if cancel.load(Ordering::Relaxed) {
                warn!(step, "wakefield run cancelled");
                termination = Termination::Cancelled { step };
                break;
            }

            let xi = grid.xi_max - step as f64 * grid.dxi;
            stepper.step(&mut response, xi, grid.dxi, &mut column);

            let removed = column.retain_within(r_limit);
            if removed > 0 {
                removed_particles += removed;
                debug!(step, removed, remaining = column.len(), "particles left the domain");
            }
            if column.is_empty() {
                warn!(step, "plasma column emptied, remaining slices left at zero");
                termination = Termination::ColumnEmptied { step };
                break;
            }

            let xi_next = xi - grid.dxi;
            response.sample_profile(
                xi_next,
                column.view(),
                &radii,
                &mut profile,
                self.config.parallel_probes,
            );

            chi_weights.clear();
            chi_weights.extend(
                column
                    .q
                    .iter()
                    .zip(response.particle_gamma())
                    .map(|(&q, &gamma)| q / gamma),
            );
            deposit_at_xi(xi_next, &column.r, &column.q, &geometry, shape, &mut charge)?;
            deposit_at_xi(xi_next, &column.r, &chi_weights, &geometry, shape, &mut susceptibility)?;

            let slice = grid.slice_for_step(step);
            if !warned_non_finite && !profile.is_finite() {
                warn!(step, slice, xi = xi_next, "non-finite field values in slice");
                warned_non_finite = true;
            }
            mesh.store_slice(slice, &profile)?;
            filled += 1;
            debug!(step, slice, xi = xi_next, particles = column.len(), "slice stored");
        }

        let derived = derive_fields(&mesh, grid);
        let valid_slices = (grid.n_xi - filled)..grid.n_xi;
        info!(
            slices = filled,
            particles = column.len(),
            removed = removed_particles,
            termination = ?termination,
            "wakefield run finished"
        );

        Ok(WakefieldResult {
            grid: grid.clone(),
            mesh,
            derived,
            charge,
            susceptibility,
            valid_slices,
            removed_particles,
            termination,
            skin_depth: self.sources.skin_depth,
        })
    }
}

/// Build and run a solver in one call.
pub fn calculate_wakefields(
    config: &WakefieldConfig,
    beam: Option<&BeamParticles>,
) -> WakeResult<WakefieldResult> {
    WakefieldSolver::new(config.clone(), beam)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use wake_types::config::{LogConfig, ParticleShape};
    use wake_types::constants::plasma_skin_depth;

    fn quiet_config(n_r: usize, n_xi: usize) -> WakefieldConfig {
        let n_p = 1e23;
        let s_d = plasma_skin_depth(n_p);
        WakefieldConfig {
            r_max: 4.0 * s_d,
            xi_min: -0.1 * n_xi as f64 * s_d,
            xi_max: 0.0,
            n_r,
            n_xi,
            ppc: 1,
            n_p,
            laser_z_foc: 0.0,
            p_shape: ParticleShape::Linear,
            parallel_probes: false,
            laser: None,
            logging: LogConfig::default(),
        }
    }

    #[test]
    fn test_quiescent_single_step() {
        let result = calculate_wakefields(&quiet_config(4, 1), None).unwrap();
        assert!(result.is_complete());
        assert_eq!(result.valid_slices, 0..1);
        assert_eq!(result.psi().dim(), (4, 1));
        assert_eq!(result.removed_particles, 0);
        // The innermost shell drifts out past r_arr[0] = 0.5, so the first
        // mesh radius sees the bare-ion closed form ψ = −r²/4 − C with
        // C = 0.0208913 calibrating ψ to zero at the outermost shell.
        let calibration = 0.020_891_265_404_882;
        let r0 = result.r_arr()[0];
        assert_eq!(result.dr_psi()[[0, 0]], -0.5 * r0);
        let closed_form = -0.25 * r0 * r0 - calibration;
        assert!(
            (result.psi()[[0, 0]] - closed_form).abs() < 1e-9,
            "psi[0] = {}, expected {closed_form}",
            result.psi()[[0, 0]]
        );
        let psi_ref = [-0.083_391_265, -0.035_373_995, -0.013_989_203, 2.527e-5];
        for k in 0..4 {
            let psi = result.psi()[[k, 0]];
            assert!((psi - psi_ref[k]).abs() < 1e-8, "psi[{k}] = {psi}");
            let dn = result.derived.density_perturbation()[[k, 0]];
            assert!(dn.abs() < 0.05, "dn[{k}] = {dn}");
        }
    }

    #[test]
    fn test_outermost_shell_removed_mid_column() {
        let solver = WakefieldSolver::new(quiet_config(4, 3), None).unwrap();
        let mut column = PlasmaColumn::uniform(4, 1, 4.0).unwrap();
        column.r.push(4.05);
        column.pr.push(5.0);
        column.q.push(0.4);
        let result = solver.run_column(column, &AtomicBool::new(false)).unwrap();

        assert_eq!(result.termination, Termination::Completed);
        assert_eq!(result.valid_slices, 0..3);
        assert_eq!(result.removed_particles, 1);
        assert!(result.psi().iter().all(|v| v.is_finite()));
        // r_arr[3] = 3.5 sits just inside the remaining outermost shell,
        // where ψ is calibrated to zero.
        for j in 0..3 {
            let psi = result.psi()[[3, j]];
            assert!(psi.abs() < 5e-3, "psi[3, {j}] = {psi}");
            assert!(psi > 0.0, "psi[3, {j}] = {psi}");
        }
        // 8.4 deposited at ξ_max, then 8.0 after each step without the
        // escaped shell.
        assert!(
            (result.charge.sum() - 32.4).abs() < 1e-9,
            "charge = {}",
            result.charge.sum()
        );
    }

    #[test]
    fn test_axis_particle_surfaces_as_non_finite_fields() {
        let solver = WakefieldSolver::new(quiet_config(4, 3), None).unwrap();
        let column = PlasmaColumn {
            r: vec![0.0, 1.5, 2.5, 3.5],
            pr: vec![0.0; 4],
            q: vec![0.5, 1.5, 2.5, 3.5],
        };
        let result = solver.run_column(column, &AtomicBool::new(false)).unwrap();

        assert_eq!(result.termination, Termination::Completed);
        assert_eq!(result.valid_slices, 0..3);
        assert_eq!(result.removed_particles, 0);
        assert!(result.psi().iter().any(|v| !v.is_finite()));
    }

    #[test]
    fn test_cancel_before_start_leaves_mesh_empty() {
        let solver = WakefieldSolver::new(quiet_config(4, 5), None).unwrap();
        let cancel = AtomicBool::new(true);
        let result = solver.run_with_cancel(&cancel).unwrap();
        assert_eq!(result.termination, Termination::Cancelled { step: 0 });
        assert!(result.valid_slices.is_empty());
        assert!(result.psi().iter().all(|&v| v == 0.0));
        // Initial column is still deposited.
        assert!(result.charge.sum() > 0.0);
    }

    #[test]
    fn test_column_outside_domain_empties() {
        let solver = WakefieldSolver::new(quiet_config(4, 5), None).unwrap();
        let r_out = solver.grid().r_max + 1.0;
        let column = PlasmaColumn {
            r: vec![r_out, r_out + 0.5],
            pr: vec![0.0, 0.0],
            q: vec![1.0, 1.0],
        };
        let result = solver.run_column(column, &AtomicBool::new(false)).unwrap();
        assert_eq!(result.termination, Termination::ColumnEmptied { step: 0 });
        assert_eq!(result.valid_slices, 5..5);
        assert!(result.mesh.b_theta_bar.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_slices_fill_from_xi_max_end() {
        let result = calculate_wakefields(&quiet_config(4, 3), None).unwrap();
        assert_eq!(result.valid_slices, 0..3);
        for j in 0..3 {
            assert!(result.psi()[[0, j]] != 0.0, "slice {j} not written");
        }
        let xi = result.xi_arr();
        assert!((xi[2] - (result.grid.xi_max - result.grid.dxi)).abs() < 1e-12);
    }
}
