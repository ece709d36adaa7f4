//! Quasi-static r–ξ plasma wakefield solver.
//!
//! Kernels: field solver, deposition, RK4 integrator.
//! Orchestration: equations of motion, drivers, ξ-stepping loop, output.

pub mod beam;
pub mod deposition;
pub mod driver;
pub mod eom;
pub mod field_solver;
pub mod integrator;
pub mod laser;
pub mod observe;
pub mod output;
pub mod postprocess;
pub mod sources;

pub use driver::{calculate_wakefields, Termination, WakefieldResult, WakefieldSolver};
