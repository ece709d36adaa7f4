//! Mathematical primitives for SCPN Wakefield.

pub mod finite_diff;
pub mod interp;
pub mod ordering;
