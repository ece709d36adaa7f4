// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Laser Driver
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Gaussian laser envelope: |a|² and its radial gradient in SI coordinates.

use std::f64::consts::{LN_2, PI};
use wake_types::config::{LaserConfig, Polarization};
use wake_types::constants::SPEED_OF_LIGHT;
use wake_types::error::WakeResult;

/// Gaussian pulse evaluated at a fixed distance from focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaserPulse {
    /// Peak |a| after polarization averaging and defocusing.
    amplitude: f64,
    /// 1/e² radial width of |a|² [m].
    s_r: f64,
    /// 1/e² longitudinal width of |a|² [m].
    s_z: f64,
    /// Pulse centre [m].
    xi_c: f64,
}

impl LaserPulse {
    /// `focal_offset` is the distance from the plasma slice to the focus [m].
    pub fn new(config: &LaserConfig, focal_offset: f64) -> WakeResult<Self> {
        config.validate()?;
        let z_r = PI * config.w_0 * config.w_0 / config.l_0;
        let w_fac = (1.0 + (focal_offset / z_r).powi(2)).sqrt();
        let s_r = config.w_0 * w_fac / 2.0_f64.sqrt();
        let s_z = config.tau * SPEED_OF_LIGHT / (2.0 * (2.0 * LN_2).sqrt()) * 2.0_f64.sqrt();
        let peak = match config.polarization {
            Polarization::Linear => config.a_0 / 2.0_f64.sqrt(),
            Polarization::Circular => config.a_0,
        };
        Ok(LaserPulse {
            amplitude: peak / w_fac,
            s_r,
            s_z,
            xi_c: config.xi_c,
        })
    }

    fn envelope(&self, xi: f64, r: f64) -> f64 {
        let dxi = xi - self.xi_c;
        self.amplitude
            * self.amplitude
            * (-(r * r) / (self.s_r * self.s_r)).exp()
            * (-(dxi * dxi) / (self.s_z * self.s_z)).exp()
    }

    /// |a|² at `(xi, r)` (inputs in m).
    pub fn a2(&self, xi: f64, r: f64) -> f64 {
        self.envelope(xi, r)
    }

    /// ∂_r |a|² at `(xi, r)` [1/m].
    pub fn nabla_a(&self, xi: f64, r: f64) -> f64 {
        -2.0 * r / (self.s_r * self.s_r) * self.envelope(xi, r)
    }

    pub fn radial_width(&self) -> f64 {
        self.s_r
    }

    pub fn longitudinal_width(&self) -> f64 {
        self.s_z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(polarization: Polarization) -> LaserConfig {
        LaserConfig {
            a_0: 2.0,
            l_0: 0.8e-6,
            w_0: 20e-6,
            tau: 25e-15,
            xi_c: -10e-6,
            polarization,
        }
    }

    #[test]
    fn test_peak_amplitude_at_focus() {
        let lin = LaserPulse::new(&config(Polarization::Linear), 0.0).unwrap();
        let circ = LaserPulse::new(&config(Polarization::Circular), 0.0).unwrap();
        assert!((lin.a2(-10e-6, 0.0) - 2.0).abs() < 1e-12, "a0²/2 for linear");
        assert!((circ.a2(-10e-6, 0.0) - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_widths() {
        let pulse = LaserPulse::new(&config(Polarization::Linear), 0.0).unwrap();
        assert!((pulse.radial_width() - 20e-6 / 2.0_f64.sqrt()).abs() < 1e-18);
        let s_z = 25e-15 * SPEED_OF_LIGHT / (2.0 * (2.0 * LN_2).sqrt()) * 2.0_f64.sqrt();
        assert!((pulse.longitudinal_width() - s_z).abs() < 1e-18);
    }

    #[test]
    fn test_defocusing_lowers_and_widens() {
        let z_r = PI * 20e-6 * 20e-6 / 0.8e-6;
        let pulse = LaserPulse::new(&config(Polarization::Linear), z_r).unwrap();
        // w_fac = √2 at one Rayleigh length.
        assert!((pulse.a2(-10e-6, 0.0) - 1.0).abs() < 1e-12);
        assert!((pulse.radial_width() - 20e-6).abs() < 1e-18);
    }

    #[test]
    fn test_gradient_matches_finite_difference() {
        let pulse = LaserPulse::new(&config(Polarization::Linear), 5e-4).unwrap();
        let (xi, r, h) = (-12e-6, 9e-6, 1e-10);
        let fd = (pulse.a2(xi, r + h) - pulse.a2(xi, r - h)) / (2.0 * h);
        let g = pulse.nabla_a(xi, r);
        assert!(((fd - g) / g).abs() < 1e-6, "fd={fd}, analytic={g}");
        assert_eq!(pulse.nabla_a(xi, 0.0), 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut bad = config(Polarization::Linear);
        bad.w_0 = 0.0;
        assert!(LaserPulse::new(&bad, 0.0).is_err());
    }
}
