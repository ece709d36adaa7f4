//! Driver source terms (laser envelope and beam field) at plasma particles.

use crate::beam::BeamSource;
use crate::field_solver::SourceTerms;
use crate::laser::LaserPulse;

/// Laser and beam drivers, either of which may be absent.
#[derive(Debug, Clone)]
pub struct DriverSources {
    pub laser: Option<LaserPulse>,
    pub beam: Option<BeamSource>,
    /// Plasma skin depth [m], converts normalized coordinates to SI.
    pub skin_depth: f64,
}

/// Per-particle source values, normalized.
#[derive(Debug, Clone, Default)]
pub struct SourceBuffers {
    pub b_theta_0: Vec<f64>,
    pub nabla_a: Vec<f64>,
    pub a2: Vec<f64>,
}

impl SourceBuffers {
    pub fn terms(&self) -> SourceTerms<'_> {
        SourceTerms {
            b_theta_0: &self.b_theta_0,
            nabla_a: &self.nabla_a,
            a2: &self.a2,
        }
    }
}

impl DriverSources {
    pub fn none(skin_depth: f64) -> Self {
        DriverSources {
            laser: None,
            beam: None,
            skin_depth,
        }
    }

    /// Evaluate both drivers at normalized `xi` for every radius in `r`.
    pub fn fill(&self, xi: f64, r: &[f64], out: &mut SourceBuffers) {
        let n = r.len();
        out.b_theta_0.clear();
        out.nabla_a.clear();
        out.a2.clear();

        match &self.laser {
            Some(laser) => {
                let s_d = self.skin_depth;
                let xi_si = xi * s_d;
                out.a2.extend(r.iter().map(|&r_i| laser.a2(xi_si, r_i * s_d)));
                out.nabla_a
                    .extend(r.iter().map(|&r_i| laser.nabla_a(xi_si, r_i * s_d) * s_d));
            }
            None => {
                out.a2.resize(n, 0.0);
                out.nabla_a.resize(n, 0.0);
            }
        }

        match &self.beam {
            Some(beam) => out.b_theta_0.extend(r.iter().map(|&r_i| beam.probe(r_i, xi))),
            None => out.b_theta_0.resize(n, 0.0),
        }
    }

    /// Beam B_θ,0 at normalized `(r, xi)`.
    pub fn beam_field(&self, r: f64, xi: f64) -> f64 {
        self.beam.as_ref().map_or(0.0, |beam| beam.probe(r, xi))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wake_types::config::{LaserConfig, Polarization};

    #[test]
    fn test_no_drivers_fill_zeros() {
        let sources = DriverSources::none(1e-5);
        let mut buf = SourceBuffers::default();
        sources.fill(-1.0, &[0.5, 1.0, 2.0], &mut buf);
        assert_eq!(buf.a2, vec![0.0; 3]);
        assert_eq!(buf.nabla_a, vec![0.0; 3]);
        assert_eq!(buf.b_theta_0, vec![0.0; 3]);
        assert_eq!(sources.beam_field(1.0, -1.0), 0.0);
    }

    #[test]
    fn test_laser_terms_are_normalized() {
        let s_d = 1.68e-5;
        let config = LaserConfig {
            a_0: 1.0,
            l_0: 0.8e-6,
            w_0: 30e-6,
            tau: 30e-15,
            xi_c: -15e-6,
            polarization: Polarization::Circular,
        };
        let laser = LaserPulse::new(&config, 0.0).unwrap();
        let sources = DriverSources {
            laser: Some(laser),
            beam: None,
            skin_depth: s_d,
        };
        let mut buf = SourceBuffers::default();
        let (xi, r) = (-15e-6 / s_d, 0.8);
        sources.fill(xi, &[r], &mut buf);
        assert!((buf.a2[0] - laser.a2(-15e-6, r * s_d)).abs() < 1e-15);
        assert!((buf.nabla_a[0] - laser.nabla_a(-15e-6, r * s_d) * s_d).abs() < 1e-12);
        assert!(buf.nabla_a[0] < 0.0);
    }

    #[test]
    fn test_refill_shrinks_buffers() {
        let sources = DriverSources::none(1e-5);
        let mut buf = SourceBuffers::default();
        sources.fill(0.0, &[1.0; 8], &mut buf);
        sources.fill(0.0, &[1.0; 3], &mut buf);
        assert_eq!(buf.terms().a2.len(), 3);
        assert_eq!(buf.terms().b_theta_0.len(), 3);
    }
}
