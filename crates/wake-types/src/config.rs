// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::constants::plasma_skin_depth;
use crate::error::{WakeError, WakeResult};
use crate::state::SimulationGrid;
use serde::{Deserialize, Serialize};

/// Top-level wakefield run configuration.
/// All lengths are SI (metres); the solver normalizes them to skin depths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WakefieldConfig {
    /// Radial extent of the field mesh [m].
    pub r_max: f64,
    /// Lower end of the co-moving window [m].
    pub xi_min: f64,
    /// Upper end of the co-moving window [m]; the plasma column starts here.
    pub xi_max: f64,
    pub n_r: usize,
    pub n_xi: usize,
    /// Plasma macro-particles per radial cell.
    #[serde(default = "default_ppc")]
    pub ppc: usize,
    /// Background plasma density [m⁻³].
    pub n_p: f64,
    /// Distance from the plasma slice to the laser focus [m].
    #[serde(default)]
    pub laser_z_foc: f64,
    #[serde(default)]
    pub p_shape: ParticleShape,
    /// Evaluate probe-mode fields with rayon instead of the merged scan.
    #[serde(default)]
    pub parallel_probes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub laser: Option<LaserConfig>,
    #[serde(default)]
    pub logging: LogConfig,
}

/// Gaussian laser driver parameters (SI).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaserConfig {
    /// Peak normalized vector potential.
    pub a_0: f64,
    /// Central wavelength [m].
    pub l_0: f64,
    /// Waist at focus [m].
    pub w_0: f64,
    /// FWHM duration [s].
    pub tau: f64,
    /// Longitudinal centre of the pulse in the co-moving frame [m].
    pub xi_c: f64,
    #[serde(default)]
    pub polarization: Polarization,
}

/// Macro-particle shape used by the deposition collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParticleShape {
    #[default]
    Linear,
    Cubic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Polarization {
    #[default]
    Linear,
    Circular,
}

/// Log level configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    #[default]
    Pretty,
    Compact,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub level: LogLevel,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_ppc() -> usize {
    2
}

fn require_positive(value: f64, name: &str) -> WakeResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(WakeError::ConfigError(format!(
            "{name} must be finite and > 0, got {value}"
        )));
    }
    Ok(())
}

impl WakefieldConfig {
    /// Load from a JSON file and validate.
    pub fn from_file(path: &str) -> WakeResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> WakeResult<()> {
        require_positive(self.r_max, "r_max")?;
        require_positive(self.n_p, "n_p")?;
        if !self.xi_min.is_finite() || !self.xi_max.is_finite() || self.xi_max <= self.xi_min {
            return Err(WakeError::ConfigError(format!(
                "xi window must be finite with xi_max > xi_min, got [{}, {}]",
                self.xi_min, self.xi_max
            )));
        }
        if self.n_r < 2 {
            return Err(WakeError::ConfigError(format!(
                "n_r must be >= 2, got {}",
                self.n_r
            )));
        }
        if self.n_xi == 0 {
            return Err(WakeError::ConfigError("n_xi must be >= 1".to_string()));
        }
        if self.ppc == 0 {
            return Err(WakeError::ConfigError("ppc must be >= 1".to_string()));
        }
        if !self.laser_z_foc.is_finite() {
            return Err(WakeError::ConfigError(
                "laser_z_foc must be finite".to_string(),
            ));
        }
        if let Some(laser) = &self.laser {
            laser.validate()?;
        }
        Ok(())
    }

    /// Plasma skin depth for this configuration's density [m].
    pub fn skin_depth(&self) -> f64 {
        plasma_skin_depth(self.n_p)
    }

    /// Build the normalized (skin-depth units) simulation grid.
    pub fn create_grid(&self) -> WakeResult<SimulationGrid> {
        self.validate()?;
        let s_d = self.skin_depth();
        SimulationGrid::new(
            self.n_r,
            self.n_xi,
            self.ppc,
            self.r_max / s_d,
            self.xi_min / s_d,
            self.xi_max / s_d,
        )
    }
}

impl LaserConfig {
    pub fn validate(&self) -> WakeResult<()> {
        if !self.a_0.is_finite() || self.a_0 < 0.0 {
            return Err(WakeError::ConfigError(format!(
                "laser.a_0 must be finite and >= 0, got {}",
                self.a_0
            )));
        }
        require_positive(self.l_0, "laser.l_0")?;
        require_positive(self.w_0, "laser.w_0")?;
        require_positive(self.tau, "laser.tau")?;
        if !self.xi_c.is_finite() {
            return Err(WakeError::ConfigError(
                "laser.xi_c must be finite".to_string(),
            ));
        }
        Ok(())
    }
}
