// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
/// Elementary charge (C)
pub const ELEMENTARY_CHARGE: f64 = 1.602_176_634e-19;

/// Electron rest mass (kg)
pub const ELECTRON_MASS: f64 = 9.109_383_701_5e-31;

/// Speed of light in vacuum (m/s)
pub const SPEED_OF_LIGHT: f64 = 299_792_458.0;

/// Vacuum permittivity (F/m)
pub const VACUUM_PERMITTIVITY: f64 = 8.854_187_812_8e-12;

/// Radial distance beyond `r_max` a plasma particle may travel before it is
/// dropped from the column (skin depths).
pub const BOUNDARY_MARGIN: f64 = 0.1;

/// Electron plasma frequency ω_p \[rad/s\] for a density in m⁻³.
pub fn plasma_frequency(n_p: f64) -> f64 {
    (n_p * ELEMENTARY_CHARGE * ELEMENTARY_CHARGE / (VACUUM_PERMITTIVITY * ELECTRON_MASS)).sqrt()
}

/// Plasma skin depth c/ω_p \[m\] for a density in m⁻³.
///
/// All solver-internal lengths are expressed in units of this value.
pub fn plasma_skin_depth(n_p: f64) -> f64 {
    SPEED_OF_LIGHT / plasma_frequency(n_p)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skin_depth_reference_density() {
        // n_p = 1e24 m^-3 → ω_p ≈ 5.641e13 rad/s, c/ω_p ≈ 5.314 µm
        let s_d = plasma_skin_depth(1e24);
        assert!((s_d - 5.314e-6).abs() < 5e-9, "s_d = {s_d}");
    }

    #[test]
    fn test_skin_depth_scales_with_inverse_sqrt_density() {
        let ratio = plasma_skin_depth(1e22) / plasma_skin_depth(4e22);
        assert!((ratio - 2.0).abs() < 1e-12);
    }
}
