// ─────────────────────────────────────────────────────────────────────
// SCPN Wakefield — Finite Differences
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Second-order finite differences on uniform meshes.
//!
//! Interior points use the centred stencil `(f[i+1] - f[i-1]) / 2h`, the two
//! edges use the one-sided second-order stencils
//! `(-3 f0 + 4 f1 - f2) / 2h` and `(3 fn - 4 fn-1 + fn-2) / 2h`.
//! Lanes with two points fall back to a plain difference, single-point
//! lanes have zero derivative.

use ndarray::{Array2, ArrayView1, ArrayViewMut1, Axis};

/// Derivative of one lane with spacing `h`, written into `out`.
pub fn gradient_lane(values: ArrayView1<'_, f64>, mut out: ArrayViewMut1<'_, f64>, h: f64) {
    let n = values.len();
    assert_eq!(out.len(), n, "output lane length mismatch");
    match n {
        0 => {}
        1 => out[0] = 0.0,
        2 => {
            let d = (values[1] - values[0]) / h;
            out[0] = d;
            out[1] = d;
        }
        _ => {
            let inv_2h = 0.5 / h;
            out[0] = (-3.0 * values[0] + 4.0 * values[1] - values[2]) * inv_2h;
            for i in 1..n - 1 {
                out[i] = (values[i + 1] - values[i - 1]) * inv_2h;
            }
            out[n - 1] =
                (3.0 * values[n - 1] - 4.0 * values[n - 2] + values[n - 3]) * inv_2h;
        }
    }
}

/// Derivative of a 2D field along `axis` with uniform spacing `h`.
pub fn gradient(field: &Array2<f64>, axis: Axis, h: f64) -> Array2<f64> {
    let mut out = Array2::zeros(field.dim());
    for (src, dst) in field.lanes(axis).into_iter().zip(out.lanes_mut(axis)) {
        gradient_lane(src, dst, h);
    }
    out
}

/// Derivative of a 1D sample vector with uniform spacing `h`.
pub fn gradient_1d(values: &[f64], h: f64) -> Vec<f64> {
    let mut out = vec![0.0; values.len()];
    gradient_lane(ArrayView1::from(values), ArrayViewMut1::from(&mut out[..]), h);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_quadratic_exact_everywhere() {
        // f = x², second-order stencils are exact, edges included
        let h = 0.25;
        let values: Vec<f64> = (0..9).map(|i| (i as f64 * h).powi(2)).collect();
        let d = gradient_1d(&values, h);
        for (i, &di) in d.iter().enumerate() {
            let x = i as f64 * h;
            assert!((di - 2.0 * x).abs() < 1e-12, "d[{i}] = {di}, expected {}", 2.0 * x);
        }
    }

    #[test]
    fn test_gradient_short_lanes() {
        assert_eq!(gradient_1d(&[3.0], 0.1), vec![0.0]);
        let d = gradient_1d(&[1.0, 2.0], 0.5);
        assert_eq!(d, vec![2.0, 2.0]);
        assert!(gradient_1d(&[], 1.0).is_empty());
    }

    #[test]
    fn test_gradient_2d_axes() {
        // f(i, j) = 2 x_i + 3 y_j on rows/cols spacing 0.5 / 0.2
        let (hx, hy) = (0.5, 0.2);
        let field = Array2::from_shape_fn((6, 5), |(i, j)| 2.0 * i as f64 * hx + 3.0 * j as f64 * hy);
        let d0 = gradient(&field, Axis(0), hx);
        let d1 = gradient(&field, Axis(1), hy);
        for &v in d0.iter() {
            assert!((v - 2.0).abs() < 1e-12);
        }
        for &v in d1.iter() {
            assert!((v - 3.0).abs() < 1e-12);
        }
    }
}
