//! Bilinear interpolation on uniform tensor-product grids.

use ndarray::Array2;

/// Uniformly spaced axis `origin + k * step`, `k = 0..len`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformAxis {
    pub origin: f64,
    pub step: f64,
    pub len: usize,
}

impl UniformAxis {
    pub fn new(origin: f64, step: f64, len: usize) -> Self {
        UniformAxis { origin, step, len }
    }

    pub fn coordinate(&self, k: usize) -> f64 {
        self.origin + k as f64 * self.step
    }

    /// Lower node index and fractional offset, clamped to the axis.
    fn locate(&self, x: f64) -> (usize, usize, f64) {
        if self.len < 2 {
            return (0, 0, 0.0);
        }
        let f = (x - self.origin) / self.step;
        let i0 = (f.floor() as isize).clamp(0, self.len as isize - 2) as usize;
        let t = (f - i0 as f64).clamp(0.0, 1.0);
        (i0, i0 + 1, t)
    }
}

/// Bilinear interpolation of `field[[row, col]]` at `(row_x, col_x)`.
///
/// Points outside the grid take the value at the nearest edge.
pub fn interp2d(
    field: &Array2<f64>,
    rows: &UniformAxis,
    cols: &UniformAxis,
    row_x: f64,
    col_x: f64,
) -> f64 {
    debug_assert_eq!(field.dim(), (rows.len, cols.len));
    let (i0, i1, ti) = rows.locate(row_x);
    let (j0, j1, tj) = cols.locate(col_x);

    let v00 = field[[i0, j0]];
    let v01 = field[[i0, j1]];
    let v10 = field[[i1, j0]];
    let v11 = field[[i1, j1]];

    (1.0 - ti) * ((1.0 - tj) * v00 + tj * v01) + ti * ((1.0 - tj) * v10 + tj * v11)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interp2d_exact_gridpoint() {
        let rows = UniformAxis::new(0.0, 1.0, 5);
        let cols = UniformAxis::new(0.0, 1.0, 5);
        let field = Array2::from_shape_fn((5, 5), |(i, j)| (i * 10 + j) as f64);
        let val = interp2d(&field, &rows, &cols, 2.0, 3.0);
        assert!((val - 23.0).abs() < 1e-12, "val = {val}");
    }

    #[test]
    fn test_interp2d_linear_field() {
        let rows = UniformAxis::new(-1.0, 0.5, 9);
        let cols = UniformAxis::new(0.25, 0.5, 7);
        let field = Array2::from_shape_fn((9, 7), |(i, j)| {
            rows.coordinate(i) - 2.0 * cols.coordinate(j)
        });
        let val = interp2d(&field, &rows, &cols, 0.3, 1.6);
        assert!((val - (0.3 - 3.2)).abs() < 1e-12, "val = {val}");
    }

    #[test]
    fn test_interp2d_clamps_outside() {
        let rows = UniformAxis::new(0.0, 1.0, 3);
        let cols = UniformAxis::new(0.0, 1.0, 3);
        let field = Array2::from_shape_fn((3, 3), |(i, j)| (i + j) as f64);
        assert!((interp2d(&field, &rows, &cols, -5.0, -5.0) - 0.0).abs() < 1e-12);
        assert!((interp2d(&field, &rows, &cols, 10.0, 10.0) - 4.0).abs() < 1e-12);
    }
}
