//! Sort permutations over radial coordinates.

/// Fill `order` with the permutation sorting `values` ascending.
///
/// The sort is stable and uses `f64::total_cmp`, so equal radii keep
/// creation order and the result is reproducible bit for bit.
pub fn argsort_into(values: &[f64], order: &mut Vec<usize>) {
    order.clear();
    order.extend(0..values.len());
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));
}

pub fn argsort(values: &[f64]) -> Vec<usize> {
    let mut order = Vec::with_capacity(values.len());
    argsort_into(values, &mut order);
    order
}
