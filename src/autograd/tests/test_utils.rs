//! Test utilities for gradient checking

use ndarray::Array2;

/// Finite difference gradient checker
///
/// Computes numerical gradient using central difference:
/// f'(x) ≈ (f(x + h) - f(x - h)) / (2h)
pub fn finite_difference<F>(f: F, x: &Array2<f32>, epsilon: f32) -> Array2<f32>
where
    F: Fn(&Array2<f32>) -> f32,
{
    let mut grad = Array2::zeros(x.dim());
    let mut probe = x.clone();

    for (idx, &value) in x.indexed_iter() {
        probe[idx] = value + epsilon;
        let f_plus = f(&probe);
        probe[idx] = value - epsilon;
        let f_minus = f(&probe);
        probe[idx] = value;

        grad[idx] = (f_plus - f_minus) / (2.0 * epsilon);
    }

    grad
}

/// Largest absolute element-wise difference
pub fn max_abs_diff(a: &Array2<f32>, b: &Array2<f32>) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| (x - y).abs()).fold(0.0, f32::max)
}
