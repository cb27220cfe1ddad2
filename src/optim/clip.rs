//! Weight clamping and gradient diagnostics

use ndarray::Array2;

use crate::autograd::Tensor;

/// Clamp every element of every parameter into `[-clip_value, clip_value]`
///
/// Used by the weight-clipped Wasserstein critic after each update.
pub fn clamp_weights(params: &[Tensor], clip_value: f32) {
    for param in params {
        param.data_mut().mapv_inplace(|w| w.clamp(-clip_value, clip_value));
    }
}

/// Global L2 norm over a set of gradients: sqrt(Σ‖g_i‖²)
pub fn grad_norm(grads: &[Array2<f32>]) -> f32 {
    grads
        .iter()
        .map(|g| g.iter().map(|&x| x * x).sum::<f32>())
        .sum::<f32>()
        .sqrt()
}

/// Whether every gradient element is finite
pub fn all_finite(grads: &[Array2<f32>]) -> bool {
    grads.iter().all(|g| g.iter().all(|x| x.is_finite()))
}
