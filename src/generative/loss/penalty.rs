//! WGAN-GP gradient penalty
//!
//! penalty = mean_i (‖∇ₓ critic(x̂_i)‖₂ - 1)², x̂ = ε·real + (1 - ε)·fake
//!
//! The input gradient is taken with `create_graph`, so the penalty is itself
//! a differentiable function of the critic weights.

use ndarray::{Array2, Zip};
use rand::Rng;

use crate::autograd::{add_scalar, grad, mean, sqrt, square, sum, sum_rows, Tensor};
use crate::nn::Network;

/// Added under the square root so the norm is differentiable at zero gradient
pub const GRAD_NORM_EPSILON: f32 = 1e-8;

/// Per-sample mix `ε·real + (1 - ε)·fake`, `epsilon` is `[N, 1]`
///
/// # Panics
///
/// Panics if `real` and `fake` differ in shape or `epsilon` is not `[N, 1]`.
pub fn interpolate(real: &Array2<f32>, fake: &Array2<f32>, epsilon: &Array2<f32>) -> Array2<f32> {
    assert_eq!(real.dim(), fake.dim(), "real and fake batches must have the same shape");
    assert_eq!(epsilon.dim(), (real.nrows(), 1), "epsilon must be [N, 1]");
    let eps = epsilon.broadcast(real.dim()).expect("[N, 1] broadcasts to [N, D]");
    Zip::from(real)
        .and(fake)
        .and(&eps)
        .map_collect(|&r, &f, &e| e * r + (1.0 - e) * f)
}

/// Draw ε ~ U(0, 1) per sample and evaluate the penalty at the mix
pub fn gradient_penalty<R: Rng>(critic: &dyn Network, real: &Tensor, fake: &Tensor, rng: &mut R) -> Tensor {
    let rows = real.rows();
    let epsilon = Array2::from_shape_simple_fn((rows, 1), || rng.random::<f32>());
    let x_hat = interpolate(&real.data(), &fake.data(), &epsilon);
    gradient_penalty_at(critic, x_hat)
}

/// Penalty at fixed interpolated points
pub fn gradient_penalty_at(critic: &dyn Network, x_hat: Array2<f32>) -> Tensor {
    let x_hat = Tensor::new(x_hat, true);
    let scores = critic.forward(&x_hat);

    // Rows are scored independently, so ∂Σscores/∂x̂ holds each sample's own gradient
    let input_grad = grad(&sum(&scores), &[x_hat], true).remove(0);

    let norms = sqrt(&add_scalar(&sum_rows(&square(&input_grad)), GRAD_NORM_EPSILON));
    mean(&square(&add_scalar(&norms, -1.0)))
}
