//! Wasserstein critic objectives on unbounded scores

use crate::autograd::{mean, neg, square, sub, Tensor};

/// mean(fake) - mean(real)
pub fn critic_loss(real_scores: &Tensor, fake_scores: &Tensor) -> Tensor {
    sub(&mean(fake_scores), &mean(real_scores))
}

/// -mean(fake)
pub fn generator_loss(fake_scores: &Tensor) -> Tensor {
    neg(&mean(fake_scores))
}

/// mean(real²), keeps critic outputs from drifting away from zero
pub fn drift(real_scores: &Tensor) -> Tensor {
    mean(&square(real_scores))
}
