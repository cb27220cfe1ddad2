//! Networks for the generator and the critic
//!
//! The training core only talks to networks through [`Network`]: a forward
//! pass over a `[batch, features]` tensor and the list of trainable
//! parameters. [`Mlp`] is the stock implementation built from a
//! [`NetworkSpec`](crate::config::NetworkSpec).

mod activation;
mod init;
mod linear;
mod mlp;

pub use activation::Activation;
pub use init::{glorot_normal, latent_noise, standard_normal};
pub use linear::Linear;
pub use mlp::Mlp;

use crate::autograd::Tensor;

/// A differentiable network
pub trait Network {
    /// Forward pass over a `[batch, in_features]` tensor
    fn forward(&self, input: &Tensor) -> Tensor;

    /// Parameters updated by the optimizer, in a stable order
    fn trainable_parameters(&self) -> Vec<Tensor>;

    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Total number of scalar parameters
    fn parameter_count(&self) -> usize {
        self.trainable_parameters().iter().map(Tensor::len).sum()
    }
}
