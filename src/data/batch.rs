//! One iteration's inputs

use ndarray::Array2;
use rand::Rng;

use crate::autograd::Tensor;
use crate::nn::latent_noise;

/// Real samples paired with freshly drawn latent noise of the same row count
#[derive(Debug, Clone)]
pub struct Batch {
    pub real: Tensor,
    pub noise: Tensor,
}

impl Batch {
    /// Pair `real` with `N(0, 1)` noise of shape `[real.rows, latent_dim]`
    pub fn with_noise<R: Rng>(real: Array2<f32>, latent_dim: usize, rng: &mut R) -> Self {
        let rows = real.nrows();
        Self {
            real: Tensor::new(real, false),
            noise: Tensor::new(latent_noise(rng, rows, latent_dim), false),
        }
    }

    pub fn len(&self) -> usize {
        self.real.rows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
