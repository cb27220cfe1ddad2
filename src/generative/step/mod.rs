//! Single-network update steps
//!
//! A step computes one loss, differentiates it with respect to exactly one
//! network's parameters and applies that network's optimizer. Non-finite
//! losses or gradients reject the step before anything is written.

mod critic;
mod error;
mod generator;

pub use critic::critic_step;
pub use error::{StepError, StepKind};
pub use generator::generator_step;

use ndarray::Array2;

use crate::autograd::Tensor;
use crate::nn::Network;
use crate::optim::OptimizerState;

/// A network paired with the optimizer that owns its parameters
pub struct TrainableNetwork {
    pub network: Box<dyn Network>,
    pub optimizer: OptimizerState,
}

impl TrainableNetwork {
    pub fn new(network: Box<dyn Network>, optimizer: OptimizerState) -> Self {
        Self { network, optimizer }
    }

    pub fn parameters(&self) -> Vec<Tensor> {
        self.network.trainable_parameters()
    }

    /// Copy of every parameter value, in parameter order
    pub fn weights(&self) -> Vec<Array2<f32>> {
        self.parameters().iter().map(Tensor::to_array).collect()
    }

    /// Check that `weights` matches this network's parameter count and shapes
    pub fn check_weights(&self, weights: &[Array2<f32>]) -> Result<(), String> {
        let params = self.parameters();
        if params.len() != weights.len() {
            return Err(format!(
                "{} has {} parameters, checkpoint has {}",
                self.network.name(),
                params.len(),
                weights.len()
            ));
        }
        for (i, (p, w)) in params.iter().zip(weights).enumerate() {
            if p.shape() != w.dim() {
                return Err(format!(
                    "{} parameter {i} has shape {:?}, checkpoint has {:?}",
                    self.network.name(),
                    p.shape(),
                    w.dim()
                ));
            }
        }
        Ok(())
    }

    /// Overwrite parameter values; nothing is written if [`check_weights`](Self::check_weights) fails
    pub fn load_weights(&self, weights: &[Array2<f32>]) -> Result<(), String> {
        self.check_weights(weights)?;
        for (p, w) in self.parameters().iter().zip(weights) {
            p.data_mut().assign(w);
        }
        Ok(())
    }
}

impl std::fmt::Debug for TrainableNetwork {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrainableNetwork")
            .field("network", &self.network.name())
            .field("parameters", &self.network.parameter_count())
            .field("optimizer", &self.optimizer.kind())
            .finish()
    }
}

/// Gradients of `loss` with respect to `params`, or an error if anything is non-finite
pub(crate) fn checked_gradients(
    loss: &Tensor,
    params: &[Tensor],
    phase: StepKind,
) -> Result<Vec<Array2<f32>>, StepError> {
    let value = loss.item();
    if !value.is_finite() {
        return Err(StepError::NonFiniteLoss { phase, value });
    }
    let grads: Vec<Array2<f32>> =
        crate::autograd::grad(loss, params, false).iter().map(Tensor::to_array).collect();
    if !crate::optim::all_finite(&grads) {
        return Err(StepError::NonFiniteGradient { phase });
    }
    Ok(grads)
}
