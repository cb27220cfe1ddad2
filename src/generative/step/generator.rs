//! Generator update

use tracing::trace;

use super::{checked_gradients, StepError, StepKind, TrainableNetwork};
use crate::autograd::{GradModeGuard, Tensor};
use crate::generative::loss::LossStrategy;
use crate::nn::Network;
use crate::optim::Optimizer;

/// One generator update through a fixed critic.
///
/// Gradients flow through the critic's forward pass but only the generator's
/// parameters are differentiated and stepped.
pub fn generator_step(
    generator: &mut TrainableNetwork,
    critic: &dyn Network,
    strategy: &LossStrategy,
    noise: &Tensor,
) -> Result<f32, StepError> {
    let _mode = GradModeGuard::set(true);
    let params = generator.parameters();

    let fake = generator.network.forward(noise);
    let loss = strategy.generator_loss(&critic.forward(&fake));
    let grads = checked_gradients(&loss, &params, StepKind::Generator)?;

    generator.optimizer.step(&params, &grads);

    let value = loss.item();
    trace!(loss = value, step = generator.optimizer.step_count(), "generator step");
    Ok(value)
}
