//! Critic (discriminator) update

use rand::Rng;
use tracing::trace;

use super::{checked_gradients, StepError, StepKind, TrainableNetwork};
use crate::autograd::{GradModeGuard, Tensor};
use crate::generative::loss::LossStrategy;
use crate::optim::Optimizer;

/// One critic update on a real batch and an already generated fake batch.
///
/// `fake` must not carry a graph back into the generator. Returns the critic
/// loss, including any penalty and drift terms.
pub fn critic_step<R: Rng>(
    critic: &mut TrainableNetwork,
    strategy: &LossStrategy,
    real: &Tensor,
    fake: &Tensor,
    rng: &mut R,
) -> Result<f32, StepError> {
    let _mode = GradModeGuard::set(true);
    let params = critic.parameters();

    let loss = strategy.critic_objective(critic.network.as_ref(), real, fake, rng);
    let grads = checked_gradients(&loss, &params, StepKind::Critic)?;

    critic.optimizer.step(&params, &grads);
    strategy.after_critic_update(&params);

    let value = loss.item();
    trace!(loss = value, step = critic.optimizer.step_count(), "critic step");
    Ok(value)
}
