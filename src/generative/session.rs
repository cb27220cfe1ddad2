//! A configured generator/critic pair and its training state

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use super::checkpoint::SessionCheckpoint;
use super::loss::LossStrategy;
use super::step::{critic_step, generator_step, StepError, TrainableNetwork};
use crate::autograd::{no_grad, Tensor};
use crate::config::{validate_model, ModelConfig, ValidationError};
use crate::data::Batch;
use crate::nn::{latent_noise, Mlp, Network};
use crate::optim::OptimizerState;
use crate::train::{AdversarialSteps, TrainingState};

/// Owns both networks, their optimizers, the loss strategy and the RNG.
///
/// The loss strategy is fixed at construction. Restoring a checkpoint taken
/// under a different strategy is rejected.
#[derive(Debug)]
pub struct TrainingSession {
    generator: TrainableNetwork,
    critic: TrainableNetwork,
    strategy: LossStrategy,
    latent_dim: usize,
    n_critic: usize,
    seed: u64,
    rng: StdRng,
}

impl TrainingSession {
    /// Validate `model` and build MLP networks for `sample_dim`-wide samples
    pub fn new(model: &ModelConfig, sample_dim: usize, seed: u64) -> Result<Self, ValidationError> {
        validate_model(model)?;
        if sample_dim == 0 {
            return Err(ValidationError::InvalidData("samples have no features".into()));
        }
        let strategy = LossStrategy::from_config(model)?;

        let mut rng = StdRng::seed_from_u64(seed);
        let generator = Mlp::generator(&model.generator, model.latent_dim, sample_dim, &mut rng);
        let critic = Mlp::discriminator(&model.discriminator, sample_dim, &mut rng);
        info!(
            generator_params = generator.parameter_count(),
            critic_params = critic.parameter_count(),
            n_critic = model.effective_n_critic(),
            "Built networks"
        );

        Ok(Self::with_networks(
            TrainableNetwork::new(Box::new(generator), OptimizerState::from_spec(&model.generator.optimizer)),
            TrainableNetwork::new(Box::new(critic), OptimizerState::from_spec(&model.discriminator.optimizer)),
            strategy,
            model.latent_dim,
            model.effective_n_critic(),
            seed,
        ))
    }

    /// Assemble a session from prebuilt parts
    pub fn with_networks(
        generator: TrainableNetwork,
        critic: TrainableNetwork,
        strategy: LossStrategy,
        latent_dim: usize,
        n_critic: usize,
        seed: u64,
    ) -> Self {
        Self {
            generator,
            critic,
            strategy,
            latent_dim,
            n_critic: n_critic.max(1),
            seed,
            rng: noise_rng(seed, 0),
        }
    }

    pub fn generator(&self) -> &TrainableNetwork {
        &self.generator
    }

    pub fn critic(&self) -> &TrainableNetwork {
        &self.critic
    }

    pub fn strategy(&self) -> &LossStrategy {
        &self.strategy
    }

    pub fn latent_dim(&self) -> usize {
        self.latent_dim
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate `n` samples without recording a graph
    pub fn sample(&mut self, n: usize) -> Array2<f32> {
        let noise = Tensor::new(latent_noise(&mut self.rng, n, self.latent_dim), false);
        no_grad(|| self.generator.network.forward(&noise)).to_array()
    }

    /// One critic update against fakes generated from fresh noise.
    ///
    /// The noise batch has as many rows as `real`.
    pub fn critic_update(&mut self, real: Array2<f32>) -> Result<f32, StepError> {
        let batch = Batch::with_noise(real, self.latent_dim, &mut self.rng);
        let fake = no_grad(|| self.generator.network.forward(&batch.noise));
        critic_step(&mut self.critic, &self.strategy, &batch.real, &fake, &mut self.rng)
    }

    /// One generator update on `batch_size` fresh noise rows
    pub fn generator_update(&mut self, batch_size: usize) -> Result<f32, StepError> {
        let noise = Tensor::new(latent_noise(&mut self.rng, batch_size, self.latent_dim), false);
        generator_step(&mut self.generator, self.critic.network.as_ref(), &self.strategy, &noise)
    }

    pub fn checkpoint(&self, state: &TrainingState) -> SessionCheckpoint {
        SessionCheckpoint {
            loss_variant: self.strategy.variant(),
            generator: self.generator.weights(),
            critic: self.critic.weights(),
            generator_optimizer: self.generator.optimizer.clone(),
            critic_optimizer: self.critic.optimizer.clone(),
            state: state.clone(),
            seed: self.seed,
        }
    }

    /// Load weights and optimizer state from `checkpoint`, returning its loop position.
    ///
    /// Nothing is modified unless every check passes. The RNG stream is not
    /// part of a checkpoint; it is reseeded from the seed and the step count.
    pub fn restore(&mut self, checkpoint: &SessionCheckpoint) -> Result<TrainingState, ValidationError> {
        let expected = self.strategy.variant();
        if checkpoint.loss_variant != expected {
            return Err(ValidationError::LossVariantMismatch {
                expected: expected.to_string(),
                found: checkpoint.loss_variant.to_string(),
            });
        }
        let incompatible = ValidationError::IncompatibleCheckpoint;
        self.generator.check_weights(&checkpoint.generator).map_err(incompatible)?;
        self.critic.check_weights(&checkpoint.critic).map_err(incompatible)?;
        for (role, current, saved) in [
            ("generator", &self.generator.optimizer, &checkpoint.generator_optimizer),
            ("critic", &self.critic.optimizer, &checkpoint.critic_optimizer),
        ] {
            if current.kind() != saved.kind() {
                return Err(incompatible(format!(
                    "{role} optimizer is {}, checkpoint has {}",
                    current.kind(),
                    saved.kind()
                )));
            }
        }

        self.generator.load_weights(&checkpoint.generator).map_err(incompatible)?;
        self.critic.load_weights(&checkpoint.critic).map_err(incompatible)?;
        self.generator.optimizer = checkpoint.generator_optimizer.clone();
        self.critic.optimizer = checkpoint.critic_optimizer.clone();
        self.seed = checkpoint.seed;
        self.rng = noise_rng(checkpoint.seed, checkpoint.state.global_step);

        info!(
            epoch = checkpoint.state.epoch,
            global_step = checkpoint.state.global_step,
            loss = %expected,
            "Restored session checkpoint"
        );
        Ok(checkpoint.state.clone())
    }
}

/// Noise stream for a session at `global_step`; step 0 is a fresh session
fn noise_rng(seed: u64, global_step: u64) -> StdRng {
    StdRng::seed_from_u64(seed.wrapping_add(0x5eed) ^ global_step.rotate_left(32))
}

impl AdversarialSteps for TrainingSession {
    fn n_critic(&self) -> usize {
        self.n_critic
    }

    fn critic_step(&mut self, real: Array2<f32>) -> Result<f32, StepError> {
        self.critic_update(real)
    }

    fn generator_step(&mut self, batch_size: usize) -> Result<f32, StepError> {
        self.generator_update(batch_size)
    }

    fn snapshot(&self, state: &TrainingState) -> Option<SessionCheckpoint> {
        Some(self.checkpoint(state))
    }
}
