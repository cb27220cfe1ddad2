//! The seam between the trainer and the networks

use ndarray::Array2;

use super::TrainingState;
use crate::generative::{SessionCheckpoint, StepError};

/// One critic update and one generator update, as seen by the trainer
///
/// The trainer only decides *when* these run. Implementations own the
/// networks, optimizers and noise sampling.
pub trait AdversarialSteps {
    /// Critic updates per generator update (at least 1)
    fn n_critic(&self) -> usize;

    /// Update the critic on one non-empty real batch
    fn critic_step(&mut self, real: Array2<f32>) -> Result<f32, StepError>;

    /// Update the generator on `batch_size` noise rows
    fn generator_step(&mut self, batch_size: usize) -> Result<f32, StepError>;

    /// Snapshot for checkpoint callbacks, if supported
    fn snapshot(&self, _state: &TrainingState) -> Option<SessionCheckpoint> {
        None
    }
}

impl<S: AdversarialSteps + ?Sized> AdversarialSteps for &mut S {
    fn n_critic(&self) -> usize {
        (**self).n_critic()
    }

    fn critic_step(&mut self, real: Array2<f32>) -> Result<f32, StepError> {
        (**self).critic_step(real)
    }

    fn generator_step(&mut self, batch_size: usize) -> Result<f32, StepError> {
        (**self).generator_step(batch_size)
    }

    fn snapshot(&self, state: &TrainingState) -> Option<SessionCheckpoint> {
        (**self).snapshot(state)
    }
}
