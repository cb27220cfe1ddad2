//! Adversarial training core
//!
//! - [`LossStrategy`]: the objective (standard BCE, WGAN weight clipping, WGAN-GP)
//! - [`critic_step`] / [`generator_step`]: one optimizer update of one network
//! - [`TrainingSession`]: both networks, their optimizers and the RNG, driven
//!   by [`GanTrainer`](crate::train::GanTrainer) through
//!   [`AdversarialSteps`](crate::train::AdversarialSteps)
//! - [`SessionCheckpoint`]: a serializable snapshot of a session

mod checkpoint;
pub mod loss;
mod session;
mod step;


pub use checkpoint::SessionCheckpoint;
pub use loss::{gradient_penalty, LossStrategy, LossVariant};
pub use session::TrainingSession;
pub use step::{critic_step, generator_step, StepError, StepKind, TrainableNetwork};
