//! Adversarial training loop
//!
//! [`GanTrainer`] drives any [`AdversarialSteps`] implementation (normally a
//! [`TrainingSession`](crate::generative::TrainingSession)) over a
//! [`DataSource`](crate::data::DataSource) as a small state machine:
//!
//! ```text
//! Initializing -> CriticPhase -(n_critic steps)-> GeneratorPhase -> CriticPhase
//!                      |  data exhausted
//!                      v
//!                EpochBoundary -> CriticPhase | Terminated
//! ```
//!
//! Cancellation and step limits are checked before every critic and
//! generator phase, never inside a step.
//!
//! # Example
//!
//! ```no_run
//! use gan_train::config::ModelConfig;
//! use gan_train::data::{ring_samples, InMemoryDataSource};
//! use gan_train::generative::TrainingSession;
//! use gan_train::train::{GanTrainer, NumericalPolicy, ProgressCallback, TrainingLimits};
//! use rand::SeedableRng;
//!
//! let mut rng = rand::rngs::StdRng::seed_from_u64(0);
//! let samples = ring_samples(&mut rng, 8, 0.8, 0.02, 512);
//! let mut data = InMemoryDataSource::new(samples, 64, 0).unwrap();
//! let mut session = TrainingSession::new(&ModelConfig::dcgan(), 2, 0).unwrap();
//!
//! let mut trainer = GanTrainer::new(TrainingLimits::epochs(5), NumericalPolicy::Skip);
//! trainer.add_callback(ProgressCallback::default());
//! let summary = trainer.run(&mut session, &mut data).unwrap();
//! println!("{} steps", summary.global_step);
//! ```

pub mod callback;
mod cancel;
mod policy;
mod state;
mod steps;
mod trainer;


pub use callback::{
    CallbackError, CallbackManager, CheckpointCallback, EpochCallback, EpochContext, MetricsCallback,
    ProgressCallback,
};
pub use cancel::CancellationToken;
pub use policy::{NumericalPolicy, TrainingLimits};
pub use state::{Phase, TrainingState};
pub use steps::AdversarialSteps;
pub use trainer::{EpochReport, GanTrainer, TrainingSummary};
