//! Adversarial training for generative models
//!
//! `gan-train` trains a generator against a critic under one of three loss
//! regimes:
//!
//! - **DCGAN**: logistic (binary cross-entropy) loss, one critic step per
//!   generator step.
//! - **WGAN**: Wasserstein loss with critic weights clipped to
//!   `[-clip_value, clip_value]` after every critic update.
//! - **WGAN-GP**: Wasserstein loss plus a gradient penalty on samples
//!   interpolated between real and fake data, with an optional drift term.
//!
//! Experiments are described in YAML (see [`config`]) and run through
//! [`config::train_from_config`], or assembled by hand from a
//! [`generative::TrainingSession`] and a [`train::GanTrainer`].

pub mod autograd;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod generative;
pub mod nn;
pub mod optim;
pub mod train;

pub use error::{Error, Result};
