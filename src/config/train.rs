//! Single-call training from a resolved configuration

use std::path::{Path, PathBuf};

use rand::Rng;
use tracing::info;

use super::loader::load_config;
use super::schema::ExperimentConfig;
use super::validate::validate_config;
use crate::data::{build_data_source, DataSource};
use crate::error::Result;
use crate::generative::{SessionCheckpoint, TrainingSession};
use crate::train::{
    CancellationToken, CheckpointCallback, GanTrainer, MetricsCallback, ProgressCallback, TrainingLimits,
    TrainingSummary,
};

/// Caller-side options that are not part of the experiment file
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Session checkpoint to continue from
    pub resume: Option<PathBuf>,
    /// Token the caller can use to stop the run
    pub cancellation: Option<CancellationToken>,
}

/// A finished run: the summary and the trained session
#[derive(Debug)]
pub struct TrainingOutcome {
    pub summary: TrainingSummary,
    pub session: TrainingSession,
    /// Seed actually used (drawn from the OS when the config has none)
    pub seed: u64,
}

/// Train from a YAML experiment file
///
/// # Example
///
/// ```no_run
/// use gan_train::config::train_from_yaml;
///
/// let outcome = train_from_yaml("configs/wgan_gp.yaml")?;
/// println!("{} epochs", outcome.summary.epochs_completed);
/// # Ok::<(), gan_train::Error>(())
/// ```
pub fn train_from_yaml<P: AsRef<Path>>(config_path: P) -> Result<TrainingOutcome> {
    let config = load_config(config_path)?;
    train_from_config(&config, &RunOptions::default())
}

/// Build data, networks and trainer from `config` and run to completion.
///
/// Configuration errors are reported before anything is built.
pub fn train_from_config(config: &ExperimentConfig, options: &RunOptions) -> Result<TrainingOutcome> {
    validate_config(config)?;
    let training = &config.training;
    let seed = training.seed.unwrap_or_else(|| rand::rng().random());

    let mut data = build_data_source(&config.data, training.batch_size, seed)?;
    let mut session = TrainingSession::new(&config.model, data.sample_dim(), seed)?;
    info!(
        model = %config.model.model_name,
        loss = %session.strategy().variant(),
        samples = data.len(),
        batch_size = training.batch_size,
        seed,
        "Prepared training session"
    );

    let mut trainer = GanTrainer::new(TrainingLimits::from_params(training), training.on_non_finite);
    if let Some(path) = &options.resume {
        let checkpoint = SessionCheckpoint::load(path)?;
        let state = session.restore(&checkpoint)?;
        trainer = trainer.with_state(state);
    }
    if let Some(token) = &options.cancellation {
        trainer = trainer.with_cancellation(token.clone());
    }

    trainer.add_callback(ProgressCallback::default());
    if training.checkpoints {
        trainer.add_callback(CheckpointCallback::new(&training.output_dir).save_every(training.save_interval));
    }
    if training.metrics {
        trainer.add_callback(MetricsCallback::new(training.output_dir.join("metrics.jsonl")));
    }

    let summary = trainer.run(&mut session, &mut data)?;
    Ok(TrainingOutcome { summary, session, seed })
}
