//! Callback trait and context

use crate::generative::SessionCheckpoint;
use crate::train::{EpochReport, TrainingState, TrainingSummary};

/// Failure inside a callback's own I/O
#[derive(Debug, thiserror::Error)]
pub enum CallbackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// State passed to [`EpochCallback::on_epoch_end`]
#[derive(Debug, Clone, Copy)]
pub struct EpochContext<'a> {
    pub report: &'a EpochReport,
    pub max_epochs: usize,
    /// Position after the epoch: `epoch` already counts this one
    pub state: &'a TrainingState,
    /// Present when some callback asked for one and the steps support snapshots
    pub checkpoint: Option<&'a SessionCheckpoint>,
}

/// Hook into the training run
///
/// Only `on_epoch_end` and `name` are required.
pub trait EpochCallback: Send {
    fn on_train_begin(&mut self, _state: &TrainingState) -> Result<(), CallbackError> {
        Ok(())
    }

    fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<(), CallbackError>;

    /// `checkpoint` is the final session snapshot, when available
    fn on_train_end(
        &mut self,
        _summary: &TrainingSummary,
        _checkpoint: Option<&SessionCheckpoint>,
    ) -> Result<(), CallbackError> {
        Ok(())
    }

    /// Whether this callback wants session snapshots
    fn needs_checkpoint(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str;
}
