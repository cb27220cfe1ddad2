//! Periodic session checkpoints

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::traits::{CallbackError, EpochCallback, EpochContext};
use crate::generative::SessionCheckpoint;
use crate::train::TrainingSummary;

/// Writes `checkpoint_epoch_{N}.json` every `save_every` epochs and
/// `checkpoint_final.json` when training ends
#[derive(Clone, Debug)]
pub struct CheckpointCallback {
    checkpoint_dir: PathBuf,
    save_every: usize,
    pub(crate) last_saved_epoch: Option<usize>,
}

impl CheckpointCallback {
    pub fn new(checkpoint_dir: impl Into<PathBuf>) -> Self {
        Self { checkpoint_dir: checkpoint_dir.into(), save_every: 1, last_saved_epoch: None }
    }

    /// Save every `epochs` epochs (0 keeps only the final checkpoint)
    pub fn save_every(mut self, epochs: usize) -> Self {
        self.save_every = epochs;
        self
    }

    /// Path for the checkpoint of zero-based `epoch`
    pub fn checkpoint_path(&self, epoch: usize) -> PathBuf {
        self.checkpoint_dir.join(format!("checkpoint_epoch_{epoch}.json"))
    }

    pub fn final_checkpoint_path(&self) -> PathBuf {
        self.checkpoint_dir.join("checkpoint_final.json")
    }

    fn write(path: &Path, checkpoint: &SessionCheckpoint) -> Result<(), CallbackError> {
        checkpoint.save(path)?;
        info!(path = %path.display(), global_step = checkpoint.state.global_step, "Saved checkpoint");
        Ok(())
    }
}

impl EpochCallback for CheckpointCallback {
    fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<(), CallbackError> {
        let epoch = ctx.report.epoch;
        if self.save_every == 0 || (epoch + 1) % self.save_every != 0 {
            return Ok(());
        }
        let Some(checkpoint) = ctx.checkpoint else {
            debug!(epoch, "No snapshot available; skipping checkpoint");
            return Ok(());
        };
        Self::write(&self.checkpoint_path(epoch), checkpoint)?;
        self.last_saved_epoch = Some(epoch);
        Ok(())
    }

    fn on_train_end(
        &mut self,
        _summary: &TrainingSummary,
        checkpoint: Option<&SessionCheckpoint>,
    ) -> Result<(), CallbackError> {
        match checkpoint {
            Some(checkpoint) => Self::write(&self.final_checkpoint_path(), checkpoint),
            None => Ok(()),
        }
    }

    fn needs_checkpoint(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "CheckpointCallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkpoint_paths() {
        let cb = CheckpointCallback::new("/tmp/checkpoints");
        assert_eq!(cb.checkpoint_path(5), PathBuf::from("/tmp/checkpoints/checkpoint_epoch_5.json"));
        assert_eq!(cb.final_checkpoint_path(), PathBuf::from("/tmp/checkpoints/checkpoint_final.json"));
    }
}
