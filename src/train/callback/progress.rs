//! Progress logging

use tracing::info;

use super::traits::{CallbackError, EpochCallback, EpochContext};
use crate::generative::SessionCheckpoint;
use crate::train::TrainingSummary;

/// Logs a progress line every `log_interval` epochs
#[derive(Clone, Debug)]
pub struct ProgressCallback {
    log_interval: usize,
}

impl ProgressCallback {
    pub fn new(log_interval: usize) -> Self {
        Self { log_interval: log_interval.max(1) }
    }
}

impl Default for ProgressCallback {
    fn default() -> Self {
        Self { log_interval: 1 }
    }
}

fn fmt_loss(loss: Option<f32>) -> String {
    loss.map_or_else(|| "-".to_string(), |l| format!("{l:.4}"))
}

impl EpochCallback for ProgressCallback {
    fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<(), CallbackError> {
        let epoch = ctx.report.epoch + 1;
        if epoch % self.log_interval == 0 || epoch == ctx.max_epochs {
            info!(
                "Epoch {}/{}: critic_loss: {}, generator_loss: {} (step {})",
                epoch,
                ctx.max_epochs,
                fmt_loss(ctx.report.critic_loss),
                fmt_loss(ctx.report.generator_loss),
                ctx.report.global_step
            );
        }
        Ok(())
    }

    fn on_train_end(
        &mut self,
        summary: &TrainingSummary,
        _checkpoint: Option<&SessionCheckpoint>,
    ) -> Result<(), CallbackError> {
        info!(
            "Done after {} epochs, {} steps ({} skipped) in {:.1}s",
            summary.epochs_completed, summary.global_step, summary.skipped_steps, summary.elapsed_secs
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "ProgressCallback"
    }
}
