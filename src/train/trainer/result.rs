//! Per-epoch and per-run results

use serde::{Deserialize, Serialize};

/// Metrics for one completed epoch
///
/// Losses are means over the steps that succeeded; `None` when none did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochReport {
    /// Zero-based epoch index
    pub epoch: usize,
    pub critic_loss: Option<f32>,
    pub generator_loss: Option<f32>,
    /// Critic step attempts this epoch
    pub critic_steps: usize,
    /// Generator step attempts this epoch
    pub generator_steps: usize,
    /// Global step at the end of the epoch
    pub global_step: u64,
}

/// Result of [`GanTrainer::run`](super::GanTrainer::run)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub epochs_completed: usize,
    pub global_step: u64,
    /// Critic step attempts during this run
    pub critic_steps: u64,
    /// Generator step attempts during this run
    pub generator_steps: u64,
    /// Steps rejected for non-finite values
    pub skipped_steps: u64,
    pub final_critic_loss: Option<f32>,
    pub final_generator_loss: Option<f32>,
    /// Stopped by the cancellation token
    pub cancelled: bool,
    pub elapsed_secs: f64,
}

/// Running sums for the epoch in progress
#[derive(Debug, Default)]
pub(super) struct EpochAccumulator {
    critic_sum: f64,
    critic_ok: usize,
    generator_sum: f64,
    generator_ok: usize,
    pub(super) critic_steps: usize,
    pub(super) generator_steps: usize,
}

impl EpochAccumulator {
    pub(super) fn critic(&mut self, loss: Option<f32>) {
        self.critic_steps += 1;
        if let Some(loss) = loss {
            self.critic_sum += f64::from(loss);
            self.critic_ok += 1;
        }
    }

    pub(super) fn generator(&mut self, loss: Option<f32>) {
        self.generator_steps += 1;
        if let Some(loss) = loss {
            self.generator_sum += f64::from(loss);
            self.generator_ok += 1;
        }
    }

    /// Close the epoch and start a fresh one
    pub(super) fn finish(&mut self, epoch: usize, global_step: u64) -> EpochReport {
        let mean = |sum: f64, n: usize| (n > 0).then(|| (sum / n as f64) as f32);
        let report = EpochReport {
            epoch,
            critic_loss: mean(self.critic_sum, self.critic_ok),
            generator_loss: mean(self.generator_sum, self.generator_ok),
            critic_steps: self.critic_steps,
            generator_steps: self.generator_steps,
            global_step,
        };
        *self = Self::default();
        report
    }
}
