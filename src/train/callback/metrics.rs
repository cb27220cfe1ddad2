//! Per-epoch metrics log

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use super::traits::{CallbackError, EpochCallback, EpochContext};

/// Appends one JSON object per epoch to a `.jsonl` file
#[derive(Clone, Debug)]
pub struct MetricsCallback {
    path: PathBuf,
}

impl MetricsCallback {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl EpochCallback for MetricsCallback {
    fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<(), CallbackError> {
        let line = serde_json::to_string(ctx.report)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut file = OpenOptions::new().create(true).append(true).open(&self.path)?;
        writeln!(file, "{line}")?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "MetricsCallback"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::train::{EpochReport, TrainingState};

    #[test]
    fn test_appends_one_line_per_epoch() {
        let dir = tempfile::tempdir().unwrap();
        let mut cb = MetricsCallback::new(dir.path().join("run").join("metrics.jsonl"));
        let state = TrainingState::default();

        for epoch in 0..3 {
            let report = EpochReport {
                epoch,
                critic_loss: Some(-0.5),
                generator_loss: Some(0.25),
                critic_steps: 5,
                generator_steps: 1,
                global_step: 6 * (epoch as u64 + 1),
            };
            let ctx = EpochContext { report: &report, max_epochs: 3, state: &state, checkpoint: None };
            cb.on_epoch_end(&ctx).unwrap();
        }

        let text = fs::read_to_string(cb.path()).unwrap();
        let reports: Vec<EpochReport> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports[2].epoch, 2);
        assert_eq!(reports[2].global_step, 18);
    }

    #[test]
    fn test_unwritable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be
        let mut cb = MetricsCallback::new(dir.path());
        let report = EpochReport {
            epoch: 0,
            critic_loss: None,
            generator_loss: None,
            critic_steps: 0,
            generator_steps: 0,
            global_step: 0,
        };
        let state = TrainingState::default();
        let ctx = EpochContext { report: &report, max_epochs: 1, state: &state, checkpoint: None };
        assert!(matches!(cb.on_epoch_end(&ctx), Err(CallbackError::Io(_))));
    }
}
