//! Run limits and failure policy

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::TrainingParams;

/// What to do when a step produces a non-finite loss or gradient
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumericalPolicy {
    /// Log, count the step as skipped and keep going
    #[default]
    Skip,
    /// Stop the run with `Error::NumericalInstability`
    Abort,
}

impl fmt::Display for NumericalPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Skip => "skip",
            Self::Abort => "abort",
        })
    }
}

/// When a run stops on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingLimits {
    pub max_epochs: usize,
    /// Cap on `TrainingState::global_step`
    pub max_steps: Option<u64>,
}

impl TrainingLimits {
    pub fn epochs(max_epochs: usize) -> Self {
        Self { max_epochs, max_steps: None }
    }

    pub fn with_max_steps(mut self, max_steps: u64) -> Self {
        self.max_steps = Some(max_steps);
        self
    }

    pub fn from_params(params: &TrainingParams) -> Self {
        Self { max_epochs: params.epochs, max_steps: params.max_steps }
    }
}
