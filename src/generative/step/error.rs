//! Per-step failures

use std::fmt;

use serde::{Deserialize, Serialize};

/// Which update produced a failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    Critic,
    Generator,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Critic => "critic",
            Self::Generator => "generator",
        })
    }
}

/// A step that was rejected before any parameter changed
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StepError {
    #[error("{phase} loss is not finite ({value})")]
    NonFiniteLoss { phase: StepKind, value: f32 },

    #[error("{phase} gradients are not finite")]
    NonFiniteGradient { phase: StepKind },
}

impl StepError {
    pub fn phase(&self) -> StepKind {
        match self {
            Self::NonFiniteLoss { phase, .. } | Self::NonFiniteGradient { phase } => *phase,
        }
    }
}
