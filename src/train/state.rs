//! Loop position

use std::fmt;

use serde::{Deserialize, Serialize};

/// Orchestrator state
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Initializing,
    CriticPhase,
    GeneratorPhase,
    EpochBoundary,
    Terminated,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Initializing => "initializing",
            Self::CriticPhase => "critic",
            Self::GeneratorPhase => "generator",
            Self::EpochBoundary => "epoch_boundary",
            Self::Terminated => "terminated",
        })
    }
}

/// Counters mutated only by the trainer
///
/// `critic_substep` counts critic updates since the last generator update and
/// carries across epoch boundaries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingState {
    /// Completed epochs
    pub epoch: usize,
    /// Optimizer step attempts (critic and generator)
    pub global_step: u64,
    pub critic_substep: usize,
    pub phase: Phase,
}
