//! Trainer struct and configuration

use super::result::EpochReport;
use crate::train::callback::{CallbackManager, EpochCallback};
use crate::train::{CancellationToken, NumericalPolicy, Phase, TrainingLimits, TrainingState};

/// Orchestrates critic and generator steps over epochs
///
/// The trainer owns only loop state; networks and optimizers live in the
/// [`AdversarialSteps`](crate::train::AdversarialSteps) implementation passed to
/// [`run`](Self::run).
pub struct GanTrainer {
    pub(crate) limits: TrainingLimits,
    pub(crate) policy: NumericalPolicy,
    pub(crate) cancel: CancellationToken,
    pub(crate) callbacks: CallbackManager,
    pub(crate) state: TrainingState,
    pub(crate) history: Vec<EpochReport>,
}

impl GanTrainer {
    pub fn new(limits: TrainingLimits, policy: NumericalPolicy) -> Self {
        Self {
            limits,
            policy,
            cancel: CancellationToken::new(),
            callbacks: CallbackManager::new(),
            state: TrainingState::default(),
            history: Vec::new(),
        }
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// Continue from a restored position instead of epoch 0
    pub fn with_state(mut self, state: TrainingState) -> Self {
        self.state = state;
        self
    }

    /// Token that stops this trainer at the next phase boundary
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn add_callback<C: EpochCallback + 'static>(&mut self, callback: C) {
        self.callbacks.add(callback);
    }

    pub fn callbacks(&self) -> &CallbackManager {
        &self.callbacks
    }

    pub fn limits(&self) -> TrainingLimits {
        self.limits
    }

    pub fn policy(&self) -> NumericalPolicy {
        self.policy
    }

    pub fn state(&self) -> &TrainingState {
        &self.state
    }

    /// Reports of the epochs completed by this trainer
    pub fn history(&self) -> &[EpochReport] {
        &self.history
    }

    pub fn is_terminated(&self) -> bool {
        self.state.phase == Phase::Terminated
    }
}
