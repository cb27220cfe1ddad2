//! Dispatch to several callbacks

use tracing::warn;

use super::traits::{CallbackError, EpochCallback, EpochContext};
use crate::generative::SessionCheckpoint;
use crate::train::{TrainingState, TrainingSummary};

/// Runs every callback in registration order, logging failures
pub struct CallbackManager {
    callbacks: Vec<Box<dyn EpochCallback>>,
}

impl CallbackManager {
    pub fn new() -> Self {
        Self { callbacks: Vec::new() }
    }

    pub fn add<C: EpochCallback + 'static>(&mut self, callback: C) {
        self.callbacks.push(Box::new(callback));
    }

    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    pub fn needs_checkpoint(&self) -> bool {
        self.callbacks.iter().any(|cb| cb.needs_checkpoint())
    }

    /// Returns the number of callbacks that failed
    pub fn on_train_begin(&mut self, state: &TrainingState) -> usize {
        self.dispatch("on_train_begin", |cb| cb.on_train_begin(state))
    }

    pub fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> usize {
        self.dispatch("on_epoch_end", |cb| cb.on_epoch_end(ctx))
    }

    pub fn on_train_end(&mut self, summary: &TrainingSummary, checkpoint: Option<&SessionCheckpoint>) -> usize {
        self.dispatch("on_train_end", |cb| cb.on_train_end(summary, checkpoint))
    }

    fn dispatch<F>(&mut self, event: &'static str, mut f: F) -> usize
    where
        F: FnMut(&mut dyn EpochCallback) -> Result<(), CallbackError>,
    {
        let mut failures = 0;
        for cb in &mut self.callbacks {
            if let Err(err) = f(cb.as_mut()) {
                failures += 1;
                warn!(callback = cb.name(), event, error = %err, "Callback failed; continuing");
            }
        }
        failures
    }
}

impl Default for CallbackManager {
    fn default() -> Self {
        Self::new()
    }
}
