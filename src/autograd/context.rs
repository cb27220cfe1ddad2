//! Gradient-recording mode
//!
//! Recording is on by default. Inside a [`NoGradGuard`] (or [`no_grad`])
//! ops produce plain tensors without a backward op, which is how inference
//! passes (the generator while the critic trains) avoid building a graph.

use std::cell::Cell;

thread_local! {
    static GRAD_ENABLED: Cell<bool> = const { Cell::new(true) };
}

/// Whether ops currently record a backward graph
pub fn is_grad_enabled() -> bool {
    GRAD_ENABLED.with(Cell::get)
}

/// RAII guard that disables graph recording until dropped
pub struct NoGradGuard {
    previous: bool,
}

impl NoGradGuard {
    /// Disable recording for the lifetime of the guard
    pub fn new() -> Self {
        Self {
            previous: GRAD_ENABLED.with(|enabled| enabled.replace(false)),
        }
    }
}

impl Default for NoGradGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for NoGradGuard {
    fn drop(&mut self) {
        GRAD_ENABLED.with(|enabled| enabled.set(self.previous));
    }
}

/// Run `f` with graph recording disabled
pub fn no_grad<T>(f: impl FnOnce() -> T) -> T {
    let _guard = NoGradGuard::new();
    f()
}

/// Guard forcing the recording mode to a given value (used by the engine)
pub(crate) struct GradModeGuard {
    previous: bool,
}

impl GradModeGuard {
    pub(crate) fn set(enabled: bool) -> Self {
        Self {
            previous: GRAD_ENABLED.with(|cell| cell.replace(enabled)),
        }
    }
}

impl Drop for GradModeGuard {
    fn drop(&mut self) {
        GRAD_ENABLED.with(|cell| cell.set(self.previous));
    }
}
