//! Epoch-boundary hooks
//!
//! Callbacks receive each epoch's [`EpochReport`](crate::train::EpochReport)
//! and, if they ask for one, a [`SessionCheckpoint`](crate::generative::SessionCheckpoint).
//! A failing callback is logged and skipped; it never stops training.
//!
//! ```rust
//! use gan_train::train::{CallbackError, EpochCallback, EpochContext};
//!
//! struct PrintCallback;
//!
//! impl EpochCallback for PrintCallback {
//!     fn on_epoch_end(&mut self, ctx: &EpochContext<'_>) -> Result<(), CallbackError> {
//!         println!("epoch {} critic {:?}", ctx.report.epoch, ctx.report.critic_loss);
//!         Ok(())
//!     }
//!
//!     fn name(&self) -> &'static str {
//!         "PrintCallback"
//!     }
//! }
//! ```

mod checkpoint;
mod manager;
mod metrics;
mod progress;
mod traits;

pub use checkpoint::CheckpointCallback;
pub use manager::CallbackManager;
pub use metrics::MetricsCallback;
pub use progress::ProgressCallback;
pub use traits::{CallbackError, EpochCallback, EpochContext};
