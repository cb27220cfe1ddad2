//! Optimizers for training neural networks

mod adam;
mod clip;
mod optimizer;
mod rmsprop;
mod sgd;
mod state;

pub use adam::Adam;
pub use clip::{all_finite, clamp_weights, grad_norm};
pub use optimizer::Optimizer;
pub use rmsprop::RmsProp;
pub use sgd::Sgd;
pub use state::OptimizerState;
