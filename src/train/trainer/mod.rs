//! The GAN trainer

mod core;
mod result;
mod train_loop;

pub use core::GanTrainer;
pub use result::{EpochReport, TrainingSummary};
