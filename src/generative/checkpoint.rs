//! Serializable session snapshots

use std::fs;
use std::io;
use std::path::Path;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::loss::LossVariant;
use crate::error::Result;
use crate::optim::OptimizerState;
use crate::train::TrainingState;

/// Everything needed to continue a session: weights, optimizer moments and loop position
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionCheckpoint {
    pub loss_variant: LossVariant,
    pub generator: Vec<Array2<f32>>,
    pub critic: Vec<Array2<f32>>,
    pub generator_optimizer: OptimizerState,
    pub critic_optimizer: OptimizerState,
    pub state: TrainingState,
    /// Seed the session was built with
    pub seed: u64,
}

impl SessionCheckpoint {
    /// Write as JSON, creating parent directories as needed
    pub fn save<P: AsRef<Path>>(&self, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string(self)?)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }
}
