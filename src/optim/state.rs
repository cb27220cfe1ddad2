//! Per-network optimizer state

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use super::{Adam, Optimizer, RmsProp, Sgd};
use crate::autograd::Tensor;
use crate::config::{OptimizerKind, OptimizerSpec};

/// The optimizer owned by one network.
///
/// Holds hyperparameters, step count and moment buffers. Serializable so a
/// session checkpoint carries it, and comparable so a resumed or cancelled run
/// can be checked for bit-identical state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum OptimizerState {
    Adam(Adam),
    #[serde(rename = "rmsprop")]
    RmsProp(RmsProp),
    Sgd(Sgd),
}

impl OptimizerState {
    /// Fresh optimizer from a configured spec. SGD takes its momentum from `beta_1`.
    pub fn from_spec(spec: &OptimizerSpec) -> Self {
        match spec.name {
            OptimizerKind::Adam => {
                Self::Adam(Adam::new(spec.learning_rate, spec.beta_1, spec.beta_2, spec.epsilon))
            }
            OptimizerKind::Rmsprop => {
                Self::RmsProp(RmsProp::new(spec.learning_rate, spec.rho, spec.epsilon))
            }
            OptimizerKind::Sgd => Self::Sgd(Sgd::new(spec.learning_rate, spec.beta_1)),
        }
    }

    pub fn kind(&self) -> OptimizerKind {
        match self {
            Self::Adam(_) => OptimizerKind::Adam,
            Self::RmsProp(_) => OptimizerKind::Rmsprop,
            Self::Sgd(_) => OptimizerKind::Sgd,
        }
    }

    fn inner(&self) -> &dyn Optimizer {
        match self {
            Self::Adam(opt) => opt,
            Self::RmsProp(opt) => opt,
            Self::Sgd(opt) => opt,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Optimizer {
        match self {
            Self::Adam(opt) => opt,
            Self::RmsProp(opt) => opt,
            Self::Sgd(opt) => opt,
        }
    }
}

impl Optimizer for OptimizerState {
    fn step(&mut self, params: &[Tensor], grads: &[Array2<f32>]) {
        self.inner_mut().step(params, grads);
    }

    fn lr(&self) -> f32 {
        self.inner().lr()
    }

    fn set_lr(&mut self, lr: f32) {
        self.inner_mut().set_lr(lr);
    }

    fn step_count(&self) -> u64 {
        self.inner().step_count()
    }
}
