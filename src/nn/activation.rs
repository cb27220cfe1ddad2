//! Activation functions selectable from configuration

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::autograd::{leaky_relu, relu, sigmoid, tanh, Tensor};

/// Slope of the negative half of [`Activation::LeakyRelu`]
pub const LEAKY_RELU_ALPHA: f32 = 0.2;

/// Element-wise activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    /// Identity
    Linear,
    Relu,
    /// Leaky ReLU with slope 0.2
    #[default]
    LeakyRelu,
    Tanh,
    Sigmoid,
}

impl Activation {
    /// Apply to a tensor
    pub fn apply(self, x: &Tensor) -> Tensor {
        match self {
            Self::Linear => x.clone(),
            Self::Relu => relu(x),
            Self::LeakyRelu => leaky_relu(x, LEAKY_RELU_ALPHA),
            Self::Tanh => tanh(x),
            Self::Sigmoid => sigmoid(x),
        }
    }
}

impl fmt::Display for Activation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Linear => "linear",
            Self::Relu => "relu",
            Self::LeakyRelu => "leaky_relu",
            Self::Tanh => "tanh",
            Self::Sigmoid => "sigmoid",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_activation_yaml_names() {
        let act: Activation = serde_yaml::from_str("leaky_relu").unwrap();
        assert_eq!(act, Activation::LeakyRelu);
        let act: Activation = serde_yaml::from_str("tanh").unwrap();
        assert_eq!(act, Activation::Tanh);
        assert!(serde_yaml::from_str::<Activation>("swish").is_err());
    }

    #[test]
    fn test_linear_is_identity() {
        let x = Tensor::new(arr2(&[[-1.0, 2.0]]), true);
        assert_eq!(Activation::Linear.apply(&x).id(), x.id());
    }

    #[test]
    fn test_display_round_trips_through_serde() {
        for act in [
            Activation::Linear,
            Activation::Relu,
            Activation::LeakyRelu,
            Activation::Tanh,
            Activation::Sigmoid,
        ] {
            let parsed: Activation = serde_yaml::from_str(&act.to_string()).unwrap();
            assert_eq!(parsed, act);
        }
    }
}
