//! YAML schema definitions for declarative GAN experiments

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

use crate::data::Normalisation;
use crate::nn::Activation;
use crate::train::NumericalPolicy;

/// Adversarial objective family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossKind {
    /// Standard GAN: binary cross-entropy on discriminator logits
    BinaryCrossentropy,
    /// Wasserstein critic; the constraint is chosen by `wasserstein_type`
    Wasserstein,
}

impl fmt::Display for LossKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::BinaryCrossentropy => "binary_crossentropy",
            Self::Wasserstein => "wasserstein",
        })
    }
}

/// Lipschitz constraint for the Wasserstein critic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WassersteinType {
    ClipWeights,
    GradientPenalty,
}

impl fmt::Display for WassersteinType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ClipWeights => "clip_weights",
            Self::GradientPenalty => "gradient_penalty",
        })
    }
}

/// Optimizer algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptimizerKind {
    #[default]
    Adam,
    Rmsprop,
    Sgd,
}

impl fmt::Display for OptimizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Adam => "adam",
            Self::Rmsprop => "rmsprop",
            Self::Sgd => "sgd",
        })
    }
}

/// Optimizer hyperparameters for one network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerSpec {
    /// Algorithm: "adam" | "rmsprop" | "sgd"
    #[serde(default)]
    pub name: OptimizerKind,

    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,

    /// Adam β1; SGD momentum
    #[serde(default = "default_beta_1")]
    pub beta_1: f32,

    #[serde(default = "default_beta_2")]
    pub beta_2: f32,

    #[serde(default = "default_epsilon")]
    pub epsilon: f32,

    /// RMSprop decay
    #[serde(default = "default_rho")]
    pub rho: f32,
}

fn default_learning_rate() -> f32 {
    2e-4
}

fn default_beta_1() -> f32 {
    0.5
}

fn default_beta_2() -> f32 {
    0.999
}

fn default_epsilon() -> f32 {
    1e-7
}

fn default_rho() -> f32 {
    0.9
}

impl Default for OptimizerSpec {
    fn default() -> Self {
        Self {
            name: OptimizerKind::Adam,
            learning_rate: default_learning_rate(),
            beta_1: default_beta_1(),
            beta_2: default_beta_2(),
            epsilon: default_epsilon(),
            rho: default_rho(),
        }
    }
}

/// Shape and optimizer of one network (generator or discriminator)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkSpec {
    /// Hidden-layer activation
    pub activation: Activation,

    /// Width of each hidden layer
    pub channels: usize,

    /// Append a `4 * channels` wide projection layer before the output
    pub dense: bool,

    /// Number of hidden layers
    pub layers: usize,

    /// Output activation (generator only; defaults to tanh)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_activation: Option<Activation>,

    pub optimizer: OptimizerSpec,
}

impl Default for NetworkSpec {
    fn default() -> Self {
        Self {
            activation: Activation::LeakyRelu,
            channels: 64,
            dense: false,
            layers: 2,
            output_activation: None,
            optimizer: OptimizerSpec::default(),
        }
    }
}

/// Model variant and adversarial objective
///
/// The Wasserstein fields may all be present at once; only the ones the
/// selected `wasserstein_type` uses are validated, the rest are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub model_name: String,

    /// Size of the generator's noise input
    pub latent_dim: usize,

    pub loss: LossKind,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wasserstein_type: Option<WassersteinType>,

    /// Critic updates per generator update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub n_critic: Option<usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip_value: Option<f32>,

    /// Gradient penalty coefficient (λ)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient_penalty: Option<f32>,

    /// Coefficient of mean(real_scores²)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drift_term: Option<f32>,

    #[serde(default)]
    pub generator: NetworkSpec,

    #[serde(default)]
    pub discriminator: NetworkSpec,
}

impl ModelConfig {
    /// The literal DCGAN configuration: latent_dim 100, BCE loss,
    /// Adam(2e-4, 0.5, 0.999) for both networks
    pub fn dcgan() -> Self {
        Self {
            model_name: "dcgan".to_string(),
            latent_dim: 100,
            loss: LossKind::BinaryCrossentropy,
            wasserstein_type: None,
            n_critic: None,
            clip_value: None,
            gradient_penalty: None,
            drift_term: None,
            generator: NetworkSpec {
                activation: Activation::Relu,
                output_activation: Some(Activation::Tanh),
                ..NetworkSpec::default()
            },
            discriminator: NetworkSpec::default(),
        }
    }

    /// Critic updates per generator update actually used.
    ///
    /// The standard loss always alternates 1:1 regardless of `n_critic`.
    pub fn effective_n_critic(&self) -> usize {
        match self.loss {
            LossKind::BinaryCrossentropy => 1,
            LossKind::Wasserstein => self.n_critic.unwrap_or(1).max(1),
        }
    }
}

/// Training hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainingParams {
    /// Number of epochs
    pub epochs: usize,

    /// Real samples per critic step
    pub batch_size: usize,

    /// Global random seed for reproducibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Stop after this many update steps (critic + generator)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_steps: Option<u64>,

    /// What to do when a loss or gradient is not finite
    pub on_non_finite: NumericalPolicy,

    /// Output directory for checkpoints and metrics
    pub output_dir: PathBuf,

    /// Save checkpoint every N epochs
    pub save_interval: usize,

    /// Write per-epoch checkpoints
    pub checkpoints: bool,

    /// Append per-epoch metrics to `metrics.jsonl`
    pub metrics: bool,
}

impl Default for TrainingParams {
    fn default() -> Self {
        Self {
            epochs: 10,
            batch_size: 64,
            seed: None,
            max_steps: None,
            on_non_finite: NumericalPolicy::default(),
            output_dir: PathBuf::from("./output"),
            save_interval: 1,
            checkpoints: true,
            metrics: true,
        }
    }
}

/// Where real samples come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum DataConfig {
    /// Gaussian mixture on a circle
    Ring {
        #[serde(default = "default_modes")]
        modes: usize,
        #[serde(default = "default_radius")]
        radius: f32,
        #[serde(default = "default_std")]
        std: f32,
        #[serde(default = "default_samples")]
        samples: usize,
    },
    /// JSON array of equally sized sample rows
    File {
        path: PathBuf,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        normalise: Option<Normalisation>,
    },
}

fn default_modes() -> usize {
    8
}

fn default_radius() -> f32 {
    0.8
}

fn default_std() -> f32 {
    0.02
}

fn default_samples() -> usize {
    2048
}

impl Default for DataConfig {
    fn default() -> Self {
        Self::Ring {
            modes: default_modes(),
            radius: default_radius(),
            std: default_std(),
            samples: default_samples(),
        }
    }
}

/// Complete experiment specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub model: ModelConfig,

    #[serde(default)]
    pub training: TrainingParams,

    #[serde(default)]
    pub data: DataConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimizer_spec_defaults() {
        let spec: OptimizerSpec = serde_yaml::from_str("learning_rate: 0.001").unwrap();
        assert_eq!(spec.name, OptimizerKind::Adam);
        assert_eq!(spec.learning_rate, 0.001);
        assert_eq!(spec.beta_1, 0.5);
        assert_eq!(spec.beta_2, 0.999);
        assert_eq!(spec.epsilon, 1e-7);
    }

    #[test]
    fn test_model_config_minimal_yaml() {
        let yaml = "model_name: tiny\nlatent_dim: 8\nloss: binary_crossentropy\n";
        let config: ModelConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.loss, LossKind::BinaryCrossentropy);
        assert!(config.wasserstein_type.is_none());
        assert_eq!(config.generator, NetworkSpec::default());
    }

    #[test]
    fn test_wgan_gp_yaml() {
        let yaml = r#"
model_name: wgan_gp
latent_dim: 64
loss: wasserstein
wasserstein_type: gradient_penalty
n_critic: 5
clip_value: 0.01
gradient_penalty: 10.0
drift_term: 0.001
discriminator:
  optimizer:
    learning_rate: 0.0001
    beta_1: 0.0
    beta_2: 0.9
"#;
        let config: ModelConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.wasserstein_type, Some(WassersteinType::GradientPenalty));
        assert_eq!(config.effective_n_critic(), 5);
        assert_eq!(config.discriminator.optimizer.beta_2, 0.9);
        assert_eq!(config.generator.optimizer.learning_rate, 2e-4);
    }

    #[test]
    fn test_unknown_loss_rejected() {
        let yaml = "model_name: x\nlatent_dim: 8\nloss: hinge\n";
        assert!(serde_yaml::from_str::<ModelConfig>(yaml).is_err());
    }

    #[test]
    fn test_dcgan_literal_defaults() {
        let config = ModelConfig::dcgan();
        assert_eq!(config.latent_dim, 100);
        assert_eq!(config.loss, LossKind::BinaryCrossentropy);
        for net in [&config.generator, &config.discriminator] {
            assert_eq!(net.optimizer.learning_rate, 2e-4);
            assert_eq!(net.optimizer.beta_1, 0.5);
            assert_eq!(net.optimizer.beta_2, 0.999);
        }
    }

    #[test]
    fn test_standard_loss_ignores_n_critic() {
        let mut config = ModelConfig::dcgan();
        config.n_critic = Some(5);
        assert_eq!(config.effective_n_critic(), 1);
    }

    #[test]
    fn test_data_config_tagged() {
        let data: DataConfig = serde_yaml::from_str("source: ring\nmodes: 4").unwrap();
        assert!(matches!(data, DataConfig::Ring { modes: 4, samples: 2048, .. }));

        let data: DataConfig =
            serde_yaml::from_str("source: file\npath: samples.json\nnormalise: neg_one_one").unwrap();
        assert!(matches!(
            data,
            DataConfig::File { normalise: Some(Normalisation::NegOneOne), .. }
        ));
    }

    #[test]
    fn test_training_params_defaults() {
        let params = TrainingParams::default();
        assert_eq!(params.epochs, 10);
        assert_eq!(params.save_interval, 1);
        assert_eq!(params.on_non_finite, NumericalPolicy::Skip);
        assert!(params.max_steps.is_none());
    }
}
