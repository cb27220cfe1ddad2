//! Unit tests for configuration validation

use super::error::ValidationError;
use super::validator::validate_config;
use crate::config::schema::*;

fn create_valid_config() -> ExperimentConfig {
    ExperimentConfig {
        model: ModelConfig::dcgan(),
        training: TrainingParams::default(),
        data: DataConfig::default(),
    }
}

fn wgan(kind: WassersteinType) -> ExperimentConfig {
    let mut config = create_valid_config();
    config.model.loss = LossKind::Wasserstein;
    config.model.wasserstein_type = Some(kind);
    config.model.n_critic = Some(5);
    config.model.clip_value = Some(0.01);
    config.model.gradient_penalty = Some(10.0);
    config
}

#[test]
fn test_valid_config() {
    assert!(validate_config(&create_valid_config()).is_ok());
    assert!(validate_config(&wgan(WassersteinType::ClipWeights)).is_ok());
    assert!(validate_config(&wgan(WassersteinType::GradientPenalty)).is_ok());
}

#[test]
fn test_invalid_latent_dim() {
    let mut config = create_valid_config();
    config.model.latent_dim = 0;
    let err = validate_config(&config).unwrap_err();
    assert_eq!(err, ValidationError::InvalidLatentDim(0));
}

#[test]
fn test_dcgan_tolerates_unused_wasserstein_fields() {
    let mut config = create_valid_config();
    config.model.n_critic = Some(0);
    config.model.clip_value = Some(-1.0);
    config.model.gradient_penalty = Some(-3.0);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_wasserstein_requires_type() {
    let mut config = wgan(WassersteinType::ClipWeights);
    config.model.wasserstein_type = None;
    let err = validate_config(&config).unwrap_err();
    assert_eq!(err, ValidationError::MissingWassersteinType);
}

#[test]
fn test_wasserstein_requires_n_critic() {
    let mut config = wgan(WassersteinType::GradientPenalty);
    config.model.n_critic = None;
    let err = validate_config(&config).unwrap_err();
    assert!(matches!(err, ValidationError::MissingField { field: "n_critic", .. }));

    config.model.n_critic = Some(0);
    let err = validate_config(&config).unwrap_err();
    assert_eq!(err, ValidationError::InvalidNCritic(0));
}

#[test]
fn test_clip_weights_requires_positive_clip_value() {
    let mut config = wgan(WassersteinType::ClipWeights);
    config.model.clip_value = None;
    let err = validate_config(&config).unwrap_err();
    assert!(matches!(err, ValidationError::MissingField { field: "clip_value", .. }));
    assert!(err.to_string().contains("clip_weights"));

    config.model.clip_value = Some(0.0);
    assert_eq!(validate_config(&config).unwrap_err(), ValidationError::InvalidClipValue(0.0));
}

#[test]
fn test_clip_weights_ignores_penalty_fields() {
    let mut config = wgan(WassersteinType::ClipWeights);
    config.model.gradient_penalty = Some(-5.0);
    config.model.drift_term = Some(-1.0);
    assert!(validate_config(&config).is_ok());
}

#[test]
fn test_gradient_penalty_rules() {
    let mut config = wgan(WassersteinType::GradientPenalty);
    config.model.clip_value = None;
    assert!(validate_config(&config).is_ok(), "clip_value unused under gradient_penalty");

    config.model.gradient_penalty = Some(0.0);
    assert!(validate_config(&config).is_ok(), "zero coefficient is allowed");

    config.model.gradient_penalty = Some(-0.1);
    assert!(matches!(
        validate_config(&config).unwrap_err(),
        ValidationError::InvalidGradientPenalty(_)
    ));

    config.model.gradient_penalty = Some(10.0);
    config.model.drift_term = Some(-0.001);
    assert!(matches!(
        validate_config(&config).unwrap_err(),
        ValidationError::InvalidDriftTerm(_)
    ));
}

#[test]
fn test_invalid_learning_rate() {
    let mut config = create_valid_config();
    config.model.discriminator.optimizer.learning_rate = 0.0;
    let err = validate_config(&config).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidLearningRate { network: "discriminator", .. }
    ));

    config.model.discriminator.optimizer.learning_rate = f32::NAN;
    assert!(validate_config(&config).is_err());
}

#[test]
fn test_invalid_beta() {
    let mut config = create_valid_config();
    config.model.generator.optimizer.beta_2 = 1.0;
    let err = validate_config(&config).unwrap_err();
    assert!(matches!(
        err,
        ValidationError::InvalidBeta { network: "generator", name: "beta_2", .. }
    ));
}

#[test]
fn test_invalid_training_params() {
    let mut config = create_valid_config();
    config.training.epochs = 0;
    assert_eq!(validate_config(&config).unwrap_err(), ValidationError::InvalidEpochs(0));

    let mut config = create_valid_config();
    config.training.batch_size = 0;
    assert_eq!(validate_config(&config).unwrap_err(), ValidationError::InvalidBatchSize(0));

    let mut config = create_valid_config();
    config.training.max_steps = Some(0);
    assert_eq!(validate_config(&config).unwrap_err(), ValidationError::InvalidMaxSteps(0));
}

#[test]
fn test_invalid_network() {
    let mut config = create_valid_config();
    config.model.generator.channels = 0;
    assert!(matches!(
        validate_config(&config).unwrap_err(),
        ValidationError::InvalidNetwork { network: "generator", .. }
    ));
}

#[test]
fn test_invalid_ring() {
    let mut config = create_valid_config();
    config.data = DataConfig::Ring { modes: 0, radius: 1.0, std: 0.1, samples: 10 };
    assert!(matches!(validate_config(&config).unwrap_err(), ValidationError::InvalidData(_)));
}

#[test]
fn test_error_messages() {
    let err = ValidationError::InvalidNCritic(0);
    assert_eq!(err.to_string(), "Invalid n_critic: 0 (must be >= 1)");
    let err = ValidationError::LossVariantMismatch {
        expected: "standard".to_string(),
        found: "gradient_penalty".to_string(),
    };
    assert!(err.to_string().contains("cannot change mid-run"));
}
