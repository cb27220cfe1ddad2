//! Configuration validation logic

use tracing::debug;

use super::error::ValidationError;
use crate::config::schema::{
    DataConfig, ExperimentConfig, LossKind, ModelConfig, NetworkSpec, OptimizerSpec, TrainingParams,
    WassersteinType,
};

/// Validate a complete experiment
pub fn validate_config(config: &ExperimentConfig) -> Result<(), ValidationError> {
    validate_model(&config.model)?;
    validate_training(&config.training)?;
    validate_data(&config.data)
}

/// Validate the model variant and both network specs
///
/// Checks:
/// - `latent_dim > 0`
/// - Wasserstein loss names a `wasserstein_type` and `n_critic >= 1`
/// - `clip_weights` has `clip_value > 0`; `gradient_penalty` has a
///   coefficient `>= 0` and, if given, `drift_term >= 0`
/// - optimizer hyperparameters are in range
///
/// Wasserstein fields that the selected variant does not use are accepted
/// as-is.
pub fn validate_model(model: &ModelConfig) -> Result<(), ValidationError> {
    if model.latent_dim == 0 {
        return Err(ValidationError::InvalidLatentDim(model.latent_dim));
    }

    match model.loss {
        LossKind::BinaryCrossentropy => {
            if model.wasserstein_type.is_some()
                || model.n_critic.is_some()
                || model.clip_value.is_some()
                || model.gradient_penalty.is_some()
                || model.drift_term.is_some()
            {
                debug!(model = %model.model_name, "Wasserstein fields present but unused by binary_crossentropy");
            }
        }
        LossKind::Wasserstein => validate_wasserstein(model)?,
    }

    validate_network("generator", &model.generator)?;
    validate_network("discriminator", &model.discriminator)
}

fn validate_wasserstein(model: &ModelConfig) -> Result<(), ValidationError> {
    let kind = model.wasserstein_type.ok_or(ValidationError::MissingWassersteinType)?;

    let n_critic = model.n_critic.ok_or_else(|| ValidationError::missing("n_critic", None))?;
    if n_critic == 0 {
        return Err(ValidationError::InvalidNCritic(n_critic));
    }

    match kind {
        WassersteinType::ClipWeights => {
            let clip = model
                .clip_value
                .ok_or_else(|| ValidationError::missing("clip_value", Some(kind)))?;
            if !clip.is_finite() || clip <= 0.0 {
                return Err(ValidationError::InvalidClipValue(clip));
            }
        }
        WassersteinType::GradientPenalty => {
            let coefficient = model
                .gradient_penalty
                .ok_or_else(|| ValidationError::missing("gradient_penalty", Some(kind)))?;
            if !coefficient.is_finite() || coefficient < 0.0 {
                return Err(ValidationError::InvalidGradientPenalty(coefficient));
            }
            if let Some(drift) = model.drift_term {
                if !drift.is_finite() || drift < 0.0 {
                    return Err(ValidationError::InvalidDriftTerm(drift));
                }
            }
        }
    }

    Ok(())
}

fn validate_network(network: &'static str, spec: &NetworkSpec) -> Result<(), ValidationError> {
    if spec.layers > 0 && spec.channels == 0 {
        return Err(ValidationError::InvalidNetwork {
            network,
            reason: "channels must be > 0 when layers > 0".to_string(),
        });
    }
    if spec.dense && spec.channels == 0 {
        return Err(ValidationError::InvalidNetwork {
            network,
            reason: "dense projection needs channels > 0".to_string(),
        });
    }
    validate_optimizer(network, &spec.optimizer)
}

fn validate_optimizer(network: &'static str, spec: &OptimizerSpec) -> Result<(), ValidationError> {
    let lr = spec.learning_rate;
    if !(lr > 0.0 && lr <= 1.0) {
        return Err(ValidationError::InvalidLearningRate { network, value: lr });
    }

    for (name, value) in [("beta_1", spec.beta_1), ("beta_2", spec.beta_2), ("rho", spec.rho)] {
        if !(0.0..1.0).contains(&value) {
            return Err(ValidationError::InvalidBeta { network, name, value });
        }
    }

    if !(spec.epsilon > 0.0) {
        return Err(ValidationError::InvalidEpsilon { network, value: spec.epsilon });
    }

    Ok(())
}

fn validate_training(params: &TrainingParams) -> Result<(), ValidationError> {
    if params.epochs == 0 {
        return Err(ValidationError::InvalidEpochs(params.epochs));
    }
    if params.batch_size == 0 {
        return Err(ValidationError::InvalidBatchSize(params.batch_size));
    }
    if params.max_steps == Some(0) {
        return Err(ValidationError::InvalidMaxSteps(0));
    }
    if params.save_interval == 0 {
        return Err(ValidationError::InvalidSaveInterval(params.save_interval));
    }
    Ok(())
}

fn validate_data(data: &DataConfig) -> Result<(), ValidationError> {
    match data {
        DataConfig::Ring { modes, std, samples, radius } => {
            if *modes == 0 || *samples == 0 {
                return Err(ValidationError::InvalidData(
                    "ring needs modes > 0 and samples > 0".to_string(),
                ));
            }
            if !(std.is_finite() && *std >= 0.0 && radius.is_finite()) {
                return Err(ValidationError::InvalidData(format!(
                    "ring radius/std must be finite with std >= 0 (radius {radius}, std {std})"
                )));
            }
        }
        DataConfig::File { path, .. } => {
            if path.as_os_str().is_empty() {
                return Err(ValidationError::InvalidData("file source needs a path".to_string()));
            }
        }
    }
    Ok(())
}
