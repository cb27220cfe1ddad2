//! Validation error types
//!
//! Every configuration problem is reported before any network is built or
//! any optimizer state is touched.

use crate::config::schema::WassersteinType;

/// Validation error type
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid latent_dim: {0} (must be > 0)")]
    InvalidLatentDim(usize),

    #[error("Wasserstein loss requires wasserstein_type (one of: clip_weights, gradient_penalty)")]
    MissingWassersteinType,

    #[error("{field} is required when {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },

    #[error("Invalid n_critic: {0} (must be >= 1)")]
    InvalidNCritic(usize),

    #[error("Invalid clip_value: {0} (must be finite and > 0.0)")]
    InvalidClipValue(f32),

    #[error("Invalid gradient_penalty: {0} (must be finite and >= 0.0)")]
    InvalidGradientPenalty(f32),

    #[error("Invalid drift_term: {0} (must be finite and >= 0.0)")]
    InvalidDriftTerm(f32),

    #[error("Invalid {network} learning rate: {value} (must be > 0.0 and <= 1.0)")]
    InvalidLearningRate { network: &'static str, value: f32 },

    #[error("Invalid {network} {name}: {value} (must be in [0.0, 1.0))")]
    InvalidBeta {
        network: &'static str,
        name: &'static str,
        value: f32,
    },

    #[error("Invalid {network} epsilon: {value} (must be > 0.0)")]
    InvalidEpsilon { network: &'static str, value: f32 },

    #[error("Invalid {network} architecture: {reason}")]
    InvalidNetwork {
        network: &'static str,
        reason: String,
    },

    #[error("Invalid epochs: {0} (must be > 0)")]
    InvalidEpochs(usize),

    #[error("Invalid batch size: {0} (must be > 0)")]
    InvalidBatchSize(usize),

    #[error("Invalid max_steps: {0} (must be > 0)")]
    InvalidMaxSteps(u64),

    #[error("Invalid save interval: {0} (must be > 0)")]
    InvalidSaveInterval(usize),

    #[error("Invalid data source: {0}")]
    InvalidData(String),

    #[error("Loss variant cannot change mid-run: session uses {expected}, checkpoint has {found}")]
    LossVariantMismatch { expected: String, found: String },

    #[error("Checkpoint does not fit this session: {0}")]
    IncompatibleCheckpoint(String),
}

impl ValidationError {
    pub(crate) fn missing(field: &'static str, wasserstein_type: Option<WassersteinType>) -> Self {
        let context = match wasserstein_type {
            Some(kind) => format!("wasserstein_type is {kind}"),
            None => "loss is wasserstein".to_string(),
        };
        Self::MissingField { field, context }
    }
}
