//! Property-based tests for Wasserstein field validation

use super::validator::validate_model;
use crate::config::schema::*;
use proptest::prelude::*;

fn wasserstein(kind: WassersteinType) -> ModelConfig {
    ModelConfig {
        loss: LossKind::Wasserstein,
        wasserstein_type: Some(kind),
        ..ModelConfig::dcgan()
    }
}

proptest! {
    #[test]
    fn prop_clip_weights_accepts_positive_clip(n_critic in 1usize..20, clip in 1e-4f32..10.0) {
        let mut model = wasserstein(WassersteinType::ClipWeights);
        model.n_critic = Some(n_critic);
        model.clip_value = Some(clip);
        prop_assert!(validate_model(&model).is_ok());
        prop_assert_eq!(model.effective_n_critic(), n_critic);
    }

    #[test]
    fn prop_clip_weights_rejects_non_positive_clip(clip in -10.0f32..=0.0) {
        let mut model = wasserstein(WassersteinType::ClipWeights);
        model.n_critic = Some(5);
        model.clip_value = Some(clip);
        prop_assert!(validate_model(&model).is_err());
    }

    #[test]
    fn prop_gradient_penalty_sign(coefficient in -100.0f32..100.0, drift in 0.0f32..1.0) {
        let mut model = wasserstein(WassersteinType::GradientPenalty);
        model.n_critic = Some(5);
        model.gradient_penalty = Some(coefficient);
        model.drift_term = Some(drift);
        prop_assert_eq!(validate_model(&model).is_ok(), coefficient >= 0.0);
    }

    #[test]
    fn prop_standard_loss_accepts_any_wasserstein_fields(
        n_critic in 0usize..10,
        clip in -1.0f32..1.0,
        coefficient in -10.0f32..10.0,
    ) {
        let mut model = ModelConfig::dcgan();
        model.n_critic = Some(n_critic);
        model.clip_value = Some(clip);
        model.gradient_penalty = Some(coefficient);
        prop_assert!(validate_model(&model).is_ok());
        prop_assert_eq!(model.effective_n_critic(), 1);
    }
}
