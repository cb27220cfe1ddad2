//! Adversarial loss strategies
//!
//! One [`LossStrategy`] is chosen when a session is built and never changes
//! afterwards. The update steps only call its methods, so they do not know
//! which objective is active.

mod penalty;
pub mod standard;
pub mod wasserstein;

pub use penalty::{gradient_penalty, gradient_penalty_at, interpolate, GRAD_NORM_EPSILON};

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::info;

use crate::autograd::{add, scale, Tensor};
use crate::config::{LossKind, ModelConfig, ValidationError, WassersteinType};
use crate::nn::Network;
use crate::optim::clamp_weights;

/// Tag identifying a strategy, persisted in checkpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LossVariant {
    Standard,
    WeightClipped,
    GradientPenalty,
}

impl fmt::Display for LossVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Standard => "standard",
            Self::WeightClipped => "weight_clipped",
            Self::GradientPenalty => "gradient_penalty",
        })
    }
}

/// The adversarial objective
#[derive(Debug, Clone, PartialEq)]
pub enum LossStrategy {
    /// Binary cross-entropy on discriminator logits
    Standard,
    /// WGAN: critic weights clamped to `[-clip_value, clip_value]` after each update
    WeightClipped { clip_value: f32 },
    /// WGAN-GP: `coefficient` scales the gradient penalty, `drift` scales mean(real²)
    GradientPenalty { coefficient: f32, drift: f32 },
}

impl LossStrategy {
    /// Select the strategy for a model config
    ///
    /// Only the fields the selected variant uses are read; the rest are ignored.
    pub fn from_config(model: &ModelConfig) -> Result<Self, ValidationError> {
        let strategy = match model.loss {
            LossKind::BinaryCrossentropy => Self::Standard,
            LossKind::Wasserstein => match model.wasserstein_type {
                None => return Err(ValidationError::MissingWassersteinType),
                Some(WassersteinType::ClipWeights) => {
                    let clip_value = model.clip_value.ok_or_else(|| {
                        ValidationError::missing("clip_value", Some(WassersteinType::ClipWeights))
                    })?;
                    if !clip_value.is_finite() || clip_value <= 0.0 {
                        return Err(ValidationError::InvalidClipValue(clip_value));
                    }
                    Self::WeightClipped { clip_value }
                }
                Some(WassersteinType::GradientPenalty) => {
                    let coefficient = model.gradient_penalty.ok_or_else(|| {
                        ValidationError::missing("gradient_penalty", Some(WassersteinType::GradientPenalty))
                    })?;
                    Self::GradientPenalty {
                        coefficient,
                        drift: model.drift_term.unwrap_or(0.0),
                    }
                }
            },
        };
        info!(model = %model.model_name, loss = %strategy.variant(), "Selected loss strategy");
        Ok(strategy)
    }

    pub fn variant(&self) -> LossVariant {
        match self {
            Self::Standard => LossVariant::Standard,
            Self::WeightClipped { .. } => LossVariant::WeightClipped,
            Self::GradientPenalty { .. } => LossVariant::GradientPenalty,
        }
    }

    /// Discriminator loss from scores alone (no penalty term)
    pub fn discriminator_loss(&self, real_scores: &Tensor, fake_scores: &Tensor) -> Tensor {
        match self {
            Self::Standard => standard::discriminator_loss(real_scores, fake_scores),
            Self::WeightClipped { .. } | Self::GradientPenalty { .. } => {
                wasserstein::critic_loss(real_scores, fake_scores)
            }
        }
    }

    pub fn generator_loss(&self, fake_scores: &Tensor) -> Tensor {
        match self {
            Self::Standard => standard::generator_loss(fake_scores),
            Self::WeightClipped { .. } | Self::GradientPenalty { .. } => {
                wasserstein::generator_loss(fake_scores)
            }
        }
    }

    /// Raw gradient penalty (before the coefficient), `None` for variants without one
    pub fn penalty<R: Rng>(&self, critic: &dyn Network, real: &Tensor, fake: &Tensor, rng: &mut R) -> Option<Tensor> {
        match self {
            Self::GradientPenalty { .. } => Some(gradient_penalty(critic, real, fake, rng)),
            Self::Standard | Self::WeightClipped { .. } => None,
        }
    }

    /// Full critic objective: scores both batches and adds any penalty and drift terms
    pub fn critic_objective<R: Rng>(&self, critic: &dyn Network, real: &Tensor, fake: &Tensor, rng: &mut R) -> Tensor {
        let real_scores = critic.forward(real);
        let fake_scores = critic.forward(fake);
        let mut loss = self.discriminator_loss(&real_scores, &fake_scores);

        if let Self::GradientPenalty { coefficient, drift } = *self {
            if coefficient != 0.0 {
                if let Some(penalty) = self.penalty(critic, real, fake, rng) {
                    loss = add(&loss, &scale(&penalty, coefficient));
                }
            }
            if drift != 0.0 {
                loss = add(&loss, &scale(&wasserstein::drift(&real_scores), drift));
            }
        }
        loss
    }

    /// Post-update constraint on the critic's parameters
    pub fn after_critic_update(&self, critic_params: &[Tensor]) {
        if let Self::WeightClipped { clip_value } = *self {
            clamp_weights(critic_params, clip_value);
        }
    }

    pub fn penalty_coefficient(&self) -> Option<f32> {
        match *self {
            Self::GradientPenalty { coefficient, .. } => Some(coefficient),
            _ => None,
        }
    }

    pub fn clip_value(&self) -> Option<f32> {
        match *self {
            Self::WeightClipped { clip_value } => Some(clip_value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::{arr2, Array2};

    fn wgan_config(kind: WassersteinType) -> ModelConfig {
        ModelConfig {
            loss: LossKind::Wasserstein,
            wasserstein_type: Some(kind),
            n_critic: Some(5),
            clip_value: Some(0.01),
            gradient_penalty: Some(10.0),
            ..ModelConfig::dcgan()
        }
    }

    #[test]
    fn test_dcgan_selects_standard_with_unused_overrides() {
        let mut config = ModelConfig::dcgan();
        config.n_critic = Some(5);
        config.clip_value = Some(0.01);
        let strategy = LossStrategy::from_config(&config).unwrap();
        assert_eq!(strategy, LossStrategy::Standard);
        assert_eq!(config.effective_n_critic(), 1);
    }

    #[test]
    fn test_wasserstein_variants() {
        let clip = LossStrategy::from_config(&wgan_config(WassersteinType::ClipWeights)).unwrap();
        assert_eq!(clip, LossStrategy::WeightClipped { clip_value: 0.01 });

        let gp = LossStrategy::from_config(&wgan_config(WassersteinType::GradientPenalty)).unwrap();
        assert_eq!(gp, LossStrategy::GradientPenalty { coefficient: 10.0, drift: 0.0 });
        assert_eq!(gp.variant(), LossVariant::GradientPenalty);
    }

    #[test]
    fn test_missing_wasserstein_type() {
        let mut config = wgan_config(WassersteinType::ClipWeights);
        config.wasserstein_type = None;
        assert_eq!(
            LossStrategy::from_config(&config).unwrap_err(),
            ValidationError::MissingWassersteinType
        );
    }

    #[test]
    fn test_even_odds_standard_losses() {
        let zero = Tensor::new(Array2::zeros((8, 1)), false);
        let strategy = LossStrategy::Standard;
        assert_abs_diff_eq!(strategy.discriminator_loss(&zero, &zero).item(), 1.386_294, epsilon = 1e-5);
        assert_abs_diff_eq!(strategy.generator_loss(&zero).item(), 0.693_147, epsilon = 1e-5);
    }

    #[test]
    fn test_wasserstein_losses_are_unbounded_means() {
        let real = Tensor::new(arr2(&[[4.0], [6.0]]), false);
        let fake = Tensor::new(arr2(&[[-2.0], [0.0]]), false);
        let strategy = LossStrategy::WeightClipped { clip_value: 0.01 };
        assert_eq!(strategy.discriminator_loss(&real, &fake).item(), -6.0);
        assert_eq!(strategy.generator_loss(&fake).item(), 1.0);
    }

    #[test]
    fn test_after_critic_update_clamps_only_for_weight_clipping() {
        let w = Tensor::new(arr2(&[[0.5, -0.5]]), true);
        LossStrategy::Standard.after_critic_update(&[w.clone()]);
        assert_eq!(*w.data(), arr2(&[[0.5, -0.5]]));

        LossStrategy::WeightClipped { clip_value: 0.1 }.after_critic_update(&[w.clone()]);
        assert_eq!(*w.data(), arr2(&[[0.1, -0.1]]));
    }

    #[test]
    fn test_gp_objective_adds_drift() {
        use crate::nn::{Activation, Linear, Mlp};
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        // Identity critic: penalty 0, so objective = critic loss + drift·mean(real²)
        let layer = Linear::from_arrays(arr2(&[[1.0]]), arr2(&[[0.0]]));
        let critic = Mlp::from_layers("critic", vec![layer], Activation::Linear, Activation::Linear);
        let real = Tensor::new(arr2(&[[2.0], [2.0]]), false);
        let fake = Tensor::new(arr2(&[[1.0], [1.0]]), false);

        let strategy = LossStrategy::GradientPenalty { coefficient: 10.0, drift: 0.5 };
        let loss = strategy.critic_objective(&critic, &real, &fake, &mut StdRng::seed_from_u64(0));
        assert_abs_diff_eq!(loss.item(), -1.0 + 0.5 * 4.0, epsilon = 1e-5);
    }
}
