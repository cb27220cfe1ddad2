//! Binary cross-entropy on discriminator logits
//!
//! With `σ` the logistic function, `-ln σ(x) = softplus(-x)` and
//! `-ln(1 - σ(x)) = softplus(x)`, so no probability is ever formed and
//! saturated logits cannot produce `ln(0)`.

use crate::autograd::{add, mean, neg, softplus, Tensor};

/// BCE(real, 1) + BCE(fake, 0)
pub fn discriminator_loss(real_logits: &Tensor, fake_logits: &Tensor) -> Tensor {
    add(&mean(&softplus(&neg(real_logits))), &mean(&softplus(fake_logits)))
}

/// BCE(fake, 1), the non-saturating generator objective
pub fn generator_loss(fake_logits: &Tensor) -> Tensor {
    mean(&softplus(&neg(fake_logits)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::Array2;

    fn logits(value: f32, rows: usize) -> Tensor {
        Tensor::new(Array2::from_elem((rows, 1), value), false)
    }

    #[test]
    fn test_even_odds_losses() {
        // p = 0.5 ⇔ logit 0
        let d = discriminator_loss(&logits(0.0, 4), &logits(0.0, 4)).item();
        let g = generator_loss(&logits(0.0, 4)).item();
        assert_abs_diff_eq!(d, 2.0 * 2f32.ln(), epsilon = 1e-6);
        assert_abs_diff_eq!(d, 1.386_294, epsilon = 1e-5);
        assert_abs_diff_eq!(g, 2f32.ln(), epsilon = 1e-6);
        assert_abs_diff_eq!(g, 0.693_147, epsilon = 1e-5);
    }

    #[test]
    fn test_saturated_logits_stay_finite() {
        let d = discriminator_loss(&logits(-1e4, 2), &logits(1e4, 2));
        let g = generator_loss(&logits(-1e4, 2));
        assert!(d.is_finite());
        assert!(g.is_finite());
        assert_abs_diff_eq!(d.item(), 2e4, epsilon = 1.0);
    }

    #[test]
    fn test_confident_correct_discriminator_has_low_loss() {
        let d = discriminator_loss(&logits(20.0, 3), &logits(-20.0, 3)).item();
        assert!(d < 1e-6);
    }
}
