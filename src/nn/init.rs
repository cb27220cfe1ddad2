//! Random initialisation and latent noise

use ndarray::Array2;
use rand::Rng;

/// Standard normal sample via the Box-Muller transform
pub fn standard_normal<R: Rng>(rng: &mut R) -> f32 {
    let u1: f64 = rng.random::<f64>().max(1e-10);
    let u2: f64 = rng.random::<f64>();
    ((-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()) as f32
}

/// Glorot (Xavier) normal initialisation: `N(0, 2 / (fan_in + fan_out))`
pub fn glorot_normal<R: Rng>(rng: &mut R, fan_in: usize, fan_out: usize) -> Array2<f32> {
    let std = (2.0 / (fan_in + fan_out) as f32).sqrt();
    Array2::from_shape_simple_fn((fan_in, fan_out), || standard_normal(rng) * std)
}

/// Latent noise batch `[rows, dim]` drawn from `N(0, 1)`
pub fn latent_noise<R: Rng>(rng: &mut R, rows: usize, dim: usize) -> Array2<f32> {
    Array2::from_shape_simple_fn((rows, dim), || standard_normal(rng))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = StdRng::seed_from_u64(7);
        let n = 20_000;
        let samples: Vec<f32> = (0..n).map(|_| standard_normal(&mut rng)).collect();
        let mean = samples.iter().sum::<f32>() / n as f32;
        let var = samples.iter().map(|x| (x - mean).powi(2)).sum::<f32>() / n as f32;
        assert!(mean.abs() < 0.05, "mean = {mean}");
        assert!((var - 1.0).abs() < 0.05, "var = {var}");
    }

    #[test]
    fn test_glorot_shape_and_scale() {
        let mut rng = StdRng::seed_from_u64(1);
        let w = glorot_normal(&mut rng, 200, 200);
        assert_eq!(w.dim(), (200, 200));
        let var = w.iter().map(|x| x * x).sum::<f32>() / w.len() as f32;
        assert!((var - 0.005).abs() < 0.001, "var = {var}");
    }

    #[test]
    fn test_latent_noise_is_seeded() {
        let a = latent_noise(&mut StdRng::seed_from_u64(3), 4, 8);
        let b = latent_noise(&mut StdRng::seed_from_u64(3), 4, 8);
        assert_eq!(a.dim(), (4, 8));
        assert_eq!(a, b);
    }
}
