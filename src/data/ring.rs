//! Gaussian mixture on a circle, the usual 2-D toy target for GANs

use ndarray::Array2;
use rand::Rng;
use std::f32::consts::TAU;

use crate::nn::standard_normal;

/// `samples` points spread evenly over `modes` Gaussians of standard
/// deviation `std`, centred on a circle of `radius`. Returns `[samples, 2]`.
pub fn ring_samples<R: Rng>(rng: &mut R, modes: usize, radius: f32, std: f32, samples: usize) -> Array2<f32> {
    let mut out = Array2::zeros((samples, 2));
    for (i, mut row) in out.outer_iter_mut().enumerate() {
        let angle = TAU * (i % modes.max(1)) as f32 / modes.max(1) as f32;
        row[0] = radius * angle.cos() + std * standard_normal(rng);
        row[1] = radius * angle.sin() + std * standard_normal(rng);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_ring_points_near_circle() {
        let mut rng = StdRng::seed_from_u64(0);
        let data = ring_samples(&mut rng, 8, 2.0, 0.01, 400);
        assert_eq!(data.dim(), (400, 2));
        for row in data.outer_iter() {
            let r = (row[0] * row[0] + row[1] * row[1]).sqrt();
            assert!((r - 2.0).abs() < 0.1, "radius {r}");
        }
    }

    #[test]
    fn test_zero_std_hits_mode_centres() {
        let mut rng = StdRng::seed_from_u64(0);
        let data = ring_samples(&mut rng, 4, 1.0, 0.0, 4);
        assert_abs_diff_eq!(data[[0, 0]], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(data[[1, 1]], 1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(data[[2, 0]], -1.0, epsilon = 1e-6);
        assert_abs_diff_eq!(data[[3, 1]], -1.0, epsilon = 1e-6);
    }
}
