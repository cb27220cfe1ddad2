//! RMSprop optimizer

use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use super::optimizer::{check_step_inputs, ensure_buffers};
use super::Optimizer;
use crate::autograd::Tensor;

/// RMSprop: v = ρ·v + (1 - ρ)·g², θ -= lr · g / (√v + ε)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RmsProp {
    lr: f32,
    rho: f32,
    epsilon: f32,
    t: u64,
    v: Vec<Array2<f32>>,
}

impl RmsProp {
    pub fn new(lr: f32, rho: f32, epsilon: f32) -> Self {
        Self { lr, rho, epsilon, t: 0, v: Vec::new() }
    }

    #[must_use]
    pub fn rho(&self) -> f32 {
        self.rho
    }
}

impl Optimizer for RmsProp {
    fn step(&mut self, params: &[Tensor], grads: &[Array2<f32>]) {
        check_step_inputs(params, grads);
        ensure_buffers(&mut self.v, params);
        self.t += 1;

        let (lr, rho, eps) = (self.lr, self.rho, self.epsilon);
        for ((param, grad), v) in params.iter().zip(grads).zip(self.v.iter_mut()) {
            let mut data = param.data_mut();
            Zip::from(&mut *data).and(v).and(grad).for_each(|p, v, &g| {
                *v = rho * *v + (1.0 - rho) * g * g;
                *p -= lr * g / (v.sqrt() + eps);
            });
        }
    }

    fn lr(&self) -> f32 {
        self.lr
    }

    fn set_lr(&mut self, lr: f32) {
        self.lr = lr;
    }

    fn step_count(&self) -> u64 {
        self.t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr2;

    #[test]
    fn test_rmsprop_first_step() {
        // v = (1 - ρ)·g², step = lr·g / √v = lr / √(1 - ρ)
        let mut opt = RmsProp::new(0.01, 0.9, 0.0);
        let p = Tensor::new(arr2(&[[1.0]]), true);
        opt.step(&[p.clone()], &[arr2(&[[4.0]])]);
        assert_abs_diff_eq!(p.data()[[0, 0]], 1.0 - 0.01 / 0.1f32.sqrt(), epsilon = 1e-6);
    }

    #[test]
    fn test_rmsprop_minimises_quadratic() {
        let mut opt = RmsProp::new(0.05, 0.9, 1e-7);
        let p = Tensor::new(arr2(&[[3.0, -2.0]]), true);
        for _ in 0..400 {
            let g = p.data().mapv(|x| 2.0 * x);
            opt.step(&[p.clone()], &[g]);
        }
        assert!(p.data().iter().all(|x| x.abs() < 0.1));
        assert_eq!(opt.step_count(), 400);
    }
}
