//! Stochastic Gradient Descent optimizer

use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use super::optimizer::{check_step_inputs, ensure_buffers};
use super::Optimizer;
use crate::autograd::Tensor;

/// SGD optimizer with optional momentum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sgd {
    lr: f32,
    momentum: f32,
    t: u64,
    velocities: Vec<Array2<f32>>,
}

impl Sgd {
    /// Create a new SGD optimizer
    pub fn new(lr: f32, momentum: f32) -> Self {
        Self { lr, momentum, t: 0, velocities: Vec::new() }
    }

    #[must_use]
    pub fn momentum(&self) -> f32 {
        self.momentum
    }
}

impl Optimizer for Sgd {
    fn step(&mut self, params: &[Tensor], grads: &[Array2<f32>]) {
        check_step_inputs(params, grads);
        self.t += 1;

        if self.momentum > 0.0 {
            ensure_buffers(&mut self.velocities, params);
            let (lr, momentum) = (self.lr, self.momentum);
            // v = momentum * v - lr * grad; param += v
            for ((param, grad), velocity) in params.iter().zip(grads).zip(self.velocities.iter_mut()) {
                let mut data = param.data_mut();
                Zip::from(&mut *data).and(velocity).and(grad).for_each(|p, v, &g| {
                    *v = momentum * *v - lr * g;
                    *p += *v;
                });
            }
        } else {
            for (param, grad) in params.iter().zip(grads) {
                param.data_mut().scaled_add(-self.lr, grad);
            }
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
    fn test_sgd_plain_step() {
        let mut opt = Sgd::new(0.5, 0.0);
        let p = Tensor::new(arr2(&[[1.0, 2.0]]), true);
        opt.step(&[p.clone()], &[arr2(&[[1.0, -2.0]])]);
        assert_eq!(*p.data(), arr2(&[[0.5, 3.0]]));
    }

    #[test]
    fn test_sgd_momentum_accumulates() {
        let mut opt = Sgd::new(0.1, 0.9);
        let p = Tensor::new(arr2(&[[0.0]]), true);
        opt.step(&[p.clone()], &[arr2(&[[1.0]])]);
        opt.step(&[p.clone()], &[arr2(&[[1.0]])]);
        // v1 = -0.1, v2 = -0.09 - 0.1
        assert_abs_diff_eq!(p.data()[[0, 0]], -0.29, epsilon = 1e-6);
    }
}
