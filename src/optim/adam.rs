//! Adam optimizer

use ndarray::{Array2, Zip};
use serde::{Deserialize, Serialize};

use super::optimizer::{check_step_inputs, ensure_buffers};
use super::Optimizer;
use crate::autograd::Tensor;

/// Adam optimizer
///
/// m_t = β1·m + (1 - β1)·g
/// v_t = β2·v + (1 - β2)·g²
/// θ_t = θ - lr_t · m_t / (√v_t + ε),  lr_t = lr·√(1 - β2^t) / (1 - β1^t)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adam {
    lr: f32,
    beta1: f32,
    beta2: f32,
    epsilon: f32,
    t: u64,
    m: Vec<Array2<f32>>,
    v: Vec<Array2<f32>>,
}

impl Adam {
    /// Create a new Adam optimizer
    pub fn new(lr: f32, beta1: f32, beta2: f32, epsilon: f32) -> Self {
        Self { lr, beta1, beta2, epsilon, t: 0, m: Vec::new(), v: Vec::new() }
    }

    /// Adam with default betas (0.9, 0.999) and ε = 1e-7
    pub fn default_params(lr: f32) -> Self {
        Self::new(lr, 0.9, 0.999, 1e-7)
    }

    #[must_use]
    pub fn beta1(&self) -> f32 {
        self.beta1
    }

    #[must_use]
    pub fn beta2(&self) -> f32 {
        self.beta2
    }

    #[must_use]
    pub fn epsilon(&self) -> f32 {
        self.epsilon
    }

    /// First moment buffers (empty before the first step)
    #[must_use]
    pub fn first_moments(&self) -> &[Array2<f32>] {
        &self.m
    }

    /// Second moment buffers (empty before the first step)
    #[must_use]
    pub fn second_moments(&self) -> &[Array2<f32>] {
        &self.v
    }
}

impl Optimizer for Adam {
    fn step(&mut self, params: &[Tensor], grads: &[Array2<f32>]) {
        check_step_inputs(params, grads);
        ensure_buffers(&mut self.m, params);
        ensure_buffers(&mut self.v, params);
        self.t += 1;

        // Bias correction folded into the step size
        let t = self.t as i32;
        let lr_t = self.lr * (1.0 - self.beta2.powi(t)).sqrt() / (1.0 - self.beta1.powi(t));
        let (beta1, beta2, eps) = (self.beta1, self.beta2, self.epsilon);

        for ((param, grad), (m, v)) in params.iter().zip(grads).zip(self.m.iter_mut().zip(self.v.iter_mut())) {
            let mut data = param.data_mut();
            Zip::from(&mut *data)
                .and(m)
                .and(v)
                .and(grad)
                .for_each(|p, m, v, &g| {
                    *m = beta1 * *m + (1.0 - beta1) * g;
                    *v = beta2 * *v + (1.0 - beta2) * g * g;
                    *p -= lr_t * *m / (v.sqrt() + eps);
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
