//! Element-wise nonlinearities
//!
//! Backward rules recompute from the saved input instead of holding on to
//! the output, so the graph never points back at the node that owns it.

use ndarray::Array2;
use std::rc::Rc;

use super::basic::{add_scalar, div, mul, neg, scale, square};
use super::record;
use crate::autograd::{BackwardOp, Tensor};

fn mask(a: &Tensor, f: impl Fn(f32) -> f32) -> Tensor {
    Tensor::new(a.data().mapv(f), false)
}

/// Rectified linear unit
pub fn relu(a: &Tensor) -> Tensor {
    leaky_relu(a, 0.0)
}

/// Leaky ReLU: `x` for `x > 0`, `alpha * x` otherwise
pub fn leaky_relu(a: &Tensor, alpha: f32) -> Tensor {
    let data = a.data().mapv(|x| if x > 0.0 { x } else { alpha * x });
    record(data, &[a], || Rc::new(LeakyReluBackward { a: a.clone(), alpha }))
}

struct LeakyReluBackward {
    a: Tensor,
    alpha: f32,
}

impl BackwardOp for LeakyReluBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        // Piecewise linear: the local slope is a constant mask
        let alpha = self.alpha;
        let slope = mask(&self.a, |x| if x > 0.0 { 1.0 } else { alpha });
        vec![self.a.requires_grad().then(|| mul(grad, &slope))]
    }

    fn name(&self) -> &'static str {
        "leaky_relu"
    }
}

/// Hyperbolic tangent
pub fn tanh(a: &Tensor) -> Tensor {
    let data = a.data().mapv(f32::tanh);
    record(data, &[a], || Rc::new(TanhBackward { a: a.clone() }))
}

struct TanhBackward {
    a: Tensor,
}

impl BackwardOp for TanhBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        // d tanh = 1 - tanh²
        let local = add_scalar(&neg(&square(&tanh(&self.a))), 1.0);
        vec![self.a.requires_grad().then(|| mul(grad, &local))]
    }

    fn name(&self) -> &'static str {
        "tanh"
    }
}

fn stable_sigmoid(x: f32) -> f32 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Logistic sigmoid
pub fn sigmoid(a: &Tensor) -> Tensor {
    let data = a.data().mapv(stable_sigmoid);
    record(data, &[a], || Rc::new(SigmoidBackward { a: a.clone() }))
}

struct SigmoidBackward {
    a: Tensor,
}

impl BackwardOp for SigmoidBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        // σ' = σ(1 - σ)
        let s = sigmoid(&self.a);
        let local = mul(&s, &add_scalar(&neg(&s), 1.0));
        vec![self.a.requires_grad().then(|| mul(grad, &local))]
    }

    fn name(&self) -> &'static str {
        "sigmoid"
    }
}

/// `ln(1 + e^x)`, evaluated as `max(x, 0) + ln(1 + e^-|x|)`
pub fn softplus(a: &Tensor) -> Tensor {
    let data: Array2<f32> = a.data().mapv(|x| x.max(0.0) + (-x.abs()).exp().ln_1p());
    record(data, &[a], || Rc::new(SoftplusBackward { a: a.clone() }))
}

struct SoftplusBackward {
    a: Tensor,
}

impl BackwardOp for SoftplusBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        vec![self.a.requires_grad().then(|| mul(grad, &sigmoid(&self.a)))]
    }

    fn name(&self) -> &'static str {
        "softplus"
    }
}

/// Element-wise square root
pub fn sqrt(a: &Tensor) -> Tensor {
    let data = a.data().mapv(f32::sqrt);
    record(data, &[a], || Rc::new(SqrtBackward { a: a.clone() }))
}

struct SqrtBackward {
    a: Tensor,
}

impl BackwardOp for SqrtBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        // d√x = 1 / (2√x)
        vec![self.a.requires_grad().then(|| div(grad, &scale(&sqrt(&self.a), 2.0)))]
    }

    fn name(&self) -> &'static str {
        "sqrt"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::arr2;

    #[test]
    fn test_leaky_relu_values() {
        let a = Tensor::new(arr2(&[[-2.0, 0.0, 3.0]]), false);
        assert_eq!(*leaky_relu(&a, 0.2).data(), arr2(&[[-0.4, 0.0, 3.0]]));
        assert_eq!(*relu(&a).data(), arr2(&[[0.0, 0.0, 3.0]]));
    }

    #[test]
    fn test_softplus_is_stable_for_large_inputs() {
        let a = Tensor::new(arr2(&[[-100.0, 0.0, 100.0]]), false);
        let out = softplus(&a);
        assert!(out.is_finite());
        assert_abs_diff_eq!(out.data()[[0, 0]], 0.0, epsilon = 1e-6);
        assert_abs_diff_eq!(out.data()[[0, 1]], std::f32::consts::LN_2, epsilon = 1e-6);
        assert_abs_diff_eq!(out.data()[[0, 2]], 100.0, epsilon = 1e-4);
    }

    #[test]
    fn test_sigmoid_extremes() {
        let a = Tensor::new(arr2(&[[-200.0, 0.0, 200.0]]), false);
        let out = sigmoid(&a);
        assert!(out.is_finite());
        assert_abs_diff_eq!(out.data()[[0, 1]], 0.5, epsilon = 1e-7);
        assert_abs_diff_eq!(out.data()[[0, 2]], 1.0, epsilon = 1e-7);
    }

    #[test]
    fn test_sqrt_values() {
        let a = Tensor::new(arr2(&[[4.0, 9.0]]), false);
        assert_eq!(*sqrt(&a).data(), arr2(&[[2.0, 3.0]]));
    }
}
