//! Differentiable operations
//!
//! Every op computes its forward value eagerly and, when recording is enabled
//! and any input requires a gradient, attaches a backward op whose rule is
//! expressed with these same ops.

mod activations;
mod basic;
mod matmul;
mod reduce;

pub use activations::{leaky_relu, relu, sigmoid, softplus, sqrt, tanh};
pub use basic::{add, add_scalar, broadcast_to, div, mul, neg, scale, square, sub, sum_to};
pub use matmul::{matmul, transpose};
pub use reduce::{mean, sum, sum_rows};

use ndarray::Array2;
use std::rc::Rc;

use super::{is_grad_enabled, BackwardOp, Tensor};

/// Wrap a forward result, attaching the backward op only when needed
pub(crate) fn record<F>(data: Array2<f32>, inputs: &[&Tensor], make_op: F) -> Tensor
where
    F: FnOnce() -> Rc<dyn BackwardOp>,
{
    if is_grad_enabled() && inputs.iter().any(|t| t.requires_grad()) {
        Tensor::from_op(data, make_op())
    } else {
        Tensor::new(data, false)
    }
}
