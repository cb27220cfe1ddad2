//! Reductions

use ndarray::Array2;
use std::rc::Rc;

use super::basic::{broadcast_to, scale, sum_to};
use super::record;
use crate::autograd::{BackwardOp, Tensor};

/// Sum of every element, as a `[1, 1]` tensor
pub fn sum(a: &Tensor) -> Tensor {
    let total = a.data().sum();
    record(Array2::from_elem((1, 1), total), &[a], || Rc::new(SumBackward { a: a.clone() }))
}

struct SumBackward {
    a: Tensor,
}

impl BackwardOp for SumBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        vec![self.a.requires_grad().then(|| broadcast_to(grad, self.a.shape()))]
    }

    fn name(&self) -> &'static str {
        "sum"
    }
}

/// Mean of every element, as a `[1, 1]` tensor
///
/// # Panics
///
/// Panics on an empty tensor.
pub fn mean(a: &Tensor) -> Tensor {
    assert!(!a.is_empty(), "mean() of an empty tensor");
    scale(&sum(a), 1.0 / a.len() as f32)
}

/// Per-row sum: `[N, D] -> [N, 1]`
pub fn sum_rows(a: &Tensor) -> Tensor {
    sum_to(a, (a.rows(), 1))
}
