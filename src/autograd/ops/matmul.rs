//! Matrix product and transpose

use std::rc::Rc;

use super::record;
use crate::autograd::{BackwardOp, Tensor};

/// Matrix product `[n, k] x [k, m] -> [n, m]`
///
/// # Panics
///
/// Panics if the inner dimensions differ.
pub fn matmul(a: &Tensor, b: &Tensor) -> Tensor {
    let (n, k) = a.shape();
    let (k2, m) = b.shape();
    assert_eq!(k, k2, "matmul: [{n}, {k}] x [{k2}, {m}] inner dimensions differ");
    let data = a.data().dot(&*b.data());
    record(data, &[a, b], || Rc::new(MatmulBackward { a: a.clone(), b: b.clone() }))
}

struct MatmulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MatmulBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        // dA = G·Bᵀ, dB = Aᵀ·G
        vec![
            self.a.requires_grad().then(|| matmul(grad, &transpose(&self.b))),
            self.b.requires_grad().then(|| matmul(&transpose(&self.a), grad)),
        ]
    }

    fn name(&self) -> &'static str {
        "matmul"
    }
}

/// Transpose `[n, m] -> [m, n]`
pub fn transpose(a: &Tensor) -> Tensor {
    let data = a.data().t().to_owned();
    record(data, &[a], || Rc::new(TransposeBackward { a: a.clone() }))
}

struct TransposeBackward {
    a: Tensor,
}

impl BackwardOp for TransposeBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        vec![self.a.requires_grad().then(|| transpose(grad))]
    }

    fn name(&self) -> &'static str {
        "transpose"
    }
}
