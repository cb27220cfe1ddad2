//! Element-wise arithmetic with row/column broadcasting

use ndarray::{Array2, Axis, Zip};
use std::rc::Rc;

use super::record;
use crate::autograd::{BackwardOp, Tensor};

/// Broadcast shape of two 2-D shapes (each dim equal, or one of them 1)
pub(crate) fn broadcast_shape(a: (usize, usize), b: (usize, usize)) -> (usize, usize) {
    let dim = |x: usize, y: usize| {
        if x == y || y == 1 {
            x
        } else if x == 1 {
            y
        } else {
            panic!("shapes {a:?} and {b:?} cannot be broadcast together")
        }
    };
    (dim(a.0, b.0), dim(a.1, b.1))
}

fn zip_broadcast(a: &Array2<f32>, b: &Array2<f32>, f: impl Fn(f32, f32) -> f32) -> Array2<f32> {
    let shape = broadcast_shape(a.dim(), b.dim());
    let av = a.broadcast(shape).expect("shape compatible by broadcast_shape");
    let bv = b.broadcast(shape).expect("shape compatible by broadcast_shape");
    Zip::from(&av).and(&bv).map_collect(|&x, &y| f(x, y))
}

/// Element-wise sum
pub fn add(a: &Tensor, b: &Tensor) -> Tensor {
    let data = zip_broadcast(&a.data(), &b.data(), |x, y| x + y);
    record(data, &[a, b], || Rc::new(AddBackward { a: a.clone(), b: b.clone() }))
}

struct AddBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for AddBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        vec![
            self.a.requires_grad().then(|| sum_to(grad, self.a.shape())),
            self.b.requires_grad().then(|| sum_to(grad, self.b.shape())),
        ]
    }

    fn name(&self) -> &'static str {
        "add"
    }
}

/// Element-wise difference `a - b`
pub fn sub(a: &Tensor, b: &Tensor) -> Tensor {
    let data = zip_broadcast(&a.data(), &b.data(), |x, y| x - y);
    record(data, &[a, b], || Rc::new(SubBackward { a: a.clone(), b: b.clone() }))
}

struct SubBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for SubBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        vec![
            self.a.requires_grad().then(|| sum_to(grad, self.a.shape())),
            self.b.requires_grad().then(|| sum_to(&neg(grad), self.b.shape())),
        ]
    }

    fn name(&self) -> &'static str {
        "sub"
    }
}

/// Element-wise product
pub fn mul(a: &Tensor, b: &Tensor) -> Tensor {
    let data = zip_broadcast(&a.data(), &b.data(), |x, y| x * y);
    record(data, &[a, b], || Rc::new(MulBackward { a: a.clone(), b: b.clone() }))
}

struct MulBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for MulBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        // ∂(ab)/∂a = b, ∂(ab)/∂b = a
        vec![
            self.a.requires_grad().then(|| sum_to(&mul(grad, &self.b), self.a.shape())),
            self.b.requires_grad().then(|| sum_to(&mul(grad, &self.a), self.b.shape())),
        ]
    }

    fn name(&self) -> &'static str {
        "mul"
    }
}

/// Element-wise quotient `a / b`
pub fn div(a: &Tensor, b: &Tensor) -> Tensor {
    let data = zip_broadcast(&a.data(), &b.data(), |x, y| x / y);
    record(data, &[a, b], || Rc::new(DivBackward { a: a.clone(), b: b.clone() }))
}

struct DivBackward {
    a: Tensor,
    b: Tensor,
}

impl BackwardOp for DivBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone(), self.b.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        // ∂(a/b)/∂a = 1/b, ∂(a/b)/∂b = -a/b²
        let grad_a = self.a.requires_grad().then(|| sum_to(&div(grad, &self.b), self.a.shape()));
        let grad_b = self.b.requires_grad().then(|| {
            let numerator = mul(grad, &self.a);
            sum_to(&neg(&div(&numerator, &square(&self.b))), self.b.shape())
        });
        vec![grad_a, grad_b]
    }

    fn name(&self) -> &'static str {
        "div"
    }
}

/// Negation
pub fn neg(a: &Tensor) -> Tensor {
    scale(a, -1.0)
}

/// Multiply by a constant
pub fn scale(a: &Tensor, factor: f32) -> Tensor {
    let data = a.data().mapv(|x| x * factor);
    record(data, &[a], || Rc::new(ScaleBackward { a: a.clone(), factor }))
}

struct ScaleBackward {
    a: Tensor,
    factor: f32,
}

impl BackwardOp for ScaleBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        vec![self.a.requires_grad().then(|| scale(grad, self.factor))]
    }

    fn name(&self) -> &'static str {
        "scale"
    }
}

/// Add a constant
pub fn add_scalar(a: &Tensor, value: f32) -> Tensor {
    let data = a.data().mapv(|x| x + value);
    record(data, &[a], || Rc::new(AddScalarBackward { a: a.clone() }))
}

struct AddScalarBackward {
    a: Tensor,
}

impl BackwardOp for AddScalarBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        vec![self.a.requires_grad().then(|| grad.clone())]
    }

    fn name(&self) -> &'static str {
        "add_scalar"
    }
}

/// Element-wise square
pub fn square(a: &Tensor) -> Tensor {
    mul(a, a)
}

/// Sum `a` down to `shape` by reducing the broadcast axes.
///
/// This is the adjoint of [`broadcast_to`].
///
/// # Panics
///
/// Panics if `shape` is not a broadcast source of `a`'s shape.
pub fn sum_to(a: &Tensor, shape: (usize, usize)) -> Tensor {
    let from = a.shape();
    if from == shape {
        return a.clone();
    }
    assert_eq!(
        broadcast_shape(from, shape),
        from,
        "sum_to: cannot reduce {from:?} to {shape:?}"
    );

    let mut data = a.to_array();
    if shape.0 == 1 && from.0 != 1 {
        data = data.sum_axis(Axis(0)).insert_axis(Axis(0));
    }
    if shape.1 == 1 && from.1 != 1 {
        data = data.sum_axis(Axis(1)).insert_axis(Axis(1));
    }
    record(data, &[a], || Rc::new(SumToBackward { a: a.clone() }))
}

struct SumToBackward {
    a: Tensor,
}

impl BackwardOp for SumToBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        vec![self.a.requires_grad().then(|| broadcast_to(grad, self.a.shape()))]
    }

    fn name(&self) -> &'static str {
        "sum_to"
    }
}

/// Repeat `a` along its unit axes to reach `shape`
///
/// # Panics
///
/// Panics if `a` cannot be broadcast to `shape`.
pub fn broadcast_to(a: &Tensor, shape: (usize, usize)) -> Tensor {
    let from = a.shape();
    if from == shape {
        return a.clone();
    }
    let data = a
        .data()
        .broadcast(shape)
        .unwrap_or_else(|| panic!("broadcast_to: cannot broadcast {from:?} to {shape:?}"))
        .to_owned();
    record(data, &[a], || Rc::new(BroadcastBackward { a: a.clone() }))
}

struct BroadcastBackward {
    a: Tensor,
}

impl BackwardOp for BroadcastBackward {
    fn inputs(&self) -> Vec<Tensor> {
        vec![self.a.clone()]
    }

    fn backward(&self, grad: &Tensor) -> Vec<Option<Tensor>> {
        vec![self.a.requires_grad().then(|| sum_to(grad, self.a.shape()))]
    }

    fn name(&self) -> &'static str {
        "broadcast_to"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::arr2;

    #[test]
    fn test_broadcast_shape() {
        assert_eq!(broadcast_shape((4, 3), (1, 3)), (4, 3));
        assert_eq!(broadcast_shape((4, 1), (4, 3)), (4, 3));
        assert_eq!(broadcast_shape((1, 1), (2, 5)), (2, 5));
    }

    #[test]
    #[should_panic(expected = "cannot be broadcast")]
    fn test_broadcast_shape_mismatch() {
        broadcast_shape((2, 3), (3, 2));
    }

    #[test]
    fn test_add_row_broadcast() {
        let a = Tensor::new(arr2(&[[1.0, 2.0], [3.0, 4.0]]), false);
        let b = Tensor::new(arr2(&[[10.0, 20.0]]), false);
        assert_eq!(*add(&a, &b).data(), arr2(&[[11.0, 22.0], [13.0, 24.0]]));
    }

    #[test]
    fn test_sum_to_rows_and_cols() {
        let a = Tensor::new(arr2(&[[1.0, 2.0], [3.0, 4.0]]), false);
        assert_eq!(*sum_to(&a, (1, 2)).data(), arr2(&[[4.0, 6.0]]));
        assert_eq!(*sum_to(&a, (2, 1)).data(), arr2(&[[3.0], [7.0]]));
        assert_eq!(*sum_to(&a, (1, 1)).data(), arr2(&[[10.0]]));
    }

    #[test]
    fn test_ops_without_grad_record_nothing() {
        let a = Tensor::ones(2, 2, false);
        let b = Tensor::ones(2, 2, false);
        let c = mul(&a, &b);
        assert!(c.is_leaf());
        assert!(!c.requires_grad());
    }

    #[test]
    fn test_div_values() {
        let a = Tensor::new(arr2(&[[1.0, 6.0]]), false);
        let b = Tensor::new(arr2(&[[2.0, 3.0]]), false);
        assert_eq!(*div(&a, &b).data(), arr2(&[[0.5, 2.0]]));
    }
}
