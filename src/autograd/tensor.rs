//! Shared, gradient-tracking tensor
//!
//! Every tensor is a 2-D `f32` array: batches are `[rows, features]`, scalars
//! are `[1, 1]`. Clones share storage, so a parameter handed out by a network
//! and the same parameter inside a recorded graph are the same node.

use ndarray::Array2;
use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::BackwardOp;

static NEXT_ID: AtomicUsize = AtomicUsize::new(0);

struct Node {
    id: usize,
    data: RefCell<Array2<f32>>,
    grad: RefCell<Option<Array2<f32>>>,
    requires_grad: bool,
    backward_op: Option<Rc<dyn BackwardOp>>,
}

/// Tensor with optional gradient tracking
#[derive(Clone)]
pub struct Tensor {
    node: Rc<Node>,
}

impl Tensor {
    /// Create a leaf tensor
    pub fn new(data: Array2<f32>, requires_grad: bool) -> Self {
        Self::build(data, requires_grad, None)
    }

    /// Create a tensor from row-major values
    ///
    /// # Panics
    ///
    /// Panics if `values.len() != rows * cols`.
    pub fn from_vec(rows: usize, cols: usize, values: Vec<f32>, requires_grad: bool) -> Self {
        assert_eq!(
            values.len(),
            rows * cols,
            "Tensor::from_vec: {} values cannot fill a [{rows}, {cols}] tensor",
            values.len()
        );
        let data = Array2::from_shape_vec((rows, cols), values)
            .expect("length checked against the requested shape");
        Self::new(data, requires_grad)
    }

    /// Constant `[1, 1]` tensor
    pub fn scalar(value: f32) -> Self {
        Self::new(Array2::from_elem((1, 1), value), false)
    }

    /// Tensor filled with zeros
    pub fn zeros(rows: usize, cols: usize, requires_grad: bool) -> Self {
        Self::new(Array2::zeros((rows, cols)), requires_grad)
    }

    /// Tensor filled with ones
    pub fn ones(rows: usize, cols: usize, requires_grad: bool) -> Self {
        Self::new(Array2::ones((rows, cols)), requires_grad)
    }

    /// Output of a recorded op
    pub(crate) fn from_op(data: Array2<f32>, op: Rc<dyn BackwardOp>) -> Self {
        Self::build(data, true, Some(op))
    }

    fn build(data: Array2<f32>, requires_grad: bool, backward_op: Option<Rc<dyn BackwardOp>>) -> Self {
        Self {
            node: Rc::new(Node {
                id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
                data: RefCell::new(data),
                grad: RefCell::new(None),
                requires_grad,
                backward_op,
            }),
        }
    }

    /// Unique node id
    pub fn id(&self) -> usize {
        self.node.id
    }

    /// Borrow the data
    pub fn data(&self) -> Ref<'_, Array2<f32>> {
        self.node.data.borrow()
    }

    /// Mutably borrow the data (optimizer updates, weight clipping)
    pub fn data_mut(&self) -> RefMut<'_, Array2<f32>> {
        self.node.data.borrow_mut()
    }

    /// Owned copy of the data
    pub fn to_array(&self) -> Array2<f32> {
        self.node.data.borrow().clone()
    }

    /// `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        self.node.data.borrow().dim()
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.shape().0
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.shape().1
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.node.data.borrow().len()
    }

    /// Whether the tensor holds no elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value of a single-element tensor
    ///
    /// # Panics
    ///
    /// Panics if the tensor has more than one element.
    pub fn item(&self) -> f32 {
        let data = self.node.data.borrow();
        assert_eq!(data.len(), 1, "item() called on a tensor with {} elements", data.len());
        data[[0, 0]]
    }

    /// Whether gradients flow to this tensor
    pub fn requires_grad(&self) -> bool {
        self.node.requires_grad
    }

    /// Whether this tensor was created directly rather than by an op
    pub fn is_leaf(&self) -> bool {
        self.node.backward_op.is_none()
    }

    /// The op that produced this tensor, if recorded
    pub fn backward_op(&self) -> Option<Rc<dyn BackwardOp>> {
        self.node.backward_op.clone()
    }

    /// Accumulated gradient (populated by [`crate::autograd::backward`])
    pub fn grad(&self) -> Option<Array2<f32>> {
        self.node.grad.borrow().clone()
    }

    /// Overwrite the accumulated gradient
    pub fn set_grad(&self, grad: Array2<f32>) {
        *self.node.grad.borrow_mut() = Some(grad);
    }

    /// Add into the accumulated gradient
    pub fn accumulate_grad(&self, grad: Array2<f32>) {
        let mut slot = self.node.grad.borrow_mut();
        match slot.as_mut() {
            Some(existing) => *existing += &grad,
            None => *slot = Some(grad),
        }
    }

    /// Clear the accumulated gradient
    pub fn zero_grad(&self) {
        *self.node.grad.borrow_mut() = None;
    }

    /// New leaf holding a copy of the data, cut from the graph
    pub fn detach(&self) -> Self {
        Self::new(self.to_array(), false)
    }

    /// Whether every element is finite
    pub fn is_finite(&self) -> bool {
        self.node.data.borrow().iter().all(|v| v.is_finite())
    }
}

impl fmt::Debug for Tensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tensor")
            .field("id", &self.node.id)
            .field("shape", &self.shape())
            .field("requires_grad", &self.node.requires_grad)
            .field("op", &self.node.backward_op.as_ref().map(|op| op.name()))
            .finish()
    }
}
