//! Backward operation trait

use super::Tensor;

/// A recorded operation that knows how to map an output gradient to input
/// gradients.
///
/// Implementations must build the returned gradients with the differentiable
/// ops in `crate::autograd`, never with raw array arithmetic on the output
/// gradient. The engine decides whether those ops are recorded (second-order
/// gradients) or not by toggling the gradient mode around the call.
pub trait BackwardOp {
    /// Inputs of the forward op, in a fixed order
    fn inputs(&self) -> Vec<Tensor>;

    /// Gradients for each input, in `inputs()` order.
    ///
    /// `None` means the input does not require a gradient.
    fn backward(&self, grad_output: &Tensor) -> Vec<Option<Tensor>>;

    /// Operation name for debugging
    fn name(&self) -> &'static str;
}
