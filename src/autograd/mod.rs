//! Reverse-mode autograd engine
//!
//! Tensors share their storage through `Rc`, every differentiable op records a
//! [`BackwardOp`] on its output, and [`grad`] / [`backward`] walk the recorded
//! graph in reverse topological order.
//!
//! Backward rules are themselves written with the differentiable ops
//! exported here, so when a gradient is requested with `create_graph = true` the
//! returned gradient tensors carry their own graph and can be differentiated
//! again. This is what the WGAN-GP penalty needs: the norm of
//! `∂critic(x̂)/∂x̂` is part of the critic loss, so the critic weights receive
//! gradients through the first backward pass.
//!
//! ```
//! use gan_train::autograd::{grad, mul, sum, Tensor};
//!
//! let x = Tensor::from_vec(1, 1, vec![3.0], true);
//! let y = sum(&mul(&mul(&x, &x), &x)); // x³
//!
//! let dy = grad(&y, &[x.clone()], true).remove(0); // 3x² = 27
//! assert_eq!(dy.item(), 27.0);
//!
//! let d2y = grad(&sum(&dy), &[x], false).remove(0); // 6x = 18
//! assert_eq!(d2y.item(), 18.0);
//! ```

mod backward;
mod context;
mod engine;
mod ops;
mod tensor;

#[cfg(test)]
mod tests;

pub use backward::BackwardOp;
pub use context::{is_grad_enabled, no_grad, NoGradGuard};
pub(crate) use context::GradModeGuard;
pub use engine::{backward, grad, grad_with};
pub use ops::*;
pub use tensor::Tensor;
