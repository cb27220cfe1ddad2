//! Optimizer trait

use ndarray::Array2;

use crate::autograd::Tensor;

/// Trait for optimization algorithms
///
/// Gradients are passed explicitly rather than read from the parameters'
/// accumulated `.grad()`, so a step only ever touches the network it was
/// handed. Parameter order must be stable across calls: moment buffers are
/// matched to parameters by position.
pub trait Optimizer {
    /// Perform a single optimization step
    ///
    /// # Panics
    ///
    /// Panics if `params` and `grads` differ in length or shape.
    fn step(&mut self, params: &[Tensor], grads: &[Array2<f32>]);

    /// Get learning rate
    fn lr(&self) -> f32;

    /// Set learning rate
    fn set_lr(&mut self, lr: f32);

    /// Number of steps taken
    fn step_count(&self) -> u64;
}

/// Shared shape checks for `step` implementations
pub(crate) fn check_step_inputs(params: &[Tensor], grads: &[Array2<f32>]) {
    assert_eq!(
        params.len(),
        grads.len(),
        "optimizer got {} parameters but {} gradients",
        params.len(),
        grads.len()
    );
    for (i, (p, g)) in params.iter().zip(grads).enumerate() {
        assert_eq!(p.shape(), g.dim(), "gradient {i} does not match its parameter's shape");
    }
}

/// Lazily allocate one zeroed buffer per parameter
pub(crate) fn ensure_buffers(buffers: &mut Vec<Array2<f32>>, params: &[Tensor]) {
    if buffers.is_empty() {
        *buffers = params.iter().map(|p| Array2::zeros(p.shape())).collect();
    }
    assert_eq!(
        buffers.len(),
        params.len(),
        "optimizer state was built for {} parameters, got {}",
        buffers.len(),
        params.len()
    );
}
