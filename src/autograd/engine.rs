//! Graph traversal for gradient computation

use ndarray::Array2;
use std::collections::{HashMap, HashSet};

use super::context::GradModeGuard;
use super::ops::add;
use super::Tensor;

/// Gradients of a scalar `output` with respect to `inputs`.
///
/// With `create_graph = true` the returned tensors are recorded and can be
/// differentiated again; otherwise they are plain constants. Inputs that do not
/// influence `output` get a zero gradient of their own shape.
///
/// # Panics
///
/// Panics if `output` is not a single-element tensor.
pub fn grad(output: &Tensor, inputs: &[Tensor], create_graph: bool) -> Vec<Tensor> {
    assert_eq!(
        output.len(),
        1,
        "grad() needs a scalar output; reduce with sum() or mean() first"
    );
    grad_with(output, &Tensor::ones(1, 1, false), inputs, create_graph)
}

/// Vector-Jacobian product: gradients of `output` weighted by `grad_output`.
///
/// # Panics
///
/// Panics if `grad_output` does not match the shape of `output`.
pub fn grad_with(
    output: &Tensor,
    grad_output: &Tensor,
    inputs: &[Tensor],
    create_graph: bool,
) -> Vec<Tensor> {
    assert_eq!(
        output.shape(),
        grad_output.shape(),
        "grad_output shape must match output shape"
    );
    let _mode = GradModeGuard::set(create_graph);
    let (_, grads) = propagate(output, grad_output.clone());

    inputs
        .iter()
        .map(|input| {
            grads.get(&input.id()).cloned().unwrap_or_else(|| {
                let (rows, cols) = input.shape();
                Tensor::zeros(rows, cols, false)
            })
        })
        .collect()
}

/// Backpropagate from `output` and accumulate into every reachable leaf's
/// `.grad()`.
///
/// `grad_output` defaults to ones of the output's shape.
pub fn backward(output: &Tensor, grad_output: Option<Array2<f32>>) {
    let seed = grad_output.unwrap_or_else(|| Array2::ones(output.shape()));
    let _mode = GradModeGuard::set(false);
    let (order, grads) = propagate(output, Tensor::new(seed, false));

    for node in order.iter().filter(|t| t.is_leaf() && t.requires_grad()) {
        if let Some(g) = grads.get(&node.id()) {
            node.accumulate_grad(g.to_array());
        }
    }
}

/// Reverse-mode sweep. Returns the topological order and the gradient of
/// `output` with respect to every node in it.
fn propagate(output: &Tensor, seed: Tensor) -> (Vec<Tensor>, HashMap<usize, Tensor>) {
    let mut grads: HashMap<usize, Tensor> = HashMap::new();
    if !output.requires_grad() {
        return (Vec::new(), grads);
    }

    let order = topological_order(output);
    grads.insert(output.id(), seed);

    for node in order.iter().rev() {
        let Some(op) = node.backward_op() else {
            continue;
        };
        let Some(node_grad) = grads.get(&node.id()).cloned() else {
            continue;
        };

        let inputs = op.inputs();
        let input_grads = op.backward(&node_grad);
        debug_assert_eq!(inputs.len(), input_grads.len(), "{} returned wrong arity", op.name());

        for (input, input_grad) in inputs.into_iter().zip(input_grads) {
            let Some(input_grad) = input_grad else {
                continue;
            };
            if !input.requires_grad() {
                continue;
            }
            let total = match grads.remove(&input.id()) {
                Some(previous) => add(&previous, &input_grad),
                None => input_grad,
            };
            grads.insert(input.id(), total);
        }
    }

    (order, grads)
}

/// Post-order DFS over nodes that require gradients (inputs before outputs)
fn topological_order(root: &Tensor) -> Vec<Tensor> {
    let mut order = Vec::new();
    let mut visited = HashSet::new();
    let mut stack = vec![(root.clone(), false)];

    while let Some((node, expanded)) = stack.pop() {
        if expanded {
            order.push(node);
            continue;
        }
        if !visited.insert(node.id()) {
            continue;
        }
        let op = node.backward_op();
        stack.push((node, true));
        if let Some(op) = op {
            for input in op.inputs() {
                if input.requires_grad() && !visited.contains(&input.id()) {
                    stack.push((input, false));
                }
            }
        }
    }

    order
}
