//! Fully connected layer

use ndarray::Array2;
use rand::Rng;

use super::init::glorot_normal;
use crate::autograd::{add, matmul, Tensor};

/// `y = x·W + b` with `W: [in, out]`, `b: [1, out]`
#[derive(Debug, Clone)]
pub struct Linear {
    weight: Tensor,
    bias: Tensor,
}

impl Linear {
    /// Glorot-normal weights, zero bias
    pub fn new<R: Rng>(rng: &mut R, in_features: usize, out_features: usize) -> Self {
        Self::from_arrays(
            glorot_normal(rng, in_features, out_features),
            Array2::zeros((1, out_features)),
        )
    }

    /// Layer with given weights
    ///
    /// # Panics
    ///
    /// Panics if `bias` is not `[1, out_features]`.
    pub fn from_arrays(weight: Array2<f32>, bias: Array2<f32>) -> Self {
        assert_eq!(
            bias.dim(),
            (1, weight.ncols()),
            "bias must be [1, {}]",
            weight.ncols()
        );
        Self {
            weight: Tensor::new(weight, true),
            bias: Tensor::new(bias, true),
        }
    }

    pub fn in_features(&self) -> usize {
        self.weight.rows()
    }

    pub fn out_features(&self) -> usize {
        self.weight.cols()
    }

    pub fn weight(&self) -> &Tensor {
        &self.weight
    }

    pub fn bias(&self) -> &Tensor {
        &self.bias
    }

    pub fn forward(&self, input: &Tensor) -> Tensor {
        add(&matmul(input, &self.weight), &self.bias)
    }

    /// `[weight, bias]`
    pub fn parameters(&self) -> Vec<Tensor> {
        vec![self.weight.clone(), self.bias.clone()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autograd::{backward, sum};
    use ndarray::arr2;

    #[test]
    fn test_linear_forward() {
        let layer = Linear::from_arrays(arr2(&[[1.0, 0.0], [0.0, 2.0]]), arr2(&[[0.5, -0.5]]));
        let x = Tensor::new(arr2(&[[1.0, 1.0], [2.0, 3.0]]), false);
        assert_eq!(*layer.forward(&x).data(), arr2(&[[1.5, 1.5], [2.5, 5.5]]));
    }

    #[test]
    fn test_linear_gradients_reach_parameters() {
        let layer = Linear::from_arrays(arr2(&[[1.0], [1.0]]), arr2(&[[0.0]]));
        let x = Tensor::new(arr2(&[[1.0, 2.0], [3.0, 4.0]]), false);
        backward(&sum(&layer.forward(&x)), None);

        assert_eq!(layer.weight().grad(), Some(arr2(&[[4.0], [6.0]])));
        assert_eq!(layer.bias().grad(), Some(arr2(&[[2.0]])));
    }

    #[test]
    #[should_panic(expected = "bias must be")]
    fn test_linear_rejects_bad_bias() {
        let _ = Linear::from_arrays(Array2::zeros((2, 3)), Array2::zeros((1, 2)));
    }
}
