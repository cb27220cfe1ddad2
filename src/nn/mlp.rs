//! Multi-layer perceptron generator / critic

use rand::Rng;

use super::{Activation, Linear, Network};
use crate::autograd::Tensor;
use crate::config::NetworkSpec;

/// Stack of [`Linear`] layers with a shared hidden activation
#[derive(Debug, Clone)]
pub struct Mlp {
    name: String,
    layers: Vec<Linear>,
    hidden_activation: Activation,
    output_activation: Activation,
}

impl Mlp {
    /// Build from explicit layer widths `dims = [in, h1, .., out]`
    ///
    /// # Panics
    ///
    /// Panics if fewer than two widths are given.
    pub fn new<R: Rng>(
        name: impl Into<String>,
        dims: &[usize],
        hidden_activation: Activation,
        output_activation: Activation,
        rng: &mut R,
    ) -> Self {
        assert!(dims.len() >= 2, "an MLP needs input and output widths");
        let layers = dims.windows(2).map(|w| Linear::new(rng, w[0], w[1])).collect();
        Self::from_layers(name, layers, hidden_activation, output_activation)
    }

    /// Assemble from pre-built layers
    pub fn from_layers(
        name: impl Into<String>,
        layers: Vec<Linear>,
        hidden_activation: Activation,
        output_activation: Activation,
    ) -> Self {
        Self {
            name: name.into(),
            layers,
            hidden_activation,
            output_activation,
        }
    }

    /// Generator mapping `[N, latent_dim]` noise to `[N, sample_dim]` samples.
    ///
    /// Output activation defaults to `tanh`, matching data scaled to `[-1, 1]`.
    pub fn generator<R: Rng>(spec: &NetworkSpec, latent_dim: usize, sample_dim: usize, rng: &mut R) -> Self {
        let dims = Self::widths(spec, latent_dim, sample_dim);
        let output = spec.output_activation.unwrap_or(Activation::Tanh);
        Self::new("generator", &dims, spec.activation, output, rng)
    }

    /// Critic mapping `[N, sample_dim]` samples to `[N, 1]` unbounded scores
    pub fn discriminator<R: Rng>(spec: &NetworkSpec, sample_dim: usize, rng: &mut R) -> Self {
        let dims = Self::widths(spec, sample_dim, 1);
        Self::new("discriminator", &dims, spec.activation, Activation::Linear, rng)
    }

    /// Layer widths `[input, hidden.., output]` a spec produces
    pub fn widths(spec: &NetworkSpec, input: usize, output: usize) -> Vec<usize> {
        let mut dims = vec![input];
        dims.extend(std::iter::repeat(spec.channels).take(spec.layers));
        if spec.dense {
            dims.push(spec.channels * 4);
        }
        dims.push(output);
        dims
    }

    pub fn layers(&self) -> &[Linear] {
        &self.layers
    }

    pub fn input_dim(&self) -> usize {
        self.layers.first().map_or(0, Linear::in_features)
    }

    pub fn output_dim(&self) -> usize {
        self.layers.last().map_or(0, Linear::out_features)
    }
}

impl Network for Mlp {
    fn forward(&self, input: &Tensor) -> Tensor {
        let last = self.layers.len().saturating_sub(1);
        self.layers.iter().enumerate().fold(input.clone(), |x, (i, layer)| {
            let y = layer.forward(&x);
            if i == last {
                self.output_activation.apply(&y)
            } else {
                self.hidden_activation.apply(&y)
            }
        })
    }

    fn trainable_parameters(&self) -> Vec<Tensor> {
        self.layers.iter().flat_map(Linear::parameters).collect()
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spec(layers: usize, dense: bool) -> NetworkSpec {
        NetworkSpec {
            channels: 8,
            layers,
            dense,
            ..NetworkSpec::default()
        }
    }

    #[test]
    fn test_generator_shapes() {
        let mut rng = StdRng::seed_from_u64(0);
        let g = Mlp::generator(&spec(2, false), 4, 2, &mut rng);
        assert_eq!(g.layers().len(), 3);
        assert_eq!(g.input_dim(), 4);
        assert_eq!(g.output_dim(), 2);

        let out = g.forward(&Tensor::zeros(5, 4, false));
        assert_eq!(out.shape(), (5, 2));
    }

    #[test]
    fn test_generator_output_bounded_by_tanh() {
        let mut rng = StdRng::seed_from_u64(1);
        let g = Mlp::generator(&spec(1, false), 3, 2, &mut rng);
        let z = Tensor::new(crate::nn::latent_noise(&mut rng, 16, 3) * 50.0, false);
        assert!(g.forward(&z).data().iter().all(|v| v.abs() <= 1.0));
    }

    #[test]
    fn test_dense_adds_projection_layer() {
        let mut rng = StdRng::seed_from_u64(2);
        let d = Mlp::discriminator(&spec(1, true), 2, &mut rng);
        let widths: Vec<usize> = d.layers().iter().map(Linear::out_features).collect();
        assert_eq!(widths, vec![8, 32, 1]);
        assert_eq!(d.trainable_parameters().len(), 6);
        assert_eq!(d.parameter_count(), 2 * 8 + 8 + 8 * 32 + 32 + 32 + 1);
    }

    #[test]
    fn test_zero_hidden_layers_is_linear_model() {
        let mut rng = StdRng::seed_from_u64(3);
        let d = Mlp::discriminator(&spec(0, false), 3, &mut rng);
        assert_eq!(d.layers().len(), 1);
        assert_eq!(d.forward(&Tensor::zeros(2, 3, false)).shape(), (2, 1));
    }

    #[test]
    fn test_same_seed_same_weights() {
        let a = Mlp::discriminator(&spec(2, false), 2, &mut StdRng::seed_from_u64(9));
        let b = Mlp::discriminator(&spec(2, false), 2, &mut StdRng::seed_from_u64(9));
        for (pa, pb) in a.trainable_parameters().iter().zip(b.trainable_parameters()) {
            assert_eq!(*pa.data(), *pb.data());
        }
    }
}
