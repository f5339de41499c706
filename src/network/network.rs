use crate::activation::activation::Activation;
use crate::layers::dense::DenseLayer;
use crate::math::error::MatrixError;
use crate::math::matrix::Matrix;

/// A linear stack of dense layers; no branching topology.
#[derive(Debug)]
pub struct Network {
    pub layers: Vec<DenseLayer>,
}

/// Everything one forward pass records, laid out for the backward pass.
///
/// `activations[0]` is the network input; `activations[i + 1]` is layer
/// `i`'s post-activation output and `local_grads[i]` its activation
/// derivative. Returning this trace instead of caching it inside the
/// layers makes "forward happened" explicit in the data flow.
#[derive(Debug)]
pub struct ForwardTrace {
    pub activations: Vec<Matrix>,
    pub local_grads: Vec<Matrix>,
}

impl ForwardTrace {
    /// Output of the final layer's activation.
    pub fn output(&self) -> &Matrix {
        &self.activations[self.activations.len() - 1]
    }
}

impl Network {
    /// Builds a stack from `(size, input_size, activation)` tuples, weights
    /// and biases zero-initialized.
    pub fn new(layer_specs: Vec<(usize, usize, Activation)>) -> Network {
        let layers = layer_specs
            .into_iter()
            .map(|(size, input_size, activation)| DenseLayer::new(input_size, size, activation))
            .collect();
        Network { layers }
    }

    /// Same, drawing every initial weight and bias from `generator`.
    pub fn with_generator<F>(layer_specs: Vec<(usize, usize, Activation)>, mut generator: F) -> Network
    where
        F: FnMut() -> f64,
    {
        let layers = layer_specs
            .into_iter()
            .map(|(size, input_size, activation)| {
                DenseLayer::with_generator(input_size, size, activation, &mut generator)
            })
            .collect();
        Network { layers }
    }

    /// Runs `input` through every layer and activation in sequence,
    /// recording the per-layer outputs and local gradients the backward
    /// pass needs.
    pub fn forward(&self, input: &Matrix) -> Result<ForwardTrace, MatrixError> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        let mut local_grads = Vec::with_capacity(self.layers.len());
        activations.push(input.clone());
        for layer in &self.layers {
            let z = layer.forward(&activations[activations.len() - 1])?;
            let (a, g) = layer.activation.forward(&z);
            activations.push(a);
            local_grads.push(g);
        }
        Ok(ForwardTrace {
            activations,
            local_grads,
        })
    }

    /// Argmax class for one input; forward only.
    pub fn predict(&self, input: &Matrix) -> Result<usize, MatrixError> {
        let trace = self.forward(input)?;
        let (row, _) = trace.output().max_index()?;
        Ok(row)
    }
}
