use crate::activation::activation::Activation;
use crate::math::error::MatrixError;
use crate::math::matrix::Matrix;

/// One fully connected layer: an affine transform plus the nonlinearity
/// applied to it.
///
/// `weights` is `n_neurons × last_n_neurons`, `bias` is `n_neurons × 1`.
/// Inputs and outputs are column vectors; the network processes one sample
/// at a time.
#[derive(Debug, Clone)]
pub struct DenseLayer {
    pub last_n_neurons: usize,
    pub n_neurons: usize,
    pub weights: Matrix,
    pub bias: Matrix,
    pub activation: Activation,
}

impl DenseLayer {
    /// Zero-initialized weights and bias.
    pub fn new(last_n_neurons: usize, n_neurons: usize, activation: Activation) -> DenseLayer {
        DenseLayer {
            last_n_neurons,
            n_neurons,
            weights: Matrix::zeros(n_neurons, last_n_neurons),
            bias: Matrix::zeros(n_neurons, 1),
            activation,
        }
    }

    /// Weights and bias drawn element by element from `generator`.
    pub fn with_generator<F>(
        last_n_neurons: usize,
        n_neurons: usize,
        activation: Activation,
        mut generator: F,
    ) -> DenseLayer
    where
        F: FnMut() -> f64,
    {
        DenseLayer {
            last_n_neurons,
            n_neurons,
            weights: Matrix::with_generator(n_neurons, last_n_neurons, &mut generator),
            bias: Matrix::with_generator(n_neurons, 1, &mut generator),
            activation,
        }
    }

    /// Builds a layer around explicit parameter matrices.
    pub fn from_parts(weights: Matrix, bias: Matrix, activation: Activation) -> DenseLayer {
        assert_eq!(
            bias.nrow, weights.nrow,
            "bias has {} rows but weights have {}",
            bias.nrow, weights.nrow
        );
        assert_eq!(bias.ncol, 1, "bias must be a column vector");
        DenseLayer {
            last_n_neurons: weights.ncol,
            n_neurons: weights.nrow,
            weights,
            bias,
            activation,
        }
    }

    /// Pre-activation output `z = W·x + b` for one column-vector input.
    ///
    /// Requires `input.ncol == 1` and `input.nrow == weights.ncol`.
    pub fn forward(&self, input: &Matrix) -> Result<Matrix, MatrixError> {
        if input.ncol != 1 || input.nrow != self.weights.ncol {
            return Err(MatrixError::ShapeMismatch {
                left_rows: self.weights.nrow,
                left_cols: self.weights.ncol,
                right_rows: input.nrow,
                right_cols: input.ncol,
            });
        }
        Ok(self.weights.dot(input)? + &self.bias)
    }

    /// Chain-rule delta for this layer's pre-activation output.
    ///
    /// `downstream_weights` and `downstream_grad` belong to the layer this
    /// one feeds into. When the layer feeds the loss directly, pass
    /// [`Matrix::empty`] as the weights and the loss gradient as
    /// `downstream_grad`:
    ///
    /// - sentinel: `delta = downstream_grad ⊙ activation_grad`
    /// - otherwise: `delta = downstream_weightsᵀ · downstream_grad ⊙ activation_grad`
    pub fn backward(
        &self,
        downstream_weights: &Matrix,
        downstream_grad: &Matrix,
        activation_grad: &Matrix,
    ) -> Result<Matrix, MatrixError> {
        if downstream_weights.is_empty() {
            Ok(downstream_grad * activation_grad)
        } else {
            Ok(downstream_weights.t().dot(downstream_grad)? * activation_grad)
        }
    }
}
