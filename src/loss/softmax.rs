use crate::math::error::MatrixError;
use crate::math::matrix::Matrix;

/// Small epsilon added inside log() to keep a zero probability finite.
const EPS: f64 = 1e-10;

/// Softmax over a logit column vector followed by cross-entropy against an
/// integer class label. The two are fused because their combined gradient
/// collapses to `probabilities - one_hot(label)`.
pub struct SoftmaxCrossEntropy;

/// Everything one loss evaluation produces.
#[derive(Debug, Clone)]
pub struct LossOutput {
    /// Argmax class of the probability vector; ties keep the lowest index,
    /// the same rule as `Matrix::max_index`.
    pub predicted: usize,
    /// `-ln(p[label] + eps)`.
    pub loss: f64,
    /// Gradient of the combined softmax + cross-entropy w.r.t. the logits:
    /// the probability vector with `p[label] -= 1`.
    pub grads: Matrix,
}

impl SoftmaxCrossEntropy {
    /// Evaluates the loss for one sample.
    ///
    /// `logits` must be a column vector and `label` must index into it.
    /// The maximum logit is subtracted before exponentiating so the
    /// largest exponent is exactly zero and `exp` cannot overflow.
    pub fn forward(&self, logits: &Matrix, label: usize) -> Result<LossOutput, MatrixError> {
        if logits.ncol != 1 {
            return Err(MatrixError::ShapeMismatch {
                left_rows: logits.nrow,
                left_cols: logits.ncol,
                right_rows: logits.nrow,
                right_cols: 1,
            });
        }
        let logits_max = logits.max_element()?;

        let mut exps = Matrix::zeros(logits.nrow, 1);
        for i in 0..logits.nrow {
            exps[(i, 0)] = (logits[(i, 0)] - logits_max).exp();
        }
        let mut sum = 0.0;
        for i in 0..exps.nrow {
            sum += exps[(i, 0)];
        }
        // sum >= 1: the max logit contributes exp(0).
        exps /= sum;

        let loss = -(exps[(label, 0)] + EPS).ln();
        let (predicted, _) = exps.max_index()?;

        let mut grads = exps;
        grads[(label, 0)] -= 1.0;

        Ok(LossOutput {
            predicted,
            loss,
            grads,
        })
    }
}
