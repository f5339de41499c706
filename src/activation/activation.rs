use serde::{Serialize, Deserialize};

use crate::math::matrix::Matrix;

/// Exponent magnitude past which the elementwise nonlinearities are treated
/// as saturated: below `-MAX_EXP` (half that for Tanh, whose exponent is
/// doubled) both the output and the local derivative are forced to zero
/// instead of evaluating `exp`.
pub const MAX_EXP: f64 = 50.0;

/// Elementwise nonlinearity. The variant set is closed and small, so a
/// tagged enum replaces any open-ended trait-object dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Sigmoid,
    Tanh,
    ReLU,
}

impl Activation {
    /// Applies the nonlinearity to every element of `inputs`, producing the
    /// activated output and the local derivative together in one pass so
    /// the exponential is never evaluated twice.
    ///
    /// The derivative matrix has the same shape as the output; the backward
    /// pass consumes it directly, so there is no cached state to go stale.
    pub fn forward(&self, inputs: &Matrix) -> (Matrix, Matrix) {
        let mut outputs = Matrix::zeros(inputs.nrow, inputs.ncol);
        let mut grads = Matrix::zeros(inputs.nrow, inputs.ncol);
        for i in 0..inputs.nrow {
            for j in 0..inputs.ncol {
                let (y, dy) = self.apply(inputs[(i, j)]);
                outputs[(i, j)] = y;
                grads[(i, j)] = dy;
            }
        }
        (outputs, grads)
    }

    /// `(output, derivative)` for a single element.
    fn apply(&self, x: f64) -> (f64, f64) {
        match self {
            Activation::Sigmoid => {
                if x < -MAX_EXP {
                    (0.0, 0.0)
                } else {
                    let e = (-x).exp();
                    let t = 1.0 + e;
                    (1.0 / t, e / (t * t))
                }
            }
            Activation::Tanh => {
                // exp(-2x), so the saturation bound is half of MAX_EXP.
                if x < -(MAX_EXP / 2.0) {
                    (0.0, 0.0)
                } else {
                    let e = (-2.0 * x).exp();
                    let t = 1.0 + e;
                    (2.0 / t - 1.0, 4.0 * e / (t * t))
                }
            }
            // Derivative is 0 at exactly zero.
            Activation::ReLU => {
                if x <= 0.0 {
                    (0.0, 0.0)
                } else {
                    (x, 1.0)
                }
            }
        }
    }
}
