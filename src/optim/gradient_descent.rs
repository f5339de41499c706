use crate::math::matrix::Matrix;

/// Plain gradient descent: no momentum, no adaptive scaling, no state.
#[derive(Debug, Default, Clone, Copy)]
pub struct GradientDescent;

impl GradientDescent {
    /// One in-place step: `p -= g * learning_rate` for weights and bias.
    ///
    /// The caller folds any batch averaging into `learning_rate`, so the
    /// gradients arrive unscaled.
    pub fn update(
        &self,
        weights: &mut Matrix,
        bias: &mut Matrix,
        weight_grads: &Matrix,
        bias_grads: &Matrix,
        learning_rate: f64,
    ) {
        *weights -= &(weight_grads * learning_rate);
        *bias -= &(bias_grads * learning_rate);
    }
}
