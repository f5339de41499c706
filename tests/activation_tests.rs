// Activation functions: values, local derivatives, and saturation clipping.

use approx::assert_relative_eq;

use lodestone_nn::{Activation, Matrix};

fn single(activation: Activation, x: f64) -> (f64, f64) {
    let (out, grad) = activation.forward(&Matrix::column_vector(vec![x]));
    (out[(0, 0)], grad[(0, 0)])
}

#[test]
fn sigmoid_matches_closed_form() {
    let (out, grad) = single(Activation::Sigmoid, 0.0);
    assert_relative_eq!(out, 0.5, epsilon = 1e-12);
    assert_relative_eq!(grad, 0.25, epsilon = 1e-12);

    let x: f64 = 2.0;
    let s = 1.0 / (1.0 + (-x).exp());
    let (out, grad) = single(Activation::Sigmoid, x);
    assert_relative_eq!(out, s, epsilon = 1e-12);
    assert_relative_eq!(grad, s * (1.0 - s), epsilon = 1e-12);
}

#[test]
fn tanh_matches_closed_form() {
    for &x in &[-3.0, -0.5, 0.0, 0.5, 3.0] {
        let (out, grad) = single(Activation::Tanh, x);
        let t = f64::tanh(x);
        assert_relative_eq!(out, t, epsilon = 1e-12);
        assert_relative_eq!(grad, 1.0 - t * t, epsilon = 1e-12);
    }
}

#[test]
fn relu_gates_on_strict_positivity() {
    assert_eq!(single(Activation::ReLU, -1.5), (0.0, 0.0));
    // Derivative is 0 at exactly zero.
    assert_eq!(single(Activation::ReLU, 0.0), (0.0, 0.0));
    assert_eq!(single(Activation::ReLU, 2.5), (2.5, 1.0));
}

#[test]
fn saturated_inputs_clip_to_zero() {
    // Below -50 the sigmoid exponential would overflow; both the output
    // and the derivative are forced to zero instead.
    assert_eq!(single(Activation::Sigmoid, -60.0), (0.0, 0.0));
    // Tanh doubles the exponent, so its bound is -25.
    assert_eq!(single(Activation::Tanh, -30.0), (0.0, 0.0));
    // Just inside the bound the closed forms still apply.
    let (out, _) = single(Activation::Sigmoid, -49.0);
    assert!(out > 0.0);
}

#[test]
fn forward_preserves_shape_for_both_outputs() {
    let input = Matrix::from_rows(vec![vec![-1.0, 0.0, 1.0], vec![2.0, -2.0, 0.5]]);
    for activation in [Activation::Sigmoid, Activation::Tanh, Activation::ReLU] {
        let (out, grad) = activation.forward(&input);
        assert_eq!((out.nrow, out.ncol), (2, 3));
        assert_eq!((grad.nrow, grad.ncol), (2, 3));
    }
}

#[test]
fn output_and_derivative_come_from_one_pass() {
    // The derivative returned alongside the output must describe the same
    // inputs, element for element.
    let input = Matrix::column_vector(vec![-0.7, 0.3, 1.9]);
    let (_, grad) = Activation::Sigmoid.forward(&input);
    for i in 0..3 {
        let x = input[(i, 0)];
        let s = 1.0 / (1.0 + (-x).exp());
        assert_relative_eq!(grad[(i, 0)], s * (1.0 - s), epsilon = 1e-12);
    }
}
