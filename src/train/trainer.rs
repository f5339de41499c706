use std::time::Instant;

use log::{debug, info};
use rand::Rng;

use crate::loss::softmax::SoftmaxCrossEntropy;
use crate::math::error::MatrixError;
use crate::math::matrix::Matrix;
use crate::network::network::Network;
use crate::optim::gradient_descent::GradientDescent;
use crate::train::epoch_stats::{EpochStats, EvalStats};
use crate::train::train_config::TrainConfig;

/// Trains `network` with mini-batch SGD and returns one [`EpochStats`] per
/// completed epoch.
///
/// # Sampling
/// Batch indices are drawn from `rng` uniformly **with replacement** over
/// the full training set: a sample may appear several times in one batch
/// or be skipped for a whole epoch. Each epoch runs `n / batch_size`
/// batches (at least one), so the number of draws matches one full pass in
/// expectation.
///
/// # Arguments
/// - `network` — modified in place; each layer's parameters are updated
///   once per batch
/// - `inputs`  — training samples, each a `Vec<f64>` feature vector
/// - `labels`  — class label per sample, same length as `inputs`
/// - `config`  — hyperparameters
/// - `rng`     — index source; seed it for reproducible runs
///
/// # Panics
/// Panics if `inputs` is empty, lengths mismatch, or `batch_size == 0`.
pub fn train<R: Rng>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    labels: &[usize],
    config: &TrainConfig,
    rng: &mut R,
) -> Result<Vec<EpochStats>, MatrixError> {
    assert!(!inputs.is_empty(), "inputs must not be empty");
    assert_eq!(
        inputs.len(),
        labels.len(),
        "inputs and labels must have equal length"
    );
    assert!(config.batch_size > 0, "batch_size must be at least 1");

    let n = inputs.len();
    let n_batches = (n / config.batch_size).max(1);
    let loss_fn = SoftmaxCrossEntropy;
    let optimizer = GradientDescent;

    let samples: Vec<Matrix> = inputs
        .iter()
        .map(|v| Matrix::column_vector(v.clone()))
        .collect();

    let mut history = Vec::with_capacity(config.epochs);

    for epoch in 1..=config.epochs {
        let t_start = Instant::now();
        let mut epoch_loss = 0.0;
        let mut epoch_correct = 0usize;
        let mut epoch_samples = 0usize;

        for batch in 0..n_batches {
            // Zeroed per-layer (weight, bias) gradient accumulators.
            let mut acc_grads: Vec<(Matrix, Matrix)> = network
                .layers
                .iter()
                .map(|layer| {
                    (
                        Matrix::zeros(layer.weights.nrow, layer.weights.ncol),
                        Matrix::zeros(layer.bias.nrow, layer.bias.ncol),
                    )
                })
                .collect();

            let mut batch_loss = 0.0;
            let mut batch_correct = 0usize;

            for _ in 0..config.batch_size {
                let idx = rng.gen_range(0..n);
                let label = labels[idx];

                let trace = network.forward(&samples[idx])?;
                let out = loss_fn.forward(trace.output(), label)?;
                batch_loss += out.loss;
                if out.predicted == label {
                    batch_correct += 1;
                }

                // Walk the layers back to front, threading each layer's
                // delta and weights into the next call. The last layer
                // feeds the loss directly, marked by the empty sentinel.
                let mut downstream_grad = out.grads;
                let mut downstream_weights = Matrix::empty();
                for i in (0..network.layers.len()).rev() {
                    let delta = network.layers[i].backward(
                        &downstream_weights,
                        &downstream_grad,
                        &trace.local_grads[i],
                    )?;
                    // Weight gradient pairs the delta with the layer's own
                    // input, the previous layer's post-activation output.
                    acc_grads[i].0 += &delta.dot(&trace.activations[i].t())?;
                    acc_grads[i].1 += &delta;
                    downstream_weights = network.layers[i].weights.clone();
                    downstream_grad = delta;
                }
            }

            // One update per layer per batch; the batch average is folded
            // into the step size instead of scaling the accumulators.
            let rate = config.learning_rate / config.batch_size as f64;
            for (i, (w_acc, b_acc)) in acc_grads.iter().enumerate() {
                let layer = &mut network.layers[i];
                optimizer.update(&mut layer.weights, &mut layer.bias, w_acc, b_acc, rate);
            }

            debug!(
                "epoch {epoch} batch {}/{n_batches}: loss sum {batch_loss:.6}, correct {batch_correct}/{}",
                batch + 1,
                config.batch_size
            );
            epoch_loss += batch_loss;
            epoch_correct += batch_correct;
            epoch_samples += config.batch_size;
        }

        let stats = EpochStats {
            epoch,
            total_epochs: config.epochs,
            train_loss: epoch_loss / epoch_samples as f64,
            train_accuracy: epoch_correct as f64 / epoch_samples as f64,
            elapsed_ms: t_start.elapsed().as_millis() as u64,
        };
        info!(
            "epoch {}/{}: mean loss {:.6}, accuracy {:.4} ({} ms)",
            stats.epoch, stats.total_epochs, stats.train_loss, stats.train_accuracy, stats.elapsed_ms
        );
        history.push(stats);
    }

    Ok(history)
}

/// Inference-only pass over a held-out set: sequential, no sampling, no
/// gradient accumulation. Returns mean loss and argmax accuracy.
pub fn evaluate(
    network: &Network,
    inputs: &[Vec<f64>],
    labels: &[usize],
) -> Result<EvalStats, MatrixError> {
    assert_eq!(
        inputs.len(),
        labels.len(),
        "inputs and labels must have equal length"
    );
    if inputs.is_empty() {
        return Ok(EvalStats {
            loss: 0.0,
            accuracy: 0.0,
        });
    }

    let loss_fn = SoftmaxCrossEntropy;
    let mut total_loss = 0.0;
    let mut correct = 0usize;
    for (input, &label) in inputs.iter().zip(labels.iter()) {
        let x = Matrix::column_vector(input.clone());
        let trace = network.forward(&x)?;
        let out = loss_fn.forward(trace.output(), label)?;
        total_loss += out.loss;
        if out.predicted == label {
            correct += 1;
        }
    }

    Ok(EvalStats {
        loss: total_loss / inputs.len() as f64,
        accuracy: correct as f64 / inputs.len() as f64,
    })
}
