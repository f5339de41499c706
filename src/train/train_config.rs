use serde::{Serialize, Deserialize};

/// Hyperparameters for a `train` run.
///
/// # Fields
/// - `epochs`        — number of epochs; each runs `n / batch_size` batches
/// - `batch_size`    — samples drawn per mini-batch; use `1` for online SGD
/// - `learning_rate` — step size; the per-batch average is folded into it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub learning_rate: f64,
}

impl TrainConfig {
    pub fn new(epochs: usize, batch_size: usize, learning_rate: f64) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            learning_rate,
        }
    }
}
