use serde::{Serialize, Deserialize};

/// Per-epoch training statistics; `train` returns one per completed epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Total epochs requested for this run.
    pub total_epochs: usize,
    /// Mean loss over every sample drawn this epoch.
    pub train_loss: f64,
    /// Fraction of drawn samples classified correctly, in [0, 1].
    pub train_accuracy: f64,
    /// Wall-clock duration of this single epoch in milliseconds.
    pub elapsed_ms: u64,
}

/// Result of an inference-only pass over a held-out set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalStats {
    /// Mean loss over the set.
    pub loss: f64,
    /// Argmax accuracy over the set, in [0, 1].
    pub accuracy: f64,
}
