pub mod math;
pub mod activation;
pub mod layers;
pub mod loss;
pub mod network;
pub mod optim;
pub mod train;
pub mod data;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use math::error::MatrixError;
pub use activation::activation::Activation;
pub use layers::dense::DenseLayer;
pub use loss::softmax::{LossOutput, SoftmaxCrossEntropy};
pub use network::network::{ForwardTrace, Network};
pub use network::spec::{LayerSpec, NetworkSpec};
pub use optim::gradient_descent::GradientDescent;
pub use train::epoch_stats::{EpochStats, EvalStats};
pub use train::train_config::TrainConfig;
pub use train::trainer::{evaluate, train};
pub use data::packed::{load_packed, DataError, PackedDataset};
