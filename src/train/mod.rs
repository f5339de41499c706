pub mod trainer;
pub mod epoch_stats;
pub mod train_config;

pub use trainer::{evaluate, train};
pub use epoch_stats::{EpochStats, EvalStats};
pub use train_config::TrainConfig;
