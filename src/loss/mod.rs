pub mod softmax;

pub use softmax::{LossOutput, SoftmaxCrossEntropy};
