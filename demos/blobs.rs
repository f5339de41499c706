//! Trains a small classifier on two linearly separable 2-D blobs.
//!
//! Run with:
//!   RUST_LOG=debug cargo run --example blobs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lodestone_nn::{evaluate, train, Activation, Network, TrainConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::seed_from_u64(7);

    // One jittered cluster per class, far enough apart to be separable.
    let mut inputs = Vec::new();
    let mut labels = Vec::new();
    for i in 0..20 {
        let class = i % 2;
        let (cx, cy) = if class == 0 { (-2.0, -2.0) } else { (2.0, 2.0) };
        inputs.push(vec![
            cx + rng.gen::<f64>() - 0.5,
            cy + rng.gen::<f64>() - 0.5,
        ]);
        labels.push(class);
    }

    let mut init_rng = StdRng::seed_from_u64(42);
    let mut network = Network::with_generator(
        vec![(4, 2, Activation::Tanh), (2, 4, Activation::Sigmoid)],
        move || init_rng.gen::<f64>() - 0.5,
    );

    let config = TrainConfig::new(100, 4, 0.5);
    let history = train(&mut network, &inputs, &labels, &config, &mut rng)?;

    if let (Some(first), Some(last)) = (history.first(), history.last()) {
        println!(
            "mean loss: epoch 1 = {:.6}, epoch {} = {:.6}",
            first.train_loss, last.epoch, last.train_loss
        );
    }

    let stats = evaluate(&network, &inputs, &labels)?;
    println!(
        "training set after {} epochs: loss {:.6}, accuracy {:.2}",
        config.epochs, stats.loss, stats.accuracy
    );
    Ok(())
}
