//! Trains a classifier on a packed-pixel text dataset file.
//!
//! The stream carries labels for the training samples only, so the held-out
//! samples are reported as raw predictions.
//!
//! Run with:
//!   cargo run --example digits -- <dataset-file> [epochs]

use std::fs::File;
use std::io::BufReader;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use lodestone_nn::{load_packed, train, Activation, Matrix, Network, TrainConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: digits <dataset-file> [epochs]")?;
    let epochs: usize = match args.next() {
        Some(s) => s.parse()?,
        None => 5,
    };

    let dataset = load_packed(BufReader::new(File::open(&path)?))?;
    let n_inputs = dataset.img_rows * dataset.img_cols;
    println!(
        "{} training samples, {} test samples, {}x{} pixels",
        dataset.train_images.len(),
        dataset.test_images.len(),
        dataset.img_rows,
        dataset.img_cols
    );

    let mut init_rng = StdRng::seed_from_u64(1);
    let mut network = Network::with_generator(
        vec![
            (32, n_inputs, Activation::ReLU),
            (10, 32, Activation::Sigmoid),
        ],
        move || init_rng.gen::<f64>() * 0.2 - 0.1,
    );

    let config = TrainConfig::new(epochs, 32, 0.1);
    let mut rng = StdRng::seed_from_u64(2);
    train(
        &mut network,
        &dataset.train_images,
        &dataset.train_labels,
        &config,
        &mut rng,
    )?;

    for (i, image) in dataset.test_images.iter().take(10).enumerate() {
        let x = Matrix::column_vector(image.clone());
        println!("test sample {i}: predicted class {}", network.predict(&x)?);
    }
    Ok(())
}
