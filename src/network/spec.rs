use serde::{Serialize, Deserialize};

use crate::activation::activation::Activation;
use crate::network::network::Network;

/// Describes one layer in a network specification.
///
/// Fields:
/// - `size`       — number of neurons in this layer
/// - `input_size` — number of neurons feeding into this layer (i.e. the
///                  output size of the previous layer, or the raw input
///                  dimension for the first layer)
/// - `activation` — nonlinearity applied after the affine transform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerSpec {
    pub size: usize,
    pub input_size: usize,
    pub activation: Activation,
}

/// A serializable description of a network architecture.
///
/// This is configuration, not a trained model: it carries layer shapes and
/// activations only, never weights. Trained parameters live in process
/// memory for the duration of one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkSpec {
    /// Human-readable name for log lines and file stems.
    pub name: String,
    /// Ordered list of layer descriptions (input → output).
    pub layers: Vec<LayerSpec>,
}

impl NetworkSpec {
    /// Instantiates the architecture, drawing initial weights and biases
    /// from `generator`.
    pub fn build<F>(&self, generator: F) -> Network
    where
        F: FnMut() -> f64,
    {
        Network::with_generator(
            self.layers
                .iter()
                .map(|l| (l.size, l.input_size, l.activation))
                .collect(),
            generator,
        )
    }

    /// Serializes the spec to a pretty-printed JSON file.
    pub fn save_json(&self, path: &str) -> std::io::Result<()> {
        let file = std::fs::File::create(path)?;
        let writer = std::io::BufWriter::new(file);
        serde_json::to_writer_pretty(writer, self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }

    /// Deserializes a `NetworkSpec` from a JSON file.
    pub fn load_json(path: &str) -> std::io::Result<NetworkSpec> {
        let file = std::fs::File::open(path)?;
        let reader = std::io::BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))
    }
}
