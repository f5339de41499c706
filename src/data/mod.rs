pub mod packed;

pub use packed::{load_packed, DataError, PackedDataset};
