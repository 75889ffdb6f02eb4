//! Dataset loading and splitting

pub mod loader;
pub mod split;

pub use loader::{features_and_target, DatasetLoader};
pub use split::train_test_split;
