//! Softmax classifier, its binary model file, and evaluation metrics.
//!
//! The classifier is a plain owned value: nothing in here touches the UI, and the only I/O
//! is the explicit save/load in [`model_file`].

pub mod metrics;
pub mod model_file;
pub mod softmax;

pub use model_file::{ModelFileError, RecordError};
pub use softmax::{ModelState, NUM_CLASSES, SoftmaxClassifier, WeightMatrix};
