//! Flat binary dump of a [`ModelState`].
//!
//! Layout (little-endian, no header, no padding):
//! - 9 × `f32` weights, row-major (`[bias, w_x, w_y]` per class)
//! - 1 × `f32` learning rate
//! - 1 × `i32` epoch count
//! - 1 × `f32` last loss
//!
//! Encoding and decoding stay in this module so the classifier never touches bytes.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::ml::softmax::{MAX_EPOCHS, ModelState, NUM_CLASSES, NUM_PARAMS};

const WEIGHT_COUNT: usize = NUM_CLASSES * NUM_PARAMS;
const FIELD_LEN: usize = 4;
/// Exact byte length of an encoded model record.
pub const RECORD_LEN: usize = (WEIGHT_COUNT + 3) * FIELD_LEN;

/// Reasons a byte buffer is not a valid model record.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RecordError {
    #[error("record is {got} bytes (expected {expected})")]
    Length { got: usize, expected: usize },
    #[error("record has a negative epoch count ({0})")]
    NegativeEpochs(i32),
    #[error("record contains non-finite values")]
    NonFinite,
}

/// Errors raised while saving or loading a model file.
#[derive(Debug, Error)]
pub enum ModelFileError {
    /// Failed to create the parent directory for a model file.
    #[error("Unable to create model directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file could not be opened or read.
    #[error("Failed to read model file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file could not be written.
    #[error("Failed to write model file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file was read but does not hold a valid record.
    #[error("Invalid model file {path}: {source}")]
    Invalid { path: PathBuf, source: RecordError },
}

/// Serialize `state` into the fixed record layout.
///
/// Epoch counts above [`MAX_EPOCHS`] are written as `MAX_EPOCHS`; a classifier never holds one.
pub fn encode(state: &ModelState) -> [u8; RECORD_LEN] {
    let mut out = [0u8; RECORD_LEN];
    let mut fields = out.chunks_exact_mut(FIELD_LEN);
    for &weight in state.weights.iter().flatten() {
        put(&mut fields, weight.to_le_bytes());
    }
    put(&mut fields, state.learning_rate.to_le_bytes());
    let epochs = state.epochs_trained.min(MAX_EPOCHS) as i32;
    put(&mut fields, epochs.to_le_bytes());
    put(&mut fields, state.last_loss.to_le_bytes());
    out
}

/// Parse a record produced by [`encode`]. The buffer must be exactly [`RECORD_LEN`] bytes.
pub fn decode(bytes: &[u8]) -> Result<ModelState, RecordError> {
    if bytes.len() != RECORD_LEN {
        return Err(RecordError::Length {
            got: bytes.len(),
            expected: RECORD_LEN,
        });
    }
    let mut fields = bytes
        .chunks_exact(FIELD_LEN)
        .map(|chunk| [chunk[0], chunk[1], chunk[2], chunk[3]]);
    let mut next = || fields.next().unwrap_or_default();

    let mut state = ModelState::new(0.0);
    for weight in state.weights.iter_mut().flatten() {
        *weight = f32::from_le_bytes(next());
    }
    state.learning_rate = f32::from_le_bytes(next());
    let epochs = i32::from_le_bytes(next());
    state.last_loss = f32::from_le_bytes(next());

    state.epochs_trained =
        u32::try_from(epochs).map_err(|_| RecordError::NegativeEpochs(epochs))?;
    let all_finite = state
        .weights
        .iter()
        .flatten()
        .chain([&state.learning_rate, &state.last_loss])
        .all(|value| value.is_finite());
    if !all_finite {
        return Err(RecordError::NonFinite);
    }
    Ok(state)
}

/// Write `state` to `path`, creating parent directories as needed.
///
/// The record goes to a sibling `.tmp` file first and is renamed over `path`, so a failed
/// write leaves any previous model intact.
pub fn save(path: &Path, state: &ModelState) -> Result<(), ModelFileError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ModelFileError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let tmp_path = tmp_path_for(path);
    std::fs::write(&tmp_path, encode(state)).map_err(|source| ModelFileError::Write {
        path: tmp_path.clone(),
        source,
    })?;
    if let Err(source) = std::fs::rename(&tmp_path, path) {
        let _ = std::fs::remove_file(&tmp_path);
        return Err(ModelFileError::Write {
            path: path.to_path_buf(),
            source,
        });
    }
    tracing::info!(
        "Saved model at epoch {} to {}",
        state.epochs_trained,
        path.display()
    );
    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}

/// Read and decode the record at `path`.
pub fn load(path: &Path) -> Result<ModelState, ModelFileError> {
    let bytes = std::fs::read(path).map_err(|source| ModelFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let state = decode(&bytes).map_err(|source| ModelFileError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::info!(
        "Loaded model at epoch {} from {}",
        state.epochs_trained,
        path.display()
    );
    Ok(state)
}

fn put<'a>(fields: &mut impl Iterator<Item = &'a mut [u8]>, bytes: [u8; FIELD_LEN]) {
    if let Some(field) = fields.next() {
        field.copy_from_slice(&bytes);
    }
}
