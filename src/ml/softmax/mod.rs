//! Multinomial logistic regression over two input features.
//!
//! Each class owns a row `[bias, w_x, w_y]`; the logit for a point is the affine score of
//! that row. Probabilities come from a max-shifted softmax so large logit gaps never
//! overflow.

use std::path::Path;

use crate::dataset::LabeledPoint;
use crate::ml::model_file::{self, ModelFileError};

mod train;

/// Number of classes the classifier scores.
pub const NUM_CLASSES: usize = 3;
/// Parameters per class row: bias, x weight, y weight.
pub const NUM_PARAMS: usize = 3;
/// Probability clamp applied before taking the log in the loss.
pub const LOSS_EPSILON: f32 = 1e-7;
/// Learning rate used when none is configured.
pub const DEFAULT_LEARNING_RATE: f32 = 0.8;
/// Largest epoch count the model file can store (`i32::MAX`).
pub const MAX_EPOCHS: u32 = i32::MAX as u32;

/// Per-class rows of `[bias, w_x, w_y]`.
pub type WeightMatrix = [[f32; NUM_PARAMS]; NUM_CLASSES];

/// Everything the classifier persists between sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelState {
    pub weights: WeightMatrix,
    pub learning_rate: f32,
    /// Never exceeds [`MAX_EPOCHS`] once owned by a classifier.
    pub epochs_trained: u32,
    pub last_loss: f32,
}

impl ModelState {
    /// Zero weights, no training history.
    pub fn new(learning_rate: f32) -> Self {
        Self {
            weights: [[0.0; NUM_PARAMS]; NUM_CLASSES],
            learning_rate,
            epochs_trained: 0,
            last_loss: 0.0,
        }
    }
}

/// Owned softmax classifier; the weight matrix is only mutated through `&mut self`.
#[derive(Debug, Clone, PartialEq)]
pub struct SoftmaxClassifier {
    state: ModelState,
}

impl Default for SoftmaxClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_LEARNING_RATE)
    }
}

impl SoftmaxClassifier {
    /// Create a zero-initialized classifier.
    pub fn new(learning_rate: f32) -> Self {
        Self {
            state: ModelState::new(learning_rate),
        }
    }

    /// Wrap an existing state, e.g. one decoded from a model file.
    ///
    /// The epoch counter is capped at [`MAX_EPOCHS`] so the state stays encodable.
    pub fn from_state(mut state: ModelState) -> Self {
        state.epochs_trained = state.epochs_trained.min(MAX_EPOCHS);
        Self { state }
    }

    pub fn state(&self) -> &ModelState {
        &self.state
    }

    pub fn weights(&self) -> &WeightMatrix {
        &self.state.weights
    }

    pub fn learning_rate(&self) -> f32 {
        self.state.learning_rate
    }

    pub fn set_learning_rate(&mut self, learning_rate: f32) {
        self.state.learning_rate = learning_rate;
    }

    pub fn epochs_trained(&self) -> u32 {
        self.state.epochs_trained
    }

    pub fn last_loss(&self) -> f32 {
        self.state.last_loss
    }

    /// Raw per-class scores for a point.
    pub fn logits(&self, x: f32, y: f32) -> [f32; NUM_CLASSES] {
        let mut logits = [0.0f32; NUM_CLASSES];
        for (logit, row) in logits.iter_mut().zip(&self.state.weights) {
            *logit = row[0] + row[1] * x + row[2] * y;
        }
        logits
    }

    /// Class probabilities for a point; non-negative and summing to one.
    pub fn predict_probs(&self, x: f32, y: f32) -> [f32; NUM_CLASSES] {
        softmax(self.logits(x, y))
    }

    /// Most likely class. Exact ties go to the lowest class index.
    pub fn predict_label(&self, x: f32, y: f32) -> usize {
        argmax(&self.predict_probs(x, y))
    }

    /// Mean negative log-likelihood of the true labels, `0` for an empty dataset.
    pub fn compute_loss(&self, points: &[LabeledPoint]) -> f32 {
        let mut total = 0.0f64;
        let mut counted = 0usize;
        for point in points {
            if point.label >= NUM_CLASSES {
                continue;
            }
            let probs = self.predict_probs(point.x, point.y);
            let p = probs[point.label].clamp(LOSS_EPSILON, 1.0 - LOSS_EPSILON);
            total -= f64::from(p.ln());
            counted += 1;
        }
        if counted == 0 {
            return 0.0;
        }
        (total / counted as f64) as f32
    }

    /// Write the current state to `path` in the fixed binary layout.
    pub fn save(&self, path: &Path) -> Result<(), ModelFileError> {
        model_file::save(path, &self.state)
    }

    /// Replace the current state with the record at `path`.
    ///
    /// The state is only replaced once the whole record has been read and decoded; on
    /// error the classifier is left exactly as it was.
    pub fn load(&mut self, path: &Path) -> Result<(), ModelFileError> {
        self.state = model_file::load(path)?;
        Ok(())
    }
}

/// Numerically-stable softmax: logits are shifted by their maximum before `exp`.
pub fn softmax<const K: usize>(logits: [f32; K]) -> [f32; K] {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let mut probs = [0.0f32; K];
    let mut sum = 0.0f32;
    for (p, &logit) in probs.iter_mut().zip(&logits) {
        *p = (logit - max).exp();
        sum += *p;
    }
    if sum == 0.0 || !sum.is_finite() {
        return [1.0 / K as f32; K];
    }
    for p in &mut probs {
        *p /= sum;
    }
    probs
}

/// First index of the largest value; later entries must be strictly greater to win.
pub fn argmax(values: &[f32]) -> usize {
    let mut best = 0usize;
    for (idx, &value) in values.iter().enumerate().skip(1) {
        if value > values[best] {
            best = idx;
        }
    }
    best
}
