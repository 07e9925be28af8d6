//! Evaluation metrics for the classifier.

use crate::dataset::LabeledPoint;
use crate::ml::softmax::{NUM_CLASSES, SoftmaxClassifier};

#[derive(Debug, Clone, PartialEq)]
/// Confusion matrix for a `K`-class classifier.
pub struct ConfusionMatrix {
    /// Number of classes.
    pub n_classes: usize,
    /// Row-major `KxK` counts (`truth * K + predicted`).
    pub counts: Vec<u32>,
}

impl ConfusionMatrix {
    /// Create an empty `KxK` confusion matrix.
    pub fn new(n_classes: usize) -> Self {
        Self {
            n_classes,
            counts: vec![0; n_classes * n_classes],
        }
    }

    pub fn add(&mut self, truth: usize, predicted: usize) {
        if truth >= self.n_classes || predicted >= self.n_classes {
            return;
        }
        let idx = truth * self.n_classes + predicted;
        self.counts[idx] = self.counts[idx].saturating_add(1);
    }

    pub fn get(&self, truth: usize, predicted: usize) -> u32 {
        self.counts[truth * self.n_classes + predicted]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&v| u64::from(v)).sum()
    }

    /// Fraction of counted points on the diagonal; `0` when nothing was counted.
    pub fn accuracy(&self) -> f32 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let correct: u64 = (0..self.n_classes)
            .map(|class_idx| u64::from(self.get(class_idx, class_idx)))
            .sum();
        correct as f32 / total as f32
    }
}

/// Tally the classifier's predictions against the true labels of `points`.
pub fn evaluate(classifier: &SoftmaxClassifier, points: &[LabeledPoint]) -> ConfusionMatrix {
    let mut cm = ConfusionMatrix::new(NUM_CLASSES);
    for point in points {
        cm.add(point.label, classifier.predict_label(point.x, point.y));
    }
    cm
}
