use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{MAX_EPOCHS, NUM_CLASSES, NUM_PARAMS, SoftmaxClassifier, WeightMatrix};
use crate::dataset::LabeledPoint;

/// Bias terms start at half the magnitude of the feature weights.
const BIAS_INIT_SCALE: f32 = 0.5;

impl SoftmaxClassifier {
    /// Run one full-batch gradient-descent step over `points`.
    ///
    /// Does nothing for an empty dataset. After the update the epoch counter advances (stopping
    /// at [`MAX_EPOCHS`]) and `last_loss` is recomputed on the new weights.
    pub fn train_epoch(&mut self, points: &[LabeledPoint]) {
        let Some(grad) = self.mean_gradient(points) else {
            return;
        };
        let lr = self.state.learning_rate;
        let mut next = self.state.weights;
        for (row, grad_row) in next.iter_mut().zip(&grad) {
            for (weight, g) in row.iter_mut().zip(grad_row) {
                *weight -= lr * g;
            }
        }
        if next.iter().flatten().all(|w| w.is_finite()) {
            self.state.weights = next;
        } else {
            tracing::warn!(
                "Discarding non-finite weight update at epoch {} (learning rate {lr})",
                self.state.epochs_trained
            );
        }
        self.state.epochs_trained = self.state.epochs_trained.saturating_add(1).min(MAX_EPOCHS);
        self.state.last_loss = self.compute_loss(points);
    }

    /// Draw fresh weights from `rng`: feature weights uniform in `[-1, 1)`, biases half that.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R) {
        for row in &mut self.state.weights {
            row[0] = rng.random_range(-1.0f32..1.0) * BIAS_INIT_SCALE;
            row[1] = rng.random_range(-1.0f32..1.0);
            row[2] = rng.random_range(-1.0f32..1.0);
        }
    }

    /// Same as [`SoftmaxClassifier::randomize`] with a generator seeded from `seed`.
    pub fn randomize_seeded(&mut self, seed: u64) {
        let mut rng = StdRng::seed_from_u64(seed);
        self.randomize(&mut rng);
    }

    /// Mean cross-entropy gradient with respect to every weight, or `None` with no usable points.
    fn mean_gradient(&self, points: &[LabeledPoint]) -> Option<WeightMatrix> {
        let mut grad = [[0.0f64; NUM_PARAMS]; NUM_CLASSES];
        let mut counted = 0usize;
        for point in points {
            if point.label >= NUM_CLASSES {
                continue;
            }
            let probs = self.predict_probs(point.x, point.y);
            for (class_idx, grad_row) in grad.iter_mut().enumerate() {
                let target = if point.label == class_idx { 1.0 } else { 0.0 };
                let err = f64::from(probs[class_idx]) - target;
                grad_row[0] += err;
                grad_row[1] += err * f64::from(point.x);
                grad_row[2] += err * f64::from(point.y);
            }
            counted += 1;
        }
        if counted == 0 {
            return None;
        }
        let inv = 1.0 / counted as f64;
        let mut mean = [[0.0f32; NUM_PARAMS]; NUM_CLASSES];
        for (out_row, grad_row) in mean.iter_mut().zip(&grad) {
            for (out, g) in out_row.iter_mut().zip(grad_row) {
                *out = (g * inv) as f32;
            }
        }
        Some(mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::softmax::ModelState;

    fn two_point_dataset() -> Vec<LabeledPoint> {
        vec![
            LabeledPoint::new(-0.5, 0.0, 0),
            LabeledPoint::new(0.5, 0.0, 1),
        ]
    }

    #[test]
    fn one_epoch_decreases_loss() {
        let points = two_point_dataset();
        let mut classifier = SoftmaxClassifier::new(0.1);
        let before = classifier.compute_loss(&points);
        classifier.train_epoch(&points);
        let after = classifier.compute_loss(&points);
        assert!(after < before, "loss did not decrease: {before} -> {after}");
        assert_eq!(classifier.epochs_trained(), 1);
        assert_eq!(classifier.last_loss(), after);
    }

    #[test]
    fn empty_dataset_is_a_no_op() {
        let mut classifier = SoftmaxClassifier::new(0.1);
        classifier.randomize_seeded(7);
        let before = *classifier.state();
        classifier.train_epoch(&[]);
        assert_eq!(*classifier.state(), before);
    }

    #[test]
    fn gradient_matches_hand_derivation() {
        // Zero weights: every probability is 1/3.
        let points = [LabeledPoint::new(0.5, -1.0, 1)];
        let grad = SoftmaxClassifier::new(0.1).mean_gradient(&points).unwrap();
        let third = 1.0f32 / 3.0;
        assert!((grad[0][0] - third).abs() < 1e-6);
        assert!((grad[1][0] - (third - 1.0)).abs() < 1e-6);
        assert!((grad[1][1] - (third - 1.0) * 0.5).abs() < 1e-6);
        assert!((grad[2][2] - -third).abs() < 1e-6);
    }

    #[test]
    fn update_applies_learning_rate() {
        let points = [LabeledPoint::new(1.0, 0.0, 0)];
        let mut classifier = SoftmaxClassifier::new(0.3);
        classifier.train_epoch(&points);
        let weights = classifier.weights();
        let third = 1.0f32 / 3.0;
        assert!((weights[0][0] - 0.3 * (1.0 - third)).abs() < 1e-6);
        assert!((weights[1][1] - -0.3 * third).abs() < 1e-6);
        assert_eq!(weights[0][2], 0.0);
    }

    #[test]
    fn repeated_training_separates_classes() {
        let points = vec![
            LabeledPoint::new(-0.8, -0.8, 0),
            LabeledPoint::new(-0.7, -0.6, 0),
            LabeledPoint::new(0.0, 0.1, 1),
            LabeledPoint::new(0.1, -0.1, 1),
            LabeledPoint::new(0.8, 0.7, 2),
            LabeledPoint::new(0.7, 0.9, 2),
        ];
        let mut classifier = SoftmaxClassifier::new(0.8);
        classifier.randomize_seeded(3);
        for _ in 0..5000 {
            classifier.train_epoch(&points);
        }
        for point in &points {
            assert_eq!(classifier.predict_label(point.x, point.y), point.label);
        }
        assert_eq!(classifier.epochs_trained(), 5000);
    }

    #[test]
    fn seeded_randomize_is_deterministic_and_bounded() {
        let mut a = SoftmaxClassifier::new(0.1);
        let mut b = SoftmaxClassifier::new(0.1);
        a.randomize_seeded(42);
        b.randomize_seeded(42);
        assert_eq!(a.weights(), b.weights());
        for row in a.weights() {
            assert!(row[0].abs() <= 0.5);
            assert!(row[1].abs() <= 1.0);
            assert!(row[2].abs() <= 1.0);
        }
        let mut c = SoftmaxClassifier::new(0.1);
        c.randomize_seeded(43);
        assert_ne!(a.weights(), c.weights());
    }

    #[test]
    fn randomize_keeps_training_history() {
        let mut classifier = SoftmaxClassifier::from_state(ModelState {
            epochs_trained: 12,
            last_loss: 0.4,
            ..ModelState::new(0.2)
        });
        classifier.randomize_seeded(1);
        assert_eq!(classifier.epochs_trained(), 12);
        assert_eq!(classifier.learning_rate(), 0.2);
    }

    #[test]
    fn epoch_counter_stops_at_file_limit() {
        let points = two_point_dataset();
        let mut classifier = SoftmaxClassifier::from_state(ModelState {
            epochs_trained: MAX_EPOCHS - 1,
            ..ModelState::new(0.1)
        });
        classifier.train_epoch(&points);
        classifier.train_epoch(&points);
        assert_eq!(classifier.epochs_trained(), MAX_EPOCHS);
    }

    #[test]
    fn from_state_caps_epoch_counter() {
        let classifier = SoftmaxClassifier::from_state(ModelState {
            epochs_trained: u32::MAX,
            ..ModelState::new(0.1)
        });
        assert_eq!(classifier.epochs_trained(), MAX_EPOCHS);
    }

    #[test]
    fn diverging_update_is_discarded() {
        let points = [LabeledPoint::new(1.0, 1.0, 0)];
        let mut classifier = SoftmaxClassifier::new(f32::MAX);
        classifier.train_epoch(&points);
        let after_first = *classifier.weights();
        assert!(after_first.iter().flatten().all(|w| w.is_finite()));
        // The second step overflows the class-0 row to infinity.
        classifier.train_epoch(&points);
        assert_eq!(*classifier.weights(), after_first);
        assert_eq!(classifier.epochs_trained(), 2);
        assert!(classifier.last_loss().is_finite());
    }
}
