use super::VisualizerController;
use crate::config::{LEARNING_RATE_RANGE, MAX_EPOCHS_PER_FRAME};
use crate::egui_app::state::StatusTone;
use crate::ml::SoftmaxClassifier;

impl VisualizerController {
    /// Advance training by the configured number of epochs for this frame.
    ///
    /// Returns `true` when any epoch ran. Paused training or an empty dataset is a no-op.
    pub fn tick(&mut self) -> bool {
        if self.ui.paused || self.dataset.is_empty() {
            return false;
        }
        self.run_epochs(self.config.training.epochs_per_frame);
        true
    }

    /// Run exactly one epoch, regardless of the pause state.
    pub fn step_once(&mut self) {
        if self.dataset.is_empty() {
            self.set_status("Load a dataset before training", StatusTone::Warning);
            return;
        }
        self.run_epochs(1);
    }

    pub fn toggle_pause(&mut self) {
        self.ui.paused = !self.ui.paused;
    }

    /// Apply a new learning rate to the classifier. Call [`Self::persist_config`] to keep it.
    pub fn set_learning_rate(&mut self, learning_rate: f32) {
        if !learning_rate.is_finite() {
            return;
        }
        let (min, max) = LEARNING_RATE_RANGE;
        let learning_rate = learning_rate.clamp(min, max);
        self.classifier.set_learning_rate(learning_rate);
        self.config.training.learning_rate = learning_rate;
    }

    pub fn set_epochs_per_frame(&mut self, epochs: u32) {
        self.config.training.epochs_per_frame = epochs.clamp(1, MAX_EPOCHS_PER_FRAME);
    }

    pub fn set_seed(&mut self, seed: u64) {
        self.config.training.seed = seed;
    }

    /// Draw new weights from the configured seed, keeping the epoch counter.
    pub fn randomize_weights(&mut self) {
        let seed = self.config.training.seed;
        self.classifier.randomize_seeded(seed);
        self.ui.loss_history.clear();
        self.refresh_geometry();
        self.set_status(format!("Weights randomized with seed {seed}"), StatusTone::Info);
    }

    /// Start over: fresh seeded weights, zero epochs, empty loss plot.
    pub fn reset_training(&mut self) {
        let seed = self.config.training.seed;
        let mut classifier = SoftmaxClassifier::new(self.config.training.learning_rate);
        classifier.randomize_seeded(seed);
        self.classifier = classifier;
        self.ui.loss_history.clear();
        self.refresh_geometry();
        self.set_status(format!("Training reset with seed {seed}"), StatusTone::Info);
    }

    fn run_epochs(&mut self, epochs: u32) {
        for _ in 0..epochs {
            self.classifier.train_epoch(self.dataset.points());
            self.ui.loss_history.push(self.classifier.last_loss());
        }
        self.refresh_geometry();
    }
}
