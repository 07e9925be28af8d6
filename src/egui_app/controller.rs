//! Application controller that owns the classifier, the dataset and the settings.
//!
//! The renderer never mutates model state directly; every button and slider is routed
//! through a method here so status messages and persisted settings stay consistent.

mod files;
mod training;

use std::path::PathBuf;

use tracing::warn;

use super::state::{StatusTone, UiState, status_badge};
use crate::config::{self, AppConfig};
use crate::dataset::Dataset;
use crate::geometry::{BoundaryGeometry, Viewport};
use crate::ml::SoftmaxClassifier;
use crate::ml::metrics::{ConfusionMatrix, evaluate};

/// Maintains training state and exposes actions for the egui renderer.
pub struct VisualizerController {
    pub ui: UiState,
    classifier: SoftmaxClassifier,
    dataset: Dataset,
    config: AppConfig,
    /// Where settings are written back; `None` uses the default app directory.
    config_path: Option<PathBuf>,
    viewport: Viewport,
    geometry: BoundaryGeometry,
    confusion: ConfusionMatrix,
}

impl VisualizerController {
    /// Build a controller from loaded settings. Weights are seeded from the configured seed.
    pub fn new(config: AppConfig, config_path: Option<PathBuf>) -> Self {
        let config = config.normalized();
        let mut classifier = SoftmaxClassifier::new(config.training.learning_rate);
        classifier.randomize_seeded(config.training.seed);
        let ui = UiState::new(config.view.loss_history_len, !config.training.autostart);
        let mut controller = Self {
            ui,
            classifier,
            dataset: Dataset::default(),
            config,
            config_path,
            viewport: Viewport::UNIT,
            geometry: BoundaryGeometry::default(),
            confusion: ConfusionMatrix::new(crate::ml::NUM_CLASSES),
        };
        controller.refresh_geometry();
        controller
    }

    /// Reopen the dataset and model remembered from the previous session.
    pub fn restore_session(&mut self) {
        if let Some(path) = self.config.data.dataset_path.clone() {
            if path.is_file() {
                self.load_dataset(path);
            } else {
                warn!("Remembered dataset {} no longer exists", path.display());
            }
        }
        if let Some(path) = self.config.data.model_path.clone() {
            if path.is_file() {
                self.load_model_from(path);
            }
        }
    }

    pub fn classifier(&self) -> &SoftmaxClassifier {
        &self.classifier
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn geometry(&self) -> &BoundaryGeometry {
        &self.geometry
    }

    pub fn confusion(&self) -> &ConfusionMatrix {
        &self.confusion
    }

    /// Training accuracy of the current weights, `0` without a dataset.
    pub fn accuracy(&self) -> f32 {
        self.confusion.accuracy()
    }

    /// Recompute boundary segments, intersections and accuracy from the current weights.
    pub fn refresh_geometry(&mut self) {
        self.geometry = BoundaryGeometry::compute(self.classifier.weights(), &self.viewport);
        self.confusion = evaluate(&self.classifier, self.dataset.points());
    }

    /// Write the current settings to disk, reporting failures in the status bar.
    pub fn persist_config(&mut self) {
        let result = match &self.config_path {
            Some(path) => config::save_to_path(&self.config, path),
            None => config::save(&self.config),
        };
        if let Err(err) = result {
            tracing::error!("Failed to save settings: {err}");
            self.set_status(format!("Failed to save settings: {err}"), StatusTone::Warning);
        }
    }

    pub(crate) fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        let (label, color) = status_badge(tone);
        self.ui.status.text = text.into();
        self.ui.status.badge_label = label;
        self.ui.status.badge_color = color;
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::*;
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn new_controller_is_seeded_and_has_three_lines() {
        let dir = tempdir().unwrap();
        let controller = controller_in(dir.path());
        let mut expected = SoftmaxClassifier::new(controller.config().training.learning_rate);
        expected.randomize_seeded(controller.config().training.seed);
        assert_eq!(controller.classifier().weights(), expected.weights());
        assert_eq!(controller.geometry().lines.len(), 3);
        assert_eq!(controller.geometry().segments.len(), 3);
        assert_eq!(controller.accuracy(), 0.0);
    }

    #[test]
    fn autostart_off_starts_paused() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.training.autostart = false;
        let controller = VisualizerController::new(config, Some(dir.path().join("c.toml")));
        assert!(controller.ui.paused);
    }

    #[test]
    fn persist_config_writes_file() {
        let dir = tempdir().unwrap();
        let mut controller = controller_in(dir.path());
        controller.persist_config();
        let path = dir.path().join(config::CONFIG_FILE_NAME);
        assert_eq!(config::load_from(&path).unwrap(), *controller.config());
    }

    #[test]
    fn status_updates_badge() {
        let dir = tempdir().unwrap();
        let mut controller = controller_in(dir.path());
        controller.set_status("Saved", StatusTone::Info);
        assert_eq!(controller.ui.status.text, "Saved");
        assert_eq!(controller.ui.status.badge_label, "Info");
    }
}
