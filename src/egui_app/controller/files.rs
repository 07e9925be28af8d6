use std::path::{Path, PathBuf};

use rfd::FileDialog;
use tracing::{error, info};

use super::VisualizerController;
use crate::app_dirs;
use crate::dataset::load_iris_csv;
use crate::egui_app::state::StatusTone;

impl VisualizerController {
    /// Prompt for a CSV file and load it as the training set.
    pub fn open_dataset_via_dialog(&mut self) {
        let mut dialog = FileDialog::new().add_filter("CSV", &["csv"]);
        if let Some(dir) = self.dataset_dialog_dir() {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };
        self.load_dataset(path);
    }

    /// Replace the dataset with the iris CSV at `path`. The weights are left untouched.
    pub fn load_dataset(&mut self, path: PathBuf) {
        match load_iris_csv(&path) {
            Ok(dataset) => {
                let message = if dataset.skipped_rows() > 0 {
                    format!(
                        "Loaded {} points from {} ({} rows skipped)",
                        dataset.len(),
                        path.display(),
                        dataset.skipped_rows()
                    )
                } else {
                    format!("Loaded {} points from {}", dataset.len(), path.display())
                };
                let tone = if dataset.is_empty() {
                    StatusTone::Warning
                } else {
                    StatusTone::Info
                };
                self.dataset = dataset;
                self.ui.loss_history.clear();
                self.refresh_geometry();
                self.set_status(message, tone);
                if self.config.data.dataset_path.as_deref() != Some(path.as_path()) {
                    self.config.data.dataset_path = Some(path);
                    self.persist_config();
                }
            }
            Err(err) => {
                error!("{err}");
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }

    /// Prompt for a destination and write the current weights there.
    pub fn save_model_via_dialog(&mut self) {
        let mut dialog = FileDialog::new()
            .add_filter("Model", &["bin"])
            .set_file_name("model.bin");
        if let Some(dir) = self.model_dialog_dir() {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.save_file() else {
            return;
        };
        self.save_model_to(path);
    }

    /// Prompt for a model file and load it into the classifier.
    pub fn load_model_via_dialog(&mut self) {
        let mut dialog = FileDialog::new().add_filter("Model", &["bin"]);
        if let Some(dir) = self.model_dialog_dir() {
            dialog = dialog.set_directory(dir);
        }
        let Some(path) = dialog.pick_file() else {
            return;
        };
        self.load_model_from(path);
    }

    pub fn save_model_to(&mut self, path: PathBuf) {
        match self.classifier.save(&path) {
            Ok(()) => {
                self.set_status(format!("Saved model to {}", path.display()), StatusTone::Info);
                self.remember_model_path(path);
            }
            Err(err) => {
                error!("{err}");
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }

    /// Load weights from `path`. On failure the current weights stay in place.
    ///
    /// The stored learning rate is clamped into the supported range like a slider edit.
    pub fn load_model_from(&mut self, path: PathBuf) {
        match self.classifier.load(&path) {
            Ok(()) => {
                info!(
                    "Model restored at epoch {} (loss {:.4})",
                    self.classifier.epochs_trained(),
                    self.classifier.last_loss()
                );
                self.set_learning_rate(self.classifier.learning_rate());
                self.ui.loss_history.clear();
                self.refresh_geometry();
                self.set_status(format!("Loaded model from {}", path.display()), StatusTone::Info);
                self.remember_model_path(path);
            }
            Err(err) => {
                error!("{err}");
                self.set_status(err.to_string(), StatusTone::Error);
            }
        }
    }

    fn remember_model_path(&mut self, path: PathBuf) {
        self.config.data.model_path = Some(path);
        self.persist_config();
    }

    fn model_dialog_dir(&self) -> Option<PathBuf> {
        self.config
            .data
            .model_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
            .or_else(|| app_dirs::models_dir().ok())
    }

    fn dataset_dialog_dir(&self) -> Option<PathBuf> {
        self.config
            .data
            .dataset_path
            .as_deref()
            .and_then(Path::parent)
            .map(Path::to_path_buf)
    }
}
