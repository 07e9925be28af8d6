//! Persistent settings stored as `config.toml` in the app directory.
//!
//! Every section and key is optional on disk; missing values fall back to defaults and
//! out-of-range values are clamped after parsing.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app_dirs;
use crate::ml::softmax::DEFAULT_LEARNING_RATE;

/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Supported learning rates, inclusive.
pub(crate) const LEARNING_RATE_RANGE: (f32, f32) = (1e-4, 10.0);
pub(crate) const MAX_EPOCHS_PER_FRAME: u32 = 1000;
const GRID_RESOLUTION_RANGE: (usize, usize) = (2, 256);
const LOSS_HISTORY_RANGE: (usize, usize) = (2, 100_000);

/// Errors that may occur while loading or saving app configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to create the config directory.
    #[error("Unable to create config directory {path}: {source}")]
    CreateDir {
        /// Directory path that failed to create.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to read a config file.
    #[error("Failed to read {path}: {source}")]
    Read {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to write a config file.
    #[error("Failed to write {path}: {source}")]
    Write {
        /// Path that failed to write.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },
    /// Failed to parse TOML config.
    #[error("Invalid config at {path}: {source}")]
    ParseToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML parse error.
        source: toml::de::Error,
    },
    /// Failed to serialize config to TOML.
    #[error("Failed to serialize config to TOML at {path}: {source}")]
    SerializeToml {
        /// TOML file path.
        path: PathBuf,
        /// TOML serialization error.
        source: toml::ser::Error,
    },
    /// No usable config directory found.
    #[error("No suitable config directory found")]
    NoConfigDir,
}

/// Aggregate application settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub training: TrainingSettings,
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub view: ViewSettings,
}

/// Training loop preferences.
///
/// Config keys: `learning_rate`, `epochs_per_frame`, `seed`, `autostart`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSettings {
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,
    #[serde(default = "default_epochs_per_frame")]
    pub epochs_per_frame: u32,
    /// Seed for weight initialization.
    #[serde(default = "default_seed")]
    pub seed: u64,
    /// Start training as soon as a dataset is loaded.
    #[serde(default = "default_true")]
    pub autostart: bool,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            learning_rate: default_learning_rate(),
            epochs_per_frame: default_epochs_per_frame(),
            seed: default_seed(),
            autostart: true,
        }
    }
}

/// File locations remembered between launches.
///
/// Config keys: `dataset_path`, `model_path`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default)]
    pub dataset_path: Option<PathBuf>,
    /// Last model file saved or loaded.
    #[serde(default)]
    pub model_path: Option<PathBuf>,
}

/// Canvas rendering preferences.
///
/// Config keys: `grid_resolution`, `loss_history_len`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    /// Cells per side of the background probability grid.
    #[serde(default = "default_grid_resolution")]
    pub grid_resolution: usize,
    #[serde(default = "default_loss_history_len")]
    pub loss_history_len: usize,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            grid_resolution: default_grid_resolution(),
            loss_history_len: default_loss_history_len(),
        }
    }
}

impl AppConfig {
    /// Clamp every value into its supported range.
    pub fn normalized(mut self) -> Self {
        let (lr_min, lr_max) = LEARNING_RATE_RANGE;
        self.training.learning_rate = if self.training.learning_rate.is_finite() {
            self.training.learning_rate.clamp(lr_min, lr_max)
        } else {
            default_learning_rate()
        };
        self.training.epochs_per_frame = self.training.epochs_per_frame.clamp(1, MAX_EPOCHS_PER_FRAME);
        let (grid_min, grid_max) = GRID_RESOLUTION_RANGE;
        self.view.grid_resolution = self.view.grid_resolution.clamp(grid_min, grid_max);
        let (hist_min, hist_max) = LOSS_HISTORY_RANGE;
        self.view.loss_history_len = self.view.loss_history_len.clamp(hist_min, hist_max);
        self
    }
}

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load configuration from disk, returning defaults if missing.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    load_from(&config_path()?)
}

/// Load configuration from `path`, returning defaults if the file does not exist.
pub fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config.normalized())
}

/// Persist configuration to the default location.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    save_to_path(config, &config_path()?)
}

/// Save configuration to a specific path, creating parent directories as needed.
///
/// The file is written next to its destination and renamed into place so a crash never
/// leaves a half-written config behind.
pub fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    let data = toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml {
        path: path.to_path_buf(),
        source,
    })?;
    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, data.as_bytes()).map_err(|source| ConfigError::Write {
        path: tmp_path.clone(),
        source,
    })?;
    std::fs::rename(&tmp_path, path).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}

fn default_learning_rate() -> f32 {
    DEFAULT_LEARNING_RATE
}

fn default_epochs_per_frame() -> u32 {
    1
}

fn default_seed() -> u64 {
    42
}

fn default_true() -> bool {
    true
}

fn default_grid_resolution() -> usize {
    80
}

fn default_loss_history_len() -> usize {
    512
}
