//! Library exports for the visualizer, the headless trainer, tests and benchmarks.
/// Application directory resolution.
pub mod app_dirs;
/// Persistent `config.toml` settings.
pub mod config;
/// Iris CSV loading and labeled points.
pub mod dataset;
/// egui front-end.
pub mod egui_app;
/// Decision-boundary lines, clipping and intersections.
pub mod geometry;
/// Tracing setup.
pub mod logging;
/// Softmax classifier, model file and metrics.
pub mod ml;
