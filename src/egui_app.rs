//! egui front-end: controller, UI state, and the renderer.

/// Owns the classifier, dataset and settings, and applies user actions.
pub mod controller;
/// Plain state consumed by the renderer.
pub mod state;
/// eframe application and drawing code.
pub mod ui;
