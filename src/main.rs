#![deny(missing_docs)]

//! Entry point for the egui-based petalmap visualizer.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use petalmap::config;
use petalmap::egui_app::ui::{EguiApp, MIN_VIEWPORT_SIZE};
use petalmap::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = config::load_or_default();
    if let Err(err) = &config {
        tracing::error!("Failed to load config: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_inner_size(egui::vec2(1100.0, 760.0));
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        "Petalmap",
        native_options,
        Box::new(move |_cc| match config {
            Ok(config) => Ok(Box::new(EguiApp::new(config))),
            Err(err) => Ok(Box::new(LaunchError {
                message: format!("Failed to load config: {err}"),
            })),
        }),
    )?;
    Ok(())
}

/// Minimal fallback app to display initialization errors.
struct LaunchError {
    message: String,
}

impl eframe::App for LaunchError {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Failed to start UI");
                ui.label(&self.message);
            });
        });
    }
}
