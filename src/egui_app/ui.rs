//! egui renderer for the visualizer.

mod canvas;
mod loss_plot;
mod side_panel;
pub mod style;

use eframe::egui::{self, Color32, Frame, Margin, RichText};

use crate::config::AppConfig;
use crate::egui_app::controller::VisualizerController;

/// Minimum window size that still fits the side panel and a usable canvas.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(760.0, 520.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: VisualizerController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app from loaded settings and reopen the previous session's files.
    pub fn new(config: AppConfig) -> Self {
        let mut controller = VisualizerController::new(config, None);
        controller.restore_session();
        Self {
            controller,
            visuals_set: false,
        }
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::symmetric(8, 4)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let status = &self.controller.ui.status;
                    let badge = RichText::new(format!(" {} ", status.badge_label))
                        .color(Color32::WHITE)
                        .background_color(status.badge_color);
                    ui.label(badge);
                    ui.label(RichText::new(&status.text).color(palette.text_primary));
                });
            });
    }

    fn render_canvas(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::CentralPanel::default()
            .frame(Frame::new().fill(palette.bg_primary).inner_margin(Margin::same(8)))
            .show(ctx, |ui| {
                let (response, painter) =
                    ui.allocate_painter(ui.available_size(), egui::Sense::hover());
                let transform =
                    canvas::PlotTransform::fit(response.rect, *self.controller.viewport());
                let classifier = self.controller.classifier();
                canvas::render_background(
                    &painter,
                    &transform,
                    classifier,
                    self.controller.config().view.grid_resolution,
                );
                canvas::render_axes(&painter, &transform);
                canvas::render_boundaries(&painter, &transform, self.controller.geometry());
                canvas::render_points(
                    &painter,
                    &transform,
                    classifier,
                    self.controller.dataset().points(),
                );
                loss_plot::render_loss_plot(
                    &painter,
                    transform.rect(),
                    &self.controller.ui.loss_history,
                );
            });
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        let trained = self.controller.tick();
        side_panel::render(ctx, &mut self.controller);
        self.render_status(ctx);
        self.render_canvas(ctx);
        if trained {
            ctx.request_repaint();
        }
    }
}
