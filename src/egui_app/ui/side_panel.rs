use eframe::egui::{self, RichText, SliderClamping};

use super::style;
use crate::config::{LEARNING_RATE_RANGE, MAX_EPOCHS_PER_FRAME};
use crate::dataset::IRIS_CLASS_NAMES;
use crate::egui_app::controller::VisualizerController;
use crate::ml::NUM_CLASSES;

const PANEL_WIDTH: f32 = 240.0;

pub(super) fn render(ctx: &egui::Context, controller: &mut VisualizerController) {
    egui::SidePanel::left("controls")
        .resizable(false)
        .exact_width(PANEL_WIDTH)
        .show(ctx, |ui| {
            ui.add_space(6.0);
            render_stats(ui, controller);
            ui.separator();
            render_training_controls(ui, controller);
            ui.separator();
            render_file_actions(ui, controller);
            ui.separator();
            render_confusion(ui, controller);
        });
}

fn render_stats(ui: &mut egui::Ui, controller: &VisualizerController) {
    let classifier = controller.classifier();
    let muted = style::palette().text_muted;
    egui::Grid::new("training_stats").num_columns(2).show(ui, |ui| {
        ui.label(RichText::new("Epoch").color(muted));
        ui.label(classifier.epochs_trained().to_string());
        ui.end_row();
        ui.label(RichText::new("Loss").color(muted));
        ui.label(format!("{:.5}", classifier.last_loss()));
        ui.end_row();
        ui.label(RichText::new("Accuracy").color(muted));
        ui.label(format!("{:.1}%", controller.accuracy() * 100.0));
        ui.end_row();
        ui.label(RichText::new("Points").color(muted));
        ui.label(controller.dataset().len().to_string());
        ui.end_row();
    });
}

fn render_training_controls(ui: &mut egui::Ui, controller: &mut VisualizerController) {
    let has_data = !controller.dataset().is_empty();
    ui.horizontal(|ui| {
        let label = if controller.ui.paused { "Resume" } else { "Pause" };
        if ui.button(label).clicked() {
            controller.toggle_pause();
        }
        if ui.add_enabled(has_data, egui::Button::new("Step")).clicked() {
            controller.step_once();
        }
        if ui.button("Reset").clicked() {
            controller.reset_training();
        }
    });

    let mut epochs = controller.config().training.epochs_per_frame;
    let response = ui.add(
        egui::Slider::new(&mut epochs, 1..=MAX_EPOCHS_PER_FRAME)
            .logarithmic(true)
            .clamping(SliderClamping::Always)
            .text("epochs/frame"),
    );
    if response.changed() {
        controller.set_epochs_per_frame(epochs);
    }
    if response.drag_stopped() || response.lost_focus() {
        controller.persist_config();
    }

    let mut learning_rate = controller.classifier().learning_rate();
    let (lr_min, lr_max) = LEARNING_RATE_RANGE;
    let response = ui.add(
        egui::Slider::new(&mut learning_rate, lr_min..=lr_max)
            .logarithmic(true)
            .clamping(SliderClamping::Always)
            .text("learning rate"),
    );
    if response.changed() {
        controller.set_learning_rate(learning_rate);
    }
    if response.drag_stopped() || response.lost_focus() {
        controller.persist_config();
    }

    ui.horizontal(|ui| {
        let mut seed = controller.config().training.seed;
        ui.label("Seed");
        if ui.add(egui::DragValue::new(&mut seed)).changed() {
            controller.set_seed(seed);
        }
        if ui.button("Randomize").clicked() {
            controller.randomize_weights();
            controller.persist_config();
        }
    });
}

fn render_file_actions(ui: &mut egui::Ui, controller: &mut VisualizerController) {
    if ui.button("Open dataset…").clicked() {
        controller.open_dataset_via_dialog();
    }
    ui.horizontal(|ui| {
        if ui.button("Save weights…").clicked() {
            controller.save_model_via_dialog();
        }
        if ui.button("Load weights…").clicked() {
            controller.load_model_via_dialog();
        }
    });
}

fn render_confusion(ui: &mut egui::Ui, controller: &VisualizerController) {
    if controller.dataset().is_empty() {
        return;
    }
    let cm = controller.confusion();
    ui.label(RichText::new("Confusion (rows = true)").color(style::palette().text_muted));
    egui::Grid::new("confusion").num_columns(NUM_CLASSES + 1).show(ui, |ui| {
        ui.label("");
        for predicted in 0..NUM_CLASSES {
            ui.label(RichText::new(short_name(predicted)).color(style::class_color(predicted)));
        }
        ui.end_row();
        for truth in 0..NUM_CLASSES {
            ui.label(RichText::new(short_name(truth)).color(style::class_color(truth)));
            for predicted in 0..NUM_CLASSES {
                ui.monospace(cm.get(truth, predicted).to_string());
            }
            ui.end_row();
        }
    });
}

fn short_name(class_idx: usize) -> &'static str {
    IRIS_CLASS_NAMES
        .get(class_idx)
        .copied()
        .map(|name| &name[..3])
        .unwrap_or("?")
}
