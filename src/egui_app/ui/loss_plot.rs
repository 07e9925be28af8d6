use eframe::egui::{self, Align2, Color32, FontId, Rect, Stroke, StrokeKind};

use super::style;
use crate::egui_app::state::LossHistory;

const INSET_SIZE: egui::Vec2 = egui::vec2(200.0, 100.0);
const INSET_MARGIN: f32 = 10.0;

/// Rect for the loss inset in the lower-right corner of `canvas`.
pub(crate) fn inset_rect(canvas: Rect) -> Rect {
    let size = egui::vec2(
        INSET_SIZE.x.min(canvas.width() * 0.5),
        INSET_SIZE.y.min(canvas.height() * 0.5),
    );
    let max = canvas.max - egui::vec2(INSET_MARGIN, INSET_MARGIN);
    Rect::from_min_max(max - size, max)
}

/// Screen positions for the history, scaled so the largest value touches the top.
pub(crate) fn polyline(history: &LossHistory, rect: Rect) -> Vec<egui::Pos2> {
    let Some(max) = history.max().filter(|max| *max > 0.0) else {
        return Vec::new();
    };
    let steps = history.capacity().saturating_sub(1).max(1) as f32;
    history
        .iter()
        .enumerate()
        .map(|(idx, loss)| {
            let x = rect.min.x + rect.width() * idx as f32 / steps;
            let y = rect.max.y - rect.height() * (loss / max).clamp(0.0, 1.0);
            egui::pos2(x, y)
        })
        .collect()
}

pub(crate) fn render_loss_plot(painter: &egui::Painter, canvas: Rect, history: &LossHistory) {
    let palette = style::palette();
    let rect = inset_rect(canvas);
    painter.rect_filled(rect, 0.0, Color32::from_black_alpha(180));
    painter.rect_stroke(
        rect,
        0.0,
        Stroke::new(1.0, palette.panel_outline),
        StrokeKind::Inside,
    );
    let plot = rect.shrink(4.0);
    let points = polyline(history, plot);
    if points.len() >= 2 {
        painter.add(egui::Shape::line(points, Stroke::new(1.5, palette.loss_line)));
    }
    let label = match history.last() {
        Some(loss) => format!("loss {loss:.4}"),
        None => "loss".to_string(),
    };
    painter.text(
        rect.left_top() + egui::vec2(6.0, 4.0),
        Align2::LEFT_TOP,
        label,
        FontId::monospace(11.0),
        palette.text_muted,
    );
}
