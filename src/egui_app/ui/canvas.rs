//! Plot canvas: probability background, axes, data points and decision boundaries.

use eframe::egui::{self, Color32, Pos2, Rect, Stroke, StrokeKind};

use super::style;
use crate::dataset::LabeledPoint;
use crate::geometry::{BoundaryGeometry, Point, Viewport};
use crate::ml::SoftmaxClassifier;

const POINT_RADIUS: f32 = 4.0;
const INTERSECTION_RADIUS: f32 = 5.0;
const BACKGROUND_BRIGHTNESS: f32 = 0.35;

/// Square region of the screen showing the viewport, with `y` growing upward.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlotTransform {
    rect: Rect,
    viewport: Viewport,
}

impl PlotTransform {
    /// Largest square centered in `available`.
    pub(crate) fn fit(available: Rect, viewport: Viewport) -> Self {
        let side = available.width().min(available.height()).max(1.0);
        let rect = Rect::from_center_size(available.center(), egui::vec2(side, side));
        Self { rect, viewport }
    }

    pub(crate) fn rect(&self) -> Rect {
        self.rect
    }

    pub(crate) fn to_screen(&self, point: Point) -> Pos2 {
        let span = self.viewport.max - self.viewport.min;
        let nx = (point.x - self.viewport.min) / span;
        let ny = (point.y - self.viewport.min) / span;
        egui::pos2(
            self.rect.min.x + nx * self.rect.width(),
            self.rect.max.y - ny * self.rect.height(),
        )
    }
}

pub(crate) fn render_background(
    painter: &egui::Painter,
    transform: &PlotTransform,
    classifier: &SoftmaxClassifier,
    resolution: usize,
) {
    let resolution = resolution.max(1);
    let viewport = transform.viewport;
    let cell = (viewport.max - viewport.min) / resolution as f32;
    for iy in 0..resolution {
        for ix in 0..resolution {
            let x0 = viewport.min + ix as f32 * cell;
            let y0 = viewport.min + iy as f32 * cell;
            let probs = classifier.predict_probs(x0 + cell * 0.5, y0 + cell * 0.5);
            let color = style::blend_class_colors(&probs, BACKGROUND_BRIGHTNESS);
            let rect = Rect::from_two_pos(
                transform.to_screen(Point::new(x0, y0)),
                transform.to_screen(Point::new(x0 + cell, y0 + cell)),
            );
            // Grow by a hair so neighbouring cells leave no seams.
            painter.rect_filled(rect.expand(0.5), 0.0, color);
        }
    }
}

pub(crate) fn render_axes(painter: &egui::Painter, transform: &PlotTransform) {
    let viewport = transform.viewport;
    let stroke = Stroke::new(1.0, style::palette().axis);
    if viewport.contains_coord(0.0) {
        painter.line_segment(
            [
                transform.to_screen(Point::new(viewport.min, 0.0)),
                transform.to_screen(Point::new(viewport.max, 0.0)),
            ],
            stroke,
        );
        painter.line_segment(
            [
                transform.to_screen(Point::new(0.0, viewport.min)),
                transform.to_screen(Point::new(0.0, viewport.max)),
            ],
            stroke,
        );
    }
    painter.rect_stroke(
        transform.rect(),
        0.0,
        Stroke::new(1.0, style::palette().panel_outline),
        StrokeKind::Inside,
    );
}

/// Fill shows the predicted class, the outline the true class.
pub(crate) fn render_points(
    painter: &egui::Painter,
    transform: &PlotTransform,
    classifier: &SoftmaxClassifier,
    points: &[LabeledPoint],
) {
    for point in points {
        let predicted = classifier.predict_label(point.x, point.y);
        painter.circle(
            transform.to_screen(Point::new(point.x, point.y)),
            POINT_RADIUS,
            style::class_color(predicted),
            Stroke::new(1.5, style::class_color(point.label)),
        );
    }
}

pub(crate) fn render_boundaries(
    painter: &egui::Painter,
    transform: &PlotTransform,
    geometry: &BoundaryGeometry,
) {
    let palette = style::palette();
    let stroke = Stroke::new(2.0, palette.boundary);
    for (_, [start, end]) in geometry.visible_segments() {
        painter.line_segment([transform.to_screen(start), transform.to_screen(end)], stroke);
    }
    for intersection in &geometry.intersections {
        painter.circle(
            transform.to_screen(intersection.point),
            INTERSECTION_RADIUS,
            Color32::TRANSPARENT,
            Stroke::new(2.0, palette.boundary),
        );
    }
}
