use eframe::egui::{
    Color32, Stroke, Visuals,
    epaint::{CornerRadius, Shadow},
    style::WidgetVisuals,
};

#[derive(Clone, Copy)]
pub struct Palette {
    pub bg_primary: Color32,
    pub bg_secondary: Color32,
    pub bg_tertiary: Color32,
    pub panel_outline: Color32,
    pub axis: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub boundary: Color32,
    pub loss_line: Color32,
}

pub fn palette() -> Palette {
    Palette {
        bg_primary: Color32::from_rgb(10, 10, 12),
        bg_secondary: Color32::from_rgb(26, 28, 30),
        bg_tertiary: Color32::from_rgb(42, 44, 48),
        panel_outline: Color32::from_rgb(38, 42, 48),
        axis: Color32::from_rgb(120, 126, 134),
        text_primary: Color32::from_rgb(185, 192, 200),
        text_muted: Color32::from_rgb(140, 146, 155),
        boundary: Color32::from_rgb(255, 214, 10),
        loss_line: Color32::from_rgb(127, 255, 212),
    }
}

/// Display color for a class index: blue, green, red.
pub fn class_color(class_idx: usize) -> Color32 {
    match class_idx {
        0 => Color32::from_rgb(66, 133, 244),
        1 => Color32::from_rgb(52, 168, 83),
        _ => Color32::from_rgb(234, 67, 53),
    }
}

/// Probability-weighted mix of the class colors, darkened for use as a background.
pub fn blend_class_colors(probs: &[f32], brightness: f32) -> Color32 {
    let mut rgb = [0.0f32; 3];
    for (class_idx, &p) in probs.iter().enumerate() {
        let color = class_color(class_idx);
        rgb[0] += p * f32::from(color.r());
        rgb[1] += p * f32::from(color.g());
        rgb[2] += p * f32::from(color.b());
    }
    let channel = |v: f32| (v * brightness).round().clamp(0.0, 255.0) as u8;
    Color32::from_rgb(channel(rgb[0]), channel(rgb[1]), channel(rgb[2]))
}

pub fn apply_visuals(visuals: &mut Visuals) {
    let palette = palette();
    visuals.window_fill = palette.bg_primary;
    visuals.panel_fill = palette.bg_secondary;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.bg_primary;
    visuals.faint_bg_color = palette.bg_secondary;
    visuals.selection.stroke = Stroke::new(1.0, palette.loss_line);
    visuals.widgets.noninteractive.bg_fill = palette.bg_secondary;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, palette.text_primary);
    set_rectilinear(&mut visuals.widgets.inactive, palette);
    set_rectilinear(&mut visuals.widgets.hovered, palette);
    set_rectilinear(&mut visuals.widgets.active, palette);
    visuals.window_corner_radius = CornerRadius::ZERO;
    visuals.menu_corner_radius = CornerRadius::ZERO;
    visuals.popup_shadow = Shadow::NONE;
}

fn set_rectilinear(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::ZERO;
    vis.bg_fill = palette.bg_tertiary;
    vis.weak_bg_fill = palette.bg_tertiary;
    vis.bg_stroke = Stroke::new(1.0, palette.panel_outline);
    vis.fg_stroke = Stroke::new(1.0, palette.text_primary);
}
