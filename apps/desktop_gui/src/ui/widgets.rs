//! Small shared widgets and draw helpers.

use egui::{Color32, Rect, Stroke, Ui};
use shared::domain::{Priority, TaskStatus};

use crate::ui::theme::Palette;

/// Duration of the rejected-credentials shake.
pub const SHAKE_DURATION: f32 = 0.4;

/// Horizontal shake keyframes: 0, -6, 6, -6, 0 over [`SHAKE_DURATION`],
/// linearly interpolated. Past the end the offset is zero.
pub fn shake_offset(elapsed: f32) -> f32 {
    const KEYFRAMES: [f32; 5] = [0.0, -6.0, 6.0, -6.0, 0.0];
    if !(0.0..SHAKE_DURATION).contains(&elapsed) {
        return 0.0;
    }
    let span = SHAKE_DURATION / (KEYFRAMES.len() - 1) as f32;
    let slot = (elapsed / span).floor() as usize;
    let slot = slot.min(KEYFRAMES.len() - 2);
    let frac = (elapsed - slot as f32 * span) / span;
    KEYFRAMES[slot] + (KEYFRAMES[slot + 1] - KEYFRAMES[slot]) * frac
}

pub fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::Low => "Low",
        Priority::Medium => "Medium",
        Priority::High => "High",
    }
}

pub fn priority_color(priority: Priority, palette: &Palette) -> Color32 {
    match priority {
        Priority::Low => palette.text_muted,
        Priority::Medium => palette.accent,
        Priority::High => palette.danger,
    }
}

pub fn status_label(status: TaskStatus) -> &'static str {
    match status {
        TaskStatus::Pending => "Pending",
        TaskStatus::InProgress => "In progress",
        TaskStatus::Completed => "Completed",
    }
}

pub fn status_color(status: TaskStatus, palette: &Palette) -> Color32 {
    match status {
        TaskStatus::Pending => palette.text_muted,
        TaskStatus::InProgress => palette.accent,
        TaskStatus::Completed => palette.success,
    }
}

/// Paint a circular progress arc inside `rect`; `fraction` is clamped by
/// the caller to 0..=1.
pub fn draw_progress_ring(ui: &mut Ui, rect: Rect, fraction: f32, palette: &Palette) {
    let painter = ui.painter();
    let center = rect.center();
    let radius = rect.width().min(rect.height()) * 0.5 - 3.0;
    painter.circle_stroke(center, radius, Stroke::new(4.0, palette.card_stroke));

    let segments = 48;
    let sweep = std::f32::consts::TAU * fraction;
    let start = -std::f32::consts::FRAC_PI_2;
    let points: Vec<egui::Pos2> = (0..=segments)
        .map(|i| {
            let angle = start + sweep * (i as f32 / segments as f32);
            center + radius * egui::vec2(angle.cos(), angle.sin())
        })
        .collect();
    if points.len() > 1 && fraction > 0.005 {
        painter.add(egui::Shape::line(points, Stroke::new(4.0, palette.accent)));
    }
}
