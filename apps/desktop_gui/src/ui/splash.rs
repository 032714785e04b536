//! Splash screen: a timed brand moment before auth. Any click skips it.

use egui::{pos2, Align2, Color32, FontId, Sense, Stroke};
use motion::{MotionConfig, DURATION_FAST, DURATION_MEDIUM, DURATION_SLOW, EASE_SOFT};

use crate::ui::theme::Palette;

const SPLASH_SECONDS: f32 = 2.6;

fn fade(color: Color32, alpha: f32) -> Color32 {
    Color32::from_rgba_unmultiplied(
        color.r(),
        color.g(),
        color.b(),
        (color.a() as f32 * alpha.clamp(0.0, 1.0)) as u8,
    )
}

/// Returns true when the user clicks through.
pub fn show_splash(
    ctx: &egui::Context,
    elapsed: f32,
    config: &MotionConfig,
    palette: &Palette,
) -> bool {
    let mut skipped = false;
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE.fill(palette.app_background))
        .show(ctx, |ui| {
            let response = ui.allocate_rect(ui.max_rect(), Sense::click());
            if response.clicked() {
                skipped = true;
            }

            let reveal = if config.reduced_motion {
                1.0
            } else {
                EASE_SOFT.ease((elapsed / DURATION_MEDIUM).clamp(0.0, 1.0))
            };

            let rect = ui.max_rect();
            let center = rect.center();
            let painter = ui.painter();

            // Pulsing ring behind the wordmark, one beat per slow duration.
            let pulse = if config.reduced_motion {
                1.0
            } else {
                1.0 + 0.06 * (elapsed * std::f32::consts::TAU / DURATION_SLOW).sin()
            };
            painter.circle_stroke(
                pos2(center.x, center.y - 24.0),
                46.0 * pulse,
                Stroke::new(2.0, fade(palette.accent, 0.5 * reveal)),
            );

            painter.text(
                pos2(center.x, center.y - 24.0),
                Align2::CENTER_CENTER,
                "Lucid",
                FontId::proportional(40.0),
                fade(palette.text_primary, reveal),
            );
            painter.text(
                pos2(center.x, center.y + 34.0),
                Align2::CENTER_CENTER,
                "Tasks, with a little theatre",
                FontId::proportional(15.0),
                fade(palette.text_muted, reveal),
            );

            // Thin progress line toward the automatic advance. Its chrome
            // fades in faster than the wordmark.
            let chrome = if config.reduced_motion {
                1.0
            } else {
                EASE_SOFT.ease((elapsed / DURATION_FAST).clamp(0.0, 1.0))
            };
            let progress = (elapsed / SPLASH_SECONDS).clamp(0.0, 1.0);
            let bar_width = 180.0;
            let bar_y = center.y + 72.0;
            painter.line_segment(
                [
                    pos2(center.x - bar_width / 2.0, bar_y),
                    pos2(center.x + bar_width / 2.0, bar_y),
                ],
                Stroke::new(2.0, fade(palette.card_stroke, chrome)),
            );
            painter.line_segment(
                [
                    pos2(center.x - bar_width / 2.0, bar_y),
                    pos2(center.x - bar_width / 2.0 + bar_width * progress, bar_y),
                ],
                Stroke::new(2.0, fade(palette.accent, chrome)),
            );
        });
    skipped
}
