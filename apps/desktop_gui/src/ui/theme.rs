//! Visual themes for the dashboard: a dark default and a light alternative.

use egui::{Color32, Visuals};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Dark => ThemeMode::Light,
            ThemeMode::Light => ThemeMode::Dark,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ThemeMode::Dark => "Dark",
            ThemeMode::Light => "Light",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub app_background: Color32,
    pub card_background: Color32,
    pub card_stroke: Color32,
    pub accent: Color32,
    pub accent_soft: Color32,
    pub success: Color32,
    pub danger: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
}

pub fn palette(mode: ThemeMode) -> Palette {
    match mode {
        ThemeMode::Dark => Palette {
            app_background: Color32::from_rgb(16, 18, 27),
            card_background: Color32::from_rgb(27, 30, 43),
            card_stroke: Color32::from_rgb(48, 52, 70),
            accent: Color32::from_rgb(124, 110, 255),
            accent_soft: Color32::from_rgb(58, 54, 98),
            success: Color32::from_rgb(94, 200, 140),
            danger: Color32::from_rgb(224, 104, 104),
            text_primary: Color32::from_rgb(230, 231, 240),
            text_muted: Color32::from_rgb(146, 150, 168),
        },
        ThemeMode::Light => Palette {
            app_background: Color32::from_rgb(243, 244, 250),
            card_background: Color32::WHITE,
            card_stroke: Color32::from_rgb(216, 219, 232),
            accent: Color32::from_rgb(98, 82, 245),
            accent_soft: Color32::from_rgb(226, 222, 252),
            success: Color32::from_rgb(44, 150, 94),
            danger: Color32::from_rgb(190, 62, 62),
            text_primary: Color32::from_rgb(30, 32, 44),
            text_muted: Color32::from_rgb(110, 114, 132),
        },
    }
}

pub fn visuals_for(mode: ThemeMode) -> Visuals {
    let palette = palette(mode);
    let mut visuals = match mode {
        ThemeMode::Dark => Visuals::dark(),
        ThemeMode::Light => Visuals::light(),
    };
    visuals.panel_fill = palette.app_background;
    visuals.window_fill = palette.card_background;
    visuals.extreme_bg_color = palette.app_background;
    visuals.selection.bg_fill = palette.accent_soft;
    visuals.hyperlink_color = palette.accent;
    visuals.widgets.noninteractive.bg_stroke.color = palette.card_stroke;
    visuals
}
