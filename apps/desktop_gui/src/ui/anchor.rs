//! Shared-element morph across the auth -> dashboard boundary. The auth
//! card records its rect every frame; when sign-in succeeds an overlay
//! shell glides from that rect to the dashboard header's rect, so the two
//! screens read as one continuous surface.

use egui::Rect;
use motion::{MotionConfig, Spring, EASE_SMOOTH, SPRING_MEDIUM};

pub struct AnchorMorph {
    source: Option<Rect>,
    target: Option<Rect>,
    progress: Spring,
    active: bool,
}

impl AnchorMorph {
    pub fn new() -> Self {
        Self {
            source: None,
            target: None,
            progress: Spring::at_rest(0.0, SPRING_MEDIUM),
            active: false,
        }
    }

    /// Called every frame the auth card is visible.
    pub fn note_auth_rect(&mut self, rect: Rect) {
        self.source = Some(rect);
    }

    /// Called every frame the dashboard header is visible.
    pub fn note_header_rect(&mut self, rect: Rect) {
        self.target = Some(rect);
    }

    /// Start the morph on the Auth -> App transition. Without a recorded
    /// source rect, or under reduced motion, the morph completes instantly.
    pub fn begin(&mut self, config: &MotionConfig) {
        self.progress = Spring::new(0.0, 1.0, SPRING_MEDIUM);
        if config.reduced_motion || self.source.is_none() {
            self.progress.snap_to_target();
            self.active = false;
        } else {
            self.active = true;
        }
    }

    pub fn tick(&mut self, dt: f32, config: &MotionConfig) {
        if !self.active {
            return;
        }
        if config.reduced_motion {
            self.progress.snap_to_target();
        } else {
            self.progress.tick(dt);
        }
        if self.progress.is_at_rest() {
            self.active = false;
        }
    }

    /// The overlay rect while the morph runs.
    pub fn overlay_rect(&self) -> Option<Rect> {
        if !self.active {
            return None;
        }
        let source = self.source?;
        let target = self.target?;
        let t = EASE_SMOOTH.ease(self.progress.value().clamp(0.0, 1.0));
        Some(Rect::from_min_max(
            source.min + (target.min - source.min) * t,
            source.max + (target.max - source.max) * t,
        ))
    }

    pub fn is_animating(&self) -> bool {
        self.active
    }

    /// Sign-out discards recorded geometry; the next run records afresh.
    pub fn reset(&mut self) {
        self.source = None;
        self.target = None;
        self.progress = Spring::at_rest(0.0, SPRING_MEDIUM);
        self.active = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::pos2;

    fn rect(x: f32, y: f32, w: f32, h: f32) -> Rect {
        Rect::from_min_size(pos2(x, y), egui::vec2(w, h))
    }

    #[test]
    fn morph_travels_from_source_to_target() {
        let config = MotionConfig::new(false);
        let mut morph = AnchorMorph::new();
        morph.note_auth_rect(rect(100.0, 200.0, 300.0, 150.0));
        morph.note_header_rect(rect(0.0, 0.0, 800.0, 60.0));
        morph.begin(&config);
        assert!(morph.is_animating());

        let first = morph.overlay_rect().expect("overlay while active");
        assert!((first.min.x - 100.0).abs() < 1.0);

        for _ in 0..600 {
            morph.tick(1.0 / 60.0, &config);
        }
        assert!(!morph.is_animating());
        assert!(morph.overlay_rect().is_none());
    }

    #[test]
    fn reduced_motion_skips_the_morph_entirely() {
        let config = MotionConfig::new(true);
        let mut morph = AnchorMorph::new();
        morph.note_auth_rect(rect(0.0, 0.0, 10.0, 10.0));
        morph.note_header_rect(rect(50.0, 50.0, 10.0, 10.0));
        morph.begin(&config);
        assert!(!morph.is_animating());
        assert!(morph.overlay_rect().is_none());
    }

    #[test]
    fn missing_source_rect_means_no_overlay() {
        let config = MotionConfig::new(false);
        let mut morph = AnchorMorph::new();
        morph.note_header_rect(rect(0.0, 0.0, 10.0, 10.0));
        morph.begin(&config);
        assert!(!morph.is_animating());
    }
}
