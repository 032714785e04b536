//! Pointer-reactive spring pair for magnetic hover and parallax.

use crate::spring::Spring;
use crate::tokens::{MotionConfig, SPRING_POINTER};

/// Two damped scalars (x, y) that lag toward the live pointer offset.
///
/// Feed it the cursor delta from an element's center each frame; on
/// pointer-leave the target resets to zero so the element returns to rest.
#[derive(Debug, Clone)]
pub struct PointerSpring {
    x: Spring,
    y: Spring,
    attraction: f32,
}

impl PointerSpring {
    /// `attraction` scales raw pointer deltas into offset targets
    /// (0.15 gives the subtle magnetic pull used on buttons).
    pub fn new(attraction: f32) -> Self {
        Self {
            x: Spring::at_rest(0.0, SPRING_POINTER),
            y: Spring::at_rest(0.0, SPRING_POINTER),
            attraction,
        }
    }

    pub fn set_offset(&mut self, dx: f32, dy: f32) {
        self.x.set_target(dx * self.attraction);
        self.y.set_target(dy * self.attraction);
    }

    pub fn pointer_left(&mut self) {
        self.x.set_target(0.0);
        self.y.set_target(0.0);
    }

    pub fn tick(&mut self, dt: f32, config: &MotionConfig) {
        if config.reduced_motion {
            self.x.snap_to_target();
            self.y.snap_to_target();
            return;
        }
        self.x.tick(dt);
        self.y.tick(dt);
    }

    pub fn offset(&self) -> (f32, f32) {
        (self.x.value(), self.y.value())
    }

    pub fn is_at_rest(&self) -> bool {
        self.x.is_at_rest() && self.y.is_at_rest()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lags_toward_pointer_then_returns_to_rest() {
        let mut pair = PointerSpring::new(0.15);
        let config = MotionConfig::default();
        pair.set_offset(100.0, -40.0);
        pair.tick(1.0 / 60.0, &config);
        let (x, y) = pair.offset();
        // One frame in: moving toward the scaled target but not there yet.
        assert!(x > 0.0 && x < 15.0);
        assert!(y < 0.0 && y > -6.0);

        pair.pointer_left();
        for _ in 0..600 {
            pair.tick(1.0 / 60.0, &config);
        }
        let (x, y) = pair.offset();
        assert!(x.abs() < 1e-2);
        assert!(y.abs() < 1e-2);
        assert!(pair.is_at_rest());
    }

    #[test]
    fn reduced_motion_snaps_to_target() {
        let mut pair = PointerSpring::new(0.15);
        let config = MotionConfig::new(true);
        pair.set_offset(100.0, 100.0);
        pair.tick(0.0, &config);
        assert_eq!(pair.offset(), (15.0, 15.0));
    }
}
