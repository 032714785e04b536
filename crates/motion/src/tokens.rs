//! Process-wide motion tokens: durations, eased curves, spring presets, and
//! the reduced-motion switch. The registry itself holds no per-instance
//! state; animated components read these constants and keep their own
//! springs.

use crate::spring::SpringParams;

/// Durations in seconds.
pub const DURATION_FAST: f32 = 0.35;
pub const DURATION_MEDIUM: f32 = 0.6;
pub const DURATION_SLOW: f32 = 1.0;

/// Per-item delay increment for staggered list entrances.
pub const STAGGER_DELAY: f32 = 0.05;

pub const SPRING_SOFT: SpringParams = SpringParams {
    stiffness: 120.0,
    damping: 18.0,
    mass: 0.8,
};
pub const SPRING_MEDIUM: SpringParams = SpringParams {
    stiffness: 160.0,
    damping: 20.0,
    mass: 0.7,
};
pub const SPRING_SNAPPY: SpringParams = SpringParams {
    stiffness: 240.0,
    damping: 20.0,
    mass: 0.6,
};
/// Loose spring driving magnetic hover; deliberately underweight so the
/// element lags behind the cursor.
pub const SPRING_POINTER: SpringParams = SpringParams {
    stiffness: 120.0,
    damping: 15.0,
    mass: 0.4,
};
/// Heavier spring for numeric counters and the progress ring.
pub const SPRING_COUNTER: SpringParams = SpringParams {
    stiffness: 120.0,
    damping: 20.0,
    mass: 1.0,
};

/// Cubic bezier easing with fixed endpoints (0,0) and (1,1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

pub const EASE_SMOOTH: CubicBezier = CubicBezier {
    x1: 0.22,
    y1: 1.0,
    x2: 0.36,
    y2: 1.0,
};
pub const EASE_SOFT: CubicBezier = CubicBezier {
    x1: 0.16,
    y1: 1.0,
    x2: 0.3,
    y2: 1.0,
};

impl CubicBezier {
    fn axis(t: f32, p1: f32, p2: f32) -> f32 {
        let u = 1.0 - t;
        3.0 * u * u * t * p1 + 3.0 * u * t * t * p2 + t * t * t
    }

    /// Evaluate the curve at horizontal position `u` in `[0, 1]`.
    ///
    /// Solves x(t) = u by bisection (the x polynomial is monotonic for
    /// control points inside the unit square), then samples y(t).
    pub fn ease(&self, u: f32) -> f32 {
        let u = u.clamp(0.0, 1.0);
        let mut lo = 0.0_f32;
        let mut hi = 1.0_f32;
        let mut t = u;
        for _ in 0..24 {
            let x = Self::axis(t, self.x1, self.x2);
            if (x - u).abs() < 1e-5 {
                break;
            }
            if x < u {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) * 0.5;
        }
        Self::axis(t, self.y1, self.y2)
    }
}

/// Reduced-motion flag consulted by every ticked animation. When set, all
/// animated values snap to their targets in zero time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionConfig {
    pub reduced_motion: bool,
}

impl MotionConfig {
    pub fn new(reduced_motion: bool) -> Self {
        Self { reduced_motion }
    }

    /// Read `LUCID_REDUCE_MOTION` from the environment (`1`/`true`).
    pub fn from_env() -> Self {
        let reduced = std::env::var("LUCID_REDUCE_MOTION")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);
        if reduced {
            tracing::info!("reduced motion enabled; transitions will snap to end state");
        }
        Self::new(reduced)
    }
}
