//! Damped spring integration for scalar motion values.

/// Integration substep cap. A large `dt` (dropped frame) is split into
/// substeps so semi-implicit Euler stays stable at high stiffness.
const MAX_SUBSTEP: f32 = 1.0 / 120.0;

/// Position/velocity thresholds below which a spring counts as settled.
const REST_EPSILON: f32 = 1e-3;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringParams {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

/// Advance one spring-damper state by `dt` seconds toward `target`.
///
/// Pure and host-agnostic: any frame scheduler can drive it, and tests can
/// step it with synthetic clocks.
pub fn step(
    value: f32,
    velocity: f32,
    target: f32,
    dt: f32,
    params: SpringParams,
) -> (f32, f32) {
    let mut value = value;
    let mut velocity = velocity;
    let mut remaining = dt.max(0.0);
    while remaining > 0.0 {
        let h = remaining.min(MAX_SUBSTEP);
        let accel = (params.stiffness * (target - value) - params.damping * velocity) / params.mass;
        velocity += accel * h;
        value += velocity * h;
        remaining -= h;
    }
    (value, velocity)
}

/// A scalar that smoothly tracks a target.
#[derive(Debug, Clone, Copy)]
pub struct Spring {
    value: f32,
    velocity: f32,
    target: f32,
    params: SpringParams,
}

impl Spring {
    pub fn new(value: f32, target: f32, params: SpringParams) -> Self {
        Self {
            value,
            velocity: 0.0,
            target,
            params,
        }
    }

    /// A spring already settled at `value`.
    pub fn at_rest(value: f32, params: SpringParams) -> Self {
        Self::new(value, value, params)
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to the target and drop all velocity. Used under reduced motion.
    pub fn snap_to_target(&mut self) {
        self.value = self.target;
        self.velocity = 0.0;
    }

    pub fn tick(&mut self, dt: f32) {
        let (value, velocity) = step(self.value, self.velocity, self.target, dt, self.params);
        self.value = value;
        self.velocity = velocity;
        if self.is_at_rest() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }

    pub fn is_at_rest(&self) -> bool {
        (self.value - self.target).abs() < REST_EPSILON && self.velocity.abs() < REST_EPSILON
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::{SPRING_MEDIUM, SPRING_SNAPPY, SPRING_SOFT};

    fn settle(mut spring: Spring, max_steps: usize) -> (Spring, usize) {
        for i in 0..max_steps {
            if spring.is_at_rest() {
                return (spring, i);
            }
            spring.tick(1.0 / 60.0);
        }
        (spring, max_steps)
    }

    #[test]
    fn converges_to_target_within_bounded_steps() {
        for params in [SPRING_SOFT, SPRING_MEDIUM, SPRING_SNAPPY] {
            let spring = Spring::new(0.0, 1.0, params);
            let (settled, steps) = settle(spring, 600);
            assert!(
                settled.is_at_rest(),
                "spring {params:?} still moving after {steps} steps"
            );
            assert!((settled.value() - 1.0).abs() < 1e-2);
        }
    }

    #[test]
    fn overshoot_stays_within_damping_envelope() {
        let mut spring = Spring::new(0.0, 1.0, SPRING_SNAPPY);
        let mut peak = 0.0_f32;
        for _ in 0..600 {
            spring.tick(1.0 / 60.0);
            peak = peak.max(spring.value());
        }
        // Near-critically damped presets may ring once, never wildly.
        assert!(peak < 1.25, "overshot to {peak}");
    }

    #[test]
    fn snap_to_target_is_immediate() {
        let mut spring = Spring::new(0.0, 42.0, SPRING_SOFT);
        spring.snap_to_target();
        assert_eq!(spring.value(), 42.0);
        assert!(spring.is_at_rest());
    }

    #[test]
    fn large_dt_is_substepped_without_blowup() {
        let mut spring = Spring::new(0.0, 1.0, SPRING_SNAPPY);
        spring.tick(0.5);
        assert!(spring.value().is_finite());
        assert!(spring.value() > 0.5);
        assert!(spring.value() < 2.0);
    }

    #[test]
    fn retargeting_mid_flight_tracks_new_target() {
        let mut spring = Spring::new(0.0, 1.0, SPRING_MEDIUM);
        for _ in 0..10 {
            spring.tick(1.0 / 60.0);
        }
        spring.set_target(-1.0);
        let (settled, _) = settle(spring, 600);
        assert!((settled.value() + 1.0).abs() < 1e-2);
    }
}
