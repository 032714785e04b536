//! Host-agnostic motion layer: spring integration, motion tokens, the
//! pointer-reactive spring pair, and the list animation coordinator.
//!
//! Nothing here touches a renderer. Everything advances through explicit
//! `tick(dt)` calls so the whole layer is unit-testable, and every animated
//! value collapses to its end state instantly when reduced motion is on.

pub mod coordinator;
pub mod pointer;
pub mod spring;
pub mod tokens;

pub use coordinator::{ItemMotion, ListAnimationCoordinator, ProgressRing};
pub use pointer::PointerSpring;
pub use spring::{step, Spring, SpringParams};
pub use tokens::{
    CubicBezier, MotionConfig, DURATION_FAST, DURATION_MEDIUM, DURATION_SLOW, EASE_SMOOTH,
    EASE_SOFT, SPRING_COUNTER, SPRING_MEDIUM, SPRING_POINTER, SPRING_SNAPPY, SPRING_SOFT,
    STAGGER_DELAY,
};
