//! Entrance/exit/reorder animation state for the visible task list.
//!
//! The coordinator only reads the derived view (a sequence of ids) and owns
//! per-item animation metadata keyed by id. It never owns the items
//! themselves.

use std::collections::HashMap;
use std::hash::Hash;

use crate::spring::Spring;
use crate::tokens::{MotionConfig, SPRING_COUNTER, SPRING_MEDIUM, STAGGER_DELAY};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemMotion {
    Entering,
    Settled,
    Exiting,
}

#[derive(Debug)]
struct ItemState {
    motion: ItemMotion,
    /// Seconds until a staggered entrance starts moving.
    delay: f32,
    /// 0 = fully hidden, 1 = fully shown.
    visibility: Spring,
    /// Offset from the item's current rank, in rank units, decaying to 0.
    rank_offset: Spring,
    last_rank: usize,
}

impl ItemState {
    fn entering(rank: usize) -> Self {
        Self {
            motion: ItemMotion::Entering,
            delay: rank as f32 * STAGGER_DELAY,
            visibility: Spring::new(0.0, 1.0, SPRING_MEDIUM),
            rank_offset: Spring::at_rest(0.0, SPRING_MEDIUM),
            last_rank: rank,
        }
    }
}

/// Diffs consecutive derived views and drives one spring set per visible id.
#[derive(Debug)]
pub struct ListAnimationCoordinator<K> {
    items: HashMap<K, ItemState>,
    order: Vec<K>,
}

impl<K: Copy + Eq + Hash> Default for ListAnimationCoordinator<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Copy + Eq + Hash> ListAnimationCoordinator<K> {
    pub fn new() -> Self {
        Self {
            items: HashMap::new(),
            order: Vec::new(),
        }
    }

    /// Reconcile against the new visible id sequence. Ids seen for the
    /// first time get a staggered entrance, ids that vanished fade out, and
    /// ids whose rank changed glide to the new slot without replaying their
    /// entrance.
    pub fn sync(&mut self, visible: &[K]) {
        if visible == self.order.as_slice() {
            return;
        }
        let old_ranks: HashMap<K, usize> = self
            .order
            .iter()
            .enumerate()
            .map(|(rank, k)| (*k, rank))
            .collect();

        for (rank, key) in visible.iter().enumerate() {
            match self.items.get_mut(key) {
                Some(state) if state.motion == ItemMotion::Exiting => {
                    // Came back before the exit finished; fade back in from
                    // wherever the fade-out left it.
                    state.motion = ItemMotion::Entering;
                    state.delay = 0.0;
                    state.visibility.set_target(1.0);
                    state.last_rank = rank;
                }
                Some(state) => {
                    if let Some(&old_rank) = old_ranks.get(key) {
                        if old_rank != rank {
                            let jump = old_rank as f32 - rank as f32;
                            let carried = state.rank_offset.value() + jump;
                            state.rank_offset = Spring::new(carried, 0.0, SPRING_MEDIUM);
                        }
                    }
                    state.last_rank = rank;
                }
                None => {
                    self.items.insert(*key, ItemState::entering(rank));
                }
            }
        }

        for (key, state) in self.items.iter_mut() {
            if !visible.contains(key) && state.motion != ItemMotion::Exiting {
                state.motion = ItemMotion::Exiting;
                state.delay = 0.0;
                state.visibility.set_target(0.0);
            }
        }

        self.order = visible.to_vec();
    }

    pub fn tick(&mut self, dt: f32, config: &MotionConfig) {
        if config.reduced_motion {
            for state in self.items.values_mut() {
                state.delay = 0.0;
                state.visibility.snap_to_target();
                state.rank_offset.snap_to_target();
                if state.motion == ItemMotion::Entering {
                    state.motion = ItemMotion::Settled;
                }
            }
            self.items
                .retain(|_, state| state.motion != ItemMotion::Exiting);
            return;
        }

        for state in self.items.values_mut() {
            if state.delay > 0.0 {
                state.delay -= dt;
                continue;
            }
            state.visibility.tick(dt);
            state.rank_offset.tick(dt);
            if state.motion == ItemMotion::Entering && state.visibility.is_at_rest() {
                state.motion = ItemMotion::Settled;
            }
        }
        self.items
            .retain(|_, state| state.motion != ItemMotion::Exiting || !state.visibility.is_at_rest());
    }

    /// Visibility in [0, 1]; unknown ids render fully visible.
    pub fn visibility(&self, key: &K) -> f32 {
        self.items
            .get(key)
            .map(|state| state.visibility.value().clamp(0.0, 1.0))
            .unwrap_or(1.0)
    }

    /// Rank displacement in rank units (0 once the reorder glide settles).
    pub fn rank_offset(&self, key: &K) -> f32 {
        self.items
            .get(key)
            .map(|state| state.rank_offset.value())
            .unwrap_or(0.0)
    }

    pub fn motion(&self, key: &K) -> Option<ItemMotion> {
        self.items.get(key).map(|state| state.motion)
    }

    /// Ids currently fading out, with the rank they last occupied, so the
    /// view can paint them on top of the reflowed list.
    pub fn exiting(&self) -> Vec<(K, usize)> {
        self.items
            .iter()
            .filter(|(_, state)| state.motion == ItemMotion::Exiting)
            .map(|(key, state)| (*key, state.last_rank))
            .collect()
    }

    pub fn is_animating(&self) -> bool {
        self.items.values().any(|state| {
            state.delay > 0.0
                || !state.visibility.is_at_rest()
                || !state.rank_offset.is_at_rest()
        })
    }
}

/// Spring-animated completion fraction for the circular progress indicator.
#[derive(Debug, Clone)]
pub struct ProgressRing {
    spring: Spring,
}

impl Default for ProgressRing {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressRing {
    pub fn new() -> Self {
        Self {
            spring: Spring::at_rest(0.0, SPRING_COUNTER),
        }
    }

    /// `completed / total`, defined as 0 when total is 0.
    pub fn set_fraction(&mut self, completed: usize, total: usize) {
        let fraction = if total == 0 {
            0.0
        } else {
            completed as f32 / total as f32
        };
        self.spring.set_target(fraction.clamp(0.0, 1.0));
    }

    pub fn tick(&mut self, dt: f32, config: &MotionConfig) {
        if config.reduced_motion {
            self.spring.snap_to_target();
        } else {
            self.spring.tick(dt);
        }
    }

    /// Always inside [0, 1] even while the spring is mid-flight.
    pub fn fraction(&self) -> f32 {
        self.spring.value().clamp(0.0, 1.0)
    }

    pub fn is_animating(&self) -> bool {
        !self.spring.is_at_rest()
    }
}
