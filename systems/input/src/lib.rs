#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Edge-triggered key-state tracking for Gridwalk.
//!
//! Adapters sample the raw "is this key down right now" state once per
//! frame. The tracker turns those samples into [`KeyTransition`] edge
//! events that fire exactly once per transition, while `is_held` stays
//! queryable every frame for continuous actions such as movement.

use std::collections::HashMap;

use gridwalk_core::{KeyCode, KeyTransition};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum KeyState {
    Pressed,
    Released,
}

/// Tracks the last recorded state of every observed key.
///
/// Entries are created lazily on the first state-changing sample; a key
/// that has never been observed compares as released without that
/// substitution ever being persisted. State is never reset mid-run.
#[derive(Clone, Debug, Default)]
pub struct KeyStateTracker {
    states: HashMap<KeyCode, KeyState>,
}

impl KeyStateTracker {
    /// Creates a tracker with no observed keys.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one down-state sample for `key` and reports the edge.
    ///
    /// Returns [`KeyTransition::NoChange`] without mutating anything when
    /// the sample matches the last recorded state; otherwise records the
    /// new state and returns the transition that just occurred.
    pub fn sample(&mut self, key: KeyCode, is_down_now: bool) -> KeyTransition {
        let last = self.states.get(&key).copied().unwrap_or(KeyState::Released);
        let current = if is_down_now {
            KeyState::Pressed
        } else {
            KeyState::Released
        };

        if last == current {
            return KeyTransition::NoChange;
        }

        let _ = self.states.insert(key, current);
        match current {
            KeyState::Pressed => KeyTransition::Pressed,
            KeyState::Released => KeyTransition::Released,
        }
    }

    /// Reports whether the last recorded state of `key` is pressed.
    #[must_use]
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.states.get(&key) == Some(&KeyState::Pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::KeyStateTracker;
    use gridwalk_core::{KeyCode, KeyTransition};

    #[test]
    fn first_down_sample_fires_a_pressed_edge() {
        let mut tracker = KeyStateTracker::new();
        assert_eq!(tracker.sample(KeyCode::W, true), KeyTransition::Pressed);
    }

    #[test]
    fn unobserved_keys_compare_as_released_without_being_recorded() {
        let mut tracker = KeyStateTracker::new();
        assert_eq!(tracker.sample(KeyCode::A, false), KeyTransition::NoChange);
        assert!(!tracker.is_held(KeyCode::A));
        // The released substitution was not persisted: the next down sample
        // still fires the edge.
        assert_eq!(tracker.sample(KeyCode::A, true), KeyTransition::Pressed);
    }

    #[test]
    fn is_held_follows_the_last_recorded_state() {
        let mut tracker = KeyStateTracker::new();
        assert!(!tracker.is_held(KeyCode::D));
        let _ = tracker.sample(KeyCode::D, true);
        assert!(tracker.is_held(KeyCode::D));
        let _ = tracker.sample(KeyCode::D, false);
        assert!(!tracker.is_held(KeyCode::D));
    }

    #[test]
    fn keys_are_tracked_independently() {
        let mut tracker = KeyStateTracker::new();
        assert_eq!(tracker.sample(KeyCode::W, true), KeyTransition::Pressed);
        assert_eq!(tracker.sample(KeyCode::S, true), KeyTransition::Pressed);
        assert_eq!(tracker.sample(KeyCode::W, false), KeyTransition::Released);
        assert!(tracker.is_held(KeyCode::S));
        assert!(!tracker.is_held(KeyCode::W));
    }
}
