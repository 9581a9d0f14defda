//! Gesture module for swipe recognition
//!
//! Provides the swipe detector state machine and the cooldown gate that
//! rate-limits the actions it triggers:
//! - Unanchored: no hand seen yet
//! - Tracking: measuring fingertip travel against the baseline
//! - ArmedForReset: swipe completed, baseline rebased on the next frame

mod cooldown;
mod swipe;

pub use cooldown::{CooldownGate, DEFAULT_COOLDOWN};
pub use swipe::{Baseline, Gesture, Phase, SwipeDetector, COORDINATE_SCALE, DEFAULT_SWIPE_THRESHOLD};
