//! Swipe detector state machine
//!
//! Tracks the horizontal position of the index and middle fingertips against
//! a baseline and reports a swipe once both have moved past the threshold in
//! the same direction.
//!
//! ```text
//!  Unanchored ──first hand──▶ Tracking ──both deltas > threshold──▶ ArmedForReset
//!                                ▲                                        │
//!                                └──────── next tick: rebase ◀────────────┘
//! ```
//!
//! An ambiguous swipe (magnitude confirmed, fingers moving apart) arms and
//! rebases within the same tick since no gesture is reported for it.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Fingertip coordinates are scaled by this factor before comparison
pub const COORDINATE_SCALE: f32 = 1000.0;

/// Default minimum travel of both fingertips, in scaled units
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 60.0;

/// Direction of a completed swipe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    Left,
    Right,
}

impl std::fmt::Display for Gesture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gesture::Left => write!(f, "left"),
            Gesture::Right => write!(f, "right"),
        }
    }
}

/// Reference fingertip positions, in scaled units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Baseline {
    pub index: f32,
    pub middle: f32,
}

/// Phase of the current swipe cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// No hand observed yet
    Unanchored,
    /// Waiting for both fingertips to travel past the threshold
    Tracking(Baseline),
    /// A swipe completed; the baseline is rebased on the next evaluation
    ArmedForReset(Baseline),
}

/// Detects left/right swipes from per-frame fingertip positions
#[derive(Debug, Clone)]
pub struct SwipeDetector {
    phase: Phase,
    threshold: f32,
}

impl Default for SwipeDetector {
    fn default() -> Self {
        Self::new(DEFAULT_SWIPE_THRESHOLD)
    }
}

impl SwipeDetector {
    /// Create a detector with `threshold` in scaled units
    pub fn new(threshold: f32) -> Self {
        Self {
            phase: Phase::Unanchored,
            threshold,
        }
    }

    /// Current phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Current baseline, if one has been set
    pub fn baseline(&self) -> Option<Baseline> {
        match self.phase {
            Phase::Unanchored => None,
            Phase::Tracking(baseline) | Phase::ArmedForReset(baseline) => Some(baseline),
        }
    }

    /// Evaluate one frame
    ///
    /// `index_x` and `middle_x` are normalized fingertip x-coordinates. While
    /// `cooling_down` is set no new swipe can complete, but a pending rebase
    /// still happens.
    pub fn evaluate(&mut self, index_x: f32, middle_x: f32, cooling_down: bool) -> Option<Gesture> {
        let current = Baseline {
            index: index_x * COORDINATE_SCALE,
            middle: middle_x * COORDINATE_SCALE,
        };

        let baseline = match self.phase {
            Phase::Unanchored => {
                debug!(index = current.index, middle = current.middle, "baseline set");
                self.phase = Phase::Tracking(current);
                return None;
            }
            Phase::Tracking(baseline) | Phase::ArmedForReset(baseline) => baseline,
        };

        if matches!(self.phase, Phase::Tracking(_)) && !cooling_down {
            let delta_index = (current.index - baseline.index).abs();
            let delta_middle = (current.middle - baseline.middle).abs();
            trace!(delta_index, delta_middle, "fingertip travel");

            if delta_index > self.threshold && delta_middle > self.threshold {
                self.phase = Phase::ArmedForReset(baseline);

                if current.index > baseline.index && current.middle > baseline.middle {
                    return Some(Gesture::Right);
                }
                if current.index < baseline.index && current.middle < baseline.middle {
                    return Some(Gesture::Left);
                }
                debug!(delta_index, delta_middle, "swipe direction ambiguous");
            }
        }

        if matches!(self.phase, Phase::ArmedForReset(_)) {
            debug!(index = current.index, middle = current.middle, "baseline rebased");
            self.phase = Phase::Tracking(current);
        }

        None
    }
}
