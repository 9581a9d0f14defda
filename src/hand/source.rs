//! Landmark source abstraction

use std::time::Duration;

use crate::capture::Frame;

use super::landmark::Hand;

/// Confidence thresholds handed to a landmark source once at construction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Minimum score for a hand to be reported at all
    pub min_detection_confidence: f32,
    /// Minimum score for a hand to keep being tracked between frames
    pub min_tracking_confidence: f32,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
        }
    }
}

/// Anything that can find hands in a frame
pub trait LandmarkSource {
    /// Detect all hands visible in `frame`
    fn detect(&mut self, frame: &Frame) -> Result<Vec<Hand>, DetectError>;

    /// Capture time of the last detected frame, relative to the start of the
    /// stream, when the source carries its own timeline
    fn frame_offset(&self) -> Option<Duration> {
        None
    }
}

/// Errors that can occur during landmark detection
#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("landmark backend failed: {0}")]
    Backend(String),

    #[error("landmark stream ended")]
    Exhausted,
}
