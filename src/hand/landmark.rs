//! Hand landmark definitions
//!
//! Landmarks follow the standard 21-point hand skeleton numbering: the wrist
//! is index 0, followed by four points per finger from thumb to pinky.

use serde::{Deserialize, Serialize};

/// Number of landmarks in a complete hand
pub const HAND_LANDMARK_COUNT: usize = 21;

/// Landmark indices consumed by the swipe detector
pub mod index {
    /// Wrist
    pub const WRIST: usize = 0;
    /// Index fingertip
    pub const INDEX_FINGER_TIP: usize = 8;
    /// Middle fingertip
    pub const MIDDLE_FINGER_TIP: usize = 12;
}

/// Bone connections between landmark indices, used for drawing the skeleton
pub const HAND_CONNECTIONS: [(usize, usize); 21] = [
    // Palm
    (0, 1),
    (0, 5),
    (5, 9),
    (9, 13),
    (13, 17),
    (0, 17),
    // Thumb
    (1, 2),
    (2, 3),
    (3, 4),
    // Index
    (5, 6),
    (6, 7),
    (7, 8),
    // Middle
    (9, 10),
    (10, 11),
    (11, 12),
    // Ring
    (13, 14),
    (14, 15),
    (15, 16),
    // Pinky
    (17, 18),
    (18, 19),
    (19, 20),
];

/// A single tracked point in normalized image coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    /// Horizontal position, 0.0 at the left edge and 1.0 at the right edge
    pub x: f32,
    /// Vertical position, 0.0 at the top edge and 1.0 at the bottom edge
    pub y: f32,
    /// Relative depth, if the detector provides one
    #[serde(default)]
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y, z: 0.0 }
    }
}

/// One detected hand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hand {
    /// Landmarks in skeleton order
    pub landmarks: Vec<Landmark>,
    /// Detection score reported by the detector, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
}

impl Hand {
    pub fn new(landmarks: Vec<Landmark>) -> Self {
        Self {
            landmarks,
            score: None,
        }
    }

    /// Whether all 21 landmarks are present
    pub fn is_complete(&self) -> bool {
        self.landmarks.len() == HAND_LANDMARK_COUNT
    }

    /// Horizontal positions of the index and middle fingertips
    pub fn fingertips_x(&self) -> Option<(f32, f32)> {
        let index = self.landmarks.get(index::INDEX_FINGER_TIP)?;
        let middle = self.landmarks.get(index::MIDDLE_FINGER_TIP)?;
        Some((index.x, middle.x))
    }
}
