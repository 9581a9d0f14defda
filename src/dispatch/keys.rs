//! Slide navigation keys
//!
//! Maps gestures to the arrow keys presentation software listens to, along
//! with their macOS virtual key codes.

use serde::{Deserialize, Serialize};

use crate::gesture::Gesture;

/// Virtual key codes from the macOS `Events.h` key table
pub mod keycode {
    /// Left arrow
    pub const LEFT_ARROW: u16 = 0x7B;
    /// Right arrow
    pub const RIGHT_ARROW: u16 = 0x7C;
}

/// A key press issued to move between slides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlideKey {
    /// Previous slide
    Left,
    /// Next slide
    Right,
}

impl SlideKey {
    /// macOS virtual key code for this key
    pub fn keycode(self) -> u16 {
        match self {
            SlideKey::Left => keycode::LEFT_ARROW,
            SlideKey::Right => keycode::RIGHT_ARROW,
        }
    }

    /// What the key does in a slide deck
    pub fn action(self) -> &'static str {
        match self {
            SlideKey::Left => "Previous Slide",
            SlideKey::Right => "Next Slide",
        }
    }
}

impl From<Gesture> for SlideKey {
    fn from(gesture: Gesture) -> Self {
        match gesture {
            Gesture::Left => SlideKey::Left,
            Gesture::Right => SlideKey::Right,
        }
    }
}

impl std::fmt::Display for SlideKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SlideKey::Left => write!(f, "left"),
            SlideKey::Right => write!(f, "right"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gesture_mapping() {
        assert_eq!(SlideKey::from(Gesture::Left), SlideKey::Left);
        assert_eq!(SlideKey::from(Gesture::Right), SlideKey::Right);
    }

    #[test]
    fn test_keycodes() {
        assert_eq!(SlideKey::Left.keycode(), 123);
        assert_eq!(SlideKey::Right.keycode(), 124);
    }

    #[test]
    fn test_actions() {
        assert_eq!(SlideKey::Left.action(), "Previous Slide");
        assert_eq!(SlideKey::Right.action(), "Next Slide");
    }
}
