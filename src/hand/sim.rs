//! Pointer-driven hand simulation
//!
//! In simulation mode the preview window forwards the mouse state here as
//! [`PointerInput`] events. Holding the left button places one synthetic hand
//! under the cursor; holding the right button adds a mirrored second hand.

use std::sync::mpsc::Receiver;

use crate::capture::Frame;

use super::landmark::{Hand, Landmark, HAND_LANDMARK_COUNT};
use super::source::{DetectError, LandmarkSource};

/// Landmark offsets from the palm centre, in skeleton order
const HAND_SHAPE: [(f32, f32); HAND_LANDMARK_COUNT] = [
    (0.000, 0.100),
    // Thumb
    (-0.050, 0.070),
    (-0.080, 0.040),
    (-0.100, 0.010),
    (-0.120, -0.020),
    // Index
    (-0.030, 0.000),
    (-0.035, -0.050),
    (-0.040, -0.080),
    (-0.040, -0.110),
    // Middle
    (0.000, 0.000),
    (0.000, -0.055),
    (0.000, -0.090),
    (0.000, -0.120),
    // Ring
    (0.030, 0.000),
    (0.035, -0.050),
    (0.040, -0.080),
    (0.040, -0.100),
    // Pinky
    (0.055, 0.010),
    (0.065, -0.030),
    (0.070, -0.055),
    (0.075, -0.075),
];

/// Mouse state sampled by the preview window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerInput {
    /// Cursor position, normalized to the window
    pub x: f32,
    pub y: f32,
    /// Left button held
    pub primary: bool,
    /// Right button held
    pub secondary: bool,
}

/// Landmark source that synthesizes hands from pointer input
pub struct PointerHands {
    rx: Receiver<PointerInput>,
    last: PointerInput,
}

impl PointerHands {
    pub fn new(rx: Receiver<PointerInput>) -> Self {
        Self {
            rx,
            last: PointerInput::default(),
        }
    }
}

impl LandmarkSource for PointerHands {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Hand>, DetectError> {
        while let Ok(input) = self.rx.try_recv() {
            self.last = input;
        }

        let mut hands = Vec::new();
        if self.last.primary || self.last.secondary {
            hands.push(synthesize_hand(self.last.x, self.last.y));
        }
        if self.last.secondary {
            hands.push(synthesize_hand(1.0 - self.last.x, self.last.y));
        }
        Ok(hands)
    }
}

/// Build a complete open hand with its palm centred at `(x, y)`
pub fn synthesize_hand(x: f32, y: f32) -> Hand {
    let landmarks = HAND_SHAPE
        .iter()
        .map(|&(dx, dy)| Landmark::new(x + dx, y + dy))
        .collect();
    Hand::new(landmarks)
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::hand::index;

    fn blank() -> Frame {
        Frame::filled(1, 1, 0)
    }

    #[test]
    fn test_no_hands_without_buttons() {
        let (tx, rx) = mpsc::channel();
        let mut source = PointerHands::new(rx);
        tx.send(PointerInput { x: 0.5, y: 0.5, ..Default::default() }).unwrap();
        assert!(source.detect(&blank()).unwrap().is_empty());
    }

    #[test]
    fn test_primary_button_places_one_hand() {
        let (tx, rx) = mpsc::channel();
        let mut source = PointerHands::new(rx);
        tx.send(PointerInput { x: 0.5, y: 0.5, primary: true, secondary: false }).unwrap();

        let hands = source.detect(&blank()).unwrap();
        assert_eq!(hands.len(), 1);
        assert!(hands[0].is_complete());
        let middle = hands[0].landmarks[index::MIDDLE_FINGER_TIP];
        assert!((middle.x - 0.5).abs() < 1e-6);
        assert!(hands[0].landmarks[index::WRIST].y > middle.y);
    }

    #[test]
    fn test_secondary_button_places_two_hands() {
        let (tx, rx) = mpsc::channel();
        let mut source = PointerHands::new(rx);
        tx.send(PointerInput { x: 0.3, y: 0.5, primary: false, secondary: true }).unwrap();
        assert_eq!(source.detect(&blank()).unwrap().len(), 2);
    }

    #[test]
    fn test_latest_input_wins_and_persists() {
        let (tx, rx) = mpsc::channel();
        let mut source = PointerHands::new(rx);
        tx.send(PointerInput { x: 0.2, y: 0.5, primary: true, secondary: false }).unwrap();
        tx.send(PointerInput { x: 0.7, y: 0.5, primary: true, secondary: false }).unwrap();

        let first = source.detect(&blank()).unwrap();
        let second = source.detect(&blank()).unwrap();
        assert_eq!(first, second);
        let (_, middle_x) = first[0].fingertips_x().unwrap();
        assert!((middle_x - 0.7).abs() < 1e-6);
    }
}
