//! Single-hand selection
//!
//! Gestures are only evaluated when exactly one complete hand is in view.

use super::landmark::Hand;

/// Outcome of filtering the hands found in one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HandSelection<'a> {
    /// Exactly one complete hand
    Single(&'a Hand),
    /// No hands in view
    Empty,
    /// More than one hand in view, gestures are ignored
    Multiple(usize),
    /// One hand, but not all landmarks were reported
    Incomplete(usize),
}

/// Pick the hand to evaluate, if any
pub fn select_single(hands: &[Hand]) -> HandSelection<'_> {
    match hands {
        [] => HandSelection::Empty,
        [hand] if hand.is_complete() => HandSelection::Single(hand),
        [hand] => HandSelection::Incomplete(hand.landmarks.len()),
        many => HandSelection::Multiple(many.len()),
    }
}
