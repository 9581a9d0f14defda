//! Per-frame gesture handling
//!
//! Runs the single-hand filter, swipe detector, cooldown gate and dispatcher
//! for one frame's worth of hands.

use std::time::{Duration, Instant};

use tokio::sync::broadcast;
use tracing::{debug, warn};

use crate::dispatch::{KeyDispatcher, SlideKey};
use crate::events::ControlEvent;
use crate::gesture::{CooldownGate, Gesture, SwipeDetector};
use crate::hand::{select_single, Hand, HandSelection};

/// What happened to the hands of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing to evaluate, or nothing detected
    Idle,
    /// Gestures skipped because several hands are in view
    MultipleHands(usize),
    /// A swipe was detected but the cooldown held it back
    Suppressed(Gesture),
    /// A key press was issued
    Dispatched(SlideKey),
}

/// Owns all swipe state for the frame loop
pub struct SlideController {
    detector: SwipeDetector,
    gate: CooldownGate,
    dispatcher: Box<dyn KeyDispatcher>,
    event_tx: broadcast::Sender<ControlEvent>,
    /// Whether the previous frame had more than one hand
    saw_multiple: bool,
    started: Instant,
}

impl SlideController {
    /// Create a controller whose cooldown clock starts at `started`
    pub fn new(
        threshold: f32,
        cooldown: Duration,
        started: Instant,
        dispatcher: Box<dyn KeyDispatcher>,
        event_tx: broadcast::Sender<ControlEvent>,
    ) -> Self {
        Self {
            detector: SwipeDetector::new(threshold),
            gate: CooldownGate::new(cooldown, started),
            dispatcher,
            event_tx,
            saw_multiple: false,
            started,
        }
    }

    /// Instant the cooldown clock was started from
    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn detector(&self) -> &SwipeDetector {
        &self.detector
    }

    pub fn gate(&self) -> &CooldownGate {
        &self.gate
    }

    /// Process the hands detected in one frame at time `now`
    pub fn tick(&mut self, hands: &[Hand], now: Instant) -> TickOutcome {
        let outcome = self.evaluate(hands, now);

        if self.gate.refresh(now) {
            self.emit(ControlEvent::CooldownEnded);
        }

        outcome
    }

    /// Report a frame that could not be read
    pub fn frame_dropped(&self) {
        self.emit(ControlEvent::FrameDropped);
    }

    fn evaluate(&mut self, hands: &[Hand], now: Instant) -> TickOutcome {
        let hand = match select_single(hands) {
            HandSelection::Single(hand) => hand,
            HandSelection::Multiple(count) => {
                if !self.saw_multiple {
                    self.emit(ControlEvent::MultipleHandsIgnored { count });
                }
                self.saw_multiple = true;
                debug!(count, "multiple hands in view");
                return TickOutcome::MultipleHands(count);
            }
            HandSelection::Incomplete(points) => {
                self.saw_multiple = false;
                debug!(points, "incomplete hand skipped");
                return TickOutcome::Idle;
            }
            HandSelection::Empty => {
                self.saw_multiple = false;
                return TickOutcome::Idle;
            }
        };
        self.saw_multiple = false;

        let Some((index_x, middle_x)) = hand.fingertips_x() else {
            return TickOutcome::Idle;
        };

        let Some(gesture) = self.detector.evaluate(index_x, middle_x, self.gate.is_active())
        else {
            return TickOutcome::Idle;
        };
        self.emit(ControlEvent::SwipeDetected { gesture });

        if !self.gate.permits(now) {
            let remaining_ms = self.gate.remaining(now).as_millis() as u64;
            debug!(%gesture, remaining_ms, "swipe suppressed by cooldown");
            self.emit(ControlEvent::SwipeSuppressed {
                gesture,
                remaining_ms,
            });
            return TickOutcome::Suppressed(gesture);
        }

        let key = SlideKey::from(gesture);
        if let Err(e) = self.dispatcher.press(key) {
            warn!(%key, ?e, "key press failed");
        }
        self.gate.record(now);
        self.emit(ControlEvent::SlideChanged { key });

        TickOutcome::Dispatched(key)
    }

    fn emit(&self, event: ControlEvent) {
        // No receivers is fine, events are informational
        let _ = self.event_tx.send(event);
    }
}
