//! Events module for controller activity
//!
//! The controller broadcasts a [`ControlEvent`] whenever something worth
//! reporting happens in the frame loop. The logger task renders them.

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::dispatch::SlideKey;
use crate::gesture::Gesture;

/// Events emitted by the slide controller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControlEvent {
    /// The detector completed a swipe
    SwipeDetected { gesture: Gesture },

    /// A key press was issued
    SlideChanged { key: SlideKey },

    /// A swipe arrived while the cooldown was still running
    SwipeSuppressed {
        gesture: Gesture,
        /// Time left in the cooldown, in milliseconds
        remaining_ms: u64,
    },

    /// Gestures are accepted again
    CooldownEnded,

    /// More than one hand came into view; gestures are ignored
    MultipleHandsIgnored { count: usize },

    /// A frame could not be read and was skipped
    FrameDropped,
}

impl std::fmt::Display for ControlEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ControlEvent::SwipeDetected { gesture } => write!(f, "SWIPE_DETECTED ({})", gesture),
            ControlEvent::SlideChanged { key } => write!(f, "SLIDE_CHANGED ({})", key),
            ControlEvent::SwipeSuppressed {
                gesture,
                remaining_ms,
            } => write!(f, "SWIPE_SUPPRESSED ({}, {}ms left)", gesture, remaining_ms),
            ControlEvent::CooldownEnded => write!(f, "COOLDOWN_ENDED"),
            ControlEvent::MultipleHandsIgnored { count } => {
                write!(f, "MULTIPLE_HANDS_IGNORED ({})", count)
            }
            ControlEvent::FrameDropped => write!(f, "FRAME_DROPPED"),
        }
    }
}

/// Log events until every sender is dropped
///
/// Returns the number of events received.
pub async fn log_events(mut rx: broadcast::Receiver<ControlEvent>) -> usize {
    let mut received = 0;
    loop {
        match rx.recv().await {
            Ok(event) => {
                received += 1;
                match &event {
                    ControlEvent::SlideChanged { key } => info!(%key, "{}", key.action()),
                    ControlEvent::MultipleHandsIgnored { count } => {
                        info!(count, "multiple hands detected, ignoring gestures")
                    }
                    _ => debug!(%event, "control event"),
                }
            }
            Err(broadcast::error::RecvError::Lagged(n)) => {
                warn!(skipped = n, "control event receiver lagged");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
    received
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serialization() {
        let event = ControlEvent::SwipeSuppressed {
            gesture: Gesture::Left,
            remaining_ms: 250,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("swipe_suppressed"));
        assert!(json.contains("\"left\""));
        assert!(json.contains("250"));
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type":"slide_changed","key":"right"}"#;
        let event: ControlEvent = serde_json::from_str(json).unwrap();
        assert_eq!(event, ControlEvent::SlideChanged { key: SlideKey::Right });
    }

    #[test]
    fn test_display() {
        let event = ControlEvent::MultipleHandsIgnored { count: 2 };
        assert_eq!(event.to_string(), "MULTIPLE_HANDS_IGNORED (2)");
    }

    #[test]
    fn test_logger_drains_until_closed() {
        let (tx, rx) = broadcast::channel(8);
        tx.send(ControlEvent::SlideChanged { key: SlideKey::Left }).unwrap();
        tx.send(ControlEvent::CooldownEnded).unwrap();
        drop(tx);

        let received = tokio_test::block_on(log_events(rx));
        assert_eq!(received, 2);
    }
}
