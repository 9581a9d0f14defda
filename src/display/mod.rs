//! Display module for the preview window
//!
//! The frame loop hands each frame and its detected hands to a
//! [`DisplaySink`], then polls it for the quit key.

mod overlay;
mod window;

pub use window::WindowDisplay;

use tracing::trace;

use crate::capture::Frame;
use crate::hand::Hand;

/// Title of the preview window
pub const WINDOW_TITLE: &str = "Hand Gesture Control";

/// Anything that can present frames and report a quit request
pub trait DisplaySink {
    /// Render `frame` with `hands` overlaid
    fn show(&mut self, frame: &Frame, hands: &[Hand]) -> Result<(), DisplayError>;

    /// Whether the user asked to quit since the last poll
    fn poll_quit_key(&mut self) -> bool;
}

/// Errors that can occur while presenting frames
#[derive(Debug, thiserror::Error)]
pub enum DisplayError {
    #[error("failed to open preview window: {0}")]
    Create(String),

    #[error("failed to update preview window: {0}")]
    Update(String),
}

/// Display that renders nothing; the loop only stops on a signal
#[derive(Debug, Default)]
pub struct HeadlessDisplay;

impl DisplaySink for HeadlessDisplay {
    fn show(&mut self, frame: &Frame, hands: &[Hand]) -> Result<(), DisplayError> {
        trace!(width = frame.width, height = frame.height, hands = hands.len(), "frame");
        Ok(())
    }

    fn poll_quit_key(&mut self) -> bool {
        false
    }
}
