//! Dispatch module for slide navigation key presses
//!
//! On macOS key presses are injected with CGEvent. Elsewhere they are only
//! logged.

mod keys;
#[cfg(target_os = "macos")]
mod macos;

pub use keys::SlideKey;
#[cfg(target_os = "macos")]
pub use macos::MacKeyDispatcher;

use tracing::info;

/// Fire-and-forget key press sink
pub trait KeyDispatcher {
    fn press(&mut self, key: SlideKey) -> Result<(), DispatchError>;
}

/// Errors that can occur while injecting key events
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to create event source - check Accessibility permissions")]
    EventSource,

    #[error("failed to create key event for {0}")]
    EventCreation(SlideKey),
}

/// Dispatcher for platforms without key injection support
#[derive(Debug, Default)]
pub struct LogDispatcher;

impl KeyDispatcher for LogDispatcher {
    fn press(&mut self, key: SlideKey) -> Result<(), DispatchError> {
        info!(%key, "key press (injection not supported on this platform)");
        Ok(())
    }
}

/// The key dispatcher for the current platform
pub fn platform_dispatcher() -> Box<dyn KeyDispatcher> {
    #[cfg(target_os = "macos")]
    {
        Box::new(MacKeyDispatcher::new())
    }
    #[cfg(not(target_os = "macos"))]
    {
        Box::new(LogDispatcher)
    }
}
