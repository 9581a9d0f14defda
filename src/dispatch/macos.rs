//! Synthetic key events using macOS CGEvent
//!
//! Posting events requires the Accessibility permission, same as listening.

use core_graphics::event::{CGEvent, CGEventTapLocation};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use tracing::debug;

use super::keys::SlideKey;
use super::{DispatchError, KeyDispatcher};

/// Posts key down/up pairs at the HID event tap
#[derive(Debug, Default)]
pub struct MacKeyDispatcher;

impl MacKeyDispatcher {
    pub fn new() -> Self {
        Self
    }
}

impl KeyDispatcher for MacKeyDispatcher {
    fn press(&mut self, key: SlideKey) -> Result<(), DispatchError> {
        let source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
            .map_err(|_| DispatchError::EventSource)?;

        for key_down in [true, false] {
            let event = CGEvent::new_keyboard_event(source.clone(), key.keycode(), key_down)
                .map_err(|_| DispatchError::EventCreation(key))?;
            event.post(CGEventTapLocation::HID);
        }

        debug!(%key, keycode = key.keycode(), "key event posted");
        Ok(())
    }
}
