//! Preview window using `minifb`

use std::sync::mpsc::Sender;

use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};
use tracing::{debug, info};

use crate::capture::Frame;
use crate::hand::{Hand, PointerInput};

use super::overlay::draw_hands;
use super::{DisplayError, DisplaySink};

/// Cap on window updates per second, which also bounds the quit key polling
const UPDATE_RATE_FPS: usize = 1000;

/// Window showing the camera frame with the landmark overlay
pub struct WindowDisplay {
    window: Window,
    canvas: Frame,
    /// Forwards mouse state to the pointer simulation
    pointer_tx: Option<Sender<PointerInput>>,
}

impl WindowDisplay {
    pub fn open(
        title: &str,
        width: usize,
        height: usize,
        pointer_tx: Option<Sender<PointerInput>>,
    ) -> Result<Self, DisplayError> {
        let mut window = Window::new(
            title,
            width,
            height,
            WindowOptions {
                resize: true,
                ..WindowOptions::default()
            },
        )
        .map_err(|e| DisplayError::Create(e.to_string()))?;

        window.set_target_fps(UPDATE_RATE_FPS);
        info!(title, width, height, "preview window opened");

        Ok(Self {
            window,
            canvas: Frame::filled(width, height, 0),
            pointer_tx,
        })
    }

    fn forward_pointer(&mut self) {
        let Some(tx) = &self.pointer_tx else {
            return;
        };
        let Some((mx, my)) = self.window.get_mouse_pos(MouseMode::Clamp) else {
            return;
        };

        let (w, h) = self.window.get_size();
        let input = PointerInput {
            x: mx / w.max(1) as f32,
            y: my / h.max(1) as f32,
            primary: self.window.get_mouse_down(MouseButton::Left),
            secondary: self.window.get_mouse_down(MouseButton::Right),
        };
        if tx.send(input).is_err() {
            debug!("pointer simulation gone, no longer forwarding input");
            self.pointer_tx = None;
        }
    }
}

impl DisplaySink for WindowDisplay {
    fn show(&mut self, frame: &Frame, hands: &[Hand]) -> Result<(), DisplayError> {
        self.canvas.clone_from(frame);
        draw_hands(&mut self.canvas, hands);

        self.window
            .update_with_buffer(&self.canvas.pixels, self.canvas.width, self.canvas.height)
            .map_err(|e| DisplayError::Update(e.to_string()))?;

        self.forward_pointer();
        Ok(())
    }

    fn poll_quit_key(&mut self) -> bool {
        !self.window.is_open() || self.window.is_key_pressed(Key::Q, KeyRepeat::No)
    }
}

impl Drop for WindowDisplay {
    fn drop(&mut self) {
        debug!("preview window closed");
    }
}
