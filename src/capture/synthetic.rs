//! Synthetic capture used in simulation mode

use super::{CaptureError, CaptureSource, Frame};

const BACKGROUND: u32 = 0x1A1A2E;
const GRID: u32 = 0x2A2A44;
const GRID_SPACING: usize = 40;

/// Produces a fixed backdrop so the overlay has something to draw on
pub struct SyntheticCapture {
    backdrop: Frame,
}

impl SyntheticCapture {
    pub fn new(width: usize, height: usize) -> Self {
        let mut backdrop = Frame::filled(width, height, BACKGROUND);
        for y in 0..height {
            for x in 0..width {
                if x % GRID_SPACING == 0 || y % GRID_SPACING == 0 {
                    backdrop.pixels[y * width + x] = GRID;
                }
            }
        }
        Self { backdrop }
    }
}

impl CaptureSource for SyntheticCapture {
    fn read(&mut self) -> Result<Frame, CaptureError> {
        Ok(self.backdrop.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_synthetic_frames_have_requested_size() {
        let mut capture = SyntheticCapture::new(64, 48);
        let frame = capture.read().unwrap();
        assert_eq!((frame.width, frame.height), (64, 48));
        assert_eq!(frame.pixels.len(), 64 * 48);
        assert_eq!(frame.get(0, 0), Some(GRID));
        assert_eq!(frame.get(1, 1), Some(BACKGROUND));
    }
}
