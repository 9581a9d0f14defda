//! Capture module for reading video frames
//!
//! The frame loop polls a [`CaptureSource`] once per iteration. Without the
//! `camera` feature the only source is a synthetic one used in simulation mode.

mod synthetic;
#[cfg(feature = "camera")]
mod camera;

pub use synthetic::SyntheticCapture;
#[cfg(feature = "camera")]
pub use camera::CameraCapture;

/// A captured image in `0RGB` pixel layout, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<u32>,
}

impl Frame {
    /// Create a frame filled with a single color
    pub fn filled(width: usize, height: usize, color: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width * height],
        }
    }

    /// Build a frame from packed 8-bit RGB triples
    pub fn from_rgb(width: usize, height: usize, rgb: &[u8]) -> Self {
        let pixels = rgb
            .chunks_exact(3)
            .map(|p| (u32::from(p[0]) << 16) | (u32::from(p[1]) << 8) | u32::from(p[2]))
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Write a pixel, ignoring coordinates outside the frame
    pub fn put(&mut self, x: i64, y: i64, color: u32) {
        if x < 0 || y < 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = color;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }
}

/// Anything that yields frames on demand
pub trait CaptureSource {
    /// Read the next frame, blocking until one is available
    fn read(&mut self) -> Result<Frame, CaptureError>;
}

/// Errors that can occur while capturing
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("capture device {index} is unavailable: {reason}")]
    Unavailable { index: u32, reason: String },

    #[error("failed to read frame: {0}")]
    FrameRead(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rgb_packs_pixels() {
        let frame = Frame::from_rgb(2, 1, &[0xFF, 0x00, 0x10, 0x01, 0x02, 0x03]);
        assert_eq!(frame.pixels, vec![0x00FF_0010, 0x0001_0203]);
    }

    #[test]
    fn test_put_clips_outside_frame() {
        let mut frame = Frame::filled(4, 4, 0);
        frame.put(-1, 2, 0xFFFFFF);
        frame.put(4, 0, 0xFFFFFF);
        frame.put(3, 3, 0xABCDEF);
        assert_eq!(frame.pixels.iter().filter(|&&p| p != 0).count(), 1);
        assert_eq!(frame.get(3, 3), Some(0xABCDEF));
    }
}
