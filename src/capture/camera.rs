//! Webcam capture via `nokhwa`

use nokhwa::pixel_format::RgbFormat;
use nokhwa::utils::{CameraIndex, RequestedFormat, RequestedFormatType};
use nokhwa::Camera;
use tracing::{debug, info, warn};

use super::{CaptureError, CaptureSource, Frame};

/// A webcam stream; the stream is stopped when this is dropped
pub struct CameraCapture {
    camera: Camera,
    index: u32,
}

impl CameraCapture {
    /// Open the camera at `index` and start streaming
    pub fn open(index: u32) -> Result<Self, CaptureError> {
        let unavailable = |e: nokhwa::NokhwaError| CaptureError::Unavailable {
            index,
            reason: e.to_string(),
        };

        let requested =
            RequestedFormat::new::<RgbFormat>(RequestedFormatType::AbsoluteHighestFrameRate);
        let mut camera = Camera::new(CameraIndex::Index(index), requested).map_err(unavailable)?;
        camera.open_stream().map_err(unavailable)?;

        info!(index, format = ?camera.camera_format(), "camera stream opened");

        Ok(Self { camera, index })
    }
}

impl CaptureSource for CameraCapture {
    fn read(&mut self) -> Result<Frame, CaptureError> {
        let buffer = self
            .camera
            .frame()
            .map_err(|e| CaptureError::FrameRead(e.to_string()))?;
        let image = buffer
            .decode_image::<RgbFormat>()
            .map_err(|e| CaptureError::FrameRead(e.to_string()))?;

        Ok(Frame::from_rgb(
            image.width() as usize,
            image.height() as usize,
            image.as_raw(),
        ))
    }
}

impl Drop for CameraCapture {
    fn drop(&mut self) {
        match self.camera.stop_stream() {
            Ok(()) => debug!(index = self.index, "camera released"),
            Err(e) => warn!(index = self.index, ?e, "failed to stop camera stream"),
        }
    }
}
