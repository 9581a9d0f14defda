//! Landmark trace reader
//!
//! Consumes one JSON object per line, one line per frame:
//!
//! ```text
//! {"t_ms":1033,"hands":[{"landmarks":[{"x":0.41,"y":0.62}, ...],"score":0.93}]}
//! ```
//!
//! This lets an external hand-landmark detector drive the controller through
//! a pipe, and lets recorded sessions be replayed. `t_ms` is the capture time
//! in milliseconds since the first frame. When present it replaces the wall
//! clock, so a recording replays on its own timeline however fast it is read.
//! A line without `t_ms` keeps the previous line's time.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::capture::Frame;

use super::landmark::Hand;
use super::source::{DetectError, DetectorConfig, LandmarkSource};

/// One line of a landmark trace
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraceFrame {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_ms: Option<u64>,
    #[serde(default)]
    pub hands: Vec<Hand>,
}

/// Landmark source backed by a JSON-lines trace
pub struct ReplaySource<R> {
    reader: R,
    config: DetectorConfig,
    line: String,
    line_no: usize,
    /// Whether a hand was reported on the previous frame
    tracking: bool,
    /// Timestamp of the latest frame that carried one
    offset: Option<Duration>,
}

impl ReplaySource<Box<dyn BufRead>> {
    /// Open a trace file, or standard input when `path` is `-`
    pub fn open(path: &Path, config: DetectorConfig) -> io::Result<Self> {
        let reader: Box<dyn BufRead> = if path.as_os_str() == "-" {
            Box::new(BufReader::new(io::stdin()))
        } else {
            Box::new(BufReader::new(File::open(path)?))
        };
        Ok(Self::new(reader, config))
    }
}

impl<R: BufRead> ReplaySource<R> {
    pub fn new(reader: R, config: DetectorConfig) -> Self {
        Self {
            reader,
            config,
            line: String::new(),
            line_no: 0,
            tracking: false,
            offset: None,
        }
    }

    /// Read the next non-blank line
    fn next_frame(&mut self) -> Result<TraceFrame, DetectError> {
        loop {
            self.line.clear();
            let read = self
                .reader
                .read_line(&mut self.line)
                .map_err(|e| DetectError::Backend(e.to_string()))?;
            if read == 0 {
                return Err(DetectError::Exhausted);
            }
            self.line_no += 1;

            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            return serde_json::from_str(trimmed).map_err(|e| {
                DetectError::Backend(format!("trace line {}: {}", self.line_no, e))
            });
        }
    }

    /// Minimum score a hand needs to be reported this frame
    fn threshold(&self) -> f32 {
        if self.tracking {
            self.config.min_tracking_confidence
        } else {
            self.config.min_detection_confidence
        }
    }
}

impl<R: BufRead> LandmarkSource for ReplaySource<R> {
    fn detect(&mut self, _frame: &Frame) -> Result<Vec<Hand>, DetectError> {
        let frame = match self.next_frame() {
            Ok(frame) => frame,
            Err(e) => {
                self.tracking = false;
                return Err(e);
            }
        };

        if let Some(t_ms) = frame.t_ms {
            self.offset = Some(Duration::from_millis(t_ms));
        }

        let threshold = self.threshold();
        let total = frame.hands.len();
        let hands: Vec<Hand> = frame
            .hands
            .into_iter()
            .filter(|hand| hand.score.map_or(true, |score| score >= threshold))
            .collect();

        if hands.len() != total {
            debug!(
                line = self.line_no,
                dropped = total - hands.len(),
                threshold,
                "dropped low-confidence hands"
            );
        }

        self.tracking = !hands.is_empty();
        Ok(hands)
    }

    fn frame_offset(&self) -> Option<Duration> {
        self.offset
    }
}
