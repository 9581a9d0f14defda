//! The capture → detect → dispatch → display loop
//!
//! Runs synchronously on the calling thread, one iteration per frame. The
//! loop owns its collaborators, so the camera and window are released when
//! it returns, whether it stopped normally or on an error.

use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::capture::{CaptureError, CaptureSource};
use crate::display::DisplaySink;
use crate::hand::{DetectError, LandmarkSource};
use crate::lifecycle::StopFlag;

use super::slide::{SlideController, TickOutcome};

/// Pause after a failed frame read before trying again
const READ_RETRY_DELAY: Duration = Duration::from_millis(10);

/// Why the loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The quit key was pressed or the window closed
    QuitKey,
    /// A shutdown signal raised the stop flag
    Stopped,
    /// The landmark source has no more frames
    LandmarksExhausted,
}

/// Counters collected over a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoopReport {
    pub exit: ExitReason,
    pub frames: u64,
    pub dropped: u64,
    pub dispatched: u64,
}

/// Frame loop wiring the collaborators to the slide controller
pub struct FrameLoop {
    capture: Box<dyn CaptureSource>,
    landmarks: Box<dyn LandmarkSource>,
    display: Box<dyn DisplaySink>,
    controller: SlideController,
    stop: StopFlag,
    clock: Box<dyn FnMut() -> Instant>,
}

impl FrameLoop {
    pub fn new(
        capture: Box<dyn CaptureSource>,
        landmarks: Box<dyn LandmarkSource>,
        display: Box<dyn DisplaySink>,
        controller: SlideController,
        stop: StopFlag,
    ) -> Self {
        Self {
            capture,
            landmarks,
            display,
            controller,
            stop,
            clock: Box::new(Instant::now),
        }
    }

    /// Replace the wall clock used to timestamp frames from untimed sources
    pub fn with_clock(mut self, clock: impl FnMut() -> Instant + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    /// Run until quit, stop signal or end of landmark input
    pub fn run(mut self) -> Result<LoopReport, CaptureError> {
        let mut frames = 0;
        let mut dropped = 0;
        let mut dispatched = 0;

        info!("frame loop started");

        let exit = loop {
            if self.stop.is_raised() {
                break ExitReason::Stopped;
            }

            let frame = match self.capture.read() {
                Ok(frame) => frame,
                Err(CaptureError::FrameRead(reason)) => {
                    dropped += 1;
                    warn!(%reason, "frame read failed, skipping");
                    self.controller.frame_dropped();
                    if self.display.poll_quit_key() {
                        break ExitReason::QuitKey;
                    }
                    thread::sleep(READ_RETRY_DELAY);
                    continue;
                }
                Err(e) => return Err(e),
            };
            frames += 1;

            let hands = match self.landmarks.detect(&frame) {
                Ok(hands) => hands,
                Err(DetectError::Exhausted) => break ExitReason::LandmarksExhausted,
                Err(e) => {
                    debug!(?e, "landmark detection failed, treating as no hand");
                    Vec::new()
                }
            };

            // A timed trace runs on its own timeline from the controller's start
            let now = match self.landmarks.frame_offset() {
                Some(offset) => self.controller.started() + offset,
                None => (self.clock)(),
            };
            if let TickOutcome::Dispatched(_) = self.controller.tick(&hands, now) {
                dispatched += 1;
            }

            if let Err(e) = self.display.show(&frame, &hands) {
                warn!(?e, "display update failed");
            }
            if self.display.poll_quit_key() {
                break ExitReason::QuitKey;
            }
        };

        info!(?exit, frames, dropped, dispatched, "frame loop stopped");

        Ok(LoopReport {
            exit,
            frames,
            dropped,
            dispatched,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;

    use tokio::sync::broadcast;

    use super::*;
    use crate::capture::Frame;
    use crate::dispatch::LogDispatcher;
    use crate::display::DisplayError;
    use crate::events::ControlEvent;
    use crate::gesture::DEFAULT_COOLDOWN;
    use crate::display::HeadlessDisplay;
    use crate::hand::{synthesize_hand, DetectorConfig, Hand, ReplaySource, TraceFrame};

    /// Yields scripted read results, then blank frames forever
    struct ScriptedCapture {
        script: VecDeque<Result<Frame, CaptureError>>,
        released: Arc<AtomicBool>,
    }

    impl CaptureSource for ScriptedCapture {
        fn read(&mut self) -> Result<Frame, CaptureError> {
            self.script
                .pop_front()
                .unwrap_or_else(|| Ok(Frame::filled(4, 4, 0)))
        }
    }

    impl Drop for ScriptedCapture {
        fn drop(&mut self) {
            self.released.store(true, Ordering::SeqCst);
        }
    }

    /// Yields scripted detections, then reports exhaustion
    struct ScriptedHands(VecDeque<Result<Vec<Hand>, DetectError>>);

    impl LandmarkSource for ScriptedHands {
        fn detect(&mut self, _frame: &Frame) -> Result<Vec<Hand>, DetectError> {
            self.0.pop_front().unwrap_or(Err(DetectError::Exhausted))
        }
    }

    /// Counts shown frames and asks to quit after `quit_after` of them
    struct CountingDisplay {
        shown: Arc<AtomicUsize>,
        quit_after: Option<usize>,
    }

    impl DisplaySink for CountingDisplay {
        fn show(&mut self, _frame: &Frame, _hands: &[Hand]) -> Result<(), DisplayError> {
            self.shown.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn poll_quit_key(&mut self) -> bool {
            self.quit_after
                .map_or(false, |n| self.shown.load(Ordering::SeqCst) >= n)
        }
    }

    struct Fixture {
        released: Arc<AtomicBool>,
        shown: Arc<AtomicUsize>,
        stop: StopFlag,
        events: broadcast::Receiver<ControlEvent>,
    }

    fn build(
        capture: Vec<Result<Frame, CaptureError>>,
        hands: Vec<Result<Vec<Hand>, DetectError>>,
        quit_after: Option<usize>,
    ) -> (FrameLoop, Fixture) {
        let released = Arc::new(AtomicBool::new(false));
        let shown = Arc::new(AtomicUsize::new(0));
        let stop = StopFlag::new();
        let (tx, events) = broadcast::channel(64);

        // Each frame is 100ms apart, starting well past the startup cooldown
        let t0 = Instant::now();
        let mut tick = 10;
        let clock = move || {
            tick += 1;
            t0 + Duration::from_millis(tick * 100)
        };

        let controller =
            SlideController::new(60.0, DEFAULT_COOLDOWN, t0, Box::new(LogDispatcher), tx);
        let frame_loop = FrameLoop::new(
            Box::new(ScriptedCapture {
                script: capture.into(),
                released: Arc::clone(&released),
            }),
            Box::new(ScriptedHands(hands.into())),
            Box::new(CountingDisplay {
                shown: Arc::clone(&shown),
                quit_after,
            }),
            controller,
            stop.clone(),
        )
        .with_clock(clock);

        (
            frame_loop,
            Fixture {
                released,
                shown,
                stop,
                events,
            },
        )
    }

    fn one_hand(x: f32) -> Result<Vec<Hand>, DetectError> {
        Ok(vec![synthesize_hand(x, 0.5)])
    }

    #[test]
    fn test_swipe_dispatched_once_then_exhausted() {
        let (frame_loop, fixture) = build(
            vec![],
            vec![one_hand(0.5), one_hand(0.6), one_hand(0.6), one_hand(0.6)],
            None,
        );

        let report = frame_loop.run().unwrap();
        assert_eq!(report.exit, ExitReason::LandmarksExhausted);
        assert_eq!(report.dispatched, 1);
        assert_eq!(report.frames, 5);
        assert_eq!(fixture.shown.load(Ordering::SeqCst), 4);
        assert!(fixture.released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_failed_reads_are_skipped() {
        let (frame_loop, mut fixture) = build(
            vec![
                Err(CaptureError::FrameRead("timeout".into())),
                Err(CaptureError::FrameRead("timeout".into())),
            ],
            vec![one_hand(0.5)],
            None,
        );

        let report = frame_loop.run().unwrap();
        assert_eq!(report.dropped, 2);
        assert_eq!(report.exit, ExitReason::LandmarksExhausted);
        assert_eq!(fixture.shown.load(Ordering::SeqCst), 1);
        assert_eq!(fixture.events.try_recv().unwrap(), ControlEvent::FrameDropped);
    }

    #[test]
    fn test_unavailable_capture_is_fatal_and_released() {
        let (frame_loop, fixture) = build(
            vec![Err(CaptureError::Unavailable {
                index: 0,
                reason: "unplugged".into(),
            })],
            vec![],
            None,
        );

        assert!(matches!(frame_loop.run(), Err(CaptureError::Unavailable { .. })));
        assert!(fixture.released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_detection_failure_counts_as_no_hand() {
        let (frame_loop, _fixture) = build(
            vec![],
            vec![
                one_hand(0.5),
                Err(DetectError::Backend("model crashed".into())),
                one_hand(0.4),
            ],
            None,
        );

        let report = frame_loop.run().unwrap();
        assert_eq!(report.dispatched, 1);
    }

    #[test]
    fn test_quit_key_stops_loop() {
        let hands = (0..100).map(|_| one_hand(0.5)).collect();
        let (frame_loop, fixture) = build(vec![], hands, Some(3));

        let report = frame_loop.run().unwrap();
        assert_eq!(report.exit, ExitReason::QuitKey);
        assert_eq!(report.frames, 3);
        assert!(fixture.released.load(Ordering::SeqCst));
    }

    #[test]
    fn test_stop_flag_checked_before_each_frame() {
        let (frame_loop, fixture) = build(vec![], vec![one_hand(0.5)], None);
        fixture.stop.raise();

        let report = frame_loop.run().unwrap();
        assert_eq!(report.exit, ExitReason::Stopped);
        assert_eq!(report.frames, 0);
        assert_eq!(fixture.shown.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_timed_trace_replays_on_its_own_clock() {
        // Ten seconds at 30 fps, swiping right at 3s and left at 7s
        let trace: String = (0..300u64)
            .map(|i| {
                let x = match i {
                    0..=89 => 0.5,
                    90..=209 => 0.6,
                    _ => 0.45,
                };
                let frame = TraceFrame {
                    t_ms: Some(i * 1000 / 30),
                    hands: vec![synthesize_hand(x, 0.5)],
                };
                serde_json::to_string(&frame).unwrap() + "\n"
            })
            .collect();

        let (tx, _events) = broadcast::channel(64);
        let controller = SlideController::new(
            60.0,
            DEFAULT_COOLDOWN,
            Instant::now(),
            Box::new(LogDispatcher),
            tx,
        );
        let frame_loop = FrameLoop::new(
            Box::new(ScriptedCapture {
                script: VecDeque::new(),
                released: Arc::new(AtomicBool::new(false)),
            }),
            Box::new(ReplaySource::new(
                std::io::Cursor::new(trace),
                DetectorConfig::default(),
            )),
            Box::new(HeadlessDisplay),
            controller,
            StopFlag::new(),
        );

        let report = frame_loop.run().unwrap();
        assert_eq!(report.exit, ExitReason::LandmarksExhausted);
        assert_eq!(report.frames, 301);
        assert_eq!(report.dispatched, 2);
    }
}
