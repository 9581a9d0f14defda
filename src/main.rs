//! slide-swipe: hand swipe gestures for slide navigation
//!
//! Watches a camera feed for a single hand and turns horizontal swipes of
//! the index and middle fingertips into left/right arrow key presses:
//! - Swipe detector state machine with a baseline per swipe cycle
//! - Cooldown gate so one motion moves one slide
//! - Preview window with the landmark overlay, `q` to quit
//!
//! Landmarks come from an external detector through a JSON-lines trace
//! (`SLIDE_SWIPE_LANDMARKS`), or from the pointer simulation in the preview
//! window when no trace is given.

mod capture;
mod config;
mod controller;
mod dispatch;
mod display;
mod events;
mod gesture;
mod hand;
mod lifecycle;

use std::sync::mpsc as std_mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::sync::broadcast;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::capture::CaptureSource;
use crate::config::Config;
use crate::controller::{FrameLoop, SlideController};
use crate::display::{DisplaySink, HeadlessDisplay, WindowDisplay, WINDOW_TITLE};
use crate::events::ControlEvent;
use crate::hand::{LandmarkSource, PointerHands, ReplaySource};
use crate::lifecycle::{ShutdownSignal, StopFlag};

/// Preview window size, also the synthetic frame size
const PREVIEW_WIDTH: usize = 960;
const PREVIEW_HEIGHT: usize = 540;

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "slide-swipe starting"
    );

    // Load configuration
    let config = Config::load()?;
    info!(?config, "configuration loaded");

    // The frame loop owns the main thread (window systems require it), so
    // signals and event logging run on a small runtime beside it
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    let stop = StopFlag::new();
    let (event_tx, event_rx) = broadcast::channel::<ControlEvent>(64);
    let logger = runtime.spawn(events::log_events(event_rx));

    let signal_stop = stop.clone();
    runtime.spawn(async move {
        match ShutdownSignal::new().wait().await {
            Ok(()) => {
                info!("shutdown signal received");
                signal_stop.raise();
            }
            Err(e) => error!(?e, "failed to register signal handlers"),
        }
    });

    let frame_loop = build_frame_loop(&config, event_tx, stop)?;

    info!("initialized, entering frame loop");
    let result = frame_loop.run();

    // The loop dropped the last event sender, so the logger drains and exits
    match runtime.block_on(logger) {
        Ok(count) => debug!(count, "event logger finished"),
        Err(e) => warn!(?e, "event logger failed"),
    }
    runtime.shutdown_background();

    let report = result.context("camera stopped delivering frames")?;
    info!(
        exit = ?report.exit,
        frames = report.frames,
        dropped = report.dropped,
        slides = report.dispatched,
        "slide-swipe stopped"
    );

    Ok(())
}

/// Open the collaborators described by `config` and wire them into a loop
fn build_frame_loop(
    config: &Config,
    event_tx: broadcast::Sender<ControlEvent>,
    stop: StopFlag,
) -> Result<FrameLoop> {
    let (pointer_tx, pointer_rx) = std_mpsc::channel();

    let landmarks: Box<dyn LandmarkSource> = match &config.landmarks {
        Some(path) => {
            info!(?path, "reading landmark trace");
            let source = ReplaySource::open(path, config.detector)
                .with_context(|| format!("failed to open landmark trace {}", path.display()))?;
            Box::new(source)
        }
        None => {
            info!("simulation mode: hold the left mouse button in the preview to place a hand");
            Box::new(PointerHands::new(pointer_rx))
        }
    };
    let pointer_tx = config.landmarks.is_none().then_some(pointer_tx);

    let capture = open_capture(config)?;

    let display: Box<dyn DisplaySink> = if config.headless {
        Box::new(HeadlessDisplay)
    } else {
        Box::new(WindowDisplay::open(WINDOW_TITLE, PREVIEW_WIDTH, PREVIEW_HEIGHT, pointer_tx)?)
    };

    let controller = SlideController::new(
        config.swipe_threshold,
        config.cooldown,
        Instant::now(),
        dispatch::platform_dispatcher(),
        event_tx,
    );

    Ok(FrameLoop::new(capture, landmarks, display, controller, stop))
}

#[cfg(feature = "camera")]
fn open_capture(config: &Config) -> Result<Box<dyn CaptureSource>> {
    let camera = capture::CameraCapture::open(config.camera_index)?;
    if config.landmarks.is_none() {
        warn!(
            camera_index = config.camera_index,
            "no landmark trace: camera frames are only displayed, hands follow the mouse"
        );
    }
    Ok(Box::new(camera))
}

#[cfg(not(feature = "camera"))]
fn open_capture(config: &Config) -> Result<Box<dyn CaptureSource>> {
    info!(
        camera_index = config.camera_index,
        "built without the `camera` feature, using synthetic frames"
    );
    Ok(Box::new(capture::SyntheticCapture::new(PREVIEW_WIDTH, PREVIEW_HEIGHT)))
}
