//! Controller module driving slides from camera frames
//!
//! [`SlideController`] holds all gesture state and handles one frame of
//! hands at a time; [`FrameLoop`] feeds it from the capture and landmark
//! sources and presents the result.

mod frame_loop;
mod slide;

pub use frame_loop::{ExitReason, FrameLoop, LoopReport};
pub use slide::{SlideController, TickOutcome};
