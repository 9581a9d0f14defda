//! Hand module for landmark data and landmark sources
//!
//! Landmark detection itself happens outside this crate. Hands arrive either
//! from the pointer simulation or from a JSON-lines trace written by an
//! external detector.

mod filter;
mod landmark;
mod replay;
mod sim;
mod source;

pub use filter::{select_single, HandSelection};
pub use landmark::{index, Hand, Landmark, HAND_CONNECTIONS, HAND_LANDMARK_COUNT};
pub use replay::{ReplaySource, TraceFrame};
pub use sim::{synthesize_hand, PointerHands, PointerInput};
pub use source::{DetectError, DetectorConfig, LandmarkSource};
