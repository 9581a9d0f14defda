//! Lifecycle module for process shutdown

mod shutdown;

pub use shutdown::{ShutdownSignal, StopFlag};
