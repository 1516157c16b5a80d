//! Platform abstraction layer
//!
//! Host-side plumbing between the outside world and the simulation:
//! - Frame/interval clocks
//! - Input events

pub mod clock;
pub mod input;

pub use clock::{Clocks, FrameLoop, IntervalTimer};
pub use input::{InputAction, map_key};
