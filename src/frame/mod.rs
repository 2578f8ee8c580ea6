//! Per-frame orchestration: timestamps to deltas, physics stepping, adapter updates.

pub use self::clock::{FrameClock, WallClock};
pub use self::driver::{Controls, FaultPolicy, FrameContext, FrameDriver, FrameReport};

mod clock;
mod driver;
