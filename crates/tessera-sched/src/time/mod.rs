//! Frame timing utilities.
//!
//! Everything a host loop needs to call the scheduler correctly:
//! - one [`FrameClock`] per render loop, ticked once per presented frame
//! - [`FrameTime::started`] is the timestamp to hand to
//!   [`process_pending`](crate::sched::FrameScheduler::process_pending)
//! - [`frame_interval`] is the per-frame target shared by budget math and
//!   frame pacing

mod frame_clock;

pub use frame_clock::{frame_interval, FrameClock, FrameTime};
