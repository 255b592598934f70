//! Frame scheduler.
//!
//! Wraps one [`TaskQueue`](crate::queue::TaskQueue) keyed by [`TileGroup`]
//! and spends the time left in the current frame on pending tile work,
//! group by group, in priority order. Intended usage:
//! - the host render loop calls [`FrameScheduler::process_pending`] once per
//!   frame, after rendering, with the frame's start timestamp
//! - producers submit tasks through [`FrameScheduler::queue_mut`]
//! - when throttled work remains, the scheduler fires the redraw callback so
//!   the host schedules another frame

mod fps;
mod frame_scheduler;
mod group;

pub use fps::FpsTarget;
pub use frame_scheduler::{FrameScheduler, SchedStats, SchedulerConfig};
pub use group::TileGroup;
