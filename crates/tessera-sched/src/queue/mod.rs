//! Task queue (priority/expiry queue partitioned into groups).
//!
//! Responsibilities:
//! - accept deferred work into declared groups ([`TaskQueue::add`])
//! - prune stale tasks and restore priority order ([`TaskQueue::update`])
//! - hand out bounded batches of work under an admission predicate
//!   ([`TaskQueue::process_next`])
//!
//! The queue has no notion of frames or wall-clock budgets; that lives in
//! [`crate::sched`].

mod task;
mod task_queue;

pub use task::{Task, DEFAULT_TASK_COST};
pub use task_queue::{QueueConfig, QueueCounters, SortFn, TaskQueue};
