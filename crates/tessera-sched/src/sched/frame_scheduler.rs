use std::time::{Duration, Instant};

use crate::queue::{QueueConfig, Task, TaskQueue};
use crate::time::frame_interval;

use super::{FpsTarget, TileGroup};

/// Scheduler construction options.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Slice of the frame interval reserved for other per-frame work
    /// (input, compositing, the host's own bookkeeping).
    pub safety_margin: Duration,

    /// Initial throttling state. Off means every tick drains the queue.
    pub throttling: bool,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            safety_margin: Duration::from_millis(2),
            throttling: false,
        }
    }
}

/// Monotonic per-scheduler counters, for host instrumentation.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct SchedStats {
    /// `process_pending` calls.
    pub ticks: u64,
    /// Ticks taken with throttling enabled.
    pub throttled_ticks: u64,
    /// Times the redraw callback fired.
    pub redraws_requested: u64,
    /// Throttled ticks that began with no budget left (the frame was already
    /// over target before scheduling started).
    pub zero_budget_ticks: u64,
}

/// Spends the time left in the current frame on pending tile work.
///
/// Owns one [`TaskQueue`] keyed by [`TileGroup`]. The host render loop calls
/// [`process_pending`](Self::process_pending) once per frame, after
/// rendering, so the elapsed-time measurement reflects the true render cost
/// of that frame. While throttling is enabled, admission stops once the
/// frame budget is spent; while disabled, every tick drains the queue.
///
/// The redraw callback installed at construction is invoked when a throttled
/// tick leaves work pending, so the host schedules another frame even when
/// nothing else changed.
pub struct FrameScheduler {
    queue: TaskQueue<TileGroup>,
    fps: FpsTarget,
    request_redraw: Box<dyn FnMut()>,
    throttling: bool,
    safety_margin: Duration,
    stats: SchedStats,
}

impl FrameScheduler {
    /// Creates a scheduler with default [`SchedulerConfig`].
    ///
    /// `fps` stays shared with the host; retuning it takes effect on the
    /// next tick.
    pub fn new(fps: FpsTarget, request_redraw: impl FnMut() + 'static) -> Self {
        Self::with_config(fps, request_redraw, SchedulerConfig::default())
    }

    pub fn with_config(
        fps: FpsTarget,
        request_redraw: impl FnMut() + 'static,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            queue: TaskQueue::new(QueueConfig {
                groups: TileGroup::SERVICE_ORDER.to_vec(),
                sort: None,
            }),
            fps,
            request_redraw: Box::new(request_redraw),
            throttling: config.throttling,
            safety_margin: config.safety_margin,
            stats: SchedStats::default(),
        }
    }

    /// The underlying queue, for inspection.
    pub fn queue(&self) -> &TaskQueue<TileGroup> {
        &self.queue
    }

    /// The underlying queue; producers submit tasks through this.
    pub fn queue_mut(&mut self) -> &mut TaskQueue<TileGroup> {
        &mut self.queue
    }

    pub fn throttling_enabled(&self) -> bool {
        self.throttling
    }

    /// Takes effect on the next `process_pending` call.
    pub fn set_throttling_enabled(&mut self, enabled: bool) {
        self.throttling = enabled;
    }

    /// Snapshot of the scheduler counters.
    pub fn stats(&self) -> SchedStats {
        self.stats
    }

    /// Per-tick entry point. Call once per frame, after rendering, with the
    /// timestamp the frame started at.
    ///
    /// Prunes expired tasks, restores priority order, then admits work:
    /// budgeted group by group while throttled, or a full drain (creation
    /// first) while unthrottled.
    pub fn process_pending(&mut self, frame_start: Instant) {
        self.stats.ticks += 1;
        self.queue.update();

        if self.throttling {
            self.process_throttled(frame_start);
        } else {
            // Elapsed time is ignored; everything pending runs now.
            for group in TileGroup::SERVICE_ORDER {
                let pending = self.queue.group_len(group);
                self.queue.process_next(group, None, pending);
            }
        }
    }

    fn process_throttled(&mut self, frame_start: Instant) {
        self.stats.throttled_ticks += 1;

        let interval = frame_interval(self.fps.effective());
        let mut available = interval
            .saturating_sub(frame_start.elapsed())
            .saturating_sub(self.safety_margin);

        if available.is_zero() {
            self.stats.zero_budget_ticks += 1;
        }
        log::trace!(
            "throttled tick: budget {available:?}, {} pending",
            self.queue.len()
        );

        // How many tasks the admission predicate has been asked about this
        // tick. Must stay a counter, not a first-iteration check: both
        // groups are consulted per round, and only the very first task
        // overall gets the overrun pass.
        let mut considered = 0u32;

        while !available.is_zero() && !self.queue.is_empty() {
            // Charges each candidate's cost against the remaining budget.
            // The first task considered in a tick is admitted even if it
            // overruns: a tick must always make progress, or one slow frame
            // would starve the queue forever.
            let mut should_process = |task: &Task<TileGroup>| {
                considered += 1;
                available = available.saturating_sub(task.cost_or_default());
                !available.is_zero() || considered == 1
            };

            for group in TileGroup::SERVICE_ORDER {
                if self.queue.group_len(group) > 0 {
                    self.queue.process_next(group, Some(&mut should_process), 1);
                }
            }
        }

        if !self.queue.is_empty() {
            log::debug!(
                "budget spent with {} tasks pending, requesting redraw",
                self.queue.len()
            );
            (self.request_redraw)();
            self.stats.redraws_requested += 1;
        }
    }
}
