use std::fmt;
use std::time::Duration;

/// Cost assumed for a task that carries no estimate (or a zero estimate).
///
/// Budget accounting must always consume a positive amount per task, or a
/// throttled tick could spin forever on "free" tasks.
pub const DEFAULT_TASK_COST: Duration = Duration::from_millis(2);

/// A unit of deferred work, owned by the queue until executed or expired.
///
/// A task belongs to exactly one group for its lifetime and is never mutated
/// by the queue, only removed. Expiry is a lazy predicate: the queue asks it
/// at prune time and again immediately before execution, so a task whose
/// originating condition went stale (a tile scrolled out of view, say) is
/// discarded without running.
///
/// # Example
/// ```rust,ignore
/// let task = Task::new("create", 6.0, move || tile.build_geometry())
///     .cost(Duration::from_millis(3))
///     .expires_if(move || !visible.borrow().contains(&tile_id));
/// ```
pub struct Task<G> {
    group: G,
    priority: f32,
    estimated_cost: Option<Duration>,
    expired: Option<Box<dyn Fn() -> bool>>,
    work: Box<dyn FnOnce()>,
}

impl<G> Task<G> {
    /// Creates a task with no cost estimate and no expiry condition.
    pub fn new(group: G, priority: f32, work: impl FnOnce() + 'static) -> Self {
        Self {
            group,
            priority,
            estimated_cost: None,
            expired: None,
            work: Box::new(work),
        }
    }

    /// Estimated execution time, used for frame-budget accounting.
    pub fn cost(mut self, estimate: Duration) -> Self {
        self.estimated_cost = Some(estimate);
        self
    }

    /// Expiry condition. While it returns `false` the task stays pending;
    /// once it returns `true` the task is discarded at the next prune or
    /// execution attempt, never run.
    pub fn expires_if(mut self, expired: impl Fn() -> bool + 'static) -> Self {
        self.expired = Some(Box::new(expired));
        self
    }

    /// The group this task was submitted under.
    #[inline]
    pub fn group(&self) -> &G {
        &self.group
    }

    /// Priority within the group. Larger sorts first under the default order.
    #[inline]
    pub fn priority(&self) -> f32 {
        self.priority
    }

    /// Raw cost estimate, if one was supplied.
    #[inline]
    pub fn estimated_cost(&self) -> Option<Duration> {
        self.estimated_cost
    }

    /// Cost to charge against a frame budget: the estimate when present and
    /// positive, otherwise [`DEFAULT_TASK_COST`].
    pub fn cost_or_default(&self) -> Duration {
        match self.estimated_cost {
            Some(estimate) if !estimate.is_zero() => estimate,
            _ => DEFAULT_TASK_COST,
        }
    }

    /// Evaluates the expiry predicate. A task without one never expires.
    pub fn is_expired(&self) -> bool {
        self.expired.as_ref().is_some_and(|expired| expired())
    }

    /// Consumes the task and runs its work closure.
    pub fn run(self) {
        (self.work)();
    }
}

impl<G: fmt::Debug> fmt::Debug for Task<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("group", &self.group)
            .field("priority", &self.priority)
            .field("estimated_cost", &self.estimated_cost)
            .field("expires", &self.expired.is_some())
            .finish_non_exhaustive()
    }
}
