use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

use super::Task;

/// Comparator deciding which of two tasks sorts first within a group.
///
/// Returning [`Ordering::Less`] places `a` ahead of `b` in processing order.
pub type SortFn<G> = Box<dyn Fn(&Task<G>, &Task<G>) -> Ordering>;

/// Queue construction options.
///
/// `groups` is the full set of partitions the queue will ever accept; tasks
/// submitted under any other group are rejected at [`TaskQueue::add`].
///
/// `sort` overrides the within-group order. When absent, tasks sort by
/// descending priority (larger first).
pub struct QueueConfig<G> {
    pub groups: Vec<G>,
    pub sort: Option<SortFn<G>>,
}

impl<G> Default for QueueConfig<G> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            sort: None,
        }
    }
}

/// Monotonic per-queue counters, for host instrumentation.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq)]
pub struct QueueCounters {
    /// Tasks accepted by `add`.
    pub added: u64,
    /// Tasks refused by `add` (undeclared group).
    pub rejected: u64,
    /// Tasks whose work closure ran.
    pub executed: u64,
    /// Tasks discarded by expiry, whether pruned by `update` or skipped at
    /// execution time.
    pub expired: u64,
}

/// Priority/expiry queue partitioned into groups declared at construction.
///
/// Ordering is amortized: `add` appends in O(1) and establishes no order;
/// [`update`](Self::update) prunes expired tasks and restores priority order
/// for every group. Call it once per tick before extracting work.
///
/// The queue exclusively owns its pending tasks; callers pass task values in
/// and get results out, never references into the storage.
pub struct TaskQueue<G> {
    groups: HashMap<G, Vec<Task<G>>>,
    sort: Option<SortFn<G>>,
    counters: QueueCounters,
}

impl<G: Copy + Eq + Hash + fmt::Debug> TaskQueue<G> {
    pub fn new(config: QueueConfig<G>) -> Self {
        let mut groups = HashMap::with_capacity(config.groups.len());
        for group in config.groups {
            groups.insert(group, Vec::new());
        }

        Self {
            groups,
            sort: config.sort,
            counters: QueueCounters::default(),
        }
    }

    /// Appends a task to its group's pending sequence.
    ///
    /// Returns `false` (and discards the task) if the group was not declared
    /// at construction. No ordering is established here; that happens in
    /// [`update`](Self::update).
    pub fn add(&mut self, task: Task<G>) -> bool {
        let group = *task.group();
        match self.groups.get_mut(&group) {
            Some(tasks) => {
                tasks.push(task);
                self.counters.added += 1;
                true
            }
            None => {
                log::warn!("task rejected: group {group:?} was not declared");
                self.counters.rejected += 1;
                false
            }
        }
    }

    /// Prunes every currently-expired task (without running it) and restores
    /// priority order in every group.
    ///
    /// The sort is stable: equal-priority tasks keep their insertion order.
    pub fn update(&mut self) {
        let mut expired = 0u64;

        for tasks in self.groups.values_mut() {
            tasks.retain(|task| {
                let stale = task.is_expired();
                if stale {
                    expired += 1;
                }
                !stale
            });

            match &self.sort {
                Some(sort) => tasks.sort_by(|a, b| sort(a, b)),
                None => tasks.sort_by(|a, b| {
                    // Descending priority; NaN priorities keep insertion order.
                    b.priority()
                        .partial_cmp(&a.priority())
                        .unwrap_or(Ordering::Equal)
                }),
            }
        }

        self.counters.expired += expired;
    }

    /// Total pending count across all groups.
    pub fn len(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }

    /// Pending count for one group. Unknown groups report 0.
    pub fn group_len(&self, group: G) -> usize {
        self.groups.get(&group).map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.groups.values().all(Vec::is_empty)
    }

    /// Executes up to `max_count` tasks from the front of `group`.
    ///
    /// Walking from the head: an expired task is discarded without running
    /// and without counting toward `max_count`. Otherwise the admission
    /// predicate (if any) is asked; a rejection stops the whole call — later
    /// tasks are not considered. An admitted task is removed and run to
    /// completion before the next candidate is looked at.
    ///
    /// Returns `true` iff at least one task executed during this call.
    pub fn process_next(
        &mut self,
        group: G,
        mut should_process: Option<&mut dyn FnMut(&Task<G>) -> bool>,
        max_count: usize,
    ) -> bool {
        let Some(tasks) = self.groups.get_mut(&group) else {
            return false;
        };

        let mut executed = 0u64;
        let mut expired = 0u64;

        while (executed as usize) < max_count && !tasks.is_empty() {
            // Expiry is re-checked here: time has passed since the last
            // `update`, and stale work must never run even if it slipped
            // through pruning.
            if tasks[0].is_expired() {
                tasks.remove(0);
                expired += 1;
                continue;
            }

            if let Some(pred) = should_process.as_mut() {
                if !pred(&tasks[0]) {
                    break;
                }
            }

            let task = tasks.remove(0);
            task.run();
            executed += 1;
        }

        self.counters.executed += executed;
        self.counters.expired += expired;

        executed > 0
    }

    /// Runs the head task of `group`, unconditionally. Shorthand for
    /// `process_next(group, None, 1)`.
    pub fn process_one(&mut self, group: G) -> bool {
        self.process_next(group, None, 1)
    }

    /// Snapshot of the queue counters.
    pub fn counters(&self) -> QueueCounters {
        self.counters
    }
}

impl<G: fmt::Debug> fmt::Debug for TaskQueue<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut pending = f.debug_map();
        for (group, tasks) in &self.groups {
            pending.entry(group, &tasks.len());
        }
        pending.finish()?;
        write!(f, " {:?}", self.counters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Task that appends its priority to `log` when executed.
    fn logged(group: &'static str, prio: f32, log: &Rc<RefCell<Vec<i32>>>) -> Task<&'static str> {
        let log = Rc::clone(log);
        Task::new(group, prio, move || log.borrow_mut().push(prio as i32))
    }

    // ── add ───────────────────────────────────────────────────────────────

    #[test]
    fn empty_queue_has_nothing_to_process() {
        let mut queue: TaskQueue<&str> = TaskQueue::new(QueueConfig::default());
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(!queue.process_one("g1"));
    }

    #[test]
    fn add_to_undeclared_group_is_rejected() {
        let mut queue = TaskQueue::new(QueueConfig {
            groups: vec!["g2"],
            sort: None,
        });

        assert!(!queue.add(Task::new("g1", 6.0, || {})));
        assert_eq!(queue.len(), 0);
        assert!(!queue.process_one("g2"));
        assert!(!queue.process_one("g1"));
        assert_eq!(queue.counters().rejected, 1);
        assert_eq!(queue.counters().added, 0);
    }

    #[test]
    fn add_and_process_single_task() {
        let mut queue = TaskQueue::new(QueueConfig {
            groups: vec!["g1", "g2"],
            sort: None,
        });
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);

        assert!(queue.add(Task::new("g1", 6.0, move || flag.set(true))));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.group_len("g1"), 1);
        assert_eq!(queue.group_len("g2"), 0);
        assert_eq!(queue.group_len("unknown"), 0);

        assert!(!queue.process_one("g2"));
        assert!(queue.process_one("g1"));
        assert!(ran.get());
        assert_eq!(queue.len(), 0);
        assert!(!queue.process_one("g1"));
    }

    // ── update: ordering ──────────────────────────────────────────────────

    #[test]
    fn update_sorts_descending_priority_by_default() {
        let mut queue = TaskQueue::new(QueueConfig {
            groups: vec!["g1", "g2"],
            sort: None,
        });
        let log = Rc::new(RefCell::new(Vec::new()));

        queue.add(logged("g1", 6.0, &log));
        queue.add(logged("g1", 8.0, &log));
        queue.add(logged("g1", 3.0, &log));

        queue.update();
        assert!(queue.process_one("g1"));
        assert!(queue.process_one("g1"));
        assert!(queue.process_one("g1"));
        assert!(!queue.process_one("g1"));
        assert_eq!(*log.borrow(), vec![8, 6, 3]);
    }

    #[test]
    fn update_respects_custom_comparator() {
        // Ascending priority: smaller runs first.
        let mut queue = TaskQueue::new(QueueConfig {
            groups: vec!["g1"],
            sort: Some(Box::new(|a, b| {
                a.priority().total_cmp(&b.priority())
            })),
        });
        let log = Rc::new(RefCell::new(Vec::new()));

        queue.add(logged("g1", 6.0, &log));
        queue.add(logged("g1", 8.0, &log));
        queue.add(logged("g1", 3.0, &log));

        queue.update();
        while queue.process_one("g1") {}
        assert_eq!(*log.borrow(), vec![3, 6, 8]);
    }

    #[test]
    fn update_keeps_insertion_order_for_equal_priorities() {
        let mut queue = TaskQueue::new(QueueConfig {
            groups: vec!["g1"],
            sort: None,
        });
        let log = Rc::new(RefCell::new(Vec::new()));

        for tag in [1, 2, 3] {
            let log = Rc::clone(&log);
            queue.add(Task::new("g1", 5.0, move || log.borrow_mut().push(tag)));
        }

        queue.update();
        while queue.process_one("g1") {}
        assert_eq!(*log.borrow(), vec![1, 2, 3]);
    }

    // ── update: expiry ────────────────────────────────────────────────────

    #[test]
    fn update_prunes_expired_without_running() {
        let mut queue = TaskQueue::new(QueueConfig {
            groups: vec!["g1"],
            sort: None,
        });
        let log = Rc::new(RefCell::new(Vec::new()));

        queue.add(logged("g1", 6.0, &log).expires_if(|| true));
        queue.add(logged("g1", 7.0, &log).expires_if(|| false));
        queue.add(logged("g1", 8.0, &log).expires_if(|| true));

        assert_eq!(queue.len(), 3);
        queue.update();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.counters().expired, 2);

        assert!(queue.process_one("g1"));
        assert_eq!(*log.borrow(), vec![7]);
    }

    // ── process_next ──────────────────────────────────────────────────────

    #[test]
    fn process_next_skips_freshly_expired_head() {
        // Expires between `update` and `process_next`: caught at execution
        // time, discarded for free (does not count toward max_count).
        let mut queue = TaskQueue::new(QueueConfig {
            groups: vec!["g1"],
            sort: None,
        });
        let log = Rc::new(RefCell::new(Vec::new()));
        let stale = Rc::new(Cell::new(false));

        let flag = Rc::clone(&stale);
        queue.add(logged("g1", 9.0, &log).expires_if(move || flag.get()));
        queue.add(logged("g1", 4.0, &log));
        queue.update();

        stale.set(true);
        assert!(queue.process_next("g1", None, 1));
        assert_eq!(*log.borrow(), vec![4]);
        assert_eq!(queue.len(), 0);
        assert_eq!(queue.counters().expired, 1);
        assert_eq!(queue.counters().executed, 1);
    }

    #[test]
    fn process_next_honors_max_count() {
        let mut queue = TaskQueue::new(QueueConfig {
            groups: vec!["g1"],
            sort: None,
        });
        let log = Rc::new(RefCell::new(Vec::new()));

        for prio in [1.0, 2.0, 3.0, 4.0] {
            queue.add(logged("g1", prio, &log));
        }
        queue.update();

        assert!(queue.process_next("g1", None, 3));
        assert_eq!(*log.borrow(), vec![4, 3, 2]);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn process_next_stops_at_first_rejection() {
        let mut queue = TaskQueue::new(QueueConfig {
            groups: vec!["g1"],
            sort: None,
        });
        let log = Rc::new(RefCell::new(Vec::new()));

        for prio in [5.0, 6.0, 7.0] {
            queue.add(logged("g1", prio, &log));
        }
        queue.update();

        // Admit the head, reject the second candidate. The third must not be
        // considered even though the predicate would accept it.
        let mut asked = 0;
        let mut admit_first = |_: &Task<&str>| {
            asked += 1;
            asked != 2
        };
        assert!(queue.process_next("g1", Some(&mut admit_first), 10));
        assert_eq!(asked, 2);
        assert_eq!(*log.borrow(), vec![7]);
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn process_next_returns_false_when_head_rejected() {
        let mut queue = TaskQueue::new(QueueConfig {
            groups: vec!["g1"],
            sort: None,
        });
        queue.add(Task::new("g1", 1.0, || {}));
        queue.update();

        let mut reject_all = |_: &Task<&str>| false;
        assert!(!queue.process_next("g1", Some(&mut reject_all), 5));
        assert_eq!(queue.len(), 1);
    }

    // ── counters ──────────────────────────────────────────────────────────

    #[test]
    fn pending_count_balances_against_counters() {
        let mut queue = TaskQueue::new(QueueConfig {
            groups: vec!["g1", "g2"],
            sort: None,
        });

        for prio in 0..6 {
            queue.add(Task::new("g1", prio as f32, || {}));
        }
        queue.add(Task::new("g2", 1.0, || {}).expires_if(|| true));
        queue.add(Task::new("nope", 1.0, || {}));

        queue.update();
        queue.process_next("g1", None, 2);

        let c = queue.counters();
        assert_eq!(c.added, 7);
        assert_eq!(c.rejected, 1);
        assert_eq!(c.executed, 2);
        assert_eq!(c.expired, 1);
        assert_eq!(
            queue.len() as u64,
            c.added - c.executed - c.expired
        );
    }
}
