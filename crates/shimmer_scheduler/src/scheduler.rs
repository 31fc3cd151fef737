//! Deferred task scheduler
//!
//! Tasks are plain payloads, not closures. The host decides what a payload
//! means when it comes due, which keeps the scheduler free of borrows into the
//! view tree.

use slotmap::{new_key_type, SlotMap};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

new_key_type! {
    /// Unique identifier for a scheduled task
    pub struct TaskId;
}

struct DeferredTask<T> {
    deadline: Instant,
    /// Insertion order, breaks deadline ties
    seq: u64,
    payload: T,
}

/// Internal state of the scheduler
struct SchedulerInner<T> {
    tasks: SlotMap<TaskId, DeferredTask<T>>,
    now: Instant,
    next_seq: u64,
}

impl<T> SchedulerInner<T> {
    /// `None` when the deadline is past what `Instant` can represent
    fn schedule(&mut self, delay: Duration, payload: T) -> Option<TaskId> {
        let deadline = self.now.checked_add(delay)?;
        let seq = self.next_seq;
        self.next_seq += 1;
        Some(self.tasks.insert(DeferredTask {
            deadline,
            seq,
            payload,
        }))
    }

    /// Clock value `dt` from now, saturating at the latest pending deadline
    fn target_after(&self, dt: Duration) -> Instant {
        self.now.checked_add(dt).unwrap_or_else(|| {
            self.tasks
                .values()
                .map(|task| task.deadline)
                .max()
                .map_or(self.now, |latest| latest.max(self.now))
        })
    }

    fn drain_due(&mut self, now: Instant) -> Vec<(TaskId, T)> {
        // The clock never runs backwards
        if now > self.now {
            self.now = now;
        }
        let now = self.now;

        let mut due: Vec<(TaskId, Instant, u64)> = self
            .tasks
            .iter()
            .filter(|(_, task)| task.deadline <= now)
            .map(|(id, task)| (id, task.deadline, task.seq))
            .collect();
        due.sort_by_key(|&(_, deadline, seq)| (deadline, seq));

        due.into_iter()
            .filter_map(|(id, _, _)| self.tasks.remove(id).map(|task| (id, task.payload)))
            .collect()
    }
}

/// Store of delayed tasks driven by an explicitly advanced clock
///
/// This is typically owned by the skeleton engine and advanced by the host
/// event loop.
pub struct DeferredScheduler<T> {
    inner: Mutex<SchedulerInner<T>>,
}

impl<T> DeferredScheduler<T> {
    /// Create a scheduler whose clock starts at `Instant::now()`
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a scheduler whose clock starts at `now`
    pub fn starting_at(now: Instant) -> Self {
        Self {
            inner: Mutex::new(SchedulerInner {
                tasks: SlotMap::with_key(),
                now,
                next_seq: 0,
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SchedulerInner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current scheduler time
    pub fn now(&self) -> Instant {
        self.lock().now
    }

    /// Queue `payload` to come due `delay` after the current scheduler time
    ///
    /// Returns `None`, dropping the payload, when the deadline would overflow
    /// the clock.
    pub fn schedule(&self, delay: Duration, payload: T) -> Option<TaskId> {
        let id = self.lock().schedule(delay, payload);
        match id {
            Some(id) => tracing::trace!(task = ?id, ?delay, "deferred task scheduled"),
            None => tracing::debug!(?delay, "deferred task delay overflows the clock, dropped"),
        }
        id
    }

    /// Cancel a task, returning its payload if it had not fired yet
    pub fn cancel(&self, id: TaskId) -> Option<T> {
        let removed = self.lock().tasks.remove(id).map(|task| task.payload);
        if removed.is_some() {
            tracing::trace!(task = ?id, "deferred task cancelled");
        }
        removed
    }

    /// Check whether a task is still waiting to fire
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.lock().tasks.contains_key(id)
    }

    pub fn pending_count(&self) -> usize {
        self.lock().tasks.len()
    }

    /// Earliest deadline among pending tasks
    pub fn next_deadline(&self) -> Option<Instant> {
        self.lock().tasks.values().map(|task| task.deadline).min()
    }

    /// Move the clock to `now` and take every task that came due
    ///
    /// Tasks are returned in deadline order, ties in scheduling order. A `now`
    /// earlier than the current scheduler time leaves the clock where it is.
    pub fn advance_to(&self, now: Instant) -> Vec<(TaskId, T)> {
        let fired = self.lock().drain_due(now);
        if !fired.is_empty() {
            tracing::trace!(count = fired.len(), "deferred tasks came due");
        }
        fired
    }

    /// Move the clock forward by `dt` and take every task that came due
    ///
    /// A step past the end of the clock stops at the latest pending deadline,
    /// so every pending task fires.
    pub fn advance_by(&self, dt: Duration) -> Vec<(TaskId, T)> {
        let now = self.lock().target_after(dt);
        self.advance_to(now)
    }
}

impl<T> Default for DeferredScheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for DeferredScheduler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.lock();
        f.debug_struct("DeferredScheduler")
            .field("now", &inner.now)
            .field("pending", &inner.tasks.len())
            .finish()
    }
}
