//! One-task-per-owner bookkeeping

use std::time::Duration;

use crate::scheduler::{DeferredScheduler, TaskId};

/// Holds at most one pending task for an owner
///
/// Scheduling through a slot cancels whatever the slot held before, so a
/// newer request always supersedes an older one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DelaySlot {
    pending: Option<TaskId>,
}

impl DelaySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the current task (if any) and schedule a new one in its place
    ///
    /// The previous task is cancelled even when the new one cannot be
    /// scheduled, leaving the slot empty.
    pub fn replace<T>(
        &mut self,
        scheduler: &DeferredScheduler<T>,
        delay: Duration,
        payload: T,
    ) -> Option<TaskId> {
        self.cancel(scheduler);
        self.pending = scheduler.schedule(delay, payload);
        self.pending
    }

    /// Cancel the current task; returns `true` if one was still pending
    pub fn cancel<T>(&mut self, scheduler: &DeferredScheduler<T>) -> bool {
        match self.pending.take() {
            Some(id) => scheduler.cancel(id).is_some(),
            None => false,
        }
    }

    /// Clear the slot if `id` is the task it holds
    ///
    /// Call this when a task fires. Returns `false` for a task the slot no
    /// longer tracks, which the caller should treat as stale.
    pub fn complete(&mut self, id: TaskId) -> bool {
        if self.pending == Some(id) {
            self.pending = None;
            true
        } else {
            false
        }
    }

    pub fn pending(&self) -> Option<TaskId> {
        self.pending
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_cancels_previous() {
        let scheduler = DeferredScheduler::new();
        let mut slot = DelaySlot::new();

        let first = slot.replace(&scheduler, Duration::from_millis(100), 1).unwrap();
        let second = slot.replace(&scheduler, Duration::from_millis(10), 2).unwrap();

        assert!(!scheduler.is_pending(first));
        assert!(scheduler.is_pending(second));
        assert_eq!(scheduler.pending_count(), 1);
        assert_eq!(slot.pending(), Some(second));
    }

    #[test]
    fn test_complete_only_matches_current() {
        let scheduler = DeferredScheduler::new();
        let mut slot = DelaySlot::new();

        let first = slot.replace(&scheduler, Duration::from_millis(5), ()).unwrap();
        let second = slot.replace(&scheduler, Duration::from_millis(5), ()).unwrap();

        assert!(!slot.complete(first));
        assert!(slot.is_pending());
        assert!(slot.complete(second));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_unschedulable_replacement_empties_slot() {
        let scheduler = DeferredScheduler::new();
        let mut slot = DelaySlot::new();

        let first = slot.replace(&scheduler, Duration::from_millis(5), 1).unwrap();
        assert_eq!(slot.replace(&scheduler, Duration::MAX, 2), None);

        assert!(!scheduler.is_pending(first));
        assert!(!slot.is_pending());
    }

    #[test]
    fn test_cancel_empty_slot() {
        let scheduler: DeferredScheduler<()> = DeferredScheduler::new();
        let mut slot = DelaySlot::new();
        assert!(!slot.cancel(&scheduler));
    }
}
