//! Shimmer Scheduler
//!
//! Cancellable deferred tasks for a single-threaded UI loop.
//!
//! The scheduler owns a clock that only moves when the host advances it,
//! usually once per frame with `Instant::now()`. Advancing returns the tasks
//! whose deadline has passed, in deadline order, and the host applies them on
//! the same thread. Nothing fires on its own and nothing fires concurrently.
//!
//! - [`DeferredScheduler`]: the task store and clock
//! - [`DelaySlot`]: "at most one live task per owner" bookkeeping
//!
//! # Example
//!
//! ```rust
//! use shimmer_scheduler::{DeferredScheduler, DelaySlot};
//! use std::time::Duration;
//!
//! let scheduler = DeferredScheduler::new();
//! let mut slot = DelaySlot::new();
//!
//! slot.replace(&scheduler, Duration::from_millis(100), "first");
//! slot.replace(&scheduler, Duration::from_millis(10), "second");
//!
//! let fired = scheduler.advance_by(Duration::from_millis(200));
//! assert_eq!(fired.len(), 1);
//! assert_eq!(fired[0].1, "second");
//! ```

pub mod scheduler;
pub mod slot;

pub use scheduler::{DeferredScheduler, TaskId};
pub use slot::DelaySlot;
