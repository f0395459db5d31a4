#![forbid(unsafe_code)]

//! Cancellable, deadline-ordered tasks on a virtual clock.
//!
//! The scheduler never reads wall-clock time. Its owner advances it with the
//! elapsed frame time and receives the payloads whose deadline has passed.
//! This keeps every completion on the caller's thread and makes timing fully
//! deterministic in tests.
//!
//! # Example
//!
//! ```
//! use popkit_core::schedule::Scheduler;
//! use std::time::Duration;
//!
//! let mut scheduler = Scheduler::new();
//! let settle = scheduler.schedule(Duration::from_millis(100), "settle");
//! scheduler.schedule(Duration::from_millis(50), "first");
//!
//! assert!(scheduler.cancel(settle));
//! let fired = scheduler.advance(Duration::from_millis(200));
//! assert_eq!(fired.len(), 1);
//! assert_eq!(fired[0].payload, "first");
//! ```
//!
//! # Invariants
//!
//! - Every scheduled task fires at most once.
//! - Tasks fire in deadline order; ties fire in scheduling order.
//! - A cancelled task never fires.
//! - `now()` is monotonically non-decreasing.

use std::time::Duration;

/// Handle to a scheduled task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(u64);

impl TaskId {
    /// Raw identifier.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// A task whose deadline has passed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fired<T> {
    pub id: TaskId,
    /// The deadline the task was scheduled for (not the time it was observed).
    pub deadline: Duration,
    pub payload: T,
}

#[derive(Debug)]
struct Pending<T> {
    id: TaskId,
    deadline: Duration,
    payload: T,
}

/// Deadline-ordered task queue driven by [`advance`](Scheduler::advance).
#[derive(Debug)]
pub struct Scheduler<T> {
    now: Duration,
    next_id: u64,
    /// Sorted by (deadline, id).
    pending: Vec<Pending<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    /// Create an empty scheduler at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 1,
            pending: Vec::new(),
        }
    }

    /// Current virtual time.
    #[inline]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of tasks waiting to fire.
    #[inline]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether no tasks are pending.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Schedule `payload` to fire `delay` from now.
    pub fn schedule(&mut self, delay: Duration, payload: T) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        let deadline = self.now.saturating_add(delay);
        let idx = self
            .pending
            .partition_point(|p| (p.deadline, p.id) <= (deadline, id));
        self.pending.insert(
            idx,
            Pending {
                id,
                deadline,
                payload,
            },
        );
        id
    }

    /// Cancel a pending task. Returns `false` if it already fired or was
    /// cancelled.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        match self.pending.iter().position(|p| p.id == id) {
            Some(idx) => {
                self.pending.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Cancel every pending task whose payload matches `pred`.
    ///
    /// Returns the number of cancelled tasks.
    pub fn cancel_where(&mut self, mut pred: impl FnMut(&T) -> bool) -> usize {
        let before = self.pending.len();
        self.pending.retain(|p| !pred(&p.payload));
        before - self.pending.len()
    }

    /// Drop all pending tasks.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    /// Whether `id` is still pending.
    pub fn is_pending(&self, id: TaskId) -> bool {
        self.pending.iter().any(|p| p.id == id)
    }

    /// Deadline of `id`, if still pending.
    pub fn deadline(&self, id: TaskId) -> Option<Duration> {
        self.pending.iter().find(|p| p.id == id).map(|p| p.deadline)
    }

    /// Advance the clock by `delta` and return every task that became due.
    pub fn advance(&mut self, delta: Duration) -> Vec<Fired<T>> {
        self.now = self.now.saturating_add(delta);
        let due = self.pending.partition_point(|p| p.deadline <= self.now);
        let fired: Vec<Fired<T>> = self
            .pending
            .drain(..due)
            .map(|p| Fired {
                id: p.id,
                deadline: p.deadline,
                payload: p.payload,
            })
            .collect();
        #[cfg(feature = "tracing")]
        if !fired.is_empty() {
            crate::logging::trace!(
                message = "schedule.fire",
                count = fired.len(),
                now_us = self.now.as_micros() as u64
            );
        }
        fired
    }

    /// Pop the earliest task if its deadline is at or before `now()`.
    ///
    /// Lets the owner interleave firing with scheduling: a task fired here
    /// may schedule follow-ups with a zero delay that are then popped by the
    /// next call.
    pub fn pop_due(&mut self) -> Option<Fired<T>> {
        if self.pending.first()?.deadline > self.now {
            return None;
        }
        let p = self.pending.remove(0);
        #[cfg(feature = "tracing")]
        crate::logging::trace!(
            message = "schedule.fire",
            count = 1usize,
            now_us = self.now.as_micros() as u64
        );
        Some(Fired {
            id: p.id,
            deadline: p.deadline,
            payload: p.payload,
        })
    }

    /// Move the clock forward without firing anything.
    ///
    /// Due tasks stay queued until [`pop_due`](Self::pop_due) or
    /// [`advance`](Self::advance) collects them.
    pub fn advance_clock(&mut self, delta: Duration) {
        self.now = self.now.saturating_add(delta);
    }

    /// Move the clock to `at` if it is in the future.
    pub fn advance_clock_to(&mut self, at: Duration) {
        if at > self.now {
            self.now = at;
        }
    }

    /// Deadline of the earliest pending task.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.first().map(|p| p.deadline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS_100: Duration = Duration::from_millis(100);

    #[test]
    fn fires_in_deadline_order() {
        let mut s = Scheduler::new();
        s.schedule(Duration::from_millis(300), 'c');
        s.schedule(Duration::from_millis(100), 'a');
        s.schedule(Duration::from_millis(200), 'b');
        let fired: Vec<char> = s
            .advance(Duration::from_secs(1))
            .into_iter()
            .map(|f| f.payload)
            .collect();
        assert_eq!(fired, vec!['a', 'b', 'c']);
        assert!(s.is_empty());
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut s = Scheduler::new();
        s.schedule(MS_100, 1);
        s.schedule(MS_100, 2);
        s.schedule(MS_100, 3);
        let fired: Vec<i32> = s.advance(MS_100).into_iter().map(|f| f.payload).collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn not_due_stays_pending() {
        let mut s = Scheduler::new();
        let id = s.schedule(MS_100, ());
        assert!(s.advance(Duration::from_millis(99)).is_empty());
        assert!(s.is_pending(id));
        assert_eq!(s.advance(Duration::from_millis(1)).len(), 1);
        assert!(!s.is_pending(id));
    }

    #[test]
    fn cancel_prevents_firing_once() {
        let mut s = Scheduler::new();
        let id = s.schedule(MS_100, ());
        assert!(s.cancel(id));
        assert!(!s.cancel(id));
        assert!(s.advance(MS_100).is_empty());
    }

    #[test]
    fn cancel_where_filters_payloads() {
        let mut s = Scheduler::new();
        s.schedule(MS_100, "timer");
        s.schedule(MS_100, "anim");
        s.schedule(MS_100, "timer");
        assert_eq!(s.cancel_where(|p| *p == "timer"), 2);
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn deadline_is_relative_to_now() {
        let mut s = Scheduler::new();
        s.advance(Duration::from_millis(250));
        let id = s.schedule(MS_100, ());
        assert_eq!(s.deadline(id), Some(Duration::from_millis(350)));
        assert_eq!(s.next_deadline(), Some(Duration::from_millis(350)));
    }

    #[test]
    fn pop_due_interleaves_with_scheduling() {
        let mut s = Scheduler::new();
        s.schedule(MS_100, 1);
        s.advance_clock(MS_100);
        let first = s.pop_due().unwrap();
        assert_eq!(first.payload, 1);
        s.schedule(Duration::ZERO, 2);
        assert_eq!(s.pop_due().unwrap().payload, 2);
        assert!(s.pop_due().is_none());
    }

    #[test]
    fn advance_clock_to_never_goes_back() {
        let mut s: Scheduler<()> = Scheduler::new();
        s.advance_clock(MS_100);
        s.advance_clock_to(Duration::from_millis(50));
        assert_eq!(s.now(), MS_100);
        s.advance_clock_to(Duration::from_millis(150));
        assert_eq!(s.now(), Duration::from_millis(150));
    }
}
