// SPDX-License-Identifier: MPL-2.0
//! Simulated clock.

use super::{Scheduler, TimerKey};
use std::collections::BTreeMap;
use std::time::Duration;

/// Cancellation token for a [`ManualScheduler`] countdown.
///
/// Orders by deadline, then by scheduling order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ManualHandle {
    deadline: Duration,
    seq: u64,
}

/// Scheduler whose clock only moves when told to.
///
/// Pending countdowns are kept in deadline order; nothing fires until
/// [`Manager::advance`](crate::notifications::Manager::advance) moves the
/// clock past their deadline.
#[derive(Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    next_seq: u64,
    pending: BTreeMap<ManualHandle, TimerKey>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of countdowns that have neither fired nor been cancelled.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Returns the earliest pending deadline.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.pending.keys().next().map(|handle| handle.deadline)
    }

    /// Removes the earliest countdown due at or before `until`, moving the
    /// clock to its deadline.
    pub(crate) fn pop_due(&mut self, until: Duration) -> Option<TimerKey> {
        let entry = self.pending.first_entry()?;
        if entry.key().deadline > until {
            return None;
        }
        let (handle, key) = entry.remove_entry();
        self.now = self.now.max(handle.deadline);
        Some(key)
    }

    pub(crate) fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualHandle;

    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, delay: Duration, key: TimerKey) -> ManualHandle {
        let handle = ManualHandle {
            deadline: self.now + delay,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.pending.insert(handle, key);
        handle
    }

    fn cancel(&mut self, handle: ManualHandle) {
        self.pending.remove(&handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationId;

    fn key(id: &str, generation: u64) -> TimerKey {
        TimerKey {
            id: NotificationId::new(id),
            generation,
        }
    }

    #[test]
    fn new_scheduler_starts_at_zero_with_nothing_pending() {
        let scheduler = ManualScheduler::new();
        assert_eq!(scheduler.now(), Duration::ZERO);
        assert_eq!(scheduler.pending(), 0);
        assert!(scheduler.next_deadline().is_none());
    }

    #[test]
    fn pop_due_yields_in_deadline_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(300), key("late", 0));
        scheduler.schedule(Duration::from_millis(100), key("early", 1));

        let until = Duration::from_secs(1);
        assert_eq!(scheduler.pop_due(until), Some(key("early", 1)));
        assert_eq!(scheduler.now(), Duration::from_millis(100));
        assert_eq!(scheduler.pop_due(until), Some(key("late", 0)));
        assert_eq!(scheduler.pop_due(until), None);
    }

    #[test]
    fn same_deadline_fires_in_scheduling_order() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(50), key("first", 0));
        scheduler.schedule(Duration::from_millis(50), key("second", 1));

        let until = Duration::from_millis(50);
        assert_eq!(scheduler.pop_due(until), Some(key("first", 0)));
        assert_eq!(scheduler.pop_due(until), Some(key("second", 1)));
    }

    #[test]
    fn pop_due_leaves_future_deadlines() {
        let mut scheduler = ManualScheduler::new();
        scheduler.schedule(Duration::from_millis(500), key("a", 0));

        assert_eq!(scheduler.pop_due(Duration::from_millis(499)), None);
        assert_eq!(scheduler.pending(), 1);
    }

    #[test]
    fn cancel_removes_pending_countdown() {
        let mut scheduler = ManualScheduler::new();
        let handle = scheduler.schedule(Duration::from_millis(10), key("a", 0));

        scheduler.cancel(handle);
        scheduler.cancel(handle);

        assert_eq!(scheduler.pending(), 0);
        assert_eq!(scheduler.pop_due(Duration::from_secs(1)), None);
    }

    #[test]
    fn clock_never_moves_backwards() {
        let mut scheduler = ManualScheduler::new();
        scheduler.set_now(Duration::from_millis(200));
        scheduler.set_now(Duration::from_millis(100));
        assert_eq!(scheduler.now(), Duration::from_millis(200));
    }
}
