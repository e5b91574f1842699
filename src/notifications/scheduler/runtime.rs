// SPDX-License-Identifier: MPL-2.0
//! Tokio-backed scheduler.

use super::{Scheduler, TimerKey};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::Instant;

/// Scheduler that runs each countdown as a sleeping tokio task.
///
/// Expired countdowns are delivered on the channel returned by
/// [`TokioScheduler::new`]; the owner feeds them back to
/// [`Manager::fire`](crate::notifications::Manager::fire). Must be used from
/// within a tokio runtime.
#[derive(Debug)]
pub struct TokioScheduler {
    origin: Instant,
    expired: mpsc::UnboundedSender<TimerKey>,
}

impl TokioScheduler {
    /// Creates a scheduler and the receiver its expiries arrive on.
    #[must_use]
    #[allow(clippy::new_ret_no_self)]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerKey>) {
        let (expired, receiver) = mpsc::unbounded_channel();
        let scheduler = Self {
            origin: Instant::now(),
            expired,
        };
        (scheduler, receiver)
    }
}

impl Scheduler for TokioScheduler {
    type Handle = AbortHandle;

    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn schedule(&mut self, delay: Duration, key: TimerKey) -> AbortHandle {
        let expired = self.expired.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if let Err(err) = expired.send(key) {
                tracing::trace!(id = %err.0.id, "Timer fired after its receiver closed");
            }
        })
        .abort_handle()
    }

    fn cancel(&mut self, handle: AbortHandle) {
        handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notifications::NotificationId;

    fn key(id: &str) -> TimerKey {
        TimerKey {
            id: NotificationId::new(id),
            generation: 7,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn countdown_reports_key_after_delay() {
        let (mut scheduler, mut expired) = TokioScheduler::new();
        scheduler.schedule(Duration::from_millis(250), key("a"));

        let received = expired.recv().await.expect("timer should fire");

        assert_eq!(received, key("a"));
        assert!(scheduler.now() >= Duration::from_millis(250));
    }

    #[tokio::test(start_paused = true)]
    async fn cancelled_countdown_never_reports() {
        let (mut scheduler, mut expired) = TokioScheduler::new();
        let handle = scheduler.schedule(Duration::from_millis(100), key("a"));
        scheduler.cancel(handle);

        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(expired.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn now_follows_tokio_clock() {
        let (scheduler, _expired) = TokioScheduler::new();
        tokio::time::advance(Duration::from_millis(1500)).await;
        assert_eq!(scheduler.now(), Duration::from_millis(1500));
    }
}
