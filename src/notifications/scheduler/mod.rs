// SPDX-License-Identifier: MPL-2.0
//! Countdown scheduling for auto-dismiss timers.
//!
//! The engine never sleeps or spawns on its own. It asks a [`Scheduler`] for
//! one-shot countdowns and is told about expiries through
//! [`Manager::fire`](super::Manager::fire). Two implementations are provided:
//!
//! - [`ManualScheduler`] - simulated clock driven by
//!   [`Manager::advance`](super::Manager::advance)
//! - [`TokioScheduler`] - `tokio::time` sleeps reporting expiries over a channel

mod manual;
mod runtime;

pub use manual::{ManualHandle, ManualScheduler};
pub use runtime::TokioScheduler;

use super::notification::NotificationId;
use std::time::Duration;

/// Identifies one scheduled countdown.
///
/// Every countdown gets a fresh generation, so an expiry reported after its
/// countdown was cancelled or replaced can be recognized as stale.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TimerKey {
    pub id: NotificationId,
    pub generation: u64,
}

/// Clock and one-shot timer capability injected into the engine.
pub trait Scheduler {
    /// Token used to cancel a pending countdown.
    type Handle;

    /// Current time, as an offset from this scheduler's epoch.
    fn now(&self) -> Duration;

    /// Starts a countdown that reports `key` once `delay` has elapsed.
    fn schedule(&mut self, delay: Duration, key: TimerKey) -> Self::Handle;

    /// Cancels a pending countdown. Cancelling one that already fired is a no-op.
    fn cancel(&mut self, handle: Self::Handle);
}
