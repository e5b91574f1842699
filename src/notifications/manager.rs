// SPDX-License-Identifier: MPL-2.0
//! Notification lifecycle management.
//!
//! The `Manager` owns the active queue (newest first) and one countdown per
//! auto-dismissing notification. It handles admission, dedupe refresh,
//! capacity eviction, and pause/resume of countdowns.
//!
//! Every operation is total: unknown ids are no-ops, never errors, since a
//! timer expiry and a manual dismiss may race to remove the same entry.

use super::notification::{Notification, NotificationId, NotificationRequest};
use super::scheduler::{ManualScheduler, Scheduler, TimerKey};
use crate::domain::notifications::{DefaultDuration, MaxActive};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::Duration;
use tracing::{debug, trace};

/// Validated queue settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct QueueSettings {
    pub max_active: MaxActive,
    pub default_duration: DefaultDuration,
}

/// Outcome of [`Manager::add`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// A new notification entered the queue.
    Created(NotificationId),
    /// An active notification with the same dedupe key (or id) was refreshed in place.
    Refreshed(NotificationId),
}

impl Admission {
    #[must_use]
    pub fn id(&self) -> &NotificationId {
        match self {
            Admission::Created(id) | Admission::Refreshed(id) => id,
        }
    }

    #[must_use]
    pub fn into_id(self) -> NotificationId {
        match self {
            Admission::Created(id) | Admission::Refreshed(id) => id,
        }
    }

    #[must_use]
    pub fn is_refresh(&self) -> bool {
        matches!(self, Admission::Refreshed(_))
    }
}

/// Messages for notification state changes.
#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss a specific notification by ID.
    Dismiss(NotificationId),
    /// Dismiss the newest notification (Escape).
    DismissNewest,
    /// Dismiss every notification.
    DismissAll,
    /// Pointer or focus entered a notification.
    Pause(NotificationId),
    /// Pointer or focus left a notification.
    Resume(NotificationId),
    /// A countdown reported expiry.
    Expired(TimerKey),
}

struct TimerEntry<H> {
    generation: u64,
    handle: H,
}

/// Manages the notification queue and its auto-dismiss countdowns.
pub struct Manager<S: Scheduler> {
    /// Active notifications (newest first).
    visible: VecDeque<Notification>,
    /// Live countdowns. An id is present iff its notification has a non-zero
    /// duration and is not paused.
    timers: HashMap<NotificationId, TimerEntry<S::Handle>>,
    settings: QueueSettings,
    next_generation: u64,
    /// Sequence number for the next generated id.
    next_id: u64,
    /// Bumped on every change to `visible`.
    revision: u64,
    scheduler: S,
}

impl<S: Scheduler> Manager<S> {
    /// Creates an empty manager driven by `scheduler`.
    pub fn new(scheduler: S, settings: QueueSettings) -> Self {
        if settings.default_duration.is_persistent() {
            debug!("Notifications without a duration persist until dismissed");
        }
        Self {
            visible: VecDeque::with_capacity(settings.max_active.value() + 1),
            timers: HashMap::new(),
            settings,
            next_generation: 0,
            next_id: 0,
            revision: 0,
            scheduler,
        }
    }

    /// Admits a notification request.
    ///
    /// A request whose non-empty dedupe key matches an active notification
    /// (or whose explicit id does) replaces that notification's fields in
    /// place, keeping its id and position, and restarts its countdown with
    /// the new duration. Otherwise the notification is prepended and the
    /// oldest entries beyond capacity are dropped without any expiry signal.
    pub fn add(&mut self, request: NotificationRequest) -> Admission {
        let now = self.scheduler.now();
        let duration = request
            .duration()
            .unwrap_or_else(|| self.settings.default_duration.as_duration());

        let admission = if let Some(index) = self.find_existing(&request) {
            let id = self.visible[index].id().clone();
            self.cancel_timer(&id);
            self.visible[index] = Notification::admit(id.clone(), request, now, duration);
            debug!(%id, ?duration, "Refreshed notification");
            Admission::Refreshed(id)
        } else {
            let id = match request.id() {
                Some(id) => id.clone(),
                None => self.fresh_id(),
            };
            let category = request.category();
            self.visible
                .push_front(Notification::admit(id.clone(), request, now, duration));
            debug!(%id, %category, ?duration, "Admitted notification");
            self.evict_overflow();
            Admission::Created(id)
        };

        self.revision += 1;
        self.schedule_expiry(admission.id().clone(), duration);
        admission
    }

    /// Removes a notification and cancels its countdown.
    ///
    /// Returns `true` if the notification was found. Removing an absent id
    /// is a no-op.
    pub fn remove(&mut self, id: &NotificationId) -> bool {
        self.cancel_timer(id);
        self.remove_entry(id)
    }

    /// Removes every notification after cancelling every countdown.
    pub fn dismiss_all(&mut self) {
        self.cancel_all_timers();
        if !self.visible.is_empty() {
            debug!(count = self.visible.len(), "Dismissed all notifications");
            self.visible.clear();
            self.revision += 1;
        }
    }

    /// Removes the newest notification, if any.
    pub fn dismiss_newest(&mut self) -> bool {
        match self.visible.front().map(|n| n.id().clone()) {
            Some(id) => self.remove(&id),
            None => false,
        }
    }

    /// Stops a notification's countdown without removing it.
    ///
    /// Nothing is recorded: the remaining time is rebuilt from the admission
    /// time on resume. No-op when there is no live countdown.
    pub fn pause_timer(&mut self, id: &NotificationId) {
        if self.cancel_timer(id) {
            trace!(%id, "Paused countdown");
        }
    }

    /// Restarts a paused countdown with whatever time is left.
    ///
    /// Time spent paused still counts as elapsed, since elapsed time is
    /// measured from admission. If nothing is left the notification is
    /// removed immediately. No-op for unknown ids, persistent notifications,
    /// or notifications whose countdown is already live.
    pub fn resume_timer(&mut self, id: &NotificationId) {
        if self.timers.contains_key(id) {
            return;
        }
        let Some(notification) = self.get(id) else {
            return;
        };
        let duration = notification.duration();
        if duration.is_zero() {
            return;
        }

        let elapsed = self.scheduler.now().saturating_sub(notification.created_at());
        let remaining = duration.saturating_sub(elapsed);
        if remaining.is_zero() {
            debug!(%id, "Expired while paused");
            self.remove_entry(id);
        } else {
            trace!(%id, ?remaining, "Resumed countdown");
            self.schedule_expiry(id.clone(), remaining);
        }
    }

    /// Handles a countdown expiry.
    ///
    /// Only the live countdown for an id may remove it; a key whose
    /// generation was cancelled or replaced is ignored.
    pub fn fire(&mut self, key: &TimerKey) {
        let live = self
            .timers
            .get(&key.id)
            .is_some_and(|entry| entry.generation == key.generation);
        if !live {
            trace!(id = %key.id, generation = key.generation, "Ignoring stale timer");
            return;
        }
        self.timers.remove(&key.id);
        debug!(id = %key.id, "Notification expired");
        self.remove_entry(&key.id);
    }

    /// Cancels every countdown and leaves the queue untouched.
    ///
    /// Used when whoever drives expiries is going away.
    pub fn teardown(&mut self) {
        let cancelled = self.timers.len();
        self.cancel_all_timers();
        debug!(cancelled, "Torn down notification timers");
    }

    /// Handles a notification message.
    pub fn handle_message(&mut self, message: Message) {
        match message {
            Message::Dismiss(id) => {
                self.remove(&id);
            }
            Message::DismissNewest => {
                self.dismiss_newest();
            }
            Message::DismissAll => self.dismiss_all(),
            Message::Pause(id) => self.pause_timer(&id),
            Message::Resume(id) => self.resume_timer(&id),
            Message::Expired(key) => self.fire(&key),
        }
    }

    /// Returns the active notifications, newest first.
    pub fn notifications(&self) -> impl Iterator<Item = &Notification> {
        self.visible.iter()
    }

    /// Returns an owned copy of the active notifications, newest first.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Notification> {
        self.visible.iter().cloned().collect()
    }

    #[must_use]
    pub fn get(&self, id: &NotificationId) -> Option<&Notification> {
        self.visible.iter().find(|n| n.id() == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.visible.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    /// Returns whether `id` has a live countdown.
    #[must_use]
    pub fn has_timer(&self, id: &NotificationId) -> bool {
        self.timers.contains_key(id)
    }

    /// Returns the number of live countdowns.
    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    /// Counter that changes whenever the queue contents change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn settings(&self) -> QueueSettings {
        self.settings
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Finds the entry a request should refresh instead of stacking.
    fn find_existing(&self, request: &NotificationRequest) -> Option<usize> {
        if let Some(key) = request.dedupe_key() {
            if let Some(index) = self.visible.iter().position(|n| n.dedupe_key() == Some(key)) {
                return Some(index);
            }
        }
        let id = request.id()?;
        self.visible.iter().position(|n| n.id() == id)
    }

    /// Generates an id no active notification holds, skipping ids callers
    /// chose themselves.
    fn fresh_id(&mut self) -> NotificationId {
        loop {
            let id = NotificationId::numbered(self.next_id);
            self.next_id = self.next_id.wrapping_add(1);
            if self.get(&id).is_none() {
                return id;
            }
        }
    }

    fn evict_overflow(&mut self) {
        let max = self.settings.max_active.value();
        if self.visible.len() <= max {
            return;
        }
        for evicted in self.visible.split_off(max) {
            if let Some(entry) = self.timers.remove(evicted.id()) {
                self.scheduler.cancel(entry.handle);
            }
            debug!(id = %evicted.id(), "Evicted oldest notification");
        }
    }

    fn schedule_expiry(&mut self, id: NotificationId, delay: Duration) {
        if delay.is_zero() {
            return;
        }
        let generation = self.next_generation;
        self.next_generation += 1;

        let key = TimerKey {
            id: id.clone(),
            generation,
        };
        let handle = self.scheduler.schedule(delay, key);
        if let Some(previous) = self.timers.insert(id, TimerEntry { generation, handle }) {
            self.scheduler.cancel(previous.handle);
        }
    }

    fn cancel_timer(&mut self, id: &NotificationId) -> bool {
        match self.timers.remove(id) {
            Some(entry) => {
                self.scheduler.cancel(entry.handle);
                true
            }
            None => false,
        }
    }

    fn cancel_all_timers(&mut self) {
        for (_, entry) in self.timers.drain() {
            self.scheduler.cancel(entry.handle);
        }
    }

    fn remove_entry(&mut self, id: &NotificationId) -> bool {
        match self.visible.iter().position(|n| n.id() == id) {
            Some(index) => {
                self.visible.remove(index);
                self.revision += 1;
                true
            }
            None => false,
        }
    }
}

impl Manager<ManualScheduler> {
    /// Creates a manager on a simulated clock starting at zero.
    #[must_use]
    pub fn manual(settings: QueueSettings) -> Self {
        Self::new(ManualScheduler::new(), settings)
    }

    /// Moves the simulated clock forward, firing due countdowns in deadline
    /// order with the clock set to each deadline as it fires.
    pub fn advance(&mut self, delta: Duration) {
        let target = self.scheduler.now() + delta;
        while let Some(key) = self.scheduler.pop_due(target) {
            self.fire(&key);
        }
        self.scheduler.set_now(target);
    }
}

impl<S: Scheduler> fmt::Debug for Manager<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Manager")
            .field("visible", &self.visible)
            .field("pending_timers", &self.timers.len())
            .field("settings", &self.settings)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}
