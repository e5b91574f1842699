// SPDX-License-Identifier: MPL-2.0
//! Notification engine hosted on a tokio task.
//!
//! [`spawn`] moves a [`Manager`] onto its own task and returns a cloneable
//! [`Toaster`]. Producer commands and timer expiries are applied one at a
//! time on that task, and after each change the whole queue is published on a
//! watch channel, so observers only ever see complete states.
//!
//! ```no_run
//! use toast_queue::notifications::{service, NotificationOptions, QueueSettings};
//!
//! # async fn demo() -> toast_queue::error::Result<()> {
//! let toaster = service::spawn(QueueSettings::default());
//! let mut updates = toaster.subscribe();
//!
//! toaster.success("Image saved", NotificationOptions::default()).await?;
//! updates.changed().await.ok();
//! println!("{} active", updates.borrow().len());
//! # Ok(())
//! # }
//! ```

use super::manager::{Admission, Manager, Message, QueueSettings};
use super::notification::{
    Action, Avatar, Category, Notification, NotificationId, NotificationOptions,
    NotificationRequest,
};
use super::scheduler::{TimerKey, TokioScheduler};
use crate::error::{Error, Result};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, trace, warn};

/// Read-only view of the active queue, newest first.
pub type Snapshot = Arc<[Notification]>;

enum Command {
    Add {
        request: NotificationRequest,
        reply: oneshot::Sender<Admission>,
    },
    Action {
        id: NotificationId,
        reply: oneshot::Sender<Option<Action>>,
    },
    Message(Message),
    Shutdown,
}

/// Handle to a running notification service.
///
/// Dropping every handle (or calling [`Toaster::shutdown`]) stops the service;
/// its pending timers are cancelled on the way out.
#[derive(Debug, Clone)]
pub struct Toaster {
    commands: mpsc::UnboundedSender<Command>,
    snapshots: watch::Receiver<Snapshot>,
}

/// Starts a notification service on the current tokio runtime.
#[must_use]
pub fn spawn(settings: QueueSettings) -> Toaster {
    let (scheduler, expired) = TokioScheduler::new();
    let manager = Manager::new(scheduler, settings);
    let (commands, receiver) = mpsc::unbounded_channel();
    let (publisher, snapshots) = watch::channel(Snapshot::from(Vec::new()));

    tokio::spawn(run(manager, receiver, expired, publisher));
    debug!(
        max_active = settings.max_active.value(),
        default_duration_ms = settings.default_duration.as_millis(),
        "Notification service started"
    );

    Toaster {
        commands,
        snapshots,
    }
}

async fn run(
    mut manager: Manager<TokioScheduler>,
    mut commands: mpsc::UnboundedReceiver<Command>,
    mut expired: mpsc::UnboundedReceiver<TimerKey>,
    publisher: watch::Sender<Snapshot>,
) {
    let mut published = manager.revision();
    loop {
        tokio::select! {
            command = commands.recv() => match command {
                Some(Command::Shutdown) | None => break,
                Some(command) => apply(&mut manager, command),
            },
            Some(key) = expired.recv() => manager.fire(&key),
        }

        if manager.revision() != published {
            published = manager.revision();
            publisher.send_replace(Snapshot::from(manager.snapshot()));
        }
    }

    manager.teardown();
    debug!("Notification service stopped");
}

fn apply(manager: &mut Manager<TokioScheduler>, command: Command) {
    match command {
        Command::Add { request, reply } => {
            let admission = manager.add(request);
            if reply.send(admission).is_err() {
                trace!("Producer went away before admission reply");
            }
        }
        Command::Action { id, reply } => {
            let action = manager.get(&id).and_then(|n| n.action().cloned());
            if reply.send(action).is_err() {
                trace!(%id, "Caller went away before action lookup reply");
            }
        }
        Command::Message(message) => manager.handle_message(message),
        Command::Shutdown => {}
    }
}

impl Toaster {
    /// Admits a request and reports whether it created or refreshed a notification.
    pub async fn add(&self, request: NotificationRequest) -> Result<Admission> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Add { request, reply })
            .map_err(|_| Error::Closed)?;
        response.await.map_err(|_| Error::Closed)
    }

    /// Shows a notification and returns its id.
    ///
    /// When the dedupe key matches an active notification this is the id of
    /// that notification, not `options.id`.
    pub async fn notify(
        &self,
        category: Category,
        title: impl Into<String>,
        options: NotificationOptions,
    ) -> Result<NotificationId> {
        let request = NotificationRequest::new(category, title).with_options(options);
        Ok(self.add(request).await?.into_id())
    }

    pub async fn info(
        &self,
        title: impl Into<String>,
        options: NotificationOptions,
    ) -> Result<NotificationId> {
        self.notify(Category::Info, title, options).await
    }

    pub async fn warning(
        &self,
        title: impl Into<String>,
        options: NotificationOptions,
    ) -> Result<NotificationId> {
        self.notify(Category::Warning, title, options).await
    }

    pub async fn error(
        &self,
        title: impl Into<String>,
        options: NotificationOptions,
    ) -> Result<NotificationId> {
        self.notify(Category::Error, title, options).await
    }

    pub async fn success(
        &self,
        title: impl Into<String>,
        options: NotificationOptions,
    ) -> Result<NotificationId> {
        self.notify(Category::Success, title, options).await
    }

    /// Shows a notification attributed to a person.
    pub async fn avatar(
        &self,
        title: impl Into<String>,
        avatar: Avatar,
        mut options: NotificationOptions,
    ) -> Result<NotificationId> {
        options.avatar = Some(avatar);
        self.notify(Category::Avatar, title, options).await
    }

    /// Dismisses one notification, or all of them when `id` is `None`.
    pub fn dismiss(&self, id: Option<&NotificationId>) {
        match id {
            Some(id) => self.remove(id),
            None => self.send(Message::DismissAll),
        }
    }

    pub fn remove(&self, id: &NotificationId) {
        self.send(Message::Dismiss(id.clone()));
    }

    /// Dismisses the newest notification (Escape).
    pub fn dismiss_newest(&self) {
        self.send(Message::DismissNewest);
    }

    /// Pauses a countdown while the notification is hovered or focused.
    pub fn pause_timer(&self, id: &NotificationId) {
        self.send(Message::Pause(id.clone()));
    }

    /// Resumes a countdown once hover or focus leaves the notification.
    pub fn resume_timer(&self, id: &NotificationId) {
        self.send(Message::Resume(id.clone()));
    }

    /// Runs a notification's action handler, then dismisses the notification
    /// unless the action keeps it open.
    ///
    /// The dismiss happens whether or not the handler succeeded; a handler
    /// failure is logged and returned. Unknown ids and notifications without
    /// an action are no-ops.
    pub async fn activate_action(&self, id: &NotificationId) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.commands
            .send(Command::Action {
                id: id.clone(),
                reply,
            })
            .map_err(|_| Error::Closed)?;
        let Some(action) = response.await.map_err(|_| Error::Closed)? else {
            return Ok(());
        };

        let outcome = action.invoke().await;
        if let Err(err) = &outcome {
            warn!(%id, label = action.label(), error = %err, "Notification action failed");
        }
        if action.dismiss_on_click() {
            self.remove(id);
        }
        outcome.map_err(Error::from)
    }

    /// Returns a receiver that observes every published queue state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.clone()
    }

    /// Returns the most recently published queue state.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Stops the service for every handle. Pending timers are cancelled;
    /// later commands are ignored.
    pub fn shutdown(&self) {
        if self.commands.send(Command::Shutdown).is_err() {
            trace!("Notification service already stopped");
        }
    }

    fn send(&self, message: Message) {
        if self.commands.send(Command::Message(message)).is_err() {
            trace!("Notification service closed; dropping message");
        }
    }
}
