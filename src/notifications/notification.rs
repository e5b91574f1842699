// SPDX-License-Identifier: MPL-2.0
//! Core notification data structures.
//!
//! This module defines the `Notification` entity held by the queue, the
//! `NotificationRequest` producers hand to the engine, and the opaque payload
//! types (actions, avatars) the engine carries without interpreting.

use crate::error::ActionError;
use futures_util::future::{BoxFuture, FutureExt};
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Unique identifier for a notification.
///
/// Producers may supply their own; otherwise the engine generates one that
/// is not held by any active notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NotificationId(String);

impl NotificationId {
    /// Creates an identifier from a caller-chosen value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Identifier for the `seq`-th generated notification.
    pub(crate) fn numbered(seq: u64) -> Self {
        Self(format!("toast-{seq}"))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NotificationId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NotificationId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Kind of notification. Descriptive only; the engine treats all kinds alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Info,
    Warning,
    Error,
    Success,
    /// Rich notification attributed to a person (see [`Avatar`]).
    Avatar,
}

impl Category {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Info => "info",
            Category::Warning => "warning",
            Category::Error => "error",
            Category::Success => "success",
            Category::Avatar => "avatar",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Styling hint for an action button, passed through to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActionVariant {
    #[default]
    Default,
    Primary,
    Success,
    Warning,
    Danger,
    Muted,
    /// Full styling override; carries a presentation-specific class name.
    Custom(String),
}

/// Future returned by an action handler.
pub type ActionFuture = BoxFuture<'static, Result<(), ActionError>>;

type ActionHandler = Arc<dyn Fn() -> ActionFuture + Send + Sync>;

/// A button attached to a notification.
///
/// The handler may be asynchronous and may fail. Whatever its outcome, the
/// notification is dismissed afterwards unless [`Action::keep_open`] was used.
#[derive(Clone)]
pub struct Action {
    label: String,
    variant: ActionVariant,
    dismiss_on_click: bool,
    handler: ActionHandler,
}

impl Action {
    /// Creates an action that dismisses its notification once the handler finishes.
    pub fn new<F, Fut>(label: impl Into<String>, handler: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = Result<(), ActionError>> + Send + 'static,
    {
        Self {
            label: label.into(),
            variant: ActionVariant::default(),
            dismiss_on_click: true,
            handler: Arc::new(move || handler().boxed()),
        }
    }

    /// Keeps the notification visible after the handler runs.
    #[must_use]
    pub fn keep_open(mut self) -> Self {
        self.dismiss_on_click = false;
        self
    }

    #[must_use]
    pub fn with_variant(mut self, variant: ActionVariant) -> Self {
        self.variant = variant;
        self
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn variant(&self) -> &ActionVariant {
        &self.variant
    }

    #[must_use]
    pub fn dismiss_on_click(&self) -> bool {
        self.dismiss_on_click
    }

    /// Starts the handler.
    #[must_use]
    pub fn invoke(&self) -> ActionFuture {
        (self.handler)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("label", &self.label)
            .field("variant", &self.variant)
            .field("dismiss_on_click", &self.dismiss_on_click)
            .finish_non_exhaustive()
    }
}

/// Person a rich notification is attributed to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Avatar {
    pub name: String,
    /// Image location, if any. Without one, renderers show [`Avatar::initials`].
    pub src: Option<String>,
    /// Free-form, pre-formatted time label.
    pub timestamp: Option<String>,
}

impl Avatar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            src: None,
            timestamp: None,
        }
    }

    #[must_use]
    pub fn with_src(mut self, src: impl Into<String>) -> Self {
        self.src = Some(src.into());
        self
    }

    #[must_use]
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// First letters of the first and last name parts, uppercased.
    ///
    /// A single-word name counts as both first and last part, so
    /// `"plato"` yields `"PP"`.
    #[must_use]
    pub fn initials(&self) -> String {
        let mut parts = self.name.split_whitespace();
        let Some(first) = parts.next() else {
            return String::new();
        };
        let last = parts.last().unwrap_or(first);

        [first, last]
            .into_iter()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Optional fields of a notification request.
#[derive(Debug, Clone, Default)]
pub struct NotificationOptions {
    pub description: Option<String>,
    pub action: Option<Action>,
    /// Auto-dismiss delay; `Duration::ZERO` persists until dismissed.
    /// `None` uses the queue's default.
    pub duration: Option<Duration>,
    pub id: Option<NotificationId>,
    /// Requests sharing a non-empty key refresh a single notification.
    pub dedupe_key: Option<String>,
    pub avatar: Option<Avatar>,
}

/// A request to display a notification.
#[derive(Debug, Clone)]
pub struct NotificationRequest {
    category: Category,
    title: String,
    options: NotificationOptions,
}

impl NotificationRequest {
    pub fn new(category: Category, title: impl Into<String>) -> Self {
        Self {
            category,
            title: title.into(),
            options: NotificationOptions::default(),
        }
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(Category::Info, title)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(Category::Warning, title)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(Category::Error, title)
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(Category::Success, title)
    }

    pub fn avatar(title: impl Into<String>, avatar: Avatar) -> Self {
        Self::new(Category::Avatar, title).with_avatar(avatar)
    }

    /// Replaces all optional fields at once.
    #[must_use]
    pub fn with_options(mut self, options: NotificationOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.options.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_action(mut self, action: Action) -> Self {
        self.options.action = Some(action);
        self
    }

    #[must_use]
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.options.duration = Some(duration);
        self
    }

    #[must_use]
    pub fn with_id(mut self, id: impl Into<NotificationId>) -> Self {
        self.options.id = Some(id.into());
        self
    }

    #[must_use]
    pub fn with_dedupe_key(mut self, key: impl Into<String>) -> Self {
        self.options.dedupe_key = Some(key.into());
        self
    }

    #[must_use]
    pub fn with_avatar(mut self, avatar: Avatar) -> Self {
        self.options.avatar = Some(avatar);
        self
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn duration(&self) -> Option<Duration> {
        self.options.duration
    }

    #[must_use]
    pub fn id(&self) -> Option<&NotificationId> {
        self.options.id.as_ref()
    }

    /// The dedupe key, ignoring empty strings.
    #[must_use]
    pub fn dedupe_key(&self) -> Option<&str> {
        self.options.dedupe_key.as_deref().filter(|key| !key.is_empty())
    }
}

/// A notification active in the queue.
#[derive(Debug, Clone)]
pub struct Notification {
    id: NotificationId,
    category: Category,
    title: String,
    description: Option<String>,
    action: Option<Action>,
    avatar: Option<Avatar>,
    dedupe_key: Option<String>,
    /// Admission time on the scheduler clock.
    created_at: Duration,
    duration: Duration,
}

impl Notification {
    pub(crate) fn admit(
        id: NotificationId,
        request: NotificationRequest,
        created_at: Duration,
        duration: Duration,
    ) -> Self {
        let NotificationRequest {
            category,
            title,
            options,
        } = request;

        Self {
            id,
            category,
            title,
            description: options.description,
            action: options.action,
            avatar: options.avatar,
            dedupe_key: options.dedupe_key.filter(|key| !key.is_empty()),
            created_at,
            duration,
        }
    }

    #[must_use]
    pub fn id(&self) -> &NotificationId {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn action(&self) -> Option<&Action> {
        self.action.as_ref()
    }

    #[must_use]
    pub fn avatar(&self) -> Option<&Avatar> {
        self.avatar.as_ref()
    }

    #[must_use]
    pub fn dedupe_key(&self) -> Option<&str> {
        self.dedupe_key.as_deref()
    }

    /// When this notification was admitted or last refreshed, on the
    /// scheduler's clock.
    #[must_use]
    pub fn created_at(&self) -> Duration {
        self.created_at
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Returns whether this notification waits for an explicit dismiss.
    #[must_use]
    pub fn is_persistent(&self) -> bool {
        self.duration.is_zero()
    }
}
