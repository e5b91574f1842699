// SPDX-License-Identifier: MPL-2.0
//! Toast notification engine.
//!
//! Notifications appear temporarily to inform users about actions (save
//! success, errors, etc.) without blocking interaction. This module owns
//! their queue and countdowns; rendering them is left to the caller.
//!
//! # Components
//!
//! - [`notification`] - `Notification`, requests, and opaque payload types
//! - [`manager`] - `Manager`, the queue and timer engine
//! - [`scheduler`] - Injectable clock and countdown capability
//! - [`service`] - `Toaster`, the engine hosted on a tokio task
//!
//! # Usage
//!
//! ```
//! use std::time::Duration;
//! use toast_queue::notifications::{Manager, NotificationRequest, QueueSettings};
//!
//! let mut manager = Manager::manual(QueueSettings::default());
//! let id = manager
//!     .add(NotificationRequest::success("Image saved").with_duration(Duration::from_secs(3)))
//!     .into_id();
//!
//! // Pointer enters the toast, leaves it again.
//! manager.pause_timer(&id);
//! manager.resume_timer(&id);
//!
//! manager.advance(Duration::from_secs(3));
//! assert!(manager.is_empty());
//! ```
//!
//! # Design Considerations
//!
//! - Default duration: 3s; `Duration::ZERO` waits for a manual dismiss
//! - Max active toasts: 5, oldest dropped first
//! - Repeated triggers sharing a dedupe key refresh one toast instead of stacking

pub mod manager;
pub mod notification;
pub mod scheduler;
pub mod service;

pub use manager::{Admission, Manager, Message, QueueSettings};
pub use notification::{
    Action, ActionFuture, ActionVariant, Avatar, Category, Notification, NotificationId,
    NotificationOptions, NotificationRequest,
};
pub use scheduler::{ManualScheduler, Scheduler, TimerKey, TokioScheduler};
pub use service::{Snapshot, Toaster};
