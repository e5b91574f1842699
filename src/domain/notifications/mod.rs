// SPDX-License-Identifier: MPL-2.0
//! Notification queue domain types.
//!
//! This module provides pure domain types for the queue engine:
//! - [`MaxActive`]: How many notifications may be active at once
//! - [`DefaultDuration`]: Auto-dismiss delay used when a request names none

mod newtypes;

pub use newtypes::{default_duration_bounds, max_active_bounds, DefaultDuration, MaxActive};
