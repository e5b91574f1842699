// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! The bounds themselves live in [`crate::domain::notifications`]; this
//! module re-exposes them under config-facing names so the TOML layer and
//! the engine agree on a single source of truth.

use crate::domain::notifications::{default_duration_bounds, max_active_bounds};

// ==========================================================================
// Queue Defaults
// ==========================================================================

/// Default number of notifications shown at once.
pub const DEFAULT_MAX_ACTIVE: usize = max_active_bounds::DEFAULT;

/// Minimum allowed number of active notifications.
pub const MIN_MAX_ACTIVE: usize = max_active_bounds::MIN;

// ==========================================================================
// Auto-dismiss Defaults
// ==========================================================================

/// Default auto-dismiss delay in milliseconds (0 = persist until dismissed).
pub const DEFAULT_DURATION_MS: u64 = default_duration_bounds::DEFAULT_MS;

/// Maximum auto-dismiss delay in milliseconds.
pub const MAX_DURATION_MS: u64 = default_duration_bounds::MAX_MS;
