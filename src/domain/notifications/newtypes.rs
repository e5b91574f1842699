// SPDX-License-Identifier: MPL-2.0
//! Notification queue newtypes.
//!
//! This module provides type-safe wrappers for queue settings,
//! ensuring they are always within valid ranges.

use std::time::Duration;

// =============================================================================
// Max Active Bounds
// =============================================================================

/// Active notification bounds (1 to 50 entries).
pub mod max_active_bounds {
    /// Minimum number of active notifications.
    pub const MIN: usize = 1;
    /// Maximum number of active notifications.
    pub const MAX: usize = 50;
    /// Default number of active notifications.
    pub const DEFAULT: usize = 5;
}

// =============================================================================
// MaxActive
// =============================================================================

/// Capacity of the active notification queue.
///
/// Admitting a notification past this bound evicts the oldest entries.
/// Values outside the valid range (1–50) are clamped.
///
/// # Example
///
/// ```
/// use toast_queue::domain::notifications::MaxActive;
///
/// assert_eq!(MaxActive::new(3).value(), 3);
/// assert_eq!(MaxActive::new(0).value(), 1);
/// assert_eq!(MaxActive::default().value(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxActive(usize);

impl MaxActive {
    /// Creates a new capacity, clamping to valid range.
    #[must_use]
    pub fn new(value: usize) -> Self {
        Self(value.clamp(max_active_bounds::MIN, max_active_bounds::MAX))
    }

    /// Returns the value as usize.
    #[must_use]
    pub fn value(self) -> usize {
        self.0
    }
}

impl Default for MaxActive {
    fn default() -> Self {
        Self(max_active_bounds::DEFAULT)
    }
}

// =============================================================================
// Default Duration Bounds
// =============================================================================

/// Default auto-dismiss bounds in milliseconds (0 to 10 minutes).
///
/// Zero is valid: it makes notifications persist until dismissed.
pub mod default_duration_bounds {
    /// Minimum default duration in milliseconds.
    pub const MIN_MS: u64 = 0;
    /// Maximum default duration in milliseconds.
    pub const MAX_MS: u64 = 600_000;
    /// Default duration in milliseconds.
    pub const DEFAULT_MS: u64 = 3_000;
}

// =============================================================================
// DefaultDuration
// =============================================================================

/// Auto-dismiss delay applied to requests that do not carry their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultDuration(u64);

impl DefaultDuration {
    /// Creates a new default duration from milliseconds, clamping to valid range.
    #[must_use]
    pub fn from_millis(ms: u64) -> Self {
        Self(ms.clamp(
            default_duration_bounds::MIN_MS,
            default_duration_bounds::MAX_MS,
        ))
    }

    /// Returns the value in milliseconds.
    #[must_use]
    pub fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the value as a [`Duration`].
    #[must_use]
    pub fn as_duration(self) -> Duration {
        Duration::from_millis(self.0)
    }

    /// Returns true if notifications using this default never expire.
    #[must_use]
    pub fn is_persistent(self) -> bool {
        self.0 == 0
    }
}

impl Default for DefaultDuration {
    fn default() -> Self {
        Self(default_duration_bounds::DEFAULT_MS)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_active_clamps_to_valid_range() {
        assert_eq!(MaxActive::new(0).value(), max_active_bounds::MIN);
        assert_eq!(MaxActive::new(1_000).value(), max_active_bounds::MAX);
    }

    #[test]
    fn max_active_accepts_valid_values() {
        assert_eq!(MaxActive::new(1).value(), 1);
        assert_eq!(MaxActive::new(5).value(), 5);
        assert_eq!(MaxActive::new(50).value(), 50);
    }

    #[test]
    fn max_active_default_is_five() {
        assert_eq!(MaxActive::default().value(), 5);
    }

    #[test]
    fn default_duration_clamps_upper_bound() {
        assert_eq!(
            DefaultDuration::from_millis(u64::MAX).as_millis(),
            default_duration_bounds::MAX_MS
        );
    }

    #[test]
    fn default_duration_zero_is_persistent() {
        let duration = DefaultDuration::from_millis(0);
        assert!(duration.is_persistent());
        assert_eq!(duration.as_duration(), Duration::ZERO);
    }

    #[test]
    fn default_duration_default_is_three_seconds() {
        let duration = DefaultDuration::default();
        assert_eq!(duration.as_duration(), Duration::from_secs(3));
        assert!(!duration.is_persistent());
    }
}
