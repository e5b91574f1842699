// SPDX-License-Identifier: MPL-2.0
//! Domain layer - value objects with ZERO external dependencies.
//!
//! This module contains pure domain types and their validity rules.
//! It has no dependencies on external crates (except `std`) so the bounds
//! can be shared by the config layer and the engine without pulling in
//! serde or tokio.
//!
//! # Modules
//!
//! - [`notifications`]: Queue value objects ([`MaxActive`](notifications::MaxActive),
//!   [`DefaultDuration`](notifications::DefaultDuration))

pub mod notifications;
