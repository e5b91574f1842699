// SPDX-License-Identifier: MPL-2.0
//! `toast_queue` is a transient notification (toast) engine.
//!
//! It keeps a bounded, newest-first queue of active notifications, collapses
//! repeated requests sharing a dedupe key, and expires each notification after
//! its duration unless hover or focus pauses the countdown.
//!
//! The engine ([`notifications::Manager`]) is synchronous and runtime-agnostic;
//! timers come from an injected [`notifications::Scheduler`]. The
//! [`notifications::service`] module hosts an engine on a tokio task for
//! applications that want a cloneable handle instead.

#![doc(html_root_url = "https://docs.rs/toast_queue/0.1.0")]

pub mod config;
pub mod domain;
pub mod error;
pub mod notifications;
