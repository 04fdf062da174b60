// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Events: the input vocabulary and event dispatch protocol shared by
//! the Thicket dropdown widgets.
//!
//! ## Overview
//!
//! Thicket widgets are headless: the host framework owns the real input
//! events and forwards them to the controllers as values from this crate.
//! Two small protocols live here:
//!
//! - **Input vocabulary** ([`types::Key`], [`types::Input`]): the handful of
//!   keys and pointer transitions the widgets react to. Everything else maps
//!   to [`types::Key::Other`] and is ignored.
//! - **Command dispatch** ([`dispatch`]): the cancelable `command` /
//!   non-cancelable `commanded` notification pair a dropdown fans out to its
//!   listeners when a menu item is activated. Cancelling `command` vetoes the
//!   interaction: no checked-state change, no close request, no `commanded`.
//!
//! Propagation through nested menus is controlled with [`types::Outcome`]:
//! a handler that returns [`types::Outcome::Stop`] consumed the event and the
//! host must not deliver it to ancestor menus or the dropdown container.
//!
//! ## Minimal example
//!
//! ```rust
//! use thicket_events::dispatch::{dispatch_command, CommandListener};
//! use thicket_events::types::{CommandDetail, EventStatus};
//!
//! struct Veto;
//! impl CommandListener<&'static str, u32> for Veto {
//!     fn command(&mut self, _detail: &CommandDetail<&'static str, u32>) -> EventStatus {
//!         EventStatus::Canceled
//!     }
//! }
//!
//! let detail = CommandDetail { command: Some("copy"), related_target: Some(7_u32) };
//! let mut veto = Veto;
//! let mut listeners: [&mut dyn CommandListener<&'static str, u32>; 1] = [&mut veto];
//! assert!(!dispatch_command(&mut listeners, &detail));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod dispatch;
pub mod types;
