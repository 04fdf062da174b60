// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_dropdown --heading-base-level=0

//! Thicket Dropdown: the headless toggle/open-state controller.
//!
//! A [`Dropdown`] owns exactly one piece of state — the open/closed boolean —
//! plus the machinery around it: the hover-intent delayed close, the
//! open-reason mailbox, and overlay/Escape/Tab dismissal. Any number of menus
//! and items read that state; none of them own it.
//!
//! ## Host contract
//!
//! The controller is renderer-agnostic and clock-agnostic:
//!
//! - **Input**: the host forwards pointer and keyboard activity as
//!   [`Input`]/[`Key`] values to [`Dropdown::toggle_pointer`],
//!   [`Dropdown::toggle_keydown`], [`Dropdown::container_keydown`], and
//!   [`Dropdown::overlay_click`].
//! - **Time**: delayed closes are deadlines in host milliseconds. The host
//!   calls [`Dropdown::poll`] with its current timestamp; a due deadline
//!   closes the dropdown. A new interaction before the deadline replaces or
//!   cancels it — there is never more than one pending timer.
//! - **Output**: every operation returns [`DropdownEffect`]s the host applies
//!   after its next render pass (move focus back to the toggle, notify an
//!   external state owner).
//!
//! ## Open-state ownership
//!
//! By default the controller owns the boolean. With
//! [`Dropdown::with_external_open`] the state is two-way bound: reads return
//! the host-supplied value, and writes emit
//! [`DropdownEffect::ModelUpdate`] instead of mutating — the host decides
//! whether to echo the value back via [`Dropdown::set_external_open`].
//!
//! ## Minimal example
//!
//! ```rust
//! use thicket_dropdown::{Dropdown, DropdownEffect};
//! use thicket_events::types::{Input, Key};
//!
//! let mut dropdown = Dropdown::new("menu-1");
//!
//! // ArrowDown on the toggle opens and records the reason for the menu.
//! dropdown.toggle_keydown(Key::ArrowDown);
//! assert!(dropdown.open());
//! assert_eq!(dropdown.take_open_reason(), Some(Input::Key(Key::ArrowDown)));
//!
//! // Escape closes and asks the host to refocus the toggle.
//! let effects = dropdown.toggle_keydown(Key::Escape);
//! assert!(!dropdown.open());
//! assert!(effects.contains(&DropdownEffect::FocusToggle));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use smallvec::SmallVec;
use thicket_aria::AttributeBag;
use thicket_events::types::{Input, Key};

mod install;

pub use install::ComponentNames;

/// Default delayed-close interval for the hover-triggered dropdown, in
/// host milliseconds.
pub const DELAYED_CLOSE_MS: u64 = 150;

/// What opens the dropdown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Cause {
    /// Clicking the toggle flips the state; an overlay handles dismissal.
    #[default]
    Click,
    /// Hovering the toggle opens; leaving schedules a delayed close.
    Hover,
}

impl Cause {
    /// The configuration token for this cause.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Hover => "hover",
        }
    }
}

/// Error returned when parsing an unrecognized cause token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseCauseError;

impl fmt::Display for ParseCauseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("cause must be one of `click`, `hover`")
    }
}

impl core::error::Error for ParseCauseError {}

impl FromStr for Cause {
    type Err = ParseCauseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "click" => Ok(Self::Click),
            "hover" => Ok(Self::Hover),
            _ => Err(ParseCauseError),
        }
    }
}

/// Side effects the host applies after an operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DropdownEffect {
    /// Notify an external open-state owner of the requested value (the
    /// `update:modelValue` leg of a two-way binding).
    ModelUpdate(bool),
    /// The open state settled to the contained value.
    Toggled(bool),
    /// Move focus back to the toggle control after the next render pass.
    FocusToggle,
}

/// Effect list returned by every [`Dropdown`] operation.
pub type DropdownEffects = SmallVec<[DropdownEffect; 2]>;

#[derive(Copy, Clone, Debug)]
enum OpenModel {
    /// The controller owns the boolean.
    Owned(bool),
    /// The host owns it; this is a cache of the last value it supplied.
    External(bool),
}

/// The toggle/open-state controller.
///
/// See the [crate docs](crate) for the host contract.
#[derive(Clone, Debug)]
pub struct Dropdown {
    open: OpenModel,
    cause: Cause,
    id: String,
    nooverlay: bool,
    pending_close: Option<u64>,
    open_reason: Option<Input>,
}

impl Dropdown {
    /// Create a click-triggered dropdown that owns its (closed) open state.
    ///
    /// `id` names the menu panel and the toggle's `aria-controls`; use
    /// [`token_id`] to derive the default token when the host has no stable
    /// id of its own.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            open: OpenModel::Owned(false),
            cause: Cause::Click,
            id: id.into(),
            nooverlay: false,
            pending_close: None,
            open_reason: None,
        }
    }

    /// Select the trigger behavior.
    #[must_use]
    pub fn with_cause(mut self, cause: Cause) -> Self {
        self.cause = cause;
        self
    }

    /// Skip rendering the dismiss overlay (click-triggered dropdowns only).
    #[must_use]
    pub fn without_overlay(mut self) -> Self {
        self.nooverlay = true;
        self
    }

    /// Bind the open state to an external owner, starting from `open`.
    ///
    /// Writes then emit [`DropdownEffect::ModelUpdate`] instead of mutating;
    /// the host echoes accepted values back with
    /// [`Dropdown::set_external_open`].
    #[must_use]
    pub fn with_external_open(mut self, open: bool) -> Self {
        self.open = OpenModel::External(open);
        self
    }

    /// Current open state.
    pub fn open(&self) -> bool {
        match self.open {
            OpenModel::Owned(open) | OpenModel::External(open) => open,
        }
    }

    /// The configured trigger behavior.
    pub fn cause(&self) -> Cause {
        self.cause
    }

    /// The menu panel id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Whether the dismiss overlay exists.
    ///
    /// Only click-triggered dropdowns render the overlay, and only when it
    /// has not been disabled; the host shows it while the dropdown is open.
    pub fn overlay_active(&self) -> bool {
        self.cause == Cause::Click && !self.nooverlay
    }

    /// Echo an externally owned open value back into the controller.
    ///
    /// No-op when the controller owns its state.
    pub fn set_external_open(&mut self, value: bool) {
        if let OpenModel::External(cached) = &mut self.open {
            *cached = value;
        }
    }

    /// Pending delayed-close deadline, if any, in host milliseconds.
    ///
    /// Hosts that schedule wake-ups instead of polling on a cadence can use
    /// this to know when the next [`Dropdown::poll`] call matters.
    pub fn pending_close(&self) -> Option<u64> {
        self.pending_close
    }

    /// Set the open state.
    ///
    /// `None` flips. Cancels any pending delayed close, then emits
    /// [`DropdownEffect::Toggled`] with the settled value (preceded by
    /// [`DropdownEffect::ModelUpdate`] when the state is externally owned).
    /// Closing clears the open-reason mailbox so a stale reason can never
    /// leak into a later open.
    pub fn toggle(&mut self, value: Option<bool>) -> DropdownEffects {
        let value = value.unwrap_or(!self.open());
        self.cancel_delayed_closure();

        let mut effects = DropdownEffects::new();
        match &mut self.open {
            OpenModel::Owned(open) => *open = value,
            OpenModel::External(_) => effects.push(DropdownEffect::ModelUpdate(value)),
        }
        if !value {
            self.open_reason = None;
        }
        log::debug!("dropdown `{}` toggled to {value}", self.id);
        effects.push(DropdownEffect::Toggled(value));
        effects
    }

    /// Schedule a close [`DELAYED_CLOSE_MS`] from `now`, replacing any
    /// pending deadline.
    pub fn delayed_closure(&mut self, now: u64) {
        self.delayed_closure_after(now, DELAYED_CLOSE_MS);
    }

    /// Schedule a close `time` milliseconds from `now`, replacing any
    /// pending deadline.
    pub fn delayed_closure_after(&mut self, now: u64, time: u64) {
        self.pending_close = Some(now.saturating_add(time));
        log::trace!("dropdown `{}` close scheduled at {:?}", self.id, self.pending_close);
    }

    /// Drop the pending delayed close, if any.
    pub fn cancel_delayed_closure(&mut self) {
        if self.pending_close.take().is_some() {
            log::trace!("dropdown `{}` pending close canceled", self.id);
        }
    }

    /// Fire a due delayed close.
    ///
    /// Call with the host clock whenever time passes; closes (once) when the
    /// deadline has been reached.
    pub fn poll(&mut self, now: u64) -> DropdownEffects {
        match self.pending_close {
            Some(deadline) if deadline <= now => {
                self.pending_close = None;
                self.toggle(Some(false))
            }
            _ => DropdownEffects::new(),
        }
    }

    /// Consume the open-reason mailbox.
    ///
    /// Returns the input that caused the most recent open and clears the
    /// slot; the first menu to read it decides initial focus. Only meaningful
    /// while the dropdown is open.
    pub fn take_open_reason(&mut self) -> Option<Input> {
        self.open_reason.take()
    }

    /// Pointer activity on the toggle control.
    ///
    /// Clicks flip the state (click-triggered dropdowns only); entering
    /// opens immediately and leaving schedules the delayed close
    /// (hover-triggered only). Opening transitions record `input` as the
    /// open reason.
    pub fn toggle_pointer(&mut self, input: Input, now: u64) -> DropdownEffects {
        let to_state = match (input, self.cause) {
            (Input::Click, Cause::Click) => !self.open(),
            (Input::PointerEnter, Cause::Hover) => true,
            (Input::PointerLeave, Cause::Hover) => {
                self.delayed_closure(now);
                return DropdownEffects::new();
            }
            _ => return DropdownEffects::new(),
        };

        if to_state {
            self.open_reason = Some(input);
        }
        self.toggle(Some(to_state))
    }

    /// Keyboard activity on the toggle control.
    ///
    /// Space/Enter flip, Escape forces closed, ArrowUp/ArrowDown force open;
    /// opening records the key as the open reason, and any transition that
    /// settles closed asks the host to refocus the toggle.
    pub fn toggle_keydown(&mut self, key: Key) -> DropdownEffects {
        let to_state = match key {
            Key::Space | Key::Enter => !self.open(),
            Key::Escape => false,
            Key::ArrowUp | Key::ArrowDown => true,
            _ => return DropdownEffects::new(),
        };

        if to_state {
            self.open_reason = Some(Input::Key(key));
        }
        let mut effects = self.toggle(Some(to_state));
        if !to_state {
            effects.push(DropdownEffect::FocusToggle);
        }
        effects
    }

    /// Keyboard activity anywhere inside the widget container.
    ///
    /// Tab closes (focus is leaving); Escape closes and returns focus to the
    /// toggle. Menus that consume a key (submenu Escape) must not let it
    /// reach this handler.
    pub fn container_keydown(&mut self, key: Key) -> DropdownEffects {
        match key {
            Key::Tab => self.toggle(Some(false)),
            Key::Escape => {
                let mut effects = self.toggle(Some(false));
                effects.push(DropdownEffect::FocusToggle);
                effects
            }
            _ => DropdownEffects::new(),
        }
    }

    /// A click on the dismiss overlay; closes when the overlay exists.
    pub fn overlay_click(&mut self) -> DropdownEffects {
        if !self.overlay_active() {
            return DropdownEffects::new();
        }
        self.toggle(Some(false))
    }

    /// Pointer activity on the root menu panel of a hover-triggered
    /// dropdown: entering cancels the pending close, leaving re-schedules it.
    pub fn menu_hover(&mut self, input: Input, now: u64) {
        if self.cause != Cause::Hover {
            return;
        }
        match input {
            Input::PointerEnter => self.cancel_delayed_closure(),
            Input::PointerLeave => self.delayed_closure(now),
            _ => {}
        }
    }

    /// The attribute bag the host spreads onto its toggle element.
    pub fn toggle_attrs(&self) -> AttributeBag {
        thicket_aria::toggle_attrs(self.open(), &self.id)
    }
}

/// Derive the default menu id token from host-supplied time and entropy.
///
/// Mirrors the historical format: hexadecimal timestamp followed by a
/// hexadecimal random value.
pub fn token_id(now: u64, entropy: u64) -> String {
    format!("{now:x}{entropy:x}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_and_reports() {
        let mut dropdown = Dropdown::new("d");
        let effects = dropdown.toggle(None);
        assert!(dropdown.open());
        assert_eq!(effects.as_slice(), [DropdownEffect::Toggled(true)]);

        let effects = dropdown.toggle(None);
        assert!(!dropdown.open());
        assert_eq!(effects.as_slice(), [DropdownEffect::Toggled(false)]);
    }

    #[test]
    fn external_open_emits_model_update_without_mutating() {
        let mut dropdown = Dropdown::new("d").with_external_open(false);
        let effects = dropdown.toggle(Some(true));
        assert_eq!(
            effects.as_slice(),
            [DropdownEffect::ModelUpdate(true), DropdownEffect::Toggled(true)]
        );
        // The cached value only moves when the host echoes it.
        assert!(!dropdown.open());
        dropdown.set_external_open(true);
        assert!(dropdown.open());
    }

    #[test]
    fn click_flips_only_in_click_mode() {
        let mut dropdown = Dropdown::new("d").with_cause(Cause::Hover);
        assert!(dropdown.toggle_pointer(Input::Click, 0).is_empty());
        assert!(!dropdown.open());

        let mut dropdown = Dropdown::new("d");
        dropdown.toggle_pointer(Input::Click, 0);
        assert!(dropdown.open());
        assert_eq!(dropdown.take_open_reason(), Some(Input::Click));
    }

    #[test]
    fn hover_enter_opens_and_leave_schedules_close() {
        let mut dropdown = Dropdown::new("d").with_cause(Cause::Hover);
        dropdown.toggle_pointer(Input::PointerEnter, 1_000);
        assert!(dropdown.open());

        dropdown.toggle_pointer(Input::PointerLeave, 1_000);
        assert_eq!(dropdown.pending_close(), Some(1_000 + DELAYED_CLOSE_MS));

        // Not yet due.
        assert!(dropdown.poll(1_100).is_empty());
        assert!(dropdown.open());

        // Due: closes exactly once.
        let effects = dropdown.poll(1_150);
        assert_eq!(effects.as_slice(), [DropdownEffect::Toggled(false)]);
        assert!(!dropdown.open());
        assert!(dropdown.poll(2_000).is_empty());
    }

    #[test]
    fn reenter_before_deadline_cancels_close() {
        let mut dropdown = Dropdown::new("d").with_cause(Cause::Hover);
        dropdown.toggle_pointer(Input::PointerEnter, 0);
        dropdown.toggle_pointer(Input::PointerLeave, 10);
        dropdown.toggle_pointer(Input::PointerEnter, 20);
        assert_eq!(dropdown.pending_close(), None);
        assert!(dropdown.poll(10_000).is_empty());
        assert!(dropdown.open());
    }

    #[test]
    fn keyboard_table_matches_contract() {
        let mut dropdown = Dropdown::new("d");

        // Space flips open; reason recorded.
        dropdown.toggle_keydown(Key::Space);
        assert!(dropdown.open());
        assert_eq!(dropdown.take_open_reason(), Some(Input::Key(Key::Space)));

        // Enter flips closed; focus returns to the toggle.
        let effects = dropdown.toggle_keydown(Key::Enter);
        assert!(!dropdown.open());
        assert!(effects.contains(&DropdownEffect::FocusToggle));

        // Arrows force open even when already open.
        dropdown.toggle_keydown(Key::ArrowUp);
        dropdown.toggle_keydown(Key::ArrowDown);
        assert!(dropdown.open());
        assert_eq!(dropdown.take_open_reason(), Some(Input::Key(Key::ArrowDown)));

        // Unhandled keys do nothing.
        assert!(dropdown.toggle_keydown(Key::Home).is_empty());
    }

    #[test]
    fn container_tab_closes_without_refocus() {
        let mut dropdown = Dropdown::new("d");
        dropdown.toggle(Some(true));
        let effects = dropdown.container_keydown(Key::Tab);
        assert_eq!(effects.as_slice(), [DropdownEffect::Toggled(false)]);
    }

    #[test]
    fn container_escape_closes_and_refocuses() {
        let mut dropdown = Dropdown::new("d");
        dropdown.toggle(Some(true));
        let effects = dropdown.container_keydown(Key::Escape);
        assert_eq!(
            effects.as_slice(),
            [DropdownEffect::Toggled(false), DropdownEffect::FocusToggle]
        );
    }

    #[test]
    fn overlay_follows_cause_and_nooverlay() {
        // Click cause + overlay enabled → overlay exists; hover cause → it
        // does not.
        let dropdown = Dropdown::new("d");
        assert!(dropdown.overlay_active());

        let dropdown = Dropdown::new("d").with_cause(Cause::Hover);
        assert!(!dropdown.overlay_active());

        let dropdown = Dropdown::new("d").without_overlay();
        assert!(!dropdown.overlay_active());
    }

    #[test]
    fn overlay_click_dismisses() {
        let mut dropdown = Dropdown::new("d");
        dropdown.toggle(Some(true));
        dropdown.overlay_click();
        assert!(!dropdown.open());

        // Without an overlay the handler is inert.
        let mut dropdown = Dropdown::new("d").without_overlay();
        dropdown.toggle(Some(true));
        assert!(dropdown.overlay_click().is_empty());
        assert!(dropdown.open());
    }

    #[test]
    fn menu_hover_controls_pending_close() {
        let mut dropdown = Dropdown::new("d").with_cause(Cause::Hover);
        dropdown.toggle(Some(true));
        dropdown.menu_hover(Input::PointerLeave, 500);
        assert!(dropdown.pending_close().is_some());
        dropdown.menu_hover(Input::PointerEnter, 510);
        assert_eq!(dropdown.pending_close(), None);

        // Click-mode dropdowns ignore menu hover entirely.
        let mut dropdown = Dropdown::new("d");
        dropdown.menu_hover(Input::PointerLeave, 500);
        assert_eq!(dropdown.pending_close(), None);
    }

    #[test]
    fn stale_reason_does_not_leak_across_opens() {
        let mut dropdown = Dropdown::new("d");
        dropdown.toggle_keydown(Key::ArrowDown);
        // Closed without the menu consuming the reason.
        dropdown.toggle(Some(false));
        dropdown.toggle(Some(true));
        assert_eq!(dropdown.take_open_reason(), None);
    }

    #[test]
    fn toggle_attrs_reflect_state() {
        let mut dropdown = Dropdown::new("menu-9");
        let closed = dropdown.toggle_attrs();
        assert!(closed
            .iter()
            .any(|a| a.name == "aria-expanded" && a.value == "false"));
        dropdown.toggle(Some(true));
        let open = dropdown.toggle_attrs();
        assert!(open
            .iter()
            .any(|a| a.name == "aria-expanded" && a.value == "true"));
        assert!(open
            .iter()
            .any(|a| a.name == "aria-controls" && a.value == "menu-9"));
    }

    #[test]
    fn token_id_is_hex_time_plus_entropy() {
        assert_eq!(token_id(0x1234, 0xabcd), "1234abcd");
    }

    #[test]
    fn cause_parses_from_configuration() {
        assert_eq!("hover".parse::<Cause>(), Ok(Cause::Hover));
        assert_eq!("focus".parse::<Cause>(), Err(ParseCauseError));
    }
}
