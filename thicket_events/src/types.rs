// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types: keys, input transitions, command payloads, and outcomes.

/// Keys the dropdown widgets react to.
///
/// Hosts translate their native key identifiers with [`Key::from_name`]; any
/// key outside this set maps to [`Key::Other`] and is ignored by every
/// controller.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// The space bar.
    Space,
    /// Enter / Return.
    Enter,
    /// Escape.
    Escape,
    /// Tab (any direction; the widgets treat Tab as "focus is leaving").
    Tab,
    /// Home.
    Home,
    /// End.
    End,
    /// Arrow up.
    ArrowUp,
    /// Arrow down.
    ArrowDown,
    /// Arrow left.
    ArrowLeft,
    /// Arrow right.
    ArrowRight,
    /// Any key the widgets do not handle.
    Other,
}

impl Key {
    /// Map a DOM-style `key` name (`" "`, `"Enter"`, `"ArrowUp"`, …) into the
    /// widget vocabulary.
    pub fn from_name(name: &str) -> Self {
        match name {
            " " => Self::Space,
            "Enter" => Self::Enter,
            "Escape" => Self::Escape,
            "Tab" => Self::Tab,
            "Home" => Self::Home,
            "End" => Self::End,
            "ArrowUp" => Self::ArrowUp,
            "ArrowDown" => Self::ArrowDown,
            "ArrowLeft" => Self::ArrowLeft,
            "ArrowRight" => Self::ArrowRight,
            _ => Self::Other,
        }
    }
}

/// An input transition delivered to a controller.
///
/// This doubles as the open-reason value recorded by the dropdown's mailbox:
/// the menu inspects which input caused the most recent open to decide its
/// initial focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Input {
    /// A pointer click (press + release on the same control).
    Click,
    /// The pointer entered the control.
    PointerEnter,
    /// The pointer left the control.
    PointerLeave,
    /// A key was pressed.
    Key(Key),
}

/// Payload carried by `command` and `commanded` events.
///
/// `C` is the host's command identifier type (a string, an integer, a record);
/// `K` is the node handle type identifying the activated item.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandDetail<C, K> {
    /// The activated item's `command` input, if any.
    pub command: Option<C>,
    /// Handle of the element the interaction targeted.
    pub related_target: Option<K>,
}

/// A listener's verdict on a cancelable event.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EventStatus {
    /// Let the interaction proceed.
    Propagate,
    /// Veto the interaction: suppress state changes and `commanded`.
    Canceled,
}

/// Propagation control for keyboard events walking the menu ancestor chain.
///
/// A submenu that consumes Escape returns [`Outcome::Stop`] so the ancestor
/// menus and the dropdown container never see the key; everything else
/// continues outward.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Keep propagating to ancestors.
    Continue,
    /// The event was consumed; do not deliver it further.
    Stop,
}
