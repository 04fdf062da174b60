// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Aria: the ARIA menu-pattern vocabulary shared by the Thicket widgets.
//!
//! This crate owns two things:
//!
//! - The **value vocabulary** of the [WAI-ARIA menu pattern] as it applies to
//!   dropdown widgets: [`Checked`] (the tristate `aria-checked` value) and
//!   [`ItemRole`] (the menu item roles).
//! - The **attribute bags** each widget hands to its host renderer:
//!   [`toggle_attrs`], [`menu_attrs`], [`submenu_toggle_attrs`],
//!   [`item_attrs`], and [`separator_attrs`]. A bag is an ordered list of
//!   name/value pairs the host spreads onto the element it renders; Thicket
//!   never touches markup itself.
//!
//! The attribute output is part of the widgets' compatibility contract and is
//! expected to hold bit-exact across hosts: a toggle always carries
//! `aria-haspopup="menu"`, `aria-expanded`, and `aria-controls`; a menu panel
//! carries `role="menu"` and `aria-orientation="vertical"`; items mirror their
//! checked state into both `aria-selected` and `aria-checked`.
//!
//! ## Minimal example
//!
//! ```rust
//! use thicket_aria::{item_attrs, Checked, ItemRole};
//!
//! let attrs = item_attrs(ItemRole::Menuitemcheckbox, Some(Checked::Mixed), false);
//! let checked = attrs.iter().find(|a| a.name == "aria-checked").unwrap();
//! assert_eq!(checked.value, "mixed");
//! ```
//!
//! Disabled items keep `tabindex="-1"` rather than a native `disabled`
//! attribute: a disabled menu item must stay focusable so keyboard users can
//! discover it, and `aria-disabled` communicates the state instead.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use alloc::borrow::Cow;
use core::fmt;
use core::str::FromStr;

use smallvec::SmallVec;

/// Tristate checked value, the `aria-checked` vocabulary.
///
/// The string forms (`"true"`, `"false"`, `"mixed"`) are the exact attribute
/// values; [`Checked::Mixed`] is only meaningful for checkbox-like items and
/// submenu aggregates.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Checked {
    /// `aria-checked="true"`.
    True,
    /// `aria-checked="false"`.
    False,
    /// `aria-checked="mixed"` (partially checked).
    Mixed,
}

impl Checked {
    /// The attribute value for this state.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::True => "true",
            Self::False => "false",
            Self::Mixed => "mixed",
        }
    }

    /// Whether this state reads as "at least partially checked".
    ///
    /// Used by submenu toggles to decide whether to display a checked marker.
    pub const fn is_set(self) -> bool {
        !matches!(self, Self::False)
    }
}

/// Error returned when parsing an unrecognized checked value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseCheckedError;

impl fmt::Display for ParseCheckedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("checked value must be one of `true`, `false`, `mixed`")
    }
}

impl core::error::Error for ParseCheckedError {}

impl FromStr for Checked {
    type Err = ParseCheckedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true" => Ok(Self::True),
            "false" => Ok(Self::False),
            "mixed" => Ok(Self::Mixed),
            _ => Err(ParseCheckedError),
        }
    }
}

/// Role of an interactive menu entry.
///
/// Dividers are not a role: a separator is a rendering mode, and submenu
/// pseudo-items register with their own kind at the roster layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemRole {
    /// A plain activatable entry (`role="menuitem"`).
    Menuitem,
    /// A single-select entry (`role="menuitemradio"`).
    Menuitemradio,
    /// A multi-select entry (`role="menuitemcheckbox"`).
    Menuitemcheckbox,
}

impl ItemRole {
    /// The `role` attribute value.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menuitem => "menuitem",
            Self::Menuitemradio => "menuitemradio",
            Self::Menuitemcheckbox => "menuitemcheckbox",
        }
    }

    /// Whether this role carries a checked state.
    pub const fn is_checkable(self) -> bool {
        !matches!(self, Self::Menuitem)
    }
}

/// Error returned when parsing an unrecognized item role.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseItemRoleError;

impl fmt::Display for ParseItemRoleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("role must be one of `menuitem`, `menuitemradio`, `menuitemcheckbox`")
    }
}

impl core::error::Error for ParseItemRoleError {}

impl FromStr for ItemRole {
    type Err = ParseItemRoleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menuitem" => Ok(Self::Menuitem),
            "menuitemradio" => Ok(Self::Menuitemradio),
            "menuitemcheckbox" => Ok(Self::Menuitemcheckbox),
            _ => Err(ParseItemRoleError),
        }
    }
}

/// A single host-facing attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attr {
    /// Attribute name.
    pub name: &'static str,
    /// Attribute value. Static for fixed vocabulary, owned for ids.
    pub value: Cow<'static, str>,
}

impl Attr {
    /// Build an attribute from a static value.
    pub const fn fixed(name: &'static str, value: &'static str) -> Self {
        Self {
            name,
            value: Cow::Borrowed(value),
        }
    }
}

/// An ordered attribute bag the host spreads onto one rendered element.
pub type AttributeBag = SmallVec<[Attr; 6]>;

const fn bool_str(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Attributes for the dropdown toggle control.
///
/// `controls` is the menu panel id (the dropdown's `id` input).
pub fn toggle_attrs(expanded: bool, controls: &str) -> AttributeBag {
    let mut bag = AttributeBag::new();
    bag.push(Attr::fixed("aria-haspopup", "menu"));
    bag.push(Attr::fixed("aria-expanded", bool_str(expanded)));
    bag.push(Attr {
        name: "aria-controls",
        value: Cow::Owned(controls.into()),
    });
    bag
}

/// Attributes for a menu or submenu panel.
///
/// The root menu panel carries the dropdown id so that `aria-controls` on the
/// toggle resolves; submenus pass `None`.
pub fn menu_attrs(id: Option<&str>) -> AttributeBag {
    let mut bag = AttributeBag::new();
    if let Some(id) = id {
        bag.push(Attr {
            name: "id",
            value: Cow::Owned(id.into()),
        });
    }
    bag.push(Attr::fixed("role", "menu"));
    bag.push(Attr::fixed("aria-orientation", "vertical"));
    bag
}

/// Attributes for a submenu's toggle button.
///
/// The toggle participates in its parent menu as a `menuitem` while also
/// owning a popup, so it carries both `role="menuitem"` and the
/// haspopup/expanded pair.
pub fn submenu_toggle_attrs(expanded: bool) -> AttributeBag {
    let mut bag = AttributeBag::new();
    bag.push(Attr::fixed("tabindex", "-1"));
    bag.push(Attr::fixed("role", "menuitem"));
    bag.push(Attr::fixed("aria-haspopup", "menu"));
    bag.push(Attr::fixed("aria-expanded", bool_str(expanded)));
    bag
}

/// Attributes for an interactive menu item.
///
/// Checkable roles mirror `checked` into both `aria-selected` and
/// `aria-checked`; plain items carry neither.
pub fn item_attrs(role: ItemRole, checked: Option<Checked>, disabled: bool) -> AttributeBag {
    let mut bag = AttributeBag::new();
    bag.push(Attr::fixed("tabindex", "-1"));
    bag.push(Attr::fixed("role", role.as_str()));
    bag.push(Attr::fixed("aria-disabled", bool_str(disabled)));
    if role.is_checkable() {
        let checked = checked.unwrap_or(Checked::False);
        bag.push(Attr::fixed("aria-selected", checked.as_str()));
        bag.push(Attr::fixed("aria-checked", checked.as_str()));
    }
    bag
}

/// Attributes for a divider.
pub fn separator_attrs() -> AttributeBag {
    let mut bag = AttributeBag::new();
    bag.push(Attr::fixed("role", "separator"));
    bag.push(Attr::fixed("aria-orientation", "horizontal"));
    bag
}
