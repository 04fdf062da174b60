// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Roster descriptors and the aggregate-checked computation.
//!
//! Each menu owns an ordered roster of [`ItemEntry`] descriptors for its
//! *direct* children only — items and immediate submenus, never
//! grandchildren. Entries are identified by their element handle; a nested
//! submenu registers as a single pseudo-item carrying its aggregate checked
//! value, which is how aggregation composes up arbitrarily deep chains.

use thicket_aria::{Checked, ItemRole};

bitflags::bitflags! {
    /// Per-entry state flags.
    ///
    /// `HIDDEN` removes an entry from roving focus; `DISABLED` does not —
    /// disabled items must stay focusable so keyboard users can discover
    /// them.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct ItemFlags: u8 {
        /// Entry cannot be activated.
        const DISABLED = 0b0000_0001;
        /// Entry is not rendered and is skipped by roving focus.
        const HIDDEN = 0b0000_0010;
    }
}

/// What kind of entry a roster slot holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A plain activatable item.
    Menuitem,
    /// A single-select item.
    Menuitemradio,
    /// A multi-select item.
    Menuitemcheckbox,
    /// A nested submenu registered as a pseudo-item.
    Submenu,
}

impl ItemKind {
    /// The roster kind for an interactive item role.
    pub const fn from_role(role: ItemRole) -> Self {
        match role {
            ItemRole::Menuitem => Self::Menuitem,
            ItemRole::Menuitemradio => Self::Menuitemradio,
            ItemRole::Menuitemcheckbox => Self::Menuitemcheckbox,
        }
    }

    /// Whether entries of this kind may carry a checked value.
    pub const fn is_checkable(self) -> bool {
        !matches!(self, Self::Menuitem)
    }
}

/// A registered child descriptor.
///
/// Descriptors are plain values: children rebuild and re-register them when
/// their state changes, and registration replaces by element identity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ItemEntry<K> {
    /// Element handle; roster identity.
    pub element: K,
    /// Entry kind.
    pub kind: ItemKind,
    /// Disabled/hidden flags.
    pub flags: ItemFlags,
    /// Checked state; `None` for plain items and for submenus whose
    /// aggregate is undefined.
    pub checked: Option<Checked>,
}

impl<K> ItemEntry<K> {
    /// Build an entry with empty flags and no checked state.
    pub const fn new(element: K, kind: ItemKind) -> Self {
        Self {
            element,
            kind,
            flags: ItemFlags::empty(),
            checked: None,
        }
    }

    /// Attach flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Attach a checked state.
    #[must_use]
    pub const fn with_checked(mut self, checked: Checked) -> Self {
        self.checked = Some(checked);
        self
    }

    /// Whether the entry is hidden.
    pub const fn is_hidden(&self) -> bool {
        self.flags.contains(ItemFlags::HIDDEN)
    }

    /// Whether the entry is disabled.
    pub const fn is_disabled(&self) -> bool {
        self.flags.contains(ItemFlags::DISABLED)
    }
}

/// Summarize the checked state of a submenu's roster.
///
/// Operates on the checked-bearing entries only (checkable items and
/// pseudo-items with a defined aggregate):
///
/// - no such entries → `None` (blank marker),
/// - radio and checkbox kinds mixed together → `None` (ambiguous),
/// - any radios → `True` if any entry is `True`, else `False` (a mixed radio
///   reads as unchecked per ARIA, so no partial marker exists),
/// - otherwise → `True` iff all are `True`; `Mixed` if any is `True` or
///   `Mixed`; else `False`.
pub fn aggregate_checked<K>(entries: &[ItemEntry<K>]) -> Option<Checked> {
    let mut filtered = entries
        .iter()
        .filter(|entry| entry.kind != ItemKind::Menuitem && entry.checked.is_some())
        .peekable();
    filtered.peek()?;

    let filtered: smallvec::SmallVec<[&ItemEntry<K>; 8]> = filtered.collect();
    let has_radio = filtered.iter().any(|e| e.kind == ItemKind::Menuitemradio);
    let has_checkbox = filtered
        .iter()
        .any(|e| e.kind == ItemKind::Menuitemcheckbox);
    if has_radio && has_checkbox {
        return None;
    }

    if has_radio {
        let any_true = filtered.iter().any(|e| e.checked == Some(Checked::True));
        return Some(if any_true { Checked::True } else { Checked::False });
    }

    if filtered.iter().all(|e| e.checked == Some(Checked::True)) {
        return Some(Checked::True);
    }
    let any_set = filtered
        .iter()
        .any(|e| matches!(e.checked, Some(Checked::True | Checked::Mixed)));
    Some(if any_set { Checked::Mixed } else { Checked::False })
}
