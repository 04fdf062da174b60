// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=thicket_menu --heading-base-level=0

//! Thicket Menu: headless menu, submenu, and menu item controllers.
//!
//! ## Overview
//!
//! A [`Menu`] renders either a top-level menu or a nested submenu — the same
//! controller, classified once at construction: it is a submenu exactly when
//! an ancestor menu's [`RootMenuContext`] is supplied, and a root menu
//! otherwise. The classification never changes afterwards.
//!
//! Each menu owns a **roster** of descriptors for its direct children
//! ([`roster::ItemEntry`]), registered by items (and nested submenus acting
//! as pseudo-items) when they mount and removed when they unmount.
//! Registration is idempotent by element identity: re-registering replaces
//! the descriptor in place, preserving roster order, because children rebuild
//! their descriptors whenever their state changes.
//!
//! On top of the roster the controller implements:
//!
//! - **Roving focus** ([`Menu::keydown`]): Home/End/ArrowUp/ArrowDown over
//!   the non-hidden entries, wrapping, with disabled entries kept focusable.
//! - **Submenu open/close**: hover intent with a 100 ms debounce
//!   ([`Menu::submenu_pointer`] + [`Menu::poll`]) and keyboard opening
//!   ([`Menu::submenu_toggle_keydown`]); Escape closes only the innermost
//!   open submenu and stops propagating ([`thicket_events::types::Outcome`]).
//! - **Aggregate checked** ([`Menu::checked`]): a submenu summarizes its
//!   checkable children as true/false/mixed/none and registers that summary
//!   as its own pseudo-item checked value in its parent's roster, so the
//!   summary composes recursively up nested chains.
//!
//! ## Host contract
//!
//! Like the rest of Thicket, the controller is headless: operations return
//! [`MenuEffect`] values the host routes. [`MenuEffect::Focus`] is applied
//! after the next render pass; [`MenuEffect::SetChecked`] is delivered to the
//! owning item or submenu controller ([`item::Menuitem::force_checked`] /
//! [`Menu::force_aggregate`]); [`MenuEffect::AggregateChanged`] is delivered
//! to the parent menu ([`Menu::menuitem_checked_changed`]).
//!
//! ## Minimal example
//!
//! ```rust
//! use thicket_aria::Checked;
//! use thicket_menu::roster::{ItemEntry, ItemKind};
//! use thicket_menu::{Menu, MenuProps};
//!
//! let mut menu: Menu<u32> = Menu::new(MenuProps::default());
//! menu.add_menuitem(ItemEntry::new(1, ItemKind::Menuitem));
//! menu.add_menuitem(ItemEntry::new(2, ItemKind::Menuitemradio).with_checked(Checked::True));
//! assert_eq!(menu.roster().len(), 2);
//!
//! // Re-registering replaces in place.
//! menu.add_menuitem(ItemEntry::new(1, ItemKind::Menuitem));
//! assert_eq!(menu.roster().len(), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

use core::fmt;
use core::str::FromStr;

use smallvec::SmallVec;
use thicket_aria::{AttributeBag, Checked};
use thicket_events::types::{Input, Key, Outcome};

pub mod direction;
pub mod item;
pub mod roster;
pub mod roving;

use direction::Direction;
use roster::ItemEntry;

/// Delay before a submenu closes after the pointer leaves it, in host
/// milliseconds.
///
/// The debounce prevents visibility (and its transition) from flickering
/// when the pointer crosses between a submenu toggle and its panel.
pub const SUBMENU_CLOSE_MS: u64 = 100;

/// Rendering mode of a top-level menu.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MenuMode {
    /// A plain action menu.
    #[default]
    Menu,
    /// A select-style menu with optional header/footer sections.
    SelectMenu,
}

impl MenuMode {
    /// The configuration token for this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Menu => "menu",
            Self::SelectMenu => "select-menu",
        }
    }
}

/// Error returned when parsing an unrecognized menu mode token.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ParseMenuModeError;

impl fmt::Display for ParseMenuModeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("mode must be one of `menu`, `select-menu`")
    }
}

impl core::error::Error for ParseMenuModeError {}

impl FromStr for MenuMode {
    type Err = ParseMenuModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu" => Ok(Self::Menu),
            "select-menu" => Ok(Self::SelectMenu),
            _ => Err(ParseMenuModeError),
        }
    }
}

/// The classification a menu settles into at construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ResolvedMode {
    /// Top-level plain menu.
    Menu,
    /// Top-level select-style menu.
    SelectMenu,
    /// Nested inside another menu; the `mode` input is ignored.
    Submenu,
}

/// The ambient value a root menu publishes to its descendants.
///
/// Its presence is what classifies a nested [`Menu`] as a submenu; it also
/// carries the root's mode (submenu markers only render in select-menus) and
/// the inherited transition opt-out.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RootMenuContext {
    /// The root menu's resolved mode.
    pub mode: MenuMode,
    /// Whether the root disabled visibility transitions for the whole tree.
    pub not_transition: bool,
}

/// Construction inputs for a [`Menu`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuProps {
    /// Rendering mode; ignored for submenus. Defaults to [`MenuMode::Menu`].
    pub mode: Option<MenuMode>,
    /// Placement token; out-of-catalog values fall back to the mode default.
    pub direction: Option<Direction>,
    /// Whether a select-menu header renders a close button.
    pub dismissable: bool,
    /// Apply visibility directly instead of wrapping it in a transition.
    pub notransition: bool,
}

impl Default for MenuProps {
    fn default() -> Self {
        Self {
            mode: None,
            direction: None,
            dismissable: true,
            notransition: false,
        }
    }
}

/// Side effects the host routes after a [`Menu`] operation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MenuEffect<K> {
    /// Move focus to the element after the next render pass.
    Focus(K),
    /// Deliver the forced checked value to the controller owning the
    /// element (item or nested submenu); part of the reset broadcast.
    SetChecked(K, Checked),
    /// This submenu's aggregate changed; deliver it to the parent menu via
    /// [`Menu::menuitem_checked_changed`].
    AggregateChanged(K, Option<Checked>),
}

/// Effect list returned by [`Menu`] operations.
pub type MenuEffects<K> = SmallVec<[MenuEffect<K>; 4]>;

/// The marker a select-menu submenu toggle displays for its aggregate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SubmenuIcon {
    /// No aggregate (empty or ambiguous roster) or all-unchecked radio set.
    Blank,
    /// Partially checked.
    Dash,
    /// Fully checked.
    Check,
}

/// Section layout of a select-menu panel.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SectionPlan {
    /// Render a header section.
    pub header: bool,
    /// Render the close button inside the header; clicking it calls
    /// `Dropdown::toggle(Some(false))`.
    pub close_button: bool,
    /// Wrap the default content in a body section.
    pub wrap_body: bool,
    /// Render a footer section.
    pub footer: bool,
}

/// The menu/submenu controller. See the [crate docs](crate) for the model.
#[derive(Clone, Debug)]
pub struct Menu<K> {
    mode: ResolvedMode,
    root_mode: MenuMode,
    direction: Option<Direction>,
    dismissable: bool,
    not_transition: bool,
    element: Option<K>,
    toggle: Option<K>,
    entries: SmallVec<[ItemEntry<K>; 8]>,
    active: Option<K>,
    show_submenu: bool,
    submenu_close: Option<u64>,
    aggregate: Option<Checked>,
}

impl<K: Copy + Eq> Menu<K> {
    /// Create a top-level menu.
    ///
    /// The resolved mode comes from `props.mode`; this menu publishes the
    /// [`RootMenuContext`] its nested submenus are constructed with.
    pub fn new(props: MenuProps) -> Self {
        let mode = props.mode.unwrap_or_default();
        Self {
            mode: match mode {
                MenuMode::Menu => ResolvedMode::Menu,
                MenuMode::SelectMenu => ResolvedMode::SelectMenu,
            },
            root_mode: mode,
            direction: props.direction,
            dismissable: props.dismissable,
            not_transition: props.notransition,
            element: None,
            toggle: None,
            entries: SmallVec::new(),
            active: None,
            show_submenu: false,
            submenu_close: None,
            aggregate: None,
        }
    }

    /// Create a submenu nested under a menu that published `root`.
    ///
    /// `element` is the submenu panel's handle (its identity in the parent's
    /// roster); `toggle` is the toggle button's handle (the Escape focus
    /// target). `props.mode` is ignored and `notransition` is inherited from
    /// the root.
    pub fn submenu(element: K, toggle: K, root: RootMenuContext, props: MenuProps) -> Self {
        Self {
            mode: ResolvedMode::Submenu,
            root_mode: root.mode,
            direction: props.direction,
            dismissable: props.dismissable,
            not_transition: root.not_transition,
            element: Some(element),
            toggle: Some(toggle),
            entries: SmallVec::new(),
            active: None,
            show_submenu: false,
            submenu_close: None,
            aggregate: None,
        }
    }

    /// The classification fixed at construction.
    pub fn resolved_mode(&self) -> ResolvedMode {
        self.mode
    }

    /// The ambient context this menu publishes to nested menus.
    ///
    /// `None` for submenus: only the outermost menu publishes, which is what
    /// makes root-menu/submenu classification mutually exclusive.
    pub fn root_context(&self) -> Option<RootMenuContext> {
        match self.mode {
            ResolvedMode::Submenu => None,
            ResolvedMode::Menu | ResolvedMode::SelectMenu => Some(RootMenuContext {
                mode: self.root_mode,
                not_transition: self.not_transition,
            }),
        }
    }

    /// The effective placement token.
    ///
    /// Submenus only accept left/right placements and fall back to
    /// [`Direction::RIGHT_START`]; menus fall back to
    /// [`Direction::BOTTOM_START`].
    pub fn direction(&self) -> Direction {
        if self.mode == ResolvedMode::Submenu {
            return self
                .direction
                .filter(|d| d.is_submenu_direction())
                .unwrap_or(Direction::RIGHT_START);
        }
        self.direction.unwrap_or(Direction::BOTTOM_START)
    }

    /// Whether visibility changes should be wrapped in the host's transition
    /// primitive.
    pub fn with_transition(&self) -> bool {
        !self.not_transition
    }

    /// The registered direct-child descriptors, in registration order.
    pub fn roster(&self) -> &[ItemEntry<K>] {
        &self.entries
    }

    /// This menu's aggregate checked value (submenus only; `None` otherwise
    /// and for empty or ambiguous rosters).
    pub fn checked(&self) -> Option<Checked> {
        self.aggregate
    }

    /// Register a direct child descriptor.
    ///
    /// Idempotent by element identity: an existing descriptor is replaced in
    /// place, preserving its roster position. The aggregate is recomputed
    /// either way.
    pub fn add_menuitem(&mut self, entry: ItemEntry<K>) -> MenuEffects<K> {
        match self.position(entry.element) {
            Some(index) => self.entries[index] = entry,
            None => {
                log::trace!("menu roster grew to {}", self.entries.len() + 1);
                self.entries.push(entry);
            }
        }
        self.refresh_checked()
    }

    /// Remove a direct child descriptor on unmount.
    pub fn remove_menuitem(&mut self, element: K) {
        if let Some(index) = self.position(element) {
            self.entries.remove(index);
        }
    }

    /// A child's checked state changed: update its descriptor and recompute
    /// the aggregate.
    pub fn menuitem_checked_changed(
        &mut self,
        element: K,
        checked: Option<Checked>,
    ) -> MenuEffects<K> {
        if let Some(index) = self.position(element) {
            self.entries[index].checked = checked;
        }
        self.refresh_checked()
    }

    /// Reset every checked-bearing descriptor to unchecked, except the named
    /// element.
    ///
    /// This is the root-menu broadcast behind radio exclusivity: the
    /// returned [`MenuEffect::SetChecked`] values are routed to the owning
    /// controllers, and a nested submenu's [`Menu::force_aggregate`] call
    /// continues the cascade with the same exception.
    pub fn reset_checked(&mut self, except: Option<K>) -> MenuEffects<K> {
        let mut effects = MenuEffects::new();
        for entry in &mut self.entries {
            if Some(entry.element) == except || entry.checked.is_none() {
                continue;
            }
            entry.checked = Some(Checked::False);
            effects.push(MenuEffect::SetChecked(entry.element, Checked::False));
        }
        effects
    }

    /// Parent-driven write of this submenu's pseudo-item checked value.
    ///
    /// Forcing `False` also resets this roster, continuing the broadcast
    /// cascade downward. No-op for root menus.
    pub fn force_aggregate(&mut self, checked: Checked, except: Option<K>) -> MenuEffects<K> {
        if self.mode != ResolvedMode::Submenu {
            return MenuEffects::new();
        }
        self.aggregate = Some(checked);
        if checked == Checked::False {
            self.reset_checked(except)
        } else {
            MenuEffects::new()
        }
    }

    /// This submenu's registration descriptor for its parent's roster.
    ///
    /// `None` for root menus, which register nowhere.
    pub fn descriptor(&self) -> Option<ItemEntry<K>> {
        let element = match self.mode {
            ResolvedMode::Submenu => self.element?,
            _ => return None,
        };
        let mut entry = ItemEntry::new(element, roster::ItemKind::Submenu);
        entry.checked = self.aggregate;
        Some(entry)
    }

    /// The marker the submenu toggle displays; `None` outside select-menu
    /// submenus.
    pub fn submenu_icon(&self) -> Option<SubmenuIcon> {
        if self.mode != ResolvedMode::Submenu || self.root_mode != MenuMode::SelectMenu {
            return None;
        }
        Some(match self.aggregate {
            Some(Checked::True) => SubmenuIcon::Check,
            Some(Checked::Mixed) => SubmenuIcon::Dash,
            _ => SubmenuIcon::Blank,
        })
    }

    /// The ancestor dropdown's open state changed.
    ///
    /// Every menu resets its submenu visibility. A root menu additionally
    /// decides initial focus from the consumed open-reason mailbox value:
    /// pointer opens focus nothing; ArrowUp focuses the last non-hidden
    /// entry; Space/Enter/ArrowDown the first. The reason counts as handled
    /// whether or not focus results.
    pub fn dropdown_state_changed(&mut self, open: bool, reason: Option<Input>) -> MenuEffects<K> {
        self.show_submenu = false;
        self.submenu_close = None;

        let mut effects = MenuEffects::new();
        if self.mode == ResolvedMode::Submenu || !open {
            return effects;
        }
        let Some(Input::Key(key)) = reason else {
            return effects;
        };
        if let Some(target) = roving::initial_focus(&self.entries, key) {
            self.active = Some(target);
            effects.push(MenuEffect::Focus(target));
        }
        effects
    }

    /// Whether the panel is visible.
    ///
    /// Submenus track their own `show_submenu` state; root menus mirror the
    /// dropdown's open state (pass `Dropdown::open()`).
    pub fn visible(&self, dropdown_open: bool) -> bool {
        match self.mode {
            ResolvedMode::Submenu => self.show_submenu,
            _ => dropdown_open,
        }
    }

    /// Whether this submenu is currently open.
    pub fn show_submenu(&self) -> bool {
        self.show_submenu
    }

    /// Pending submenu close deadline, if any, in host milliseconds.
    pub fn pending_submenu_close(&self) -> Option<u64> {
        self.submenu_close
    }

    /// Pointer crossing the submenu toggle or panel.
    ///
    /// Entering opens immediately and cancels the pending close; leaving
    /// schedules a close [`SUBMENU_CLOSE_MS`] from `now`. Re-entering before
    /// the deadline fires keeps the submenu open with no visibility blip.
    pub fn submenu_pointer(&mut self, input: Input, now: u64) {
        if self.mode != ResolvedMode::Submenu {
            return;
        }
        match input {
            Input::PointerEnter => {
                self.submenu_close = None;
                if !self.show_submenu {
                    log::debug!("submenu opened by hover");
                }
                self.show_submenu = true;
            }
            Input::PointerLeave => {
                self.submenu_close = Some(now.saturating_add(SUBMENU_CLOSE_MS));
            }
            _ => {}
        }
    }

    /// Fire a due submenu close.
    pub fn poll(&mut self, now: u64) {
        if let Some(deadline) = self.submenu_close
            && deadline <= now
        {
            self.submenu_close = None;
            if self.show_submenu {
                log::debug!("submenu closed after hover-intent delay");
            }
            self.show_submenu = false;
        }
    }

    /// Keyboard activity on the submenu toggle.
    ///
    /// Space, Enter, ArrowLeft, and ArrowRight open the submenu and focus
    /// its first non-hidden entry; the event is consumed so the parent
    /// menu's own roving focus does not also react.
    pub fn submenu_toggle_keydown(&mut self, key: Key) -> (Outcome, MenuEffects<K>) {
        if self.mode != ResolvedMode::Submenu
            || !matches!(key, Key::Space | Key::Enter | Key::ArrowLeft | Key::ArrowRight)
        {
            return (Outcome::Continue, MenuEffects::new());
        }

        self.submenu_close = None;
        self.show_submenu = true;
        let mut effects = MenuEffects::new();
        if let Some(entry) = self.entries.iter().find(|entry| !entry.is_hidden()) {
            self.active = Some(entry.element);
            effects.push(MenuEffect::Focus(entry.element));
        }
        (Outcome::Stop, effects)
    }

    /// Keyboard activity inside the menu panel.
    ///
    /// Closed submenus ignore everything. An open submenu consumes Escape —
    /// closing itself and returning focus to its toggle without closing any
    /// ancestor. Home/End/ArrowUp/ArrowDown rove focus; handled keys are
    /// consumed by submenus (so the parent menu does not also walk) and left
    /// propagating by root menus (the dropdown container only reacts to
    /// Escape and Tab anyway).
    pub fn keydown(&mut self, key: Key) -> (Outcome, MenuEffects<K>) {
        let submenu = self.mode == ResolvedMode::Submenu;
        if submenu {
            if !self.show_submenu {
                return (Outcome::Continue, MenuEffects::new());
            }
            if key == Key::Escape {
                self.show_submenu = false;
                self.submenu_close = None;
                self.active = None;
                let mut effects = MenuEffects::new();
                if let Some(toggle) = self.toggle {
                    effects.push(MenuEffect::Focus(toggle));
                }
                return (Outcome::Stop, effects);
            }
        }

        let Some(target) = roving::focus_target(&self.entries, self.active, key) else {
            return (Outcome::Continue, MenuEffects::new());
        };
        self.active = Some(target);
        let mut effects = MenuEffects::new();
        effects.push(MenuEffect::Focus(target));
        let outcome = if submenu { Outcome::Stop } else { Outcome::Continue };
        (outcome, effects)
    }

    /// Record an out-of-band focus change so the next arrow step starts from
    /// the right entry.
    pub fn note_focused(&mut self, element: K) {
        self.active = Some(element);
    }

    /// Section plan for a select-menu panel; `None` in every other mode.
    ///
    /// The header renders only when the host provides header content, the
    /// close button only inside a header of a dismissable menu, and the body
    /// wrapper only when a header or footer exists.
    pub fn select_menu_sections(&self, has_header: bool, has_footer: bool) -> Option<SectionPlan> {
        if self.mode != ResolvedMode::SelectMenu {
            return None;
        }
        Some(SectionPlan {
            header: has_header,
            close_button: has_header && self.dismissable,
            wrap_body: has_header || has_footer,
            footer: has_footer,
        })
    }

    /// The attribute bag for the panel element. Root menus carry the
    /// dropdown id so the toggle's `aria-controls` resolves.
    pub fn menu_attrs(&self, dropdown_id: Option<&str>) -> AttributeBag {
        match self.mode {
            ResolvedMode::Submenu => thicket_aria::menu_attrs(None),
            _ => thicket_aria::menu_attrs(dropdown_id),
        }
    }

    /// The attribute bag for the submenu toggle button.
    pub fn submenu_toggle_attrs(&self) -> AttributeBag {
        thicket_aria::submenu_toggle_attrs(self.show_submenu)
    }

    fn position(&self, element: K) -> Option<usize> {
        self.entries.iter().position(|entry| entry.element == element)
    }

    fn refresh_checked(&mut self) -> MenuEffects<K> {
        let mut effects = MenuEffects::new();
        if self.mode != ResolvedMode::Submenu {
            return effects;
        }
        let next = roster::aggregate_checked(&self.entries);
        if next != self.aggregate {
            self.aggregate = next;
            if let Some(element) = self.element {
                effects.push(MenuEffect::AggregateChanged(element, next));
            }
        }
        effects
    }
}
