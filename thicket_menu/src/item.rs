// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu item controller and its commit protocol.
//!
//! A [`Menuitem`] is one interactive entry: a plain item, a radio, a
//! checkbox, or a divider (which bypasses everything below). On mount the
//! host registers the item's [`Menuitem::descriptor`] into the nearest menu's
//! roster and removes it again on unmount.
//!
//! ## The commit protocol
//!
//! Activation runs through [`Menuitem::commit`] in a fixed order:
//!
//! 1. Disabled items and items without an enclosing dropdown no-op.
//! 2. A cancelable `command` event fans out through the dropdown's
//!    listeners. Cancellation aborts: no state change, no `commanded`.
//! 3. Checkable roles derive their next checked value (radios additionally
//!    request the tree-wide reset broadcast) and report the updated
//!    descriptor to their owning menu.
//! 4. Every role except checkboxes asks the dropdown to close — checkbox
//!    selections keep the menu open for multi-select.
//! 5. A non-cancelable `commanded` event fans out with the same detail.
//!
//! The `command`/`commanded` pair always settles in that order, with the
//! checked mutation strictly between them.
//!
//! ## Clicks vs. native controls
//!
//! When a checkable item wraps a native checkable input, the click would fire
//! twice (once for the click, once for the input's change event), so
//! [`Menuitem::should_commit`] ignores the click and waits for the change.
//! The native control is also the source of truth for the resulting state:
//! a supplied [`NativeControl`] overrides the computed value.

use alloc::borrow::Cow;

use smallvec::SmallVec;
use thicket_aria::{AttributeBag, Checked, ItemRole};
use thicket_dropdown::{Dropdown, DropdownEffect};
use thicket_events::dispatch::{CommandListener, dispatch_command, dispatch_commanded};
use thicket_events::types::CommandDetail;

use crate::MenuMode;
use crate::roster::{ItemEntry, ItemFlags, ItemKind};

/// What delivered the activation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommitTrigger {
    /// A pointer click on the item.
    Click,
    /// A change event from a wrapped native checkable control.
    Change,
}

/// Post-interaction state of a wrapped native checkable control.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NativeControl {
    /// The control's checked flag.
    pub checked: bool,
    /// The control's indeterminate flag (checkboxes only).
    pub indeterminate: bool,
}

/// What the host should render the item as.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RenderTarget<'a> {
    /// A button element (plain items).
    Button,
    /// A label element (checkable items, wrapping their native control).
    Label,
    /// A host-specific element or component override.
    Custom(&'a str),
}

/// How a divider renders.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DividerRender {
    /// A bare horizontal rule.
    Rule,
    /// A separator carrying the provided content.
    Content,
}

/// Side effects of a commit, routed by the host.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ItemEffect<K> {
    /// Ask the root menu to reset every checked entry in the tree except
    /// this one ([`crate::Menu::reset_checked`]).
    ResetRadios {
        /// The just-activated element, exempt from the reset.
        except: K,
    },
    /// Deliver the updated descriptor to the owning menu
    /// ([`crate::Menu::menuitem_checked_changed`]).
    CheckedChanged(ItemEntry<K>),
    /// A dropdown effect produced by the close request.
    Dropdown(DropdownEffect),
}

/// Effect list returned by [`Menuitem::commit`].
pub type ItemEffects<K> = SmallVec<[ItemEffect<K>; 4]>;

/// The menu item controller.
#[derive(Clone, Debug)]
pub struct Menuitem<C, K> {
    element: K,
    role: ItemRole,
    divider: bool,
    checked: Checked,
    disabled: bool,
    hidden: bool,
    command: Option<C>,
    render_as: Option<Cow<'static, str>>,
}

impl<C: Clone, K: Copy + Eq> Menuitem<C, K> {
    /// Create a plain menu item.
    pub fn new(element: K) -> Self {
        Self {
            element,
            role: ItemRole::Menuitem,
            divider: false,
            checked: Checked::False,
            disabled: false,
            hidden: false,
            command: None,
            render_as: None,
        }
    }

    /// Create a divider; every other input is ignored.
    pub fn divider(element: K) -> Self {
        let mut item = Self::new(element);
        item.divider = true;
        item
    }

    /// Select the item role.
    #[must_use]
    pub fn with_role(mut self, role: ItemRole) -> Self {
        self.role = role;
        self
    }

    /// Set the initial checked state (checkable roles only).
    #[must_use]
    pub fn with_checked(mut self, checked: Checked) -> Self {
        self.checked = checked;
        self
    }

    /// Attach the command payload submitted on activation.
    #[must_use]
    pub fn with_command(mut self, command: C) -> Self {
        self.command = Some(command);
        self
    }

    /// Override the rendered element or component.
    #[must_use]
    pub fn with_render_as(mut self, target: impl Into<Cow<'static, str>>) -> Self {
        self.render_as = Some(target.into());
        self
    }

    /// Set whether the item is disabled (focusable but not activatable).
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set whether the item is hidden (skipped by roving focus).
    #[must_use]
    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    /// The element handle (roster identity).
    pub fn element(&self) -> K {
        self.element
    }

    /// The item role.
    pub fn role(&self) -> ItemRole {
        self.role
    }

    /// Whether this item renders as a divider.
    pub fn is_divider(&self) -> bool {
        self.divider
    }

    /// Whether the item is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Whether the item is hidden.
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Current checked state (meaningful for checkable roles only).
    pub fn checked(&self) -> Checked {
        self.checked
    }

    /// The command payload, if any.
    pub fn command(&self) -> Option<&C> {
        self.command.as_ref()
    }

    /// What to render this item as.
    ///
    /// Plain items default to a button, checkable items to a label wrapping
    /// their native control; an explicit override wins.
    pub fn render_target(&self) -> RenderTarget<'_> {
        if let Some(target) = &self.render_as {
            return RenderTarget::Custom(target);
        }
        match self.role {
            ItemRole::Menuitem => RenderTarget::Button,
            ItemRole::Menuitemradio | ItemRole::Menuitemcheckbox => RenderTarget::Label,
        }
    }

    /// The registration descriptor for the owning menu's roster.
    ///
    /// Plain items never carry a checked field.
    pub fn descriptor(&self) -> ItemEntry<K> {
        let mut flags = ItemFlags::empty();
        if self.disabled {
            flags |= ItemFlags::DISABLED;
        }
        if self.hidden {
            flags |= ItemFlags::HIDDEN;
        }
        let mut entry = ItemEntry::new(self.element, ItemKind::from_role(self.role)).with_flags(flags);
        if self.role.is_checkable() {
            entry.checked = Some(self.checked);
        }
        entry
    }

    /// Whether this event should run the commit protocol.
    ///
    /// Clicks commit immediately for plain items; for checkable items that
    /// wrap a native control the click is ignored and the control's change
    /// event commits instead, so the activation never fires twice. Change
    /// events commit only for checkable roles.
    pub fn should_commit(&self, trigger: CommitTrigger, has_native_control: bool) -> bool {
        if self.divider {
            return false;
        }
        match trigger {
            CommitTrigger::Click => self.role == ItemRole::Menuitem || !has_native_control,
            CommitTrigger::Change => self.role.is_checkable(),
        }
    }

    /// Run the commit protocol. See the [module docs](self) for the order.
    ///
    /// Tolerates a missing dropdown context (standalone rendering) by doing
    /// nothing.
    pub fn commit(
        &mut self,
        native: Option<NativeControl>,
        dropdown: Option<&mut Dropdown>,
        listeners: &mut [&mut dyn CommandListener<C, K>],
    ) -> ItemEffects<K> {
        let mut effects = ItemEffects::new();
        if self.divider || self.disabled {
            return effects;
        }
        let Some(dropdown) = dropdown else {
            return effects;
        };

        let detail = CommandDetail {
            command: self.command.clone(),
            related_target: Some(self.element),
        };
        if !dispatch_command(listeners, &detail) {
            return effects;
        }

        if self.role.is_checkable() {
            let mut next = match self.role {
                // A mixed radio reads as unchecked per ARIA.
                ItemRole::Menuitemradio => {
                    if self.checked == Checked::True {
                        Checked::False
                    } else {
                        Checked::True
                    }
                }
                _ => {
                    if matches!(self.checked, Checked::True | Checked::Mixed) {
                        Checked::False
                    } else {
                        Checked::True
                    }
                }
            };

            if self.role == ItemRole::Menuitemradio {
                effects.push(ItemEffect::ResetRadios {
                    except: self.element,
                });
            }

            // The native control, when present, is the source of truth.
            if let Some(native) = native {
                next = match self.role {
                    ItemRole::Menuitemradio => {
                        if native.checked {
                            Checked::True
                        } else {
                            Checked::False
                        }
                    }
                    _ => {
                        if native.indeterminate {
                            Checked::Mixed
                        } else if native.checked {
                            Checked::True
                        } else {
                            Checked::False
                        }
                    }
                };
            }

            self.checked = next;
            effects.push(ItemEffect::CheckedChanged(self.descriptor()));
        }

        if self.role != ItemRole::Menuitemcheckbox {
            for effect in dropdown.toggle(Some(false)) {
                effects.push(ItemEffect::Dropdown(effect));
            }
        }

        dispatch_commanded(listeners, &detail);
        effects
    }

    /// Broadcast/cascade entry point: overwrite the checked state without
    /// running the commit protocol.
    pub fn force_checked(&mut self, checked: Checked) {
        self.checked = checked;
    }

    /// How to render this divider, or `None` for non-dividers.
    ///
    /// Plain menus always render a bare rule; select-menus render provided
    /// content when there is any.
    pub fn divider_layout(
        &self,
        root_mode: Option<MenuMode>,
        has_content: bool,
    ) -> Option<DividerRender> {
        if !self.divider {
            return None;
        }
        let mode = root_mode.unwrap_or_default();
        if mode == MenuMode::Menu || !has_content {
            Some(DividerRender::Rule)
        } else {
            Some(DividerRender::Content)
        }
    }

    /// The attribute bag for the rendered element.
    pub fn attrs(&self) -> AttributeBag {
        if self.divider {
            return thicket_aria::separator_attrs();
        }
        let checked = self.role.is_checkable().then_some(self.checked);
        thicket_aria::item_attrs(self.role, checked, self.disabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Menu, MenuEffect, MenuProps};
    use alloc::vec::Vec;
    use thicket_events::types::EventStatus;

    #[derive(Default)]
    struct Recorder {
        log: Vec<&'static str>,
        cancel: bool,
    }

    impl CommandListener<u8, u32> for Recorder {
        fn command(&mut self, detail: &CommandDetail<u8, u32>) -> EventStatus {
            self.log.push("command");
            assert!(detail.related_target.is_some());
            if self.cancel {
                EventStatus::Canceled
            } else {
                EventStatus::Propagate
            }
        }

        fn commanded(&mut self, _detail: &CommandDetail<u8, u32>) {
            self.log.push("commanded");
        }
    }

    fn dropdown_open() -> Dropdown {
        let mut dropdown = Dropdown::new("d");
        dropdown.toggle(Some(true));
        dropdown
    }

    #[test]
    fn plain_item_commits_and_closes() {
        let mut dropdown = dropdown_open();
        let mut listener = Recorder::default();
        let mut item: Menuitem<u8, u32> = Menuitem::new(1).with_command(7);

        let effects = {
            let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
            item.commit(None, Some(&mut dropdown), &mut listeners)
        };

        // command fires exactly once, before commanded.
        assert_eq!(listener.log, ["command", "commanded"]);
        assert!(!dropdown.open());
        assert!(effects
            .iter()
            .any(|e| matches!(e, ItemEffect::Dropdown(DropdownEffect::Toggled(false)))));
        // No checked effects for a plain item.
        assert!(!effects
            .iter()
            .any(|e| matches!(e, ItemEffect::CheckedChanged(_))));
    }

    #[test]
    fn canceled_command_suppresses_everything() {
        let mut dropdown = dropdown_open();
        let mut listener = Recorder {
            cancel: true,
            ..Recorder::default()
        };
        let mut item: Menuitem<u8, u32> =
            Menuitem::new(1).with_role(ItemRole::Menuitemradio);

        let effects = {
            let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
            item.commit(None, Some(&mut dropdown), &mut listeners)
        };

        assert_eq!(listener.log, ["command"]);
        assert!(effects.is_empty());
        assert_eq!(item.checked(), Checked::False);
        assert!(dropdown.open());
    }

    #[test]
    fn disabled_and_standalone_items_no_op() {
        let mut listener = Recorder::default();
        let mut item: Menuitem<u8, u32> = Menuitem::new(1).disabled(true);
        let mut dropdown = dropdown_open();
        let effects = {
            let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
            item.commit(None, Some(&mut dropdown), &mut listeners)
        };
        assert!(effects.is_empty());
        assert!(listener.log.is_empty());

        // No enclosing dropdown: silently tolerated.
        let mut item: Menuitem<u8, u32> = Menuitem::new(1);
        let effects = {
            let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
            item.commit(None, None, &mut listeners)
        };
        assert!(effects.is_empty());
        assert!(listener.log.is_empty());
    }

    #[test]
    fn checkbox_toggles_and_keeps_the_menu_open() {
        let mut dropdown = dropdown_open();
        let mut listener = Recorder::default();
        let mut item: Menuitem<u8, u32> =
            Menuitem::new(1).with_role(ItemRole::Menuitemcheckbox);

        // First activation checks it; the dropdown stays open.
        let effects = {
            let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
            item.commit(None, Some(&mut dropdown), &mut listeners)
        };
        assert_eq!(item.checked(), Checked::True);
        assert!(dropdown.open());
        assert!(!effects
            .iter()
            .any(|e| matches!(e, ItemEffect::Dropdown(_) | ItemEffect::ResetRadios { .. })));

        // Second activation unchecks it.
        let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
        item.commit(None, Some(&mut dropdown), &mut listeners);
        assert_eq!(item.checked(), Checked::False);
        assert!(dropdown.open());
    }

    #[test]
    fn mixed_checkbox_unchecks() {
        let mut dropdown = dropdown_open();
        let mut listener = Recorder::default();
        let mut item: Menuitem<u8, u32> = Menuitem::new(1)
            .with_role(ItemRole::Menuitemcheckbox)
            .with_checked(Checked::Mixed);
        let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
        item.commit(None, Some(&mut dropdown), &mut listeners);
        assert_eq!(item.checked(), Checked::False);
    }

    #[test]
    fn radio_requests_the_reset_broadcast_then_checks() {
        let mut dropdown = dropdown_open();
        let mut listener = Recorder::default();
        let mut item: Menuitem<u8, u32> = Menuitem::new(5).with_role(ItemRole::Menuitemradio);

        let effects = {
            let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
            item.commit(None, Some(&mut dropdown), &mut listeners)
        };

        assert_eq!(item.checked(), Checked::True);
        // Reset is requested before the descriptor update.
        assert!(matches!(effects[0], ItemEffect::ResetRadios { except: 5 }));
        assert!(
            matches!(effects[1], ItemEffect::CheckedChanged(entry) if entry.checked == Some(Checked::True))
        );
        // Radios close the dropdown.
        assert!(!dropdown.open());
    }

    #[test]
    fn native_control_overrides_the_computed_state() {
        let mut dropdown = dropdown_open();
        let mut listener = Recorder::default();
        let mut item: Menuitem<u8, u32> =
            Menuitem::new(1).with_role(ItemRole::Menuitemcheckbox);

        // Computed value would be True, but the control reports indeterminate.
        let native = NativeControl {
            checked: false,
            indeterminate: true,
        };
        let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
        item.commit(Some(native), Some(&mut dropdown), &mut listeners);
        assert_eq!(item.checked(), Checked::Mixed);

        // A radio follows the control's checked flag.
        let mut radio: Menuitem<u8, u32> = Menuitem::new(2)
            .with_role(ItemRole::Menuitemradio)
            .with_checked(Checked::False);
        let native = NativeControl {
            checked: false,
            indeterminate: false,
        };
        let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
        radio.commit(Some(native), Some(&mut dropdown), &mut listeners);
        assert_eq!(radio.checked(), Checked::False);
    }

    #[test]
    fn should_commit_guards_the_double_fire() {
        let plain: Menuitem<u8, u32> = Menuitem::new(1);
        assert!(plain.should_commit(CommitTrigger::Click, false));
        assert!(!plain.should_commit(CommitTrigger::Change, false));

        let checkbox: Menuitem<u8, u32> = Menuitem::new(1).with_role(ItemRole::Menuitemcheckbox);
        // Without a native control the click commits.
        assert!(checkbox.should_commit(CommitTrigger::Click, false));
        // With one, the click defers to the change event.
        assert!(!checkbox.should_commit(CommitTrigger::Click, true));
        assert!(checkbox.should_commit(CommitTrigger::Change, true));

        let divider: Menuitem<u8, u32> = Menuitem::divider(1);
        assert!(!divider.should_commit(CommitTrigger::Click, false));
    }

    #[test]
    fn divider_layout_follows_the_mode() {
        let divider: Menuitem<u8, u32> = Menuitem::divider(1);
        // Plain menus always render a bare rule.
        assert_eq!(
            divider.divider_layout(Some(MenuMode::Menu), true),
            Some(DividerRender::Rule)
        );
        // Standalone (no root context) falls back to the plain mode.
        assert_eq!(divider.divider_layout(None, true), Some(DividerRender::Rule));
        // Select-menus may carry content.
        assert_eq!(
            divider.divider_layout(Some(MenuMode::SelectMenu), true),
            Some(DividerRender::Content)
        );
        assert_eq!(
            divider.divider_layout(Some(MenuMode::SelectMenu), false),
            Some(DividerRender::Rule)
        );

        let item: Menuitem<u8, u32> = Menuitem::new(1);
        assert_eq!(item.divider_layout(Some(MenuMode::Menu), false), None);
    }

    #[test]
    fn render_target_defaults_by_role() {
        let plain: Menuitem<u8, u32> = Menuitem::new(1);
        assert_eq!(plain.render_target(), RenderTarget::Button);

        let radio: Menuitem<u8, u32> = Menuitem::new(1).with_role(ItemRole::Menuitemradio);
        assert_eq!(radio.render_target(), RenderTarget::Label);

        let custom: Menuitem<u8, u32> = Menuitem::new(1).with_render_as("router-link");
        assert_eq!(custom.render_target(), RenderTarget::Custom("router-link"));
    }

    #[test]
    fn attrs_follow_role_and_divider() {
        let divider: Menuitem<u8, u32> = Menuitem::divider(1);
        assert!(divider.attrs().iter().any(|a| a.value == "separator"));

        let checkbox: Menuitem<u8, u32> = Menuitem::new(1)
            .with_role(ItemRole::Menuitemcheckbox)
            .with_checked(Checked::Mixed);
        let bag = checkbox.attrs();
        assert!(bag.iter().any(|a| a.name == "aria-checked" && a.value == "mixed"));
    }

    /// Routes commit effects through a root menu, one nested submenu, and the
    /// item controllers, the way a host composition does.
    fn route_commit(
        effects: ItemEffects<u32>,
        root_menu: &mut Menu<u32>,
        sub_menu: &mut Menu<u32>,
        items: &mut [&mut Menuitem<u8, u32>],
        submenu_element: u32,
    ) {
        fn deliver_checked(element: u32, value: Checked, items: &mut [&mut Menuitem<u8, u32>]) {
            for item in items.iter_mut() {
                if item.element() == element {
                    item.force_checked(value);
                }
            }
        }

        for effect in effects {
            match effect {
                ItemEffect::ResetRadios { except } => {
                    for reset in root_menu.reset_checked(Some(except)) {
                        let MenuEffect::SetChecked(element, value) = reset else {
                            continue;
                        };
                        if element == submenu_element {
                            for cascade in sub_menu.force_aggregate(value, Some(except)) {
                                if let MenuEffect::SetChecked(element, value) = cascade {
                                    deliver_checked(element, value, items);
                                }
                            }
                        } else {
                            deliver_checked(element, value, items);
                        }
                    }
                }
                ItemEffect::CheckedChanged(entry) => {
                    let in_submenu = sub_menu
                        .roster()
                        .iter()
                        .any(|candidate| candidate.element == entry.element);
                    let upward = if in_submenu {
                        sub_menu.menuitem_checked_changed(entry.element, entry.checked)
                    } else {
                        root_menu.menuitem_checked_changed(entry.element, entry.checked)
                    };
                    for up in upward {
                        if let MenuEffect::AggregateChanged(element, aggregate) = up {
                            root_menu.menuitem_checked_changed(element, aggregate);
                        }
                    }
                }
                ItemEffect::Dropdown(_) => {}
            }
        }
    }

    #[test]
    fn radio_exclusivity_spans_nested_submenus() {
        let mut dropdown = dropdown_open();
        let mut listener = Recorder::default();

        let mut root_menu: Menu<u32> = Menu::new(MenuProps::default());
        let mut sub_menu: Menu<u32> = Menu::submenu(
            10,
            11,
            root_menu.root_context().unwrap(),
            MenuProps::default(),
        );

        let mut a: Menuitem<u8, u32> = Menuitem::new(1).with_role(ItemRole::Menuitemradio);
        let mut b: Menuitem<u8, u32> = Menuitem::new(2).with_role(ItemRole::Menuitemradio);
        let mut c: Menuitem<u8, u32> = Menuitem::new(3).with_role(ItemRole::Menuitemradio);

        root_menu.add_menuitem(a.descriptor());
        root_menu.add_menuitem(b.descriptor());
        sub_menu.add_menuitem(c.descriptor());
        root_menu.add_menuitem(sub_menu.descriptor().unwrap());

        // Click the root-level radio A.
        let effects = {
            let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
            a.commit(None, Some(&mut dropdown), &mut listeners)
        };
        route_commit(
            effects,
            &mut root_menu,
            &mut sub_menu,
            &mut [&mut a, &mut b, &mut c],
            10,
        );

        assert_eq!(a.checked(), Checked::True);
        assert_eq!(b.checked(), Checked::False);
        assert_eq!(c.checked(), Checked::False);

        // Click the nested radio C: A resets, C wins, and the submenu's
        // pseudo-item reflects the nested selection in the root roster.
        dropdown.toggle(Some(true));
        let effects = {
            let mut listeners: [&mut dyn CommandListener<u8, u32>; 1] = [&mut listener];
            c.commit(None, Some(&mut dropdown), &mut listeners)
        };
        route_commit(
            effects,
            &mut root_menu,
            &mut sub_menu,
            &mut [&mut a, &mut b, &mut c],
            10,
        );

        assert_eq!(a.checked(), Checked::False);
        assert_eq!(b.checked(), Checked::False);
        assert_eq!(c.checked(), Checked::True);

        let checked_in_root: Vec<_> = root_menu
            .roster()
            .iter()
            .filter(|entry| entry.checked == Some(Checked::True))
            .map(|entry| entry.element)
            .collect();
        // Exactly one checked entry: the submenu pseudo-item carrying C.
        assert_eq!(checked_in_root, [10]);
        assert_eq!(sub_menu.checked(), Some(Checked::True));
    }
}
