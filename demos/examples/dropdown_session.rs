// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A complete host simulation: one dropdown, a select-menu, a nested
//! submenu, and the effect routing a real composition performs.
//!
//! This example stands in for the host framework: it owns the controllers,
//! forwards "user input" to them, and routes the returned effects — focus
//! moves, checked cascades, model updates — exactly as the crate docs
//! describe.
//!
//! Run:
//! - `cargo run -p thicket_demos --example dropdown_session`

use thicket_aria::{Checked, ItemRole};
use thicket_dropdown::{Dropdown, DropdownEffect, token_id};
use thicket_events::dispatch::CommandListener;
use thicket_events::types::{CommandDetail, EventStatus, Input, Key};
use thicket_menu::item::{ItemEffect, ItemEffects, Menuitem};
use thicket_menu::{Menu, MenuEffect, MenuMode, MenuProps};

/// Host-side listener: logs every command and vetoes the "forbidden" one.
struct HostListener;

impl CommandListener<&'static str, u32> for HostListener {
    fn command(&mut self, detail: &CommandDetail<&'static str, u32>) -> EventStatus {
        println!("  command: {:?}", detail.command);
        if detail.command == Some("forbidden") {
            println!("  … vetoed by the host");
            return EventStatus::Canceled;
        }
        EventStatus::Propagate
    }

    fn commanded(&mut self, detail: &CommandDetail<&'static str, u32>) {
        println!("  commanded: {:?}", detail.command);
    }
}

/// Element handles for this scene.
const TOGGLE: u32 = 0;
const ITEM_COPY: u32 = 1;
const ITEM_WRAP: u32 = 2;
const SUBMENU_PANEL: u32 = 10;
const SUBMENU_TOGGLE: u32 = 11;
const ITEM_ASCII: u32 = 12;
const ITEM_UTF8: u32 = 13;

struct Host {
    dropdown: Dropdown,
    root_menu: Menu<u32>,
    sub_menu: Menu<u32>,
    items: Vec<Menuitem<&'static str, u32>>,
    listener: HostListener,
    focused: Option<u32>,
    now: u64,
}

impl Host {
    fn new() -> Self {
        let dropdown = Dropdown::new(token_id(0x18c2_f000, 0x9e37_79b9));
        let mut root_menu = Menu::new(MenuProps {
            mode: Some(MenuMode::SelectMenu),
            ..MenuProps::default()
        });
        let mut sub_menu = Menu::submenu(
            SUBMENU_PANEL,
            SUBMENU_TOGGLE,
            root_menu.root_context().expect("root menu publishes"),
            MenuProps::default(),
        );

        let items = vec![
            Menuitem::new(ITEM_COPY).with_command("copy"),
            Menuitem::new(ITEM_WRAP)
                .with_role(ItemRole::Menuitemcheckbox)
                .with_command("wrap"),
            Menuitem::new(ITEM_ASCII)
                .with_role(ItemRole::Menuitemradio)
                .with_checked(Checked::True)
                .with_command("encoding:ascii"),
            Menuitem::new(ITEM_UTF8)
                .with_role(ItemRole::Menuitemradio)
                .with_command("encoding:utf8"),
        ];

        // Mount order: items register into their nearest menu, the submenu
        // registers into the root as a pseudo-item.
        for item in &items[..2] {
            root_menu.add_menuitem(item.descriptor());
        }
        for item in &items[2..] {
            sub_menu.add_menuitem(item.descriptor());
        }
        root_menu.add_menuitem(sub_menu.descriptor().expect("submenus have descriptors"));

        Self {
            dropdown,
            root_menu,
            sub_menu,
            items,
            listener: HostListener,
            focused: None,
            now: 0,
        }
    }

    /// Route dropdown effects: focus restoration and open-state fan-out.
    fn apply_dropdown_effects(&mut self, effects: impl IntoIterator<Item = DropdownEffect>) {
        for effect in effects {
            match effect {
                DropdownEffect::Toggled(open) => {
                    println!("  dropdown is now {}", if open { "open" } else { "closed" });
                    let reason = if open { self.dropdown.take_open_reason() } else { None };
                    let focus = self.root_menu.dropdown_state_changed(open, reason);
                    self.apply_menu_effects(focus);
                    self.sub_menu.dropdown_state_changed(open, None);
                }
                DropdownEffect::FocusToggle => {
                    self.focused = Some(TOGGLE);
                    println!("  focus -> toggle");
                }
                DropdownEffect::ModelUpdate(open) => {
                    // This dropdown owns its state; shown for completeness.
                    self.dropdown.set_external_open(open);
                }
            }
        }
    }

    fn apply_menu_effects(&mut self, effects: impl IntoIterator<Item = MenuEffect<u32>>) {
        for effect in effects {
            match effect {
                MenuEffect::Focus(element) => {
                    self.focused = Some(element);
                    self.root_menu.note_focused(element);
                    println!("  focus -> element {element}");
                }
                MenuEffect::SetChecked(element, value) => self.deliver_checked(element, value),
                MenuEffect::AggregateChanged(element, aggregate) => {
                    let upward = self.root_menu.menuitem_checked_changed(element, aggregate);
                    self.apply_menu_effects(upward);
                }
            }
        }
    }

    fn deliver_checked(&mut self, element: u32, value: Checked) {
        if element == SUBMENU_PANEL {
            let cascade = self.sub_menu.force_aggregate(value, None);
            self.apply_menu_effects(cascade);
            return;
        }
        for item in &mut self.items {
            if item.element() == element {
                item.force_checked(value);
            }
        }
    }

    fn activate(&mut self, element: u32) {
        println!("click on element {element}:");
        let index = self
            .items
            .iter()
            .position(|item| item.element() == element)
            .expect("known element");
        let effects: ItemEffects<u32> = {
            let mut listeners: [&mut dyn CommandListener<&'static str, u32>; 1] =
                [&mut self.listener];
            self.items[index].commit(None, Some(&mut self.dropdown), &mut listeners)
        };
        for effect in effects {
            match effect {
                ItemEffect::ResetRadios { except } => {
                    let resets = self.root_menu.reset_checked(Some(except));
                    for reset in resets {
                        let MenuEffect::SetChecked(el, value) = reset else {
                            continue;
                        };
                        if el == SUBMENU_PANEL {
                            let cascade = self.sub_menu.force_aggregate(value, Some(except));
                            self.apply_menu_effects(cascade);
                        } else {
                            self.deliver_checked(el, value);
                        }
                    }
                }
                ItemEffect::CheckedChanged(entry) => {
                    let owner_is_sub = self
                        .sub_menu
                        .roster()
                        .iter()
                        .any(|candidate| candidate.element == entry.element);
                    let upward = if owner_is_sub {
                        self.sub_menu.menuitem_checked_changed(entry.element, entry.checked)
                    } else {
                        self.root_menu.menuitem_checked_changed(entry.element, entry.checked)
                    };
                    self.apply_menu_effects(upward);
                }
                ItemEffect::Dropdown(effect) => self.apply_dropdown_effects([effect]),
            }
        }
    }

    fn report(&self) {
        let states: Vec<String> = self
            .items
            .iter()
            .map(|item| format!("{}={}", item.element(), item.checked().as_str()))
            .collect();
        println!(
            "state: open={} focused={:?} checked[{}] submenu_aggregate={:?}",
            self.dropdown.open(),
            self.focused,
            states.join(" "),
            self.sub_menu.checked(),
        );
    }
}

fn main() {
    let mut host = Host::new();
    println!("dropdown id: {}", host.dropdown.id());

    // Open from the keyboard: ArrowDown records the open reason, and the
    // menu's initial focus lands on the first non-hidden item.
    println!("ArrowDown on the toggle:");
    let effects = host.dropdown.toggle_keydown(Key::ArrowDown);
    host.apply_dropdown_effects(effects);
    host.report();

    // Walk the menu.
    println!("ArrowDown inside the menu:");
    let (_, effects) = host.root_menu.keydown(Key::ArrowDown);
    host.apply_menu_effects(effects);
    host.report();

    // Checkbox selection keeps the menu open.
    host.activate(ITEM_WRAP);
    host.report();

    // Open the submenu by hover, with the debounce visible.
    println!("hover across the submenu toggle:");
    host.sub_menu.submenu_pointer(Input::PointerEnter, host.now);
    host.sub_menu.submenu_pointer(Input::PointerLeave, host.now + 10);
    host.sub_menu.submenu_pointer(Input::PointerEnter, host.now + 60);
    host.sub_menu.poll(host.now + 1_000);
    println!("  submenu open: {}", host.sub_menu.show_submenu());

    // Select the nested radio; the previous selection resets across the
    // whole tree and the dropdown closes.
    host.activate(ITEM_UTF8);
    host.report();

    // Re-open with a click (no initial focus), then veto a command.
    println!("click on the toggle:");
    let effects = host.dropdown.toggle_pointer(Input::Click, host.now);
    host.apply_dropdown_effects(effects);
    let mut forbidden = Menuitem::new(99).with_command("forbidden");
    println!("click on the vetoed item:");
    let effects = {
        let mut listeners: [&mut dyn CommandListener<&'static str, u32>; 1] =
            [&mut host.listener];
        forbidden.commit(None, Some(&mut host.dropdown), &mut listeners)
    };
    assert!(effects.is_empty());
    host.report();

    // Escape anywhere inside the widget closes and refocuses the toggle.
    println!("Escape in the container:");
    let effects = host.dropdown.container_keydown(Key::Escape);
    host.apply_dropdown_effects(effects);
    host.report();
}
