// Copyright 2025 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Component registration names.
//!
//! Hosts that register the three widgets under global names (custom elements,
//! framework component registries) use [`ComponentNames`] as the install
//! surface. Each name can be overridden independently.

use alloc::borrow::Cow;

/// The names the three widgets are registered under.
///
/// ```rust
/// use thicket_dropdown::ComponentNames;
///
/// let names = ComponentNames::default();
/// assert_eq!(names.dropdown, "j-dropdown");
///
/// let names = ComponentNames::default().with_menu("app-menu");
/// assert_eq!(names.menu, "app-menu");
/// assert_eq!(names.menuitem, "j-dropdown-menuitem");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentNames {
    /// Registration name of the dropdown container.
    pub dropdown: Cow<'static, str>,
    /// Registration name of the menu/submenu component.
    pub menu: Cow<'static, str>,
    /// Registration name of the menu item component.
    pub menuitem: Cow<'static, str>,
}

impl Default for ComponentNames {
    fn default() -> Self {
        Self {
            dropdown: Cow::Borrowed("j-dropdown"),
            menu: Cow::Borrowed("j-dropdown-menu"),
            menuitem: Cow::Borrowed("j-dropdown-menuitem"),
        }
    }
}

impl ComponentNames {
    /// Override the dropdown name.
    #[must_use]
    pub fn with_dropdown(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.dropdown = name.into();
        self
    }

    /// Override the menu name.
    #[must_use]
    pub fn with_menu(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.menu = name.into();
        self
    }

    /// Override the menu item name.
    #[must_use]
    pub fn with_menuitem(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.menuitem = name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_names() {
        let names = ComponentNames::default();
        assert_eq!(names.dropdown, "j-dropdown");
        assert_eq!(names.menu, "j-dropdown-menu");
        assert_eq!(names.menuitem, "j-dropdown-menuitem");
    }

    #[test]
    fn overrides_are_independent() {
        let names = ComponentNames::default()
            .with_dropdown("x-dd")
            .with_menuitem("x-item");
        assert_eq!(names.dropdown, "x-dd");
        assert_eq!(names.menu, "j-dropdown-menu");
        assert_eq!(names.menuitem, "x-item");
    }
}
