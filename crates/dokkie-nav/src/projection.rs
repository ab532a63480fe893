//! Menu projection: the part of the navigation a single menu shows.

use dokkie_config::{MenuDisplay, Settings};
use serde::Serialize;

use crate::node::NavigationNode;
use crate::tree::{NavItem, NavigationTree};

/// A projected, renderable menu.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Menu {
    /// Menu name.
    pub name: String,
    /// Shown on mobile viewports.
    pub mobile: bool,
    /// Shown on desktop viewports.
    pub desktop: bool,
    /// CSS classes controlling responsive visibility.
    #[serde(rename = "showClass")]
    pub show_class: String,
    /// Items visible in this menu.
    pub menu: Vec<NavItem>,
}

/// CSS classes for a menu's device visibility.
///
/// `hide-mobile` when hidden on mobile, followed by `show-desktop` or
/// `hide-desktop`.
#[must_use]
pub fn show_class(display: &MenuDisplay) -> String {
    let desktop = if display.desktop {
        "show-desktop"
    } else {
        "hide-desktop"
    };
    if display.mobile {
        desktop.to_owned()
    } else {
        format!("hide-mobile {desktop}")
    }
}

impl NavigationTree {
    /// Project the tree onto the menu named `menu_name`.
    ///
    /// Returns `None` when the menu is not configured in `show_navigation`.
    /// A node is kept when it has no explicit menu list or lists the menu;
    /// kept nodes keep their children filtered the same way, and a node
    /// whose children are all filtered away stays with an empty list.
    #[must_use]
    pub fn project(&self, menu_name: &str, settings: &Settings) -> Option<Menu> {
        let display = settings.menu(menu_name)?;
        let keep = |node: &NavigationNode| node.in_menu(menu_name);

        let menu = self
            .top_level_indices()
            .iter()
            .filter(|&&i| keep(self.node(i)))
            .map(|&i| self.build_item(i, &keep))
            .collect();

        Some(Menu {
            name: display.name.clone(),
            mobile: display.mobile,
            desktop: display.desktop,
            show_class: show_class(display),
            menu,
        })
    }

    /// Project every configured menu, in `show_navigation` order.
    #[must_use]
    pub fn menus(&self, settings: &Settings) -> Vec<Menu> {
        settings
            .show_navigation
            .iter()
            .filter_map(|display| self.project(&display.name, settings))
            .collect()
    }
}
