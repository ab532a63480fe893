//! Navigation engine for Dokkie.
//!
//! This crate provides:
//! - [`NavigationTree`]: navigation nodes built from content items, flat or
//!   one level nested, with menu membership resolved
//! - [`Menu`]: the projection of the tree onto a single named menu
//! - [`SiblingNavigator`]: circular previous/next links between pages of
//!   the same directory
//!
//! # Quick Start
//!
//! ```
//! use dokkie_config::Settings;
//! use dokkie_nav::{ContentItem, Direction, NavigationTree, SiblingNavigator};
//!
//! let items = vec![
//!     ContentItem {
//!         title: "Work".to_owned(),
//!         route: "/work/index.html".to_owned(),
//!         ..ContentItem::default()
//!     },
//!     ContentItem {
//!         title: "About".to_owned(),
//!         route: "/about/index.html".to_owned(),
//!         ..ContentItem::default()
//!     },
//! ];
//! let settings = Settings::default();
//!
//! let tree = NavigationTree::build(&items, &settings);
//! let header = tree.project("header", &settings).unwrap();
//! assert_eq!(header.menu.len(), 2);
//!
//! let siblings = SiblingNavigator::new(&items, &settings);
//! let next = siblings.sibling(&items[0], Direction::Next).unwrap().unwrap();
//! assert_eq!(next.name, "About");
//! ```

mod item;
mod menu;
mod node;
mod projection;
mod sibling;
mod tree;

pub use item::{ContentItem, INDEX_FILE, ItemMeta, link_from_route};
pub use node::{NavigationNode, NodeOrigin, parse_parent_keys};
pub use projection::{Menu, show_class};
pub use sibling::{ContentNavigation, Direction, NavigationError, SiblingLink, SiblingNavigator};
pub use tree::{NESTING_DEPTH, NavItem, NavigationTree};
