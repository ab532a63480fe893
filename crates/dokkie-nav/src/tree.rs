//! Navigation tree built from content items.
//!
//! # Architecture
//!
//! Nodes are stored in a flat `Vec<NavigationNode>` with the top-level
//! sequence and per-node children tracked by indices. A node listing two
//! parents is referenced from both parents' child lists, never cloned, so
//! it stays identical wherever it appears.
//!
//! # Nesting
//!
//! In nested mode only one level is attached: top-level nodes carry their
//! direct children, and children never carry children of their own. A node
//! whose parent is itself a child therefore does not appear in the nested
//! structure. See [`NESTING_DEPTH`].

use std::cmp::Ordering;
use std::collections::HashSet;

use chrono::{DateTime, Utc};
use dokkie_config::{ProjectType, Settings};
use serde::Serialize;

use crate::item::ContentItem;
use crate::menu::resolve_menus;
use crate::node::{NavigationNode, NodeOrigin};

/// Number of child levels attached below top-level nodes in nested mode.
pub const NESTING_DEPTH: usize = 1;

/// Navigation item with children for templates.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NavItem {
    /// Display name.
    pub name: String,
    /// Link target.
    pub link: String,
    /// Own key.
    #[serde(rename = "self")]
    pub self_key: String,
    /// Date, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Child navigation items.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavItem>,
}

/// Navigation structure of one build.
///
/// Built once per build with [`NavigationTree::build`], including menu
/// resolution, before any menu is projected.
#[derive(Debug)]
pub struct NavigationTree {
    nodes: Vec<NavigationNode>,
    top_level: Vec<usize>,
    children: Vec<Vec<usize>>,
    flat: bool,
}

impl NavigationTree {
    /// Build the navigation tree from content items.
    ///
    /// Items are skipped when hidden, and the home page (`/`) is skipped
    /// unless `show_home` is set. Entries from `extend_navigation` are
    /// appended, then menu membership is resolved.
    #[must_use]
    pub fn build(items: &[ContentItem], settings: &Settings) -> Self {
        let mut nodes: Vec<NavigationNode> = items
            .iter()
            .filter(|item| admit(item, settings))
            .map(NavigationNode::from_item)
            .collect();

        nodes.extend(
            settings
                .extend_navigation
                .iter()
                .map(|entry| NavigationNode::from_entry(entry, NodeOrigin::Extension)),
        );

        resolve_menus(&mut nodes, settings);

        let mut children = vec![Vec::new(); nodes.len()];
        let mut top_level: Vec<usize> = if settings.flat_navigation {
            (0..nodes.len()).collect()
        } else {
            let roots: Vec<usize> = (0..nodes.len()).filter(|&i| nodes[i].is_root()).collect();
            for &root in &roots {
                children[root] = attach_children(&nodes, root);
            }
            roots
        };

        if settings.project_type == ProjectType::Blog {
            top_level.sort_by(|&a, &b| newest_first(nodes[a].date, nodes[b].date));
        }

        tracing::debug!(
            nodes = nodes.len(),
            top_level = top_level.len(),
            flat = settings.flat_navigation,
            "Navigation built"
        );

        Self {
            nodes,
            top_level,
            children,
            flat: settings.flat_navigation,
        }
    }

    /// All nodes, in build order.
    #[must_use]
    pub fn nodes(&self) -> &[NavigationNode] {
        &self.nodes
    }

    /// True if the tree was built in flat mode.
    #[must_use]
    pub fn is_flat(&self) -> bool {
        self.flat
    }

    /// Top-level nodes in display order.
    #[must_use]
    pub fn top_level(&self) -> Vec<&NavigationNode> {
        self.top_level.iter().map(|&i| &self.nodes[i]).collect()
    }

    /// Children attached to the node with the given link.
    ///
    /// Empty in flat mode, for unknown links, and below the first level.
    #[must_use]
    pub fn children_of(&self, link: &str) -> Vec<&NavigationNode> {
        self.top_level
            .iter()
            .find(|&&i| self.nodes[i].link == link)
            .map(|&i| self.children[i].iter().map(|&c| &self.nodes[c]).collect())
            .unwrap_or_default()
    }

    /// Navigation items for templates, flat or one level nested.
    #[must_use]
    pub fn items(&self) -> Vec<NavItem> {
        self.top_level
            .iter()
            .map(|&i| self.build_item(i, &|_| true))
            .collect()
    }

    /// Top-level indices (for projection).
    pub(crate) fn top_level_indices(&self) -> &[usize] {
        &self.top_level
    }

    /// Node by index (for projection).
    pub(crate) fn node(&self, idx: usize) -> &NavigationNode {
        &self.nodes[idx]
    }

    /// Build a [`NavItem`] for `idx`, keeping only children accepted by `keep`.
    pub(crate) fn build_item(
        &self,
        idx: usize,
        keep: &dyn Fn(&NavigationNode) -> bool,
    ) -> NavItem {
        let node = &self.nodes[idx];
        let children = self.children[idx]
            .iter()
            .filter(|&&c| keep(&self.nodes[c]))
            .map(|&c| self.build_item(c, keep))
            .collect();

        NavItem {
            name: node.name.clone(),
            link: node.link.clone(),
            self_key: node.self_key.clone(),
            date: node.date,
            children,
        }
    }
}

/// Whether an item enters the navigation at all.
fn admit(item: &ContentItem, settings: &Settings) -> bool {
    if item.meta.hide {
        return false;
    }
    item.link() != "/" || settings.show_home
}

/// Indices of nodes listing `parent` among their parent keys.
///
/// A parent with an empty key never receives children.
fn attach_children(nodes: &[NavigationNode], parent: usize) -> Vec<usize> {
    let key = nodes[parent].self_key.as_str();
    if key.is_empty() {
        return Vec::new();
    }

    let attached: Vec<usize> = (0..nodes.len())
        .filter(|&i| i != parent && nodes[i].is_child_of(key))
        .collect();

    let mut seen = HashSet::new();
    for &i in &attached {
        if !seen.insert(nodes[i].self_key.as_str()) {
            tracing::warn!(
                parent = %nodes[parent].link,
                key = %nodes[i].self_key,
                "Duplicate navigation key under the same parent"
            );
        }
    }

    attached
}

/// Order by date descending; undated entries go last.
fn newest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dokkie_config::NavigationEntry;
    use pretty_assertions::assert_eq;

    fn page(title: &str, route: &str) -> ContentItem {
        ContentItem {
            title: title.to_owned(),
            route: route.to_owned(),
            ..ContentItem::default()
        }
    }

    fn dated(title: &str, route: &str, y: i32, m: u32, d: u32) -> ContentItem {
        ContentItem {
            date: Some(Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()),
            ..page(title, route)
        }
    }

    fn names(nodes: &[&NavigationNode]) -> Vec<String> {
        nodes.iter().map(|n| n.name.clone()).collect()
    }

    #[test]
    fn test_empty_items_build_empty_tree() {
        let tree = NavigationTree::build(&[], &Settings::default());

        assert!(tree.nodes().is_empty());
        assert!(tree.items().is_empty());
    }

    #[test]
    fn test_nested_tree_attaches_children_to_roots() {
        let items = vec![
            page("Work", "/work/index.html"),
            page("Item 1", "/work/item1/index.html"),
            page("Item 2", "/work/item2/index.html"),
            page("About", "/about/index.html"),
        ];

        let tree = NavigationTree::build(&items, &Settings::default());

        assert_eq!(names(&tree.top_level()), vec!["Work", "About"]);
        assert_eq!(names(&tree.children_of("/work/")), vec!["Item 1", "Item 2"]);
        assert!(tree.children_of("/about/").is_empty());
    }

    #[test]
    fn test_root_partition() {
        let mut moved = page("Moved", "/work/moved/index.html");
        moved.meta.parent = Some("about".to_owned());
        let items = vec![
            page("Work", "/work/index.html"),
            page("About", "/about/index.html"),
            page("Item", "/work/item/index.html"),
            moved,
        ];

        let tree = NavigationTree::build(&items, &Settings::default());

        for node in tree.nodes() {
            let is_top = tree.top_level().iter().any(|t| t.link == node.link);
            assert_eq!(is_top, node.parent_keys.is_empty(), "{}", node.link);
        }
        assert_eq!(names(&tree.children_of("/work/")), vec!["Item"]);
        assert_eq!(names(&tree.children_of("/about/")), vec!["Moved"]);
    }

    #[test]
    fn test_multi_parent_node_is_shared() {
        let mut shared = page("Shared", "/shared/index.html");
        shared.meta.parent = Some("work, about".to_owned());
        let items = vec![
            page("Work", "/work/index.html"),
            page("About", "/about/index.html"),
            shared,
        ];

        let tree = NavigationTree::build(&items, &Settings::default());

        let under_work = tree.children_of("/work/");
        let under_about = tree.children_of("/about/");
        assert_eq!(names(&under_work), vec!["Shared"]);
        assert!(std::ptr::eq(under_work[0], under_about[0]));
        assert_eq!(tree.nodes().len(), 3);
    }

    #[test]
    fn test_nesting_is_one_level_deep() {
        let items = vec![
            page("A", "/a/index.html"),
            page("B", "/a/b/index.html"),
            page("C", "/a/b/c/index.html"),
        ];

        let tree = NavigationTree::build(&items, &Settings::default());
        let nav = tree.items();

        assert_eq!(nav.len(), 1);
        assert_eq!(nav[0].children.len(), 1);
        assert_eq!(nav[0].children[0].name, "B");
        assert!(nav[0].children[0].children.is_empty());
    }

    #[test]
    fn test_home_hidden_unless_show_home() {
        let items = vec![page("Home", "/index.html"), page("Work", "/work/index.html")];

        let tree = NavigationTree::build(&items, &Settings::default());
        assert_eq!(names(&tree.top_level()), vec!["Work"]);

        let settings = Settings {
            show_home: true,
            ..Settings::default()
        };
        let tree = NavigationTree::build(&items, &settings);
        assert_eq!(names(&tree.top_level()), vec!["Home", "Work"]);
        assert!(tree.children_of("/").is_empty());
    }

    #[test]
    fn test_hidden_item_is_skipped_and_its_children_drop_out_of_nesting() {
        let mut hidden = page("B", "/a/b/index.html");
        hidden.meta.hide = true;
        let mut hidden_root = page("Secret", "/secret/index.html");
        hidden_root.meta.hide = true;
        let items = vec![
            page("A", "/a/index.html"),
            hidden,
            page("C", "/a/b/c/index.html"),
            hidden_root,
            page("Inside", "/secret/inside/index.html"),
        ];

        let tree = NavigationTree::build(&items, &Settings::default());

        assert!(tree.nodes().iter().all(|n| n.name != "B" && n.name != "Secret"));
        assert_eq!(names(&tree.top_level()), vec!["A"]);
        assert!(tree.children_of("/a/").is_empty());

        let flat = NavigationTree::build(
            &items,
            &Settings {
                flat_navigation: true,
                ..Settings::default()
            },
        );
        assert_eq!(names(&flat.top_level()), vec!["A", "C", "Inside"]);
    }

    #[test]
    fn test_flat_mode_lists_every_node_without_children() {
        let items = vec![
            page("Work", "/work/index.html"),
            page("Item", "/work/item/index.html"),
        ];
        let settings = Settings {
            flat_navigation: true,
            ..Settings::default()
        };

        let tree = NavigationTree::build(&items, &settings);

        assert!(tree.is_flat());
        assert_eq!(names(&tree.top_level()), vec!["Work", "Item"]);
        assert!(tree.items().iter().all(|item| item.children.is_empty()));
    }

    #[test]
    fn test_extension_entries_are_appended() {
        let settings = Settings {
            extend_navigation: vec![
                NavigationEntry {
                    name: "GitHub".to_owned(),
                    link: "https://github.com/dokkie".to_owned(),
                    parent: None,
                    menu: None,
                },
                NavigationEntry {
                    name: "Changelog".to_owned(),
                    link: "/changelog/".to_owned(),
                    parent: Some("work".to_owned()),
                    menu: None,
                },
            ],
            ..Settings::default()
        };

        let tree = NavigationTree::build(&[page("Work", "/work/index.html")], &settings);

        assert_eq!(names(&tree.top_level()), vec!["Work", "GitHub"]);
        assert_eq!(names(&tree.children_of("/work/")), vec!["Changelog"]);
    }

    #[test]
    fn test_blog_orders_newest_first() {
        let items = vec![
            dated("January", "/january/index.html", 2024, 1, 1),
            page("Undated", "/undated/index.html"),
            dated("June", "/june/index.html", 2024, 6, 1),
        ];
        let settings = Settings {
            project_type: ProjectType::Blog,
            flat_navigation: true,
            ..Settings::default()
        };

        let tree = NavigationTree::build(&items, &settings);

        assert_eq!(names(&tree.top_level()), vec!["June", "January", "Undated"]);
    }

    #[test]
    fn test_blog_orders_nested_roots_newest_first() {
        let items = vec![
            dated("January", "/january/index.html", 2024, 1, 1),
            dated("Early", "/january/early/index.html", 2024, 1, 2),
            page("Undated", "/undated/index.html"),
            dated("June", "/june/index.html", 2024, 6, 1),
            dated("Late", "/june/late/index.html", 2024, 6, 30),
        ];
        let settings = Settings {
            project_type: ProjectType::Blog,
            flat_navigation: false,
            ..Settings::default()
        };

        let tree = NavigationTree::build(&items, &settings);

        assert!(!tree.is_flat());
        assert_eq!(names(&tree.top_level()), vec!["June", "January", "Undated"]);
        assert_eq!(names(&tree.children_of("/june/")), vec!["Late"]);
        assert_eq!(names(&tree.children_of("/january/")), vec!["Early"]);
    }

    #[test]
    fn test_non_blog_keeps_input_order() {
        let items = vec![
            dated("January", "/january/index.html", 2024, 1, 1),
            dated("June", "/june/index.html", 2024, 6, 1),
        ];

        let tree = NavigationTree::build(&items, &Settings::default());

        assert_eq!(names(&tree.top_level()), vec!["January", "June"]);
    }

    #[test]
    fn test_nav_item_serialization() {
        let items = vec![
            page("Work", "/work/index.html"),
            page("Item", "/work/item/index.html"),
        ];
        let tree = NavigationTree::build(&items, &Settings::default());

        let json = serde_json::to_value(tree.items()).unwrap();

        assert_eq!(json[0]["name"], "Work");
        assert_eq!(json[0]["self"], "work");
        assert_eq!(json[0]["children"][0]["link"], "/work/item/");
        assert!(json[0]["children"][0].get("children").is_none());
        assert!(json[0].get("date").is_none());
    }
}
