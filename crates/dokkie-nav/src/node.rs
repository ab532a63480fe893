//! Navigation nodes derived from content items and configured entries.

use chrono::{DateTime, Utc};
use dokkie_config::NavigationEntry;
use serde::Serialize;

use crate::item::{ContentItem, ItemMeta, link_from_route};

/// Where a navigation node came from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NodeOrigin {
    /// Built from a content item.
    #[default]
    Content,
    /// Appended from `extend_navigation`.
    Extension,
    /// Appended from `overrule_navigation`.
    Override,
}

/// A single entry of the navigation structure.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NavigationNode {
    /// Display name.
    pub name: String,
    /// Link target (route without trailing `index.html`).
    pub link: String,
    /// Date used for blog ordering.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Own key: last non-empty path segment of `link`.
    #[serde(rename = "self")]
    pub self_key: String,
    /// Keys of the parents this node is listed under. Empty for roots.
    pub parent_keys: Vec<String>,
    /// Metadata; `meta.menu` holds the resolved menu membership.
    pub meta: ItemMeta,
    /// Origin of the node.
    #[serde(skip)]
    pub origin: NodeOrigin,
}

impl NavigationNode {
    /// Build a node from a content item.
    ///
    /// An explicit `meta.parent` takes precedence over the parent derived
    /// from the link path.
    #[must_use]
    pub fn from_item(item: &ContentItem) -> Self {
        let link = item.link().to_owned();
        let parent_keys = match item.meta.parent.as_deref() {
            Some(declared) => parse_parent_keys(declared),
            None => path_parent(&link).map(str::to_owned).into_iter().collect(),
        };

        Self {
            name: item.title.clone(),
            self_key: self_key(&link).to_owned(),
            link,
            date: item.date,
            parent_keys,
            meta: item.meta.clone(),
            origin: NodeOrigin::Content,
        }
    }

    /// Build a node from a configured navigation entry.
    #[must_use]
    pub fn from_entry(entry: &NavigationEntry, origin: NodeOrigin) -> Self {
        let link = link_from_route(&entry.link).to_owned();
        Self {
            name: entry.name.clone(),
            self_key: self_key(&link).to_owned(),
            link,
            date: None,
            parent_keys: entry
                .parent
                .as_deref()
                .map(parse_parent_keys)
                .unwrap_or_default(),
            meta: ItemMeta {
                menu: entry.menu.clone(),
                ..ItemMeta::default()
            },
            origin,
        }
    }

    /// True if the node has no parent keys.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.parent_keys.is_empty()
    }

    /// True if `key` is a usable parent key listed by this node.
    #[must_use]
    pub fn is_child_of(&self, key: &str) -> bool {
        !key.is_empty() && self.parent_keys.iter().any(|k| k == key)
    }

    /// True if the node is shown in the given menu.
    ///
    /// Nodes without an explicit menu list are shown everywhere.
    #[must_use]
    pub fn in_menu(&self, menu: &str) -> bool {
        self.meta
            .menu
            .as_ref()
            .is_none_or(|menus| menus.iter().any(|m| m == menu))
    }
}

/// Split a comma-separated parent list.
///
/// Entries are trimmed; empty entries and duplicates are dropped, so a list
/// of only blanks yields no parents (root).
#[must_use]
pub fn parse_parent_keys(declared: &str) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for key in declared.split(',').map(str::trim).filter(|k| !k.is_empty()) {
        if !keys.iter().any(|k| k == key) {
            keys.push(key.to_owned());
        }
    }
    keys
}

fn segments(link: &str) -> impl DoubleEndedIterator<Item = &str> {
    link.split('/').filter(|segment| !segment.is_empty())
}

/// Last non-empty path segment of a link, or `""` for `/`.
fn self_key(link: &str) -> &str {
    segments(link).next_back().unwrap_or("")
}

/// Second-to-last path segment: the directory containing the link.
fn path_parent(link: &str) -> Option<&str> {
    segments(link).rev().nth(1)
}
