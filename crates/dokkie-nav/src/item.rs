//! Content items as produced by the loader.

use std::collections::HashMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use dokkie_config::one_or_many;
use serde::{Deserialize, Serialize};

/// Page file name stripped from routes to form navigation links.
pub const INDEX_FILE: &str = "index.html";

/// Author-supplied metadata of a content item.
///
/// The navigation engine reads `parent`, `hide` and `menu`. Every other
/// front matter key is kept in `extra`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMeta {
    /// Comma-separated list of parent keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Hide the item from navigation.
    #[serde(default)]
    pub hide: bool,
    /// Menus the item is shown in. `None` means every menu.
    #[serde(
        default,
        deserialize_with = "one_or_many",
        skip_serializing_if = "Option::is_none"
    )]
    pub menu: Option<Vec<String>>,
    /// Remaining metadata keys.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

/// One page worth of converted content plus metadata.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ContentItem {
    /// Display title.
    pub title: String,
    /// Output URL path ending in a page file name (e.g. `/work/index.html`).
    pub route: String,
    /// Absolute source file path.
    pub source_path: PathBuf,
    /// Publication date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    /// Author metadata.
    pub meta: ItemMeta,
    /// True if this item is the index page of its directory.
    pub is_parent_index: bool,
    /// Converted HTML body.
    #[serde(skip)]
    pub html: String,
}

impl ContentItem {
    /// Navigation link: the route without its trailing `index.html`.
    #[must_use]
    pub fn link(&self) -> &str {
        link_from_route(&self.route)
    }
}

/// Strip the trailing `index.html` from a route.
#[must_use]
pub fn link_from_route(route: &str) -> &str {
    route.strip_suffix(INDEX_FILE).unwrap_or(route)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_link_strips_index_file() {
        assert_eq!(link_from_route("/work/index.html"), "/work/");
        assert_eq!(link_from_route("/index.html"), "/");
        assert_eq!(link_from_route("/about.html"), "/about.html");
    }

    #[test]
    fn test_meta_from_yaml() {
        let meta: ItemMeta = serde_yaml::from_str(
            "parent: work, about\nhide: true\nmenu: footer\nlayout: thirds\n",
        )
        .unwrap();

        assert_eq!(meta.parent.as_deref(), Some("work, about"));
        assert!(meta.hide);
        assert_eq!(meta.menu, Some(vec!["footer".to_owned()]));
        assert_eq!(meta.extra["layout"], serde_json::json!("thirds"));
    }

    #[test]
    fn test_meta_defaults() {
        let meta: ItemMeta = serde_yaml::from_str("{}").unwrap();

        assert_eq!(meta, ItemMeta::default());
    }
}
