//! Previous/next links between sibling pages.

use std::path::Path;

use dokkie_config::{SKIP_CONTENT_NAVIGATION, Settings};
use serde::Serialize;

use crate::item::ContentItem;

/// Direction of a sibling lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// Link to a neighbouring page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SiblingLink {
    pub name: String,
    pub link: String,
}

/// Both neighbours of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ContentNavigation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<SiblingLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<SiblingLink>,
}

/// Sibling lookup error.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// The page is not part of the item list the navigator was built from.
    #[error("Page not found among its siblings: {route}")]
    NotInGroup { route: String },
}

/// Resolves previous/next pages within a directory.
///
/// Siblings are the items sharing a group directory: the directory holding
/// the source file, or its parent for directory index pages. Lookups wrap
/// around at both ends.
pub struct SiblingNavigator<'a> {
    items: &'a [ContentItem],
    keys: Vec<Option<&'a Path>>,
    enabled: bool,
}

impl<'a> SiblingNavigator<'a> {
    /// Create a navigator over all items of a build, in input order.
    #[must_use]
    pub fn new(items: &'a [ContentItem], settings: &Settings) -> Self {
        Self {
            items,
            keys: items.iter().map(group_key).collect(),
            enabled: !settings.is_skipped(SKIP_CONTENT_NAVIGATION),
        }
    }

    /// Items in the same group as `item`, in input order.
    #[must_use]
    pub fn group(&self, item: &ContentItem) -> Vec<&'a ContentItem> {
        let key = group_key(item);
        self.items
            .iter()
            .zip(&self.keys)
            .filter(|(_, k)| **k == key)
            .map(|(sibling, _)| sibling)
            .collect()
    }

    /// Neighbour of `item` in the given direction.
    ///
    /// Returns `Ok(None)` when the group has at most one member or content
    /// navigation is skipped.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::NotInGroup`] if no item of the group has
    /// the route of `item`.
    pub fn sibling(
        &self,
        item: &ContentItem,
        direction: Direction,
    ) -> Result<Option<SiblingLink>, NavigationError> {
        if !self.enabled {
            return Ok(None);
        }

        let group = self.group(item);
        if group.len() <= 1 {
            return Ok(None);
        }

        let current = group
            .iter()
            .position(|sibling| sibling.route == item.route)
            .ok_or_else(|| NavigationError::NotInGroup {
                route: item.route.clone(),
            })?;

        let target = match direction {
            Direction::Prev => current.checked_sub(1).unwrap_or(group.len() - 1),
            Direction::Next => (current + 1) % group.len(),
        };

        let sibling = group[target];
        Ok(Some(SiblingLink {
            name: sibling.title.clone(),
            link: sibling.route.clone(),
        }))
    }

    /// Previous and next neighbours of `item`.
    ///
    /// # Errors
    ///
    /// See [`SiblingNavigator::sibling`].
    pub fn pair(&self, item: &ContentItem) -> Result<ContentNavigation, NavigationError> {
        Ok(ContentNavigation {
            prev: self.sibling(item, Direction::Prev)?,
            next: self.sibling(item, Direction::Next)?,
        })
    }
}

fn group_key(item: &ContentItem) -> Option<&Path> {
    let dir = item.source_path.parent();
    if item.is_parent_index {
        dir.and_then(Path::parent)
    } else {
        dir
    }
}
