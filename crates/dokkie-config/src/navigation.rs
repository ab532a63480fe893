//! Navigation-related settings types.
//!
//! These are the shapes authors write in `dokkie.toml` / `dokkie.config.json`
//! to configure menus and to inject or replace navigation entries.

use serde::{Deserialize, Deserializer, Serialize};

/// Menu name every blog item is placed in.
pub const OVERVIEW_MENU: &str = "overview";

/// Menus an item without an explicit `menu` list is visible in.
pub const DEFAULT_MENUS: [&str; 3] = ["header", "footer", "sidebar"];

/// Token in `skip` that disables previous/next links.
pub const SKIP_CONTENT_NAVIGATION: &str = "content-navigation";

/// Kind of project being built.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectType {
    /// Documentation: every page is visible in every menu unless told otherwise.
    #[default]
    Docs,
    /// Blog: reverse chronological, single `overview` menu.
    Blog,
    /// Website: pages placed in menus like docs.
    Website,
}

impl ProjectType {
    /// Lowercase name as used in configuration files.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::Blog => "blog",
            Self::Website => "website",
        }
    }
}

/// Display descriptor of a named menu.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuDisplay {
    /// Menu name (e.g. "header").
    pub name: String,
    /// Whether the menu is shown on mobile viewports.
    #[serde(default = "default_visible")]
    pub mobile: bool,
    /// Whether the menu is shown on desktop viewports.
    #[serde(default = "default_visible")]
    pub desktop: bool,
}

impl MenuDisplay {
    /// Menu visible on both mobile and desktop.
    #[must_use]
    pub fn visible(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mobile: true,
            desktop: true,
        }
    }
}

fn default_visible() -> bool {
    true
}

/// Navigation entry without a backing content file.
///
/// Used by `extend_navigation` (extra entries, e.g. external links) and
/// `overrule_navigation` (entries replacing whole menus).
///
/// The menu list may be given either flat (`menu = ["footer"]`) or nested
/// the way content front matter does it (`meta = { menu = ["footer"] }`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "NavigationEntryRaw")]
pub struct NavigationEntry {
    /// Display name.
    pub name: String,
    /// Link target.
    pub link: String,
    /// Comma-separated parent keys. `None` places the entry at root.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    /// Menus the entry belongs to. `None` means every menu.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct NavigationEntryRaw {
    name: String,
    link: String,
    #[serde(default)]
    parent: Option<String>,
    #[serde(default, deserialize_with = "one_or_many")]
    menu: Option<Vec<String>>,
    #[serde(default)]
    meta: Option<EntryMetaRaw>,
}

#[derive(Deserialize)]
struct EntryMetaRaw {
    #[serde(default, deserialize_with = "one_or_many")]
    menu: Option<Vec<String>>,
}

impl From<NavigationEntryRaw> for NavigationEntry {
    fn from(raw: NavigationEntryRaw) -> Self {
        let menu = raw.menu.or_else(|| raw.meta.and_then(|meta| meta.menu));
        Self {
            name: raw.name,
            link: raw.link,
            parent: raw.parent,
            menu,
        }
    }
}

/// Accept either a single string or a list of strings.
///
/// # Errors
///
/// Fails when the value is neither a string nor a sequence of strings.
pub fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(
        Option::<OneOrMany>::deserialize(deserializer)?.map(|value| match value {
            OneOrMany::One(name) => vec![name],
            OneOrMany::Many(names) => names,
        }),
    )
}
