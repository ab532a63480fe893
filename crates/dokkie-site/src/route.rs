//! Output routes for content files.
//!
//! A source file `<input>/<dirs>/<stem>.<ext>` maps to
//! `/<dirs>/<stem>/index.html`, or to `/<dirs>/index.html` when the stem is
//! `index` or `readme`. Leading directories named in `strip` are removed
//! first, so `pages/about.md` becomes `/about/index.html`.

use std::path::{Component, Path};

use dokkie_nav::INDEX_FILE;

/// Stems that turn a file into the index page of its directory.
const INDEX_STEMS: [&str; 2] = ["index", "readme"];

/// Output route of a content file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// URL path ending in `index.html`, e.g. `/work/index.html`.
    pub url: String,
    /// True if the file is the index page of its directory.
    pub is_parent_index: bool,
}

/// Output file path of a route, relative to the output directory.
#[must_use]
pub fn output_path(url: &str) -> &str {
    url.trim_start_matches('/')
}

/// Compute the route of `relative`, a path relative to the input directory.
#[must_use]
pub fn make_route(relative: &Path, strip: &[String]) -> Route {
    let mut dirs: Vec<String> = relative
        .parent()
        .into_iter()
        .flat_map(Path::components)
        .filter_map(|component| match component {
            Component::Normal(name) => Some(slugify(&name.to_string_lossy())),
            _ => None,
        })
        .filter(|slug| !slug.is_empty())
        .collect();

    let leading = dirs
        .iter()
        .take_while(|dir| strip.iter().any(|s| s.eq_ignore_ascii_case(dir)))
        .count();
    dirs.drain(..leading);

    let stem = relative
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    let is_parent_index = INDEX_STEMS.contains(&stem.as_str());
    if !is_parent_index {
        let slug = slugify(&stem);
        if !slug.is_empty() {
            dirs.push(slug);
        }
    }

    let mut url = String::from("/");
    for dir in &dirs {
        url.push_str(dir);
        url.push('/');
    }
    url.push_str(INDEX_FILE);

    Route {
        url,
        is_parent_index,
    }
}

/// Lowercase a path segment and replace runs of non-alphanumerics with `-`.
pub(crate) fn slugify(segment: &str) -> String {
    let mut slug = String::with_capacity(segment.len());
    for c in segment.chars() {
        if c.is_alphanumeric() || c == '_' {
            slug.extend(c.to_lowercase());
        } else if !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug.trim_matches('-').to_owned()
}
