//! Content item loading: front matter, conversion, title, date and route.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use dokkie_config::Settings;
use dokkie_nav::ContentItem;

use crate::builder::BuildError;
use crate::frontmatter::parse_frontmatter;
use crate::markdown::render_markdown;
use crate::route::make_route;

/// Load one content file into a [`ContentItem`].
///
/// The title comes from front matter, then the first H1 (markdown only),
/// then the file stem. The date comes from front matter, then the file
/// modification time.
pub(crate) fn load_item(path: &Path, settings: &Settings) -> Result<ContentItem, BuildError> {
    let io_error = |source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read_to_string(path).map_err(io_error)?;
    let (frontmatter, body) =
        parse_frontmatter(&content).map_err(|source| BuildError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?;

    let is_html = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html"));
    let (html, heading) = if is_html {
        (body.to_owned(), None)
    } else {
        let rendered = render_markdown(body);
        (rendered.html, rendered.title)
    };

    let title = frontmatter
        .title
        .clone()
        .filter(|t| !t.trim().is_empty())
        .or(heading)
        .unwrap_or_else(|| {
            path.file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        });

    let date = match frontmatter.parsed_date() {
        Ok(Some(date)) => Some(date),
        Ok(None) => modified(path),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Ignoring front matter date");
            modified(path)
        }
    };

    let relative = path.strip_prefix(&settings.input).unwrap_or(path);
    let route = make_route(relative, &settings.strip);

    Ok(ContentItem {
        title,
        route: route.url,
        source_path: path.to_path_buf(),
        date,
        meta: frontmatter.meta,
        is_parent_index: route.is_parent_index,
        html,
    })
}

fn modified(path: &Path) -> Option<DateTime<Utc>> {
    fs::metadata(path)
        .and_then(|meta| meta.modified())
        .ok()
        .map(DateTime::<Utc>::from)
}
