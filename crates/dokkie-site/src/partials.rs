//! Partial files merged into their directory's index page.
//!
//! A file whose name starts with `_` is a partial: its HTML is appended to
//! the index page of its directory instead of becoming a page of its own.
//! A directory whose name starts with `_` is a section: its index page
//! becomes the section header, every other file in it an article, and the
//! rendered section is appended to the index page of the enclosing
//! directory. Fragments are appended in scan order.

use std::fmt::Write;
use std::path::{Path, PathBuf};

use dokkie_nav::ContentItem;

use crate::route::slugify;

const PARTIAL_PREFIX: char = '_';

#[derive(Debug, PartialEq, Eq)]
enum Role {
    Page,
    Partial { host: PathBuf },
    Section { host: PathBuf, section: PathBuf },
}

#[derive(Debug, Default)]
struct Section {
    name: String,
    header: String,
    articles: Vec<String>,
}

enum Fragment {
    Html(String),
    Section(usize),
}

/// Fold partials and sections into their host index pages.
///
/// Returns the remaining pages in their original order. Fragments without
/// an index page to join are logged and dropped.
pub(crate) fn merge_partials(items: Vec<ContentItem>, input: &Path) -> Vec<ContentItem> {
    let mut pages = Vec::with_capacity(items.len());
    let mut fragments: Vec<(PathBuf, Fragment)> = Vec::new();
    let mut sections: Vec<(PathBuf, Section)> = Vec::new();

    for item in items {
        let relative = relative_to(&item, input);
        match classify(relative) {
            Role::Page => pages.push(item),
            Role::Partial { host } => fragments.push((host, Fragment::Html(item.html))),
            Role::Section { host, section } => {
                let is_header =
                    item.is_parent_index && relative.parent() == Some(section.as_path());
                let existing = sections.iter().position(|(path, _)| *path == section);
                let idx = if let Some(idx) = existing {
                    idx
                } else {
                    fragments.push((host, Fragment::Section(sections.len())));
                    let name = section
                        .file_name()
                        .map(|n| slugify(n.to_string_lossy().trim_start_matches(PARTIAL_PREFIX)))
                        .unwrap_or_default();
                    sections.push((
                        section,
                        Section {
                            name,
                            ..Section::default()
                        },
                    ));
                    sections.len() - 1
                };
                if is_header {
                    sections[idx].1.header = item.html;
                } else {
                    sections[idx].1.articles.push(item.html);
                }
            }
        }
    }

    for (host, fragment) in fragments {
        let html = match fragment {
            Fragment::Html(html) => html,
            Fragment::Section(idx) => render_section(&sections[idx].1),
        };
        let target = pages.iter_mut().find(|page| {
            page.is_parent_index && relative_to(page, input).parent() == Some(host.as_path())
        });
        match target {
            Some(page) => {
                page.html.push('\n');
                page.html.push_str(&html);
            }
            None => {
                tracing::warn!(dir = %host.display(), "No index page for partial, skipped");
            }
        }
    }

    pages
}

fn relative_to<'a>(item: &'a ContentItem, input: &Path) -> &'a Path {
    item.source_path
        .strip_prefix(input)
        .unwrap_or(&item.source_path)
}

fn classify(relative: &Path) -> Role {
    let mut host = PathBuf::new();
    for component in relative.parent().into_iter().flat_map(Path::components) {
        let name = component.as_os_str();
        if name.to_string_lossy().starts_with(PARTIAL_PREFIX) {
            return Role::Section {
                section: host.join(name),
                host,
            };
        }
        host.push(name);
    }

    let is_partial = relative
        .file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with(PARTIAL_PREFIX));
    if is_partial {
        Role::Partial { host }
    } else {
        Role::Page
    }
}

fn render_section(section: &Section) -> String {
    let mut html = String::with_capacity(
        section.header.len() + section.articles.iter().map(String::len).sum::<usize>() + 256,
    );
    let _ = writeln!(html, "<section class=\"section section--{}\">", section.name);
    html.push_str(&section.header);
    html.push_str("<div class=\"section__container\">\n");
    for article in &section.articles {
        html.push_str("<article class=\"section__article\">\n");
        html.push_str(article);
        html.push_str("</article>\n");
    }
    html.push_str("</div>\n</section>\n");
    html
}
