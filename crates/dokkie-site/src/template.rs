//! Built-in HTML page template.

use std::fmt::Write;

use dokkie_nav::{ContentNavigation, Menu, NavItem};

/// All data needed to render a page.
pub struct PageData<'a> {
    pub title: &'a str,
    pub project_title: &'a str,
    pub language: &'a str,
    /// Navigation link of the page, e.g. `/work/`.
    pub current_link: &'a str,
    pub html_content: &'a str,
    pub menus: &'a [Menu],
    pub content_navigation: &'a ContentNavigation,
}

/// Render a complete HTML page.
pub fn render_page(page: &PageData<'_>) -> String {
    let mut html = String::with_capacity(4096 + page.html_content.len());

    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>",
        escape(page.language)
    );
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(
        html,
        "<title>{}</title>",
        escape(&document_title(page.title, page.project_title))
    );
    html.push_str("</head>\n");
    let _ = writeln!(html, "<body id=\"{}\">", escape(&current_id(page.current_link)));

    for menu in page.menus {
        render_menu(&mut html, menu, page.current_link);
    }

    html.push_str("<main>\n<article>\n");
    html.push_str(page.html_content);
    html.push_str("\n</article>\n");
    render_content_navigation(&mut html, page.content_navigation);
    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// `<title>` text: page title followed by the project title, when set.
fn document_title(title: &str, project_title: &str) -> String {
    match (title.is_empty(), project_title.is_empty()) {
        (_, true) => title.to_owned(),
        (true, false) => project_title.to_owned(),
        (false, false) => format!("{title} | {project_title}"),
    }
}

/// Body id derived from the page link: `/work/item1/` becomes `work-item1`.
///
/// The home page gets `home`.
pub fn current_id(link: &str) -> String {
    let id = link
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("-");
    if id.is_empty() { "home".to_owned() } else { id }
}

fn render_menu(html: &mut String, menu: &Menu, current_link: &str) {
    let _ = writeln!(
        html,
        "<nav class=\"navigation navigation--{} {}\">",
        escape(&menu.name),
        escape(&menu.show_class)
    );
    html.push_str("<ul>\n");
    render_nav_items(html, &menu.menu, current_link);
    html.push_str("</ul>\n</nav>\n");
}

fn render_nav_items(html: &mut String, items: &[NavItem], current_link: &str) {
    for item in items {
        let class = if item.link == current_link {
            " class=\"active\""
        } else {
            ""
        };
        let _ = write!(
            html,
            "<li><a href=\"{}\"{class}>{}</a>",
            escape(&item.link),
            escape(&item.name)
        );
        if !item.children.is_empty() {
            html.push_str("\n<ul>\n");
            render_nav_items(html, &item.children, current_link);
            html.push_str("</ul>\n");
        }
        html.push_str("</li>\n");
    }
}

fn render_content_navigation(html: &mut String, nav: &ContentNavigation) {
    if nav.prev.is_none() && nav.next.is_none() {
        return;
    }
    html.push_str("<nav class=\"content-navigation\">\n");
    if let Some(prev) = &nav.prev {
        let _ = writeln!(
            html,
            "<a class=\"content-navigation__prev\" href=\"{}\">{}</a>",
            escape(&prev.link),
            escape(&prev.name)
        );
    }
    if let Some(next) = &nav.next {
        let _ = writeln!(
            html,
            "<a class=\"content-navigation__next\" href=\"{}\">{}</a>",
            escape(&next.link),
            escape(&next.name)
        );
    }
    html.push_str("</nav>\n");
}

fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use dokkie_nav::SiblingLink;

    fn nav_item(name: &str, link: &str, children: Vec<NavItem>) -> NavItem {
        NavItem {
            name: name.to_owned(),
            link: link.to_owned(),
            self_key: String::new(),
            date: None,
            children,
        }
    }

    fn menu(name: &str, show_class: &str, items: Vec<NavItem>) -> Menu {
        Menu {
            name: name.to_owned(),
            mobile: true,
            desktop: true,
            show_class: show_class.to_owned(),
            menu: items,
        }
    }

    fn render(menus: &[Menu], nav: &ContentNavigation) -> String {
        render_page(&PageData {
            title: "Item <1>",
            project_title: "Docs",
            language: "nl",
            current_link: "/work/item1/",
            html_content: "<p>Body</p>",
            menus,
            content_navigation: nav,
        })
    }

    #[test]
    fn test_render_page_contains_content_and_head() {
        let html = render(&[], &ContentNavigation::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<html lang=\"nl\">"));
        assert!(html.contains("<title>Item &lt;1&gt; | Docs</title>"));
        assert!(html.contains("<body id=\"work-item1\">"));
        assert!(html.contains("<p>Body</p>"));
        assert!(!html.contains("content-navigation"));
    }

    #[test]
    fn test_render_menus_with_show_class_and_active_item() {
        let menus = vec![
            menu(
                "header",
                "hide-mobile show-desktop",
                vec![nav_item(
                    "Work",
                    "/work/",
                    vec![nav_item("Item 1", "/work/item1/", vec![])],
                )],
            ),
            menu("footer", "show-desktop", vec![]),
        ];

        let html = render(&menus, &ContentNavigation::default());

        assert!(html.contains("<nav class=\"navigation navigation--header hide-mobile show-desktop\">"));
        assert!(html.contains("<nav class=\"navigation navigation--footer show-desktop\">"));
        assert!(html.contains("<li><a href=\"/work/\">Work</a>\n<ul>"));
        assert!(html.contains("<a href=\"/work/item1/\" class=\"active\">Item 1</a>"));
    }

    #[test]
    fn test_render_prev_next_links() {
        let nav = ContentNavigation {
            prev: Some(SiblingLink {
                name: "Z".to_owned(),
                link: "/work/z/index.html".to_owned(),
            }),
            next: None,
        };

        let html = render(&[], &nav);

        assert!(html.contains(
            "<a class=\"content-navigation__prev\" href=\"/work/z/index.html\">Z</a>"
        ));
        assert!(!html.contains("content-navigation__next"));
    }

    #[test]
    fn test_current_id() {
        assert_eq!(current_id("/work/item1/"), "work-item1");
        assert_eq!(current_id("/"), "home");
    }

    #[test]
    fn test_document_title() {
        assert_eq!(document_title("Page", ""), "Page");
        assert_eq!(document_title("", "Docs"), "Docs");
        assert_eq!(document_title("Page", "Docs"), "Page | Docs");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("a&b"), "a&amp;b");
        assert_eq!(escape("\"hello\""), "&quot;hello&quot;");
    }
}
