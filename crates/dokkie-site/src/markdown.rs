//! Markdown to HTML conversion.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

/// Result of converting a markdown document.
#[derive(Debug)]
pub struct RenderedMarkdown {
    /// Rendered HTML body.
    pub html: String,
    /// Text of the first level-one heading, if any.
    pub title: Option<String>,
}

/// Parser options: GitHub Flavored Markdown.
fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Render markdown text to HTML, capturing the first H1 as title.
#[must_use]
pub fn render_markdown(markdown: &str) -> RenderedMarkdown {
    let events: Vec<Event<'_>> = Parser::new_ext(markdown, parser_options()).collect();
    let title = first_h1(&events);

    let mut html = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html, events.into_iter());

    RenderedMarkdown { html, title }
}

fn first_h1(events: &[Event<'_>]) -> Option<String> {
    let start = events.iter().position(|event| {
        matches!(
            event,
            Event::Start(Tag::Heading {
                level: HeadingLevel::H1,
                ..
            })
        )
    })?;

    let mut title = String::new();
    for event in &events[start + 1..] {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(text) | Event::Code(text) => title.push_str(text),
            Event::SoftBreak | Event::HardBreak => title.push(' '),
            _ => {}
        }
    }

    let title = title.trim();
    (!title.is_empty()).then(|| title.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_captures_first_h1() {
        let rendered = render_markdown("Intro\n\n# Hello `World`\n\n# Second\n");

        assert_eq!(rendered.title.as_deref(), Some("Hello World"));
        assert!(rendered.html.contains("<h1>Hello <code>World</code></h1>"));
    }

    #[test]
    fn test_render_without_h1() {
        let rendered = render_markdown("## Only H2\n\nText");

        assert!(rendered.title.is_none());
        assert!(rendered.html.contains("<h2>Only H2</h2>"));
    }

    #[test]
    fn test_render_gfm_extensions() {
        let rendered = render_markdown("| a |\n|---|\n| b |\n\n~~gone~~\n\n- [x] done\n");

        assert!(rendered.html.contains("<table>"));
        assert!(rendered.html.contains("<del>gone</del>"));
        assert!(rendered.html.contains("type=\"checkbox\""));
    }
}
