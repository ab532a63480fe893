//! Front matter parsing for content files.

use chrono::{DateTime, NaiveDate, Utc};
use dokkie_nav::ItemMeta;
use serde::Deserialize;

const DELIMITER: &str = "---";

/// Metadata block at the top of a content file.
#[derive(Debug, Default, Deserialize)]
pub struct FrontMatter {
    /// Page title.
    #[serde(default)]
    pub title: Option<String>,
    /// Publication date, RFC 3339 or `YYYY-MM-DD`.
    #[serde(default)]
    pub date: Option<String>,
    /// Navigation metadata and remaining keys.
    #[serde(flatten)]
    pub meta: ItemMeta,
}

/// Front matter error.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Invalid date '{0}': expected RFC 3339 or YYYY-MM-DD")]
    InvalidDate(String),
}

impl FrontMatter {
    /// Parsed publication date, if one is set.
    ///
    /// # Errors
    ///
    /// Returns `FrontmatterError::InvalidDate` if the date is malformed.
    pub fn parsed_date(&self) -> Result<Option<DateTime<Utc>>, FrontmatterError> {
        self.date.as_deref().map(parse_date).transpose()
    }
}

/// Split content into the YAML block and the body.
///
/// Returns `None` when the content does not open with a `---` line or the
/// block is never closed.
pub fn split_frontmatter(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix('\u{feff}').unwrap_or(content);
    let rest = rest.strip_prefix(DELIMITER)?;
    let rest = rest
        .strip_prefix("\r\n")
        .or_else(|| rest.strip_prefix('\n'))?;

    if let Some(body) = rest.strip_prefix(DELIMITER) {
        return Some(("", body.trim_start_matches(['\r', '\n'])));
    }

    let close = rest.find(&format!("\n{DELIMITER}"))?;
    let yaml = &rest[..close];
    let body = &rest[close + 1 + DELIMITER.len()..];
    Some((yaml, body.trim_start_matches(['\r', '\n'])))
}

/// Parse the front matter of `content`.
///
/// Content without front matter yields defaults and the full content as
/// body.
///
/// # Errors
///
/// Returns `FrontmatterError::Yaml` if the block is not valid YAML.
pub fn parse_frontmatter(content: &str) -> Result<(FrontMatter, &str), FrontmatterError> {
    let Some((yaml, body)) = split_frontmatter(content) else {
        return Ok((FrontMatter::default(), content));
    };
    if yaml.trim().is_empty() {
        return Ok((FrontMatter::default(), body));
    }
    Ok((serde_yaml::from_str(yaml)?, body))
}

/// Parse an RFC 3339 timestamp or a plain `YYYY-MM-DD` date (midnight UTC).
///
/// # Errors
///
/// Returns `FrontmatterError::InvalidDate` if neither format matches.
pub fn parse_date(value: &str) -> Result<DateTime<Utc>, FrontmatterError> {
    let value = value.trim();
    if let Ok(datetime) = DateTime::parse_from_rfc3339(value) {
        return Ok(datetime.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|datetime| datetime.and_utc())
        .ok_or_else(|| FrontmatterError::InvalidDate(value.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_split_without_frontmatter() {
        assert!(split_frontmatter("# Title\n").is_none());
        assert!(split_frontmatter("---\ntitle: open").is_none());
    }

    #[test]
    fn test_split_frontmatter() {
        let (yaml, body) = split_frontmatter("---\ntitle: Hello\n---\n# Body\n").unwrap();

        assert_eq!(yaml, "title: Hello");
        assert_eq!(body, "# Body\n");
    }

    #[test]
    fn test_split_empty_block() {
        let (yaml, body) = split_frontmatter("---\n---\nBody").unwrap();

        assert_eq!(yaml, "");
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_parse_navigation_keys() {
        let content = "---\ntitle: Work\nparent: about\nhide: true\nmenu: [header, footer]\nlayout: wide\n---\nText";

        let (fm, body) = parse_frontmatter(content).unwrap();

        assert_eq!(fm.title.as_deref(), Some("Work"));
        assert_eq!(fm.meta.parent.as_deref(), Some("about"));
        assert!(fm.meta.hide);
        assert_eq!(
            fm.meta.menu,
            Some(vec!["header".to_owned(), "footer".to_owned()])
        );
        assert!(fm.meta.extra.contains_key("layout"));
        assert!(!fm.meta.extra.contains_key("title"));
        assert_eq!(body, "Text");
    }

    #[test]
    fn test_parse_without_frontmatter_keeps_content() {
        let (fm, body) = parse_frontmatter("# Plain\n").unwrap();

        assert!(fm.title.is_none());
        assert_eq!(body, "# Plain\n");
    }

    #[test]
    fn test_parse_invalid_yaml_is_error() {
        let result = parse_frontmatter("---\ntitle: [unclosed\n---\nBody");

        assert!(matches!(result, Err(FrontmatterError::Yaml(_))));
    }

    #[test]
    fn test_parse_date_formats() {
        assert_eq!(
            parse_date("2024-06-01").unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            parse_date("2024-06-01T12:30:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 1, 10, 30, 0).unwrap()
        );
        assert!(matches!(
            parse_date("June 1st"),
            Err(FrontmatterError::InvalidDate(_))
        ));
    }

    #[test]
    fn test_parsed_date_absent() {
        assert_eq!(FrontMatter::default().parsed_date().unwrap(), None);
    }
}
