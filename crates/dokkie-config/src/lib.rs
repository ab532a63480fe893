//! Configuration management for Dokkie.
//!
//! Parses `dokkie.toml` (or the JSON variant `dokkie.config.json`) with serde
//! and provides auto-discovery of config files in parent directories.
//!
//! Programmatic overrides can be applied during load via [`Overrides`].
//!
//! ## Type Defaults
//!
//! Some settings default differently per [`ProjectType`] when they are not
//! set explicitly (in the file or through overrides):
//!
//! - `blog`: `flat_navigation = true`, `show_navigation = [overview]`

mod navigation;

use serde::Deserialize;
use std::path::{Path, PathBuf};

pub use navigation::{
    DEFAULT_MENUS, MenuDisplay, NavigationEntry, OVERVIEW_MENU, ProjectType,
    SKIP_CONTENT_NAVIGATION, one_or_many,
};

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
/// An overridden value counts as explicitly set, so type defaults do not
/// replace it.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override project type.
    pub project_type: Option<ProjectType>,
    /// Override input directory.
    pub input: Option<PathBuf>,
    /// Override output directory.
    pub output: Option<PathBuf>,
    /// Override flat navigation flag.
    pub flat_navigation: Option<bool>,
    /// Override show home flag.
    pub show_home: Option<bool>,
    /// Override clean-before-build flag.
    pub clean_before: Option<bool>,
}

/// Configuration filenames to search for, in order of preference.
const CONFIG_FILENAMES: [&str; 2] = ["dokkie.toml", "dokkie.config.json"];

/// Settings as parsed from a config file, before defaults are resolved.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SettingsRaw {
    #[serde(rename = "type")]
    project_type: Option<ProjectType>,
    input: Option<String>,
    output: Option<String>,
    extensions: Option<Vec<String>>,
    #[serde(alias = "excludeFolders")]
    exclude_folders: Option<Vec<String>>,
    strip: Option<Vec<String>>,
    copy: Option<Vec<String>>,
    #[serde(alias = "cleanBefore")]
    clean_before: Option<bool>,
    #[serde(alias = "projectTitle")]
    project_title: Option<String>,
    language: Option<String>,
    #[serde(alias = "flatNavigation")]
    flat_navigation: Option<bool>,
    #[serde(alias = "showHome")]
    show_home: Option<bool>,
    #[serde(alias = "showNavigation")]
    show_navigation: Option<Vec<MenuDisplay>>,
    skip: Option<Vec<String>>,
    #[serde(alias = "extendNavigation")]
    extend_navigation: Option<Vec<NavigationEntry>>,
    #[serde(alias = "overruleNavigation")]
    overrule_navigation: Option<Vec<NavigationEntry>>,
}

impl SettingsRaw {
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(project_type) = overrides.project_type {
            self.project_type = Some(project_type);
        }
        if let Some(input) = &overrides.input {
            self.input = Some(input.to_string_lossy().into_owned());
        }
        if let Some(output) = &overrides.output {
            self.output = Some(output.to_string_lossy().into_owned());
        }
        if let Some(flat) = overrides.flat_navigation {
            self.flat_navigation = Some(flat);
        }
        if let Some(show_home) = overrides.show_home {
            self.show_home = Some(show_home);
        }
        if let Some(clean_before) = overrides.clean_before {
            self.clean_before = Some(clean_before);
        }
    }
}

/// Resolved build settings.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Kind of project.
    pub project_type: ProjectType,
    /// Content source directory.
    pub input: PathBuf,
    /// Output directory for the generated site.
    pub output: PathBuf,
    /// File extensions treated as content (with leading dot).
    pub extensions: Vec<String>,
    /// Directory names never descended into.
    pub exclude_folders: Vec<String>,
    /// Leading directory names removed from output routes.
    pub strip: Vec<String>,
    /// Folders copied verbatim into the output.
    pub copy: Vec<PathBuf>,
    /// Whether the output directory is removed before building.
    pub clean_before: bool,
    /// Project title shown in page titles.
    pub project_title: String,
    /// Document language (`<html lang>`).
    pub language: String,
    /// Whether navigation is a flat list instead of a tree.
    pub flat_navigation: bool,
    /// Whether the home page (`/`) appears in navigation.
    pub show_home: bool,
    /// Configured menus, in render order.
    pub show_navigation: Vec<MenuDisplay>,
    /// Feature-disable tokens (e.g. `content-navigation`).
    pub skip: Vec<String>,
    /// Entries appended to navigation.
    pub extend_navigation: Vec<NavigationEntry>,
    /// Entries replacing the menus they name.
    pub overrule_navigation: Vec<NavigationEntry>,
    /// Path to the config file (set after loading).
    pub config_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// JSON parsing error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|&s| s.to_owned()).collect()
}

impl Settings {
    /// Load settings from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `dokkie.toml` or `dokkie.config.json` in the
    /// current directory and its parents, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails
    /// or the resolved settings are invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().unwrap_or_default();
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => Self::discover_config(&cwd),
        };

        let (mut raw, base) = match &discovered {
            Some(path) => {
                let base = path.parent().unwrap_or(Path::new(".")).to_path_buf();
                (Self::read_raw(path)?, base)
            }
            None => (SettingsRaw::default(), cwd),
        };

        if let Some(overrides) = overrides {
            raw.apply_overrides(overrides);
        }

        let mut settings = Self::resolve(raw, &base);
        settings.config_path = discovered;
        settings.validate()?;

        tracing::debug!(
            project_type = settings.project_type.as_str(),
            input = %settings.input.display(),
            output = %settings.output.display(),
            "Settings loaded"
        );

        Ok(settings)
    }

    /// Parse settings from TOML text, resolving paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_toml_str(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let raw: SettingsRaw = toml::from_str(content)?;
        let settings = Self::resolve(raw, base);
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from JSON text, resolving paths against `base`.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_json_str(content: &str, base: &Path) -> Result<Self, ConfigError> {
        let raw: SettingsRaw = serde_json::from_str(content)?;
        let settings = Self::resolve(raw, base);
        settings.validate()?;
        Ok(settings)
    }

    /// Look up the display descriptor of a configured menu.
    #[must_use]
    pub fn menu(&self, name: &str) -> Option<&MenuDisplay> {
        self.show_navigation.iter().find(|menu| menu.name == name)
    }

    /// Menus an item is placed in when it does not name any.
    ///
    /// The built-in `header`, `footer` and `sidebar`, followed by any other
    /// configured menu names.
    #[must_use]
    pub fn default_menus(&self) -> Vec<String> {
        let mut menus = strings(&DEFAULT_MENUS);
        for menu in &self.show_navigation {
            if !menus.contains(&menu.name) {
                menus.push(menu.name.clone());
            }
        }
        menus
    }

    /// Whether a feature has been disabled through `skip`.
    #[must_use]
    pub fn is_skipped(&self, token: &str) -> bool {
        self.skip.iter().any(|s| s == token)
    }

    /// Validate settings values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must contain at least one entry".to_owned(),
            ));
        }
        self.validate_menus()?;
        for entry in &self.extend_navigation {
            validate_entry(entry, "extend_navigation")?;
        }
        for entry in &self.overrule_navigation {
            validate_entry(entry, "overrule_navigation")?;
        }
        Ok(())
    }

    fn validate_menus(&self) -> Result<(), ConfigError> {
        let mut seen: Vec<&str> = Vec::with_capacity(self.show_navigation.len());
        for menu in &self.show_navigation {
            require_non_empty(&menu.name, "show_navigation.name")?;
            if seen.contains(&menu.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "show_navigation contains duplicate menu '{}'",
                    menu.name
                )));
            }
            seen.push(&menu.name);
        }
        Ok(())
    }

    /// Search for a config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            for name in CONFIG_FILENAMES {
                let candidate = current.join(name);
                if candidate.exists() {
                    return Some(candidate);
                }
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Read a config file, choosing the parser by extension.
    fn read_raw(path: &Path) -> Result<SettingsRaw, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Create default settings with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self::resolve(SettingsRaw::default(), base)
    }

    /// Resolve unset fields to defaults and relative paths against `base`.
    fn resolve(raw: SettingsRaw, base: &Path) -> Self {
        let project_type = raw.project_type.unwrap_or_default();
        let is_blog = project_type == ProjectType::Blog;

        let show_navigation = raw.show_navigation.unwrap_or_else(|| {
            if is_blog {
                vec![MenuDisplay::visible(OVERVIEW_MENU)]
            } else {
                vec![MenuDisplay::visible("header"), MenuDisplay::visible("footer")]
            }
        });

        Self {
            project_type,
            input: base.join(raw.input.as_deref().unwrap_or(".")),
            output: base.join(raw.output.as_deref().unwrap_or("dokkie")),
            extensions: raw.extensions.unwrap_or_else(|| strings(&[".md"])),
            exclude_folders: raw
                .exclude_folders
                .unwrap_or_else(|| strings(&["node_modules", "dist", "public"])),
            strip: raw.strip.unwrap_or_else(|| strings(&["pages"])),
            copy: raw
                .copy
                .unwrap_or_default()
                .iter()
                .map(|folder| base.join(folder))
                .collect(),
            clean_before: raw.clean_before.unwrap_or(true),
            project_title: raw.project_title.unwrap_or_default(),
            language: raw.language.unwrap_or_else(|| "en".to_owned()),
            flat_navigation: raw.flat_navigation.unwrap_or(is_blog),
            show_home: raw.show_home.unwrap_or(false),
            show_navigation,
            skip: raw.skip.unwrap_or_default(),
            extend_navigation: raw.extend_navigation.unwrap_or_default(),
            overrule_navigation: raw.overrule_navigation.unwrap_or_default(),
            config_path: None,
        }
    }
}

fn validate_entry(entry: &NavigationEntry, field: &str) -> Result<(), ConfigError> {
    require_non_empty(&entry.name, &format!("{field}.name"))?;
    require_non_empty(&entry.link, &format!("{field}.link"))?;
    Ok(())
}
