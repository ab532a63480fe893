//! Static site builder.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use dokkie_config::{ConfigError, Overrides, Settings};
use dokkie_nav::{ContentItem, ContentNavigation, NavigationTree, SiblingNavigator};

use crate::frontmatter::FrontmatterError;
use crate::loader::load_item;
use crate::partials::merge_partials;
use crate::route::output_path;
use crate::scanner::Scanner;
use crate::template::{PageData, render_page};

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Input directory not found: {}", .0.display())]
    InputNotFound(PathBuf),
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Front matter error in {}: {source}", path.display())]
    Frontmatter {
        path: PathBuf,
        #[source]
        source: FrontmatterError,
    },
}

/// Outcome of a build.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BuildReport {
    /// Pages rendered and written.
    pub pages_written: usize,
    /// Pages skipped because loading or writing failed.
    pub pages_failed: usize,
}

/// Builds a static site from the input directory.
pub struct StaticSiteBuilder {
    settings: Settings,
}

impl StaticSiteBuilder {
    /// Create a builder for resolved settings.
    #[must_use]
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Load settings (see [`Settings::load`]) and create a builder.
    ///
    /// # Errors
    ///
    /// Returns `BuildError::Config` if the settings cannot be loaded.
    pub fn from_config(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, BuildError> {
        Ok(Self::new(Settings::load(config_path, overrides)?))
    }

    /// Resolved settings of this builder.
    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Build the site.
    ///
    /// Pages that fail to load or write are logged and counted in
    /// [`BuildReport::pages_failed`]; they do not abort the build.
    ///
    /// # Errors
    ///
    /// Returns error if the input directory is missing or the output
    /// directory cannot be prepared.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let settings = &self.settings;
        if !settings.input.is_dir() {
            return Err(BuildError::InputNotFound(settings.input.clone()));
        }
        self.prepare_output()?;

        let mut report = BuildReport::default();
        let items = self.load_items(&mut report);

        let tree = NavigationTree::build(&items, settings);
        let menus = tree.menus(settings);
        let siblings = SiblingNavigator::new(&items, settings);

        for item in &items {
            let content_navigation = siblings.pair(item).unwrap_or_else(|e| {
                tracing::warn!(route = %item.route, error = %e, "No content navigation");
                ContentNavigation::default()
            });

            let html = render_page(&PageData {
                title: &item.title,
                project_title: &settings.project_title,
                language: &settings.language,
                current_link: item.link(),
                html_content: &item.html,
                menus: &menus,
                content_navigation: &content_navigation,
            });

            match self.write_page(item, &html) {
                Ok(()) => report.pages_written += 1,
                Err(e) => {
                    tracing::warn!(route = %item.route, error = %e, "Failed to write page");
                    report.pages_failed += 1;
                }
            }
        }

        self.copy_folders();

        tracing::info!(
            written = report.pages_written,
            failed = report.pages_failed,
            output = %settings.output.display(),
            "Site built"
        );
        Ok(report)
    }

    fn prepare_output(&self) -> Result<(), BuildError> {
        let output = &self.settings.output;
        let io_error = |source| BuildError::Io {
            path: output.clone(),
            source,
        };

        if self.settings.clean_before && output.exists() {
            tracing::debug!(path = %output.display(), "Cleaning output directory");
            fs::remove_dir_all(output).map_err(io_error)?;
        }
        fs::create_dir_all(output).map_err(io_error)
    }

    fn load_items(&self, report: &mut BuildReport) -> Vec<ContentItem> {
        let settings = &self.settings;
        let files = Scanner::new(
            &settings.input,
            &settings.extensions,
            &settings.exclude_folders,
        )
        .scan();

        let mut items = Vec::with_capacity(files.len());
        for path in files {
            if path.starts_with(&settings.output) {
                continue;
            }
            match load_item(&path, settings) {
                Ok(item) => items.push(item),
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load page");
                    report.pages_failed += 1;
                }
            }
        }

        let mut items = merge_partials(items, &settings.input);

        let mut routes = HashSet::new();
        items.retain(|item| {
            let first = routes.insert(item.route.clone());
            if !first {
                tracing::warn!(
                    path = %item.source_path.display(),
                    route = %item.route,
                    "Duplicate route, page skipped"
                );
                report.pages_failed += 1;
            }
            first
        });
        items
    }

    fn write_page(&self, item: &ContentItem, html: &str) -> Result<(), BuildError> {
        let target = self.settings.output.join(output_path(&item.route));
        let io_error = |source| BuildError::Io {
            path: target.clone(),
            source,
        };

        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(io_error)?;
        }
        fs::write(&target, html).map_err(io_error)
    }

    fn copy_folders(&self) {
        for folder in &self.settings.copy {
            let Some(name) = folder.file_name() else {
                continue;
            };
            if !folder.is_dir() {
                tracing::warn!(path = %folder.display(), "Copy folder not found");
                continue;
            }
            let target = self.settings.output.join(name);
            if let Err(e) = copy_dir(folder, &target) {
                tracing::warn!(path = %folder.display(), error = %e, "Failed to copy folder");
            }
        }
    }
}

fn copy_dir(from: &Path, to: &Path) -> std::io::Result<()> {
    fs::create_dir_all(to)?;
    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let target = to.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}
