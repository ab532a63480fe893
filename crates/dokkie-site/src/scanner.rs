//! Content discovery by filesystem walking.

use std::fs;
use std::path::{Path, PathBuf};

/// Finds content files below the input directory.
pub(crate) struct Scanner<'a> {
    input: &'a Path,
    extensions: &'a [String],
    exclude_folders: &'a [String],
}

impl<'a> Scanner<'a> {
    /// Create a new Scanner.
    ///
    /// `extensions` are matched with their leading dot (e.g. `.md`).
    pub fn new(input: &'a Path, extensions: &'a [String], exclude_folders: &'a [String]) -> Self {
        Self {
            input,
            extensions,
            exclude_folders,
        }
    }

    /// Scan the input directory and return content file paths.
    ///
    /// Entries of each directory are visited in name order. Returns an empty
    /// Vec if the input directory doesn't exist.
    pub fn scan(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();
        if self.input.is_dir() {
            self.scan_directory(self.input, &mut files);
        }
        files
    }

    fn scan_directory(&self, dir: &Path, files: &mut Vec<PathBuf>) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %dir.display(), error = %e, "Failed to read directory");
                return;
            }
        };

        let mut entries: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| {
                let is_dir = e.file_type().is_ok_and(|t| t.is_dir());
                (e.file_name().to_string_lossy().into_owned(), e.path(), is_dir)
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (name, path, is_dir) in entries {
            if name.starts_with('.') {
                continue;
            }
            if is_dir {
                if !self.exclude_folders.contains(&name) {
                    self.scan_directory(&path, files);
                }
            } else if self.is_content(&name) {
                files.push(path);
            }
        }
    }

    fn is_content(&self, name: &str) -> bool {
        let lower = name.to_lowercase();
        self.extensions
            .iter()
            .any(|ext| lower.ends_with(&ext.to_lowercase()) && lower.len() > ext.len())
    }
}
