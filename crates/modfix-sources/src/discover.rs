//! Target file discovery

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use modfix_core::{Error, Result};
use tracing::debug;

use crate::exclude::ExcludeList;

/// Where the runner looks and which files it accepts
#[derive(Debug, Clone)]
pub struct Target {
    pub dir: PathBuf,
    /// Accepted suffixes without the leading dot, e.g. `test.ts`
    pub extensions: Vec<String>,
    pub recursive: bool,
    pub exclude: ExcludeList,
}

impl Target {
    pub fn new(dir: impl Into<PathBuf>, extensions: Vec<String>) -> Self {
        Self {
            dir: dir.into(),
            extensions,
            recursive: false,
            exclude: ExcludeList::default(),
        }
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_exclude(mut self, exclude: ExcludeList) -> Self {
        self.exclude = exclude;
        self
    }

    /// Check a candidate file against the extension filter and excludes
    pub fn accepts(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        let matches_ext = self
            .extensions
            .iter()
            .any(|ext| name.len() > ext.len() + 1 && name.ends_with(&format!(".{}", ext)));
        if !matches_ext {
            return false;
        }

        let relative = self.relative(path);
        if let Some(pattern) = self.exclude.matching_pattern(&relative) {
            debug!("skipping {} (excluded by {})", relative, pattern);
            return false;
        }
        true
    }

    /// Path relative to the target dir, with `/` separators
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.dir)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// List matching files, sorted by path
pub fn discover(target: &Target) -> Result<Vec<PathBuf>> {
    if !target.dir.is_dir() {
        return Err(Error::TargetNotFound(target.dir.clone()));
    }

    let mut files = Vec::new();

    if target.recursive {
        // Respect .gitignore, skip hidden entries
        let walker = WalkBuilder::new(&target.dir)
            .hidden(true)
            .git_ignore(true)
            .build();

        for entry in walker {
            let entry = entry.map_err(|e| Error::Other(e.into()))?;
            let path = entry.path();
            if entry.file_type().is_some_and(|t| t.is_file()) && target.accepts(path) {
                files.push(path.to_path_buf());
            }
        }
    } else {
        // Non-recursive: only immediate children
        for entry in std::fs::read_dir(&target.dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file() && target.accepts(&path) {
                files.push(path);
            }
        }
    }

    // Sort for determinism
    files.sort();

    debug!("discovered {} file(s) in {}", files.len(), target.dir.display());
    Ok(files)
}
