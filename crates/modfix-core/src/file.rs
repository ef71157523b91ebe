use std::path::{Path, PathBuf};

/// A file being processed in one run.
///
/// Holds the text as read from disk and the current in-memory text. It is
/// written back at most once, and only when the two differ.
#[derive(Debug, Clone)]
pub struct SourceFile {
    path: PathBuf,
    original: String,
    current: String,
}

impl SourceFile {
    pub fn new(path: impl Into<PathBuf>, content: String) -> Self {
        Self {
            path: path.into(),
            current: content.clone(),
            original: content,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Display name used in log lines (file name only)
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    pub fn set_current(&mut self, text: String) {
        self.current = text;
    }

    /// Exact comparison against the text read from disk
    pub fn is_changed(&self) -> bool {
        self.current != self.original
    }
}
