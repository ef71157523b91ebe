//! File I/O seam for the runner

use std::path::Path;

use modfix_core::{Error, Result};

/// Reads and writes whole files
pub trait FileStore {
    fn read(&self, path: &Path) -> Result<String>;

    /// Replace the file's content (non-atomic)
    fn write(&self, path: &Path, content: &str) -> Result<()>;
}

/// The real file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FsStore;

impl FileStore for FsStore {
    fn read(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    fn write(&self, path: &Path, content: &str) -> Result<()> {
        std::fs::write(path, content).map_err(|source| Error::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.test.ts");

        FsStore.write(&path, "it('a', () => {});\n").unwrap();
        assert_eq!(FsStore.read(&path).unwrap(), "it('a', () => {});\n");
    }

    #[test]
    fn test_read_missing_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.test.ts");

        let err = FsStore.read(&path).unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert!(err.to_string().contains("missing.test.ts"));
    }
}
