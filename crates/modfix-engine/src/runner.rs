use std::path::Path;

use modfix_config::ProjectConfig;
use modfix_core::{FileOutcome, Pipeline, Result, RunReport, SourceFile};
use modfix_sources::{ExcludeList, FileStore, FsStore, Target, discover};
use tracing::{debug, info};

/// Build the discovery target described by a project config
pub fn target_from_config(config: &ProjectConfig, project_root: &Path) -> Result<Target> {
    let exclude = ExcludeList::new(&config.target.exclude)?;
    Ok(
        Target::new(config.target_dir(project_root), config.target.extensions.clone())
            .with_recursive(config.target.recursive)
            .with_exclude(exclude),
    )
}

/// Applies a pipeline to every matching file, one file at a time
pub struct Runner<S = FsStore> {
    target: Target,
    pipeline: Pipeline,
    store: S,
}

impl Runner<FsStore> {
    pub fn new(target: Target, pipeline: Pipeline) -> Self {
        Self::with_store(target, pipeline, FsStore)
    }
}

impl<S: FileStore> Runner<S> {
    pub fn with_store(target: Target, pipeline: Pipeline, store: S) -> Self {
        Self {
            target,
            pipeline,
            store,
        }
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Rewrite changed files in place
    pub fn run(&self) -> Result<RunReport> {
        self.execute(false)
    }

    /// Same pass without writing anything
    pub fn check(&self) -> Result<RunReport> {
        self.execute(true)
    }

    fn execute(&self, dry_run: bool) -> Result<RunReport> {
        let files = discover(&self.target)?;
        info!(
            "processing {} file(s) in {}{}",
            files.len(),
            self.target.dir.display(),
            if dry_run { " (dry run)" } else { "" }
        );

        let mut report = RunReport::new(dry_run);
        for path in files {
            // I/O failures abort the whole run
            report.push(self.process(&path, dry_run)?);
        }

        info!(
            "{} of {} file(s) {}",
            report.changed_count(),
            report.total(),
            if dry_run { "need fixing" } else { "fixed" }
        );
        Ok(report)
    }

    /// Read, transform and (unless `dry_run`) write back one file
    pub fn process(&self, path: &Path, dry_run: bool) -> Result<FileOutcome> {
        let mut file = SourceFile::new(path, self.store.read(path)?);

        let (text, applied) = self.pipeline.apply(file.current());
        file.set_current(text);

        if file.is_changed() {
            if !dry_run {
                self.store.write(file.path(), file.current())?;
            }
            debug!("{} changed by {}", file.name(), applied.join(", "));
        } else {
            debug!("{} unchanged", file.name());
        }

        Ok(FileOutcome::from_file(&file, applied))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use modfix_core::{Error, Rule};
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::path::PathBuf;

    /// In-memory store that records writes
    #[derive(Default)]
    struct MemoryStore {
        files: RefCell<HashMap<PathBuf, String>>,
        writes: RefCell<Vec<PathBuf>>,
        fail_writes: bool,
    }

    impl FileStore for MemoryStore {
        fn read(&self, path: &Path) -> Result<String> {
            self.files
                .borrow()
                .get(path)
                .cloned()
                .ok_or_else(|| Error::Read {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::NotFound),
                })
        }

        fn write(&self, path: &Path, content: &str) -> Result<()> {
            if self.fail_writes {
                return Err(Error::Write {
                    path: path.to_path_buf(),
                    source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
                });
            }
            self.writes.borrow_mut().push(path.to_path_buf());
            self.files
                .borrow_mut()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }
    }

    struct Semicolon;

    impl Rule for Semicolon {
        fn name(&self) -> &'static str {
            "semicolon"
        }
        fn description(&self) -> &'static str {
            "ensure trailing semicolon"
        }
        fn apply(&self, text: &str) -> String {
            if text.ends_with(';') {
                text.to_string()
            } else {
                format!("{};", text)
            }
        }
    }

    fn runner(store: MemoryStore) -> Runner<MemoryStore> {
        let target = Target::new("/unused", vec!["test.ts".to_string()]);
        Runner::with_store(target, Pipeline::new(vec![Box::new(Semicolon)]), store)
    }

    fn store_with(path: &str, content: &str) -> MemoryStore {
        let store = MemoryStore::default();
        store
            .files
            .borrow_mut()
            .insert(PathBuf::from(path), content.to_string());
        store
    }

    #[test]
    fn test_changed_file_written_once() {
        let runner = runner(store_with("/t/a.test.ts", "x"));
        let outcome = runner.process(Path::new("/t/a.test.ts"), false).unwrap();

        assert!(outcome.changed);
        assert_eq!(outcome.rules, vec!["semicolon"]);
        assert_eq!(runner.store.writes.borrow().len(), 1);
        assert_eq!(
            runner.store.files.borrow()[Path::new("/t/a.test.ts")],
            "x;"
        );
    }

    #[test]
    fn test_unchanged_file_not_written() {
        let runner = runner(store_with("/t/a.test.ts", "x;"));
        let outcome = runner.process(Path::new("/t/a.test.ts"), false).unwrap();

        assert!(!outcome.changed);
        assert!(runner.store.writes.borrow().is_empty());
    }

    #[test]
    fn test_dry_run_never_writes() {
        let runner = runner(store_with("/t/a.test.ts", "x"));
        let outcome = runner.process(Path::new("/t/a.test.ts"), true).unwrap();

        assert!(outcome.changed);
        assert!(runner.store.writes.borrow().is_empty());
        assert_eq!(runner.store.files.borrow()[Path::new("/t/a.test.ts")], "x");
    }

    #[test]
    fn test_write_failure_propagates() {
        let mut store = store_with("/t/a.test.ts", "x");
        store.fail_writes = true;
        let err = runner(store)
            .process(Path::new("/t/a.test.ts"), false)
            .unwrap_err();
        assert!(matches!(err, Error::Write { .. }));
    }

    #[test]
    fn test_read_failure_propagates() {
        let err = runner(MemoryStore::default())
            .process(Path::new("/t/missing.test.ts"), false)
            .unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
    }

    #[test]
    fn test_target_from_config_resolves_dir() {
        let mut config = ProjectConfig::default();
        config.target.recursive = true;
        config.target.exclude = vec!["legacy/**".to_string()];

        let target = target_from_config(&config, Path::new("/repo")).unwrap();
        assert_eq!(target.dir, PathBuf::from("/repo/src/components/__tests__"));
        assert!(target.recursive);
        assert!(target.exclude.is_excluded("legacy/a.test.ts"));
    }
}
