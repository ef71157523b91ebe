pub mod check;
pub mod init;
pub mod rules;
pub mod run;

use anyhow::Result;
use modfix_config::ProjectConfig;
use modfix_engine::{Runner, build_pipeline, target_from_config};
use std::path::{Path, PathBuf};

/// Resolved configuration and the directory it is relative to
pub struct Project {
    pub root: PathBuf,
    pub config: ProjectConfig,
}

impl Project {
    /// Load an explicit config file, else search upward for modfix.toml, else
    /// fall back to defaults rooted at the current directory.
    pub fn load(config_path: Option<&Path>, dir_override: Option<&Path>) -> Result<Self> {
        let current_dir = std::env::current_dir()?;

        let (root, mut config) = match config_path {
            Some(path) => {
                let config = ProjectConfig::load_file(path)?;
                let root = match path.parent() {
                    Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                    _ => current_dir.clone(),
                };
                (root, config)
            }
            None => match ProjectConfig::find_and_load()? {
                Some(found) => found,
                None => {
                    tracing::debug!("no modfix.toml found, using defaults");
                    (current_dir.clone(), ProjectConfig::default())
                }
            },
        };

        if let Some(dir) = dir_override {
            config.target.dir = current_dir.join(dir);
        }

        Ok(Self { root, config })
    }

    pub fn runner(&self) -> Result<Runner> {
        let target = target_from_config(&self.config, &self.root)?;
        let pipeline = build_pipeline(&self.config.rules)?;
        Ok(Runner::new(target, pipeline))
    }

    /// Path relative to the project root, with `/` separators
    pub fn relative(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }
}

/// Temp project using the default layout, with `files` in the target dir
#[cfg(test)]
pub(crate) fn test_project(files: &[(&str, &str)]) -> (tempfile::TempDir, Project) {
    let dir = tempfile::tempdir().unwrap();
    let project = Project {
        root: dir.path().to_path_buf(),
        config: ProjectConfig::default(),
    };
    let target = project.config.target_dir(&project.root);
    std::fs::create_dir_all(&target).unwrap();
    for (name, content) in files {
        std::fs::write(target.join(name), content).unwrap();
    }
    (dir, project)
}
