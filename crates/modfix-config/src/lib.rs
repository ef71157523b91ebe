use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "modfix.toml";

// ============================================================================
// Project Config (modfix.toml)
// ============================================================================

/// Project-level configuration (modfix.toml)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ProjectConfig {
    /// Which files the runner processes
    #[serde(default)]
    pub target: TargetConfig,

    /// Rule selection and rule parameters
    #[serde(default)]
    pub rules: RulesConfig,

    /// Companion test-suite settings (never read by the runner)
    #[serde(default)]
    pub suite: SuiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetConfig {
    /// Directory holding the test files; relative to modfix.toml
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    /// Accepted file suffixes, without the leading dot
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub recursive: bool,

    /// Glob patterns, relative to `dir`
    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            extensions: default_extensions(),
            recursive: false,
            exclude: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Enabled rules; they always run in catalogue order
    #[serde(default = "default_enabled")]
    pub enabled: Vec<String>,

    #[serde(default = "default_dedupe")]
    pub dedupe: Vec<DedupeConfig>,

    #[serde(default = "default_companions")]
    pub companion: Vec<CompanionConfig>,

    #[serde(default)]
    pub wrap: WrapConfig,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            dedupe: default_dedupe(),
            companion: default_companions(),
            wrap: WrapConfig::default(),
        }
    }
}

impl RulesConfig {
    pub fn is_enabled(&self, rule: &str) -> bool {
        self.enabled.iter().any(|r| r == rule)
    }
}

/// Module whose standalone imports are deduplicated
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupeConfig {
    pub module: String,
}

/// `helper` must be imported from `module` whenever `trigger(...)` is called
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanionConfig {
    pub trigger: String,
    pub helper: String,
    pub module: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WrapConfig {
    #[serde(default = "default_suite_fn")]
    pub suite: String,

    #[serde(default = "default_hook")]
    pub hook: String,

    #[serde(default = "default_hook_module")]
    pub hook_module: String,

    #[serde(default = "default_existing_hooks")]
    pub existing_hooks: Vec<String>,

    #[serde(default = "default_test_fns")]
    pub tests: Vec<String>,
}

impl Default for WrapConfig {
    fn default() -> Self {
        Self {
            suite: default_suite_fn(),
            hook: default_hook(),
            hook_module: default_hook_module(),
            existing_hooks: default_existing_hooks(),
            tests: default_test_fns(),
        }
    }
}

// ============================================================================
// Suite settings
// ============================================================================

/// Settings of the test runner that consumes the rewritten files
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Test discovery globs, relative to the project root
    #[serde(default = "default_include")]
    pub include: Vec<String>,

    #[serde(default)]
    pub environment: Environment,

    #[serde(default = "default_min_workers")]
    pub min_workers: usize,

    #[serde(default = "default_max_workers")]
    pub max_workers: usize,

    #[serde(default = "default_timeout_ms")]
    pub test_timeout_ms: u64,

    #[serde(default)]
    pub coverage: CoverageThresholds,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            include: default_include(),
            environment: Environment::default(),
            min_workers: default_min_workers(),
            max_workers: default_max_workers(),
            test_timeout_ms: default_timeout_ms(),
            coverage: CoverageThresholds::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Environment {
    #[default]
    Jsdom,
    HappyDom,
    Node,
}

/// Minimum coverage percentages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverageThresholds {
    #[serde(default = "default_threshold")]
    pub lines: u8,
    #[serde(default = "default_threshold")]
    pub functions: u8,
    #[serde(default = "default_threshold")]
    pub branches: u8,
    #[serde(default = "default_threshold")]
    pub statements: u8,
}

impl Default for CoverageThresholds {
    fn default() -> Self {
        Self {
            lines: default_threshold(),
            functions: default_threshold(),
            branches: default_threshold(),
            statements: default_threshold(),
        }
    }
}

fn default_dir() -> PathBuf {
    PathBuf::from("src/components/__tests__")
}

fn default_extensions() -> Vec<String> {
    vec!["test.ts".to_string(), "test.tsx".to_string()]
}

fn default_enabled() -> Vec<String> {
    modfix_rules::CATALOGUE.iter().map(|r| r.to_string()).collect()
}

fn default_dedupe() -> Vec<DedupeConfig> {
    vec![DedupeConfig {
        module: "vitest".to_string(),
    }]
}

fn default_companions() -> Vec<CompanionConfig> {
    vec![CompanionConfig {
        trigger: "afterEach".to_string(),
        helper: "cleanup".to_string(),
        module: "@testing-library/react".to_string(),
    }]
}

fn default_suite_fn() -> String {
    "describe".to_string()
}

fn default_hook() -> String {
    "beforeEach".to_string()
}

fn default_hook_module() -> String {
    "vitest".to_string()
}

fn default_existing_hooks() -> Vec<String> {
    vec!["beforeEach".to_string(), "afterEach".to_string()]
}

fn default_test_fns() -> Vec<String> {
    vec!["it".to_string(), "test".to_string()]
}

fn default_include() -> Vec<String> {
    vec![
        "src/**/*.test.ts".to_string(),
        "src/**/*.test.tsx".to_string(),
    ]
}

fn default_min_workers() -> usize {
    1
}

fn default_max_workers() -> usize {
    4
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_threshold() -> u8 {
    80
}

impl ProjectConfig {
    /// Find and load modfix.toml from current or parent directories
    pub fn find_and_load() -> anyhow::Result<Option<(PathBuf, Self)>> {
        let current = std::env::current_dir()?;
        match Self::find_project_root_from(&current) {
            Some(root) => {
                let config = Self::load(&root)?;
                Ok(Some((root, config)))
            }
            None => Ok(None),
        }
    }

    /// Find modfix.toml by walking up from given directory
    pub fn find_project_root_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(CONFIG_FILE).exists() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Load modfix.toml from project root
    pub fn load(project_root: &Path) -> anyhow::Result<Self> {
        Self::load_file(&project_root.join(CONFIG_FILE))
    }

    /// Load and validate a config file at an explicit path
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ProjectConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Save modfix.toml to project root
    pub fn save(&self, project_root: &Path) -> anyhow::Result<()> {
        let path = project_root.join(CONFIG_FILE);
        let content = toml::to_string_pretty(self)?;
        std::fs::write(&path, content)?;
        Ok(())
    }

    /// Target directory resolved against the project root
    pub fn target_dir(&self, project_root: &Path) -> PathBuf {
        if self.target.dir.is_absolute() {
            self.target.dir.clone()
        } else {
            project_root.join(&self.target.dir)
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.target.extensions.is_empty() {
            anyhow::bail!("target.extensions must not be empty");
        }
        if let Some(ext) = self
            .target
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            anyhow::bail!("target.extensions: invalid extension '{}'", ext);
        }

        for rule in &self.rules.enabled {
            if !modfix_rules::is_known_rule(rule) {
                anyhow::bail!(
                    "rules.enabled: unknown rule '{}' (known: {})",
                    rule,
                    modfix_rules::CATALOGUE.join(", ")
                );
            }
        }
        if self.rules.dedupe.iter().any(|d| d.module.is_empty()) {
            anyhow::bail!("rules.dedupe: module must not be empty");
        }
        if self
            .rules
            .companion
            .iter()
            .any(|c| c.trigger.is_empty() || c.helper.is_empty() || c.module.is_empty())
        {
            anyhow::bail!("rules.companion: trigger, helper and module are required");
        }
        let wrap = &self.rules.wrap;
        if wrap.suite.is_empty() || wrap.hook.is_empty() || wrap.tests.is_empty() {
            anyhow::bail!("rules.wrap: suite, hook and tests are required");
        }

        self.suite.validate()
    }
}

impl SuiteConfig {
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.min_workers == 0 || self.max_workers == 0 {
            anyhow::bail!("suite: worker bounds must be at least 1");
        }
        if self.min_workers > self.max_workers {
            anyhow::bail!(
                "suite: min_workers ({}) exceeds max_workers ({})",
                self.min_workers,
                self.max_workers
            );
        }
        if self.test_timeout_ms == 0 {
            anyhow::bail!("suite: test_timeout_ms must be positive");
        }
        let c = &self.coverage;
        for (metric, value) in [
            ("lines", c.lines),
            ("functions", c.functions),
            ("branches", c.branches),
            ("statements", c.statements),
        ] {
            if value > 100 {
                anyhow::bail!("suite.coverage.{}: {} is above 100", metric, value);
            }
        }
        for pattern in &self.include {
            glob::Pattern::new(pattern)
                .map_err(|e| anyhow::anyhow!("suite.include '{}': {}", pattern, e))?;
        }
        Ok(())
    }

    /// Whether the suite would discover `relative` (path from project root)
    pub fn includes(&self, relative: &str) -> bool {
        self.include.iter().any(|p| {
            glob::Pattern::new(p)
                .map(|pattern| pattern.matches(relative))
                .unwrap_or(false)
        })
    }
}
