use glob::Pattern;

use modfix_core::{Error, Result};

/// Glob patterns for files the runner must never touch
#[derive(Debug, Clone, Default)]
pub struct ExcludeList {
    patterns: Vec<Pattern>,
}

impl ExcludeList {
    /// Compile pattern strings; an invalid pattern is a config error
    pub fn new(patterns: &[String]) -> Result<Self> {
        let compiled = patterns
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .map_err(|e| Error::InvalidPattern(format!("exclude '{}': {}", p, e)))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { patterns: compiled })
    }

    /// Check a path relative to the target directory
    pub fn is_excluded(&self, relative: &str) -> bool {
        self.patterns.iter().any(|pattern| pattern.matches(relative))
    }

    /// Get first matching pattern (for log messages)
    pub fn matching_pattern(&self, relative: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|p| p.matches(relative))
            .map(|p| p.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_exclude() {
        let list = ExcludeList::new(&["**/legacy/**".to_string(), "*.snap.test.ts".to_string()])
            .unwrap();

        assert!(list.is_excluded("legacy/Old.test.ts"));
        assert!(list.is_excluded("a/legacy/Old.test.tsx"));
        assert!(list.is_excluded("Button.snap.test.ts"));
        assert!(!list.is_excluded("Button.test.ts"));
    }

    #[test]
    fn test_matching_pattern() {
        let list = ExcludeList::new(&["Skip*.test.ts".to_string()]).unwrap();
        assert_eq!(list.matching_pattern("SkipMe.test.ts"), Some("Skip*.test.ts"));
        assert_eq!(list.matching_pattern("Keep.test.ts"), None);
    }

    #[test]
    fn test_invalid_pattern_rejected() {
        let err = ExcludeList::new(&["[".to_string()]).unwrap_err();
        assert!(matches!(err, Error::InvalidPattern(_)));
    }
}
