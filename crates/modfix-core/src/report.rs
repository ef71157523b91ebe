use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::file::SourceFile;

/// Result of processing a single file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileOutcome {
    pub path: String,
    pub changed: bool,
    /// Rules that altered the text, in the order they ran
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<String>,
    /// blake3 of the content as read
    pub before: String,
    /// blake3 of the content after all rules
    pub after: String,
}

impl FileOutcome {
    pub fn from_file(file: &SourceFile, rules: Vec<String>) -> Self {
        Self {
            path: file.path().display().to_string(),
            changed: file.is_changed(),
            rules,
            before: digest(file.original()),
            after: digest(file.current()),
        }
    }

    /// File name portion of the path, for log lines
    pub fn name(&self) -> &str {
        std::path::Path::new(&self.path)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.path)
    }
}

/// Ordered outcomes of one invocation. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    #[serde(with = "time::serde::timestamp")]
    pub started_at: OffsetDateTime,
    pub dry_run: bool,
    pub outcomes: Vec<FileOutcome>,
}

impl RunReport {
    pub fn new(dry_run: bool) -> Self {
        Self {
            started_at: OffsetDateTime::now_utc(),
            dry_run,
            outcomes: Vec::new(),
        }
    }

    pub fn push(&mut self, outcome: FileOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn changed(&self) -> impl Iterator<Item = &FileOutcome> {
        self.outcomes.iter().filter(|o| o.changed)
    }

    pub fn changed_count(&self) -> usize {
        self.changed().count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }
}

fn digest(content: &str) -> String {
    blake3::hash(content.as_bytes()).to_hex().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_digests() {
        let mut file = SourceFile::new("dir/Foo.test.ts", "old".to_string());
        let unchanged = FileOutcome::from_file(&file, vec![]);
        assert!(!unchanged.changed);
        assert_eq!(unchanged.before, unchanged.after);

        file.set_current("new".to_string());
        let changed = FileOutcome::from_file(&file, vec!["dedupe-imports".to_string()]);
        assert!(changed.changed);
        assert_ne!(changed.before, changed.after);
        assert_eq!(changed.name(), "Foo.test.ts");
    }

    #[test]
    fn test_report_counts_preserve_order() {
        let mut report = RunReport::new(false);
        let a = SourceFile::new("a.test.ts", "x".to_string());
        let mut b = SourceFile::new("b.test.ts", "x".to_string());
        b.set_current("y".to_string());

        report.push(FileOutcome::from_file(&a, vec![]));
        report.push(FileOutcome::from_file(&b, vec![]));

        assert_eq!(report.total(), 2);
        assert_eq!(report.changed_count(), 1);
        assert_eq!(report.outcomes[0].path, "a.test.ts");
        assert_eq!(report.changed().next().unwrap().path, "b.test.ts");
    }

    #[test]
    fn test_report_json_skips_empty_rules() {
        let report = RunReport {
            started_at: OffsetDateTime::UNIX_EPOCH,
            dry_run: true,
            outcomes: vec![FileOutcome::from_file(
                &SourceFile::new("a.test.ts", String::new()),
                vec![],
            )],
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["started_at"], 0);
        assert!(json["outcomes"][0].get("rules").is_none());
    }
}
