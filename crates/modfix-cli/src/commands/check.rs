//! Check command - dry run

use anyhow::Result;
use std::io::Write;
use std::path::Path;

use super::Project;

/// Returns true when at least one file would be rewritten
pub fn handle(project: &Project, format: &str) -> Result<bool> {
    write_check(project, format, &mut std::io::stdout().lock())
}

fn write_check(project: &Project, format: &str, out: &mut impl Write) -> Result<bool> {
    let runner = project.runner()?;
    let report = runner.check()?;

    let undiscovered: Vec<String> = report
        .outcomes
        .iter()
        .map(|o| project.relative(Path::new(&o.path)))
        .filter(|rel| !project.config.suite.includes(rel))
        .collect();

    match format {
        "json" => {
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        _ => {
            for outcome in report.changed() {
                writeln!(
                    out,
                    "Would fix: {} ({})",
                    outcome.name(),
                    outcome.rules.join(", ")
                )?;
            }
            for rel in &undiscovered {
                writeln!(out, "Not matched by suite include: {}", rel)?;
            }
            writeln!(
                out,
                "{} of {} file(s) would be fixed.",
                report.changed_count(),
                report.total()
            )?;
        }
    }

    Ok(report.changed_count() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_project;

    const DUPLICATE: &str = "import { afterEach } from \"vitest\";\nimport { describe, it, afterEach } from \"vitest\";\n";
    const CLEAN: &str = "import { describe, it } from \"vitest\";\n";

    #[test]
    fn test_pending_changes_fail_without_writing() {
        let (_dir, project) = test_project(&[("A.test.ts", DUPLICATE), ("B.test.ts", CLEAN)]);

        let mut out = Vec::new();
        let pending = write_check(&project, "text", &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert!(pending);
        assert!(output.contains("Would fix: A.test.ts (dedupe-imports)\n"));
        assert!(!output.contains("B.test.ts"));
        assert!(output.ends_with("1 of 2 file(s) would be fixed.\n"));

        let on_disk = std::fs::read_to_string(
            project.config.target_dir(&project.root).join("A.test.ts"),
        )
        .unwrap();
        assert_eq!(on_disk, DUPLICATE);
    }

    #[test]
    fn test_clean_tree_passes() {
        let (_dir, project) = test_project(&[("B.test.ts", CLEAN)]);

        let mut out = Vec::new();
        let pending = write_check(&project, "text", &mut out).unwrap();
        assert!(!pending);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "0 of 1 file(s) would be fixed.\n"
        );
    }
}
