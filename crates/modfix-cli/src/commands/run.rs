use anyhow::Result;
use std::io::Write;

use super::Project;

pub fn handle(project: &Project, format: &str) -> Result<()> {
    write_run(project, format, &mut std::io::stdout().lock())
}

fn write_run(project: &Project, format: &str, out: &mut impl Write) -> Result<()> {
    let runner = project.runner()?;
    let report = runner.run()?;

    match format {
        "json" => {
            writeln!(out, "{}", serde_json::to_string_pretty(&report)?)?;
        }
        _ => {
            for outcome in report.changed() {
                writeln!(out, "Fixed: {}", outcome.name())?;
            }
            writeln!(
                out,
                "Done. Fixed {} of {} file(s).",
                report.changed_count(),
                report.total()
            )?;
        }
    }

    Ok(())
}
