use anyhow::Result;
use modfix_config::RulesConfig;
use modfix_engine::build_pipeline;

use super::Project;

pub fn handle(project: &Project) -> Result<()> {
    // Build every rule so disabled ones can be described too
    let all = RulesConfig {
        enabled: modfix_rules::CATALOGUE.iter().map(|r| r.to_string()).collect(),
        ..project.config.rules.clone()
    };
    let pipeline = build_pipeline(&all)?;

    println!("Rules (pipeline order):");
    for (i, rule) in pipeline.rules().enumerate() {
        let mark = if project.config.rules.is_enabled(rule.name()) {
            "x"
        } else {
            " "
        };
        println!("  {}. [{}] {}", i + 1, mark, rule.name());
        println!("         {}", rule.description());
    }

    Ok(())
}
