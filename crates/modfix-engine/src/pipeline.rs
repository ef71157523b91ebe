use modfix_config::RulesConfig;
use modfix_core::{Pipeline, Result, Rule};
use modfix_rules::{
    COMPANION_IMPORTS, Companion, CompanionImports, DEDUPE_IMPORTS, DedupeImports,
    WRAP_SUITE_SETUP, WrapOptions, WrapSuiteSetup,
};

/// Build the enabled rules in catalogue order.
///
/// The order of `rules.enabled` is ignored: import cleanup must run before
/// companion insertion, and structural fixes run last.
pub fn build_pipeline(config: &RulesConfig) -> Result<Pipeline> {
    let mut rules: Vec<Box<dyn Rule>> = Vec::new();

    for name in modfix_rules::CATALOGUE {
        if !config.is_enabled(name) {
            continue;
        }
        let rule: Box<dyn Rule> = match name {
            DEDUPE_IMPORTS => Box::new(DedupeImports::new(
                config.dedupe.iter().map(|d| d.module.clone()).collect(),
            )),
            COMPANION_IMPORTS => {
                let companions = config
                    .companion
                    .iter()
                    .map(|c| Companion::new(&c.trigger, &c.helper, &c.module))
                    .collect::<Result<Vec<_>>>()?;
                Box::new(CompanionImports::new(companions))
            }
            WRAP_SUITE_SETUP => {
                let wrap = &config.wrap;
                Box::new(WrapSuiteSetup::new(WrapOptions {
                    suite: wrap.suite.clone(),
                    hook: wrap.hook.clone(),
                    hook_module: wrap.hook_module.clone(),
                    existing_hooks: wrap.existing_hooks.clone(),
                    tests: wrap.tests.clone(),
                })?)
            }
            _ => continue,
        };
        rules.push(rule);
    }

    Ok(Pipeline::new(rules))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_pipeline_order() {
        let pipeline = build_pipeline(&RulesConfig::default()).unwrap();
        let names: Vec<_> = pipeline.rules().map(|r| r.name()).collect();
        assert_eq!(
            names,
            vec!["dedupe-imports", "companion-imports", "wrap-suite-setup"]
        );
    }

    #[test]
    fn test_enabled_order_is_ignored() {
        let config = RulesConfig {
            enabled: vec!["wrap-suite-setup".to_string(), "dedupe-imports".to_string()],
            ..Default::default()
        };
        let pipeline = build_pipeline(&config).unwrap();
        let names: Vec<_> = pipeline.rules().map(|r| r.name()).collect();
        assert_eq!(names, vec!["dedupe-imports", "wrap-suite-setup"]);
    }

    #[test]
    fn test_nothing_enabled() {
        let config = RulesConfig {
            enabled: vec![],
            ..Default::default()
        };
        assert!(build_pipeline(&config).unwrap().is_empty());
    }
}
