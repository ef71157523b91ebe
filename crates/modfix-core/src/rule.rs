//! Text rules and the pipeline that applies them

use tracing::debug;

/// A single codemod rule.
///
/// Rules are pure functions over text: total, non-failing and idempotent.
/// Input that does not match the rule's pattern comes back unchanged.
pub trait Rule: Send + Sync {
    /// Stable identifier (kebab-case), used in config and reports
    fn name(&self) -> &'static str;

    /// One-line human description
    fn description(&self) -> &'static str;

    /// Rewrite `text`, or return it unchanged
    fn apply(&self, text: &str) -> String;
}

/// Ordered list of rules. Each rule receives the previous rule's output.
#[derive(Default)]
pub struct Pipeline {
    rules: Vec<Box<dyn Rule>>,
}

impl Pipeline {
    pub fn new(rules: Vec<Box<dyn Rule>>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> impl Iterator<Item = &dyn Rule> {
        self.rules.iter().map(|r| r.as_ref() as &dyn Rule)
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply every rule in order. Returns the final text and the names of the
    /// rules that changed it.
    pub fn apply(&self, text: &str) -> (String, Vec<String>) {
        let mut current = text.to_string();
        let mut applied = Vec::new();

        for rule in &self.rules {
            let next = rule.apply(&current);
            if next != current {
                debug!("rule {} rewrote text", rule.name());
                applied.push(rule.name().to_string());
                current = next;
            }
        }

        (current, applied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl Rule for Upper {
        fn name(&self) -> &'static str {
            "upper"
        }
        fn description(&self) -> &'static str {
            "uppercase everything"
        }
        fn apply(&self, text: &str) -> String {
            text.to_uppercase()
        }
    }

    struct AppendBang;

    impl Rule for AppendBang {
        fn name(&self) -> &'static str {
            "bang"
        }
        fn description(&self) -> &'static str {
            "ensure a trailing !"
        }
        fn apply(&self, text: &str) -> String {
            if text.ends_with('!') {
                text.to_string()
            } else {
                format!("{}!", text)
            }
        }
    }

    #[test]
    fn test_rules_run_in_order() {
        let pipeline = Pipeline::new(vec![Box::new(Upper), Box::new(AppendBang)]);
        let (out, applied) = pipeline.apply("hi");
        assert_eq!(out, "HI!");
        assert_eq!(applied, vec!["upper", "bang"]);
    }

    #[test]
    fn test_only_changing_rules_are_recorded() {
        let pipeline = Pipeline::new(vec![Box::new(Upper), Box::new(AppendBang)]);
        let (out, applied) = pipeline.apply("OK!");
        assert_eq!(out, "OK!");
        assert!(applied.is_empty());
    }

    #[test]
    fn test_empty_pipeline_is_identity() {
        let pipeline = Pipeline::default();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.apply("x").0, "x");
    }
}
