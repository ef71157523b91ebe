//! Missing companion-import insertion

use modfix_core::Rule;
use regex::Regex;
use tracing::debug;

use crate::imports;

/// A helper that must be imported whenever `trigger(...)` is called
#[derive(Debug, Clone)]
pub struct Companion {
    pub trigger: String,
    pub helper: String,
    pub module: String,
    call: Regex,
    declaration: Regex,
}

impl Companion {
    pub fn new(
        trigger: impl Into<String>,
        helper: impl Into<String>,
        module: impl Into<String>,
    ) -> modfix_core::Result<Self> {
        let trigger = trigger.into();
        let helper = helper.into();
        let call = Regex::new(&format!(r"(?:^|[^\w$.]){}\s*\(", regex::escape(&trigger)))
            .map_err(|e| modfix_core::Error::InvalidPattern(e.to_string()))?;
        let declaration = Regex::new(&format!(
            r"(?m)(?:^|[^\w$.])(?:const|let|var|function|class)\s+{}(?:[^\w$]|$)",
            regex::escape(&helper)
        ))
        .map_err(|e| modfix_core::Error::InvalidPattern(e.to_string()))?;

        Ok(Self {
            trigger,
            helper,
            module: module.into(),
            call,
            declaration,
        })
    }

    /// Whether the file declares its own binding for the helper
    fn is_declared(&self, text: &str) -> bool {
        self.declaration.is_match(text)
    }

    fn is_triggered(&self, text: &str) -> bool {
        self.call.is_match(text)
    }
}

/// Appends companion helpers to an existing named-import list
pub struct CompanionImports {
    companions: Vec<Companion>,
}

impl CompanionImports {
    pub fn new(companions: Vec<Companion>) -> Self {
        Self { companions }
    }
}

impl Rule for CompanionImports {
    fn name(&self) -> &'static str {
        crate::COMPANION_IMPORTS
    }

    fn description(&self) -> &'static str {
        "Add helpers a hook call needs to the module's existing import list"
    }

    fn apply(&self, text: &str) -> String {
        let mut current = text.to_string();

        for companion in &self.companions {
            if !companion.is_triggered(&current) {
                continue;
            }
            // Bound from somewhere already, even another module or locally
            if imports::binds_symbol(&current, &companion.helper) || companion.is_declared(&current)
            {
                continue;
            }
            if let Some(next) =
                imports::append_named_import(&current, &companion.module, &companion.helper)
            {
                debug!(
                    "adding {} to import from {} for {}()",
                    companion.helper, companion.module, companion.trigger
                );
                current = next;
            }
        }

        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule() -> CompanionImports {
        CompanionImports::new(vec![
            Companion::new("afterEach", "cleanup", "@testing-library/react").unwrap(),
        ])
    }

    #[test]
    fn test_appends_cleanup() {
        let input = r#"import { render, screen } from "@testing-library/react";
import { afterEach, describe, it } from "vitest";

afterEach(() => {
  cleanup();
});
"#;
        let out = rule().apply(input);
        assert!(out.starts_with(
            "import { render, screen, cleanup } from \"@testing-library/react\";\n"
        ));
        assert_eq!(rule().apply(&out), out);
    }

    #[test]
    fn test_already_imported_either_quote() {
        let double = "import { render, cleanup } from \"@testing-library/react\";\nafterEach(() => cleanup());\n";
        let single = "import { render, cleanup } from '@testing-library/react';\nafterEach(() => cleanup());\n";
        assert_eq!(rule().apply(double), double);
        assert_eq!(rule().apply(single), single);
    }

    #[test]
    fn test_no_trigger_call() {
        let input = "import { render } from '@testing-library/react';\nconst afterEachCount = 1;\n";
        assert_eq!(rule().apply(input), input);
    }

    #[test]
    fn test_member_call_does_not_trigger() {
        let input = "import { render } from '@testing-library/react';\nhooks.afterEach(() => {});\n";
        assert_eq!(rule().apply(input), input);
    }

    #[test]
    fn test_module_not_imported() {
        let input = "import { it } from 'vitest';\nafterEach(() => {});\n";
        assert_eq!(rule().apply(input), input);
    }

    #[test]
    fn test_local_declaration_not_imported_again() {
        let arrow = "import { render } from '@testing-library/react';\nconst cleanup = () => {};\nafterEach(() => cleanup());\n";
        let function = "import { render } from '@testing-library/react';\nfunction cleanup() {}\nafterEach(cleanup);\n";
        assert_eq!(rule().apply(arrow), arrow);
        assert_eq!(rule().apply(function), function);

        let similar = "import { render } from '@testing-library/react';\nconst cleanupAll = 1;\nafterEach(() => {});\n";
        assert!(rule().apply(similar).starts_with("import { render, cleanup } from"));
    }

    #[test]
    fn test_trigger_is_escaped() {
        let companion = Companion::new("after(Each", "cleanup", "m").unwrap();
        assert!(companion.is_triggered("x; after(Each ();"));
    }
}
