//! Duplicate-import elimination

use modfix_core::Rule;
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::imports::{self, NamedImport};

// Matches a standalone single-symbol import line (already trimmed)
static STANDALONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^import \{ ([A-Za-z_$][\w$]*) \} from ['"]([^'"]+)['"];$"#).unwrap()
});

/// Removes `import { X } from "m";` lines when `X` is already granted by
/// another named import from `m`.
pub struct DedupeImports {
    modules: Vec<String>,
}

impl DedupeImports {
    pub fn new(modules: Vec<String>) -> Self {
        Self { modules }
    }
}

impl Rule for DedupeImports {
    fn name(&self) -> &'static str {
        crate::DEDUPE_IMPORTS
    }

    fn description(&self) -> &'static str {
        "Remove standalone imports already granted by another import from the same module"
    }

    fn apply(&self, text: &str) -> String {
        let imports = imports::named_imports(text);
        let lines = standalone_lines(text, &self.modules);

        // Walk bottom-up so that of two identical lines the first survives
        let mut removed: Vec<(usize, usize)> = Vec::new();
        for line in lines.iter().rev() {
            let covered = imports.iter().any(|imp| {
                imp.module == line.module
                    && imp.start != line.start
                    && !is_removed(&removed, imp)
                    && imp.grants(&line.symbol)
            });
            if covered {
                debug!("dropping duplicate import of {} from {}", line.symbol, line.module);
                removed.push((line.start, line.end));
            }
        }

        if removed.is_empty() {
            return text.to_string();
        }

        removed.sort_unstable();
        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for (start, end) in removed {
            out.push_str(&text[cursor..start]);
            cursor = end;
        }
        out.push_str(&text[cursor..]);
        out
    }
}

struct StandaloneLine {
    start: usize,
    end: usize,
    symbol: String,
    module: String,
}

fn standalone_lines(text: &str, modules: &[String]) -> Vec<StandaloneLine> {
    let mut found = Vec::new();
    let mut offset = 0;

    for line in text.split_inclusive('\n') {
        let start = offset;
        offset += line.len();

        let statement = line.trim();
        let Some(cap) = STANDALONE.captures(statement) else {
            continue;
        };
        let symbol = &cap[1];
        let module = &cap[2];
        if !modules.iter().any(|m| m == module) {
            continue;
        }

        // Exact literal forms only; mixed quotes are not a known import shape
        let double = format!("import {{ {} }} from \"{}\";", symbol, module);
        let single = format!("import {{ {} }} from '{}';", symbol, module);
        if statement != double && statement != single {
            continue;
        }

        found.push(StandaloneLine {
            start,
            end: offset,
            symbol: symbol.to_string(),
            module: module.to_string(),
        });
    }

    found
}

fn is_removed(removed: &[(usize, usize)], imp: &NamedImport) -> bool {
    removed
        .iter()
        .any(|(start, end)| imp.start >= *start && imp.start < *end)
}
