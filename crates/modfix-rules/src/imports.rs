//! Named-import helpers shared by the rules

use regex::Regex;
use std::sync::LazyLock;

// Matches: import { a, b as c } from './foo' (list may span lines)
static NAMED_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^[ \t]*import[ \t]*\{([^}]*)\}[ \t]*from[ \t]*['"]([^'"]+)['"][ \t]*;?"#)
        .unwrap()
});

/// A brace-delimited named import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedImport {
    /// Byte offset of the statement (start of its line)
    pub start: usize,
    pub end: usize,
    /// Byte range of the text between the braces
    pub list_start: usize,
    pub list_end: usize,
    pub module: String,
    /// Raw entries as written, e.g. `render` or `fireEvent as fire`
    pub entries: Vec<String>,
}

impl NamedImport {
    /// Whether the statement binds `symbol` locally
    pub fn grants(&self, symbol: &str) -> bool {
        self.entries.iter().any(|e| local_name(e) == symbol)
    }
}

/// All named imports in `text`, in source order
pub fn named_imports(text: &str) -> Vec<NamedImport> {
    NAMED_IMPORT
        .captures_iter(text)
        .filter_map(|cap| {
            let whole = cap.get(0)?;
            let list = cap.get(1)?;
            Some(NamedImport {
                start: whole.start(),
                end: whole.end(),
                list_start: list.start(),
                list_end: list.end(),
                module: cap[2].to_string(),
                entries: parse_entries(list.as_str()),
            })
        })
        .collect()
}

/// Whether any named import from `module` binds `symbol`, under either quoting
pub fn imports_symbol(text: &str, module: &str, symbol: &str) -> bool {
    named_imports(text)
        .iter()
        .any(|imp| imp.module == module && imp.grants(symbol))
}

/// Whether any named import at all binds `symbol`
pub fn binds_symbol(text: &str, symbol: &str) -> bool {
    named_imports(text).iter().any(|imp| imp.grants(symbol))
}

/// Append `symbol` to the first named import from `module`.
///
/// Returns `None` when there is no such import or it already binds `symbol`.
pub fn append_named_import(text: &str, module: &str, symbol: &str) -> Option<String> {
    let imports = named_imports(text);
    let target = imports.iter().find(|imp| imp.module == module)?;
    if target.grants(symbol) {
        return None;
    }

    let list = &text[target.list_start..target.list_end];
    let rewritten = if list.contains('\n') {
        append_multiline(list, symbol)
    } else {
        let mut entries = target.entries.clone();
        entries.push(symbol.to_string());
        format!(" {} ", entries.join(", "))
    };

    let mut out = String::with_capacity(text.len() + symbol.len() + 2);
    out.push_str(&text[..target.list_start]);
    out.push_str(&rewritten);
    out.push_str(&text[target.list_end..]);
    Some(out)
}

// One entry per line: reuse the last entry's indentation and comma style
fn append_multiline(list: &str, symbol: &str) -> String {
    let body = list.trim_end();
    let trailing = &list[body.len()..];
    let trailing_comma = body.ends_with(',');

    let last_line = body.rsplit('\n').next().unwrap_or("");
    let indent: String = last_line
        .chars()
        .take_while(|c| *c == ' ' || *c == '\t')
        .collect();

    let mut out = String::from(body);
    if !trailing_comma && !body.trim().is_empty() {
        out.push(',');
    }
    out.push('\n');
    out.push_str(&indent);
    out.push_str(symbol);
    if trailing_comma {
        out.push(',');
    }
    out.push_str(trailing);
    out
}

fn parse_entries(list: &str) -> Vec<String> {
    list.split(',')
        .map(|e| e.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|e| !e.is_empty())
        .collect()
}

/// Local binding of an import entry: `a as b` binds `b`, `type T` binds `T`
pub fn local_name(entry: &str) -> &str {
    let entry = entry.trim();
    let entry = entry.strip_prefix("type ").unwrap_or(entry).trim();
    match entry.rsplit_once(" as ") {
        Some((_, alias)) => alias.trim(),
        None => entry,
    }
}
