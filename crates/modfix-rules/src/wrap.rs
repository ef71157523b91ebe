//! Suite-block normalization: header repair and setup-hook wrapping

use modfix_core::Rule;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

use crate::imports;

// The only separator accepted between a suite name and its body
static VALID_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*,[ \t]*\(\)[ \t]*=>[ \t]*$").unwrap());

// Lifecycle hooks are never loose statements, whatever `existing_hooks` lists
const LIFECYCLE_HOOKS: [&str; 4] = ["beforeAll", "afterAll", "beforeEach", "afterEach"];

const NAME: &str = r#"(?:"[^"\n]*"|'[^'\n]*'|`[^`\n]*`)"#;

/// Names used when scanning suite blocks
#[derive(Debug, Clone)]
pub struct WrapOptions {
    /// Suite block function, e.g. `describe`
    pub suite: String,
    /// Hook emitted around loose statements
    pub hook: String,
    /// Module the hook is imported from
    pub hook_module: String,
    /// Hooks whose presence means the block is already structured
    pub existing_hooks: Vec<String>,
    /// Test declaration functions
    pub tests: Vec<String>,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            suite: "describe".to_string(),
            hook: "beforeEach".to_string(),
            hook_module: "vitest".to_string(),
            existing_hooks: vec!["beforeEach".to_string(), "afterEach".to_string()],
            tests: vec!["it".to_string(), "test".to_string()],
        }
    }
}

pub struct WrapSuiteSetup {
    options: WrapOptions,
    malformed_header: Regex,
    header: Regex,
}

impl WrapSuiteSetup {
    pub fn new(options: WrapOptions) -> modfix_core::Result<Self> {
        let suite = regex::escape(&options.suite);
        let malformed_header = Regex::new(&format!(
            r"(?mR)(^|[^\w$.])({suite})\(([ \t]*{NAME})([ \t,;]*(?:\(\)[ \t]*=>)?[ \t,;]*)\{{([ \t]*)$"
        ))
        .map_err(|e| modfix_core::Error::InvalidPattern(e.to_string()))?;
        let header = Regex::new(&format!(
            r"^([ \t]*){suite}\([ \t]*{NAME}[ \t]*,[ \t]*\(\)[ \t]*=>[ \t]*\{{[ \t]*$"
        ))
        .map_err(|e| modfix_core::Error::InvalidPattern(e.to_string()))?;

        Ok(Self {
            options,
            malformed_header,
            header,
        })
    }

    fn normalize_headers(&self, text: &str) -> String {
        self.malformed_header
            .replace_all(text, |cap: &Captures| {
                if VALID_SEPARATOR.is_match(&cap[4]) {
                    return cap[0].to_string();
                }
                // `describe(name, {\n ...options\n}, () => {` opens an object, not the body
                let end = cap.get(0).map_or(text.len(), |m| m.end());
                if closes_as_argument(&text[end..]) {
                    return cap[0].to_string();
                }
                debug!("repairing {} header {}", &cap[2], cap[3].trim());
                format!("{}{}({}, () => {{{}", &cap[1], &cap[2], &cap[3], &cap[5])
            })
            .into_owned()
    }

    fn wrap_loose_statements(&self, text: &str) -> (String, usize) {
        let lines: Vec<&str> = text.split_inclusive('\n').collect();
        let mut out = String::with_capacity(text.len() + 64);
        let mut wrapped = 0;
        let mut i = 0;

        while i < lines.len() {
            out.push_str(lines[i]);
            if let Some((start, end)) = self.loose_region(&lines, i) {
                self.emit_wrapped(&mut out, &lines, i, start, end);
                wrapped += 1;
                i = end + 1;
                continue;
            }
            i += 1;
        }

        (out, wrapped)
    }

    /// Inclusive line range of the loose statement directly after the suite
    /// header at `header_idx`, if the block qualifies for wrapping.
    fn loose_region(&self, lines: &[&str], header_idx: usize) -> Option<(usize, usize)> {
        if !self.header.is_match(strip_eol(lines[header_idx])) {
            return None;
        }

        // (line index, brace depth before the line) for the block body
        let mut body = Vec::new();
        let mut depth = 1;
        for (idx, line) in lines.iter().enumerate().skip(header_idx + 1) {
            body.push((idx, depth));
            depth += scan(line).braces;
            if depth <= 0 {
                break;
            }
        }
        let depth_of = |idx: usize| body[idx - header_idx - 1].1;
        let direct = |idx: usize| depth_of(idx) == 1;

        let has_hook = body.iter().any(|&(idx, d)| {
            d == 1
                && self
                    .options
                    .existing_hooks
                    .iter()
                    .any(|h| starts_with_call(lines[idx].trim_start(), h))
        });
        if has_hook {
            return None;
        }

        let first_test = body.iter().find(|&&(idx, d)| {
            d == 1
                && self
                    .options
                    .tests
                    .iter()
                    .any(|t| starts_with_call(lines[idx].trim_start(), t))
        })?;

        let occupied: Vec<usize> = (header_idx + 1..first_test.0)
            .filter(|&idx| !lines[idx].trim().is_empty())
            .collect();
        let (&start, &end) = (occupied.first()?, occupied.last()?);

        for idx in start..=end {
            let trimmed = lines[idx].trim_start();
            if direct(idx)
                && (starts_with_call(trimmed, &self.options.suite)
                    || self.is_hook_call(trimmed)
                    || trimmed.starts_with('}'))
            {
                return None;
            }
        }
        if (start..=end).all(|idx| is_comment(lines[idx].trim())) {
            return None;
        }

        let balance: i32 = (start..=end).map(|idx| scan(lines[idx]).brackets).sum();
        if balance != 0 {
            return None;
        }
        let last = lines[end].trim_end();
        if last.ends_with([',', '=', '(', '[', '{', '+', '-', '&', '|', '?', ':', '.']) {
            return None;
        }

        Some((start, end))
    }

    fn is_hook_call(&self, line: &str) -> bool {
        LIFECYCLE_HOOKS
            .iter()
            .copied()
            .chain(self.options.existing_hooks.iter().map(String::as_str))
            .chain(std::iter::once(self.options.hook.as_str()))
            .any(|hook| starts_with_call(line, hook))
    }

    fn emit_wrapped(
        &self,
        out: &mut String,
        lines: &[&str],
        header_idx: usize,
        start: usize,
        end: usize,
    ) {
        let eol = if lines[header_idx].ends_with("\r\n") {
            "\r\n"
        } else {
            "\n"
        };
        let header_indent = leading_whitespace(lines[header_idx]);
        let indent = leading_whitespace(lines[start]);
        let unit = match indent.strip_prefix(header_indent) {
            Some(step) if !step.is_empty() => step,
            _ => "  ",
        };

        for line in &lines[header_idx + 1..start] {
            out.push_str(line);
        }

        debug!("wrapping {} loose line(s) in {}", end - start + 1, self.options.hook);
        out.push_str(indent);
        out.push_str(&self.options.hook);
        out.push_str("(() => {");
        out.push_str(eol);
        for line in &lines[start..=end] {
            if !line.trim().is_empty() {
                out.push_str(unit);
            }
            out.push_str(line);
        }
        out.push_str(indent);
        out.push_str("});");
        out.push_str(eol);
    }
}

impl Rule for WrapSuiteSetup {
    fn name(&self) -> &'static str {
        crate::WRAP_SUITE_SETUP
    }

    fn description(&self) -> &'static str {
        "Repair suite headers and move loose suite statements into a setup hook"
    }

    fn apply(&self, text: &str) -> String {
        let normalized = self.normalize_headers(text);
        let (wrapped, count) = self.wrap_loose_statements(&normalized);
        if count == 0 {
            return wrapped;
        }

        // The emitted hook must be importable wherever the file imports the hook module
        if imports::binds_symbol(&wrapped, &self.options.hook) {
            return wrapped;
        }
        imports::append_named_import(&wrapped, &self.options.hook_module, &self.options.hook)
            .unwrap_or(wrapped)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Balance {
    /// Net `{` minus `}`
    braces: i32,
    /// Net openers minus closers across `()`, `[]` and `{}`
    brackets: i32,
}

/// Count brackets outside string literals and line comments
fn scan(line: &str) -> Balance {
    let mut balance = Balance::default();
    let mut quote: Option<char> = None;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == '\\' {
                chars.next();
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '/' if chars.peek() == Some(&'/') => break,
            '{' => {
                balance.braces += 1;
                balance.brackets += 1;
            }
            '}' => {
                balance.braces -= 1;
                balance.brackets -= 1;
            }
            '(' | '[' => balance.brackets += 1,
            ')' | ']' => balance.brackets -= 1,
            _ => {}
        }
    }

    balance
}

/// Whether the `{` just before `rest` is closed by a `}` that is followed by
/// another argument, e.g. `}, () => {`
fn closes_as_argument(rest: &str) -> bool {
    let mut depth = 1;
    let mut quote: Option<char> = None;
    let mut chars = rest.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if let Some(q) = quote {
            if c == '\\' {
                chars.next();
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' | '`' => quote = Some(c),
            '/' if chars.peek().is_some_and(|&(_, n)| n == '/') => {
                while chars.next_if(|&(_, n)| n != '\n').is_some() {}
            }
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return rest[i + 1..].trim_start().starts_with(',');
                }
            }
            _ => {}
        }
    }

    false
}

fn starts_with_call(line: &str, name: &str) -> bool {
    line.strip_prefix(name)
        .is_some_and(|rest| rest.starts_with('(') || rest.starts_with('.'))
}

fn is_comment(line: &str) -> bool {
    line.starts_with("//") || line.starts_with("/*") || line.starts_with('*')
}

fn strip_eol(line: &str) -> &str {
    line.trim_end_matches(['\n', '\r'])
}

fn leading_whitespace(line: &str) -> &str {
    let trimmed = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - trimmed.len()]
}
