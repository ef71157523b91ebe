//! Rewrite rules for modfix
//!
//! Every rule is a pure text function. The catalogue order is the pipeline
//! order:
//! 1. `dedupe-imports` - drop standalone imports granted elsewhere
//! 2. `companion-imports` - add helpers that hook calls rely on
//! 3. `wrap-suite-setup` - repair suite headers, wrap loose suite statements

pub mod companion;
pub mod dedupe;
pub mod imports;
pub mod wrap;

pub use companion::{Companion, CompanionImports};
pub use dedupe::DedupeImports;
pub use wrap::{WrapOptions, WrapSuiteSetup};

pub const DEDUPE_IMPORTS: &str = "dedupe-imports";
pub const COMPANION_IMPORTS: &str = "companion-imports";
pub const WRAP_SUITE_SETUP: &str = "wrap-suite-setup";

/// Rule names in the order they run
pub const CATALOGUE: [&str; 3] = [DEDUPE_IMPORTS, COMPANION_IMPORTS, WRAP_SUITE_SETUP];

/// Check if a rule name is part of the catalogue
pub fn is_known_rule(name: &str) -> bool {
    CATALOGUE.contains(&name)
}
