//! Core domain models for modfix
//!
//! This crate contains:
//! - Domain models (SourceFile, FileOutcome, RunReport)
//! - The `Rule` trait and the ordered `Pipeline` that applies rules
//! - The shared error type

pub mod error;
pub mod file;
pub mod report;
pub mod rule;

pub use error::{Error, Result};
pub use file::SourceFile;
pub use report::{FileOutcome, RunReport};
pub use rule::{Pipeline, Rule};
