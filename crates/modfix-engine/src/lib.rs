//! The codemod runner: discover files, apply the pipeline, write back changes

pub mod pipeline;
pub mod runner;

pub use pipeline::build_pipeline;
pub use runner::{Runner, target_from_config};
