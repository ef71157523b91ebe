use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "modfix")]
#[command(about = "Idempotent codemods for test files", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to modfix.toml (default: search upward from the current directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Process this directory instead of the configured target
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Log every file and rule
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Apply all enabled rules and rewrite changed files (default)
    Run {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Report files that would change without writing them
    Check {
        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List the rule catalogue in pipeline order
    Rules,

    /// Create a modfix.toml with default settings
    Init,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Run {
            format: "text".to_string(),
        }
    }
}
