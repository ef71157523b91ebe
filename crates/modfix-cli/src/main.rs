mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::Commands;
use commands::Project;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // Initialize tracing; stdout is reserved for command output
    let default_filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command.unwrap_or_default() {
        Commands::Init => commands::init::handle(),
        Commands::Run { format } => {
            let project = Project::load(cli.config.as_deref(), cli.dir.as_deref())?;
            commands::run::handle(&project, &format)
        }
        Commands::Check { format } => {
            let project = Project::load(cli.config.as_deref(), cli.dir.as_deref())?;
            if commands::check::handle(&project, &format)? {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Rules => {
            let project = Project::load(cli.config.as_deref(), cli.dir.as_deref())?;
            commands::rules::handle(&project)
        }
    }
}
