//! CLI module graph and command dispatch.

pub mod check;
pub mod command;
pub mod output;
pub mod pipelines;
pub mod search;
pub mod watch;

use std::path::Path;

use tracing::info;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

pub use command::{CheckCommand, Cli, Commands, SearchArgs, WatchArgs};

/// Run the parsed command line to completion.
pub async fn run(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    match cli.command {
        Commands::Search(args) => {
            let config = load_config(&cli.config, cli.log_level.as_deref())?;
            search::execute(&config, &args).await
        }
        Commands::Watch(args) => {
            let config = load_config(&cli.config, cli.log_level.as_deref())?;
            watch::execute(&config, &args).await
        }
        Commands::Check(CheckCommand::Config) => check::execute_config(&cli.config),
        Commands::Pipelines => {
            pipelines::list();
            Ok(())
        }
    }
}

/// Load the configuration, apply the log level override and start logging.
fn load_config(path: &Path, log_level: Option<&str>) -> Result<Config> {
    let mut config = Config::load(path)?;
    if let Some(level) = log_level {
        config.logging.level = level.to_string();
    }
    config.init_logging();
    info!(config = %path.display(), "Configuration loaded");
    Ok(config)
}
