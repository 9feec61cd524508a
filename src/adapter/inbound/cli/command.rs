//! Command-line interface definitions.
//!
//! Defines the CLI structure for the floatarb application using `clap`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::Quality;

/// Cross-marketplace skin arbitrage finder
#[derive(Parser, Debug)]
#[command(name = "floatarb")]
#[command(version, about)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true, default_value = "config.toml")]
    pub config: PathBuf,

    /// Override log level (debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the floatarb CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run one matching round for an item and print the matches
    Search(SearchArgs),

    /// Run scheduled searches over the catalog until interrupted
    Watch(WatchArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// List the known source pipelines
    Pipelines,
}

/// Subcommands for `floatarb check`
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate configuration file
    Config,
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Weapon or item class, e.g. "AK-47"
    #[arg(long)]
    pub item_class: String,

    /// Skin pattern name, e.g. "Redline"
    #[arg(long)]
    pub pattern: String,

    /// Exterior quality name or code (FN, MW, FT, WW, BS)
    #[arg(long, default_value = "Field-Tested", value_parser = parse_quality)]
    pub quality: Quality,

    /// Search the StatTrak variant
    #[arg(long)]
    pub stattrak: bool,

    /// Also notify this recipient (Telegram chat id)
    #[arg(long)]
    pub recipient: Option<i64>,

    /// Skip name resolution through the wiki
    #[arg(long)]
    pub no_resolve: bool,
}

/// Arguments for the `watch` subcommand.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Recipient owning the scheduled job; defaults to the first configured one
    #[arg(long)]
    pub recipient: Option<i64>,
}

fn parse_quality(value: &str) -> Result<Quality, String> {
    value.parse().map_err(|e: crate::domain::error::DomainError| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_with_quality_code() {
        let cli = Cli::try_parse_from([
            "floatarb",
            "search",
            "--item-class",
            "AK-47",
            "--pattern",
            "Redline",
            "--quality",
            "MW",
            "--stattrak",
        ])
        .unwrap();

        let Commands::Search(args) = cli.command else {
            panic!("expected search");
        };
        assert_eq!(args.quality, Quality::MinimalWear);
        assert!(args.stattrak);
        assert_eq!(cli.config, PathBuf::from("config.toml"));
    }

    #[test]
    fn rejects_unknown_quality() {
        let parsed = Cli::try_parse_from([
            "floatarb",
            "search",
            "--item-class",
            "AK-47",
            "--pattern",
            "Redline",
            "--quality",
            "Pristine",
        ]);
        assert!(parsed.is_err());
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli =
            Cli::try_parse_from(["floatarb", "check", "config", "--config", "other.toml"]).unwrap();
        assert_eq!(cli.config, PathBuf::from("other.toml"));
        assert!(matches!(cli.command, Commands::Check(CheckCommand::Config)));
    }
}
