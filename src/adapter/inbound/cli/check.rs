//! `floatarb check config`: validate configuration without searching.

use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Validate the configuration file and print a summary.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Source A", config.matching.source_a);
    output::field("Source B", config.matching.source_b);
    output::field("Threshold", format!("{}%", config.matching.threshold_percent));
    output::field("Wear digits", config.matching.wear_digits);
    output::field("Resolve", config.matching.resolve_names);
    output::field("Interval", format!("{}s", config.schedule.interval_secs));
    output::field("Catalog", format!("{} item(s)", config.catalog.items.len()));

    if config.telegram.enabled {
        if config.telegram_token.is_some() {
            output::success("Telegram integration configured");
        } else {
            output::warning("Telegram enabled but TELEGRAM_BOT_TOKEN is not set");
        }
        if config.telegram.recipients.is_empty() {
            output::warning("No recipients configured for scheduled searches");
        }
    } else {
        output::field("Telegram", "disabled");
    }

    output::success("Configuration check complete");
    Ok(())
}
