//! `floatarb watch`: scheduled searches until Ctrl-C.

use tokio::signal;
use tracing::info;

use crate::adapter::inbound::cli::command::WatchArgs;
use crate::adapter::inbound::cli::output;
use crate::application::orchestration::WatchState;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::App;
use crate::port::RecipientId;

/// Start the recurring job and block until interrupted.
pub async fn execute(config: &Config, args: &WatchArgs) -> Result<()> {
    let recipient = args
        .recipient
        .or_else(|| config.telegram.recipients.first().copied())
        .map(RecipientId::new)
        .ok_or(ConfigError::MissingField {
            field: "telegram.recipients",
        })?;
    let app = App::build(config)?;

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Watch");
    output::field("Recipient", recipient);
    output::field("Interval", format!("{}s", config.schedule.interval_secs));
    output::field("Catalog", format!("{} item(s)", app.catalog.len()));

    if let Some(path) = app.catalog.path() {
        output::field("Stored in", path.display());
    }

    if app.catalog.is_empty() {
        output::warning("Catalog is empty; add [[catalog.items]] or run a search first");
    }
    match app.watch.start(recipient) {
        WatchState::Started => output::success("Scheduled search started"),
        _ => output::warning("Scheduled search is already running"),
    }
    output::note("Press Ctrl-C to stop");

    let interrupted = signal::ctrl_c().await;
    info!("Shutdown signal received");

    app.watch.stop(recipient);
    app.shutdown().await;
    interrupted?;
    output::success("Scheduled search stopped");
    Ok(())
}
