use tracing::{info, warn};

use crate::port::{Event, Notifier, RecipientId};

/// Writes every event to the log. Registered when no chat backend is wired.
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, recipient: RecipientId, event: Event) {
        match event {
            Event::MatchFound(result) => info!(
                %recipient,
                round_id = %result.round_id(),
                percent = result.arbitrage_percent(),
                name = result.source_b().display_name(),
                wear = result.source_b().wear().value(),
                price_b = %result.source_b().price(),
                adjusted_a = %result.source_a().adjusted_price(),
                link = result.source_b().link().unwrap_or("-"),
                "Match found"
            ),
            Event::NoMatches { search } => info!(%recipient, %search, "No matches"),
            Event::SearchFailed {
                search,
                category,
                reason,
            } => warn!(%recipient, %search, category, reason, "Search failed"),
        }
    }
}
