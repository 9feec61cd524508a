//! `floatarb search`: one interactive matching round.

use tabled::{Table, Tabled};

use crate::adapter::inbound::cli::command::SearchArgs;
use crate::adapter::inbound::cli::output;
use crate::domain::{MatchResult, SearchParameters};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::App;
use crate::port::RecipientId;

#[derive(Tabled)]
struct MatchRow {
    #[tabled(rename = "Float")]
    float: f64,
    #[tabled(rename = "Seed")]
    seed: String,
    #[tabled(rename = "Buy")]
    buy: String,
    #[tabled(rename = "Sell")]
    sell: String,
    #[tabled(rename = "Arbitrage")]
    arbitrage: String,
    #[tabled(rename = "Listing")]
    link: String,
}

impl From<&MatchResult> for MatchRow {
    fn from(result: &MatchResult) -> Self {
        let a = result.source_a();
        let b = result.source_b();
        Self {
            float: b.wear().value(),
            seed: b.seed().map_or_else(|| "-".into(), |s| s.to_string()),
            buy: format!("${}", b.price()),
            sell: format!("${}", a.adjusted_price()),
            arbitrage: format!("{}%", result.arbitrage_percent()),
            link: b.link().unwrap_or("-").to_string(),
        }
    }
}

/// Run one round for the item in `args` and print every match.
pub async fn execute(config: &Config, args: &SearchArgs) -> Result<()> {
    let mut config = config.clone();
    if args.no_resolve {
        config.matching.resolve_names = false;
    }
    let app = App::build(&config)?;

    let params = SearchParameters::new(
        args.item_class.as_str(),
        args.pattern.as_str(),
        args.quality,
        args.stattrak,
    );
    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Search");
    output::field("Item", &params);
    output::field("Sources", format!("{} vs {}", config.matching.source_a, config.matching.source_b));

    let outcome = match args.recipient {
        Some(recipient) => app.search.search(RecipientId::new(recipient), params).await,
        None => app.search.resolve_and_match(&params).await,
    };
    app.shutdown().await;

    print_results(&outcome?);
    Ok(())
}

fn print_results(results: &[MatchResult]) {
    if output::is_json() {
        for result in results {
            match serde_json::to_value(result) {
                Ok(payload) => output::emit_json_line("match", payload),
                Err(e) => output::error(&format!("Could not serialize match: {e}")),
            }
        }
        return;
    }

    output::section("Matches");
    if results.is_empty() {
        output::warning("No listing cleared the threshold");
        return;
    }
    let rows: Vec<MatchRow> = results.iter().map(MatchRow::from).collect();
    output::table(&Table::new(rows).to_string());
    output::success(&format!("{} match(es) found", output::positive(results.len())));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NormalizedRecord, RoundId, Wear};
    use rust_decimal_macros::dec;

    #[test]
    fn row_shows_buy_and_sell_sides() {
        let a = NormalizedRecord::try_new("a", Wear::try_new(0.1523).unwrap(), dec!(92))
            .unwrap()
            .with_overpay(dec!(3));
        let b = NormalizedRecord::try_new("b", Wear::try_new(0.1519).unwrap(), dec!(80))
            .unwrap()
            .with_seed(661);
        let row = MatchRow::from(&MatchResult::new(RoundId::new(), a, b, 15));

        assert_eq!(row.buy, "$80");
        assert_eq!(row.sell, "$95");
        assert_eq!(row.seed, "661");
        assert_eq!(row.arbitrage, "15%");
        assert_eq!(row.link, "-");
    }
}
