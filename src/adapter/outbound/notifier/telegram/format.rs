//! Message formatting for Telegram notifications.

use crate::domain::MatchResult;
use crate::port::Event;

use super::notifier::TelegramConfig;

/// Format an event into a Telegram message, or None if the event should be skipped.
pub fn format_event_message(event: &Event, config: &TelegramConfig) -> Option<String> {
    match event {
        Event::MatchFound(result) => Some(format_match(result)),
        Event::NoMatches { search } if config.notify_no_matches => Some(format!(
            "🤷 *No matches*\n\
            \n\
            📋 {}",
            escape_markdown(&search.to_string())
        )),
        Event::SearchFailed {
            search, category, ..
        } if config.notify_failures => Some(format!(
            "⚠️ *Search failed*\n\
            \n\
            📋 {}\n\
            🚫 {}",
            escape_markdown(&search.to_string()),
            escape_markdown(failure_text(category))
        )),
        _ => None,
    }
}

fn format_match(result: &MatchResult) -> String {
    let a = result.source_a();
    let b = result.source_b();
    let name = truncate(b.display_name(), 60);

    let mut msg = format!(
        "🎯 *Match found* \\({}%\\)\n\
        \n\
        📋 {}\n\
        🔎 Float: `{}`",
        result.arbitrage_percent(),
        escape_markdown(&name),
        b.wear().value()
    );
    if let Some(seed) = b.seed() {
        msg.push_str(&format!(" · Seed: `{seed}`"));
    }
    msg.push_str(&format!(
        "\n🛒 Buy: `${}`\n💰 Sell: `${}`",
        b.price(),
        a.adjusted_price()
    ));
    if let Some(link) = b.link() {
        msg.push_str(&format!("\n\n[Open listing]({})", escape_link(link)));
    }
    msg
}

fn failure_text(category: &str) -> &'static str {
    match category {
        "name_resolution" => "Item not found, check the weapon and skin names.",
        "transport" => "A marketplace is unreachable, try again later.",
        "malformed_response" => "A marketplace answered with unexpected data.",
        _ => "Search could not be completed.",
    }
}

/// Truncate a string with ellipsis (Unicode-safe).
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        s.to_string()
    }
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Escape the URL part of an inline link, where only `)` and `\` are special.
fn escape_link(url: &str) -> String {
    url.replace('\\', "\\\\").replace(')', "\\)")
}
