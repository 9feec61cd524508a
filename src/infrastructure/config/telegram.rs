//! Telegram notification configuration.

use serde::Deserialize;

const fn default_true() -> bool {
    true
}

/// Telegram notification configuration.
///
/// The bot token is read from `TELEGRAM_BOT_TOKEN`, never from the file.
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Enable telegram notifications.
    #[serde(default)]
    pub enabled: bool,
    /// Chats that receive scheduled search results.
    #[serde(default)]
    pub recipients: Vec<i64>,
    /// Tell the requester when a search found nothing.
    #[serde(default = "default_true")]
    pub notify_no_matches: bool,
    /// Tell the requester when a search failed.
    #[serde(default = "default_true")]
    pub notify_failures: bool,
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            recipients: Vec::new(),
            notify_no_matches: default_true(),
            notify_failures: default_true(),
        }
    }
}
