//! Notifier registry factory.
//!
//! Provides factory functions for constructing the notification registry
//! with configured notifiers (logging, Telegram).

#[cfg(feature = "telegram")]
use tracing::{info, warn};

use crate::adapter::outbound::notifier::LogNotifier;
use crate::infrastructure::config::settings::Config;
use crate::port::NotifierRegistry;

#[cfg(feature = "telegram")]
use crate::adapter::outbound::notifier::telegram::{TelegramConfig, TelegramNotifier};

/// Build the notifier registry from configuration.
///
/// Always includes the log notifier. When the `telegram` feature is enabled,
/// `[telegram] enabled = true` and a bot token is set, a Telegram notifier is
/// added. Must be called from within a Tokio runtime.
#[cfg(feature = "telegram")]
pub fn build_notifier_registry(config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));

    if config.telegram.enabled {
        if let Some(bot_token) = config.telegram_token.clone() {
            let tg_config = TelegramConfig {
                bot_token,
                notify_no_matches: config.telegram.notify_no_matches,
                notify_failures: config.telegram.notify_failures,
            };
            registry.register(Box::new(TelegramNotifier::new(tg_config)));
            info!("Telegram notifier enabled");
        } else {
            warn!("Telegram enabled but TELEGRAM_BOT_TOKEN not set");
        }
    }

    registry
}

/// Build the notifier registry from configuration (non-Telegram variant).
#[cfg(not(feature = "telegram"))]
pub fn build_notifier_registry(_config: &Config) -> NotifierRegistry {
    let mut registry = NotifierRegistry::new();
    registry.register(Box::new(LogNotifier));
    registry
}
