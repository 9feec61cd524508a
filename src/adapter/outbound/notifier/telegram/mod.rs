//! Telegram delivery of search outcomes.
//!
//! Each recipient id is used as the Telegram chat id.

mod format;

pub mod notifier;

pub use notifier::{BotDelivery, Delivery, TelegramConfig, TelegramNotifier};
