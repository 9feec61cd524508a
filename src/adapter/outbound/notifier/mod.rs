//! Notification adapters.
//!
//! Implements the `port::Notifier` trait for various notification backends.

mod log;

#[cfg(feature = "telegram")]
pub mod telegram;

pub use log::LogNotifier;
