//! Outbound adapters (driven side).

pub mod catalog;
pub mod csmoney;
pub mod directory;
pub mod http;
pub mod notifier;
pub mod scheduler;
pub mod steam;
