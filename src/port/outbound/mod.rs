//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the collaborators the core talks to: marketplace
//! fetchers, the item catalog, the job scheduler, and notifications.

pub mod catalog;
pub mod notifier;
pub mod scheduler;
pub mod source;
