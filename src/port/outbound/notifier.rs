//! Notifier port for delivering search outcomes.
//!
//! The core hands over structured events addressed to a recipient; turning
//! them into user-facing text is the adapter's job.

use std::fmt;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{MatchResult, SearchParameters};

/// Chat or user identity a notification is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecipientId(i64);

impl RecipientId {
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecipientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Events that can trigger notifications.
#[derive(Debug, Clone)]
pub enum Event {
    /// A round paired two listings.
    MatchFound(MatchResult),
    /// A round finished without any accepted pairing.
    NoMatches {
        /// What was searched for.
        search: SearchParameters,
    },
    /// A search could not complete.
    SearchFailed {
        /// What was searched for.
        search: SearchParameters,
        /// Stable error category, see [`crate::error::Error::category`].
        category: &'static str,
        /// Error message.
        reason: String,
    },
}

/// Trait for notification handlers.
///
/// Notifications are fire-and-forget: `notify` must return quickly and
/// spawn its own task for slow delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Handle an event addressed to `recipient`.
    fn notify(&self, recipient: RecipientId, event: Event);

    /// Deliver everything queued so far and stop accepting events.
    ///
    /// Called once before the process exits. Notifiers that deliver inline
    /// keep the default.
    async fn shutdown(&self) {}
}

/// Registry of notifiers (composite pattern).
///
/// Broadcasts events to all registered notifiers.
pub struct NotifierRegistry {
    notifiers: Vec<Box<dyn Notifier>>,
}

impl NotifierRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { notifiers: vec![] }
    }

    /// Register a notifier.
    pub fn register(&mut self, notifier: Box<dyn Notifier>) {
        self.notifiers.push(notifier);
    }

    /// Number of registered notifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.notifiers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notifiers.is_empty()
    }
}

impl Default for NotifierRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NotifierRegistry {
    fn notify(&self, recipient: RecipientId, event: Event) {
        for notifier in &self.notifiers {
            notifier.notify(recipient, event.clone());
        }
    }

    async fn shutdown(&self) {
        for notifier in &self.notifiers {
            notifier.shutdown().await;
        }
    }
}

/// A no-op notifier for testing or when notifications are disabled.
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _recipient: RecipientId, _event: Event) {}
}
