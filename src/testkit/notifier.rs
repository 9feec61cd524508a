//! Notifier that keeps every event for later assertions.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::port::{Event, Notifier, RecipientId};

/// Records `(recipient, event)` pairs in arrival order.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<(RecipientId, Event)>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<(RecipientId, Event)> {
        self.events.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    /// Number of `MatchFound` events sent to `recipient`.
    pub fn matches_for(&self, recipient: RecipientId) -> usize {
        self.events
            .lock()
            .iter()
            .filter(|(to, event)| *to == recipient && matches!(event, Event::MatchFound(_)))
            .count()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, recipient: RecipientId, event: Event) {
        self.events.lock().push((recipient, event));
    }
}
