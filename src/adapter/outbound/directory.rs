//! Fixed recipient list from configuration.

use async_trait::async_trait;

use crate::error::Result;
use crate::port::{RecipientDirectory, RecipientId};

/// Everyone listed in `[telegram] recipients`.
#[derive(Debug, Clone, Default)]
pub struct StaticRecipients {
    recipients: Vec<RecipientId>,
}

impl StaticRecipients {
    /// Duplicates are dropped; first occurrence wins.
    #[must_use]
    pub fn new(recipients: impl IntoIterator<Item = RecipientId>) -> Self {
        let mut unique = Vec::new();
        for recipient in recipients {
            if !unique.contains(&recipient) {
                unique.push(recipient);
            }
        }
        Self { recipients: unique }
    }
}

#[async_trait]
impl RecipientDirectory for StaticRecipients {
    async fn recipients(&self) -> Result<Vec<RecipientId>> {
        Ok(self.recipients.clone())
    }
}
