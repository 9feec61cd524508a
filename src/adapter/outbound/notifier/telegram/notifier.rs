//! Telegram delivery.
//!
//! [`TelegramNotifier::notify`] only queues; a single worker task sends
//! messages in order, so a slow API never stalls a round.
//! [`Notifier::shutdown`] closes the queue and waits for the worker to drain
//! it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use teloxide::prelude::*;
use teloxide::types::ParseMode;
use teloxide::RequestError;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::port::{Event, Notifier, RecipientId};

use super::format::format_event_message;

/// Longest message the Bot API accepts, in UTF-16 units. Kept conservative.
const MAX_MESSAGE_CHARS: usize = 4000;

/// How long shutdown waits for queued messages.
const DRAIN_TIMEOUT: Duration = Duration::from_secs(15);

/// Bot credentials and which optional events are worth a message.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub notify_no_matches: bool,
    pub notify_failures: bool,
}

impl TelegramConfig {
    /// Every event enabled.
    #[must_use]
    pub fn new(bot_token: impl Into<String>) -> Self {
        Self {
            bot_token: bot_token.into(),
            notify_no_matches: true,
            notify_failures: true,
        }
    }
}

/// Sends one rendered message to a chat.
#[async_trait]
pub trait Delivery: Send + Sync + 'static {
    async fn send(&self, chat: RecipientId, text: String) -> Result<(), RequestError>;
}

/// [`Delivery`] through the Bot API, as MarkdownV2.
pub struct BotDelivery {
    bot: Bot,
}

impl BotDelivery {
    #[must_use]
    pub fn new(bot_token: &str) -> Self {
        Self {
            bot: Bot::new(bot_token),
        }
    }
}

#[async_trait]
impl Delivery for BotDelivery {
    async fn send(&self, chat: RecipientId, text: String) -> Result<(), RequestError> {
        self.bot
            .send_message(ChatId(chat.get()), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map(|_| ())
    }
}

type Outgoing = (RecipientId, Event);

pub struct TelegramNotifier {
    outbox: Mutex<Option<mpsc::UnboundedSender<Outgoing>>>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

impl TelegramNotifier {
    /// Spawn the delivery worker. Must run inside a Tokio runtime.
    #[must_use]
    pub fn new(config: TelegramConfig) -> Self {
        let delivery = BotDelivery::new(&config.bot_token);
        Self::with_delivery(config, delivery)
    }

    /// Like [`TelegramNotifier::new`], sending through `delivery`.
    #[must_use]
    pub fn with_delivery(config: TelegramConfig, delivery: impl Delivery) -> Self {
        let (outbox, queue) = mpsc::unbounded_channel();
        let worker = tokio::spawn(deliver(config, Arc::new(delivery), queue));
        Self {
            outbox: Mutex::new(Some(outbox)),
            worker: Mutex::new(Some(worker)),
        }
    }
}

#[async_trait]
impl Notifier for TelegramNotifier {
    fn notify(&self, recipient: RecipientId, event: Event) {
        let outbox = self.outbox.lock();
        let Some(outbox) = outbox.as_ref() else {
            warn!(%recipient, "Telegram notifier is shut down, dropping notification");
            return;
        };
        if outbox.send((recipient, event)).is_err() {
            warn!(%recipient, "Telegram worker is gone, dropping notification");
        }
    }

    async fn shutdown(&self) {
        // Dropping the sender ends the worker loop once the queue is empty.
        drop(self.outbox.lock().take());
        let Some(mut worker) = self.worker.lock().take() else {
            return;
        };

        match tokio::time::timeout(DRAIN_TIMEOUT, &mut worker).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => warn!(error = %e, "Telegram worker failed"),
            Err(_) => {
                warn!(
                    timeout_secs = DRAIN_TIMEOUT.as_secs(),
                    "Telegram queue not drained in time, abandoning remaining messages"
                );
                worker.abort();
            }
        }
    }
}

async fn deliver(
    config: TelegramConfig,
    delivery: Arc<dyn Delivery>,
    mut queue: mpsc::UnboundedReceiver<Outgoing>,
) {
    info!("Telegram delivery started");

    let mut sent = 0usize;
    while let Some((recipient, event)) = queue.recv().await {
        let Some(text) = format_event_message(&event, &config) else {
            debug!(%recipient, "Event muted by configuration");
            continue;
        };
        if text.chars().count() > MAX_MESSAGE_CHARS {
            warn!(%recipient, chars = text.chars().count(), "Message too long, skipping");
            continue;
        }

        match delivery.send(recipient, text).await {
            Ok(()) => sent += 1,
            Err(e) => warn!(%recipient, error = %e, "Telegram send failed"),
        }
    }

    info!(sent, "Telegram delivery stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Quality, SearchParameters};

    #[derive(Clone, Default)]
    struct RecordingDelivery {
        sent: Arc<Mutex<Vec<(RecipientId, String)>>>,
    }

    #[async_trait]
    impl Delivery for RecordingDelivery {
        async fn send(&self, chat: RecipientId, text: String) -> Result<(), RequestError> {
            // A slow API: shutdown has to wait for this.
            tokio::time::sleep(Duration::from_millis(5)).await;
            self.sent.lock().push((chat, text));
            Ok(())
        }
    }

    fn no_matches() -> Event {
        Event::NoMatches {
            search: SearchParameters::new("AK-47", "Redline", Quality::FieldTested, false),
        }
    }

    #[test]
    fn new_enables_every_event() {
        let config = TelegramConfig::new("token");
        assert_eq!(config.bot_token, "token");
        assert!(config.notify_no_matches);
        assert!(config.notify_failures);
    }

    #[tokio::test]
    async fn shutdown_delivers_every_queued_message() {
        let delivery = RecordingDelivery::default();
        let notifier = TelegramNotifier::with_delivery(TelegramConfig::new("token"), delivery.clone());

        for chat in 1..=3 {
            notifier.notify(RecipientId::new(chat), no_matches());
        }
        notifier.shutdown().await;

        let sent = delivery.sent.lock();
        let chats: Vec<i64> = sent.iter().map(|(chat, _)| chat.get()).collect();
        assert_eq!(chats, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn muted_events_are_not_sent() {
        let delivery = RecordingDelivery::default();
        let config = TelegramConfig {
            notify_no_matches: false,
            ..TelegramConfig::new("token")
        };
        let notifier = TelegramNotifier::with_delivery(config, delivery.clone());

        notifier.notify(RecipientId::new(1), no_matches());
        notifier.shutdown().await;

        assert!(delivery.sent.lock().is_empty());
    }

    #[tokio::test]
    async fn notify_after_shutdown_is_dropped() {
        let delivery = RecordingDelivery::default();
        let notifier = TelegramNotifier::with_delivery(TelegramConfig::new("token"), delivery.clone());

        notifier.shutdown().await;
        notifier.notify(RecipientId::new(1), no_matches());
        notifier.shutdown().await;

        assert!(delivery.sent.lock().is_empty());
    }
}
