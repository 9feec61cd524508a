//! Ordered, closable channel with an explicit end-of-stream.
//!
//! [`channel`] returns a cloneable [`StreamWriter`] and a single
//! [`StreamReader`]. Items arrive in FIFO order; after [`StreamWriter::close`]
//! the reader drains what is buffered and then yields `None` forever. The end
//! marker itself is never observed as an item.
//!
//! Writing to a closed stream is a protocol violation reported as
//! [`StreamError::Closed`]. Closing twice reports [`StreamError::AlreadyClosed`].
//! Dropping every writer without closing also ends the stream, so a producer
//! that exits early can never leave its consumer blocked.

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::error::StreamError;

/// Default buffer size when none is configured.
pub const DEFAULT_CAPACITY: usize = 64;

struct Shared<T> {
    sender: Mutex<Option<mpsc::Sender<T>>>,
}

/// Producer half. Clones share the same closed state.
pub struct StreamWriter<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for StreamWriter<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

/// Consumer half.
pub struct StreamReader<T> {
    receiver: mpsc::Receiver<T>,
}

/// Create a bounded stream. `put` suspends while the buffer is full.
#[must_use]
pub fn channel<T>(capacity: usize) -> (StreamWriter<T>, StreamReader<T>) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (
        StreamWriter {
            shared: Arc::new(Shared {
                sender: Mutex::new(Some(sender)),
            }),
        },
        StreamReader { receiver },
    )
}

impl<T> StreamWriter<T> {
    /// Append an item.
    pub async fn put(&self, item: T) -> Result<(), StreamError> {
        let sender = self.shared.sender.lock().clone().ok_or(StreamError::Closed)?;
        sender
            .send(item)
            .await
            .map_err(|_| StreamError::ReceiverDropped)
    }

    /// Mark the end of the stream. Items already written stay readable.
    pub fn close(&self) -> Result<(), StreamError> {
        self.shared
            .sender
            .lock()
            .take()
            .map(drop)
            .ok_or(StreamError::AlreadyClosed)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.shared.sender.lock().is_none()
    }
}

impl<T> StreamReader<T> {
    /// Next item, or `None` once the stream has ended.
    pub async fn next(&mut self) -> Option<T> {
        self.receiver.recv().await
    }

    /// Drain the stream to its end.
    pub async fn collect(mut self) -> Vec<T> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await {
            items.push(item);
        }
        items
    }
}

impl<T> futures_util::Stream for StreamReader<T> {
    type Item = T;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<T>> {
        self.receiver.poll_recv(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn yields_in_order_then_ends_without_marker() {
        let (writer, reader) = channel(4);
        writer.put(1).await.unwrap();
        writer.put(2).await.unwrap();
        writer.put(3).await.unwrap();
        writer.close().unwrap();

        assert_eq!(reader.collect().await, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn put_after_close_is_rejected() {
        let (writer, _reader) = channel::<u8>(1);
        writer.close().unwrap();
        assert_eq!(writer.put(1).await, Err(StreamError::Closed));
        assert_eq!(writer.close(), Err(StreamError::AlreadyClosed));
    }

    #[tokio::test]
    async fn reading_after_end_stays_empty() {
        let (writer, mut reader) = channel::<u8>(1);
        writer.close().unwrap();
        assert_eq!(reader.next().await, None);
        assert_eq!(reader.next().await, None);
    }

    #[tokio::test]
    async fn any_clone_may_close_after_fan_in() {
        let (writer, reader) = channel(8);
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let w = writer.clone();
                tokio::spawn(async move { w.put(i).await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        let last = writer.clone();
        drop(writer);
        last.close().unwrap();
        assert!(last.is_closed());

        let mut items = reader.collect().await;
        items.sort_unstable();
        assert_eq!(items, vec![0, 1, 2, 3]);
    }

    #[tokio::test]
    async fn dropping_all_writers_ends_the_stream() {
        let (writer, mut reader) = channel(1);
        writer.put("only").await.unwrap();
        drop(writer);
        assert_eq!(reader.next().await, Some("only"));
        assert_eq!(reader.next().await, None);
    }

    #[tokio::test]
    async fn put_after_reader_dropped_is_reported() {
        let (writer, reader) = channel(1);
        drop(reader);
        assert_eq!(writer.put(1).await, Err(StreamError::ReceiverDropped));
    }
}
