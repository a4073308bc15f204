//! In-memory queue provider for testing and development.
//!
//! Fully functional single-queue implementation: FIFO pending order, an
//! in-flight map keyed by delivery tag, requeue-to-front with the
//! `redelivered` flag set, and counters for settled messages.

use crate::consumer::QueueConsumer;
use crate::error::QueueError;
use crate::message::{MessageId, ReceiptHandle, ReceivedMessage};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};

#[cfg(test)]
#[path = "memory_tests.rs"]
mod tests;

struct StoredMessage {
    message_id: MessageId,
    body: Bytes,
    redelivered: bool,
}

#[derive(Default)]
struct MemoryQueueState {
    pending: VecDeque<StoredMessage>,
    in_flight: HashMap<u64, StoredMessage>,
    next_tag: u64,
    acked: u64,
    dropped: u64,
}

/// Handle to an in-memory queue: seed it with messages and inspect its state.
///
/// Clones share the same underlying queue.
#[derive(Clone, Default)]
pub struct MemoryQueue {
    state: Arc<Mutex<MemoryQueueState>>,
}

impl MemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue a message body.
    pub fn push(&self, body: impl Into<Bytes>) {
        self.lock().pending.push_back(StoredMessage {
            message_id: MessageId::new(),
            body: body.into(),
            redelivered: false,
        });
    }

    /// Create a consumer over this queue.
    pub fn consumer(&self) -> MemoryConsumer {
        MemoryConsumer {
            queue: self.clone(),
        }
    }

    /// Number of messages waiting to be delivered.
    pub fn pending_len(&self) -> usize {
        self.lock().pending.len()
    }

    /// Number of delivered but unsettled messages.
    pub fn in_flight_len(&self) -> usize {
        self.lock().in_flight.len()
    }

    /// Messages acknowledged (durably removed) so far.
    pub fn acked_count(&self) -> u64 {
        self.lock().acked
    }

    /// Messages rejected without requeue (discarded) so far.
    pub fn dropped_count(&self) -> u64 {
        self.lock().dropped
    }

    fn lock(&self) -> MutexGuard<'_, MemoryQueueState> {
        // Nothing panics while holding this lock.
        self.state.lock().expect("memory queue mutex poisoned")
    }
}

/// Consumer over a [`MemoryQueue`].
///
/// [`next_message`](QueueConsumer::next_message) returns `None` once the
/// queue is drained, so a consumer loop over it terminates naturally.
pub struct MemoryConsumer {
    queue: MemoryQueue,
}

#[async_trait]
impl QueueConsumer for MemoryConsumer {
    async fn next_message(&mut self) -> Result<Option<ReceivedMessage>, QueueError> {
        let mut state = self.queue.lock();

        let Some(stored) = state.pending.pop_front() else {
            return Ok(None);
        };

        state.next_tag += 1;
        let tag = state.next_tag;

        let message = ReceivedMessage {
            message_id: stored.message_id.clone(),
            body: stored.body.clone(),
            receipt: ReceiptHandle::new(tag),
            redelivered: stored.redelivered,
        };

        state.in_flight.insert(tag, stored);
        Ok(Some(message))
    }

    async fn ack(&mut self, receipt: ReceiptHandle) -> Result<(), QueueError> {
        let mut state = self.queue.lock();

        state
            .in_flight
            .remove(&receipt.tag())
            .ok_or(QueueError::UnknownReceipt {
                tag: receipt.tag(),
            })?;

        state.acked += 1;
        Ok(())
    }

    async fn reject(&mut self, receipt: ReceiptHandle, requeue: bool) -> Result<(), QueueError> {
        let mut state = self.queue.lock();

        let mut stored =
            state
                .in_flight
                .remove(&receipt.tag())
                .ok_or(QueueError::UnknownReceipt {
                    tag: receipt.tag(),
                })?;

        if requeue {
            // Requeued messages go back to the front, like a broker returning
            // an unacknowledged delivery close to its original position.
            stored.redelivered = true;
            state.pending.push_front(stored);
        } else {
            state.dropped += 1;
        }

        Ok(())
    }
}
