//! The consumer trait: the interface a processing pipeline needs from a broker.

use crate::error::QueueError;
use crate::message::{ReceiptHandle, ReceivedMessage};
use async_trait::async_trait;

/// Manual-acknowledgment queue consumer.
///
/// Implementations deliver messages at least once and hold each one
/// unacknowledged until the caller settles it. Exactly one of [`ack`] or
/// [`reject`] must be called per received message; the in-flight count is
/// bounded by the provider's prefetch configuration.
///
/// [`ack`]: QueueConsumer::ack
/// [`reject`]: QueueConsumer::reject
#[async_trait]
pub trait QueueConsumer: Send {
    /// Wait for the next message.
    ///
    /// `None` means the consume stream has closed (broker shutdown, or an
    /// in-memory queue that has been drained).
    async fn next_message(&mut self) -> Result<Option<ReceivedMessage>, QueueError>;

    /// Mark the message as successfully processed, removing it durably from
    /// the queue.
    async fn ack(&mut self, receipt: ReceiptHandle) -> Result<(), QueueError>;

    /// Negatively acknowledge the message.
    ///
    /// With `requeue` the message becomes available for redelivery to this or
    /// another consumer; without it the message is discarded permanently.
    async fn reject(&mut self, receipt: ReceiptHandle, requeue: bool) -> Result<(), QueueError>;
}
