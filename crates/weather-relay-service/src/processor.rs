//! Per-message processing: deserialize, validate, deliver, settle.

use crate::api_client::{DeliveryError, ReadingSink};
use crate::retry::{deliver_with_retry, RetryPolicy};
use queue_consumer::{QueueConsumer, QueueError, ReceivedMessage};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};
use weather_relay_core::{validate, Reading};

/// Terminal state of one message after its acknowledgment decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageOutcome {
    /// Delivered and durably removed from the queue.
    Acknowledged,
    /// Permanently rejected without requeue: the payload was malformed or
    /// semantically invalid, and no amount of retrying fixes that.
    Rejected,
}

/// Failures the processor surfaces to the consumer loop.
///
/// Malformed and invalid payloads are not here: they are settled inside the
/// processor and reported as [`MessageOutcome::Rejected`].
#[derive(Debug, Error)]
pub enum ProcessingError {
    /// Every delivery attempt failed. The message has already been returned
    /// to the queue for later redelivery.
    #[error("delivery failed after {attempts} attempts: {last_error}")]
    DeliveryExhausted {
        attempts: u32,
        #[source]
        last_error: DeliveryError,
    },

    /// The broker refused an acknowledgment operation.
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Drives one message from its raw body to exactly one acknowledgment
/// decision.
pub struct MessageProcessor {
    sink: Arc<dyn ReadingSink>,
    retry: RetryPolicy,
}

impl MessageProcessor {
    pub fn new(sink: Arc<dyn ReadingSink>, retry: RetryPolicy) -> Self {
        Self { sink, retry }
    }

    /// Process one received message: parse the body as a [`Reading`], apply
    /// the feels-like default, validate, deliver with retry, and settle the
    /// message with the broker.
    pub async fn process(
        &self,
        message: ReceivedMessage,
        consumer: &mut dyn QueueConsumer,
    ) -> Result<MessageOutcome, ProcessingError> {
        let receipt = message.receipt;

        let mut reading: Reading = match serde_json::from_slice(&message.body) {
            Ok(reading) => reading,
            Err(error) => {
                // A body that does not parse cannot become valid by retrying.
                warn!(
                    message_id = %message.message_id,
                    error = %error,
                    "rejecting malformed payload"
                );
                consumer.reject(receipt, false).await?;
                return Ok(MessageOutcome::Rejected);
            }
        };

        reading.default_feels_like();

        if let Err(error) = validate(&reading) {
            warn!(
                message_id = %message.message_id,
                error = %error,
                "rejecting invalid reading"
            );
            consumer.reject(receipt, false).await?;
            return Ok(MessageOutcome::Rejected);
        }

        info!(
            message_id = %message.message_id,
            location = %reading.location,
            timestamp = %reading.timestamp,
            temperature = reading.temperature,
            feels_like = reading.feels_like,
            "delivering reading"
        );

        match deliver_with_retry(self.sink.as_ref(), &reading, &self.retry).await {
            Ok(()) => {
                consumer.ack(receipt).await?;
                info!(
                    message_id = %message.message_id,
                    location = %reading.location,
                    "reading delivered and acknowledged"
                );
                Ok(MessageOutcome::Acknowledged)
            }
            Err(last_error) => {
                // Presumed transient: hand the message back to the broker for
                // later redelivery.
                consumer.reject(receipt, true).await?;
                Err(ProcessingError::DeliveryExhausted {
                    attempts: self.retry.max_attempts,
                    last_error,
                })
            }
        }
    }
}

#[cfg(test)]
#[path = "processor_tests.rs"]
mod tests;
