//! Sequential consumer loop feeding the message processor.

use crate::processor::MessageProcessor;
use queue_consumer::{QueueConsumer, QueueError};
use tokio::sync::watch;
use tracing::{debug, error, info};

/// Pull messages one at a time and process each to its acknowledgment
/// decision.
///
/// Processing failures are logged and never stop the loop; the next message
/// is not pulled until the current one is settled, so with a prefetch of 1
/// delivery attempts stay strictly ordered.
///
/// Returns when the consume stream closes or `shutdown` flips to true. A
/// message already being processed always runs to its acknowledgment
/// decision; shutdown only cancels the wait for the next message.
pub async fn run_consumer_loop(
    consumer: &mut dyn QueueConsumer,
    processor: &MessageProcessor,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), QueueError> {
    loop {
        let next = tokio::select! {
            biased;

            _ = shutdown.changed() => {
                info!("shutdown requested, no longer pulling messages");
                return Ok(());
            }
            next = consumer.next_message() => next?,
        };

        let Some(message) = next else {
            info!("consume stream closed");
            return Ok(());
        };

        match processor.process(message, consumer).await {
            Ok(outcome) => debug!(?outcome, "message settled"),
            Err(error) => error!(error = %error, "message processing failed"),
        }
    }
}

#[cfg(test)]
#[path = "consumer_tests.rs"]
mod tests;
