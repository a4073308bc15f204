//! Error types for queue operations.

use thiserror::Error;

/// Failures raised by queue consumers.
///
/// Everything except [`QueueError::InvalidQueueName`] originates at the
/// broker boundary. Connection and declaration failures happen before any
/// message is in flight; settle failures leave the broker's redelivery
/// machinery responsible for the affected message.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("invalid queue name: {message}")]
    InvalidQueueName { message: String },

    #[error("connection failed: {message}")]
    ConnectionFailed { message: String },

    #[error("queue declaration failed for '{queue}': {message}")]
    DeclareFailed { queue: String, message: String },

    #[error("consume failed: {message}")]
    ConsumeFailed { message: String },

    #[error("failed to settle message {tag}: {message}")]
    SettleFailed { tag: u64, message: String },

    #[error("unknown or already settled receipt: {tag}")]
    UnknownReceipt { tag: u64 },
}
