//! Message types for queue consumption.

use crate::error::QueueError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Validated queue name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueueName(String);

impl QueueName {
    /// Create a new queue name with validation.
    pub fn new(name: impl Into<String>) -> Result<Self, QueueError> {
        let name = name.into();

        if name.is_empty() || name.len() > 255 {
            return Err(QueueError::InvalidQueueName {
                message: "must be 1-255 characters".to_string(),
            });
        }

        if !name
            .chars()
            .all(|c| c.is_ascii() && !c.is_ascii_control() && c != ' ')
        {
            return Err(QueueError::InvalidQueueName {
                message: "only printable ASCII without spaces allowed".to_string(),
            });
        }

        Ok(Self(name))
    }

    /// Get queue name as string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for QueueName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for QueueName {
    type Err = QueueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Unique identifier assigned to each received message for log correlation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(String);

impl MessageId {
    /// Generate a new random message ID.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get message ID as string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for MessageId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for MessageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque token for settling a received message (ack or reject).
///
/// Wraps the broker's delivery tag. Valid for exactly one settle call on the
/// consumer that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ReceiptHandle(u64);

impl ReceiptHandle {
    /// Create a receipt handle from a broker delivery tag.
    pub fn new(tag: u64) -> Self {
        Self(tag)
    }

    /// Get the underlying delivery tag.
    pub fn tag(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ReceiptHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A message received from the queue, awaiting its acknowledgment decision.
#[derive(Debug, Clone)]
pub struct ReceivedMessage {
    pub message_id: MessageId,
    pub body: Bytes,
    pub receipt: ReceiptHandle,
    /// True when the broker has delivered this message before (it was
    /// rejected with requeue, or its consumer died before settling it).
    pub redelivered: bool,
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
