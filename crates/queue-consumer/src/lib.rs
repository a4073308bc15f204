//! # Queue Consumer
//!
//! A small queue-consumption runtime: the manual-acknowledgment consumer
//! interface a message-processing pipeline needs from a broker, plus two
//! providers behind it.
//!
//! - [`AmqpConsumer`] talks AMQP 0.9.1 (RabbitMQ). `amqps://` URLs negotiate
//!   TLS with certificate and hostname verification; `amqp://` connects in
//!   the clear.
//! - [`MemoryConsumer`] is a fully functional in-memory queue for unit tests
//!   and local development.
//!
//! Every received message must be settled exactly once, either with
//! [`QueueConsumer::ack`] (durable removal) or [`QueueConsumer::reject`]
//! (discard, or return to the queue for redelivery).

pub mod consumer;
pub mod error;
pub mod message;
pub mod providers;

pub use consumer::QueueConsumer;
pub use error::QueueError;
pub use message::{MessageId, QueueName, ReceiptHandle, ReceivedMessage};
pub use providers::amqp::{AmqpConsumer, AmqpSettings};
pub use providers::memory::{MemoryConsumer, MemoryQueue};
