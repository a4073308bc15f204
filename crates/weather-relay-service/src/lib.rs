//! # Weather Relay Service
//!
//! Worker that relays weather readings from a durable queue to an HTTP
//! ingestion endpoint.
//!
//! Pipeline per message: deserialize → feels-like defaulting → semantic
//! validation → delivery with bounded fixed-delay retry → exactly one
//! acknowledgment decision. Malformed or invalid payloads are rejected
//! permanently; exhausted deliveries are returned to the queue for later
//! redelivery.

pub mod api_client;
pub mod config;
pub mod consumer;
pub mod processor;
pub mod retry;
