//! Queue provider implementations.

pub mod amqp;
pub mod memory;
