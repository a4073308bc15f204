//! AMQP 0.9.1 (RabbitMQ) consumer backed by lapin.

use crate::consumer::QueueConsumer;
use crate::error::QueueError;
use crate::message::{MessageId, QueueName, ReceiptHandle, ReceivedMessage};
use async_trait::async_trait;
use bytes::Bytes;
use futures_util::StreamExt;
use lapin::options::{
    BasicAckOptions, BasicConsumeOptions, BasicNackOptions, BasicQosOptions, QueueDeclareOptions,
};
use lapin::types::FieldTable;
use lapin::{Channel, Connection, ConnectionProperties};
use tracing::{debug, info};

/// Connection settings for an AMQP consumer.
#[derive(Debug, Clone)]
pub struct AmqpSettings {
    /// Broker URL. An `amqps://` scheme negotiates TLS with certificate and
    /// hostname verification; `amqp://` connects in the clear.
    pub url: String,
    pub queue: QueueName,
    /// Maximum unacknowledged messages held at once (`basic.qos` prefetch).
    pub prefetch: u16,
}

/// Consumer over a single AMQP channel with manual acknowledgments.
pub struct AmqpConsumer {
    channel: Channel,
    consumer: lapin::Consumer,
    // Keeps the connection alive for as long as the channel is in use.
    _connection: Connection,
}

impl AmqpConsumer {
    /// Connect to the broker, declare the queue as durable, apply the
    /// prefetch limit, and start consuming with manual acknowledgment.
    ///
    /// TLS is selected by the URL scheme; there is no option to skip
    /// certificate verification on the `amqps://` path.
    pub async fn connect(settings: &AmqpSettings) -> Result<Self, QueueError> {
        let connection = Connection::connect(&settings.url, ConnectionProperties::default())
            .await
            .map_err(|e| QueueError::ConnectionFailed {
                message: e.to_string(),
            })?;

        let channel =
            connection
                .create_channel()
                .await
                .map_err(|e| QueueError::ConnectionFailed {
                    message: e.to_string(),
                })?;

        channel
            .queue_declare(
                settings.queue.as_str(),
                QueueDeclareOptions {
                    durable: true,
                    ..QueueDeclareOptions::default()
                },
                FieldTable::default(),
            )
            .await
            .map_err(|e| QueueError::DeclareFailed {
                queue: settings.queue.to_string(),
                message: e.to_string(),
            })?;

        channel
            .basic_qos(settings.prefetch, BasicQosOptions::default())
            .await
            .map_err(|e| QueueError::ConnectionFailed {
                message: e.to_string(),
            })?;

        let consumer = channel
            .basic_consume(
                settings.queue.as_str(),
                "",
                BasicConsumeOptions::default(),
                FieldTable::default(),
            )
            .await
            .map_err(|e| QueueError::ConsumeFailed {
                message: e.to_string(),
            })?;

        info!(
            queue = %settings.queue,
            prefetch = settings.prefetch,
            "consuming with manual acknowledgment"
        );

        Ok(Self {
            channel,
            consumer,
            _connection: connection,
        })
    }
}

#[async_trait]
impl QueueConsumer for AmqpConsumer {
    async fn next_message(&mut self) -> Result<Option<ReceivedMessage>, QueueError> {
        match self.consumer.next().await {
            None => Ok(None),
            Some(Err(e)) => Err(QueueError::ConsumeFailed {
                message: e.to_string(),
            }),
            Some(Ok(delivery)) => {
                debug!(
                    tag = delivery.delivery_tag,
                    redelivered = delivery.redelivered,
                    "message received"
                );

                Ok(Some(ReceivedMessage {
                    message_id: MessageId::new(),
                    receipt: ReceiptHandle::new(delivery.delivery_tag),
                    redelivered: delivery.redelivered,
                    body: Bytes::from(delivery.data),
                }))
            }
        }
    }

    async fn ack(&mut self, receipt: ReceiptHandle) -> Result<(), QueueError> {
        self.channel
            .basic_ack(receipt.tag(), BasicAckOptions::default())
            .await
            .map_err(|e| QueueError::SettleFailed {
                tag: receipt.tag(),
                message: e.to_string(),
            })
    }

    async fn reject(&mut self, receipt: ReceiptHandle, requeue: bool) -> Result<(), QueueError> {
        self.channel
            .basic_nack(
                receipt.tag(),
                BasicNackOptions {
                    multiple: false,
                    requeue,
                },
            )
            .await
            .map_err(|e| QueueError::SettleFailed {
                tag: receipt.tag(),
                message: e.to_string(),
            })
    }
}
