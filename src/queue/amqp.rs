use super::{Delivery, PublishProperties, TaskQueue};
use crate::{Result, config::BrokerConfig, rpc::ReplyRouter};
use async_trait::async_trait;
use futures_util::StreamExt;
use lapin::{
    BasicProperties, Channel, Connection, ConnectionProperties,
    options::{BasicConsumeOptions, BasicPublishOptions, QueueDeclareOptions},
    types::FieldTable,
};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// AMQP-backed task queue. Connecting declares an exclusive, anonymous,
/// auto-deleted reply queue and spawns a listener task that consumes it with
/// automatic acknowledgement (at-most-once delivery) and feeds every message
/// to the reply router.
pub struct AmqpTaskQueue {
    // Dropping the connection closes the channel, so it lives here.
    _connection: Connection,
    channel: Channel,
    work_queue: String,
    reply_queue: String,
}

impl AmqpTaskQueue {
    pub async fn connect(config: &BrokerConfig, router: Arc<ReplyRouter>) -> Result<Self> {
        info!("Connecting to broker at {}", config.url);
        let connection = Connection::connect(&config.url, ConnectionProperties::default()).await?;
        let channel = connection.create_channel().await?;

        // Empty queue name lets the broker pick a unique one for us.
        let queue = channel
            .queue_declare(
                "",
                QueueDeclareOptions {
                    exclusive: true,
                    auto_delete: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;
        let reply_queue = queue.name().as_str().to_string();
        debug!("Declared reply queue: {}", reply_queue);

        let mut consumer = channel
            .basic_consume(
                &reply_queue,
                "reply-listener",
                BasicConsumeOptions {
                    no_ack: true,
                    ..Default::default()
                },
                FieldTable::default(),
            )
            .await?;

        tokio::spawn(async move {
            while let Some(delivery) = consumer.next().await {
                match delivery {
                    Ok(delivery) => {
                        let correlation_id = delivery
                            .properties
                            .correlation_id()
                            .as_ref()
                            .map(|id| id.as_str().to_string());
                        router.route(Delivery {
                            correlation_id,
                            body: delivery.data,
                        });
                    }
                    Err(e) => {
                        warn!("Reply consumer error, stopping listener: {}", e);
                        break;
                    }
                }
            }
        });

        Ok(Self {
            _connection: connection,
            channel,
            work_queue: config.work_queue.clone(),
            reply_queue,
        })
    }
}

#[async_trait]
impl TaskQueue for AmqpTaskQueue {
    fn reply_queue(&self) -> &str {
        &self.reply_queue
    }

    async fn publish(&self, properties: PublishProperties, body: Vec<u8>) -> Result<()> {
        debug!(
            "Publishing task {} to {} ({} bytes)",
            properties.correlation_id,
            self.work_queue,
            body.len()
        );

        // The work queue name doubles as exchange and routing key.
        self.channel
            .basic_publish(
                &self.work_queue,
                &self.work_queue,
                BasicPublishOptions::default(),
                &body,
                BasicProperties::default()
                    .with_reply_to(properties.reply_to.into())
                    .with_correlation_id(properties.correlation_id.into()),
            )
            .await?
            .await?;

        Ok(())
    }
}
