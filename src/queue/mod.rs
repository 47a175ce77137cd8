mod amqp;

pub use amqp::AmqpTaskQueue;

use crate::Result;
use async_trait::async_trait;

/// An incoming message on the reply queue, reduced to the two fields the
/// reply router cares about.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub correlation_id: Option<String>,
    pub body: Vec<u8>,
}

/// Metadata attached to a published task so the worker knows where to send
/// its answer and which request it answers.
#[derive(Debug, Clone)]
pub struct PublishProperties {
    pub reply_to: String,
    pub correlation_id: String,
}

/// Broker seam used by the request dispatcher. The implementation owns the
/// work queue name and the exclusive reply queue; replies are delivered to
/// the reply router out of band by a listener task.
#[async_trait]
pub trait TaskQueue: Send + Sync {
    /// Name of this client's exclusive reply queue, attached as the
    /// `reply_to` property on every published task.
    fn reply_queue(&self) -> &str;

    async fn publish(&self, properties: PublishProperties, body: Vec<u8>) -> Result<()>;
}
