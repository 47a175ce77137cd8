use crate::queue::Delivery;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::oneshot;
use tracing::{debug, warn};

/// Routes reply-queue deliveries to the request awaiting them.
///
/// Each in-flight request registers its correlation id and gets back a
/// single-assignment receiver; the broker listener feeds every delivery
/// through [`ReplyRouter::route`], which completes the matching slot and
/// silently drops everything else. Multiple outstanding requests are safe:
/// slots are keyed by correlation id, never shared.
#[derive(Default)]
pub struct ReplyRouter {
    pending: Mutex<HashMap<String, oneshot::Sender<Vec<u8>>>>,
}

impl ReplyRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a pending slot for `correlation_id` and returns the receiver
    /// that will resolve with the reply body.
    pub fn register(&self, correlation_id: &str) -> oneshot::Receiver<Vec<u8>> {
        let (tx, rx) = oneshot::channel();
        let previous = self
            .pending
            .lock()
            .unwrap()
            .insert(correlation_id.to_string(), tx);
        if previous.is_some() {
            // Correlation ids are fresh UUIDs, so this indicates a caller bug.
            warn!(
                "Replaced existing pending slot for correlation id {}",
                correlation_id
            );
        }
        rx
    }

    /// Removes the pending slot for `correlation_id`, if any. Called on every
    /// non-success exit path (timeout, cancellation, publish failure) so the
    /// map never accumulates dead entries.
    pub fn discard(&self, correlation_id: &str) {
        self.pending.lock().unwrap().remove(correlation_id);
    }

    /// Delivers an incoming message to the matching pending slot. Messages
    /// with no correlation id, or with an id nobody is waiting on (stale or
    /// foreign), are dropped, not queued.
    pub fn route(&self, delivery: Delivery) {
        let Some(correlation_id) = delivery.correlation_id else {
            warn!("Dropping reply without correlation id");
            return;
        };

        let slot = self.pending.lock().unwrap().remove(&correlation_id);
        match slot {
            Some(tx) => {
                if tx.send(delivery.body).is_err() {
                    debug!(
                        "Waiter for correlation id {} gone, dropping reply",
                        correlation_id
                    );
                }
            }
            None => {
                debug!(
                    "Dropping reply for unknown correlation id {}",
                    correlation_id
                );
            }
        }
    }

    pub fn is_pending(&self, correlation_id: &str) -> bool {
        self.pending.lock().unwrap().contains_key(correlation_id)
    }
}
