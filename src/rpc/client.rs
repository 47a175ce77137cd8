use super::router::ReplyRouter;
use super::types::{FAILURE_SENTINEL, StoredArtifact, TaskRequest, TaskSpec};
use crate::{
    Error, Result,
    config::Config,
    queue::{PublishProperties, TaskQueue},
    storage::{ARTIFACT_FILE_NAME, ObjectStore, artifact_key},
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Request dispatcher: publishes a task with a fresh correlation id and
/// reply-to metadata, suspends until the matching reply arrives, then
/// resolves the reply into a downloaded artifact.
pub struct TaskClient {
    queue: Box<dyn TaskQueue>,
    store: Box<dyn ObjectStore>,
    router: Arc<ReplyRouter>,
    bucket: String,
    artifact_prefix: String,
    local_dir: PathBuf,
    default_timeout: Duration,
}

impl TaskClient {
    pub fn new(
        queue: Box<dyn TaskQueue>,
        store: Box<dyn ObjectStore>,
        router: Arc<ReplyRouter>,
        config: &Config,
    ) -> Self {
        Self {
            queue,
            store,
            router,
            bucket: config.storage.bucket.clone(),
            artifact_prefix: config.storage.artifact_prefix.clone(),
            local_dir: PathBuf::from(&config.storage.local_dir),
            default_timeout: Duration::from_secs(config.request.timeout_secs),
        }
    }

    /// Dispatches `task` and waits for its reply with the configured default
    /// deadline and no external cancellation.
    pub async fn submit(&self, task: TaskSpec) -> Result<StoredArtifact> {
        self.submit_with(task, self.default_timeout, CancellationToken::new())
            .await
    }

    /// Dispatches `task`, waiting at most `deadline` for the worker's reply.
    /// Cancelling `cancel` abandons the wait. On timeout, cancellation, or
    /// publish failure the pending slot is removed before returning, so the
    /// router never accumulates dead entries.
    pub async fn submit_with(
        &self,
        task: TaskSpec,
        deadline: Duration,
        cancel: CancellationToken,
    ) -> Result<StoredArtifact> {
        let correlation_id = Uuid::new_v4().to_string();
        info!("Dispatching {:?} task as {}", task.kind, correlation_id);

        let request = TaskRequest {
            bucket: self.bucket.clone(),
            source_url: task.source_url,
            package_id: correlation_id.clone(),
            request_type: task.kind,
            params: task.params,
        };
        let body = serde_json::to_vec(&request)?;

        // Register before publishing so a fast reply cannot slip past us.
        let pending = self.router.register(&correlation_id);
        let properties = PublishProperties {
            reply_to: self.queue.reply_queue().to_string(),
            correlation_id: correlation_id.clone(),
        };
        if let Err(e) = self.queue.publish(properties, body).await {
            self.router.discard(&correlation_id);
            return Err(e);
        }

        debug!("Awaiting reply for {}", correlation_id);
        let reply = tokio::select! {
            _ = cancel.cancelled() => {
                self.router.discard(&correlation_id);
                return Err(Error::RequestCancelled { correlation_id });
            }
            outcome = timeout(deadline, pending) => match outcome {
                Err(_) => {
                    self.router.discard(&correlation_id);
                    return Err(Error::RequestTimedOut {
                        correlation_id,
                        waited_secs: deadline.as_secs(),
                    });
                }
                Ok(Err(_)) => {
                    self.router.discard(&correlation_id);
                    return Err(Error::internal("reply channel closed while waiting"));
                }
                Ok(Ok(body)) => body,
            },
        };

        self.resolve(&correlation_id, &reply).await
    }

    /// Result resolver: a failure-sentinel reply fails without touching
    /// storage; any other reply triggers exactly one fetch of the artifact at
    /// the conventional key into the local cache directory. Not cached:
    /// resolving the same reply twice fetches twice, same local path.
    pub async fn resolve(&self, correlation_id: &str, reply: &[u8]) -> Result<StoredArtifact> {
        if reply == FAILURE_SENTINEL {
            warn!("Worker reported failure for request {}", correlation_id);
            return Err(Error::RemoteTaskFailed {
                correlation_id: correlation_id.to_string(),
            });
        }

        let remote_key = artifact_key(&self.artifact_prefix, correlation_id);
        let local_dir = self.local_dir.join(correlation_id);
        tokio::fs::create_dir_all(&local_dir).await?;
        let local_path = local_dir.join(ARTIFACT_FILE_NAME);

        match self.store.fetch(&remote_key, &local_path).await {
            Ok(()) => {
                info!(
                    "Fetched artifact {} to {}",
                    remote_key,
                    local_path.display()
                );
                Ok(StoredArtifact {
                    correlation_id: correlation_id.to_string(),
                    remote_key,
                    local_path,
                })
            }
            Err(e) => Err(Error::MalformedReply {
                correlation_id: correlation_id.to_string(),
                detail: format!("artifact {remote_key} not fetchable: {e}"),
            }),
        }
    }
}
