use async_trait::async_trait;
use deco_dispatch::{
    Error, Result,
    config::{BrokerConfig, Config, LogsConfig, RequestConfig, StorageConfig},
    queue::{Delivery, PublishProperties, TaskQueue},
    rpc::ReplyRouter,
    storage::ObjectStore,
};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Mock task queue for testing. Publishing records the outgoing message and,
/// depending on the script, immediately routes replies back through the
/// reply router the way a (very fast) worker would.
pub struct MockTaskQueue {
    pub reply_queue: String,
    pub published: Arc<Mutex<Vec<(PublishProperties, Vec<u8>)>>>,
    pub publish_error: Option<String>,
    /// Reply body routed back tagged with the published correlation id.
    /// `None` means the worker stays silent.
    pub reply_body: Option<Vec<u8>>,
    /// Extra reply routed back first, tagged with a foreign correlation id.
    pub foreign_reply: Option<(String, Vec<u8>)>,
    router: Arc<ReplyRouter>,
}

impl MockTaskQueue {
    pub fn new(router: Arc<ReplyRouter>) -> Self {
        Self {
            reply_queue: "amq.gen-test-reply-queue".to_string(),
            published: Arc::new(Mutex::new(Vec::new())),
            publish_error: None,
            reply_body: None,
            foreign_reply: None,
            router,
        }
    }

    pub fn with_reply(mut self, body: &[u8]) -> Self {
        self.reply_body = Some(body.to_vec());
        self
    }

    pub fn with_foreign_reply(mut self, correlation_id: &str, body: &[u8]) -> Self {
        self.foreign_reply = Some((correlation_id.to_string(), body.to_vec()));
        self
    }

    pub fn with_publish_error(mut self, error: &str) -> Self {
        self.publish_error = Some(error.to_string());
        self
    }
}

#[async_trait]
impl TaskQueue for MockTaskQueue {
    fn reply_queue(&self) -> &str {
        &self.reply_queue
    }

    async fn publish(&self, properties: PublishProperties, body: Vec<u8>) -> Result<()> {
        let correlation_id = properties.correlation_id.clone();
        self.published.lock().unwrap().push((properties, body));

        if let Some(ref error) = self.publish_error {
            return Err(Error::internal(error.clone()));
        }

        if let Some((foreign_id, foreign_body)) = &self.foreign_reply {
            self.router.route(Delivery {
                correlation_id: Some(foreign_id.clone()),
                body: foreign_body.clone(),
            });
        }

        if let Some(body) = &self.reply_body {
            self.router.route(Delivery {
                correlation_id: Some(correlation_id),
                body: body.clone(),
            });
        }

        Ok(())
    }
}

/// Mock object store for testing: records every fetch and writes scripted
/// content to the destination file.
pub struct MockObjectStore {
    pub fetches: Arc<Mutex<Vec<(String, PathBuf)>>>,
    pub fetch_error: Option<String>,
    pub content: Vec<u8>,
}

impl MockObjectStore {
    pub fn new() -> Self {
        Self {
            fetches: Arc::new(Mutex::new(Vec::new())),
            fetch_error: None,
            content: b"png-bytes".to_vec(),
        }
    }

    pub fn with_fetch_error(mut self, error: &str) -> Self {
        self.fetch_error = Some(error.to_string());
        self
    }
}

impl Default for MockObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ObjectStore for MockObjectStore {
    async fn fetch(&self, key: &str, dest: &Path) -> Result<()> {
        self.fetches
            .lock()
            .unwrap()
            .push((key.to_string(), dest.to_path_buf()));

        if let Some(ref error) = self.fetch_error {
            return Err(Error::storage(error.clone()));
        }

        tokio::fs::write(dest, &self.content).await?;
        Ok(())
    }
}

/// Config pointed at a scratch directory for the local artifact cache.
pub fn create_test_config(local_dir: &Path) -> Config {
    Config {
        broker: BrokerConfig {
            url: "amqp://localhost:5672/%2f".to_string(),
            work_queue: "image-edit".to_string(),
        },
        storage: StorageConfig {
            base_url: "http://localhost:9000".to_string(),
            bucket: "livedeco-test".to_string(),
            artifact_prefix: "AIGCs".to_string(),
            local_dir: local_dir.to_string_lossy().to_string(),
        },
        request: RequestConfig { timeout_secs: 5 },
        logs: LogsConfig::default(),
    }
}
