use super::ObjectStore;
use crate::{Error, Result, config::StorageConfig};
use async_trait::async_trait;
use std::path::Path;
use tracing::debug;

/// Object store reached through an HTTP gateway (bucket endpoint): objects
/// are fetched with a plain GET of `<base_url>/<key>`.
pub struct HttpObjectStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpObjectStore {
    pub fn new(config: &StorageConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for HttpObjectStore {
    async fn fetch(&self, key: &str, dest: &Path) -> Result<()> {
        let url = format!("{}/{}", self.base_url, key);
        debug!("Fetching {} to {}", url, dest.display());

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(Error::storage(format!(
                "GET {} returned {}",
                url,
                response.status()
            )));
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(dest, &bytes).await?;
        Ok(())
    }
}
