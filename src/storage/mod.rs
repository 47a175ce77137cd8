mod http;

pub use http::HttpObjectStore;

use crate::Result;
use async_trait::async_trait;
use std::path::Path;

/// File name of the first (and currently only) artifact a worker produces
/// for a request.
pub const ARTIFACT_FILE_NAME: &str = "0.png";

/// Storage key of a request's artifact, derived from its correlation id.
/// The worker uploads to this convention; nothing in the reply names it.
pub fn artifact_key(prefix: &str, correlation_id: &str) -> String {
    format!("{prefix}/{correlation_id}/{ARTIFACT_FILE_NAME}")
}

/// Read-side object-store seam. Only fetching is needed here: uploads are
/// the worker's business.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Downloads the object at `key` to the local file `dest`.
    async fn fetch(&self, key: &str, dest: &Path) -> Result<()>;
}
