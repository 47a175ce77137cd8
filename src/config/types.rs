use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub broker: BrokerConfig,
    pub storage: StorageConfig,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub logs: LogsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerConfig {
    pub url: String,
    /// Work queue name, used as both the exchange and the routing key when
    /// publishing tasks. Overridden by the `QUEUE_NAME` environment variable.
    pub work_queue: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Base URL of the object-store HTTP gateway, e.g. the bucket endpoint.
    pub base_url: String,
    pub bucket: String,
    #[serde(default = "default_artifact_prefix")]
    pub artifact_prefix: String,
    #[serde(default = "default_local_dir")]
    pub local_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for LogsConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_artifact_prefix() -> String {
    "AIGCs".to_string()
}

fn default_local_dir() -> String {
    "local_images".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

fn default_log_level() -> String {
    "info".to_string()
}
