use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Broker error: {0}")]
    Broker(#[from] lapin::Error),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Remote task failed: worker reported failure for request {correlation_id}")]
    RemoteTaskFailed { correlation_id: String },

    #[error("Malformed reply for request {correlation_id}: {detail}")]
    MalformedReply {
        correlation_id: String,
        detail: String,
    },

    #[error("Request {correlation_id} timed out after {waited_secs}s")]
    RequestTimedOut {
        correlation_id: String,
        waited_secs: u64,
    },

    #[error("Request {correlation_id} was cancelled")]
    RequestCancelled { correlation_id: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
