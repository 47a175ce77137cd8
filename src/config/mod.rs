mod types;

pub use types::*;

use crate::Result;
use std::env;
use tracing::debug;

pub async fn load() -> Result<Config> {
    let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.yaml".to_string());

    debug!("Loading configuration from: {}", config_path);

    let config_str = tokio::fs::read_to_string(&config_path).await?;
    let mut config: Config = serde_yaml::from_str(&config_str)?;

    // QUEUE_NAME names both the exchange and the routing key for task
    // publishing and takes precedence over the config file.
    if let Ok(queue_name) = env::var("QUEUE_NAME") {
        debug!("QUEUE_NAME override: {}", queue_name);
        config.broker.work_queue = queue_name;
    }

    Ok(config)
}
