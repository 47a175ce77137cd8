use anyhow::Result;
use deco_dispatch::{
    config,
    queue::AmqpTaskQueue,
    rpc::{ReplyRouter, TaskClient, TaskSpec},
    storage::HttpObjectStore,
};
use std::sync::Arc;
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    // Determine log level: environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());

    if let Err(e) = validate_log_level(&log_level) {
        eprintln!("{}", e);
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.parse().unwrap()),
        )
        .json()
        .init();

    let mut args = std::env::args().skip(1);
    let (source_url, dino_prompt, inpaint_prompt) =
        match (args.next(), args.next(), args.next()) {
            (Some(s), Some(d), Some(i)) => (s, d, i),
            _ => {
                eprintln!(
                    "Usage: deco-dispatch <source-image-key> <detect-prompt> <inpaint-prompt>"
                );
                std::process::exit(2);
            }
        };

    info!(
        "Starting deco-dispatch against work queue: {}",
        config.broker.work_queue
    );

    let router = Arc::new(ReplyRouter::new());
    let queue = AmqpTaskQueue::connect(&config.broker, router.clone()).await?;
    let store = HttpObjectStore::new(&config.storage);
    let client = TaskClient::new(Box::new(queue), Box::new(store), router, &config);

    let artifact = client
        .submit(TaskSpec::inpaint(source_url, dino_prompt, inpaint_prompt))
        .await?;

    info!(
        "Task {} complete, artifact at {}",
        artifact.correlation_id, artifact.remote_key
    );
    println!("{}", artifact.local_path.display());

    Ok(())
}
