mod client;
mod router;
mod types;

pub use client::TaskClient;
pub use router::ReplyRouter;
pub use types::{FAILURE_SENTINEL, StoredArtifact, TaskKind, TaskRequest, TaskSpec};
