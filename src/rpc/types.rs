use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Literal reply body a worker sends when it could not produce the artifact.
/// Any other reply body is a success acknowledgement.
pub const FAILURE_SENTINEL: &[u8] = b"failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Inpaint,
}

/// Wire payload published to the work queue. Field spelling matches what the
/// worker fleet expects; immutable once published.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    pub bucket: String,
    #[serde(rename = "sourceUrl")]
    pub source_url: String,
    #[serde(rename = "packageId")]
    pub package_id: String,
    pub request_type: TaskKind,
    #[serde(flatten)]
    pub params: HashMap<String, String>,
}

/// Caller-facing description of a task, before a correlation id and bucket
/// are attached by the dispatcher.
#[derive(Debug, Clone)]
pub struct TaskSpec {
    pub source_url: String,
    pub kind: TaskKind,
    pub params: HashMap<String, String>,
}

impl TaskSpec {
    pub fn new(source_url: impl Into<String>, kind: TaskKind) -> Self {
        Self {
            source_url: source_url.into(),
            kind,
            params: HashMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Inpainting task: replace the furniture located by the detection prompt
    /// with the desired furniture described by the inpaint prompt.
    pub fn inpaint(
        source_url: impl Into<String>,
        dino_text_prompt: impl Into<String>,
        inpaint_prompt: impl Into<String>,
    ) -> Self {
        Self::new(source_url, TaskKind::Inpaint)
            .with_param("dino_text_prompt", dino_text_prompt)
            .with_param("inpaint_prompt", inpaint_prompt)
    }
}

/// A successfully resolved task result: where the artifact lives remotely
/// and where it was cached locally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredArtifact {
    pub correlation_id: String,
    pub remote_key: String,
    pub local_path: std::path::PathBuf,
}
