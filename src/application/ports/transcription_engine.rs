use async_trait::async_trait;

use crate::domain::{Segment, TranscriptionTask};

use super::AudioSlice;

/// Options forwarded to the engine for one bounded call.
///
/// An unset `language` is omitted from the engine invocation entirely so
/// the engine's own default (auto-detection) applies.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub language: Option<String>,
    pub task: TranscriptionTask,
}

/// What the engine returns for one bounded clip: full text, ordered
/// segments in clip-local time, and the language it detected.
#[derive(Debug, Clone)]
pub struct EngineOutput {
    pub text: String,
    pub segments: Vec<Segment>,
    pub detected_language: Option<String>,
}

/// Black-box bounded-duration transcription function.
///
/// The engine is typically a single shared, GPU-resident resource; callers
/// must not assume concurrent invocations are safe. The orchestrator
/// serializes access through its admission gate.
#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    /// Whether the engine has finished initializing and can accept work.
    fn is_ready(&self) -> bool;

    async fn transcribe(
        &self,
        audio: AudioSlice,
        options: &EngineOptions,
    ) -> Result<EngineOutput, EngineError>;
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
