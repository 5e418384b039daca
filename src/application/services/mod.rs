pub mod chunk_planner;
mod result_cache;
mod transcription_service;

pub use result_cache::ResultCache;
pub use transcription_service::{ChunkingConfig, TranscribeError, TranscriptionService};
