use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::application::ports::{EngineError, EngineOptions, NormalizedAudio, TranscriptionEngine};
use crate::domain::{Segment, Transcript, TranscriptionTask};

use super::chunk_planner;

/// Windowing parameters for the chunked path.
#[derive(Debug, Clone, Copy)]
pub struct ChunkingConfig {
    /// Below this duration the engine is invoked once on the whole clip.
    /// Single-shot invocation avoids boundary artifacts and is preferred
    /// whenever the engine's practical limits allow it.
    pub single_call_threshold_sec: u64,
    pub window_ms: u64,
    pub overlap_ms: u64,
    /// Hard ceiling, rejected before any engine work.
    pub max_duration_sec: u64,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            single_call_threshold_sec: 5 * 60,
            window_ms: 10 * 60 * 1000,
            overlap_ms: 1000,
            max_duration_sec: 4 * 60 * 60,
        }
    }
}

/// Drives the engine across one upload: short audio goes through a single
/// engine call, long audio is windowed, transcribed window by window, and
/// merged back into one continuous transcript.
pub struct TranscriptionService<E>
where
    E: TranscriptionEngine,
{
    engine: Arc<E>,
    config: ChunkingConfig,
    /// Admission gate for engine access. The engine is a single shared
    /// resource; permits are sized to the number of invocations known to
    /// be safe concurrently (one unless proven otherwise).
    engine_gate: Semaphore,
}

impl<E> TranscriptionService<E>
where
    E: TranscriptionEngine,
{
    pub fn new(engine: Arc<E>, config: ChunkingConfig, engine_concurrency: usize) -> Self {
        Self {
            engine,
            config,
            engine_gate: Semaphore::new(engine_concurrency.max(1)),
        }
    }

    pub fn config(&self) -> &ChunkingConfig {
        &self.config
    }

    pub async fn transcribe(
        &self,
        audio: &dyn NormalizedAudio,
        language: Option<&str>,
        task: TranscriptionTask,
    ) -> Result<Transcript, TranscribeError> {
        if !self.engine.is_ready() {
            return Err(TranscribeError::EngineUnavailable);
        }

        let duration_ms = audio.duration_ms();
        let duration_sec = duration_ms as f64 / 1000.0;
        if duration_sec > self.config.max_duration_sec as f64 {
            return Err(TranscribeError::InputTooLong {
                duration_sec,
                max_sec: self.config.max_duration_sec,
            });
        }

        let _permit = self
            .engine_gate
            .acquire()
            .await
            .map_err(|_| TranscribeError::EngineUnavailable)?;

        let options = EngineOptions {
            language: language.map(String::from),
            task,
        };

        if duration_sec < self.config.single_call_threshold_sec as f64 {
            self.transcribe_single(audio, duration_ms, &options).await
        } else {
            self.transcribe_chunked(audio, duration_ms, &options).await
        }
    }

    /// Single-window path: one engine call on the whole clip, returned
    /// directly with no merge step.
    async fn transcribe_single(
        &self,
        audio: &dyn NormalizedAudio,
        duration_ms: u64,
        options: &EngineOptions,
    ) -> Result<Transcript, TranscribeError> {
        let slice = audio.slice(0, duration_ms);
        let output = self
            .engine
            .transcribe(slice, options)
            .await
            .map_err(|source| TranscribeError::EngineCallFailed { window: 0, source })?;

        Ok(Transcript {
            text: output.text.trim().to_string(),
            segments: output.segments,
            detected_language: output.detected_language,
            duration_sec: duration_ms as f64 / 1000.0,
            chunked: false,
        })
    }

    async fn transcribe_chunked(
        &self,
        audio: &dyn NormalizedAudio,
        duration_ms: u64,
        options: &EngineOptions,
    ) -> Result<Transcript, TranscribeError> {
        let windows =
            chunk_planner::plan(duration_ms, self.config.window_ms, self.config.overlap_ms);
        let stride_sec = chunk_planner::stride_sec(self.config.window_ms, self.config.overlap_ms);

        tracing::info!(
            windows = windows.len(),
            duration_sec = duration_ms as f64 / 1000.0,
            "Transcribing in windows"
        );

        let mut segments: Vec<Segment> = Vec::new();
        let mut texts: Vec<String> = Vec::with_capacity(windows.len());
        let mut language_votes: Vec<String> = Vec::new();

        // Strictly sequential: the engine is not assumed safe for
        // concurrent calls on one loaded instance.
        for window in &windows {
            tracing::debug!(
                window = window.index,
                total = windows.len(),
                start_ms = window.start_ms,
                end_ms = window.end_ms,
                "Processing window"
            );

            // The slice is dropped at the end of the iteration, engine
            // failure included.
            let slice = audio.slice(window.start_ms, window.end_ms);
            let output = self.engine.transcribe(slice, options).await.map_err(|source| {
                TranscribeError::EngineCallFailed {
                    window: window.index,
                    source,
                }
            })?;

            // Shift by the window's stride offset, not its raw start:
            // windows overlap, and using start_ms would count the
            // overlapped region twice and drift timestamps forward.
            let offset_sec = window.index as f64 * stride_sec;
            segments.extend(output.segments.iter().map(|s| s.offset_by(offset_sec)));
            texts.push(output.text.trim().to_string());
            if let Some(lang) = output.detected_language {
                language_votes.push(lang);
            }
        }

        Ok(Transcript {
            text: texts.join(" "),
            segments,
            detected_language: merge_language(&language_votes),
            duration_sec: duration_ms as f64 / 1000.0,
            chunked: true,
        })
    }
}

/// Majority vote across per-window detections; the first-seen language
/// wins ties. Multi-window audio has no single authoritative detection,
/// so the most frequent one is reported.
fn merge_language(votes: &[String]) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for lang in votes {
        *counts.entry(lang.as_str()).or_insert(0) += 1;
    }

    let mut best: Option<(&String, usize)> = None;
    for lang in votes {
        let count = counts[lang.as_str()];
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((lang, count));
        }
    }
    best.map(|(lang, _)| lang.clone())
}

#[derive(Debug, thiserror::Error)]
pub enum TranscribeError {
    #[error("audio is {duration_sec:.1}s long, exceeding the {max_sec}s ceiling")]
    InputTooLong { duration_sec: f64, max_sec: u64 },
    #[error("engine is not ready")]
    EngineUnavailable,
    #[error("engine call for window {window} failed: {source}")]
    EngineCallFailed {
        window: usize,
        #[source]
        source: EngineError,
    },
}
